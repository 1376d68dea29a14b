//! Perception компоненты: sight config, результат восприятия, tracked target.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Параметры зрения наблюдателя
///
/// Автоматически добавляет Perception через Required Components.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[require(Perception)]
#[serde(default)]
pub struct SightConfig {
    /// Дальность зрения (метры)
    pub view_distance: f32,
    /// Полная ширина конуса (градусы)
    pub view_angle: f32,
    /// Смещение глаз от position (выше земли и собственного коллайдера)
    pub eye_offset: Vec3,
    /// Высота "центра" цели над её position (куда целимся linecast'ом)
    pub target_center_height: f32,
}

impl Default for SightConfig {
    fn default() -> Self {
        Self {
            view_distance: 10.0,
            view_angle: 90.0,
            eye_offset: Vec3::new(0.0, 1.5, 0.0),
            target_center_height: 1.0,
        }
    }
}

impl SightConfig {
    /// Половина конуса в радианах
    pub fn half_angle_radians(&self) -> f32 {
        (self.view_angle * 0.5).to_radians()
    }
}

/// Почему цель видна или не видна (diagnostic only)
#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect)]
pub enum PerceptionStatus {
    /// Ещё не считали или цели нет
    #[default]
    Searching,
    TooFar,
    OutsideAngle,
    Visible,
    /// Linecast ничего не задел (у цели нет коллайдера?)
    NoHit,
    /// Первым задели не цель
    Blocked {
        by: Entity,
        point: Vec3,
    },
}

impl fmt::Display for PerceptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PerceptionStatus::Searching => write!(f, "Searching..."),
            PerceptionStatus::TooFar => write!(f, "Player too far"),
            PerceptionStatus::OutsideAngle => write!(f, "Player outside angle"),
            PerceptionStatus::Visible => write!(f, "I SEE YOU!"),
            PerceptionStatus::NoHit => write!(f, "Path clear, but no hit (Missing Collider?)"),
            PerceptionStatus::Blocked { by, .. } => write!(f, "Blocked by: {}", by),
        }
    }
}

/// Отрезок последней проверки line-of-sight (для debug_view)
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct SightLine {
    /// Глаза наблюдателя
    pub from: Vec3,
    /// Центр цели
    pub to: Vec3,
    /// Точка первого попадания (None = ничего не задели)
    pub hit: Option<Vec3>,
}

/// Результат восприятия за текущий тик
///
/// Пересчитывается полностью каждый тик, истории нет.
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Perception {
    pub can_see: bool,
    pub status: PerceptionStatus,
    /// Человекочитаемый статус (имя блокирующего объекта если есть Name)
    pub debug_status: String,
    /// Есть только если дошли до linecast'а
    pub sight_line: Option<SightLine>,
}

impl Default for Perception {
    fn default() -> Self {
        Self::not_visible(PerceptionStatus::Searching)
    }
}

impl Perception {
    pub fn not_visible(status: PerceptionStatus) -> Self {
        Self {
            can_see: false,
            debug_status: status.to_string(),
            status,
            sight_line: None,
        }
    }

    /// Entity которая перекрыла обзор (только для Blocked)
    pub fn obstruction(&self) -> Option<Entity> {
        match self.status {
            PerceptionStatus::Blocked { by, .. } => Some(by),
            _ => None,
        }
    }
}

/// Marker: цель которую ищут наблюдатели (игрок)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Player;

/// Resource: отслеживаемая цель (ищется один раз при старте по Player marker)
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct TrackedTarget {
    pub entity: Option<Entity>,
}

impl TrackedTarget {
    /// Текущая позиция цели (None если не найдена или despawned)
    pub fn position(&self, transforms: &Query<&Transform>) -> Option<Vec3> {
        let entity = self.entity?;
        transforms.get(entity).ok().map(|t| t.translation)
    }
}

/// Форма коллайдера для headless linecast'ов
#[derive(Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
pub enum BlockerShape {
    Ball { radius: f32 },
    /// Axis-aligned box (rotation игнорируется)
    Cuboid { half_extents: Vec3 },
}

/// Компонент: entity перекрывает линию взгляда (стены, игрок, враги)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct SightBlocker {
    pub shape: BlockerShape,
    /// Смещение центра формы от Transform.translation
    pub offset: Vec3,
}

impl SightBlocker {
    pub fn ball(radius: f32) -> Self {
        Self {
            shape: BlockerShape::Ball { radius },
            offset: Vec3::ZERO,
        }
    }

    pub fn cuboid(half_extents: Vec3) -> Self {
        Self {
            shape: BlockerShape::Cuboid { half_extents },
            offset: Vec3::ZERO,
        }
    }

    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }
}

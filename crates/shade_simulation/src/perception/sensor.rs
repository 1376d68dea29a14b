//! Perception sensor: может ли наблюдатель видеть цель в этом тике.
//!
//! Порядок проверок (short-circuit на первой неудаче):
//! 1. Distance: дальше view_distance → TooFar
//! 2. Angle: угол к forward больше view_angle / 2 → OutsideAngle
//! 3. Line-of-sight: linecast от глаз к центру цели
//!    - первым задели цель → Visible
//!    - первым задели другое → Blocked { by }
//!    - не задели ничего → NoHit (НЕ считается видимостью)

use bevy::prelude::*;

use super::components::{Perception, PerceptionStatus, SightConfig, SightLine};

/// Первое пересечение отрезка со сценой
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub point: Vec3,
    pub surface: Entity,
}

/// Spatial query: отрезок vs сцена
///
/// Реализации: SceneColliders (headless), RapierLinecast (bevy_rapier3d).
/// Пустой результат: валидный исход, не ошибка.
pub trait Linecast {
    /// Ближайшее пересечение на отрезке `from → to`
    fn linecast(&self, from: Vec3, to: Vec3) -> Option<RayHit>;
}

impl<T: Linecast + ?Sized> Linecast for &T {
    fn linecast(&self, from: Vec3, to: Vec3) -> Option<RayHit> {
        (**self).linecast(from, to)
    }
}

/// Снимок наблюдателя на момент тика (read-only)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observer {
    pub position: Vec3,
    /// Направление взгляда (unit vector)
    pub forward: Vec3,
    pub config: SightConfig,
}

impl Observer {
    pub fn new(position: Vec3, forward: Vec3, config: SightConfig) -> Self {
        Self {
            position,
            forward,
            config,
        }
    }

    /// Bevy convention: forward = -Z локального пространства
    pub fn from_transform(transform: &Transform, config: &SightConfig) -> Self {
        Self::new(transform.translation, *transform.forward(), *config)
    }

    /// Начало sight-луча
    pub fn eye(&self) -> Vec3 {
        self.position + self.config.eye_offset
    }
}

/// Evaluate perception для одной пары observer → target
///
/// `is_target` решает "это попадание в цель?" (аналог проверки tag'а:
/// любой коллайдер помеченный как игрок).
pub fn evaluate_perception(
    observer: &Observer,
    target_position: Vec3,
    is_target: impl Fn(Entity) -> bool,
    scene: &impl Linecast,
) -> Perception {
    let config = &observer.config;

    // 1. Distance
    if observer.position.distance(target_position) > config.view_distance {
        return Perception::not_visible(PerceptionStatus::TooFar);
    }

    // 2. Angle
    let dir_to_target = (target_position - observer.position).normalize_or_zero();
    if angle_between(observer.forward, dir_to_target) > config.half_angle_radians() {
        return Perception::not_visible(PerceptionStatus::OutsideAngle);
    }

    // 3. Line of sight
    let from = observer.eye();
    let to = target_position + Vec3::Y * config.target_center_height;

    let (can_see, status, hit) = match scene.linecast(from, to) {
        None => (false, PerceptionStatus::NoHit, None),
        Some(hit) if is_target(hit.surface) => (true, PerceptionStatus::Visible, Some(hit.point)),
        Some(hit) => (
            false,
            PerceptionStatus::Blocked {
                by: hit.surface,
                point: hit.point,
            },
            Some(hit.point),
        ),
    };

    Perception {
        can_see,
        debug_status: status.to_string(),
        status,
        sight_line: Some(SightLine { from, to, hit }),
    }
}

/// Угол между векторами (радианы); нулевой вектор = угол 0
///
/// Цель в той же точке что и наблюдатель проходит angle check.
fn angle_between(a: Vec3, b: Vec3) -> f32 {
    if a.length_squared() <= f32::EPSILON || b.length_squared() <= f32::EPSILON {
        return 0.0;
    }
    a.angle_between(b)
}

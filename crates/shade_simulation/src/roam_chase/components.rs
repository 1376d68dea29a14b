//! Roam/chase компоненты: config и явное состояние автомата.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Параметры roam/chase поведения
#[derive(Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
#[serde(default)]
pub struct RoamChaseConfig {
    /// Как далеко от текущей позиции ищем roam точку (метры)
    pub roam_radius: f32,
    /// Сколько стоим в точке перед следующей (секунды)
    pub wait_time: f32,
    /// Скорость в Roaming (m/s)
    pub roam_speed: f32,
    /// Сколько преследуем после потери цели из виду (секунды)
    pub aggro_duration: f32,
    /// Скорость в Chasing (m/s)
    pub chase_speed: f32,
}

impl Default for RoamChaseConfig {
    fn default() -> Self {
        Self {
            roam_radius: 10.0,
            wait_time: 1.0,
            roam_speed: 3.5,
            aggro_duration: 5.0,
            chase_speed: 6.0,
        }
    }
}

/// Состояние автомата (timer: associated data)
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub enum BehaviorState {
    /// Бродим: wait_timer копит время стояния в пришедшей точке
    Roaming { wait_timer: f32 },
    /// Преследуем: aggro_timer: сколько ещё гонимся без визуального контакта
    Chasing { aggro_timer: f32 },
}

impl BehaviorState {
    pub fn mode(&self) -> BehaviorMode {
        match self {
            BehaviorState::Roaming { .. } => BehaviorMode::Roaming,
            BehaviorState::Chasing { .. } => BehaviorMode::Chasing,
        }
    }

    pub fn is_chasing(&self) -> bool {
        matches!(self, BehaviorState::Chasing { .. })
    }
}

/// Режим без данных (для events/логов)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum BehaviorMode {
    Roaming,
    Chasing,
}

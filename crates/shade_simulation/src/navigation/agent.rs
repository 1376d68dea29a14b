//! Path-follower: контракт и headless NavAgent.

use bevy::prelude::*;

/// Path-following service (аналог NavigationAgent движка)
///
/// RoamChaseController пишет speed/destination и читает статус.
pub trait PathFollower {
    fn set_destination(&mut self, destination: Vec3);
    fn set_speed(&mut self, speed: f32);
    /// Путь ещё считается (destination выставлен, шаг ещё не сделан)
    fn path_pending(&self) -> bool;
    fn remaining_distance(&self) -> f32;
    fn stopping_distance(&self) -> f32;
    /// Агент включён и стоит на навигируемой поверхности
    fn is_active_and_placed(&self) -> bool;
}

/// Headless navigation agent (straight-line kinematic)
///
/// Логика:
/// - set_destination поднимает path_pending, шаг step_nav_agents его сбрасывает
/// - remaining_distance пересчитывается после каждого шага
/// - placed обновляет place_nav_agents (агент на NavMesh?)
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct NavAgent {
    pub destination: Option<Vec3>,
    /// Скорость движения (m/s)
    pub speed: f32,
    /// Ближе этого считаем что пришли (метры)
    pub stopping_distance: f32,
    pub enabled: bool,
    pub placed: bool,
    pub(crate) path_pending: bool,
    pub(crate) remaining_distance: f32,
}

impl Default for NavAgent {
    fn default() -> Self {
        Self {
            destination: None,
            speed: 3.5,
            stopping_distance: 0.5,
            enabled: true,
            placed: false,
            path_pending: false,
            remaining_distance: 0.0,
        }
    }
}

impl NavAgent {
    pub fn with_stopping_distance(stopping_distance: f32) -> Self {
        Self {
            stopping_distance,
            ..default()
        }
    }

    /// Один шаг к destination (без overshoot)
    ///
    /// Возвращает новую позицию.
    pub fn advance(&mut self, position: Vec3, delta: f32) -> Vec3 {
        self.path_pending = false;

        let Some(destination) = self.destination else {
            self.remaining_distance = 0.0;
            return position;
        };

        let to_destination = destination - position;
        let distance = to_destination.length();
        let step = self.speed.max(0.0) * delta;

        let next = if distance <= step || distance <= f32::EPSILON {
            destination
        } else {
            position + to_destination / distance * step
        };

        self.remaining_distance = next.distance(destination);
        next
    }
}

impl PathFollower for NavAgent {
    fn set_destination(&mut self, destination: Vec3) {
        self.destination = Some(destination);
        self.path_pending = true;
    }

    fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    fn path_pending(&self) -> bool {
        self.path_pending
    }

    fn remaining_distance(&self) -> f32 {
        self.remaining_distance
    }

    fn stopping_distance(&self) -> f32 {
        self.stopping_distance
    }

    fn is_active_and_placed(&self) -> bool {
        self.enabled && self.placed
    }
}

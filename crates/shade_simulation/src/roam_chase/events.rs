//! Roam/chase events

use bevy::prelude::*;

use super::components::BehaviorMode;

/// Агент переключил режим (Roaming ⇄ Chasing)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct BehaviorChanged {
    pub entity: Entity,
    pub from: BehaviorMode,
    pub to: BehaviorMode,
}

/// Агент получил новую roam точку
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct RoamDestinationChosen {
    pub entity: Entity,
    pub destination: Vec3,
}

//! Perception events

use bevy::prelude::*;

/// Видимость цели переключилась (seen ↔ lost)
///
/// Пишется только на переходе, не каждый тик.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PerceptionChanged {
    pub observer: Entity,
    pub target: Entity,
    pub can_see: bool,
}

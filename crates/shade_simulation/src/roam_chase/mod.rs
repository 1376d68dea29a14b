//! Roam/chase AI module
//!
//! Timer-driven автомат для врага: бродит по случайным точкам NavMesh,
//! преследует игрока пока видит его и ещё aggro_duration секунд после.

use bevy::prelude::*;

pub mod components;
pub mod controller;
pub mod events;
pub mod systems;


pub use components::*;
pub use controller::{sample_roam_destination, RoamChaseController, TickInput, TickOutcome};
pub use events::*;
pub use systems::*;

/// Roam/chase Plugin
///
/// update_roam_chase в SimulationSet::Behavior (после perception).
pub struct RoamChasePlugin;

impl Plugin for RoamChasePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<crate::DeterministicRng>()
            .init_resource::<crate::perception::TrackedTarget>()
            .add_event::<BehaviorChanged>()
            .add_event::<RoamDestinationChosen>()
            .register_type::<RoamChaseController>()
            .add_systems(FixedUpdate, update_roam_chase.in_set(crate::SimulationSet::Behavior));
    }
}

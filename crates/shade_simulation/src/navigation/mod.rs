//! Navigation domain: headless path-following
//!
//! Содержит:
//! - PathFollower / NavSampler (контракты для RoamChaseController)
//! - NavAgent (straight-line агент)
//! - NavMesh (walkable прямоугольники)

use bevy::prelude::*;

pub mod agent;
pub mod mesh;
pub mod systems;

#[cfg(test)]
mod navigation_tests;

pub use agent::{NavAgent, PathFollower};
pub use mesh::{NavMesh, NavRect, NavSampler};
pub use systems::*;

/// Navigation Plugin
///
/// place_nav_agents до perception, step_nav_agents после решений AI.
pub struct NavigationPlugin;

impl Plugin for NavigationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<NavMesh>()
            .register_type::<NavAgent>()
            .register_type::<NavMesh>()
            .add_systems(
                FixedUpdate,
                (
                    place_nav_agents.in_set(crate::SimulationSet::Placement),
                    step_nav_agents.in_set(crate::SimulationSet::Movement),
                ),
            );
    }
}

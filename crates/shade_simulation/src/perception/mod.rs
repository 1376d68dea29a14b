//! Perception domain: кто кого видит
//!
//! Содержит:
//! - SightConfig / Perception (компоненты наблюдателя)
//! - evaluate_perception (distance → angle → linecast)
//! - Linecast backends: SceneColliders (headless), RapierLinecast
//! - TrackedTarget (игрок, ищется один раз при старте)

use bevy::prelude::*;

pub mod components;
pub mod events;
pub mod rapier;
pub mod scene;
pub mod sensor;
pub mod systems;


pub use components::*;
pub use events::*;
pub use rapier::RapierLinecast;
pub use scene::{SceneCollider, SceneColliders, SceneView};
pub use sensor::{evaluate_perception, Linecast, Observer, RayHit};
pub use systems::*;

/// Откуда берутся linecast'ы
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SightBackend {
    /// SightBlocker формы (headless, тесты)
    #[default]
    Scene,
    /// bevy_rapier3d коллайдеры (RapierPhysicsPlugin добавляет хост)
    Rapier,
}

/// Perception Plugin
///
/// Startup: track_player. FixedUpdate: пересчёт Perception в SimulationSet::Perception.
#[derive(Default)]
pub struct PerceptionPlugin {
    pub backend: SightBackend,
}

impl Plugin for PerceptionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TrackedTarget>()
            .add_event::<PerceptionChanged>()
            .register_type::<SightConfig>()
            .register_type::<Perception>()
            .add_systems(Startup, track_player);

        match self.backend {
            SightBackend::Scene => {
                app.add_systems(FixedUpdate, update_perception.in_set(crate::SimulationSet::Perception));
            }
            SightBackend::Rapier => {
                app.add_systems(
                    FixedUpdate,
                    update_perception_rapier.in_set(crate::SimulationSet::Perception),
                );
            }
        }
    }
}

//! Roam/chase systems.

use bevy::prelude::*;

use super::controller::{RoamChaseController, TickInput, TickOutcome};
use super::events::{BehaviorChanged, RoamDestinationChosen};
use crate::navigation::{NavAgent, NavMesh};
use crate::perception::{Perception, TrackedTarget};
use crate::DeterministicRng;

/// Система: roam/chase решения (после perception, до шага навигации)
///
/// Perception опционален: без него агент никогда не видит цель и только бродит.
pub fn update_roam_chase(
    mut agents: Query<(Entity, &Transform, &mut RoamChaseController, &mut NavAgent, Option<&Perception>)>,
    transforms: Query<&Transform>,
    tracked: Res<TrackedTarget>,
    nav_mesh: Res<NavMesh>,
    mut rng: ResMut<DeterministicRng>,
    time: Res<Time<Fixed>>,
    mut mode_changes: EventWriter<BehaviorChanged>,
    mut destinations: EventWriter<RoamDestinationChosen>,
) {
    let delta = time.delta_secs();
    let target = tracked.position(&transforms);

    for (entity, transform, mut controller, mut agent, perception) in agents.iter_mut() {
        let input = TickInput {
            can_see: perception.is_some_and(|p| p.can_see),
            target,
            position: transform.translation,
            delta,
        };

        let before = controller.mode();
        let outcome = controller.tick(input, &mut *agent, &*nav_mesh, &mut rng.rng);
        let after = controller.mode();

        if before != after {
            crate::log(&format!("AI: {:?} {:?} → {:?}", entity, before, after));
            mode_changes.write(BehaviorChanged {
                entity,
                from: before,
                to: after,
            });
        }

        if let TickOutcome::NewDestination(destination) = outcome {
            destinations.write(RoamDestinationChosen { entity, destination });
        }
    }
}

//! Navigation systems: placement check + kinematic шаг к destination.

use bevy::prelude::*;

use super::agent::NavAgent;
use super::mesh::{NavMesh, NavSampler};

/// Допуск "стоит на NavMesh" (метры)
pub const PLACEMENT_TOLERANCE: f32 = 0.25;

/// Система: агент на навигируемой поверхности?
///
/// Аналог isOnNavMesh: без поверхности RoamChaseController пропускает тик.
pub fn place_nav_agents(mut agents: Query<(Entity, &Transform, &mut NavAgent)>, nav_mesh: Res<NavMesh>) {
    for (entity, transform, mut agent) in agents.iter_mut() {
        let placed = nav_mesh
            .sample_navigable(transform.translation, PLACEMENT_TOLERANCE)
            .is_some();

        if agent.placed != placed {
            if !placed {
                crate::log_warning(&format!("Navigation: {:?} is off the NavMesh", entity));
            }
            agent.placed = placed;
        }
    }
}

/// Система: движение агентов к destination
///
/// Прямая линия со скоростью agent.speed, поворот по направлению движения.
/// Высота берётся с NavMesh: агент не отрывается от поверхности даже если
/// destination выше или ниже неё.
pub fn step_nav_agents(
    mut agents: Query<(&mut Transform, &mut NavAgent)>,
    nav_mesh: Res<NavMesh>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (mut transform, mut agent) in agents.iter_mut() {
        if !(agent.enabled && agent.placed) {
            continue;
        }

        let current = transform.translation;
        let mut next = agent.advance(current, delta);
        if let Some(surface) = nav_mesh.nearest_navigable(next) {
            next.y = surface.y;
        }
        if let Some(destination) = agent.destination {
            agent.remaining_distance = next.distance(destination);
        }
        if next == current {
            continue;
        }

        // Смотрим туда куда идём (только горизонтальная составляющая)
        let heading = Vec3::new(next.x - current.x, 0.0, next.z - current.z);
        if heading.length_squared() > 1e-8 {
            transform.look_to(heading, Vec3::Y);
        }
        transform.translation = next;
    }
}

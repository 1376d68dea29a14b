//! Perception systems: поиск цели при старте, пересчёт видимости каждый тик.

use bevy::prelude::*;
use bevy_rapier3d::prelude::ReadRapierContext;

use super::components::{Perception, PerceptionStatus, Player, SightBlocker, SightConfig, TrackedTarget};
use super::events::PerceptionChanged;
use super::scene::SceneColliders;
use super::sensor::{evaluate_perception, Linecast, Observer};

/// Startup: находим цель по Player marker (один раз)
pub fn track_player(players: Query<Entity, With<Player>>, mut tracked: ResMut<TrackedTarget>) {
    match players.iter().next() {
        Some(player) => {
            tracked.entity = Some(player);
            crate::log_info(&format!("Perception: tracking player {:?}", player));
        }
        None => {
            tracked.entity = None;
            crate::log_error("Perception: no entity with Player marker found!");
        }
    }
}

/// Система: пересчёт Perception через headless SceneColliders
pub fn update_perception(
    mut observers: Query<(Entity, &Transform, &SightConfig, &mut Perception)>,
    blockers: Query<(Entity, &Transform, &SightBlocker)>,
    transforms: Query<&Transform>,
    players: Query<(), With<Player>>,
    names: Query<&Name>,
    tracked: Res<TrackedTarget>,
    mut changes: EventWriter<PerceptionChanged>,
) {
    let scene = SceneColliders::from_blockers(blockers.iter());
    let is_target = |entity: Entity| players.contains(entity);

    for (observer, transform, config, mut perception) in observers.iter_mut() {
        let view = scene.excluding(observer);
        let next = perceive(observer, transform, config, &tracked, &transforms, &is_target, &view, &names);
        apply_perception(observer, &tracked, next, &mut perception, &mut changes);
    }
}

/// Система: пересчёт Perception через Rapier raycasts
///
/// Альтернатива update_perception когда сцена живёт в bevy_rapier3d.
/// Попадание в child коллайдер игрока тоже считается попаданием в цель.
pub fn update_perception_rapier(
    mut observers: Query<(Entity, &Transform, &SightConfig, &mut Perception)>,
    rapier: ReadRapierContext,
    transforms: Query<&Transform>,
    players: Query<(), With<Player>>,
    parents: Query<&ChildOf>,
    names: Query<&Name>,
    tracked: Res<TrackedTarget>,
    mut changes: EventWriter<PerceptionChanged>,
) {
    let Ok(context) = rapier.single() else {
        return;
    };

    let is_target = |entity: Entity| {
        players.contains(entity)
            || parents
                .get(entity)
                .is_ok_and(|child_of| players.contains(child_of.parent()))
    };

    for (observer, transform, config, mut perception) in observers.iter_mut() {
        let linecast = super::rapier::RapierLinecast::new(&context).excluding(observer);
        let next = perceive(observer, transform, config, &tracked, &transforms, &is_target, &linecast, &names);
        apply_perception(observer, &tracked, next, &mut perception, &mut changes);
    }
}

#[allow(clippy::too_many_arguments)]
fn perceive(
    observer: Entity,
    transform: &Transform,
    config: &SightConfig,
    tracked: &TrackedTarget,
    transforms: &Query<&Transform>,
    is_target: &impl Fn(Entity) -> bool,
    linecast: &impl Linecast,
    names: &Query<&Name>,
) -> Perception {
    // Нет цели → не видим (absence, не ошибка)
    let Some(target_position) = tracked.position(transforms) else {
        return Perception::not_visible(PerceptionStatus::Searching);
    };

    let snapshot = Observer::from_transform(transform, config);
    let mut perception = evaluate_perception(&snapshot, target_position, is_target, linecast);

    if let PerceptionStatus::Blocked { by, .. } = perception.status {
        if let Ok(name) = names.get(by) {
            perception.debug_status = format!("Blocked by: {}", name);
        }
    }

    perception
}

fn apply_perception(
    observer: Entity,
    tracked: &TrackedTarget,
    next: Perception,
    perception: &mut Mut<Perception>,
    changes: &mut EventWriter<PerceptionChanged>,
) {
    if perception.can_see != next.can_see {
        if let Some(target) = tracked.entity {
            changes.write(PerceptionChanged {
                observer,
                target,
                can_see: next.can_see,
            });
        }
        crate::log(&format!(
            "Perception: {:?} {} ({})",
            observer,
            if next.can_see { "spotted target" } else { "lost target" },
            next.debug_status
        ));
    }

    // Проверяем что изменилось: иначе Changed<Perception> спамит
    if **perception != next {
        **perception = next;
    }
}

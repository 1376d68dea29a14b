//! SHADE Simulation Core
//!
//! Headless ECS-симуляция врага на Bevy 0.16:
//! - perception: distance → angle → linecast (видит ли враг игрока)
//! - roam_chase: Roaming ⇄ Chasing автомат с aggro таймером
//! - navigation: headless NavAgent + NavMesh (path-following collaborator)
//! - debug_view: отрезки / view cone для визуализации
//!
//! Порядок тика (FixedUpdate, 60Hz):
//! Placement → Perception → Behavior → Movement

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

pub mod config;
pub mod debug_view;
pub mod logger;
pub mod navigation;
pub mod perception;
pub mod roam_chase;

pub use config::{ConfigError, EnemyProfile};
pub use logger::{init_logger, log, log_error, log_info, log_warning};
pub use navigation::{NavAgent, NavMesh, NavRect, NavigationPlugin, PathFollower};
pub use perception::{
    Perception, PerceptionChanged, PerceptionPlugin, PerceptionStatus, Player, SightBackend, SightBlocker,
    SightConfig, TrackedTarget,
};
pub use roam_chase::{
    BehaviorChanged, BehaviorMode, BehaviorState, RoamChaseConfig, RoamChaseController, RoamChasePlugin,
    RoamDestinationChosen,
};

/// Частота simulation tick
pub const TICK_HZ: f64 = 60.0;

/// Фазы тика (выполняются последовательно)
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Агенты на NavMesh?
    Placement,
    /// Кто кого видит
    Perception,
    /// Roam/chase решения
    Behavior,
    /// Шаг навигации
    Movement,
}

/// Главный plugin симуляции (объединяет все подсистемы)
#[derive(Default)]
pub struct SimulationPlugin {
    pub sight_backend: SightBackend,
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Time::<Fixed>::from_hz(TICK_HZ))
            // Сохраняем seed если его уже выставил create_headless_app
            .init_resource::<DeterministicRng>()
            .configure_sets(
                FixedUpdate,
                (
                    SimulationSet::Placement,
                    SimulationSet::Perception,
                    SimulationSet::Behavior,
                    SimulationSet::Movement,
                )
                    .chain(),
            )
            .add_plugins((
                NavigationPlugin,
                PerceptionPlugin {
                    backend: self.sight_backend,
                },
                RoamChasePlugin,
            ));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

impl Default for DeterministicRng {
    fn default() -> Self {
        Self::new(42)
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Время двигается вручную ровно на один fixed tick за app.update(),
/// поэтому прогоны с одинаковым seed воспроизводимы.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(TICK_HZ))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(1.0 / TICK_HZ)));

    app
}

/// Spawn врага по профилю
pub fn spawn_enemy(commands: &mut Commands, profile: &EnemyProfile, transform: Transform) -> Entity {
    commands
        .spawn((Name::new("Enemy"), transform, profile.bundle()))
        .id()
}

/// Spawn игрока (цель + коллайдер для linecast'ов)
pub fn spawn_player(commands: &mut Commands, position: Vec3) -> Entity {
    commands
        .spawn((
            Name::new("Player"),
            Player,
            Transform::from_translation(position),
            // Капсула ~2м: сфера вокруг центра корпуса
            SightBlocker::ball(0.5).with_offset(Vec3::Y),
        ))
        .id()
}

//! Roam/chase controller: timer-driven автомат Roaming ⇄ Chasing
//!
//! Правила тика:
//! - агент неактивен или не на NavMesh → Skipped, ничего не меняем
//! - видим цель → aggro_timer = aggro_duration
//! - aggro_timer > 0 и цель есть → Chasing: chase_speed, destination = живая позиция
//!   цели, прижатая к NavMesh
//! - иначе Roaming: roam_speed, пришли → копим wait_timer → новая случайная точка
//!   (точка выдаётся всегда, wait_timer сбрасывается)
//!
//! Aggro decay применяется ПОСЛЕ решения тика: тик который застаёт таймер
//! на нуле уже Roaming. Так преследование длится полные aggro_duration
//! секунд невидимых тиков.

use bevy::prelude::*;
use rand::Rng;

use super::components::{BehaviorMode, BehaviorState, RoamChaseConfig};
use crate::navigation::{NavAgent, NavSampler, PathFollower};

/// Остаток таймера ниже этого считаем нулём (f32 накопление delta)
///
/// Aggro после decay ниже порога обнуляется, поэтому в состоянии никогда
/// не лежит положительный остаток который уже не даёт Chasing.
const TIMER_EPSILON: f32 = 1e-4;

/// Входные данные тика (читаются из perception/transform)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickInput {
    pub can_see: bool,
    /// Живая позиция цели (None: цели нет)
    pub target: Option<Vec3>,
    /// Текущая позиция агента
    pub position: Vec3,
    pub delta: f32,
}

/// Что controller сделал в этом тике
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Агент неактивен / не на NavMesh
    Skipped,
    Chasing { destination: Vec3 },
    /// Ещё в пути к roam точке
    Moving,
    /// Пришли, стоим wait_time
    Waiting,
    /// Выдали новую roam точку
    NewDestination(Vec3),
}

/// Roam/chase AI (одна пара observer/agent, без shared state)
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
#[require(NavAgent)]
pub struct RoamChaseController {
    pub config: RoamChaseConfig,
    state: BehaviorState,
}

impl Default for RoamChaseController {
    fn default() -> Self {
        Self::new(RoamChaseConfig::default())
    }
}

impl RoamChaseController {
    /// Стартуем с полным wait_timer: первая roam точка сразу
    pub fn new(config: RoamChaseConfig) -> Self {
        Self {
            config,
            state: BehaviorState::Roaming {
                wait_timer: config.wait_time,
            },
        }
    }

    pub fn state(&self) -> &BehaviorState {
        &self.state
    }

    pub fn mode(&self) -> BehaviorMode {
        self.state.mode()
    }

    /// Остаток aggro (0 в Roaming)
    pub fn aggro_timer(&self) -> f32 {
        match self.state {
            BehaviorState::Chasing { aggro_timer } => aggro_timer,
            BehaviorState::Roaming { .. } => 0.0,
        }
    }

    pub fn tick<A, N, R>(&mut self, input: TickInput, agent: &mut A, navigation: &N, rng: &mut R) -> TickOutcome
    where
        A: PathFollower + ?Sized,
        N: NavSampler + ?Sized,
        R: Rng,
    {
        // Safety check: агент должен быть активен и на NavMesh
        if !agent.is_active_and_placed() {
            return TickOutcome::Skipped;
        }

        let config = self.config;
        let mut aggro = if input.can_see {
            config.aggro_duration
        } else {
            self.aggro_timer()
        };

        if aggro > 0.0 {
            if let Some(target) = input.target {
                if !input.can_see {
                    aggro -= input.delta;
                    if aggro <= TIMER_EPSILON {
                        aggro = 0.0;
                    }
                }
                // Цель может стоять вне поверхности (уступ, прыжок): идём к ближайшей точке NavMesh
                let destination = navigation.nearest_navigable(target).unwrap_or(target);
                self.state = BehaviorState::Chasing { aggro_timer: aggro };
                agent.set_speed(config.chase_speed);
                agent.set_destination(destination);
                return TickOutcome::Chasing { destination };
            }
        }

        // Roaming. Из Chasing приходим с нулевым wait_timer:
        // после погони не считаем себя "пришедшим и отстоявшим"
        let mut wait_timer = match self.state {
            BehaviorState::Roaming { wait_timer } => wait_timer,
            BehaviorState::Chasing { .. } => 0.0,
        };

        agent.set_speed(config.roam_speed);

        let arrived = !agent.path_pending() && agent.remaining_distance() <= agent.stopping_distance();
        let outcome = if arrived {
            wait_timer += input.delta;

            if wait_timer + TIMER_EPSILON >= config.wait_time {
                let destination = sample_roam_destination(input.position, config.roam_radius, navigation, rng);
                agent.set_destination(destination);
                wait_timer = 0.0;
                TickOutcome::NewDestination(destination)
            } else {
                TickOutcome::Waiting
            }
        } else {
            TickOutcome::Moving
        };

        self.state = BehaviorState::Roaming { wait_timer };
        outcome
    }
}

/// Случайная достижимая точка в радиусе от origin
///
/// Uniform точка внутри сферы radius (rejection sampling), затем snap
/// на навигируемую поверхность в том же радиусе. Best-effort: если в
/// радиусе поверхности нет, берём ближайшую точку NavMesh, а без NavMesh
/// сам candidate.
pub fn sample_roam_destination<N, R>(origin: Vec3, radius: f32, navigation: &N, rng: &mut R) -> Vec3
where
    N: NavSampler + ?Sized,
    R: Rng,
{
    let candidate = origin + random_in_unit_sphere(rng) * radius;
    navigation
        .sample_navigable(candidate, radius)
        .or_else(|| navigation.nearest_navigable(candidate))
        .unwrap_or(candidate)
}

fn random_in_unit_sphere<R: Rng>(rng: &mut R) -> Vec3 {
    loop {
        let point = Vec3::new(
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
        );
        if point.length_squared() <= 1.0 {
            return point;
        }
    }
}

//! Headless linecast backend: аналитические ray vs ball / AABB.
//!
//! Собирается каждый тик из entities с SightBlocker. Как и физические
//! linecast'ы движков, коллайдер внутри которого начинается луч игнорируется.

use bevy::prelude::*;

use super::components::{BlockerShape, SightBlocker};
use super::sensor::{Linecast, RayHit};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneCollider {
    pub entity: Entity,
    /// Центр формы в world space
    pub center: Vec3,
    pub shape: BlockerShape,
}

/// Снимок всех SightBlocker'ов сцены
#[derive(Debug, Clone, Default)]
pub struct SceneColliders {
    colliders: Vec<SceneCollider>,
}

impl SceneColliders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_blockers<'a>(
        blockers: impl IntoIterator<Item = (Entity, &'a Transform, &'a SightBlocker)>,
    ) -> Self {
        let colliders = blockers
            .into_iter()
            .map(|(entity, transform, blocker)| SceneCollider {
                entity,
                center: transform.translation + blocker.offset,
                shape: blocker.shape,
            })
            .collect();
        Self { colliders }
    }

    pub fn push(&mut self, entity: Entity, center: Vec3, shape: BlockerShape) {
        self.colliders.push(SceneCollider {
            entity,
            center,
            shape,
        });
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// View без коллайдера наблюдателя (чтобы не видеть себя)
    pub fn excluding(&self, entity: Entity) -> SceneView<'_> {
        SceneView {
            scene: self,
            exclude: Some(entity),
        }
    }

    fn cast(&self, from: Vec3, to: Vec3, exclude: Option<Entity>) -> Option<RayHit> {
        let segment = to - from;

        self.colliders
            .iter()
            .filter(|c| Some(c.entity) != exclude)
            .filter_map(|c| {
                let t = match c.shape {
                    BlockerShape::Ball { radius } => segment_ball(from, segment, c.center, radius),
                    BlockerShape::Cuboid { half_extents } => {
                        segment_aabb(from, segment, c.center - half_extents, c.center + half_extents)
                    }
                }?;
                Some((t, c.entity))
            })
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(t, surface)| RayHit {
                point: from + segment * t,
                surface,
            })
    }
}

impl Linecast for SceneColliders {
    fn linecast(&self, from: Vec3, to: Vec3) -> Option<RayHit> {
        self.cast(from, to, None)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SceneView<'a> {
    scene: &'a SceneColliders,
    exclude: Option<Entity>,
}

impl Linecast for SceneView<'_> {
    fn linecast(&self, from: Vec3, to: Vec3) -> Option<RayHit> {
        self.scene.cast(from, to, self.exclude)
    }
}

/// Параметр t ∈ [0, 1] входа отрезка в сферу
fn segment_ball(origin: Vec3, segment: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let offset = origin - center;
    let c = offset.length_squared() - radius * radius;
    if c <= 0.0 {
        // Начинаем внутри
        return None;
    }

    let a = segment.length_squared();
    if a <= f32::EPSILON {
        return None;
    }
    let b = 2.0 * segment.dot(offset);
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let t = (-b - discriminant.sqrt()) / (2.0 * a);
    (0.0..=1.0).contains(&t).then_some(t)
}

/// Slab test: параметр t ∈ [0, 1] входа отрезка в AABB
fn segment_aabb(origin: Vec3, segment: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let mut t_enter = f32::NEG_INFINITY;
    let mut t_exit = f32::INFINITY;

    for axis in 0..3 {
        let o = origin[axis];
        let d = segment[axis];

        if d.abs() <= f32::EPSILON {
            // Параллельно плоскостям slab'а
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }

        let inv = 1.0 / d;
        let mut t0 = (min[axis] - o) * inv;
        let mut t1 = (max[axis] - o) * inv;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        t_enter = t_enter.max(t0);
        t_exit = t_exit.min(t1);
        if t_enter > t_exit {
            return None;
        }
    }

    // t_enter < 0 → origin внутри box'а
    (0.0..=1.0).contains(&t_enter).then_some(t_enter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ball_hit_point() {
        let mut scene = SceneColliders::new();
        let ball = Entity::from_raw(1);
        scene.push(ball, Vec3::new(0.0, 0.0, 5.0), BlockerShape::Ball { radius: 1.0 });

        let hit = scene.linecast(Vec3::ZERO, Vec3::new(0.0, 0.0, 10.0)).unwrap();
        assert_eq!(hit.surface, ball);
        assert!((hit.point.z - 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_segment_stops_short_of_ball() {
        let mut scene = SceneColliders::new();
        scene.push(Entity::from_raw(1), Vec3::new(0.0, 0.0, 5.0), BlockerShape::Ball { radius: 1.0 });

        // Отрезок заканчивается до сферы
        assert!(scene.linecast(Vec3::ZERO, Vec3::new(0.0, 0.0, 3.0)).is_none());
    }

    #[test]
    fn test_nearest_collider_wins() {
        let mut scene = SceneColliders::new();
        let far = Entity::from_raw(1);
        let near = Entity::from_raw(2);
        scene.push(far, Vec3::new(0.0, 0.0, 8.0), BlockerShape::Ball { radius: 0.5 });
        scene.push(
            near,
            Vec3::new(0.0, 0.0, 3.0),
            BlockerShape::Cuboid { half_extents: Vec3::new(2.0, 2.0, 0.1) },
        );

        let hit = scene.linecast(Vec3::ZERO, Vec3::new(0.0, 0.0, 10.0)).unwrap();
        assert_eq!(hit.surface, near);
        assert!((hit.point.z - 2.9).abs() < 1e-4);
    }

    #[test]
    fn test_origin_inside_collider_is_ignored() {
        let mut scene = SceneColliders::new();
        scene.push(
            Entity::from_raw(1),
            Vec3::ZERO,
            BlockerShape::Cuboid { half_extents: Vec3::ONE },
        );
        scene.push(Entity::from_raw(2), Vec3::ZERO, BlockerShape::Ball { radius: 1.0 });

        assert!(scene.linecast(Vec3::ZERO, Vec3::new(0.0, 0.0, 5.0)).is_none());
    }

    #[test]
    fn test_excluding_skips_entity() {
        let mut scene = SceneColliders::new();
        let own = Entity::from_raw(1);
        let wall = Entity::from_raw(2);
        scene.push(own, Vec3::new(0.0, 0.0, 1.0), BlockerShape::Ball { radius: 0.5 });
        scene.push(
            wall,
            Vec3::new(0.0, 0.0, 4.0),
            BlockerShape::Cuboid { half_extents: Vec3::new(1.0, 1.0, 0.2) },
        );

        let hit = scene
            .excluding(own)
            .linecast(Vec3::ZERO, Vec3::new(0.0, 0.0, 6.0))
            .unwrap();
        assert_eq!(hit.surface, wall);
    }

    #[test]
    fn test_parallel_ray_misses_box() {
        let mut scene = SceneColliders::new();
        scene.push(
            Entity::from_raw(1),
            Vec3::new(0.0, 5.0, 3.0),
            BlockerShape::Cuboid { half_extents: Vec3::splat(1.0) },
        );

        assert!(scene.linecast(Vec3::ZERO, Vec3::new(0.0, 0.0, 6.0)).is_none());
    }
}

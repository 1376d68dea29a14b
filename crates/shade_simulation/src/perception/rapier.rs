//! Rapier backend для line-of-sight
//!
//! Ray длиной в отрезок через RapierContext query pipeline.
//! Требует RapierPhysicsPlugin в App (добавляет хост, не мы).

use bevy::prelude::*;
use bevy_rapier3d::prelude::{QueryFilter, RapierContext};

use super::sensor::{Linecast, RayHit};

pub struct RapierLinecast<'a, 'w> {
    context: &'a RapierContext<'w>,
    /// Коллайдер наблюдателя (не видим себя)
    exclude: Option<Entity>,
}

impl<'a, 'w> RapierLinecast<'a, 'w> {
    pub fn new(context: &'a RapierContext<'w>) -> Self {
        Self {
            context,
            exclude: None,
        }
    }

    pub fn excluding(mut self, entity: Entity) -> Self {
        self.exclude = Some(entity);
        self
    }
}

impl Linecast for RapierLinecast<'_, '_> {
    fn linecast(&self, from: Vec3, to: Vec3) -> Option<RayHit> {
        let segment = to - from;
        let length = segment.length();
        if length <= f32::EPSILON {
            return None;
        }
        let direction = segment / length;

        let mut filter = QueryFilter::default();
        if let Some(entity) = self.exclude {
            filter = filter.exclude_collider(entity);
        }

        self.context
            .cast_ray(from, direction, length, true, filter)
            .map(|(surface, toi)| RayHit {
                point: from + direction * toi,
                surface,
            })
    }
}

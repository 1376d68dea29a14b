//! Navigable surface: контракт sampling'а и headless NavMesh из прямоугольников.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// "Ближайшая точка на навигируемой поверхности в радиусе"
///
/// None: валидный исход (рядом нет поверхности), не ошибка.
pub trait NavSampler {
    fn sample_navigable(&self, point: Vec3, max_distance: f32) -> Option<Vec3>;

    /// Ближайшая точка поверхности без ограничения по дистанции
    ///
    /// None только если поверхности нет вообще.
    fn nearest_navigable(&self, point: Vec3) -> Option<Vec3> {
        self.sample_navigable(point, f32::INFINITY)
    }
}

impl<T: NavSampler + ?Sized> NavSampler for &T {
    fn sample_navigable(&self, point: Vec3, max_distance: f32) -> Option<Vec3> {
        (**self).sample_navigable(point, max_distance)
    }

    fn nearest_navigable(&self, point: Vec3) -> Option<Vec3> {
        (**self).nearest_navigable(point)
    }
}

/// Плоский walkable прямоугольник (XZ) на высоте `height`
#[derive(Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
pub struct NavRect {
    pub min: Vec2,
    pub max: Vec2,
    pub height: f32,
}

impl NavRect {
    pub fn new(min: Vec2, max: Vec2, height: f32) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
            height,
        }
    }

    /// Квадрат со стороной 2 * half_size вокруг center
    pub fn square(center: Vec2, half_size: f32, height: f32) -> Self {
        Self::new(center - Vec2::splat(half_size), center + Vec2::splat(half_size), height)
    }

    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        let xz = Vec2::new(point.x, point.z).clamp(self.min, self.max);
        Vec3::new(xz.x, self.height, xz.y)
    }
}

/// Resource: навигируемая поверхность (набор floor прямоугольников)
#[derive(Resource, Debug, Clone, Default, Reflect, Serialize, Deserialize)]
#[reflect(Resource)]
pub struct NavMesh {
    pub areas: Vec<NavRect>,
}

impl NavMesh {
    pub fn new(areas: Vec<NavRect>) -> Self {
        Self { areas }
    }

    pub fn with_area(mut self, area: NavRect) -> Self {
        self.areas.push(area);
        self
    }
}

impl NavSampler for NavMesh {
    fn sample_navigable(&self, point: Vec3, max_distance: f32) -> Option<Vec3> {
        self.areas
            .iter()
            .map(|area| area.closest_point(point))
            .map(|snapped| (snapped.distance_squared(point), snapped))
            .filter(|(distance_sq, _)| *distance_sq <= max_distance * max_distance)
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, snapped)| snapped)
    }
}

//! Debug view: read-only визуализация зрения врагов
//!
//! Не рендерит сам: отдаёт отрезки (DebugLines) и вершины view cone fan,
//! которые рисует хост (gizmos, immediate mesh, что угодно).

use bevy::prelude::*;

use crate::perception::{Linecast, Observer, Perception, PerceptionStatus, SightConfig};

/// Радиус маркера глаз (метры)
const EYE_MARKER_SIZE: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum LineColor {
    Yellow,
    Blue,
    Green,
    Red,
}

#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct DebugLine {
    pub start: Vec3,
    pub end: Vec3,
    pub color: LineColor,
}

impl DebugLine {
    fn new(start: Vec3, end: Vec3, color: LineColor) -> Self {
        Self { start, end, color }
    }
}

/// Resource: отрезки за последний тик (перезаписывается каждый тик)
#[derive(Resource, Debug, Clone, Default)]
pub struct DebugLines {
    pub lines: Vec<DebugLine>,
}

/// Triangle fan горизонтального view cone
///
/// vertices[0]: глаза, остальные: концы лучей; indices по тройкам.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewConeMesh {
    pub vertices: Vec<Vec3>,
    pub indices: Vec<u32>,
}

/// Forward повёрнутый вокруг Y на angle градусов (горизонтальный)
pub fn direction_from_angle(forward: Vec3, angle_degrees: f32) -> Vec3 {
    let flat = Vec3::new(forward.x, 0.0, forward.z).normalize_or(Vec3::NEG_Z);
    Quat::from_rotation_y(angle_degrees.to_radians()) * flat
}

/// Отрезки для одного наблюдателя
///
/// - yellow: окружность view_distance вокруг position
/// - blue: маркер глаз + две границы конуса
/// - sight line: green (видим), red (до точки препятствия), yellow (ничего не задели)
pub fn sight_debug_lines(observer: &Observer, perception: &Perception, circle_segments: usize) -> Vec<DebugLine> {
    let config = &observer.config;
    let eye = observer.eye();
    let mut lines = Vec::new();

    // View radius (горизонтальная окружность)
    let segments = circle_segments.max(3);
    let ring = |i: usize| {
        let angle = i as f32 / segments as f32 * std::f32::consts::TAU;
        observer.position + Vec3::new(angle.sin(), 0.0, angle.cos()) * config.view_distance
    };
    for i in 0..segments {
        lines.push(DebugLine::new(ring(i), ring(i + 1), LineColor::Yellow));
    }

    // Eye marker
    for axis in [Vec3::X, Vec3::Y, Vec3::Z] {
        lines.push(DebugLine::new(
            eye - axis * EYE_MARKER_SIZE,
            eye + axis * EYE_MARKER_SIZE,
            LineColor::Blue,
        ));
    }

    // Границы конуса
    let half = config.view_angle * 0.5;
    for angle in [-half, half] {
        let direction = direction_from_angle(observer.forward, angle);
        lines.push(DebugLine::new(eye, eye + direction * config.view_distance, LineColor::Blue));
    }

    if let Some(sight) = perception.sight_line {
        let line = match (perception.status, sight.hit) {
            (PerceptionStatus::Visible, _) => DebugLine::new(sight.from, sight.to, LineColor::Green),
            (PerceptionStatus::Blocked { point, .. }, _) => DebugLine::new(sight.from, point, LineColor::Red),
            (_, Some(hit)) => DebugLine::new(sight.from, hit, LineColor::Red),
            (_, None) => DebugLine::new(sight.from, sight.to, LineColor::Yellow),
        };
        lines.push(line);
    }

    lines
}

/// View cone fan с лучами обрезанными первым препятствием
pub fn view_cone_fan(observer: &Observer, ray_count: usize, scene: &impl Linecast) -> ViewConeMesh {
    let config: &SightConfig = &observer.config;
    let eye = observer.eye();
    let rays = ray_count.max(2);
    let half = config.view_angle * 0.5;

    let mut vertices = Vec::with_capacity(rays + 1);
    vertices.push(eye);

    for i in 0..rays {
        let angle = -half + config.view_angle * i as f32 / (rays - 1) as f32;
        let direction = direction_from_angle(observer.forward, angle);
        let end = eye + direction * config.view_distance;
        let clipped = scene.linecast(eye, end).map_or(end, |hit| hit.point);
        vertices.push(clipped);
    }

    let indices = (1..rays as u32).flat_map(|i| [0, i, i + 1]).collect();

    ViewConeMesh { vertices, indices }
}

/// Система: пересобрать DebugLines по всем наблюдателям
pub fn collect_debug_lines(observers: Query<(&Transform, &SightConfig, &Perception)>, mut debug: ResMut<DebugLines>) {
    debug.lines.clear();
    for (transform, config, perception) in observers.iter() {
        let observer = Observer::from_transform(transform, config);
        debug.lines.extend(sight_debug_lines(&observer, perception, 24));
    }
}

/// Debug View Plugin (опциональный, хост добавляет сам)
pub struct DebugViewPlugin;

impl Plugin for DebugViewPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugLines>().add_systems(
            FixedUpdate,
            collect_debug_lines.after(crate::SimulationSet::Perception),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::perception::{BlockerShape, SceneColliders, SightLine};

    fn observer() -> Observer {
        Observer::new(Vec3::ZERO, Vec3::Z, SightConfig::default())
    }

    fn sight_line_of(lines: &[DebugLine]) -> DebugLine {
        *lines.last().unwrap()
    }

    #[test]
    fn test_direction_from_angle() {
        let right = direction_from_angle(Vec3::Z, 90.0);
        assert!((right - Vec3::X).length() < 1e-5);

        let same = direction_from_angle(Vec3::Z, 0.0);
        assert!((same - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_lines_without_sight_check() {
        let lines = sight_debug_lines(&observer(), &Perception::not_visible(PerceptionStatus::TooFar), 8);

        // 8 ring + 3 eye marker + 2 cone
        assert_eq!(lines.len(), 13);
        assert!(lines.iter().all(|l| l.color != LineColor::Green && l.color != LineColor::Red));
    }

    #[test]
    fn test_sight_line_colors() {
        let from = Vec3::new(0.0, 1.5, 0.0);
        let to = Vec3::new(0.0, 1.0, 5.0);

        let visible = Perception {
            can_see: true,
            status: PerceptionStatus::Visible,
            debug_status: String::new(),
            sight_line: Some(SightLine { from, to, hit: Some(to) }),
        };
        let line = sight_line_of(&sight_debug_lines(&observer(), &visible, 8));
        assert_eq!(line.color, LineColor::Green);
        assert_eq!(line.end, to);

        let wall_point = Vec3::new(0.0, 1.2, 2.9);
        let blocked = Perception {
            can_see: false,
            status: PerceptionStatus::Blocked {
                by: Entity::from_raw(3),
                point: wall_point,
            },
            debug_status: String::new(),
            sight_line: Some(SightLine { from, to, hit: Some(wall_point) }),
        };
        let line = sight_line_of(&sight_debug_lines(&observer(), &blocked, 8));
        assert_eq!(line.color, LineColor::Red);
        assert_eq!(line.end, wall_point);

        let no_hit = Perception {
            can_see: false,
            status: PerceptionStatus::NoHit,
            debug_status: String::new(),
            sight_line: Some(SightLine { from, to, hit: None }),
        };
        let line = sight_line_of(&sight_debug_lines(&observer(), &no_hit, 8));
        assert_eq!(line.color, LineColor::Yellow);
        assert_eq!(line.end, to);
    }

    #[test]
    fn test_view_cone_fan_open_scene() {
        let fan = view_cone_fan(&observer(), 5, &SceneColliders::new());

        assert_eq!(fan.vertices.len(), 6);
        assert_eq!(fan.indices, vec![0, 1, 2, 0, 2, 3, 0, 3, 4, 0, 4, 5]);

        // Все лучи полной длины
        let eye = observer().eye();
        for vertex in &fan.vertices[1..] {
            assert!((vertex.distance(eye) - 10.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_view_cone_fan_clipped_by_wall() {
        let mut scene = SceneColliders::new();
        scene.push(
            Entity::from_raw(1),
            Vec3::new(0.0, 1.5, 4.0),
            BlockerShape::Cuboid { half_extents: Vec3::new(10.0, 2.0, 0.1) },
        );

        let fan = view_cone_fan(&observer(), 3, &scene);

        // Центральный луч упирается в стену на z = 3.9
        assert!((fan.vertices[2].z - 3.9).abs() < 1e-4);
        assert!(fan.vertices[2].distance(observer().eye()) < 10.0);
    }
}

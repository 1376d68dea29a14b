//! Tests for navigation agent and NavMesh sampling.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use super::super::agent::{NavAgent, PathFollower};
    use super::super::mesh::{NavMesh, NavRect, NavSampler};

    fn floor() -> NavMesh {
        NavMesh::default().with_area(NavRect::square(Vec2::ZERO, 10.0, 0.0))
    }

    #[test]
    fn test_sample_inside_area_snaps_to_height() {
        let sampled = floor().sample_navigable(Vec3::new(3.0, 2.0, -4.0), 5.0);
        assert_eq!(sampled, Some(Vec3::new(3.0, 0.0, -4.0)));
    }

    #[test]
    fn test_sample_outside_area_clamps_to_edge() {
        let sampled = floor().sample_navigable(Vec3::new(12.0, 0.0, 0.0), 5.0);
        assert_eq!(sampled, Some(Vec3::new(10.0, 0.0, 0.0)));
    }

    #[test]
    fn test_sample_too_far_is_none() {
        assert!(floor().sample_navigable(Vec3::new(30.0, 0.0, 0.0), 5.0).is_none());
        assert!(NavMesh::default().sample_navigable(Vec3::ZERO, 100.0).is_none());
    }

    #[test]
    fn test_nearest_navigable_ignores_distance_cap() {
        assert_eq!(
            floor().nearest_navigable(Vec3::new(30.0, 4.0, 0.0)),
            Some(Vec3::new(10.0, 0.0, 0.0))
        );
        assert!(NavMesh::default().nearest_navigable(Vec3::ZERO).is_none());
    }

    #[test]
    fn test_sample_picks_nearest_area() {
        let mesh = NavMesh::new(vec![
            NavRect::square(Vec2::ZERO, 1.0, 0.0),
            NavRect::square(Vec2::new(5.0, 0.0), 1.0, 2.0),
        ]);

        let sampled = mesh.sample_navigable(Vec3::new(4.5, 2.0, 0.0), 10.0);
        assert_eq!(sampled, Some(Vec3::new(4.5, 2.0, 0.0)));
    }

    #[test]
    fn test_nav_rect_normalizes_corners() {
        let rect = NavRect::new(Vec2::new(5.0, 5.0), Vec2::new(-5.0, -5.0), 0.0);
        assert_eq!(rect.min, Vec2::new(-5.0, -5.0));
        assert_eq!(rect.max, Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_set_destination_marks_path_pending() {
        let mut agent = NavAgent::default();
        assert!(!agent.path_pending());

        agent.set_destination(Vec3::new(0.0, 0.0, 5.0));
        assert!(agent.path_pending());

        agent.advance(Vec3::ZERO, 0.1);
        assert!(!agent.path_pending());
    }

    #[test]
    fn test_advance_moves_at_speed_without_overshoot() {
        let mut agent = NavAgent::default();
        agent.set_speed(2.0);
        agent.set_destination(Vec3::new(0.0, 0.0, 3.0));

        let p1 = agent.advance(Vec3::ZERO, 1.0);
        assert_eq!(p1, Vec3::new(0.0, 0.0, 2.0));
        assert_eq!(agent.remaining_distance(), 1.0);

        // Остался 1м при шаге 2м → ровно в destination
        let p2 = agent.advance(p1, 1.0);
        assert_eq!(p2, Vec3::new(0.0, 0.0, 3.0));
        assert_eq!(agent.remaining_distance(), 0.0);
    }

    #[test]
    fn test_agent_without_destination_is_arrived() {
        let mut agent = NavAgent::default();
        let p = agent.advance(Vec3::ONE, 1.0);

        assert_eq!(p, Vec3::ONE);
        assert!(agent.remaining_distance() <= agent.stopping_distance());
    }

    #[test]
    fn test_active_and_placed() {
        let mut agent = NavAgent::default();
        assert!(!agent.is_active_and_placed()); // ещё не placed

        agent.placed = true;
        assert!(agent.is_active_and_placed());

        agent.enabled = false;
        assert!(!agent.is_active_and_placed());
    }
}

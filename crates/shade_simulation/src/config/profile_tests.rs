//! Tests for enemy profiles.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use super::super::{ConfigError, EnemyProfile};

    #[test]
    fn test_empty_json_gives_defaults() {
        let profile = EnemyProfile::from_json_str("{}").unwrap();
        assert_eq!(profile, EnemyProfile::default());
        assert_eq!(profile.stopping_distance, 0.5);
    }

    #[test]
    fn test_partial_json_overrides_only_given_fields() {
        let json = r#"{
            "sight": { "view_distance": 25.0, "eye_offset": [0.0, 2.0, 0.0] },
            "roam_chase": { "aggro_duration": 8.0 }
        }"#;

        let profile = EnemyProfile::from_json_str(json).unwrap();

        assert_eq!(profile.sight.view_distance, 25.0);
        assert_eq!(profile.sight.view_angle, 90.0);
        assert_eq!(profile.sight.eye_offset, Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(profile.roam_chase.aggro_duration, 8.0);
        assert_eq!(profile.roam_chase.chase_speed, 6.0);
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = EnemyProfile::from_json_str("{ sight: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_invalid_view_angle_rejected() {
        let err = EnemyProfile::from_json_str(r#"{ "sight": { "view_angle": 400.0 } }"#).unwrap_err();
        match err {
            ConfigError::InvalidValue { field, .. } => assert_eq!(field, "sight.view_angle"),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_non_positive_speed_rejected() {
        let mut profile = EnemyProfile::default();
        profile.roam_chase.chase_speed = 0.0;

        let err = profile.validate().unwrap_err();
        assert!(err.to_string().contains("roam_chase.chase_speed"));
    }

    #[test]
    fn test_negative_wait_time_rejected() {
        let mut profile = EnemyProfile::default();
        profile.roam_chase.wait_time = -1.0;
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_json_roundtrip_keeps_values() {
        let mut profile = EnemyProfile::default();
        profile.sight.view_angle = 120.0;
        profile.roam_chase.roam_radius = 4.0;

        let json = profile.to_json_string().unwrap();
        assert_eq!(EnemyProfile::from_json_str(&json).unwrap(), profile);
    }
}

//! Enemy profiles: data-driven параметры врага (JSON)
//!
//! Все поля опциональны (serde default), validate() отсекает бессмысленные значения.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

pub mod error;

#[cfg(test)]
mod profile_tests;

pub use error::ConfigError;

use crate::navigation::NavAgent;
use crate::perception::SightConfig;
use crate::roam_chase::{RoamChaseConfig, RoamChaseController};

/// Профиль врага: зрение + roam/chase + навигация
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyProfile {
    pub sight: SightConfig,
    pub roam_chase: RoamChaseConfig,
    /// NavAgent stopping distance (метры)
    pub stopping_distance: f32,
}

impl Default for EnemyProfile {
    fn default() -> Self {
        Self {
            sight: SightConfig::default(),
            roam_chase: RoamChaseConfig::default(),
            stopping_distance: NavAgent::default().stopping_distance,
        }
    }
}

impl EnemyProfile {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let profile: Self = serde_json::from_str(json)?;
        profile.validate()?;
        Ok(profile)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let sight = &self.sight;
        let roam = &self.roam_chase;

        positive("sight.view_distance", sight.view_distance)?;
        if !(sight.view_angle > 0.0 && sight.view_angle <= 360.0) {
            return Err(ConfigError::invalid(
                "sight.view_angle",
                format!("must be in (0, 360], got {}", sight.view_angle),
            ));
        }
        if !sight.eye_offset.is_finite() {
            return Err(ConfigError::invalid("sight.eye_offset", "must be finite"));
        }
        finite("sight.target_center_height", sight.target_center_height)?;

        non_negative("roam_chase.roam_radius", roam.roam_radius)?;
        non_negative("roam_chase.wait_time", roam.wait_time)?;
        non_negative("roam_chase.aggro_duration", roam.aggro_duration)?;
        positive("roam_chase.roam_speed", roam.roam_speed)?;
        positive("roam_chase.chase_speed", roam.chase_speed)?;
        non_negative("stopping_distance", self.stopping_distance)?;

        Ok(())
    }

    /// Компоненты для spawn врага (Transform/Name добавляет вызывающий)
    pub fn bundle(&self) -> impl Bundle {
        (
            self.sight,
            RoamChaseController::new(self.roam_chase),
            NavAgent::with_stopping_distance(self.stopping_distance),
        )
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be finite, got {}", value)))
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be > 0, got {}", value)))
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be >= 0, got {}", value)))
    }
}

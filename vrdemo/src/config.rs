use std::path::Path;

use cgmath::{Vector3, vec3};
use serde::{Deserialize, Serialize};

use crate::{comfort::ResponseCurve, error::ConfigError, screen::FadeColor};

/// How the teleport destination is predicted. Exactly one mode is live per character.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetingMode {
    /// Straight line trace along the aim direction
    Ray,
    /// Simulated projectile arc under gravity
    #[default]
    Parabolic,
}

/// Which tracked device teleport targeting aims from, in either mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AimSource {
    #[default]
    Hand,
    Camera,
}

/// Configuration for the teleport system
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeleportConfig {
    pub enabled: bool,
    pub mode: TargetingMode,
    pub aim_source: AimSource,
    pub max_distance: f32,
    pub projectile_speed: f32,
    pub projectile_radius: f32,
    pub simulation_time: f32,
    /// Trajectory samples per simulated second
    pub sim_frequency: f32,
    pub fade_time: f32,
    pub fade_color: FadeColor,
    /// Half-extents of the box a hit may be moved by when snapping to the nav mesh
    pub projection_extent: Vector3<f32>,
    /// Analog trigger value that counts as pressed
    pub trigger_threshold: f32,
}

impl Default for TeleportConfig {
    fn default() -> Self {
        TeleportConfig {
            enabled: true,
            mode: TargetingMode::Parabolic,
            aim_source: AimSource::Hand,
            max_distance: 1000.0,
            projectile_speed: 800.0,
            projectile_radius: 10.0,
            simulation_time: 10.0,
            sim_frequency: 15.0,
            fade_time: 2.0,
            fade_color: FadeColor::BLACK,
            projection_extent: vec3(100.0, 100.0, 100.0),
            trigger_threshold: 0.5,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComfortConfig {
    /// Speed to vignette radius. Without a curve the radius is left unset.
    pub radius_curve: Option<ResponseCurve>,
    /// How far along the travel direction the vignette focus point is placed
    pub probe_distance: f32,
    /// Speeds at or below this count as standing still
    pub stationary_speed: f32,
}

impl Default for ComfortConfig {
    fn default() -> Self {
        ComfortConfig {
            radius_curve: None,
            probe_distance: 100.0,
            stationary_speed: 1.0e-4,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    pub max_walk_speed: f32,
    /// Axis values with a magnitude below this are dropped
    pub dead_zone: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        MovementConfig {
            max_walk_speed: 600.0,
            dead_zone: 0.05,
        }
    }
}

/// Everything a [`crate::character::VrCharacter`] reads at runtime.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionConfig {
    pub teleport: TeleportConfig,
    pub comfort: ComfortConfig,
    pub movement: MovementConfig,
    pub capsule_half_height: f32,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        LocomotionConfig {
            teleport: TeleportConfig::default(),
            comfort: ComfortConfig::default(),
            movement: MovementConfig::default(),
            capsule_half_height: 96.0,
        }
    }
}

impl LocomotionConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: LocomotionConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let teleport = &self.teleport;

        require_positive("teleport.max_distance", teleport.max_distance)?;
        require_positive("teleport.projectile_speed", teleport.projectile_speed)?;
        require_non_negative("teleport.projectile_radius", teleport.projectile_radius)?;
        require_positive("teleport.simulation_time", teleport.simulation_time)?;
        require_positive("teleport.sim_frequency", teleport.sim_frequency)?;
        require_non_negative("teleport.fade_time", teleport.fade_time)?;
        require_non_negative("teleport.projection_extent.x", teleport.projection_extent.x)?;
        require_non_negative("teleport.projection_extent.y", teleport.projection_extent.y)?;
        require_non_negative("teleport.projection_extent.z", teleport.projection_extent.z)?;
        require_non_negative("teleport.trigger_threshold", teleport.trigger_threshold)?;

        require_positive("comfort.probe_distance", self.comfort.probe_distance)?;
        require_non_negative("comfort.stationary_speed", self.comfort.stationary_speed)?;

        require_non_negative("movement.max_walk_speed", self.movement.max_walk_speed)?;
        require_non_negative("movement.dead_zone", self.movement.dead_zone)?;
        if self.movement.dead_zone >= 1.0 {
            return Err(ConfigError::validation(
                "movement.dead_zone",
                "must be below 1.0",
            ));
        }

        require_non_negative("capsule_half_height", self.capsule_half_height)?;

        Ok(())
    }
}

fn require_non_negative(field: &str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::validation(field, "must be finite"));
    }
    if value < 0.0 {
        return Err(ConfigError::validation(
            field,
            format!("must not be negative (got {})", value),
        ));
    }
    Ok(())
}

fn require_positive(field: &str, value: f32) -> Result<(), ConfigError> {
    require_non_negative(field, value)?;
    if value == 0.0 {
        return Err(ConfigError::validation(field, "must be greater than zero"));
    }
    Ok(())
}

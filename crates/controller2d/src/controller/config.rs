//! # Controller Configuration
//!
//! Tunables for the raycast controller and the errors it can report. All
//! validation happens here, at setup, so the per-frame solve never sees a
//! configuration that could divide by zero or produce NaN.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{Config, ConfigError};
use crate::physics::{CollisionLayers, PhysicsError};

/// Inward margin subtracted from every raycast distance
pub const DEFAULT_SKIN_WIDTH: f32 = 0.015;

/// Minimum number of rays per edge
pub const MIN_RAY_COUNT: usize = 2;

/// Errors reported by the character controller
#[derive(Error, Debug)]
pub enum ControllerError {
    /// A configuration value is out of range
    #[error("Invalid controller configuration: {0}")]
    InvalidConfig(String),

    /// The collider box is too small to cast rays from once the skin is removed
    #[error("Degenerate collider bounds: {width} x {height} after skin")]
    DegenerateBounds {
        /// Width after removing the skin on both sides
        width: f32,
        /// Height after removing the skin on both sides
        height: f32,
    },

    /// A move was requested with a NaN or infinite component
    #[error("Non-finite velocity requested: ({x}, {y}, {z})")]
    NonFiniteVelocity {
        /// X component
        x: f32,
        /// Y component
        y: f32,
        /// Z component
        z: f32,
    },

    /// Collision world error
    #[error("Physics error: {0}")]
    Physics(#[from] PhysicsError),

    /// Configuration file error
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Settings for a [`Controller2D`](super::Controller2D)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Layers treated as solid geometry
    pub collision_mask: CollisionLayers,
    /// Rays cast along the leading vertical edge (clamped to at least 2)
    pub horizontal_ray_count: usize,
    /// Rays cast along the leading horizontal edge (clamped to at least 2)
    pub vertical_ray_count: usize,
    /// Inward margin kept between the box and any surface
    pub skin_width: f32,
    /// Steepest slope (degrees from up) that can be walked up
    pub max_climb_angle: f32,
    /// Steepest slope (degrees from up) that is hugged when walking down
    pub max_descend_angle: f32,
    /// Length of the ledge lookahead probe
    pub ground_ahead_distance: f32,
    /// How long a "drop down" request ignores one-way platforms, in seconds
    pub fall_through_duration: f32,
    /// Swap which vertical direction counts as "below"
    pub gravity_inverted: bool,
    /// When false, horizontal and vertical collision passes are skipped
    pub handle_physics: bool,
}

impl ControllerConfig {
    /// Create a configuration with default tuning
    pub fn new() -> Self {
        Self {
            collision_mask: CollisionLayers::WALKABLE,
            horizontal_ray_count: 4,
            vertical_ray_count: 4,
            skin_width: DEFAULT_SKIN_WIDTH,
            max_climb_angle: 80.0,
            max_descend_angle: 80.0,
            ground_ahead_distance: 0.35,
            fall_through_duration: 0.2,
            gravity_inverted: false,
            handle_physics: true,
        }
    }

    /// Set the collision mask
    pub fn with_collision_mask(mut self, mask: CollisionLayers) -> Self {
        self.collision_mask = mask;
        self
    }

    /// Set both ray counts
    pub fn with_ray_counts(mut self, horizontal: usize, vertical: usize) -> Self {
        self.horizontal_ray_count = horizontal;
        self.vertical_ray_count = vertical;
        self
    }

    /// Set the slope limits in degrees
    pub fn with_slope_limits(mut self, max_climb: f32, max_descend: f32) -> Self {
        self.max_climb_angle = max_climb;
        self.max_descend_angle = max_descend;
        self
    }

    /// Set inverted gravity
    pub fn with_gravity_inverted(mut self, inverted: bool) -> Self {
        self.gravity_inverted = inverted;
        self
    }

    /// Validate the configuration
    ///
    /// Ray counts are not checked here; they are clamped when spacing is
    /// computed.
    pub fn validate(&self) -> Result<(), ControllerError> {
        if !self.skin_width.is_finite() || self.skin_width <= 0.0 {
            return Err(ControllerError::InvalidConfig(format!(
                "skin width must be positive, got {}",
                self.skin_width
            )));
        }

        for (name, angle) in [("max climb angle", self.max_climb_angle), ("max descend angle", self.max_descend_angle)] {
            if !(0.0..=90.0).contains(&angle) {
                return Err(ControllerError::InvalidConfig(format!(
                    "{name} must be within [0, 90] degrees, got {angle}"
                )));
            }
        }

        if !self.ground_ahead_distance.is_finite() || self.ground_ahead_distance < 0.0 {
            return Err(ControllerError::InvalidConfig(format!(
                "ground ahead distance must be non-negative, got {}",
                self.ground_ahead_distance
            )));
        }

        if !self.fall_through_duration.is_finite() || self.fall_through_duration < 0.0 {
            return Err(ControllerError::InvalidConfig(format!(
                "fall-through duration must be non-negative, got {}",
                self.fall_through_duration
            )));
        }

        Ok(())
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for ControllerConfig {}

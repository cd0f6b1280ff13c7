//! Demo configuration
//!
//! Everything the headless simulation needs: controller and motor tuning, the
//! level layout, and how long to run.

use serde::{Deserialize, Serialize};

use controller2d::config::Config;
use controller2d::controller::{ControllerConfig, MotorConfig};
use controller2d::physics::{CollisionLayers, SurfaceKind};

/// Top-level demo configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Fallback log filter when `RUST_LOG` is unset
    pub log_level: LogLevel,
    /// Simulation loop settings
    pub simulation: SimulationConfig,
    /// Character controller tuning
    pub controller: ControllerConfig,
    /// Walker tuning
    pub motor: MotorConfig,
    /// Level geometry
    pub level: LevelConfig,
}

impl Config for GameConfig {}

/// Log filter wrapper so an empty config still logs at `info`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogLevel(pub String);

impl Default for LogLevel {
    fn default() -> Self {
        Self("info".to_string())
    }
}

/// Fixed-step loop settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Seconds per step
    pub timestep: f32,
    /// Number of steps to run
    pub steps: u64,
    /// Starting position of the walker's center
    pub spawn: [f32; 2],
    /// Walker box size
    pub box_size: [f32; 2],
    /// First step (inclusive) on which "down" is held
    pub drop_from_step: u64,
    /// Step (exclusive) on which "down" is released
    pub drop_until_step: u64,
    /// Log a status line every this many steps (0 disables)
    pub report_every: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            timestep: 1.0 / 60.0,
            steps: 900,
            spawn: [0.0, 1.0],
            box_size: [0.8, 1.2],
            drop_from_step: 0,
            drop_until_step: 0,
            report_every: 60,
        }
    }
}

/// Level layout
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    /// Static colliders
    pub colliders: Vec<ColliderConfig>,
}

impl Default for LevelConfig {
    fn default() -> Self {
        let ramp_height = 4.0 * 30.0_f32.to_radians().tan();
        Self {
            colliders: vec![
                ColliderConfig::solid("floor", ShapeConfig::Rect { min: [-10.0, -1.0], max: [30.0, 0.0] }),
                ColliderConfig::solid("ramp", ShapeConfig::Ramp { foot: [4.0, 0.0], top: [8.0, ramp_height] }),
                ColliderConfig::solid("plateau", ShapeConfig::Rect { min: [8.0, 0.0], max: [12.0, ramp_height] }),
                ColliderConfig::through("ledge", ShapeConfig::Segment { a: [14.0, 1.2], b: [18.0, 1.2] }),
                ColliderConfig::solid("wall", ShapeConfig::Rect { min: [20.0, 0.0], max: [21.0, 6.0] }),
            ],
        }
    }
}

/// One static collider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColliderConfig {
    /// Name used in logs
    pub name: String,
    /// Solid or one-way
    #[serde(default)]
    pub surface: SurfaceKind,
    /// Layer override (defaults by surface)
    #[serde(default)]
    pub layer: Option<CollisionLayers>,
    /// Geometry
    pub shape: ShapeConfig,
}

impl ColliderConfig {
    fn solid(name: &str, shape: ShapeConfig) -> Self {
        Self { name: name.to_string(), surface: SurfaceKind::Solid, layer: None, shape }
    }

    fn through(name: &str, shape: ShapeConfig) -> Self {
        Self { name: name.to_string(), surface: SurfaceKind::Through, layer: None, shape }
    }
}

/// Collider geometry in world space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeConfig {
    /// Axis-aligned box
    Rect {
        /// Lower-left corner
        min: [f32; 2],
        /// Upper-right corner
        max: [f32; 2],
    },
    /// Right-triangle slope rising from `foot` to `top`
    Ramp {
        /// Low end of the slope
        foot: [f32; 2],
        /// High end of the slope
        top: [f32; 2],
    },
    /// Convex polygon
    Polygon {
        /// Outline, either winding
        vertices: Vec<[f32; 2]>,
    },
    /// Two-sided edge
    Segment {
        /// First end
        a: [f32; 2],
        /// Second end
        b: [f32; 2],
    },
}

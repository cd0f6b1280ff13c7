//! # Controller2D
//!
//! A raycast-based kinematic character controller for 2D platformers.
//!
//! Instead of simulating rigid bodies, the controller casts short rays from
//! the edges of a character's box to find out how far it can move, then
//! corrects the requested displacement before applying it.
//!
//! ## Features
//!
//! - **Slopes**: walking up and down inclines up to a configurable angle
//! - **One-way platforms**: jump up through them, hold down to drop through
//! - **Walls and ledges**: wall contact flags and a ground-ahead probe
//! - **Inverted gravity**: swap which direction counts as "below"
//! - **Collision world**: rectangles, convex polygons and segments with layer masks
//!
//! ## Quick Start
//!
//! ```rust
//! use controller2d::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut world = CollisionWorld::new();
//! world.insert(Collider::solid(
//!     "floor",
//!     ColliderShape::rect(Vec2::new(-10.0, -1.0), Vec2::new(10.0, 0.0)),
//! ))?;
//!
//! let mut controller = Controller2D::new(
//!     ControllerConfig::default(),
//!     Vec3::new(0.0, 1.0, 0.0),
//!     BoxCollider::new(Vec2::new(1.0, 1.0)),
//! )?;
//!
//! let outcome = controller.move_by(&world, MoveRequest::new(Vec3::new(0.0, -2.0, 0.0), SimTime::ZERO))?;
//! assert!(outcome.collisions.below);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::float_cmp)]

pub mod config;
pub mod controller;
pub mod debug;
pub mod foundation;
pub mod physics;

/// Common imports for controller users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError},
        controller::{
            BoxCollider, CharacterMotor, CollisionState, Controller2D, ControllerConfig, ControllerError,
            MotorConfig, MoveOutcome, MoveRequest,
        },
        debug::{DebugRay, DebugRayBuffer, RayKind},
        foundation::{
            math::{Aabb2, Vec2, Vec3},
            time::{SimClock, SimTime},
        },
        physics::{Collider, ColliderShape, CollisionLayers, CollisionWorld, Raycaster, SurfaceKind},
    };
}

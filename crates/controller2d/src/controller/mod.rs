//! Character controller
//!
//! [`RaycastController`] owns the box and ray geometry, [`Controller2D`]
//! resolves moves against a [`Raycaster`](crate::physics::Raycaster), and
//! [`CharacterMotor`] is the per-step walking loop most callers want.

pub mod collisions;
pub mod config;
pub mod controller2d;
pub mod motor;
pub mod raycast;

#[cfg(test)]
mod tests;

pub use collisions::CollisionState;
pub use config::{ControllerConfig, ControllerError, DEFAULT_SKIN_WIDTH, MIN_RAY_COUNT};
pub use controller2d::{Controller2D, MoveOutcome, MoveRequest};
pub use motor::{CharacterMotor, MotorConfig};
pub use raycast::{BoxCollider, RaycastController, RaycastOrigins};

//! Debug module for visualization and debugging tools
//!
//! Captures the rays a controller casts so a renderer or test can inspect
//! exactly what the collision passes looked at.

pub mod rays;

pub use rays::{DebugRay, DebugRayBuffer, RayKind};

//! Collision geometry
//!
//! # Module Organization
//!
//! - [`primitives`] - Basic geometric primitives (rays, segments, convex polygons)
//! - [`shape`] - Collider shapes and surface behaviour used by the world
//!
//! # Key Types
//!
//! - [`ColliderShape`] - World-space shape attached to a collider
//! - [`SurfaceKind`] - Solid or one-way ("through") surface
//! - [`Ray2D`], [`RayHit`] - Ray queries and their results

pub mod primitives;
pub mod shape;

// Re-export commonly used types
pub use primitives::{Ray2D, RayHit, ShapeHit, Segment, ConvexPolygon};
pub use shape::{ColliderShape, SurfaceKind};

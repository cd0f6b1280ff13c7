//! Physics module for level geometry and ray queries
//!
//! Provides the static collision world that character controllers cast
//! rays against, along with layer filtering and 2D shape intersection.

pub mod collision;
pub mod collision_layers;
pub mod world;

pub use collision::{
    ColliderShape,
    ConvexPolygon,
    Ray2D,
    RayHit,
    Segment,
    SurfaceKind,
};
pub use collision_layers::CollisionLayers;
pub use world::{Collider, CollisionWorld, PhysicsError, Raycaster};

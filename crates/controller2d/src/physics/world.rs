//! Static collision world
//!
//! Holds the level geometry that character controllers raycast against. The
//! world is only borrowed immutably while controllers move, so any number of
//! controllers can share it within a frame.

use thiserror::Error;

use crate::foundation::collections::{ColliderHandle, ColliderMap};
use crate::physics::collision::{ColliderShape, Ray2D, RayHit, SurfaceKind};
use crate::physics::collision_layers::CollisionLayers;

/// Ray query interface used by the character controller
///
/// Implemented by [`CollisionWorld`]; hosts with their own spatial structure
/// can implement it directly.
pub trait Raycaster {
    /// Find the closest hit along `ray` within `max_distance`
    ///
    /// Only colliders whose layer intersects `mask` are considered.
    /// `max_distance` may be `f32::INFINITY`.
    fn raycast(&self, ray: &Ray2D, max_distance: f32, mask: CollisionLayers) -> Option<RayHit>;
}

/// Physics errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PhysicsError {
    /// Shape has no extent on at least one axis
    #[error("Degenerate collider shape: {0}")]
    DegenerateShape(String),

    /// Collider references an unknown handle
    #[error("Unknown collider handle")]
    UnknownCollider,
}

/// A piece of level geometry
#[derive(Debug, Clone)]
pub struct Collider {
    /// Human-readable name (for logs and debugging)
    pub name: String,
    /// World-space shape
    pub shape: ColliderShape,
    /// Layers this collider belongs to
    pub layer: CollisionLayers,
    /// Solid or one-way surface
    pub surface: SurfaceKind,
    /// Disabled colliders are skipped by queries
    pub enabled: bool,
}

impl Collider {
    /// Create a solid collider on the ground layer
    pub fn solid(name: impl Into<String>, shape: ColliderShape) -> Self {
        Self {
            name: name.into(),
            shape,
            layer: CollisionLayers::GROUND,
            surface: SurfaceKind::Solid,
            enabled: true,
        }
    }

    /// Create a one-way platform on the platform layer
    pub fn through(name: impl Into<String>, shape: ColliderShape) -> Self {
        Self {
            name: name.into(),
            shape,
            layer: CollisionLayers::PLATFORM,
            surface: SurfaceKind::Through,
            enabled: true,
        }
    }

    /// Set the collision layer
    pub fn with_layer(mut self, layer: CollisionLayers) -> Self {
        self.layer = layer;
        self
    }
}

/// Collection of static colliders with ray queries
#[derive(Debug, Default)]
pub struct CollisionWorld {
    colliders: ColliderMap<Collider>,
}

impl CollisionWorld {
    /// Create an empty world
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a collider and return its handle
    pub fn insert(&mut self, collider: Collider) -> Result<ColliderHandle, PhysicsError> {
        if collider.shape.is_degenerate() {
            return Err(PhysicsError::DegenerateShape(collider.name));
        }

        log::debug!(
            "Adding collider '{}' ({:?}, {:?}) bounds {:?}",
            collider.name,
            collider.surface,
            collider.layer,
            collider.shape.aabb()
        );
        Ok(self.colliders.insert(collider))
    }

    /// Remove a collider, returning it if it existed
    pub fn remove(&mut self, handle: ColliderHandle) -> Option<Collider> {
        self.colliders.remove(handle)
    }

    /// Look up a collider
    pub fn get(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.colliders.get(handle)
    }

    /// Enable or disable a collider
    pub fn set_enabled(&mut self, handle: ColliderHandle, enabled: bool) -> Result<(), PhysicsError> {
        let collider = self.colliders.get_mut(handle).ok_or(PhysicsError::UnknownCollider)?;
        collider.enabled = enabled;
        Ok(())
    }

    /// Number of colliders
    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    /// Whether the world has no colliders
    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// Iterate over all colliders
    pub fn iter(&self) -> impl Iterator<Item = (ColliderHandle, &Collider)> {
        self.colliders.iter()
    }
}

impl Raycaster for CollisionWorld {
    fn raycast(&self, ray: &Ray2D, max_distance: f32, mask: CollisionLayers) -> Option<RayHit> {
        let mut closest: Option<RayHit> = None;

        for (handle, collider) in &self.colliders {
            if !collider.enabled || !collider.layer.intersects(mask) {
                continue;
            }

            let Some(hit) = collider.shape.intersect_ray(ray, max_distance) else {
                continue;
            };

            // Strictly closer only, so ties keep the first collider found
            if closest.map_or(true, |best| hit.distance < best.distance) {
                closest = Some(RayHit::from_shape_hit(handle, collider.surface, hit));
            }
        }

        closest
    }
}

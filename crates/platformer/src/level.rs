//! Level construction from configuration

use thiserror::Error;

use controller2d::foundation::math::Vec2;
use controller2d::physics::{Collider, ColliderShape, CollisionWorld, PhysicsError, SurfaceKind};

use crate::config::{ColliderConfig, LevelConfig, ShapeConfig};

/// Errors building a level
#[derive(Error, Debug)]
pub enum LevelError {
    /// Geometry that cannot form a collider
    #[error("Collider '{name}' has an invalid {kind} shape")]
    InvalidShape {
        /// Collider name
        name: String,
        /// Shape kind
        kind: &'static str,
    },

    /// Rejected by the collision world
    #[error("Physics error: {0}")]
    Physics(#[from] PhysicsError),
}

/// Build the collision world described by `level`
pub fn build_world(level: &LevelConfig) -> Result<CollisionWorld, LevelError> {
    let mut world = CollisionWorld::new();

    for entry in &level.colliders {
        let shape = build_shape(entry)?;
        let mut collider = match entry.surface {
            SurfaceKind::Solid => Collider::solid(entry.name.clone(), shape),
            SurfaceKind::Through => Collider::through(entry.name.clone(), shape),
        };
        if let Some(layer) = entry.layer {
            collider = collider.with_layer(layer);
        }
        world.insert(collider)?;
    }

    log::info!("Built level with {} colliders", world.len());
    Ok(world)
}

fn build_shape(entry: &ColliderConfig) -> Result<ColliderShape, LevelError> {
    let point = |[x, y]: [f32; 2]| Vec2::new(x, y);
    let invalid = |kind| LevelError::InvalidShape { name: entry.name.clone(), kind };

    match &entry.shape {
        ShapeConfig::Rect { min, max } => Ok(ColliderShape::rect(point(*min), point(*max))),
        ShapeConfig::Ramp { foot, top } => ColliderShape::ramp(point(*foot), point(*top)).ok_or_else(|| invalid("ramp")),
        ShapeConfig::Polygon { vertices } => {
            ColliderShape::polygon(vertices.iter().copied().map(point).collect()).ok_or_else(|| invalid("polygon"))
        }
        ShapeConfig::Segment { a, b } => ColliderShape::segment(point(*a), point(*b)).ok_or_else(|| invalid("segment")),
    }
}

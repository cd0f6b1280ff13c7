//! High-level collision shape abstractions
//!
//! Level geometry is static and stored directly in world space.

use serde::{Deserialize, Serialize};

use crate::foundation::math::{Aabb2, Vec2};
use super::primitives::{ConvexPolygon, Ray2D, Segment, ShapeHit};

/// How a surface responds to characters moving through it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SurfaceKind {
    /// Blocks movement from every direction
    #[default]
    Solid,
    /// One-way platform: only blocks movement toward gravity
    Through,
}

/// Collision shape types (stored in WORLD SPACE)
#[derive(Debug, Clone, PartialEq)]
pub enum ColliderShape {
    /// An axis-aligned box
    Rect(Aabb2),
    /// A convex polygon (slopes, ramps)
    Polygon(ConvexPolygon),
    /// A two-sided edge
    Segment(Segment),
}

impl ColliderShape {
    /// Creates a box shape from two corners
    pub fn rect(a: Vec2, b: Vec2) -> Self {
        Self::Rect(Aabb2::new(a, b))
    }

    /// Creates a convex polygon shape, or `None` if the outline is invalid
    pub fn polygon(vertices: Vec<Vec2>) -> Option<Self> {
        ConvexPolygon::new(vertices).map(Self::Polygon)
    }

    /// Creates an edge shape, or `None` if both ends coincide
    pub fn segment(a: Vec2, b: Vec2) -> Option<Self> {
        Segment::new(a, b).map(Self::Segment)
    }

    /// Creates a right-triangle ramp whose slope rises from `foot` to `top`
    ///
    /// The vertical side sits under `top`, so the ramp can be climbed from
    /// the side of `foot`.
    pub fn ramp(foot: Vec2, top: Vec2) -> Option<Self> {
        Self::polygon(vec![foot, Vec2::new(top.x, foot.y), top])
    }

    /// World-space bounding box of the shape
    pub fn aabb(&self) -> Aabb2 {
        match self {
            Self::Rect(aabb) => *aabb,
            Self::Polygon(polygon) => polygon.aabb(),
            Self::Segment(segment) => segment.aabb(),
        }
    }

    /// Whether the shape has a zero-size extent on either axis
    pub fn is_degenerate(&self) -> bool {
        match self {
            Self::Rect(aabb) => aabb.width() <= 0.0 || aabb.height() <= 0.0,
            Self::Polygon(_) | Self::Segment(_) => false,
        }
    }

    /// Ray intersection test
    pub fn intersect_ray(&self, ray: &Ray2D, max_distance: f32) -> Option<ShapeHit> {
        match self {
            Self::Rect(aabb) => ConvexPolygon::from_aabb(aabb).intersect_ray(ray, max_distance),
            Self::Polygon(polygon) => polygon.intersect_ray(ray, max_distance),
            Self::Segment(segment) => segment.intersect_ray(ray, max_distance),
        }
    }
}

//! Math utilities and types
//!
//! Provides the 2D math types the controller works with. Positions and
//! displacements are 3D (the entity lives in a 3D transform) but every
//! collision query happens in the XY plane.

use serde::{Deserialize, Serialize};

pub use nalgebra::{Vector2, Vector3};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// Axis-aligned bounding box in the XY plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb2 {
    /// Minimum corner (left, bottom)
    pub min: Vec2,
    /// Maximum corner (right, top)
    pub max: Vec2,
}

impl Aabb2 {
    /// Create a box from its two corners
    ///
    /// The corners are reordered so that `min <= max` on both axes.
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self {
            min: Vec2::new(a.x.min(b.x), a.y.min(b.y)),
            max: Vec2::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Create a box from its center and full size
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self::new(center - half, center + half)
    }

    /// Width of the box
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Height of the box
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Grow the box so its size increases by `amount` on each axis
    ///
    /// A negative amount shrinks the box; each side moves by `amount / 2`.
    pub fn expand(&self, amount: f32) -> Self {
        let half = amount * 0.5;
        Self {
            min: self.min - Vec2::new(half, half),
            max: self.max + Vec2::new(half, half),
        }
    }

    /// Check whether a point lies inside or on the boundary
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }
}

/// Sign of a value where zero counts as positive
///
/// Directions derived from a velocity component must always be `+1` or `-1`,
/// so `0.0` and `-0.0` both map to `+1`.
pub fn sign(value: f32) -> f32 {
    if value >= 0.0 {
        1.0
    } else {
        -1.0
    }
}

/// Unsigned angle between two vectors in degrees, in `[0, 180]`
///
/// Returns `0.0` if either vector has zero length.
pub fn angle_between_deg(a: Vec2, b: Vec2) -> f32 {
    let denominator = (a.norm_squared() * b.norm_squared()).sqrt();
    if denominator < 1e-15 {
        return 0.0;
    }
    let cos = (a.dot(&b) / denominator).clamp(-1.0, 1.0);
    cos.acos().to_degrees()
}

/// Gradually move `current` toward `target` like a critically damped spring
///
/// `velocity` carries the rate of change between calls and must be stored by
/// the caller. The result never overshoots `target`.
pub fn smooth_damp(current: f32, target: f32, velocity: &mut f32, smooth_time: f32, delta_time: f32) -> f32 {
    if delta_time <= 0.0 {
        return current;
    }

    let smooth_time = smooth_time.max(0.0001);
    let omega = 2.0 / smooth_time;
    let x = omega * delta_time;
    let exp = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let temp = (*velocity + omega * change) * delta_time;
    *velocity = (*velocity - omega * temp) * exp;
    let mut output = target + (change + temp) * exp;

    // Clamp to the target once we would cross it
    if (target - current > 0.0) == (output > target) {
        output = target;
        *velocity = (output - target) / delta_time;
    }

    output
}

/// Math constants
pub mod constants {
    /// Angle (degrees) below which a surface counts as near-vertical wall
    pub const WALL_ANGLE_MIN: f32 = 85.0;

    /// Angle (degrees) above which a surface no longer counts as a wall
    pub const WALL_ANGLE_MAX: f32 = 95.0;

    /// Tolerance for geometric degeneracy checks
    pub const GEOMETRY_EPSILON: f32 = 1e-6;
}

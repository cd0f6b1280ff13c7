//! Debug ray capture

use crate::foundation::math::Vec2;
use crate::physics::RayHit;

/// Which collision pass cast a ray
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RayKind {
    /// Downward probe for hugging a descending slope
    Descend,
    /// Horizontal collision ray
    Horizontal,
    /// Vertical collision ray
    Vertical,
    /// Horizontal re-check after the vertical pass while climbing
    ClimbRecheck,
    /// Ledge lookahead probe
    GroundAhead,
}

impl RayKind {
    /// Suggested RGBA color for drawing this kind of ray
    pub fn color(self) -> [f32; 4] {
        match self {
            Self::GroundAhead => [0.0, 1.0, 0.0, 1.0],  // Green
            Self::Descend => [1.0, 1.0, 0.0, 1.0],      // Yellow
            Self::ClimbRecheck => [1.0, 0.5, 0.0, 1.0], // Orange
            Self::Horizontal | Self::Vertical => [1.0, 0.0, 0.0, 1.0],
        }
    }
}

/// A single ray cast during a move
#[derive(Debug, Clone, Copy)]
pub struct DebugRay {
    /// Ray origin in world space
    pub origin: Vec2,
    /// Unit direction
    pub direction: Vec2,
    /// Cast length (may be infinite for the descent probe)
    pub length: f32,
    /// Pass that cast the ray
    pub kind: RayKind,
    /// What the ray hit, if anything
    pub hit: Option<RayHit>,
}

impl DebugRay {
    /// End point of the drawn segment: the hit point, or the full cast length
    ///
    /// Infinite rays without a hit are drawn with `fallback_length`.
    pub fn end(&self, fallback_length: f32) -> Vec2 {
        match self.hit {
            Some(hit) => hit.point,
            None if self.length.is_finite() => self.origin + self.direction * self.length,
            None => self.origin + self.direction * fallback_length,
        }
    }
}

/// Per-move buffer of cast rays
#[derive(Debug, Default, Clone)]
pub struct DebugRayBuffer {
    rays: Vec<DebugRay>,
}

impl DebugRayBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a ray
    pub fn push(&mut self, ray: DebugRay) {
        self.rays.push(ray);
    }

    /// Remove all rays (called at the start of every move)
    pub fn clear(&mut self) {
        self.rays.clear();
    }

    /// All rays recorded since the last clear
    pub fn rays(&self) -> &[DebugRay] {
        &self.rays
    }

    /// Rays of one kind
    pub fn of_kind(&self, kind: RayKind) -> impl Iterator<Item = &DebugRay> {
        self.rays.iter().filter(move |ray| ray.kind == kind)
    }
}

//! Per-move collision report

use crate::foundation::collections::ColliderHandle;
use crate::foundation::math::Vec3;
use crate::physics::RayHit;

/// Contact flags and slope state produced by a single move
///
/// Everything is reset at the start of each move except `face_dir` and
/// `slope_angle_old`, which carry the previous move's facing and slope.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionState {
    /// Contact overhead
    pub above: bool,
    /// Contact underfoot
    pub below: bool,
    /// Contact on the left side
    pub left: bool,
    /// Contact on the right side
    pub right: bool,

    /// Horizontal motion was redirected up a slope
    pub climbing_slope: bool,
    /// Horizontal motion was redirected down a slope
    pub descending_slope: bool,
    /// Slope angle in degrees (0 when not on a slope)
    pub slope_angle: f32,
    /// Slope angle of the previous move
    pub slope_angle_old: f32,

    /// Last nonzero horizontal travel direction, +1 or -1
    pub face_dir: f32,
    /// True while one-way platforms are being dropped through
    pub falling_through_platform: bool,
    /// The ledge probe found ground ahead of the leading foot
    pub grounded_ahead: bool,
    /// A horizontal ray hit a near-vertical surface
    pub is_wall: bool,

    /// Velocity requested at the start of the move, before any correction
    pub velocity_old: Vec3,
    /// Last blocking hit recorded by either pass
    pub closest_hit: Option<RayHit>,
    /// Collider struck by an upward vertical ray
    pub hit_above: Option<ColliderHandle>,
    /// Collider struck by a downward vertical ray
    pub hit_below: Option<ColliderHandle>,
}

impl CollisionState {
    /// Fresh state, facing right
    pub fn new() -> Self {
        Self {
            above: false,
            below: false,
            left: false,
            right: false,
            climbing_slope: false,
            descending_slope: false,
            slope_angle: 0.0,
            slope_angle_old: 0.0,
            face_dir: 1.0,
            falling_through_platform: false,
            grounded_ahead: false,
            is_wall: false,
            velocity_old: Vec3::zeros(),
            closest_hit: None,
            hit_above: None,
            hit_below: None,
        }
    }

    /// Clear per-move results
    ///
    /// The current slope angle becomes `slope_angle_old`. `face_dir` is kept.
    /// `falling_through_platform` is owned by the controller's timer and is
    /// rewritten on every move, so it is left alone here.
    pub fn reset(&mut self) {
        self.above = false;
        self.below = false;
        self.left = false;
        self.right = false;
        self.climbing_slope = false;
        self.descending_slope = false;
        self.grounded_ahead = false;
        self.is_wall = false;

        self.slope_angle_old = self.slope_angle;
        self.slope_angle = 0.0;

        self.closest_hit = None;
        self.hit_above = None;
        self.hit_below = None;
    }

    /// Whether any side reported contact
    pub fn any(&self) -> bool {
        self.above || self.below || self.left || self.right
    }

    /// Contact on the side facing `direction` (+1 right, -1 left)
    pub fn blocked_towards(&self, direction: f32) -> bool {
        if direction > 0.0 {
            self.right
        } else if direction < 0.0 {
            self.left
        } else {
            false
        }
    }
}

impl Default for CollisionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_keeps_facing_and_rolls_slope() {
        let mut state = CollisionState::new();
        state.below = true;
        state.left = true;
        state.climbing_slope = true;
        state.is_wall = true;
        state.slope_angle = 30.0;
        state.face_dir = -1.0;

        state.reset();

        assert!(!state.any());
        assert!(!state.climbing_slope);
        assert!(!state.is_wall);
        assert_eq!(state.slope_angle, 0.0);
        assert_eq!(state.slope_angle_old, 30.0);
        assert_eq!(state.face_dir, -1.0);

        // A second reset with no slope in between forgets it
        state.reset();
        assert_eq!(state.slope_angle_old, 0.0);
    }

    #[test]
    fn test_blocked_towards() {
        let state = CollisionState { right: true, ..CollisionState::new() };

        assert!(state.blocked_towards(1.0));
        assert!(!state.blocked_towards(-1.0));
        assert!(!state.blocked_towards(0.0));
    }
}

//! Ray geometry for a box-shaped character
//!
//! Rays are cast from the corners of the collider box after shrinking it by
//! the skin width, so a box resting flush against a surface never starts a
//! ray inside that surface.

use crate::foundation::math::{Aabb2, Vec2, Vec3};
use super::config::{ControllerError, MIN_RAY_COUNT};

/// Box collider attached to the moving entity, relative to its position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxCollider {
    /// Full size of the box
    pub size: Vec2,
    /// Offset of the box center from the entity position
    pub offset: Vec2,
}

impl BoxCollider {
    /// Create a box centered on the entity
    pub fn new(size: Vec2) -> Self {
        Self { size, offset: Vec2::zeros() }
    }

    /// Set the center offset
    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }
}

/// The four corners rays are cast from
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RaycastOrigins {
    /// Bottom-left corner
    pub bottom_left: Vec2,
    /// Bottom-right corner
    pub bottom_right: Vec2,
    /// Top-left corner
    pub top_left: Vec2,
    /// Top-right corner
    pub top_right: Vec2,
}

/// Geometric setup shared by the collision passes
#[derive(Debug, Clone)]
pub struct RaycastController {
    position: Vec3,
    collider: BoxCollider,
    skin_width: f32,
    horizontal_ray_count: usize,
    vertical_ray_count: usize,
    horizontal_ray_spacing: f32,
    vertical_ray_spacing: f32,
    origins: RaycastOrigins,
}

impl RaycastController {
    /// Create the ray geometry for a box at `position`
    ///
    /// Fails when the box has no room for rays once the skin is removed.
    pub fn new(
        position: Vec3,
        collider: BoxCollider,
        skin_width: f32,
        horizontal_ray_count: usize,
        vertical_ray_count: usize,
    ) -> Result<Self, ControllerError> {
        validate_box(collider.size, skin_width)?;

        let mut raycast = Self {
            position,
            collider,
            skin_width,
            horizontal_ray_count,
            vertical_ray_count,
            horizontal_ray_spacing: 0.0,
            vertical_ray_spacing: 0.0,
            origins: RaycastOrigins::default(),
        };
        raycast.calculate_ray_spacing();
        raycast.update_ray_origins();
        Ok(raycast)
    }

    /// World-space bounds of the collider box
    pub fn bounds(&self) -> Aabb2 {
        Aabb2::from_center_size(self.position.xy() + self.collider.offset, self.collider.size)
    }

    /// Bounds shrunk by the skin width on every side
    pub fn inner_bounds(&self) -> Aabb2 {
        self.bounds().expand(self.skin_width * -2.0)
    }

    /// Recompute ray origins from the current box position
    pub fn update_ray_origins(&mut self) {
        let bounds = self.inner_bounds();

        self.origins = RaycastOrigins {
            bottom_left: Vec2::new(bounds.min.x, bounds.min.y),
            bottom_right: Vec2::new(bounds.max.x, bounds.min.y),
            top_left: Vec2::new(bounds.min.x, bounds.max.y),
            top_right: Vec2::new(bounds.max.x, bounds.max.y),
        };
    }

    /// Recompute ray counts and the spacing between parallel rays
    pub fn calculate_ray_spacing(&mut self) {
        let bounds = self.inner_bounds();

        if self.horizontal_ray_count < MIN_RAY_COUNT || self.vertical_ray_count < MIN_RAY_COUNT {
            log::warn!(
                "Ray counts ({}, {}) below minimum, clamping to {}",
                self.horizontal_ray_count,
                self.vertical_ray_count,
                MIN_RAY_COUNT
            );
        }
        self.horizontal_ray_count = self.horizontal_ray_count.max(MIN_RAY_COUNT);
        self.vertical_ray_count = self.vertical_ray_count.max(MIN_RAY_COUNT);

        self.horizontal_ray_spacing = bounds.height() / (self.horizontal_ray_count - 1) as f32;
        self.vertical_ray_spacing = bounds.width() / (self.vertical_ray_count - 1) as f32;
    }

    /// Resize the collider box
    pub fn set_collider_size(&mut self, size: Vec2) -> Result<(), ControllerError> {
        validate_box(size, self.skin_width)?;
        self.collider.size = size;
        self.calculate_ray_spacing();
        self.update_ray_origins();
        Ok(())
    }

    /// Move the entity by a world-space offset
    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
    }

    /// Entity position
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Teleport the entity
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Collider box
    pub fn collider(&self) -> BoxCollider {
        self.collider
    }

    /// Current ray origins
    pub fn origins(&self) -> &RaycastOrigins {
        &self.origins
    }

    /// Skin width
    pub fn skin_width(&self) -> f32 {
        self.skin_width
    }

    /// Number of horizontal rays (after clamping)
    pub fn horizontal_ray_count(&self) -> usize {
        self.horizontal_ray_count
    }

    /// Number of vertical rays (after clamping)
    pub fn vertical_ray_count(&self) -> usize {
        self.vertical_ray_count
    }

    /// Vertical distance between horizontal rays
    pub fn horizontal_ray_spacing(&self) -> f32 {
        self.horizontal_ray_spacing
    }

    /// Horizontal distance between vertical rays
    pub fn vertical_ray_spacing(&self) -> f32 {
        self.vertical_ray_spacing
    }
}

fn validate_box(size: Vec2, skin_width: f32) -> Result<(), ControllerError> {
    let width = size.x - skin_width * 2.0;
    let height = size.y - skin_width * 2.0;

    if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
        return Err(ControllerError::DegenerateBounds { width, height });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const SKIN: f32 = 0.015;

    fn unit_box_at(x: f32, y: f32) -> RaycastController {
        RaycastController::new(Vec3::new(x, y, 0.0), BoxCollider::new(Vec2::new(1.0, 1.0)), SKIN, 4, 4).unwrap()
    }

    #[test]
    fn test_origins_are_shrunk_corners() {
        let raycast = unit_box_at(0.0, 0.0);
        let origins = raycast.origins();

        assert_relative_eq!(origins.bottom_left, Vec2::new(-0.485, -0.485), epsilon = 1e-6);
        assert_relative_eq!(origins.bottom_right, Vec2::new(0.485, -0.485), epsilon = 1e-6);
        assert_relative_eq!(origins.top_left, Vec2::new(-0.485, 0.485), epsilon = 1e-6);
        assert_relative_eq!(origins.top_right, Vec2::new(0.485, 0.485), epsilon = 1e-6);
    }

    #[test]
    fn test_origins_follow_translation() {
        let mut raycast = unit_box_at(0.0, 0.0);
        raycast.translate(Vec3::new(2.0, 1.0, 0.0));

        // Origins are stale until explicitly refreshed
        assert_relative_eq!(raycast.origins().bottom_left, Vec2::new(-0.485, -0.485), epsilon = 1e-6);

        raycast.update_ray_origins();
        assert_relative_eq!(raycast.origins().bottom_left, Vec2::new(1.515, 0.515), epsilon = 1e-6);
    }

    #[test]
    fn test_offset_collider() {
        let collider = BoxCollider::new(Vec2::new(1.0, 2.0)).with_offset(Vec2::new(0.0, 1.0));
        let raycast = RaycastController::new(Vec3::zeros(), collider, SKIN, 4, 4).unwrap();

        assert_relative_eq!(raycast.bounds().min, Vec2::new(-0.5, 0.0), epsilon = 1e-6);
        assert_relative_eq!(raycast.origins().bottom_left, Vec2::new(-0.485, 0.015), epsilon = 1e-6);
    }

    #[test]
    fn test_ray_spacing() {
        let raycast = RaycastController::new(
            Vec3::zeros(),
            BoxCollider::new(Vec2::new(2.0, 1.0)),
            SKIN,
            4,
            5,
        )
        .unwrap();

        assert_relative_eq!(raycast.horizontal_ray_spacing(), 0.97 / 3.0, epsilon = 1e-6);
        assert_relative_eq!(raycast.vertical_ray_spacing(), 1.97 / 4.0, epsilon = 1e-6);
    }

    #[test]
    fn test_ray_counts_clamped_to_two() {
        let raycast = RaycastController::new(Vec3::zeros(), BoxCollider::new(Vec2::new(1.0, 1.0)), SKIN, 0, 1).unwrap();

        assert_eq!(raycast.horizontal_ray_count(), 2);
        assert_eq!(raycast.vertical_ray_count(), 2);
        assert_relative_eq!(raycast.horizontal_ray_spacing(), 0.97, epsilon = 1e-6);
        assert!(raycast.vertical_ray_spacing().is_finite());
    }

    #[test]
    fn test_degenerate_box_rejected() {
        let zero = RaycastController::new(Vec3::zeros(), BoxCollider::new(Vec2::new(0.0, 1.0)), SKIN, 4, 4);
        assert!(matches!(zero, Err(ControllerError::DegenerateBounds { .. })));

        // Exactly twice the skin leaves nothing to cast from
        let skin_only = RaycastController::new(Vec3::zeros(), BoxCollider::new(Vec2::new(0.03, 1.0)), SKIN, 4, 4);
        assert!(skin_only.is_err());

        let nan = RaycastController::new(Vec3::zeros(), BoxCollider::new(Vec2::new(f32::NAN, 1.0)), SKIN, 4, 4);
        assert!(nan.is_err());
    }

    #[test]
    fn test_resize_revalidates() {
        let mut raycast = unit_box_at(0.0, 0.0);

        assert!(raycast.set_collider_size(Vec2::new(-1.0, 1.0)).is_err());
        assert_eq!(raycast.collider().size, Vec2::new(1.0, 1.0));

        raycast.set_collider_size(Vec2::new(1.0, 2.0)).unwrap();
        assert_relative_eq!(raycast.horizontal_ray_spacing(), 1.97 / 3.0, epsilon = 1e-6);
    }
}

//! Controller scenario tests
//!
//! Worlds here are built from a unit box (1 x 1) with the default skin of
//! 0.015, so its ray origins sit 0.015 inside every edge.

mod slopes;

use crate::controller::{BoxCollider, Controller2D, ControllerConfig, MoveRequest};
use crate::foundation::math::{Vec2, Vec3};
use crate::foundation::time::SimTime;
use crate::physics::{Collider, ColliderShape, CollisionWorld};

pub(crate) const SKIN: f32 = 0.015;

/// Unit box controller centered at `(x, y)`
pub(crate) fn unit_controller(x: f32, y: f32) -> Controller2D {
    controller_with(ControllerConfig::default(), x, y)
}

pub(crate) fn controller_with(config: ControllerConfig, x: f32, y: f32) -> Controller2D {
    Controller2D::new(config, Vec3::new(x, y, 0.0), BoxCollider::new(Vec2::new(1.0, 1.0))).unwrap()
}

/// Wide solid slab whose top surface is at `top`
pub(crate) fn floor_at(world: &mut CollisionWorld, top: f32) {
    world
        .insert(Collider::solid("floor", ColliderShape::rect(Vec2::new(-50.0, top - 2.0), Vec2::new(50.0, top))))
        .unwrap();
}

/// Wide solid slab whose bottom surface is at `bottom`
pub(crate) fn ceiling_at(world: &mut CollisionWorld, bottom: f32) {
    world
        .insert(Collider::solid("ceiling", ColliderShape::rect(Vec2::new(-50.0, bottom), Vec2::new(50.0, bottom + 2.0))))
        .unwrap();
}

pub(crate) fn step(x: f32, y: f32) -> Vec3 {
    Vec3::new(x, y, 0.0)
}

/// Move at time zero, for scenarios that never wait on the fall-through timer
pub(crate) fn request(velocity: Vec3) -> MoveRequest {
    MoveRequest::new(velocity, SimTime::ZERO)
}

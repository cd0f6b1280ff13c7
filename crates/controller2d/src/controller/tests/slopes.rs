use approx::assert_relative_eq;

use super::*;
use crate::debug::RayKind;
use crate::physics::ConvexPolygon;

/// Ramp rising to the right at `degrees`, starting at x = 1 on a floor at y = 0
fn rising_ramp(world: &mut CollisionWorld, degrees: f32) -> ConvexPolygon {
    let run = 10.0;
    let top = Vec2::new(1.0 + run, run * degrees.to_radians().tan());
    let shape = ColliderShape::ramp(Vec2::new(1.0, 0.0), top).unwrap();
    let ColliderShape::Polygon(polygon) = shape.clone() else {
        unreachable!("ramps are polygons");
    };
    world.insert(Collider::solid("ramp", shape)).unwrap();
    polygon
}

/// Box resting on the floor with its leading ray origin 0.015 short of the ramp foot
fn at_ramp_foot() -> Controller2D {
    unit_controller(0.5, 0.5)
}

fn world_with_ramp(degrees: f32) -> (CollisionWorld, ConvexPolygon) {
    let mut world = CollisionWorld::new();
    floor_at(&mut world, 0.0);
    let ramp = rising_ramp(&mut world, degrees);
    (world, ramp)
}

#[test]
fn test_climb_redirects_along_slope() {
    let (world, _) = world_with_ramp(30.0);
    let mut controller = at_ramp_foot();

    // First contact walks onto the ramp and records its angle
    let first = controller.move_by(&world, request(step(0.1, 0.0))).unwrap();
    assert!(first.collisions.climbing_slope);
    assert_relative_eq!(first.collisions.slope_angle, 30.0, epsilon = 1e-3);

    let outcome = controller.move_by(&world, request(step(0.1, 0.0))).unwrap();
    let theta = outcome.collisions.slope_angle.to_radians();

    assert_relative_eq!(outcome.collisions.slope_angle, 30.0, epsilon = 1e-3);
    assert_relative_eq!(outcome.displacement.x, theta.cos() * 0.1, epsilon = 1e-5);
    assert_relative_eq!(outcome.displacement.y, theta.sin() * 0.1, epsilon = 1e-5);
    assert!(outcome.collisions.climbing_slope);
    assert!(outcome.collisions.below);
    assert!(!outcome.collisions.right);
}

#[test]
fn test_climb_leftward_keeps_sign() {
    let mut world = CollisionWorld::new();
    floor_at(&mut world, 0.0);
    // Mirror image: rises to the left from x = -1
    let top = Vec2::new(-11.0, 10.0 * 20.0_f32.to_radians().tan());
    world
        .insert(Collider::solid("ramp", ColliderShape::ramp(Vec2::new(-1.0, 0.0), top).unwrap()))
        .unwrap();
    let mut controller = unit_controller(-0.5, 0.5);

    controller.move_by(&world, request(step(-0.1, 0.0))).unwrap();
    let outcome = controller.move_by(&world, request(step(-0.1, 0.0))).unwrap();
    let theta = 20.0_f32.to_radians();

    assert!(outcome.collisions.climbing_slope);
    assert_relative_eq!(outcome.displacement.x, -theta.cos() * 0.1, epsilon = 1e-4);
    assert_relative_eq!(outcome.displacement.y, theta.sin() * 0.1, epsilon = 1e-4);
    assert!(!outcome.collisions.left);
}

#[test]
fn test_climb_with_gravity_still_follows_slope() {
    let (world, ramp) = world_with_ramp(30.0);
    let mut controller = at_ramp_foot();

    for _ in 0..20 {
        let outcome = controller.move_by(&world, request(step(0.05, -0.01))).unwrap();
        assert!(outcome.collisions.below);

        let inner = controller.bounds().expand(-2.0 * SKIN);
        assert!(!ramp.contains(Vec2::new(inner.max.x, inner.min.y)), "leading foot sank into the ramp");
    }

    assert!(controller.position().x > 1.2);
    assert!(controller.position().y > 0.6);
}

#[test]
fn test_new_slope_consumes_distance_to_foot() {
    let (world, _) = world_with_ramp(30.0);
    let mut controller = at_ramp_foot();
    controller.enable_debug_rays(true);

    let outcome = controller.move_by(&world, request(step(0.1, 0.0))).unwrap();

    let first_ray = controller
        .debug_rays()
        .and_then(|rays| rays.of_kind(RayKind::Horizontal).next().copied())
        .unwrap();
    let to_foot = first_ray.hit.unwrap().distance - SKIN;
    let theta = 30.0_f32.to_radians();

    assert!(to_foot > 0.0);
    assert_relative_eq!(outcome.displacement.x, theta.cos() * (0.1 - to_foot) + to_foot, epsilon = 1e-5);
    assert_relative_eq!(outcome.displacement.y, theta.sin() * (0.1 - to_foot), epsilon = 1e-5);
    assert_eq!(outcome.collisions.slope_angle_old, 0.0);
}

#[test]
fn test_too_steep_slope_blocks() {
    let (world, _) = world_with_ramp(83.0);
    let mut controller = at_ramp_foot();

    let outcome = controller.move_by(&world, request(step(0.1, 0.0))).unwrap();
    let hit = outcome.collisions.closest_hit.unwrap();

    assert!(!outcome.collisions.climbing_slope);
    assert!(outcome.collisions.right);
    assert!(!outcome.collisions.is_wall);
    assert_relative_eq!(outcome.displacement.x, hit.distance - SKIN, epsilon = 1e-6);
    assert_eq!(outcome.displacement.y, 0.0);
}

#[test]
fn test_jump_is_not_flattened_by_slope() {
    let (world, _) = world_with_ramp(30.0);
    let mut controller = at_ramp_foot();

    let outcome = controller.move_by(&world, request(step(0.1, 0.2))).unwrap();

    assert!(!outcome.collisions.climbing_slope);
    assert_relative_eq!(outcome.displacement.y, 0.2, epsilon = 1e-6);
    // Not climbing, so the slope face stops the horizontal part of the jump
    assert!(outcome.collisions.right);
}

#[test]
fn test_slope_oscillation_after_descent_skips_foot_offset() {
    let (world, ramp) = world_with_ramp(30.0);
    let mut controller = at_ramp_foot();
    let theta = 30.0_f32.to_radians();

    // Walk onto the ramp, then alternate stepping back off and on again
    controller.move_by(&world, request(step(0.1, 0.0))).unwrap();
    let mut on_ramp: Option<Vec3> = None;

    for _ in 0..6 {
        // Stepping back off hugs the slope, which records its angle
        let back = controller.move_by(&world, request(step(-0.1, -0.05))).unwrap();
        assert!(back.collisions.descending_slope);
        assert!(!back.collisions.climbing_slope);
        assert_relative_eq!(back.collisions.slope_angle, 30.0, epsilon = 1e-3);

        // So re-entry is not treated as a new slope and climbs the full step
        let on = controller.move_by(&world, request(step(0.1, 0.0))).unwrap();
        assert!(on.collisions.climbing_slope);
        assert_eq!(on.collisions.slope_angle_old, back.collisions.slope_angle);
        assert_relative_eq!(on.displacement.x, theta.cos() * 0.1, epsilon = 1e-5);
        assert_relative_eq!(on.displacement.y, theta.sin() * 0.1, epsilon = 1e-5);

        let inner = controller.bounds().expand(-2.0 * SKIN);
        assert!(!ramp.contains(Vec2::new(inner.max.x, inner.min.y)));

        // Settles into a fixed cycle instead of drifting
        let position = controller.position();
        if let Some(previous) = on_ramp {
            assert_relative_eq!(position, previous, epsilon = 1e-4);
        }
        on_ramp = Some(position);
    }
}

/// Ramp falling away to the right from the origin
fn world_with_descent(degrees: f32) -> CollisionWorld {
    let mut world = CollisionWorld::new();
    let drop = 10.0 * degrees.to_radians().tan();
    let shape = ColliderShape::ramp(Vec2::new(10.0, -drop), Vec2::new(0.0, 0.0)).unwrap();
    world.insert(Collider::solid("descent", shape)).unwrap();
    world
}

/// Box whose trailing foot ray origin rests one skin above the descent at x
fn on_descent(degrees: f32, x: f32) -> Controller2D {
    let foot_x = x - 0.5 + SKIN;
    let surface_y = -foot_x * degrees.to_radians().tan();
    // Box bottom on the surface puts the ray origin one skin above it
    unit_controller(x, surface_y + 0.5)
}

#[test]
fn test_descend_hugs_slope() {
    let world = world_with_descent(30.0);
    let mut controller = on_descent(30.0, 2.0);

    let outcome = controller.move_by(&world, request(step(0.1, -0.02))).unwrap();
    let theta = 30.0_f32.to_radians();

    assert!(outcome.collisions.descending_slope);
    assert!(outcome.collisions.below);
    assert_relative_eq!(outcome.collisions.slope_angle, 30.0, epsilon = 1e-3);
    assert_relative_eq!(outcome.displacement.x, theta.cos() * 0.1, epsilon = 1e-4);
    assert_relative_eq!(outcome.displacement.y, -theta.sin() * 0.1, epsilon = 1e-4);
}

#[test]
fn test_no_descent_when_walking_uphill() {
    let world = world_with_descent(30.0);
    let mut controller = on_descent(30.0, 2.0);

    let outcome = controller.move_by(&world, request(step(-0.1, -0.02))).unwrap();

    assert!(!outcome.collisions.descending_slope);
    assert!(outcome.collisions.climbing_slope);
}

#[test]
fn test_descent_needs_slope_within_reach() {
    let world = world_with_descent(30.0);
    let mut controller = on_descent(30.0, 2.0);
    controller.set_position(controller.position() + step(0.0, 1.0));

    let outcome = controller.move_by(&world, request(step(0.1, -0.02))).unwrap();

    assert!(!outcome.collisions.descending_slope);
    assert!(!outcome.collisions.below);
    assert_eq!(outcome.displacement, step(0.1, -0.02));
}

#[test]
fn test_one_way_ramp_is_still_a_slope() {
    let mut world = CollisionWorld::new();
    floor_at(&mut world, 0.0);
    let top = Vec2::new(11.0, 10.0 * 30.0_f32.to_radians().tan());
    world
        .insert(Collider::through("ramp", ColliderShape::ramp(Vec2::new(1.0, 0.0), top).unwrap()))
        .unwrap();
    let mut controller = at_ramp_foot();

    // One-way surfaces are only filtered vertically
    let outcome = controller.move_by(&world, request(step(0.1, 0.0))).unwrap();

    assert!(outcome.collisions.climbing_slope);
    assert!(outcome.collisions.below);
    assert!(outcome.collisions.closest_hit.is_none());
}

#[test]
fn test_climb_recheck_switches_to_steeper_slope() {
    let gentle = 20.0_f32.to_radians().tan();
    let steep = 50.0_f32.to_radians().tan();
    let junction = Vec2::new(6.0, 5.0 * gentle);

    let mut world = CollisionWorld::new();
    floor_at(&mut world, 0.0);
    let lower = ColliderShape::ramp(Vec2::new(1.0, 0.0), junction).unwrap();
    let upper = ColliderShape::ramp(junction, junction + Vec2::new(5.0, 5.0 * steep)).unwrap();
    world.insert(Collider::solid("lower", lower)).unwrap();
    world.insert(Collider::solid("upper", upper)).unwrap();

    // Record the gentle slope so the next move is not treated as a new slope
    let mut controller = at_ramp_foot();
    let first = controller.move_by(&world, request(step(0.1, 0.0))).unwrap();
    assert_relative_eq!(first.collisions.slope_angle, 20.0, epsilon = 1e-3);

    // Leading ray origin just under the junction, 0.06 short of the gentle face
    let origin = Vec2::new(junction.x - 0.002 / gentle - 0.06, junction.y - 0.002);
    controller.set_position(step(origin.x + SKIN - 0.5, origin.y - SKIN + 0.5));
    controller.enable_debug_rays(true);

    let outcome = controller.move_by(&world, request(step(0.1, 0.0))).unwrap();
    let rise = 20.0_f32.to_radians().sin() * 0.1;
    let to_steep_face = junction.x + (origin.y + rise - junction.y) / steep - origin.x;

    assert_eq!(outcome.collisions.slope_angle_old, first.collisions.slope_angle);
    assert!(outcome.collisions.climbing_slope);
    assert_relative_eq!(outcome.collisions.slope_angle, 50.0, epsilon = 1e-3);
    assert_relative_eq!(outcome.displacement.y, rise, epsilon = 1e-5);
    assert_relative_eq!(outcome.displacement.x, to_steep_face - SKIN, epsilon = 1e-4);

    let recheck = controller
        .debug_rays()
        .and_then(|rays| rays.of_kind(RayKind::ClimbRecheck).next().copied())
        .unwrap();
    assert_relative_eq!(recheck.origin.y, origin.y + rise, epsilon = 1e-5);
    assert!(recheck.hit.is_some());
}

#[test]
fn test_ceiling_mid_climb_shortens_step_along_slope() {
    let (mut world, ramp) = world_with_ramp(30.0);
    let mut controller = at_ramp_foot();
    controller.move_by(&world, request(step(0.1, 0.0))).unwrap();

    ceiling_at(&mut world, controller.bounds().max.y + 0.02);
    let outcome = controller.move_by(&world, request(step(0.1, 0.0))).unwrap();

    assert!(outcome.collisions.climbing_slope);
    assert!(outcome.collisions.above);
    // The ceiling hit replaces the ground contact from the climb
    assert!(!outcome.collisions.below);
    assert_relative_eq!(outcome.displacement.y, 0.02, epsilon = 1e-5);
    assert_relative_eq!(outcome.displacement.x, 0.02 / 30.0_f32.to_radians().tan(), epsilon = 1e-4);
    assert_relative_eq!(outcome.collisions.slope_angle, 30.0, epsilon = 1e-3);

    let inner = controller.bounds().expand(-2.0 * SKIN);
    assert!(!ramp.contains(Vec2::new(inner.max.x, inner.min.y)));
}

#[test]
fn test_ledge_guard_on_descent_stays_on_surface() {
    let degrees = 60.0_f32;
    let world = world_with_descent(degrees);
    let mut controller = on_descent(degrees, 2.0);
    let surface_at = |x: f32| -x * degrees.to_radians().tan();

    let outcome = controller
        .move_by(&world, request(step(0.1, -0.02)).with_ledge_guard())
        .unwrap();

    assert!(outcome.collisions.below);
    assert!(!outcome.collisions.grounded_ahead);
    assert_eq!(outcome.displacement.x, 0.0);
    assert_relative_eq!(outcome.displacement.y, 0.0, epsilon = 1e-4);

    // Trailing ray origin still rests a skin above the slope
    let bounds = controller.bounds();
    assert!(bounds.min.y >= surface_at(bounds.min.x + SKIN) - 1e-4);

    // Without the guard the same move walks down the slope
    let mut unguarded = on_descent(degrees, 2.0);
    let outcome = unguarded.move_by(&world, request(step(0.1, -0.02))).unwrap();
    assert!(outcome.collisions.descending_slope);
    assert!(outcome.displacement.x > 0.0);
    let bounds = unguarded.bounds();
    assert!(bounds.min.y >= surface_at(bounds.min.x + SKIN) - 1e-4);
}

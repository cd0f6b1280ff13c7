//! # Controller2D
//!
//! Resolves a requested displacement against static geometry. Each move runs
//! these passes in order, synchronously:
//!
//! 1. slope descent (only while moving down)
//! 2. horizontal collisions, including slope climbing
//! 3. vertical collisions, including one-way platforms and the climb re-check
//! 4. the ground-ahead probe
//!
//! With the ledge guard on, a grounded move with nothing ahead runs passes 1-3
//! again with the horizontal part removed.
//!
//! The corrected displacement is then applied to the entity position and the
//! contact flags for this move are returned to the caller.

use crate::debug::{DebugRay, DebugRayBuffer, RayKind};
use crate::foundation::math::{angle_between_deg, constants, sign, Aabb2, Vec2, Vec3};
use crate::foundation::time::SimTime;
use crate::physics::{Ray2D, RayHit, Raycaster, SurfaceKind};

use super::collisions::CollisionState;
use super::config::{ControllerConfig, ControllerError};
use super::raycast::{BoxCollider, RaycastController};

/// Rays shorter than this many skin widths would miss adjacent walls
const MIN_HORIZONTAL_RAY_SKINS: f32 = 5.0;

/// Input to a single [`Controller2D::move_by`] call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveRequest {
    /// Displacement for this step, already scaled by the timestep
    pub velocity: Vec3,
    /// Directional input; `y <= -1` means "down" is held
    pub input: Vec2,
    /// The entity is carried by something outside the collision world
    pub standing_on_platform: bool,
    /// Facing used by the ground-ahead probe when not moving horizontally
    pub facing_right: bool,
    /// When false, horizontal motion off a ledge is cancelled
    pub ignore_ground_ahead_check: bool,
    /// Simulation time of this step, used by the fall-through timer
    pub now: SimTime,
}

impl MoveRequest {
    /// Request a displacement with no input at simulation time `now`
    pub fn new(velocity: Vec3, now: SimTime) -> Self {
        Self {
            velocity,
            input: Vec2::zeros(),
            standing_on_platform: false,
            facing_right: false,
            ignore_ground_ahead_check: true,
            now,
        }
    }

    /// Set the directional input
    pub fn with_input(mut self, input: Vec2) -> Self {
        self.input = input;
        self
    }

    /// Mark the entity as externally supported
    pub fn with_standing_on_platform(mut self, standing: bool) -> Self {
        self.standing_on_platform = standing;
        self
    }

    /// Set the facing used when horizontal velocity is zero
    pub fn with_facing_right(mut self, facing_right: bool) -> Self {
        self.facing_right = facing_right;
        self
    }

    /// Stop at ledges instead of walking off them
    pub fn with_ledge_guard(mut self) -> Self {
        self.ignore_ground_ahead_check = false;
        self
    }
}

/// Result of a single move
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveOutcome {
    /// Displacement actually applied to the entity
    pub displacement: Vec3,
    /// Contact state produced by this move
    pub collisions: CollisionState,
}

/// Raycast-based kinematic character controller
#[derive(Debug, Clone)]
pub struct Controller2D {
    config: ControllerConfig,
    raycast: RaycastController,
    collisions: CollisionState,
    fall_through_until: Option<SimTime>,
    debug_rays: Option<DebugRayBuffer>,
}

impl Controller2D {
    /// Create a controller for a box at `position`
    pub fn new(config: ControllerConfig, position: Vec3, collider: BoxCollider) -> Result<Self, ControllerError> {
        config.validate()?;
        let raycast = RaycastController::new(
            position,
            collider,
            config.skin_width,
            config.horizontal_ray_count,
            config.vertical_ray_count,
        )?;

        log::debug!(
            "Created controller at ({:.3}, {:.3}) with box {:.3} x {:.3}",
            position.x,
            position.y,
            collider.size.x,
            collider.size.y
        );

        Ok(Self {
            config,
            raycast,
            collisions: CollisionState::new(),
            fall_through_until: None,
            debug_rays: None,
        })
    }

    /// Move the entity by the requested displacement, resolving collisions
    pub fn move_by(&mut self, world: &impl Raycaster, request: MoveRequest) -> Result<MoveOutcome, ControllerError> {
        let mut velocity = request.velocity;
        if !velocity.iter().all(|component| component.is_finite()) {
            return Err(ControllerError::NonFiniteVelocity {
                x: velocity.x,
                y: velocity.y,
                z: velocity.z,
            });
        }

        self.raycast.calculate_ray_spacing();
        self.raycast.update_ray_origins();
        self.collisions.reset();
        self.collisions.velocity_old = velocity;
        self.expire_fall_through(request.now);
        if let Some(buffer) = self.debug_rays.as_mut() {
            buffer.clear();
        }

        if velocity.x != 0.0 {
            self.collisions.face_dir = sign(velocity.x);
        }

        let fresh = self.collisions;
        let fall_through_until = self.fall_through_until;

        self.resolve(world, &mut velocity, request.input, request.now);
        self.check_ground_ahead(world, velocity, request.facing_right);

        if !request.ignore_ground_ahead_check
            && self.collisions.below
            && !self.collisions.grounded_ahead
            && velocity.x != 0.0
        {
            // The vertical pass checked the shifted position, so solve again in place
            log::trace!("Ledge ahead, cancelling horizontal move of {:.4}", velocity.x);
            self.collisions = fresh;
            self.fall_through_until = fall_through_until;
            velocity = request.velocity;
            velocity.x = 0.0;
            self.collisions.velocity_old = velocity;
            self.resolve(world, &mut velocity, request.input, request.now);
        }

        self.raycast.translate(velocity);

        if request.standing_on_platform {
            self.collisions.below = true;
        }

        log::trace!(
            "Moved by ({:.4}, {:.4}) below={} above={} left={} right={} slope={:.1}",
            velocity.x,
            velocity.y,
            self.collisions.below,
            self.collisions.above,
            self.collisions.left,
            self.collisions.right,
            self.collisions.slope_angle
        );

        Ok(MoveOutcome {
            displacement: velocity,
            collisions: self.collisions,
        })
    }

    fn resolve(&mut self, world: &impl Raycaster, velocity: &mut Vec3, input: Vec2, now: SimTime) {
        if velocity.y < 0.0 {
            self.descend_slope(world, velocity);
        }

        if self.config.handle_physics {
            self.horizontal_collisions(world, velocity);
            if velocity.y != 0.0 {
                self.vertical_collisions(world, velocity, input, now);
            }
        }
    }

    fn horizontal_collisions(&mut self, world: &impl Raycaster, velocity: &mut Vec3) {
        let skin = self.config.skin_width;
        let direction_x = self.collisions.face_dir;
        let mut ray_length = velocity.x.abs() + skin;
        if velocity.x.abs() < skin {
            ray_length = MIN_HORIZONTAL_RAY_SKINS * skin;
        }

        for i in 0..self.raycast.horizontal_ray_count() {
            let origins = self.raycast.origins();
            let base = if direction_x == -1.0 { origins.bottom_left } else { origins.bottom_right };
            let origin = base + Vec2::y() * (self.raycast.horizontal_ray_spacing() * i as f32);

            let Some(hit) = self.cast(world, RayKind::Horizontal, origin, Vec2::new(direction_x, 0.0), ray_length) else {
                continue;
            };
            if hit.distance == 0.0 {
                continue;
            }

            let slope_angle = angle_between_deg(hit.normal, Vec2::y());
            if slope_angle > constants::WALL_ANGLE_MIN && slope_angle < constants::WALL_ANGLE_MAX {
                self.collisions.is_wall = true;
            }

            if i == 0 && slope_angle <= self.config.max_climb_angle {
                if self.collisions.descending_slope {
                    self.collisions.descending_slope = false;
                    *velocity = self.collisions.velocity_old;
                }

                // Walk up to the foot of a new slope before turning onto it
                let mut distance_to_slope_start = 0.0;
                if slope_angle != self.collisions.slope_angle_old {
                    distance_to_slope_start = hit.distance - skin;
                    velocity.x -= distance_to_slope_start * direction_x;
                }
                self.climb_slope(velocity, slope_angle);
                velocity.x += distance_to_slope_start * direction_x;
            }

            if !self.collisions.climbing_slope || slope_angle > self.config.max_climb_angle {
                velocity.x = (hit.distance - skin) * direction_x;
                ray_length = hit.distance;

                if self.collisions.climbing_slope {
                    velocity.y = self.collisions.slope_angle.to_radians().tan() * velocity.x.abs();
                }

                self.collisions.left = direction_x == -1.0;
                self.collisions.right = direction_x == 1.0;
                self.collisions.closest_hit = Some(hit);
            }
        }
    }

    fn vertical_collisions(&mut self, world: &impl Raycaster, velocity: &mut Vec3, input: Vec2, now: SimTime) {
        let skin = self.config.skin_width;
        let inverted = self.config.gravity_inverted;
        let direction_y = sign(velocity.y);
        let away_from_ground = if inverted { -1.0 } else { 1.0 };
        let mut ray_length = velocity.y.abs() + skin;

        for i in 0..self.raycast.vertical_ray_count() {
            let origins = self.raycast.origins();
            let base = if direction_y == -1.0 { origins.bottom_left } else { origins.top_left };
            let origin = base + Vec2::x() * (self.raycast.vertical_ray_spacing() * i as f32 + velocity.x);

            let Some(hit) = self.cast(world, RayKind::Vertical, origin, Vec2::new(0.0, direction_y), ray_length) else {
                continue;
            };

            if hit.surface == SurfaceKind::Through {
                if direction_y == away_from_ground || hit.distance == 0.0 {
                    continue;
                }
                if self.collisions.falling_through_platform {
                    continue;
                }
                if input.y <= -1.0 {
                    self.latch_fall_through(now);
                    continue;
                }
            }

            velocity.y = (hit.distance - skin) * direction_y;
            ray_length = hit.distance;

            if self.collisions.climbing_slope {
                let tangent = self.collisions.slope_angle.to_radians().tan();
                if tangent.abs() > constants::GEOMETRY_EPSILON {
                    velocity.x = velocity.y / tangent * sign(velocity.x);
                }
            }

            let toward_ground = direction_y != away_from_ground;
            self.collisions.below = toward_ground;
            self.collisions.above = !toward_ground;

            // Hit objects stay screen-relative even with inverted gravity
            self.collisions.closest_hit = Some(hit);
            if direction_y == -1.0 {
                self.collisions.hit_below = Some(hit.collider);
                self.collisions.hit_above = None;
            } else {
                self.collisions.hit_above = Some(hit.collider);
                self.collisions.hit_below = None;
            }
        }

        if self.collisions.climbing_slope {
            self.recheck_climb(world, velocity);
        }
    }

    /// The vertical pass may have moved the ray onto a different slope
    fn recheck_climb(&mut self, world: &impl Raycaster, velocity: &mut Vec3) {
        let skin = self.config.skin_width;
        let direction_x = sign(velocity.x);
        let ray_length = velocity.x.abs() + skin;

        let origins = self.raycast.origins();
        let base = if direction_x == -1.0 { origins.bottom_left } else { origins.bottom_right };
        let origin = base + Vec2::y() * velocity.y;

        if let Some(hit) = self.cast(world, RayKind::ClimbRecheck, origin, Vec2::new(direction_x, 0.0), ray_length) {
            let slope_angle = angle_between_deg(hit.normal, Vec2::y());
            if slope_angle != self.collisions.slope_angle {
                log::debug!(
                    "Slope changed mid-climb from {:.1} to {:.1} degrees",
                    self.collisions.slope_angle,
                    slope_angle
                );
                velocity.x = (hit.distance - skin) * direction_x;
                self.collisions.slope_angle = slope_angle;
            }
        }
    }

    fn climb_slope(&mut self, velocity: &mut Vec3, slope_angle: f32) {
        let move_distance = velocity.x.abs();
        let radians = slope_angle.to_radians();
        let climb_velocity_y = radians.sin() * move_distance;

        // A jump already rising faster than the slope keeps its own velocity
        if velocity.y <= climb_velocity_y {
            if slope_angle != self.collisions.slope_angle_old {
                log::debug!("Climbing slope of {:.1} degrees", slope_angle);
            }
            velocity.y = climb_velocity_y;
            velocity.x = radians.cos() * move_distance * sign(velocity.x);
            self.collisions.below = true;
            self.collisions.climbing_slope = true;
            self.collisions.slope_angle = slope_angle;
        }
    }

    fn descend_slope(&mut self, world: &impl Raycaster, velocity: &mut Vec3) {
        let direction_x = sign(velocity.x);
        let origins = self.raycast.origins();
        // The trailing foot is the one still over the slope
        let origin = if direction_x == -1.0 { origins.bottom_right } else { origins.bottom_left };

        let Some(hit) = self.cast(world, RayKind::Descend, origin, Vec2::new(0.0, -1.0), f32::INFINITY) else {
            return;
        };

        let slope_angle = angle_between_deg(hit.normal, Vec2::y());
        if slope_angle == 0.0 || slope_angle > self.config.max_descend_angle {
            return;
        }
        if sign(hit.normal.x) != direction_x {
            return;
        }

        let radians = slope_angle.to_radians();
        let move_distance = velocity.x.abs();
        if hit.distance - self.config.skin_width <= radians.tan() * move_distance {
            velocity.x = radians.cos() * move_distance * direction_x;
            velocity.y -= radians.sin() * move_distance;

            self.collisions.slope_angle = slope_angle;
            self.collisions.descending_slope = true;
            self.collisions.below = true;
        }
    }

    fn check_ground_ahead(&mut self, world: &impl Raycaster, velocity: Vec3, facing_right: bool) {
        let mut direction_x = self.collisions.face_dir;
        if velocity.x == 0.0 {
            direction_x = if facing_right { 1.0 } else { -1.0 };
        }

        let origins = self.raycast.origins();
        let origin = if direction_x == -1.0 { origins.bottom_left } else { origins.bottom_right };

        let distance = self.config.ground_ahead_distance;
        if self.cast(world, RayKind::GroundAhead, origin, Vec2::new(0.0, -1.0), distance).is_some() {
            self.collisions.grounded_ahead = true;
        }
    }

    fn expire_fall_through(&mut self, now: SimTime) {
        if let Some(expiry) = self.fall_through_until {
            if now >= expiry {
                log::debug!("Fall-through window ended at {:.3}s", now.as_secs());
                self.fall_through_until = None;
            }
        }
        self.collisions.falling_through_platform = self.fall_through_until.is_some();
    }

    fn latch_fall_through(&mut self, now: SimTime) {
        let expiry = now + self.config.fall_through_duration;
        log::debug!(
            "Dropping through platforms until {:.3}s",
            expiry.as_secs()
        );
        self.fall_through_until = Some(expiry);
        self.collisions.falling_through_platform = true;
    }

    fn cast(&mut self, world: &impl Raycaster, kind: RayKind, origin: Vec2, direction: Vec2, length: f32) -> Option<RayHit> {
        let ray = Ray2D::new(origin, direction);
        let hit = world.raycast(&ray, length, self.config.collision_mask);

        if let Some(buffer) = self.debug_rays.as_mut() {
            buffer.push(DebugRay {
                origin,
                direction: ray.direction,
                length,
                kind,
                hit,
            });
        }

        hit
    }

    /// Contact state from the last move
    pub fn collisions(&self) -> &CollisionState {
        &self.collisions
    }

    /// Entity position
    pub fn position(&self) -> Vec3 {
        self.raycast.position()
    }

    /// Teleport the entity without collision checks
    pub fn set_position(&mut self, position: Vec3) {
        self.raycast.set_position(position);
    }

    /// World-space collider bounds
    pub fn bounds(&self) -> Aabb2 {
        self.raycast.bounds()
    }

    /// Resize the collider box, rejecting sizes with no room for rays
    pub fn set_collider_size(&mut self, size: Vec2) -> Result<(), ControllerError> {
        self.raycast.set_collider_size(size)
    }

    /// Enable or disable the horizontal and vertical collision passes
    pub fn set_handle_physics(&mut self, enabled: bool) {
        self.config.handle_physics = enabled;
    }

    /// Flip which vertical direction counts as "below"
    pub fn set_gravity_inverted(&mut self, inverted: bool) {
        self.config.gravity_inverted = inverted;
    }

    /// Whether gravity is inverted
    pub fn gravity_inverted(&self) -> bool {
        self.config.gravity_inverted
    }

    /// Override the persistent facing direction
    pub fn set_face_dir(&mut self, direction: f32) {
        self.collisions.face_dir = sign(direction);
    }

    /// Start or stop recording cast rays
    pub fn enable_debug_rays(&mut self, enabled: bool) {
        self.debug_rays = if enabled { Some(DebugRayBuffer::new()) } else { None };
    }

    /// Rays cast during the last move, when recording is enabled
    pub fn debug_rays(&self) -> Option<&DebugRayBuffer> {
        self.debug_rays.as_ref()
    }
}

//! Walking character motor
//!
//! Drives a [`Controller2D`] the way a grounded walker does every step:
//! smoothed horizontal speed, gravity, and stopping against whatever the
//! previous step bumped into.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::foundation::math::{sign, smooth_damp, Vec2, Vec3};
use crate::foundation::time::SimTime;
use crate::physics::Raycaster;

use super::config::ControllerError;
use super::controller2d::{Controller2D, MoveOutcome, MoveRequest};

/// Tuning for a [`CharacterMotor`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotorConfig {
    /// Walking speed in units per second
    pub move_speed: f32,
    /// Gravity acceleration in units per second squared
    pub gravity: f32,
    /// Time to reach walking speed while grounded
    pub smooth_time_grounded: f32,
    /// Time to reach walking speed while airborne
    pub smooth_time_airborne: f32,
    /// Scale applied to the displacement handed to the controller
    pub speed_multiplier: f32,
    /// Reverse direction after walking into something
    pub turn_at_walls: bool,
    /// Reverse direction when there is no ground ahead
    pub turn_at_ledges: bool,
}

impl MotorConfig {
    /// Validate the tuning
    pub fn validate(&self) -> Result<(), ControllerError> {
        let checks = [
            ("move speed", self.move_speed, 0.0),
            ("gravity", self.gravity, 0.0),
            ("speed multiplier", self.speed_multiplier, 0.0),
        ];
        for (name, value, min) in checks {
            if !value.is_finite() || value < min {
                return Err(ControllerError::InvalidConfig(format!("{name} must be >= {min}, got {value}")));
            }
        }

        if !(self.smooth_time_grounded > 0.0 && self.smooth_time_airborne > 0.0) {
            return Err(ControllerError::InvalidConfig("smoothing times must be positive".to_string()));
        }

        Ok(())
    }
}

impl Default for MotorConfig {
    fn default() -> Self {
        Self {
            move_speed: 3.0,
            gravity: 25.0,
            smooth_time_grounded: 0.1,
            smooth_time_airborne: 0.2,
            speed_multiplier: 1.0,
            turn_at_walls: true,
            turn_at_ledges: false,
        }
    }
}

impl Config for MotorConfig {}

/// Per-entity walking state
#[derive(Debug, Clone)]
pub struct CharacterMotor {
    config: MotorConfig,
    velocity: Vec3,
    velocity_x_smoothing: f32,
    direction: f32,
    halted: bool,
    drop_input: bool,
}

impl CharacterMotor {
    /// Create a motor walking right
    pub fn new(config: MotorConfig) -> Result<Self, ControllerError> {
        config.validate()?;
        Ok(Self {
            config,
            velocity: Vec3::zeros(),
            velocity_x_smoothing: 0.0,
            direction: 1.0,
            halted: false,
            drop_input: false,
        })
    }

    /// Advance one simulation step
    pub fn step(
        &mut self,
        controller: &mut Controller2D,
        world: &impl Raycaster,
        dt: f32,
        now: SimTime,
    ) -> Result<MoveOutcome, ControllerError> {
        let previous = *controller.collisions();

        let target_velocity_x = if self.halted { 0.0 } else { self.direction * self.config.move_speed };
        let smooth_time = if previous.below {
            self.config.smooth_time_grounded
        } else {
            self.config.smooth_time_airborne
        };
        self.velocity.x = smooth_damp(self.velocity.x, target_velocity_x, &mut self.velocity_x_smoothing, smooth_time, dt);
        self.velocity.y -= self.gravity_sign(controller) * self.config.gravity * dt;

        if previous.blocked_towards(self.direction) {
            self.velocity.x = 0.0;
        }

        let input = if self.drop_input { Vec2::new(0.0, -1.0) } else { Vec2::zeros() };
        let request = MoveRequest::new(self.velocity * dt * self.config.speed_multiplier, now)
            .with_input(input)
            .with_facing_right(self.direction > 0.0);
        let outcome = controller.move_by(world, request)?;

        let collisions = outcome.collisions;
        if collisions.above || collisions.below {
            self.velocity.y = 0.0;
        }

        if self.config.turn_at_walls && collisions.blocked_towards(self.direction) {
            log::debug!("Hit a wall, turning around");
            self.flip();
        } else if self.config.turn_at_ledges
            && collisions.below
            && !collisions.grounded_ahead
            && collisions.face_dir == self.direction
        {
            // Still sliding the old way after a turn is not a new ledge
            log::debug!("Ledge ahead, turning around");
            self.flip();
        }

        Ok(outcome)
    }

    /// Jump with the given upward speed, if standing on something
    pub fn jump(&mut self, controller: &Controller2D, speed: f32) -> bool {
        if !controller.collisions().below {
            return false;
        }
        self.velocity.y = self.gravity_sign(controller) * speed;
        true
    }

    /// Current walking direction, +1 or -1
    pub fn direction(&self) -> f32 {
        self.direction
    }

    /// Set the walking direction
    pub fn set_direction(&mut self, direction: f32) {
        self.direction = sign(direction);
    }

    /// Reverse the walking direction
    pub fn flip(&mut self) {
        self.direction = -self.direction;
    }

    /// Stop walking (gravity still applies)
    pub fn set_halted(&mut self, halted: bool) {
        self.halted = halted;
    }

    /// Hold or release "down" to drop through one-way platforms
    pub fn set_drop_input(&mut self, held: bool) {
        self.drop_input = held;
    }

    /// Velocity in units per second
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    fn gravity_sign(&self, controller: &Controller2D) -> f32 {
        if controller.gravity_inverted() {
            -1.0
        } else {
            1.0
        }
    }
}

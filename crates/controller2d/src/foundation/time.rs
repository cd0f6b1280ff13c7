//! Simulation time
//!
//! The controller never reads a wall clock. Callers advance a [`SimClock`]
//! once per simulation step and pass the resulting [`SimTime`] into each move,
//! which keeps timed state (like the platform fall-through window) fully
//! deterministic.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// A point on the simulation timeline, in seconds since the clock started
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct SimTime(f64);

impl SimTime {
    /// The start of the timeline
    pub const ZERO: Self = Self(0.0);

    /// Create a time from seconds
    pub fn from_secs(seconds: f64) -> Self {
        Self(seconds)
    }

    /// Seconds since the start of the timeline
    pub fn as_secs(&self) -> f64 {
        self.0
    }
}

impl Add<f32> for SimTime {
    type Output = Self;

    fn add(self, seconds: f32) -> Self {
        Self(self.0 + f64::from(seconds))
    }
}

impl Sub for SimTime {
    type Output = f64;

    fn sub(self, other: Self) -> f64 {
        self.0 - other.0
    }
}

/// Fixed-step simulation clock
#[derive(Debug, Clone)]
pub struct SimClock {
    timestep: f32,
    now: SimTime,
    tick: u64,
}

impl SimClock {
    /// Create a clock that advances by `timestep` seconds per tick
    pub fn new(timestep: f32) -> Self {
        Self {
            timestep,
            now: SimTime::ZERO,
            tick: 0,
        }
    }

    /// Advance the clock by one step and return the new time
    pub fn advance(&mut self) -> SimTime {
        self.tick += 1;
        // Recomputed from the tick count so long runs don't accumulate drift
        self.now = SimTime(self.tick as f64 * f64::from(self.timestep));
        self.now
    }

    /// Current simulation time
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Seconds per tick
    pub fn timestep(&self) -> f32 {
        self.timestep
    }

    /// Number of ticks since the clock started
    pub fn tick(&self) -> u64 {
        self.tick
    }
}

//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::geometry;

/// 2D position in arena space (world units).
/// x grows to the right, y grows downward, heading 0 points along +x.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// 2D velocity in world units per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

/// Weak reference to an actor: a roster slot plus the incarnation it was
/// taken from. A handle whose generation no longer matches the slot's
/// current generation refers to an actor that has since died.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorHandle {
    pub slot: u32,
    pub generation: u32,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn from_vec(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }

    pub fn to_vec(self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Straight-line distance to another position.
    pub fn distance_to(&self, other: &Position) -> f64 {
        geometry::distance(*self, *other)
    }

    /// Bearing to another position in radians (0 = +x, increasing toward +y).
    pub fn bearing_to(&self, other: &Position) -> f64 {
        geometry::bearing(*self, *other)
    }

    /// Point `distance` units away along `heading`.
    pub fn offset(&self, heading: f64, distance: f64) -> Position {
        Position::from_vec(self.to_vec() + geometry::heading_vector(heading) * distance)
    }
}

impl Velocity {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Velocity of magnitude `speed` along `heading`.
    pub fn from_heading(heading: f64, speed: f64) -> Self {
        let v = geometry::heading_vector(heading) * speed;
        Self { x: v.x, y: v.y }
    }

    pub fn speed(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn heading(&self) -> f64 {
        self.y.atan2(self.x)
    }
}

impl SimTime {
    /// Seconds per tick at the default tick rate.
    pub fn dt(&self) -> f64 {
        crate::constants::DT
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}

impl ActorHandle {
    pub fn new(slot: u32, generation: u32) -> Self {
        Self { slot, generation }
    }
}

//! Angle and distance helpers used by every layer of the simulation.

use std::f64::consts::{PI, TAU};

use glam::DVec2;

use crate::types::Position;

/// Wrap an angle into [-π, π].
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    // rem_euclid maps exactly π to -π; keep the sign of the input there.
    if wrapped == -PI && angle > 0.0 {
        PI
    } else {
        wrapped
    }
}

/// Shortest signed rotation that takes `from` onto `to`, in [-π, π].
pub fn angle_diff(from: f64, to: f64) -> f64 {
    wrap_angle(to - from)
}

/// Unit vector pointing along `heading`.
pub fn heading_vector(heading: f64) -> DVec2 {
    DVec2::new(heading.cos(), heading.sin())
}

/// Bearing from `from` to `to` in radians.
pub fn bearing(from: Position, to: Position) -> f64 {
    (to.y - from.y).atan2(to.x - from.x)
}

pub fn distance(a: Position, b: Position) -> f64 {
    a.to_vec().distance(b.to_vec())
}

/// Clamp a position into the `[min, max]` box on both axes.
pub fn clamp_position(pos: Position, min: f64, max_x: f64, max_y: f64) -> Position {
    Position::new(pos.x.clamp(min, max_x), pos.y.clamp(min, max_y))
}

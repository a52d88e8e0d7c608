//! Steering and arena-boundary helpers for airframes and missiles.
//!
//! Pure functions over positions and headings; the movement and projectile
//! systems apply them to components.

use std::f64::consts::PI;

use skirmish_core::config::TurnInertia;
use skirmish_core::constants::EDGE_INSET;
use skirmish_core::geometry::{angle_diff, heading_vector, wrap_angle};
use skirmish_core::types::Position;

/// Move `distance` units along `heading`.
pub fn advance(position: Position, heading: f64, throttle: f64, speed_scale: f64) -> Position {
    Position::from_vec(position.to_vec() + heading_vector(heading) * throttle * speed_scale)
}

/// Turn toward `desired` by at most `max_turn_rate`.
///
/// With inertia the turn velocity chases the remaining angle (its change
/// per tick bounded by `accel`), is clamped to `max_turn_rate`, applied,
/// then damped. Without inertia the wrapped difference is clamped and
/// applied directly. Returns the new heading and turn velocity.
pub fn steer_toward(
    heading: f64,
    turn_velocity: f64,
    desired: f64,
    max_turn_rate: f64,
    inertia: Option<TurnInertia>,
) -> (f64, f64) {
    let delta = angle_diff(heading, desired);
    match inertia {
        Some(TurnInertia { accel, damping }) => {
            let mut velocity = turn_velocity + (delta - turn_velocity).clamp(-accel, accel);
            velocity = velocity.clamp(-max_turn_rate, max_turn_rate);
            (wrap_angle(heading + velocity), velocity * damping)
        }
        None => (
            wrap_angle(heading + delta.clamp(-max_turn_rate, max_turn_rate)),
            0.0,
        ),
    }
}

/// Mirror the heading on any crossed edge and pull the position back
/// inside `[EDGE_INSET, size - EDGE_INSET]`.
pub fn bounce_off_world_edge(position: Position, heading: f64, width: f64, height: f64) -> (Position, f64) {
    let mut heading = heading;
    let (min, max_x, max_y) = (EDGE_INSET, width - EDGE_INSET, height - EDGE_INSET);
    if position.x < min || position.x > max_x {
        heading = PI - heading;
    }
    if position.y < min || position.y > max_y {
        heading = -heading;
    }
    (
        Position::new(position.x.clamp(min, max_x), position.y.clamp(min, max_y)),
        wrap_angle(heading),
    )
}

/// Within `buffer` of an edge, the heading to fly instead: straight at the
/// arena centre.
pub fn avoid_world_edge(position: Position, buffer: f64, width: f64, height: f64) -> Option<f64> {
    let near_edge = position.x < buffer
        || position.x > width - buffer
        || position.y < buffer
        || position.y > height - buffer;
    near_edge.then(|| position.bearing_to(&Position::new(width / 2.0, height / 2.0)))
}

/// Clamp into the arena without touching the heading.
pub fn clamp_to_world(position: Position, width: f64, height: f64) -> Position {
    Position::new(
        position.x.clamp(EDGE_INSET, width - EDGE_INSET),
        position.y.clamp(EDGE_INSET, height - EDGE_INSET),
    )
}

/// Push apart every pair closer than `min_distance`. Each member of a pair
/// moves `(min_distance - d) * strength` along the separating axis.
pub fn apply_separation(positions: &mut [Position], min_distance: f64, strength: f64) {
    for i in 0..positions.len() {
        for j in (i + 1)..positions.len() {
            let a = positions[i].to_vec();
            let b = positions[j].to_vec();
            let d = a.distance(b);
            if d >= min_distance || d == 0.0 {
                continue;
            }
            let push = (b - a) / d * (min_distance - d) * strength;
            positions[i] = Position::from_vec(a - push);
            positions[j] = Position::from_vec(b + push);
        }
    }
}

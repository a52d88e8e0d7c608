//! Targeting queries: nearest-candidate search, lock envelope and lead
//! prediction. Pure functions over positions and headings.

use crate::geometry::{angle_diff, heading_vector};
use crate::types::Position;

/// Nearest accepted candidate to `from`, with its distance.
///
/// Linear scan in candidate order; on equal distances the earlier
/// candidate wins.
pub fn find_nearest<T, I, F>(from: Position, candidates: I, mut accept: F) -> Option<(T, f64)>
where
    I: IntoIterator<Item = (T, Position)>,
    F: FnMut(&T) -> bool,
{
    let mut best: Option<(T, f64)> = None;
    for (candidate, pos) in candidates {
        if !accept(&candidate) {
            continue;
        }
        let d = from.distance_to(&pos);
        if best.as_ref().map_or(true, |(_, best_d)| d < *best_d) {
            best = Some((candidate, d));
        }
    }
    best
}

/// Whether `target` lies within `range` and within `cone_half_angle` of the
/// shooter's nose.
pub fn is_within_lock_envelope(
    shooter: Position,
    shooter_heading: f64,
    target: Position,
    range: f64,
    cone_half_angle: f64,
) -> bool {
    let d = shooter.distance_to(&target);
    if d > range {
        return false;
    }
    if d == 0.0 {
        return true;
    }
    angle_diff(shooter_heading, shooter.bearing_to(&target)).abs() <= cone_half_angle
}

/// Single-step lead: where the target will be after the time a projectile
/// needs to cover today's distance, assuming it holds heading and speed.
pub fn predict_intercept(
    shooter: Position,
    target: Position,
    target_heading: f64,
    target_speed: f64,
    projectile_speed: f64,
) -> Position {
    if projectile_speed <= 0.0 {
        return target;
    }
    let t = shooter.distance_to(&target) / projectile_speed;
    Position::from_vec(target.to_vec() + heading_vector(target_heading) * target_speed * t)
}

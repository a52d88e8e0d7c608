//! Pilot behaviour state machine.
//!
//! Pure functions that pick a target, a behaviour mode, a desired heading
//! and fire intents for one pilot from a snapshot of its surroundings.
//! No ECS dependency; operates on plain data. Random gates draw from the
//! caller's RNG so runs stay reproducible.

use std::f64::consts::PI;

use rand::Rng;
use skirmish_core::components::{LockOn, PilotOrders, PilotState};
use skirmish_core::constants::*;
use skirmish_core::enums::{BehaviorMode, LockState};
use skirmish_core::geometry::{angle_diff, wrap_angle};
use skirmish_core::targeting::{find_nearest, predict_intercept};
use skirmish_core::types::{ActorHandle, Position};

use crate::profiles::PilotProfile;

/// What a pilot knows about one live opponent.
#[derive(Debug, Clone, Copy)]
pub struct Contact {
    pub handle: ActorHandle,
    pub position: Position,
    pub heading: f64,
    /// Distance covered per tick.
    pub speed: f64,
    pub health: f64,
}

/// Input to the pilot FSM for a single actor.
pub struct PilotContext<'a> {
    pub profile: PilotProfile,
    pub tick: u64,
    pub position: Position,
    pub heading: f64,
    pub memory: PilotState,
    pub lock: LockOn,
    pub gun_ammo: u32,
    pub missile_ammo: u32,
    pub flare_ready: bool,
    /// Live airborne opponents, in roster order.
    pub opponents: &'a [Contact],
    pub hostile_bullets: &'a [Position],
    pub hostile_missiles: &'a [Position],
    pub arena_center: Position,
    pub aggro_window_ticks: u64,
}

/// Output from the pilot FSM.
pub struct PilotUpdate {
    pub memory: PilotState,
    pub orders: PilotOrders,
    pub target: Option<ActorHandle>,
    pub mode_changed: bool,
}

/// Evaluate the FSM for one pilot.
pub fn evaluate<R: Rng>(ctx: &PilotContext, rng: &mut R) -> PilotUpdate {
    let profile = &ctx.profile;
    let mut memory = ctx.memory;
    decay_dodge(&mut memory);

    let target = select_target(ctx);

    let nearest_bullet = nearest_threat(ctx.position, ctx.hostile_bullets);
    let nearest_missile = nearest_threat(ctx.position, ctx.hostile_missiles);
    let bullet_close = nearest_bullet.is_some_and(|(_, d)| d <= BULLET_DANGER_RADIUS);
    let missile_close = nearest_missile.is_some_and(|(_, d)| d <= MISSILE_DANGER_RADIUS);

    let mode = if bullet_close || missile_close {
        BehaviorMode::Evade
    } else if target.is_some() {
        BehaviorMode::Engage
    } else {
        BehaviorMode::Patrol
    };

    if mode == BehaviorMode::Evade {
        maybe_jink(&mut memory, profile, rng);
    }

    let desired_heading = match (nearest_missile, target) {
        (Some((missile, d)), _) if d <= MISSILE_DANGER_RADIUS => {
            // Run from the missile, still jinking.
            wrap_angle(missile.bearing_to(&ctx.position) + memory.dodge_offset)
        }
        (_, Some(t)) => pursuit_heading(ctx, &memory, t),
        (_, None) => patrol_heading(ctx, &mut memory),
    };

    let mut orders = PilotOrders {
        desired_heading: Some(desired_heading),
        throttle_target: match mode {
            BehaviorMode::Patrol => profile.patrol_throttle,
            BehaviorMode::Engage | BehaviorMode::Evade => profile.engage_throttle,
        },
        ..Default::default()
    };

    orders.deploy_decoys = ctx.flare_ready
        && nearest_missile.is_some_and(|(_, d)| d <= FLARE_TRIGGER_RADIUS)
        && rng.gen_bool(profile.flare_chance);

    if let Some(t) = target {
        orders.fire_gun = gun_solution(ctx, t) && ctx.gun_ammo > 0 && rng.gen_bool(profile.gun_chance);
    }
    orders.fire_missile = missile_ready(ctx) && rng.gen_bool(profile.missile_chance);

    let mode_changed = mode != ctx.memory.mode;
    memory.mode = mode;

    PilotUpdate {
        memory,
        orders,
        target: target.map(|t| t.handle),
        mode_changed,
    }
}

/// Autonomous flare drop on top of the FSM's own trigger: an enemy missile
/// inside the danger radius and a small per-tick chance.
pub fn passive_flare_gate<R: Rng>(nearest_missile: Option<f64>, flare_ready: bool, rng: &mut R) -> bool {
    flare_ready
        && nearest_missile.is_some_and(|d| d <= MISSILE_DANGER_RADIUS)
        && rng.gen_bool(PASSIVE_FLARE_CHANCE)
}

/// Recent attacker if it is still alive and hit us inside the aggro
/// window, else the nearest opponent.
fn select_target<'a>(ctx: &PilotContext<'a>) -> Option<&'a Contact> {
    if let Some(record) = ctx.memory.last_attacker {
        if ctx.tick.saturating_sub(record.tick) <= ctx.aggro_window_ticks {
            if let Some(c) = ctx.opponents.iter().find(|c| c.handle == record.attacker) {
                return Some(c);
            }
        }
    }
    find_nearest(ctx.position, ctx.opponents.iter().map(|c| (c, c.position)), |_| true).map(|(c, _)| c)
}

fn nearest_threat(from: Position, threats: &[Position]) -> Option<(Position, f64)> {
    find_nearest(from, threats.iter().map(|p| (*p, *p)), |_| true)
}

fn decay_dodge(memory: &mut PilotState) {
    memory.dodge_cooldown = memory.dodge_cooldown.saturating_sub(1);
    memory.dodge_offset *= DODGE_DECAY;
    if memory.dodge_offset.abs() < DODGE_EPSILON {
        memory.dodge_offset = 0.0;
    }
}

fn maybe_jink<R: Rng>(memory: &mut PilotState, profile: &PilotProfile, rng: &mut R) {
    if memory.dodge_cooldown > 0 || !rng.gen_bool(profile.dodge_chance) {
        return;
    }
    let side = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
    memory.dodge_offset = DODGE_OFFSET * side;
    memory.dodge_cooldown = rng.gen_range(DODGE_MIN_COOLDOWN_TICKS..DODGE_MAX_COOLDOWN_TICKS);
}

fn pursuit_heading(ctx: &PilotContext, memory: &PilotState, target: &Contact) -> f64 {
    let d = ctx.position.distance_to(&target.position);
    let bearing = ctx.position.bearing_to(&target.position);
    if d < BREAKAWAY_RANGE {
        return wrap_angle(bearing + PI);
    }
    let orbit_direction = if memory.orbit_direction < 0.0 { -1.0 } else { 1.0 };
    let standoff = (1.0 - d / ORBIT_STANDOFF_RANGE).clamp(0.0, 1.0);
    wrap_angle(bearing + ORBIT_OFFSET * orbit_direction * standoff + memory.dodge_offset)
}

fn patrol_heading(ctx: &PilotContext, memory: &mut PilotState) -> f64 {
    memory.patrol_phase = wrap_angle(memory.patrol_phase + PATROL_DRIFT_RATE);
    let anchor = ctx.arena_center.offset(memory.patrol_phase, PATROL_RADIUS);
    let bearing = ctx.position.bearing_to(&anchor);
    if ctx.position.distance_to(&anchor) > BREAKAWAY_RANGE {
        bearing
    } else {
        // Close enough: circle the anchor.
        wrap_angle(bearing + PI / 2.0)
    }
}

fn gun_solution(ctx: &PilotContext, target: &Contact) -> bool {
    let d = ctx.position.distance_to(&target.position);
    if d > ctx.profile.gun_range {
        return false;
    }
    let lead = predict_intercept(ctx.position, target.position, target.heading, target.speed, BULLET_SPEED);
    angle_diff(ctx.heading, ctx.position.bearing_to(&lead)).abs() <= ctx.profile.aim_tolerance
}

fn missile_ready(ctx: &PilotContext) -> bool {
    if ctx.lock.state != LockState::Ready || ctx.missile_ammo == 0 {
        return false;
    }
    let Some(locked) = ctx.lock.target else {
        return false;
    };
    ctx.opponents
        .iter()
        .find(|c| c.handle == locked)
        .is_some_and(|c| c.health > ctx.profile.min_target_health)
}

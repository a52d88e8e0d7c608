//! Simulation constants and tuning defaults.
//!
//! Distances are world units, speeds are world units per tick and all
//! timers are counted in ticks.

use std::f64::consts::PI;

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Arena ---

pub const WORLD_WIDTH: f64 = 4000.0;
pub const WORLD_HEIGHT: f64 = 4000.0;

/// Positions are clamped this far inside the arena after a bounce.
pub const EDGE_INSET: f64 = 1.0;

/// Default distance from an edge at which `EdgePolicy::Avoid` turns back.
pub const EDGE_AVOID_BUFFER: f64 = 200.0;

pub const DEFAULT_ALLY_COUNT: u32 = 9;
pub const DEFAULT_OPPONENT_COUNT: u32 = 10;

// --- Airframe ---

pub const MAX_HEALTH: f64 = 100.0;

/// Multiplies throttle into distance per tick.
pub const SPEED_SCALE: f64 = 1.0;

pub const THROTTLE_MIN: f64 = 1.0;
pub const THROTTLE_MAX: f64 = 5.0;
pub const THROTTLE_UP_STEP: f64 = 0.1;
pub const THROTTLE_DOWN_STEP: f64 = 0.05;

/// Throttle while rolling out from the apron.
pub const TAXI_THROTTLE: f64 = 0.5;

/// Fraction of the throttle gap closed per tick by autonomous actors.
pub const THROTTLE_EASE: f64 = 0.05;

/// Heading change per tick while a turn key is held.
pub const MANUAL_TURN_RATE: f64 = 0.05;

/// Turn inertia defaults (see `TurnInertia`).
pub const TURN_ACCEL: f64 = 0.02;
pub const TURN_DAMPING: f64 = 0.85;

// --- Takeoff / respawn ---

pub const ALLY_TAKEOFF_STAGGER_TICKS: u32 = 60;
pub const OPPONENT_TAKEOFF_STAGGER_TICKS: u32 = 90;
pub const TAXI_TICKS: u32 = 90;
pub const CONTROLLED_TAXI_TICKS: u32 = 120;

/// Throttle an airframe leaves the runway with.
pub const TAKEOFF_THROTTLE: f64 = 3.0;

/// Airfield layout: parking spots per row and spacing between them.
pub const AIRFIELD_COLUMNS: u32 = 10;
pub const AIRFIELD_SPACING: f64 = 60.0;
/// Distance of the first parking spot from the arena corner.
pub const AIRFIELD_MARGIN: f64 = 150.0;

/// Smallest arena side that fits a full airfield row on either side.
pub const MIN_WORLD_SIZE: f64 = 2.0 * AIRFIELD_MARGIN + AIRFIELD_COLUMNS as f64 * AIRFIELD_SPACING;

/// How long the controlled actor stays down before respawning.
pub const CONTROLLED_RESPAWN_DELAY_TICKS: u32 = 60;

/// Respawns try to land at least this far from the controlled actor.
pub const RESPAWN_SAFE_DISTANCE: f64 = 300.0;
pub const RESPAWN_ATTEMPTS: u32 = 10;

// --- Gun ---

pub const GUN_AMMO_CAPACITY: u32 = 200;
pub const GUN_COOLDOWN_TICKS: u32 = 6;
/// Ticks spent at zero ammo before the gun refills.
pub const GUN_RELOAD_TICKS: u32 = 300;
pub const GUN_SPREAD: f64 = 0.03;
pub const BULLET_SPEED: f64 = 16.0;
pub const BULLET_LIFETIME_TICKS: u32 = 60;
pub const BULLET_HIT_RADIUS: f64 = 30.0;
pub const GUN_DAMAGE: f64 = 10.0;

// --- Missile ---

pub const MISSILE_AMMO_CAPACITY: u32 = 4;
pub const MISSILE_COOLDOWN_TICKS: u32 = 60;
pub const MISSILE_RELOAD_TICKS: u32 = 600;
pub const MISSILE_SPEED: f64 = 7.0;
pub const MISSILE_TURN_RATE: f64 = 0.05;
/// Random steering noise amplitude (total width) per tick.
pub const MISSILE_WIGGLE: f64 = 0.2;
pub const MISSILE_LIFETIME_TICKS: u32 = 180;
pub const MISSILE_HIT_RADIUS: f64 = 40.0;
pub const MISSILE_DAMAGE: f64 = 25.0;
/// Launches closer than this are refused.
pub const MISSILE_MIN_RANGE: f64 = 300.0;

// --- Lock-on ---

pub const LOCK_RANGE: f64 = 900.0;
pub const LOCK_CONE_HALF_ANGLE: f64 = PI / 6.0;
pub const CONTROLLED_LOCK_TICKS: u32 = 90;
pub const AUTONOMOUS_LOCK_TICKS: u32 = 120;

// --- Decoys ---

pub const DECOY_PAIRS_PER_BURST: u32 = 10;
pub const DECOY_PAIR_INTERVAL_TICKS: u32 = 5;
/// Lateral distance of each decoy in a pair from the airframe centre.
pub const DECOY_SPACING: f64 = 20.0;
pub const DECOY_SPREAD: f64 = 0.5;
pub const DECOY_MIN_SPEED: f64 = 1.0;
pub const DECOY_MAX_SPEED: f64 = 1.5;
pub const DECOY_LIFETIME_TICKS: u32 = 180;
pub const FLARE_COOLDOWN_TICKS: u32 = 300;
pub const DECOY_REDIRECT_RADIUS: f64 = 200.0;
pub const DECOY_IMPACT_RADIUS: f64 = 20.0;

// --- Collision ---

/// Opposing airframes closer than this destroy each other.
pub const ACTOR_COLLISION_RADIUS: f64 = 40.0;

pub const SEPARATION_DISTANCE: f64 = 80.0;
pub const SEPARATION_STRENGTH: f64 = 0.05;

// --- Effects ---

pub const EXPLOSION_SIZE_KILL: f64 = 100.0;
pub const EXPLOSION_SIZE_MISSILE: f64 = 70.0;
pub const EXPLOSION_SIZE_BULLET: f64 = 20.0;
pub const EXPLOSION_SIZE_FIZZLE: f64 = 15.0;

/// Ticks the incoming-missile warning stays latched after the threat leaves.
pub const MISSILE_WARNING_HOLD_TICKS: u32 = 60;
pub const MISSILE_WARNING_RADIUS: f64 = 300.0;

// --- Decision layer ---

/// A hit this recent makes the attacker the preferred target.
pub const AGGRO_WINDOW_TICKS: u64 = 180;

/// Bearing bias applied when strafing a target.
pub const ORBIT_OFFSET: f64 = PI / 3.0;
/// The orbit bias fades in from this range down to zero range.
pub const ORBIT_STANDOFF_RANGE: f64 = 600.0;

/// Closer than this the AI breaks away from its target.
pub const BREAKAWAY_RANGE: f64 = 120.0;

pub const BULLET_DANGER_RADIUS: f64 = 150.0;
pub const MISSILE_DANGER_RADIUS: f64 = 250.0;
pub const FLARE_TRIGGER_RADIUS: f64 = 200.0;

pub const DODGE_OFFSET: f64 = PI / 3.0;
pub const DODGE_MIN_COOLDOWN_TICKS: u32 = 45;
pub const DODGE_MAX_COOLDOWN_TICKS: u32 = 90;
pub const DODGE_DECAY: f64 = 0.9;
pub const DODGE_EPSILON: f64 = 0.01;

/// Passive flare drop: chance per tick while an enemy missile is within
/// `MISSILE_DANGER_RADIUS`.
pub const PASSIVE_FLARE_CHANCE: f64 = 0.02;

/// Patrol anchor drift (radians per tick) and orbit radius.
pub const PATROL_DRIFT_RATE: f64 = 0.002;
pub const PATROL_RADIUS: f64 = 900.0;

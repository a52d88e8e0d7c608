//! ECS components for hecs entities.
//!
//! Components are plain data structs with few methods.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::ActorHandle;

/// Stable identity of an actor. Lives on the entity for its whole life;
/// `generation` is bumped every time the actor dies.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Identity {
    pub slot: u32,
    pub kind: ActorKind,
    pub team: Team,
    pub generation: u32,
}

impl Identity {
    pub fn handle(&self) -> ActorHandle {
        ActorHandle::new(self.slot, self.generation)
    }
}

/// Heading + throttle kinematic state.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Kinematics {
    /// Radians, 0 = +x.
    pub heading: f64,
    pub throttle: f64,
    /// Value the throttle eases toward (autonomous actors).
    pub throttle_target: f64,
    /// Current turn rate under the inertial steering model.
    pub turn_velocity: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub current: f64,
    pub max: f64,
}

impl Health {
    pub fn full(max: f64) -> Self {
        Self { current: max, max }
    }

    /// Apply damage, clamping into [0, max]. Returns the health left.
    pub fn apply_damage(&mut self, amount: f64) -> f64 {
        self.current = (self.current - amount.max(0.0)).clamp(0.0, self.max);
        self.current
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0.0
    }
}

/// Ammo, cooldowns and regeneration counters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Armament {
    pub gun_ammo: u32,
    pub gun_capacity: u32,
    pub missile_ammo: u32,
    pub missile_capacity: u32,
    pub gun_cooldown: u32,
    pub missile_cooldown: u32,
    /// Consecutive ticks spent with an empty gun.
    pub gun_empty_ticks: u32,
    /// Consecutive ticks spent with no missiles.
    pub missile_empty_ticks: u32,
}

impl Armament {
    pub fn full(gun_capacity: u32, missile_capacity: u32) -> Self {
        Self {
            gun_ammo: gun_capacity,
            gun_capacity,
            missile_ammo: missile_capacity,
            missile_capacity,
            gun_cooldown: 0,
            missile_cooldown: 0,
            gun_empty_ticks: 0,
            missile_empty_ticks: 0,
        }
    }
}

/// Missile lock acquisition state, evaluated once per tick.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct LockOn {
    pub state: LockState,
    pub target: Option<ActorHandle>,
    pub timer: u32,
}

impl LockOn {
    pub fn reset(&mut self) {
        *self = LockOn::default();
    }
}

/// A staggered flare release in progress.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DecoyBurst {
    pub pairs_remaining: u32,
    /// Ticks until the next pair leaves the airframe.
    pub countdown: u32,
    pub interval: u32,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Countermeasures {
    pub flare_cooldown: u32,
    pub burst: Option<DecoyBurst>,
}

/// Who last hurt this actor, and when.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttackRecord {
    pub attacker: ActorHandle,
    pub tick: u64,
}

/// Decision-layer memory.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PilotState {
    pub mode: BehaviorMode,
    /// +1 or -1: which way this pilot circles its target.
    pub orbit_direction: f64,
    pub dodge_offset: f64,
    pub dodge_cooldown: u32,
    pub last_attacker: Option<AttackRecord>,
    /// Phase of this pilot's patrol anchor around the arena centre.
    pub patrol_phase: f64,
}

/// Sortie progress: takeoff stagger, taxi roll, respawn delay.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct FlightStatus {
    pub phase: FlightPhase,
    pub takeoff_delay: u32,
    pub taxi_timer: u32,
    pub respawn_timer: u32,
}

impl FlightStatus {
    pub fn is_airborne(&self) -> bool {
        self.phase == FlightPhase::Airborne
    }
}

/// Orders for the current tick, written by the decision layer (or by
/// player input) and consumed by movement and weapons.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PilotOrders {
    /// Set when the orders come straight from player input: the manual turn
    /// is applied as-is and the throttle target is taken immediately.
    pub manual: bool,
    /// Heading to steer toward; `None` holds the current heading.
    pub desired_heading: Option<f64>,
    /// Manual rotation for this tick (controlled actor, radians).
    pub manual_turn: f64,
    pub throttle_target: f64,
    pub fire_gun: bool,
    pub fire_missile: bool,
    pub deploy_decoys: bool,
}

/// A ballistic round.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bullet {
    pub owner: ActorHandle,
    pub team: Team,
    pub heading: f64,
    pub speed: f64,
    pub lifetime: u32,
}

/// A homing missile.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Missile {
    pub owner: ActorHandle,
    pub team: Team,
    /// What the missile was launched at. Weak: cleared if that actor dies.
    pub primary_target: Option<ActorHandle>,
    /// What it is steering for this tick.
    pub guidance: Guidance,
    pub heading: f64,
    pub speed: f64,
    pub max_turn_rate: f64,
    pub lifetime: u32,
}

/// A flare drifting away from the airframe that released it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Decoy {
    pub id: u32,
    pub owner: ActorHandle,
    pub team: Team,
    pub lifetime: u32,
}

//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Which side an actor fights for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    /// The controlled actor and its wingmen.
    Allied,
    /// Everyone shooting at them.
    Opposing,
}

impl Team {
    pub fn opponent(self) -> Team {
        match self {
            Team::Allied => Team::Opposing,
            Team::Opposing => Team::Allied,
        }
    }
}

/// Actor class. Decides team, home airfield, behaviour profile and
/// which input source produces its orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorKind {
    /// Driven by player intents (or the autopilot when toggled on).
    Controlled,
    /// Autonomous wingman on the controlled actor's team.
    Ally,
    /// Autonomous enemy.
    Opponent,
}

impl ActorKind {
    pub fn team(self) -> Team {
        match self {
            ActorKind::Controlled | ActorKind::Ally => Team::Allied,
            ActorKind::Opponent => Team::Opposing,
        }
    }

    pub fn is_autonomous(self) -> bool {
        !matches!(self, ActorKind::Controlled)
    }
}

/// High-level behaviour chosen by the decision layer each tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BehaviorMode {
    /// No opponent available: orbit a drifting anchor point.
    #[default]
    Patrol,
    /// Pursue and strafe the selected target.
    Engage,
    /// Under fire: jink, run from missiles, drop flares.
    Evade,
}

/// Missile lock acquisition state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LockState {
    #[default]
    Unlocked,
    /// Target inside the envelope, timer accumulating.
    Locking,
    /// Timer passed the threshold; missile launch allowed.
    Ready,
}

/// Where an actor is in its sortie.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlightPhase {
    /// Waiting on the apron for its staggered takeoff slot.
    #[default]
    Parked,
    /// Rolling out at taxi throttle; no steering or combat yet.
    Taxiing,
    /// In the fight.
    Airborne,
    /// Shot down, waiting for the respawn delay to elapse.
    Downed,
}

/// How an actor reacts to the arena boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy")]
pub enum EdgePolicy {
    /// Mirror the heading component that crossed the edge.
    Bounce,
    /// Turn back toward the interior once within `buffer` of an edge.
    Avoid { buffer: f64 },
}

/// Which guidance target a missile is steering for this tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Guidance {
    /// Homing on the target it was launched at.
    #[default]
    Primary,
    /// Seduced by an enemy decoy.
    Decoy { decoy_id: u32 },
    /// No valid target; flying straight until the motor burns out.
    Ballistic,
}

/// Weapon categories, used in events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    Gun,
    Missile,
}

/// Why an action requested by the controlled actor was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RefusalReason {
    OutOfAmmo,
    Cooldown,
    NoLock,
    OutOfRange,
    NotAligned,
    FlaresRecharging,
}

/// Top-level session state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Briefing,
    Active,
    Paused,
}

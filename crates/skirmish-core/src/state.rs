//! Arena snapshot: the complete visible state handed to consumers each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::SimEvent;
use crate::types::{ActorHandle, Position, SimTime, Velocity};

/// Complete arena state published after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArenaSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub autopilot: bool,
    /// Latched incoming-missile warning for the controlled actor.
    pub missile_warning: bool,
    /// In roster slot order; the controlled actor is slot 0.
    pub actors: Vec<ActorView>,
    pub bullets: Vec<BulletView>,
    pub missiles: Vec<MissileView>,
    pub decoys: Vec<DecoyView>,
    pub events: Vec<SimEvent>,
    pub score: ScoreView,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorView {
    pub handle: ActorHandle,
    pub kind: ActorKind,
    pub team: Team,
    pub position: Position,
    /// Radians, 0 = +x.
    pub heading: f64,
    pub throttle: f64,
    pub health: f64,
    pub max_health: f64,
    pub gun_ammo: u32,
    pub missile_ammo: u32,
    pub lock: LockView,
    pub flare_cooldown: u32,
    pub mode: BehaviorMode,
    pub flight_phase: FlightPhase,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LockView {
    pub state: LockState,
    pub target: Option<ActorHandle>,
    /// Lock timer as a fraction of the READY threshold, in [0, 1].
    pub progress: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulletView {
    pub position: Position,
    pub heading: f64,
    pub team: Team,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissileView {
    pub position: Position,
    pub heading: f64,
    pub team: Team,
    pub owner: ActorHandle,
    pub target: Option<ActorHandle>,
    pub guidance: Guidance,
    pub lifetime: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecoyView {
    pub id: u32,
    pub position: Position,
    pub velocity: Velocity,
    pub team: Team,
    pub lifetime: u32,
}

/// Running score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreView {
    pub allied_kills: u32,
    pub opposing_kills: u32,
    /// Kills credited to the controlled actor.
    pub player_kills: u32,
    pub player_deaths: u32,
}

//! Per-kind behaviour profiles.
//!
//! Consolidates the parameters the pilot FSM reads for each actor class.

use skirmish_core::enums::ActorKind;

/// Behaviour profile for one kind of pilot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PilotProfile {
    /// Largest heading change per tick (radians).
    pub max_turn_rate: f64,
    /// Gun is only fired at targets closer than this.
    pub gun_range: f64,
    /// Chance per tick to pull the trigger once all gun conditions hold.
    pub gun_chance: f64,
    /// Chance per tick to launch once a lock is READY.
    pub missile_chance: f64,
    /// Largest nose-to-lead angle at which the gun is fired (radians).
    pub aim_tolerance: f64,
    /// Chance to start a jink when a threat is close.
    pub dodge_chance: f64,
    /// Chance per tick to start a flare burst with a missile close.
    pub flare_chance: f64,
    pub engage_throttle: f64,
    pub patrol_throttle: f64,
    /// Missiles are held while the target has this much health or less.
    pub min_target_health: f64,
}

/// Get the profile for an actor kind. The controlled actor only ever
/// consults the AI through the autopilot.
pub fn get_profile(kind: ActorKind) -> PilotProfile {
    use std::f64::consts::PI;

    match kind {
        ActorKind::Opponent => PilotProfile {
            max_turn_rate: 0.04,
            gun_range: 800.0,
            gun_chance: 0.05,
            missile_chance: 0.02,
            aim_tolerance: PI / 8.0,
            dodge_chance: 0.4,
            flare_chance: 0.1,
            engage_throttle: 5.0,
            patrol_throttle: 3.5,
            min_target_health: 0.0,
        },
        ActorKind::Ally => PilotProfile {
            max_turn_rate: 0.06,
            gun_range: 600.0,
            gun_chance: 0.04,
            missile_chance: 0.01,
            aim_tolerance: PI / 8.0,
            dodge_chance: 0.4,
            flare_chance: 0.1,
            engage_throttle: 5.0,
            patrol_throttle: 3.5,
            min_target_health: 0.0,
        },
        ActorKind::Controlled => autopilot_profile(),
    }
}

/// Profile used while the autopilot flies the controlled actor.
pub fn autopilot_profile() -> PilotProfile {
    PilotProfile {
        max_turn_rate: 0.05,
        gun_range: 700.0,
        gun_chance: 0.15,
        missile_chance: 0.03,
        aim_tolerance: std::f64::consts::PI / 8.0,
        dodge_chance: 0.4,
        flare_chance: 0.1,
        engage_throttle: 5.0,
        patrol_throttle: 3.5,
        min_target_health: 30.0,
    }
}

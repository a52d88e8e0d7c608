//! Player intents sent from the input layer to the simulation.
//!
//! Intents are queued and applied at the next tick boundary. Held controls
//! carry their pressed/released edge so the engine can keep them latched.

use serde::{Deserialize, Serialize};

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Flight controls ---
    /// Rotate counter-clockwise while held.
    TurnLeft { held: bool },
    /// Rotate clockwise while held.
    TurnRight { held: bool },
    ThrottleUp { held: bool },
    ThrottleDown { held: bool },

    // --- Weapons ---
    /// Fire the gun every tick the cooldown allows while held.
    FireGun { held: bool },
    /// Launch a missile if a lock is ready.
    FireMissile,
    /// Start a flare burst.
    DeployDecoys,
    /// Hand the controlled actor over to (or back from) the autopilot.
    ToggleAutopilot,

    // --- Simulation control ---
    /// Populate the arena and start the sortie.
    StartMission,
    Pause,
    Resume,
    /// Set time scale (1.0 = normal, 2.0 = double). Only the runner uses it.
    SetTimeScale { scale: f64 },
}

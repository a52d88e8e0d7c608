//! Side-effect notifications emitted by the simulation for audio, effects
//! and HUD feedback. Consumers read them from the snapshot; the simulation
//! never depends on anyone handling them.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::ActorHandle;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    GunFired { shooter: ActorHandle },
    MissileLaunched {
        shooter: ActorHandle,
        target: ActorHandle,
    },
    /// Visual explosion effect; `size` scales the sprite.
    Explosion { x: f64, y: f64, size: f64 },
    DecoysDeployed { actor: ActorHandle },
    ActorDestroyed {
        actor: ActorHandle,
        kind: ActorKind,
        /// Who landed the killing blow, if anyone was recorded.
        killer: Option<ActorHandle>,
    },
    ActorRespawned { actor: ActorHandle },
    /// Two opposing airframes ran into each other.
    Collision { a: ActorHandle, b: ActorHandle },
    /// Controlled actor's lock reached READY.
    LockAcquired { target: ActorHandle },
    /// An enemy missile is close to the controlled actor.
    MissileWarning,
    TakingOff { actor: ActorHandle },
    AutopilotToggled { enabled: bool },
    /// An action requested by the controlled actor was refused.
    Refused {
        weapon: Option<WeaponKind>,
        reason: RefusalReason,
    },
}

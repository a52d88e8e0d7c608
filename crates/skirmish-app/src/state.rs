//! Messages and settings shared between the runner and the game loop thread.

use skirmish_core::commands::PlayerCommand;

/// Commands sent from the input side to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// How the game loop paces itself and when it stops.
#[derive(Debug, Clone, Copy)]
pub struct LoopSettings {
    /// Sleep between ticks to hold the nominal tick rate (scaled by the
    /// engine's time scale). When false, ticks run back to back.
    pub realtime: bool,
    /// Stop after this many ticks. `None` runs until shutdown.
    pub max_ticks: Option<u64>,
}

impl Default for LoopSettings {
    fn default() -> Self {
        Self {
            realtime: true,
            max_ticks: None,
        }
    }
}

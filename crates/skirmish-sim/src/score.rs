//! Running score, kept by the engine and copied into every snapshot.

use skirmish_core::enums::{ActorKind, Team};
use skirmish_core::state::ScoreView;
use skirmish_core::types::ActorHandle;

/// Slot the controlled actor always occupies.
pub const CONTROLLED_SLOT: u32 = 0;

#[derive(Debug, Clone, Default)]
pub struct ScoreState {
    pub allied_kills: u32,
    pub opposing_kills: u32,
    pub player_kills: u32,
    pub player_deaths: u32,
}

impl ScoreState {
    /// Credit a death to the victim's opponents.
    pub fn record_death(&mut self, victim_kind: ActorKind, killer: Option<ActorHandle>) {
        match victim_kind.team() {
            Team::Opposing => self.allied_kills += 1,
            Team::Allied => self.opposing_kills += 1,
        }
        if victim_kind == ActorKind::Controlled {
            self.player_deaths += 1;
        } else if killer.is_some_and(|k| k.slot == CONTROLLED_SLOT) {
            self.player_kills += 1;
        }
    }

    pub fn view(&self) -> ScoreView {
        ScoreView {
            allied_kills: self.allied_kills,
            opposing_kills: self.opposing_kills,
            player_kills: self.player_kills,
            player_deaths: self.player_deaths,
        }
    }
}

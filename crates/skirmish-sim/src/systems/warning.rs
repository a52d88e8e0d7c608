//! Incoming-missile warning for the controlled actor.
//!
//! The warning latches on while an enemy missile is close and holds for a
//! short time after the last one leaves, so the HUD does not flicker.

use hecs::World;

use skirmish_core::components::Missile;
use skirmish_core::constants::{MISSILE_WARNING_HOLD_TICKS, MISSILE_WARNING_RADIUS};
use skirmish_core::events::SimEvent;
use skirmish_core::types::Position;

use crate::roster::collect_actors;
use crate::score::CONTROLLED_SLOT;

#[derive(Debug, Clone, Copy, Default)]
pub struct MissileWarning {
    hold: u32,
}

impl MissileWarning {
    pub fn active(&self) -> bool {
        self.hold > 0
    }
}

pub fn run(world: &World, warning: &mut MissileWarning, events: &mut Vec<SimEvent>) {
    let actors = collect_actors(world);
    let threatened = actors
        .get(CONTROLLED_SLOT as usize)
        .filter(|me| me.is_live())
        .is_some_and(|me| {
            world
                .query::<(&Missile, &Position)>()
                .iter()
                .any(|(_, (m, p))| m.team != me.team && p.distance_to(&me.position) <= MISSILE_WARNING_RADIUS)
        });

    if threatened {
        if !warning.active() {
            events.push(SimEvent::MissileWarning);
        }
        warning.hold = MISSILE_WARNING_HOLD_TICKS;
    } else {
        warning.hold = warning.hold.saturating_sub(1);
    }
}

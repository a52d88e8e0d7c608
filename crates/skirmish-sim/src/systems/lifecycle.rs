//! Actor lifecycle: death observation, reference invalidation, respawn in
//! place, and the parked → taxiing → airborne sortie sequence.
//!
//! Deaths are observed here at the start of the tick after health reached
//! zero, never mid-tick.

use hecs::World;
use rand::Rng;

use skirmish_core::components::*;
use skirmish_core::config::Tuning;
use skirmish_core::constants::*;
use skirmish_core::enums::{ActorKind, FlightPhase};
use skirmish_core::events::SimEvent;
use skirmish_core::types::{ActorHandle, Position};

use crate::roster::Roster;
use crate::score::{ScoreState, CONTROLLED_SLOT};
use crate::world_setup::{reset_for_sortie, respawn_spot};

pub fn run<R: Rng>(
    world: &mut World,
    roster: &mut Roster,
    tuning: &Tuning,
    rng: &mut R,
    events: &mut Vec<SimEvent>,
    score: &mut ScoreState,
) {
    observe_deaths(world, roster, tuning, rng, events, score);
    advance_downed(world, roster, tuning, rng, events);
    advance_sorties(world, roster, events);
}

struct Death {
    slot: u32,
    entity: hecs::Entity,
    handle: ActorHandle,
    kind: ActorKind,
    position: Position,
    killer: Option<ActorHandle>,
}

fn observe_deaths<R: Rng>(
    world: &mut World,
    roster: &mut Roster,
    tuning: &Tuning,
    rng: &mut R,
    events: &mut Vec<SimEvent>,
    score: &mut ScoreState,
) {
    let mut deaths = Vec::new();
    for (slot, entity) in roster.iter() {
        let Ok((id, pos, health, flight, pilot)) =
            world.query_one_mut::<(&Identity, &Position, &Health, &FlightStatus, &PilotState)>(entity)
        else {
            continue;
        };
        if flight.phase == FlightPhase::Downed || health.is_alive() {
            continue;
        }
        deaths.push(Death {
            slot,
            entity,
            handle: id.handle(),
            kind: id.kind,
            position: *pos,
            // A shot still in flight from a previous life earns no credit.
            killer: pilot
                .last_attacker
                .map(|r| r.attacker)
                .filter(|k| roster.is_current(*k)),
        });
    }

    for death in deaths {
        events.push(SimEvent::Explosion {
            x: death.position.x,
            y: death.position.y,
            size: EXPLOSION_SIZE_KILL,
        });
        events.push(SimEvent::ActorDestroyed {
            actor: death.handle,
            kind: death.kind,
            killer: death.killer,
        });
        score.record_death(death.kind, death.killer);

        if let Some(next) = roster.bump_generation(death.slot) {
            if let Ok(mut id) = world.get::<&mut Identity>(death.entity) {
                id.generation = next.generation;
            }
        }
        invalidate_references(world, death.handle);
        log::debug!(
            "{:?} in slot {} destroyed (killer: {:?})",
            death.kind,
            death.slot,
            death.killer
        );

        if death.kind == ActorKind::Controlled && tuning.controlled_respawn_delay_ticks > 0 {
            if let Ok((flight, lock, cm, orders)) = world.query_one_mut::<(
                &mut FlightStatus,
                &mut LockOn,
                &mut Countermeasures,
                &mut PilotOrders,
            )>(death.entity)
            {
                *flight = FlightStatus {
                    phase: FlightPhase::Downed,
                    respawn_timer: tuning.controlled_respawn_delay_ticks,
                    ..Default::default()
                };
                lock.reset();
                cm.burst = None;
                *orders = PilotOrders::default();
            }
        } else {
            respawn(world, roster, tuning, rng, death.slot, death.kind, events);
        }
    }
}

/// Clear every stored reference to a dead incarnation: locks, aggro
/// memory and missile primary targets.
pub fn invalidate_references(world: &mut World, dead: ActorHandle) {
    for (_entity, lock) in world.query_mut::<&mut LockOn>() {
        if lock.target == Some(dead) {
            lock.reset();
        }
    }
    for (_entity, pilot) in world.query_mut::<&mut PilotState>() {
        if pilot.last_attacker.is_some_and(|r| r.attacker == dead) {
            pilot.last_attacker = None;
        }
    }
    for (_entity, missile) in world.query_mut::<&mut Missile>() {
        if missile.primary_target == Some(dead) {
            missile.primary_target = None;
        }
    }
}

fn respawn<R: Rng>(
    world: &mut World,
    roster: &Roster,
    tuning: &Tuning,
    rng: &mut R,
    slot: u32,
    kind: ActorKind,
    events: &mut Vec<SimEvent>,
) {
    let Some(entity) = roster.entity(slot) else {
        return;
    };
    let controlled = roster
        .entity(CONTROLLED_SLOT)
        .filter(|_| slot != CONTROLLED_SLOT)
        .and_then(|e| world.get::<&Position>(e).ok().map(|p| *p));
    let (position, heading) = respawn_spot(kind, tuning, controlled, rng);
    let taxi_ticks = match kind {
        ActorKind::Controlled => CONTROLLED_TAXI_TICKS,
        ActorKind::Ally | ActorKind::Opponent => TAXI_TICKS,
    };
    reset_for_sortie(world, entity, position, heading, taxi_ticks, rng);
    if let Some(handle) = roster.handle(slot) {
        events.push(SimEvent::ActorRespawned { actor: handle });
        log::debug!("{kind:?} respawned in slot {slot}");
    }
}

fn advance_downed<R: Rng>(
    world: &mut World,
    roster: &Roster,
    tuning: &Tuning,
    rng: &mut R,
    events: &mut Vec<SimEvent>,
) {
    let mut ready = Vec::new();
    for (slot, entity) in roster.iter() {
        let Ok((id, flight)) = world.query_one_mut::<(&Identity, &mut FlightStatus)>(entity) else {
            continue;
        };
        if flight.phase != FlightPhase::Downed {
            continue;
        }
        flight.respawn_timer = flight.respawn_timer.saturating_sub(1);
        if flight.respawn_timer == 0 {
            ready.push((slot, id.kind));
        }
    }
    for (slot, kind) in ready {
        respawn(world, roster, tuning, rng, slot, kind, events);
    }
}

fn advance_sorties(world: &mut World, roster: &Roster, events: &mut Vec<SimEvent>) {
    for (_slot, entity) in roster.iter() {
        let Ok((id, kin, flight)) =
            world.query_one_mut::<(&Identity, &mut Kinematics, &mut FlightStatus)>(entity)
        else {
            continue;
        };
        match flight.phase {
            FlightPhase::Parked => {
                if flight.takeoff_delay > 0 {
                    flight.takeoff_delay -= 1;
                    continue;
                }
                flight.phase = FlightPhase::Taxiing;
                flight.taxi_timer = match id.kind {
                    ActorKind::Controlled => CONTROLLED_TAXI_TICKS,
                    ActorKind::Ally | ActorKind::Opponent => TAXI_TICKS,
                };
                kin.throttle = TAXI_THROTTLE;
                events.push(SimEvent::TakingOff { actor: id.handle() });
            }
            FlightPhase::Taxiing => {
                if flight.taxi_timer > 0 {
                    flight.taxi_timer -= 1;
                    continue;
                }
                flight.phase = FlightPhase::Airborne;
                kin.throttle = TAKEOFF_THROTTLE;
                kin.throttle_target = TAKEOFF_THROTTLE;
                log::trace!("slot {} airborne", id.slot);
            }
            FlightPhase::Airborne | FlightPhase::Downed => {}
        }
    }
}

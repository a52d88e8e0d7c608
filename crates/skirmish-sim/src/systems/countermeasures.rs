//! Countermeasures: flare cooldowns, burst requests and the staggered
//! release of decoy pairs.
//!
//! A burst is a tick-counted schedule stored on the actor: one pair leaves
//! the airframe every `interval` ticks until the burst is exhausted.

use std::f64::consts::{FRAC_PI_2, PI};

use hecs::World;
use rand::Rng;

use skirmish_core::components::*;
use skirmish_core::constants::*;
use skirmish_core::enums::{ActorKind, RefusalReason, Team};
use skirmish_core::events::SimEvent;
use skirmish_core::types::{ActorHandle, Position, Velocity};
use skirmish_pilot_ai::fsm::passive_flare_gate;

use crate::controls::ControlState;
use crate::roster::Roster;

pub fn run<R: Rng>(
    world: &mut World,
    roster: &Roster,
    controls: &mut ControlState,
    autopilot: bool,
    rng: &mut R,
    next_decoy_id: &mut u32,
    events: &mut Vec<SimEvent>,
) {
    let missiles: Vec<(Team, Position)> = world
        .query::<(&Missile, &Position)>()
        .iter()
        .map(|(_, (m, p))| (m.team, *p))
        .collect();

    let mut releases: Vec<(ActorHandle, Team, Position, f64)> = Vec::new();

    for (_slot, entity) in roster.iter() {
        let Ok((id, pos, kin, health, flight, cm, orders)) = world.query_one_mut::<(
            &Identity,
            &Position,
            &Kinematics,
            &Health,
            &FlightStatus,
            &mut Countermeasures,
            &mut PilotOrders,
        )>(entity) else {
            continue;
        };

        cm.flare_cooldown = cm.flare_cooldown.saturating_sub(1);
        if !flight.is_airborne() || !health.is_alive() {
            cm.burst = None;
            orders.deploy_decoys = false;
            continue;
        }

        let manual = id.kind == ActorKind::Controlled && !autopilot;
        let requested = if manual {
            std::mem::take(&mut controls.deploy_decoys)
        } else {
            let ordered = std::mem::take(&mut orders.deploy_decoys);
            let passive = id.kind.is_autonomous() && {
                let nearest = missiles
                    .iter()
                    .filter(|(team, _)| *team != id.team)
                    .map(|(_, p)| pos.distance_to(p))
                    .min_by(|a, b| a.total_cmp(b));
                passive_flare_gate(nearest, flare_ready(cm), rng)
            };
            ordered || passive
        };

        if requested {
            if request_burst(cm) {
                events.push(SimEvent::DecoysDeployed { actor: id.handle() });
                log::debug!("slot {} deploying decoys", id.slot);
            } else if manual {
                events.push(SimEvent::Refused {
                    weapon: None,
                    reason: RefusalReason::FlaresRecharging,
                });
            }
        }

        if let Some(burst) = cm.burst.as_mut() {
            if burst.countdown == 0 {
                releases.push((id.handle(), id.team, *pos, kin.heading));
                burst.pairs_remaining -= 1;
                // Counting this tick, the next pair is `interval` ticks away.
                burst.countdown = burst.interval.saturating_sub(1);
                if burst.pairs_remaining == 0 {
                    cm.burst = None;
                }
            } else {
                burst.countdown -= 1;
            }
        }
    }

    for (owner, team, position, heading) in releases {
        release_pair(world, owner, team, position, heading, rng, next_decoy_id);
    }
}

/// Whether a new burst may start.
pub fn flare_ready(cm: &Countermeasures) -> bool {
    cm.flare_cooldown == 0 && cm.burst.is_none()
}

/// Schedule a full burst if the flares are ready. The first pair leaves on
/// the tick of the request.
pub fn request_burst(cm: &mut Countermeasures) -> bool {
    if !flare_ready(cm) {
        return false;
    }
    cm.burst = Some(DecoyBurst {
        pairs_remaining: DECOY_PAIRS_PER_BURST,
        countdown: 0,
        interval: DECOY_PAIR_INTERVAL_TICKS,
    });
    cm.flare_cooldown = FLARE_COOLDOWN_TICKS;
    true
}

/// Spawn one symmetric pair either side of the airframe, drifting backwards.
fn release_pair<R: Rng>(
    world: &mut World,
    owner: ActorHandle,
    team: Team,
    position: Position,
    heading: f64,
    rng: &mut R,
    next_decoy_id: &mut u32,
) {
    for side in [1.0, -1.0] {
        let spawn = position.offset(heading + FRAC_PI_2, side * DECOY_SPACING);
        let drift = heading + PI + side * rng.gen_range(0.0..DECOY_SPREAD / 2.0);
        let speed = rng.gen_range(DECOY_MIN_SPEED..DECOY_MAX_SPEED);
        let id = *next_decoy_id;
        *next_decoy_id += 1;
        world.spawn((
            spawn,
            Velocity::from_heading(drift, speed),
            Decoy {
                id,
                owner,
                team,
                lifetime: DECOY_LIFETIME_TICKS,
            },
        ));
    }
}

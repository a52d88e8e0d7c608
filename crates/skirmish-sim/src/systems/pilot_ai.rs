//! Pilot orders: the decision layer for autonomous actors (and the
//! controlled actor on autopilot), or the player's latched controls.

use hecs::World;
use rand::Rng;

use skirmish_core::components::*;
use skirmish_core::config::Tuning;
use skirmish_core::constants::*;
use skirmish_core::enums::{ActorKind, Team};
use skirmish_core::types::Position;
use skirmish_pilot_ai::fsm::{evaluate, Contact, PilotContext};
use skirmish_pilot_ai::profiles::{autopilot_profile, get_profile};

use crate::controls::ControlState;
use crate::roster::{collect_actors, Roster};
use crate::systems::countermeasures::flare_ready;

pub fn run<R: Rng>(
    world: &mut World,
    roster: &Roster,
    tuning: &Tuning,
    controls: &mut ControlState,
    autopilot: bool,
    rng: &mut R,
    tick: u64,
) {
    let actors = collect_actors(world);
    let contacts = |team: Team| -> Vec<Contact> {
        actors
            .iter()
            .filter(|a| a.team == team && a.is_live())
            .map(|a| Contact {
                handle: a.handle,
                position: a.position,
                heading: a.heading,
                speed: a.speed,
                health: a.health,
            })
            .collect()
    };
    let allied = contacts(Team::Allied);
    let opposing = contacts(Team::Opposing);

    let bullets = projectile_positions::<Bullet>(world, |b| b.team);
    let missiles = projectile_positions::<Missile>(world, |m| m.team);

    let arena_center = Position::new(tuning.world_width / 2.0, tuning.world_height / 2.0);

    for (slot, entity) in roster.iter() {
        let Some(me) = actors.get(slot as usize).copied() else {
            continue;
        };
        let Ok((kin, arm, lock, cm, pilot, orders)) = world.query_one_mut::<(
            &Kinematics,
            &Armament,
            &LockOn,
            &Countermeasures,
            &mut PilotState,
            &mut PilotOrders,
        )>(entity) else {
            continue;
        };

        if !me.is_live() {
            *orders = PilotOrders::default();
            continue;
        }

        if me.kind == ActorKind::Controlled && !autopilot {
            *orders = manual_orders(controls, kin);
            continue;
        }

        let profile = if me.kind == ActorKind::Controlled {
            autopilot_profile()
        } else {
            get_profile(me.kind)
        };
        let (opponents, hostile_team) = match me.team {
            Team::Allied => (&opposing, Team::Opposing),
            Team::Opposing => (&allied, Team::Allied),
        };
        let hostile_bullets = &bullets[team_index(hostile_team)];
        let hostile_missiles = &missiles[team_index(hostile_team)];

        let ctx = PilotContext {
            profile,
            tick,
            position: me.position,
            heading: kin.heading,
            memory: *pilot,
            lock: *lock,
            gun_ammo: arm.gun_ammo,
            missile_ammo: arm.missile_ammo,
            flare_ready: flare_ready(cm),
            opponents,
            hostile_bullets,
            hostile_missiles,
            arena_center,
            aggro_window_ticks: tuning.aggro_window_ticks,
        };
        let update = evaluate(&ctx, rng);
        if update.mode_changed {
            log::trace!("slot {slot} now {:?}", update.memory.mode);
        }
        *pilot = update.memory;
        *orders = update.orders;
    }
}

/// Turn the latched controls into this tick's orders. Edge-triggered
/// missile fire is consumed here.
pub fn manual_orders(controls: &mut ControlState, kin: &Kinematics) -> PilotOrders {
    let mut throttle = kin.throttle;
    if controls.throttle_up {
        throttle += THROTTLE_UP_STEP;
    }
    if controls.throttle_down {
        throttle -= THROTTLE_DOWN_STEP;
    }
    PilotOrders {
        manual: true,
        desired_heading: None,
        manual_turn: controls.turn_axis() * MANUAL_TURN_RATE,
        throttle_target: throttle.clamp(THROTTLE_MIN, THROTTLE_MAX),
        fire_gun: controls.fire_gun,
        fire_missile: std::mem::take(&mut controls.fire_missile),
        deploy_decoys: false,
    }
}

fn team_index(team: Team) -> usize {
    match team {
        Team::Allied => 0,
        Team::Opposing => 1,
    }
}

/// Positions of every projectile of type `T`, split by owning team.
fn projectile_positions<T: hecs::Component>(
    world: &World,
    team_of: impl Fn(&T) -> Team,
) -> [Vec<Position>; 2] {
    let mut by_team = [Vec::new(), Vec::new()];
    for (_entity, (projectile, pos)) in world.query::<(&T, &Position)>().iter() {
        by_team[team_index(team_of(projectile))].push(*pos);
    }
    by_team
}

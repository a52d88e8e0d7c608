//! Actor movement: steering, throttle, position integration, the arena
//! edge policy, and same-team separation.

use hecs::World;

use skirmish_core::components::{FlightStatus, Identity, Kinematics, PilotOrders};
use skirmish_core::config::Tuning;
use skirmish_core::constants::*;
use skirmish_core::enums::{ActorKind, EdgePolicy, FlightPhase, Team};
use skirmish_core::geometry::wrap_angle;
use skirmish_core::types::Position;
use skirmish_pilot_ai::profiles::{autopilot_profile, get_profile};

use crate::roster::Roster;
use crate::steering::{
    advance, apply_separation, avoid_world_edge, bounce_off_world_edge, clamp_to_world, steer_toward,
};

/// Move every actor one tick, then push apart crowded wingmen.
pub fn run(world: &mut World, roster: &Roster, tuning: &Tuning, autopilot: bool) {
    let (w, h) = (tuning.world_width, tuning.world_height);

    for (_slot, entity) in roster.iter() {
        let Ok((id, pos, kin, flight, orders)) = world.query_one_mut::<(
            &Identity,
            &mut Position,
            &mut Kinematics,
            &FlightStatus,
            &PilotOrders,
        )>(entity) else {
            continue;
        };

        match flight.phase {
            FlightPhase::Parked | FlightPhase::Downed => continue,
            FlightPhase::Taxiing => {
                kin.throttle = TAXI_THROTTLE;
                *pos = clamp_to_world(advance(*pos, kin.heading, kin.throttle, SPEED_SCALE), w, h);
                continue;
            }
            FlightPhase::Airborne => {}
        }

        let policy = tuning.edge_policy(id.kind);
        if orders.manual {
            kin.heading = wrap_angle(kin.heading + orders.manual_turn);
            kin.turn_velocity = 0.0;
            kin.throttle = orders.throttle_target.clamp(THROTTLE_MIN, THROTTLE_MAX);
        } else {
            let mut desired = orders.desired_heading.unwrap_or(kin.heading);
            if let EdgePolicy::Avoid { buffer } = policy {
                if let Some(inward) = avoid_world_edge(*pos, buffer, w, h) {
                    desired = inward;
                }
            }
            let (max_turn_rate, inertia) = if id.kind == ActorKind::Controlled && autopilot {
                (autopilot_profile().max_turn_rate, None)
            } else {
                (get_profile(id.kind).max_turn_rate, tuning.turn_inertia)
            };
            let (heading, turn_velocity) =
                steer_toward(kin.heading, kin.turn_velocity, desired, max_turn_rate, inertia);
            kin.heading = heading;
            kin.turn_velocity = turn_velocity;
            kin.throttle_target = orders.throttle_target;
            kin.throttle += (kin.throttle_target - kin.throttle) * THROTTLE_EASE;
        }

        let moved = advance(*pos, kin.heading, kin.throttle, SPEED_SCALE);
        match policy {
            EdgePolicy::Bounce => {
                let (p, heading) = bounce_off_world_edge(moved, kin.heading, w, h);
                *pos = p;
                kin.heading = heading;
            }
            EdgePolicy::Avoid { .. } => *pos = clamp_to_world(moved, w, h),
        }
    }

    separate(world, roster, tuning, Team::Allied);
    separate(world, roster, tuning, Team::Opposing);
}

/// Pairwise push between airborne autonomous actors of one team.
fn separate(world: &mut World, roster: &Roster, tuning: &Tuning, team: Team) {
    let mut members = Vec::new();
    let mut positions = Vec::new();
    for (_slot, entity) in roster.iter() {
        let Ok((id, pos, flight)) = world.query_one_mut::<(&Identity, &Position, &FlightStatus)>(entity)
        else {
            continue;
        };
        if id.team == team && id.kind.is_autonomous() && flight.is_airborne() {
            members.push(entity);
            positions.push(*pos);
        }
    }

    apply_separation(&mut positions, tuning.separation_distance, tuning.separation_strength);

    for (entity, separated) in members.into_iter().zip(positions) {
        if let Ok(mut pos) = world.get::<&mut Position>(entity) {
            *pos = clamp_to_world(separated, tuning.world_width, tuning.world_height);
        }
    }
}

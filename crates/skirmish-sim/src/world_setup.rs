//! Actor spawn factories and airfield layout.
//!
//! Every actor starts parked at its team's airfield: the controlled actor
//! and its allies in the bottom-right corner facing up, opponents in the
//! top-left corner facing down. Takeoffs are staggered by roster order.

use std::f64::consts::{FRAC_PI_2, PI};

use hecs::World;
use rand::Rng;

use skirmish_core::components::*;
use skirmish_core::config::Tuning;
use skirmish_core::constants::*;
use skirmish_core::enums::*;
use skirmish_core::types::Position;

use crate::roster::Roster;

/// Populate an empty world with the full roster: the controlled actor in
/// slot 0, then allies, then opponents.
pub fn setup_arena<R: Rng>(world: &mut World, roster: &mut Roster, tuning: &Tuning, rng: &mut R) {
    world.clear();
    roster.clear();

    spawn_actor(world, roster, tuning, rng, ActorKind::Controlled, 0);
    for i in 0..tuning.ally_count {
        spawn_actor(world, roster, tuning, rng, ActorKind::Ally, i);
    }
    for i in 0..tuning.opponent_count {
        spawn_actor(world, roster, tuning, rng, ActorKind::Opponent, i);
    }
}

/// Spawn one parked actor at its airfield spot. `index` is its position
/// within its own kind.
pub fn spawn_actor<R: Rng>(
    world: &mut World,
    roster: &mut Roster,
    tuning: &Tuning,
    rng: &mut R,
    kind: ActorKind,
    index: u32,
) -> hecs::Entity {
    let (position, heading) = parking_spot(kind, index, tuning);
    let takeoff_delay = match kind {
        ActorKind::Controlled => 0,
        ActorKind::Ally => index * ALLY_TAKEOFF_STAGGER_TICKS,
        ActorKind::Opponent => index * OPPONENT_TAKEOFF_STAGGER_TICKS,
    };
    let slot = roster.len() as u32;
    let entity = world.spawn((
        Identity {
            slot,
            kind,
            team: kind.team(),
            generation: 0,
        },
        position,
        Kinematics {
            heading,
            ..Default::default()
        },
        Health::full(MAX_HEALTH),
        Armament::full(GUN_AMMO_CAPACITY, MISSILE_AMMO_CAPACITY),
        LockOn::default(),
        Countermeasures::default(),
        fresh_pilot(rng),
        FlightStatus {
            phase: FlightPhase::Parked,
            takeoff_delay,
            ..Default::default()
        },
        PilotOrders::default(),
    ));
    roster.push(entity);
    entity
}

/// Parking spot and apron heading for the `index`-th actor of a kind.
pub fn parking_spot(kind: ActorKind, index: u32, tuning: &Tuning) -> (Position, f64) {
    let (w, h) = (tuning.world_width, tuning.world_height);
    let col = (index % AIRFIELD_COLUMNS) as f64;
    let row = (index / AIRFIELD_COLUMNS) as f64;
    let (x, y, heading) = match kind {
        ActorKind::Controlled => (w - AIRFIELD_MARGIN, h - AIRFIELD_MARGIN, -FRAC_PI_2),
        // Allies line up to the left of the controlled actor; extra rows
        // park behind (further from the runway direction).
        ActorKind::Ally => (
            w - AIRFIELD_MARGIN - (col + 1.0) * AIRFIELD_SPACING,
            h - AIRFIELD_MARGIN + row * AIRFIELD_SPACING,
            -FRAC_PI_2,
        ),
        ActorKind::Opponent => (
            AIRFIELD_MARGIN + col * AIRFIELD_SPACING,
            AIRFIELD_MARGIN - row * AIRFIELD_SPACING,
            FRAC_PI_2,
        ),
    };
    (
        crate::steering::clamp_to_world(Position::new(x, y), w, h),
        heading,
    )
}

/// Where a dead actor comes back: a random spot at its home airfield,
/// preferring one out of reach of the controlled actor.
pub fn respawn_spot<R: Rng>(
    kind: ActorKind,
    tuning: &Tuning,
    controlled: Option<Position>,
    rng: &mut R,
) -> (Position, f64) {
    let spots = match kind {
        ActorKind::Controlled => return parking_spot(kind, 0, tuning),
        ActorKind::Ally => tuning.ally_count,
        ActorKind::Opponent => tuning.opponent_count,
    }
    .max(1);

    let mut spot = parking_spot(kind, 0, tuning);
    for _ in 0..RESPAWN_ATTEMPTS {
        spot = parking_spot(kind, rng.gen_range(0..spots), tuning);
        let safe = controlled.map_or(true, |c| c.distance_to(&spot.0) > RESPAWN_SAFE_DISTANCE);
        if safe {
            break;
        }
    }
    spot
}

/// Restore an actor to a factory-fresh airframe at `position`, rolling out.
pub fn reset_for_sortie<R: Rng>(
    world: &mut World,
    entity: hecs::Entity,
    position: Position,
    heading: f64,
    taxi_ticks: u32,
    rng: &mut R,
) {
    let pilot = fresh_pilot(rng);
    if let Ok((pos, kin, health, arm, lock, cm, pilot_state, flight, orders)) = world
        .query_one_mut::<(
            &mut Position,
            &mut Kinematics,
            &mut Health,
            &mut Armament,
            &mut LockOn,
            &mut Countermeasures,
            &mut PilotState,
            &mut FlightStatus,
            &mut PilotOrders,
        )>(entity)
    {
        *pos = position;
        *kin = Kinematics {
            heading,
            throttle: TAXI_THROTTLE,
            ..Default::default()
        };
        *health = Health::full(health.max);
        *arm = Armament::full(arm.gun_capacity, arm.missile_capacity);
        lock.reset();
        *cm = Countermeasures::default();
        *pilot_state = pilot;
        *flight = FlightStatus {
            phase: FlightPhase::Taxiing,
            taxi_timer: taxi_ticks,
            ..Default::default()
        };
        *orders = PilotOrders::default();
    }
}

fn fresh_pilot<R: Rng>(rng: &mut R) -> PilotState {
    PilotState {
        orbit_direction: if rng.gen_bool(0.5) { 1.0 } else { -1.0 },
        patrol_phase: rng.gen_range(-PI..PI),
        ..Default::default()
    }
}

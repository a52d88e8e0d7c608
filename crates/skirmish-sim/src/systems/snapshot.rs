//! Snapshot system: queries the ECS world and builds a complete
//! `ArenaSnapshot`.
//!
//! This system is read-only; it never modifies the world.

use hecs::World;

use skirmish_core::components::*;
use skirmish_core::config::Tuning;
use skirmish_core::enums::GamePhase;
use skirmish_core::events::SimEvent;
use skirmish_core::state::*;
use skirmish_core::types::{Position, SimTime, Velocity};

use crate::score::ScoreState;

/// Everything outside the world that the snapshot reports.
pub struct SnapshotContext<'a> {
    pub time: SimTime,
    pub phase: GamePhase,
    pub autopilot: bool,
    pub missile_warning: bool,
    pub tuning: &'a Tuning,
    pub score: &'a ScoreState,
}

pub fn build_snapshot(world: &World, ctx: &SnapshotContext, events: Vec<SimEvent>) -> ArenaSnapshot {
    ArenaSnapshot {
        time: ctx.time,
        phase: ctx.phase,
        autopilot: ctx.autopilot,
        missile_warning: ctx.missile_warning,
        actors: build_actors(world, ctx.tuning),
        bullets: build_bullets(world),
        missiles: build_missiles(world),
        decoys: build_decoys(world),
        events,
        score: ctx.score.view(),
    }
}

fn build_actors(world: &World, tuning: &Tuning) -> Vec<ActorView> {
    let mut actors: Vec<ActorView> = world
        .query::<(
            &Identity,
            &Position,
            &Kinematics,
            &Health,
            &Armament,
            &LockOn,
            &Countermeasures,
            &PilotState,
            &FlightStatus,
        )>()
        .iter()
        .map(|(_, (id, pos, kin, health, arm, lock, cm, pilot, flight))| {
            let threshold = tuning.lock_ticks(id.kind).max(1) as f64;
            ActorView {
                handle: id.handle(),
                kind: id.kind,
                team: id.team,
                position: *pos,
                heading: kin.heading,
                throttle: kin.throttle,
                health: health.current,
                max_health: health.max,
                gun_ammo: arm.gun_ammo,
                missile_ammo: arm.missile_ammo,
                lock: LockView {
                    state: lock.state,
                    target: lock.target,
                    progress: (lock.timer as f64 / threshold).min(1.0),
                },
                flare_cooldown: cm.flare_cooldown,
                mode: pilot.mode,
                flight_phase: flight.phase,
            }
        })
        .collect();
    actors.sort_by_key(|a| a.handle.slot);
    actors
}

fn build_bullets(world: &World) -> Vec<BulletView> {
    world
        .query::<(&Position, &Bullet)>()
        .iter()
        .map(|(_, (pos, bullet))| BulletView {
            position: *pos,
            heading: bullet.heading,
            team: bullet.team,
        })
        .collect()
}

fn build_missiles(world: &World) -> Vec<MissileView> {
    world
        .query::<(&Position, &Missile)>()
        .iter()
        .map(|(_, (pos, missile))| MissileView {
            position: *pos,
            heading: missile.heading,
            team: missile.team,
            owner: missile.owner,
            target: missile.primary_target,
            guidance: missile.guidance,
            lifetime: missile.lifetime,
        })
        .collect()
}

fn build_decoys(world: &World) -> Vec<DecoyView> {
    let mut decoys: Vec<DecoyView> = world
        .query::<(&Position, &Velocity, &Decoy)>()
        .iter()
        .map(|(_, (pos, vel, decoy))| DecoyView {
            id: decoy.id,
            position: *pos,
            velocity: *vel,
            team: decoy.team,
            lifetime: decoy.lifetime,
        })
        .collect();
    decoys.sort_by_key(|d| d.id);
    decoys
}

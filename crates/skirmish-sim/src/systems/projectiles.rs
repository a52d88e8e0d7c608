//! Projectile motion: bullets fly straight, missiles re-pick their
//! guidance target and steer, decoys drift. Every projectile burns one
//! tick of lifetime per tick.

use hecs::World;
use rand::Rng;

use skirmish_core::components::{Bullet, Decoy, Missile};
use skirmish_core::config::Tuning;
use skirmish_core::constants::*;
use skirmish_core::enums::{Guidance, Team};
use skirmish_core::geometry::wrap_angle;
use skirmish_core::targeting::find_nearest;
use skirmish_core::types::{ActorHandle, Position, Velocity};

use crate::roster::{collect_actors, find_live, ActorSummary};
use crate::steering::{advance, steer_toward};

/// A decoy as a missile seeker sees it.
#[derive(Debug, Clone, Copy)]
pub struct DecoyContact {
    pub id: u32,
    pub team: Team,
    pub position: Position,
}

pub fn run<R: Rng>(world: &mut World, tuning: &Tuning, rng: &mut R) {
    for (_entity, (pos, bullet)) in world.query_mut::<(&mut Position, &mut Bullet)>() {
        *pos = advance(*pos, bullet.heading, bullet.speed, 1.0);
        bullet.lifetime = bullet.lifetime.saturating_sub(1);
    }

    let actors = collect_actors(world);
    let decoys: Vec<DecoyContact> = world
        .query::<(&Decoy, &Position)>()
        .iter()
        .filter(|(_, (d, _))| d.lifetime > 0)
        .map(|(_, (d, p))| DecoyContact {
            id: d.id,
            team: d.team,
            position: *p,
        })
        .collect();

    for (_entity, (pos, missile)) in world.query_mut::<(&mut Position, &mut Missile)>() {
        let (guidance, aim) = select_guidance(
            *pos,
            missile.team,
            missile.primary_target,
            &actors,
            &decoys,
            tuning.decoy_redirect_radius,
        );
        if guidance != missile.guidance {
            log::trace!("missile guidance {:?} -> {:?}", missile.guidance, guidance);
        }
        missile.guidance = guidance;
        if let Some(aim) = aim {
            // Wiggle applies to the aim; the turn itself stays rate-limited.
            let wiggle = rng.gen_range(-MISSILE_WIGGLE / 2.0..MISSILE_WIGGLE / 2.0);
            let desired = wrap_angle(pos.bearing_to(&aim) + wiggle);
            let (heading, _) = steer_toward(missile.heading, 0.0, desired, missile.max_turn_rate, None);
            missile.heading = heading;
        }
        *pos = advance(*pos, missile.heading, missile.speed, 1.0);
        missile.lifetime = missile.lifetime.saturating_sub(1);
    }

    for (_entity, (pos, vel, decoy)) in world.query_mut::<(&mut Position, &Velocity, &mut Decoy)>() {
        pos.x += vel.x;
        pos.y += vel.y;
        decoy.lifetime = decoy.lifetime.saturating_sub(1);
    }
}

/// Decide what a missile steers for this tick: the nearest live decoy of
/// another team inside the redirect radius, else its live primary target,
/// else nothing (fly straight). Re-evaluated every tick.
pub fn select_guidance(
    missile_pos: Position,
    missile_team: Team,
    primary: Option<ActorHandle>,
    actors: &[ActorSummary],
    decoys: &[DecoyContact],
    redirect_radius: f64,
) -> (Guidance, Option<Position>) {
    let seduced = find_nearest(
        missile_pos,
        decoys.iter().map(|d| (d, d.position)),
        |d| d.team != missile_team,
    )
    .filter(|(_, dist)| *dist <= redirect_radius);
    if let Some((decoy, _)) = seduced {
        return (Guidance::Decoy { decoy_id: decoy.id }, Some(decoy.position));
    }

    match primary.and_then(|t| find_live(actors, t)) {
        Some(target) => (Guidance::Primary, Some(target.position)),
        None => (Guidance::Ballistic, None),
    }
}

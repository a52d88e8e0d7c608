//! Collision and damage: bullets against actors, missiles against their
//! guidance target, and airframes against each other.
//!
//! Runs after every projectile has moved for the tick. Health is clamped
//! at mutation; deaths are left for the lifecycle pass of the next tick.

use hecs::{Entity, World};

use skirmish_core::components::{AttackRecord, Bullet, Decoy, Health, Missile, PilotState};
use skirmish_core::constants::*;
use skirmish_core::enums::Guidance;
use skirmish_core::events::SimEvent;
use skirmish_core::types::{ActorHandle, Position};

use crate::roster::{collect_actors, ActorSummary};

pub fn run(world: &mut World, tick: u64, events: &mut Vec<SimEvent>, despawn_buffer: &mut Vec<Entity>) {
    let mut actors = collect_actors(world);

    resolve_bullets(world, &mut actors, tick, events, despawn_buffer);
    resolve_missiles(world, &mut actors, tick, events, despawn_buffer);
    resolve_airframes(world, &mut actors, tick, events);

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

fn resolve_bullets(
    world: &mut World,
    actors: &mut [ActorSummary],
    tick: u64,
    events: &mut Vec<SimEvent>,
    despawn_buffer: &mut Vec<Entity>,
) {
    let bullets: Vec<(Entity, Position, Bullet)> = world
        .query::<(&Position, &Bullet)>()
        .iter()
        .map(|(e, (p, b))| (e, *p, *b))
        .collect();

    for (entity, pos, bullet) in bullets {
        let victim = actors.iter().position(|a| {
            a.is_live()
                && a.team != bullet.team
                && a.handle != bullet.owner
                && a.position.distance_to(&pos) <= BULLET_HIT_RADIUS
        });
        let Some(index) = victim else {
            continue;
        };
        damage(world, &mut actors[index], GUN_DAMAGE, bullet.owner, tick);
        events.push(SimEvent::Explosion {
            x: pos.x,
            y: pos.y,
            size: EXPLOSION_SIZE_BULLET,
        });
        despawn_buffer.push(entity);
    }
}

fn resolve_missiles(
    world: &mut World,
    actors: &mut [ActorSummary],
    tick: u64,
    events: &mut Vec<SimEvent>,
    despawn_buffer: &mut Vec<Entity>,
) {
    let missiles: Vec<(Entity, Position, Missile)> = world
        .query::<(&Position, &Missile)>()
        .iter()
        .map(|(e, (p, m))| (e, *p, *m))
        .collect();
    let decoys: Vec<(Entity, Position, u32)> = world
        .query::<(&Position, &Decoy)>()
        .iter()
        .map(|(e, (p, d))| (e, *p, d.id))
        .collect();
    let mut spent_decoys: Vec<u32> = Vec::new();

    for (entity, pos, missile) in missiles {
        match missile.guidance {
            Guidance::Decoy { decoy_id } => {
                if spent_decoys.contains(&decoy_id) {
                    continue;
                }
                let hit = decoys
                    .iter()
                    .find(|(_, p, id)| *id == decoy_id && p.distance_to(&pos) <= DECOY_IMPACT_RADIUS);
                if let Some((decoy_entity, _, _)) = hit {
                    spent_decoys.push(decoy_id);
                    despawn_buffer.push(*decoy_entity);
                    despawn_buffer.push(entity);
                    events.push(SimEvent::Explosion {
                        x: pos.x,
                        y: pos.y,
                        size: EXPLOSION_SIZE_FIZZLE,
                    });
                }
            }
            Guidance::Primary => {
                let Some(target) = missile.primary_target else {
                    continue;
                };
                let Some(index) = actors.iter().position(|a| a.handle == target && a.is_live()) else {
                    continue;
                };
                if actors[index].position.distance_to(&pos) > MISSILE_HIT_RADIUS {
                    continue;
                }
                damage(world, &mut actors[index], MISSILE_DAMAGE, missile.owner, tick);
                events.push(SimEvent::Explosion {
                    x: pos.x,
                    y: pos.y,
                    size: EXPLOSION_SIZE_MISSILE,
                });
                despawn_buffer.push(entity);
            }
            Guidance::Ballistic => {}
        }
    }
}

/// Opposing airframes that touch both go down this tick.
fn resolve_airframes(world: &mut World, actors: &mut [ActorSummary], tick: u64, events: &mut Vec<SimEvent>) {
    for i in 0..actors.len() {
        for j in (i + 1)..actors.len() {
            let (a, b) = (actors[i], actors[j]);
            if !a.is_live() || !b.is_live() || a.team == b.team {
                continue;
            }
            if a.position.distance_to(&b.position) >= ACTOR_COLLISION_RADIUS {
                continue;
            }
            for (victim, other) in [(&a, &b), (&b, &a)] {
                if let Ok((health, pilot)) =
                    world.query_one_mut::<(&mut Health, &mut PilotState)>(victim.entity)
                {
                    health.current = 0.0;
                    pilot.last_attacker = Some(AttackRecord {
                        attacker: other.handle,
                        tick,
                    });
                }
            }
            actors[i].health = 0.0;
            actors[j].health = 0.0;
            events.push(SimEvent::Collision {
                a: a.handle,
                b: b.handle,
            });
            log::debug!("slots {} and {} collided", a.handle.slot, b.handle.slot);
        }
    }
}

fn damage(world: &mut World, victim: &mut ActorSummary, amount: f64, attacker: ActorHandle, tick: u64) {
    if let Ok((health, pilot)) = world.query_one_mut::<(&mut Health, &mut PilotState)>(victim.entity) {
        victim.health = health.apply_damage(amount);
        pilot.last_attacker = Some(AttackRecord { attacker, tick });
    }
}

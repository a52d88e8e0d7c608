//! Cleanup system: removes projectiles and decoys that burned out or left
//! the arena.

use hecs::{Entity, World};

use skirmish_core::components::{Bullet, Decoy, Missile};
use skirmish_core::config::Tuning;
use skirmish_core::constants::EXPLOSION_SIZE_FIZZLE;
use skirmish_core::events::SimEvent;
use skirmish_core::types::Position;

/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, tuning: &Tuning, events: &mut Vec<SimEvent>, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();
    let outside = |p: &Position| {
        p.x < 0.0 || p.y < 0.0 || p.x > tuning.world_width || p.y > tuning.world_height
    };

    for (entity, (pos, bullet)) in world.query_mut::<(&Position, &Bullet)>() {
        if bullet.lifetime == 0 || outside(pos) {
            despawn_buffer.push(entity);
        }
    }

    // Burnt-out missiles leave a puff; no damage.
    for (entity, (pos, missile)) in world.query_mut::<(&Position, &Missile)>() {
        if missile.lifetime == 0 {
            events.push(SimEvent::Explosion {
                x: pos.x,
                y: pos.y,
                size: EXPLOSION_SIZE_FIZZLE,
            });
            despawn_buffer.push(entity);
        } else if outside(pos) {
            despawn_buffer.push(entity);
        }
    }

    for (entity, decoy) in world.query_mut::<&Decoy>() {
        if decoy.lifetime == 0 {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

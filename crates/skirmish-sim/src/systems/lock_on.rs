//! Lock-on acquisition, evaluated once per tick for every actor whether or
//! not it intends to fire.
//!
//! The candidate is always the nearest live opponent. The timer only runs
//! while that same candidate stays inside the envelope; a different
//! nearest opponent, an envelope break or the target's death drop the
//! lock back to UNLOCKED in the tick it is seen.

use hecs::World;

use skirmish_core::components::{Identity, LockOn};
use skirmish_core::config::Tuning;
use skirmish_core::enums::{ActorKind, LockState};
use skirmish_core::events::SimEvent;
use skirmish_core::targeting::{find_nearest, is_within_lock_envelope};

use crate::roster::{collect_actors, find_live, ActorSummary, Roster};

pub fn run(world: &mut World, roster: &Roster, tuning: &Tuning, events: &mut Vec<SimEvent>) {
    let actors = collect_actors(world);

    for (slot, entity) in roster.iter() {
        let Some(me) = actors.get(slot as usize).copied() else {
            continue;
        };
        let Ok((id, lock)) = world.query_one_mut::<(&Identity, &mut LockOn)>(entity) else {
            continue;
        };
        let was_ready = lock.state == LockState::Ready;
        update_lock(lock, &me, &actors, tuning);

        if !was_ready && lock.state == LockState::Ready {
            log::debug!("slot {} lock READY on {:?}", id.slot, lock.target);
            if id.kind == ActorKind::Controlled {
                if let Some(target) = lock.target {
                    events.push(SimEvent::LockAcquired { target });
                }
            }
        }
    }
}

/// Advance one actor's lock state machine by one tick.
pub fn update_lock(lock: &mut LockOn, me: &ActorSummary, actors: &[ActorSummary], tuning: &Tuning) {
    if !me.is_live() {
        lock.reset();
        return;
    }

    // A stored target that has died or respawned no longer resolves.
    if let Some(target) = lock.target {
        if find_live(actors, target).is_none() {
            lock.reset();
            return;
        }
    }

    let candidate = find_nearest(
        me.position,
        actors.iter().map(|a| (a, a.position)),
        |a| a.team != me.team && a.is_live(),
    )
    .map(|(a, _)| a);

    let Some(candidate) = candidate else {
        lock.reset();
        return;
    };
    let in_envelope = is_within_lock_envelope(
        me.position,
        me.heading,
        candidate.position,
        tuning.lock_range,
        tuning.lock_cone_half_angle,
    );
    if !in_envelope {
        lock.reset();
        return;
    }

    match lock.target {
        Some(current) if current == candidate.handle => lock.timer += 1,
        Some(_) => {
            // Someone else became nearest: start over next tick.
            lock.reset();
            return;
        }
        None => {
            lock.target = Some(candidate.handle);
            lock.timer = 1;
        }
    }

    lock.state = if lock.timer > tuning.lock_ticks(me.kind) {
        LockState::Ready
    } else {
        LockState::Locking
    };
}

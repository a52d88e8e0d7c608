//! Weapons: cooldowns, empty-magazine regeneration, gun and missile fire.

use hecs::World;
use rand::Rng;

use skirmish_core::components::*;
use skirmish_core::config::Tuning;
use skirmish_core::constants::*;
use skirmish_core::enums::{ActorKind, Guidance, LockState, RefusalReason, Team, WeaponKind};
use skirmish_core::events::SimEvent;
use skirmish_core::targeting::{is_within_lock_envelope, predict_intercept};
use skirmish_core::types::{ActorHandle, Position};

use crate::controls::ControlState;
use crate::roster::{collect_actors, find_live, ActorSummary, Roster};

enum Launch {
    Round {
        owner: ActorHandle,
        team: Team,
        position: Position,
        heading: f64,
    },
    Missile {
        owner: ActorHandle,
        team: Team,
        position: Position,
        heading: f64,
        target: ActorHandle,
    },
}

pub fn run<R: Rng>(
    world: &mut World,
    roster: &Roster,
    tuning: &Tuning,
    controls: &mut ControlState,
    autopilot: bool,
    rng: &mut R,
    events: &mut Vec<SimEvent>,
) {
    let actors = collect_actors(world);
    let mut launches = Vec::new();

    for (slot, entity) in roster.iter() {
        let Some(me) = actors.get(slot as usize).copied() else {
            continue;
        };
        let Ok((arm, lock, orders)) =
            world.query_one_mut::<(&mut Armament, &mut LockOn, &PilotOrders)>(entity)
        else {
            continue;
        };

        tick_armament(arm, tuning);
        if !me.is_live() {
            continue;
        }
        let reports = me.kind == ActorKind::Controlled && !autopilot;

        if orders.fire_gun {
            match fire_gun(arm) {
                Ok(()) => {
                    let spread = rng.gen_range(-GUN_SPREAD..GUN_SPREAD);
                    launches.push(Launch::Round {
                        owner: me.handle,
                        team: me.team,
                        position: me.position,
                        heading: me.heading + spread,
                    });
                    events.push(SimEvent::GunFired { shooter: me.handle });
                }
                Err(RefusalReason::OutOfAmmo) if reports && !controls.gun_dry_reported => {
                    controls.gun_dry_reported = true;
                    events.push(SimEvent::Refused {
                        weapon: Some(WeaponKind::Gun),
                        reason: RefusalReason::OutOfAmmo,
                    });
                }
                // Held trigger between rounds.
                Err(_) => {}
            }
        }

        if orders.fire_missile {
            match fire_missile(arm, lock, &me, &actors, tuning) {
                Ok((target, heading)) => {
                    launches.push(Launch::Missile {
                        owner: me.handle,
                        team: me.team,
                        position: me.position,
                        heading,
                        target,
                    });
                    events.push(SimEvent::MissileLaunched {
                        shooter: me.handle,
                        target,
                    });
                    log::debug!("slot {slot} launched a missile at {target:?}");
                }
                Err(reason) if reports => events.push(SimEvent::Refused {
                    weapon: Some(WeaponKind::Missile),
                    reason,
                }),
                Err(_) => {}
            }
        }
    }

    for launch in launches {
        match launch {
            Launch::Round {
                owner,
                team,
                position,
                heading,
            } => {
                world.spawn((
                    position,
                    Bullet {
                        owner,
                        team,
                        heading,
                        speed: BULLET_SPEED,
                        lifetime: BULLET_LIFETIME_TICKS,
                    },
                ));
            }
            Launch::Missile {
                owner,
                team,
                position,
                heading,
                target,
            } => {
                world.spawn((
                    position,
                    Missile {
                        owner,
                        team,
                        primary_target: Some(target),
                        guidance: Guidance::Primary,
                        heading,
                        speed: MISSILE_SPEED,
                        max_turn_rate: MISSILE_TURN_RATE,
                        lifetime: MISSILE_LIFETIME_TICKS,
                    },
                ));
            }
        }
    }
}

/// Count down cooldowns and refill magazines that have sat empty long enough.
pub fn tick_armament(arm: &mut Armament, tuning: &Tuning) {
    arm.gun_cooldown = arm.gun_cooldown.saturating_sub(1);
    arm.missile_cooldown = arm.missile_cooldown.saturating_sub(1);

    if arm.gun_ammo == 0 {
        arm.gun_empty_ticks += 1;
        if arm.gun_empty_ticks >= tuning.gun_reload_ticks {
            arm.gun_ammo = arm.gun_capacity;
            arm.gun_empty_ticks = 0;
        }
    } else {
        arm.gun_empty_ticks = 0;
    }

    if arm.missile_ammo == 0 {
        arm.missile_empty_ticks += 1;
        if arm.missile_empty_ticks >= tuning.missile_reload_ticks {
            arm.missile_ammo = arm.missile_capacity;
            arm.missile_empty_ticks = 0;
        }
    } else {
        arm.missile_empty_ticks = 0;
    }
}

/// Spend one round if the gun is loaded and cool.
pub fn fire_gun(arm: &mut Armament) -> Result<(), RefusalReason> {
    if arm.gun_ammo == 0 {
        return Err(RefusalReason::OutOfAmmo);
    }
    if arm.gun_cooldown > 0 {
        return Err(RefusalReason::Cooldown);
    }
    arm.gun_ammo -= 1;
    arm.gun_cooldown = GUN_COOLDOWN_TICKS;
    Ok(())
}

/// Spend one missile on the locked target. Returns the target and the
/// launch heading toward its predicted position.
pub fn fire_missile(
    arm: &mut Armament,
    lock: &mut LockOn,
    me: &ActorSummary,
    actors: &[ActorSummary],
    tuning: &Tuning,
) -> Result<(ActorHandle, f64), RefusalReason> {
    if arm.missile_ammo == 0 {
        return Err(RefusalReason::OutOfAmmo);
    }
    if arm.missile_cooldown > 0 {
        return Err(RefusalReason::Cooldown);
    }
    if lock.state != LockState::Ready {
        return Err(RefusalReason::NoLock);
    }
    let target = lock
        .target
        .and_then(|t| find_live(actors, t))
        .ok_or(RefusalReason::NoLock)?;
    if !is_within_lock_envelope(
        me.position,
        me.heading,
        target.position,
        tuning.lock_range,
        tuning.lock_cone_half_angle,
    ) {
        return Err(RefusalReason::NoLock);
    }
    if me.position.distance_to(&target.position) < tuning.missile_min_range {
        return Err(RefusalReason::OutOfRange);
    }

    let lead = predict_intercept(
        me.position,
        target.position,
        target.heading,
        target.speed,
        MISSILE_SPEED,
    );
    arm.missile_ammo -= 1;
    arm.missile_cooldown = MISSILE_COOLDOWN_TICKS;
    lock.reset();
    Ok((target.handle, me.position.bearing_to(&lead)))
}

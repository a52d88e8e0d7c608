#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use approx::assert_abs_diff_eq;
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use skirmish_core::components::{AttackRecord, LockOn, PilotState};
    use skirmish_core::constants::*;
    use skirmish_core::enums::{ActorKind, BehaviorMode, LockState};
    use skirmish_core::types::{ActorHandle, Position};

    use crate::fsm::{evaluate, passive_flare_gate, Contact, PilotContext};
    use crate::profiles::{autopilot_profile, get_profile};

    /// Every random gate passes.
    fn always() -> StepRng {
        StepRng::new(0, 0)
    }

    /// Every random gate below certainty fails.
    fn never() -> StepRng {
        StepRng::new(u64::MAX, 0)
    }

    fn contact(slot: u32, x: f64, y: f64) -> Contact {
        Contact {
            handle: ActorHandle::new(slot, 0),
            position: Position::new(x, y),
            heading: 0.0,
            speed: 0.0,
            health: MAX_HEALTH,
        }
    }

    fn make_context<'a>(opponents: &'a [Contact]) -> PilotContext<'a> {
        PilotContext {
            profile: get_profile(ActorKind::Opponent),
            tick: 1000,
            position: Position::new(1000.0, 1000.0),
            heading: 0.0,
            memory: PilotState {
                orbit_direction: 1.0,
                ..Default::default()
            },
            lock: LockOn::default(),
            gun_ammo: GUN_AMMO_CAPACITY,
            missile_ammo: MISSILE_AMMO_CAPACITY,
            flare_ready: true,
            opponents,
            hostile_bullets: &[],
            hostile_missiles: &[],
            arena_center: Position::new(WORLD_WIDTH / 2.0, WORLD_HEIGHT / 2.0),
            aggro_window_ticks: AGGRO_WINDOW_TICKS,
        }
    }

    #[test]
    fn test_no_opponents_patrols() {
        let ctx = make_context(&[]);
        let update = evaluate(&ctx, &mut always());
        assert_eq!(update.memory.mode, BehaviorMode::Patrol);
        assert!(update.target.is_none());
        assert!(update.orders.desired_heading.is_some());
        assert!(!update.orders.fire_gun);
        assert!(!update.orders.fire_missile);
        assert_abs_diff_eq!(update.orders.throttle_target, 3.5);
        assert!(update.memory.patrol_phase > 0.0, "anchor drifts");
    }

    #[test]
    fn test_targets_nearest_opponent() {
        let opponents = [contact(11, 1800.0, 1000.0), contact(12, 1000.0, 1500.0)];
        let ctx = make_context(&opponents);
        let update = evaluate(&ctx, &mut never());
        assert_eq!(update.target, Some(ActorHandle::new(12, 0)));
        assert_eq!(update.memory.mode, BehaviorMode::Engage);
        assert!(update.mode_changed);
        assert_abs_diff_eq!(update.orders.throttle_target, 5.0);
    }

    #[test]
    fn test_distant_target_flown_at_directly() {
        // Beyond the standoff range the orbit bias is zero.
        let opponents = [contact(11, 1000.0, 1700.0)];
        let ctx = make_context(&opponents);
        let update = evaluate(&ctx, &mut never());
        assert_abs_diff_eq!(update.orders.desired_heading.unwrap(), PI / 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_close_target_gets_orbit_offset() {
        let opponents = [contact(11, 1300.0, 1000.0)];
        let ctx = make_context(&opponents);
        let update = evaluate(&ctx, &mut never());
        // d = 300, standoff = 0.5
        assert_abs_diff_eq!(
            update.orders.desired_heading.unwrap(),
            ORBIT_OFFSET * 0.5,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_breakaway_when_too_close() {
        let opponents = [contact(11, 1050.0, 1000.0)];
        let ctx = make_context(&opponents);
        let update = evaluate(&ctx, &mut never());
        assert_abs_diff_eq!(update.orders.desired_heading.unwrap().abs(), PI, epsilon = 1e-9);
    }

    #[test]
    fn test_recent_attacker_preferred() {
        let opponents = [contact(11, 1200.0, 1000.0), contact(15, 2500.0, 1000.0)];
        let mut ctx = make_context(&opponents);
        ctx.memory.last_attacker = Some(AttackRecord {
            attacker: ActorHandle::new(15, 0),
            tick: ctx.tick - 100,
        });
        let update = evaluate(&ctx, &mut never());
        assert_eq!(update.target, Some(ActorHandle::new(15, 0)));
    }

    #[test]
    fn test_stale_attacker_ignored() {
        let opponents = [contact(11, 1200.0, 1000.0), contact(15, 2500.0, 1000.0)];
        let mut ctx = make_context(&opponents);
        ctx.memory.last_attacker = Some(AttackRecord {
            attacker: ActorHandle::new(15, 0),
            tick: ctx.tick - AGGRO_WINDOW_TICKS - 1,
        });
        let update = evaluate(&ctx, &mut never());
        assert_eq!(update.target, Some(ActorHandle::new(11, 0)));
    }

    #[test]
    fn test_dead_attacker_ignored() {
        // Attacker has since respawned: same slot, newer generation.
        let mut respawned = contact(15, 1100.0, 1000.0);
        respawned.handle = ActorHandle::new(15, 1);
        let opponents = [contact(11, 1200.0, 1000.0), respawned];
        let mut ctx = make_context(&opponents);
        ctx.memory.last_attacker = Some(AttackRecord {
            attacker: ActorHandle::new(15, 0),
            tick: ctx.tick - 10,
        });
        let update = evaluate(&ctx, &mut never());
        assert_eq!(update.target, Some(ActorHandle::new(15, 1)), "nearest wins");
    }

    #[test]
    fn test_missile_nearby_triggers_evasion_and_flares() {
        let missiles = [Position::new(900.0, 1000.0)];
        let mut ctx = make_context(&[]);
        ctx.hostile_missiles = &missiles;
        let update = evaluate(&ctx, &mut always());
        assert_eq!(update.memory.mode, BehaviorMode::Evade);
        assert!(update.orders.deploy_decoys);
        // Jink started: +offset, minimum cooldown.
        assert_abs_diff_eq!(update.memory.dodge_offset, DODGE_OFFSET);
        assert_eq!(update.memory.dodge_cooldown, DODGE_MIN_COOLDOWN_TICKS);
        // Running away from the missile (bearing 0) plus the jink.
        assert_abs_diff_eq!(update.orders.desired_heading.unwrap(), DODGE_OFFSET, epsilon = 1e-9);
    }

    #[test]
    fn test_no_flares_while_recharging() {
        let missiles = [Position::new(900.0, 1000.0)];
        let mut ctx = make_context(&[]);
        ctx.hostile_missiles = &missiles;
        ctx.flare_ready = false;
        let update = evaluate(&ctx, &mut always());
        assert!(!update.orders.deploy_decoys);
        assert_eq!(update.memory.mode, BehaviorMode::Evade);
    }

    #[test]
    fn test_bullets_nearby_evade_without_flares() {
        let bullets = [Position::new(1100.0, 1000.0)];
        let mut ctx = make_context(&[]);
        ctx.hostile_bullets = &bullets;
        let update = evaluate(&ctx, &mut always());
        assert_eq!(update.memory.mode, BehaviorMode::Evade);
        assert!(!update.orders.deploy_decoys);
    }

    #[test]
    fn test_out_of_ammo_still_evades() {
        let opponents = [contact(11, 1300.0, 1000.0)];
        let missiles = [Position::new(1000.0, 1100.0)];
        let mut ctx = make_context(&opponents);
        ctx.hostile_missiles = &missiles;
        ctx.gun_ammo = 0;
        ctx.missile_ammo = 0;
        let update = evaluate(&ctx, &mut always());
        assert_eq!(update.memory.mode, BehaviorMode::Evade);
        assert!(!update.orders.fire_gun);
        assert!(!update.orders.fire_missile);
    }

    #[test]
    fn test_gun_fires_when_aligned_and_in_range() {
        let opponents = [contact(11, 1500.0, 1000.0)];
        let ctx = make_context(&opponents);
        assert!(evaluate(&ctx, &mut always()).orders.fire_gun);
        assert!(!evaluate(&ctx, &mut never()).orders.fire_gun, "chance gate");

        let mut empty = make_context(&opponents);
        empty.gun_ammo = 0;
        assert!(!evaluate(&empty, &mut always()).orders.fire_gun);

        let mut off_axis = make_context(&opponents);
        off_axis.heading = PI / 2.0;
        assert!(!evaluate(&off_axis, &mut always()).orders.fire_gun);

        let far = [contact(11, 1900.0, 1000.0)];
        let ctx = make_context(&far);
        assert!(!evaluate(&ctx, &mut always()).orders.fire_gun, "beyond gun range");
    }

    #[test]
    fn test_gun_aims_at_lead_point() {
        // Crossing target fast enough that its lead point is well off the nose.
        let mut crossing = contact(11, 1500.0, 1000.0);
        crossing.heading = PI / 2.0;
        crossing.speed = 16.0;
        let opponents = [crossing];
        let ctx = make_context(&opponents);
        // Lead is 500 units down-range, 45° off the nose.
        assert!(!evaluate(&ctx, &mut always()).orders.fire_gun);
    }

    #[test]
    fn test_missile_requires_ready_lock() {
        let opponents = [contact(11, 1600.0, 1000.0)];
        let mut ctx = make_context(&opponents);
        assert!(!evaluate(&ctx, &mut always()).orders.fire_missile);

        ctx.lock = LockOn {
            state: LockState::Ready,
            target: Some(ActorHandle::new(11, 0)),
            timer: 121,
        };
        assert!(evaluate(&ctx, &mut always()).orders.fire_missile);
        assert!(!evaluate(&ctx, &mut never()).orders.fire_missile);

        ctx.missile_ammo = 0;
        assert!(!evaluate(&ctx, &mut always()).orders.fire_missile);
    }

    #[test]
    fn test_autopilot_holds_missiles_on_weak_targets() {
        let mut weak = contact(11, 1600.0, 1000.0);
        weak.health = 20.0;
        let opponents = [weak];
        let mut ctx = make_context(&opponents);
        ctx.profile = autopilot_profile();
        ctx.lock = LockOn {
            state: LockState::Ready,
            target: Some(ActorHandle::new(11, 0)),
            timer: 91,
        };
        assert!(!evaluate(&ctx, &mut always()).orders.fire_missile);
    }

    #[test]
    fn test_dodge_offset_decays_and_snaps() {
        let mut ctx = make_context(&[]);
        ctx.memory.dodge_offset = 0.5;
        ctx.memory.dodge_cooldown = 3;
        let update = evaluate(&ctx, &mut never());
        assert_abs_diff_eq!(update.memory.dodge_offset, 0.45, epsilon = 1e-12);
        assert_eq!(update.memory.dodge_cooldown, 2);

        ctx.memory.dodge_offset = 0.011;
        let update = evaluate(&ctx, &mut never());
        assert_eq!(update.memory.dodge_offset, 0.0);
    }

    #[test]
    fn test_jink_waits_for_cooldown() {
        let bullets = [Position::new(1050.0, 1000.0)];
        let mut ctx = make_context(&[]);
        ctx.hostile_bullets = &bullets;
        ctx.memory.dodge_cooldown = 10;
        let update = evaluate(&ctx, &mut always());
        assert_eq!(update.memory.dodge_offset, 0.0);
        assert_eq!(update.memory.dodge_cooldown, 9);
    }

    #[test]
    fn test_passive_flare_gate() {
        assert!(passive_flare_gate(Some(200.0), true, &mut always()));
        assert!(!passive_flare_gate(Some(260.0), true, &mut always()));
        assert!(!passive_flare_gate(Some(200.0), false, &mut always()));
        assert!(!passive_flare_gate(None, true, &mut always()));
        assert!(!passive_flare_gate(Some(200.0), true, &mut never()));
    }

    #[test]
    fn test_seeded_decisions_repeat() {
        let opponents = [contact(11, 1400.0, 1100.0), contact(12, 900.0, 1600.0)];
        let bullets = [Position::new(1080.0, 1000.0)];
        let mut ctx = make_context(&opponents);
        ctx.hostile_bullets = &bullets;

        let run = |seed: u64| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            (0..50)
                .map(|_| {
                    let u = evaluate(&ctx, &mut rng);
                    (u.orders.fire_gun, u.memory.dodge_cooldown)
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(run(7), run(7));
    }

    #[test]
    fn test_profiles_differ_by_kind() {
        let opp = get_profile(ActorKind::Opponent);
        let ally = get_profile(ActorKind::Ally);
        assert!(ally.max_turn_rate > opp.max_turn_rate);
        assert!(opp.gun_range > ally.gun_range);
        assert_eq!(get_profile(ActorKind::Controlled), autopilot_profile());
    }
}

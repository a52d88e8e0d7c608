#[cfg(test)]
mod tests {
    use crate::commands::PlayerCommand;
    use crate::components::{Armament, Health, LockOn};
    use crate::enums::*;
    use crate::events::SimEvent;
    use crate::state::ArenaSnapshot;
    use crate::types::{ActorHandle, Position, SimTime, Velocity};

    #[test]
    fn test_lock_state_serde() {
        for v in [LockState::Unlocked, LockState::Locking, LockState::Ready] {
            let json = serde_json::to_string(&v).unwrap();
            let back: LockState = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }
    }

    #[test]
    fn test_guidance_serde() {
        for v in [
            Guidance::Primary,
            Guidance::Decoy { decoy_id: 12 },
            Guidance::Ballistic,
        ] {
            let json = serde_json::to_string(&v).unwrap();
            let back: Guidance = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }
    }

    #[test]
    fn test_player_command_json_shape() {
        let json = r#"{"type":"TurnLeft","held":true}"#;
        let cmd: PlayerCommand = serde_json::from_str(json).unwrap();
        assert_eq!(cmd, PlayerCommand::TurnLeft { held: true });

        let cmd: PlayerCommand = serde_json::from_str(r#"{"type":"DeployDecoys"}"#).unwrap();
        assert_eq!(cmd, PlayerCommand::DeployDecoys);

        let json = serde_json::to_string(&PlayerCommand::SetTimeScale { scale: 2.0 }).unwrap();
        assert!(json.contains("\"type\":\"SetTimeScale\""));
    }

    #[test]
    fn test_event_serde() {
        let events = vec![
            SimEvent::Explosion {
                x: 10.0,
                y: 20.0,
                size: 100.0,
            },
            SimEvent::Refused {
                weapon: Some(WeaponKind::Missile),
                reason: RefusalReason::NoLock,
            },
            SimEvent::ActorDestroyed {
                actor: ActorHandle::new(3, 1),
                kind: ActorKind::Opponent,
                killer: None,
            },
        ];
        for event in events {
            let json = serde_json::to_string(&event).unwrap();
            let back: SimEvent = serde_json::from_str(&json).unwrap();
            assert_eq!(event, back);
        }
    }

    #[test]
    fn test_kind_team_mapping() {
        assert_eq!(ActorKind::Controlled.team(), Team::Allied);
        assert_eq!(ActorKind::Ally.team(), Team::Allied);
        assert_eq!(ActorKind::Opponent.team(), Team::Opposing);
        assert_eq!(Team::Allied.opponent(), Team::Opposing);
        assert!(!ActorKind::Controlled.is_autonomous());
    }

    #[test]
    fn test_health_clamped_on_damage() {
        let mut health = Health::full(100.0);
        assert_eq!(health.apply_damage(30.0), 70.0);
        assert_eq!(health.apply_damage(500.0), 0.0);
        assert!(!health.is_alive());
        // Negative damage never heals past max.
        let mut health = Health::full(100.0);
        assert_eq!(health.apply_damage(-50.0), 100.0);
    }

    #[test]
    fn test_lock_reset_clears_target() {
        let mut lock = LockOn {
            state: LockState::Ready,
            target: Some(ActorHandle::new(4, 0)),
            timer: 130,
        };
        lock.reset();
        assert_eq!(lock.state, LockState::Unlocked);
        assert!(lock.target.is_none());
        assert_eq!(lock.timer, 0);
    }

    #[test]
    fn test_full_armament() {
        let arm = Armament::full(200, 4);
        assert_eq!(arm.gun_ammo, 200);
        assert_eq!(arm.missile_ammo, 4);
        assert_eq!(arm.gun_cooldown, 0);
    }

    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        for _ in 0..60 {
            time.advance();
        }
        assert_eq!(time.tick, 60);
        assert!((time.elapsed_secs - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_velocity_from_heading() {
        let v = Velocity::from_heading(std::f64::consts::FRAC_PI_2, 3.0);
        assert!(v.x.abs() < 1e-12);
        assert!((v.y - 3.0).abs() < 1e-12);
        assert!((v.speed() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_snapshot_serializes() {
        let snap = ArenaSnapshot::default();
        let json = serde_json::to_string(&snap).unwrap();
        let back: ArenaSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.phase, GamePhase::Briefing);
        assert!(back.actors.is_empty());
    }

    #[test]
    fn test_position_distance() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, 4.0);
        assert_eq!(a.distance_to(&b), 5.0);
    }
}

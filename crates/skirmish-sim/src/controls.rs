//! Latched player input for the controlled actor.
//!
//! Held controls stay set between their press and release commands;
//! edge-triggered actions are consumed by the first system that reads them.

use skirmish_core::commands::PlayerCommand;

#[derive(Debug, Clone, Default)]
pub struct ControlState {
    pub turn_left: bool,
    pub turn_right: bool,
    pub throttle_up: bool,
    pub throttle_down: bool,
    pub fire_gun: bool,
    pub fire_missile: bool,
    pub deploy_decoys: bool,
    /// An empty-gun refusal was already reported for the current trigger pull.
    pub gun_dry_reported: bool,
}

impl ControlState {
    /// Apply a flight or weapon command. Returns false for commands that
    /// are not player controls.
    pub fn apply(&mut self, command: &PlayerCommand) -> bool {
        match *command {
            PlayerCommand::TurnLeft { held } => self.turn_left = held,
            PlayerCommand::TurnRight { held } => self.turn_right = held,
            PlayerCommand::ThrottleUp { held } => self.throttle_up = held,
            PlayerCommand::ThrottleDown { held } => self.throttle_down = held,
            PlayerCommand::FireGun { held } => {
                self.fire_gun = held;
                if !held {
                    self.gun_dry_reported = false;
                }
            }
            PlayerCommand::FireMissile => self.fire_missile = true,
            PlayerCommand::DeployDecoys => self.deploy_decoys = true,
            _ => return false,
        }
        true
    }

    /// Drop edge-triggered actions nobody consumed this tick.
    pub fn end_tick(&mut self) {
        self.fire_missile = false;
        self.deploy_decoys = false;
    }

    /// Net turn input: +1 clockwise (right), -1 counter-clockwise (left).
    pub fn turn_axis(&self) -> f64 {
        match (self.turn_left, self.turn_right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }

    pub fn release_all(&mut self) {
        *self = ControlState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_held_controls_latch_until_release() {
        let mut controls = ControlState::default();
        controls.apply(&PlayerCommand::TurnLeft { held: true });
        assert_eq!(controls.turn_axis(), -1.0);
        controls.end_tick();
        assert_eq!(controls.turn_axis(), -1.0);
        controls.apply(&PlayerCommand::TurnRight { held: true });
        assert_eq!(controls.turn_axis(), 0.0, "opposing keys cancel");
        controls.apply(&PlayerCommand::TurnLeft { held: false });
        assert_eq!(controls.turn_axis(), 1.0);
    }

    #[test]
    fn test_edge_actions_cleared_at_end_of_tick() {
        let mut controls = ControlState::default();
        assert!(controls.apply(&PlayerCommand::FireMissile));
        assert!(controls.apply(&PlayerCommand::DeployDecoys));
        controls.end_tick();
        assert!(!controls.fire_missile);
        assert!(!controls.deploy_decoys);
        assert!(!controls.apply(&PlayerCommand::Pause));
    }

    #[test]
    fn test_trigger_release_rearms_dry_report() {
        let mut controls = ControlState {
            gun_dry_reported: true,
            ..Default::default()
        };
        controls.apply(&PlayerCommand::FireGun { held: false });
        assert!(!controls.gun_dry_reported);
    }
}

//! Runtime tuning loaded from JSON.
//!
//! Every field falls back to the compiled default from [`crate::constants`],
//! so a config file only needs to name what it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;
use crate::enums::{ActorKind, EdgePolicy};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Parameters of the inertial steering model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TurnInertia {
    /// Largest change of turn velocity per tick.
    pub accel: f64,
    /// Multiplier applied to turn velocity after each tick, in (0, 1].
    pub damping: f64,
}

impl Default for TurnInertia {
    fn default() -> Self {
        Self {
            accel: TURN_ACCEL,
            damping: TURN_DAMPING,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub world_width: f64,
    pub world_height: f64,
    pub ally_count: u32,
    pub opponent_count: u32,

    pub lock_range: f64,
    pub lock_cone_half_angle: f64,
    pub controlled_lock_ticks: u32,
    pub autonomous_lock_ticks: u32,
    pub missile_min_range: f64,

    pub gun_reload_ticks: u32,
    pub missile_reload_ticks: u32,

    pub aggro_window_ticks: u64,
    pub decoy_redirect_radius: f64,

    pub controlled_edge_policy: EdgePolicy,
    pub autonomous_edge_policy: EdgePolicy,
    /// Inertial steering for autonomous actors; `None` turns directly.
    pub turn_inertia: Option<TurnInertia>,

    pub controlled_respawn_delay_ticks: u32,
    pub separation_distance: f64,
    pub separation_strength: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            ally_count: DEFAULT_ALLY_COUNT,
            opponent_count: DEFAULT_OPPONENT_COUNT,
            lock_range: LOCK_RANGE,
            lock_cone_half_angle: LOCK_CONE_HALF_ANGLE,
            controlled_lock_ticks: CONTROLLED_LOCK_TICKS,
            autonomous_lock_ticks: AUTONOMOUS_LOCK_TICKS,
            missile_min_range: MISSILE_MIN_RANGE,
            gun_reload_ticks: GUN_RELOAD_TICKS,
            missile_reload_ticks: MISSILE_RELOAD_TICKS,
            aggro_window_ticks: AGGRO_WINDOW_TICKS,
            decoy_redirect_radius: DECOY_REDIRECT_RADIUS,
            controlled_edge_policy: EdgePolicy::Bounce,
            autonomous_edge_policy: EdgePolicy::Avoid {
                buffer: EDGE_AVOID_BUFFER,
            },
            turn_inertia: Some(TurnInertia::default()),
            controlled_respawn_delay_ticks: CONTROLLED_RESPAWN_DELAY_TICKS,
            separation_distance: SEPARATION_DISTANCE,
            separation_strength: SEPARATION_STRENGTH,
        }
    }
}

impl Tuning {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Lock threshold for an actor of the given kind.
    pub fn lock_ticks(&self, kind: ActorKind) -> u32 {
        if kind.is_autonomous() {
            self.autonomous_lock_ticks
        } else {
            self.controlled_lock_ticks
        }
    }

    pub fn edge_policy(&self, kind: ActorKind) -> EdgePolicy {
        if kind.is_autonomous() {
            self.autonomous_edge_policy
        } else {
            self.controlled_edge_policy
        }
    }

    /// Roster size including the controlled actor.
    pub fn roster_size(&self) -> u32 {
        1 + self.ally_count + self.opponent_count
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        at_least("world_width", self.world_width, MIN_WORLD_SIZE)?;
        at_least("world_height", self.world_height, MIN_WORLD_SIZE)?;
        positive("lock_range", self.lock_range)?;
        if !(self.lock_cone_half_angle > 0.0 && self.lock_cone_half_angle <= std::f64::consts::PI) {
            return Err(invalid(
                "lock_cone_half_angle",
                format!("must be in (0, π], got {}", self.lock_cone_half_angle),
            ));
        }
        if self.controlled_lock_ticks == 0 {
            return Err(invalid("controlled_lock_ticks", "must be at least 1"));
        }
        if self.autonomous_lock_ticks == 0 {
            return Err(invalid("autonomous_lock_ticks", "must be at least 1"));
        }
        non_negative("missile_min_range", self.missile_min_range)?;
        non_negative("decoy_redirect_radius", self.decoy_redirect_radius)?;
        non_negative("separation_distance", self.separation_distance)?;
        non_negative("separation_strength", self.separation_strength)?;

        for (field, policy) in [
            ("controlled_edge_policy", self.controlled_edge_policy),
            ("autonomous_edge_policy", self.autonomous_edge_policy),
        ] {
            if let EdgePolicy::Avoid { buffer } = policy {
                let half = self.world_width.min(self.world_height) / 2.0;
                if !(buffer >= 0.0 && buffer < half) {
                    return Err(invalid(
                        field,
                        format!("avoid buffer must be in [0, {half}), got {buffer}"),
                    ));
                }
            }
        }

        if let Some(inertia) = self.turn_inertia {
            positive("turn_inertia.accel", inertia.accel)?;
            if !(inertia.damping > 0.0 && inertia.damping <= 1.0) {
                return Err(invalid(
                    "turn_inertia.damping",
                    format!("must be in (0, 1], got {}", inertia.damping),
                ));
            }
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, format!("must be positive, got {value}")))
    }
}

fn at_least(field: &'static str, value: f64, min: f64) -> Result<(), ConfigError> {
    if value >= min && value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, format!("must be at least {min}, got {value}")))
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, format!("must not be negative, got {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json_str(r#"{ "ally_count": 2, "opponent_count": 3 }"#).unwrap();
        assert_eq!(tuning.ally_count, 2);
        assert_eq!(tuning.opponent_count, 3);
        assert_eq!(tuning.roster_size(), 6);
        assert_eq!(tuning.controlled_lock_ticks, CONTROLLED_LOCK_TICKS);
        assert_eq!(tuning.controlled_edge_policy, EdgePolicy::Bounce);
    }

    #[test]
    fn test_edge_policy_json_shape() {
        let tuning = Tuning::from_json_str(
            r#"{ "autonomous_edge_policy": { "policy": "Avoid", "buffer": 350.0 }, "turn_inertia": null }"#,
        )
        .unwrap();
        assert_eq!(
            tuning.edge_policy(ActorKind::Opponent),
            EdgePolicy::Avoid { buffer: 350.0 }
        );
        assert!(tuning.turn_inertia.is_none());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = Tuning::from_json_str(r#"{ "lock_range": -5.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "lock_range", .. }));

        let err = Tuning::from_json_str(r#"{ "turn_inertia": { "accel": 0.02, "damping": 1.5 } }"#)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "turn_inertia.damping",
                ..
            }
        ));

        // Too small to hold the airfields.
        let err = Tuning::from_json_str(
            r#"{ "world_width": 1.5, "world_height": 1.5, "autonomous_edge_policy": { "policy": "Bounce" } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "world_width", .. }));

        let err = Tuning::from_json_str(r#"{ "world_height": 899.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "world_height", .. }));

        let tuning = Tuning::from_json_str(r#"{ "world_width": 900.0, "world_height": 900.0 }"#);
        assert!(tuning.is_ok());
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = Tuning::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Tuning::load("/nonexistent/skirmish-tuning.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}

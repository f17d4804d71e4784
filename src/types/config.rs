//! Game configuration
//!
//! The many shipped revisions of the game differ only in timings and
//! tap-window policy; those knobs live here so one controller covers
//! every variant.

use crate::types::{GameError, GameState};
use crate::{DEFAULT_DELAY_MAX_MS, DEFAULT_DELAY_MIN_MS, DEFAULT_RESULT_HOLD_MS};
use serde::{Deserialize, Serialize};

/// What happens when a tap arrives before the go-signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FalseStartPolicy {
    /// Silent no-op, the session keeps running (strict reading)
    #[default]
    Ignore,
    /// End the session immediately with no score (race-start rules)
    Resolve,
}

impl std::fmt::Display for FalseStartPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FalseStartPolicy::Ignore => write!(f, "ignore"),
            FalseStartPolicy::Resolve => write!(f, "resolve"),
        }
    }
}

impl std::str::FromStr for FalseStartPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ignore" => Ok(FalseStartPolicy::Ignore),
            "resolve" => Ok(FalseStartPolicy::Resolve),
            other => Err(format!("unknown false-start policy '{}'", other)),
        }
    }
}

/// Timing and policy knobs for the reaction controller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Lower bound for the randomized go-signal delay (ms, inclusive)
    pub delay_min_ms: u64,
    /// Upper bound for the randomized go-signal delay (ms, inclusive)
    pub delay_max_ms: u64,
    /// Bound on the tap wait once the window opens; None = unbounded,
    /// matching every shipped revision
    pub go_timeout_ms: Option<u64>,
    /// Early-tap handling
    pub false_start_policy: FalseStartPolicy,
    /// How long the result cue holds before the result screen (ms)
    pub result_hold_ms: u64,
    /// RNG seed for reproducible delay draws; None = entropy
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            delay_min_ms: DEFAULT_DELAY_MIN_MS,
            delay_max_ms: DEFAULT_DELAY_MAX_MS,
            go_timeout_ms: None,
            false_start_policy: FalseStartPolicy::default(),
            result_hold_ms: DEFAULT_RESULT_HOLD_MS,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Check bound ordering
    pub fn validate(&self) -> Result<(), GameError> {
        if self.delay_min_ms > self.delay_max_ms {
            return Err(GameError::InvalidConfig {
                field: "delay_min_ms",
                message: format!(
                    "delay_min_ms ({}) exceeds delay_max_ms ({})",
                    self.delay_min_ms, self.delay_max_ms
                ),
            });
        }
        if let Some(timeout) = self.go_timeout_ms {
            if timeout == 0 {
                return Err(GameError::InvalidConfig {
                    field: "go_timeout_ms",
                    message: "go_timeout_ms must be positive when set".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Whether a tap in `state` would be scored, ignored or penalized
    pub fn tap_disposition(&self, state: GameState) -> TapDisposition {
        match state {
            GameState::GoSignaled => TapDisposition::Score,
            GameState::Armed | GameState::WaitingForGo => match self.false_start_policy {
                FalseStartPolicy::Ignore => TapDisposition::Ignore,
                FalseStartPolicy::Resolve => TapDisposition::FalseStart,
            },
            _ => TapDisposition::Ignore,
        }
    }
}

/// Outcome of a tap given the current state and policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapDisposition {
    /// Tap window open, record the reaction time
    Score,
    /// Outside the window, drop silently
    Ignore,
    /// Before the go-signal with the resolve policy, end the session
    FalseStart,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bounds_are_ordered() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.delay_min_ms <= config.delay_max_ms);
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let config = GameConfig {
            delay_min_ms: 500,
            delay_max_ms: 100,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = GameConfig {
            go_timeout_ms: Some(0),
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_tap_disposition_follows_policy() {
        let strict = GameConfig::default();
        assert_eq!(
            strict.tap_disposition(GameState::Armed),
            TapDisposition::Ignore
        );
        assert_eq!(
            strict.tap_disposition(GameState::GoSignaled),
            TapDisposition::Score
        );

        let penalizing = GameConfig {
            false_start_policy: FalseStartPolicy::Resolve,
            ..GameConfig::default()
        };
        assert_eq!(
            penalizing.tap_disposition(GameState::WaitingForGo),
            TapDisposition::FalseStart
        );
        assert_eq!(
            penalizing.tap_disposition(GameState::Idle),
            TapDisposition::Ignore
        );
    }
}

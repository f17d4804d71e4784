//! Error taxonomy
//!
//! Only hard failures live here. Invalid transitions and stale timer
//! callbacks are expected during normal play (a queued tap right after
//! a retry) and are surfaced as `ReasonCode` no-ops, never as errors.

use thiserror::Error;

/// Hard failures of the reaction controller and its collaborators
#[derive(Debug, Error)]
pub enum GameError {
    /// The cue player failed to prepare or play. Fatal to the session
    /// (controller returns to IDLE), not to the process.
    #[error("cue playback failed: {0}")]
    CuePlayback(String),

    /// A configuration value is out of range
    #[error("invalid config ({field}): {message}")]
    InvalidConfig {
        field: &'static str,
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = GameError::CuePlayback("decode failed".to_string());
        assert_eq!(err.to_string(), "cue playback failed: decode failed");

        let err = GameError::InvalidConfig {
            field: "delay_min_ms",
            message: "out of range".to_string(),
        };
        assert!(err.to_string().contains("delay_min_ms"));
    }
}

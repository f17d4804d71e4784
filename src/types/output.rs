//! Output structures for terminal display

use crate::types::{GameState, ReactionSession, ReasonCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot returned by every controller operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateOutput {
    /// Timestamp
    pub timestamp: DateTime<Utc>,
    /// Current state
    pub state: GameState,
    /// Measured reaction time, if resolved (milliseconds)
    pub elapsed_ms: Option<u64>,
    /// Reason for current state
    pub reason: ReasonCode,
    /// Is a result on screen?
    pub result_available: bool,
}

impl StateOutput {
    /// Create new output
    pub fn new(state: GameState, elapsed_ms: Option<u64>, reason: ReasonCode) -> Self {
        Self {
            timestamp: Utc::now(),
            state,
            elapsed_ms,
            reason,
            result_available: state == GameState::Resolved,
        }
    }

    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let color = self.state.color_code();
        let reset = GameState::color_reset();

        format!(
            "{}state={} | elapsed={} | {}{}",
            color,
            self.state,
            ReactionSession::format_elapsed(self.elapsed_ms),
            self.reason.code(),
            reset
        )
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "state={} | elapsed={} | reason={}",
            self.state,
            ReactionSession::format_elapsed(self.elapsed_ms),
            self.reason.code()
        )
    }
}

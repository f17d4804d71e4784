//! Reason codes for state changes and rejected actions
//!
//! Every controller operation returns a code: transitions, status
//! holds, and the benign no-ops (invalid transitions, stale timers)
//! that the game treats as expected rather than as errors.

use serde::{Deserialize, Serialize};

/// Reason codes for all state changes and decisions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum ReasonCode {
    // =========================================================================
    // R001: Session progress
    // =========================================================================
    /// Session created, cue playing
    R001_SESSION_ARMED,
    /// Cue released, delay drawn
    R001_CUE_RELEASED,
    /// Delay elapsed, tap window open
    R001_GO_SIGNALED,
    /// Tap scored, session resolved
    R001_TAP_SCORED,
    /// Tap wait exceeded the configured timeout, resolved without a score
    R001_GO_TIMED_OUT,

    // =========================================================================
    // R002: Status (no transition)
    // =========================================================================
    /// Idle, waiting for start
    R002_STATE_IDLE,
    /// Cue still running
    R002_STATE_ARMED,
    /// Delay still pending
    R002_STATE_WAITING,
    /// Tap window open, waiting for tap
    R002_STATE_GO,
    /// Result on screen
    R002_STATE_RESOLVED,

    // =========================================================================
    // R003: Rejected actions (silent no-ops)
    // =========================================================================
    /// start() while the cue player is not ready
    R003_CUE_NOT_READY,
    /// start() outside IDLE
    R003_ALREADY_RUNNING,
    /// Tap before the go-signal, ignored by policy
    R003_TAP_BEFORE_GO,
    /// Tap before the go-signal, resolved as a false start by policy
    R003_FALSE_START,
    /// Action invoked in a state that does not permit it
    R003_INVALID_TRANSITION,

    // =========================================================================
    // R004: Stale callbacks
    // =========================================================================
    /// Go-delay timer from a superseded session, dropped
    R004_STALE_TIMER,
    /// Event arrived after teardown, dropped
    R004_AFTER_TEARDOWN,

    // =========================================================================
    // R005: Resets
    // =========================================================================
    /// retry() - session cleared, back to IDLE
    R005_RETRY_RESET,
    /// teardown() - controller terminated
    R005_TEARDOWN,
    /// Cue playback failed, session aborted
    R005_PLAYBACK_ERROR,
}

impl ReasonCode {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::R001_SESSION_ARMED => "R001_SESSION_ARMED",
            Self::R001_CUE_RELEASED => "R001_CUE_RELEASED",
            Self::R001_GO_SIGNALED => "R001_GO_SIGNALED",
            Self::R001_TAP_SCORED => "R001_TAP_SCORED",
            Self::R001_GO_TIMED_OUT => "R001_GO_TIMED_OUT",
            Self::R002_STATE_IDLE => "R002_STATE_IDLE",
            Self::R002_STATE_ARMED => "R002_STATE_ARMED",
            Self::R002_STATE_WAITING => "R002_STATE_WAITING",
            Self::R002_STATE_GO => "R002_STATE_GO",
            Self::R002_STATE_RESOLVED => "R002_STATE_RESOLVED",
            Self::R003_CUE_NOT_READY => "R003_CUE_NOT_READY",
            Self::R003_ALREADY_RUNNING => "R003_ALREADY_RUNNING",
            Self::R003_TAP_BEFORE_GO => "R003_TAP_BEFORE_GO",
            Self::R003_FALSE_START => "R003_FALSE_START",
            Self::R003_INVALID_TRANSITION => "R003_INVALID_TRANSITION",
            Self::R004_STALE_TIMER => "R004_STALE_TIMER",
            Self::R004_AFTER_TEARDOWN => "R004_AFTER_TEARDOWN",
            Self::R005_RETRY_RESET => "R005_RETRY_RESET",
            Self::R005_TEARDOWN => "R005_TEARDOWN",
            Self::R005_PLAYBACK_ERROR => "R005_PLAYBACK_ERROR",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::R001_SESSION_ARMED => "Cue playing",
            Self::R001_CUE_RELEASED => "Cue released, delay running",
            Self::R001_GO_SIGNALED => "Lights out - tap window open",
            Self::R001_TAP_SCORED => "Tap scored",
            Self::R001_GO_TIMED_OUT => "Tap window timed out",
            Self::R002_STATE_IDLE => "Idle",
            Self::R002_STATE_ARMED => "Cue still running",
            Self::R002_STATE_WAITING => "Delay pending",
            Self::R002_STATE_GO => "Waiting for tap",
            Self::R002_STATE_RESOLVED => "Result available",
            Self::R003_CUE_NOT_READY => "Cue player not ready",
            Self::R003_ALREADY_RUNNING => "Session already running",
            Self::R003_TAP_BEFORE_GO => "Tap before go-signal ignored",
            Self::R003_FALSE_START => "False start",
            Self::R003_INVALID_TRANSITION => "Action not valid in this state",
            Self::R004_STALE_TIMER => "Stale go-delay timer dropped",
            Self::R004_AFTER_TEARDOWN => "Controller already torn down",
            Self::R005_RETRY_RESET => "Session reset",
            Self::R005_TEARDOWN => "Controller terminated",
            Self::R005_PLAYBACK_ERROR => "Cue playback failed",
        }
    }

    /// True for codes that record a rejected or dropped action
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::R003_CUE_NOT_READY
                | Self::R003_ALREADY_RUNNING
                | Self::R003_TAP_BEFORE_GO
                | Self::R003_INVALID_TRANSITION
                | Self::R004_STALE_TIMER
                | Self::R004_AFTER_TEARDOWN
        )
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}

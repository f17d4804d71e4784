//! Per-attempt session record
//!
//! One `ReactionSession` exists per attempt, created on the transition
//! into ARMED and dropped on retry or teardown. All timestamps are
//! milliseconds on the controller's monotonic clock.

use serde::{Deserialize, Serialize};

/// Timing record for a single attempt
///
/// Invariants:
/// - `tap_registered_at` is set at most once, and only while the
///   tap window was open
/// - `elapsed_ms == tap_registered_at - go_signaled_at` whenever both
///   are set, and is never negative
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactionSession {
    /// Generation counter, bumped on every new session.
    /// Stale timer callbacks carry an older generation and are dropped.
    pub generation: u64,
    /// When the cue started playing (ms, monotonic)
    pub cue_started_at: Option<u64>,
    /// When the go-signal fired (ms, monotonic)
    pub go_signaled_at: Option<u64>,
    /// When the tap was registered (ms, monotonic)
    pub tap_registered_at: Option<u64>,
    /// Measured reaction time (ms)
    pub elapsed_ms: Option<u64>,
    /// Tap arrived before the go-signal and the policy resolved it
    pub false_start: bool,
}

impl ReactionSession {
    /// Create a fresh session for the given generation
    pub fn new(generation: u64) -> Self {
        Self {
            generation,
            cue_started_at: None,
            go_signaled_at: None,
            tap_registered_at: None,
            elapsed_ms: None,
            false_start: false,
        }
    }

    /// Record the go-signal instant
    pub fn signal_go(&mut self, now_ms: u64) {
        self.go_signaled_at = Some(now_ms);
    }

    /// Record the tap and compute the elapsed time.
    /// Returns the elapsed milliseconds, or None if the go-signal was
    /// never recorded or a tap was already registered.
    pub fn register_tap(&mut self, now_ms: u64) -> Option<u64> {
        if self.tap_registered_at.is_some() {
            return None;
        }
        let go_at = self.go_signaled_at?;
        // Monotonic clock, so now_ms >= go_at; saturate regardless
        let elapsed = now_ms.saturating_sub(go_at);
        self.tap_registered_at = Some(now_ms);
        self.elapsed_ms = Some(elapsed);
        Some(elapsed)
    }

    /// Format an elapsed time as seconds with three decimals,
    /// `--` when absent (the result screen's placeholder)
    pub fn format_elapsed(elapsed_ms: Option<u64>) -> String {
        match elapsed_ms {
            Some(ms) => format!("{:.3}s", ms as f64 / crate::MS_PER_SEC),
            None => "--".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_is_tap_minus_go() {
        let mut session = ReactionSession::new(1);
        session.signal_go(500);
        let elapsed = session.register_tap(730);
        assert_eq!(elapsed, Some(230));
        assert_eq!(session.elapsed_ms, Some(230));
        assert_eq!(session.tap_registered_at, Some(730));
    }

    #[test]
    fn test_tap_registered_at_most_once() {
        let mut session = ReactionSession::new(1);
        session.signal_go(100);
        assert_eq!(session.register_tap(350), Some(250));
        assert_eq!(session.register_tap(400), None);
        assert_eq!(session.elapsed_ms, Some(250));
    }

    #[test]
    fn test_tap_without_go_is_rejected() {
        let mut session = ReactionSession::new(1);
        assert_eq!(session.register_tap(100), None);
        assert_eq!(session.elapsed_ms, None);
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(ReactionSession::format_elapsed(Some(230)), "0.230s");
        assert_eq!(ReactionSession::format_elapsed(Some(1005)), "1.005s");
        assert_eq!(ReactionSession::format_elapsed(None), "--");
    }
}

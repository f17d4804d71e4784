//! Monotonic clock sources
//!
//! Elapsed time must come from a monotonic clock, never wall-clock
//! subject to adjustment. The trait exists so tests and the scripted
//! simulator can step time by hand instead of sleeping.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Millisecond-resolution monotonic clock
pub trait Clock {
    /// Milliseconds since the clock's origin. Never decreases.
    fn now_ms(&self) -> u64;
}

/// Real clock backed by `std::time::Instant`
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Hand-advanced clock for deterministic tests and scripted runs.
/// Clones share the same underlying time, so a test can hold one
/// handle while the controller owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start at a given instant
    pub fn at(start_ms: u64) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(start_ms)),
        }
    }

    /// Move time forward
    pub fn advance(&self, delta_ms: u64) {
        self.now.fetch_add(delta_ms, Ordering::Relaxed);
    }

    /// Jump to an absolute instant. Saturates backward jumps to keep
    /// the monotonic guarantee.
    pub fn set(&self, now_ms: u64) {
        let current = self.now.load(Ordering::Relaxed);
        self.now.store(now_ms.max(current), Ordering::Relaxed);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monotonic_clock_does_not_go_backward() {
        let clock = MonotonicClock::new();
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(b >= a);
    }

    #[test]
    fn test_manual_clock_advance() {
        let clock = ManualClock::new();
        assert_eq!(clock.now_ms(), 0);
        clock.advance(500);
        assert_eq!(clock.now_ms(), 500);
        clock.advance(230);
        assert_eq!(clock.now_ms(), 730);
    }

    #[test]
    fn test_manual_clock_shared_between_clones() {
        let clock = ManualClock::new();
        let handle = clock.clone();
        handle.advance(100);
        assert_eq!(clock.now_ms(), 100);
    }

    #[test]
    fn test_manual_clock_set_never_rewinds() {
        let clock = ManualClock::at(1000);
        clock.set(400);
        assert_eq!(clock.now_ms(), 1000);
        clock.set(1500);
        assert_eq!(clock.now_ms(), 1500);
    }
}

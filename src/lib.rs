//! Redlight: reaction-time game core
//!
//! A single finite-state controller sequences a visual cue, a randomized
//! go-signal delay and the tap window, then hands the measured reaction
//! time to a result presenter. Cue playback and result rendering live
//! behind traits; the core only owns the state machine and the clock math.

pub mod core;
pub mod types;

// =============================================================================
// TIMING DEFAULTS [C]
// =============================================================================

/// Default lower bound for the randomized go-signal delay (milliseconds)
pub const DEFAULT_DELAY_MIN_MS: u64 = 200;

/// Default upper bound for the randomized go-signal delay (milliseconds)
/// Shipped revisions of the game used 0, 0-1000 and 200-3000; the widest
/// variant is the default here. Both bounds are configurable.
pub const DEFAULT_DELAY_MAX_MS: u64 = 3000;

/// How long the result cue holds before the result screen (milliseconds)
/// Matches the 1.5s result-clip hold of the original game.
pub const DEFAULT_RESULT_HOLD_MS: u64 = 1500;

/// Divisor for rendering elapsed milliseconds as seconds
pub const MS_PER_SEC: f64 = 1000.0;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";

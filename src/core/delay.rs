//! Randomized go-signal delay
//!
//! One bounded uniform draw per session, redrawn every session. Seeded
//! runs reproduce the same delay sequence for scripted play and tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Sampler for the delay between cue release and go-signal
#[derive(Debug)]
pub struct DelaySampler {
    rng: StdRng,
    min_ms: u64,
    max_ms: u64,
}

impl DelaySampler {
    /// Create a sampler over `[min_ms, max_ms]` (inclusive).
    /// Caller validates ordering via `GameConfig::validate`.
    pub fn new(min_ms: u64, max_ms: u64, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng, min_ms, max_ms }
    }

    /// Draw one delay. Every session calls this exactly once.
    pub fn draw(&mut self) -> u64 {
        if self.min_ms == self.max_ms {
            return self.min_ms;
        }
        self.rng.gen_range(self.min_ms..=self.max_ms)
    }

    pub fn min_ms(&self) -> u64 {
        self.min_ms
    }

    pub fn max_ms(&self) -> u64 {
        self.max_ms
    }
}

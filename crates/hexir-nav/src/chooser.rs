//! Random turn-direction chooser.
//!
//! Symmetric frontal threats give the directional rules nothing to work
//! with, so the cascade breaks the tie by flipping a coin on the sign of
//! the angular correction.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Chooses the sign of an angular magnitude. Implementations must be
/// non-blocking and callable at control-loop frequency.
pub trait TurnChooser: Send {
    /// Return either `+magnitude` or `-magnitude` (negative turns left).
    fn signed(&mut self, magnitude: f64) -> f64;
}

/// Default chooser: a bounded integer draw in `1..=10`, where 1–5 negates
/// the magnitude and 6–10 leaves it unchanged, giving a 50/50 split.
#[derive(Debug)]
pub struct RandomTurn {
    rng: SmallRng,
}

impl RandomTurn {
    /// Chooser seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    /// Chooser with a fixed seed, for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomTurn {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnChooser for RandomTurn {
    fn signed(&mut self, magnitude: f64) -> f64 {
        if self.rng.gen_range(1..=10) <= 5 {
            -magnitude
        } else {
            magnitude
        }
    }
}

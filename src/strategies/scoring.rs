//! Confidence and probability-of-profit scoring
//!
//! Scores are a fixed per-template base plus uniform jitter. They rank
//! candidates; they are not statistical estimates.

use rand::Rng;

/// Width of the uniform confidence jitter, [0, 5)
pub const CONFIDENCE_JITTER: f64 = 5.0;
/// Width of the uniform probability-of-profit jitter, [0, 0.1)
pub const POP_JITTER: f64 = 0.1;

/// Jitter source borrowed from the caller's RNG
pub struct ScoreSource<'a, R: Rng + ?Sized> {
    rng: &'a mut R,
}

impl<'a, R: Rng + ?Sized> ScoreSource<'a, R> {
    pub fn new(rng: &'a mut R) -> Self {
        Self { rng }
    }

    pub fn confidence(&mut self, base: f64) -> f64 {
        base + self.rng.gen_range(0.0..CONFIDENCE_JITTER)
    }

    pub fn probability_of_profit(&mut self, base: f64) -> f64 {
        base + self.rng.gen_range(0.0..POP_JITTER)
    }
}

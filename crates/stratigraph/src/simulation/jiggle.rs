//! Seeded jitter for separating coincident nodes.

use rand::{SeedableRng, distr::Distribution, distr::StandardUniform, rngs::StdRng};

/// Seed used when none is configured.
pub const DEFAULT_SEED: u64 = 1;

/// Source of tiny offsets in `[-5e-7, 5e-7)`.
///
/// Two nodes at exactly the same spot have no direction between them, so the
/// forces nudge one of them by a jiggle value. The generator is seeded, so a
/// given seed always produces the same layout.
pub struct Jiggle {
    rng: StdRng,
}

impl Jiggle {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn offset(&mut self) -> f32 {
        let unit: f32 = StandardUniform.sample(&mut self.rng);
        (unit - 0.5) * 1e-6
    }
}

impl Default for Jiggle {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_are_tiny() {
        let mut jiggle = Jiggle::default();
        for _ in 0..1000 {
            let value = jiggle.offset();
            assert!(value.abs() <= 5e-7);
        }
    }

    #[test]
    fn test_sequence_is_reproducible() {
        let mut a = Jiggle::new(42);
        let mut b = Jiggle::new(42);
        let first: Vec<f32> = (0..5).map(|_| a.offset()).collect();
        let second: Vec<f32> = (0..5).map(|_| b.offset()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_seeds_give_different_sequences() {
        let mut a = Jiggle::new(1);
        let mut b = Jiggle::new(2);
        let first: Vec<f32> = (0..8).map(|_| a.offset()).collect();
        let second: Vec<f32> = (0..8).map(|_| b.offset()).collect();
        assert_ne!(first, second);
    }
}

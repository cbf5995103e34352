//! Deterministic random number generation for shuffling.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces the same shuffles, so a logged
//!   seed reproduces a whole game
//! - **Seedable from entropy**: hosts that don't care get a fresh seed,
//!   which is still reported by [`GameRng::seed`]
//!
//! ```
//! use memory_match::core::GameRng;
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//! assert_eq!(a.gen_index_inclusive(9), b.gen_index_inclusive(9));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic RNG backing the shuffle.
///
/// Uses ChaCha8 for speed while keeping a uniform distribution.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    /// Create from an optional seed, falling back to entropy.
    #[must_use]
    pub fn from_seed_or_entropy(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::new(seed),
            None => Self::from_entropy(),
        }
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Draw a uniform index in `0..=max`.
    pub fn gen_index_inclusive(&mut self, max: usize) -> usize {
        self.inner.gen_range(0..=max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.gen_index_inclusive(1000), rng2.gen_index_inclusive(1000));
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = GameRng::new(1);
        let mut rng2 = GameRng::new(2);

        let seq1: Vec<_> = (0..10).map(|_| rng1.gen_index_inclusive(1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| rng2.gen_index_inclusive(1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_inclusive_bounds() {
        let mut rng = GameRng::new(7);
        let mut seen_max = false;
        for _ in 0..500 {
            let v = rng.gen_index_inclusive(3);
            assert!(v <= 3);
            seen_max |= v == 3;
        }
        assert!(seen_max, "upper bound should be reachable");

        assert_eq!(rng.gen_index_inclusive(0), 0);
    }

    #[test]
    fn test_seed_is_reported() {
        assert_eq!(GameRng::new(5).seed(), 5);
        assert_eq!(GameRng::from_seed_or_entropy(Some(9)).seed(), 9);
        let rng = GameRng::from_seed_or_entropy(None);
        assert_eq!(GameRng::new(rng.seed()).seed(), rng.seed());
    }
}

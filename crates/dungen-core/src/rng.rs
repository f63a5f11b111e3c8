//! Random number generation for map building.
//!
//! Uses a seeded ChaCha RNG so that a generation run is fully reproducible:
//! identical configuration and seed produce an identical mutation sequence.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Map random number generator.
///
/// Wraps `ChaCha8Rng` and is threaded `&mut` through every stage of the
/// pipeline. There is no ambient/global random state anywhere in the crate.
#[derive(Debug, Clone)]
pub struct MapRng {
    rng: ChaCha8Rng,
    seed: u64,
}

impl MapRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a new RNG with a random seed
    pub fn from_entropy() -> Self {
        let seed = rand::random();
        Self::new(seed)
    }

    /// Get the seed used to create this RNG
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Random index into a collection of the given length
    ///
    /// Returns 0 for an empty collection; callers check emptiness first.
    pub fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.rng.gen_range(0..len)
    }

    /// Returns true with probability `p` (clamped to [0, 1])
    pub fn chance(&mut self, p: f64) -> bool {
        if p <= 0.0 {
            return false;
        }
        if p >= 1.0 {
            return true;
        }
        self.rng.gen::<f64>() < p
    }
}

//! Seedable source of shuffles and coin flips for group draws and schedules.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Random source used by the grouper and the scheduler.
///
/// Production code uses [`Shuffler::from_entropy`]; tests and reproducible demos
/// use [`Shuffler::seeded`].
#[derive(Clone, Debug)]
pub struct Shuffler {
    rng: StdRng,
}

impl Shuffler {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniformly random permutation (Fisher–Yates). Each call draws fresh randomness.
    pub fn shuffle<T>(&mut self, mut items: Vec<T>) -> Vec<T> {
        items.shuffle(&mut self.rng);
        items
    }

    /// Fair coin.
    pub fn coin(&mut self) -> bool {
        self.rng.gen_bool(0.5)
    }
}

impl Default for Shuffler {
    fn default() -> Self {
        Self::from_entropy()
    }
}

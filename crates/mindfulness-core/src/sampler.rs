//! Shuffle-bag sampling without replacement.
//!
//! A [`ShuffleBag`] holds an immutable item pool and a working bag copied from
//! it. Each draw removes one uniformly chosen item from the bag; when the bag
//! runs dry it is refilled from the pool. Within one cycle no item repeats.
//!
//! The random source is a type parameter so callers can inject a seeded
//! generator and get reproducible draw sequences:
//!
//! ```
//! use mindfulness_core::ShuffleBag;
//!
//! let mut bag = ShuffleBag::seeded(vec!["a", "b", "c"], 7).unwrap();
//! let mut first_cycle: Vec<_> = (0..3).map(|_| bag.draw()).collect();
//! first_cycle.sort();
//! assert_eq!(first_cycle, vec!["a", "b", "c"]);
//! ```

use rand::prelude::*;
use rand_pcg::Mcg128Xsl64;

use crate::error::{CoreError, Result};

/// Without-replacement sampler that refills itself once exhausted.
///
/// Not synchronized: share it across threads only behind a lock.
#[derive(Debug, Clone)]
pub struct ShuffleBag<T, R = Mcg128Xsl64> {
    pool: Vec<T>,
    bag: Vec<T>,
    rng: R,
    cycle: u64,
}

impl<T: Clone> ShuffleBag<T> {
    /// Build a bag seeded from OS entropy.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EmptyItemPool`] if `items` yields nothing.
    pub fn new(items: impl IntoIterator<Item = T>) -> Result<Self> {
        Self::with_rng(items, Mcg128Xsl64::from_entropy())
    }

    /// Build a bag whose draw sequence is fully determined by `seed`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EmptyItemPool`] if `items` yields nothing.
    pub fn seeded(items: impl IntoIterator<Item = T>, seed: u64) -> Result<Self> {
        Self::with_rng(items, Mcg128Xsl64::seed_from_u64(seed))
    }
}

impl<T: Clone, R: Rng> ShuffleBag<T, R> {
    /// Build a bag drawing from the given random source.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EmptyItemPool`] if `items` yields nothing.
    pub fn with_rng(items: impl IntoIterator<Item = T>, rng: R) -> Result<Self> {
        let pool: Vec<T> = items.into_iter().collect();
        if pool.is_empty() {
            return Err(CoreError::EmptyItemPool);
        }
        Ok(Self {
            bag: pool.clone(),
            pool,
            rng,
            cycle: 0,
        })
    }

    /// Remove and return one item from the current bag.
    ///
    /// Refills from the pool first when the bag is empty, so this never fails.
    pub fn draw(&mut self) -> T {
        if self.bag.is_empty() {
            self.refill();
        }
        let idx = self.rng.gen_range(0..self.bag.len());
        self.bag.swap_remove(idx)
    }

    fn refill(&mut self) {
        self.bag.clone_from(&self.pool);
        self.cycle += 1;
        tracing::debug!(cycle = self.cycle, items = self.pool.len(), "shuffle bag refilled");
    }
}

impl<T, R> ShuffleBag<T, R> {
    /// Items still available in the current cycle.
    pub fn remaining(&self) -> usize {
        self.bag.len()
    }

    pub fn pool(&self) -> &[T] {
        &self.pool
    }

    pub fn pool_len(&self) -> usize {
        self.pool.len()
    }

    /// Number of refills performed so far (0 during the first cycle).
    pub fn cycle(&self) -> u64 {
        self.cycle
    }
}

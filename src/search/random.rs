//! Source of randomness for tie-breaks and rollouts.
//!
//! The search never reaches for a global generator: it is handed a
//! [`RandomSource`], so tests can pass a seeded or scripted one and assert
//! exact sequences.

use rand::Rng;

/// Random choices the search needs to make.
pub trait RandomSource {
    /// Returns `true` or `false` with equal probability.
    fn flip_coin(&mut self) -> bool;
    /// Returns an index in `0..len` drawn uniformly. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;
}

impl<R: Rng> RandomSource for R {
    fn flip_coin(&mut self) -> bool {
        self.gen_bool(0.5)
    }

    fn pick(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        self.gen_range(0..len)
    }
}

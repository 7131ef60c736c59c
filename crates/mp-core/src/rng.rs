//! Random sources for stochastic simulation decisions.
//!
//! # Determinism strategy
//!
//! The model owns exactly one [`RandomSource`].  Phases that may run on
//! several threads (transmission) never share it; instead the model derives
//! one sub-stream per place with [`RandomSource::split`], always in ascending
//! place order:
//!
//!   child_seed = parent.next_u64() XOR (stream * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive stream indices across the seed space.  Because
//! the splits themselves happen sequentially, a `SeededRandom` run replays
//! bit-for-bit regardless of how the per-place work is scheduled.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// A stream of uniform draws in `[0, 1)`.
pub trait RandomSource: Send {
    /// Next uniform draw in `[0, 1)`.
    fn number(&mut self) -> f64;

    /// Reset the internal state.
    fn set_seed(&mut self, seed: u64);

    /// Derive an independent sub-stream identified by `stream`.
    fn split(&mut self, stream: u64) -> Self
    where
        Self: Sized;

    /// Partial Fisher-Yates: afterwards `items[..k]` is a uniform sample of
    /// `items` in random order.  One draw per prefix slot; `k` at or past
    /// `items.len()` shuffles the whole slice.
    fn shuffle_prefix<T>(&mut self, items: &mut [T], k: usize)
    where
        Self: Sized,
    {
        let k = k.min(items.len());
        for i in 0..k {
            let span = items.len() - i;
            let j = i + ((self.number() * span as f64) as usize).min(span - 1);
            items.swap(i, j);
        }
    }
}

// ── SeededRandom ──────────────────────────────────────────────────────────────

/// Reproducible random source: the same seed yields the same sequence.
#[derive(Clone, Debug)]
pub struct SeededRandom {
    rng:  SmallRng,
    seed: u64,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self { rng: SmallRng::seed_from_u64(seed), seed }
    }

    /// The seed last passed to `new` or `set_seed`.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededRandom {
    #[inline]
    fn number(&mut self) -> f64 {
        self.rng.r#gen::<f64>()
    }

    fn set_seed(&mut self, seed: u64) {
        *self = Self::new(seed);
    }

    fn split(&mut self, stream: u64) -> Self {
        let child_seed = self.rng.r#gen::<u64>() ^ stream.wrapping_mul(MIXING_CONSTANT);
        Self::new(child_seed)
    }
}

// ── EntropyRandom ─────────────────────────────────────────────────────────────

/// Non-reproducible random source seeded from OS entropy.
#[derive(Clone, Debug)]
pub struct EntropyRandom(SmallRng);

impl EntropyRandom {
    pub fn new() -> Self {
        EntropyRandom(SmallRng::from_entropy())
    }
}

impl Default for EntropyRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for EntropyRandom {
    #[inline]
    fn number(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }

    /// Ignores `seed` and reseeds from entropy.
    fn set_seed(&mut self, _seed: u64) {
        self.0 = SmallRng::from_entropy();
    }

    fn split(&mut self, stream: u64) -> Self {
        let child_seed = self.0.r#gen::<u64>() ^ stream.wrapping_mul(MIXING_CONSTANT);
        EntropyRandom(SmallRng::seed_from_u64(child_seed))
    }
}

// ── FixedRandom ───────────────────────────────────────────────────────────────

/// Returns the same draw forever.  Used to force outcomes in tests: a value
/// of `0.0` makes every event with non-zero probability fire, a value just
/// below `1.0` suppresses all events with probability < 1.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FixedRandom(pub f64);

impl RandomSource for FixedRandom {
    #[inline]
    fn number(&mut self) -> f64 {
        self.0
    }

    fn set_seed(&mut self, _seed: u64) {}

    fn split(&mut self, _stream: u64) -> Self {
        *self
    }
}

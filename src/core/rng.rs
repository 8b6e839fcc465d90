//! Deterministic random number generation with usage tracking.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical sequence
//! - **Usage flag**: Every draw marks the source as used, so a state
//!   transition can report whether it consumed any randomness
//! - **Forkable**: Independent per-worker streams for the search
//! - **Comparable**: Equality and hashing use the persisted value
//!   (seed and stream position), never the transient usage flag
//!
//! ## Usage
//!
//! ```
//! use ccg_search::core::RandomSource;
//!
//! let mut random = RandomSource::new(42);
//! random.clear_flags();
//! assert!(!random.was_used());
//!
//! let _ = random.gen_range(0..6);
//! assert!(random.was_used());
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Seedable RNG that records whether it has been drawn from.
///
/// Uses ChaCha8 for speed while maintaining good statistical quality.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(into = "RandomSourceState", from = "RandomSourceState")]
pub struct RandomSource {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
    used: bool,
}

impl RandomSource {
    /// Create a new source with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
            used: false,
        }
    }

    /// Replace the stream with a fresh one seeded from `seed`.
    ///
    /// Game flow moves carry their seed; the board reseeds before applying
    /// them so the same move always produces the same transition.
    pub fn reseed(&mut self, seed: u64) {
        self.inner = ChaCha8Rng::seed_from_u64(seed);
        self.seed = seed;
        self.fork_counter = 0;
    }

    /// Reset the usage flag.
    pub fn clear_flags(&mut self) {
        self.used = false;
    }

    /// Whether anything was drawn since the last `clear_flags`.
    #[must_use]
    pub fn was_used(&self) -> bool {
        self.used
    }

    /// Fork this source to create an independent stream.
    ///
    /// Each fork produces a different but deterministic sequence.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self.seed.wrapping_add(self.fork_counter.wrapping_mul(0x9E3779B97F4A7C15));
        Self::new(fork_seed)
    }

    /// Generate a random integer in the given range.
    pub fn gen_range(&mut self, range: std::ops::Range<i32>) -> i32 {
        self.used = true;
        self.inner.gen_range(range)
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.used = true;
        self.inner.gen_range(range)
    }

    /// Generate a fresh 64-bit seed.
    pub fn next_seed(&mut self) -> u64 {
        self.used = true;
        self.inner.gen()
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        self.used = true;
        slice.choose(&mut self.inner)
    }

    /// Get the persisted state.
    #[must_use]
    pub fn state(&self) -> RandomSourceState {
        RandomSourceState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
            fork_counter: self.fork_counter,
        }
    }

    /// Restore from a saved state. The usage flag starts cleared.
    #[must_use]
    pub fn from_state(state: &RandomSourceState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
            fork_counter: state.fork_counter,
            used: false,
        }
    }
}

impl PartialEq for RandomSource {
    fn eq(&self, other: &Self) -> bool {
        self.state() == other.state()
    }
}

impl Eq for RandomSource {}

impl Hash for RandomSource {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.state().hash(state);
    }
}

/// Serializable RNG state.
///
/// Uses ChaCha8 word position for O(1) serialization regardless of
/// how many random numbers have been generated.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RandomSourceState {
    /// Current seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
    /// Fork counter for deterministic branching
    pub fork_counter: u64,
}

impl From<RandomSource> for RandomSourceState {
    fn from(source: RandomSource) -> Self {
        source.state()
    }
}

impl From<RandomSourceState> for RandomSource {
    fn from(state: RandomSourceState) -> Self {
        RandomSource::from_state(&state)
    }
}

//! Deterministic random number generation.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical sequence
//! - **Serializable**: O(1) state capture and restore for replay/debugging
//! - **Seed streams**: A parent generator derives one fresh seed per episode,
//!   so a single top-level seed controls episode-to-episode reproducibility
//!
//! ```
//! use boardgym::core::{GameRng, SeedStream};
//!
//! let mut stream = SeedStream::new(42);
//! let episode_seed = stream.next_seed();
//!
//! let mut a = GameRng::new(episode_seed);
//! let mut b = GameRng::new(episode_seed);
//! assert_eq!(a.gen_range(0..100), b.gen_range(0..100));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Deterministic RNG owned by a single game state.
///
/// Uses ChaCha8 for speed while maintaining high-quality randomness.
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

    /// The seed this RNG was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate a random integer in the given range.
    pub fn gen_range(&mut self, range: std::ops::Range<i64>) -> i64 {
        self.inner.gen_range(range)
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Generate a random boolean with given probability of true.
    pub fn gen_bool(&mut self, probability: f64) -> bool {
        self.inner.gen_bool(probability)
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// Serializable RNG state for checkpointing.
///
/// Uses the ChaCha8 word position for O(1) serialization regardless of
/// how many random numbers have been generated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}

/// Parent generator that hands out one seed per episode.
///
/// The environment draws a fresh seed from this stream on every `reset`,
/// so distinct episodes see independent randomness while the whole run
/// stays reproducible from the single master seed.
#[derive(Clone, Debug)]
pub struct SeedStream {
    inner: ChaCha8Rng,
    master_seed: u64,
}

impl SeedStream {
    /// Create a seed stream from a master seed.
    #[must_use]
    pub fn new(master_seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(master_seed),
            master_seed,
        }
    }

    /// The master seed this stream was created from.
    #[must_use]
    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    /// Draw the next episode seed.
    pub fn next_seed(&mut self) -> u64 {
        self.inner.gen()
    }
}

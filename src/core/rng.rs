//! Injected randomness for opponents and hidden targets.
//!
//! Engines never reach for a global generator. Every random decision goes
//! through a `RandomSource` the caller passes in:
//!
//! - `GameRng`: seeded ChaCha8 stream for real play.
//! - `ReplaySource`: scripted picks for deterministic tests and replays.
//!
//! ## Independent streams
//!
//! ```
//! use gift_quest::core::{GameRng, RandomSource};
//!
//! let root = GameRng::new(42);
//!
//! // Each game draws from its own stream, so playing one game
//! // never shifts the random choices of another.
//! let mut gift = root.for_context("find_the_gift");
//! let mut gift_again = GameRng::new(42).for_context("find_the_gift");
//! assert_eq!(gift.pick(9), gift_again.pick(9));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use rustc_hash::FxHasher;
use std::hash::Hasher;

/// A source of uniform choices.
pub trait RandomSource {
    /// Pick an index uniformly from `0..upper`.
    ///
    /// `upper` is always at least 1 when called by the engines.
    fn pick(&mut self, upper: usize) -> usize;

    /// Choose a random element from a slice.
    fn choose<T: Copy>(&mut self, items: &[T]) -> Option<T>
    where
        Self: Sized,
    {
        if items.is_empty() {
            None
        } else {
            Some(items[self.pick(items.len())])
        }
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn pick(&mut self, upper: usize) -> usize {
        (**self).pick(upper)
    }
}

/// Deterministic seeded RNG.
///
/// Uses ChaCha8 for speed; the same seed always produces the same picks.
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

    /// Create an independent stream for a specific context.
    ///
    /// The same context always produces the same stream from the same seed,
    /// regardless of how far this stream has advanced. The derivation uses
    /// `FxHasher` over explicit bytes, so it does not change between
    /// toolchains.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        let mut hasher = FxHasher::default();
        hasher.write_u64(self.seed);
        hasher.write(context.as_bytes());
        Self::new(hasher.finish())
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

impl RandomSource for GameRng {
    fn pick(&mut self, upper: usize) -> usize {
        self.inner.gen_range(0..upper.max(1))
    }
}

/// Serializable RNG position, so a session's engines can resume mid-stream.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Seed the stream started from
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}

/// Scripted picks, consumed in order.
///
/// Each scripted value is reduced modulo the requested bound. Once the
/// script runs out, picks fall back to 0.
#[derive(Clone, Debug, Default)]
pub struct ReplaySource {
    picks: VecDeque<usize>,
}

impl ReplaySource {
    pub fn new(picks: impl IntoIterator<Item = usize>) -> Self {
        Self {
            picks: picks.into_iter().collect(),
        }
    }

    /// Number of scripted picks not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.picks.len()
    }
}

impl RandomSource for ReplaySource {
    fn pick(&mut self, upper: usize) -> usize {
        self.picks.pop_front().map_or(0, |p| p % upper.max(1))
    }
}

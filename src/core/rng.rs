//! Deterministic random button selection.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical sequence
//! - **Serializable**: O(1) state capture and restore
//! - **Swappable**: `IndexSource` is the seam tests use to script exact
//!   sequences
//!
//! Selection is uniform with replacement: consecutive duplicate buttons are
//! allowed, matching classic Simon behavior.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::button::ButtonId;

/// Source of the next button to append to the sequence.
///
/// Implementations must return indices in `[0, button_count)`; the game
/// additionally guards the range before appending, so a misbehaving source
/// can never put an unplayable index into the sequence.
pub trait IndexSource {
    /// Pick the next button for a board of `button_count` buttons.
    fn next_button(&mut self, button_count: u8) -> ButtonId;
}

/// Deterministic RNG backing `IndexSource` in production.
///
/// Uses ChaCha8 for speed while maintaining cryptographic quality randomness.
/// State capture is O(1) regardless of how many values have been drawn.
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

impl IndexSource for GameRng {
    fn next_button(&mut self, button_count: u8) -> ButtonId {
        ButtonId(self.inner.gen_range(0..button_count))
    }
}

/// Serializable RNG state for checkpointing.
///
/// Uses the ChaCha8 word position for O(1) serialization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}

/// Scripted button source for deterministic playback in tests and demos.
///
/// Yields the scripted buttons in order. Panics when the script runs dry;
/// script at least as many entries as rounds you intend to drive.
#[derive(Clone, Debug)]
pub struct ScriptedSource {
    script: Vec<ButtonId>,
    cursor: usize,
}

impl ScriptedSource {
    /// Create a source that yields `script` in order.
    #[must_use]
    pub fn new(script: Vec<ButtonId>) -> Self {
        Self { script, cursor: 0 }
    }

    /// Convenience constructor from raw indices.
    #[must_use]
    pub fn from_indices(indices: &[u8]) -> Self {
        Self::new(indices.iter().copied().map(ButtonId).collect())
    }

    /// How many scripted entries remain.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script.len() - self.cursor
    }
}

impl IndexSource for ScriptedSource {
    fn next_button(&mut self, _button_count: u8) -> ButtonId {
        let button = self.script[self.cursor];
        self.cursor += 1;
        button
    }
}

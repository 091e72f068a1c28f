//! Game session state: the sequence, player progress, and turn phase.
//!
//! ## Invariants
//!
//! - `0 <= player_progress <= sequence.len()`
//! - `score() == sequence.len() - 1` whenever the turn state is not `Idle`
//!   (the sequence is extended *before* a round is presented, so a finished
//!   round is one shorter than the current sequence)
//!
//! `GameSession` holds no presentation state and knows nothing about timing;
//! `SequenceGame` drives it.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::button::ButtonId;

/// Which phase of the round lifecycle the game is in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnState {
    /// No game running. The only state in which the sequence is empty
    /// after construction.
    #[default]
    Idle,
    /// The sequence is being played back to the player.
    Presenting,
    /// Playback finished; the player is replaying the sequence.
    AwaitingInput,
    /// The round was replayed correctly; waiting out the inter-round delay.
    RoundAdvancing,
    /// A wrong guess ended the game. Cleared only by a full restart.
    GameOver,
}

impl TurnState {
    /// Whether guesses are accepted in this state.
    #[must_use]
    pub const fn accepts_input(self) -> bool {
        matches!(self, TurnState::AwaitingInput)
    }
}

impl std::fmt::Display for TurnState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TurnState::Idle => "Idle",
            TurnState::Presenting => "Presenting",
            TurnState::AwaitingInput => "AwaitingInput",
            TurnState::RoundAdvancing => "RoundAdvancing",
            TurnState::GameOver => "GameOver",
        };
        write!(f, "{name}")
    }
}

/// One player's game in progress.
///
/// Owns the sequence and progress counters exclusively; collaborators only
/// ever see individual values passed to them.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameSession {
    sequence: SmallVec<[ButtonId; 32]>,
    player_progress: usize,
    turn_state: TurnState,
    button_count: u8,
}

impl GameSession {
    /// Create an idle session for a board of `button_count` buttons.
    #[must_use]
    pub fn new(button_count: u8) -> Self {
        Self {
            sequence: SmallVec::new(),
            player_progress: 0,
            turn_state: TurnState::Idle,
            button_count,
        }
    }

    /// The sequence the player must reproduce, in presentation order.
    #[must_use]
    pub fn sequence(&self) -> &[ButtonId] {
        &self.sequence
    }

    /// Count of correctly-replayed entries in the current attempt.
    #[must_use]
    pub fn player_progress(&self) -> usize {
        self.player_progress
    }

    /// Current phase of the round lifecycle.
    #[must_use]
    pub fn turn_state(&self) -> TurnState {
        self.turn_state
    }

    /// Number of buttons on the board.
    #[must_use]
    pub fn button_count(&self) -> u8 {
        self.button_count
    }

    /// Completed rounds. Derived: one fewer than the sequence length, since
    /// the sequence grows before each round is presented.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.sequence.len().saturating_sub(1) as u32
    }

    /// Current round number (equals the sequence length).
    #[must_use]
    pub fn round(&self) -> usize {
        self.sequence.len()
    }

    /// The entry the player must guess next, if any remain.
    #[must_use]
    pub fn expected(&self) -> Option<ButtonId> {
        self.sequence.get(self.player_progress).copied()
    }

    /// Clear the sequence and progress for a fresh game.
    pub fn reset(&mut self) {
        self.sequence.clear();
        self.player_progress = 0;
        self.turn_state = TurnState::Idle;
    }

    /// Append a button to the sequence, reducing out-of-range indices into
    /// `[0, button_count)` so a misbehaving source cannot poison the game.
    ///
    /// Returns the button actually appended.
    pub fn extend(&mut self, button: ButtonId) -> ButtonId {
        let button = if button.in_range(self.button_count) {
            button
        } else {
            log::warn!(
                "index source produced {button} for a {}-button board; reducing",
                self.button_count
            );
            ButtonId(button.0 % self.button_count)
        };
        self.sequence.push(button);
        button
    }

    /// Advance the player's progress by one correct guess.
    pub fn advance_progress(&mut self) {
        debug_assert!(self.player_progress < self.sequence.len());
        self.player_progress += 1;
    }

    /// Whether the player has replayed the full sequence.
    #[must_use]
    pub fn round_complete(&self) -> bool {
        self.player_progress >= self.sequence.len()
    }

    /// Zero the replay progress (playback finished, or replay restarted).
    pub fn restart_progress(&mut self) {
        self.player_progress = 0;
    }

    /// Move to a new turn state.
    pub fn set_turn_state(&mut self, state: TurnState) {
        self.turn_state = state;
    }
}

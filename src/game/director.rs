//! Presentation-side game bookkeeping.
//!
//! `GameDirector` mirrors score and round progression for a UI layer. It
//! holds no authoritative game state; the machine's derived score is the
//! truth, and the director's incrementing mirror must agree with it after
//! every completed round (the integration tests pin this down).

use serde::{Deserialize, Serialize};

/// Score/round mirror driven by round-completion notifications.
///
/// A host wires its presenter callbacks to this: `start` on the start
/// button, `on_round_completed` from `Presenter::round_completed`,
/// `on_game_over` from `Presenter::game_over`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameDirector {
    current_score: u32,
    current_round: u32,
    game_started: bool,
}

impl Default for GameDirector {
    fn default() -> Self {
        Self::new()
    }
}

impl GameDirector {
    /// Create an idle director.
    #[must_use]
    pub fn new() -> Self {
        Self {
            current_score: 0,
            current_round: 1,
            game_started: false,
        }
    }

    /// A new game began: zero the mirror and unlock repeat.
    pub fn start(&mut self) {
        self.game_started = true;
        self.current_score = 0;
        self.current_round = 1;
        log::debug!("game started, score reset");
    }

    /// A round was replayed correctly. Ignored before `start`.
    pub fn on_round_completed(&mut self) {
        if !self.game_started {
            return;
        }
        self.current_score += 1;
        self.current_round += 1;
        log::debug!("round completed, total score {}", self.current_score);
    }

    /// The game ended. The final score stays on display.
    pub fn on_game_over(&mut self, final_score: u32) {
        self.game_started = false;
        log::debug!("game over, final score {final_score}");
    }

    /// Mirrored score.
    #[must_use]
    pub fn current_score(&self) -> u32 {
        self.current_score
    }

    /// Mirrored round number.
    #[must_use]
    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    /// Whether a game is in progress.
    #[must_use]
    pub fn is_game_started(&self) -> bool {
        self.game_started
    }

    /// Whether the repeat control should be usable.
    #[must_use]
    pub fn can_repeat(&self) -> bool {
        self.game_started
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_director() {
        let director = GameDirector::new();
        assert_eq!(director.current_score(), 0);
        assert_eq!(director.current_round(), 1);
        assert!(!director.is_game_started());
        assert!(!director.can_repeat());
    }

    #[test]
    fn test_round_completion_increments() {
        let mut director = GameDirector::new();
        director.start();

        director.on_round_completed();
        director.on_round_completed();

        assert_eq!(director.current_score(), 2);
        assert_eq!(director.current_round(), 3);
    }

    #[test]
    fn test_completion_before_start_ignored() {
        let mut director = GameDirector::new();
        director.on_round_completed();
        assert_eq!(director.current_score(), 0);
        assert_eq!(director.current_round(), 1);
    }

    #[test]
    fn test_game_over_locks_repeat() {
        let mut director = GameDirector::new();
        director.start();
        director.on_round_completed();
        assert!(director.can_repeat());

        director.on_game_over(1);
        assert!(!director.can_repeat());
        // The mirrored score stays on display after game over.
        assert_eq!(director.current_score(), 1);
    }

    #[test]
    fn test_restart_resets_mirror() {
        let mut director = GameDirector::new();
        director.start();
        director.on_round_completed();
        director.on_game_over(1);

        director.start();
        assert_eq!(director.current_score(), 0);
        assert_eq!(director.current_round(), 1);
        assert!(director.is_game_started());
    }
}

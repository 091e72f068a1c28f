//! The sequence game state machine.
//!
//! ## Round lifecycle
//!
//! ```text
//! Idle --start--> Presenting --playback done--> AwaitingInput
//!                     ^                              |
//!                     |            correct final guess / wrong guess
//!                     |                              v
//!                 NextRound <--delay-- RoundAdvancing / GameOver
//! ```
//!
//! The machine owns the `GameSession` and mutates it only from the single
//! game timeline: direct calls (`start_new_game`, `submit_guess`,
//! `repeat_sequence`) and `resume`, the re-entry point for scheduled wakes.
//! Guesses submitted while the machine is presenting, advancing, or
//! game-over are no-ops; nothing observable happens.
//!
//! Restarting bumps the epoch, so wakes scheduled by an abandoned playback
//! are recognized as stale and dropped in `resume`.

use thiserror::Error;

use crate::core::{ButtonId, ConfigError, GameConfig, GameSession, IndexSource, TurnState};
use crate::ports::{Notifier, NullNotifier, NullPresenter, Presenter};
use crate::scheduler::{Epoch, FrameScheduler, Scheduler, Step, Wake};

/// Input rejections. All are non-fatal; the guess is discarded.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InputError {
    /// The guessed index does not exist on this board.
    #[error("button index {index} out of range for a {button_count}-button board")]
    InvalidInput {
        /// The rejected index.
        index: u8,
        /// Number of buttons on the board.
        button_count: u8,
    },
}

/// What a submitted guess did to the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuessOutcome {
    /// Correct partial guess; more of the sequence remains.
    Progress,
    /// Correct final guess; the round is complete and the next one is
    /// scheduled.
    RoundComplete {
        /// Score after this round.
        score: u32,
    },
    /// Wrong guess; the game is over.
    GameOver {
        /// Completed rounds at the moment of failure.
        final_score: u32,
    },
    /// The machine was not awaiting input; nothing happened.
    Ignored,
}

/// The core state machine: sequence growth, playback, validation, scoring.
///
/// Collaborators are injected at construction and never looked up through
/// ambient statics. See the module docs for the lifecycle.
pub struct SequenceGame {
    config: GameConfig,
    session: GameSession,
    epoch: Epoch,
    /// Playback position within the sequence.
    cursor: usize,
    /// Button currently lit, if its renderable resolved.
    lit: Option<ButtonId>,
    source: Box<dyn IndexSource>,
    presenter: Box<dyn Presenter>,
    notifier: Box<dyn Notifier>,
    scheduler: Box<dyn Scheduler>,
}

impl SequenceGame {
    /// Create a game with explicit collaborators.
    pub fn new(
        config: GameConfig,
        source: Box<dyn IndexSource>,
        presenter: Box<dyn Presenter>,
        notifier: Box<dyn Notifier>,
        scheduler: Box<dyn Scheduler>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let session = GameSession::new(config.button_count);
        Ok(Self {
            config,
            session,
            epoch: 0,
            cursor: 0,
            lit: None,
            source,
            presenter,
            notifier,
            scheduler,
        })
    }

    /// Start building a game.
    #[must_use]
    pub fn builder() -> SequenceGameBuilder {
        SequenceGameBuilder::new()
    }

    // === Operations ===

    /// Reset everything and begin a fresh game. Always valid; any pending
    /// playback is cancelled via the epoch bump.
    pub fn start_new_game(&mut self) {
        self.epoch += 1;
        self.session.reset();
        self.cursor = 0;
        self.lit = None;

        let button = self.source.next_button(self.config.button_count);
        let button = self.session.extend(button);
        self.session.set_turn_state(TurnState::Presenting);
        self.presenter.score_changed(0);

        log::debug!("new game (epoch {}): first button {button}", self.epoch);
        self.scheduler.after(
            self.config.start_delay,
            Wake::new(self.epoch, Step::FirstHighlight),
        );
    }

    /// Record the player's guess.
    ///
    /// Only meaningful in `AwaitingInput`; in any other state the guess is
    /// ignored with no state change and no events. An out-of-range index is
    /// rejected as `InputError::InvalidInput` and also changes nothing.
    pub fn submit_guess(&mut self, button: ButtonId) -> Result<GuessOutcome, InputError> {
        if !self.session.turn_state().accepts_input() {
            log::debug!(
                "guess {button} ignored in state {}",
                self.session.turn_state()
            );
            return Ok(GuessOutcome::Ignored);
        }
        if !button.in_range(self.config.button_count) {
            log::warn!(
                "invalid guess: {button} on a {}-button board",
                self.config.button_count
            );
            return Err(InputError::InvalidInput {
                index: button.0,
                button_count: self.config.button_count,
            });
        }

        self.notifier.button_clicked(button);

        if self.session.expected() == Some(button) {
            self.session.advance_progress();
            self.notifier.guess_correct();

            if self.session.round_complete() {
                let score = self.session.score();
                self.session.set_turn_state(TurnState::RoundAdvancing);
                self.presenter.round_completed(score);
                self.presenter.score_changed(score);
                log::debug!(
                    "round {} replayed correctly, score {score}",
                    self.session.round()
                );
                self.scheduler.after(
                    self.config.delay_between_rounds,
                    Wake::new(self.epoch, Step::NextRound),
                );
                Ok(GuessOutcome::RoundComplete { score })
            } else {
                Ok(GuessOutcome::Progress)
            }
        } else {
            let final_score = self.session.score();
            self.session.set_turn_state(TurnState::GameOver);
            self.notifier.guess_wrong();
            self.notifier.game_ended();
            self.presenter.game_over(final_score);
            log::debug!(
                "wrong guess {button} at position {}, final score {final_score}",
                self.session.player_progress()
            );
            Ok(GuessOutcome::GameOver { final_score })
        }
    }

    /// Replay the current sequence for the player.
    ///
    /// Valid only while awaiting input on a non-empty sequence; the replay
    /// mutates neither sequence nor score, and player progress restarts at
    /// zero once the replay finishes. Returns whether a replay began.
    pub fn repeat_sequence(&mut self) -> bool {
        if !self.session.turn_state().accepts_input() || self.session.sequence().is_empty() {
            log::debug!("repeat ignored in state {}", self.session.turn_state());
            return false;
        }

        self.session.set_turn_state(TurnState::Presenting);
        self.cursor = 0;
        log::debug!("repeating sequence of length {}", self.session.round());
        self.light_current();
        true
    }

    /// Deliver a scheduled wake. Wakes from a superseded epoch are stale
    /// and discarded; the game they belonged to no longer exists.
    pub fn resume(&mut self, wake: Wake) {
        if wake.epoch != self.epoch {
            log::debug!(
                "discarding stale wake {:?} (current epoch {})",
                wake,
                self.epoch
            );
            return;
        }

        match wake.step {
            Step::FirstHighlight | Step::NextHighlight => self.light_current(),
            Step::Unhighlight => self.darken_current(),
            Step::BeginInput => {
                self.session.restart_progress();
                self.session.set_turn_state(TurnState::AwaitingInput);
                log::debug!("awaiting input for round {}", self.session.round());
            }
            Step::NextRound => {
                let button = self.source.next_button(self.config.button_count);
                self.session.extend(button);
                self.session.set_turn_state(TurnState::Presenting);
                self.cursor = 0;
                self.light_current();
            }
        }
    }

    // === Playback ===

    fn light_current(&mut self) {
        let Some(&button) = self.session.sequence().get(self.cursor) else {
            return;
        };

        if self.presenter.resolve(button).is_some() {
            self.presenter.highlight_button(button);
            self.lit = Some(button);
        } else {
            log::warn!("no renderable bound for {button}; highlight skipped");
            self.lit = None;
        }
        self.notifier.button_highlighted(button);

        self.scheduler.after(
            self.config.highlight_duration,
            Wake::new(self.epoch, Step::Unhighlight),
        );
    }

    fn darken_current(&mut self) {
        if let Some(button) = self.lit.take() {
            self.presenter.unhighlight_button(button);
        }

        self.cursor += 1;
        let step = if self.cursor < self.session.round() {
            Step::NextHighlight
        } else {
            Step::BeginInput
        };
        self.scheduler
            .after(self.config.delay_between_highlights, Wake::new(self.epoch, step));
    }

    // === Queries ===

    /// The game's configuration.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The session state (sequence, progress, turn state).
    #[must_use]
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Current phase of the round lifecycle.
    #[must_use]
    pub fn turn_state(&self) -> TurnState {
        self.session.turn_state()
    }

    /// Completed rounds.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.session.score()
    }

    /// Current round number (sequence length).
    #[must_use]
    pub fn round(&self) -> usize {
        self.session.round()
    }

    /// Whether guesses are currently accepted.
    #[must_use]
    pub fn is_player_turn(&self) -> bool {
        self.session.turn_state().accepts_input()
    }

    /// Whether a wrong guess has ended the game.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.session.turn_state() == TurnState::GameOver
    }

    /// The current timeline generation. Wakes carrying an older epoch are
    /// stale.
    #[must_use]
    pub fn epoch(&self) -> Epoch {
        self.epoch
    }
}

/// Builder for `SequenceGame`.
///
/// Unset collaborators default to null implementations and a fresh
/// `FrameScheduler`, which suits pure-logic use; interactive hosts inject
/// shared handles instead.
///
/// ```
/// use sequence_recall::core::GameRng;
/// use sequence_recall::game::SequenceGame;
///
/// let game = SequenceGame::builder()
///     .index_source(Box::new(GameRng::new(7)))
///     .build()
///     .unwrap();
///
/// assert_eq!(game.round(), 0);
/// ```
pub struct SequenceGameBuilder {
    config: GameConfig,
    source: Option<Box<dyn IndexSource>>,
    presenter: Option<Box<dyn Presenter>>,
    notifier: Option<Box<dyn Notifier>>,
    scheduler: Option<Box<dyn Scheduler>>,
}

impl Default for SequenceGameBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SequenceGameBuilder {
    /// Create a builder with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: GameConfig::default(),
            source: None,
            presenter: None,
            notifier: None,
            scheduler: None,
        }
    }

    /// Set the game configuration.
    #[must_use]
    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the button source. Defaults to `GameRng::new(0)`.
    #[must_use]
    pub fn index_source(mut self, source: Box<dyn IndexSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Set the presenter. Defaults to `NullPresenter`.
    #[must_use]
    pub fn presenter(mut self, presenter: Box<dyn Presenter>) -> Self {
        self.presenter = Some(presenter);
        self
    }

    /// Set the notifier. Defaults to `NullNotifier`.
    #[must_use]
    pub fn notifier(mut self, notifier: Box<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Set the scheduler. Defaults to a private `FrameScheduler`.
    #[must_use]
    pub fn scheduler(mut self, scheduler: Box<dyn Scheduler>) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    /// Validate the configuration and build the game.
    pub fn build(self) -> Result<SequenceGame, ConfigError> {
        SequenceGame::new(
            self.config,
            self.source
                .unwrap_or_else(|| Box::new(crate::core::GameRng::new(0))),
            self.presenter.unwrap_or_else(|| Box::new(NullPresenter)),
            self.notifier.unwrap_or_else(|| Box::new(NullNotifier)),
            self.scheduler
                .unwrap_or_else(|| Box::new(FrameScheduler::new())),
        )
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    use super::*;
    use crate::core::ScriptedSource;

    fn fast_config(button_count: u8) -> GameConfig {
        GameConfig::builder()
            .button_count(button_count)
            .start_delay(Duration::ZERO)
            .highlight_duration(Duration::from_millis(10))
            .delay_between_highlights(Duration::ZERO)
            .delay_between_rounds(Duration::ZERO)
            .build()
            .unwrap()
    }

    fn scripted_game(
        button_count: u8,
        script: &[u8],
    ) -> (SequenceGame, Rc<RefCell<FrameScheduler>>) {
        let scheduler = Rc::new(RefCell::new(FrameScheduler::new()));
        let game = SequenceGame::builder()
            .config(fast_config(button_count))
            .index_source(Box::new(ScriptedSource::from_indices(script)))
            .scheduler(Box::new(scheduler.clone()))
            .build()
            .unwrap();
        (game, scheduler)
    }

    /// Deliver wakes until the scheduler drains.
    fn settle(game: &mut SequenceGame, scheduler: &Rc<RefCell<FrameScheduler>>) {
        loop {
            let due = scheduler.borrow_mut().advance(Duration::from_secs(5));
            if due.is_empty() {
                break;
            }
            for wake in due {
                game.resume(wake);
            }
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = SequenceGame::builder()
            .config(GameConfig {
                button_count: 0,
                ..GameConfig::default()
            })
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_starts_idle() {
        let (game, _) = scripted_game(4, &[0]);
        assert_eq!(game.turn_state(), TurnState::Idle);
        assert_eq!(game.round(), 0);
        assert!(!game.is_player_turn());
    }

    #[test]
    fn test_start_produces_one_entry() {
        let (mut game, scheduler) = scripted_game(4, &[2]);
        game.start_new_game();

        assert_eq!(game.round(), 1);
        assert_eq!(game.score(), 0);
        assert_eq!(game.turn_state(), TurnState::Presenting);

        settle(&mut game, &scheduler);
        assert_eq!(game.turn_state(), TurnState::AwaitingInput);
        assert_eq!(game.session().player_progress(), 0);
    }

    #[test]
    fn test_guess_ignored_while_presenting() {
        let (mut game, _scheduler) = scripted_game(4, &[2]);
        game.start_new_game();

        // Playback has not finished; no wakes delivered yet.
        let outcome = game.submit_guess(ButtonId(2)).unwrap();
        assert_eq!(outcome, GuessOutcome::Ignored);
        assert_eq!(game.turn_state(), TurnState::Presenting);
    }

    #[test]
    fn test_out_of_range_guess_rejected() {
        let (mut game, scheduler) = scripted_game(4, &[2]);
        game.start_new_game();
        settle(&mut game, &scheduler);

        let err = game.submit_guess(ButtonId(4)).unwrap_err();
        assert_eq!(
            err,
            InputError::InvalidInput {
                index: 4,
                button_count: 4
            }
        );
        // Rejection leaves the turn untouched.
        assert_eq!(game.turn_state(), TurnState::AwaitingInput);
    }

    #[test]
    fn test_correct_guess_completes_round() {
        let (mut game, scheduler) = scripted_game(4, &[2, 1]);
        game.start_new_game();
        settle(&mut game, &scheduler);

        let outcome = game.submit_guess(ButtonId(2)).unwrap();
        assert_eq!(outcome, GuessOutcome::RoundComplete { score: 0 });
        assert_eq!(game.turn_state(), TurnState::RoundAdvancing);

        settle(&mut game, &scheduler);
        assert_eq!(game.round(), 2);
        assert_eq!(game.turn_state(), TurnState::AwaitingInput);
    }

    #[test]
    fn test_wrong_guess_ends_game() {
        let (mut game, scheduler) = scripted_game(4, &[2]);
        game.start_new_game();
        settle(&mut game, &scheduler);

        let outcome = game.submit_guess(ButtonId(0)).unwrap();
        assert_eq!(outcome, GuessOutcome::GameOver { final_score: 0 });
        assert!(game.is_game_over());

        // Sequence survives for post-mortem queries.
        assert_eq!(game.session().sequence(), &[ButtonId(2)]);
    }

    #[test]
    fn test_restart_after_game_over() {
        let (mut game, scheduler) = scripted_game(4, &[2, 3]);
        game.start_new_game();
        settle(&mut game, &scheduler);
        game.submit_guess(ButtonId(0)).unwrap();
        assert!(game.is_game_over());

        game.start_new_game();
        assert_eq!(game.round(), 1);
        assert!(!game.is_game_over());
        settle(&mut game, &scheduler);
        assert_eq!(game.turn_state(), TurnState::AwaitingInput);
        assert_eq!(game.session().sequence(), &[ButtonId(3)]);
    }

    #[test]
    fn test_stale_wake_discarded() {
        let (mut game, scheduler) = scripted_game(4, &[2, 3]);
        game.start_new_game();
        let stale = Wake::new(game.epoch(), Step::FirstHighlight);

        // Restart before the pending wake is delivered.
        game.start_new_game();
        game.resume(stale);

        // The stale wake must not have started a playback on the new game.
        assert_eq!(game.turn_state(), TurnState::Presenting);
        settle(&mut game, &scheduler);
        assert_eq!(game.turn_state(), TurnState::AwaitingInput);
        assert_eq!(game.round(), 1);
    }

    #[test]
    fn test_repeat_only_while_awaiting_input() {
        let (mut game, scheduler) = scripted_game(4, &[2]);
        assert!(!game.repeat_sequence());

        game.start_new_game();
        assert!(!game.repeat_sequence());

        settle(&mut game, &scheduler);
        assert!(game.repeat_sequence());
        assert_eq!(game.turn_state(), TurnState::Presenting);

        settle(&mut game, &scheduler);
        assert_eq!(game.turn_state(), TurnState::AwaitingInput);
        assert_eq!(game.session().player_progress(), 0);
        assert_eq!(game.round(), 1);
    }
}

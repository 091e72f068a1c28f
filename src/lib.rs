//! # sequence-recall
//!
//! A "Simon says" style memory game core: the system presents a growing
//! sequence of highlighted buttons, the player reproduces it in order, and
//! the game ends on the first mistake.
//!
//! ## Design Principles
//!
//! 1. **Engine-Agnostic**: No widgets, audio clips, or engine lifecycle.
//!    Rendering and sound sit behind the `Presenter` and `Notifier` traits,
//!    injected at construction rather than reached through ambient statics.
//!
//! 2. **One Timeline**: The game is a synchronous state machine. Timed
//!    playback is modeled as suspension points via an injected `Scheduler`;
//!    the driver delivers wakes back into `SequenceGame::resume`. An epoch
//!    counter makes wakes from an abandoned playback harmless.
//!
//! 3. **Derived Score**: Score is never stored; it is always
//!    `sequence length - 1`, because the sequence grows before each round
//!    is presented.
//!
//! ## Modules
//!
//! - `core`: Button IDs, configuration, deterministic RNG, session state
//! - `game`: The `SequenceGame` state machine and the `GameDirector` mirror
//! - `ports`: `Presenter`/`Notifier` collaborator traits
//! - `scheduler`: Suspension points, `Wake` delivery, `FrameScheduler` shim
//!
//! ## Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use std::time::Duration;
//!
//! use sequence_recall::core::GameRng;
//! use sequence_recall::game::SequenceGame;
//! use sequence_recall::scheduler::FrameScheduler;
//!
//! let scheduler = Rc::new(RefCell::new(FrameScheduler::new()));
//! let mut game = SequenceGame::builder()
//!     .index_source(Box::new(GameRng::new(42)))
//!     .scheduler(Box::new(scheduler.clone()))
//!     .build()
//!     .unwrap();
//!
//! game.start_new_game();
//! assert_eq!(game.round(), 1);
//!
//! // Frame loop: advance the clock, deliver due wakes.
//! loop {
//!     let due = scheduler.borrow_mut().advance(Duration::from_secs(3));
//!     if due.is_empty() {
//!         break;
//!     }
//!     for wake in due {
//!         game.resume(wake);
//!     }
//! }
//! assert!(game.is_player_turn());
//! ```

pub mod core;
pub mod game;
pub mod ports;
pub mod scheduler;

// Re-export commonly used types
pub use crate::core::{
    ButtonId, ConfigError, GameConfig, GameConfigBuilder, GameRng, GameRngState, GameSession,
    IndexSource, RenderableHandle, ScriptedSource, TurnState,
};

pub use crate::game::{GameDirector, GuessOutcome, InputError, SequenceGame, SequenceGameBuilder};

pub use crate::ports::{Notifier, NullNotifier, NullPresenter, Presenter};

pub use crate::scheduler::{Epoch, FrameScheduler, Scheduler, Step, Wake};

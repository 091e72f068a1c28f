//! Core types: buttons, configuration, RNG, session state.
//!
//! This module contains the fundamental building blocks. Nothing here knows
//! about timing or presentation; that lives in `game` and `scheduler`.

pub mod button;
pub mod config;
pub mod rng;
pub mod session;

pub use button::{ButtonId, RenderableHandle};
pub use config::{ConfigError, GameConfig, GameConfigBuilder};
pub use rng::{GameRng, GameRngState, IndexSource, ScriptedSource};
pub use session::{GameSession, TurnState};

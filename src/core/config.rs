//! Game configuration.
//!
//! All timing and board parameters are fixed at construction. There is no
//! runtime-mutation API; a host that wants different delays builds a new
//! game.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The board must have at least one button.
    #[error("button_count must be greater than zero")]
    NoButtons,

    /// A highlight the player cannot see is unplayable.
    #[error("highlight_duration must be greater than zero")]
    ZeroHighlightDuration,
}

/// Complete game configuration.
///
/// Defaults mirror a typical four-pad board: 0.5 s highlights, 0.3 s gaps,
/// 1.5 s between rounds, and a 1 s lead-in before the first round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of buttons on the board (> 0).
    pub button_count: u8,

    /// Lead-in delay between starting a game and the first highlight.
    pub start_delay: Duration,

    /// How long each button stays lit during playback (> 0).
    pub highlight_duration: Duration,

    /// Pause between one button going dark and the next lighting up.
    pub delay_between_highlights: Duration,

    /// Pause between a completed round and the next playback.
    pub delay_between_rounds: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            button_count: 4,
            start_delay: Duration::from_secs(1),
            highlight_duration: Duration::from_millis(500),
            delay_between_highlights: Duration::from_millis(300),
            delay_between_rounds: Duration::from_millis(1500),
        }
    }
}

impl GameConfig {
    /// Start building a configuration from the defaults.
    #[must_use]
    pub fn builder() -> GameConfigBuilder {
        GameConfigBuilder::new()
    }

    /// Validate this configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.button_count == 0 {
            return Err(ConfigError::NoButtons);
        }
        if self.highlight_duration.is_zero() {
            return Err(ConfigError::ZeroHighlightDuration);
        }
        Ok(())
    }
}

/// Builder for `GameConfig`.
///
/// ```
/// use std::time::Duration;
/// use sequence_recall::core::GameConfig;
///
/// let config = GameConfig::builder()
///     .button_count(6)
///     .highlight_duration(Duration::from_millis(400))
///     .build()
///     .unwrap();
///
/// assert_eq!(config.button_count, 6);
/// ```
#[derive(Clone, Debug)]
pub struct GameConfigBuilder {
    config: GameConfig,
}

impl Default for GameConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfigBuilder {
    /// Create a builder seeded with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: GameConfig::default(),
        }
    }

    /// Set the number of buttons on the board.
    #[must_use]
    pub fn button_count(mut self, count: u8) -> Self {
        self.config.button_count = count;
        self
    }

    /// Set the lead-in delay before the first highlight of a new game.
    #[must_use]
    pub fn start_delay(mut self, delay: Duration) -> Self {
        self.config.start_delay = delay;
        self
    }

    /// Set how long each highlight stays lit.
    #[must_use]
    pub fn highlight_duration(mut self, duration: Duration) -> Self {
        self.config.highlight_duration = duration;
        self
    }

    /// Set the pause between consecutive highlights.
    #[must_use]
    pub fn delay_between_highlights(mut self, delay: Duration) -> Self {
        self.config.delay_between_highlights = delay;
        self
    }

    /// Set the pause between a completed round and the next playback.
    #[must_use]
    pub fn delay_between_rounds(mut self, delay: Duration) -> Self {
        self.config.delay_between_rounds = delay;
        self
    }

    /// Validate and build the configuration.
    pub fn build(self) -> Result<GameConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

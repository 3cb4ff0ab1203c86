//! Application configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Timer durations driving a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchTiming {
    /// Pause before the computer answers a human move.
    pub opponent_delay: Duration,
    /// How long a drawn board stays up before the automatic reset.
    pub draw_reset: Duration,
    /// Total length of the win celebration.
    pub celebration: Duration,
    /// Spacing between celebration bursts.
    pub celebration_interval: Duration,
}

impl Default for MatchTiming {
    fn default() -> Self {
        Self {
            opponent_delay: Duration::from_millis(default_opponent_delay_ms()),
            draw_reset: Duration::from_millis(default_draw_reset_ms()),
            celebration: Duration::from_millis(default_celebration_ms()),
            celebration_interval: Duration::from_millis(default_celebration_interval_ms()),
        }
    }
}

/// Settings read from `tictactoe.toml`.
///
/// Every field is optional in the file; missing ones take the defaults below.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct AppConfig {
    /// Delay before the AI moves, in milliseconds.
    #[serde(default = "default_opponent_delay_ms")]
    opponent_delay_ms: u64,

    /// Delay before a drawn game resets, in milliseconds.
    #[serde(default = "default_draw_reset_ms")]
    draw_reset_ms: u64,

    /// Length of the win celebration, in milliseconds.
    #[serde(default = "default_celebration_ms")]
    celebration_ms: u64,

    /// Interval between confetti bursts, in milliseconds.
    #[serde(default = "default_celebration_interval_ms")]
    celebration_interval_ms: u64,

    /// Ring the terminal bell on each human move.
    #[serde(default = "default_true")]
    sound: bool,

    /// Draw confetti on a win.
    #[serde(default = "default_true")]
    confetti: bool,

    /// Fixed RNG seed for the AI; random when absent.
    #[serde(default)]
    seed: Option<u64>,
}

#[instrument]
fn default_opponent_delay_ms() -> u64 {
    500
}

#[instrument]
fn default_draw_reset_ms() -> u64 {
    3000
}

#[instrument]
fn default_celebration_ms() -> u64 {
    3000
}

#[instrument]
fn default_celebration_interval_ms() -> u64 {
    250
}

#[instrument]
fn default_true() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            opponent_delay_ms: default_opponent_delay_ms(),
            draw_reset_ms: default_draw_reset_ms(),
            celebration_ms: default_celebration_ms(),
            celebration_interval_ms: default_celebration_interval_ms(),
            sound: true,
            confetti: true,
            seed: None,
        }
    }
}

impl AppConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        info!(?config, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Overrides the RNG seed.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        if seed.is_some() {
            self.seed = seed;
        }
        self
    }

    /// Turns the terminal bell off.
    pub fn muted(mut self) -> Self {
        self.sound = false;
        self
    }

    /// Timer durations for a match.
    pub fn timing(&self) -> MatchTiming {
        MatchTiming {
            opponent_delay: Duration::from_millis(self.opponent_delay_ms),
            draw_reset: Duration::from_millis(self.draw_reset_ms),
            celebration: Duration::from_millis(self.celebration_ms),
            celebration_interval: Duration::from_millis(self.celebration_interval_ms),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.celebration_interval_ms == 0 {
            return Err(ConfigError::new(
                "celebration_interval_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

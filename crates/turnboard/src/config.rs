//! Application configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "turnboard.toml";

/// Which seats a computer plays.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ComputerSeats {
    /// Two humans.
    None,
    /// Computer moves first.
    First,
    /// Computer answers a human.
    #[default]
    Second,
    /// Computer against computer.
    Both,
}

impl ComputerSeats {
    /// Returns true if the computer plays Player 1.
    pub fn first(self) -> bool {
        matches!(self, Self::First | Self::Both)
    }

    /// Returns true if the computer plays Player 2.
    pub fn second(self) -> bool {
        matches!(self, Self::Second | Self::Both)
    }
}

/// Settings read from `turnboard.toml`; every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
#[serde(default)]
pub struct AppConfig {
    /// Directory save files are written to and listed from.
    #[setters(into)]
    save_dir: PathBuf,

    /// Name of Player 1.
    #[setters(into)]
    first_player: String,

    /// Name of Player 2.
    #[setters(into)]
    second_player: String,

    /// Seats played by the computer.
    computer: ComputerSeats,

    /// Side length for numerical tic-tac-toe.
    numeric_size: usize,

    /// Side length for Gomoku.
    gomoku_size: usize,

    /// Seed for reproducible computer players.
    seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            save_dir: PathBuf::from("saves"),
            first_player: "Player 1".to_string(),
            second_player: "Player 2".to_string(),
            computer: ComputerSeats::default(),
            numeric_size: turnboard_numeric::DEFAULT_SIZE,
            gomoku_size: turnboard_gomoku::DEFAULT_SIZE,
            seed: None,
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(save_dir = %config.save_dir.display(), "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise falls back to defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            debug!("No config file, using defaults");
            Ok(Self::default())
        }
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: AppConfig = toml::from_str("gomoku_size = 19\ncomputer = \"both\"").unwrap();
        assert_eq!(*config.gomoku_size(), 19);
        assert_eq!(*config.computer(), ComputerSeats::Both);
        assert_eq!(*config.numeric_size(), 3);
        assert_eq!(config.save_dir(), &PathBuf::from("saves"));
    }

    #[test]
    fn test_setters_override() {
        let config = AppConfig::default()
            .with_first_player("Ada")
            .with_seed(Some(9));
        assert_eq!(config.first_player(), "Ada");
        assert_eq!(*config.seed(), Some(9));
    }

    #[test]
    fn test_unknown_seat_value_rejected() {
        assert!(toml::from_str::<AppConfig>("computer = \"third\"").is_err());
    }

    #[test]
    fn test_seat_flags() {
        assert!(ComputerSeats::Both.first() && ComputerSeats::Both.second());
        assert!(!ComputerSeats::None.first() && !ComputerSeats::None.second());
        assert!(ComputerSeats::Second.second() && !ComputerSeats::Second.first());
    }
}

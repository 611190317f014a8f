//! Match configuration loaded from TOML and command-line overrides.

use std::path::Path;

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::{Board, InvalidInputPolicy};

/// Settings for an interactive match.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_", into)]
#[serde(default)]
pub struct MatchConfig {
    /// Cells per row and column.
    board_size: usize,

    /// Human player's name; read from stdin when absent.
    #[setters(strip_option)]
    human_name: Option<String>,

    /// Computer player's name.
    opponent_name: String,

    /// What to do when the human enters a bad position.
    invalid_input: InvalidInputPolicy,

    /// Seed for a reproducible toss.
    #[setters(strip_option)]
    seed: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            board_size: 3,
            human_name: None,
            opponent_name: "Computer".to_string(),
            invalid_input: InvalidInputPolicy::Abort,
            seed: None,
        }
    }
}

impl MatchConfig {
    /// Loads configuration from a TOML file. Missing keys take defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(board_size = config.board_size, "Config loaded successfully");
        Ok(config)
    }

    /// Loads the file if it exists, otherwise returns defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Rejects settings no game can be played with.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_size == 0 || self.board_size > Board::MAX_SIZE {
            return Err(ConfigError::new(format!(
                "board_size must be between 1 and {}",
                Board::MAX_SIZE
            )));
        }
        if self.opponent_name.trim().is_empty() {
            return Err(ConfigError::new("opponent_name cannot be empty".to_string()));
        }
        if self
            .human_name
            .as_deref()
            .is_some_and(|name| name.trim().is_empty())
        {
            return Err(ConfigError::new("human_name cannot be empty".to_string()));
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = MatchConfig::default();
        assert_eq!(*config.board_size(), 3);
        assert_eq!(config.opponent_name(), "Computer");
        assert_eq!(*config.invalid_input(), InvalidInputPolicy::Abort);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_file_with_partial_keys() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "board_size = 5\ninvalid_input = \"reprompt\"\nseed = 7").unwrap();

        let config = MatchConfig::from_file(file.path()).unwrap();
        assert_eq!(*config.board_size(), 5);
        assert_eq!(*config.invalid_input(), InvalidInputPolicy::Reprompt);
        assert_eq!(*config.seed(), Some(7));
        assert_eq!(config.opponent_name(), "Computer");
    }

    #[test]
    fn test_from_file_rejects_garbage() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "board_size = \"big\"").unwrap();
        let err = MatchConfig::from_file(file.path()).unwrap_err();
        assert!(err.message.starts_with("Failed to parse config"));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = MatchConfig::load_or_default("/nonexistent/strictly_noughts.toml").unwrap();
        assert_eq!(config, MatchConfig::default());
    }

    #[test]
    fn test_setters_and_validation() {
        let config = MatchConfig::default()
            .with_board_size(0usize)
            .with_human_name("Alice");
        assert_eq!(config.human_name().as_deref(), Some("Alice"));
        assert!(config.validate().is_err());

        let config = MatchConfig::default().with_human_name("  ");
        assert!(config.validate().is_err());

        let config = MatchConfig::default().with_board_size(Board::MAX_SIZE + 1);
        assert!(config.validate().is_err());
        let config = MatchConfig::default().with_board_size(Board::MAX_SIZE);
        assert!(config.validate().is_ok());
    }
}

//! Error types for game setup and play.

use derive_more::{Display, Error};
use tracing::instrument;

/// What went wrong.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum GameErrorKind {
    /// No record exists under the given identifier.
    #[display("Not found: {}", _0)]
    NotFound(String),

    /// A required field was missing or empty.
    #[display("Invalid input: {}", _0)]
    InvalidInput(String),

    /// The chosen position lies outside `1..=max`.
    #[display("Position {} is invalid (must be 1-{})", position, max)]
    InvalidMove {
        /// Position as entered.
        position: i64,
        /// Largest legal position (N²).
        max: usize,
    },

    /// The chosen position is already marked.
    #[display("Position {} is already captured", position)]
    CellOccupied {
        /// Position as entered.
        position: usize,
    },

    /// The input was not a base-10 integer.
    #[display("Malformed position: '{}'", _0)]
    MalformedPosition(String),

    /// Reading input or writing output failed.
    #[display("I/O error: {}", _0)]
    Io(String),
}

impl GameErrorKind {
    /// Returns true for bad move input that a human could correct by choosing again.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InvalidMove { .. } | Self::CellOccupied { .. } | Self::MalformedPosition(_)
        )
    }
}

/// Game error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("{} at {}:{}", kind, file, line)]
pub struct GameError {
    /// Error kind.
    kind: GameErrorKind,
    /// Line number where error occurred.
    line: u32,
    /// Source file where error occurred.
    file: &'static str,
}

impl GameError {
    /// Creates a new game error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: GameErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Returns the error kind.
    pub fn kind(&self) -> &GameErrorKind {
        &self.kind
    }

    /// Returns the source line the error was raised at.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Returns the source file the error was raised in.
    pub fn file(&self) -> &'static str {
        self.file
    }
}

impl From<GameErrorKind> for GameError {
    #[track_caller]
    fn from(kind: GameErrorKind) -> Self {
        Self::new(kind)
    }
}

impl From<std::io::Error> for GameError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(GameErrorKind::Io(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_kind_and_location() {
        let err = GameError::new(GameErrorKind::InvalidMove {
            position: 10,
            max: 9,
        });
        let text = err.to_string();
        assert!(text.starts_with("Position 10 is invalid (must be 1-9) at "));
        assert!(text.contains("error.rs"));
    }

    #[test]
    fn test_recoverable_kinds() {
        assert!(GameErrorKind::MalformedPosition("x".into()).is_recoverable());
        assert!(GameErrorKind::CellOccupied { position: 5 }.is_recoverable());
        assert!(!GameErrorKind::NotFound("g".into()).is_recoverable());
        assert!(!GameErrorKind::Io("eof".into()).is_recoverable());
    }
}

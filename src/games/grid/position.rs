//! Linear cell positions and their mapping to rows and columns.
//!
//! Positions are 1-indexed in row-major order; rows and columns are 0-indexed.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::types::Board;
use crate::{GameError, GameErrorKind};

/// Maps a 1-indexed position to `(row, col)` on a board of `size`.
///
/// # Panics
///
/// Requires `position >= 1` and `size >= 1`; range-check input with
/// [`Position::checked`] first.
pub fn position_to_row_col(position: usize, size: usize) -> (usize, usize) {
    ((position - 1) / size, (position - 1) % size)
}

/// Maps `(row, col)` to its 1-indexed position on a board of `size`.
pub fn row_col_to_position(row: usize, col: usize, size: usize) -> usize {
    row * size + col + 1
}

/// A 1-indexed cell reference, as typed by a human.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Position(usize);

impl Position {
    /// Wraps a raw position without range checking.
    pub fn new(value: usize) -> Self {
        Self(value)
    }

    /// Returns the raw 1-indexed value.
    pub fn value(self) -> usize {
        self.0
    }

    /// Position of `(row, col)` on a board of `size`.
    pub fn from_row_col(row: usize, col: usize, size: usize) -> Self {
        Self(row_col_to_position(row, col, size))
    }

    /// `(row, col)` of this position on a board of `size`.
    pub fn to_row_col(self, size: usize) -> (usize, usize) {
        position_to_row_col(self.0, size)
    }

    /// Parses a base-10 integer and checks it lies in `1..=size²`.
    ///
    /// # Errors
    ///
    /// - [`GameErrorKind::MalformedPosition`] if the text is not an integer.
    /// - [`GameErrorKind::InvalidMove`] if the integer is out of range.
    #[instrument]
    pub fn parse(input: &str, size: usize) -> Result<Self, GameError> {
        let raw = input.trim().parse::<i64>().map_err(|_| {
            GameError::new(GameErrorKind::MalformedPosition(input.to_string()))
        })?;
        Self::checked(raw, size)
    }

    /// Range-checks a raw position against a board of `size`.
    ///
    /// # Errors
    ///
    /// Returns [`GameErrorKind::InvalidMove`] unless `1 <= raw <= size²`.
    pub fn checked(raw: i64, size: usize) -> Result<Self, GameError> {
        let max = size.checked_mul(size).unwrap_or(usize::MAX);
        match usize::try_from(raw) {
            Ok(value) if (1..=max).contains(&value) => Ok(Self(value)),
            _ => Err(GameError::new(GameErrorKind::InvalidMove {
                position: raw,
                max,
            })),
        }
    }
}

/// Checks that `position` is on the board and free, returning its `(row, col)`.
///
/// # Errors
///
/// - [`GameErrorKind::InvalidMove`] if the position is outside `1..=N²`.
/// - [`GameErrorKind::CellOccupied`] if the cell already carries a mark.
#[instrument(skip(board), fields(size = board.size()))]
pub fn resolve_legal(board: &Board, position: Position) -> Result<(usize, usize), GameError> {
    let size = board.size();
    let position = Position::checked(position.value() as i64, size)?;
    let (row, col) = position.to_row_col(size);
    if !board.is_empty(row, col) {
        debug!(%position, "Cell already captured");
        return Err(GameError::new(GameErrorKind::CellOccupied {
            position: position.value(),
        }));
    }
    Ok((row, col))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Mark, Square};

    #[test]
    fn test_position_to_row_col() {
        assert_eq!(position_to_row_col(1, 3), (0, 0));
        assert_eq!(position_to_row_col(3, 3), (0, 2));
        assert_eq!(position_to_row_col(4, 3), (1, 0));
        assert_eq!(position_to_row_col(9, 3), (2, 2));
        assert_eq!(position_to_row_col(16, 4), (3, 3));
    }

    #[test]
    fn test_checked_on_oversized_board_does_not_overflow() {
        let size = 1usize << 32;
        assert_eq!(Position::parse("5", size).unwrap(), Position::new(5));
        assert!(Position::checked(0, size).is_err());
    }

    #[test]
    fn test_row_col_to_position() {
        assert_eq!(row_col_to_position(0, 0, 3), 1);
        assert_eq!(row_col_to_position(1, 1, 3), 5);
        assert_eq!(row_col_to_position(2, 1, 5), 12);
    }

    #[test]
    fn test_parse_out_of_range() {
        let err = Position::parse("10", 3).unwrap_err();
        assert_eq!(
            err.kind(),
            &GameErrorKind::InvalidMove {
                position: 10,
                max: 9
            }
        );
        let err = Position::parse("0", 3).unwrap_err();
        assert!(matches!(err.kind(), GameErrorKind::InvalidMove { .. }));
        let err = Position::parse("-4", 3).unwrap_err();
        assert!(matches!(
            err.kind(),
            GameErrorKind::InvalidMove { position: -4, .. }
        ));
    }

    #[test]
    fn test_parse_malformed() {
        for input in ["", "abc", "4.5", "five"] {
            let err = Position::parse(input, 3).unwrap_err();
            assert!(
                matches!(err.kind(), GameErrorKind::MalformedPosition(_)),
                "{input:?} should be malformed"
            );
        }
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(Position::parse(" 7\n", 3).unwrap(), Position::new(7));
    }

    #[test]
    fn test_resolve_legal_rejects_occupied() {
        let mut board = Board::new(3);
        board.set(1, 1, Square::Occupied(Mark::X)).unwrap();
        let err = resolve_legal(&board, Position::new(5)).unwrap_err();
        assert_eq!(err.kind(), &GameErrorKind::CellOccupied { position: 5 });
        assert_eq!(resolve_legal(&board, Position::new(6)).unwrap(), (1, 2));
    }
}

//! Core domain types for N×N noughts and crosses.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{GameError, GameErrorKind};

/// Mark a player places on the board.
///
/// `X` goes to the toss winner and moves first; `O` goes to the other player.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
pub enum Mark {
    /// Mark of the toss winner.
    X,
    /// Mark of the other player.
    O,
}

impl Mark {
    /// Returns the other mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Square {
    /// Nobody has played here.
    #[default]
    Empty,
    /// Cell carries a mark.
    Occupied(Mark),
}

/// N×N board, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    squares: Vec<Square>,
}

impl Board {
    /// Largest supported number of cells per row and column.
    pub const MAX_SIZE: usize = 1024;

    /// Checks that `size` is between 1 and [`Board::MAX_SIZE`].
    ///
    /// # Errors
    ///
    /// Returns [`GameErrorKind::InvalidInput`] for a zero or oversized board.
    pub fn check_size(size: usize) -> Result<(), GameError> {
        if size == 0 {
            return Err(GameError::new(GameErrorKind::InvalidInput(
                "board size cannot be 0".to_string(),
            )));
        }
        if size > Self::MAX_SIZE {
            return Err(GameError::new(GameErrorKind::InvalidInput(format!(
                "board size {} exceeds the maximum of {}",
                size,
                Self::MAX_SIZE
            ))));
        }
        Ok(())
    }

    /// Creates an empty board with `size` cells per row and column.
    ///
    /// # Panics
    ///
    /// Panics if `size²` overflows `usize`. Callers taking sizes from users
    /// run them through [`Board::check_size`] first.
    #[instrument]
    pub fn new(size: usize) -> Self {
        Self {
            size,
            squares: vec![Square::Empty; size * size],
        }
    }

    /// Cells per row (and per column).
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of cells (N²).
    pub fn cell_count(&self) -> usize {
        self.squares.len()
    }

    /// Gets the square at `(row, col)`, or `None` off the board.
    pub fn get(&self, row: usize, col: usize) -> Option<Square> {
        self.index(row, col).map(|i| self.squares[i])
    }

    /// Overwrites the square at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns [`GameErrorKind::InvalidMove`] if the cell lies off the board.
    pub fn set(&mut self, row: usize, col: usize, square: Square) -> Result<(), GameError> {
        let index = self.index(row, col).ok_or_else(|| {
            GameError::new(GameErrorKind::InvalidMove {
                position: (row * self.size + col + 1) as i64,
                max: self.cell_count(),
            })
        })?;
        self.squares[index] = square;
        Ok(())
    }

    /// Checks if a cell is on the board and empty.
    pub fn is_empty(&self, row: usize, col: usize) -> bool {
        matches!(self.get(row, col), Some(Square::Empty))
    }

    /// Returns all squares in row-major order.
    pub fn squares(&self) -> &[Square] {
        &self.squares
    }

    /// Iterates `(row, col)` of every empty cell in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.squares
            .iter()
            .enumerate()
            .filter(|(_, square)| **square == Square::Empty)
            .map(|(i, _)| (i / self.size, i % self.size))
    }

    /// Formats the board for the console.
    ///
    /// Marks are shown as their symbol and empty cells as their 1-indexed
    /// position, each row followed by a separator line.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..self.size {
            for col in 0..self.size {
                let symbol = match self.squares[row * self.size + col] {
                    Square::Empty => (row * self.size + col + 1).to_string(),
                    Square::Occupied(mark) => mark.to_string(),
                };
                result.push_str(&format!("| {} |", symbol));
            }
            result.push('\n');
            result.push_str(&"-".repeat(5 * self.size + 1));
            result.push('\n');
        }
        result
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.size && col < self.size).then_some(row * self.size + col)
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Lifecycle of a game.
///
/// `Ongoing` is the only non-terminal state; nothing leaves a terminal state.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::Display,
)]
pub enum GameState {
    /// Moves are still being played.
    #[default]
    Ongoing,
    /// A human player completed a line.
    WinnerHuman,
    /// An automated player completed a line.
    WinnerAutomated,
    /// The board filled with no completed line.
    Draw,
}

impl GameState {
    /// Returns true once the game has ended.
    pub fn is_terminal(self) -> bool {
        self != GameState::Ongoing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        for size in 1..=6 {
            let board = Board::new(size);
            assert_eq!(board.cell_count(), size * size);
            assert_eq!(board.empty_cells().count(), size * size);
        }
    }

    #[test]
    fn test_set_and_get() {
        let mut board = Board::new(4);
        board.set(2, 3, Square::Occupied(Mark::O)).unwrap();
        assert_eq!(board.get(2, 3), Some(Square::Occupied(Mark::O)));
        assert!(!board.is_empty(2, 3));
        assert_eq!(board.get(4, 0), None);
    }

    #[test]
    fn test_set_off_board_fails() {
        let mut board = Board::new(3);
        let err = board.set(3, 0, Square::Occupied(Mark::X)).unwrap_err();
        assert!(matches!(err.kind(), GameErrorKind::InvalidMove { .. }));
    }

    #[test]
    fn test_display_shows_positions_and_marks() {
        let mut board = Board::new(3);
        board.set(0, 0, Square::Occupied(Mark::X)).unwrap();
        board.set(1, 1, Square::Occupied(Mark::O)).unwrap();
        let text = board.display();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "| X || 2 || 3 |");
        assert_eq!(lines[1], "----------------");
        assert_eq!(lines[2], "| 4 || O || 6 |");
        assert_eq!(lines[4], "| 7 || 8 || 9 |");
    }

    #[test]
    fn test_check_size_bounds() {
        assert!(Board::check_size(1).is_ok());
        assert!(Board::check_size(Board::MAX_SIZE).is_ok());
        for size in [0, Board::MAX_SIZE + 1, 1usize << 32] {
            let err = Board::check_size(size).unwrap_err();
            assert!(matches!(err.kind(), GameErrorKind::InvalidInput(_)));
        }
    }

    #[test]
    fn test_terminal_states() {
        assert!(!GameState::Ongoing.is_terminal());
        assert!(GameState::WinnerHuman.is_terminal());
        assert!(GameState::WinnerAutomated.is_terminal());
        assert!(GameState::Draw.is_terminal());
    }
}

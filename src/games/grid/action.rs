//! Moves as recorded domain events.

use derive_new::new;
use serde::{Deserialize, Serialize};

use super::position::Position;
use super::types::Mark;
use crate::PlayerId;

/// A player placing their mark at `(row, col)`.
///
/// Moves are immutable once created and are appended to the game's history
/// in the order they were played.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, new)]
pub struct Move {
    player: PlayerId,
    mark: Mark,
    row: usize,
    col: usize,
}

impl Move {
    /// Returns the player making this move.
    pub fn player(&self) -> &PlayerId {
        &self.player
    }

    /// Returns the mark placed.
    pub fn mark(&self) -> Mark {
        self.mark
    }

    /// Returns the 0-indexed row.
    pub fn row(&self) -> usize {
        self.row
    }

    /// Returns the 0-indexed column.
    pub fn col(&self) -> usize {
        self.col
    }

    /// Returns the 1-indexed position on a board of `size`.
    pub fn position(&self, size: usize) -> Position {
        Position::from_row_col(self.row, self.col, size)
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> ({}, {})", self.mark, self.row, self.col)
    }
}

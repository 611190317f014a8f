//! Draw detection for N×N noughts and crosses.

use super::super::{Board, Square};
use tracing::instrument;

/// Checks if every cell on the board is occupied.
///
/// A full board with no completed line is a draw.
#[instrument(skip(board), fields(size = board.size()))]
pub fn is_full(board: &Board) -> bool {
    board.squares().iter().all(|s| *s != Square::Empty)
}

//! Win detection for N×N noughts and crosses.
//!
//! Only the lines through the last move can have been completed by it, but
//! both diagonals are scanned on every call whether or not the move lies on
//! them. A diagonal already full of one mark would have ended the game
//! earlier, so the extra scans never change the answer.

use super::super::{Board, Mark, Move, Square};
use tracing::{debug, instrument};

/// Checks whether `last_move` completed a line for its mark.
///
/// Scans the move's row, the move's column, the main diagonal and the
/// anti-diagonal, in that order, returning on the first full line.
#[instrument(skip(board), fields(size = board.size(), last_move = %last_move))]
pub fn check_win(board: &Board, last_move: &Move) -> bool {
    completes_line(board, last_move.row(), last_move.col(), last_move.mark())
}

/// Checks whether the row of `row`, the column of `col`, or either diagonal
/// is entirely `mark`.
pub fn completes_line(board: &Board, row: usize, col: usize, mark: Mark) -> bool {
    let n = board.size();
    let target = Some(Square::Occupied(mark));

    if (0..n).all(|i| board.get(row, i) == target) {
        debug!(row, "Row complete");
        return true;
    }
    if (0..n).all(|i| board.get(i, col) == target) {
        debug!(col, "Column complete");
        return true;
    }
    if (0..n).all(|i| board.get(i, i) == target) {
        debug!("Main diagonal complete");
        return true;
    }
    if (0..n).all(|i| board.get(i, n - 1 - i) == target) {
        debug!("Anti-diagonal complete");
        return true;
    }

    false
}

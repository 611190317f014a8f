//! Heuristic move choice for automated players.
//!
//! Priority, first applicable wins:
//! 1. a cell that completes a line for us,
//! 2. a cell that would complete a line for the opponent,
//! 3. the centre,
//! 4. a corner, in the order top-left, top-right, bottom-left, bottom-right,
//! 5. the first free cell in row-major order.
//!
//! Probing happens on a scratch copy of the board; the caller's board is
//! never written to.

use tracing::{debug, instrument};

use super::position::Position;
use super::rules::completes_line;
use super::types::{Board, Mark, Square};

/// Picks a position for `mark`, or `None` when the board is full.
#[instrument(skip(board), fields(size = board.size()))]
pub fn choose_move(board: &Board, mark: Mark) -> Option<Position> {
    let size = board.size();
    let mut scratch = board.clone();

    if let Some(position) = find_winning_move(&mut scratch, mark) {
        debug!(%position, "Taking winning move");
        return Some(position);
    }

    if let Some(position) = find_winning_move(&mut scratch, mark.opponent()) {
        debug!(%position, "Blocking opponent");
        return Some(position);
    }

    let centre = size / 2;
    if board.is_empty(centre, centre) {
        debug!("Taking centre");
        return Some(Position::from_row_col(centre, centre, size));
    }

    let last = size.checked_sub(1)?;
    let corners = [(0, 0), (0, last), (last, 0), (last, last)];
    if let Some(&(row, col)) = corners.iter().find(|(r, c)| board.is_empty(*r, *c)) {
        debug!(row, col, "Taking corner");
        return Some(Position::from_row_col(row, col, size));
    }

    let (row, col) = board.empty_cells().next()?;
    debug!(row, col, "Taking first free cell");
    Some(Position::from_row_col(row, col, size))
}

/// Finds the first empty cell, row-major, where `mark` would complete a line.
///
/// Every probed cell is reset to empty before returning, so `scratch` comes
/// back unchanged.
pub fn find_winning_move(scratch: &mut Board, mark: Mark) -> Option<Position> {
    let size = scratch.size();
    let candidates: Vec<_> = scratch.empty_cells().collect();

    for (row, col) in candidates {
        scratch.set(row, col, Square::Occupied(mark)).ok()?;
        let wins = completes_line(scratch, row, col, mark);
        scratch.set(row, col, Square::Empty).ok()?;
        if wins {
            return Some(Position::from_row_col(row, col, size));
        }
    }

    None
}

//! Heuristic opponent: win, block, center, corner, anything.
//!
//! A greedy rule list, not a search. It never misses a one-move win or a
//! one-move block, and it can still be forked by a careful human.

use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::{debug, instrument};

use crate::position::Position;
use crate::rules::check_winner;
use crate::types::{Board, Marker};

/// Picks the opponent's next cell, or `None` when the board is full.
///
/// Priorities, first match wins:
/// 1. a cell where `own` completes a line (scanned 0..8)
/// 2. a cell where `opponent` would complete a line (scanned 0..8)
/// 3. the center
/// 4. a uniformly random empty corner
/// 5. a uniformly random empty cell
#[instrument(skip(board, rng), fields(board = %board.display()))]
pub fn select_move<R>(board: &Board, own: Marker, opponent: Marker, rng: &mut R) -> Option<Position>
where
    R: Rng + ?Sized,
{
    let empty = Position::valid_moves(board);

    if let Some(pos) = completing_cell(board, &empty, own) {
        debug!(position = %pos, "Taking the win");
        return Some(pos);
    }

    if let Some(pos) = completing_cell(board, &empty, opponent) {
        debug!(position = %pos, "Blocking");
        return Some(pos);
    }

    if board.is_empty(Position::Center) {
        debug!("Taking the center");
        return Some(Position::Center);
    }

    let corners: Vec<Position> = Position::CORNERS
        .iter()
        .copied()
        .filter(|pos| board.is_empty(*pos))
        .collect();
    if let Some(pos) = corners.choose(rng) {
        debug!(position = %pos, "Taking a corner");
        return Some(*pos);
    }

    let pick = empty.choose(rng).copied();
    debug!(position = ?pick, "Falling back to any open square");
    pick
}

/// First empty cell (in index order) where `marker` would complete a line.
fn completing_cell(board: &Board, empty: &[Position], marker: Marker) -> Option<Position> {
    empty
        .iter()
        .copied()
        .find(|pos| check_winner(&board.with(*pos, marker)) == Some(marker))
}

//! Game rules for tic-tac-toe.
//!
//! Pure functions evaluating a board snapshot. Rules are separated from
//! board storage so the opponent policy can probe hypothetical boards.

mod draw;
mod win;

pub use draw::{is_draw, is_full};
pub use win::{WINNING_LINES, check_winner};

use crate::types::{Board, GameStatus};
use tracing::instrument;

/// Classifies a board as won, drawn or still in progress.
///
/// Lines are checked in the fixed order of [`WINNING_LINES`]; the first
/// complete line decides the winner.
#[instrument]
pub fn evaluate(board: &Board) -> GameStatus {
    if let Some(marker) = check_winner(board) {
        GameStatus::Won(marker)
    } else if is_full(board) {
        GameStatus::Draw
    } else {
        GameStatus::InProgress
    }
}

//! Win detection logic for tic-tac-toe.

use crate::position::Position;
use crate::types::{Board, Marker, Square};
use tracing::instrument;

/// The eight winning lines: rows top to bottom, columns left to right,
/// then the two diagonals.
pub const WINNING_LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [
        Position::MiddleLeft,
        Position::Center,
        Position::MiddleRight,
    ],
    [
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ],
    // Columns
    [
        Position::TopLeft,
        Position::MiddleLeft,
        Position::BottomLeft,
    ],
    [
        Position::TopCenter,
        Position::Center,
        Position::BottomCenter,
    ],
    [
        Position::TopRight,
        Position::MiddleRight,
        Position::BottomRight,
    ],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// Checks if there is a winner on the board.
///
/// Returns the marker of the first complete line, `None` otherwise.
#[instrument]
pub fn check_winner(board: &Board) -> Option<Marker> {
    for [a, b, c] in WINNING_LINES {
        let sq = board.get(a);
        if sq != Square::Empty && sq == board.get(b) && sq == board.get(c) {
            return sq.marker();
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const X: Marker = Marker::new('X');
    const O: Marker = Marker::new('O');

    #[test]
    fn test_no_winner_empty_board() {
        let board = Board::new();
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_winner_top_row() {
        let board = Board::new()
            .with(Position::TopLeft, X)
            .with(Position::TopCenter, X)
            .with(Position::TopRight, X);
        assert_eq!(check_winner(&board), Some(X));
    }

    #[test]
    fn test_winner_anti_diagonal() {
        let board = Board::new()
            .with(Position::TopRight, O)
            .with(Position::Center, O)
            .with(Position::BottomLeft, O);
        assert_eq!(check_winner(&board), Some(O));
    }

    #[test]
    fn test_no_winner_mixed_line() {
        let board = Board::new()
            .with(Position::TopLeft, X)
            .with(Position::TopCenter, O)
            .with(Position::TopRight, X);
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_rows_scanned_top_to_bottom() {
        // Not reachable in play, but pins the scan order.
        let board = Board::new()
            .with(Position::BottomLeft, O)
            .with(Position::BottomCenter, O)
            .with(Position::BottomRight, O)
            .with(Position::TopLeft, X)
            .with(Position::TopCenter, X)
            .with(Position::TopRight, X);
        assert_eq!(check_winner(&board), Some(X));
    }

    #[test]
    fn test_columns_scanned_left_to_right() {
        let board = Board::new()
            .with(Position::TopRight, X)
            .with(Position::MiddleRight, X)
            .with(Position::BottomRight, X)
            .with(Position::TopLeft, O)
            .with(Position::MiddleLeft, O)
            .with(Position::BottomLeft, O);
        assert_eq!(check_winner(&board), Some(O));
    }
}

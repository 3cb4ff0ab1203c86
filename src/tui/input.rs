//! Key mapping for the game board.

use crossterm::event::KeyCode;
use tictactoe_engine::Position;

/// Moves the cursor one square for an arrow key, stopping at the edges.
pub fn move_cursor(cursor: Position, key: KeyCode) -> Position {
    let (row, col) = (cursor.row(), cursor.col());
    let (row, col) = match key {
        KeyCode::Up => (row.saturating_sub(1), col),
        KeyCode::Down => ((row + 1).min(2), col),
        KeyCode::Left => (row, col.saturating_sub(1)),
        KeyCode::Right => (row, (col + 1).min(2)),
        _ => (row, col),
    };
    Position::from_index(row * 3 + col).unwrap_or(cursor)
}

/// Square for a digit key `1`..`9`, numbered left to right, top to bottom.
pub fn digit_square(key: KeyCode) -> Option<Position> {
    match key {
        KeyCode::Char(c) => Position::from_digit(c),
        _ => None,
    }
}

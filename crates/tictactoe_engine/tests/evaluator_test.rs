//! Tests for win/draw evaluation.

use tictactoe_engine::{Board, GameStatus, Marker, WINNING_LINES, evaluate};

const X: Marker = Marker::new('X');
const O: Marker = Marker::new('O');

fn board(cells: &str) -> Board {
    let mut out = [None; 9];
    for (slot, c) in out.iter_mut().zip(cells.chars()) {
        *slot = match c {
            'X' => Some(X),
            'O' => Some(O),
            _ => None,
        };
    }
    Board::from_cells(out)
}

#[test]
fn test_empty_board_in_progress() {
    assert_eq!(evaluate(&Board::new()), GameStatus::InProgress);
}

#[test]
fn test_every_line_wins() {
    for line in WINNING_LINES {
        let mut b = Board::new();
        for pos in line {
            b = b.with(pos, O);
        }
        assert_eq!(evaluate(&b), GameStatus::Won(O), "line {line:?}");
    }
}

#[test]
fn test_full_board_without_line_is_draw() {
    assert_eq!(evaluate(&board("XOXXOOOXX")), GameStatus::Draw);
}

#[test]
fn test_full_board_with_line_is_win() {
    // Last move completes the bottom row on a full board.
    assert_eq!(evaluate(&board("XOXOOXXXX")), GameStatus::Won(X));
}

#[test]
fn test_partial_board_in_progress() {
    assert_eq!(evaluate(&board("XO__X__O_")), GameStatus::InProgress);
}

#[test]
fn test_evaluation_matches_definition_for_all_boards() {
    // Exhaustive over 3^9 boards: winner iff a uniform occupied triple exists,
    // draw iff no winner and no empty square.
    for code in 0..3usize.pow(9) {
        let mut cells = [None; 9];
        let mut rest = code;
        for cell in cells.iter_mut() {
            *cell = match rest % 3 {
                1 => Some(X),
                2 => Some(O),
                _ => None,
            };
            rest /= 3;
        }
        let b = Board::from_cells(cells);

        let uniform = WINNING_LINES.iter().find_map(|[a, b2, c]| {
            let m = cells[a.to_index()]?;
            (cells[b2.to_index()] == Some(m) && cells[c.to_index()] == Some(m)).then_some(m)
        });
        let expected = match uniform {
            Some(m) => GameStatus::Won(m),
            None if cells.iter().all(Option::is_some) => GameStatus::Draw,
            None => GameStatus::InProgress,
        };
        assert_eq!(evaluate(&b), expected, "board {}", b.display());
    }
}

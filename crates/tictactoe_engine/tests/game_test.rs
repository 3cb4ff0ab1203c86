//! Tests for the game state machine.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tictactoe_engine::{
    Board, Game, GameMode, Marker, MoveError, Outcome, Phase, Position, Seat, Square,
};

const X: Marker = Marker::new('❌');
const O: Marker = Marker::new('⭕');

#[test]
fn test_two_moves_build_expected_history() {
    let mut game = Game::new([X, O], GameMode::HumanVsHuman);
    game.play_at(Position::Center).unwrap();
    game.play_at(Position::TopLeft).unwrap();

    let history = game.history();
    assert_eq!(history.len(), 3);
    let expected = Board::new()
        .with(Position::Center, X)
        .with(Position::TopLeft, O);
    assert_eq!(history.snapshots()[2], expected);
    assert_eq!(history.snapshots()[1].occupied_count(), 1);
    assert_eq!(history.snapshots()[1].get(Position::Center), Square::Occupied(X));
}

#[test]
fn test_playing_from_earlier_move_discards_later_history() {
    let mut game = Game::new([X, O], GameMode::HumanVsHuman);
    for pos in [
        Position::TopLeft,
        Position::Center,
        Position::BottomRight,
        Position::TopRight,
    ] {
        game.play_at(pos).unwrap();
    }
    assert_eq!(game.history().len(), 5);

    assert!(game.jump_to(2));
    assert_eq!(game.to_move(), Seat::First);
    game.play_at(Position::BottomLeft).unwrap();

    assert_eq!(game.history().len(), 4);
    assert_eq!(game.history().current_move(), 3);
    assert!(game.board().is_empty(Position::BottomRight));
    assert_eq!(game.board().get(Position::BottomLeft), Square::Occupied(X));
}

#[test]
fn test_reset_from_terminal_state() {
    let mut game = Game::new([X, O], GameMode::HumanVsHuman);
    for pos in [
        Position::TopLeft,
        Position::MiddleLeft,
        Position::TopCenter,
        Position::Center,
        Position::TopRight,
    ] {
        game.play_at(pos).unwrap();
    }
    assert_eq!(game.outcome(), Outcome::Winner(Seat::First));

    game.reset();
    assert_eq!(game.history().snapshots(), &[Board::new()]);
    assert_eq!(game.history().current_move(), 0);
    assert_eq!(game.outcome(), Outcome::InProgress);
    assert_eq!(game.phase(), Phase::AwaitingMove(Seat::First));
}

#[test]
fn test_draw_reached_by_alternating_moves() {
    // X O X / X O O / O X X
    let mut game = Game::new([X, O], GameMode::HumanVsHuman);
    for idx in [0, 1, 2, 4, 3, 5, 7, 6, 8] {
        let outcome = game.play_at(Position::from_index(idx).unwrap()).unwrap();
        if idx != 8 {
            assert_eq!(outcome, Outcome::InProgress);
        }
    }
    assert_eq!(game.outcome(), Outcome::Draw);
    assert_eq!(game.play_at(Position::Center), Err(MoveError::GameOver));
}

#[test]
fn test_computer_wins_when_human_ignores_threat() {
    let mut game = Game::new([X, O], GameMode::HumanVsComputer);
    let mut rng = StdRng::seed_from_u64(11);

    game.play_at(Position::TopLeft).unwrap();
    assert_eq!(game.play_opponent_move(&mut rng), Some(Position::Center));
    game.play_at(Position::BottomRight).unwrap();
    // No win or block available; computer takes a random open corner.
    let corner = game.play_opponent_move(&mut rng).unwrap();
    assert!(Position::CORNERS.contains(&corner));

    // Human plays somewhere harmless instead of blocking the diagonal through the center.
    let block = match corner {
        Position::TopRight => Position::BottomLeft,
        _ => Position::TopRight,
    };
    let harmless = Position::valid_moves(game.board())
        .into_iter()
        .find(|p| *p != block)
        .unwrap();
    game.play_at(harmless).unwrap();

    assert!(game.play_opponent_move(&mut rng).is_some());
    assert_eq!(game.outcome(), Outcome::Winner(Seat::Second));
}

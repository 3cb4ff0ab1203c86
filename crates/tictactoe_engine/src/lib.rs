//! Pure tic-tac-toe game logic.
//!
//! # Architecture
//!
//! - **Types**: markers, seats, squares and the 3x3 board
//! - **Rules**: win/draw evaluation over the eight fixed lines
//! - **Policy**: the greedy heuristic opponent
//! - **History**: append-only board snapshots with redo-discard
//! - **Game**: the turn state machine tying the above together
//!
//! Nothing here touches a clock or performs I/O; randomness is injected.
//!
//! # Example
//!
//! ```
//! use tictactoe_engine::{Game, GameMode, Marker, Outcome, Position};
//!
//! let mut game = Game::new([Marker::new('X'), Marker::new('O')], GameMode::HumanVsHuman);
//! game.play_at(Position::Center).unwrap();
//! game.play_at(Position::TopLeft).unwrap();
//! assert_eq!(game.history().len(), 3);
//! assert_eq!(game.outcome(), Outcome::InProgress);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod game;
mod history;
mod policy;
mod position;
mod rules;
mod types;

pub use game::{Game, GameMode, MoveError, Outcome, Phase};
pub use history::History;
pub use policy::select_move;
pub use position::Position;
pub use rules::{WINNING_LINES, check_winner, evaluate, is_draw, is_full};
pub use types::{Board, GameStatus, Marker, Seat, Square};

//! Turn and history state machine for tic-tac-toe.
//!
//! The outcome is never stored: it is recomputed from the current board
//! each time it is asked for, so history navigation and resets cannot
//! leave a stale verdict behind.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::history::History;
use crate::policy::select_move;
use crate::position::Position;
use crate::rules::evaluate;
use crate::types::{Board, GameStatus, Marker, Seat};

/// Who controls the second seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum GameMode {
    /// Two people share the keyboard.
    #[default]
    HumanVsHuman,
    /// The second seat is played by the heuristic opponent.
    HumanVsComputer,
}

impl GameMode {
    /// Whether `seat` is played by the computer in this mode.
    pub fn is_computer(self, seat: Seat) -> bool {
        self == GameMode::HumanVsComputer && seat == Seat::Second
    }
}

/// Outcome of the current board from the seats' point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Game continues.
    InProgress,
    /// The seat completed a line.
    Winner(Seat),
    /// Board full with no line.
    Draw,
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Seat> {
        match self {
            Outcome::Winner(seat) => Some(*seat),
            _ => None,
        }
    }

    /// True for a win or a draw.
    pub fn is_terminal(&self) -> bool {
        *self != Outcome::InProgress
    }
}

/// State machine phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the seat to move.
    AwaitingMove(Seat),
    /// The game is over.
    Terminal(Outcome),
}

/// Reasons a move is refused. The game state is untouched in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The square at the position is already occupied.
    #[display("Square {} is already occupied", _0)]
    SquareOccupied(Position),

    /// The game is already over.
    #[display("Game is already over")]
    GameOver,

    /// The seat to move is computer-controlled.
    #[display("It's not your turn; waiting for {:?}", _0)]
    NotYourTurn(Seat),
}

impl std::error::Error for MoveError {}

/// Tic-tac-toe game engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    history: History,
    markers: [Marker; 2],
    mode: GameMode,
}

impl Game {
    /// Creates a new game. `markers[0]` belongs to the first seat.
    ///
    /// The two markers must differ; a shared marker makes wins unattributable.
    #[instrument]
    pub fn new(markers: [Marker; 2], mode: GameMode) -> Self {
        debug_assert_ne!(markers[0], markers[1], "both seats given the same marker");
        Self {
            history: History::new(),
            markers,
            mode,
        }
    }

    /// Returns the move history.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Board at the current move.
    pub fn board(&self) -> &Board {
        self.history.current_board()
    }

    /// Who controls the second seat.
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Marker used by `seat`.
    pub fn marker(&self, seat: Seat) -> Marker {
        self.markers[seat.index()]
    }

    /// Seat that owns `marker`, if either does.
    pub fn seat_of(&self, marker: Marker) -> Option<Seat> {
        if marker == self.markers[0] {
            Some(Seat::First)
        } else if marker == self.markers[1] {
            Some(Seat::Second)
        } else {
            None
        }
    }

    /// Seat to move: the first seat on even move indices.
    pub fn to_move(&self) -> Seat {
        if self.history.current_move() % 2 == 0 {
            Seat::First
        } else {
            Seat::Second
        }
    }

    /// Evaluator verdict on the current board.
    pub fn status(&self) -> GameStatus {
        evaluate(self.board())
    }

    /// Current outcome in terms of seats.
    pub fn outcome(&self) -> Outcome {
        match self.status() {
            GameStatus::InProgress => Outcome::InProgress,
            GameStatus::Draw => Outcome::Draw,
            GameStatus::Won(marker) => match self.seat_of(marker) {
                Some(seat) => Outcome::Winner(seat),
                // Only reachable from a board built outside this game.
                None => {
                    warn!(%marker, "Winning line belongs to neither seat");
                    Outcome::Draw
                }
            },
        }
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        match self.outcome() {
            Outcome::InProgress => Phase::AwaitingMove(self.to_move()),
            outcome => Phase::Terminal(outcome),
        }
    }

    /// True when the computer seat is due to move in a live game.
    pub fn is_computer_turn(&self) -> bool {
        self.phase() == Phase::AwaitingMove(Seat::Second) && self.mode.is_computer(Seat::Second)
    }

    /// Plays a human move at `pos`.
    ///
    /// Refused while the game is over, while the computer is to move, or
    /// when the square is taken.
    #[instrument(skip(self), fields(current_move = self.history.current_move()))]
    pub fn play_at(&mut self, pos: Position) -> Result<Outcome, MoveError> {
        let seat = match self.phase() {
            Phase::Terminal(_) => return Err(MoveError::GameOver),
            Phase::AwaitingMove(seat) => seat,
        };
        if self.mode.is_computer(seat) {
            debug!(?seat, "Ignoring human move during computer turn");
            return Err(MoveError::NotYourTurn(seat));
        }
        self.place(seat, pos)
    }

    /// Lets the computer seat move if it is due. Returns the cell it took.
    #[instrument(skip(self, rng), fields(current_move = self.history.current_move()))]
    pub fn play_opponent_move<R>(&mut self, rng: &mut R) -> Option<Position>
    where
        R: Rng + ?Sized,
    {
        if !self.is_computer_turn() {
            debug!("Opponent move not due");
            return None;
        }
        let own = self.marker(Seat::Second);
        let opponent = self.marker(Seat::First);
        let pos = select_move(self.board(), own, opponent, rng)?;
        match self.place(Seat::Second, pos) {
            Ok(_) => Some(pos),
            Err(e) => {
                warn!(error = %e, "Policy chose an unplayable square");
                None
            }
        }
    }

    /// Clears the history back to the empty board.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        info!("Resetting game");
        self.history.reset();
    }

    /// Moves to an earlier (or later) snapshot without discarding anything.
    #[instrument(skip(self))]
    pub fn jump_to(&mut self, move_index: usize) -> bool {
        self.history.jump_to(move_index)
    }

    fn place(&mut self, seat: Seat, pos: Position) -> Result<Outcome, MoveError> {
        if !self.board().is_empty(pos) {
            return Err(MoveError::SquareOccupied(pos));
        }
        let next = self.board().with(pos, self.marker(seat));
        self.history.record(next);

        let outcome = self.outcome();
        info!(?seat, position = %pos, ?outcome, "Move applied");
        Ok(outcome)
    }
}

//! Screen trait and intent type for the page state machine.

use crossterm::event::KeyEvent;
use ratatui::Frame;
use tictactoe_engine::{Position, Seat};

use crate::lobby::LobbyController;
use crate::lobby::roster::PlayerCount;

/// What the player asked for by pressing a key.
///
/// Screens return this from [`Screen::handle_key`]; the
/// [`LobbyController`] applies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Nothing to do.
    Stay,
    /// Choose 1 or 2 players on the welcome page.
    SelectPlayers(PlayerCount),
    /// Type a character into a name field.
    TypeChar {
        /// Whose name is being edited.
        seat: Seat,
        /// Character typed.
        ch: char,
    },
    /// Delete the last character of a name.
    Backspace(Seat),
    /// Step through the marker palette.
    CycleMarker {
        /// Whose marker changes.
        seat: Seat,
        /// +1 for next, -1 for previous.
        step: isize,
    },
    /// Press the start button.
    StartGame,
    /// Place a marker.
    PlayAt(Position),
    /// Clear the board.
    Reset,
    /// Return to the welcome page.
    Back,
    /// Leave the application.
    Quit,
}

/// Trait implemented by each page's view.
///
/// Views keep only presentation state (cursor, focus); everything else is
/// read from the controller.
pub trait Screen {
    /// Renders the screen into the provided [`Frame`].
    fn render(&self, frame: &mut Frame, lobby: &LobbyController);

    /// Handles a key event and returns the resulting [`Intent`].
    fn handle_key(&mut self, key: KeyEvent, lobby: &LobbyController) -> Intent;
}

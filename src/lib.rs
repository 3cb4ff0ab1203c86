//! Emoji Tic-Tac-Toe - terminal front end
//!
//! Two pages lead to a game: a welcome page choosing one or two players, and
//! a setup page for names and emoji markers. The game page plays against a
//! friend or against the rule-based AI from [`tictactoe_engine`].
//!
//! # Architecture
//!
//! - **Lobby**: page state machine ([`LobbyController`]) and its screens
//! - **Arena**: the running match with its cancellable timers ([`ActiveMatch`])
//! - **Timers**: explicit timer bookkeeping driven by the caller's clock
//! - **Celebration**: confetti for a won game
//! - **TUI**: `ratatui` rendering and the event loop
//!
//! # Example
//!
//! ```
//! use emoji_tictactoe::{LobbyController, MatchTiming, PageKind, PlayerCount};
//! use std::time::Instant;
//! use tictactoe_engine::{Position, Seat};
//!
//! let mut lobby = LobbyController::new(MatchTiming::default(), Some(1));
//! lobby.select_players(PlayerCount::Two);
//! let form = lobby.setup_form_mut().unwrap();
//! form.set_name(Seat::First, "Alice");
//! form.set_name(Seat::Second, "Bob");
//! lobby.start_match(Instant::now()).unwrap();
//! assert_eq!(lobby.page_kind(), PageKind::Playing);
//!
//! lobby.play_at(Position::Center, Instant::now());
//! assert_eq!(lobby.status_line().unwrap(), "Next player: Bob ⭕");
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod celebration;
mod config;
mod feedback;
mod lobby;
mod timers;
mod tui;

// Crate-level exports - Configuration
pub use config::{AppConfig, ConfigError, MatchTiming};

// Crate-level exports - Timers
pub use timers::{MIN_INTERVAL, TimerBook, TimerId};

// Crate-level exports - Celebration
pub use celebration::{Burst, Confetti, PEAK_PARTICLES, Particle, bursts_for_tick};

// Crate-level exports - Feedback
pub use feedback::{Feedback, Muted, TerminalBell, for_sound};

// Crate-level exports - Lobby
pub use lobby::arena::{ActiveMatch, MatchEvent, MatchTimer};
pub use lobby::roster::{
    COMPUTER_NAME, MAX_NAME_LEN, MatchConfig, PALETTE, PlayerCount, PlayerProfile, SetupError,
    SetupForm,
};
pub use lobby::{
    GameScreen, Intent, LobbyController, PageKind, Screen, SetupField, SetupScreen,
    WelcomeScreen,
};

// Crate-level exports - Terminal UI
pub use tui::{poll_timeout, run_tui};

//! Screen implementations for the page state machine.

mod game;
mod setup;
mod welcome;

pub use game::GameScreen;
pub use setup::{SetupField, SetupScreen};
pub use welcome::WelcomeScreen;

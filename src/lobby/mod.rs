//! Lobby system: welcome, setup and game pages driven by one controller.

pub mod arena;
mod controller;
pub mod roster;
mod screen;
mod screens;

pub use controller::{LobbyController, PageKind};
pub use screen::{Intent, Screen};
pub use screens::{GameScreen, SetupField, SetupScreen, WelcomeScreen};

//! Best-effort audio feedback.
//!
//! Failures here are logged and swallowed; they never reach the game.

use std::io::Write;
use tracing::{debug, instrument};

/// Fire-and-forget feedback for player actions.
pub trait Feedback {
    /// A human placed a marker.
    fn click(&mut self);
}

/// Rings the terminal bell.
#[derive(Debug, Default)]
pub struct TerminalBell;

impl Feedback for TerminalBell {
    #[instrument(skip(self))]
    fn click(&mut self) {
        let mut stdout = std::io::stdout();
        if let Err(e) = stdout.write_all(b"\x07").and_then(|()| stdout.flush()) {
            debug!(error = %e, "Audio not available");
        }
    }
}

/// Feedback that does nothing.
#[derive(Debug, Default)]
pub struct Muted;

impl Feedback for Muted {
    fn click(&mut self) {}
}

/// Picks the bell or silence.
pub fn for_sound(enabled: bool) -> Box<dyn Feedback> {
    if enabled {
        Box::new(TerminalBell)
    } else {
        Box::new(Muted)
    }
}

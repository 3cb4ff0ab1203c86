//! Append-only board snapshots with a movable cursor.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::types::Board;

/// Move history: `snapshots[0]` is the empty board and each later entry adds
/// exactly one mark to the one before it.
///
/// Recording from a point earlier than the last entry discards everything
/// after that point first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    snapshots: Vec<Board>,
    current: usize,
}

impl History {
    /// Creates a history holding only the empty board.
    pub fn new() -> Self {
        Self {
            snapshots: vec![Board::new()],
            current: 0,
        }
    }

    /// Board at the current move.
    pub fn current_board(&self) -> &Board {
        &self.snapshots[self.current]
    }

    /// Index of the current move (0 = empty board).
    pub fn current_move(&self) -> usize {
        self.current
    }

    /// Number of snapshots, including the empty board.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always false: the empty board is never removed.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// All snapshots in order.
    pub fn snapshots(&self) -> &[Board] {
        &self.snapshots
    }

    /// Appends `board` after the current move, discarding any later entries.
    #[instrument(skip(self, board), fields(current = self.current, len = self.snapshots.len()))]
    pub fn record(&mut self, board: Board) {
        let discarded = self.snapshots.len() - (self.current + 1);
        if discarded > 0 {
            debug!(discarded, "Discarding snapshots after current move");
        }
        self.snapshots.truncate(self.current + 1);
        self.snapshots.push(board);
        self.current = self.snapshots.len() - 1;
    }

    /// Moves the cursor to an existing snapshot. Returns false if out of range.
    #[instrument(skip(self), fields(len = self.snapshots.len()))]
    pub fn jump_to(&mut self, index: usize) -> bool {
        if index >= self.snapshots.len() {
            debug!("Jump target out of range");
            return false;
        }
        self.current = index;
        true
    }

    /// Back to the single empty board.
    pub fn reset(&mut self) {
        self.snapshots.clear();
        self.snapshots.push(Board::new());
        self.current = 0;
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

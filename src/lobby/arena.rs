//! The match being played: game state plus the timers that hang off it.
//!
//! Every state change cancels all pending timers and schedules afresh from
//! the new state, so a timer can only ever act on the state that armed it.

use derive_getters::Getters;
use rand::rngs::StdRng;
use std::time::Instant;
use tictactoe_engine::{Game, Outcome, Phase, Position, Seat};
use tracing::{debug, info, instrument, warn};

use crate::celebration::{Burst, bursts_for_tick};
use crate::config::MatchTiming;
use crate::lobby::roster::MatchConfig;
use crate::timers::{TimerBook, TimerId};

/// What a match timer is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchTimer {
    /// Let the computer seat move.
    OpponentMove,
    /// Clear a drawn board.
    DrawReset,
    /// Emit the next confetti bursts.
    Celebration,
}

/// Something the presentation layer may want to react to.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchEvent {
    /// A marker was placed.
    MovePlayed {
        /// Seat that moved.
        seat: Seat,
        /// Square taken.
        position: Position,
        /// True when the AI made the move.
        by_computer: bool,
    },
    /// The seat completed a line.
    Won(Seat),
    /// The board filled with no line.
    Draw,
    /// The player asked for a fresh board.
    Reset,
    /// A drawn board was cleared by its timer.
    AutoReset,
    /// Confetti to spray.
    Confetti(Burst),
}

#[derive(Debug, Default, Clone, Copy)]
struct PendingTimers {
    opponent: Option<TimerId>,
    draw_reset: Option<TimerId>,
    celebration: Option<TimerId>,
}

impl PendingTimers {
    fn get(&self, kind: MatchTimer) -> Option<TimerId> {
        match kind {
            MatchTimer::OpponentMove => self.opponent,
            MatchTimer::DrawReset => self.draw_reset,
            MatchTimer::Celebration => self.celebration,
        }
    }

    fn slot(&mut self, kind: MatchTimer) -> &mut Option<TimerId> {
        match kind {
            MatchTimer::OpponentMove => &mut self.opponent,
            MatchTimer::DrawReset => &mut self.draw_reset,
            MatchTimer::Celebration => &mut self.celebration,
        }
    }

    /// Takes the slot if `id` is the timer it holds.
    fn claim(&mut self, kind: MatchTimer, id: TimerId) -> bool {
        let slot = self.slot(kind);
        if *slot == Some(id) {
            *slot = None;
            true
        } else {
            false
        }
    }
}

/// A match in progress on the game page.
#[derive(Debug, Getters)]
pub struct ActiveMatch {
    config: MatchConfig,
    game: Game,
    timing: MatchTiming,
    #[getter(skip)]
    timers: TimerBook<MatchTimer>,
    #[getter(skip)]
    pending: PendingTimers,
    #[getter(skip)]
    celebration_ends: Option<Instant>,
    #[getter(skip)]
    rng: StdRng,
}

impl ActiveMatch {
    /// Starts a fresh game for `config`.
    #[instrument(skip(config, rng, now), fields(single_player = config.single_player()))]
    pub fn new(config: MatchConfig, timing: MatchTiming, rng: StdRng, now: Instant) -> Self {
        info!(
            player1 = %config.player(Seat::First).name(),
            player2 = %config.player(Seat::Second).name(),
            "Starting match"
        );
        let game = Game::new(config.markers(), config.mode());
        let mut arena = Self {
            config,
            game,
            timing,
            timers: TimerBook::new(),
            pending: PendingTimers::default(),
            celebration_ends: None,
            rng,
        };
        let mut events = Vec::new();
        arena.reschedule(now, &mut events);
        arena
    }

    /// Human move at `pos`. Invalid moves are ignored and yield no events.
    #[instrument(skip(self, now))]
    pub fn play_at(&mut self, pos: Position, now: Instant) -> Vec<MatchEvent> {
        let seat = self.game.to_move();
        match self.game.play_at(pos) {
            Ok(_) => {
                let mut events = vec![MatchEvent::MovePlayed {
                    seat,
                    position: pos,
                    by_computer: false,
                }];
                self.reschedule(now, &mut events);
                events
            }
            Err(e) => {
                debug!(reason = %e, "Move ignored");
                Vec::new()
            }
        }
    }

    /// Clears the board. Allowed in any state.
    #[instrument(skip(self, now))]
    pub fn reset(&mut self, now: Instant) -> Vec<MatchEvent> {
        self.game.reset();
        let mut events = vec![MatchEvent::Reset];
        self.reschedule(now, &mut events);
        events
    }

    /// Moves to an earlier snapshot in the history.
    #[instrument(skip(self, now))]
    pub fn jump_to(&mut self, move_index: usize, now: Instant) -> Vec<MatchEvent> {
        if !self.game.jump_to(move_index) {
            return Vec::new();
        }
        let mut events = Vec::new();
        self.reschedule(now, &mut events);
        events
    }

    /// Fires whatever timers are due at `now`.
    #[instrument(skip(self, now))]
    pub fn tick(&mut self, now: Instant) -> Vec<MatchEvent> {
        let mut events = Vec::new();
        for (id, kind) in self.timers.due(now) {
            if !self.pending.claim(kind, id) {
                debug!(%id, ?kind, "Ignoring stale timer");
                continue;
            }
            match kind {
                MatchTimer::OpponentMove => self.fire_opponent_move(now, &mut events),
                MatchTimer::DrawReset => {
                    info!("Draw timer elapsed, resetting board");
                    self.game.reset();
                    events.push(MatchEvent::AutoReset);
                    self.reschedule(now, &mut events);
                }
                MatchTimer::Celebration => self.fire_celebration(id, now, &mut events),
            }
        }
        events
    }

    /// Earliest pending timer deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Whether a timer of `kind` is armed.
    pub fn is_pending(&self, kind: MatchTimer) -> bool {
        self.pending
            .get(kind)
            .is_some_and(|id| self.timers.is_pending(id))
    }

    /// True while the computer is expected to move.
    pub fn is_computer_turn(&self) -> bool {
        self.game.is_computer_turn()
    }

    /// Status line for the game page.
    pub fn status_line(&self) -> String {
        match self.game.phase() {
            Phase::Terminal(Outcome::Winner(seat)) => {
                let player = self.config.player(seat);
                format!("Winner: {} {}", player.name(), player.marker())
            }
            Phase::Terminal(_) => {
                // Whole seconds, rounded up so a short countdown never reads 0.
                let secs = self.timing.draw_reset.as_millis().div_ceil(1000);
                let unit = if secs == 1 { "second" } else { "seconds" };
                format!("It's a draw! Resetting in {secs} {unit}...")
            }
            Phase::AwaitingMove(seat) if self.game.mode().is_computer(seat) => {
                format!("{} is thinking...", self.config.player(seat).name())
            }
            Phase::AwaitingMove(seat) => {
                let player = self.config.player(seat);
                format!("Next player: {} {}", player.name(), player.marker())
            }
        }
    }

    fn fire_opponent_move(&mut self, now: Instant, events: &mut Vec<MatchEvent>) {
        match self.game.play_opponent_move(&mut self.rng) {
            Some(position) => {
                events.push(MatchEvent::MovePlayed {
                    seat: Seat::Second,
                    position,
                    by_computer: true,
                });
                self.reschedule(now, events);
            }
            None => warn!("Opponent timer fired with no move to make"),
        }
    }

    fn fire_celebration(&mut self, id: TimerId, now: Instant, events: &mut Vec<MatchEvent>) {
        let time_left = self
            .celebration_ends
            .map(|end| end.saturating_duration_since(now))
            .unwrap_or_default();
        let bursts = bursts_for_tick(time_left, self.timing.celebration, &mut self.rng);
        events.extend(bursts.into_iter().map(MatchEvent::Confetti));
        // Repeating: keep the slot while the book still holds it.
        if self.timers.is_pending(id) {
            self.pending.celebration = Some(id);
        } else {
            self.celebration_ends = None;
        }
    }

    /// Drops every pending timer and arms the ones the current state calls for.
    fn reschedule(&mut self, now: Instant, events: &mut Vec<MatchEvent>) {
        self.timers.cancel_all();
        self.pending = PendingTimers::default();
        self.celebration_ends = None;

        match self.game.phase() {
            Phase::AwaitingMove(seat) if self.game.mode().is_computer(seat) => {
                debug!("Scheduling opponent move");
                self.pending.opponent = Some(self.timers.schedule_once(
                    MatchTimer::OpponentMove,
                    now,
                    self.timing.opponent_delay,
                ));
            }
            Phase::AwaitingMove(_) => {}
            Phase::Terminal(Outcome::Winner(seat)) => {
                info!(?seat, "Game won");
                events.push(MatchEvent::Won(seat));
                self.celebration_ends = Some(now + self.timing.celebration);
                self.pending.celebration = Some(self.timers.schedule_repeating(
                    MatchTimer::Celebration,
                    now,
                    self.timing.celebration_interval,
                    self.timing.celebration,
                ));
            }
            Phase::Terminal(_) => {
                info!("Game drawn");
                events.push(MatchEvent::Draw);
                self.pending.draw_reset = Some(self.timers.schedule_once(
                    MatchTimer::DrawReset,
                    now,
                    self.timing.draw_reset,
                ));
            }
        }
    }
}

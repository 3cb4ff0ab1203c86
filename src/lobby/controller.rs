//! Lobby controller: the page state machine behind the terminal UI.
//!
//! `Welcome --select_players--> Setup --start_match--> Playing`, and
//! `back` returns to `Welcome` from anywhere. The match and its timers live
//! inside the playing page and are dropped with it.

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Instant;
use tictactoe_engine::Position;
use tracing::{debug, info, instrument};

use crate::config::MatchTiming;
use crate::lobby::arena::{ActiveMatch, MatchEvent};
use crate::lobby::roster::{PlayerCount, SetupError, SetupForm};
use crate::lobby::screen::Intent;

/// Current page and the state it owns.
#[derive(Debug)]
enum Page {
    /// Choose 1 or 2 players.
    Welcome,
    /// Enter names and pick markers.
    Setup(SetupForm),
    /// A match is running.
    Playing(Box<ActiveMatch>),
}

/// Page discriminant, for callers that only need to know where they are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum PageKind {
    /// Player count choice.
    Welcome,
    /// Names and markers.
    Setup,
    /// A match is running.
    Playing,
}

/// Controller that drives the page state machine.
#[derive(Debug)]
pub struct LobbyController {
    page: Page,
    timing: MatchTiming,
    seed: Option<u64>,
    matches_started: u64,
}

impl LobbyController {
    /// Starts on the welcome page.
    ///
    /// With a `seed`, every match's AI is deterministic: match `n` is seeded
    /// with `seed + n`.
    #[instrument]
    pub fn new(timing: MatchTiming, seed: Option<u64>) -> Self {
        info!("Creating LobbyController");
        Self {
            page: Page::Welcome,
            timing,
            seed,
            matches_started: 0,
        }
    }

    /// Which page is showing.
    pub fn page_kind(&self) -> PageKind {
        match self.page {
            Page::Welcome => PageKind::Welcome,
            Page::Setup(_) => PageKind::Setup,
            Page::Playing(_) => PageKind::Playing,
        }
    }

    /// The setup draft, when on the setup page.
    pub fn setup_form(&self) -> Option<&SetupForm> {
        match &self.page {
            Page::Setup(form) => Some(form),
            _ => None,
        }
    }

    /// Mutable setup draft, when on the setup page.
    pub fn setup_form_mut(&mut self) -> Option<&mut SetupForm> {
        match &mut self.page {
            Page::Setup(form) => Some(form),
            _ => None,
        }
    }

    /// The running match, when on the game page.
    pub fn active_match(&self) -> Option<&ActiveMatch> {
        match &self.page {
            Page::Playing(arena) => Some(arena.as_ref()),
            _ => None,
        }
    }

    fn active_match_mut(&mut self) -> Option<&mut ActiveMatch> {
        match &mut self.page {
            Page::Playing(arena) => Some(arena.as_mut()),
            _ => None,
        }
    }

    /// Welcome → Setup. Ignored on other pages.
    #[instrument(skip(self))]
    pub fn select_players(&mut self, count: PlayerCount) {
        if !matches!(self.page, Page::Welcome) {
            debug!(page = %self.page_kind(), "select_players ignored");
            return;
        }
        info!(players = count.label(), "Navigating to Setup");
        self.page = Page::Setup(SetupForm::new(count));
    }

    /// Setup → Playing, if the form validates. On error the page is unchanged.
    ///
    /// Outside the setup page this does nothing.
    #[instrument(skip(self, now))]
    pub fn start_match(&mut self, now: Instant) -> Result<(), SetupError> {
        let Page::Setup(form) = &self.page else {
            debug!(page = %self.page_kind(), "start_match ignored");
            return Ok(());
        };
        let config = form.finalize()?;
        let rng = self.next_rng();
        info!("Navigating to Playing");
        self.page = Page::Playing(Box::new(ActiveMatch::new(config, self.timing, rng, now)));
        Ok(())
    }

    /// Any page → Welcome, discarding the form or the match with its timers.
    #[instrument(skip(self))]
    pub fn back(&mut self) {
        info!(from = %self.page_kind(), "Navigating to Welcome");
        self.page = Page::Welcome;
    }

    /// Human move on the game page.
    #[instrument(skip(self, now))]
    pub fn play_at(&mut self, pos: Position, now: Instant) -> Vec<MatchEvent> {
        match self.active_match_mut() {
            Some(arena) => arena.play_at(pos, now),
            None => Vec::new(),
        }
    }

    /// Clears the board on the game page.
    #[instrument(skip(self, now))]
    pub fn reset_game(&mut self, now: Instant) -> Vec<MatchEvent> {
        match self.active_match_mut() {
            Some(arena) => arena.reset(now),
            None => Vec::new(),
        }
    }

    /// Fires due match timers.
    pub fn tick(&mut self, now: Instant) -> Vec<MatchEvent> {
        match self.active_match_mut() {
            Some(arena) => arena.tick(now),
            None => Vec::new(),
        }
    }

    /// Earliest pending timer deadline of the running match.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.active_match().and_then(ActiveMatch::next_deadline)
    }

    /// Status line of the running match.
    pub fn status_line(&self) -> Option<String> {
        self.active_match().map(ActiveMatch::status_line)
    }

    /// Applies a screen intent.
    #[instrument(skip(self, now))]
    pub fn apply(&mut self, intent: Intent, now: Instant) -> Vec<MatchEvent> {
        match intent {
            Intent::Stay | Intent::Quit => Vec::new(),
            Intent::SelectPlayers(count) => {
                self.select_players(count);
                Vec::new()
            }
            Intent::TypeChar { seat, ch } => {
                self.edit_form(|form| form.push_char(seat, ch));
                Vec::new()
            }
            Intent::Backspace(seat) => {
                self.edit_form(|form| form.pop_char(seat));
                Vec::new()
            }
            Intent::CycleMarker { seat, step } => {
                self.edit_form(|form| form.cycle_marker(seat, step));
                Vec::new()
            }
            Intent::StartGame => {
                if let Err(e) = self.start_match(now) {
                    debug!(reason = %e, "Start rejected");
                }
                Vec::new()
            }
            Intent::PlayAt(pos) => self.play_at(pos, now),
            Intent::Reset => self.reset_game(now),
            Intent::Back => {
                self.back();
                Vec::new()
            }
        }
    }

    fn edit_form(&mut self, edit: impl FnOnce(&mut SetupForm)) {
        match self.setup_form_mut() {
            Some(form) => edit(form),
            None => debug!("Form edit outside setup ignored"),
        }
    }

    fn next_rng(&mut self) -> StdRng {
        let n = self.matches_started;
        self.matches_started += 1;
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(n)),
            None => StdRng::from_os_rng(),
        }
    }
}


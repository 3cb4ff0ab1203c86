//! Terminal UI for emoji tic-tac-toe.

pub mod board;
pub mod input;

use std::io::{self, Stdout};
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::time::{Duration, sleep};
use tracing::{debug, error, info, instrument};

use crate::config::AppConfig;
use crate::feedback::{self, Feedback};
use crate::lobby::arena::MatchEvent;
use crate::lobby::{
    GameScreen, Intent, LobbyController, PageKind, Screen, SetupScreen, WelcomeScreen,
};

/// Redraw interval while confetti is flying.
const FRAME: Duration = Duration::from_millis(33);
/// Longest the loop waits for input when nothing is scheduled.
const IDLE: Duration = Duration::from_millis(250);

/// View state of the page on screen.
#[derive(Debug)]
enum ActiveScreen {
    Welcome(WelcomeScreen),
    Setup(SetupScreen),
    Game(GameScreen),
}

impl ActiveScreen {
    fn for_page(kind: PageKind, config: &AppConfig) -> Self {
        match kind {
            PageKind::Welcome => Self::Welcome(WelcomeScreen::new()),
            PageKind::Setup => Self::Setup(SetupScreen::new()),
            PageKind::Playing => Self::Game(GameScreen::new(*config.confetti())),
        }
    }

    fn kind(&self) -> PageKind {
        match self {
            Self::Welcome(_) => PageKind::Welcome,
            Self::Setup(_) => PageKind::Setup,
            Self::Game(_) => PageKind::Playing,
        }
    }

    fn as_screen(&self) -> &dyn Screen {
        match self {
            Self::Welcome(s) => s,
            Self::Setup(s) => s,
            Self::Game(s) => s,
        }
    }

    fn as_screen_mut(&mut self) -> &mut dyn Screen {
        match self {
            Self::Welcome(s) => s,
            Self::Setup(s) => s,
            Self::Game(s) => s,
        }
    }

    fn is_animating(&self) -> bool {
        matches!(self, Self::Game(s) if s.is_animating())
    }
}

/// How long to wait for input before the next timer or animation frame.
pub fn poll_timeout(deadline: Option<Instant>, animating: bool, now: Instant) -> Duration {
    let cap = if animating { FRAME } else { IDLE };
    deadline
        .map(|d| d.saturating_duration_since(now).min(cap))
        .unwrap_or(cap)
}

/// Runs the TUI until the player quits.
///
/// Sets up the terminal, runs the event loop and restores the terminal on
/// exit, even when the loop fails.
#[instrument(skip(config))]
pub async fn run_tui(config: AppConfig) -> Result<()> {
    info!("Starting emoji tic-tac-toe TUI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_loop(&mut terminal, &config).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "TUI loop error");
    }
    res
}

#[instrument(skip_all)]
async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    config: &AppConfig,
) -> Result<()> {
    let mut lobby = LobbyController::new(config.timing(), *config.seed());
    let mut screen = ActiveScreen::for_page(lobby.page_kind(), config);
    let mut feedback = feedback::for_sound(*config.sound());

    loop {
        terminal.draw(|f| screen.as_screen().render(f, &lobby))?;

        let timeout = poll_timeout(lobby.next_deadline(), screen.is_animating(), Instant::now());
        if event::poll(timeout)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            let intent = screen.as_screen_mut().handle_key(key, &lobby);
            if intent == Intent::Quit {
                info!("Player quit");
                return Ok(());
            }
            if intent != Intent::Stay {
                debug!(?intent, "Applying intent");
            }
            let events = lobby.apply(intent, Instant::now());
            dispatch(&events, &mut screen, feedback.as_mut());
        }

        let events = lobby.tick(Instant::now());
        dispatch(&events, &mut screen, feedback.as_mut());

        if let ActiveScreen::Game(game) = &mut screen {
            game.animate();
        }
        if screen.kind() != lobby.page_kind() {
            debug!(from = %screen.kind(), to = %lobby.page_kind(), "Switching screen");
            screen = ActiveScreen::for_page(lobby.page_kind(), config);
        }

        sleep(Duration::from_millis(5)).await;
    }
}

/// Routes match events to the screen and the feedback channel.
fn dispatch(events: &[MatchEvent], screen: &mut ActiveScreen, feedback: &mut dyn Feedback) {
    if events.is_empty() {
        return;
    }
    for event in events {
        if let MatchEvent::MovePlayed {
            by_computer: false,
            ..
        } = event
        {
            feedback.click();
        }
    }
    if let ActiveScreen::Game(game) = screen {
        game.on_events(events);
    }
}

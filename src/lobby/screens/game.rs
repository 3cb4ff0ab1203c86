//! Game screen: player header, status line, board and confetti.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tictactoe_engine::{Phase, Position, Seat};
use tracing::{debug, instrument};
use unicode_width::UnicodeWidthStr;

use crate::celebration::Confetti;
use crate::lobby::LobbyController;
use crate::lobby::arena::{ActiveMatch, MatchEvent};
use crate::lobby::screen::{Intent, Screen};
use crate::tui::board::{draw_board, draw_confetti};
use crate::tui::input::{digit_square, move_cursor};

/// State for the game screen.
#[derive(Debug)]
pub struct GameScreen {
    cursor: Position,
    confetti: Confetti,
    confetti_enabled: bool,
}

impl GameScreen {
    /// Creates the screen with the cursor on the centre square.
    pub fn new(confetti_enabled: bool) -> Self {
        Self {
            cursor: Position::Center,
            confetti: Confetti::new(),
            confetti_enabled,
        }
    }

    /// Square under the cursor.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Live confetti.
    pub fn confetti(&self) -> &Confetti {
        &self.confetti
    }

    /// Reacts to match events: spawns confetti, clears it on a new board.
    #[instrument(skip(self, events), fields(count = events.len()))]
    pub fn on_events(&mut self, events: &[MatchEvent]) {
        let mut rng = rand::rng();
        for event in events {
            match event {
                MatchEvent::Confetti(burst) if self.confetti_enabled => {
                    self.confetti.spawn(*burst, &mut rng);
                }
                MatchEvent::Reset | MatchEvent::AutoReset => self.confetti.clear(),
                _ => {}
            }
        }
    }

    /// Advances the confetti by one frame.
    pub fn animate(&mut self) {
        self.confetti.step();
    }

    /// True while something on screen is moving.
    pub fn is_animating(&self) -> bool {
        !self.confetti.is_empty()
    }

    fn accepts_input(arena: &ActiveMatch) -> bool {
        matches!(arena.game().phase(), Phase::AwaitingMove(_)) && !arena.is_computer_turn()
    }
}

/// Pads `text` on both sides to `width` display columns.
fn centered(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(text.width());
    let left = pad / 2;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(pad - left))
}

/// "Alice VS Bob" with each marker centred under its name.
fn header(arena: &ActiveMatch) -> Vec<Line<'static>> {
    let first = arena.config().player(Seat::First);
    let second = arena.config().player(Seat::Second);
    let first_marker = first.marker().to_string();
    let second_marker = second.marker().to_string();
    let left = first.name().width().max(first_marker.width());
    let right = second.name().width().max(second_marker.width());
    let bold = Style::default().add_modifier(Modifier::BOLD);
    vec![
        Line::from(vec![
            Span::styled(centered(first.name(), left), bold),
            Span::styled("   VS   ", Style::default().fg(Color::Magenta)),
            Span::styled(centered(second.name(), right), bold),
        ]),
        Line::from(format!(
            "{}{}{}",
            centered(&first_marker, left),
            " ".repeat(8),
            centered(&second_marker, right)
        )),
    ]
}

impl Screen for GameScreen {
    #[instrument(skip(self, frame, lobby))]
    fn render(&self, frame: &mut Frame, lobby: &LobbyController) {
        let Some(arena) = lobby.active_match() else {
            return;
        };
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(3),
                Constraint::Min(11),
                Constraint::Length(3),
            ])
            .split(area);

        let players = Paragraph::new(header(arena))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Tic-Tac-Toe"));
        frame.render_widget(players, chunks[0]);

        let status_style = match arena.game().phase() {
            Phase::Terminal(_) => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            Phase::AwaitingMove(_) => Style::default().fg(Color::Yellow),
        };
        let status = Paragraph::new(arena.status_line())
            .style(status_style)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(status, chunks[1]);

        let cursor = Self::accepts_input(arena).then_some(self.cursor);
        draw_board(frame, chunks[2], arena.game().board(), cursor);

        let help = Paragraph::new(
            "Arrows: Move | Enter: Place | 1-9: Place | r: Reset | Esc: Back | q: Quit",
        )
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[3]);

        draw_confetti(frame, area, self.confetti.particles());
    }

    #[instrument(skip(self, key, lobby))]
    fn handle_key(&mut self, key: KeyEvent, lobby: &LobbyController) -> Intent {
        let Some(arena) = lobby.active_match() else {
            return Intent::Stay;
        };
        match key.code {
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                self.cursor = move_cursor(self.cursor, key.code);
                Intent::Stay
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.place(arena, self.cursor),
            KeyCode::Char('r') | KeyCode::Char('R') => Intent::Reset,
            KeyCode::Char('q') | KeyCode::Char('Q') => Intent::Quit,
            KeyCode::Esc => Intent::Back,
            code => match digit_square(code) {
                Some(pos) => {
                    self.cursor = pos;
                    self.place(arena, pos)
                }
                None => Intent::Stay,
            },
        }
    }
}

impl GameScreen {
    fn place(&self, arena: &ActiveMatch, pos: Position) -> Intent {
        if Self::accepts_input(arena) && arena.game().board().is_empty(pos) {
            Intent::PlayAt(pos)
        } else {
            debug!(%pos, "Square not playable");
            Intent::Stay
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::celebration::Burst;
    use crate::config::MatchTiming;
    use crate::lobby::roster::PlayerCount;
    use std::time::Instant;

    fn playing_lobby() -> LobbyController {
        let mut lobby = LobbyController::new(MatchTiming::default(), Some(1));
        lobby.select_players(PlayerCount::Two);
        let form = lobby.setup_form_mut().unwrap();
        form.set_name(Seat::First, "Alice");
        form.set_name(Seat::Second, "Bob");
        lobby.start_match(Instant::now()).unwrap();
        lobby
    }

    #[test]
    fn test_cursor_follows_keys() {
        let lobby = playing_lobby();
        let mut screen = GameScreen::new(true);
        assert_eq!(screen.cursor(), Position::Center);

        assert_eq!(screen.handle_key(KeyEvent::from(KeyCode::Up), &lobby), Intent::Stay);
        assert_eq!(screen.cursor(), Position::TopCenter);
        assert_eq!(
            screen.handle_key(KeyEvent::from(KeyCode::Enter), &lobby),
            Intent::PlayAt(Position::TopCenter)
        );
        assert_eq!(
            screen.handle_key(KeyEvent::from(KeyCode::Char('7')), &lobby),
            Intent::PlayAt(Position::BottomLeft)
        );
        assert_eq!(screen.cursor(), Position::BottomLeft);
    }

    #[test]
    fn test_occupied_square_is_not_offered() {
        let mut lobby = playing_lobby();
        lobby.play_at(Position::Center, Instant::now());
        let mut screen = GameScreen::new(true);
        assert_eq!(
            screen.handle_key(KeyEvent::from(KeyCode::Char('5')), &lobby),
            Intent::Stay
        );
        assert_eq!(screen.cursor(), Position::Center);
    }

    #[test]
    fn test_confetti_follows_events() {
        let mut screen = GameScreen::new(true);
        let burst = Burst {
            particle_count: 5,
            origin_x: 0.2,
            origin_y: 0.1,
        };
        screen.on_events(&[MatchEvent::Won(Seat::First), MatchEvent::Confetti(burst)]);
        assert_eq!(screen.confetti().particles().len(), 5);
        assert!(screen.is_animating());
        screen.on_events(&[MatchEvent::Reset]);
        assert!(!screen.is_animating());
    }

    #[test]
    fn test_centered_pads_by_display_width() {
        assert_eq!(centered("ab", 6), "  ab  ");
        assert_eq!(centered("❌", 4), " ❌ ");
        assert_eq!(centered("long", 2), "long");
    }

    #[test]
    fn test_confetti_can_be_disabled() {
        let mut screen = GameScreen::new(false);
        let burst = Burst {
            particle_count: 5,
            origin_x: 0.2,
            origin_y: 0.1,
        };
        screen.on_events(&[MatchEvent::Confetti(burst)]);
        assert!(screen.confetti().is_empty());
    }
}

//! Player setup screen: names, markers and the start button.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tictactoe_engine::Seat;
use tracing::{debug, instrument};

use crate::lobby::LobbyController;
use crate::lobby::roster::{PALETTE, SetupForm};
use crate::lobby::screen::{Intent, Screen};

/// Focusable field on the setup page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupField {
    /// Name input of a seat.
    Name(Seat),
    /// Marker picker of a seat.
    Marker(Seat),
    /// Start button.
    Start,
}

/// Fields in tab order for `form`. The AI seat has no name input.
fn fields(form: &SetupForm) -> Vec<SetupField> {
    let mut fields = Vec::with_capacity(5);
    for seat in [Seat::First, Seat::Second] {
        if form.has_name_input(seat) {
            fields.push(SetupField::Name(seat));
        }
        fields.push(SetupField::Marker(seat));
    }
    fields.push(SetupField::Start);
    fields
}

/// State for the setup screen.
#[derive(Debug)]
pub struct SetupScreen {
    focus: SetupField,
}

impl SetupScreen {
    /// Focuses the first name input.
    pub fn new() -> Self {
        Self {
            focus: SetupField::Name(Seat::First),
        }
    }

    /// Currently focused field.
    pub fn focus(&self) -> SetupField {
        self.focus
    }

    #[instrument(skip(self, form))]
    fn step_focus(&mut self, form: &SetupForm, step: isize) {
        let fields = fields(form);
        let len = fields.len() as isize;
        let current = fields.iter().position(|f| *f == self.focus).unwrap_or(0) as isize;
        self.focus = fields[(current + step).rem_euclid(len) as usize];
        debug!(focus = ?self.focus, "Setup focus moved");
    }

    fn seat_block(&self, frame: &mut Frame, area: Rect, form: &SetupForm, seat: Seat) {
        let title = if form.has_name_input(seat) {
            format!("Player {}", seat.index() + 1)
        } else {
            "AI Opponent".to_string()
        };

        let mut lines = Vec::new();
        if form.has_name_input(seat) {
            let focused = self.focus == SetupField::Name(seat);
            let name = form.name(seat);
            let text = if name.is_empty() && !focused {
                Span::styled("Enter your name", Style::default().fg(Color::DarkGray))
            } else if focused {
                Span::styled(format!("{name}▏"), Style::default().fg(Color::Yellow))
            } else {
                Span::raw(name.to_string())
            };
            lines.push(Line::from(vec![Span::raw("Name:   "), text]));
        } else {
            lines.push(Line::from(format!("AI will use: {}", form.marker(seat))));
        }

        let focused = self.focus == SetupField::Marker(seat);
        let taken = form.marker(seat.opponent());
        let mut spans = vec![Span::raw("Marker: ")];
        for marker in PALETTE {
            let style = if marker == form.marker(seat) {
                let base = Style::default().add_modifier(Modifier::REVERSED);
                if focused {
                    base.fg(Color::Yellow)
                } else {
                    base
                }
            } else if marker == taken {
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
            } else {
                Style::default()
            };
            spans.push(Span::styled(format!(" {marker} "), style));
        }
        lines.push(Line::from(spans));

        let border = if matches!(self.focus, SetupField::Name(s) | SetupField::Marker(s) if s == seat)
        {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(title);
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

impl Default for SetupScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for SetupScreen {
    #[instrument(skip(self, frame, lobby))]
    fn render(&self, frame: &mut Frame, lobby: &LobbyController) {
        let Some(form) = lobby.setup_form() else {
            return;
        };
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(4),
                Constraint::Length(4),
                Constraint::Length(3),
                Constraint::Min(1),
                Constraint::Length(3),
            ])
            .split(area);

        let title = Paragraph::new("Player Setup")
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        self.seat_block(frame, chunks[1], form, Seat::First);
        self.seat_block(frame, chunks[2], form, Seat::Second);

        let (label, style) = match form.finalize() {
            Ok(_) => (
                "[ Start Game ]".to_string(),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
            Err(e) => (
                format!("[ Start Game ]  {e}"),
                Style::default().fg(Color::DarkGray),
            ),
        };
        let style = if self.focus == SetupField::Start {
            style.add_modifier(Modifier::REVERSED)
        } else {
            style
        };
        let start = Paragraph::new(label)
            .style(style)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(start, chunks[3]);

        let help = Paragraph::new("Tab/↑↓: Field | ←→: Marker | Enter: Start | Esc: Back")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[5]);
    }

    #[instrument(skip(self, key, lobby))]
    fn handle_key(&mut self, key: KeyEvent, lobby: &LobbyController) -> Intent {
        let Some(form) = lobby.setup_form() else {
            return Intent::Stay;
        };
        match (self.focus, key.code) {
            (_, KeyCode::Esc) => Intent::Back,
            (_, KeyCode::Tab) | (_, KeyCode::Down) => {
                self.step_focus(form, 1);
                Intent::Stay
            }
            (_, KeyCode::BackTab) | (_, KeyCode::Up) => {
                self.step_focus(form, -1);
                Intent::Stay
            }
            (SetupField::Name(seat), KeyCode::Char(ch)) => Intent::TypeChar { seat, ch },
            (SetupField::Name(seat), KeyCode::Backspace) => Intent::Backspace(seat),
            (SetupField::Marker(seat), KeyCode::Left) => Intent::CycleMarker { seat, step: -1 },
            (SetupField::Marker(seat), KeyCode::Right) => Intent::CycleMarker { seat, step: 1 },
            (SetupField::Start, KeyCode::Enter) | (SetupField::Start, KeyCode::Char(' ')) => {
                Intent::StartGame
            }
            (_, KeyCode::Enter) => {
                if form.can_start() {
                    Intent::StartGame
                } else {
                    self.step_focus(form, 1);
                    Intent::Stay
                }
            }
            _ => Intent::Stay,
        }
    }
}

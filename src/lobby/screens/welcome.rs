//! Welcome screen: choose one or two players.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use tracing::{info, instrument};

use crate::lobby::LobbyController;
use crate::lobby::roster::PlayerCount;
use crate::lobby::screen::{Intent, Screen};

/// Menu options on the welcome page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WelcomeOption {
    OnePlayer,
    TwoPlayers,
    Quit,
}

impl WelcomeOption {
    fn label(self) -> &'static str {
        match self {
            Self::OnePlayer => "👤  1 Player   Play against AI",
            Self::TwoPlayers => "👥  2 Players  Play with a friend",
            Self::Quit => "    Quit",
        }
    }

    fn all() -> &'static [WelcomeOption] {
        &[Self::OnePlayer, Self::TwoPlayers, Self::Quit]
    }

    fn intent(self) -> Intent {
        match self {
            Self::OnePlayer => Intent::SelectPlayers(PlayerCount::One),
            Self::TwoPlayers => Intent::SelectPlayers(PlayerCount::Two),
            Self::Quit => Intent::Quit,
        }
    }
}

/// State for the welcome screen.
#[derive(Debug)]
pub struct WelcomeScreen {
    list_state: ListState,
}

impl WelcomeScreen {
    /// Creates the screen with the first option selected.
    pub fn new() -> Self {
        let mut state = ListState::default();
        state.select(Some(0));
        Self { list_state: state }
    }

    fn select_previous(&mut self) {
        let count = WelcomeOption::all().len();
        let i = match self.list_state.selected() {
            Some(i) if i > 0 => i - 1,
            _ => count - 1,
        };
        self.list_state.select(Some(i));
    }

    fn select_next(&mut self) {
        let count = WelcomeOption::all().len();
        let i = match self.list_state.selected() {
            Some(i) => (i + 1) % count,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    fn selected_option(&self) -> WelcomeOption {
        let options = WelcomeOption::all();
        let idx = self.list_state.selected().unwrap_or(0);
        options[idx.min(options.len() - 1)]
    }
}

impl Default for WelcomeScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for WelcomeScreen {
    #[instrument(skip(self, frame, _lobby))]
    fn render(&self, frame: &mut Frame, _lobby: &LobbyController) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(3),
            ])
            .split(area);

        let title = Paragraph::new("Welcome to Tic-Tac-Toe!")
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let items: Vec<ListItem> = WelcomeOption::all()
            .iter()
            .map(|opt| ListItem::new(opt.label()))
            .collect();

        let menu = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Players"))
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        let mut list_state = self.list_state;
        frame.render_stateful_widget(menu, chunks[1], &mut list_state);

        let help = Paragraph::new("↑↓: Navigate | Enter: Select | 1/2: Quick pick | q: Quit")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[2]);
    }

    #[instrument(skip(self, key, _lobby))]
    fn handle_key(&mut self, key: KeyEvent, _lobby: &LobbyController) -> Intent {
        match key.code {
            KeyCode::Up => {
                self.select_previous();
                Intent::Stay
            }
            KeyCode::Down => {
                self.select_next();
                Intent::Stay
            }
            KeyCode::Enter => {
                let option = self.selected_option();
                info!(option = ?option, "Welcome option selected");
                option.intent()
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Intent::Quit,
            KeyCode::Char(c) => c
                .to_digit(10)
                .and_then(|n| u8::try_from(n).ok())
                .and_then(PlayerCount::from_number)
                .map_or(Intent::Stay, Intent::SelectPlayers),
            _ => Intent::Stay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MatchTiming;

    fn press(screen: &mut WelcomeScreen, code: KeyCode) -> Intent {
        let lobby = LobbyController::new(MatchTiming::default(), Some(1));
        screen.handle_key(KeyEvent::from(code), &lobby)
    }

    #[test]
    fn test_digit_keys_pick_player_count() {
        let mut screen = WelcomeScreen::new();
        assert_eq!(
            press(&mut screen, KeyCode::Char('1')),
            Intent::SelectPlayers(PlayerCount::One)
        );
        assert_eq!(
            press(&mut screen, KeyCode::Char('2')),
            Intent::SelectPlayers(PlayerCount::Two)
        );
        assert_eq!(press(&mut screen, KeyCode::Char('3')), Intent::Stay);
        assert_eq!(press(&mut screen, KeyCode::Char('x')), Intent::Stay);
    }

    #[test]
    fn test_menu_wraps_and_selects() {
        let mut screen = WelcomeScreen::new();
        assert_eq!(press(&mut screen, KeyCode::Up), Intent::Stay);
        assert_eq!(press(&mut screen, KeyCode::Enter), Intent::Quit);
        press(&mut screen, KeyCode::Down);
        press(&mut screen, KeyCode::Down);
        assert_eq!(
            press(&mut screen, KeyCode::Enter),
            Intent::SelectPlayers(PlayerCount::Two)
        );
    }
}

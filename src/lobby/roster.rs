//! Player setup: names, markers and the finalized match configuration.

use derive_getters::Getters;
use tictactoe_engine::{GameMode, Marker, Seat};
use tracing::{debug, info, instrument};

/// Markers offered on the setup page, in display order.
pub const PALETTE: [Marker; 5] = [
    Marker::new('❌'),
    Marker::new('⭕'),
    Marker::new('🔥'),
    Marker::new('⭐'),
    Marker::new('💎'),
];

/// Longest accepted player name, in characters.
pub const MAX_NAME_LEN: usize = 20;

/// Name given to the computer seat.
pub const COMPUTER_NAME: &str = "AI";

/// How many humans are playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerCount {
    /// One human against the AI.
    One,
    /// Two humans.
    Two,
}

impl PlayerCount {
    /// Parses 1 or 2.
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::One),
            2 => Some(Self::Two),
            _ => None,
        }
    }

    /// Returns display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::One => "1 Player",
            Self::Two => "2 Players",
        }
    }
}

/// Why the setup form cannot produce a match.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SetupError {
    /// A required name is blank.
    #[display("Player {} needs a name", _0.index() + 1)]
    EmptyName(Seat),

    /// The marker belongs to the other player.
    #[display("{} is already taken", _0)]
    MarkerTaken(Marker),

    /// The marker is not one of the offered symbols.
    #[display("{} is not an available marker", _0)]
    MarkerNotInPalette(Marker),
}

impl std::error::Error for SetupError {}

/// A finalized player.
#[derive(Debug, Clone, PartialEq, Eq, Getters, derive_new::new)]
pub struct PlayerProfile {
    name: String,
    marker: Marker,
}

/// Players for one match. Built only by [`SetupForm::finalize`].
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct MatchConfig {
    players: [PlayerProfile; 2],
    single_player: bool,
}

impl MatchConfig {
    /// Profile seated at `seat`.
    pub fn player(&self, seat: Seat) -> &PlayerProfile {
        &self.players[seat.index()]
    }

    /// The two markers, first seat first.
    pub fn markers(&self) -> [Marker; 2] {
        [self.players[0].marker, self.players[1].marker]
    }

    /// Engine mode for this configuration.
    pub fn mode(&self) -> GameMode {
        if self.single_player {
            GameMode::HumanVsComputer
        } else {
            GameMode::HumanVsHuman
        }
    }
}

/// Draft edited on the setup page.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct SetupForm {
    count: PlayerCount,
    names: [String; 2],
    markers: [Marker; 2],
}

impl SetupForm {
    /// Blank names with the first two palette markers.
    #[instrument]
    pub fn new(count: PlayerCount) -> Self {
        debug!("Initializing SetupForm");
        Self {
            count,
            names: [String::new(), String::new()],
            markers: [PALETTE[0], PALETTE[1]],
        }
    }

    /// Current name draft for `seat`.
    pub fn name(&self, seat: Seat) -> &str {
        &self.names[seat.index()]
    }

    /// Current marker for `seat`.
    pub fn marker(&self, seat: Seat) -> Marker {
        self.markers[seat.index()]
    }

    /// Whether `seat` types its own name on this form.
    pub fn has_name_input(&self, seat: Seat) -> bool {
        seat == Seat::First || self.count == PlayerCount::Two
    }

    /// Replaces a name, keeping at most [`MAX_NAME_LEN`] characters.
    #[instrument(skip(self))]
    pub fn set_name(&mut self, seat: Seat, name: &str) {
        self.names[seat.index()] = name.chars().take(MAX_NAME_LEN).collect();
    }

    /// Appends a character unless the name is already at the limit.
    pub fn push_char(&mut self, seat: Seat, c: char) {
        let name = &mut self.names[seat.index()];
        if !c.is_control() && name.chars().count() < MAX_NAME_LEN {
            name.push(c);
        }
    }

    /// Removes the last character.
    pub fn pop_char(&mut self, seat: Seat) {
        self.names[seat.index()].pop();
    }

    /// Picks a marker for `seat`; the other seat's marker is off limits.
    #[instrument(skip(self))]
    pub fn select_marker(&mut self, seat: Seat, marker: Marker) -> Result<(), SetupError> {
        if !PALETTE.contains(&marker) {
            return Err(SetupError::MarkerNotInPalette(marker));
        }
        if self.markers[seat.opponent().index()] == marker {
            return Err(SetupError::MarkerTaken(marker));
        }
        self.markers[seat.index()] = marker;
        Ok(())
    }

    /// Moves `seat` to the next (or previous, for negative `step`) free marker.
    #[instrument(skip(self))]
    pub fn cycle_marker(&mut self, seat: Seat, step: isize) {
        let len = PALETTE.len() as isize;
        let current = PALETTE
            .iter()
            .position(|m| *m == self.marker(seat))
            .unwrap_or(0) as isize;
        let mut idx = current;
        for _ in 0..PALETTE.len() {
            idx = (idx + step).rem_euclid(len);
            if self.select_marker(seat, PALETTE[idx as usize]).is_ok() {
                return;
            }
        }
    }

    /// Whether [`Self::finalize`] would succeed.
    pub fn can_start(&self) -> bool {
        self.finalize().is_ok()
    }

    /// Validates the draft into a [`MatchConfig`].
    #[instrument(skip(self))]
    pub fn finalize(&self) -> Result<MatchConfig, SetupError> {
        let first = self.names[0].trim();
        if first.is_empty() {
            return Err(SetupError::EmptyName(Seat::First));
        }
        let second = match self.count {
            PlayerCount::One => COMPUTER_NAME,
            PlayerCount::Two => {
                let name = self.names[1].trim();
                if name.is_empty() {
                    return Err(SetupError::EmptyName(Seat::Second));
                }
                name
            }
        };
        for marker in self.markers {
            if !PALETTE.contains(&marker) {
                return Err(SetupError::MarkerNotInPalette(marker));
            }
        }
        if self.markers[0] == self.markers[1] {
            return Err(SetupError::MarkerTaken(self.markers[1]));
        }

        let config = MatchConfig {
            players: [
                PlayerProfile::new(first.to_string(), self.markers[0]),
                PlayerProfile::new(second.to_string(), self.markers[1]),
            ],
            single_player: self.count == PlayerCount::One,
        };
        info!(?config, "Setup finalized");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_use_first_two_markers() {
        let form = SetupForm::new(PlayerCount::Two);
        assert_eq!(form.marker(Seat::First), PALETTE[0]);
        assert_eq!(form.marker(Seat::Second), PALETTE[1]);
    }

    #[test]
    fn test_name_is_capped() {
        let mut form = SetupForm::new(PlayerCount::Two);
        form.set_name(Seat::First, "abcdefghijklmnopqrstuvwxyz");
        assert_eq!(form.name(Seat::First), "abcdefghijklmnopqrst");
        form.push_char(Seat::First, 'z');
        assert_eq!(form.name(Seat::First).chars().count(), MAX_NAME_LEN);
    }

    #[test]
    fn test_marker_taken_by_other_seat() {
        let mut form = SetupForm::new(PlayerCount::Two);
        assert_eq!(
            form.select_marker(Seat::First, PALETTE[1]),
            Err(SetupError::MarkerTaken(PALETTE[1]))
        );
        assert_eq!(
            form.select_marker(Seat::First, Marker::new('X')),
            Err(SetupError::MarkerNotInPalette(Marker::new('X')))
        );
        assert_eq!(form.marker(Seat::First), PALETTE[0]);
    }

    #[test]
    fn test_cycle_skips_taken_marker() {
        let mut form = SetupForm::new(PlayerCount::Two);
        form.cycle_marker(Seat::First, 1);
        assert_eq!(form.marker(Seat::First), PALETTE[2]);
        form.cycle_marker(Seat::Second, -1);
        assert_eq!(form.marker(Seat::Second), PALETTE[0]);
        form.cycle_marker(Seat::Second, -1);
        assert_eq!(form.marker(Seat::Second), PALETTE[4]);
    }

    #[test]
    fn test_single_player_needs_only_first_name() {
        let mut form = SetupForm::new(PlayerCount::One);
        assert_eq!(form.finalize(), Err(SetupError::EmptyName(Seat::First)));
        form.set_name(Seat::First, "  Alice ");
        let config = form.finalize().unwrap();
        assert_eq!(config.player(Seat::First).name(), "Alice");
        assert_eq!(config.player(Seat::Second).name(), COMPUTER_NAME);
        assert_eq!(config.mode(), GameMode::HumanVsComputer);
    }

    #[test]
    fn test_two_players_need_both_names() {
        let mut form = SetupForm::new(PlayerCount::Two);
        form.set_name(Seat::First, "Alice");
        form.set_name(Seat::Second, "   ");
        assert!(!form.can_start());
        assert_eq!(form.finalize(), Err(SetupError::EmptyName(Seat::Second)));
        form.set_name(Seat::Second, "Bob");
        let config = form.finalize().unwrap();
        assert!(!*config.single_player());
        assert_eq!(config.mode(), GameMode::HumanVsHuman);
    }
}

//! Tournament configuration: format, game profile, points rule.

use serde::{Deserialize, Serialize};

/// Competition format.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    /// Round robin: everyone meets everyone once.
    #[default]
    League,
    /// Single elimination bracket.
    Knockout,
    /// Score-paired rounds without rematches.
    Swiss,
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Format::League => write!(f, "League"),
            Format::Knockout => write!(f, "Knockout"),
            Format::Swiss => write!(f, "Swiss"),
        }
    }
}

/// The game being played. Decides draw rules, K/D tracking and Elo ratings.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameProfile {
    Chess,
    Valorant,
    PubgMobile,
    Cricket,
    Football,
    Basketball,
    TableTennis,
    Badminton,
    CounterStrike2,
    Volleyball,
    #[default]
    Custom,
}

impl GameProfile {
    pub fn allows_draw(self) -> bool {
        matches!(self, GameProfile::Chess | GameProfile::Football | GameProfile::Custom)
    }

    /// Shooters track kills (score for) and deaths (score against).
    pub fn is_shooter(self) -> bool {
        matches!(
            self,
            GameProfile::Valorant | GameProfile::CounterStrike2 | GameProfile::PubgMobile
        )
    }

    pub fn has_elo(self) -> bool {
        matches!(self, GameProfile::Chess)
    }

    pub fn is_team_game(self) -> bool {
        !matches!(
            self,
            GameProfile::Chess | GameProfile::TableTennis | GameProfile::Badminton | GameProfile::Custom
        )
    }

    pub fn display_name(self) -> &'static str {
        match self {
            GameProfile::Chess => "Chess",
            GameProfile::Valorant => "Valorant",
            GameProfile::PubgMobile => "PUBG Mobile",
            GameProfile::Cricket => "Cricket",
            GameProfile::Football => "Football",
            GameProfile::Basketball => "Basketball",
            GameProfile::TableTennis => "Table Tennis",
            GameProfile::Badminton => "Badminton",
            GameProfile::CounterStrike2 => "Counter-Strike 2",
            GameProfile::Volleyball => "Volleyball",
            GameProfile::Custom => "Custom",
        }
    }
}

/// Standings points per result. A BYE counts as a win.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointsRule {
    pub win: u32,
    pub draw: u32,
    pub loss: u32,
}

impl Default for PointsRule {
    fn default() -> Self {
        Self {
            win: 3,
            draw: 1,
            loss: 0,
        }
    }
}

/// Everything fixed at tournament creation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentConfig {
    pub format: Format,
    pub game: GameProfile,
    pub points: PointsRule,
    /// Swiss only; defaults to ceil(log2(N)).
    pub swiss_rounds: Option<u32>,
}

impl TournamentConfig {
    pub fn new(format: Format, game: GameProfile) -> Self {
        Self {
            format,
            game,
            ..Self::default()
        }
    }

    /// Number of Swiss rounds to play for a roster of `participants`.
    pub fn swiss_round_count(&self, participants: usize) -> u32 {
        match self.swiss_rounds {
            Some(rounds) => rounds.max(1),
            None => {
                let mut rounds = 0;
                while (1usize << rounds) < participants {
                    rounds += 1;
                }
                rounds.max(1)
            }
        }
    }
}

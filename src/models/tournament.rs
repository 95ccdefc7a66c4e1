//! Tournament, TournamentState and TournamentError.

use crate::models::config::{Format, TournamentConfig};
use crate::models::fixture::{MatchId, MatchRecord, Outcome, Round};
use crate::models::participant::{ParticipantId, Roster, MAX_PARTICIPANTS, MIN_PARTICIPANTS};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur during tournament operations.
///
/// Every operation that returns one of these has left the tournament untouched.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Roster size outside the supported range.
    InvalidRosterSize { size: usize },
    /// The roster can no longer change once a round has been generated.
    RosterLocked,
    /// No match with this id in the tournament.
    UnknownMatch(MatchId),
    /// The match already has a terminal outcome.
    DuplicateResultSubmission(MatchId),
    /// The outcome is not allowed for this format or game (e.g. a draw in Knockout).
    InvalidOutcomeForFormat { format: Format, outcome: Outcome },
    /// The current round still has matches without a result.
    IncompleteRound { round: u32, pending: usize },
    /// The operation only exists for another format.
    NotApplicableForFormat(Format),
    /// Participant not found in the roster.
    ParticipantNotFound(ParticipantId),
    /// A participant with this name already exists (names are unique, case-insensitive).
    DuplicateParticipantName,
    /// Participant names cannot be blank.
    EmptyParticipantName,
    /// A result must carry a terminal outcome.
    PendingResult,
    /// The declared outcome contradicts the scores.
    ScoreOutcomeMismatch { score_a: u32, score_b: u32, outcome: Outcome },
    /// Only played matches of the current round can be corrected.
    NotCorrectable(MatchId),
    /// Every round has been played.
    TournamentComplete,
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::InvalidRosterSize { size } => write!(
                f,
                "Roster must have between {} and {} participants (got {})",
                MIN_PARTICIPANTS, MAX_PARTICIPANTS, size
            ),
            TournamentError::RosterLocked => write!(f, "The roster is locked once the tournament has started"),
            TournamentError::UnknownMatch(_) => write!(f, "Match not found"),
            TournamentError::DuplicateResultSubmission(_) => write!(f, "A result was already recorded for this match"),
            TournamentError::InvalidOutcomeForFormat { format, outcome } => {
                write!(f, "Outcome '{}' is not allowed in this {} tournament", outcome, format)
            }
            TournamentError::IncompleteRound { round, pending } => {
                write!(f, "Round {} still has {} match(es) without a result", round, pending)
            }
            TournamentError::NotApplicableForFormat(format) => {
                write!(f, "Not applicable to a {} tournament", format)
            }
            TournamentError::ParticipantNotFound(_) => write!(f, "Participant not found"),
            TournamentError::DuplicateParticipantName => write!(f, "A participant with this name already exists"),
            TournamentError::EmptyParticipantName => write!(f, "Participant name cannot be empty"),
            TournamentError::PendingResult => write!(f, "A result must have a final outcome"),
            TournamentError::ScoreOutcomeMismatch { score_a, score_b, outcome } => {
                write!(f, "Score {}-{} does not match outcome '{}'", score_a, score_b, outcome)
            }
            TournamentError::NotCorrectable(_) => {
                write!(f, "Only played matches of the current round can be corrected")
            }
            TournamentError::TournamentComplete => write!(f, "The tournament is already complete"),
        }
    }
}

impl std::error::Error for TournamentError {}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Current phase of the tournament.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentState {
    /// Registering participants; no round generated yet.
    #[default]
    Setup,
    /// At least one round generated; roster locked.
    InProgress,
    /// Final round resolved; no further rounds.
    Completed,
}

/// Full tournament state: roster, append-only match history and progress.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub config: TournamentConfig,
    pub(crate) roster: Roster,
    /// Every match ever generated, in generation order.
    pub(crate) matches: Vec<MatchRecord>,
    /// 0 until the first round is generated.
    pub(crate) current_round: u32,
    pub(crate) state: TournamentState,
}

impl Tournament {
    /// Create a new tournament in Setup state with no participants.
    pub fn new(name: impl Into<String>, config: TournamentConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            created_at: Utc::now(),
            config,
            roster: Roster::new(),
            matches: Vec::new(),
            current_round: 0,
            state: TournamentState::Setup,
        }
    }

    pub fn format(&self) -> Format {
        self.config.format
    }

    pub fn state(&self) -> TournamentState {
        self.state
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Full match history in generation order.
    pub fn matches(&self) -> &[MatchRecord] {
        &self.matches
    }

    pub fn current_round_number(&self) -> u32 {
        self.current_round
    }

    pub fn get_match(&self, id: MatchId) -> Option<&MatchRecord> {
        self.matches.iter().find(|m| m.id == id)
    }

    /// Snapshot of round `number` (empty if it was never generated).
    pub fn round(&self, number: u32) -> Round {
        Round {
            number,
            matches: self
                .matches
                .iter()
                .filter(|m| m.round == number)
                .cloned()
                .collect(),
        }
    }

    /// Register a participant (Setup only).
    pub fn add_participant(
        &mut self,
        name: impl Into<String>,
        seed_value: u32,
    ) -> Result<ParticipantId, TournamentError> {
        self.roster.add(name, seed_value)
    }

    /// Remove a participant by id (Setup only).
    pub fn remove_participant(&mut self, id: ParticipantId) -> Result<(), TournamentError> {
        self.roster.remove(id)
    }

    /// Assign random distinct seed values (Setup only).
    pub fn shuffle_seeds<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), TournamentError> {
        self.roster.shuffle_seeds(rng)
    }
}

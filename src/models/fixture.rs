//! MatchRecord, Round, Outcome and the BYE slot.

use crate::models::participant::ParticipantId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Result state of a match. Everything but `Pending` is terminal.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    #[default]
    Pending,
    WinA,
    WinB,
    Draw,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        self != Outcome::Pending
    }

    /// Outcome implied by a pair of scores.
    pub fn from_scores(score_a: u32, score_b: u32) -> Self {
        match score_a.cmp(&score_b) {
            std::cmp::Ordering::Greater => Outcome::WinA,
            std::cmp::Ordering::Less => Outcome::WinB,
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Pending => write!(f, "pending"),
            Outcome::WinA => write!(f, "win for side A"),
            Outcome::WinB => write!(f, "win for side B"),
            Outcome::Draw => write!(f, "draw"),
        }
    }
}

/// The second side of a match: a real participant or the BYE sentinel.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Slot {
    Participant(ParticipantId),
    Bye,
}

impl Slot {
    pub fn participant(self) -> Option<ParticipantId> {
        match self {
            Slot::Participant(id) => Some(id),
            Slot::Bye => None,
        }
    }
}

/// A pairing produced by a scheduler before it becomes a MatchRecord.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Pairing {
    pub side_a: ParticipantId,
    pub side_b: Slot,
}

impl Pairing {
    pub fn new(side_a: ParticipantId, side_b: ParticipantId) -> Self {
        Self {
            side_a,
            side_b: Slot::Participant(side_b),
        }
    }

    pub fn bye(side_a: ParticipantId) -> Self {
        Self {
            side_a,
            side_b: Slot::Bye,
        }
    }
}

/// A single scheduled or completed match.
///
/// Side A is always a real participant, so a BYE match has exactly one.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: MatchId,
    pub round: u32,
    pub side_a: ParticipantId,
    pub side_b: Slot,
    pub score_a: u32,
    pub score_b: u32,
    pub outcome: Outcome,
    pub is_bye: bool,
}

impl MatchRecord {
    /// Build a match for `round`. BYE matches resolve immediately as a win for side A.
    pub fn from_pairing(pairing: Pairing, round: u32) -> Self {
        let is_bye = pairing.side_b == Slot::Bye;
        Self {
            id: Uuid::new_v4(),
            round,
            side_a: pairing.side_a,
            side_b: pairing.side_b,
            score_a: 0,
            score_b: 0,
            outcome: if is_bye { Outcome::WinA } else { Outcome::Pending },
            is_bye,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome.is_terminal()
    }

    /// Terminal and not a BYE: the match was actually played.
    pub fn is_played(&self) -> bool {
        self.is_terminal() && !self.is_bye
    }

    pub fn side_b_id(&self) -> Option<ParticipantId> {
        self.side_b.participant()
    }

    pub fn winner(&self) -> Option<ParticipantId> {
        match self.outcome {
            Outcome::WinA => Some(self.side_a),
            Outcome::WinB => self.side_b_id(),
            Outcome::Pending | Outcome::Draw => None,
        }
    }

    /// Match MVP: the side that outscored the other in a played match.
    /// None for BYEs, draws and pending matches.
    pub fn mvp(&self) -> Option<ParticipantId> {
        if self.is_bye {
            return None;
        }
        self.winner()
    }

    pub fn loser(&self) -> Option<ParticipantId> {
        match self.outcome {
            Outcome::WinA => self.side_b_id(),
            Outcome::WinB => Some(self.side_a),
            Outcome::Pending | Outcome::Draw => None,
        }
    }
}

/// All matches sharing a round number, in generation order.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub number: u32,
    pub matches: Vec<MatchRecord>,
}

impl Round {
    /// True when every match has a terminal outcome. BYEs are created terminal.
    pub fn is_resolved(&self) -> bool {
        self.matches.iter().all(|m| m.is_terminal())
    }

    pub fn pending_count(&self) -> usize {
        self.matches.iter().filter(|m| !m.is_terminal()).count()
    }
}

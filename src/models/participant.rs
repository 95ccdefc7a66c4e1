//! Participant and Roster (the registered participant set).

use crate::models::tournament::TournamentError;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a participant (used in matches and lookups).
pub type ParticipantId = Uuid;

/// Seed value given to participants registered without a rating.
pub const DEFAULT_SEED_VALUE: u32 = 1000;

/// Smallest roster a schedule can be generated for.
pub const MIN_PARTICIPANTS: usize = 2;

/// Largest roster accepted at registration.
pub const MAX_PARTICIPANTS: usize = 128;

/// A competitor in the tournament: an individual or a whole team.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    /// Strength rating; higher is stronger. Fixed once the roster is locked.
    pub seed_value: u32,
    /// Knockout only: set when the participant loses a match.
    pub is_eliminated: bool,
}

impl Participant {
    /// Create a new participant with the given name and seed value.
    pub fn new(name: impl Into<String>, seed_value: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            seed_value,
            is_eliminated: false,
        }
    }

    /// Mark the participant as knocked out.
    pub fn eliminate(&mut self) {
        self.is_eliminated = true;
    }

    /// Undo an elimination (result correction only).
    pub fn reinstate(&mut self) {
        self.is_eliminated = false;
    }
}

/// Registered participants in registration order.
///
/// Open for registration until the first round is generated, then locked.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    participants: Vec<Participant>,
    locked: bool,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a participant. Names are trimmed and unique (case-insensitive).
    pub fn add(
        &mut self,
        name: impl Into<String>,
        seed_value: u32,
    ) -> Result<ParticipantId, TournamentError> {
        if self.locked {
            return Err(TournamentError::RosterLocked);
        }
        let name = name.into();
        let name_trimmed = name.trim();
        if name_trimmed.is_empty() {
            return Err(TournamentError::EmptyParticipantName);
        }
        let is_duplicate = self
            .participants
            .iter()
            .any(|p| p.name.eq_ignore_ascii_case(name_trimmed));
        if is_duplicate {
            return Err(TournamentError::DuplicateParticipantName);
        }
        if self.participants.len() >= MAX_PARTICIPANTS {
            return Err(TournamentError::InvalidRosterSize {
                size: self.participants.len() + 1,
            });
        }
        let participant = Participant::new(name_trimmed, seed_value);
        let id = participant.id;
        self.participants.push(participant);
        Ok(id)
    }

    /// Remove a participant by id (registration only).
    pub fn remove(&mut self, id: ParticipantId) -> Result<(), TournamentError> {
        if self.locked {
            return Err(TournamentError::RosterLocked);
        }
        let idx = self
            .participants
            .iter()
            .position(|p| p.id == id)
            .ok_or(TournamentError::ParticipantNotFound(id))?;
        self.participants.remove(idx);
        Ok(())
    }

    /// Give every participant a distinct random seed value.
    ///
    /// For events without ratings: the bracket and the Swiss opening order
    /// still come out deterministic once seeds are fixed.
    pub fn shuffle_seeds<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), TournamentError> {
        if self.locked {
            return Err(TournamentError::RosterLocked);
        }
        let n = self.participants.len() as u32;
        let mut values: Vec<u32> = (0..n).map(|i| DEFAULT_SEED_VALUE + i).collect();
        values.shuffle(rng);
        for (p, value) in self.participants.iter_mut().zip(values) {
            p.seed_value = value;
        }
        Ok(())
    }

    /// Fail with `InvalidRosterSize` unless a schedule can be built for this roster.
    pub fn check_size(&self) -> Result<(), TournamentError> {
        let size = self.participants.len();
        if !(MIN_PARTICIPANTS..=MAX_PARTICIPANTS).contains(&size) {
            return Err(TournamentError::InvalidRosterSize { size });
        }
        Ok(())
    }

    pub fn lock(&mut self) {
        self.locked = true;
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter()
    }

    pub fn get(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: ParticipantId) -> Option<&mut Participant> {
        self.participants.iter_mut().find(|p| p.id == id)
    }

    /// Participants ordered by seed: seed value descending, then registration order.
    pub fn by_seed(&self) -> Vec<&Participant> {
        let mut seeded: Vec<&Participant> = self.participants.iter().collect();
        // Stable sort keeps registration order among equal seed values.
        seeded.sort_by(|a, b| b.seed_value.cmp(&a.seed_value));
        seeded
    }
}

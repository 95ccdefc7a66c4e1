//! Data structures for the tournament: participants, matches, configuration and state.

mod config;
mod fixture;
mod participant;
mod tournament;

pub use config::{Format, GameProfile, PointsRule, TournamentConfig};
pub use fixture::{MatchId, MatchRecord, Outcome, Pairing, Round, Slot};
pub use participant::{
    Participant, ParticipantId, Roster, DEFAULT_SEED_VALUE, MAX_PARTICIPANTS, MIN_PARTICIPANTS,
};
pub use tournament::{Tournament, TournamentError, TournamentId, TournamentState};

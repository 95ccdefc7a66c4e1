//! Tournament fixtures: library with models, schedulers and standings.
//!
//! League (round robin), Knockout (single elimination) and Swiss formats share
//! one round lifecycle: `generate_next_round`, `record_result` for each match,
//! then the next round. Standings are always recomputed from the match history.

pub mod logic;
pub mod models;

pub use logic::{
    champion, compute_standings, correct_result, current_round, generate_next_round,
    is_tournament_complete, kill_death_leaderboard, kill_death_ratio, mvp_leaderboard, podium,
    record_result, replay_ratings, rounds, standings, summarize, top_scorers, total_rounds,
    tournament_mvp, winner, KnockoutBracket, MvpAward, RoundRobinScheduler, StandingsEntry,
    SwissPairer, TournamentSummary,
};
pub use models::{
    Format, GameProfile, MatchId, MatchRecord, Outcome, Pairing, Participant, ParticipantId,
    PointsRule, Roster, Round, Slot, Tournament, TournamentConfig, TournamentError, TournamentId,
    TournamentState, DEFAULT_SEED_VALUE, MAX_PARTICIPANTS, MIN_PARTICIPANTS,
};

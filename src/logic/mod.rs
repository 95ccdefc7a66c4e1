//! Tournament business logic: scheduling per format, round lifecycle, standings.

mod analytics;
mod fixture_engine;
mod knockout;
mod rating;
mod round_robin;
mod setup;
mod standings;
mod swiss;

pub use analytics::{
    kill_death_leaderboard, mvp_leaderboard, podium, summarize, top_scorers, TournamentSummary,
};
pub use fixture_engine::{
    champion, correct_result, current_round, generate_next_round, is_tournament_complete,
    record_result, rounds, standings, total_rounds, winner,
};
pub use knockout::KnockoutBracket;
pub use rating::{expected_score, replay_ratings, K_FACTOR};
pub use round_robin::RoundRobinScheduler;
pub use standings::{compute_standings, kill_death_ratio, tournament_mvp, MvpAward, StandingsEntry};
pub use swiss::SwissPairer;

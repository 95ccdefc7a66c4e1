//! Leaderboards and tournament overview built on top of the standings.

use crate::logic::standings::{tournament_mvp, StandingsEntry};
use crate::models::{Format, Tournament, TournamentState};
use serde::{Deserialize, Serialize};

/// Overview numbers for a tournament (for API / display).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TournamentSummary {
    pub name: String,
    pub game: String,
    /// Teams rather than individual players.
    pub team_game: bool,
    pub format: Format,
    pub state: TournamentState,
    pub current_round: u32,
    pub total_participants: usize,
    pub active_participants: usize,
    pub total_matches: usize,
    pub completed_matches: usize,
    pub pending_matches: usize,
    /// Sum of both sides' scores over played matches.
    pub total_score: u64,
    /// Per played match, two decimals.
    pub average_score: f64,
    pub mvp_name: Option<String>,
}

/// Entries ordered by total score, best first.
pub fn top_scorers(standings: &[StandingsEntry], limit: usize) -> Vec<StandingsEntry> {
    let mut sorted = standings.to_vec();
    sorted.sort_by(|a, b| b.score_for.cmp(&a.score_for));
    sorted.truncate(limit);
    sorted
}

/// Entries with at least one match win, most wins first.
pub fn mvp_leaderboard(standings: &[StandingsEntry], limit: usize) -> Vec<StandingsEntry> {
    let mut sorted: Vec<StandingsEntry> = standings
        .iter()
        .filter(|e| e.mvp_count > 0)
        .cloned()
        .collect();
    sorted.sort_by(|a, b| b.mvp_count.cmp(&a.mvp_count));
    sorted.truncate(limit);
    sorted
}

/// Shooter games: entries with kills, best K/D first. Empty for other games.
pub fn kill_death_leaderboard(standings: &[StandingsEntry], limit: usize) -> Vec<StandingsEntry> {
    let mut sorted: Vec<StandingsEntry> = standings
        .iter()
        .filter(|e| e.kills > 0 && e.kill_death_ratio.is_some())
        .cloned()
        .collect();
    sorted.sort_by(|a, b| {
        let (ra, rb) = (a.kill_death_ratio.unwrap_or(0.0), b.kill_death_ratio.unwrap_or(0.0));
        rb.total_cmp(&ra)
    });
    sorted.truncate(limit);
    sorted
}

/// Top three of the standings.
pub fn podium(standings: &[StandingsEntry]) -> &[StandingsEntry] {
    &standings[..standings.len().min(3)]
}

pub fn summarize(tournament: &Tournament) -> TournamentSummary {
    let matches = tournament.matches();
    let played: Vec<_> = matches.iter().filter(|m| m.is_played()).collect();
    let completed = matches.iter().filter(|m| m.is_terminal()).count();
    let total_score: u64 = played
        .iter()
        .map(|m| m.score_a as u64 + m.score_b as u64)
        .sum();
    let average_score = if played.is_empty() {
        0.0
    } else {
        (total_score as f64 / played.len() as f64 * 100.0).round() / 100.0
    };
    let roster = tournament.roster();

    TournamentSummary {
        name: tournament.name.clone(),
        game: tournament.config.game.display_name().to_string(),
        team_game: tournament.config.game.is_team_game(),
        format: tournament.format(),
        state: tournament.state(),
        current_round: tournament.current_round_number(),
        total_participants: roster.len(),
        active_participants: roster.iter().filter(|p| !p.is_eliminated).count(),
        total_matches: matches.len(),
        completed_matches: completed,
        pending_matches: matches.len() - completed,
        total_score,
        average_score,
        mvp_name: tournament_mvp(roster, matches).map(|mvp| mvp.name),
    }
}


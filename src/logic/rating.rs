//! Elo ratings replayed from the match history.

use crate::models::{MatchRecord, Outcome, ParticipantId, Roster};
use std::collections::HashMap;

/// K-factor for Elo updates (higher = more volatile)
pub const K_FACTOR: f64 = 32.0;

/// Expected score of a player rated `rating_a` against one rated `rating_b`.
pub fn expected_score(rating_a: f64, rating_b: f64) -> f64 {
    1.0 / (1.0 + 10.0_f64.powf((rating_b - rating_a) / 400.0))
}

/// Ratings after replaying every played match in history order, starting from seed values.
pub fn replay_ratings(roster: &Roster, matches: &[MatchRecord]) -> HashMap<ParticipantId, f64> {
    let mut ratings: HashMap<ParticipantId, f64> = roster
        .iter()
        .map(|p| (p.id, p.seed_value as f64))
        .collect();

    for m in matches.iter().filter(|m| m.is_played()) {
        let Some(b) = m.side_b_id() else { continue };
        let (Some(&r_a), Some(&r_b)) = (ratings.get(&m.side_a), ratings.get(&b)) else {
            continue;
        };
        let actual = match m.outcome {
            Outcome::WinA => 1.0,
            Outcome::WinB => 0.0,
            Outcome::Draw => 0.5,
            Outcome::Pending => continue,
        };
        let change = K_FACTOR * (actual - expected_score(r_a, r_b));
        ratings.insert(m.side_a, r_a + change);
        ratings.insert(b, r_b - change);
    }

    ratings
}

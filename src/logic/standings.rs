//! Standings table: ranking and per-participant stats derived from match history.
//!
//! Nothing here is stored. Every call rebuilds the table from the roster and the
//! full list of matches, so standings always agree with the recorded results.

use crate::logic::rating::replay_ratings;
use crate::models::{
    MatchId, MatchRecord, Outcome, ParticipantId, Roster, TournamentConfig,
};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// One row of the standings table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StandingsEntry {
    /// 1-based position.
    pub rank: usize,
    pub participant_id: ParticipantId,
    pub name: String,
    pub seed_value: u32,
    /// Matches actually played (BYEs excluded).
    pub played: u32,
    /// Includes BYE wins.
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub byes: u32,
    pub points: u64,
    pub score_for: u64,
    pub score_against: u64,
    pub score_diff: i64,
    /// Elo for rated games, the seed value otherwise.
    pub rating: f64,
    /// Matches in which this participant was the match MVP.
    pub mvp_count: u32,
    pub kills: u64,
    pub deaths: u64,
    /// Shooter games only.
    pub kill_death_ratio: Option<f64>,
    pub is_eliminated: bool,
}

impl StandingsEntry {
    fn blank(participant_id: ParticipantId, name: &str, seed_value: u32, is_eliminated: bool) -> Self {
        Self {
            rank: 0,
            participant_id,
            name: name.to_string(),
            seed_value,
            played: 0,
            wins: 0,
            draws: 0,
            losses: 0,
            byes: 0,
            points: 0,
            score_for: 0,
            score_against: 0,
            score_diff: 0,
            rating: seed_value as f64,
            mvp_count: 0,
            kills: 0,
            deaths: 0,
            kill_death_ratio: None,
            is_eliminated,
        }
    }
}

/// Highest single-match score of the tournament.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MvpAward {
    pub participant_id: ParticipantId,
    pub name: String,
    pub match_id: MatchId,
    pub round: u32,
    pub score: u32,
}

/// Ranked standings for `roster` given the match history.
///
/// Ranking: points, then score difference, then score-for in matches among the
/// tied participants, then seed value, then registration order.
pub fn compute_standings(
    config: &TournamentConfig,
    roster: &Roster,
    matches: &[MatchRecord],
) -> Vec<StandingsEntry> {
    let mut entries: Vec<StandingsEntry> = roster
        .iter()
        .map(|p| StandingsEntry::blank(p.id, &p.name, p.seed_value, p.is_eliminated))
        .collect();
    let index: HashMap<ParticipantId, usize> = entries
        .iter()
        .enumerate()
        .map(|(i, e)| (e.participant_id, i))
        .collect();
    let points = config.points;

    for m in matches.iter().filter(|m| m.is_terminal()) {
        let Some(&a) = index.get(&m.side_a) else { continue };
        if m.is_bye {
            let e = &mut entries[a];
            e.byes += 1;
            e.wins += 1;
            e.points += u64::from(points.win);
            continue;
        }
        let Some(b) = m.side_b_id().and_then(|id| index.get(&id).copied()) else {
            continue;
        };

        for (idx, scored, conceded) in [(a, m.score_a, m.score_b), (b, m.score_b, m.score_a)] {
            let e = &mut entries[idx];
            e.played += 1;
            e.score_for += u64::from(scored);
            e.score_against += u64::from(conceded);
        }

        if let Some(&mvp) = m.mvp().and_then(|id| index.get(&id)) {
            entries[mvp].mvp_count += 1;
        }

        let (winner, loser) = match m.outcome {
            Outcome::WinA => (a, b),
            Outcome::WinB => (b, a),
            Outcome::Draw => {
                for idx in [a, b] {
                    entries[idx].draws += 1;
                    entries[idx].points += u64::from(points.draw);
                }
                continue;
            }
            Outcome::Pending => continue,
        };
        entries[winner].wins += 1;
        entries[winner].points += u64::from(points.win);
        entries[loser].losses += 1;
        entries[loser].points += u64::from(points.loss);
    }

    let ratings = config
        .game
        .has_elo()
        .then(|| replay_ratings(roster, matches));
    let shooter = config.game.is_shooter();
    for e in &mut entries {
        e.score_diff = e.score_for as i64 - e.score_against as i64;
        if let Some(r) = ratings.as_ref().and_then(|r| r.get(&e.participant_id)) {
            e.rating = *r;
        }
        if shooter {
            e.kills = e.score_for;
            e.deaths = e.score_against;
            e.kill_death_ratio = Some(kill_death_ratio(e.kills, e.deaths));
        }
    }

    // Registration order is the roster order, so a stable sort keeps it as the last key.
    entries.sort_by(|x, y| {
        y.points
            .cmp(&x.points)
            .then(y.score_diff.cmp(&x.score_diff))
            .then(y.seed_value.cmp(&x.seed_value))
    });
    break_ties_head_to_head(&mut entries, matches);

    for (i, e) in entries.iter_mut().enumerate() {
        e.rank = i + 1;
    }
    entries
}

/// Reorder each run of entries level on points and score difference by the
/// score they made in matches among themselves.
fn break_ties_head_to_head(entries: &mut [StandingsEntry], matches: &[MatchRecord]) {
    let mut start = 0;
    while start < entries.len() {
        let level = |e: &StandingsEntry| (e.points, e.score_diff);
        let key = level(&entries[start]);
        let end = start
            + entries[start..]
                .iter()
                .take_while(|e| level(e) == key)
                .count();
        if end - start > 1 {
            let group = &mut entries[start..end];
            let members: HashSet<ParticipantId> = group.iter().map(|e| e.participant_id).collect();
            let mut h2h: HashMap<ParticipantId, u64> = HashMap::new();
            for m in matches.iter().filter(|m| m.is_played()) {
                let Some(b) = m.side_b_id() else { continue };
                if members.contains(&m.side_a) && members.contains(&b) {
                    *h2h.entry(m.side_a).or_default() += u64::from(m.score_a);
                    *h2h.entry(b).or_default() += u64::from(m.score_b);
                }
            }
            group.sort_by_key(|e| std::cmp::Reverse(h2h.get(&e.participant_id).copied().unwrap_or(0)));
        }
        start = end;
    }
}

/// Kills per death, two decimals. With no deaths the ratio is the kill count.
pub fn kill_death_ratio(kills: u64, deaths: u64) -> f64 {
    if deaths == 0 {
        return kills as f64;
    }
    (kills as f64 / deaths as f64 * 100.0).round() / 100.0
}

/// Best single-match score across played matches; the earliest wins a tie.
pub fn tournament_mvp(roster: &Roster, matches: &[MatchRecord]) -> Option<MvpAward> {
    let mut best: Option<(ParticipantId, &MatchRecord, u32)> = None;
    for m in matches.iter().filter(|m| m.is_played()) {
        let sides = [(Some(m.side_a), m.score_a), (m.side_b_id(), m.score_b)];
        for (id, score) in sides {
            let Some(id) = id else { continue };
            let beats = match best {
                Some((_, _, top)) => score > top,
                None => score > 0,
            };
            if beats {
                best = Some((id, m, score));
            }
        }
    }
    best.map(|(id, m, score)| MvpAward {
        participant_id: id,
        name: roster.get(id).map(|p| p.name.clone()).unwrap_or_default(),
        match_id: m.id,
        round: m.round,
        score,
    })
}

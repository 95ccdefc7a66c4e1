//! Shared helpers for the integration tests.
#![allow(dead_code)]

use tournament_fixtures::{
    current_round, generate_next_round, is_tournament_complete, record_result, Format,
    GameProfile, MatchRecord, Outcome, ParticipantId, Round, Tournament, TournamentConfig,
};

/// Tournament with `n` participants P0..Pn-1, P0 the strongest seed.
pub fn tournament_with(format: Format, n: usize) -> (Tournament, Vec<ParticipantId>) {
    tournament_with_config(TournamentConfig::new(format, GameProfile::Custom), n)
}

pub fn tournament_with_config(config: TournamentConfig, n: usize) -> (Tournament, Vec<ParticipantId>) {
    let mut t = Tournament::new("Test Cup", config);
    let ids = (0..n)
        .map(|i| t.add_participant(format!("P{i}"), 2000 - 10 * i as u32).unwrap())
        .collect();
    (t, ids)
}

/// Resolve every pending match of the current round as a 1-0 win for side A.
pub fn play_round_side_a_wins(t: &mut Tournament) {
    play_round(t, |_| (1, 0, Outcome::WinA));
}

/// Resolve every pending match of the current round with `result`.
pub fn play_round<F>(t: &mut Tournament, result: F)
where
    F: Fn(&MatchRecord) -> (u32, u32, Outcome),
{
    let round = current_round(t).unwrap();
    for m in round.matches.iter().filter(|m| !m.is_terminal()) {
        let (a, b, outcome) = result(m);
        record_result(t, m.id, a, b, outcome).unwrap();
    }
}

/// Generate and play rounds until the tournament completes. Returns every round.
pub fn play_out<F>(t: &mut Tournament, result: F) -> Vec<Round>
where
    F: Fn(&MatchRecord) -> (u32, u32, Outcome),
{
    let mut rounds = Vec::new();
    while !is_tournament_complete(t) {
        generate_next_round(t).unwrap();
        play_round(t, &result);
        rounds.push(current_round(t).unwrap());
        assert!(rounds.len() <= 256, "tournament never completes");
    }
    rounds
}

/// Unordered pair key.
pub fn pair(a: ParticipantId, b: ParticipantId) -> (ParticipantId, ParticipantId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

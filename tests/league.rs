//! Integration tests for the League format (round robin).

mod common;

use common::{pair, play_out, play_round_side_a_wins, tournament_with};
use std::collections::{HashMap, HashSet};
use tournament_fixtures::{
    generate_next_round, is_tournament_complete, total_rounds, Format, Outcome,
    RoundRobinScheduler, Tournament, TournamentConfig, TournamentError, TournamentState,
};
use uuid::Uuid;

#[test]
fn every_pair_meets_exactly_once() {
    for n in 2..=11 {
        let (mut t, ids) = tournament_with(Format::League, n);
        let rounds = play_out(&mut t, |_| (1, 0, Outcome::WinA));

        let mut meetings: HashMap<_, u32> = HashMap::new();
        for m in rounds.iter().flat_map(|r| &r.matches).filter(|m| !m.is_bye) {
            *meetings.entry(pair(m.side_a, m.side_b_id().unwrap())).or_default() += 1;
        }
        assert_eq!(meetings.len(), n * (n - 1) / 2, "n = {n}");
        assert!(meetings.values().all(|&c| c == 1), "n = {n}");
        for (i, a) in ids.iter().enumerate() {
            for b in &ids[i + 1..] {
                assert!(meetings.contains_key(&pair(*a, *b)));
            }
        }
    }
}

#[test]
fn round_count_and_one_appearance_per_round() {
    for n in 2..=11 {
        let (mut t, ids) = tournament_with(Format::League, n);
        let expected_rounds = if n % 2 == 0 { n - 1 } else { n };
        assert_eq!(total_rounds(&t) as usize, expected_rounds);

        let rounds = play_out(&mut t, |_| (2, 1, Outcome::WinA));
        assert_eq!(rounds.len(), expected_rounds, "n = {n}");

        for round in &rounds {
            assert_eq!(round.matches.len(), (n + 1) / 2);
            let mut seen = HashSet::new();
            for m in &round.matches {
                assert!(seen.insert(m.side_a));
                if let Some(b) = m.side_b_id() {
                    assert!(seen.insert(b));
                }
            }
            // Everyone appears once, BYE included.
            assert_eq!(seen.len(), ids.len());
        }
    }
}

#[test]
fn odd_roster_gets_one_bye_each() {
    for n in [3, 5, 7, 9] {
        let (mut t, ids) = tournament_with(Format::League, n);
        let rounds = play_out(&mut t, |_| (1, 0, Outcome::WinA));

        let mut byes: HashMap<_, u32> = HashMap::new();
        for m in rounds.iter().flat_map(|r| &r.matches).filter(|m| m.is_bye) {
            *byes.entry(m.side_a).or_default() += 1;
        }
        let counts: Vec<u32> = ids.iter().map(|id| byes.get(id).copied().unwrap_or(0)).collect();
        assert!(counts.iter().all(|&c| c == 1), "n = {n}: {counts:?}");
        let max = counts.iter().max().unwrap();
        let min = counts.iter().min().unwrap();
        assert!(max - min <= 1);
    }
}

#[test]
fn even_roster_has_no_byes() {
    let (mut t, _) = tournament_with(Format::League, 6);
    let rounds = play_out(&mut t, |_| (0, 3, Outcome::WinB));
    assert!(rounds.iter().flat_map(|r| &r.matches).all(|m| !m.is_bye));
}

#[test]
fn bye_matches_are_resolved_at_generation() {
    let (mut t, _) = tournament_with(Format::League, 5);
    let round = generate_next_round(&mut t).unwrap();
    let byes: Vec<_> = round.matches.iter().filter(|m| m.is_bye).collect();
    assert_eq!(byes.len(), 1);
    assert_eq!(byes[0].outcome, Outcome::WinA);
    assert_eq!(round.pending_count(), 2);
}

#[test]
fn completes_after_last_round() {
    let (mut t, _) = tournament_with(Format::League, 4);
    for _ in 0..3 {
        assert!(!is_tournament_complete(&t));
        generate_next_round(&mut t).unwrap();
        play_round_side_a_wins(&mut t);
    }
    assert!(is_tournament_complete(&t));
    assert_eq!(t.state(), TournamentState::Completed);
    assert_eq!(generate_next_round(&mut t), Err(TournamentError::TournamentComplete));
    assert_eq!(t.matches().len(), 6);
}

#[test]
fn fewer_than_two_participants_is_rejected() {
    let mut t = Tournament::new("Solo", TournamentConfig::new(Format::League, Default::default()));
    assert_eq!(
        generate_next_round(&mut t),
        Err(TournamentError::InvalidRosterSize { size: 0 })
    );
    t.add_participant("Alone", 1000).unwrap();
    assert_eq!(
        generate_next_round(&mut t),
        Err(TournamentError::InvalidRosterSize { size: 1 })
    );
    assert!(t.matches().is_empty());
    assert_eq!(t.state(), TournamentState::Setup);
    assert!(!t.roster().is_locked());
}

#[test]
fn scheduler_is_deterministic_and_bounded() {
    let ids: Vec<Uuid> = (0..6).map(|_| Uuid::new_v4()).collect();
    let a = RoundRobinScheduler::new(&ids);
    let b = RoundRobinScheduler::new(&ids);
    assert_eq!(a.round_count(), 5);
    for r in 1..=5 {
        assert_eq!(a.round(r), b.round(r));
        assert_eq!(a.round(r).len(), 3);
    }
    assert!(a.round(0).is_empty());
    assert!(a.round(6).is_empty());
}

//! Integration tests for the round lifecycle: registration, result validation,
//! round ordering, corrections and atomic failures.

mod common;

use common::{play_round_side_a_wins, tournament_with, tournament_with_config};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;
use tournament_fixtures::{
    correct_result, current_round, generate_next_round, record_result, rounds, standings, Format,
    GameProfile, Outcome, Tournament, TournamentConfig, TournamentError, TournamentState,
    MAX_PARTICIPANTS,
};
use uuid::Uuid;

#[test]
fn next_round_requires_current_round_resolved() {
    let (mut t, _) = tournament_with(Format::League, 4);
    let round = generate_next_round(&mut t).unwrap();
    record_result(&mut t, round.matches[0].id, 1, 0, Outcome::WinA).unwrap();

    assert_eq!(
        generate_next_round(&mut t),
        Err(TournamentError::IncompleteRound { round: 1, pending: 1 })
    );
    assert_eq!(t.matches().len(), 2);
    assert_eq!(t.current_round_number(), 1);

    record_result(&mut t, round.matches[1].id, 0, 1, Outcome::WinB).unwrap();
    assert_eq!(generate_next_round(&mut t).unwrap().number, 2);
    assert_eq!(rounds(&t).len(), 2);
}

#[test]
fn roster_locks_when_first_round_is_generated() {
    let (mut t, ids) = tournament_with(Format::Swiss, 4);
    assert_eq!(t.state(), TournamentState::Setup);
    assert!(current_round(&t).is_none());
    t.remove_participant(ids[3]).unwrap();
    t.add_participant("Late", 900).unwrap();

    generate_next_round(&mut t).unwrap();
    assert_eq!(t.state(), TournamentState::InProgress);
    assert!(t.roster().is_locked());
    assert_eq!(t.add_participant("Later", 900), Err(TournamentError::RosterLocked));
    assert_eq!(t.remove_participant(ids[0]), Err(TournamentError::RosterLocked));
    assert_eq!(
        t.shuffle_seeds(&mut StdRng::seed_from_u64(1)),
        Err(TournamentError::RosterLocked)
    );
    assert_eq!(t.roster().len(), 4);
}

#[test]
fn registration_validates_names_and_size() {
    let mut t = Tournament::new("Open", TournamentConfig::default());
    assert_eq!(t.add_participant("   ", 1000), Err(TournamentError::EmptyParticipantName));
    t.add_participant(" Ada ", 1000).unwrap();
    assert_eq!(t.roster().iter().next().unwrap().name, "Ada");
    assert_eq!(t.add_participant("ADA", 1200), Err(TournamentError::DuplicateParticipantName));

    let unknown = Uuid::new_v4();
    assert_eq!(
        t.remove_participant(unknown),
        Err(TournamentError::ParticipantNotFound(unknown))
    );

    for i in 1..MAX_PARTICIPANTS {
        t.add_participant(format!("P{i}"), 1000).unwrap();
    }
    assert_eq!(t.roster().len(), MAX_PARTICIPANTS);
    assert_eq!(
        t.add_participant("One too many", 1000),
        Err(TournamentError::InvalidRosterSize { size: MAX_PARTICIPANTS + 1 })
    );
}

#[test]
fn shuffled_seeds_are_distinct_and_reproducible() {
    let build = || {
        let (mut t, _) = tournament_with(Format::Knockout, 8);
        t.shuffle_seeds(&mut StdRng::seed_from_u64(42)).unwrap();
        t.roster().iter().map(|p| p.seed_value).collect::<Vec<_>>()
    };
    let first = build();
    assert_eq!(first, build());
    assert_eq!(first.iter().collect::<HashSet<_>>().len(), 8);
}

#[test]
fn unknown_and_duplicate_results_are_rejected() {
    let (mut t, _) = tournament_with(Format::League, 3);
    let round = generate_next_round(&mut t).unwrap();
    let bye = round.matches.iter().find(|m| m.is_bye).unwrap();
    let game = round.matches.iter().find(|m| !m.is_bye).unwrap();

    let unknown = Uuid::new_v4();
    assert_eq!(
        record_result(&mut t, unknown, 1, 0, Outcome::WinA),
        Err(TournamentError::UnknownMatch(unknown))
    );
    assert_eq!(
        record_result(&mut t, bye.id, 1, 0, Outcome::WinA),
        Err(TournamentError::DuplicateResultSubmission(bye.id))
    );

    record_result(&mut t, game.id, 2, 1, Outcome::WinA).unwrap();
    assert_eq!(
        record_result(&mut t, game.id, 0, 1, Outcome::WinB),
        Err(TournamentError::DuplicateResultSubmission(game.id))
    );
    let stored = t.get_match(game.id).unwrap();
    assert_eq!((stored.score_a, stored.score_b, stored.outcome), (2, 1, Outcome::WinA));
}

#[test]
fn results_must_be_final_and_consistent() {
    let (mut t, _) = tournament_with(Format::League, 2);
    let round = generate_next_round(&mut t).unwrap();
    let id = round.matches[0].id;
    let before = standings(&t);

    assert_eq!(record_result(&mut t, id, 0, 0, Outcome::Pending), Err(TournamentError::PendingResult));
    assert_eq!(
        record_result(&mut t, id, 0, 2, Outcome::WinA),
        Err(TournamentError::ScoreOutcomeMismatch { score_a: 0, score_b: 2, outcome: Outcome::WinA })
    );
    assert!(matches!(
        record_result(&mut t, id, 1, 2, Outcome::Draw),
        Err(TournamentError::ScoreOutcomeMismatch { .. })
    ));

    // Failed submissions leave no trace.
    assert_eq!(t.get_match(id).unwrap().outcome, Outcome::Pending);
    assert_eq!(standings(&t), before);
}

#[test]
fn draws_follow_the_game_profile() {
    let config = TournamentConfig::new(Format::League, GameProfile::Valorant);
    let (mut t, _) = tournament_with_config(config, 2);
    let round = generate_next_round(&mut t).unwrap();
    assert_eq!(
        record_result(&mut t, round.matches[0].id, 13, 13, Outcome::Draw),
        Err(TournamentError::InvalidOutcomeForFormat { format: Format::League, outcome: Outcome::Draw })
    );

    let config = TournamentConfig::new(Format::League, GameProfile::Chess);
    let (mut t, _) = tournament_with_config(config, 2);
    let round = generate_next_round(&mut t).unwrap();
    let m = record_result(&mut t, round.matches[0].id, 1, 1, Outcome::Draw).unwrap();
    assert_eq!(m.outcome, Outcome::Draw);
}

#[test]
fn correction_rewrites_a_current_round_result() {
    let (mut t, _) = tournament_with(Format::League, 4);
    let round = generate_next_round(&mut t).unwrap();
    let id = round.matches[0].id;
    record_result(&mut t, id, 1, 0, Outcome::WinA).unwrap();

    let m = correct_result(&mut t, id, 0, 2, Outcome::WinB).unwrap();
    assert_eq!((m.score_a, m.score_b, m.outcome), (0, 2, Outcome::WinB));
    let table = standings(&t);
    let side_b = m.side_b_id().unwrap();
    assert_eq!(table.iter().find(|e| e.participant_id == side_b).unwrap().points, 3);
    assert_eq!(table.iter().find(|e| e.participant_id == m.side_a).unwrap().points, 0);

    // Pending matches are recorded, not corrected.
    let pending = round.matches[1].id;
    assert_eq!(
        correct_result(&mut t, pending, 1, 0, Outcome::WinA),
        Err(TournamentError::NotCorrectable(pending))
    );

    // Results of a superseded round are final.
    play_round_side_a_wins(&mut t);
    generate_next_round(&mut t).unwrap();
    assert_eq!(
        correct_result(&mut t, id, 3, 0, Outcome::WinA),
        Err(TournamentError::NotCorrectable(id))
    );
}

#[test]
fn knockout_correction_moves_the_elimination() {
    let (mut t, _) = tournament_with(Format::Knockout, 2);
    let round = generate_next_round(&mut t).unwrap();
    let m = &round.matches[0];
    let (a, b) = (m.side_a, m.side_b_id().unwrap());

    record_result(&mut t, m.id, 2, 0, Outcome::WinA).unwrap();
    assert!(t.roster().get(b).unwrap().is_eliminated);

    correct_result(&mut t, m.id, 1, 3, Outcome::WinB).unwrap();
    assert!(t.roster().get(a).unwrap().is_eliminated);
    assert!(!t.roster().get(b).unwrap().is_eliminated);
    assert_eq!(tournament_fixtures::champion(&t).unwrap().unwrap().id, b);

    assert!(matches!(
        correct_result(&mut t, m.id, 1, 1, Outcome::Draw),
        Err(TournamentError::InvalidOutcomeForFormat { .. })
    ));
}

#[test]
fn tournaments_are_independent() {
    let (mut first, _) = tournament_with(Format::League, 4);
    let (second, _) = tournament_with(Format::League, 4);
    generate_next_round(&mut first).unwrap();
    assert_eq!(first.matches().len(), 2);
    assert!(second.matches().is_empty());
    assert!(!second.roster().is_locked());
}

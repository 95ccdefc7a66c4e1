//! Round lifecycle for every format: generate a round, record results, advance.
//!
//! Format rules are dispatched here on `Format`; the schedulers themselves are
//! pure and only see transient references to the roster and match history.

use crate::logic::knockout::KnockoutBracket;
use crate::logic::round_robin::RoundRobinScheduler;
use crate::logic::setup::{check_ready_to_start, lock_roster};
use crate::logic::standings::{compute_standings, StandingsEntry};
use crate::logic::swiss::SwissPairer;
use crate::models::{
    Format, MatchId, MatchRecord, Outcome, Pairing, Participant, ParticipantId, Round,
    Tournament, TournamentConfig, TournamentError, TournamentState,
};

/// Generate the next round and append it to the match history.
///
/// The first call locks the roster. Later calls require every match of the
/// current round to have a result. BYE matches come back already resolved.
pub fn generate_next_round(tournament: &mut Tournament) -> Result<Round, TournamentError> {
    match tournament.state {
        TournamentState::Completed => return Err(TournamentError::TournamentComplete),
        TournamentState::Setup => check_ready_to_start(tournament)?,
        TournamentState::InProgress => {
            let current = tournament.round(tournament.current_round);
            if !current.is_resolved() {
                return Err(TournamentError::IncompleteRound {
                    round: current.number,
                    pending: current.pending_count(),
                });
            }
            if final_round_reached(tournament) {
                return Err(TournamentError::TournamentComplete);
            }
        }
    }

    let number = tournament.current_round + 1;
    let pairings = pairings_for_round(tournament, number);
    if pairings.is_empty() {
        return Err(TournamentError::TournamentComplete);
    }

    if tournament.state == TournamentState::Setup {
        lock_roster(tournament);
    }
    let matches: Vec<MatchRecord> = pairings
        .into_iter()
        .map(|p| MatchRecord::from_pairing(p, number))
        .collect();
    for m in &matches {
        match m.side_b_id() {
            Some(b) => log::debug!("Round {}: {} vs {}", number, m.side_a, b),
            None => log::debug!("Round {}: {} has a BYE", number, m.side_a),
        }
    }
    tournament.matches.extend(matches.iter().cloned());
    tournament.current_round = number;
    log::info!(
        "Tournament {}: generated round {} with {} match(es)",
        tournament.id,
        number,
        matches.len()
    );
    update_completion(tournament);

    Ok(Round { number, matches })
}

fn pairings_for_round(tournament: &Tournament, number: u32) -> Vec<Pairing> {
    let seeded: Vec<ParticipantId> = tournament.roster.by_seed().iter().map(|p| p.id).collect();
    match tournament.format() {
        Format::League => RoundRobinScheduler::new(&seeded).round(number),
        Format::Knockout if number == 1 => KnockoutBracket::first_round(&seeded),
        Format::Knockout => KnockoutBracket::next_round(&tournament.round(number - 1).matches),
        Format::Swiss => SwissPairer::pair(&standings(tournament), &tournament.matches),
    }
}

/// Record the result of a pending match.
///
/// Knockout losers are eliminated. Resolving the last match of the final round
/// completes the tournament.
pub fn record_result(
    tournament: &mut Tournament,
    match_id: MatchId,
    score_a: u32,
    score_b: u32,
    outcome: Outcome,
) -> Result<MatchRecord, TournamentError> {
    let idx = tournament
        .matches
        .iter()
        .position(|m| m.id == match_id)
        .ok_or(TournamentError::UnknownMatch(match_id))?;
    if tournament.matches[idx].is_terminal() {
        return Err(TournamentError::DuplicateResultSubmission(match_id));
    }
    validate_result(&tournament.config, score_a, score_b, outcome)?;

    let m = &mut tournament.matches[idx];
    m.score_a = score_a;
    m.score_b = score_b;
    m.outcome = outcome;
    let recorded = m.clone();
    log::debug!(
        "Match {} (round {}): {}-{} {}",
        recorded.id,
        recorded.round,
        score_a,
        score_b,
        outcome
    );

    if tournament.format() == Format::Knockout {
        if let Some(p) = recorded.loser().and_then(|id| tournament.roster.get_mut(id)) {
            p.eliminate();
        }
    }
    update_completion(tournament);
    Ok(recorded)
}

/// Overwrite the result of a played match in the current round.
///
/// Validated like `record_result`. In Knockout the elimination follows the
/// corrected winner, which is only safe while the next round does not exist.
pub fn correct_result(
    tournament: &mut Tournament,
    match_id: MatchId,
    score_a: u32,
    score_b: u32,
    outcome: Outcome,
) -> Result<MatchRecord, TournamentError> {
    let idx = tournament
        .matches
        .iter()
        .position(|m| m.id == match_id)
        .ok_or(TournamentError::UnknownMatch(match_id))?;
    let existing = &tournament.matches[idx];
    if existing.is_bye || !existing.is_terminal() || existing.round != tournament.current_round {
        return Err(TournamentError::NotCorrectable(match_id));
    }
    validate_result(&tournament.config, score_a, score_b, outcome)?;

    let previous_loser = existing.loser();
    let m = &mut tournament.matches[idx];
    m.score_a = score_a;
    m.score_b = score_b;
    m.outcome = outcome;
    let corrected = m.clone();
    log::info!(
        "Match {} (round {}) corrected to {}-{} {}",
        corrected.id,
        corrected.round,
        score_a,
        score_b,
        outcome
    );

    if tournament.format() == Format::Knockout {
        if let Some(p) = previous_loser.and_then(|id| tournament.roster.get_mut(id)) {
            p.reinstate();
        }
        if let Some(p) = corrected.loser().and_then(|id| tournament.roster.get_mut(id)) {
            p.eliminate();
        }
    }
    Ok(corrected)
}

/// Check a submitted result against the format, the game and its own scores.
fn validate_result(
    config: &TournamentConfig,
    score_a: u32,
    score_b: u32,
    outcome: Outcome,
) -> Result<(), TournamentError> {
    if outcome == Outcome::Pending {
        return Err(TournamentError::PendingResult);
    }
    if outcome == Outcome::Draw && (config.format == Format::Knockout || !config.game.allows_draw()) {
        return Err(TournamentError::InvalidOutcomeForFormat {
            format: config.format,
            outcome,
        });
    }
    if Outcome::from_scores(score_a, score_b) != outcome {
        return Err(TournamentError::ScoreOutcomeMismatch {
            score_a,
            score_b,
            outcome,
        });
    }
    Ok(())
}

/// Move to Completed once the final round is fully resolved.
fn update_completion(tournament: &mut Tournament) {
    if tournament.state != TournamentState::InProgress {
        return;
    }
    if tournament.round(tournament.current_round).is_resolved() && final_round_reached(tournament) {
        tournament.state = TournamentState::Completed;
        log::info!(
            "Tournament {} completed after {} round(s)",
            tournament.id,
            tournament.current_round
        );
    }
}

fn final_round_reached(tournament: &Tournament) -> bool {
    match tournament.format() {
        Format::Knockout => tournament.round(tournament.current_round).matches.len() == 1,
        Format::League | Format::Swiss => tournament.current_round >= total_rounds(tournament),
    }
}

/// Number of rounds the tournament will have, from the roster size.
pub fn total_rounds(tournament: &Tournament) -> u32 {
    let n = tournament.roster.len();
    match tournament.format() {
        Format::League => {
            let ids: Vec<ParticipantId> = tournament.roster.iter().map(|p| p.id).collect();
            RoundRobinScheduler::new(&ids).round_count()
        }
        Format::Knockout => KnockoutBracket::bracket_size(n).trailing_zeros(),
        Format::Swiss => tournament.config.swiss_round_count(n),
    }
}

/// The latest generated round (None before the first one).
pub fn current_round(tournament: &Tournament) -> Option<Round> {
    (tournament.current_round > 0).then(|| tournament.round(tournament.current_round))
}

/// Every generated round, oldest first.
pub fn rounds(tournament: &Tournament) -> Vec<Round> {
    (1..=tournament.current_round).map(|n| tournament.round(n)).collect()
}

/// Ranked standings recomputed from the full match history.
pub fn standings(tournament: &Tournament) -> Vec<StandingsEntry> {
    compute_standings(&tournament.config, &tournament.roster, &tournament.matches)
}

pub fn is_tournament_complete(tournament: &Tournament) -> bool {
    tournament.state == TournamentState::Completed
}

/// Knockout champion: the undefeated winner of the final. None until then.
pub fn champion(tournament: &Tournament) -> Result<Option<Participant>, TournamentError> {
    if tournament.format() != Format::Knockout {
        return Err(TournamentError::NotApplicableForFormat(tournament.format()));
    }
    if !is_tournament_complete(tournament) {
        return Ok(None);
    }
    let last = tournament.round(tournament.current_round);
    Ok(KnockoutBracket::champion(&last.matches).and_then(|id| tournament.roster.get(id).cloned()))
}

/// Winner of a completed tournament of any format: the Knockout champion or
/// the standings leader.
pub fn winner(tournament: &Tournament) -> Option<Participant> {
    if !is_tournament_complete(tournament) {
        return None;
    }
    match tournament.format() {
        Format::Knockout => champion(tournament).ok().flatten(),
        Format::League | Format::Swiss => standings(tournament)
            .first()
            .and_then(|e| tournament.roster.get(e.participant_id).cloned()),
    }
}

//! Setup phase: leave registration (Setup -> InProgress) and lock the roster.

use crate::models::{Tournament, TournamentError, TournamentState};

/// Fail unless the tournament can start: still in Setup with a valid roster size.
pub(crate) fn check_ready_to_start(tournament: &Tournament) -> Result<(), TournamentError> {
    if tournament.state != TournamentState::Setup {
        return Err(TournamentError::RosterLocked);
    }
    tournament.roster.check_size()
}

/// Lock the roster and move to InProgress. Call only after `check_ready_to_start`.
pub(crate) fn lock_roster(tournament: &mut Tournament) {
    tournament.roster.lock();
    tournament.state = TournamentState::InProgress;
    log::info!(
        "Tournament {} started: {} participants, format {}",
        tournament.id,
        tournament.roster.len(),
        tournament.format()
    );
}

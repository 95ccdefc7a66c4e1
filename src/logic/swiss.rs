//! Swiss format: pair participants on similar scores, avoiding rematches.

use crate::logic::standings::StandingsEntry;
use crate::models::{MatchRecord, Pairing, ParticipantId};
use std::collections::HashMap;

/// Greedy Swiss pairer.
///
/// Participants are ordered by points then rating. The top unpaired
/// participant takes the nearest-ranked one it has not met yet. When it has
/// met everyone left, it takes the one it met longest ago, so a round can
/// always be completed. The pairing is not globally optimal.
pub struct SwissPairer;

impl SwissPairer {
    /// One round of pairings from the current standings and full match history.
    pub fn pair(standings: &[StandingsEntry], history: &[MatchRecord]) -> Vec<Pairing> {
        let mut ranked: Vec<&StandingsEntry> = standings.iter().filter(|e| !e.is_eliminated).collect();
        // Stable: equal points and rating keep standings order.
        ranked.sort_by(|x, y| {
            y.points
                .cmp(&x.points)
                .then(y.rating.total_cmp(&x.rating))
        });
        let mut pool: Vec<ParticipantId> = ranked.iter().map(|e| e.participant_id).collect();

        let mut byes: HashMap<ParticipantId, u32> = HashMap::new();
        let mut last_met: HashMap<(ParticipantId, ParticipantId), u32> = HashMap::new();
        for m in history.iter().filter(|m| m.is_terminal()) {
            match m.side_b_id() {
                None => *byes.entry(m.side_a).or_default() += 1,
                Some(b) => {
                    let round = last_met.entry(pair_key(m.side_a, b)).or_default();
                    *round = (*round).max(m.round);
                }
            }
        }

        let mut pairings = Vec::with_capacity(pool.len() / 2 + 1);

        // Lowest-ranked participant among those with the fewest BYEs so far.
        let bye = if pool.len() % 2 == 1 {
            let bye_count = |id: &ParticipantId| byes.get(id).copied().unwrap_or(0);
            let fewest = pool.iter().map(|id| bye_count(id)).min().unwrap_or(0);
            let idx = pool.iter().rposition(|id| bye_count(id) == fewest);
            idx.map(|idx| pool.remove(idx))
        } else {
            None
        };

        while !pool.is_empty() {
            let top = pool.remove(0);
            let fresh = pool
                .iter()
                .position(|c| !last_met.contains_key(&pair_key(top, *c)));
            let idx = match fresh {
                Some(idx) => idx,
                None => {
                    let idx = pool
                        .iter()
                        .enumerate()
                        .min_by_key(|(_, c)| last_met.get(&pair_key(top, **c)).copied().unwrap_or(0))
                        .map(|(i, _)| i)
                        .unwrap_or(0);
                    log::warn!(
                        "Swiss pairing: {} has met every remaining participant, pairing a rematch",
                        top
                    );
                    idx
                }
            };
            let opponent = pool.remove(idx);
            log::debug!("Swiss pairing: {} vs {}", top, opponent);
            pairings.push(Pairing::new(top, opponent));
        }

        if let Some(id) = bye {
            log::debug!("Swiss pairing: {} receives a BYE", id);
            pairings.push(Pairing::bye(id));
        }
        pairings
    }
}

fn pair_key(a: ParticipantId, b: ParticipantId) -> (ParticipantId, ParticipantId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

//! Knockout format: seeded single-elimination bracket.

use crate::models::{MatchRecord, Pairing, ParticipantId};

/// Single-elimination bracket builder.
///
/// Round 1 places `N` seeds into `2^ceil(log2 N)` slots; missing seeds are
/// BYEs, so the top seeds receive them. Every later round pairs the winners of
/// bracket-adjacent matches, which is why round matches are kept in bracket
/// order.
pub struct KnockoutBracket;

impl KnockoutBracket {
    /// Number of first-round slots for `participants` entrants.
    pub fn bracket_size(participants: usize) -> usize {
        participants.max(2).next_power_of_two()
    }

    /// Round 1 pairings. `seeded` is ordered strongest first.
    pub fn first_round(seeded: &[ParticipantId]) -> Vec<Pairing> {
        let size = Self::bracket_size(seeded.len());
        let positions = seed_positions(size);
        positions
            .chunks_exact(2)
            .filter_map(|pair| {
                let a = seeded.get(pair[0] - 1).copied();
                let b = seeded.get(pair[1] - 1).copied();
                match (a, b) {
                    (Some(a), Some(b)) => Some(Pairing::new(a, b)),
                    (Some(p), None) | (None, Some(p)) => Some(Pairing::bye(p)),
                    (None, None) => None,
                }
            })
            .collect()
    }

    /// Pairings for the round after `previous` (all terminal, bracket order).
    ///
    /// Empty once `previous` was the final.
    pub fn next_round(previous: &[MatchRecord]) -> Vec<Pairing> {
        if previous.len() < 2 {
            return Vec::new();
        }
        let winners: Vec<ParticipantId> = previous.iter().filter_map(|m| m.winner()).collect();
        winners
            .chunks(2)
            .map(|pair| match pair {
                [a, b] => Pairing::new(*a, *b),
                [a] => Pairing::bye(*a),
                _ => unreachable!("chunks(2) yields one or two winners"),
            })
            .collect()
    }

    /// Winner of the final, once `last_round` is a single resolved match.
    pub fn champion(last_round: &[MatchRecord]) -> Option<ParticipantId> {
        match last_round {
            [final_match] => final_match.winner(),
            _ => None,
        }
    }
}

/// Standard bracket order of 1-based seeds for a power-of-two `size`.
///
/// Adjacent entries meet in round 1 (1 v size, then size/2 v size/2+1, ...),
/// with seeds 1 and 2 in opposite halves.
fn seed_positions(size: usize) -> Vec<usize> {
    let mut seeds = vec![1usize];
    while seeds.len() < size {
        let n = seeds.len();
        let mut next = Vec::with_capacity(n * 2);
        for seed in seeds.iter().copied() {
            next.push(seed);
            next.push(n * 2 + 1 - seed);
        }
        seeds = next;
    }
    seeds
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_positions_for_eight() {
        assert_eq!(seed_positions(8), vec![1, 8, 4, 5, 2, 7, 3, 6]);
    }

    #[test]
    fn seed_positions_keep_top_two_apart() {
        let positions = seed_positions(16);
        let one = positions.iter().position(|&s| s == 1).unwrap();
        let two = positions.iter().position(|&s| s == 2).unwrap();
        assert!(one < 8 && two >= 8);
    }

    #[test]
    fn bracket_size_rounds_up_to_power_of_two() {
        assert_eq!(KnockoutBracket::bracket_size(2), 2);
        assert_eq!(KnockoutBracket::bracket_size(5), 8);
        assert_eq!(KnockoutBracket::bracket_size(8), 8);
        assert_eq!(KnockoutBracket::bracket_size(100), 128);
    }
}

//! League format: full round-robin schedule by the circle method.

use crate::models::{Pairing, ParticipantId};

/// Round-robin schedule over a fixed participant order.
///
/// Slot 0 stays put while the other slots rotate one step per round; each
/// round pairs opposite slots. Odd rosters get a virtual BYE in slot 0, so
/// the BYE meets every participant exactly once over the schedule.
#[derive(Clone, Debug)]
pub struct RoundRobinScheduler {
    slots: Vec<Option<ParticipantId>>,
}

impl RoundRobinScheduler {
    pub fn new(participants: &[ParticipantId]) -> Self {
        let mut slots = Vec::with_capacity(participants.len() + 1);
        if participants.len() % 2 == 1 {
            slots.push(None);
        }
        slots.extend(participants.iter().copied().map(Some));
        Self { slots }
    }

    /// N-1 rounds for even N, N for odd N.
    pub fn round_count(&self) -> u32 {
        self.slots.len().saturating_sub(1) as u32
    }

    /// Pairings for round `number` (1-based). Empty outside the schedule.
    pub fn round(&self, number: u32) -> Vec<Pairing> {
        if number == 0 || number > self.round_count() {
            return Vec::new();
        }
        let size = self.slots.len();
        let rotating = size - 1;
        let shift = (number as usize - 1) % rotating;

        let mut arrangement = Vec::with_capacity(size);
        arrangement.push(self.slots[0]);
        for i in 0..rotating {
            arrangement.push(self.slots[1 + (i + rotating - shift) % rotating]);
        }

        (0..size / 2)
            .filter_map(|i| {
                let (mut a, mut b) = (arrangement[i], arrangement[size - 1 - i]);
                // Alternate sides of the fixed slot so it is not always side A.
                if i == 0 && number % 2 == 0 {
                    std::mem::swap(&mut a, &mut b);
                }
                match (a, b) {
                    (Some(a), Some(b)) => Some(Pairing::new(a, b)),
                    (Some(p), None) | (None, Some(p)) => Some(Pairing::bye(p)),
                    (None, None) => None,
                }
            })
            .collect()
    }
}

//! Base-runner bookkeeping for one half-inning.

use serde::{Deserialize, Serialize};

use crate::models::player::PlayerId;

/// Bases a runner can occupy.
pub const BASES: usize = 3;

/// First, second, and third base, each empty or owned by one runner.
///
/// The queue implements forced advancement only: a batter reaching base
/// pushes every existing runner the same number of bases, and anyone pushed
/// past third scores. There is no thrown-out-advancing mechanic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseQueue {
    slots: [Option<PlayerId>; BASES],
}

impl BaseQueue {
    pub fn new() -> Self {
        BaseQueue::default()
    }

    /// Empty all three bases. Every half-inning starts from here.
    pub fn clear(&mut self) {
        self.slots = [None; BASES];
    }

    /// Occupant of base 1, 2, or 3.
    ///
    /// Panics on any other index: asking for a fourth base is a programming
    /// error, not a game event.
    pub fn runner_on(&self, base: usize) -> Option<PlayerId> {
        assert!((1..=BASES).contains(&base), "can only ask for base 1, 2, or 3");
        self.slots[base - 1]
    }

    pub fn is_empty(&self, base: usize) -> bool {
        self.runner_on(base).is_none()
    }

    /// All three slots, first base first.
    pub fn snapshot(&self) -> [Option<PlayerId>; BASES] {
        self.slots
    }

    pub fn runner_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Put the batter on for a hit of `n_bases` (1-3) or a home run (4),
    /// forcing every existing runner forward the same distance.
    ///
    /// Returns everyone who crossed home, deepest base first; on a home run
    /// the batter is last. Scoring is evaluated strictly after shifting.
    pub fn advance_batter(&mut self, batter: PlayerId, n_bases: u8) -> Vec<PlayerId> {
        assert!((1..=4).contains(&n_bases), "a batter advances 1 to 4 bases");
        tracing::debug!("runners before advance: {:?}", self.slots);

        let mut scored = Vec::new();

        if n_bases == 4 {
            // everyone comes home, batter included; nobody takes a base
            for slot in self.slots.iter_mut().rev() {
                if let Some(runner) = slot.take() {
                    scored.push(runner);
                }
            }
            scored.push(batter);
            return scored;
        }

        let shift = usize::from(n_bases);
        let before = self.slots;
        self.slots = [None; BASES];
        for (index, runner) in before.into_iter().enumerate() {
            if let Some(runner) = runner {
                match index + shift {
                    target if target < BASES => self.slots[target] = Some(runner),
                    _ => scored.push(runner),
                }
            }
        }
        self.slots[shift - 1] = Some(batter);

        // report scorers in the order they crossed home
        scored.reverse();
        tracing::debug!("runners after advance: {:?}, scored {:?}", self.slots, scored);
        scored
    }
}

//! Computer player for Notakto.

use crate::board::{NotaktoBoard, NotaktoMove};
use crate::rules::NotaktoRules;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, instrument};
use turnboard_engine::{Seat, Strategy, first_scanned, pick_random};

/// Plays the first cross that does not complete a three-in-a-row; when
/// every move kills a board, picks one at random.
#[derive(Debug)]
pub struct NotaktoComputer {
    rng: StdRng,
}

impl NotaktoComputer {
    /// Uses the given generator for the random fallback.
    pub fn new(rng: StdRng) -> Self {
        Self { rng }
    }

    /// Reproducible player.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl Default for NotaktoComputer {
    fn default() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl Strategy<NotaktoRules> for NotaktoComputer {
    #[instrument(skip(self, rules, board))]
    fn select(&mut self, rules: &NotaktoRules, board: &NotaktoBoard, seat: Seat) -> Option<NotaktoMove> {
        let safe = first_scanned(rules, board, seat, |after, mv| !after.is_dead(mv.board));
        if let Some(mv) = safe {
            debug!(%mv, "Safe cross found");
            return Some(mv);
        }
        debug!("Every cross kills a board");
        pick_random(rules, board, seat, &mut self.rng)
    }
}

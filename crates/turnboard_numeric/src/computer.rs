//! Computer player for numerical tic-tac-toe.

use crate::board::{NumberBoard, NumberMove};
use crate::rules::NumericRules;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, instrument};
use turnboard_engine::{Seat, Strategy, first_scanned, pick_random};

/// Takes an immediately winning placement if one exists, otherwise plays
/// a random legal number.
#[derive(Debug)]
pub struct NumericComputer {
    rng: StdRng,
}

impl NumericComputer {
    /// Uses the given generator for the random fallback.
    pub fn new(rng: StdRng) -> Self {
        Self { rng }
    }

    /// Reproducible player.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl Default for NumericComputer {
    fn default() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl Strategy<NumericRules> for NumericComputer {
    #[instrument(skip(self, rules, board))]
    fn select(&mut self, rules: &NumericRules, board: &NumberBoard, seat: Seat) -> Option<NumberMove> {
        let winning = first_scanned(rules, board, seat, |after, mv| {
            after.winning_line_through(mv.row, mv.col).is_some()
        });
        if let Some(mv) = winning {
            debug!(%mv, "Winning placement found");
            return Some(mv);
        }
        pick_random(rules, board, seat, &mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use turnboard_engine::{Board, Rules};

    #[test]
    fn test_takes_immediate_win() {
        let rules = NumericRules::default();
        let mut board = rules.new_board();
        board.apply_move(&NumberMove::new(0, 0, 6));
        board.apply_move(&NumberMove::new(0, 1, 2));

        let mv = NumericComputer::seeded(1).select(&rules, &board, Seat::First);
        assert_eq!(mv, Some(NumberMove::new(0, 2, 7)));
    }

    #[test]
    fn test_random_fallback_is_legal_and_reproducible() {
        let rules = NumericRules::default();
        let board = rules.new_board();
        let first = NumericComputer::seeded(42).select(&rules, &board, Seat::Second);
        let again = NumericComputer::seeded(42).select(&rules, &board, Seat::Second);

        assert_eq!(first, again);
        let mv = first.unwrap();
        assert!(rules.check_move(&board, Seat::Second, &mv).is_ok());
    }

    #[test]
    fn test_no_move_when_pool_is_empty() {
        let rules = NumericRules::default();
        let mut board = rules.new_board();
        for (i, value) in [2, 4, 6, 8].into_iter().enumerate() {
            board.apply_move(&NumberMove::new(i / 3, i % 3, value));
        }
        assert_eq!(NumericComputer::seeded(3).select(&rules, &board, Seat::Second), None);
    }
}

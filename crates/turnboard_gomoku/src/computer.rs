//! Computer player for Gomoku.

use crate::board::{AXES, Stone, StoneBoard, StoneMove};
use crate::rules::GomokuRules;
use tracing::{debug, instrument};
use turnboard_engine::{Rules, Seat, Strategy, first_scanned};

/// Wins immediately when it can; otherwise plays the cell that best
/// extends its own runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct GomokuComputer;

impl GomokuComputer {
    /// Sum over the four axes of the squared length of the `stone` run
    /// the cell would join, the cell itself included.
    pub fn score(board: &StoneBoard, row: usize, col: usize, stone: Stone) -> usize {
        AXES.iter()
            .map(|&axis| board.run_length(row, col, stone, axis).pow(2))
            .sum()
    }
}

impl Strategy<GomokuRules> for GomokuComputer {
    #[instrument(skip(self, rules, board))]
    fn select(&mut self, rules: &GomokuRules, board: &StoneBoard, seat: Seat) -> Option<StoneMove> {
        let winning = first_scanned(rules, board, seat, |after, mv| {
            after.check_winning_line(mv.row, mv.col, mv.stone).is_some()
        });
        if let Some(mv) = winning {
            debug!(%mv, "Winning stone found");
            return Some(mv);
        }

        // First maximum in row-major order.
        let mut best: Option<(usize, StoneMove)> = None;
        for mv in rules.legal_moves(board, seat) {
            let score = Self::score(board, mv.row, mv.col, mv.stone);
            if best.is_none_or(|(top, _)| score > top) {
                best = Some((score, mv));
            }
        }
        if let Some((score, mv)) = best {
            debug!(%mv, score, "Best scoring stone");
        }
        best.map(|(_, mv)| mv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use turnboard_engine::Board;

    fn board_with(size: usize, stones: &[(usize, usize, Stone)]) -> StoneBoard {
        let mut board = StoneBoard::new(size);
        for &(row, col, stone) in stones {
            board.apply_move(&StoneMove::new(row, col, stone));
        }
        board
    }

    #[test]
    fn test_completes_five() {
        let rules = GomokuRules::new(9).unwrap();
        let board = board_with(
            9,
            &[(4, 1, Stone::X), (4, 2, Stone::X), (4, 3, Stone::X), (4, 4, Stone::X)],
        );
        let mv = GomokuComputer.select(&rules, &board, Seat::First).unwrap();
        assert_eq!(mv, StoneMove::new(4, 0, Stone::X));
    }

    #[test]
    fn test_score_counts_contiguous_own_stones() {
        let board = board_with(7, &[(3, 2, Stone::O), (3, 4, Stone::O), (2, 3, Stone::X)]);
        // horizontal run of 3, the other axes 1 each
        assert_eq!(GomokuComputer::score(&board, 3, 3, Stone::O), 9 + 1 + 1 + 1);
        assert_eq!(GomokuComputer::score(&board, 0, 0, Stone::O), 4);
    }

    #[test]
    fn test_extends_own_run_when_no_win() {
        let rules = GomokuRules::new(7).unwrap();
        let board = board_with(7, &[(3, 2, Stone::O), (3, 4, Stone::O), (0, 6, Stone::X)]);
        let mv = GomokuComputer.select(&rules, &board, Seat::Second).unwrap();
        assert_eq!(mv, StoneMove::new(3, 3, Stone::O));
    }

    #[test]
    fn test_empty_board_ties_break_row_major() {
        let rules = GomokuRules::new(5).unwrap();
        let mv = GomokuComputer.select(&rules, &rules.new_board(), Seat::First).unwrap();
        assert_eq!(mv, StoneMove::new(0, 0, Stone::X));
    }
}

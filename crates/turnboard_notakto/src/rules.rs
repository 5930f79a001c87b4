//! Notakto rules.

use crate::board::{BOARDS, NotaktoBoard, NotaktoMove, SIDE};
use tracing::{info, instrument};
use turnboard_engine::{
    Board, Dimensions, GameMode, MoveError, Outcome, Rules, Seat, parse_numbers,
};

/// Misère tic-tac-toe on three boards.
///
/// Both players place crosses on any live sub-board. A sub-board with a
/// three-in-a-row is dead; the player who kills the last live board loses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NotaktoRules;

impl Rules for NotaktoRules {
    type Board = NotaktoBoard;

    fn mode(&self) -> GameMode {
        GameMode::Notakto
    }

    fn dimensions(&self) -> Dimensions {
        Dimensions {
            rows: SIDE,
            cols: SIDE,
            boards: BOARDS,
        }
    }

    fn new_board(&self) -> NotaktoBoard {
        NotaktoBoard::new()
    }

    fn check_move(&self, board: &NotaktoBoard, _seat: Seat, mv: &NotaktoMove) -> Result<(), MoveError> {
        board.validate(mv)
    }

    fn legal_moves(&self, board: &NotaktoBoard, _seat: Seat) -> Vec<NotaktoMove> {
        let mut moves = Vec::new();
        for index in board.live_boards() {
            for row in 0..SIDE {
                for col in 0..SIDE {
                    if !board.is_marked(index, row, col) {
                        moves.push(NotaktoMove::new(index, row, col));
                    }
                }
            }
        }
        moves
    }

    #[instrument(skip(self, board))]
    fn outcome(&self, board: &NotaktoBoard, _last: &NotaktoMove, mover: Seat) -> Option<Outcome> {
        if board.all_dead() {
            info!(loser = ?mover, "Last board killed");
            Some(Outcome::Winner(mover.opponent()))
        } else {
            None
        }
    }

    fn parse_move(&self, input: &str, _seat: Seat) -> Result<NotaktoMove, MoveError> {
        match parse_numbers(input).as_deref() {
            Some(&[board, row, col]) => Ok(NotaktoMove::new(board, row, col)),
            _ => Err(MoveError::Unparsable {
                input: input.to_string(),
                expected: self.move_syntax(),
            }),
        }
    }

    fn hint(&self, board: &NotaktoBoard, _seat: Seat) -> Option<String> {
        let live: Vec<String> = board.live_boards().iter().map(usize::to_string).collect();
        Some(format!("Live boards: {}", live.join(", ")))
    }

    fn move_syntax(&self) -> &'static str {
        "<board> <row> <col>"
    }
}

//! Numerical tic-tac-toe rules.

use crate::board::{NumberBoard, NumberMove};
use crate::pool::NumberPool;
use tracing::{debug, instrument};
use turnboard_engine::{
    Board, Dimensions, GameMode, MoveError, Outcome, Rules, Seat, SetupError, parse_numbers,
};

/// Smallest supported side length.
pub const MIN_SIZE: usize = 3;
/// Largest supported side length.
pub const MAX_SIZE: usize = 10;
/// Classic 3x3 game.
pub const DEFAULT_SIZE: usize = 3;

/// Numerical tic-tac-toe on an N x N grid.
///
/// Players alternately place unused numbers from `1..=N²` (Player 1 odd,
/// Player 2 even). Whoever completes a row, column or diagonal summing to
/// `N(N²+1)/2` wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericRules {
    size: usize,
}

impl NumericRules {
    /// Rules for a `size` x `size` board.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError`] if `size` is outside `3..=10`.
    #[track_caller]
    pub fn new(size: usize) -> Result<Self, SetupError> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
            return Err(SetupError::new(format!(
                "numeric board size must be {}-{}, got {}",
                MIN_SIZE, MAX_SIZE, size
            )));
        }
        Ok(Self { size })
    }

    /// Side length.
    pub fn size(&self) -> usize {
        self.size
    }
}

impl Default for NumericRules {
    fn default() -> Self {
        Self { size: DEFAULT_SIZE }
    }
}

impl Rules for NumericRules {
    type Board = NumberBoard;

    fn mode(&self) -> GameMode {
        GameMode::Numeric
    }

    fn dimensions(&self) -> Dimensions {
        Dimensions::square(self.size)
    }

    fn new_board(&self) -> NumberBoard {
        NumberBoard::new(self.size)
    }

    fn check_move(&self, board: &NumberBoard, seat: Seat, mv: &NumberMove) -> Result<(), MoveError> {
        board.validate(mv)?;
        if !NumberPool::owns(seat, mv.value) {
            return Err(MoveError::NumberUnavailable { value: mv.value });
        }
        Ok(())
    }

    fn legal_moves(&self, board: &NumberBoard, seat: Seat) -> Vec<NumberMove> {
        let pool = NumberPool::available(seat, board);
        let mut moves = Vec::new();
        for row in 0..self.size {
            for col in 0..self.size {
                if board.get(row, col).is_some() {
                    continue;
                }
                moves.extend(pool.numbers().iter().map(|&value| NumberMove::new(row, col, value)));
            }
        }
        moves
    }

    #[instrument(skip(self, board))]
    fn outcome(&self, board: &NumberBoard, last: &NumberMove, mover: Seat) -> Option<Outcome> {
        if let Some(line) = board.winning_line_through(last.row, last.col) {
            debug!(?line, "Target sum reached");
            return Some(Outcome::Winner(mover));
        }
        if board.is_full() {
            return Some(Outcome::Draw);
        }
        // Odd/even counts differ by one, so a seat can run dry before the board fills.
        if NumberPool::available(mover.opponent(), board).is_empty() {
            debug!("Next player has no numbers left");
            return Some(Outcome::Draw);
        }
        None
    }

    fn parse_move(&self, input: &str, _seat: Seat) -> Result<NumberMove, MoveError> {
        let unparsable = || MoveError::Unparsable {
            input: input.to_string(),
            expected: self.move_syntax(),
        };
        match parse_numbers(input).as_deref() {
            Some(&[row, col, value]) => {
                let value = u32::try_from(value).map_err(|_| unparsable())?;
                Ok(NumberMove::new(row, col, value))
            }
            _ => Err(unparsable()),
        }
    }

    fn hint(&self, board: &NumberBoard, seat: Seat) -> Option<String> {
        Some(format!(
            "Your numbers: {}",
            NumberPool::available(seat, board)
        ))
    }

    fn move_syntax(&self) -> &'static str {
        "<row> <col> <number>"
    }
}

//! Gomoku rules.

use crate::board::{Stone, StoneBoard, StoneMove};
use tracing::{debug, instrument};
use turnboard_engine::{
    Board, Dimensions, GameMode, MoveError, Outcome, Rules, Seat, SetupError, parse_numbers,
};

/// Smallest supported board.
pub const MIN_SIZE: usize = 5;
/// Largest supported board.
pub const MAX_SIZE: usize = 25;
/// Standard 15x15 board.
pub const DEFAULT_SIZE: usize = 15;

/// Five in a row on a square board. Player 1 plays X, Player 2 plays O.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GomokuRules {
    size: usize,
}

impl GomokuRules {
    /// Rules for a `size` x `size` board.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError`] if `size` is outside `5..=25`.
    #[track_caller]
    pub fn new(size: usize) -> Result<Self, SetupError> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
            return Err(SetupError::new(format!(
                "gomoku board size must be {}-{}, got {}",
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

impl Default for GomokuRules {
    fn default() -> Self {
        Self { size: DEFAULT_SIZE }
    }
}

impl Rules for GomokuRules {
    type Board = StoneBoard;

    fn mode(&self) -> GameMode {
        GameMode::Gomoku
    }

    fn dimensions(&self) -> Dimensions {
        Dimensions::square(self.size)
    }

    fn new_board(&self) -> StoneBoard {
        StoneBoard::new(self.size)
    }

    fn check_move(&self, board: &StoneBoard, seat: Seat, mv: &StoneMove) -> Result<(), MoveError> {
        board.validate(mv)?;
        if mv.stone != Stone::for_seat(seat) {
            return Err(MoveError::WrongSymbol);
        }
        Ok(())
    }

    fn legal_moves(&self, board: &StoneBoard, seat: Seat) -> Vec<StoneMove> {
        let stone = Stone::for_seat(seat);
        board
            .empty_cells()
            .map(|(row, col)| StoneMove::new(row, col, stone))
            .collect()
    }

    #[instrument(skip(self, board))]
    fn outcome(&self, board: &StoneBoard, last: &StoneMove, mover: Seat) -> Option<Outcome> {
        if let Some(line) = board.check_winning_line(last.row, last.col, last.stone) {
            debug!(?line, "Five in a row");
            return Some(Outcome::Winner(mover));
        }
        board.is_full().then_some(Outcome::Draw)
    }

    fn parse_move(&self, input: &str, seat: Seat) -> Result<StoneMove, MoveError> {
        match parse_numbers(input).as_deref() {
            Some(&[row, col]) => Ok(StoneMove::new(row, col, Stone::for_seat(seat))),
            _ => Err(MoveError::Unparsable {
                input: input.to_string(),
                expected: self.move_syntax(),
            }),
        }
    }

    fn hint(&self, _board: &StoneBoard, seat: Seat) -> Option<String> {
        Some(format!("You play {}", Stone::for_seat(seat)))
    }

    fn move_syntax(&self) -> &'static str {
        "<row> <col>"
    }
}

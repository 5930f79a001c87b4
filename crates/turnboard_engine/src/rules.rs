//! Per-variant game rules.

use crate::board::{Board, Dimensions};
use crate::error::MoveError;
use crate::seat::{Outcome, Seat};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Move type of a rules implementation.
pub type MoveOf<R> = <<R as Rules>::Board as Board>::Move;

/// Which game is being played. Stored in save files as the mode tag.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GameMode {
    /// Numerical tic-tac-toe (magic-sum lines).
    Numeric,
    /// Three-board misère tic-tac-toe.
    Notakto,
    /// Five in a row.
    Gomoku,
}

/// Rules of one game variant.
///
/// Implementations are small configuration values (board size and the
/// like); all mutable state lives in the [`Board`].
pub trait Rules: fmt::Debug {
    /// Board type for this variant.
    type Board: Board;

    /// Mode tag.
    fn mode(&self) -> GameMode;

    /// Shape of the board this rules value creates.
    fn dimensions(&self) -> Dimensions;

    /// A fresh, empty board.
    fn new_board(&self) -> Self::Board;

    /// Validates `mv` for `seat`: board checks plus anything tied to the
    /// player (number parity, stone colour).
    fn check_move(&self, board: &Self::Board, seat: Seat, mv: &MoveOf<Self>)
    -> Result<(), MoveError>;

    /// Every legal move for `seat`, in the fixed scan order
    /// (sub-board-major, then row-major, then ascending value).
    fn legal_moves(&self, board: &Self::Board, seat: Seat) -> Vec<MoveOf<Self>>;

    /// Terminal check after `mover` has committed `last`.
    fn outcome(&self, board: &Self::Board, last: &MoveOf<Self>, mover: Seat) -> Option<Outcome>;

    /// Reads a human-entered move for `seat`.
    fn parse_move(&self, input: &str, seat: Seat) -> Result<MoveOf<Self>, MoveError>;

    /// Short hint shown next to the board (e.g. remaining numbers).
    fn hint(&self, _board: &Self::Board, _seat: Seat) -> Option<String> {
        None
    }

    /// Input syntax shown in the move prompt.
    fn move_syntax(&self) -> &'static str;
}

/// Splits human input into unsigned integers separated by spaces or commas.
///
/// Returns `None` if any token is not a number.
pub fn parse_numbers(input: &str) -> Option<Vec<usize>> {
    input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(|token| token.parse::<usize>().ok())
        .collect()
}

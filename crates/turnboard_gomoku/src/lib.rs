//! Gomoku: five in a row on a square board of 5 to 25 cells a side.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod computer;
mod rules;

pub use board::{AXES, Stone, StoneBoard, StoneMove, WIN_LENGTH};
pub use computer::GomokuComputer;
pub use rules::{DEFAULT_SIZE, GomokuRules, MAX_SIZE, MIN_SIZE};

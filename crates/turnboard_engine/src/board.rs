//! Board and move abstractions implemented by each game variant.

use crate::error::{MoveError, PersistError};
use crate::persist::{BoardImage, MoveImage};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shape of a variant's storage: `boards` grids of `rows` x `cols` cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    /// Rows per grid.
    pub rows: usize,
    /// Columns per grid.
    pub cols: usize,
    /// Number of grids.
    pub boards: usize,
}

impl Dimensions {
    /// A single square grid.
    pub fn square(size: usize) -> Self {
        Self {
            rows: size,
            cols: size,
            boards: 1,
        }
    }

    /// Returns true if `(row, col)` lies inside one grid.
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    /// Bounds check producing the matching [`MoveError`].
    pub fn check(&self, row: usize, col: usize) -> Result<(), MoveError> {
        if self.contains(row, col) {
            Ok(())
        } else {
            Err(MoveError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// Verifies that an encoded grid has exactly this shape.
    #[track_caller]
    pub fn check_grid(&self, grid: &[Vec<u32>]) -> Result<(), PersistError> {
        if grid.len() != self.rows || grid.iter().any(|row| row.len() != self.cols) {
            return Err(PersistError::invalid(format!(
                "grid does not match {}x{} dimensions",
                self.rows, self.cols
            )));
        }
        Ok(())
    }
}

/// A single placed move.
///
/// Moves are plain values: they can be validated before application,
/// stored in history and encoded for a save file.
pub trait GameMove: Copy + fmt::Debug + fmt::Display + PartialEq + Eq {
    /// Encodes the move into the engine-agnostic integer form.
    fn encode(&self) -> MoveImage;

    /// Inverse of [`GameMove::encode`].
    fn decode(image: &MoveImage) -> Result<Self, PersistError>;
}

/// Cell storage for one game variant.
///
/// Cells only ever go from empty to occupied through [`Board::apply_move`];
/// the reverse only happens by restoring a snapshot.
pub trait Board: Clone + fmt::Debug + fmt::Display + PartialEq {
    /// The move type this board accepts.
    type Move: GameMove;

    /// Checks bounds, occupancy and (where relevant) dead sub-boards.
    fn validate(&self, mv: &Self::Move) -> Result<(), MoveError>;

    /// Boolean form of [`Board::validate`].
    fn is_valid_move(&self, mv: &Self::Move) -> bool {
        self.validate(mv).is_ok()
    }

    /// Writes the move without validating it.
    ///
    /// Callers validate first; undo and redo rely on this being unchecked.
    fn apply_move(&mut self, mv: &Self::Move);

    /// Deep copy of every cell and derived flag.
    fn snapshot(&self) -> Self {
        self.clone()
    }

    /// Overwrites this board with `snapshot`.
    fn restore(&mut self, snapshot: &Self) {
        self.clone_from(snapshot);
    }

    /// True when every cell of every grid is occupied.
    fn is_full(&self) -> bool;

    /// Encodes cells (and dead flags) for persistence.
    fn encode(&self) -> BoardImage;

    /// Rebuilds a board from its image, checking it against `dims`.
    fn decode(image: &BoardImage, dims: Dimensions) -> Result<Self, PersistError>;
}

//! Number grid and magic-sum line checks.

use derive_more::Display;
use std::fmt;
use tracing::instrument;
use turnboard_engine::{
    Board, BoardImage, Dimensions, EMPTY, GameMove, MoveError, MoveImage, PersistError,
};

/// Places `value` at (`row`, `col`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display("{value} at ({row}, {col})")]
pub struct NumberMove {
    /// Row.
    pub row: usize,
    /// Column.
    pub col: usize,
    /// Number placed.
    pub value: u32,
}

impl NumberMove {
    /// Creates a move.
    pub fn new(row: usize, col: usize, value: u32) -> Self {
        Self { row, col, value }
    }
}

impl GameMove for NumberMove {
    fn encode(&self) -> MoveImage {
        MoveImage::new(0, self.row, self.col, self.value)
    }

    fn decode(image: &MoveImage) -> Result<Self, PersistError> {
        if image.board != 0 || image.value == EMPTY {
            return Err(PersistError::invalid(format!(
                "not a number move: {:?}",
                image
            )));
        }
        Ok(Self::new(image.row, image.col, image.value))
    }
}

/// Square grid holding the numbers `1..=N²`, each at most once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberBoard {
    size: usize,
    cells: Vec<Option<u32>>,
}

impl NumberBoard {
    /// An empty `size` x `size` grid.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    /// Side length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Largest number in play, `N²`.
    pub fn max_value(&self) -> u32 {
        (self.size * self.size) as u32
    }

    /// Magic sum `N(N²+1)/2` every winning line must reach.
    pub fn target_sum(&self) -> u32 {
        let n = self.size as u32;
        n * (n * n + 1) / 2
    }

    /// Number at (`row`, `col`), if any.
    pub fn get(&self, row: usize, col: usize) -> Option<u32> {
        self.cells[row * self.size + col]
    }

    /// Returns true if `value` is already on the board.
    pub fn contains_number(&self, value: u32) -> bool {
        self.cells.contains(&Some(value))
    }

    /// Numbers on the board, in cell order.
    pub fn placed(&self) -> impl Iterator<Item = u32> + '_ {
        self.cells.iter().flatten().copied()
    }

    /// Every row, column, diagonal and anti-diagonal as cell coordinates.
    pub fn lines(&self) -> Vec<Vec<(usize, usize)>> {
        let n = self.size;
        let mut lines = Vec::with_capacity(2 * n + 2);
        for row in 0..n {
            lines.push((0..n).map(|col| (row, col)).collect());
        }
        for col in 0..n {
            lines.push((0..n).map(|row| (row, col)).collect());
        }
        lines.push((0..n).map(|i| (i, i)).collect());
        lines.push((0..n).map(|i| (i, n - 1 - i)).collect());
        lines
    }

    /// A line wins iff every cell is filled and the sum is the magic sum.
    pub fn check_target_sum(&self, line: &[(usize, usize)]) -> bool {
        let mut sum = 0;
        for &(row, col) in line {
            match self.get(row, col) {
                Some(value) => sum += value,
                None => return false,
            }
        }
        sum == self.target_sum()
    }

    /// First winning line anywhere on the board.
    #[instrument(skip(self))]
    pub fn winning_line(&self) -> Option<Vec<(usize, usize)>> {
        self.lines()
            .into_iter()
            .find(|line| self.check_target_sum(line))
    }

    /// First winning line passing through (`row`, `col`).
    pub fn winning_line_through(&self, row: usize, col: usize) -> Option<Vec<(usize, usize)>> {
        self.lines()
            .into_iter()
            .filter(|line| line.contains(&(row, col)))
            .find(|line| self.check_target_sum(line))
    }

    fn dimensions(&self) -> Dimensions {
        Dimensions::square(self.size)
    }
}

impl fmt::Display for NumberBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.max_value().to_string().len();
        write!(f, "{:>3}", "")?;
        for col in 0..self.size {
            write!(f, " {:>width$}", col)?;
        }
        writeln!(f)?;
        for row in 0..self.size {
            write!(f, "{:>3}", row)?;
            for col in 0..self.size {
                match self.get(row, col) {
                    Some(value) => write!(f, " {:>width$}", value)?,
                    None => write!(f, " {:>width$}", ".")?,
                }
            }
            writeln!(f)?;
        }
        write!(f, "Target sum: {}", self.target_sum())
    }
}

impl Board for NumberBoard {
    type Move = NumberMove;

    fn validate(&self, mv: &NumberMove) -> Result<(), MoveError> {
        self.dimensions().check(mv.row, mv.col)?;
        if self.get(mv.row, mv.col).is_some() {
            return Err(MoveError::Occupied {
                row: mv.row,
                col: mv.col,
            });
        }
        if mv.value == 0 || mv.value > self.max_value() || self.contains_number(mv.value) {
            return Err(MoveError::NumberUnavailable { value: mv.value });
        }
        Ok(())
    }

    fn apply_move(&mut self, mv: &NumberMove) {
        self.cells[mv.row * self.size + mv.col] = Some(mv.value);
    }

    fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    fn encode(&self) -> BoardImage {
        let grid = self
            .cells
            .chunks(self.size)
            .map(|row| row.iter().map(|cell| cell.unwrap_or(EMPTY)).collect())
            .collect();
        BoardImage {
            grids: vec![grid],
            dead: Vec::new(),
        }
    }

    #[instrument(skip(image))]
    fn decode(image: &BoardImage, dims: Dimensions) -> Result<Self, PersistError> {
        let [grid] = image.grids.as_slice() else {
            return Err(PersistError::invalid(format!(
                "numeric board has one grid, found {}",
                image.grids.len()
            )));
        };
        if dims.rows != dims.cols || !image.dead.is_empty() {
            return Err(PersistError::invalid("numeric board must be a single square grid"));
        }
        dims.check_grid(grid)?;

        let mut board = Self::new(dims.rows);
        for (row, values) in grid.iter().enumerate() {
            for (col, &value) in values.iter().enumerate() {
                if value == EMPTY {
                    continue;
                }
                if value > board.max_value() || board.contains_number(value) {
                    return Err(PersistError::invalid(format!(
                        "number {} at ({}, {}) is out of range or repeated",
                        value, row, col
                    )));
                }
                board.apply_move(&NumberMove::new(row, col, value));
            }
        }
        Ok(board)
    }
}

//! Square stone grid and five-in-a-row detection.

use derive_more::Display;
use std::fmt;
use tracing::instrument;
use turnboard_engine::{
    Board, BoardImage, Dimensions, EMPTY, GameMove, MoveError, MoveImage, PersistError, Seat,
};

/// Stones needed in a row to win.
pub const WIN_LENGTH: usize = 5;

/// Axis directions through a cell: horizontal, vertical, both diagonals.
pub const AXES: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Stone colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Stone {
    /// Player 1's stone.
    X,
    /// Player 2's stone.
    O,
}

impl Stone {
    /// The stone `seat` plays.
    pub fn for_seat(seat: Seat) -> Self {
        match seat {
            Seat::First => Stone::X,
            Seat::Second => Stone::O,
        }
    }

    /// Save-file code (X = 1, O = 2).
    pub fn code(self) -> u32 {
        match self {
            Stone::X => 1,
            Stone::O => 2,
        }
    }

    /// Inverse of [`Stone::code`].
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(Stone::X),
            2 => Some(Stone::O),
            _ => None,
        }
    }
}

/// Places `stone` at (`row`, `col`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display("{stone} at ({row}, {col})")]
pub struct StoneMove {
    /// Row.
    pub row: usize,
    /// Column.
    pub col: usize,
    /// Stone placed.
    pub stone: Stone,
}

impl StoneMove {
    /// Creates a move.
    pub fn new(row: usize, col: usize, stone: Stone) -> Self {
        Self { row, col, stone }
    }
}

impl GameMove for StoneMove {
    fn encode(&self) -> MoveImage {
        MoveImage::new(0, self.row, self.col, self.stone.code())
    }

    fn decode(image: &MoveImage) -> Result<Self, PersistError> {
        let stone = Stone::from_code(image.value).ok_or_else(|| {
            PersistError::invalid(format!("unknown stone code {}", image.value))
        })?;
        if image.board != 0 {
            return Err(PersistError::invalid("gomoku has a single board"));
        }
        Ok(Self::new(image.row, image.col, stone))
    }
}

/// Square Gomoku board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoneBoard {
    size: usize,
    cells: Vec<Option<Stone>>,
}

impl StoneBoard {
    /// An empty `size` x `size` board.
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

    /// Stone at (`row`, `col`), if any.
    pub fn get(&self, row: usize, col: usize) -> Option<Stone> {
        self.cells[row * self.size + col]
    }

    fn offset(&self, row: usize, col: usize, dr: isize, dc: isize) -> Option<(usize, usize)> {
        let r = row.checked_add_signed(dr)?;
        let c = col.checked_add_signed(dc)?;
        (r < self.size && c < self.size).then_some((r, c))
    }

    /// Cells holding `stone` contiguous to (`row`, `col`) going one way
    /// along (`dr`, `dc`), nearest first. The starting cell is excluded.
    pub fn ray(&self, row: usize, col: usize, stone: Stone, (dr, dc): (isize, isize)) -> Vec<(usize, usize)> {
        let mut cells = Vec::new();
        let mut at = (row, col);
        while let Some((r, c)) = self.offset(at.0, at.1, dr, dc) {
            if self.get(r, c) != Some(stone) {
                break;
            }
            cells.push((r, c));
            at = (r, c);
        }
        cells
    }

    /// Length of the `stone` run through (`row`, `col`) along an axis,
    /// counting the cell itself.
    pub fn run_length(&self, row: usize, col: usize, stone: Stone, (dr, dc): (isize, isize)) -> usize {
        1 + self.ray(row, col, stone, (dr, dc)).len() + self.ray(row, col, stone, (-dr, -dc)).len()
    }

    /// Scans the four axes through (`row`, `col`) and returns the first
    /// run of at least five `stone`s, ordered along the axis.
    #[instrument(skip(self))]
    pub fn check_winning_line(&self, row: usize, col: usize, stone: Stone) -> Option<Vec<(usize, usize)>> {
        for (dr, dc) in AXES {
            let mut line: Vec<(usize, usize)> =
                self.ray(row, col, stone, (-dr, -dc)).into_iter().rev().collect();
            line.push((row, col));
            line.extend(self.ray(row, col, stone, (dr, dc)));
            if line.len() >= WIN_LENGTH {
                return Some(line);
            }
        }
        None
    }

    /// Empty cells in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.size * self.size)
            .filter(|&i| self.cells[i].is_none())
            .map(|i| (i / self.size, i % self.size))
    }
}

impl fmt::Display for StoneBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>3}", "")?;
        for col in 0..self.size {
            write!(f, "{:>3}", col)?;
        }
        for row in 0..self.size {
            writeln!(f)?;
            write!(f, "{:>3}", row)?;
            for col in 0..self.size {
                let symbol = match self.get(row, col) {
                    Some(stone) => stone.to_string(),
                    None => ".".to_string(),
                };
                write!(f, "{:>3}", symbol)?;
            }
        }
        Ok(())
    }
}

impl Board for StoneBoard {
    type Move = StoneMove;

    fn validate(&self, mv: &StoneMove) -> Result<(), MoveError> {
        Dimensions::square(self.size).check(mv.row, mv.col)?;
        if self.get(mv.row, mv.col).is_some() {
            return Err(MoveError::Occupied {
                row: mv.row,
                col: mv.col,
            });
        }
        Ok(())
    }

    fn apply_move(&mut self, mv: &StoneMove) {
        self.cells[mv.row * self.size + mv.col] = Some(mv.stone);
    }

    fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    fn encode(&self) -> BoardImage {
        let grid = self
            .cells
            .chunks(self.size)
            .map(|row| {
                row.iter()
                    .map(|cell| cell.map_or(EMPTY, Stone::code))
                    .collect()
            })
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
                "gomoku board has one grid, found {}",
                image.grids.len()
            )));
        };
        if dims.rows != dims.cols || dims.boards != 1 || !image.dead.is_empty() {
            return Err(PersistError::invalid("gomoku board must be a single square grid"));
        }
        dims.check_grid(grid)?;

        let mut board = Self::new(dims.rows);
        for (row, values) in grid.iter().enumerate() {
            for (col, &value) in values.iter().enumerate() {
                if value == EMPTY {
                    continue;
                }
                let stone = Stone::from_code(value).ok_or_else(|| {
                    PersistError::invalid(format!("unknown stone code {} at ({}, {})", value, row, col))
                })?;
                board.apply_move(&StoneMove::new(row, col, stone));
            }
        }
        Ok(board)
    }
}

//! Three 3x3 sub-boards of crosses.

use derive_more::Display;
use std::fmt;
use tracing::{debug, instrument};
use turnboard_engine::{
    Board, BoardImage, Dimensions, EMPTY, GameMove, MoveError, MoveImage, PersistError,
};

/// Number of sub-boards.
pub const BOARDS: usize = 3;
/// Side length of each sub-board.
pub const SIDE: usize = 3;
/// Encoded value of a cross (both players play X).
pub const CROSS: u32 = 1;

const LINES: [[(usize, usize); 3]; 8] = [
    // Rows
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    // Columns
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    // Diagonals
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

/// A cross on sub-board `board` at (`row`, `col`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display("X on board {board} at ({row}, {col})")]
pub struct NotaktoMove {
    /// Sub-board index.
    pub board: usize,
    /// Row.
    pub row: usize,
    /// Column.
    pub col: usize,
}

impl NotaktoMove {
    /// Creates a move.
    pub fn new(board: usize, row: usize, col: usize) -> Self {
        Self { board, row, col }
    }
}

impl GameMove for NotaktoMove {
    fn encode(&self) -> MoveImage {
        MoveImage::new(self.board, self.row, self.col, CROSS)
    }

    fn decode(image: &MoveImage) -> Result<Self, PersistError> {
        if image.value != CROSS {
            return Err(PersistError::invalid(format!(
                "notakto moves place X (1), found {}",
                image.value
            )));
        }
        Ok(Self::new(image.board, image.row, image.col))
    }
}

/// The three sub-boards and their dead flags.
///
/// A sub-board dies on the move that completes its first three-in-a-row
/// and stays dead until a snapshot from before that move is restored.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NotaktoBoard {
    cells: [[[bool; SIDE]; SIDE]; BOARDS],
    dead: [bool; BOARDS],
}

impl NotaktoBoard {
    /// Three empty, live sub-boards.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the cell holds a cross.
    pub fn is_marked(&self, board: usize, row: usize, col: usize) -> bool {
        self.cells[board][row][col]
    }

    /// Returns true once sub-board `index` has had a three-in-a-row.
    pub fn is_dead(&self, index: usize) -> bool {
        self.dead[index]
    }

    /// Indices of the sub-boards still in play.
    pub fn live_boards(&self) -> Vec<usize> {
        (0..BOARDS).filter(|&index| !self.dead[index]).collect()
    }

    /// Returns true when no sub-board is left in play.
    pub fn all_dead(&self) -> bool {
        self.dead.iter().all(|dead| *dead)
    }

    /// Checks the rows, columns and diagonals of sub-board `index`.
    #[instrument(skip(self))]
    pub fn check_three_in_row(&self, index: usize) -> bool {
        let grid = &self.cells[index];
        LINES
            .iter()
            .any(|line| line.iter().all(|&(row, col)| grid[row][col]))
    }

    fn dimensions() -> Dimensions {
        Dimensions {
            rows: SIDE,
            cols: SIDE,
            boards: BOARDS,
        }
    }
}

impl fmt::Display for NotaktoBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for index in 0..BOARDS {
            let label = if self.dead[index] { "dead" } else { "live" };
            write!(f, "Board {} ({:<4})", index, label)?;
            if index + 1 < BOARDS {
                write!(f, "   ")?;
            }
        }
        writeln!(f)?;
        for row in 0..SIDE {
            for index in 0..BOARDS {
                write!(f, "  ")?;
                for col in 0..SIDE {
                    let symbol = if self.cells[index][row][col] { 'X' } else { '.' };
                    write!(f, " {}", symbol)?;
                }
                if index + 1 < BOARDS {
                    write!(f, "{:11}", "")?;
                }
            }
            if row + 1 < SIDE {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl Board for NotaktoBoard {
    type Move = NotaktoMove;

    fn validate(&self, mv: &NotaktoMove) -> Result<(), MoveError> {
        if mv.board >= BOARDS {
            return Err(MoveError::NoSuchBoard {
                index: mv.board,
                last: BOARDS - 1,
            });
        }
        Self::dimensions().check(mv.row, mv.col)?;
        if self.dead[mv.board] {
            return Err(MoveError::DeadBoard { index: mv.board });
        }
        if self.cells[mv.board][mv.row][mv.col] {
            return Err(MoveError::Occupied {
                row: mv.row,
                col: mv.col,
            });
        }
        Ok(())
    }

    fn apply_move(&mut self, mv: &NotaktoMove) {
        self.cells[mv.board][mv.row][mv.col] = true;
        if !self.dead[mv.board] && self.check_three_in_row(mv.board) {
            self.dead[mv.board] = true;
            debug!(board = mv.board, "Sub-board died");
        }
    }

    /// Never true: the game ends when every sub-board is dead.
    fn is_full(&self) -> bool {
        false
    }

    fn encode(&self) -> BoardImage {
        let grids = self
            .cells
            .iter()
            .map(|grid| {
                grid.iter()
                    .map(|row| row.iter().map(|&x| if x { CROSS } else { EMPTY }).collect())
                    .collect()
            })
            .collect();
        BoardImage {
            grids,
            dead: (0..BOARDS).filter(|&index| self.dead[index]).collect(),
        }
    }

    #[instrument(skip(image))]
    fn decode(image: &BoardImage, dims: Dimensions) -> Result<Self, PersistError> {
        if dims != Self::dimensions() || image.grids.len() != BOARDS {
            return Err(PersistError::invalid(format!(
                "notakto uses {} boards of {}x{}",
                BOARDS, SIDE, SIDE
            )));
        }
        let mut board = Self::new();
        for (index, grid) in image.grids.iter().enumerate() {
            dims.check_grid(grid)?;
            for (row, values) in grid.iter().enumerate() {
                for (col, &value) in values.iter().enumerate() {
                    match value {
                        EMPTY => {}
                        CROSS => board.cells[index][row][col] = true,
                        other => {
                            return Err(PersistError::invalid(format!(
                                "unexpected value {} on board {}",
                                other, index
                            )));
                        }
                    }
                }
            }
            board.dead[index] = board.check_three_in_row(index);
        }

        let mut dead = image.dead.clone();
        dead.sort_unstable();
        dead.dedup();
        if dead != (0..BOARDS).filter(|&i| board.dead[i]).collect::<Vec<_>>() {
            return Err(PersistError::invalid(
                "dead board list does not match the crosses on the boards",
            ));
        }
        Ok(board)
    }
}

//! A one-row "strip" game used by the engine's own tests.
//!
//! Players drop their mark (1 or 2) into any empty cell; three adjacent
//! equal marks win, a full strip is a draw.

use crate::board::{Board, Dimensions, GameMove};
use crate::error::{MoveError, PersistError};
use crate::persist::{BoardImage, EMPTY, MoveImage};
use crate::rules::{GameMode, MoveOf, Rules, parse_numbers};
use crate::seat::{Outcome, Seat};
use crate::strategy::{Strategy, first_scanned};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripMove {
    pub col: usize,
    pub value: u32,
}

impl StripMove {
    pub fn new(col: usize, seat: Seat) -> Self {
        Self {
            col,
            value: seat.index() as u32 + 1,
        }
    }
}

impl fmt::Display for StripMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.value, self.col)
    }
}

impl GameMove for StripMove {
    fn encode(&self) -> MoveImage {
        MoveImage::new(0, 0, self.col, self.value)
    }

    fn decode(image: &MoveImage) -> Result<Self, PersistError> {
        Ok(Self {
            col: image.col,
            value: image.value,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripBoard {
    cells: Vec<u32>,
}

impl StripBoard {
    pub fn new(len: usize) -> Self {
        Self {
            cells: vec![EMPTY; len],
        }
    }

    pub fn get(&self, col: usize) -> u32 {
        self.cells[col]
    }

    fn run_through(&self, col: usize) -> usize {
        let value = self.cells[col];
        let left = self.cells[..col].iter().rev().take_while(|c| **c == value).count();
        let right = self.cells[col + 1..].iter().take_while(|c| **c == value).count();
        left + right + 1
    }
}

impl fmt::Display for StripBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cell in &self.cells {
            write!(f, "{}", cell)?;
        }
        Ok(())
    }
}

impl Board for StripBoard {
    type Move = StripMove;

    fn validate(&self, mv: &StripMove) -> Result<(), MoveError> {
        Dimensions {
            rows: 1,
            cols: self.cells.len(),
            boards: 1,
        }
        .check(0, mv.col)?;
        if self.cells[mv.col] != EMPTY {
            return Err(MoveError::Occupied { row: 0, col: mv.col });
        }
        Ok(())
    }

    fn apply_move(&mut self, mv: &StripMove) {
        self.cells[mv.col] = mv.value;
    }

    fn is_full(&self) -> bool {
        self.cells.iter().all(|c| *c != EMPTY)
    }

    fn encode(&self) -> BoardImage {
        BoardImage {
            grids: vec![vec![self.cells.clone()]],
            dead: Vec::new(),
        }
    }

    fn decode(image: &BoardImage, dims: Dimensions) -> Result<Self, PersistError> {
        let [grid] = image.grids.as_slice() else {
            return Err(PersistError::invalid("strip has one grid"));
        };
        dims.check_grid(grid)?;
        Ok(Self {
            cells: grid[0].clone(),
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct StripRules {
    pub len: usize,
}

impl Rules for StripRules {
    type Board = StripBoard;

    fn mode(&self) -> GameMode {
        GameMode::Gomoku
    }

    fn dimensions(&self) -> Dimensions {
        Dimensions {
            rows: 1,
            cols: self.len,
            boards: 1,
        }
    }

    fn new_board(&self) -> StripBoard {
        StripBoard::new(self.len)
    }

    fn check_move(&self, board: &StripBoard, seat: Seat, mv: &StripMove) -> Result<(), MoveError> {
        board.validate(mv)?;
        if mv.value != seat.index() as u32 + 1 {
            return Err(MoveError::WrongSymbol);
        }
        Ok(())
    }

    fn legal_moves(&self, board: &StripBoard, seat: Seat) -> Vec<StripMove> {
        (0..self.len)
            .map(|col| StripMove::new(col, seat))
            .filter(|mv| board.is_valid_move(mv))
            .collect()
    }

    fn outcome(&self, board: &StripBoard, last: &StripMove, mover: Seat) -> Option<Outcome> {
        if board.run_through(last.col) >= 3 {
            Some(Outcome::Winner(mover))
        } else if board.is_full() {
            Some(Outcome::Draw)
        } else {
            None
        }
    }

    fn parse_move(&self, input: &str, seat: Seat) -> Result<MoveOf<Self>, MoveError> {
        match parse_numbers(input).as_deref() {
            Some([col]) => Ok(StripMove::new(*col, seat)),
            _ => Err(MoveError::Unparsable {
                input: input.to_string(),
                expected: self.move_syntax(),
            }),
        }
    }

    fn move_syntax(&self) -> &'static str {
        "<col>"
    }
}

/// Plays the leftmost empty cell.
#[derive(Debug, Default)]
pub struct Leftmost;

impl Strategy<StripRules> for Leftmost {
    fn select(&mut self, rules: &StripRules, board: &StripBoard, seat: Seat) -> Option<StripMove> {
        first_scanned(rules, board, seat, |_, _| true)
    }
}

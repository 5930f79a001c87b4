//! Per-player number sets.
//!
//! Player 1 owns the odd numbers of `1..=N²`, Player 2 the even ones. The
//! set still available to a player is whatever they own that is not on the
//! board, so restoring a board snapshot restores the set with it.

use crate::board::NumberBoard;
use std::fmt;
use turnboard_engine::Seat;

/// Numbers a player may still place, ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberPool {
    seat: Seat,
    numbers: Vec<u32>,
}

impl NumberPool {
    /// Returns true if `seat` owns `value` (ignoring the board).
    pub fn owns(seat: Seat, value: u32) -> bool {
        match seat {
            Seat::First => value % 2 == 1,
            Seat::Second => value % 2 == 0,
        }
    }

    /// Every number `seat` owns on a fresh board.
    pub fn full(seat: Seat, board: &NumberBoard) -> Self {
        Self {
            seat,
            numbers: (1..=board.max_value())
                .filter(|value| Self::owns(seat, *value))
                .collect(),
        }
    }

    /// Numbers `seat` owns that are not yet on `board`.
    pub fn available(seat: Seat, board: &NumberBoard) -> Self {
        let mut pool = Self::full(seat, board);
        pool.numbers.retain(|value| !board.contains_number(*value));
        pool
    }

    /// Owner of the pool.
    pub fn seat(&self) -> Seat {
        self.seat
    }

    /// The numbers, ascending.
    pub fn numbers(&self) -> &[u32] {
        &self.numbers
    }

    /// Returns true if `value` is in the pool.
    pub fn contains(&self, value: u32) -> bool {
        self.numbers.binary_search(&value).is_ok()
    }

    /// Returns true when nothing is left to place.
    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }
}

impl fmt::Display for NumberPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let listed: Vec<String> = self.numbers.iter().map(u32::to_string).collect();
        write!(f, "{}", listed.join(", "))
    }
}

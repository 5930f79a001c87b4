//! Numerical tic-tac-toe.
//!
//! An N x N grid (3 to 10) filled with the numbers `1..=N²`. Player 1 places
//! odd numbers, Player 2 even numbers, each at most once. Completing any
//! line whose sum is the magic constant `N(N²+1)/2` wins.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod computer;
mod pool;
mod rules;

pub use board::{NumberBoard, NumberMove};
pub use computer::NumericComputer;
pub use pool::NumberPool;
pub use rules::{DEFAULT_SIZE, MAX_SIZE, MIN_SIZE, NumericRules};

//! Notakto: misère tic-tac-toe on three boards.
//!
//! Both players place crosses. A board with a three-in-a-row is dead and
//! takes no further moves; whoever kills the last live board loses.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod computer;
mod rules;

pub use board::{BOARDS, CROSS, NotaktoBoard, NotaktoMove, SIDE};
pub use computer::NotaktoComputer;
pub use rules::NotaktoRules;

//! Shared engine for two-player console board games.
//!
//! A variant supplies a [`Board`], its [`GameMove`] and a [`Rules`]
//! implementation; the engine provides everything else:
//!
//! - [`GameSetup`] / [`Game`]: strict turn alternation, tentative placement
//!   through [`PendingMove`], terminal detection
//! - [`History`]: per-player undo and redo over board snapshots
//! - [`Strategy`] with [`first_scanned`] and [`pick_random`]: the greedy
//!   one-ply shape every computer player follows
//! - [`SavedGame`]: the engine-agnostic JSON document
//! - [`TurnLoop`]: the I/O-free driver over an injected [`Console`]
//!
//! # Example
//!
//! ```ignore
//! let game = GameSetup::new(rules, Participant::human("Ada"), computer)
//!     .start(Seat::First)?;
//! let exit = TurnLoop::new(game, console, saves).run()?;
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod driver;
mod error;
mod game;
mod history;
mod participant;
mod persist;
mod rules;
mod seat;
mod strategy;

#[cfg(test)]
mod testing;

pub use board::{Board, Dimensions, GameMove};
pub use driver::{Console, GameEvent, LoopExit, Placement, SaveSink, TurnAction, TurnLoop};
pub use error::{MoveError, PersistError, PersistErrorKind};
pub use game::{Game, GameSetup, GameState, PendingMove, SetupError, TurnView};
pub use history::{History, MoveRecord};
pub use participant::{Controller, Participant};
pub use persist::{BoardImage, EMPTY, MoveImage, SavedGame, SavedMove, SavedPlayer};
pub use rules::{GameMode, MoveOf, Rules, parse_numbers};
pub use seat::{Outcome, PlayerKind, Seat};
pub use strategy::{Strategy, first_scanned, pick_random};

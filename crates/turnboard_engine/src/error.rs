//! Error types shared by every game variant.

use derive_more::{Display, Error};
use tracing::instrument;

/// A rejected move selection.
///
/// Every variant is recoverable: the turn loop reports it and asks again.
/// No state is mutated when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum MoveError {
    /// Coordinates fall outside the grid.
    #[display("({row}, {col}) is outside the {rows}x{cols} board")]
    OutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
        /// Grid height.
        rows: usize,
        /// Grid width.
        cols: usize,
    },

    /// The target cell already holds a value.
    #[display("cell ({row}, {col}) is already occupied")]
    Occupied {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },

    /// The sub-board index does not exist.
    #[display("there is no board {index} (valid boards are 0-{last})")]
    NoSuchBoard {
        /// Requested sub-board.
        index: usize,
        /// Highest valid index.
        last: usize,
    },

    /// The sub-board already contains three in a row.
    #[display("board {index} is dead")]
    DeadBoard {
        /// Requested sub-board.
        index: usize,
    },

    /// The number is outside the player's set or already placed.
    #[display("{value} is not one of your available numbers")]
    NumberUnavailable {
        /// Requested number.
        value: u32,
    },

    /// The move carries a symbol that does not belong to the player.
    #[display("that symbol belongs to the other player")]
    WrongSymbol,

    /// The game has already ended.
    #[display("the game is already over")]
    GameOver,

    /// No legal move exists for the player to move.
    #[display("no legal moves are available")]
    NoLegalMoves,

    /// Human input could not be read as a move.
    #[display("could not read a move from {input:?}: expected {expected}")]
    Unparsable {
        /// Raw input.
        input: String,
        /// Description of the accepted syntax.
        expected: &'static str,
    },
}

impl std::error::Error for MoveError {}

/// What went wrong while saving or loading a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum PersistErrorKind {
    /// Reading or writing the underlying file failed.
    #[display("i/o")]
    Io,
    /// The document is not valid JSON or misses required fields.
    #[display("format")]
    Format,
    /// The document parsed but describes an impossible game.
    #[display("invalid data")]
    Invalid,
}

/// Save/load failure with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Persistence error ({}): {} at {}:{}", kind, message, file, line)]
pub struct PersistError {
    /// Failure category.
    pub kind: PersistErrorKind,
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl PersistError {
    /// Creates a new persistence error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(kind: PersistErrorKind, message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Shorthand for [`PersistErrorKind::Invalid`].
    #[track_caller]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::new(PersistErrorKind::Invalid, message)
    }
}

impl From<serde_json::Error> for PersistError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(PersistErrorKind::Format, format!("JSON error: {}", err))
    }
}

impl From<std::io::Error> for PersistError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(PersistErrorKind::Io, format!("I/O error: {}", err))
    }
}

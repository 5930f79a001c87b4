//! Save-file document.
//!
//! The document is engine-agnostic: cells and moves are small integers
//! (empty = 0, X = 1, O = 2, numbers as themselves), so every variant
//! shares one JSON shape. File I/O lives with the caller.

use crate::error::PersistError;
use crate::rules::GameMode;
use crate::seat::PlayerKind;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Encoded cell for an empty square.
pub const EMPTY: u32 = 0;

/// Encoded board contents.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BoardImage {
    /// One `rows x cols` grid per sub-board.
    pub grids: Vec<Vec<Vec<u32>>>,
    /// Indices of dead sub-boards.
    #[serde(default)]
    pub dead: Vec<usize>,
}

/// Encoded move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct MoveImage {
    /// Sub-board index (0 for single-grid games).
    pub board: usize,
    /// Row.
    pub row: usize,
    /// Column.
    pub col: usize,
    /// Encoded value placed.
    pub value: u32,
}

/// A seated player as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedPlayer {
    /// Player name.
    pub name: String,
    /// Human or computer.
    pub kind: PlayerKind,
}

/// One history entry as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedMove {
    /// The move itself.
    #[serde(flatten)]
    pub mv: MoveImage,
    /// Name of the player who made it.
    pub player: String,
    /// Board immediately before the move.
    pub before: BoardImage,
    /// Position in the full timeline.
    pub ply: usize,
    /// Reverted on the board but kept in history by an opponent's undo.
    #[serde(default)]
    pub suspended: bool,
}

/// Complete persisted game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedGame {
    /// Game mode tag.
    pub mode: GameMode,
    /// Rows per grid.
    pub rows: usize,
    /// Columns per grid.
    pub cols: usize,
    /// Number of grids.
    pub boards: usize,
    /// Player 1 then Player 2.
    pub players: Vec<SavedPlayer>,
    /// Name of the player to move.
    pub current_player: String,
    /// Whether the game had ended.
    pub game_over: bool,
    /// Current cells.
    pub board: BoardImage,
    /// Confirmed moves, oldest first.
    pub history: Vec<SavedMove>,
    /// Undone moves, bottom of the stack first.
    #[serde(default)]
    pub redo: Vec<SavedMove>,
}

impl SavedGame {
    /// Serializes to pretty-printed JSON.
    #[instrument(skip(self), fields(mode = %self.mode, moves = self.history.len()))]
    pub fn to_json(&self) -> Result<String, PersistError> {
        let json = serde_json::to_string_pretty(self)?;
        debug!(bytes = json.len(), "Serialized saved game");
        Ok(json)
    }

    /// Parses a document produced by [`SavedGame::to_json`].
    #[instrument(skip(json), fields(bytes = json.len()))]
    pub fn from_json(json: &str) -> Result<Self, PersistError> {
        let saved: Self = serde_json::from_str(json)?;
        debug!(mode = %saved.mode, moves = saved.history.len(), "Parsed saved game");
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PersistErrorKind;

    fn sample() -> SavedGame {
        SavedGame {
            mode: GameMode::Gomoku,
            rows: 5,
            cols: 5,
            boards: 1,
            players: vec![
                SavedPlayer {
                    name: "Ada".into(),
                    kind: PlayerKind::Human,
                },
                SavedPlayer {
                    name: "Bot".into(),
                    kind: PlayerKind::Computer,
                },
            ],
            current_player: "Bot".into(),
            game_over: false,
            board: BoardImage {
                grids: vec![vec![vec![0; 5]; 5]],
                dead: vec![],
            },
            history: vec![SavedMove {
                mv: MoveImage::new(0, 2, 2, 1),
                player: "Ada".into(),
                before: BoardImage {
                    grids: vec![vec![vec![0; 5]; 5]],
                    dead: vec![],
                },
                ply: 0,
                suspended: false,
            }],
            redo: vec![],
        }
    }

    #[test]
    fn test_move_fields_are_flattened() {
        let json = sample().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let entry = &value["history"][0];
        assert_eq!(entry["row"], 2);
        assert_eq!(entry["value"], 1);
        assert_eq!(entry["player"], "Ada");
        assert_eq!(value["mode"], "gomoku");
    }

    #[test]
    fn test_optional_fields_default() {
        let mut value: serde_json::Value =
            serde_json::from_str(&sample().to_json().unwrap()).unwrap();
        value.as_object_mut().unwrap().remove("redo");
        value["history"][0].as_object_mut().unwrap().remove("suspended");
        let saved = SavedGame::from_json(&value.to_string()).unwrap();
        assert!(saved.redo.is_empty());
        assert!(!saved.history[0].suspended);
    }

    #[test]
    fn test_malformed_document_is_format_error() {
        let err = SavedGame::from_json("{\"mode\": \"chess\"}").unwrap_err();
        assert_eq!(err.kind, PersistErrorKind::Format);
    }
}

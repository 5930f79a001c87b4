//! Turnboard - console board games on a shared turn engine
//!
//! Numerical tic-tac-toe, Notakto and Gomoku, each with human or computer
//! players, per-player undo and redo, and JSON save files.
//!
//! # Architecture
//!
//! - **Engine** (`turnboard_engine`): turn order, undo/redo, save format
//! - **Games**: one crate per variant with its board, rules and computer
//! - **This crate**: configuration, terminal console, save directory and
//!   the glue that starts or resumes a game
//!
//! # Example
//!
//! ```no_run
//! use std::io::{stdin, stdout};
//! use turnboard::{AppConfig, TerminalConsole, play};
//! use turnboard_engine::GameMode;
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = AppConfig::default();
//! let console = TerminalConsole::new(stdin().lock(), stdout());
//! play(GameMode::Gomoku, Some(15), &config, console)?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cli;
mod config;
mod console;
mod saves;
mod session;
mod variant;

pub use cli::{Cli, Command, ModeArg};
pub use config::{AppConfig, ComputerSeats, ConfigError, DEFAULT_CONFIG_FILE};
pub use console::TerminalConsole;
pub use saves::{SaveEntry, SaveStore};
pub use session::{new_game, play, restore_game, resume};
pub use variant::{Variant, help_text};

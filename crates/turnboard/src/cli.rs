//! Command-line interface for turnboard.

use crate::config::{AppConfig, ComputerSeats, DEFAULT_CONFIG_FILE};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use turnboard_engine::GameMode;

/// Turnboard - console board games with undo, redo and save files
#[derive(Parser, Debug)]
#[command(name = "turnboard")]
#[command(about = "Numerical tic-tac-toe, Notakto and Gomoku in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Override the save directory
    #[arg(long, global = true)]
    pub save_dir: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Game selection for the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Numerical tic-tac-toe
    Numeric,
    /// Notakto
    Notakto,
    /// Gomoku
    Gomoku,
}

impl From<ModeArg> for GameMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Numeric => GameMode::Numeric,
            ModeArg::Notakto => GameMode::Notakto,
            ModeArg::Gomoku => GameMode::Gomoku,
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start a new game
    Play {
        /// Which game to play
        #[arg(value_enum)]
        mode: ModeArg,

        /// Board side length (numeric 3-10, gomoku 5-25)
        #[arg(short, long)]
        size: Option<usize>,

        /// Name of Player 1
        #[arg(long)]
        first: Option<String>,

        /// Name of Player 2
        #[arg(long)]
        second: Option<String>,

        /// Seats played by the computer
        #[arg(long, value_enum)]
        computer: Option<ComputerSeats>,

        /// Seed for reproducible computer players
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Resume a saved game
    Load {
        /// Save file (absolute, or relative to the save directory)
        file: PathBuf,
    },

    /// List saved games, newest first
    Saves,
}

impl Cli {
    /// Applies the flags that override file configuration.
    pub fn apply(&self, mut config: AppConfig) -> AppConfig {
        if let Some(dir) = &self.save_dir {
            config = config.with_save_dir(dir.clone());
        }
        if let Command::Play {
            first,
            second,
            computer,
            seed,
            ..
        } = &self.command
        {
            if let Some(name) = first {
                config = config.with_first_player(name.clone());
            }
            if let Some(name) = second {
                config = config.with_second_player(name.clone());
            }
            if let Some(seats) = computer {
                config = config.with_computer(*seats);
            }
            if seed.is_some() {
                config = config.with_seed(*seed);
            }
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_flags_override_config() {
        let cli = Cli::try_parse_from([
            "turnboard", "play", "gomoku", "--size", "19", "--first", "Ada", "--computer", "both",
        ])
        .unwrap();
        let config = cli.apply(AppConfig::default());
        assert_eq!(config.first_player(), "Ada");
        assert_eq!(config.second_player(), "Player 2");
        assert_eq!(*config.computer(), ComputerSeats::Both);
        match cli.command {
            Command::Play { mode, size, .. } => {
                assert_eq!(GameMode::from(mode), GameMode::Gomoku);
                assert_eq!(size, Some(19));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_global_save_dir() {
        let cli = Cli::try_parse_from(["turnboard", "saves", "--save-dir", "elsewhere"]).unwrap();
        let config = cli.apply(AppConfig::default());
        assert_eq!(config.save_dir(), &PathBuf::from("elsewhere"));
    }

    #[test]
    fn test_unknown_mode_rejected() {
        assert!(Cli::try_parse_from(["turnboard", "play", "chess"]).is_err());
    }
}

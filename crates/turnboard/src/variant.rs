//! Per-game glue: sizing, help text and computer players.

use turnboard_engine::{GameMode, Rules, SetupError, Strategy};
use turnboard_gomoku::{GomokuComputer, GomokuRules};
use turnboard_notakto::{NotaktoComputer, NotaktoRules};
use turnboard_numeric::{NumericComputer, NumericRules};

/// What the application needs from a game on top of its [`Rules`].
pub trait Variant: Rules + Sized + 'static {
    /// Rules for a board with `size` cells a side (ignored where the
    /// board is fixed).
    fn sized(size: usize) -> Result<Self, SetupError>;

    /// Rules text shown by the help action.
    fn help() -> &'static str;

    /// A computer player; `seed` makes it reproducible.
    fn computer(seed: Option<u64>) -> Box<dyn Strategy<Self>>;
}

impl Variant for NumericRules {
    fn sized(size: usize) -> Result<Self, SetupError> {
        NumericRules::new(size)
    }

    fn help() -> &'static str {
        "Numerical tic-tac-toe\n\
         Player 1 places odd numbers, Player 2 even numbers, each number once.\n\
         Complete a row, column or diagonal that adds up to the target sum to win.\n\
         A full board without such a line is a draw.\n\
         Enter moves as: <row> <col> <number>   (rows and columns start at 0)"
    }

    fn computer(seed: Option<u64>) -> Box<dyn Strategy<Self>> {
        Box::new(seed.map_or_else(NumericComputer::default, NumericComputer::seeded))
    }
}

impl Variant for NotaktoRules {
    fn sized(_size: usize) -> Result<Self, SetupError> {
        Ok(NotaktoRules)
    }

    fn help() -> &'static str {
        "Notakto\n\
         Both players place X on any of the three boards.\n\
         A board with three in a row is dead and takes no more moves.\n\
         Whoever kills the last live board loses.\n\
         Enter moves as: <board> <row> <col>   (all start at 0)"
    }

    fn computer(seed: Option<u64>) -> Box<dyn Strategy<Self>> {
        Box::new(seed.map_or_else(NotaktoComputer::default, NotaktoComputer::seeded))
    }
}

impl Variant for GomokuRules {
    fn sized(size: usize) -> Result<Self, SetupError> {
        GomokuRules::new(size)
    }

    fn help() -> &'static str {
        "Gomoku\n\
         Player 1 plays X, Player 2 plays O.\n\
         Five or more stones in a row (across, down or diagonal) wins.\n\
         A full board without five in a row is a draw.\n\
         Enter moves as: <row> <col>   (starting at 0)"
    }

    fn computer(_seed: Option<u64>) -> Box<dyn Strategy<Self>> {
        Box::new(GomokuComputer)
    }
}

/// Help text for `mode`.
pub fn help_text(mode: GameMode) -> &'static str {
    match mode {
        GameMode::Numeric => NumericRules::help(),
        GameMode::Notakto => NotaktoRules::help(),
        GameMode::Gomoku => GomokuRules::help(),
    }
}

//! Starting and resuming games.

use crate::config::AppConfig;
use crate::saves::SaveStore;
use crate::variant::Variant;
use anyhow::{Context, Result};
use tracing::{info, instrument};
use turnboard_engine::{
    Console, Game, GameMode, GameSetup, LoopExit, Participant, PersistError, PlayerKind,
    SavedGame, SavedPlayer, Seat, SetupError, TurnLoop,
};
use turnboard_gomoku::GomokuRules;
use turnboard_notakto::NotaktoRules;
use turnboard_numeric::NumericRules;

/// Seed for the computer in `seat`, so two seeded computers differ.
fn seat_seed(seed: Option<u64>, seat: Seat) -> Option<u64> {
    seed.map(|s| s.wrapping_add(seat.index() as u64))
}

fn participant<V: Variant>(name: &str, computer: bool, seed: Option<u64>) -> Participant<V> {
    if computer {
        Participant::computer(name, V::computer(seed))
    } else {
        Participant::human(name)
    }
}

/// Seats the configured players at a fresh game; Player 1 moves first.
#[instrument(skip(rules, config), fields(mode = %rules.mode()))]
pub fn new_game<V: Variant>(rules: V, config: &AppConfig) -> Result<Game<V>, SetupError> {
    let seats = *config.computer();
    let first = participant(
        config.first_player(),
        seats.first(),
        seat_seed(*config.seed(), Seat::First),
    );
    let second = participant(
        config.second_player(),
        seats.second(),
        seat_seed(*config.seed(), Seat::Second),
    );
    GameSetup::new(rules, first, second).start(Seat::First)
}

/// Rebuilds a saved game, giving computer seats fresh computer players.
#[instrument(skip(saved), fields(mode = %saved.mode))]
pub fn restore_game<V: Variant>(saved: &SavedGame, seed: Option<u64>) -> Result<Game<V>, PersistError> {
    let rules = V::sized(saved.rows).map_err(|e| PersistError::invalid(e.message))?;
    let mut seat = Seat::First;
    Game::from_saved(rules, saved, |player: &SavedPlayer| {
        let seated = participant(
            &player.name,
            player.kind == PlayerKind::Computer,
            seat_seed(seed, seat),
        );
        seat = seat.opponent();
        seated
    })
}

fn run_new<V: Variant, C: Console>(rules: V, config: &AppConfig, console: C) -> Result<LoopExit> {
    let game = new_game(rules, config)?;
    let store = SaveStore::new(config.save_dir());
    Ok(TurnLoop::new(game, console, store).run()?)
}

fn run_saved<V: Variant, C: Console>(saved: &SavedGame, config: &AppConfig, console: C) -> Result<LoopExit> {
    let game = restore_game::<V>(saved, *config.seed()).context("load failed")?;
    let store = SaveStore::new(config.save_dir());
    Ok(TurnLoop::new(game, console, store).resume()?)
}

/// Starts a new game of `mode`. `size` overrides the configured board size.
#[instrument(skip(config, console))]
pub fn play<C: Console>(
    mode: GameMode,
    size: Option<usize>,
    config: &AppConfig,
    console: C,
) -> Result<LoopExit> {
    info!("Starting new game");
    match mode {
        GameMode::Numeric => {
            let rules = NumericRules::sized(size.unwrap_or(*config.numeric_size()))?;
            run_new(rules, config, console)
        }
        GameMode::Notakto => run_new(NotaktoRules, config, console),
        GameMode::Gomoku => {
            let rules = GomokuRules::sized(size.unwrap_or(*config.gomoku_size()))?;
            run_new(rules, config, console)
        }
    }
}

/// Resumes a saved game, offering the player on turn an undo first.
#[instrument(skip_all, fields(mode = %saved.mode))]
pub fn resume<C: Console>(saved: &SavedGame, config: &AppConfig, console: C) -> Result<LoopExit> {
    info!(moves = saved.history.len(), "Resuming saved game");
    match saved.mode {
        GameMode::Numeric => run_saved::<NumericRules, C>(saved, config, console),
        GameMode::Notakto => run_saved::<NotaktoRules, C>(saved, config, console),
        GameMode::Gomoku => run_saved::<GomokuRules, C>(saved, config, console),
    }
}

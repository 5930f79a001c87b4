//! Turn loop between two seated players.
//!
//! The loop owns the game and talks to the outside world only through an
//! injected [`Console`] (rendering and input) and [`SaveSink`] (storage), so
//! it runs unchanged against a terminal or a scripted test double.

use crate::error::{MoveError, PersistError};
use crate::game::{Game, TurnView};
use crate::persist::SavedGame;
use crate::rules::{GameMode, Rules};
use crate::seat::Outcome;
use tracing::{debug, info, instrument, warn};

/// The five turn options offered to a human player.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
pub enum TurnAction {
    /// Select and place a move.
    #[strum(to_string = "Make a move", serialize = "m")]
    MakeMove,
    /// Undo own moves, then optionally redo some of them.
    #[strum(to_string = "Undo", serialize = "u")]
    Undo,
    /// Write the game to storage.
    #[strum(to_string = "Save", serialize = "s")]
    Save,
    /// Show the rules of the variant.
    #[strum(to_string = "Help", serialize = "h")]
    Help,
    /// Leave the game.
    #[strum(to_string = "Quit", serialize = "q")]
    Quit,
}

impl TurnAction {
    /// Menu key for this action.
    pub fn key(self) -> char {
        match self {
            Self::MakeMove => 'm',
            Self::Undo => 'u',
            Self::Save => 's',
            Self::Help => 'h',
            Self::Quit => 'q',
        }
    }
}

/// Answer to a tentatively placed move.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
pub enum Placement {
    /// Commit the move.
    #[strum(to_string = "Confirm", serialize = "c")]
    Confirm,
    /// Take the move back and choose again.
    #[strum(to_string = "Redo placement", serialize = "r")]
    Redo,
}

impl Placement {
    /// Menu key for this answer.
    pub fn key(self) -> char {
        match self {
            Self::Confirm => 'c',
            Self::Redo => 'r',
        }
    }
}

/// Things the loop reports to the console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A selected move was rejected; the player is asked again.
    InvalidMove {
        /// Why it was rejected.
        reason: String,
    },
    /// A move was confirmed.
    MoveMade {
        /// Who moved.
        player: String,
        /// The move, as displayed.
        mv: String,
        /// True if a computer chose it.
        computer: bool,
    },
    /// Moves were undone.
    Undone {
        /// Player whose moves were undone.
        player: String,
        /// How many.
        count: usize,
    },
    /// Undone moves were redone.
    Redone {
        /// Player whose moves were redone.
        player: String,
        /// How many.
        count: usize,
    },
    /// The player has no moves on the board.
    NothingToUndo,
    /// The game was written to storage.
    Saved {
        /// Where it went.
        location: String,
    },
    /// Storage failed; the game continues unchanged.
    SaveFailed {
        /// Failure description.
        reason: String,
    },
    /// Rules of the variant were requested.
    Help {
        /// The variant being played.
        mode: GameMode,
    },
    /// The game ended.
    GameOver {
        /// Name of the winner, `None` for a draw.
        winner: Option<String>,
    },
}

/// Rendering and input capability injected into the turn loop.
pub trait Console {
    /// Shows the board and whose turn it is.
    fn render(&mut self, view: &TurnView);

    /// Asks a human for one of the [`TurnAction`]s.
    fn choose_action(&mut self, view: &TurnView) -> TurnAction;

    /// Reads raw move text. `None` returns to the action menu.
    fn read_move(&mut self, view: &TurnView) -> Option<String>;

    /// Shows the tentatively placed move and asks for confirmation.
    fn confirm_placement(&mut self, view: &TurnView) -> Placement;

    /// Reads a count in `0..=max`. `None` or `0` cancels.
    fn read_count(&mut self, prompt: &str, max: usize) -> Option<usize>;

    /// Reports an event.
    fn event(&mut self, event: &GameEvent);
}

/// Destination for saved games.
pub trait SaveSink {
    /// Stores `saved` and returns a description of where it went.
    fn save(&mut self, saved: &SavedGame) -> Result<String, PersistError>;
}

/// How the loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    /// The game reached an outcome.
    Finished(Outcome),
    /// A player chose to quit.
    Quit,
}

/// Drives a [`Game`] until it ends or a player quits.
#[derive(Debug)]
pub struct TurnLoop<R: Rules, C: Console, S: SaveSink> {
    game: Game<R>,
    console: C,
    saves: S,
}

impl<R: Rules, C: Console, S: SaveSink> TurnLoop<R, C, S> {
    /// Creates a loop over `game`.
    pub fn new(game: Game<R>, console: C, saves: S) -> Self {
        Self {
            game,
            console,
            saves,
        }
    }

    /// The game being driven.
    pub fn game(&self) -> &Game<R> {
        &self.game
    }

    /// The console.
    pub fn console(&self) -> &C {
        &self.console
    }

    /// Gives back the game, console and save sink.
    pub fn into_parts(self) -> (Game<R>, C, S) {
        (self.game, self.console, self.saves)
    }

    /// Plays turns until the game ends or a player quits.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::NoLegalMoves`] if a computer seat is on turn
    /// with nothing to play, or the error of a rejected computer move.
    /// Human input errors never escape; they are reported and re-prompted.
    #[instrument(skip(self), fields(mode = %self.game.rules().mode()))]
    pub fn run(&mut self) -> Result<LoopExit, MoveError> {
        info!("Turn loop started");
        loop {
            if let Some(outcome) = self.game.outcome() {
                self.console.render(&self.game.view());
                let winner = self.game.winner_name().map(str::to_string);
                self.console.event(&GameEvent::GameOver { winner });
                info!(?outcome, "Turn loop finished");
                return Ok(LoopExit::Finished(outcome));
            }

            if self.game.current_player().is_computer() {
                self.computer_turn()?;
                continue;
            }

            let view = self.game.view();
            self.console.render(&view);
            let action = self.console.choose_action(&view);
            debug!(%action, player = %view.player, "Action chosen");
            match action {
                TurnAction::MakeMove => self.human_move(),
                TurnAction::Undo => self.undo_then_redo(),
                TurnAction::Save => self.save(),
                TurnAction::Help => self.console.event(&GameEvent::Help { mode: view.mode }),
                TurnAction::Quit => {
                    info!(player = %view.player, "Player quit");
                    return Ok(LoopExit::Quit);
                }
            }
        }
    }

    /// Re-enters play after a load: the player on turn may first undo
    /// some of their moves, then the loop runs as usual.
    #[instrument(skip(self))]
    pub fn resume(&mut self) -> Result<LoopExit, MoveError> {
        if !self.game.history().is_empty() && !self.game.current_player().is_computer() {
            self.console.render(&self.game.view());
            self.undo_then_redo();
        }
        self.run()
    }

    fn computer_turn(&mut self) -> Result<(), MoveError> {
        let Some(mv) = self.game.computer_move() else {
            warn!(player = %self.game.current_player().name(), "Computer has no legal move");
            return Err(MoveError::NoLegalMoves);
        };
        let player = self.game.current_player().name().to_string();
        self.game.play(mv)?;
        self.console.event(&GameEvent::MoveMade {
            player,
            mv: mv.to_string(),
            computer: true,
        });
        Ok(())
    }

    fn human_move(&mut self) {
        loop {
            let view = self.game.view();
            let Some(input) = self.console.read_move(&view) else {
                return;
            };
            let staged = self
                .game
                .rules()
                .parse_move(&input, view.seat)
                .and_then(|mv| self.game.stage(mv));
            let pending = match staged {
                Ok(pending) => pending,
                Err(err) => {
                    self.console.event(&GameEvent::InvalidMove {
                        reason: err.to_string(),
                    });
                    continue;
                }
            };

            match self.console.confirm_placement(&pending.game().view()) {
                Placement::Confirm => {
                    let mv = pending.mv().to_string();
                    pending.confirm();
                    self.console.event(&GameEvent::MoveMade {
                        player: view.player,
                        mv,
                        computer: false,
                    });
                    return;
                }
                Placement::Redo => pending.discard(),
            }
        }
    }

    fn undo_then_redo(&mut self) {
        let seat = self.game.current_seat();
        let player = self.game.current_player().name().to_string();
        let available = self.game.history().active_count(seat);
        if available == 0 {
            self.console.event(&GameEvent::NothingToUndo);
            return;
        }

        let requested = self
            .console
            .read_count("How many of your moves to undo?", available)
            .unwrap_or(0);
        let undone = self.game.undo(requested);
        if undone == 0 {
            return;
        }
        self.console.event(&GameEvent::Undone {
            player: player.clone(),
            count: undone,
        });
        self.console.render(&self.game.view());

        let redoable = self.game.history().redoable(seat);
        let requested = self
            .console
            .read_count("How many of them to redo?", redoable)
            .unwrap_or(0);
        let redone = self.game.redo(requested);
        if redone > 0 {
            self.console.event(&GameEvent::Redone {
                player,
                count: redone,
            });
        }
    }

    fn save(&mut self) {
        let saved = self.game.to_saved();
        match self.saves.save(&saved) {
            Ok(location) => {
                info!(%location, "Game saved");
                self.console.event(&GameEvent::Saved { location });
            }
            Err(err) => {
                warn!(error = %err, "Save failed");
                self.console.event(&GameEvent::SaveFailed {
                    reason: err.message,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameSetup;
    use crate::participant::Participant;
    use crate::seat::Seat;
    use crate::testing::{Leftmost, StripRules};
    use std::collections::VecDeque;

    /// Console answering from fixed scripts and recording events.
    #[derive(Debug, Default)]
    struct Script {
        actions: VecDeque<TurnAction>,
        moves: VecDeque<&'static str>,
        placements: VecDeque<Placement>,
        counts: VecDeque<usize>,
        events: Vec<GameEvent>,
        renders: usize,
    }

    impl Console for Script {
        fn render(&mut self, _view: &TurnView) {
            self.renders += 1;
        }

        fn choose_action(&mut self, _view: &TurnView) -> TurnAction {
            self.actions.pop_front().unwrap_or(TurnAction::Quit)
        }

        fn read_move(&mut self, _view: &TurnView) -> Option<String> {
            self.moves.pop_front().map(str::to_string)
        }

        fn confirm_placement(&mut self, _view: &TurnView) -> Placement {
            self.placements.pop_front().unwrap_or(Placement::Confirm)
        }

        fn read_count(&mut self, _prompt: &str, max: usize) -> Option<usize> {
            self.counts.pop_front().map(|n| n.min(max))
        }

        fn event(&mut self, event: &GameEvent) {
            self.events.push(event.clone());
        }
    }

    #[derive(Debug, Default)]
    struct Memory {
        saved: Vec<SavedGame>,
        fail: bool,
    }

    impl SaveSink for Memory {
        fn save(&mut self, saved: &SavedGame) -> Result<String, PersistError> {
            if self.fail {
                return Err(PersistError::invalid("disk full"));
            }
            self.saved.push(saved.clone());
            Ok(format!("memory #{}", self.saved.len()))
        }
    }

    fn humans(len: usize) -> Game<StripRules> {
        GameSetup::new(
            StripRules { len },
            Participant::human("ann"),
            Participant::human("bob"),
        )
        .start(Seat::First)
        .unwrap()
    }

    fn script(actions: &[TurnAction], moves: &[&'static str]) -> Script {
        Script {
            actions: actions.iter().copied().collect(),
            moves: moves.iter().copied().collect(),
            ..Script::default()
        }
    }

    #[test]
    fn test_menu_keys_parse() {
        use std::str::FromStr;
        use strum::IntoEnumIterator;
        assert_eq!(TurnAction::iter().count(), 5);
        for action in TurnAction::iter() {
            let key = action.key().to_string();
            assert_eq!(TurnAction::from_str(&key).unwrap(), action);
        }
        assert_eq!(Placement::iter().count(), 2);
        assert_eq!(Placement::from_str("r").unwrap(), Placement::Redo);
    }

    #[test]
    fn test_game_played_to_win() {
        use TurnAction::MakeMove;
        let console = script(&[MakeMove; 5], &["0", "5", "1", "7", "2"]);
        let mut turns = TurnLoop::new(humans(9), console, Memory::default());

        let exit = turns.run().unwrap();

        assert_eq!(exit, LoopExit::Finished(Outcome::Winner(Seat::First)));
        let (_, console, _) = turns.into_parts();
        assert_eq!(
            console.events.last(),
            Some(&GameEvent::GameOver {
                winner: Some("ann".into())
            })
        );
    }

    #[test]
    fn test_invalid_input_reprompts() {
        let console = script(&[TurnAction::MakeMove], &["banana", "42", "3"]);
        let mut turns = TurnLoop::new(humans(5), console, Memory::default());

        assert_eq!(turns.run().unwrap(), LoopExit::Quit);
        let invalid = turns
            .console()
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::InvalidMove { .. }))
            .count();
        assert_eq!(invalid, 2);
        assert_eq!(turns.game().history().records().len(), 1);
    }

    #[test]
    fn test_redo_placement_discards_tentative_move() {
        let mut console = script(&[TurnAction::MakeMove], &["1", "3"]);
        console.placements = [Placement::Redo, Placement::Confirm].into();
        let mut turns = TurnLoop::new(humans(5), console, Memory::default());

        turns.run().unwrap();
        let records = turns.game().history().records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].mv().col, 3);
        assert_eq!(turns.game().board().get(1), 0);
    }

    #[test]
    fn test_undo_and_partial_redo() {
        use TurnAction::{MakeMove, Undo};
        let mut console = script(
            &[MakeMove, MakeMove, MakeMove, MakeMove, Undo],
            &["0", "5", "3", "8"],
        );
        console.counts = [2, 1].into();
        let mut turns = TurnLoop::new(humans(9), console, Memory::default());

        turns.run().unwrap();
        let game = turns.game();
        assert_eq!(game.current_seat(), Seat::First);
        assert_eq!(game.history().active_count(Seat::First), 1);
        assert_eq!(game.history().redoable(Seat::First), 1);
        assert!(turns.console().events.contains(&GameEvent::Undone {
            player: "ann".into(),
            count: 2
        }));
        assert!(turns.console().events.contains(&GameEvent::Redone {
            player: "ann".into(),
            count: 1
        }));
    }

    #[test]
    fn test_undo_with_nothing_on_board() {
        let console = script(&[TurnAction::Undo], &[]);
        let mut turns = TurnLoop::new(humans(5), console, Memory::default());
        turns.run().unwrap();
        assert_eq!(turns.console().events, vec![GameEvent::NothingToUndo]);
    }

    #[test]
    fn test_save_failure_is_reported() {
        let console = script(&[TurnAction::Save, TurnAction::Help], &[]);
        let saves = Memory {
            fail: true,
            ..Memory::default()
        };
        let mut turns = TurnLoop::new(humans(5), console, saves);

        assert_eq!(turns.run().unwrap(), LoopExit::Quit);
        let events = &turns.console().events;
        assert!(matches!(&events[0], GameEvent::SaveFailed { reason } if reason == "disk full"));
        assert_eq!(events[1], GameEvent::Help { mode: GameMode::Gomoku });
    }

    #[test]
    fn test_save_stores_document() {
        let console = script(&[TurnAction::MakeMove, TurnAction::Save], &["2"]);
        let mut turns = TurnLoop::new(humans(5), console, Memory::default());
        turns.run().unwrap();

        let (game, _, saves) = turns.into_parts();
        assert_eq!(saves.saved.len(), 1);
        assert_eq!(saves.saved[0], game.to_saved());
        assert_eq!(saves.saved[0].current_player, "bob");
    }

    #[test]
    fn test_computer_answers_automatically() {
        let game = GameSetup::new(
            StripRules { len: 6 },
            Participant::human("ann"),
            Participant::computer("bot", Box::new(Leftmost)),
        )
        .start(Seat::First)
        .unwrap();
        let console = script(&[TurnAction::MakeMove], &["5"]);
        let mut turns = TurnLoop::new(game, console, Memory::default());

        turns.run().unwrap();
        assert!(turns.console().events.contains(&GameEvent::MoveMade {
            player: "bot".into(),
            mv: "2@0".into(),
            computer: true
        }));
        assert_eq!(turns.game().current_seat(), Seat::First);
    }

    #[test]
    fn test_computers_play_each_other_out() {
        let game = GameSetup::new(
            StripRules { len: 4 },
            Participant::computer("left", Box::new(Leftmost)),
            Participant::computer("also-left", Box::new(Leftmost)),
        )
        .start(Seat::First)
        .unwrap();
        let mut turns = TurnLoop::new(game, Script::default(), Memory::default());
        assert_eq!(turns.run().unwrap(), LoopExit::Finished(Outcome::Draw));
    }

    #[test]
    fn test_resume_offers_undo() {
        let mut game = humans(9);
        for col in [0, 5, 3] {
            let seat = game.current_seat();
            game.play(crate::testing::StripMove::new(col, seat)).unwrap();
        }
        // bob on turn with one move on the board
        let mut console = script(&[], &[]);
        console.counts = [1, 0].into();
        let mut turns = TurnLoop::new(game, console, Memory::default());

        assert_eq!(turns.resume().unwrap(), LoopExit::Quit);
        let game = turns.game();
        assert_eq!(game.current_seat(), Seat::Second);
        assert_eq!(game.history().active_count(Seat::Second), 0);
        assert_eq!(game.history().active_count(Seat::First), 1);
    }
}

//! Turn, undo/redo and persistence state machine shared by every variant.
//!
//! `GameSetup` is the configuring phase; `start` yields a `Game` that
//! alternates strictly between the two seats until an outcome is reached.

use crate::board::{Board, GameMove};
use crate::error::{MoveError, PersistError};
use crate::history::{History, MoveRecord};
use crate::participant::{Controller, Participant};
use crate::persist::{SavedGame, SavedMove, SavedPlayer};
use crate::rules::{GameMode, MoveOf, Rules};
use crate::seat::{Outcome, Seat};
use derive_more::{Display, Error};
use tracing::{debug, info, instrument, warn};

/// Invalid game configuration: player names or board size.
#[derive(Debug, Clone, Display, Error)]
#[display("Setup error: {} at {}:{}", message, file, line)]
pub struct SetupError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl SetupError {
    /// Creates a new setup error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Game being configured: rules chosen, players seated, nothing played.
#[derive(Debug)]
pub struct GameSetup<R: Rules> {
    rules: R,
    players: [Participant<R>; 2],
}

impl<R: Rules> GameSetup<R> {
    /// Seats `first` as Player 1 and `second` as Player 2.
    pub fn new(rules: R, first: Participant<R>, second: Participant<R>) -> Self {
        Self {
            rules,
            players: [first, second],
        }
    }

    /// Starts play with `first_to_move` on turn.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError`] if a name is empty or both names are equal:
    /// names identify players in the move history.
    #[instrument(skip(self), fields(mode = %self.rules.mode()))]
    pub fn start(self, first_to_move: Seat) -> Result<Game<R>, SetupError> {
        check_names(self.players[0].name(), self.players[1].name()).map_err(SetupError::new)?;
        info!(
            first = self.players[0].name(),
            second = self.players[1].name(),
            "Starting game"
        );
        let board = self.rules.new_board();
        Ok(Game {
            rules: self.rules,
            board,
            players: self.players,
            current: first_to_move,
            outcome: None,
            history: History::new(),
        })
    }
}

fn check_names(first: &str, second: &str) -> Result<(), String> {
    if first.trim().is_empty() || second.trim().is_empty() {
        return Err("player names must not be empty".to_string());
    }
    if first == second {
        return Err(format!("both players are called {:?}", first));
    }
    Ok(())
}

/// Checks that the loaded moves form one line of play: seats alternate,
/// the moves on the board come first, no move follows a finished game, and
/// each snapshot is the previous snapshot with the previous move applied.
fn check_timeline<R: Rules>(rules: &R, history: &History<R::Board>) -> Result<(), PersistError> {
    let timeline = history.timeline();
    if timeline.windows(2).any(|w| w[0].seat() == w[1].seat()) {
        return Err(PersistError::invalid("players do not alternate in history"));
    }
    let on_board = history.active().count();
    if history.active().enumerate().any(|(i, r)| r.ply() != i) {
        return Err(PersistError::invalid(
            "undone moves must follow every move on the board",
        ));
    }

    let mut replay = rules.new_board();
    for (i, record) in timeline.iter().enumerate() {
        if *record.before() != replay {
            return Err(PersistError::invalid(format!(
                "board before move {} does not follow from the earlier moves",
                record.ply()
            )));
        }
        replay.apply_move(record.mv());
        if i + 1 < on_board && rules.outcome(&replay, record.mv(), record.seat()).is_some() {
            return Err(PersistError::invalid(format!(
                "move {} ended the game but play continued",
                record.ply()
            )));
        }
    }
    Ok(())
}

/// Where the game stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// The seat is on turn.
    Turn(Seat),
    /// The game ended.
    Over(Outcome),
}

/// I/O-free snapshot of the turn, handed to the console for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnView {
    /// Game mode.
    pub mode: GameMode,
    /// Rendered board.
    pub board: String,
    /// Seat on turn (or that made the last move once over).
    pub seat: Seat,
    /// Name of that player.
    pub player: String,
    /// Variant hint such as the numbers still available.
    pub hint: Option<String>,
    /// Expected move input.
    pub syntax: &'static str,
    /// Moves currently on the board.
    pub moves_played: usize,
}

/// A game in play.
#[derive(Debug)]
pub struct Game<R: Rules> {
    rules: R,
    board: R::Board,
    players: [Participant<R>; 2],
    current: Seat,
    outcome: Option<Outcome>,
    history: History<R::Board>,
}

impl<R: Rules> Game<R> {
    /// The rules in force.
    pub fn rules(&self) -> &R {
        &self.rules
    }

    /// The board.
    pub fn board(&self) -> &R::Board {
        &self.board
    }

    /// Both players, Player 1 first.
    pub fn players(&self) -> &[Participant<R>; 2] {
        &self.players
    }

    /// The player in `seat`.
    pub fn player(&self, seat: Seat) -> &Participant<R> {
        &self.players[seat.index()]
    }

    /// Seat on turn.
    pub fn current_seat(&self) -> Seat {
        self.current
    }

    /// Player on turn.
    pub fn current_player(&self) -> &Participant<R> {
        self.player(self.current)
    }

    /// Undo/redo stacks.
    pub fn history(&self) -> &History<R::Board> {
        &self.history
    }

    /// Undone moves of the current timeline; the last is redone first.
    pub fn redo_stack(&self) -> &[MoveRecord<R::Board>] {
        self.history.redo_stack()
    }

    /// Outcome, once the game is over.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// True once an outcome has been reached.
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Turn or final state.
    pub fn state(&self) -> GameState {
        match self.outcome {
            Some(outcome) => GameState::Over(outcome),
            None => GameState::Turn(self.current),
        }
    }

    /// Name of the winner, if any.
    pub fn winner_name(&self) -> Option<&str> {
        self.outcome
            .and_then(|o| o.winner())
            .map(|seat| self.player(seat).name())
    }

    /// Legal moves for the player on turn.
    pub fn legal_moves(&self) -> Vec<MoveOf<R>> {
        if self.is_over() {
            return Vec::new();
        }
        self.rules.legal_moves(&self.board, self.current)
    }

    /// Checks `mv` for the player on turn without touching the board.
    pub fn validate(&self, mv: &MoveOf<R>) -> Result<(), MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        self.rules.check_move(&self.board, self.current, mv)
    }

    /// Places `mv` tentatively.
    ///
    /// The returned guard either confirms the placement into history or
    /// discards it, restoring the board. Dropping it discards.
    #[instrument(skip(self, mv), fields(seat = ?self.current, mv = %mv))]
    pub fn stage(&mut self, mv: MoveOf<R>) -> Result<PendingMove<'_, R>, MoveError> {
        if let Err(err) = self.validate(&mv) {
            warn!(error = %err, "Rejected move");
            return Err(err);
        }
        let before = self.board.snapshot();
        self.board.apply_move(&mv);
        debug!("Move staged");
        Ok(PendingMove {
            game: self,
            mv,
            before: Some(before),
        })
    }

    /// Validates, places and confirms `mv` in one step.
    pub fn play(&mut self, mv: MoveOf<R>) -> Result<Option<Outcome>, MoveError> {
        Ok(self.stage(mv)?.confirm())
    }

    /// Asks the computer on turn for a move. `None` for human seats or
    /// when no legal move exists.
    #[instrument(skip(self), fields(seat = ?self.current))]
    pub fn computer_move(&mut self) -> Option<MoveOf<R>> {
        if self.is_over() {
            return None;
        }
        let seat = self.current;
        let player = &mut self.players[seat.index()];
        match player.controller_mut() {
            Controller::Human => None,
            Controller::Computer(strategy) => {
                let choice = strategy.select(&self.rules, &self.board, seat);
                debug!(choice = ?choice, "Computer selected move");
                choice
            }
        }
    }

    fn commit(&mut self, mv: MoveOf<R>, before: R::Board) -> Option<Outcome> {
        let seat = self.current;
        let name = self.players[seat.index()].name().to_string();
        self.history.commit(seat, &name, mv, before);
        self.outcome = self.rules.outcome(&self.board, &mv, seat);
        match self.outcome {
            Some(outcome) => info!(player = %name, %mv, ?outcome, "Game over"),
            None => {
                self.current = seat.opponent();
                info!(player = %name, %mv, "Move confirmed");
            }
        }
        self.outcome
    }

    /// Undoes up to `count` of the current player's own moves.
    ///
    /// Opponent moves made after them are reverted on the board too but
    /// stay in history; only the current player's moves go onto the redo
    /// stack. Afterwards the same player is on turn. Returns the number
    /// of moves undone; zero leaves everything untouched.
    pub fn undo(&mut self, count: usize) -> usize {
        self.undo_for(self.current, count)
    }

    /// Undoes up to `count` of `seat`'s moves, whoever is on turn, and
    /// hands the turn to `seat`. Used when a loaded game is resumed by the
    /// player who is not on turn.
    #[instrument(skip(self))]
    pub fn undo_for(&mut self, seat: Seat, count: usize) -> usize {
        let undone = self.history.undo(&mut self.board, seat, count);
        if undone > 0 {
            self.current = seat;
            self.outcome = None;
            info!(undone, "Moves undone");
        }
        undone
    }

    /// Redoes up to `count` of the current player's undone moves, along
    /// with the opponent moves that followed them.
    #[instrument(skip(self), fields(seat = ?self.current))]
    pub fn redo(&mut self, count: usize) -> usize {
        let seat = self.current;
        let rules = &self.rules;
        let mut last = None;
        let redone = self.history.redo(&mut self.board, seat, count, |board, record| {
            last = Some((record.seat(), rules.outcome(board, record.mv(), record.seat())));
        });
        if let Some((mover, outcome)) = last {
            self.outcome = outcome;
            self.current = if outcome.is_some() { mover } else { mover.opponent() };
            info!(redone, "Moves redone");
        }
        redone
    }

    /// Rendering snapshot for the console.
    pub fn view(&self) -> TurnView {
        TurnView {
            mode: self.rules.mode(),
            board: self.board.to_string(),
            seat: self.current,
            player: self.current_player().name().to_string(),
            hint: self.rules.hint(&self.board, self.current),
            syntax: self.rules.move_syntax(),
            moves_played: self.history.active().count(),
        }
    }

    /// Captures the full game as a save document.
    #[instrument(skip(self), fields(mode = %self.rules.mode()))]
    pub fn to_saved(&self) -> SavedGame {
        let dims = self.rules.dimensions();
        let save_record = |record: &MoveRecord<R::Board>| SavedMove {
            mv: record.mv().encode(),
            player: record.player().to_string(),
            before: record.before().encode(),
            ply: record.ply(),
            suspended: record.is_suspended(),
        };
        SavedGame {
            mode: self.rules.mode(),
            rows: dims.rows,
            cols: dims.cols,
            boards: dims.boards,
            players: self
                .players
                .iter()
                .map(|p| SavedPlayer {
                    name: p.name().to_string(),
                    kind: p.kind(),
                })
                .collect(),
            current_player: self.current_player().name().to_string(),
            game_over: self.is_over(),
            board: self.board.encode(),
            history: self.history.records().iter().map(save_record).collect(),
            redo: self.history.redo_stack().iter().map(save_record).collect(),
        }
    }

    /// Rebuilds a game from a save document.
    ///
    /// `seat_player` turns each stored player into a participant (choosing
    /// a strategy for computer players). Nothing is built unless the whole
    /// document checks out, so a failed load never disturbs existing state.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError`] for a mode or dimension mismatch, unknown
    /// player names, undecodable cells or moves, a recorded move that was
    /// not legal on its snapshot, snapshots or a board that do not follow
    /// from the history, the wrong player on turn, or a terminal flag that
    /// disagrees with the board.
    #[instrument(skip_all, fields(mode = %saved.mode, moves = saved.history.len()))]
    pub fn from_saved<F>(rules: R, saved: &SavedGame, mut seat_player: F) -> Result<Self, PersistError>
    where
        F: FnMut(&SavedPlayer) -> Participant<R>,
    {
        if saved.mode != rules.mode() {
            return Err(PersistError::invalid(format!(
                "saved game is {} but {} was requested",
                saved.mode,
                rules.mode()
            )));
        }
        let dims = rules.dimensions();
        if (saved.rows, saved.cols, saved.boards) != (dims.rows, dims.cols, dims.boards) {
            return Err(PersistError::invalid(format!(
                "saved dimensions {}x{}x{} do not match {}x{}x{}",
                saved.boards, saved.rows, saved.cols, dims.boards, dims.rows, dims.cols
            )));
        }
        let [first, second] = saved.players.as_slice() else {
            return Err(PersistError::invalid(format!(
                "expected 2 players, found {}",
                saved.players.len()
            )));
        };
        check_names(&first.name, &second.name).map_err(PersistError::invalid)?;

        let seat_of = |name: &str| -> Result<Seat, PersistError> {
            if name == first.name {
                Ok(Seat::First)
            } else if name == second.name {
                Ok(Seat::Second)
            } else {
                Err(PersistError::invalid(format!("unknown player {:?}", name)))
            }
        };
        let load_record = |entry: &SavedMove| -> Result<MoveRecord<R::Board>, PersistError> {
            let seat = seat_of(&entry.player)?;
            let mv = <MoveOf<R> as GameMove>::decode(&entry.mv)?;
            let before = <R::Board as Board>::decode(&entry.before, dims)?;
            rules.check_move(&before, seat, &mv).map_err(|err| {
                PersistError::invalid(format!("move {} ({}) is illegal: {}", entry.ply, mv, err))
            })?;
            Ok(MoveRecord::new(entry.ply, seat, entry.player.clone(), mv, before)
                .with_suspended(entry.suspended))
        };

        let board = <R::Board as Board>::decode(&saved.board, dims)?;
        let records = saved
            .history
            .iter()
            .map(&load_record)
            .collect::<Result<Vec<_>, _>>()?;
        let redo = saved
            .redo
            .iter()
            .map(&load_record)
            .collect::<Result<Vec<_>, _>>()?;
        if redo.iter().any(|r| r.is_suspended()) {
            return Err(PersistError::invalid("redo entries cannot be suspended"));
        }
        let history = History::from_parts(records, redo)?;
        check_timeline(&rules, &history)?;
        let mut current = seat_of(&saved.current_player)?;

        let outcome = match history.last_active() {
            Some(last) => {
                let mut expected = last.before().clone();
                expected.apply_move(last.mv());
                if expected != board {
                    return Err(PersistError::invalid(
                        "board does not match the last move in history",
                    ));
                }
                let outcome = rules.outcome(&board, last.mv(), last.seat());
                if outcome.is_some() {
                    current = last.seat();
                } else if current != last.seat().opponent() {
                    return Err(PersistError::invalid(format!(
                        "{} made the last move and cannot be on turn",
                        saved.current_player
                    )));
                }
                outcome
            }
            None => {
                if board != rules.new_board() {
                    return Err(PersistError::invalid("board is not empty but history is"));
                }
                // Everything undone: the undoing player owns the first move.
                let first_mover = history.timeline().first().map(|r| r.seat());
                if first_mover.is_some_and(|seat| seat != current) {
                    return Err(PersistError::invalid(format!(
                        "{} cannot be on turn before the first undone move",
                        saved.current_player
                    )));
                }
                None
            }
        };
        if outcome.is_some() != saved.game_over {
            return Err(PersistError::invalid(
                "terminal flag does not match the board",
            ));
        }

        let players = [seat_player(first), seat_player(second)];
        info!(
            first = %first.name,
            second = %second.name,
            current = ?current,
            "Saved game restored"
        );
        Ok(Self {
            rules,
            board,
            players,
            current,
            outcome,
            history,
        })
    }
}

/// A tentatively placed move awaiting confirmation.
#[derive(Debug)]
pub struct PendingMove<'g, R: Rules> {
    game: &'g mut Game<R>,
    mv: MoveOf<R>,
    before: Option<R::Board>,
}

impl<R: Rules> PendingMove<'_, R> {
    /// The staged move.
    pub fn mv(&self) -> &MoveOf<R> {
        &self.mv
    }

    /// Board with the move placed.
    pub fn board(&self) -> &R::Board {
        &self.game.board
    }

    /// The game with the move on the board.
    pub fn game(&self) -> &Game<R> {
        self.game
    }

    /// Commits the move to history (clearing the redo stack), checks for
    /// a terminal state and passes the turn if play continues.
    pub fn confirm(mut self) -> Option<Outcome> {
        match self.before.take() {
            Some(before) => self.game.commit(self.mv, before),
            None => self.game.outcome,
        }
    }

    /// Takes the move back so another can be chosen.
    pub fn discard(self) {
        drop(self);
    }
}

impl<R: Rules> Drop for PendingMove<'_, R> {
    fn drop(&mut self) {
        if let Some(before) = self.before.take() {
            self.game.board.restore(&before);
            debug!(mv = %self.mv, "Staged move discarded");
        }
    }
}

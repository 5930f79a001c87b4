//! Move records and the undo/redo stacks.
//!
//! `records` holds confirmed moves in chronological order. Moves undone by
//! their own player sit on the redo stack. Opponent moves skipped while
//! undoing stay in `records` but are marked suspended: they are reverted on
//! the board and come back when the undoing player redoes past them.
//! Suspended records always follow every active one.

use crate::board::Board;
use crate::error::PersistError;
use crate::seat::Seat;
use tracing::{debug, instrument};

/// One confirmed move plus the board it was played on.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveRecord<B: Board> {
    ply: usize,
    seat: Seat,
    player: String,
    mv: B::Move,
    before: B,
    suspended: bool,
}

impl<B: Board> MoveRecord<B> {
    /// Creates a record.
    pub fn new(ply: usize, seat: Seat, player: impl Into<String>, mv: B::Move, before: B) -> Self {
        Self {
            ply,
            seat,
            player: player.into(),
            mv,
            before,
            suspended: false,
        }
    }

    /// Position in the full timeline, starting at 0.
    pub fn ply(&self) -> usize {
        self.ply
    }

    /// Seat that made the move.
    pub fn seat(&self) -> Seat {
        self.seat
    }

    /// Name of the player that made the move.
    pub fn player(&self) -> &str {
        &self.player
    }

    /// The move.
    pub fn mv(&self) -> &B::Move {
        &self.mv
    }

    /// Board immediately before the move.
    pub fn before(&self) -> &B {
        &self.before
    }

    /// True if an opponent's undo reverted this move on the board.
    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    pub(crate) fn with_suspended(mut self, suspended: bool) -> Self {
        self.suspended = suspended;
        self
    }
}

/// Undo and redo stacks.
#[derive(Debug, Clone, PartialEq)]
pub struct History<B: Board> {
    records: Vec<MoveRecord<B>>,
    redo: Vec<MoveRecord<B>>,
}

impl<B: Board> History<B> {
    /// Empty history.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            redo: Vec::new(),
        }
    }

    /// Rebuilds a history from loaded parts, checking ply ordering.
    #[instrument(skip_all, fields(records = records.len(), redo = redo.len()))]
    pub fn from_parts(records: Vec<MoveRecord<B>>, redo: Vec<MoveRecord<B>>) -> Result<Self, PersistError> {
        if records.windows(2).any(|w| w[0].suspended && !w[1].suspended) {
            return Err(PersistError::invalid(
                "suspended moves must follow every active move",
            ));
        }
        if records.windows(2).any(|w| w[0].ply >= w[1].ply) {
            return Err(PersistError::invalid("history is not in chronological order"));
        }
        if redo.windows(2).any(|w| w[0].ply <= w[1].ply) {
            return Err(PersistError::invalid("redo stack is not in undo order"));
        }
        let history = Self { records, redo };
        let plies: Vec<usize> = history.timeline().iter().map(|r| r.ply).collect();
        if plies.iter().enumerate().any(|(i, ply)| i != *ply) {
            return Err(PersistError::invalid("move plies do not form a timeline"));
        }
        Ok(history)
    }

    /// Confirmed moves in chronological order, suspended ones included.
    pub fn records(&self) -> &[MoveRecord<B>] {
        &self.records
    }

    /// Undone moves; the last element is the next one to redo.
    pub fn redo_stack(&self) -> &[MoveRecord<B>] {
        &self.redo
    }

    /// True if no move has been confirmed.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Moves currently reflected on the board.
    pub fn active(&self) -> impl Iterator<Item = &MoveRecord<B>> {
        self.records.iter().filter(|r| !r.suspended)
    }

    /// Number of `seat`'s moves currently on the board.
    pub fn active_count(&self, seat: Seat) -> usize {
        self.active().filter(|r| r.seat == seat).count()
    }

    /// Most recent move on the board.
    pub fn last_active(&self) -> Option<&MoveRecord<B>> {
        self.records.iter().rev().find(|r| !r.suspended)
    }

    /// Number of moves `seat` could redo right now.
    pub fn redoable(&self, seat: Seat) -> usize {
        self.redo.iter().rev().take_while(|r| r.seat == seat).count()
    }

    /// Every move ever confirmed on the current timeline, oldest first:
    /// the reversed redo stack merged with the records.
    pub fn timeline(&self) -> Vec<&MoveRecord<B>> {
        let mut all: Vec<&MoveRecord<B>> = self.records.iter().chain(self.redo.iter()).collect();
        all.sort_by_key(|r| r.ply);
        all
    }

    /// Pushes a newly confirmed move.
    ///
    /// The timeline branches here: the redo stack and every suspended
    /// record are discarded.
    #[instrument(skip_all, fields(seat = ?seat, mv = %mv))]
    pub(crate) fn commit(&mut self, seat: Seat, player: &str, mv: B::Move, before: B) {
        let suspended = self.records.iter().filter(|r| r.suspended).count();
        if suspended > 0 || !self.redo.is_empty() {
            debug!(suspended, redo = self.redo.len(), "Timeline branched");
        }
        self.records.retain(|r| !r.suspended);
        self.redo.clear();
        let ply = self.records.len();
        self.records.push(MoveRecord::new(ply, seat, player, mv, before));
    }

    /// Undoes up to `requested` of `seat`'s own moves.
    ///
    /// Opponent moves met on the way are reverted on the board and kept in
    /// history as suspended. The request is clamped to the moves `seat`
    /// has on the board; returns how many were undone.
    #[instrument(skip(self, board))]
    pub(crate) fn undo(&mut self, board: &mut B, seat: Seat, requested: usize) -> usize {
        let target = requested.min(self.active_count(seat));
        let mut undone = 0;
        let mut skipped = Vec::new();

        while undone < target {
            let Some(mut record) = self.records.pop() else {
                break;
            };
            if record.suspended {
                skipped.push(record);
                continue;
            }
            board.restore(&record.before);
            if record.seat == seat {
                debug!(ply = record.ply, mv = %record.mv, "Move undone");
                self.redo.push(record);
                undone += 1;
            } else {
                debug!(ply = record.ply, mv = %record.mv, "Opponent move suspended");
                record.suspended = true;
                skipped.push(record);
            }
        }

        self.records.extend(skipped.into_iter().rev());
        undone
    }

    /// Redoes up to `requested` of `seat`'s undone moves.
    ///
    /// After each redone move, suspended records that precede the next redo
    /// entry are replayed, so redoing everything restores the board exactly.
    /// `applied` sees the board after every move put back on it.
    #[instrument(skip(self, board, applied))]
    pub(crate) fn redo<F>(&mut self, board: &mut B, seat: Seat, requested: usize, mut applied: F) -> usize
    where
        F: FnMut(&B, &MoveRecord<B>),
    {
        let mut redone = 0;

        while redone < requested {
            match self.redo.last() {
                Some(record) if record.seat == seat => {}
                _ => break,
            }
            let Some(record) = self.redo.pop() else {
                break;
            };

            board.apply_move(&record.mv);
            applied(board, &record);
            debug!(ply = record.ply, mv = %record.mv, "Move redone");

            let split = self
                .records
                .iter()
                .position(|r| r.suspended)
                .unwrap_or(self.records.len());
            self.records.insert(split, record);
            redone += 1;

            let limit = self.redo.last().map(|r| r.ply);
            for replayed in self.records[split + 1..].iter_mut() {
                if !replayed.suspended {
                    continue;
                }
                if limit.is_some_and(|ply| replayed.ply > ply) {
                    break;
                }
                board.apply_move(&replayed.mv);
                replayed.suspended = false;
                applied(board, replayed);
                debug!(ply = replayed.ply, mv = %replayed.mv, "Suspended move replayed");
            }
        }

        redone
    }
}

impl<B: Board> Default for History<B> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{StripBoard, StripMove};

    /// Plays alternating moves on a fresh strip, First moving first.
    fn play(cols: &[usize]) -> (History<StripBoard>, StripBoard) {
        let mut history = History::new();
        let mut board = StripBoard::new(12);
        let mut seat = Seat::First;
        for &col in cols {
            let mv = StripMove::new(col, seat);
            let before = board.snapshot();
            board.apply_move(&mv);
            let name = if seat == Seat::First { "ann" } else { "bob" };
            history.commit(seat, name, mv, before);
            seat = seat.opponent();
        }
        (history, board)
    }

    fn plies(records: &[MoveRecord<StripBoard>]) -> Vec<usize> {
        records.iter().map(|r| r.ply()).collect()
    }

    #[test]
    fn test_commit_assigns_plies() {
        let (history, _) = play(&[0, 5, 1]);
        assert_eq!(plies(history.records()), vec![0, 1, 2]);
        assert_eq!(history.active_count(Seat::First), 2);
        assert_eq!(history.active_count(Seat::Second), 1);
    }

    #[test]
    fn test_undo_skips_and_suspends_opponent_moves() {
        // ann: 0, 2, 4   bob: 7, 9
        let (mut history, mut board) = play(&[0, 7, 2, 9, 4]);
        let undone = history.undo(&mut board, Seat::First, 2);

        assert_eq!(undone, 2);
        assert_eq!(history.active_count(Seat::First), 1);
        // bob keeps both moves in history; the later one is suspended
        let bob: Vec<_> = history
            .records()
            .iter()
            .filter(|r| r.seat() == Seat::Second)
            .collect();
        assert_eq!(bob.len(), 2);
        assert!(!bob[0].is_suspended());
        assert!(bob[1].is_suspended());
        // board is what ann saw before her second move
        assert_eq!(board, play(&[0, 7]).1);
        assert_eq!(plies(history.redo_stack()), vec![4, 2]);
    }

    #[test]
    fn test_undo_clamps_to_available_moves() {
        let (mut history, mut board) = play(&[0, 7, 2]);
        assert_eq!(history.undo(&mut board, Seat::Second, 5), 1);
        assert_eq!(history.undo(&mut board, Seat::Second, 1), 0);
        assert_eq!(board, play(&[0]).1);
    }

    #[test]
    fn test_undo_on_empty_history_is_noop() {
        let mut history: History<StripBoard> = History::new();
        let mut board = StripBoard::new(4);
        assert_eq!(history.undo(&mut board, Seat::First, 1), 0);
        assert!(history.is_empty());
    }

    #[test]
    fn test_redo_restores_pre_undo_board() {
        let (mut history, mut board) = play(&[0, 7, 2, 9, 4]);
        let original = board.clone();
        history.undo(&mut board, Seat::First, 2);

        let mut seen = Vec::new();
        let redone = history.redo(&mut board, Seat::First, 2, |_, r| seen.push(r.ply()));

        assert_eq!(redone, 2);
        assert_eq!(seen, vec![2, 3, 4]);
        assert_eq!(board, original);
        assert!(history.redo_stack().is_empty());
        assert!(history.records().iter().all(|r| !r.is_suspended()));
        assert_eq!(plies(history.records()), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_partial_redo_replays_only_preceding_suspended() {
        let (mut history, mut board) = play(&[0, 7, 2, 9, 4]);
        history.undo(&mut board, Seat::First, 2);
        history.redo(&mut board, Seat::First, 1, |_, _| {});

        assert_eq!(board, play(&[0, 7, 2, 9]).1);
        assert_eq!(plies(history.redo_stack()), vec![4]);
    }

    #[test]
    fn test_redo_ignores_other_seat() {
        let (mut history, mut board) = play(&[0, 7, 2]);
        history.undo(&mut board, Seat::First, 1);
        assert_eq!(history.redoable(Seat::Second), 0);
        assert_eq!(history.redo(&mut board, Seat::Second, 1, |_, _| {}), 0);
        assert_eq!(history.redoable(Seat::First), 1);
    }

    #[test]
    fn test_commit_after_undo_branches_timeline() {
        let (mut history, mut board) = play(&[0, 7, 2, 9]);
        history.undo(&mut board, Seat::First, 1);
        let before = board.snapshot();
        let mv = StripMove::new(11, Seat::First);
        board.apply_move(&mv);
        history.commit(Seat::First, "ann", mv, before);

        assert!(history.redo_stack().is_empty());
        assert!(history.records().iter().all(|r| !r.is_suspended()));
        assert_eq!(plies(history.records()), vec![0, 1, 2]);
    }

    #[test]
    fn test_timeline_reconstructs_chronology() {
        let (mut history, mut board) = play(&[0, 7, 2, 9, 4]);
        history.undo(&mut board, Seat::First, 2);
        let timeline: Vec<usize> = history.timeline().iter().map(|r| r.ply()).collect();
        assert_eq!(timeline, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_from_parts_rejects_gaps() {
        let (history, _) = play(&[0, 7, 2]);
        let mut records = history.records().to_vec();
        records.remove(1);
        assert!(History::from_parts(records, Vec::new()).is_err());
    }

    #[test]
    fn test_from_parts_accepts_undone_state() {
        let (mut history, mut board) = play(&[0, 7, 2, 9, 4]);
        history.undo(&mut board, Seat::First, 2);
        let rebuilt = History::from_parts(
            history.records().to_vec(),
            history.redo_stack().to_vec(),
        )
        .unwrap();
        assert_eq!(rebuilt, history);
    }
}

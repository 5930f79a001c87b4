//! Computer move selection.
//!
//! Every computer player follows the same two-stage shape: scan the legal
//! moves in a fixed order for one that satisfies a one-ply predicate, and
//! fall back to a variant-specific choice when none does. No deeper search
//! is ever performed.

use crate::board::Board;
use crate::rules::{MoveOf, Rules};
use crate::seat::Seat;
use rand::Rng;
use rand::seq::IndexedRandom;
use std::fmt;
use tracing::{debug, instrument};

/// Chooses moves for a computer-controlled seat.
pub trait Strategy<R: Rules>: fmt::Debug {
    /// Picks a legal move for `seat`, or `None` if there is none.
    fn select(&mut self, rules: &R, board: &R::Board, seat: Seat) -> Option<MoveOf<R>>;
}

/// Stage one: the first legal move whose simulated result satisfies `keep`.
///
/// Each candidate is applied to a scratch snapshot, handed to `keep`
/// together with the move, and rolled back by restoring the original.
#[instrument(skip_all, fields(seat = ?seat))]
pub fn first_scanned<R, F>(rules: &R, board: &R::Board, seat: Seat, mut keep: F) -> Option<MoveOf<R>>
where
    R: Rules,
    F: FnMut(&R::Board, &MoveOf<R>) -> bool,
{
    let mut scratch = board.snapshot();
    for mv in rules.legal_moves(board, seat) {
        scratch.apply_move(&mv);
        let accepted = keep(&scratch, &mv);
        scratch.restore(board);
        if accepted {
            debug!(%mv, "Scan accepted move");
            return Some(mv);
        }
    }
    None
}

/// Stage two fallback: a uniformly random legal move.
#[instrument(skip_all, fields(seat = ?seat))]
pub fn pick_random<R: Rules, G: Rng + ?Sized>(
    rules: &R,
    board: &R::Board,
    seat: Seat,
    rng: &mut G,
) -> Option<MoveOf<R>> {
    let moves = rules.legal_moves(board, seat);
    let choice = moves.choose(rng).copied();
    debug!(candidates = moves.len(), chosen = ?choice, "Random fallback");
    choice
}

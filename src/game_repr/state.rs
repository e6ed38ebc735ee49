//! The position contract shared by every searcher.
//!
//! Searchers own exactly one mutable state and walk the game tree by pairing
//! every `make` with a `retract`. `MoveGuard` ties that pairing to scope so the
//! retract also happens when a search unwinds early on abort.

use super::{Color, Move, MoveList, SetupError};
use std::fmt;
use std::ops::{Deref, DerefMut};

/// Evaluation of a position the side to move has won.
pub const WIN_VALUE: i32 = 10_000;
/// Evaluation of a position the side to move has lost.
pub const LOSS_VALUE: i32 = -WIN_VALUE;

/// Game result relative to the side about to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Outcome {
    #[default]
    Unknown,
    Win,
    Loss,
}

pub trait GameState: Clone + fmt::Display {
    /// Legal moves, captures first. A `hint` present in the list is moved to
    /// the front without disturbing the order of the rest.
    fn generate_moves(&self, hint: Option<Move>) -> MoveList;

    /// Capture-only subset of `generate_moves`.
    fn capture_moves(&self, hint: Option<Move>) -> MoveList;

    fn make(&mut self, mv: Move);

    /// Exact inverse of `make`. Always resets the result to `Unknown`.
    fn retract(&mut self, mv: Move);

    fn is_terminal(&self) -> bool;

    fn result(&self) -> Outcome;

    fn side_to_move(&self) -> Color;

    /// Static score from the point of view of the side to move.
    fn evaluation(&self) -> i32;

    /// Zobrist key of the current position.
    fn key(&self) -> u64;

    /// Back to the initial layout.
    fn reset(&mut self);

    /// Replace the position with the one described by a board string.
    /// On error the position is left untouched.
    fn setup(&mut self, board: &str) -> Result<(), SetupError>;
}

/// Scoped make/retract pair.
///
/// Applies the move on construction and retracts it on drop. Derefs to the
/// state so the search can recurse through the guard.
pub struct MoveGuard<'a, S: GameState> {
    state: &'a mut S,
    mv: Move,
}

impl<'a, S: GameState> MoveGuard<'a, S> {
    pub fn new(state: &'a mut S, mv: Move) -> Self {
        state.make(mv);
        Self { state, mv }
    }
}

impl<S: GameState> Deref for MoveGuard<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.state
    }
}

impl<S: GameState> DerefMut for MoveGuard<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.state
    }
}

impl<S: GameState> Drop for MoveGuard<'_, S> {
    fn drop(&mut self) {
        self.state.retract(self.mv);
    }
}

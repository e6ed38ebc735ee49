//! Agent trait and the resource limits every agent understands.
//!
//! An agent is anything that can choose a move for the side to move of a
//! position: the alpha-beta searcher, the MCTS searcher, or a random mover.
//! The driver owns the authoritative position and hands agents a shared
//! reference. Searchers copy it once and mutate their own copy in place.
//!
//! # Examples
//!
//! ```rust
//! use breakthrough_engine::agent::{Agent, NegamaxAgent, ThinkLimit};
//! use breakthrough_engine::game_repr::{GameState, Position};
//!
//! let mut agent = NegamaxAgent::new();
//! agent.set_silence(true);
//! agent.set_think_limit(ThinkLimit { limit: 2, max_nodes: 0, max_time_ms: 0 });
//!
//! let mut pos = Position::new();
//! let mv = agent.play_move(&pos).unwrap();
//! pos.make(mv);
//! ```

use crate::game_repr::{Move, Position};

/// Resource limits for one `play_move` call. Zero means unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThinkLimit {
    /// Maximum depth for alpha-beta, number of simulations for MCTS
    pub limit: u32,
    /// Maximum nodes searched (alpha-beta) or kept in the tree (MCTS)
    pub max_nodes: u64,
    /// Wall-clock budget in milliseconds
    pub max_time_ms: u64,
}

/// Trait for entities that pick moves.
///
/// Each implementation has its own constructor; the trait only covers what a
/// driver needs while playing a game.
pub trait Agent {
    /// Suppress per-search progress output.
    fn set_silence(&mut self, silent: bool);

    fn set_think_limit(&mut self, limit: ThinkLimit);

    /// Choose a move for the side to move.
    ///
    /// Returns `None` when `pos` is terminal. The position itself is never
    /// modified.
    fn play_move(&mut self, pos: &Position) -> Option<Move>;

    /// Display name used in match output.
    fn name(&self) -> &str;
}

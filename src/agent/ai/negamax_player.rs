//! NegamaxAgent - alpha-beta searcher behind the `Agent` trait
//!
//! Each `play_move` copies the driver's position, clears the transposition
//! table and runs `iterative_deepening` on the copy until a limit fires.
//!
//! # Difficulty Levels
//!
//! - **Easy**: Depth 2
//! - **Medium**: Depth 4
//! - **Hard**: Depth 6
//! - **Expert**: Depth 8 with a 5s time limit
//!
//! # Examples
//!
//! ```rust
//! use breakthrough_engine::agent::{Agent, Difficulty, NegamaxAgent};
//! use breakthrough_engine::game_repr::Position;
//!
//! let mut ai = NegamaxAgent::with_difficulty(Difficulty::Easy);
//! ai.set_silence(true);
//! assert!(ai.play_move(&Position::new()).is_some());
//! ```

use super::search::{iterative_deepening, SearchConfig, SearchResult};
use super::transposition_table::TranspositionTable;
use crate::agent::{Agent, ThinkLimit};
use crate::game_repr::{GameState, Move, Position};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Search presets mapping to think limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    /// Depth 2, no time limit
    Easy,
    /// Depth 4, no time limit
    Medium,
    /// Depth 6, no time limit
    Hard,
    /// Depth 8, 5 second time limit
    Expert,
}

impl Difficulty {
    /// Number of plies to search
    pub fn max_depth(&self) -> u32 {
        match self {
            Difficulty::Easy => 2,
            Difficulty::Medium => 4,
            Difficulty::Hard => 6,
            Difficulty::Expert => 8,
        }
    }

    /// Time limit in milliseconds, None for unlimited
    pub fn time_limit_ms(&self) -> Option<u64> {
        match self {
            Difficulty::Expert => Some(5000),
            _ => None,
        }
    }

    pub fn think_limit(&self) -> ThinkLimit {
        ThinkLimit {
            limit: self.max_depth(),
            max_nodes: 0,
            max_time_ms: self.time_limit_ms().unwrap_or(0),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Expert => "Expert",
        }
    }
}

/// Agent that plays the best move of an iterative-deepening alpha-beta search
///
/// The table is allocated once and cleared before every search. If the limits
/// stop the search before depth 1 completes, a random legal move is played.
pub struct NegamaxAgent {
    name: String,
    limit: ThinkLimit,
    config: SearchConfig,
    tt: TranspositionTable,
    rng: StdRng,
    silent: bool,
    last_result: Option<SearchResult>,
}

impl NegamaxAgent {
    pub fn new() -> Self {
        Self::with_config(SearchConfig::default())
    }

    pub fn with_config(config: SearchConfig) -> Self {
        Self {
            name: "Negamax".to_string(),
            limit: ThinkLimit::default(),
            config,
            tt: TranspositionTable::with_capacity(config.tt_entries),
            rng: StdRng::from_entropy(),
            silent: false,
            last_result: None,
        }
    }

    pub fn with_difficulty(difficulty: Difficulty) -> Self {
        let mut agent = Self::new();
        agent.limit = difficulty.think_limit();
        agent.name = format!("Negamax ({})", difficulty.name());
        agent
    }

    /// Fix the random source used for the fallback move.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Statistics of the most recent search.
    pub fn last_result(&self) -> Option<&SearchResult> {
        self.last_result.as_ref()
    }
}

impl Default for NegamaxAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for NegamaxAgent {
    fn set_silence(&mut self, silent: bool) {
        self.silent = silent;
    }

    fn set_think_limit(&mut self, limit: ThinkLimit) {
        self.limit = limit;
    }

    fn play_move(&mut self, pos: &Position) -> Option<Move> {
        if pos.is_terminal() {
            return None;
        }
        let fallback = pos.generate_moves(None).choose(&mut self.rng).copied();

        let mut search_pos = *pos;
        let result = iterative_deepening(&mut search_pos, &mut self.tt, &self.config, &self.limit, self.silent);
        debug_assert_eq!(&search_pos, pos);

        let chosen = result.best_move.or(fallback);
        if result.best_move.is_none() {
            log::debug!("no search depth completed, playing a random move");
        }
        self.last_result = Some(result);
        chosen
    }

    fn name(&self) -> &str {
        &self.name
    }
}

//! MCTS (Monte Carlo Tree Search) agent.
//!
//! Plays the move chosen by a UCT search with uniformly random playouts. The
//! tree is rebuilt for every move; nothing carries over between calls.
//!
//! # Algorithm
//!
//! 1. **Selection**: Traverse the tree using UCT (Upper Confidence Bound for Trees)
//! 2. **Expansion**: Try every child of a node once before UCT picks among them
//! 3. **Simulation**: Random moves until the game ends
//! 4. **Backpropagation**: Update node statistics back up the tree
//!
//! The think limit's first value is the number of simulations, the node limit
//! caps the tree size.

use super::ai::{mcts_search, MctsConfig, MctsResult};
use super::{Agent, ThinkLimit};
use crate::game_repr::{GameState, Move, Position};
use log::Level;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// MCTS AI agent
pub struct MctsAgent {
    config: MctsConfig,
    limit: ThinkLimit,
    rng: StdRng,
    silent: bool,
    name: String,
    last_result: Option<MctsResult>,
}

impl MctsAgent {
    pub fn new(config: MctsConfig) -> Self {
        Self {
            config,
            limit: ThinkLimit::default(),
            rng: StdRng::from_entropy(),
            silent: false,
            name: "MCTS".to_string(),
            last_result: None,
        }
    }

    /// Seeded agent for reproducible games.
    pub fn with_seed(config: MctsConfig, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            ..Self::new(config)
        }
    }

    /// Statistics of the most recent search.
    pub fn last_result(&self) -> Option<&MctsResult> {
        self.last_result.as_ref()
    }
}

impl Default for MctsAgent {
    fn default() -> Self {
        Self::new(MctsConfig::default())
    }
}

impl Agent for MctsAgent {
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

        let mut search_pos = *pos;
        let result = mcts_search(&mut search_pos, &self.config, &self.limit, &mut self.rng);
        debug_assert_eq!(&search_pos, pos);

        let level = if self.silent { Level::Debug } else { Level::Info };
        log::log!(
            level,
            "\t{} simulations, {} nodes, {} ms",
            result.simulations,
            result.tree_size,
            result.time_ms
        );
        for child in &result.children {
            log::log!(level, "\t{} {:7} {:+.3}", child.mv, child.visits, child.mean);
        }

        let best = result.best_move;
        self.last_result = Some(result);
        best
    }

    fn name(&self) -> &str {
        &self.name
    }
}

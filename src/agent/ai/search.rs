// Iterative Deepening Search Orchestrator
//
// Searches depth 1, 2, 3, ... up to the depth limit, seeding each pass with
// the previous pass's best move. Only completed passes count: once a node or
// time limit aborts a pass, the answer is the PV of the last finished depth.

use super::negamax::Searcher;
use super::transposition_table::{TranspositionTable, DEFAULT_TT_ENTRIES};
use crate::agent::ThinkLimit;
use crate::game_repr::{GameState, Move, WIN_VALUE};
use log::Level;

/// Bigger than any evaluation; the root window is `[-INFINITY, INFINITY]`.
pub const INFINITY: i32 = 10_001;

/// Deepest iteration, also the size of the PV table.
pub const MAX_SEARCH_DEPTH: usize = 100;

/// Search switches, mainly for experiments and tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Slots in the transposition table
    pub tt_entries: usize,
    pub use_transposition_table: bool,
    pub use_quiescence: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            tt_entries: DEFAULT_TT_ENTRIES,
            use_transposition_table: true,
            use_quiescence: true,
        }
    }
}

/// Result of a search operation
#[derive(Debug, Clone, Default)]
pub struct SearchResult {
    /// Best move of the last completed depth
    pub best_move: Option<Move>,
    pub score: i32,
    /// Last depth searched to completion (0 if none)
    pub depth: usize,
    pub nodes_searched: u64,
    pub time_ms: u64,
    pub principal_variation: Vec<Move>,
    /// Whether a node or time limit cut the search short
    pub aborted: bool,
    /// Table probes that found the position
    pub tt_hits: u64,
    pub tt_misses: u64,
    /// Occupied table slots when the search ended
    pub tt_entries: usize,
}

impl SearchResult {
    /// Share of table probes that found the position (0.0 to 1.0)
    pub fn tt_hit_rate(&self) -> f64 {
        let total = self.tt_hits + self.tt_misses;
        if total == 0 {
            0.0
        } else {
            self.tt_hits as f64 / total as f64
        }
    }
}

/// Depth actually used for a `ThinkLimit::limit` value; 0 means no limit.
pub fn effective_depth(limit: u32) -> usize {
    match limit as usize {
        0 => MAX_SEARCH_DEPTH,
        d => d.min(MAX_SEARCH_DEPTH),
    }
}

/// Iterative deepening negamax over `state`
///
/// # Arguments
/// * `state` - Position to search, restored before returning
/// * `tt` - Table to use; cleared first, ignored when the config disables it
/// * `config` - Table and quiescence switches
/// * `limit` - Depth, node and time limits (0 = unlimited)
/// * `silent` - Log iterations at debug instead of info level
pub fn iterative_deepening<S: GameState>(
    state: &mut S,
    tt: &mut TranspositionTable,
    config: &SearchConfig,
    limit: &ThinkLimit,
    silent: bool,
) -> SearchResult {
    tt.clear();
    let table = config.use_transposition_table.then_some(&mut *tt);
    let mut searcher = Searcher::new(table, config.use_quiescence, limit);
    let mut result = SearchResult::default();
    let level = if silent { Level::Debug } else { Level::Info };

    let max_depth = effective_depth(limit.limit);
    let mut hint = None;

    for depth in 1..=max_depth {
        let score = searcher.negamax(state, 0, depth as i32, -INFINITY, INFINITY, hint);
        if searcher.abort {
            result.aborted = true;
            break;
        }

        result.best_move = searcher.pv.best_move();
        result.score = score;
        result.depth = depth;
        result.principal_variation = searcher.pv.line();
        hint = result.best_move;

        print_search_info(level, &result, searcher.nodes, searcher.elapsed_ms());

        // Nothing left to learn once the game is decided
        if score.abs() >= WIN_VALUE || state.is_terminal() {
            break;
        }
    }

    result.nodes_searched = searcher.nodes;
    result.time_ms = searcher.elapsed_ms();

    result.tt_hits = tt.hits;
    result.tt_misses = tt.misses;
    result.tt_entries = tt.len();
    print_table_info(level, &result, tt.capacity());
    result
}

fn print_search_info(level: Level, result: &SearchResult, nodes: u64, time_ms: u64) {
    let pv: Vec<String> = result.principal_variation.iter().map(|m| m.to_string()).collect();
    log::log!(
        level,
        "\t{:2} {:10} {:7} {:+6} {}",
        result.depth,
        nodes,
        time_ms,
        result.score,
        pv.join(" ")
    );
}

fn print_table_info(level: Level, result: &SearchResult, capacity: usize) {
    log::log!(
        level,
        "\ttt: {} hits, {} misses ({:.1}%), {}/{} slots used",
        result.tt_hits,
        result.tt_misses,
        result.tt_hit_rate() * 100.0,
        result.tt_entries,
        capacity
    );
}

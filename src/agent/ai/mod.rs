// Search-based agents
//
// Two independent searchers over any `GameState`:
// - Negamax with alpha-beta pruning, iterative deepening, a transposition
//   table, a triangular principal-variation table and capture-only quiescence
// - Monte Carlo Tree Search (UCT) with random playouts
//
// Both mutate the caller's state in place with make/retract and leave it
// exactly as they found it.

mod transposition_table;
mod principal_variation;
mod negamax;
mod quiescence;
mod search;
mod negamax_player;
mod mcts;

pub use negamax_player::{Difficulty, NegamaxAgent};

pub use mcts::{mcts_search, simulate, ChildStats, FinalMovePolicy, MctsConfig, MctsResult, MctsTree, NodeId};
pub use negamax::Searcher;
pub use principal_variation::PrincipalVariation;
pub use quiescence::MAX_QUIESCENCE_PLY;
pub use search::{effective_depth, iterative_deepening, SearchConfig, SearchResult, INFINITY, MAX_SEARCH_DEPTH};
pub use transposition_table::{Bound, TranspositionTable, TtEntry, DEFAULT_TT_ENTRIES};

// Negamax Search with Alpha-Beta Pruning
//
// One function serves both sides: every score is from the point of view of
// the side to move and is negated on the way back up. The search is
// fail-soft, so a returned value outside [alpha, beta] is still a valid
// bound and is stored as such in the transposition table.
//
// The searcher owns no position. It walks the caller's state through
// MoveGuard, which retracts each move when the guard goes out of scope, so an
// aborted search leaves the state exactly as it found it.
//
// Resource limits are polled only at leaves (terminal or horizon). Once a
// limit fires the abort flag is raised and every interior node stops after
// its current child returns.

use super::principal_variation::PrincipalVariation;
use super::search::INFINITY;
use super::transposition_table::{Bound, TranspositionTable};
use crate::agent::ThinkLimit;
use crate::game_repr::{GameState, Move, MoveGuard};
use std::time::Instant;

/// Nodes between two wall-clock samples.
const TIME_CHECK_INTERVAL: u64 = 1000;

/// State of one alpha-beta search, shared by every node of the tree
pub struct Searcher<'a> {
    tt: Option<&'a mut TranspositionTable>,
    pub(super) use_quiescence: bool,
    pub pv: PrincipalVariation,
    max_nodes: u64,
    max_time_ms: u64,
    started: Instant,
    next_time_check: u64,
    /// Nodes visited so far, quiescence nodes included
    pub nodes: u64,
    /// Raised once a node or time limit is reached
    pub abort: bool,
}

impl<'a> Searcher<'a> {
    /// `limit.limit` (the depth) is ignored here; the caller drives depth.
    pub fn new(tt: Option<&'a mut TranspositionTable>, use_quiescence: bool, limit: &ThinkLimit) -> Self {
        Self {
            tt,
            use_quiescence,
            pv: PrincipalVariation::new(),
            max_nodes: limit.max_nodes,
            max_time_ms: limit.max_time_ms,
            started: Instant::now(),
            next_time_check: 0,
            nodes: 0,
            abort: false,
        }
    }

    /// Whether a node or time limit has been reached. Zero limits never fire.
    /// The clock is only read once every `TIME_CHECK_INTERVAL` nodes.
    pub(super) fn reached_limit(&mut self) -> bool {
        if self.max_nodes > 0 && self.nodes >= self.max_nodes {
            return true;
        }
        if self.max_time_ms > 0 && self.nodes >= self.next_time_check {
            self.next_time_check = self.nodes + TIME_CHECK_INTERVAL;
            return self.started.elapsed().as_millis() as u64 >= self.max_time_ms;
        }
        false
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    /// Negamax search with alpha-beta pruning
    ///
    /// # Arguments
    ///
    /// * `state` - Position to search, restored before returning
    /// * `ply` - Distance from the root (indexes the PV table)
    /// * `depth` - Remaining depth; at 0 the horizon evaluation takes over
    /// * `alpha`, `beta` - Search window
    /// * `hint` - Move to try first; falls back to the table's best move
    ///
    /// # Returns
    ///
    /// Score for the side to move. Meaningless once `self.abort` is set.
    pub fn negamax<S: GameState>(
        &mut self,
        state: &mut S,
        ply: usize,
        depth: i32,
        mut alpha: i32,
        beta: i32,
        hint: Option<Move>,
    ) -> i32 {
        self.nodes += 1;
        self.pv.clear_ply(ply);

        let key = state.key();
        let mut tt_move = None;

        // The root always searches so the PV gets a move
        if let Some(tt) = self.tt.as_deref_mut() {
            if let Some(entry) = tt.probe(key) {
                if ply > 0 && entry.cutoff(depth, alpha, beta) {
                    return entry.score;
                }
                tt_move = entry.best_move;
            }
        }

        if state.is_terminal() {
            self.abort |= self.reached_limit();
            return state.evaluation();
        }

        if depth <= 0 {
            let score = if self.use_quiescence {
                self.quiescence(state, alpha, beta, 0)
            } else {
                state.evaluation()
            };
            if let Some(tt) = self.tt.as_deref_mut() {
                tt.put_leaf(key, score, alpha, beta);
            }
            self.abort |= self.reached_limit();
            return score;
        }

        let moves = state.generate_moves(hint.or(tt_move));
        if moves.is_empty() {
            // Cannot happen in Breakthrough: the leading piece can always step
            return state.evaluation();
        }

        let original_alpha = alpha;
        let mut best_score = -INFINITY;
        let mut best_move = None;

        for mv in moves {
            let score = {
                let mut child = MoveGuard::new(state, mv);
                -self.negamax(&mut *child, ply + 1, depth - 1, -beta, -alpha, None)
            };

            if self.abort {
                return best_score;
            }

            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }

            if score >= beta {
                if let Some(tt) = self.tt.as_deref_mut() {
                    tt.put(key, Bound::Lower, depth, score, Some(mv));
                }
                return score;
            }

            if score > alpha {
                alpha = score;
                self.pv.update(ply, mv);
            }
        }

        let bound = if alpha > original_alpha {
            Bound::Exact
        } else {
            Bound::Upper
        };
        if let Some(tt) = self.tt.as_deref_mut() {
            tt.put(key, bound, depth, best_score, best_move);
        }

        best_score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_repr::{Position, LOSS_VALUE, WIN_VALUE};

    fn unlimited() -> ThinkLimit {
        ThinkLimit::default()
    }

    #[test]
    fn test_depth_one_start_position() {
        let mut pos = Position::new();
        let before = pos;
        let mut searcher = Searcher::new(None, true, &unlimited());

        let score = searcher.negamax(&mut pos, 0, 1, -INFINITY, INFINITY, None);

        assert_eq!(score, 0);
        assert_eq!(pos, before);
        let best = searcher.pv.best_move().unwrap();
        assert!(pos.generate_moves(None).contains(&best));
    }

    #[test]
    fn test_finds_winning_capture() {
        let mut pos = Position::from_board(&format!("{}....b......w....{} 0", ".".repeat(24), ".".repeat(24))).unwrap();
        let mut tt = TranspositionTable::with_capacity(1024);
        let mut searcher = Searcher::new(Some(&mut tt), true, &unlimited());

        let score = searcher.negamax(&mut pos, 0, 2, -INFINITY, INFINITY, None);

        assert_eq!(score, WIN_VALUE);
        assert!(searcher.pv.best_move().unwrap().is_capture());
    }

    #[test]
    fn test_terminal_root_returns_evaluation() {
        let mut pos = Position::from_board(&format!("b.......{} 0", ".".repeat(56))).unwrap();
        let mut searcher = Searcher::new(None, true, &unlimited());

        assert_eq!(searcher.negamax(&mut pos, 0, 3, -INFINITY, INFINITY, None), LOSS_VALUE);
        assert_eq!(searcher.pv.best_move(), None);
    }

    #[test]
    fn test_node_limit_aborts_and_restores() {
        let mut pos = Position::new();
        let before = pos;
        let limit = ThinkLimit {
            max_nodes: 50,
            ..ThinkLimit::default()
        };
        let mut searcher = Searcher::new(None, true, &limit);

        searcher.negamax(&mut pos, 0, 6, -INFINITY, INFINITY, None);

        assert!(searcher.abort);
        assert_eq!(pos, before);
        // Stops shortly after the limit
        assert!(searcher.nodes < 200);
    }
}

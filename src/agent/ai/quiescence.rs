// Quiescence Search - Tactical Stability Extension
//
// Stopping the main search in the middle of an exchange misjudges the
// position: the side that just captured looks a piece up even when the
// recapture is forced. At the horizon the search keeps going over captures
// only, until neither side wants to capture any more.
//
// - Stand-pat: the static evaluation is a lower bound, since the side to move
//   may decline every capture
// - Captures only, no table probes, no PV bookkeeping
// - A ply cap bounds the recursion

use super::negamax::Searcher;
use crate::game_repr::{GameState, MoveGuard};

/// Maximum capture chain followed past the horizon. A capture removes a
/// piece, so a 64-square board can never need more.
pub const MAX_QUIESCENCE_PLY: u32 = 64;

impl Searcher<'_> {
    /// Fail-soft capture search from the horizon.
    ///
    /// Returns the stand-pat score raised by any capture that improves on it,
    /// from the point of view of the side to move.
    pub(super) fn quiescence<S: GameState>(&mut self, state: &mut S, mut alpha: i32, beta: i32, qply: u32) -> i32 {
        self.nodes += 1;

        let stand_pat = state.evaluation();
        if state.is_terminal() || qply >= MAX_QUIESCENCE_PLY {
            return stand_pat;
        }
        if stand_pat >= beta {
            return stand_pat;
        }

        let mut best_score = stand_pat;
        if stand_pat > alpha {
            alpha = stand_pat;
        }

        for mv in state.capture_moves(None) {
            let score = {
                let mut child = MoveGuard::new(state, mv);
                -self.quiescence(&mut *child, -beta, -alpha, qply + 1)
            };

            if score > best_score {
                best_score = score;
            }
            if score >= beta {
                return score;
            }
            if score > alpha {
                alpha = score;
            }
        }

        best_score
    }
}

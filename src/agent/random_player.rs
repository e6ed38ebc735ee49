use super::{Agent, ThinkLimit};
use crate::game_repr::{GameState, Move, Position};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Agent that picks uniformly among the legal moves. Ignores think limits.
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn set_silence(&mut self, _silent: bool) {}

    fn set_think_limit(&mut self, _limit: ThinkLimit) {}

    fn play_move(&mut self, pos: &Position) -> Option<Move> {
        if pos.is_terminal() {
            return None;
        }
        pos.generate_moves(None).choose(&mut self.rng).copied()
    }

    fn name(&self) -> &str {
        "Random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_games_finish() {
        let mut white = RandomAgent::with_seed(1);
        let mut black = RandomAgent::with_seed(2);
        let mut pos = Position::new();

        let mut plies = 0;
        while let Some(mv) = if plies % 2 == 0 { white.play_move(&pos) } else { black.play_move(&pos) } {
            assert!(pos.generate_moves(None).contains(&mv));
            pos.make(mv);
            plies += 1;
        }

        assert!(pos.is_terminal());
        assert!(plies > 0);
    }
}

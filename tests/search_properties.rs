//! Search correctness against brute force
//!
//! - Alpha-beta returns the exhaustive minimax value at a fixed depth
//! - The transposition table does not change root values
//! - Known positions get the expected move and score

use breakthrough_engine::agent::ai::{
    iterative_deepening, SearchConfig, Searcher, TranspositionTable, INFINITY, MAX_QUIESCENCE_PLY,
};
use breakthrough_engine::agent::{Agent, NegamaxAgent, ThinkLimit};
use breakthrough_engine::game_repr::{GameState, Move, Position, WIN_VALUE};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

fn depth_limit(depth: u32) -> ThinkLimit {
    ThinkLimit {
        limit: depth,
        ..ThinkLimit::default()
    }
}

/// Capture search without pruning.
fn reference_quiescence(pos: &mut Position, qply: u32) -> i32 {
    let stand_pat = pos.evaluation();
    if pos.is_terminal() || qply >= MAX_QUIESCENCE_PLY {
        return stand_pat;
    }
    let mut best = stand_pat;
    for mv in pos.capture_moves(None) {
        pos.make(mv);
        let score = -reference_quiescence(pos, qply + 1);
        pos.retract(mv);
        best = best.max(score);
    }
    best
}

/// Full-width negamax without pruning.
fn minimax(pos: &mut Position, depth: i32) -> i32 {
    if pos.is_terminal() {
        return pos.evaluation();
    }
    if depth == 0 {
        return reference_quiescence(pos, 0);
    }
    let moves = pos.generate_moves(None);
    if moves.is_empty() {
        return pos.evaluation();
    }
    let mut best = -INFINITY;
    for mv in moves {
        pos.make(mv);
        let score = -minimax(pos, depth - 1);
        pos.retract(mv);
        best = best.max(score);
    }
    best
}

fn alpha_beta(pos: &mut Position, depth: i32) -> i32 {
    let mut searcher = Searcher::new(None, true, &ThinkLimit::default());
    searcher.negamax(pos, 0, depth, -INFINITY, INFINITY, None)
}

/// Positions reached by random play, excluding finished games.
fn random_positions(seed: u64, count: usize, max_plies: usize) -> Vec<Position> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut positions = Vec::with_capacity(count);
    while positions.len() < count {
        let mut pos = Position::new();
        let plies = rng.gen_range(max_plies / 2..=max_plies);
        for _ in 0..plies {
            let moves = pos.generate_moves(None);
            let Some(&mv) = moves.choose(&mut rng) else {
                break;
            };
            pos.make(mv);
            if pos.is_terminal() {
                pos.retract(mv);
                break;
            }
        }
        positions.push(pos);
    }
    positions
}

// ==== ALPHA-BETA AGAINST MINIMAX ====

#[test]
fn test_alpha_beta_matches_minimax_from_start() {
    for depth in 1..=3 {
        let mut pos = Position::new();
        assert_eq!(alpha_beta(&mut pos, depth), minimax(&mut pos, depth), "depth {depth}");
    }
}

#[test]
fn test_alpha_beta_matches_minimax_on_random_positions() {
    for (i, mut pos) in random_positions(0xb7, 6, 16).into_iter().enumerate() {
        let before = pos;
        for depth in 1..=3 {
            let expected = minimax(&mut pos, depth);
            let actual = alpha_beta(&mut pos, depth);
            assert_eq!(actual, expected, "position {i} ({pos}) depth {depth}");
            assert_eq!(pos, before);
        }
    }
}

#[test]
fn test_alpha_beta_without_quiescence_matches_plain_minimax() {
    fn plain(pos: &mut Position, depth: i32) -> i32 {
        if pos.is_terminal() || depth == 0 {
            return pos.evaluation();
        }
        let mut best = -INFINITY;
        for mv in pos.generate_moves(None) {
            pos.make(mv);
            best = best.max(-plain(pos, depth - 1));
            pos.retract(mv);
        }
        best
    }

    for mut pos in random_positions(0x5eed, 8, 24) {
        let mut searcher = Searcher::new(None, false, &ThinkLimit::default());
        let actual = searcher.negamax(&mut pos, 0, 3, -INFINITY, INFINITY, None);
        assert_eq!(actual, plain(&mut pos, 3), "{pos}");
    }
}

// ==== TRANSPOSITION TABLE ====

#[test]
fn test_table_does_not_change_root_value() {
    let with_table = SearchConfig::default();
    let without_table = SearchConfig {
        use_transposition_table: false,
        ..SearchConfig::default()
    };
    let mut tt = TranspositionTable::with_capacity(1 << 16);

    for depth in 1..=4 {
        let mut pos = Position::new();
        let a = iterative_deepening(&mut pos, &mut tt, &with_table, &depth_limit(depth), true);
        let b = iterative_deepening(&mut pos, &mut tt, &without_table, &depth_limit(depth), true);

        assert_eq!(a.depth, depth as usize);
        assert_eq!(a.score, b.score, "depth {depth}");
        assert_eq!(pos, Position::new());
    }
}

#[test]
fn test_table_does_not_change_value_in_tactical_positions() {
    let with_table = SearchConfig::default();
    let without_table = SearchConfig {
        use_transposition_table: false,
        ..SearchConfig::default()
    };
    let mut tt = TranspositionTable::with_capacity(1 << 16);

    let positions = random_positions(0x7ab1e, 20, 40);
    assert!(positions.iter().any(|p| !p.capture_moves(None).is_empty()));

    for (i, pos) in positions.into_iter().enumerate() {
        for depth in 1..=3 {
            let mut search_pos = pos;
            let a = iterative_deepening(&mut search_pos, &mut tt, &with_table, &depth_limit(depth), true);
            let b = iterative_deepening(&mut search_pos, &mut tt, &without_table, &depth_limit(depth), true);

            assert_eq!(a.score, b.score, "position {i} ({pos}) depth {depth}");
            assert_eq!(search_pos, pos);
        }
    }
}

#[test]
fn test_table_gets_hits_on_transpositions() {
    let mut tt = TranspositionTable::with_capacity(1 << 16);
    let mut pos = Position::new();

    iterative_deepening(&mut pos, &mut tt, &SearchConfig::default(), &depth_limit(4), true);

    assert!(tt.hits > 0);
    assert!(!tt.is_empty());
}

// ==== KNOWN POSITIONS ====

#[test]
fn test_start_position_depth_one() {
    let mut pos = Position::new();
    let mut tt = TranspositionTable::with_capacity(1 << 12);

    let result = iterative_deepening(&mut pos, &mut tt, &SearchConfig::default(), &depth_limit(1), true);

    assert_eq!(result.score, pos.evaluation());
    assert_eq!(result.score, 0);
    let best = result.best_move.unwrap();
    let legal = pos.generate_moves(None);
    assert_eq!(legal.len(), 22);
    assert!(legal.contains(&best));
}

#[test]
fn test_single_pieces_capture_wins() {
    // White d4, black e5, white to move
    let board = format!("{}....b......w....{} 0", ".".repeat(24), ".".repeat(24));
    let pos = Position::from_board(&board).unwrap();
    let capture: Move = "d4xe5".parse().unwrap();

    for depth in 1..=4 {
        let mut search_pos = pos;
        let mut tt = TranspositionTable::with_capacity(1 << 12);
        let result = iterative_deepening(&mut search_pos, &mut tt, &SearchConfig::default(), &depth_limit(depth), true);

        assert_eq!(result.best_move, Some(capture));
        assert_eq!(result.score, WIN_VALUE);
        assert_eq!(result.depth, 1);
    }
}

#[test]
fn test_black_to_move_captures_first() {
    // Same pieces, black to move
    let board = format!("{}....b......w....{} 1", ".".repeat(24), ".".repeat(24));
    let mut pos = Position::from_board(&board).unwrap();
    let mut tt = TranspositionTable::with_capacity(1 << 12);

    let result = iterative_deepening(&mut pos, &mut tt, &SearchConfig::default(), &depth_limit(3), true);

    assert_eq!(result.best_move, Some("e5xd4".parse().unwrap()));
    assert_eq!(result.score, WIN_VALUE);
}

// ==== LIMITS ====

#[test]
fn test_node_limit_keeps_last_completed_depth() {
    let mut pos = Position::new();
    let mut tt = TranspositionTable::with_capacity(1 << 16);
    let limit = ThinkLimit {
        limit: 0,
        max_nodes: 20_000,
        max_time_ms: 0,
    };

    let result = iterative_deepening(&mut pos, &mut tt, &SearchConfig::default(), &limit, true);

    assert!(result.aborted);
    assert!(result.depth >= 1);
    assert!(pos.generate_moves(None).contains(&result.best_move.unwrap()));
    assert_eq!(result.principal_variation.first(), result.best_move.as_ref());
    assert_eq!(pos, Position::new());
}

#[test]
fn test_time_limit_returns_promptly() {
    let mut agent = NegamaxAgent::new();
    agent.set_silence(true);
    agent.set_think_limit(ThinkLimit {
        limit: 0,
        max_nodes: 0,
        max_time_ms: 100,
    });

    let started = std::time::Instant::now();
    let mv = agent.play_move(&Position::new());

    assert!(mv.is_some());
    assert!(started.elapsed().as_millis() < 2000);
}

#[test]
fn test_agent_game_stays_legal() {
    let mut white = NegamaxAgent::new().with_seed(1);
    let mut black = NegamaxAgent::new().with_seed(2);
    for agent in [&mut white, &mut black] {
        agent.set_silence(true);
        agent.set_think_limit(depth_limit(2));
    }

    let mut pos = Position::new();
    let mut plies = 0;
    while !pos.is_terminal() && plies < 300 {
        let agent = if plies % 2 == 0 { &mut white } else { &mut black };
        let mv = agent.play_move(&pos).unwrap();
        assert!(pos.generate_moves(None).contains(&mv));
        pos.make(mv);
        plies += 1;
    }

    assert!(pos.is_terminal());
}

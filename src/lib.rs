//! Breakthrough engine: bitboard position, alpha-beta and MCTS agents.
//!
//! The `game_repr` module holds the board representation and move codec, the
//! `agent` module holds the searchers and the `Agent` trait that drives them.

pub mod agent;
pub mod game_repr;

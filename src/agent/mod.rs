pub mod agent;
pub use agent::*;

pub mod ai;
pub use ai::{Difficulty, MctsConfig, NegamaxAgent, SearchConfig};

pub mod mcts_player;
pub use mcts_player::MctsAgent;

pub mod random_player;
pub use random_player::RandomAgent;

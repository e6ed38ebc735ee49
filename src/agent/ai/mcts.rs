// Monte Carlo Tree Search (UCT) with uniformly random playouts
//
// Every iteration walks one path from the root on the caller's state:
//   1. selection/expansion: descend by UCT until a node still has children
//      that were never tried, then step into the next one of those
//   2. simulation: random moves until the game ends, then undo them
//   3. backpropagation: add the result to every node on the path, flipping
//      its sign at each level
// and finally retracts the path, so the state is unchanged between iterations.
//
// Nodes live in an arena and refer to each other by index. The tree is built
// from scratch for every search.

use crate::agent::ThinkLimit;
use crate::game_repr::{GameState, Move, Outcome};
use rand::seq::SliceRandom;
use rand::Rng;
use std::time::Instant;

/// How the final move is picked among the root's children
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FinalMovePolicy {
    /// Most simulations; robust against noisy means
    #[default]
    MostVisited,
    /// Highest average result
    BestMean,
}

/// Configuration for the MCTS search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MctsConfig {
    /// Exploration constant C in `mean + C * sqrt(2 ln N / n)`
    pub exploration_constant: f64,
    pub final_move_policy: FinalMovePolicy,
    /// Simulations to run when the think limit sets no bound at all
    pub default_simulations: u32,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            exploration_constant: 1.0,
            final_move_policy: FinalMovePolicy::MostVisited,
            default_simulations: 10_000,
        }
    }
}

/// Index of a node in the tree arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeId(u32);

const ROOT: NodeId = NodeId(0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expansion {
    /// Children not generated yet
    Unvisited,
    /// Children generated; the ones from this index on were never tried
    Expanding(usize),
    /// Every child has at least one visit
    Expanded,
}

#[derive(Debug)]
struct MctsNode {
    /// Move from the parent, `None` for the root
    mv: Option<Move>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    expansion: Expansion,
    visits: u32,
    /// Sum of results, from the point of view of the player who made `mv`
    total_value: f64,
}

impl MctsNode {
    fn new(mv: Option<Move>, parent: Option<NodeId>) -> Self {
        Self {
            mv,
            parent,
            children: Vec::new(),
            expansion: Expansion::Unvisited,
            visits: 0,
            total_value: 0.0,
        }
    }

    #[inline]
    fn mean(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.total_value / self.visits as f64
        }
    }
}

/// Visit statistics of one root child
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChildStats {
    pub mv: Move,
    pub visits: u32,
    pub mean: f64,
}

/// Outcome of one MCTS search
#[derive(Debug, Clone, Default)]
pub struct MctsResult {
    pub best_move: Option<Move>,
    pub simulations: u64,
    pub tree_size: usize,
    pub time_ms: u64,
    /// Root children in move-generation-independent (shuffled) order
    pub children: Vec<ChildStats>,
}

/// MCTS tree with arena-based node storage.
pub struct MctsTree {
    nodes: Vec<MctsNode>,
    exploration_constant: f64,
}

impl MctsTree {
    pub fn new(exploration_constant: f64) -> Self {
        Self {
            nodes: vec![MctsNode::new(None, None)],
            exploration_constant,
        }
    }

    #[inline]
    fn get(&self, id: NodeId) -> &MctsNode {
        &self.nodes[id.0 as usize]
    }

    #[inline]
    fn get_mut(&mut self, id: NodeId) -> &mut MctsNode {
        &mut self.nodes[id.0 as usize]
    }

    fn allocate(&mut self, node: MctsNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Get the total number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the root exists from construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Generate one child per legal move in random order.
    fn generate_children<S: GameState, R: Rng>(&mut self, id: NodeId, state: &S, rng: &mut R) {
        let mut moves = state.generate_moves(None);
        moves.shuffle(rng);

        let children: Vec<NodeId> = moves
            .into_iter()
            .map(|mv| self.allocate(MctsNode::new(Some(mv), Some(id))))
            .collect();

        let node = self.get_mut(id);
        node.expansion = if children.is_empty() {
            Expansion::Expanded
        } else {
            Expansion::Expanding(0)
        };
        node.children = children;
    }

    /// UCT child of a fully expanded node. First maximum wins ties.
    fn select_child(&self, id: NodeId) -> Option<NodeId> {
        let node = self.get(id);
        let log_parent = (node.visits.max(1) as f64).ln();

        let mut best: Option<(NodeId, f64)> = None;
        for &child_id in &node.children {
            let child = self.get(child_id);
            debug_assert!(child.visits > 0, "expanded node with an untried child");
            let explore = (2.0 * log_parent / child.visits as f64).sqrt();
            let score = child.mean() + self.exploration_constant * explore;
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((child_id, score));
            }
        }
        best.map(|(child_id, _)| child_id)
    }

    /// Walk down from the root, making moves on `state`, and return the node
    /// the next simulation starts from.
    fn select_and_expand<S: GameState, R: Rng>(&mut self, state: &mut S, rng: &mut R) -> NodeId {
        let mut id = ROOT;
        loop {
            if state.is_terminal() {
                return id;
            }
            match self.get(id).expansion {
                Expansion::Unvisited => self.generate_children(id, state, rng),
                Expansion::Expanding(next) => {
                    let node = self.get_mut(id);
                    let child = node.children[next];
                    node.expansion = if next + 1 == node.children.len() {
                        Expansion::Expanded
                    } else {
                        Expansion::Expanding(next + 1)
                    };
                    if let Some(mv) = self.get(child).mv {
                        state.make(mv);
                    }
                    return child;
                }
                Expansion::Expanded => match self.select_child(id) {
                    Some(child) => {
                        if let Some(mv) = self.get(child).mv {
                            state.make(mv);
                        }
                        id = child;
                    }
                    // No legal moves in a live position: treat as a leaf
                    None => return id,
                },
            }
        }
    }

    /// Add `value` (for the player to move at `leaf`) up the path.
    fn backpropagate(&mut self, leaf: NodeId, value: f64) {
        // Each node stores results for the player who moved into it
        let mut value = -value;
        let mut current = Some(leaf);
        while let Some(id) = current {
            let node = self.get_mut(id);
            node.visits += 1;
            node.total_value += value;
            value = -value;
            current = node.parent;
        }
    }

    /// Undo the moves from the root down to `leaf`.
    fn retract_path<S: GameState>(&self, state: &mut S, leaf: NodeId) {
        let mut id = leaf;
        while let Some(parent) = self.get(id).parent {
            if let Some(mv) = self.get(id).mv {
                state.retract(mv);
            }
            id = parent;
        }
    }

    pub fn root_children(&self) -> Vec<ChildStats> {
        self.get(ROOT)
            .children
            .iter()
            .map(|&id| self.get(id))
            .filter_map(|child| {
                child.mv.map(|mv| ChildStats {
                    mv,
                    visits: child.visits,
                    mean: child.mean(),
                })
            })
            .collect()
    }

    pub fn best_move(&self, policy: FinalMovePolicy) -> Option<Move> {
        let children = self.root_children();
        let best = match policy {
            FinalMovePolicy::MostVisited => children.iter().max_by_key(|c| c.visits),
            FinalMovePolicy::BestMean => children
                .iter()
                .filter(|c| c.visits > 0)
                .max_by(|a, b| a.mean.total_cmp(&b.mean)),
        };
        best.map(|c| c.mv)
    }
}

/// Play random moves until the game ends, undo them, and score the end
/// position for the player to move at the start: +1 win, -1 loss.
pub fn simulate<S: GameState, R: Rng>(state: &mut S, rng: &mut R) -> f64 {
    let mover = state.side_to_move();
    let mut played = Vec::new();

    while !state.is_terminal() {
        let moves = state.generate_moves(None);
        let Some(&mv) = moves.choose(rng) else {
            break;
        };
        state.make(mv);
        played.push(mv);
    }

    let result = match state.result() {
        Outcome::Win => 1.0,
        Outcome::Loss => -1.0,
        Outcome::Unknown => 0.0,
    };
    let value = if state.side_to_move() == mover { result } else { -result };

    for mv in played.into_iter().rev() {
        state.retract(mv);
    }
    value
}

/// Run UCT from `state` until a limit fires
///
/// `limit.limit` caps simulations, `limit.max_nodes` the tree size and
/// `limit.max_time_ms` the wall clock. With all three at zero the search runs
/// `config.default_simulations` simulations. The state is restored on return.
pub fn mcts_search<S: GameState, R: Rng>(
    state: &mut S,
    config: &MctsConfig,
    limit: &ThinkLimit,
    rng: &mut R,
) -> MctsResult {
    let started = Instant::now();
    let mut tree = MctsTree::new(config.exploration_constant);

    let unlimited = limit.limit == 0 && limit.max_nodes == 0 && limit.max_time_ms == 0;
    let max_simulations = if unlimited {
        config.default_simulations as u64
    } else {
        limit.limit as u64
    };

    let mut simulations = 0u64;
    if !state.is_terminal() {
        loop {
            if max_simulations > 0 && simulations >= max_simulations {
                break;
            }
            if limit.max_nodes > 0 && tree.len() as u64 >= limit.max_nodes {
                break;
            }
            if limit.max_time_ms > 0 && started.elapsed().as_millis() as u64 >= limit.max_time_ms {
                break;
            }

            let leaf = tree.select_and_expand(state, rng);
            let value = simulate(state, rng);
            tree.backpropagate(leaf, value);
            tree.retract_path(state, leaf);
            simulations += 1;
        }
    }

    MctsResult {
        best_move: tree.best_move(config.final_move_policy),
        simulations,
        tree_size: tree.len(),
        time_ms: started.elapsed().as_millis() as u64,
        children: tree.root_children(),
    }
}

//! Monte-Carlo Tree Search Xiangqi Engine
//!
//! UCT selection with a distance-to-General bias for the searching side,
//! guided expansion, check/capture-biased playouts capped in length and
//! scored by the classical evaluator, and a most-visited final choice.

mod playout;
mod tree;

use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;
use xiangqi_core::{Board, Color, Engine, GameState, Move, SearchLimits, SearchResult, TimeControl};

pub use playout::{eval_to_result, playout, PlayoutParams};
pub use tree::{Node, NodeId, Tree, ROOT};

#[cfg(test)]
mod lib_tests;

/// Tunables of the tree search.
#[derive(Debug, Clone, Copy)]
pub struct MctsParams {
    /// UCT exploration constant C
    pub exploration: f64,
    /// Weight k of the Manhattan-distance term in UCT
    pub distance_weight: f64,
    pub playout: PlayoutParams,
}

impl Default for MctsParams {
    fn default() -> Self {
        Self {
            exploration: 1.41,
            distance_weight: 0.1,
            playout: PlayoutParams::default(),
        }
    }
}

/// Result of one tree search.
#[derive(Debug, Clone, Copy)]
pub struct MctsOutcome {
    pub best_move: Option<Move>,
    /// Win rate of the chosen move for the searching side
    pub win_rate: f64,
    pub iterations: u64,
    /// Deepest selection path seen
    pub depth: u32,
}

/// Runs select / expand / playout / backpropagate until the clock or the
/// iteration cap stops it. At least one iteration always runs, so a side
/// with legal moves always gets one back.
pub fn search_tree(
    board: &Board,
    to_move: Color,
    params: &MctsParams,
    tc: &TimeControl,
    max_iterations: Option<u64>,
    rng: &mut StdRng,
) -> MctsOutcome {
    let mut tree = Tree::new(board.clone(), to_move);
    let mut outcome = MctsOutcome {
        best_move: None,
        win_rate: 0.0,
        iterations: 0,
        depth: 0,
    };
    if tree.node(ROOT).untried.is_empty() {
        return outcome;
    }

    loop {
        let (leaf, depth) = tree.select(params.exploration, params.distance_weight);
        let child = tree.expand(leaf, rng);
        let node = tree.node(child);
        let result = playout(&node.board, node.to_move, to_move, params.playout, rng);
        tree.backpropagate(child, result);

        outcome.iterations += 1;
        outcome.depth = outcome.depth.max(depth + 1);
        if max_iterations.is_some_and(|cap| outcome.iterations >= cap) || tc.check_time() {
            break;
        }
    }

    if let Some((mv, node)) = tree.most_visited() {
        outcome.best_move = Some(mv);
        outcome.win_rate = node.wins / node.visits.max(1) as f64;
    }
    debug!(
        iterations = outcome.iterations,
        nodes = tree.len(),
        depth = outcome.depth,
        win_rate = outcome.win_rate,
        "tree search finished"
    );
    outcome
}

/// Most-visited move for `to_move` after searching for `time_budget`.
pub fn get_best_move(
    board: &Board,
    to_move: Color,
    time_budget: Duration,
    params: &MctsParams,
) -> Option<Move> {
    let tc = TimeControl::started(Some(time_budget));
    let mut rng = StdRng::from_entropy();
    search_tree(board, to_move, params, &tc, None, &mut rng).best_move
}

/// Engine wrapper around [`search_tree`].
#[derive(Debug, Clone)]
pub struct MctsEngine {
    params: MctsParams,
    rng: StdRng,
    iterations: u64,
}

impl Default for MctsEngine {
    fn default() -> Self {
        Self::new(MctsParams::default())
    }
}

impl MctsEngine {
    pub fn new(params: MctsParams) -> Self {
        Self {
            params,
            rng: StdRng::from_entropy(),
            iterations: 0,
        }
    }

    pub fn with_seed(params: MctsParams, seed: u64) -> Self {
        Self {
            params,
            rng: StdRng::seed_from_u64(seed),
            iterations: 0,
        }
    }

    pub fn params(&self) -> &MctsParams {
        &self.params
    }

    /// Iterations run by the last search.
    pub fn iterations(&self) -> u64 {
        self.iterations
    }
}

impl Engine for MctsEngine {
    fn search(&mut self, state: &GameState, limits: SearchLimits) -> SearchResult {
        limits.start();
        let outcome = search_tree(
            &state.board,
            state.side_to_move,
            &self.params,
            &limits.time_control,
            limits.nodes,
            &mut self.rng,
        );
        self.iterations = outcome.iterations;

        SearchResult {
            best_move: outcome.best_move,
            score: (outcome.win_rate * 1000.0) as i32,
            depth: outcome.depth.min(u8::MAX as u32) as u8,
            nodes: outcome.iterations,
            stopped: limits.time_control.is_stopped(),
        }
    }

    fn name(&self) -> &str {
        "MCTS v1.0"
    }

    fn new_game(&mut self) {
        self.iterations = 0;
    }

    fn set_option(&mut self, name: &str, value: &str) -> bool {
        match name {
            "Exploration" => match value.parse::<f64>() {
                Ok(c) if c.is_finite() && c >= 0.0 => {
                    self.params.exploration = c;
                    true
                }
                _ => false,
            },
            "Seed" => match value.parse() {
                Ok(seed) => {
                    self.rng = StdRng::seed_from_u64(seed);
                    true
                }
                Err(_) => false,
            },
            _ => false,
        }
    }
}

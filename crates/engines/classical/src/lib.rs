//! Classical Xiangqi Engine
//!
//! The hand-tuned position evaluator shared by every search strategy, and
//! an alpha-beta searcher built on it.

mod eval;
mod pst;
mod search;

use tracing::debug;
use xiangqi_core::{Engine, GameState, SearchLimits, SearchResult};

pub use eval::{
    evaluate, evaluate_breakdown, game_phase, king_safety, mobility, piece_safety, piece_value,
    structure, EvalBreakdown, CHECKMATE_SCORE, CHECK_BONUS,
};
pub use search::{move_order_score, order_root_moves, pick_best_move, SearchOutcome, MATE_SCORE};

/// Alpha-beta engine.
///
/// This engine uses:
/// - Iterative-deepening negamax with alpha-beta pruning
/// - Forcing-first move ordering at the root
/// - The full positional evaluator at the leaves
/// - Time control support for move time limits
#[derive(Debug, Clone, Default)]
pub struct ClassicalEngine {
    /// Node counter for statistics
    nodes: u64,
}

impl ClassicalEngine {
    pub fn new() -> Self {
        Self { nodes: 0 }
    }
}

impl Engine for ClassicalEngine {
    fn search(&mut self, state: &GameState, limits: SearchLimits) -> SearchResult {
        self.nodes = 0;
        limits.start();

        let outcome = pick_best_move(state, limits.depth, &mut self.nodes, &limits.time_control);
        debug!(
            depth = outcome.depth,
            nodes = self.nodes,
            stopped = outcome.stopped,
            "alpha-beta search finished"
        );

        SearchResult {
            best_move: outcome.best_move.map(|(mv, _)| mv),
            score: outcome.best_move.map(|(_, s)| s).unwrap_or(0),
            depth: outcome.depth,
            nodes: self.nodes,
            stopped: outcome.stopped,
        }
    }

    fn name(&self) -> &str {
        "Classical v1.0"
    }

    fn new_game(&mut self) {
        self.nodes = 0;
    }
}

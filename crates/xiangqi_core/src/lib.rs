pub mod attacks;
pub mod board;
pub mod error;
pub mod game;
pub mod movegen;
pub mod perft;
pub mod time_control;
pub mod types;
pub mod validate;
pub mod zobrist;

// Re-export core game logic (not engine-specific)
pub use attacks::*;
pub use board::*;
pub use error::*;
pub use game::*;
pub use movegen::*;
pub use perft::perft;
pub use time_control::*;
pub use types::*;
pub use validate::*;
pub use zobrist::ZOBRIST;

// =============================================================================
// Engine trait, implemented by every move chooser
// =============================================================================

/// Result of a search operation
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The best move found (None if no legal moves)
    pub best_move: Option<Move>,
    /// Evaluation score from the engine's perspective
    pub score: i32,
    /// Search depth reached
    pub depth: u8,
    /// Number of nodes searched (iterations for tree search)
    pub nodes: u64,
    /// Whether search was stopped early due to time limit
    pub stopped: bool,
}

impl SearchResult {
    /// A result for a side that has no legal move.
    pub fn no_move() -> Self {
        Self {
            best_move: None,
            score: 0,
            depth: 0,
            nodes: 0,
            stopped: false,
        }
    }
}

/// Trait that all Xiangqi engines implement.
///
/// This allows swapping between tree search, alpha-beta and the random
/// fallback behind one orchestrator.
pub trait Engine: Send {
    /// Search the position with the given search limits.
    ///
    /// # Arguments
    /// * `state` - The position to analyze; the side to move is the searcher
    /// * `limits` - Search limits (depth, nodes, time)
    ///
    /// # Returns
    /// SearchResult containing best move, score, and statistics
    fn search(&mut self, state: &GameState, limits: SearchLimits) -> SearchResult;

    /// Returns the engine's name for identification
    fn name(&self) -> &str;

    /// Returns the engine's author for identification
    fn author(&self) -> &str {
        "xiangqi"
    }

    /// Reset internal state for a new game (clear tables, trees, etc.)
    fn new_game(&mut self) {}

    /// Optional: Set an engine option. Returns true if the option was recognized.
    fn set_option(&mut self, _name: &str, _value: &str) -> bool {
        false
    }
}

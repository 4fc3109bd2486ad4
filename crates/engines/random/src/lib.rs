//! Random Move Xiangqi Engine
//!
//! Selects moves uniformly at random from all legal moves.
//! Useful for:
//! - The orchestrator's last-resort fallback when every search phase came up empty
//! - Baseline opponents in self-play
//! - Stress testing move generation

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use xiangqi_core::{legal_moves_into, Engine, GameState, Move, SearchLimits, SearchResult};


/// An engine that plays random legal moves.
///
/// No evaluation at all; with a seed the choice is reproducible.
#[derive(Debug, Clone)]
pub struct RandomEngine {
    nodes: u64,
    rng: StdRng,
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomEngine {
    pub fn new() -> Self {
        Self {
            nodes: 0,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            nodes: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Picks one legal move for the side to move, or None if it has none.
    pub fn pick(&mut self, state: &GameState) -> Option<Move> {
        let mut board = state.board.clone();
        let mut moves = Vec::with_capacity(64);
        legal_moves_into(&mut board, state.side_to_move, &mut moves);
        self.nodes = 1;
        moves.choose(&mut self.rng).copied()
    }
}

impl Engine for RandomEngine {
    fn search(&mut self, state: &GameState, _limits: SearchLimits) -> SearchResult {
        self.nodes = 0;
        let best_move = self.pick(state);

        SearchResult {
            best_move,
            score: 0,
            depth: 1,
            nodes: self.nodes,
            stopped: false,
        }
    }

    fn name(&self) -> &str {
        "Random v1.0"
    }

    fn new_game(&mut self) {
        self.nodes = 0;
    }

    fn set_option(&mut self, name: &str, value: &str) -> bool {
        match name {
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

//! Move selection under a time budget.
//!
//! Phases run in order, each bounded by its own sub-deadline carved out of
//! the total budget:
//! 1. in check: score every escape with the evaluator and keep the best;
//! 2. with an attacking piece left: mate in one, then mate in 2..=N when
//!    pieces stand close enough to the enemy General;
//! 3. the configured strategy (tree search or alpha-beta) with what is left;
//! 4. a random legal move if everything above came back empty.

use std::time::Duration;

use classical_engine::{evaluate, ClassicalEngine, CHECKMATE_SCORE};
use mcts_engine::MctsEngine;
use random_engine::RandomEngine;
use tracing::{debug, info, warn};
use xiangqi_core::{
    has_legal_move, is_in_check, legal_moves_into, Board, Color, Engine, GameState, Move,
    SearchLimits, SearchResult, TimeControl,
};

use crate::config::{SearchConfig, Strategy};
use crate::error::SearchTimedOut;
use crate::mate::{has_attacker, pieces_near_general, MateSearcher};

/// Which phase produced the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionSource {
    CheckEscape,
    ForcedMate,
    Mcts,
    AlphaBeta,
    Random,
    /// The side to move has no legal move.
    NoMove,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub mv: Option<Move>,
    pub source: DecisionSource,
    /// Whole forced line when `source` is `ForcedMate`, otherwise empty.
    pub line: Vec<Move>,
    /// Score reported by the deciding phase, from the mover's side.
    pub score: i32,
    /// Depth reached by the deciding phase: plies of a forced line, or the
    /// last finished iteration of a search.
    pub depth: u8,
    /// Positions the deciding phase visited.
    pub nodes: u64,
}

impl Decision {
    fn single(mv: Move, source: DecisionSource) -> Self {
        Self {
            mv: Some(mv),
            source,
            line: Vec::new(),
            score: 0,
            depth: 0,
            nodes: 0,
        }
    }

    fn no_move() -> Self {
        Self {
            mv: None,
            source: DecisionSource::NoMove,
            line: Vec::new(),
            score: 0,
            depth: 0,
            nodes: 0,
        }
    }

    fn with_stats(mut self, score: i32, depth: u8, nodes: u64) -> Self {
        self.score = score;
        self.depth = depth;
        self.nodes = nodes;
        self
    }
}

/// Picks a move for the side to move of `state` within
/// `config.total_time_ms`.
pub fn choose_move(state: &GameState, config: &SearchConfig) -> Decision {
    let total = TimeControl::started(Some(config.total_time()));
    XiangqiAi::new(config.clone()).decide(state, &total)
}

/// The full move chooser, reusable across moves of one game.
pub struct XiangqiAi {
    config: SearchConfig,
    mcts: MctsEngine,
    alpha_beta: ClassicalEngine,
    random: RandomEngine,
}

impl Default for XiangqiAi {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl XiangqiAi {
    pub fn new(config: SearchConfig) -> Self {
        let params = config.mcts_params();
        let (mcts, random) = match config.seed {
            Some(seed) => (
                MctsEngine::with_seed(params, seed),
                RandomEngine::with_seed(seed),
            ),
            None => (MctsEngine::new(params), RandomEngine::new()),
        };
        Self {
            config,
            mcts,
            alpha_beta: ClassicalEngine::new(),
            random,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Runs the phases against an already running total budget.
    pub fn decide(&mut self, state: &GameState, total: &TimeControl) -> Decision {
        let side = state.side_to_move;
        let mut board = state.board.clone();
        if !has_legal_move(&mut board, side) {
            info!(?side, "no legal move");
            return Decision::no_move();
        }

        if is_in_check(&board, side) {
            let tc = total.phase(self.config.check_escape_time());
            match best_escape(&board, side, &tc) {
                Some((mv, score, scored)) => {
                    info!(%mv, score, scored, "escaping check");
                    return Decision::single(mv, DecisionSource::CheckEscape)
                        .with_stats(score, 1, scored);
                }
                None => warn!("check escape phase ran out of time"),
            }
        }

        if has_attacker(&board, side) {
            let tc = total.phase(self.config.mate_time());
            let (found, nodes) = self.forced_mate(&board, side, &tc);
            if let Some(line) = found {
                info!(mv = %line[0], length = line.len(), nodes, "forced mate found");
                let first = line[0];
                let depth = line.len().min(u8::MAX as usize) as u8;
                return Decision {
                    line,
                    ..Decision::single(first, DecisionSource::ForcedMate)
                        .with_stats(CHECKMATE_SCORE, depth, nodes)
                };
            }
        }

        let remaining = total.remaining().unwrap_or(Duration::MAX);
        if !remaining.is_zero() {
            let tc = total.phase(remaining);
            let limits = SearchLimits::with_control(self.config.alpha_beta_depth, tc)
                .with_nodes(self.config.max_iterations);
            let (result, source) = match self.config.strategy {
                Strategy::Mcts => (self.mcts.search(state, limits), DecisionSource::Mcts),
                Strategy::AlphaBeta => (
                    self.alpha_beta.search(state, limits),
                    DecisionSource::AlphaBeta,
                ),
            };
            if let Some(mv) = result.best_move {
                info!(%mv, ?source, score = result.score, nodes = result.nodes, "search move");
                return Decision::single(mv, source).with_stats(
                    result.score,
                    result.depth,
                    result.nodes,
                );
            }
        }

        warn!("budget exhausted, falling back to a random move");
        match self.random.pick(state) {
            Some(mv) => Decision::single(mv, DecisionSource::Random),
            None => Decision::no_move(),
        }
    }

    /// Mate in one, then deeper mates while pieces are close to the enemy
    /// General. No line on timeout or when nothing is forced; the node
    /// count covers every depth tried.
    fn forced_mate(
        &self,
        board: &Board,
        side: Color,
        tc: &TimeControl,
    ) -> (Option<Vec<Move>>, u64) {
        let mut searcher = MateSearcher::new(tc.clone());
        for depth in 1..=self.config.max_mate_depth {
            if depth == 2 && pieces_near_general(board, side) == 0 {
                debug!("nothing close enough to the enemy general for deeper mates");
                break;
            }
            match searcher.find_mate_in_n(board, side, depth) {
                Ok(Some(line)) => return (Some(line), searcher.nodes()),
                Ok(None) => debug!(
                    depth,
                    nodes = searcher.nodes(),
                    table = searcher.table_len(),
                    "no forced mate"
                ),
                Err(SearchTimedOut) => {
                    debug!(depth, table = searcher.table_len(), "mate search timed out");
                    break;
                }
            }
        }
        (None, searcher.nodes())
    }
}

/// Highest-scoring legal move by the evaluator from `side`'s view, with its
/// score and how many moves were scored. Stops early when `tc` expires,
/// keeping what was scored so far.
fn best_escape(board: &Board, side: Color, tc: &TimeControl) -> Option<(Move, i32, u64)> {
    let mut scratch = board.clone();
    let mut moves = Vec::with_capacity(16);
    legal_moves_into(&mut scratch, side, &mut moves);

    let mut best: Option<(Move, i32)> = None;
    let mut scored = 0;
    for mv in moves {
        if tc.check_time() {
            break;
        }
        let score = {
            let trial = scratch.play(mv);
            evaluate(&trial, side)
        };
        scored += 1;
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((mv, score));
        }
    }
    best.map(|(mv, score)| (mv, score, scored))
}

impl Engine for XiangqiAi {
    fn search(&mut self, state: &GameState, limits: SearchLimits) -> SearchResult {
        let total = match limits.move_time {
            Some(_) => limits.time_control.clone(),
            None => TimeControl::new(Some(self.config.total_time())),
        };
        if !total.is_started() {
            total.start();
        }
        let decision = self.decide(state, &total);

        SearchResult {
            best_move: decision.mv,
            score: decision.score,
            depth: decision.depth,
            nodes: decision.nodes,
            stopped: total.is_stopped(),
        }
    }

    fn name(&self) -> &str {
        "Xiangqi AI v1.0"
    }

    fn new_game(&mut self) {
        self.mcts.new_game();
        self.alpha_beta.new_game();
        self.random.new_game();
    }

    fn set_option(&mut self, name: &str, value: &str) -> bool {
        if !self.config.set_option(name, value) {
            return false;
        }
        match name {
            "Exploration" => self.mcts.set_option(name, value),
            "Seed" => self.mcts.set_option(name, value) && self.random.set_option(name, value),
            _ => true,
        }
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod orchestrator_tests;

//! Guided random playouts.

use classical_engine::evaluate;
use rand::seq::SliceRandom;
use rand::Rng;
use xiangqi_core::{has_legal_move, is_in_check, legal_moves_into, Board, Color};

/// Score of a quiet move is raised by these when it checks or captures.
const CHECK_SCORE: i32 = 100;
const CAPTURE_SCORE: i32 = 50;

/// Evaluations beyond this margin count as decided.
const DECISIVE_EVAL: i32 = 1_000;

#[derive(Debug, Clone, Copy)]
pub struct PlayoutParams {
    pub max_plies: u32,
    /// Chance of picking among the best-scored (checking/capturing) moves
    /// rather than any legal move.
    pub greedy_rate: f64,
}

impl Default for PlayoutParams {
    fn default() -> Self {
        Self {
            max_plies: 50,
            greedy_rate: 0.8,
        }
    }
}

/// Plays from `board` with `to_move` to move and returns the result for
/// `root`: 1.0 win, 0.0 loss, or an evaluation-based value in between when
/// the ply cap is reached first.
pub fn playout<R: Rng>(
    board: &Board,
    to_move: Color,
    root: Color,
    params: PlayoutParams,
    rng: &mut R,
) -> f64 {
    let mut board = board.clone();
    let mut color = to_move;
    let mut moves = Vec::with_capacity(64);
    let mut best = Vec::with_capacity(64);

    for _ in 0..params.max_plies {
        legal_moves_into(&mut board, color, &mut moves);
        if moves.is_empty() {
            return if color != root { 1.0 } else { 0.0 };
        }

        best.clear();
        let mut best_score = i32::MIN;
        for &mv in &moves {
            let mut score = 0;
            if board.piece_at(mv.to).is_some() {
                score += CAPTURE_SCORE;
            }
            let trial = board.play(mv);
            if is_in_check(&trial, color.other()) {
                score += CHECK_SCORE;
            }
            drop(trial);

            if score > best_score {
                best_score = score;
                best.clear();
            }
            if score == best_score {
                best.push(mv);
            }
        }

        let pool = if rng.gen_range(0.0..1.0) < params.greedy_rate {
            &best
        } else {
            &moves
        };
        let Some(&mv) = pool.choose(rng) else {
            break;
        };
        board.make_move(mv);

        if !has_legal_move(&mut board, color.other()) {
            return if color == root { 1.0 } else { 0.0 };
        }
        color = color.other();
    }

    eval_to_result(evaluate(&board, root))
}

/// Maps an evaluation for the root color onto [0, 1].
pub fn eval_to_result(score: i32) -> f64 {
    if score > DECISIVE_EVAL {
        1.0
    } else if score < -DECISIVE_EVAL {
        0.0
    } else {
        (score as f64 + 5_000.0) / 10_000.0
    }
}

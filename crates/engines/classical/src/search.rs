//! Iterative-deepening negamax with alpha-beta pruning

use xiangqi_core::{
    is_checkmate, is_in_check, legal_moves_into, pseudo_moves_from, Board, Color, GameState, Move,
    PieceKind, TimeControl,
};

use crate::eval::{evaluate, piece_value};

/// Score of being mated at the root; mates further away score closer to zero.
pub const MATE_SCORE: i32 = 100_000;
const MAX_PLY: i32 = 64;

/// Result from pick_best_move indicating whether search completed or was stopped.
pub struct SearchOutcome {
    /// Best move of the deepest completed iteration (if any legal moves exist)
    pub best_move: Option<(Move, i32)>,
    /// Deepest fully searched depth
    pub depth: u8,
    /// True if search was stopped early due to time
    pub stopped: bool,
}

/// Searches the position and returns the best move with its score.
///
/// Runs depth 2, 3, ... up to `max_depth`, keeping the answer of the last
/// iteration that finished. If even the first iteration is cut short the
/// best-ordered move is returned with score 0.
///
/// # Arguments
/// * `state` - The position to search; the side to move is the searcher
/// * `max_depth` - Maximum search depth in plies
/// * `nodes` - Counter for nodes searched (for statistics)
/// * `tc` - Time control for aborting search when time expires
pub fn pick_best_move(
    state: &GameState,
    max_depth: u8,
    nodes: &mut u64,
    tc: &TimeControl,
) -> SearchOutcome {
    let mut tmp = state.clone();
    let side = tmp.side_to_move;
    let mut moves = Vec::with_capacity(64);
    legal_moves_into(&mut tmp.board, side, &mut moves);

    if moves.is_empty() {
        return SearchOutcome {
            best_move: None,
            depth: 0,
            stopped: false,
        };
    }
    order_root_moves(&mut tmp.board, side, &mut moves);

    let max_depth = max_depth.max(1);
    let mut best = None;
    let mut completed = 0;
    let mut stopped = false;

    for depth in max_depth.min(2)..=max_depth {
        let Some((mv, score)) = search_root(&mut tmp, &moves, depth, nodes, tc) else {
            stopped = true;
            break;
        };
        best = Some((mv, score));
        completed = depth;

        // Search the previous best first next time round.
        if let Some(pos) = moves.iter().position(|m| *m == mv) {
            moves[..=pos].rotate_right(1);
        }
        if score.abs() >= MATE_SCORE - MAX_PLY {
            break;
        }
    }

    SearchOutcome {
        best_move: best.or(Some((moves[0], 0))),
        depth: completed,
        stopped,
    }
}

/// One full-width iteration. None if time ran out before it finished.
fn search_root(
    state: &mut GameState,
    moves: &[Move],
    depth: u8,
    nodes: &mut u64,
    tc: &TimeControl,
) -> Option<(Move, i32)> {
    let mut alpha = -MATE_SCORE - 1;
    let beta = MATE_SCORE + 1;
    let mut best: Option<(Move, i32)> = None;

    for &mv in moves {
        // Check time before starting each root move
        if tc.check_time() {
            return None;
        }

        let undo = state.make_move(mv);
        *nodes += 1;
        let (score, stopped) = negamax(state, depth - 1, 1, -beta, -alpha, nodes, tc);
        state.unmake_move(mv, undo);

        if stopped {
            return None;
        }
        let score = -score;
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((mv, score));
        }
        alpha = alpha.max(score);
    }
    best
}

/// Recursive negamax search with alpha-beta pruning.
///
/// Returns (score, stopped) where stopped indicates if search was aborted due to time.
fn negamax(
    state: &mut GameState,
    depth: u8,
    ply: i32,
    mut alpha: i32,
    beta: i32,
    nodes: &mut u64,
    tc: &TimeControl,
) -> (i32, bool) {
    // Check time periodically
    if tc.should_check_time(*nodes) && tc.check_time() {
        return (0, true);
    }

    let side = state.side_to_move;
    let mut moves = Vec::with_capacity(64);
    legal_moves_into(&mut state.board, side, &mut moves);

    // No legal move is always a loss.
    if moves.is_empty() {
        return (-(MATE_SCORE - ply), false);
    }

    if depth == 0 {
        return (evaluate(&state.board, side), false);
    }

    // Captures of the most valuable piece first.
    moves.sort_by_cached_key(|m| {
        std::cmp::Reverse(state.board.piece_at(m.to).map_or(0, |pc| piece_value(pc.kind)))
    });

    let mut best = -MATE_SCORE - 1;
    for mv in moves {
        let undo = state.make_move(mv);
        *nodes += 1;

        let (score, stopped) = negamax(state, depth - 1, ply + 1, -beta, -alpha, nodes, tc);
        let score = -score;

        state.unmake_move(mv, undo);

        if stopped {
            return (best, true);
        }

        best = best.max(score);
        alpha = alpha.max(best);
        if alpha >= beta {
            break; // Beta cutoff
        }
    }

    (best, false)
}

/// Sorts root moves by how forcing and active they look, best first.
pub fn order_root_moves(board: &mut Board, mover: Color, moves: &mut [Move]) {
    moves.sort_by_cached_key(|&mv| std::cmp::Reverse(move_order_score(board, mover, mv)));
}

/// Mates and checks first (more so when the checked General has few
/// squares left), then captures by victim value, then central and
/// river-crossing development of Chariots, Horses and Cannons.
pub fn move_order_score(board: &mut Board, mover: Color, mv: Move) -> i32 {
    let Some(piece) = board.piece_at(mv.from) else {
        return 0;
    };
    let captured = board.piece_at(mv.to);
    let opponent = mover.other();
    let mut score = 0;

    {
        let trial = board.play(mv);
        if is_checkmate(&trial, opponent) {
            score += 10_000;
        } else if is_in_check(&trial, opponent) {
            score += 1_000 + (9 - general_steps(&trial, opponent)) * 100;
        }
    }

    if let Some(victim) = captured {
        score += piece_value(victim.kind) * 10;
    }

    if matches!(
        piece.kind,
        PieceKind::Chariot | PieceKind::Horse | PieceKind::Cannon
    ) {
        let col = xiangqi_core::col_of(mv.to);
        if (2..=6).contains(&col) {
            score += 30;
        }
        if !board.on_home_side(mover, mv.to) {
            score += 40;
        }
    }
    score
}

/// Squares the General of `color` could step to, ignoring check.
fn general_steps(board: &Board, color: Color) -> i32 {
    let Some(general) = board.general_sq(color) else {
        return 0;
    };
    let mut steps = Vec::with_capacity(4);
    pseudo_moves_from(board, general, &mut steps);
    steps.len() as i32
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;

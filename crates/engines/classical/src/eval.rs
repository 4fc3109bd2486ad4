//! Positional evaluation: material, piece-square tables, mobility, king
//! safety and defensive structure, combined with fixed weights.

use serde::Serialize;
use xiangqi_core::{
    col_of, find_generals, is_checkmate, is_in_check, is_pseudo_legal, legal_moves_into, row_of, sq,
    Board, Color, Move, Piece, PieceKind, ADVISOR_POINTS, ELEPHANT_POINTS, NUM_SQUARES,
};

use crate::pst::pst_value;

/// Material values, indexed by PieceKind::idx().
/// Order: General, Advisor, Elephant, Horse, Chariot, Cannon, Soldier
const PIECE_VALUES: [i32; 7] = [10_000, 200, 200, 400, 900, 450, 100];

const SOLDIER_CROSSED_BONUS_MG: f64 = 80.0;
const SOLDIER_CROSSED_BONUS_EG: f64 = 120.0;

/// Non-general material of both full armies.
const MAX_MATERIAL: i32 = 2 * (2 * 900 + 2 * 400 + 2 * 450 + 2 * 200 + 2 * 200 + 5 * 100);

const MATERIAL_WEIGHT: f64 = 1.0;
const PST_WEIGHT: f64 = 0.1;
const MOBILITY_WEIGHT: f64 = 0.05;
const KING_SAFETY_WEIGHT: f64 = 0.15;
const STRUCTURE_WEIGHT: f64 = 0.05;

pub const CHECK_BONUS: i32 = 200;
pub const CHECKMATE_SCORE: i32 = 50_000;
const MISSING_GENERAL: f64 = -10_000.0;

#[inline]
pub fn piece_value(kind: PieceKind) -> i32 {
    PIECE_VALUES[kind.idx()]
}

/// Per-component scores from one side's point of view.
///
/// Each component is already the difference between the two colors; the
/// weights are applied only when forming `total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct EvalBreakdown {
    pub phase: f64,
    pub material: f64,
    pub pst: i32,
    pub mobility: i32,
    pub king_safety: f64,
    pub structure: i32,
    /// Check bonus, or the checkmate score that replaces everything else.
    pub check: i32,
    pub total: i32,
}

/// Evaluates the board for `perspective`; positive favors it.
pub fn evaluate(board: &Board, perspective: Color) -> i32 {
    evaluate_breakdown(board, perspective).total
}

pub fn evaluate_breakdown(board: &Board, perspective: Color) -> EvalBreakdown {
    if let Some(breakdown) = missing_general(board, perspective) {
        return breakdown;
    }
    let opponent = perspective.other();
    let phase = game_phase(board);
    let soldier_bonus =
        SOLDIER_CROSSED_BONUS_MG + (SOLDIER_CROSSED_BONUS_EG - SOLDIER_CROSSED_BONUS_MG) * phase;

    let mut material = 0.0;
    let mut pst = 0;
    for (i, slot) in board.squares.iter().enumerate() {
        let Some(pc) = slot else { continue };
        let square = i as u8;
        let sign = if pc.color == perspective { 1 } else { -1 };

        let mut value = piece_value(pc.kind) as f64;
        if pc.kind == PieceKind::Soldier && !board.on_home_side(pc.color, square) {
            value += soldier_bonus;
        }
        material += sign as f64 * value;
        pst += sign * pst_value(pc.kind, board.relative_square(pc.color, square));
    }

    let mut scratch = board.clone();
    let mobility = mobility(&mut scratch, perspective) - mobility(&mut scratch, opponent);
    let king_safety = king_safety(board, perspective) - king_safety(board, opponent);
    let structure = structure(board, perspective) - structure(board, opponent);

    let weighted = material * MATERIAL_WEIGHT
        + pst as f64 * PST_WEIGHT
        + mobility as f64 * MOBILITY_WEIGHT
        + king_safety * KING_SAFETY_WEIGHT
        + structure as f64 * STRUCTURE_WEIGHT;

    let mut breakdown = EvalBreakdown {
        phase,
        material,
        pst,
        mobility,
        king_safety,
        structure,
        check: 0,
        total: weighted as i32,
    };

    if is_in_check(board, opponent) {
        if is_checkmate(board, opponent) {
            breakdown.check = CHECKMATE_SCORE;
            breakdown.total = CHECKMATE_SCORE;
            return breakdown;
        }
        breakdown.check += CHECK_BONUS;
    }
    if is_in_check(board, perspective) {
        if is_checkmate(board, perspective) {
            breakdown.check = -CHECKMATE_SCORE;
            breakdown.total = -CHECKMATE_SCORE;
            return breakdown;
        }
        breakdown.check -= CHECK_BONUS;
    }
    breakdown.total += breakdown.check;
    breakdown
}

/// A board that lost a General saturates: the side without one is lost.
/// With both gone nobody is ahead.
fn missing_general(board: &Board, perspective: Color) -> Option<EvalBreakdown> {
    let (red, black) = find_generals(board);
    let (own, enemy) = match perspective {
        Color::Red => (red, black),
        Color::Black => (black, red),
    };
    let score = match (own, enemy) {
        (Some(_), Some(_)) => return None,
        (None, Some(_)) => -CHECKMATE_SCORE,
        (Some(_), None) => CHECKMATE_SCORE,
        (None, None) => 0,
    };
    Some(EvalBreakdown {
        check: score,
        total: score,
        ..EvalBreakdown::default()
    })
}

/// 0.0 with full armies on the board, rising to 1.0 as material comes off.
pub fn game_phase(board: &Board) -> f64 {
    let material: i32 = board
        .squares
        .iter()
        .flatten()
        .filter(|pc| pc.kind != PieceKind::General)
        .map(|pc| piece_value(pc.kind))
        .sum();
    (1.0 - material as f64 / (MAX_MATERIAL as f64 * 0.7)).max(0.0)
}

/// Legal destinations summed over every piece of `color`.
pub fn mobility(board: &mut Board, color: Color) -> i32 {
    let mut moves = Vec::with_capacity(64);
    legal_moves_into(board, color, &mut moves);
    moves.len() as i32
}

/// Soldier shield in front of the General plus pressure on the squares
/// around it.
pub fn king_safety(board: &Board, color: Color) -> f64 {
    let Some(general) = board.general_sq(color) else {
        return MISSING_GENERAL;
    };
    let (row, col) = (row_of(general), col_of(general));
    let mut score = 0.0;

    let multiplier = if (3..=5).contains(&col) { 1.5 } else { 1.0 };
    if let Some(front) = sq(row + board.forward(color), col) {
        let shielded = board.piece_at(front) == Some(Piece::new(color, PieceKind::Soldier));
        let shield = if shielded { 5.0 } else { -30.0 };
        score += shield * multiplier;
    }

    let zone = attack_zone(row, col);
    let mut attackers = 0;
    let mut pressure = 0;
    for (from, pc) in board.pieces(color.other()) {
        let reaches = zone
            .iter()
            .enumerate()
            .any(|(to, &inside)| inside && is_pseudo_legal(board, Move::new(from, to as u8)));
        if reaches {
            attackers += 1;
            pressure += piece_value(pc.kind) / 10;
        }
    }
    match attackers {
        0 => {}
        1 => score -= (pressure / 2) as f64,
        _ => score -= pressure as f64,
    }
    score
}

/// The General's square and the eight directions at distance one and two.
fn attack_zone(row: i8, col: i8) -> [bool; NUM_SQUARES] {
    let mut zone = [false; NUM_SQUARES];
    for dr in -1..=1 {
        for dc in -1..=1 {
            for dist in 1..=2 {
                if let Some(s) = sq(row + dr * dist, col + dc * dist) {
                    zone[s as usize] = true;
                }
            }
        }
    }
    zone
}

/// Bonus for both Advisors, or both Elephants, standing on their points.
pub fn structure(board: &Board, color: Color) -> i32 {
    let placed = |kind: PieceKind| -> Vec<(i8, i8)> {
        board
            .pieces(color)
            .filter(|(_, pc)| pc.kind == kind)
            .map(|(s, _)| board.relative_square(color, s))
            .collect()
    };
    let mut score = 0;

    let advisors = placed(PieceKind::Advisor);
    if advisors.len() == 2 && advisors.iter().all(|p| ADVISOR_POINTS.contains(p)) {
        score += if advisors.contains(&(1, 4)) { 15 } else { 10 };
    }
    let elephants = placed(PieceKind::Elephant);
    if elephants.len() == 2 && elephants.iter().all(|p| ELEPHANT_POINTS.contains(p)) {
        score += 10;
    }
    score
}

/// How well the piece on `square` is covered: defenders help, attackers
/// (cheaper ones especially) hurt. Zero for an empty square.
pub fn piece_safety(board: &Board, square: u8) -> i32 {
    let Some(piece) = board.piece_at(square) else {
        return 0;
    };
    // Friendly pieces "capture" a stand-in of the other color to count as defenders.
    let mut stand_in = board.clone();
    stand_in.set_piece(square, Some(Piece::new(piece.color.other(), piece.kind)));

    let mut score = 0;
    let mut attackers = 0;
    let mut defenders = 0;
    for (i, slot) in board.squares.iter().enumerate() {
        let Some(other) = slot else { continue };
        let from = i as u8;
        if from == square {
            continue;
        }
        let mv = Move::new(from, square);
        if other.color != piece.color {
            if is_pseudo_legal(board, mv) {
                attackers += 1;
                if piece_value(other.kind) < piece_value(piece.kind) {
                    score -= 50;
                }
            }
        } else if is_pseudo_legal(&stand_in, mv) {
            defenders += 1;
            score += 20;
        }
    }

    if attackers > 0 && defenders == 0 {
        score -= 200;
    }
    if defenders > attackers {
        score += 100;
    }
    score
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;

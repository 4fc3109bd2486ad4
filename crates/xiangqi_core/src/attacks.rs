//! Check and checkmate detection.
//!
//! Attack detection reuses the per-piece movement rules of `movegen` but never
//! asks whether the attacker's own General would be exposed, so the two
//! modules do not recurse into each other.

use crate::{
    board::Board,
    movegen::{has_legal_move, is_pseudo_legal, pieces_between},
    types::*,
};

/// Locates both Generals as `(red, black)`.
pub fn find_generals(board: &Board) -> (Option<u8>, Option<u8>) {
    let mut red = None;
    let mut black = None;
    for (i, pc) in board.squares.iter().enumerate() {
        if let Some(pc) = pc
            && pc.kind == PieceKind::General
        {
            match pc.color {
                Color::Red => red = Some(i as u8),
                Color::Black => black = Some(i as u8),
            }
        }
    }
    (red, black)
}

/// Both Generals on one file with nothing between them.
pub fn generals_facing(board: &Board) -> bool {
    match find_generals(board) {
        (Some(red), Some(black)) => {
            col_of(red) == col_of(black) && pieces_between(board, red, black) == Some(0)
        }
        _ => false,
    }
}

/// Would the General on `from` face the other General after stepping to `to`?
/// Evaluated without touching the board: `from` counts as empty.
pub(crate) fn generals_facing_after(board: &Board, from: u8, to: u8) -> bool {
    let Some(mover) = board.piece_at(from) else {
        return false;
    };
    let Some(other) = board.general_sq(mover.color.other()) else {
        return false;
    };
    if col_of(to) != col_of(other) {
        return false;
    }
    let between = pieces_between(board, to, other).unwrap_or(0);
    let from_between = col_of(from) == col_of(to) && {
        let (lo, hi) = if row_of(to) < row_of(other) {
            (row_of(to), row_of(other))
        } else {
            (row_of(other), row_of(to))
        };
        (lo + 1..hi).contains(&row_of(from))
    };
    between == u32::from(from_between)
}

pub fn is_square_attacked(board: &Board, target: u8, by: Color) -> bool {
    board
        .pieces(by)
        .any(|(from, _)| is_pseudo_legal(board, Move::new(from, target)))
}

/// `color` is in check when its General is attacked, or when the two Generals
/// face each other (which puts both sides in check at once).
/// A board missing either General reports no check.
pub fn is_in_check(board: &Board, color: Color) -> bool {
    let (red, black) = find_generals(board);
    let (Some(red), Some(black)) = (red, black) else {
        return false;
    };
    if col_of(red) == col_of(black) && pieces_between(board, red, black) == Some(0) {
        return true;
    }
    match color {
        Color::Red => is_square_attacked(board, red, Color::Black),
        Color::Black => is_square_attacked(board, black, Color::Red),
    }
}

/// No legal move for `color`. There is no separate stalemate outcome.
pub fn is_checkmate(board: &Board, color: Color) -> bool {
    !has_legal_move(&mut board.clone(), color)
}

#[cfg(test)]
#[path = "attacks_tests.rs"]
mod attacks_tests;

//! Checks for manually placed positions before play resumes.

use crate::{
    attacks::is_in_check,
    board::Board,
    error::SetupError,
    types::*,
};

/// Points an Advisor may occupy, relative to its own baseline.
pub const ADVISOR_POINTS: [(i8, i8); 5] = [(0, 3), (0, 5), (1, 4), (2, 3), (2, 5)];
/// Points an Elephant may occupy, relative to its own baseline.
pub const ELEPHANT_POINTS: [(i8, i8); 7] = [(0, 2), (0, 6), (2, 0), (2, 4), (2, 8), (4, 2), (4, 6)];

/// Whether `piece` may stand on `square` at all.
pub fn is_valid_placement(board: &Board, piece: Piece, square: u8) -> bool {
    let rel = board.relative_square(piece.color, square);
    match piece.kind {
        PieceKind::General => board.in_palace(piece.color, square),
        PieceKind::Advisor => ADVISOR_POINTS.contains(&rel),
        PieceKind::Elephant => ELEPHANT_POINTS.contains(&rel),
        // Behind the river a soldier is still on its starting file.
        PieceKind::Soldier => {
            let (row, col) = rel;
            row >= 3 && !(row <= 4 && col % 2 == 1)
        }
        PieceKind::Horse | PieceKind::Chariot | PieceKind::Cannon => true,
    }
}

/// Rejects a custom setup with misplaced pieces, a wrong General count or a
/// side already in check.
pub fn check_custom_position(board: &Board) -> Result<(), SetupError> {
    for (i, pc) in board.squares.iter().enumerate() {
        if let Some(pc) = pc
            && !is_valid_placement(board, *pc, i as u8)
        {
            return Err(SetupError::Misplaced {
                piece: *pc,
                square: sq_to_coord(i as u8),
            });
        }
    }

    let count = |color: Color| {
        board
            .pieces(color)
            .filter(|(_, pc)| pc.kind == PieceKind::General)
            .count()
    };
    let (red, black) = (count(Color::Red), count(Color::Black));
    if red != 1 || black != 1 {
        return Err(SetupError::GeneralCount { red, black });
    }

    for color in Color::ALL {
        if is_in_check(board, color) {
            return Err(SetupError::InCheck(color));
        }
    }
    Ok(())
}

pub fn validate_custom_position(board: &Board) -> bool {
    check_custom_position(board).is_ok()
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod validate_tests;

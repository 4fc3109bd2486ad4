use super::*;
use crate::board::GameState;
use crate::types::{Move, PieceKind, sq};

#[test]
fn test_zobrist_keys_unique() {
    let mut seen = std::collections::HashSet::new();

    assert_eq!(ZOBRIST.piece_keys().len(), 2 * 7 * NUM_SQUARES);
    for &key in ZOBRIST.piece_keys() {
        assert!(seen.insert(key), "Duplicate Zobrist key found");
    }

    assert!(
        seen.insert(ZOBRIST.side_to_move),
        "Side to move key collision"
    );
}

#[test]
fn test_zobrist_piece_key() {
    let piece = Piece::new(Color::Red, PieceKind::Soldier);
    let key1 = ZOBRIST.piece_key(piece, 0);
    let key2 = ZOBRIST.piece_key(piece, 1);
    assert_ne!(key1, key2);
}

#[test]
fn test_hash_is_deterministic() {
    let board = Board::startpos();
    assert_eq!(
        ZOBRIST.hash(&board, Color::Red),
        ZOBRIST.hash(&board.clone(), Color::Red)
    );
    assert_ne!(
        ZOBRIST.hash(&board, Color::Red),
        ZOBRIST.hash(&board, Color::Black)
    );
}

#[test]
fn test_hash_differs_by_one_piece() {
    let a = Board::startpos();
    let mut b = a.clone();
    // Slide the left red cannon one file to the right.
    let from = sq(7, 1).unwrap();
    let to = sq(7, 2).unwrap();
    b.make_move(Move::new(from, to));
    assert_ne!(ZOBRIST.hash(&a, Color::Red), ZOBRIST.hash(&b, Color::Red));
}

#[test]
fn test_incremental_hash_matches_full_recompute() {
    let mut state = GameState::startpos();
    let start = state.hash();

    // Cannon takes the horse through the screen: a capture exercises every term.
    let capture = Move::new(sq(7, 1).unwrap(), sq(0, 1).unwrap());
    let undo = state.make_move(capture);
    assert_eq!(state.hash(), ZOBRIST.hash(&state.board, state.side_to_move));

    state.unmake_move(capture, undo);
    assert_eq!(state.hash(), start);
    assert_eq!(state.side_to_move, Color::Red);
}

use super::*;
use crate::board::GameState;

fn put(board: &mut Board, row: i8, col: i8, ch: char) {
    board.set_piece(sq(row, col).unwrap(), Piece::from_char(ch));
}

fn mv(from: (i8, i8), to: (i8, i8)) -> Move {
    Move::new(sq(from.0, from.1).unwrap(), sq(to.0, to.1).unwrap())
}

/// Every move the generator emits, and only those, passes the rule predicate.
fn assert_generator_matches_rules(board: &Board, color: Color) {
    let mut generated = Vec::new();
    pseudo_moves(board, color, &mut generated);
    generated.sort_by_key(|m| (m.from, m.to));

    let mut brute = Vec::new();
    for (from, _) in board.pieces(color) {
        for to in 0..NUM_SQUARES as u8 {
            let m = Move::new(from, to);
            if is_pseudo_legal(board, m) {
                brute.push(m);
            }
        }
    }
    brute.sort_by_key(|m| (m.from, m.to));
    assert_eq!(generated, brute);
}

#[test]
fn test_startpos_moves() {
    let board = Board::startpos();
    // Starting position has 44 legal moves for either side
    assert_eq!(legal_moves(&board, Color::Red).len(), 44);
    assert_eq!(legal_moves(&board, Color::Black).len(), 44);
}

#[test]
fn test_flipped_startpos_moves() {
    let board = Board::startpos().rotated();
    assert_eq!(legal_moves(&board, Color::Red).len(), 44);
    assert_eq!(legal_moves(&board, Color::Black).len(), 44);
}

#[test]
fn test_generator_agrees_with_rules() {
    let middlegame = GameState::from_fen(
        "r1bakab1r/9/1cn3nc1/p1p1p3p/6p2/2P6/P3P1P1P/1CN3NC1/9/R1BAKAB1R w",
    )
    .unwrap();
    for board in [Board::startpos(), Board::startpos().rotated(), middlegame.board] {
        assert_generator_matches_rules(&board, Color::Red);
        assert_generator_matches_rules(&board, Color::Black);
    }
}

#[test]
fn test_cannon_screen_rules() {
    let mut board = Board::empty(false);
    put(&mut board, 9, 0, 'C');
    put(&mut board, 0, 0, 'r');

    // Zero screens: quiet move fine, capture not.
    assert!(is_pseudo_legal(&board, mv((9, 0), (5, 0))));
    assert!(!is_pseudo_legal(&board, mv((9, 0), (0, 0))));

    // Exactly one screen: capture allowed, quiet move beyond it not.
    put(&mut board, 4, 0, 'p');
    assert!(is_pseudo_legal(&board, mv((9, 0), (0, 0))));
    assert!(!is_pseudo_legal(&board, mv((9, 0), (2, 0))));

    // Two screens: nothing beyond them.
    put(&mut board, 2, 0, 'P');
    assert!(!is_pseudo_legal(&board, mv((9, 0), (0, 0))));
    assert!(!is_pseudo_legal(&board, mv((9, 0), (1, 0))));
}

#[test]
fn test_chariot_path_must_be_clear() {
    let mut board = Board::empty(false);
    put(&mut board, 5, 4, 'R');
    put(&mut board, 5, 7, 'p');
    assert!(is_pseudo_legal(&board, mv((5, 4), (5, 7))));
    assert!(!is_pseudo_legal(&board, mv((5, 4), (5, 8))));
    assert!(!is_pseudo_legal(&board, mv((5, 4), (4, 5))));
}

#[test]
fn test_horse_leg_blocks() {
    let mut board = Board::empty(false);
    put(&mut board, 5, 4, 'N');
    assert!(is_pseudo_legal(&board, mv((5, 4), (3, 5))));
    assert!(is_pseudo_legal(&board, mv((5, 4), (6, 6))));

    put(&mut board, 4, 4, 'P');
    assert!(!is_pseudo_legal(&board, mv((5, 4), (3, 5))));
    assert!(!is_pseudo_legal(&board, mv((5, 4), (3, 3))));
    // The other jumps keep their own legs.
    assert!(is_pseudo_legal(&board, mv((5, 4), (6, 6))));
}

#[test]
fn test_elephant_eye_and_river() {
    let mut board = Board::empty(false);
    put(&mut board, 7, 4, 'B');
    assert!(is_pseudo_legal(&board, mv((7, 4), (5, 2))));
    put(&mut board, 6, 3, 'p');
    assert!(!is_pseudo_legal(&board, mv((7, 4), (5, 2))));

    put(&mut board, 5, 6, 'B');
    assert!(!is_pseudo_legal(&board, mv((5, 6), (3, 4))));
    assert!(!is_pseudo_legal(&board, mv((5, 6), (3, 8))));
}

#[test]
fn test_advisor_and_general_stay_in_palace() {
    let mut board = Board::empty(false);
    put(&mut board, 7, 3, 'A');
    put(&mut board, 9, 4, 'K');
    put(&mut board, 0, 3, 'k');
    assert!(is_pseudo_legal(&board, mv((7, 3), (8, 4))));
    assert!(!is_pseudo_legal(&board, mv((7, 3), (6, 2))));
    assert!(!is_pseudo_legal(&board, mv((7, 3), (7, 4))));

    assert!(is_pseudo_legal(&board, mv((9, 4), (8, 4))));
    assert!(!is_pseudo_legal(&board, mv((9, 4), (8, 3)))); // diagonal
    board.set_piece(sq(9, 4).unwrap(), None);
    put(&mut board, 9, 5, 'K');
    assert!(!is_pseudo_legal(&board, mv((9, 5), (9, 6)))); // leaves palace
}

#[test]
fn test_general_cannot_face_general() {
    let mut board = Board::empty(false);
    put(&mut board, 9, 3, 'K');
    put(&mut board, 0, 4, 'k');
    assert!(!is_pseudo_legal(&board, mv((9, 3), (9, 4))));
    assert!(is_pseudo_legal(&board, mv((9, 3), (8, 3))));

    // A screen on the file makes the step safe again.
    put(&mut board, 5, 4, 'P');
    assert!(is_pseudo_legal(&board, mv((9, 3), (9, 4))));
}

#[test]
fn test_general_escape_respects_check_and_facing() {
    let mut board = Board::empty(false);
    put(&mut board, 8, 4, 'K');
    put(&mut board, 0, 3, 'k');
    put(&mut board, 2, 4, 'r');
    // Stepping back keeps the general on the chariot's file.
    assert!(is_pseudo_legal(&board, mv((8, 4), (9, 4))));
    assert!(!is_legal(&board, mv((8, 4), (9, 4))));
    // Stepping onto file 3 faces the black general.
    assert!(!is_pseudo_legal(&board, mv((8, 4), (8, 3))));
    assert!(is_legal(&board, mv((8, 4), (8, 5))));
}

#[test]
fn test_soldier_moves() {
    let mut board = Board::empty(false);
    put(&mut board, 6, 2, 'P');
    put(&mut board, 4, 6, 'P');

    // Before the river: forward only.
    assert!(is_pseudo_legal(&board, mv((6, 2), (5, 2))));
    assert!(!is_pseudo_legal(&board, mv((6, 2), (6, 3))));
    assert!(!is_pseudo_legal(&board, mv((6, 2), (7, 2))));

    // Across the river: forward or sideways, never back or diagonal.
    assert!(is_pseudo_legal(&board, mv((4, 6), (3, 6))));
    assert!(is_pseudo_legal(&board, mv((4, 6), (4, 5))));
    assert!(is_pseudo_legal(&board, mv((4, 6), (4, 7))));
    assert!(!is_pseudo_legal(&board, mv((4, 6), (5, 6))));
    assert!(!is_pseudo_legal(&board, mv((4, 6), (3, 7))));
}

#[test]
fn test_flipped_soldier_direction() {
    let mut board = Board::empty(true);
    put(&mut board, 3, 2, 'P');
    put(&mut board, 6, 2, 'p');
    assert!(is_pseudo_legal(&board, mv((3, 2), (4, 2))));
    assert!(!is_pseudo_legal(&board, mv((3, 2), (2, 2))));
    assert!(is_pseudo_legal(&board, mv((6, 2), (5, 2))));
    assert!(!is_pseudo_legal(&board, mv((6, 2), (7, 2))));
}

#[test]
fn test_cannot_capture_own_piece() {
    let board = Board::startpos();
    // Red chariot onto the red horse.
    assert!(!is_pseudo_legal(&board, mv((9, 0), (9, 1))));
    assert!(!is_legal(&board, mv((9, 0), (9, 1))));
}

#[test]
fn test_legal_filters_self_check() {
    // The red chariot on file 4 is pinned against the black chariot.
    let mut board = Board::empty(false);
    put(&mut board, 9, 4, 'K');
    put(&mut board, 7, 4, 'R');
    put(&mut board, 2, 4, 'r');
    put(&mut board, 0, 3, 'k');
    assert!(is_pseudo_legal(&board, mv((7, 4), (7, 0))));
    assert!(!is_legal(&board, mv((7, 4), (7, 0))));
    assert!(is_legal(&board, mv((7, 4), (2, 4))));

    let moves = legal_moves(&board, Color::Red);
    assert!(moves.iter().all(|m| is_legal(&board, *m)));
    assert!(!moves.contains(&mv((7, 4), (7, 0))));
}

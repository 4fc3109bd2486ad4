use super::*;
use xiangqi_core::GameState;

fn put(board: &mut Board, row: i8, col: i8, ch: char) {
    board.set_piece(sq(row, col).unwrap(), Piece::from_char(ch));
}

fn kings_only() -> Board {
    let mut board = Board::empty(false);
    put(&mut board, 9, 4, 'K');
    put(&mut board, 0, 3, 'k');
    board
}

#[test]
fn test_start_position_is_balanced() {
    let start = Board::startpos();
    assert_eq!(evaluate(&start, Color::Red), 0);
    assert_eq!(evaluate(&start, Color::Black), 0);
    assert_eq!(evaluate(&start.rotated(), Color::Red), 0);
}

#[test]
fn test_evaluation_is_antisymmetric() {
    let state = GameState::from_fen(
        "r1bakab1r/9/1cn3nc1/p1p1p3p/6p2/2P6/P3P1P1P/1CN3NC1/9/R1BAKAB1R w",
    )
    .unwrap();
    let red = evaluate(&state.board, Color::Red);
    let black = evaluate(&state.board, Color::Black);
    assert_eq!(red, -black);
}

#[test]
fn test_material_advantage() {
    let mut board = Board::startpos();
    board.set_piece(sq(0, 0).unwrap(), None);
    let score = evaluate(&board, Color::Red);
    assert!(score > 500, "a chariot up should be clearly winning, got {score}");
    assert!(evaluate(&board, Color::Black) < -500);
}

#[test]
fn test_checkmate_saturates() {
    let mut board = Board::empty(false);
    put(&mut board, 0, 4, 'k');
    put(&mut board, 0, 0, 'R');
    put(&mut board, 1, 8, 'R');
    put(&mut board, 9, 3, 'K');
    assert_eq!(evaluate(&board, Color::Red), CHECKMATE_SCORE);
    assert_eq!(evaluate(&board, Color::Black), -CHECKMATE_SCORE);
}

#[test]
fn test_check_bonus() {
    // General on the e-file would leave Black mated instead of checked.
    let mut board = Board::empty(false);
    put(&mut board, 9, 5, 'K');
    put(&mut board, 0, 3, 'k');
    put(&mut board, 5, 3, 'R');
    let breakdown = evaluate_breakdown(&board, Color::Red);
    assert_eq!(breakdown.check, CHECK_BONUS);
    assert_eq!(evaluate_breakdown(&board, Color::Black).check, -CHECK_BONUS);
}

#[test]
fn test_game_phase() {
    assert_eq!(game_phase(&Board::startpos()), 0.0);
    assert_eq!(game_phase(&kings_only()), 1.0);
}

#[test]
fn test_crossed_soldier_bonus() {
    let mut home = kings_only();
    put(&mut home, 6, 4, 'P');
    assert_eq!(evaluate_breakdown(&home, Color::Red).material, 100.0);

    let mut crossed = kings_only();
    put(&mut crossed, 4, 4, 'P');
    let material = evaluate_breakdown(&crossed, Color::Red).material;
    // Nearly endgame: the bonus sits close to its upper end.
    assert!(material > 215.0 && material < 220.0, "got {material}");
}

#[test]
fn test_structure_bonus() {
    let mut board = Board::startpos();
    assert_eq!(structure(&board, Color::Red), 20);

    // Advisor to the palace centre.
    board.make_move(xiangqi_core::Move::from_coord("d0e1").unwrap());
    assert_eq!(structure(&board, Color::Red), 25);

    // A lone elephant earns nothing.
    board.set_piece(sq(9, 2).unwrap(), None);
    assert_eq!(structure(&board, Color::Red), 15);
}

#[test]
fn test_king_safety_shield() {
    let mut board = kings_only();
    assert_eq!(king_safety(&board, Color::Red), -45.0);
    put(&mut board, 8, 4, 'P');
    assert_eq!(king_safety(&board, Color::Red), 7.5);
}

#[test]
fn test_king_safety_attackers() {
    let mut board = kings_only();
    put(&mut board, 5, 2, 'r');
    // One chariot: half of 90.
    assert_eq!(king_safety(&board, Color::Red), -45.0 - 45.0);

    put(&mut board, 5, 5, 'n');
    // Two attackers cost the whole 90 + 40.
    assert_eq!(king_safety(&board, Color::Red), -45.0 - 130.0);
}

#[test]
fn test_missing_general() {
    let mut board = kings_only();
    board.set_piece(sq(0, 3).unwrap(), None);
    assert_eq!(king_safety(&board, Color::Black), -10_000.0);

    put(&mut board, 5, 0, 'r');
    assert_eq!(evaluate(&board, Color::Red), CHECKMATE_SCORE);
    assert_eq!(evaluate(&board, Color::Black), -CHECKMATE_SCORE);
    assert_eq!(evaluate_breakdown(&board, Color::Black).check, -CHECKMATE_SCORE);
}

#[test]
fn test_both_generals_missing_is_level() {
    let mut board = Board::empty(false);
    put(&mut board, 5, 0, 'R');
    assert_eq!(evaluate(&board, Color::Red), 0);
    assert_eq!(evaluate(&board, Color::Black), 0);
}

#[test]
fn test_mobility_counts_legal_moves() {
    let mut board = Board::startpos();
    assert_eq!(mobility(&mut board, Color::Red), 44);
    assert_eq!(board, Board::startpos());
}

#[test]
fn test_piece_safety() {
    let mut board = kings_only();
    put(&mut board, 5, 0, 'R');
    put(&mut board, 3, 1, 'n');
    // Attacked by a cheaper horse and undefended.
    assert_eq!(piece_safety(&board, sq(5, 0).unwrap()), -250);

    put(&mut board, 9, 0, 'R');
    assert_eq!(piece_safety(&board, sq(5, 0).unwrap()), -30);

    assert_eq!(piece_safety(&board, sq(4, 4).unwrap()), 0);
}

#[test]
fn test_breakdown_serializes() {
    let breakdown = evaluate_breakdown(&Board::startpos(), Color::Red);
    let json = serde_json::to_value(breakdown).unwrap();
    assert_eq!(json["total"], 0);
    assert_eq!(json["mobility"], 0);
}

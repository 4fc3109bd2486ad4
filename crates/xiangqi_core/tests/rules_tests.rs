//! Whole-game properties of the rules engine, checked along scripted
//! games from several starting positions.

use xiangqi_core::{
    Board, Color, GameState, Move, PieceKind, ZOBRIST, find_generals, has_legal_move,
    is_checkmate, is_in_check, is_legal, legal_moves, validate_custom_position,
};

const PLIES: usize = 120;

fn start_states() -> Vec<GameState> {
    vec![
        GameState::startpos(),
        GameState::new(Board::startpos().rotated(), Color::Red),
        GameState::from_fen("r1bakab1r/9/1cn3nc1/p1p1p3p/6p2/2P6/P3P1P1P/1CN3NC1/9/R1BAKAB1R w")
            .unwrap(),
    ]
}

/// Walks a deterministic game, calling `check` before every move.
fn walk(mut state: GameState, mut check: impl FnMut(&GameState, &[Move])) {
    for ply in 0..PLIES {
        let moves = legal_moves(&state.board, state.side_to_move);
        check(&state, &moves);
        if moves.is_empty() {
            break;
        }
        // Prefer captures so games reach sparse boards.
        let pick = moves
            .iter()
            .copied()
            .find(|m| state.board.piece_at(m.to).is_some())
            .unwrap_or(moves[(ply * 7 + 3) % moves.len()]);
        state.make_move(pick);
    }
}

#[test]
fn legal_moves_never_leave_the_mover_in_check() {
    for start in start_states() {
        walk(start, |state, moves| {
            let mut board = state.board.clone();
            for mv in moves {
                assert!(is_legal(&state.board, *mv));
                let trial = board.play(*mv);
                assert!(!is_in_check(&trial, state.side_to_move), "{mv} leaves check");
            }
        });
    }
}

#[test]
fn checkmate_matches_move_availability() {
    for start in start_states() {
        walk(start, |state, moves| {
            let side = state.side_to_move;
            assert_eq!(is_checkmate(&state.board, side), moves.is_empty());
            assert_eq!(has_legal_move(&mut state.board.clone(), side), !moves.is_empty());
        });
    }
}

#[test]
fn incremental_hash_matches_full_recompute() {
    for start in start_states() {
        walk(start, |state, _| {
            assert_eq!(state.hash(), ZOBRIST.hash(&state.board, state.side_to_move));
        });
    }
}

#[test]
fn generals_stay_in_their_palaces() {
    for start in start_states() {
        walk(start, |state, _| {
            let (red, black) = find_generals(&state.board);
            if let Some(sq) = red {
                assert!(state.board.in_palace(Color::Red, sq));
            }
            if let Some(sq) = black {
                assert!(state.board.in_palace(Color::Black, sq));
            }
        });
    }
}

#[test]
fn played_positions_remain_valid_setups() {
    for start in start_states() {
        walk(start, |state, moves| {
            // A position with the mover in check is legal in play but not as a setup.
            if moves.is_empty() || is_in_check(&state.board, state.side_to_move) {
                return;
            }
            assert!(validate_custom_position(&state.board), "{}", state.to_fen());
        });
    }
}

#[test]
fn fen_round_trips_along_the_game() {
    for start in start_states() {
        walk(start, |state, _| {
            let parsed = GameState::from_fen(&state.to_fen()).unwrap();
            assert_eq!(parsed.board, state.board);
            assert_eq!(parsed.side_to_move, state.side_to_move);
            assert_eq!(parsed.hash(), state.hash());
        });
    }
}

#[test]
fn move_generation_does_not_mutate_the_board() {
    for start in start_states() {
        walk(start, |state, _| {
            let mut board = state.board.clone();
            let before = board.clone();
            let _ = has_legal_move(&mut board, state.side_to_move);
            let _ = is_checkmate(&board, state.side_to_move.other());
            assert_eq!(board, before);
        });
    }
}

#[test]
fn soldiers_never_retreat() {
    for start in start_states() {
        walk(start, |state, moves| {
            for mv in moves {
                let Some(pc) = state.board.piece_at(mv.from) else {
                    continue;
                };
                if pc.kind != PieceKind::Soldier {
                    continue;
                }
                let (from_row, _) = state.board.relative_square(pc.color, mv.from);
                let (to_row, _) = state.board.relative_square(pc.color, mv.to);
                assert!(to_row >= from_row, "{mv} moves a soldier backwards");
            }
        });
    }
}

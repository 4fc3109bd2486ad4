use crate::{
    attacks::{generals_facing_after, is_in_check},
    board::Board,
    types::*,
};

const ORTHO: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAG: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
/// Horse jumps paired with the leg square that must be empty.
const HORSE: [((i8, i8), (i8, i8)); 8] = [
    ((2, 1), (1, 0)),
    ((2, -1), (1, 0)),
    ((-2, 1), (-1, 0)),
    ((-2, -1), (-1, 0)),
    ((1, 2), (0, 1)),
    ((-1, 2), (0, 1)),
    ((1, -2), (0, -1)),
    ((-1, -2), (0, -1)),
];

/// Generate all legal moves for `color`, returning a freshly allocated vector.
/// Internally delegates to `legal_moves_into`, cloning the board only once.
pub fn legal_moves(board: &Board, color: Color) -> Vec<Move> {
    let mut tmp = board.clone();
    let mut out = Vec::with_capacity(64);
    legal_moves_into(&mut tmp, color, &mut out);
    out
}

/// Generate all legal moves into the provided buffer, reusing it across calls.
pub fn legal_moves_into(board: &mut Board, color: Color, out: &mut Vec<Move>) {
    out.clear();
    pseudo_moves(board, color, out);

    // Filter illegal moves in-place by playing them on the mutable board.
    out.retain(|&mv| {
        let trial = board.play(mv);
        !is_in_check(&trial, color)
    });
}

/// True as soon as one legal move for `color` is found.
pub fn has_legal_move(board: &mut Board, color: Color) -> bool {
    let mut moves = Vec::with_capacity(64);
    pseudo_moves(board, color, &mut moves);
    moves.into_iter().any(|mv| {
        let trial = board.play(mv);
        !is_in_check(&trial, color)
    })
}

/// A pseudo-legal move that does not leave the mover's own General in check.
pub fn is_legal(board: &Board, mv: Move) -> bool {
    if !is_pseudo_legal(board, mv) {
        return false;
    }
    let Some(pc) = board.piece_at(mv.from) else {
        return false;
    };
    let mut tmp = board.clone();
    let trial = tmp.play(mv);
    !is_in_check(&trial, pc.color)
}

/// Geometric rule of the moving piece, on-board destination and no
/// same-color capture. Does not consider the mover's own check state,
/// except for the General, which may never step into facing the other General.
pub fn is_pseudo_legal(board: &Board, mv: Move) -> bool {
    if mv.from as usize >= NUM_SQUARES || mv.to as usize >= NUM_SQUARES || mv.from == mv.to {
        return false;
    }
    let Some(pc) = board.piece_at(mv.from) else {
        return false;
    };
    if let Some(target) = board.piece_at(mv.to) {
        if target.color == pc.color {
            return false;
        }
    }

    let dr = row_of(mv.to) - row_of(mv.from);
    let dc = col_of(mv.to) - col_of(mv.from);
    match pc.kind {
        PieceKind::General => {
            board.in_palace(pc.color, mv.to)
                && dr.abs() + dc.abs() == 1
                && !generals_facing_after(board, mv.from, mv.to)
        }
        PieceKind::Advisor => board.in_palace(pc.color, mv.to) && dr.abs() == 1 && dc.abs() == 1,
        PieceKind::Elephant => {
            board.on_home_side(pc.color, mv.to)
                && dr.abs() == 2
                && dc.abs() == 2
                && sq(row_of(mv.from) + dr / 2, col_of(mv.from) + dc / 2)
                    .is_some_and(|eye| board.piece_at(eye).is_none())
        }
        PieceKind::Horse => {
            let leg = match (dr.abs(), dc.abs()) {
                (2, 1) => sq(row_of(mv.from) + dr.signum(), col_of(mv.from)),
                (1, 2) => sq(row_of(mv.from), col_of(mv.from) + dc.signum()),
                _ => return false,
            };
            leg.is_some_and(|leg| board.piece_at(leg).is_none())
        }
        PieceKind::Chariot => pieces_between(board, mv.from, mv.to) == Some(0),
        PieceKind::Cannon => {
            let screens = pieces_between(board, mv.from, mv.to);
            if board.piece_at(mv.to).is_some() {
                screens == Some(1)
            } else {
                screens == Some(0)
            }
        }
        PieceKind::Soldier => {
            let fwd = board.forward(pc.color);
            let advance = dc == 0 && dr == fwd;
            if board.on_home_side(pc.color, mv.from) {
                advance
            } else {
                advance || (dr == 0 && dc.abs() == 1)
            }
        }
    }
}

/// Number of occupied squares strictly between two squares on one rank or
/// file; `None` when they do not share a line.
pub fn pieces_between(board: &Board, a: u8, b: u8) -> Option<u32> {
    let (ra, ca, rb, cb) = (row_of(a), col_of(a), row_of(b), col_of(b));
    if ra != rb && ca != cb {
        return None;
    }
    let step_r = (rb - ra).signum();
    let step_c = (cb - ca).signum();
    let mut count = 0;
    let (mut r, mut c) = (ra + step_r, ca + step_c);
    while (r, c) != (rb, cb) {
        if let Some(s) = sq(r, c) {
            if board.piece_at(s).is_some() {
                count += 1;
            }
        }
        r += step_r;
        c += step_c;
    }
    Some(count)
}

/// All pseudo-legal moves for `color`.
pub fn pseudo_moves(board: &Board, color: Color, out: &mut Vec<Move>) {
    for (from, pc) in board.pieces(color) {
        gen_piece(board, from, pc, out);
    }
}

/// Pseudo-legal moves of the piece standing on `from`.
pub fn pseudo_moves_from(board: &Board, from: u8, out: &mut Vec<Move>) {
    if let Some(pc) = board.piece_at(from) {
        gen_piece(board, from, pc, out);
    }
}

fn gen_piece(board: &Board, from: u8, pc: Piece, out: &mut Vec<Move>) {
    match pc.kind {
        PieceKind::General => gen_steps(board, from, &ORTHO, 1, out),
        PieceKind::Advisor => gen_steps(board, from, &DIAG, 1, out),
        PieceKind::Elephant => gen_steps(board, from, &DIAG, 2, out),
        PieceKind::Horse => gen_horse(board, from, pc.color, out),
        PieceKind::Chariot => gen_chariot(board, from, pc.color, out),
        PieceKind::Cannon => gen_cannon(board, from, pc.color, out),
        PieceKind::Soldier => gen_soldier(board, from, pc.color, out),
    }
}

fn can_land(board: &Board, to: u8, c: Color) -> bool {
    board.piece_at(to).is_none_or(|p| p.color != c)
}

/// Palace and home-side pieces: the full rule is cheap enough to check directly.
fn gen_steps(board: &Board, from: u8, dirs: &[(i8, i8)], dist: i8, out: &mut Vec<Move>) {
    let (r, c) = (row_of(from), col_of(from));
    for (dr, dc) in dirs {
        if let Some(to) = sq(r + dr * dist, c + dc * dist) {
            let mv = Move::new(from, to);
            if is_pseudo_legal(board, mv) {
                out.push(mv);
            }
        }
    }
}

fn gen_horse(board: &Board, from: u8, c: Color, out: &mut Vec<Move>) {
    let (r, f) = (row_of(from), col_of(from));
    for ((dr, dc), (lr, lc)) in HORSE {
        let Some(to) = sq(r + dr, f + dc) else {
            continue;
        };
        let blocked = sq(r + lr, f + lc).is_none_or(|leg| board.piece_at(leg).is_some());
        if !blocked && can_land(board, to, c) {
            out.push(Move::new(from, to));
        }
    }
}

fn gen_chariot(board: &Board, from: u8, c: Color, out: &mut Vec<Move>) {
    let (r0, c0) = (row_of(from), col_of(from));
    for (dr, dc) in ORTHO {
        let (mut r, mut f) = (r0 + dr, c0 + dc);
        while let Some(to) = sq(r, f) {
            match board.piece_at(to) {
                None => out.push(Move::new(from, to)),
                Some(pc) => {
                    if pc.color != c {
                        out.push(Move::new(from, to));
                    }
                    break;
                }
            }
            r += dr;
            f += dc;
        }
    }
}

fn gen_cannon(board: &Board, from: u8, c: Color, out: &mut Vec<Move>) {
    let (r0, c0) = (row_of(from), col_of(from));
    for (dr, dc) in ORTHO {
        let (mut r, mut f) = (r0 + dr, c0 + dc);
        let mut screened = false;
        while let Some(to) = sq(r, f) {
            match (board.piece_at(to), screened) {
                (None, false) => out.push(Move::new(from, to)),
                (None, true) => {}
                (Some(_), false) => screened = true,
                (Some(pc), true) => {
                    if pc.color != c {
                        out.push(Move::new(from, to));
                    }
                    break;
                }
            }
            r += dr;
            f += dc;
        }
    }
}

fn gen_soldier(board: &Board, from: u8, c: Color, out: &mut Vec<Move>) {
    let (r, f) = (row_of(from), col_of(from));
    let crossed = !board.on_home_side(c, from);
    let steps = [(board.forward(c), 0), (0, -1), (0, 1)];
    for (i, (dr, dc)) in steps.into_iter().enumerate() {
        if i > 0 && !crossed {
            break;
        }
        if let Some(to) = sq(r + dr, f + dc)
            && can_land(board, to, c)
        {
            out.push(Move::new(from, to));
        }
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;

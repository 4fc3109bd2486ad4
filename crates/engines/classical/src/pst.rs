//! Piece-square tables.
//!
//! Every table is written from Black's side of an unflipped board: row 0 is
//! the owner's baseline, row 9 the far edge. Lookups go through
//! `Board::relative_square`, which maps either color and orientation into
//! this frame.

use xiangqi_core::PieceKind;

type Table = [[i32; 9]; 10];

#[rustfmt::skip]
const GENERAL: Table = [
    [ 0,  0,  0,  5,  8,  5,  0,  0,  0],
    [ 0,  0,  0,  5,  5,  5,  0,  0,  0],
    [ 0,  0,  0,  0,  0,  0,  0,  0,  0],
    [ 0,  0,  0,  0,  0,  0,  0,  0,  0],
    [ 0,  0,  0,  0,  0,  0,  0,  0,  0],
    [ 0,  0,  0,  0,  0,  0,  0,  0,  0],
    [ 0,  0,  0,  0,  0,  0,  0,  0,  0],
    [ 0,  0,  0,  0,  0,  0,  0,  0,  0],
    [ 0,  0,  0,  0,  0,  0,  0,  0,  0],
    [ 0,  0,  0,  0,  0,  0,  0,  0,  0],
];

#[rustfmt::skip]
const ADVISOR: Table = [
    [ 0,  0,  0,  5,  0,  5,  0,  0,  0],
    [ 0,  0,  0,  0, 10,  0,  0,  0,  0],
    [ 0,  0,  0,  5,  0,  5,  0,  0,  0],
    [ 0,  0,  0,  0,  0,  0,  0,  0,  0],
    [ 0,  0,  0,  0,  0,  0,  0,  0,  0],
    [ 0,  0,  0,  0,  0,  0,  0,  0,  0],
    [ 0,  0,  0,  0,  0,  0,  0,  0,  0],
    [ 0,  0,  0,  0,  0,  0,  0,  0,  0],
    [ 0,  0,  0,  0,  0,  0,  0,  0,  0],
    [ 0,  0,  0,  0,  0,  0,  0,  0,  0],
];

#[rustfmt::skip]
const ELEPHANT: Table = [
    [ 0,  0,  5,  0,  0,  0,  5,  0,  0],
    [ 0,  0,  0,  0,  0,  0,  0,  0,  0],
    [ 5,  0,  0,  0, 10,  0,  0,  0,  5],
    [ 0,  0,  0,  0,  0,  0,  0,  0,  0],
    [ 0,  0,  5,  0,  0,  0,  5,  0,  0],
    [-5, -5, -5, -5, -5, -5, -5, -5, -5],
    [-5, -5, -5, -5, -5, -5, -5, -5, -5],
    [ 0,  0,  0,  0,  0,  0,  0,  0,  0],
    [ 0,  0,  0,  0,  0,  0,  0,  0,  0],
    [ 0,  0,  0,  0,  0,  0,  0,  0,  0],
];

#[rustfmt::skip]
const HORSE: Table = [
    [ 0, -3,  0,  0,  0,  0,  0, -3,  0],
    [ 0,  0,  5,  5,  8,  5,  5,  0,  0],
    [ 0,  5, 10, 12, 15, 12, 10,  5,  0],
    [ 5,  8, 12, 15, 18, 15, 12,  8,  5],
    [ 5, 10, 12, 16, 15, 16, 12, 10,  5],
    [ 5,  8, 10, 15, 12, 15, 10,  8,  5],
    [ 0,  5,  8, 10, 10, 10,  8,  5,  0],
    [ 0,  0,  4,  5,  5,  5,  4,  0,  0],
    [ 0, -5,  0,  0,  0,  0,  0, -5,  0],
    [-5,-10, -5, -5, -5, -5, -5,-10, -5],
];

#[rustfmt::skip]
const CHARIOT: Table = [
    [10, 10, 10, 12, 12, 12, 10, 10, 10],
    [12, 15, 14, 16, 16, 16, 14, 15, 12],
    [12, 14, 12, 15, 15, 15, 12, 14, 12],
    [12, 15, 12, 16, 16, 16, 12, 15, 12],
    [12, 12, 12, 14, 14, 14, 12, 12, 12],
    [10, 10, 10, 12, 12, 12, 10, 10, 10],
    [ 8,  8,  8, 10, 10, 10,  8,  8,  8],
    [ 6,  6,  6,  8,  8,  8,  6,  6,  6],
    [ 4,  4,  4,  6,  6,  6,  4,  4,  4],
    [ 0,  0,  0,  5,  0,  5,  0,  0,  0],
];

#[rustfmt::skip]
const CANNON: Table = [
    [ 5,  5,  5,  5,  5,  5,  5,  5,  5],
    [ 4,  4,  4,  8, 10,  8,  4,  4,  4],
    [ 4,  4,  4,  8,  8,  8,  4,  4,  4],
    [ 6,  8,  8,  8,  8,  8,  8,  8,  6],
    [ 8,  8,  8,  8,  8,  8,  8,  8,  8],
    [ 8,  8, 10, 10, 10, 10, 10,  8,  8],
    [10, 10, 10, 12, 12, 12, 10, 10, 10],
    [10, 10, 10, 10, 10, 10, 10, 10, 10],
    [ 8,  8,  8,  8,  8,  8,  8,  8,  8],
    [ 5,  5,  5,  5,  5,  5,  5,  5,  5],
];

#[rustfmt::skip]
const SOLDIER: Table = [
    [ 0,  0,  0, 20, 25, 20,  0,  0,  0],
    [ 0,  0,  0, 15, 18, 15,  0,  0,  0],
    [ 0,  0,  0, 12, 15, 12,  0,  0,  0],
    [ 0,  0,  0, 10, 12, 10,  0,  0,  0],
    [ 5,  5,  8,  8, 10,  8,  8,  5,  5],
    [ 5,  5,  5,  5,  5,  5,  5,  5,  5],
    [ 2,  2,  2,  3,  3,  3,  2,  2,  2],
    [ 0,  0,  0,  0,  0,  0,  0,  0,  0],
    [ 0,  0,  0,  0,  0,  0,  0,  0,  0],
    [ 0,  0,  0,  0,  0,  0,  0,  0,  0],
];

fn table(kind: PieceKind) -> &'static Table {
    match kind {
        PieceKind::General => &GENERAL,
        PieceKind::Advisor => &ADVISOR,
        PieceKind::Elephant => &ELEPHANT,
        PieceKind::Horse => &HORSE,
        PieceKind::Chariot => &CHARIOT,
        PieceKind::Cannon => &CANNON,
        PieceKind::Soldier => &SOLDIER,
    }
}

/// Bonus for `kind` on the relative square `(row, col)`.
#[inline]
pub fn pst_value(kind: PieceKind, (row, col): (i8, i8)) -> i32 {
    let row = row.clamp(0, 9) as usize;
    let col = col.clamp(0, 8) as usize;
    table(kind)[row][col]
}

use std::ops::{Deref, DerefMut};

use crate::error::FenError;
use crate::types::*;
use crate::zobrist::ZOBRIST;

pub const START_FEN: &str = "rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNBAKABNR w";

/// The 10x9 grid. Row 0 is the top edge.
///
/// `flipped == false` puts Red at the bottom (rows 5-9, palace rows 7-9);
/// `flipped == true` swaps the halves so Black plays from the bottom.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    pub squares: [Option<Piece>; NUM_SQUARES],
    pub flipped: bool,
}

#[derive(Clone, Copy, Debug)]
pub struct Undo {
    pub captured: Option<Piece>,
}

/// Applies a move for the lifetime of the guard and reverts it on drop.
pub struct MoveGuard<'a> {
    board: &'a mut Board,
    mv: Move,
    undo: Undo,
}

impl Deref for MoveGuard<'_> {
    type Target = Board;
    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for MoveGuard<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for MoveGuard<'_> {
    fn drop(&mut self) {
        self.board.unmake_move(self.mv, self.undo);
    }
}

impl Board {
    pub fn empty(flipped: bool) -> Self {
        Board {
            squares: [None; NUM_SQUARES],
            flipped,
        }
    }

    pub fn startpos() -> Self {
        let mut b = Board::empty(false);
        let back = [
            PieceKind::Chariot,
            PieceKind::Horse,
            PieceKind::Elephant,
            PieceKind::Advisor,
            PieceKind::General,
            PieceKind::Advisor,
            PieceKind::Elephant,
            PieceKind::Horse,
            PieceKind::Chariot,
        ];
        for (col, &kind) in back.iter().enumerate() {
            b.squares[col] = Some(Piece::new(Color::Black, kind));
            b.squares[81 + col] = Some(Piece::new(Color::Red, kind));
        }
        for col in [1usize, 7] {
            b.squares[18 + col] = Some(Piece::new(Color::Black, PieceKind::Cannon));
            b.squares[63 + col] = Some(Piece::new(Color::Red, PieceKind::Cannon));
        }
        for col in [0usize, 2, 4, 6, 8] {
            b.squares[27 + col] = Some(Piece::new(Color::Black, PieceKind::Soldier));
            b.squares[54 + col] = Some(Piece::new(Color::Red, PieceKind::Soldier));
        }
        b
    }

    /// Parses the placement field of the board text (rows top to bottom).
    pub fn from_placement(placement: &str, flipped: bool) -> Result<Self, FenError> {
        let rows: Vec<&str> = placement.split('/').collect();
        if rows.len() != ROWS as usize {
            return Err(FenError::RowCount(rows.len()));
        }
        let mut board = Board::empty(flipped);
        for (row, row_str) in rows.iter().enumerate() {
            let mut col = 0usize;
            for ch in row_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    col += d as usize;
                } else {
                    let piece = Piece::from_char(ch).ok_or(FenError::UnknownPiece(ch))?;
                    if col < COLS as usize {
                        board.squares[row * COLS as usize + col] = Some(piece);
                    }
                    col += 1;
                }
            }
            if col != COLS as usize {
                return Err(FenError::RowWidth { row, width: col });
            }
        }
        Ok(board)
    }

    pub fn to_placement(&self) -> String {
        let mut out = String::with_capacity(100);
        for row in 0..ROWS {
            if row > 0 {
                out.push('/');
            }
            let mut empty = 0;
            for col in 0..COLS {
                match self.squares[(row * COLS + col) as usize] {
                    Some(pc) => {
                        if empty > 0 {
                            out.push_str(&empty.to_string());
                            empty = 0;
                        }
                        out.push(pc.to_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
        }
        out
    }

    pub fn piece_at(&self, sq: u8) -> Option<Piece> {
        self.squares[sq as usize]
    }
    pub fn set_piece(&mut self, sq: u8, pc: Option<Piece>) {
        self.squares[sq as usize] = pc;
    }

    /// Occupied squares of one color, in board order.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (u8, Piece)> + '_ {
        self.squares
            .iter()
            .enumerate()
            .filter_map(move |(i, pc)| match pc {
                Some(p) if p.color == color => Some((i as u8, *p)),
                _ => None,
            })
    }

    pub fn general_sq(&self, color: Color) -> Option<u8> {
        self.pieces(color)
            .find(|(_, pc)| pc.kind == PieceKind::General)
            .map(|(sq, _)| sq)
    }

    pub fn make_move(&mut self, mv: Move) -> Undo {
        let moved = self.squares[mv.from as usize].take();
        let captured = std::mem::replace(&mut self.squares[mv.to as usize], moved);
        Undo { captured }
    }

    pub fn unmake_move(&mut self, mv: Move, undo: Undo) {
        let moved = std::mem::replace(&mut self.squares[mv.to as usize], undo.captured);
        self.squares[mv.from as usize] = moved;
    }

    /// Scoped trial move: the board is restored when the guard drops.
    pub fn play(&mut self, mv: Move) -> MoveGuard<'_> {
        let undo = self.make_move(mv);
        MoveGuard {
            board: self,
            mv,
            undo,
        }
    }

    /// The board turned half a circle, with the orientation flag toggled.
    pub fn rotated(&self) -> Board {
        let mut out = Board::empty(!self.flipped);
        for i in 0..NUM_SQUARES {
            out.squares[NUM_SQUARES - 1 - i] = self.squares[i];
        }
        out
    }

    fn at_bottom(&self, color: Color) -> bool {
        (color == Color::Red) != self.flipped
    }

    /// Row step of a soldier advancing for `color`.
    pub fn forward(&self, color: Color) -> i8 {
        if self.at_bottom(color) { -1 } else { 1 }
    }

    pub fn in_palace(&self, color: Color, sq: u8) -> bool {
        let row = row_of(sq);
        let col = col_of(sq);
        let rows = if self.at_bottom(color) { 7..=9 } else { 0..=2 };
        rows.contains(&row) && (3..=5).contains(&col)
    }

    pub fn on_home_side(&self, color: Color, sq: u8) -> bool {
        if self.at_bottom(color) {
            row_of(sq) >= 5
        } else {
            row_of(sq) <= 4
        }
    }

    /// Maps a square into the frame where `color` sits on rows 0-4 of an
    /// unflipped board, i.e. row 0 is that color's baseline.
    pub fn relative_square(&self, color: Color, sq: u8) -> (i8, i8) {
        let row = if self.at_bottom(color) {
            ROWS - 1 - row_of(sq)
        } else {
            row_of(sq)
        };
        let col = if self.flipped {
            COLS - 1 - col_of(sq)
        } else {
            col_of(sq)
        };
        (row, col)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::startpos()
    }
}

/// Search-local game state: board, side to move, ply counter and an
/// incrementally maintained Zobrist key.
#[derive(Clone, Debug)]
pub struct GameState {
    pub board: Board,
    pub side_to_move: Color,
    pub ply: u32,
    hash: u64,
}

impl GameState {
    pub fn new(board: Board, side_to_move: Color) -> Self {
        let hash = ZOBRIST.hash(&board, side_to_move);
        Self {
            board,
            side_to_move,
            ply: 0,
            hash,
        }
    }

    pub fn startpos() -> Self {
        Self::new(Board::startpos(), Color::Red)
    }

    /// Parses `<placement> [w|r|b] [-|f]`.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let mut parts = fen.split_whitespace();
        let placement = parts.next().ok_or(FenError::Empty)?;
        let side = match parts.next() {
            None | Some("w") | Some("r") => Color::Red,
            Some("b") => Color::Black,
            Some(other) => return Err(FenError::Side(other.to_string())),
        };
        let flipped = match parts.next() {
            None | Some("-") => false,
            Some("f") => true,
            Some(other) => return Err(FenError::Orientation(other.to_string())),
        };
        let board = Board::from_placement(placement, flipped)?;
        Ok(Self::new(board, side))
    }

    pub fn to_fen(&self) -> String {
        let side = match self.side_to_move {
            Color::Red => 'w',
            Color::Black => 'b',
        };
        let orientation = if self.board.flipped { 'f' } else { '-' };
        format!("{} {} {}", self.board.to_placement(), side, orientation)
    }

    pub fn hash(&self) -> u64 {
        self.hash
    }

    pub fn make_move(&mut self, mv: Move) -> Undo {
        if let Some(pc) = self.board.piece_at(mv.from) {
            self.hash ^= ZOBRIST.piece_key(pc, mv.from) ^ ZOBRIST.piece_key(pc, mv.to);
        }
        let undo = self.board.make_move(mv);
        if let Some(cap) = undo.captured {
            self.hash ^= ZOBRIST.piece_key(cap, mv.to);
        }
        self.hash ^= ZOBRIST.side_to_move;
        self.side_to_move = self.side_to_move.other();
        self.ply += 1;
        undo
    }

    pub fn unmake_move(&mut self, mv: Move, undo: Undo) {
        self.board.unmake_move(mv, undo);
        if let Some(pc) = self.board.piece_at(mv.from) {
            self.hash ^= ZOBRIST.piece_key(pc, mv.from) ^ ZOBRIST.piece_key(pc, mv.to);
        }
        if let Some(cap) = undo.captured {
            self.hash ^= ZOBRIST.piece_key(cap, mv.to);
        }
        self.hash ^= ZOBRIST.side_to_move;
        self.side_to_move = self.side_to_move.other();
        self.ply = self.ply.saturating_sub(1);
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::startpos()
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;

//! Zobrist hashing for Xiangqi positions.
//!
//! The key of a position is the XOR of one random value per occupied
//! (square, piece) pair, XORed with a side-to-move value when Black is to
//! move. `GameState` keeps it up to date across make/unmake in O(1); the
//! forced-mate searcher uses it as its transposition key.
//!
//! Table size: 2 colors × 7 kinds × 90 squares = 1260 piece values, plus 1.

use crate::board::Board;
use crate::types::{Color, NUM_SQUARES, Piece};

/// Number of (color, kind, square) combinations.
const PIECE_KEYS: usize = 2 * 7 * NUM_SQUARES;

/// Random keys, generated once from a fixed seed so hashes are stable
/// between runs.
pub struct ZobristKeys {
    /// Laid out color-major, then kind, then square.
    pieces: [u64; PIECE_KEYS],
    /// XORed in when Black is to move
    pub side_to_move: u64,
}

impl Default for ZobristKeys {
    fn default() -> Self {
        Self::new()
    }
}

/// splitmix64 step: advances `state` and returns the mixed output.
const fn splitmix64(state: u64) -> (u64, u64) {
    let next = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = next;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    (next, z ^ (z >> 31))
}

impl ZobristKeys {
    pub const fn new() -> Self {
        let mut state = 0x5851_F42D_4C95_7F2D;
        let mut pieces = [0u64; PIECE_KEYS];
        let mut i = 0;
        while i < PIECE_KEYS {
            let (next, key) = splitmix64(state);
            state = next;
            pieces[i] = key;
            i += 1;
        }
        let (_, side_to_move) = splitmix64(state);
        Self {
            pieces,
            side_to_move,
        }
    }

    /// Every piece key, for inspection.
    pub fn piece_keys(&self) -> &[u64] {
        &self.pieces
    }

    #[inline(always)]
    pub fn piece_key(&self, piece: Piece, sq: u8) -> u64 {
        self.pieces[(piece.color.idx() * 7 + piece.kind.idx()) * NUM_SQUARES + sq as usize]
    }

    /// Full recomputation of the key of `board` with `side` to move.
    pub fn hash(&self, board: &Board, side: Color) -> u64 {
        let side_key = match side {
            Color::Red => 0,
            Color::Black => self.side_to_move,
        };
        board
            .squares
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.map(|pc| self.piece_key(pc, i as u8)))
            .fold(side_key, |h, key| h ^ key)
    }
}

/// Keys shared by every position, built at compile time.
pub static ZOBRIST: ZobristKeys = ZobristKeys::new();

#[cfg(test)]
#[path = "zobrist_tests.rs"]
mod zobrist_tests;

//! Forced-mate search.
//!
//! An AND/OR search over forcing lines: the attacker needs one move after
//! which every defence still loses within the remaining depth. Results are
//! memoized on `(Zobrist key, depth)` for the lifetime of a [`MateSearcher`],
//! so iterating n = 1, 2, ... reuses the shallower work.

use std::collections::HashMap;

use xiangqi_core::{
    is_checkmate, is_in_check, is_pseudo_legal, legal_moves_into, pseudo_moves_from, Board, Color,
    Move, Piece, PieceKind, TimeControl, NUM_SQUARES, ZOBRIST,
};

use crate::error::SearchTimedOut;

/// Moves a piece may make before it counts as too far from the enemy General.
const MAX_HOPS: u32 = 2;
/// Proximity counting stops here.
const MAX_NEAR_PIECES: usize = 3;

type MateLine = Option<Vec<Move>>;

pub struct MateSearcher {
    memo: HashMap<(u64, u32), MateLine>,
    tc: TimeControl,
    nodes: u64,
}

impl MateSearcher {
    pub fn new(tc: TimeControl) -> Self {
        Self {
            memo: HashMap::new(),
            tc,
            nodes: 0,
        }
    }

    /// Entries in the memo table.
    pub fn table_len(&self) -> usize {
        self.memo.len()
    }

    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Looks for a mate by `attacker` in at most `n` of its own moves.
    ///
    /// The line alternates attacker and defender moves, starting and ending
    /// with the attacker; after the first move it follows the first defence
    /// tried. `Ok(None)` means no forced mate exists at this depth.
    pub fn find_mate_in_n(
        &mut self,
        board: &Board,
        attacker: Color,
        n: u32,
    ) -> Result<MateLine, SearchTimedOut> {
        let mut scratch = board.clone();
        self.search(&mut scratch, attacker, n)
    }

    fn search(
        &mut self,
        board: &mut Board,
        attacker: Color,
        n: u32,
    ) -> Result<MateLine, SearchTimedOut> {
        if self.tc.check_time() {
            return Err(SearchTimedOut);
        }
        if n == 0 {
            return Ok(None);
        }
        let key = (ZOBRIST.hash(board, attacker), n);
        if let Some(known) = self.memo.get(&key) {
            return Ok(known.clone());
        }
        self.nodes += 1;

        let defender = attacker.other();
        let mut moves = Vec::with_capacity(64);
        legal_moves_into(board, attacker, &mut moves);

        let mut checks = Vec::new();
        let mut captures = Vec::new();
        let mut quiet = Vec::new();
        for mv in moves {
            let capture = board.piece_at(mv.to).is_some();
            let trial = board.play(mv);
            if is_checkmate(&trial, defender) {
                drop(trial);
                let line = vec![mv];
                self.memo.insert(key, Some(line.clone()));
                return Ok(Some(line));
            }
            let check = is_in_check(&trial, defender);
            drop(trial);
            if check {
                checks.push(mv);
            } else if capture {
                captures.push(mv);
            } else {
                quiet.push(mv);
            }
        }

        if n > 1 {
            for mv in checks.into_iter().chain(captures).chain(quiet) {
                let undo = board.make_move(mv);
                let found = self.every_defence_loses(board, attacker, n);
                board.unmake_move(mv, undo);
                if let Some(rest) = found? {
                    let mut line = Vec::with_capacity(rest.len() + 1);
                    line.push(mv);
                    line.extend(rest);
                    self.memo.insert(key, Some(line.clone()));
                    return Ok(Some(line));
                }
            }
        }

        self.memo.insert(key, None);
        Ok(None)
    }

    /// The defender is to move on `board`. Some(line) if each of its replies
    /// still allows a mate in `n - 1`.
    fn every_defence_loses(
        &mut self,
        board: &mut Board,
        attacker: Color,
        n: u32,
    ) -> Result<MateLine, SearchTimedOut> {
        let replies = defender_replies(board, attacker.other());
        if replies.is_empty() {
            return Ok(None);
        }

        let mut principal: Option<Vec<Move>> = None;
        for reply in replies {
            let undo = board.make_move(reply);
            let found = self.search(board, attacker, n - 1);
            board.unmake_move(reply, undo);
            let Some(rest) = found? else {
                return Ok(None);
            };
            if principal.is_none() {
                let mut line = Vec::with_capacity(rest.len() + 1);
                line.push(reply);
                line.extend(rest);
                principal = Some(line);
            }
        }
        Ok(principal)
    }
}

/// Legal replies, captures first. In check every legal move is already an
/// escape, so the same order applies.
fn defender_replies(board: &mut Board, defender: Color) -> Vec<Move> {
    let mut replies = Vec::with_capacity(64);
    legal_moves_into(board, defender, &mut replies);
    replies.sort_by_key(|m| board.piece_at(m.to).is_none());
    replies
}

/// One-shot search with a fresh memo table.
pub fn find_mate_in_n(
    board: &Board,
    attacker: Color,
    n: u32,
    tc: &TimeControl,
) -> Result<MateLine, SearchTimedOut> {
    MateSearcher::new(tc.clone()).find_mate_in_n(board, attacker, n)
}

/// Whether `color` still has a Chariot, Horse, Cannon or Soldier.
pub fn has_attacker(board: &Board, color: Color) -> bool {
    board.pieces(color).any(|(_, pc)| pc.kind.is_attacker())
}

/// Pieces of `color` within two moves of attacking the enemy General,
/// counted up to three.
pub fn pieces_near_general(board: &Board, color: Color) -> usize {
    let Some(target) = board.general_sq(color.other()) else {
        return 0;
    };
    board
        .pieces(color)
        .filter(|(_, pc)| pc.kind != PieceKind::General)
        .filter(|&(from, pc)| attack_distance(board, from, pc, target) <= MAX_HOPS)
        .take(MAX_NEAR_PIECES)
        .count()
}

/// Moves `piece` needs before it attacks `target`: 0 if it already does,
/// `MAX_HOPS + 1` if it cannot within `MAX_HOPS`. Other pieces stay where
/// they are.
pub fn attack_distance(board: &Board, from: u8, piece: Piece, target: u8) -> u32 {
    if is_pseudo_legal(board, Move::new(from, target)) {
        return 0;
    }
    let mut scratch = board.clone();
    scratch.set_piece(from, None);

    let mut seen = [false; NUM_SQUARES];
    seen[from as usize] = true;
    let mut frontier = vec![from];
    let mut steps = Vec::with_capacity(17);

    for hops in 1..=MAX_HOPS {
        let mut next = Vec::new();
        for &square in &frontier {
            let resident = scratch.piece_at(square);
            scratch.set_piece(square, Some(piece));
            steps.clear();
            pseudo_moves_from(&scratch, square, &mut steps);
            scratch.set_piece(square, resident);

            for step in &steps {
                let to = step.to;
                if to == target || seen[to as usize] {
                    continue;
                }
                seen[to as usize] = true;

                let resident = scratch.piece_at(to);
                scratch.set_piece(to, Some(piece));
                let hit = is_pseudo_legal(&scratch, Move::new(to, target));
                scratch.set_piece(to, resident);
                if hit {
                    return hops;
                }
                next.push(to);
            }
        }
        frontier = next;
    }
    MAX_HOPS + 1
}

#[cfg(test)]
#[path = "mate_tests.rs"]
mod mate_tests;

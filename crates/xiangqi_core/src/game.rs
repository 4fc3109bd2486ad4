//! The authoritative game session: one board, mutated only through
//! validated moves, plus the history of what was played.

use crate::{
    attacks::is_checkmate,
    board::{GameState, Undo},
    error::MoveError,
    movegen::is_legal,
    types::*,
};

/// One played move as handed to display and logging layers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveRecord {
    pub mv: Move,
    pub piece: Piece,
    pub captured: Option<Piece>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Ongoing,
    Checkmate { winner: Color },
}

#[derive(Clone, Debug, Default)]
pub struct Game {
    state: GameState,
    history: Vec<MoveRecord>,
}

impl Game {
    pub fn new(state: GameState) -> Self {
        Self {
            state,
            history: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn side_to_move(&self) -> Color {
        self.state.side_to_move
    }

    pub fn outcome(&self) -> Outcome {
        let side = self.state.side_to_move;
        if is_checkmate(&self.state.board, side) {
            Outcome::Checkmate {
                winner: side.other(),
            }
        } else {
            Outcome::Ongoing
        }
    }

    /// Applies `mv` for the side to move, after checking it is legal.
    pub fn apply_move(&mut self, mv: Move) -> Result<MoveRecord, MoveError> {
        if self.outcome() != Outcome::Ongoing {
            return Err(MoveError::GameOver);
        }
        let board = &self.state.board;
        let piece = board
            .piece_at(mv.from)
            .ok_or_else(|| MoveError::EmptySquare(sq_to_coord(mv.from)))?;
        if piece.color != self.state.side_to_move {
            return Err(MoveError::WrongSide {
                to_move: self.state.side_to_move,
            });
        }
        if !is_legal(board, mv) {
            return Err(MoveError::Illegal(mv));
        }

        let undo = self.state.make_move(mv);
        let record = MoveRecord {
            mv,
            piece,
            captured: undo.captured,
        };
        self.history.push(record);
        Ok(record)
    }

    /// Takes back the last move.
    pub fn undo_move(&mut self) -> Result<MoveRecord, MoveError> {
        let record = self.history.pop().ok_or(MoveError::NothingToUndo)?;
        self.state.unmake_move(
            record.mv,
            Undo {
                captured: record.captured,
            },
        );
        Ok(record)
    }

    /// Turns the board half a circle so the other color plays from the
    /// bottom. History squares are rotated along with it.
    pub fn rotate(&mut self) {
        let board = self.state.board.rotated();
        let mut state = GameState::new(board, self.state.side_to_move);
        state.ply = self.state.ply;
        self.state = state;
        let last = (NUM_SQUARES - 1) as u8;
        for rec in &mut self.history {
            rec.mv = Move::new(last - rec.mv.from, last - rec.mv.to);
        }
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;

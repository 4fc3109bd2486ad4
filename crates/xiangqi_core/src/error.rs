//! Error types for board parsing, game-session moves and custom setups.

use thiserror::Error;

use crate::types::{Color, Move, Piece};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("board text is empty")]
    Empty,
    #[error("expected 10 rows, found {0}")]
    RowCount(usize),
    #[error("row {row} describes {width} columns, expected 9")]
    RowWidth { row: usize, width: usize },
    #[error("unknown piece letter '{0}'")]
    UnknownPiece(char),
    #[error("invalid side to move '{0}'")]
    Side(String),
    #[error("invalid orientation '{0}'")]
    Orientation(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("no piece on {0}")]
    EmptySquare(String),
    #[error("it is {to_move}'s turn")]
    WrongSide { to_move: Color },
    #[error("illegal move {0}")]
    Illegal(Move),
    #[error("the game is already over")]
    GameOver,
    #[error("no move to take back")]
    NothingToUndo,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("expected one general per side, found {red} red and {black} black")]
    GeneralCount { red: usize, black: usize },
    #[error("{piece:?} cannot stand on {square}")]
    Misplaced { piece: Piece, square: String },
    #[error("{0} is in check")]
    InCheck(Color),
}

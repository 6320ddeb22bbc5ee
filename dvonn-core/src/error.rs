//! Error types for rule violations and malformed input

use thiserror::Error;

use crate::field::Player;
use crate::game::{Move, Phase};
use crate::hex::Coord;

/// A move that breaks the rules of the game
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("field {0} is not on the board")]
    OffBoard(Coord),

    #[error("field {0} is already occupied")]
    Occupied(Coord),

    #[error("field {0} is empty")]
    EmptyField(Coord),

    #[error("stack on {0} has no pieces")]
    EmptyStack(Coord),

    #[error("cannot stack the lone anchor on {from} onto the lone anchor on {to}")]
    AnchorOntoAnchor { from: Coord, to: Coord },

    #[error("{mv} cannot be played during the {phase:?} phase")]
    WrongPhase { mv: Move, phase: Phase },

    #[error("{mv} is not a legal move for {player:?}")]
    NotLegal { mv: Move, player: Player },

    #[error("the game is over")]
    GameOver,
}

/// Malformed move notation or game record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid field identifier: '{0}'")]
    InvalidField(String),

    #[error("invalid move token: '{0}'")]
    InvalidMove(String),

    #[error("expected move number '{expected}', found '{found}'")]
    MoveNumber { expected: String, found: String },

    #[error("transcript ended after move number '{0}'")]
    UnexpectedEnd(String),

    #[error("placement leaves {0} open fields instead of one")]
    PlacementMismatch(usize),

    #[error("unknown output format: '{0}'")]
    UnknownFormat(String),
}

/// Failure to encode or decode a state string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("state string must be {expected} characters, got {found}")]
    Length { expected: usize, found: usize },

    #[error("invalid digit '{ch}' at position {position}")]
    InvalidDigit { position: usize, ch: char },

    #[error("invalid phase value {0}")]
    InvalidPhase(u8),

    #[error("stack of height {height} on {field} cannot be encoded")]
    HeightOverflow { field: Coord, height: u8 },

    #[error("stack on {0} has no pieces")]
    EmptyStack(Coord),
}

/// Top-level error for replaying and continuing games
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DvonnError {
    #[error("illegal move #{index} ({mv}): {reason}")]
    IllegalMove {
        index: usize,
        mv: Move,
        reason: RuleError,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Codec(#[from] CodecError),
}

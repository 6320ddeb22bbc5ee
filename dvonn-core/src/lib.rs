//! DVONN Core - Rules engine for the DVONN stacking game
//!
//! This crate provides the game logic and record formats:
//! - Board geometry (49-cell hexagon inside an 11x5 envelope)
//! - Field model, placement, stacking and connectivity pruning
//! - Move generation and phase/turn derivation
//! - 50-character state strings
//! - Replaying move lists into a per-move history
//! - Logfile, transcript and dvonner notation

pub mod hex;
pub mod field;
pub mod board;
pub mod movegen;
pub mod game;
pub mod codec;
pub mod replay;
pub mod notation;
pub mod error;

// Re-exports for convenient access
pub use hex::{field_table, Coord, DIRECTIONS, FIELD_COUNT, HEIGHT, WIDTH};
pub use field::{Field, Player};
pub use board::Board;
pub use movegen::{all_moves, has_moves, is_mobile, moves_for};
pub use game::{next_player_for, phase_for, Game, GameResult, GameState, Move, Phase};
pub use codec::{decode, decode_state, encode, encode_state, STATE_LEN};
pub use replay::{replay, HistoryRecord, ReplayOptions, Replayer, Snapshot};
pub use notation::{OutputFormat, Transcript};
pub use error::{CodecError, DvonnError, ParseError, RuleError};

//! Compact 50-character state strings
//!
//! Character 0 holds `2*phase + player`; characters 1..=49 hold one cell
//! each in row-major order:
//!
//! - `0` empty
//! - `1` lone anchor
//! - `4*height + 2*anchor + player - 2` for an owned stack
//!
//! Every value is a base-62 digit from [`DIGITS`]. A complete game has no
//! player to move, but its first character carries the same bit as White;
//! callers must look at the phase rather than trust the decoded player.

use crate::board::Board;
use crate::error::CodecError;
use crate::field::{Field, Player};
use crate::game::{GameState, Phase};
use crate::hex::{field_table, FIELD_COUNT};

/// Base-62 alphabet
pub const DIGITS: &[u8; 62] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Length of an encoded state
pub const STATE_LEN: usize = FIELD_COUNT + 1;

/// Tallest stack whose code still fits in one digit
pub const MAX_HEIGHT: u8 = 14;

fn digit(value: u8) -> char {
    DIGITS[value as usize] as char
}

fn digit_value(position: usize, ch: char) -> Result<u8, CodecError> {
    DIGITS
        .iter()
        .position(|&d| d as char == ch)
        .map(|v| v as u8)
        .ok_or(CodecError::InvalidDigit { position, ch })
}

/// Encode a board, phase and player to move
pub fn encode(board: &Board, phase: Phase, player: Option<Player>) -> Result<String, CodecError> {
    let mut out = String::with_capacity(STATE_LEN);
    out.push(digit(2 * phase as u8 + player.map_or(0, |p| p as u8)));

    for (at, field) in board.fields() {
        let value = match field {
            Field::Empty => 0,
            Field::Anchor => 1,
            Field::Owned { height: 0, .. } => return Err(CodecError::EmptyStack(at)),
            Field::Owned { player, height, anchor } => {
                if height > MAX_HEIGHT {
                    return Err(CodecError::HeightOverflow { field: at, height });
                }
                4 * height + 2 * anchor as u8 + player as u8 - 2
            }
        };
        out.push(digit(value));
    }
    Ok(out)
}

/// Encode a full game state
pub fn encode_state(state: &GameState) -> Result<String, CodecError> {
    encode(&state.board, state.phase, state.next_player)
}

/// Decode a state string into board, phase and the raw player bit
pub fn decode(data: &str) -> Result<(Board, Phase, Player), CodecError> {
    let chars: Vec<char> = data.chars().collect();
    if chars.len() != STATE_LEN {
        return Err(CodecError::Length {
            expected: STATE_LEN,
            found: chars.len(),
        });
    }

    let head = digit_value(0, chars[0])?;
    let phase = match head / 2 {
        0 => Phase::Placement,
        1 => Phase::Movement,
        2 => Phase::Complete,
        _ => return Err(CodecError::InvalidPhase(head)),
    };
    let player = if head % 2 == 0 { Player::White } else { Player::Black };

    let mut board = Board::new();
    for (i, &at) in field_table().cells().iter().enumerate() {
        let position = i + 1;
        let value = digit_value(position, chars[position])?;
        let field = match value {
            0 => Field::Empty,
            1 => Field::Anchor,
            v => {
                let height = (v + 2) / 4;
                if height > MAX_HEIGHT {
                    return Err(CodecError::HeightOverflow { field: at, height });
                }
                Field::Owned {
                    player: if (v + 2) % 2 == 0 { Player::White } else { Player::Black },
                    height,
                    anchor: (v + 2) / 2 % 2 == 1,
                }
            }
        };
        // Cells come from the field table, so they are always on the board
        board.set(at, field).map_err(|_| CodecError::InvalidDigit {
            position,
            ch: chars[position],
        })?;
    }

    Ok((board, phase, player))
}

/// Decode a state string, dropping the player to move for complete games
pub fn decode_state(data: &str) -> Result<GameState, CodecError> {
    let (board, phase, player) = decode(data)?;
    let next_player = if phase == Phase::Complete { None } else { Some(player) };
    Ok(GameState {
        board,
        phase,
        next_player,
    })
}

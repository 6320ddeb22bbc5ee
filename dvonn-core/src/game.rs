//! Game state, phase/turn derivation and move application

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::error::{ParseError, RuleError};
use crate::field::Player;
use crate::hex::{Coord, FIELD_COUNT};
use crate::movegen::{all_moves, has_moves, moves_for};

// ============================================================================
// CORE TYPES
// ============================================================================

/// Game phase. Only ever advances: Placement -> Movement -> Complete.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Phase {
    Placement = 0,
    Movement = 1,
    Complete = 2,
}

/// Game result
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Ongoing,
    WhiteWins,
    BlackWins,
    Draw,
}

/// A single move
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Place(Coord),
    Step { from: Coord, to: Coord },
    Pass,
    Resign,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Place(at) => write!(f, "{}", at),
            Move::Step { from, to } => write!(f, "{}{}", from, to),
            Move::Pass => f.write_str("PASS"),
            Move::Resign => f.write_str("RESIGN"),
        }
    }
}

impl FromStr for Move {
    type Err = ParseError;

    /// Parses `A1`, `A1B2`, `PASS` or `RESIGN` (case-insensitive)
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let upper = token.to_ascii_uppercase();
        let invalid = || ParseError::InvalidMove(token.to_string());
        match upper.as_str() {
            "PASS" => Ok(Move::Pass),
            "RESIGN" => Ok(Move::Resign),
            s if s.len() == 2 => Coord::parse(s).map(Move::Place).map_err(|_| invalid()),
            s if s.len() == 4 && s.is_ascii() => {
                let from = Coord::parse(&s[0..2]).map_err(|_| invalid())?;
                let to = Coord::parse(&s[2..4]).map_err(|_| invalid())?;
                Ok(Move::Step { from, to })
            }
            _ => Err(invalid()),
        }
    }
}

/// Phase implied by the number of moves played so far
pub fn phase_for(move_count: usize) -> Phase {
    if move_count < FIELD_COUNT {
        Phase::Placement
    } else {
        Phase::Movement
    }
}

/// Player to move after `move_count` moves. White places the last piece
/// and then also makes the first stacking move.
pub fn next_player_for(move_count: usize) -> Player {
    if move_count < FIELD_COUNT {
        Player::from_parity(move_count)
    } else {
        Player::from_parity(move_count - FIELD_COUNT)
    }
}

// ============================================================================
// GAME STATE
// ============================================================================

/// Board together with phase and player to move.
///
/// `next_player` is `None` exactly when the phase is `Complete`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub phase: Phase,
    pub next_player: Option<Player>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            board: Board::new(),
            phase: Phase::Placement,
            next_player: Some(Player::White),
        }
    }
}

impl GameState {
    /// Outcome by piece count once the game is complete
    pub fn result(&self) -> GameResult {
        if self.phase != Phase::Complete {
            return GameResult::Ongoing;
        }
        let [white, black] = self.board.scores();
        match white.cmp(&black) {
            std::cmp::Ordering::Greater => GameResult::WhiteWins,
            std::cmp::Ordering::Less => GameResult::BlackWins,
            std::cmp::Ordering::Equal => GameResult::Draw,
        }
    }
}

/// A game in progress: current state plus the moves that led to it
#[derive(Clone, Debug, Default)]
pub struct Game {
    state: GameState,
    /// Moves applied since `state` was created
    moves: Vec<Move>,
    /// Total moves played, used to derive phase and turn
    ply: usize,
    resigned: Option<Player>,
}

impl Game {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Empty board, White to place
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue from an arbitrary state, e.g. a decoded state string.
    ///
    /// The move count is reconstructed from the number of empty cells during
    /// placement and from the player to move afterwards.
    pub fn from_state(state: GameState) -> Self {
        let ply = match (state.phase, state.next_player) {
            (Phase::Placement, _) => FIELD_COUNT - state.board.empty_fields().len(),
            (_, player) => FIELD_COUNT + player.map_or(0, Player::index),
        };
        Self {
            state,
            moves: Vec::new(),
            ply,
            resigned: None,
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn board(&self) -> &Board {
        &self.state.board
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Player to move, `None` once the game is complete
    pub fn next_player(&self) -> Option<Player> {
        self.state.next_player
    }

    /// Moves applied to this game
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Player who resigned, explicitly or through an illegal pass
    pub fn resigned(&self) -> Option<Player> {
        self.resigned
    }

    /// Final outcome; a resignation loses regardless of piece count
    pub fn result(&self) -> GameResult {
        match self.resigned {
            Some(Player::White) => GameResult::BlackWins,
            Some(Player::Black) => GameResult::WhiteWins,
            None => self.state.result(),
        }
    }

    /// The one cell left during placement, which has to be filled next
    pub fn forced_placement(&self) -> Option<Coord> {
        if self.state.phase != Phase::Placement {
            return None;
        }
        match self.state.board.empty_fields().as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    // ========================================================================
    // MOVE GENERATION
    // ========================================================================

    /// All moves the player to move may make. During movement this is a
    /// lone `Pass` when no stack can move. Resigning is always possible and
    /// not listed.
    pub fn legal_moves(&self) -> Vec<Move> {
        match self.state.phase {
            Phase::Placement => self
                .state
                .board
                .empty_fields()
                .into_iter()
                .map(Move::Place)
                .collect(),
            Phase::Movement => {
                let Some(player) = self.state.next_player else {
                    return vec![];
                };
                let moves = moves_for(&self.state.board, player);
                if moves.is_empty() {
                    vec![Move::Pass]
                } else {
                    moves
                }
            }
            Phase::Complete => vec![],
        }
    }

    // ========================================================================
    // APPLY MOVE
    // ========================================================================

    /// Apply a move for the player to move. On error the game is unchanged.
    pub fn apply(&mut self, mv: Move) -> Result<(), RuleError> {
        let phase = self.state.phase;
        let player = match (phase, self.state.next_player) {
            (Phase::Complete, _) | (_, None) => return Err(RuleError::GameOver),
            (_, Some(p)) => p,
        };

        match mv {
            Move::Place(at) => {
                if phase != Phase::Placement {
                    return Err(RuleError::WrongPhase { mv, phase });
                }
                self.state.board.place(at, self.ply)?;
            }
            Move::Step { from, to } => {
                if phase != Phase::Movement {
                    return Err(RuleError::WrongPhase { mv, phase });
                }
                if !moves_for(&self.state.board, player).contains(&mv) {
                    return Err(RuleError::NotLegal { mv, player });
                }
                self.state.board.step(from, to)?;
                self.state.board.prune_disconnected();
            }
            Move::Pass => {
                if phase != Phase::Movement {
                    return Err(RuleError::WrongPhase { mv, phase });
                }
                if has_moves(&self.state.board, player) {
                    tracing::warn!("{:?} passed with moves available; treating as resignation", player);
                    self.resign(player, mv);
                    return Ok(());
                }
            }
            Move::Resign => {
                self.resign(player, mv);
                return Ok(());
            }
        }

        self.moves.push(mv);
        self.ply += 1;
        self.advance_turn();
        tracing::debug!("Applied {} by {:?} (ply {})", mv, player, self.ply);
        Ok(())
    }

    fn resign(&mut self, player: Player, mv: Move) {
        self.moves.push(mv);
        self.ply += 1;
        self.resigned = Some(player);
        self.finish();
    }

    fn advance_turn(&mut self) {
        let phase = phase_for(self.ply);
        if phase != self.state.phase {
            tracing::info!("Entering {:?} phase", phase);
        }
        self.state.phase = phase;
        self.state.next_player = Some(next_player_for(self.ply));

        if phase == Phase::Movement && all_moves(&self.state.board).is_empty() {
            self.finish();
        }
    }

    fn finish(&mut self) {
        self.state.phase = Phase::Complete;
        self.state.next_player = None;
        let [white, black] = self.state.board.scores();
        tracing::info!("Game complete: {} - {}", white, black);
    }
}

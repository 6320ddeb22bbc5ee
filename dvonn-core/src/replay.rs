//! Replaying move lists into a per-move state history

use serde::Serialize;

use crate::codec::encode_state;
use crate::error::DvonnError;
use crate::game::{Game, GameState, Move};

/// Replay configuration
#[derive(Clone, Debug, Default)]
pub struct ReplayOptions {
    /// Only replay this many moves from the input. The history then ends
    /// at exactly that many snapshots; a last empty cell left by the cut is
    /// not filled in.
    pub truncate: Option<usize>,
}

/// State after one applied move
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub mv: Move,
    pub state: GameState,
}

/// Move and encoded state, as written to JSON history exports
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HistoryRecord {
    #[serde(rename = "move")]
    pub mv: String,
    pub state: String,
}

/// Applies moves to a game and records a snapshot after each one
#[derive(Clone, Debug, Default)]
pub struct Replayer {
    game: Game,
    history: Vec<Snapshot>,
    /// Input moves consumed so far, for error positions
    consumed: usize,
}

impl Replayer {
    /// Start from the empty board
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing game, e.g. one restored from a state string
    pub fn from_game(game: Game) -> Self {
        Self {
            game,
            history: Vec::new(),
            consumed: 0,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn history(&self) -> &[Snapshot] {
        &self.history
    }

    /// Apply moves in order, stopping at the first illegal one.
    ///
    /// Whenever only one cell is left to fill, including before the first
    /// move of a game resumed mid-placement, it is placed automatically
    /// unless the next supplied move is that very placement.
    pub fn play(&mut self, moves: &[Move]) -> Result<(), DvonnError> {
        self.play_moves(moves, true)
    }

    /// With `fill_last` unset, the history ends at the last supplied move
    /// even if it leaves a single empty cell.
    fn play_moves(&mut self, moves: &[Move], fill_last: bool) -> Result<(), DvonnError> {
        if !moves.is_empty() || fill_last {
            self.fill_forced(moves.first())?;
        }
        for (i, &mv) in moves.iter().enumerate() {
            let index = self.consumed;
            self.apply(index, mv)?;
            self.consumed += 1;

            if i + 1 < moves.len() || fill_last {
                self.fill_forced(moves.get(i + 1))?;
            }
        }
        Ok(())
    }

    fn fill_forced(&mut self, next: Option<&Move>) -> Result<(), DvonnError> {
        if let Some(at) = self.game.forced_placement() {
            let forced = Move::Place(at);
            if next != Some(&forced) {
                tracing::debug!("Filling last empty field {}", at);
                let index = self.consumed;
                self.apply(index, forced)?;
            }
        }
        Ok(())
    }

    fn apply(&mut self, index: usize, mv: Move) -> Result<(), DvonnError> {
        self.game
            .apply(mv)
            .map_err(|reason| DvonnError::IllegalMove { index, mv, reason })?;
        self.history.push(Snapshot {
            mv,
            state: self.game.state().clone(),
        });
        Ok(())
    }

    /// Encode every snapshot for export
    pub fn records(&self) -> Result<Vec<HistoryRecord>, DvonnError> {
        self.history
            .iter()
            .map(|snap| {
                Ok(HistoryRecord {
                    mv: snap.mv.to_string(),
                    state: encode_state(&snap.state)?,
                })
            })
            .collect()
    }
}

/// Replay a move list from the empty board
pub fn replay(moves: &[Move], options: &ReplayOptions) -> Result<Replayer, DvonnError> {
    let (moves, truncated) = match options.truncate {
        Some(n) if n < moves.len() => (&moves[..n], true),
        _ => (moves, false),
    };
    let mut replayer = Replayer::new();
    replayer.play_moves(moves, !truncated)?;
    tracing::debug!(
        "Replayed {} moves into {} snapshots",
        moves.len(),
        replayer.history().len()
    );
    Ok(replayer)
}

//! Field contents: empty cells, anchor pieces and owned stacks

use serde::{Deserialize, Serialize};

/// Player color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    White = 0,
    Black = 1,
}

impl Player {
    /// White for even numbers, Black for odd
    pub fn from_parity(n: usize) -> Self {
        if n % 2 == 0 {
            Player::White
        } else {
            Player::Black
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Contents of a single cell.
///
/// An `Anchor` is a lone neutral (DVONN) piece. Once anything is stacked on
/// it, or it is stacked on something, the result is `Owned` with `anchor`
/// set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    #[default]
    Empty,
    Anchor,
    Owned {
        player: Player,
        height: u8,
        anchor: bool,
    },
}

impl Field {
    pub fn is_empty(&self) -> bool {
        matches!(self, Field::Empty)
    }

    pub fn is_occupied(&self) -> bool {
        !self.is_empty()
    }

    /// Number of pieces on the cell
    pub fn height(&self) -> u8 {
        match *self {
            Field::Empty => 0,
            Field::Anchor => 1,
            Field::Owned { height, .. } => height,
        }
    }

    /// Controlling player, if any
    pub fn owner(&self) -> Option<Player> {
        match *self {
            Field::Owned { player, .. } => Some(player),
            _ => None,
        }
    }

    /// Whether the cell holds at least one anchor piece
    pub fn has_anchor(&self) -> bool {
        match *self {
            Field::Empty => false,
            Field::Anchor => true,
            Field::Owned { anchor, .. } => anchor,
        }
    }
}

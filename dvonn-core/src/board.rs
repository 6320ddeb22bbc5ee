//! Board state and the placement, stacking and pruning operators

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RuleError;
use crate::field::{Field, Player};
use crate::hex::{field_table, Coord, HEIGHT, WIDTH};

/// Number of anchor (DVONN) pieces placed at the start of the game
pub const ANCHOR_COUNT: usize = 3;

/// The 11x5 grid of fields. Cells outside the hex area are always empty.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    fields: [[Field; WIDTH]; HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Empty board
    pub fn new() -> Self {
        Self {
            fields: [[Field::Empty; WIDTH]; HEIGHT],
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    /// Contents of a cell; anything off the board reads as empty
    pub fn get(&self, at: Coord) -> Field {
        if at.is_valid() {
            self.fields[at.y as usize][at.x as usize]
        } else {
            Field::Empty
        }
    }

    /// Overwrite a cell. Owned stacks must hold at least one piece.
    pub fn set(&mut self, at: Coord, field: Field) -> Result<(), RuleError> {
        if !at.is_valid() {
            return Err(RuleError::OffBoard(at));
        }
        if matches!(field, Field::Owned { height: 0, .. }) {
            return Err(RuleError::EmptyStack(at));
        }
        self.fields[at.y as usize][at.x as usize] = field;
        Ok(())
    }

    /// Reset a cell to empty (no-op off the board)
    pub fn clear(&mut self, at: Coord) {
        if at.is_valid() {
            self.fields[at.y as usize][at.x as usize] = Field::Empty;
        }
    }

    /// Iterate playable cells in row-major order
    pub fn fields(&self) -> impl Iterator<Item = (Coord, Field)> + '_ {
        field_table().cells().iter().map(move |&c| (c, self.get(c)))
    }

    /// Playable cells that hold nothing
    pub fn empty_fields(&self) -> Vec<Coord> {
        self.fields()
            .filter(|(_, f)| f.is_empty())
            .map(|(c, _)| c)
            .collect()
    }

    /// Total pieces controlled by each player, indexed by `Player::index`
    pub fn scores(&self) -> [u32; 2] {
        let mut scores = [0; 2];
        for (_, field) in self.fields() {
            if let Some(player) = field.owner() {
                scores[player.index()] += u32::from(field.height());
            }
        }
        scores
    }

    // ========================================================================
    // OPERATORS
    // ========================================================================

    /// Put a single piece on an empty cell. The first three placements are
    /// anchors; later ones belong to the player whose parity matches
    /// `move_index`.
    pub fn place(&mut self, at: Coord, move_index: usize) -> Result<(), RuleError> {
        if !at.is_valid() {
            return Err(RuleError::OffBoard(at));
        }
        if self.get(at).is_occupied() {
            return Err(RuleError::Occupied(at));
        }

        let field = if move_index < ANCHOR_COUNT {
            Field::Anchor
        } else {
            Field::Owned {
                player: Player::from_parity(move_index),
                height: 1,
                anchor: false,
            }
        };
        self.set(at, field)
    }

    /// Move the whole stack on `from` on top of the stack on `to`.
    ///
    /// The mover's owner controls the merged stack. A lone anchor has no
    /// owner, so when it is the mover the destination keeps its owner.
    pub fn step(&mut self, from: Coord, to: Coord) -> Result<(), RuleError> {
        for at in [from, to] {
            if !at.is_valid() {
                return Err(RuleError::OffBoard(at));
            }
        }

        let src = self.get(from);
        let dst = self.get(to);
        if src.is_empty() {
            return Err(RuleError::EmptyField(from));
        }
        if dst.is_empty() {
            return Err(RuleError::EmptyField(to));
        }

        let player = src
            .owner()
            .or(dst.owner())
            .ok_or(RuleError::AnchorOntoAnchor { from, to })?;

        self.set(
            to,
            Field::Owned {
                player,
                height: src.height() + dst.height(),
                anchor: src.has_anchor() || dst.has_anchor(),
            },
        )?;
        self.clear(from);
        Ok(())
    }

    /// Remove every stack with no path of occupied neighbours to a stack
    /// holding an anchor. Returns the number of cells cleared.
    pub fn prune_disconnected(&mut self) -> usize {
        let mut reachable = [[false; WIDTH]; HEIGHT];
        let mut pending: Vec<Coord> = self
            .fields()
            .filter(|(_, f)| f.has_anchor())
            .map(|(c, _)| c)
            .collect();

        for c in &pending {
            reachable[c.y as usize][c.x as usize] = true;
        }

        while let Some(c) = pending.pop() {
            for n in c.neighbors() {
                if self.get(n).is_occupied() && !reachable[n.y as usize][n.x as usize] {
                    reachable[n.y as usize][n.x as usize] = true;
                    pending.push(n);
                }
            }
        }

        let doomed: Vec<Coord> = self
            .fields()
            .filter(|(c, f)| f.is_occupied() && !reachable[c.y as usize][c.x as usize])
            .map(|(c, _)| c)
            .collect();

        for &c in &doomed {
            self.clear(c);
        }
        if !doomed.is_empty() {
            tracing::debug!("Pruned {} disconnected stacks", doomed.len());
        }
        doomed.len()
    }
}

/// Plain-text diagram: one line per row, each cell as owner marker
/// (`+` white, `-` black), height digit (`.` when empty) and `*` for anchors.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const HEIGHTS: &[u8] = b".123456789abcdefghijklmnopqrstuvwxyz";

        for y in 0..HEIGHT as i8 {
            let indent = (y - HEIGHT as i8 / 2).unsigned_abs() as usize;
            let mut line = "  ".repeat(indent);
            for x in 0..WIDTH as i8 {
                let at = Coord::new(x, y);
                if !at.is_valid() {
                    continue;
                }
                let field = self.get(at);
                let marker = match field.owner() {
                    Some(Player::White) => '+',
                    Some(Player::Black) => '-',
                    None => ' ',
                };
                let height = HEIGHTS
                    .get(field.height() as usize)
                    .map_or('#', |&b| b as char);
                let anchor = if field.has_anchor() { '*' } else { ' ' };
                line.push(' ');
                line.push(marker);
                line.push(height);
                line.push(anchor);
            }
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(id: &str) -> Coord {
        Coord::parse(id).unwrap()
    }

    fn owned(player: Player, height: u8, anchor: bool) -> Field {
        Field::Owned { player, height, anchor }
    }

    #[test]
    fn test_place_anchors_then_players() {
        let mut board = Board::new();
        board.place(c("A1"), 0).unwrap();
        board.place(c("B1"), 2).unwrap();
        board.place(c("C1"), 3).unwrap();
        board.place(c("D1"), 4).unwrap();

        assert_eq!(board.get(c("A1")), Field::Anchor);
        assert_eq!(board.get(c("B1")), Field::Anchor);
        assert_eq!(board.get(c("C1")), owned(Player::Black, 1, false));
        assert_eq!(board.get(c("D1")), owned(Player::White, 1, false));
    }

    #[test]
    fn test_place_rejects_occupied_and_off_board() {
        let mut board = Board::new();
        board.place(c("E3"), 5).unwrap();
        assert_eq!(board.place(c("E3"), 6), Err(RuleError::Occupied(c("E3"))));
        // Corner of the rectangle that is not part of the hex
        let corner = Coord::new(10, 0);
        assert_eq!(board.place(corner, 6), Err(RuleError::OffBoard(corner)));
    }

    #[test]
    fn test_set_rejects_empty_stack() {
        let mut board = Board::new();
        assert_eq!(
            board.set(c("D2"), owned(Player::White, 0, false)),
            Err(RuleError::EmptyStack(c("D2")))
        );
        assert_eq!(board.get(c("D2")), Field::Empty);
        board.set(c("D2"), owned(Player::White, 1, false)).unwrap();
    }

    #[test]
    fn test_step_merges_stacks() {
        let mut board = Board::new();
        board.set(c("C3"), owned(Player::White, 2, false)).unwrap();
        board.set(c("E3"), owned(Player::Black, 3, true)).unwrap();

        board.step(c("C3"), c("E3")).unwrap();
        assert_eq!(board.get(c("C3")), Field::Empty);
        assert_eq!(board.get(c("E3")), owned(Player::White, 5, true));
    }

    #[test]
    fn test_step_anchor_source_keeps_destination_owner() {
        let mut board = Board::new();
        board.set(c("C3"), Field::Anchor).unwrap();
        board.set(c("D3"), owned(Player::Black, 1, false)).unwrap();
        board.step(c("C3"), c("D3")).unwrap();
        assert_eq!(board.get(c("D3")), owned(Player::Black, 2, true));

        board.set(c("F3"), Field::Anchor).unwrap();
        board.set(c("G3"), Field::Anchor).unwrap();
        assert!(matches!(
            board.step(c("F3"), c("G3")),
            Err(RuleError::AnchorOntoAnchor { .. })
        ));
        assert_eq!(board.get(c("F3")), Field::Anchor);
    }

    #[test]
    fn test_step_requires_occupied_ends() {
        let mut board = Board::new();
        board.set(c("C3"), owned(Player::White, 1, false)).unwrap();
        assert_eq!(board.step(c("C3"), c("D3")), Err(RuleError::EmptyField(c("D3"))));
        assert_eq!(board.step(c("D3"), c("C3")), Err(RuleError::EmptyField(c("D3"))));
        assert_eq!(board.get(c("C3")), owned(Player::White, 1, false));
    }

    #[test]
    fn test_prune_disconnected() {
        let mut board = Board::new();
        // Chain A1-B1-C1 attached to an anchor, D3 and E3 isolated
        board.set(c("A1"), Field::Anchor).unwrap();
        board.set(c("B1"), owned(Player::White, 1, false)).unwrap();
        board.set(c("C1"), owned(Player::Black, 2, false)).unwrap();
        board.set(c("D3"), owned(Player::White, 1, false)).unwrap();
        board.set(c("E3"), owned(Player::Black, 1, false)).unwrap();
        // Stack containing an anchor seeds its own component
        board.set(c("I5"), owned(Player::Black, 2, true)).unwrap();

        let removed = board.prune_disconnected();
        assert_eq!(removed, 2);
        assert_eq!(board.get(c("D3")), Field::Empty);
        assert_eq!(board.get(c("E3")), Field::Empty);
        assert!(board.get(c("C1")).is_occupied());
        assert!(board.get(c("I5")).is_occupied());

        // Running again changes nothing
        assert_eq!(board.prune_disconnected(), 0);
    }

    #[test]
    fn test_prune_without_anchors_clears_everything() {
        let mut board = Board::new();
        board.set(c("C3"), owned(Player::White, 1, false)).unwrap();
        board.set(c("D3"), owned(Player::Black, 1, false)).unwrap();
        assert_eq!(board.prune_disconnected(), 2);
        assert!(board.empty_fields().len() == crate::hex::FIELD_COUNT);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut board = Board::new();
        board.set(c("C3"), owned(Player::White, 1, false)).unwrap();
        let snapshot = board.clone();
        board.clear(c("C3"));
        assert!(snapshot.get(c("C3")).is_occupied());
        assert!(board.get(c("C3")).is_empty());
    }

    #[test]
    fn test_scores() {
        let mut board = Board::new();
        board.set(c("A1"), Field::Anchor).unwrap();
        board.set(c("B1"), owned(Player::White, 4, true)).unwrap();
        board.set(c("C1"), owned(Player::Black, 2, false)).unwrap();
        board.set(c("D1"), owned(Player::White, 1, false)).unwrap();
        assert_eq!(board.scores(), [5, 2]);
    }

    #[test]
    fn test_plain_rendering() {
        let mut board = Board::new();
        board.set(c("A1"), Field::Anchor).unwrap();
        board.set(c("B1"), owned(Player::Black, 12, true)).unwrap();
        let text = board.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("      1* -c*  . "));
        assert!(lines[2].starts_with("  . "));
    }
}

//! Stacking move generation
//!
//! A stack moves in a straight line exactly as many cells as it is high and
//! must land on an occupied cell. Only stacks with at least one open side
//! may move, and lone anchors never move on their own.

use crate::board::Board;
use crate::field::Player;
use crate::game::Move;
use crate::hex::{Coord, DIRECTIONS};

/// Whether the stack on `at` can be moved by its owner.
///
/// A side counts as open when the neighbouring position is empty or not a
/// playable cell at all, so stacks on the rim are always mobile.
pub fn is_mobile(board: &Board, at: Coord) -> bool {
    if board.get(at).owner().is_none() {
        return false;
    }
    at.neighbors().iter().any(|&n| board.get(n).is_empty())
}

/// Every stacking move available to either player
pub fn all_moves(board: &Board) -> Vec<Move> {
    let mut moves = Vec::new();
    for (from, field) in board.fields() {
        if !is_mobile(board, from) {
            continue;
        }
        generate_stack_moves(board, from, field.height(), &mut moves);
    }
    moves
}

/// Stacking moves whose source stack belongs to `player`
pub fn moves_for(board: &Board, player: Player) -> Vec<Move> {
    all_moves(board)
        .into_iter()
        .filter(|mv| match *mv {
            Move::Step { from, .. } => board.get(from).owner() == Some(player),
            _ => false,
        })
        .collect()
}

/// Whether `player` has at least one stacking move
pub fn has_moves(board: &Board, player: Player) -> bool {
    board.fields().any(|(from, field)| {
        field.owner() == Some(player)
            && is_mobile(board, from)
            && (0..DIRECTIONS.len())
                .any(|d| board.get(from.offset(d, field.height() as i8)).is_occupied())
    })
}

fn generate_stack_moves(board: &Board, from: Coord, height: u8, moves: &mut Vec<Move>) {
    for d in 0..DIRECTIONS.len() {
        let to = from.offset(d, height as i8);
        if board.get(to).is_occupied() {
            moves.push(Move::Step { from, to });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Field;

    fn c(id: &str) -> Coord {
        Coord::parse(id).unwrap()
    }

    fn owned(player: Player, height: u8) -> Field {
        Field::Owned { player, height, anchor: false }
    }

    #[test]
    fn test_surrounded_stack_is_immobile() {
        let mut board = Board::new();
        let centre = c("E3");
        board.set(centre, owned(Player::White, 1)).unwrap();
        assert!(is_mobile(&board, centre));

        for n in centre.neighbors() {
            board.set(n, owned(Player::Black, 1)).unwrap();
        }
        assert!(!is_mobile(&board, centre));
        assert!(moves_for(&board, Player::White).is_empty());
    }

    #[test]
    fn test_rim_stack_is_mobile() {
        let mut board = Board::new();
        board.set(c("A1"), owned(Player::White, 1)).unwrap();
        board.set(c("B1"), owned(Player::Black, 1)).unwrap();
        board.set(c("A2"), owned(Player::Black, 1)).unwrap();
        board.set(c("B2"), owned(Player::Black, 1)).unwrap();
        // Remaining neighbours of A1 are off the board
        assert!(is_mobile(&board, c("A1")));
    }

    #[test]
    fn test_anchor_never_moves() {
        let mut board = Board::new();
        board.set(c("E3"), Field::Anchor).unwrap();
        board.set(c("F3"), owned(Player::White, 1)).unwrap();
        assert!(!is_mobile(&board, c("E3")));
        let moves = all_moves(&board);
        assert_eq!(moves, vec![Move::Step { from: c("F3"), to: c("E3") }]);
    }

    #[test]
    fn test_move_distance_equals_height() {
        let mut board = Board::new();
        board.set(c("C3"), owned(Player::White, 2)).unwrap();
        board.set(c("D3"), owned(Player::Black, 1)).unwrap();
        board.set(c("E3"), owned(Player::Black, 1)).unwrap();

        let moves = moves_for(&board, Player::White);
        assert_eq!(moves, vec![Move::Step { from: c("C3"), to: c("E3") }]);

        for mv in all_moves(&board) {
            if let Move::Step { from, to } = mv {
                assert!(board.get(to).is_occupied());
                assert_eq!(from.distance_to(to), board.get(from).height() as i8);
            }
        }
    }

    #[test]
    fn test_has_moves_matches_moves_for() {
        let mut board = Board::new();
        board.set(c("C3"), owned(Player::White, 3)).unwrap();
        board.set(c("D3"), owned(Player::Black, 1)).unwrap();
        assert!(!has_moves(&board, Player::White));
        assert!(has_moves(&board, Player::Black));
        assert_eq!(moves_for(&board, Player::Black).len(), 1);
    }
}

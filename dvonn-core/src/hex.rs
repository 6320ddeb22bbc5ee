//! Hex board geometry on a rectangular grid
//!
//! The DVONN board is stored as an 11x5 rectangle in which 49 cells form
//! the playing area. Coordinates are `(x, y)` with `x` the column (`A`..`K`)
//! and `y` the row (`1`..`5`). Neighbouring cells differ by one of six
//! offsets; the rows are skewed so that `(x+1, y+1)` is adjacent.

use std::fmt;
use std::sync::OnceLock;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Grid width (columns `A`..`K`)
pub const WIDTH: usize = 11;

/// Grid height (rows `1`..`5`)
pub const HEIGHT: usize = 5;

/// Number of playable cells
pub const FIELD_COUNT: usize = 49;

const CENTER: Coord = Coord::new((WIDTH / 2) as i8, (HEIGHT / 2) as i8);

/// Maximum distance from the centre for a cell to be on the board (half the longer side)
const RADIUS: i8 = (WIDTH / 2) as i8;

/// Direction vectors (dx, dy) in counter-clockwise order
/// Index: 0=E, 1=NE, 2=NW, 3=W, 4=SW, 5=SE
pub const DIRECTIONS: [(i8, i8); 6] = [
    (1, 0),   // E
    (0, -1),  // NE
    (-1, -1), // NW
    (-1, 0),  // W
    (0, 1),   // SW
    (1, 1),   // SE
];

/// Grid coordinates of a cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub x: i8,
    pub y: i8,
}

impl Coord {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// Inside the 11x5 rectangle (not necessarily a playable cell)
    pub fn in_envelope(&self) -> bool {
        self.x >= 0 && (self.x as usize) < WIDTH && self.y >= 0 && (self.y as usize) < HEIGHT
    }

    /// Check if this cell is part of the hex-shaped playing area
    pub fn is_valid(&self) -> bool {
        self.in_envelope() && CENTER.distance_to(*self) <= RADIUS
    }

    /// Number of single steps between two cells
    pub fn distance_to(&self, other: Coord) -> i8 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = dy - dx;
        dx.abs().max(dy.abs()).max(dz.abs())
    }

    /// Get neighbor in direction (0-5)
    pub fn neighbor(&self, direction: usize) -> Coord {
        self.offset(direction, 1)
    }

    /// Cell `distance` steps away along a direction
    pub fn offset(&self, direction: usize, distance: i8) -> Coord {
        let (dx, dy) = DIRECTIONS[direction % 6];
        Coord::new(self.x + dx * distance, self.y + dy * distance)
    }

    /// All six neighbouring positions, including ones off the board
    pub fn neighbors(&self) -> [Coord; 6] {
        std::array::from_fn(|d| self.neighbor(d))
    }

    /// Parse a field identifier such as `"C4"` (letter case is ignored)
    pub fn parse(id: &str) -> Result<Coord, ParseError> {
        field_table().coord(id)
    }

    /// Position of this cell in row-major order over the playable cells
    pub fn index(&self) -> Option<usize> {
        field_table().index_of(*self)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.in_envelope() {
            write!(f, "{}{}", (b'A' + self.x as u8) as char, (b'1' + self.y as u8) as char)
        } else {
            write!(f, "({},{})", self.x, self.y)
        }
    }
}

// ============================================================================
// FIELD TABLE
// ============================================================================

/// Immutable lookup between field identifiers and coordinates.
///
/// Built once on first use by [`field_table`]; never mutated afterwards.
#[derive(Debug)]
pub struct FieldTable {
    by_id: FxHashMap<String, Coord>,
    cells: Vec<Coord>,
    index: [[Option<u8>; WIDTH]; HEIGHT],
}

impl FieldTable {
    fn build() -> Self {
        let mut by_id = FxHashMap::default();
        let mut cells = Vec::with_capacity(FIELD_COUNT);
        let mut index = [[None; WIDTH]; HEIGHT];

        for y in 0..HEIGHT {
            for x in 0..WIDTH {
                let coord = Coord::new(x as i8, y as i8);
                if coord.is_valid() {
                    index[y][x] = Some(cells.len() as u8);
                    by_id.insert(coord.to_string(), coord);
                    cells.push(coord);
                }
            }
        }

        Self { by_id, cells, index }
    }

    /// Playable cells in row-major order
    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    /// Look up a field identifier
    pub fn coord(&self, id: &str) -> Result<Coord, ParseError> {
        self.by_id
            .get(&id.to_ascii_uppercase())
            .copied()
            .ok_or_else(|| ParseError::InvalidField(id.to_string()))
    }

    /// Row-major index of a playable cell
    pub fn index_of(&self, coord: Coord) -> Option<usize> {
        if !coord.in_envelope() {
            return None;
        }
        self.index[coord.y as usize][coord.x as usize].map(usize::from)
    }
}

/// The process-wide field table
pub fn field_table() -> &'static FieldTable {
    static TABLE: OnceLock<FieldTable> = OnceLock::new();
    TABLE.get_or_init(FieldTable::build)
}

//! Cells, wall bitsets and grid directions.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// Wall bits per cell.
// 1=up, 2=right, 4=down, 8=left.
pub const W_UP: u8 = 1;
pub const W_RIGHT: u8 = 2;
pub const W_DOWN: u8 = 4;
pub const W_LEFT: u8 = 8;
pub const W_ALL: u8 = W_UP | W_RIGHT | W_DOWN | W_LEFT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// All directions, in the order the generator scans neighbours.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    pub fn from_action_str(action: &str) -> Option<Self> {
        match action {
            "up" | "w" => Some(Direction::Up),
            "right" | "d" => Some(Direction::Right),
            "down" | "s" => Some(Direction::Down),
            "left" | "a" => Some(Direction::Left),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Right => "right",
            Direction::Down => "down",
            Direction::Left => "left",
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }

    #[inline]
    pub fn wall_bit(self) -> u8 {
        match self {
            Direction::Up => W_UP,
            Direction::Right => W_RIGHT,
            Direction::Down => W_DOWN,
            Direction::Left => W_LEFT,
        }
    }
}

/// Grid-relative position. This is the canonical identity of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const ORIGIN: Coord = Coord { row: 0, col: 0 };

    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The neighbouring coordinate in `dir`, or `None` if it falls outside a
    /// `rows x cols` grid.
    pub fn step(self, dir: Direction, rows: usize, cols: usize) -> Option<Coord> {
        let (row, col) = match dir {
            Direction::Up => (self.row.checked_sub(1)?, self.col),
            Direction::Right => (self.row, self.col.checked_add(1)?),
            Direction::Down => (self.row.checked_add(1)?, self.col),
            Direction::Left => (self.row, self.col.checked_sub(1)?),
        };
        if row < rows && col < cols {
            Some(Coord { row, col })
        } else {
            None
        }
    }

    /// Direction from `self` to an adjacent `other`, if they are adjacent.
    pub fn direction_to(self, other: Coord) -> Option<Direction> {
        if self.col == other.col && self.row == other.row.wrapping_add(1) {
            Some(Direction::Up)
        } else if self.row == other.row && self.col.wrapping_add(1) == other.col {
            Some(Direction::Right)
        } else if self.col == other.col && self.row.wrapping_add(1) == other.row {
            Some(Direction::Down)
        } else if self.row == other.row && self.col == other.col.wrapping_add(1) {
            Some(Direction::Left)
        } else {
            None
        }
    }
}

/// Four wall flags packed into one byte. A set bit means the wall is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Walls(u8);

impl Walls {
    pub const fn all() -> Self {
        Walls(W_ALL)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn has(self, dir: Direction) -> bool {
        self.0 & dir.wall_bit() != 0
    }

    /// Number of walls still standing.
    pub fn count(self) -> u32 {
        (self.0 & W_ALL).count_ones()
    }

    pub(crate) fn remove(&mut self, dir: Direction) {
        self.0 &= !dir.wall_bit();
    }
}

impl Default for Walls {
    fn default() -> Self {
        Self::all()
    }
}

/// A single maze cell: its walls plus the flags generation and navigation set on it.
///
/// Cells are only mutated through [`crate::grid::Grid`], which keeps the pairwise wall
/// invariant and the single-`current` invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cell {
    coord: Coord,
    pub(crate) walls: Walls,
    pub(crate) visited: bool,
    pub(crate) current: bool,
    pub(crate) backtracked: bool,
    pub(crate) start: bool,
    pub(crate) end: bool,
    pub(crate) step_index: Option<usize>,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Self {
            coord: Coord::new(row, col),
            walls: Walls::all(),
            visited: false,
            current: false,
            backtracked: false,
            start: false,
            end: false,
            step_index: None,
        }
    }

    pub fn coord(&self) -> Coord {
        self.coord
    }

    pub fn row(&self) -> usize {
        self.coord.row
    }

    pub fn col(&self) -> usize {
        self.coord.col
    }

    pub fn walls(&self) -> Walls {
        self.walls
    }

    pub fn has_wall(&self, dir: Direction) -> bool {
        self.walls.has(dir)
    }

    /// Set once the generator first reaches this cell.
    pub fn is_visited(&self) -> bool {
        self.visited
    }

    /// Live position of the generation cursor or the navigation agent.
    pub fn is_current(&self) -> bool {
        self.current
    }

    /// The generator's stack popped back into this cell at least once.
    pub fn is_backtracked(&self) -> bool {
        self.backtracked
    }

    pub fn is_start(&self) -> bool {
        self.start
    }

    pub fn is_end(&self) -> bool {
        self.end
    }

    /// Order in which generation first reached this cell (`Some(0)` for the origin).
    pub fn step_index(&self) -> Option<usize> {
        self.step_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_is_bounds_checked() {
        let c = Coord::new(0, 0);
        assert_eq!(c.step(Direction::Up, 3, 3), None);
        assert_eq!(c.step(Direction::Left, 3, 3), None);
        assert_eq!(c.step(Direction::Right, 3, 3), Some(Coord::new(0, 1)));
        assert_eq!(c.step(Direction::Down, 3, 3), Some(Coord::new(1, 0)));

        let corner = Coord::new(2, 2);
        assert_eq!(corner.step(Direction::Down, 3, 3), None);
        assert_eq!(corner.step(Direction::Right, 3, 3), None);
        assert_eq!(Coord::ORIGIN.step(Direction::Right, 1, 1), None);
    }

    #[test]
    fn direction_to_matches_step() {
        let c = Coord::new(1, 1);
        for dir in Direction::ALL {
            let n = c.step(dir, 3, 3).unwrap();
            assert_eq!(c.direction_to(n), Some(dir));
            assert_eq!(n.direction_to(c), Some(dir.opposite()));
        }
        assert_eq!(c.direction_to(Coord::new(2, 2)), None);
        assert_eq!(c.direction_to(c), None);
    }

    #[test]
    fn walls_start_up_and_remove_independently() {
        let mut w = Walls::default();
        assert_eq!(w.bits(), W_ALL);
        w.remove(Direction::Right);
        assert!(!w.has(Direction::Right));
        assert!(w.has(Direction::Up) && w.has(Direction::Down) && w.has(Direction::Left));
        assert_eq!(w.count(), 3);
    }

    #[test]
    fn action_strings_parse() {
        for dir in Direction::ALL {
            assert_eq!(Direction::from_action_str(dir.as_str()), Some(dir));
        }
        assert_eq!(Direction::from_action_str("w"), Some(Direction::Up));
        assert_eq!(Direction::from_action_str("jump"), None);
    }
}

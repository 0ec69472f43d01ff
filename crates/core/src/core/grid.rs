//! The maze grid: cell storage plus generation/navigation-wide state.

use crate::cell::{Cell, Coord, Direction};
use crate::config::{check_dimensions, MazeConfig};
use crate::error::MazeError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Lifecycle of a grid, from construction to a solved maze.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Phase {
    /// All walls up, all flags clear.
    Pristine,
    /// A generation iterator has started carving (or was dropped part way).
    Generating,
    /// Maze generated; start/end assigned; agent idle.
    Ready,
    Navigating,
    /// The agent reached the end cell. Only a reset leaves this phase.
    Solved,
}

impl Phase {
    pub fn name(self) -> &'static str {
        match self {
            Phase::Pristine => "pristine",
            Phase::Generating => "generating",
            Phase::Ready => "ready",
            Phase::Navigating => "navigating",
            Phase::Solved => "solved",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    current: Option<Coord>,
    start: Option<Coord>,
    end: Option<Coord>,
    // Insertion-ordered navigation set, with a row-major membership bitmap.
    nav_visited: Vec<Coord>,
    nav_member: Vec<bool>,
    phase: Phase,
    dirty: Vec<bool>,
}

impl Grid {
    /// A pristine grid with every wall up.
    ///
    /// # Panics
    /// Panics if either side exceeds [`MazeConfig::MAX_SIDE`]. Use [`Grid::try_new`] for
    /// untrusted sizes.
    pub fn new(rows: usize, cols: usize) -> Self {
        assert!(
            rows <= MazeConfig::MAX_SIDE && cols <= MazeConfig::MAX_SIDE,
            "grid {rows}x{cols} exceeds the {} cell side limit",
            MazeConfig::MAX_SIDE
        );
        let mut cells = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                cells.push(Cell::new(row, col));
            }
        }
        let len = cells.len();
        Self {
            rows,
            cols,
            cells,
            current: None,
            start: None,
            end: None,
            nav_visited: Vec::new(),
            nav_member: vec![false; len],
            phase: Phase::Pristine,
            dirty: vec![true; len],
        }
    }

    pub fn try_new(rows: usize, cols: usize) -> Result<Self, MazeError> {
        check_dimensions(rows, cols)?;
        Ok(Self::new(rows, cols))
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn idx(&self, c: Coord) -> Option<usize> {
        if c.row < self.rows && c.col < self.cols {
            Some(c.row * self.cols + c.col)
        } else {
            None
        }
    }

    pub fn contains(&self, c: Coord) -> bool {
        self.idx(c).is_some()
    }

    pub fn cell(&self, c: Coord) -> Option<&Cell> {
        self.idx(c).map(|i| &self.cells[i])
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.cells.iter()
    }

    /// One row of cells, left to right.
    pub fn row(&self, row: usize) -> &[Cell] {
        if row >= self.rows {
            return &[];
        }
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }

    pub fn current(&self) -> Option<Coord> {
        self.current
    }

    pub fn start(&self) -> Option<Coord> {
        self.start
    }

    pub fn end(&self) -> Option<Coord> {
        self.end
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_generating(&self) -> bool {
        self.phase == Phase::Generating
    }

    pub fn is_navigating(&self) -> bool {
        self.phase == Phase::Navigating
    }

    /// Generation has completed (the maze may since have been solved).
    pub fn is_generated(&self) -> bool {
        matches!(self.phase, Phase::Ready | Phase::Navigating | Phase::Solved)
    }

    /// Cells the agent has stood on since the last soft reset, in arrival order.
    pub fn visited_during_navigation(&self) -> &[Coord] {
        &self.nav_visited
    }

    pub fn was_visited_during_navigation(&self, c: Coord) -> bool {
        self.idx(c).map(|i| self.nav_member[i]).unwrap_or(false)
    }

    /// In-bounds neighbours of `c`, scanned up, right, down, left.
    pub fn neighbors(&self, c: Coord) -> impl Iterator<Item = (Direction, Coord)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |dir| c.step(dir, self.rows, self.cols).map(|n| (dir, n)))
    }

    /// `true` iff the neighbour of `c` in `dir` is in bounds and no wall separates them.
    pub fn is_open(&self, c: Coord, dir: Direction) -> bool {
        match (self.cell(c), c.step(dir, self.rows, self.cols)) {
            (Some(cell), Some(_)) => !cell.has_wall(dir),
            _ => false,
        }
    }

    /// Number of wall pairs removed so far.
    pub fn open_passages(&self) -> usize {
        self.cells
            .iter()
            .map(|cell| {
                let c = cell.coord();
                usize::from(self.is_open(c, Direction::Right))
                    + usize::from(self.is_open(c, Direction::Down))
            })
            .sum()
    }

    fn cell_mut(&mut self, c: Coord) -> Option<&mut Cell> {
        let i = self.idx(c)?;
        self.dirty[i] = true;
        Some(&mut self.cells[i])
    }

    /// Removes the wall pair between `c` and its neighbour in `dir`.
    /// Returns `false` (and changes nothing) if that neighbour is out of bounds.
    pub(crate) fn carve(&mut self, c: Coord, dir: Direction) -> bool {
        let Some(n) = c.step(dir, self.rows, self.cols) else {
            return false;
        };
        if let Some(cell) = self.cell_mut(c) {
            cell.walls.remove(dir);
        }
        if let Some(cell) = self.cell_mut(n) {
            cell.walls.remove(dir.opposite());
        }
        true
    }

    /// Moves the single `current` flag. `None` clears it.
    pub(crate) fn set_current(&mut self, next: Option<Coord>) {
        if let Some(prev) = self.current.take() {
            if let Some(cell) = self.cell_mut(prev) {
                cell.current = false;
            }
        }
        let next = next.filter(|&c| self.contains(c));
        if let Some(c) = next {
            if let Some(cell) = self.cell_mut(c) {
                cell.current = true;
            }
        }
        self.current = next;
    }

    pub(crate) fn mark_visited(&mut self, c: Coord, step_index: usize) {
        if let Some(cell) = self.cell_mut(c) {
            cell.visited = true;
            cell.step_index = Some(step_index);
        }
    }

    pub(crate) fn mark_backtracked(&mut self, c: Coord) {
        if let Some(cell) = self.cell_mut(c) {
            cell.backtracked = true;
        }
    }

    pub(crate) fn set_endpoints(&mut self, start: Coord, end: Coord) {
        if let Some(cell) = self.cell_mut(start) {
            cell.start = true;
        }
        if let Some(cell) = self.cell_mut(end) {
            cell.end = true;
        }
        self.start = Some(start);
        self.end = Some(end);
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    /// Adds `c` to the navigation set; no-op if already a member.
    pub(crate) fn record_navigation(&mut self, c: Coord) {
        if let Some(i) = self.idx(c) {
            if !self.nav_member[i] {
                self.nav_member[i] = true;
                self.nav_visited.push(c);
            }
        }
    }

    pub(crate) fn clear_navigation(&mut self) {
        self.nav_visited.clear();
        self.nav_member.fill(false);
    }

    /// Coordinates whose walls or flags changed since the last call, in row-major order.
    ///
    /// A freshly built or reset grid reports every cell.
    pub fn drain_dirty(&mut self) -> Vec<Coord> {
        let mut out = Vec::new();
        for (i, d) in self.dirty.iter_mut().enumerate() {
            if *d {
                *d = false;
                out.push(self.cells[i].coord());
            }
        }
        out
    }

    /// Discards the maze and all navigation state, keeping the dimensions.
    pub fn reset(&mut self) {
        *self = Grid::new(self.rows, self.cols);
    }

    pub fn reset_with_size(&mut self, rows: usize, cols: usize) {
        *self = Grid::new(rows, cols);
    }

    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            rows: self.rows,
            cols: self.cols,
            phase: self.phase,
            current: self.current,
            start: self.start,
            end: self.end,
            cells: self.cells.clone(),
        }
    }
}

/// Owned copy of the queryable grid state, for external renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridSnapshot {
    pub rows: usize,
    pub cols: usize,
    pub phase: Phase,
    pub current: Option<Coord>,
    pub start: Option<Coord>,
    pub end: Option<Coord>,
    pub cells: Vec<Cell>,
}

//! Maze generation: an iterative depth-first backtracker.
//!
//! [`Generator::generate`] returns a [`Generation`], a lazy, forward-only iterator that
//! carves the maze one cursor move at a time. Each item is the coordinate that is
//! `current` after that step, so a renderer can draw between items to animate
//! progress, or drain the iterator for instant generation. The iterator cannot be
//! rewound: to generate again, reset the grid and ask for a new one.
//!
//! Invariants held after every step:
//! - walls are only ever removed in symmetric pairs;
//! - at most one cell is `current`;
//! - step indices are assigned 0, 1, 2, ... in first-visit order.

use core::iter::FusedIterator;

use tracing::debug;

use crate::cell::{Coord, Direction};
use crate::config::GeneratorConfig;
use crate::error::MazeError;
use crate::grid::{Grid, Phase};
use crate::prng::ChoiceSource;
use crate::signal::{Signal, SignalSink};

#[derive(Debug, Clone)]
pub struct Generator<R> {
    config: GeneratorConfig,
    rng: R,
}

impl<R: ChoiceSource> Generator<R> {
    pub fn new(config: GeneratorConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> GeneratorConfig {
        self.config
    }

    pub fn source(&self) -> &R {
        &self.rng
    }

    pub fn into_source(self) -> R {
        self.rng
    }

    /// Starts carving `grid`, which must be [`Phase::Pristine`].
    ///
    /// `sink` receives [`Signal::GenerationFinished`] once the iterator is exhausted.
    pub fn generate<'a, S: SignalSink>(
        &'a mut self,
        grid: &'a mut Grid,
        sink: S,
    ) -> Result<Generation<'a, R, S>, MazeError> {
        if grid.phase() != Phase::Pristine {
            return Err(MazeError::AlreadyGenerated);
        }
        grid.set_phase(Phase::Generating);
        let capacity = grid.len();
        Ok(Generation {
            grid,
            rng: &mut self.rng,
            sink,
            config: self.config,
            stack: Vec::with_capacity(capacity),
            cursor: Coord::ORIGIN,
            last_carved: Coord::ORIGIN,
            visited: 0,
            yielded: 0,
            stage: Stage::Origin,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Origin,
    Carving,
    Unwinding,
    Complete,
    Done,
}

/// In-progress generation. See the module docs.
///
/// Dropping it early cancels generation: the grid keeps its partial state and stays
/// in [`Phase::Generating`] (not navigable) until it is reset.
#[derive(Debug)]
pub struct Generation<'a, R, S> {
    grid: &'a mut Grid,
    rng: &'a mut R,
    sink: S,
    config: GeneratorConfig,
    stack: Vec<Coord>,
    cursor: Coord,
    last_carved: Coord,
    visited: usize,
    yielded: usize,
    stage: Stage,
}

impl<R: ChoiceSource, S: SignalSink> Generation<'_, R, S> {
    /// Runs generation to completion and returns how many steps were yielded in total.
    pub fn finish(mut self) -> usize {
        while self.next().is_some() {}
        self.yielded
    }

    /// Read-only view of the grid between steps.
    pub fn grid(&self) -> &Grid {
        self.grid
    }

    /// Cells visited so far.
    pub fn visited(&self) -> usize {
        self.visited
    }

    /// Depth of the explicit backtrack stack.
    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    fn visit_origin(&mut self) -> Coord {
        let origin = Coord::ORIGIN;
        self.grid.mark_visited(origin, 0);
        self.grid.set_current(Some(origin));
        self.cursor = origin;
        self.last_carved = origin;
        self.visited = 1;
        origin
    }

    fn carve_or_backtrack(&mut self) -> Coord {
        let here = self.cursor;

        let mut options = [(Direction::Up, here); 4];
        let mut n = 0usize;
        for (dir, c) in self.grid.neighbors(here) {
            let unvisited = self.grid.cell(c).is_some_and(|cell| !cell.is_visited());
            if unvisited {
                options[n] = (dir, c);
                n += 1;
            }
        }

        if n == 0 {
            let Some(prev) = self.stack.pop() else {
                panic!(
                    "backtrack stack exhausted at {:?} with {} of {} cells visited",
                    here,
                    self.visited,
                    self.grid.len()
                );
            };
            self.backtrack_to(prev);
            return prev;
        }

        let (dir, next) = options[self.rng.choose_index(n) % n];
        self.stack.push(here);
        self.grid.carve(here, dir);
        self.grid.mark_visited(next, self.visited);
        self.grid.set_current(Some(next));
        self.visited += 1;
        self.cursor = next;
        self.last_carved = next;
        next
    }

    fn backtrack_to(&mut self, prev: Coord) {
        self.grid.mark_backtracked(self.cursor);
        self.grid.set_current(Some(prev));
        self.grid.mark_backtracked(prev);
        self.cursor = prev;
    }

    fn complete(&mut self) {
        self.grid.set_current(None);
        if !self.grid.is_empty() {
            let end = self.config.end_policy.resolve(
                self.grid.rows(),
                self.grid.cols(),
                self.last_carved,
            );
            self.grid.set_endpoints(Coord::ORIGIN, end);
        }
        self.grid.set_phase(Phase::Ready);
        debug!(
            rows = self.grid.rows(),
            cols = self.grid.cols(),
            steps = self.yielded,
            end = ?self.grid.end(),
            "maze generation finished"
        );
        self.sink.emit(Signal::GenerationFinished);
    }
}

impl<R: ChoiceSource, S: SignalSink> Iterator for Generation<'_, R, S> {
    type Item = Coord;

    fn next(&mut self) -> Option<Coord> {
        loop {
            let step = match self.stage {
                Stage::Origin => {
                    if self.grid.is_empty() {
                        self.stage = Stage::Complete;
                        continue;
                    }
                    self.stage = Stage::Carving;
                    self.visit_origin()
                }
                Stage::Carving => {
                    if self.visited >= self.grid.len() {
                        self.stage = if self.config.unwind_backtrack {
                            Stage::Unwinding
                        } else {
                            Stage::Complete
                        };
                        continue;
                    }
                    self.carve_or_backtrack()
                }
                Stage::Unwinding => match self.stack.pop() {
                    Some(prev) => {
                        self.backtrack_to(prev);
                        prev
                    }
                    None => {
                        self.stage = Stage::Complete;
                        continue;
                    }
                },
                Stage::Complete => {
                    self.complete();
                    self.stage = Stage::Done;
                    return None;
                }
                Stage::Done => return None,
            };
            self.yielded += 1;
            return Some(step);
        }
    }
}

impl<R: ChoiceSource, S: SignalSink> FusedIterator for Generation<'_, R, S> {}

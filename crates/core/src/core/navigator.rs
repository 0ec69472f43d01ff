//! Navigation over a generated maze, with randomized recovery on collisions.
//!
//! Bumping into a wall (or the grid boundary) never blocks the agent in place; it
//! knocks the agent back to a cell it already visited, chosen at random among those
//! whose generation step index lies within the recovery window behind the current
//! cell. Step indices approximate progress along the generated path, so the effect
//! is a rubber band along the agent's own trajectory.

use tracing::{debug, trace};

use crate::cell::{Cell, Coord, Direction};
use crate::config::RecoveryWindow;
use crate::error::MazeError;
use crate::grid::{Grid, Phase};
use crate::prng::{ChoiceSource, Prng};
use crate::signal::{Signal, SignalSink};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    /// The move would leave the grid.
    Boundary,
    /// A wall stands between the current cell and the target.
    Wall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved {
        to: Coord,
    },
    Recovered {
        collision: Collision,
        from: Coord,
        to: Coord,
    },
    /// The agent reached the end cell; `current` is now `None`.
    Finished,
    /// Nothing to do: the maze is already solved, or has no cells.
    Idle,
}

#[derive(Debug, Clone)]
pub struct Navigator<R = Prng> {
    window: RecoveryWindow,
    rng: R,
}

impl Navigator<Prng> {
    pub fn new(window: RecoveryWindow, seed: u64) -> Self {
        Self::with_source(window, Prng::new(seed))
    }

    /// Builds a navigator from a raw window value; `None` is unbounded.
    ///
    /// A positive `w` would only ever admit forward jumps and is rejected.
    pub fn from_window(w: Option<i64>, seed: u64) -> Result<Self, MazeError> {
        Ok(Self::new(RecoveryWindow::from_option(w)?, seed))
    }
}

impl<R: ChoiceSource> Navigator<R> {
    pub fn with_source(window: RecoveryWindow, rng: R) -> Self {
        Self { window, rng }
    }

    pub fn window(&self) -> RecoveryWindow {
        self.window
    }

    /// Applies one directional command.
    ///
    /// The first move after generation (or after a soft reset) places the agent on the
    /// start cell and emits [`Signal::NavigationStarted`] before the move is resolved.
    pub fn move_agent<S: SignalSink>(
        &mut self,
        grid: &mut Grid,
        dir: Direction,
        mut sink: S,
    ) -> Result<MoveOutcome, MazeError> {
        match grid.phase() {
            Phase::Pristine | Phase::Generating => return Err(MazeError::NotGenerated),
            Phase::Solved => return Ok(MoveOutcome::Idle),
            Phase::Ready | Phase::Navigating => {}
        }
        let (Some(start), Some(end)) = (grid.start(), grid.end()) else {
            return Ok(MoveOutcome::Idle);
        };

        let here = match grid.current() {
            Some(c) => c,
            None => {
                grid.set_current(Some(start));
                grid.record_navigation(start);
                grid.set_phase(Phase::Navigating);
                debug!(?start, ?end, "navigation started");
                sink.emit(Signal::NavigationStarted);
                start
            }
        };

        let step = match here.step(dir, grid.rows(), grid.cols()) {
            None => Err(Collision::Boundary),
            Some(target) if grid.is_open(here, dir) => Ok(target),
            Some(_) => Err(Collision::Wall),
        };

        let (next, collision) = match step {
            Ok(target) => (target, None),
            Err(collision) => {
                sink.emit(Signal::WallHit);
                let to = self.recovery_target(grid, here);
                trace!(?here, dir = dir.as_str(), ?collision, ?to, "collision recovery");
                (to, Some(collision))
            }
        };

        if next == end {
            grid.set_current(None);
            grid.set_phase(Phase::Solved);
            debug!(?end, "navigation finished");
            sink.emit(Signal::NavigationFinished { success: true });
            return Ok(MoveOutcome::Finished);
        }

        grid.set_current(Some(next));
        grid.record_navigation(next);

        Ok(match collision {
            None => MoveOutcome::Moved { to: next },
            Some(collision) => MoveOutcome::Recovered {
                collision,
                from: here,
                to: next,
            },
        })
    }

    /// Picks where an agent standing on `from` lands after a collision.
    ///
    /// Uniform over the navigation set members `C` with
    /// `window <= step(C) - step(from) <= 0`. Returns `from` when the set is empty.
    pub fn recovery_target(&mut self, grid: &Grid, from: Coord) -> Coord {
        let pool = grid.visited_during_navigation();
        if pool.is_empty() {
            return from;
        }

        let step_of = |c: Coord| {
            grid.cell(c)
                .and_then(Cell::step_index)
                .map(|s| s as i64)
                .unwrap_or(0)
        };
        let here = step_of(from);
        let candidates: Vec<Coord> = pool
            .iter()
            .copied()
            .filter(|&c| self.window.admits(step_of(c) - here))
            .collect();

        // `from` is a member with delta 0 once navigation has started, so this only
        // triggers for callers probing a cell outside the set.
        if candidates.is_empty() {
            return from;
        }
        candidates[self.rng.choose_index(candidates.len()) % candidates.len()]
    }

    /// Sends the agent back to idle without touching the maze itself.
    pub fn reset_soft(&self, grid: &mut Grid) {
        grid.set_current(None);
        grid.clear_navigation();
        if matches!(grid.phase(), Phase::Navigating | Phase::Solved) {
            grid.set_phase(Phase::Ready);
        }
        debug!("navigation soft reset");
    }
}

//! Session facade: one grid, its generator and navigator, and a signal sink.
//!
//! This is the boundary the surrounding application drives. Input layers call
//! `begin_generation` / `move_agent` / `reset_soft` / `reset_hard`; renderers
//! read [`MazeGame::grid`]; timers and audio react to the sink's signals.

use tracing::debug;

use crate::cell::Direction;
use crate::config::{check_dimensions, MazeConfig, RecoveryWindow};
use crate::error::MazeError;
use crate::generator::{Generation, Generator};
use crate::grid::{Grid, Phase};
use crate::navigator::{MoveOutcome, Navigator};
use crate::prng::Prng;
use crate::signal::SignalSink;
use crate::stats::{NavStats, StatsSink};

// Decorrelates the navigator's stream from the generator's for the same seed.
const NAV_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug)]
pub struct MazeGame<S> {
    config: MazeConfig,
    grid: Grid,
    generator: Generator<Prng>,
    navigator: Navigator<Prng>,
    sink: S,
    stats: NavStats,
}

impl<S: SignalSink> MazeGame<S> {
    pub fn new(config: MazeConfig, sink: S) -> Result<Self, MazeError> {
        config.validate()?;
        let nav_seed = config.seed.wrapping_add(NAV_SEED_SALT);
        let navigator = Navigator::from_window(config.recovery_window, nav_seed)?;
        Ok(Self {
            grid: Grid::new(config.rows, config.cols),
            generator: Generator::new(config.generator(), Prng::new(config.seed)),
            navigator,
            sink,
            stats: NavStats::new(),
            config,
        })
    }

    pub fn config(&self) -> &MazeConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn stats(&self) -> &NavStats {
        &self.stats
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn phase(&self) -> Phase {
        self.grid.phase()
    }

    pub fn recovery_window(&self) -> RecoveryWindow {
        self.navigator.window()
    }

    /// Starts a fresh generation pass. A grid that is not pristine (a finished maze,
    /// or a cancelled partial one) is reset first.
    pub fn begin_generation(
        &mut self,
    ) -> Result<Generation<'_, Prng, StatsSink<'_, S>>, MazeError> {
        if self.grid.phase() != Phase::Pristine {
            debug!(phase = self.grid.phase().name(), "resetting grid before generation");
            self.grid.reset();
        }
        let sink = StatsSink::new(&mut self.stats, &mut self.sink);
        self.generator.generate(&mut self.grid, sink)
    }

    /// Generates synchronously; returns the number of animation steps skipped.
    pub fn generate_now(&mut self) -> Result<usize, MazeError> {
        Ok(self.begin_generation()?.finish())
    }

    pub fn move_agent(&mut self, dir: Direction) -> Result<MoveOutcome, MazeError> {
        let sink = StatsSink::new(&mut self.stats, &mut self.sink);
        let outcome = self.navigator.move_agent(&mut self.grid, dir, sink)?;
        if outcome != MoveOutcome::Idle {
            self.stats.record_move();
        }
        Ok(outcome)
    }

    pub fn reset_soft(&mut self) {
        self.navigator.reset_soft(&mut self.grid);
    }

    /// Discards the maze, optionally at a new size. Generation must be begun again.
    pub fn reset_hard(&mut self, size: Option<(usize, usize)>) -> Result<(), MazeError> {
        if let Some((rows, cols)) = size {
            check_dimensions(rows, cols)?;
            self.config.rows = rows;
            self.config.cols = cols;
        }
        self.grid.reset_with_size(self.config.rows, self.config.cols);
        debug!(
            rows = self.config.rows,
            cols = self.config.cols,
            "grid hard reset"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Coord;
    use crate::signal::{RecordingSink, Signal};
    use std::collections::VecDeque;

    fn game(rows: usize, cols: usize) -> MazeGame<RecordingSink> {
        let cfg = MazeConfig::with_size(rows, cols)
            .with_seed(2024)
            .with_recovery_window(Some(-3));
        MazeGame::new(cfg, RecordingSink::new()).unwrap()
    }

    /// Directions along the unique path from start to end.
    fn solution(grid: &Grid) -> Vec<Direction> {
        let (start, end) = (grid.start().unwrap(), grid.end().unwrap());
        let idx = |c: Coord| c.row * grid.cols() + c.col;
        let mut came_from: Vec<Option<(Coord, Direction)>> = vec![None; grid.len()];
        let mut seen = vec![false; grid.len()];
        let mut queue = VecDeque::from([start]);
        seen[idx(start)] = true;
        while let Some(c) = queue.pop_front() {
            for (dir, n) in grid.neighbors(c) {
                if grid.is_open(c, dir) && !seen[idx(n)] {
                    seen[idx(n)] = true;
                    came_from[idx(n)] = Some((c, dir));
                    queue.push_back(n);
                }
            }
        }
        let mut path = Vec::new();
        let mut at = end;
        while let Some((prev, dir)) = came_from[idx(at)] {
            path.push(dir);
            at = prev;
        }
        path.reverse();
        path
    }

    #[test]
    fn rejects_forward_recovery_window() {
        let cfg = MazeConfig::default().with_recovery_window(Some(2));
        assert_eq!(
            MazeGame::new(cfg, RecordingSink::new()).err(),
            Some(MazeError::InvalidRecoveryWindow(2))
        );
    }

    #[test]
    fn session_reports_its_recovery_window() {
        assert_eq!(game(2, 2).recovery_window().as_option(), Some(-3));
        let cfg = MazeConfig::with_size(2, 2).with_recovery_window(None);
        let g = MazeGame::new(cfg, RecordingSink::new()).unwrap();
        assert_eq!(g.recovery_window(), RecoveryWindow::Unbounded);
    }

    #[test]
    fn solving_along_the_path_never_collides() {
        let mut g = game(9, 11);
        g.generate_now().unwrap();
        let path = solution(g.grid());
        assert!(!path.is_empty());

        let last = path.len() - 1;
        for (i, dir) in path.into_iter().enumerate() {
            let out = g.move_agent(dir).unwrap();
            if i == last {
                assert_eq!(out, MoveOutcome::Finished);
            } else {
                assert!(matches!(out, MoveOutcome::Moved { .. }));
            }
        }
        assert_eq!(g.phase(), Phase::Solved);
        let stats = g.stats();
        assert_eq!(stats.wall_hits, 0);
        assert_eq!((stats.runs_started, stats.runs_won, stats.generations), (1, 1, 1));
        assert_eq!(
            g.sink().count(Signal::NavigationFinished { success: true }),
            1
        );
    }

    #[test]
    fn collisions_are_counted() {
        let mut g = game(1, 4);
        g.generate_now().unwrap();
        assert_eq!(
            g.move_agent(Direction::Up).unwrap(),
            MoveOutcome::Recovered {
                collision: crate::navigator::Collision::Boundary,
                from: Coord::ORIGIN,
                to: Coord::ORIGIN
            }
        );
        g.move_agent(Direction::Right).unwrap();
        assert_eq!(g.stats().moves, 2);
        assert_eq!(g.stats().wall_hits, 1);
        assert_eq!(g.sink().count(Signal::WallHit), 1);
    }

    #[test]
    fn move_requires_a_generated_maze() {
        let mut g = game(3, 3);
        assert_eq!(g.move_agent(Direction::Down), Err(MazeError::NotGenerated));
        assert_eq!(g.stats().moves, 0);
    }

    #[test]
    fn begin_generation_restarts_a_finished_or_cancelled_maze() {
        let mut g = game(6, 6);
        g.generate_now().unwrap();
        let first = g.grid().snapshot();

        g.begin_generation().unwrap().take(4).for_each(drop);
        assert_eq!(g.phase(), Phase::Generating);

        g.generate_now().unwrap();
        assert_eq!(g.phase(), Phase::Ready);
        assert_eq!(g.grid().open_passages(), 35);
        // The generator's stream carries on, so the new maze differs.
        assert_ne!(first.cells, g.grid().snapshot().cells);
        assert_eq!(g.stats().generations, 2);
    }

    #[test]
    fn hard_reset_discards_the_maze() {
        let mut g = game(4, 4);
        g.generate_now().unwrap();
        g.move_agent(Direction::Right).unwrap();

        g.reset_hard(Some((2, 7))).unwrap();
        assert_eq!(g.phase(), Phase::Pristine);
        assert_eq!((g.grid().rows(), g.grid().cols()), (2, 7));
        assert_eq!(g.grid().open_passages(), 0);
        assert!(g.grid().visited_during_navigation().is_empty());
        assert_eq!(g.move_agent(Direction::Right), Err(MazeError::NotGenerated));

        assert!(matches!(
            g.reset_hard(Some((MazeConfig::MAX_SIDE + 1, 1))),
            Err(MazeError::InvalidDimensions { .. })
        ));
        assert_eq!((g.grid().rows(), g.grid().cols()), (2, 7));

        g.reset_hard(None).unwrap();
        g.generate_now().unwrap();
        assert_eq!(g.grid().end(), Some(Coord::new(1, 6)));
    }

    #[test]
    fn soft_reset_keeps_the_maze() {
        let mut g = game(5, 5);
        g.generate_now().unwrap();
        let cells_before = g.grid().snapshot().cells;
        g.move_agent(Direction::Right).unwrap();
        g.move_agent(Direction::Down).unwrap();

        g.reset_soft();
        assert_eq!(g.phase(), Phase::Ready);
        assert_eq!(g.grid().current(), None);
        assert_eq!(g.grid().snapshot().cells, cells_before);
    }
}

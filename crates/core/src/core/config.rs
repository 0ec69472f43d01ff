//! Runtime configuration for generation and navigation.

use crate::cell::Coord;
use crate::error::MazeError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A step-index delta known to be `<= 0`. Only [`RecoveryWindow::bounded`] builds one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NonPositive(i64);

impl NonPositive {
    pub fn get(self) -> i64 {
        self.0
    }
}

/// How far back (in generation steps) a wall-collision recovery may land.
///
/// A forward window cannot be represented: [`RecoveryWindow::bounded`] rejects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecoveryWindow {
    Bounded(NonPositive),
    /// Negative infinity: any cell the agent has visited qualifies.
    #[default]
    Unbounded,
}

impl RecoveryWindow {
    pub fn bounded(w: i64) -> Result<Self, MazeError> {
        if w > 0 {
            return Err(MazeError::InvalidRecoveryWindow(w));
        }
        Ok(RecoveryWindow::Bounded(NonPositive(w)))
    }

    /// `None` maps to [`RecoveryWindow::Unbounded`].
    pub fn from_option(w: Option<i64>) -> Result<Self, MazeError> {
        match w {
            Some(w) => Self::bounded(w),
            None => Ok(RecoveryWindow::Unbounded),
        }
    }

    pub fn as_option(self) -> Option<i64> {
        match self {
            RecoveryWindow::Bounded(w) => Some(w.get()),
            RecoveryWindow::Unbounded => None,
        }
    }

    /// `true` iff a step-index delta (`candidate - current`) falls inside the window.
    ///
    /// Every window admits `0`, so the agent's own cell always qualifies.
    #[inline]
    pub fn admits(self, delta: i64) -> bool {
        match self {
            RecoveryWindow::Bounded(w) => w.get() <= delta && delta <= 0,
            RecoveryWindow::Unbounded => delta <= 0,
        }
    }
}

/// Which cell becomes the maze's terminal cell once carving completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EndPolicy {
    /// `(rows - 1, cols - 1)`.
    #[default]
    OppositeCorner,
    /// The cell generation reached last (highest step index).
    LastCarved,
}

impl EndPolicy {
    pub fn resolve(self, rows: usize, cols: usize, last_carved: Coord) -> Coord {
        match self {
            EndPolicy::OppositeCorner => {
                Coord::new(rows.saturating_sub(1), cols.saturating_sub(1))
            }
            EndPolicy::LastCarved => last_carved,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// After every cell is visited, keep popping the backtrack stack (one yield per pop)
    /// so an animation can show the recursion unwinding. Purely cosmetic.
    pub unwind_backtrack: bool,
    pub end_policy: EndPolicy,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            unwind_backtrack: true,
            end_policy: EndPolicy::OppositeCorner,
        }
    }
}

fn default_rows() -> usize {
    15
}

fn default_cols() -> usize {
    20
}

fn default_seed() -> u64 {
    0x4D41_5A45u64 // "MAZE"
}

fn default_recovery_window() -> Option<i64> {
    Some(-5)
}

fn default_unwind_backtrack() -> bool {
    true
}

/// Everything needed to build a [`crate::game::MazeGame`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MazeConfig {
    #[cfg_attr(feature = "serde", serde(default = "default_rows"))]
    pub rows: usize,
    #[cfg_attr(feature = "serde", serde(default = "default_cols"))]
    pub cols: usize,
    #[cfg_attr(feature = "serde", serde(default = "default_seed"))]
    pub seed: u64,
    /// Non-positive step delta; `null` means unbounded.
    #[cfg_attr(feature = "serde", serde(default = "default_recovery_window"))]
    pub recovery_window: Option<i64>,
    #[cfg_attr(feature = "serde", serde(default = "default_unwind_backtrack"))]
    pub unwind_backtrack: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub end_policy: EndPolicy,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            cols: default_cols(),
            seed: default_seed(),
            recovery_window: default_recovery_window(),
            unwind_backtrack: default_unwind_backtrack(),
            end_policy: EndPolicy::default(),
        }
    }
}

impl MazeConfig {
    pub const MAX_SIDE: usize = 4096;

    pub fn with_size(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_recovery_window(mut self, recovery_window: Option<i64>) -> Self {
        self.recovery_window = recovery_window;
        self
    }

    pub fn with_unwind_backtrack(mut self, unwind_backtrack: bool) -> Self {
        self.unwind_backtrack = unwind_backtrack;
        self
    }

    pub fn with_end_policy(mut self, end_policy: EndPolicy) -> Self {
        self.end_policy = end_policy;
        self
    }

    pub fn validate(&self) -> Result<(), MazeError> {
        check_dimensions(self.rows, self.cols)?;
        self.window()?;
        Ok(())
    }

    pub fn window(&self) -> Result<RecoveryWindow, MazeError> {
        RecoveryWindow::from_option(self.recovery_window)
    }

    pub fn generator(&self) -> GeneratorConfig {
        GeneratorConfig {
            unwind_backtrack: self.unwind_backtrack,
            end_policy: self.end_policy,
        }
    }
}

pub(crate) fn check_dimensions(rows: usize, cols: usize) -> Result<(), MazeError> {
    if rows > MazeConfig::MAX_SIDE || cols > MazeConfig::MAX_SIDE {
        return Err(MazeError::InvalidDimensions {
            rows,
            cols,
            max: MazeConfig::MAX_SIDE,
        });
    }
    Ok(())
}

//! # rubbermaze
//!
//! Perfect-maze generation and fault-injected navigation.
//!
//! A [`grid::Grid`] is carved into a perfect maze by an iterative depth-first
//! backtracker ([`generator`]), exposed as a lazy iterator so callers can animate each
//! step. A [`navigator::Navigator`] then moves an agent through it; walking into a wall
//! does not block the move but triggers a randomized recovery jump back along the
//! agent's own trajectory, bounded by a configurable window.
//!
//! ## Quick Start
//!
//! ```
//! use rubbermaze::prelude::*;
//!
//! let cfg = MazeConfig::with_size(8, 8).with_seed(42).with_recovery_window(Some(-4));
//! let mut game = MazeGame::new(cfg, RecordingSink::new()).unwrap();
//!
//! // Drain generation instantly (or iterate `begin_generation()` to animate).
//! game.generate_now().unwrap();
//!
//! let outcome = game.move_agent(Direction::Right).unwrap();
//! assert_ne!(outcome, MoveOutcome::Idle);
//! assert_eq!(game.sink().signals()[0], Signal::GenerationFinished);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): serialization for config, cells and grid snapshots
//!
//! ## Modules
//!
//! - [`cell`]: cells, wall bitsets, coordinates, directions
//! - [`grid`]: cell storage and generation/navigation-wide state
//! - [`generator`]: recursive-backtracker maze generation
//! - [`navigator`]: movement, collision recovery, win detection
//! - [`signal`]: outbound event notifications
//! - [`config`]: recovery window, end policy, session config
//! - [`prng`]: seeded randomness and scripted/recorded choice sources
//! - [`stats`]: per-session counters
//! - [`game`]: session facade driven by the surrounding application

#[path = "core/cell.rs"]
pub mod cell;

#[path = "core/config.rs"]
pub mod config;

#[path = "core/error.rs"]
pub mod error;

#[path = "core/game.rs"]
pub mod game;

#[path = "core/generator.rs"]
pub mod generator;

#[path = "core/grid.rs"]
pub mod grid;

#[path = "core/navigator.rs"]
pub mod navigator;

#[path = "core/prng.rs"]
pub mod prng;

#[path = "core/signal.rs"]
pub mod signal;

#[path = "core/stats.rs"]
pub mod stats;

/// Prelude module for convenient imports.
///
/// ```
/// use rubbermaze::prelude::*;
/// ```
pub mod prelude {
    pub use crate::cell::{Cell, Coord, Direction, Walls};
    pub use crate::config::{EndPolicy, GeneratorConfig, MazeConfig, NonPositive, RecoveryWindow};
    pub use crate::error::MazeError;
    pub use crate::game::MazeGame;
    pub use crate::generator::{Generation, Generator};
    pub use crate::grid::{Grid, GridSnapshot, Phase};
    pub use crate::navigator::{Collision, MoveOutcome, Navigator};
    pub use crate::prng::{ChoiceSource, Prng, RecordingSource, ScriptedChoices};
    pub use crate::signal::{NullSink, RecordingSink, Signal, SignalSink, TracingSink};
    pub use crate::stats::NavStats;
}

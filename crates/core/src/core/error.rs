use thiserror::Error;

/// Failures the core reports to its caller.
///
/// Gameplay events (wall hits, recoveries, winning) are never errors; they are
/// [`crate::signal::Signal`]s and [`crate::navigator::MoveOutcome`]s.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    #[error("recovery window must be <= 0 (got {0}); a positive window would allow forward jumps")]
    InvalidRecoveryWindow(i64),

    #[error("maze has not finished generating; start and end are unset")]
    NotGenerated,

    #[error("grid is not pristine; reset it before generating again")]
    AlreadyGenerated,

    #[error("grid dimensions {rows}x{cols} exceed the maximum side of {max}")]
    InvalidDimensions { rows: usize, cols: usize, max: usize },
}

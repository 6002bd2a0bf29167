pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Every failure the crate can report.
///
/// All variants are raised synchronously at the point of detection and carry
/// enough detail to reproduce the failure. There are no retries and no
/// partial results: a validation error means no `Board`, a build never
/// produces a half-built model.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("sub-grid width must be at least 1")]
    SubGridWidth,

    #[error("sub-grid height must be at least 1")]
    SubGridHeight,

    #[error("board must have exactly {expected} rows, got {actual}")]
    RowCount { expected: usize, actual: usize },

    #[error("row {row} has {actual} cells, should have {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("invalid value {value} at position ({row},{col}); must be empty or an integer from 1 to {max}")]
    ValueRange {
        row: usize,
        col: usize,
        value: u32,
        max: usize,
    },

    #[error("puzzle has {actual} cells, expected {expected}")]
    CellCount { expected: usize, actual: usize },

    #[error("no delimiter found; boards larger than 9x9 need comma- or space-separated input")]
    NoDelimiter,

    #[error("no current solution; call solve_one first")]
    NoCurrentSolution,

    #[error("assignment turns on {on} values for cell ({row},{col}); expected exactly one")]
    AmbiguousCell { row: usize, col: usize, on: usize },

    #[error("solve engine failure: {0}")]
    Engine(String),
}

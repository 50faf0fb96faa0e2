use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid dimensions must be non-zero, got {width}x{height}")]
    EmptyDimensions { width: usize, height: usize },

    #[error("a {width}x{height} grid needs {expected} tiles, got {actual}")]
    TileCountMismatch {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },

    #[error("position ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("expected a {expected_width}x{expected_height} grid, got {width}x{height}")]
    DimensionMismatch {
        expected_width: usize,
        expected_height: usize,
        width: usize,
        height: usize,
    },

    #[error("can't place {requested} cells on a grid of {available} tiles")]
    TooManyCells { requested: usize, available: usize },
}

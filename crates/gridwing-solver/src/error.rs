//! Boundary errors for the solver.

/// Error produced when a flat puzzle array is malformed.
///
/// Format errors are rejected before any search begins. Logical
/// impossibility (duplicate givens, no solution) is never an error; it is
/// reported through
/// [`SolveClassification`](crate::SolveClassification).
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PuzzleFormatError {
    /// The array length does not match the board's cell count.
    #[display("puzzle has {actual} cells, expected {expected}")]
    Length {
        /// Expected number of cells (`size * size`).
        expected: usize,
        /// Number of cells supplied.
        actual: usize,
    },
    /// A cell value exceeds the board size.
    #[display("value {value} at cell {index} exceeds board size {size}")]
    ValueOutOfRange {
        /// The offending value.
        value: u8,
        /// Row-major cell index.
        index: usize,
        /// The board size.
        size: u8,
    },
}

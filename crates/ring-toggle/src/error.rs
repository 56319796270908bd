//! Configuration errors raised by the core.
//!
//! A singular toggle matrix is not an error; see [`crate::Inversion`].

/// An invalid ring size, offset set, or matrix shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ToggleError {
    /// The ring has no cells.
    #[error("ring size must be at least 1")]
    EmptyRing,
    /// An offset does not lie in `[0, size)`.
    #[error("offset {offset} is out of range for a ring of {size} cells")]
    OffsetOutOfRange {
        /// The rejected offset.
        offset: usize,
        /// Ring size it was checked against.
        size: usize,
    },
    /// The same offset was given more than once.
    #[error("offset {offset} appears more than once")]
    DuplicateOffset {
        /// The repeated offset.
        offset: usize,
    },
    /// Two operands describe rings of different sizes.
    #[error("expected a ring of {expected} cells, found {found}")]
    RingSizeMismatch {
        /// Size required by the receiving operation.
        expected: usize,
        /// Size actually supplied.
        found: usize,
    },
    /// Matrix rows do not form a square.
    #[error("matrix is not square: {rows} rows but a row of {cols} columns")]
    NotSquare {
        /// Number of rows.
        rows: usize,
        /// Length of the first offending row.
        cols: usize,
    },
    /// A cell or button index does not lie in `[0, size)`.
    #[error("cell {cell} is out of range for a ring of {size} cells")]
    CellOutOfRange {
        /// The rejected index.
        cell: usize,
        /// Ring size it was checked against.
        size: usize,
    },
}

//! Error types for the column buffer core.
//!
//! Mirrors the shape of `rusty-db`'s `DbError`: one variant per failure
//! kind, a `thiserror` message on each, and a crate-local `Result` alias.
//! No operation in this crate panics on caller-supplied data; every
//! fallible path returns one of these variants instead.

use thiserror::Error;

/// Errors raised by column buffers and their wrappers.
///
/// See spec §7 for the recovery policy attached to each variant: all of
/// them leave the buffer unchanged except a repeated-wrapper `write_row`
/// that fails after its region entry has already been pushed, which
/// poisons the buffer and must be followed by `reset()`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ColumnError {
    /// A value was written whose physical type does not match the buffer's.
    #[error("value does not match the buffer's physical type")]
    WrongKind,

    /// `write_row` received zero values.
    #[error("row has too few values: expected at least 1, got 0")]
    RowHasTooFewValues,

    /// A primitive or nullable `write_row` received more than one value.
    #[error("row has too many values: expected exactly 1, got {0}")]
    RowHasTooManyValues(usize),

    /// `read_row_at` was called with a negative index.
    #[error("row index {index} is out of bounds (length is {length})")]
    RowIndexOutOfBounds {
        /// The offending (negative) index, widened to `i64` for display.
        index: i64,
        /// The buffer's length at the time of the call.
        length: usize,
    },

    /// `read_row_at` was called with an index at or past the buffer's length.
    #[error("end of stream")]
    EndOfStream,
}

/// Result alias used throughout this crate.
pub type Result<T> = std::result::Result<T, ColumnError>;

/// Outcome of a `write_values` call: how many values were actually
/// appended before an error (if any) was encountered. The buffer is left
/// in a consistent state for the values that were accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOutcome {
    /// Number of values appended before `error`, or all of them if `error`
    /// is `None`.
    pub written: usize,
    /// The error that stopped the write, if any.
    pub error: Option<ColumnError>,
}

impl WriteOutcome {
    pub fn ok(written: usize) -> Self {
        Self { written, error: None }
    }

    pub fn failed(written: usize, error: ColumnError) -> Self {
        Self { written, error: Some(error) }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Turns a partial write into a `Result<usize>`, discarding the count
    /// on success the way a caller usually wants it.
    pub fn into_result(self) -> Result<usize> {
        match self.error {
            None => Ok(self.written),
            Some(e) => Err(e),
        }
    }
}

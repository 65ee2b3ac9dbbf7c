//! Requisite table parsers.
//!
//! Both parsers consume rows of already-extracted, trimmed text cells and
//! resolve subject names through a [`crate::SubjectDirectory`]. Neither
//! performs I/O.

mod coreqs;
mod prereqs;
mod row;

pub use coreqs::parse_coreqs;
pub use prereqs::{parse_prereqs, parse_prereqs_with, MAX_DEPTH};
#[cfg(test)]
pub(crate) use prereqs::sample_tables;
pub use row::Row;

/// How the prerequisite parser treats unbalanced group markers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Grouping {
    /// Ignore close markers with no open group and drop groups that are
    /// never closed.
    #[default]
    Lenient,
    /// Reject unbalanced markers with an error naming the row.
    Strict,
}

/// Errors raised while parsing a requisite table.
///
/// Row indices are zero-based positions in the row stream.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseError {
    /// A test score cell that is not a whole number.
    #[error("row {row}: test score '{value}' is not a whole number")]
    Score {
        /// The offending row.
        row: usize,
        /// The score cell's content.
        value: String,
    },

    /// An operator marker other than `and` or `or`.
    #[error("row {row}: unknown operator '{value}', expected 'and' or 'or'")]
    Operator {
        /// The offending row.
        row: usize,
        /// The marker cell's content.
        value: String,
    },

    /// A group that is never closed (strict mode only).
    #[error("row {row}: group is never closed")]
    UnclosedGroup {
        /// The row that opened the group.
        row: usize,
    },

    /// A group opened deeper than [`MAX_DEPTH`].
    #[error("row {row}: groups nest deeper than {max} levels", max = MAX_DEPTH)]
    TooDeep {
        /// The row that opened the group past the limit.
        row: usize,
    },

    /// A close marker with no open group (strict mode only).
    #[error("row {row}: close marker has no matching open group")]
    UnmatchedClose {
        /// The offending row.
        row: usize,
    },
}

impl ParseError {
    /// The row the error is attributed to.
    #[must_use]
    pub const fn row(&self) -> usize {
        match self {
            Self::Score { row, .. }
            | Self::Operator { row, .. }
            | Self::UnclosedGroup { row }
            | Self::TooDeep { row }
            | Self::UnmatchedClose { row } => *row,
        }
    }
}

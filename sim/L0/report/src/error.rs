//! Error types for reporting.

use thiserror::Error;

/// Errors from building a time-series table.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ReportError {
    /// A row's width does not match the table's columns.
    #[error("row has {actual} values, table has {expected} columns")]
    RowWidth {
        /// Number of columns.
        expected: usize,
        /// Number of values given.
        actual: usize,
    },

    /// Appended time does not exceed the last row's time.
    #[error("time {time} does not follow last row at {last}")]
    NonIncreasingTime {
        /// Time of the rejected row.
        time: f64,
        /// Time of the last row.
        last: f64,
    },

    /// The table has no rows.
    #[error("table is empty")]
    Empty,
}

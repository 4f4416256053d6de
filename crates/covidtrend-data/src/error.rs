//! Selection and normalization errors.

use covidtrend_common::{KeyColumn, TrendError};
use thiserror::Error;

/// Why a country series could not be produced.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectError {
    /// No row carries the country in its key column.
    #[error("no row matches '{country}' in {column}")]
    NotFound {
        /// Requested identifier
        country: String,
        /// Column that was searched
        column: KeyColumn,
    },

    /// More than one row carries the country in its key column.
    #[error("'{country}' matches {matches} rows in {column}")]
    Ambiguous {
        /// Requested identifier
        country: String,
        /// Column that was searched
        column: KeyColumn,
        /// Number of matching rows
        matches: usize,
    },

    /// A count cell is not an integer.
    #[error("non-numeric count {value:?} for '{country}' on {date}")]
    InvalidCount {
        /// Country being selected
        country: String,
        /// Date column of the bad cell
        date: String,
        /// Raw cell text
        value: String,
    },

    /// A date header is not `month/day/year`.
    #[error("invalid date {value:?}: {reason}")]
    InvalidDate {
        /// Raw header text
        value: String,
        /// What is wrong with it
        reason: String,
    },
}

impl From<SelectError> for TrendError {
    fn from(err: SelectError) -> Self {
        TrendError::selection_with_source(err.to_string(), err)
    }
}

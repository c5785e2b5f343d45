//! Historical data error types.

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised while loading, merging or summarising a price series.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// A series file could not be opened.
    #[error("Failed to open {path}: {source}")]
    Io {
        /// File path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A CSV record could not be parsed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A price is not strictly positive and finite.
    #[error("Invalid price {value} on {date}")]
    InvalidPrice {
        /// Observation date.
        date: NaiveDate,
        /// Offending value.
        value: f64,
    },

    /// The same date appears twice in one series.
    #[error("Duplicate observation for {0}")]
    DuplicateDate(NaiveDate),

    /// Not enough prices to compute a return.
    #[error("Insufficient data: need at least {required} prices, got {actual}")]
    InsufficientData {
        /// Minimum number of prices.
        required: usize,
        /// Number of prices available.
        actual: usize,
    },

    /// Invalid processing parameter.
    #[error("Invalid parameter '{name}': {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        value: String,
    },
}

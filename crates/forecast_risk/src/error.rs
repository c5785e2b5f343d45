//! Analysis error types.

use forecast_core::StatisticsError;
use thiserror::Error;

/// Errors raised by the outcome analyzer and the band computation.
///
/// All variants are raised before any result is assembled; no partial
/// output is ever returned.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum AnalysisError {
    /// The price sample is empty.
    #[error("Insufficient data: at least one simulated price is required")]
    InsufficientData,

    /// Malformed input (non-positive start price, non-finite price, band
    /// level outside `[0, 1]`).
    #[error("Invalid analysis parameter '{name}': {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        value: String,
    },

    /// No return fell at or below the VaR threshold, so CVaR is undefined.
    #[error("Degenerate sample: empty tail at {confidence} confidence")]
    DegenerateSample {
        /// Confidence level of the failed tail average.
        confidence: f64,
    },
}

impl AnalysisError {
    /// Creates an invalid parameter error.
    pub(crate) fn invalid(name: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            value: value.into(),
        }
    }
}

impl From<StatisticsError> for AnalysisError {
    fn from(err: StatisticsError) -> Self {
        match err {
            StatisticsError::EmptySample => Self::InsufficientData,
            StatisticsError::InvalidProbability(p) => {
                Self::invalid("probability", format!("must be in [0, 1], got {}", p))
            }
        }
    }
}

//! Error types for statistical routines.

use thiserror::Error;

/// Errors raised by the descriptive statistics in [`crate::math::statistics`].
///
/// # Examples
/// ```
/// use forecast_core::types::StatisticsError;
///
/// let err = StatisticsError::InvalidProbability(1.5);
/// assert_eq!(format!("{}", err), "Invalid probability 1.5: must be in [0, 1]");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum StatisticsError {
    /// The sample contains no observations.
    #[error("Sample is empty")]
    EmptySample,

    /// A quantile probability outside `[0, 1]` (or NaN).
    #[error("Invalid probability {0}: must be in [0, 1]")]
    InvalidProbability(f64),
}

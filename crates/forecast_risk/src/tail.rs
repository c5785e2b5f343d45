//! Tail-risk measures over a sample of returns.
//!
//! Both measures are signed: a VaR of `-0.25` means the `(1 - c)` quantile
//! of returns is a 25% loss.

use forecast_core::math::{quantile_sorted, sorted};

use crate::error::AnalysisError;

fn check_confidence(confidence: f64) -> Result<(), AnalysisError> {
    if confidence > 0.0 && confidence < 1.0 {
        Ok(())
    } else {
        Err(AnalysisError::invalid(
            "confidence",
            format!("must be in (0, 1), got {}", confidence),
        ))
    }
}

/// Value-at-Risk of an ascending sample: its `(1 - confidence)` quantile.
///
/// # Errors
///
/// - [`AnalysisError::InsufficientData`] for an empty sample
/// - [`AnalysisError::InvalidParameter`] if `confidence` is not in `(0, 1)`
pub fn value_at_risk_sorted(
    sorted_returns: &[f64],
    confidence: f64,
) -> Result<f64, AnalysisError> {
    check_confidence(confidence)?;
    Ok(quantile_sorted(sorted_returns, 1.0 - confidence)?)
}

/// Value-at-Risk of an unsorted sample; see [`value_at_risk_sorted`].
///
/// # Examples
///
/// ```
/// use forecast_risk::tail::value_at_risk;
///
/// let returns: Vec<f64> = (0..=100).map(|i| i as f64 / 100.0 - 0.5).collect();
/// let var = value_at_risk(&returns, 0.95).unwrap();
/// assert!((var - (-0.45)).abs() < 1e-12);
/// ```
///
/// # Errors
///
/// Same as [`value_at_risk_sorted`].
pub fn value_at_risk(returns: &[f64], confidence: f64) -> Result<f64, AnalysisError> {
    value_at_risk_sorted(&sorted(returns), confidence)
}

/// Mean of the ascending sample's values at or below `threshold`.
///
/// # Errors
///
/// Returns [`AnalysisError::DegenerateSample`] when no value lies at or below
/// the threshold, which for a finite sample only happens if the threshold is
/// NaN or below the minimum.
pub(crate) fn tail_mean_sorted(
    sorted_returns: &[f64],
    threshold: f64,
    confidence: f64,
) -> Result<f64, AnalysisError> {
    let count = sorted_returns.partition_point(|&r| r <= threshold);
    if count == 0 {
        return Err(AnalysisError::DegenerateSample { confidence });
    }
    Ok(sorted_returns[..count].iter().sum::<f64>() / count as f64)
}

/// Conditional Value-at-Risk (expected shortfall): the mean of all returns
/// at or below the VaR at the same confidence.
///
/// By construction `CVaR ≤ VaR`.
///
/// # Errors
///
/// - [`AnalysisError::InsufficientData`] for an empty sample
/// - [`AnalysisError::InvalidParameter`] if `confidence` is not in `(0, 1)`
/// - [`AnalysisError::DegenerateSample`] if the tail is empty
///
/// # Examples
///
/// ```
/// use forecast_risk::tail::conditional_value_at_risk;
///
/// let returns = [-0.4, -0.1, 0.0, 0.1, 0.2];
/// // VaR_75 = -0.1, tail = {-0.4, -0.1}
/// let cvar = conditional_value_at_risk(&returns, 0.75).unwrap();
/// assert!((cvar - (-0.25)).abs() < 1e-12);
/// ```
pub fn conditional_value_at_risk(
    returns: &[f64],
    confidence: f64,
) -> Result<f64, AnalysisError> {
    let sorted_returns = sorted(returns);
    let var = value_at_risk_sorted(&sorted_returns, confidence)?;
    tail_mean_sorted(&sorted_returns, var, confidence)
}

//! Outcome analysis of simulated end-of-horizon prices.

use forecast_core::math::{mean, quantile_sorted, sample_std_dev, sorted, CentralMoments};
use forecast_sim::PricePathMatrix;

use crate::error::AnalysisError;
use crate::tail::{tail_mean_sorted, value_at_risk_sorted};

/// Confidence of the first VaR/CVaR pair.
pub const CONFIDENCE_95: f64 = 0.95;

/// Confidence of the second VaR/CVaR pair.
pub const CONFIDENCE_99: f64 = 0.99;

/// Percentile price predictions over the final cross-section.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricePredictions {
    /// Arithmetic mean of final prices.
    pub mean: f64,
    /// 50th percentile.
    pub median: f64,
    /// 5th percentile.
    pub percentile_5: f64,
    /// 25th percentile.
    pub percentile_25: f64,
    /// 75th percentile.
    pub percentile_75: f64,
    /// 95th percentile.
    pub percentile_95: f64,
}

/// Tail-risk and threshold probabilities of the simple return
/// `final / start - 1`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RiskMetrics {
    /// 5th percentile of returns.
    pub var_95: f64,
    /// 1st percentile of returns.
    pub var_99: f64,
    /// Mean return at or below `var_95`.
    pub cvar_95: f64,
    /// Mean return at or below `var_99`.
    pub cvar_99: f64,
    /// Fraction of paths ending strictly below the start price.
    pub prob_loss: f64,
    /// Fraction of paths ending more than 10% above the start price.
    pub prob_increase_10: f64,
    /// Fraction of paths ending more than 20% above the start price.
    pub prob_increase_20: f64,
    /// Fraction of paths ending more than 30% above the start price.
    pub prob_increase_30: f64,
}

/// Distributional summary of the final cross-section.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatisticalSummary {
    /// Mean simple return.
    pub expected_return: f64,
    /// Sample standard deviation (Bessel) of final prices.
    pub std_dev_forecast: f64,
    /// Biased skewness `g1` of final prices.
    pub skewness: f64,
    /// Biased excess kurtosis `g2` of final prices.
    pub kurtosis: f64,
}

/// Full outcome analysis.
///
/// Built once by [`OutcomeAnalyzer::analyze`] and never mutated.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnalysisResult {
    /// Percentile price predictions.
    pub price_predictions: PricePredictions,
    /// VaR, CVaR and threshold probabilities.
    pub risk_metrics: RiskMetrics,
    /// Moments of the final cross-section.
    pub statistical_summary: StatisticalSummary,
    /// The analysed final prices, in input order.
    pub final_prices: Vec<f64>,
}

/// Fraction of `values` satisfying `pred`.
fn fraction(values: &[f64], pred: impl Fn(f64) -> bool) -> f64 {
    values.iter().filter(|&&v| pred(v)).count() as f64 / values.len() as f64
}

/// Outcome analyzer for simulated price distributions.
///
/// A stateless pure function over the final-price cross-section.
///
/// # Examples
///
/// ```
/// use forecast_risk::OutcomeAnalyzer;
///
/// let result = OutcomeAnalyzer::analyze(&[100.0, 100.0], 100.0).unwrap();
///
/// assert_eq!(result.price_predictions.mean, 100.0);
/// assert_eq!(result.risk_metrics.prob_loss, 0.0);
/// assert_eq!(result.risk_metrics.var_95, 0.0);
/// assert_eq!(result.risk_metrics.var_99, 0.0);
/// assert_eq!(result.statistical_summary.expected_return, 0.0);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct OutcomeAnalyzer;

impl OutcomeAnalyzer {
    /// Analyzes the end-of-horizon prices against the start price.
    ///
    /// # Errors
    ///
    /// - [`AnalysisError::InsufficientData`] if `final_prices` is empty
    /// - [`AnalysisError::InvalidParameter`] if `start_price` is not positive
    ///   and finite, or any final price is not finite
    /// - [`AnalysisError::DegenerateSample`] if a CVaR tail is empty
    pub fn analyze(
        final_prices: &[f64],
        start_price: f64,
    ) -> Result<AnalysisResult, AnalysisError> {
        if final_prices.is_empty() {
            return Err(AnalysisError::InsufficientData);
        }
        if !(start_price.is_finite() && start_price > 0.0) {
            return Err(AnalysisError::invalid(
                "start_price",
                format!("must be positive and finite, got {}", start_price),
            ));
        }
        if let Some(i) = final_prices.iter().position(|p| !p.is_finite()) {
            return Err(AnalysisError::invalid(
                "final_prices",
                format!("non-finite price {} at index {}", final_prices[i], i),
            ));
        }

        let sorted_prices = sorted(final_prices);
        let price_predictions = PricePredictions {
            mean: mean(final_prices)?,
            median: quantile_sorted(&sorted_prices, 0.5)?,
            percentile_5: quantile_sorted(&sorted_prices, 0.05)?,
            percentile_25: quantile_sorted(&sorted_prices, 0.25)?,
            percentile_75: quantile_sorted(&sorted_prices, 0.75)?,
            percentile_95: quantile_sorted(&sorted_prices, 0.95)?,
        };

        let returns: Vec<f64> = final_prices
            .iter()
            .map(|&p| p / start_price - 1.0)
            .collect();
        let sorted_returns = sorted(&returns);

        let var_95 = value_at_risk_sorted(&sorted_returns, CONFIDENCE_95)?;
        let var_99 = value_at_risk_sorted(&sorted_returns, CONFIDENCE_99)?;
        let risk_metrics = RiskMetrics {
            var_95,
            var_99,
            cvar_95: tail_mean_sorted(&sorted_returns, var_95, CONFIDENCE_95)?,
            cvar_99: tail_mean_sorted(&sorted_returns, var_99, CONFIDENCE_99)?,
            prob_loss: fraction(final_prices, |p| p < start_price),
            prob_increase_10: fraction(final_prices, |p| p > start_price * 1.1),
            prob_increase_20: fraction(final_prices, |p| p > start_price * 1.2),
            prob_increase_30: fraction(final_prices, |p| p > start_price * 1.3),
        };

        let moments = CentralMoments::from_sample(final_prices)?;
        let statistical_summary = StatisticalSummary {
            expected_return: mean(&returns)?,
            std_dev_forecast: sample_std_dev(final_prices)?,
            skewness: moments.skewness(),
            kurtosis: moments.excess_kurtosis(),
        };

        Ok(AnalysisResult {
            price_predictions,
            risk_metrics,
            statistical_summary,
            final_prices: final_prices.to_vec(),
        })
    }

    /// Analyzes the last row of a simulated path matrix.
    ///
    /// # Errors
    ///
    /// Same as [`analyze`](Self::analyze).
    pub fn analyze_paths(
        matrix: &PricePathMatrix,
        start_price: f64,
    ) -> Result<AnalysisResult, AnalysisError> {
        Self::analyze(matrix.final_prices(), start_price)
    }
}

//! Historical statistics record.
//!
//! Produced by the historical data layer from a cleaned daily price series and
//! consumed by the simulator as `{latest_price, drift, std_dev}`.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Trading days per year used to annualise daily figures.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Summary statistics of a daily log-return series.
///
/// # Examples
///
/// ```
/// use forecast_core::HistoricalStatistics;
///
/// let drift = HistoricalStatistics::gbm_drift(0.001, 0.02);
/// assert!((drift - 0.0008).abs() < 1e-15);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HistoricalStatistics {
    /// Last observed price of the cleaned series.
    pub latest_price: f64,
    /// Mean daily log return.
    pub mean_daily_return: f64,
    /// Sample standard deviation of daily log returns.
    pub std_dev: f64,
    /// Per-step GBM drift, `mean - 0.5·std_dev²`.
    pub drift: f64,
    /// `std_dev · √252`.
    pub annualized_volatility: f64,
    /// Most negative drawdown of the cumulative return index (≤ 0).
    pub max_drawdown: f64,
    /// Annualised mean return over annualised volatility, zero risk-free rate.
    pub sharpe_ratio: f64,
    /// Number of log-return observations behind the figures.
    pub observations: usize,
}

impl HistoricalStatistics {
    /// Variance-adjusted GBM drift: `mean - 0.5·std_dev²`.
    #[inline]
    pub fn gbm_drift(mean_daily_return: f64, std_dev: f64) -> f64 {
        mean_daily_return - 0.5 * std_dev * std_dev
    }

    /// Annualises a daily standard deviation.
    #[inline]
    pub fn annualize_volatility(std_dev: f64) -> f64 {
        std_dev * TRADING_DAYS_PER_YEAR.sqrt()
    }

    /// Sharpe ratio with a zero risk-free rate; `0.0` when volatility is zero.
    #[inline]
    pub fn sharpe(mean_daily_return: f64, annualized_volatility: f64) -> f64 {
        if annualized_volatility > 0.0 {
            mean_daily_return * TRADING_DAYS_PER_YEAR / annualized_volatility
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_annualize_volatility() {
        assert_relative_eq!(
            HistoricalStatistics::annualize_volatility(0.01),
            0.01 * 252.0_f64.sqrt(),
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_sharpe_zero_volatility() {
        assert_eq!(HistoricalStatistics::sharpe(0.001, 0.0), 0.0);
    }

    #[test]
    fn test_sharpe_positive() {
        let vol = HistoricalStatistics::annualize_volatility(0.02);
        let sharpe = HistoricalStatistics::sharpe(0.001, vol);
        assert_relative_eq!(sharpe, 0.252 / vol, epsilon = 1e-12);
    }
}

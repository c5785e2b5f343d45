//! Historical return statistics feeding the simulator.

use chrono::NaiveDate;
use forecast_core::math::{mean, sample_std_dev};
use forecast_core::{HistoricalStatistics, TRADING_DAYS_PER_YEAR};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::HistoryError;
use crate::series::PriceSeries;

/// Daily log returns `ln(p[i] / p[i-1])`.
///
/// Empty for fewer than two prices.
pub fn log_returns(closes: &[f64]) -> Vec<f64> {
    closes.windows(2).map(|w| (w[1] / w[0]).ln()).collect()
}

/// Most negative drawdown of the compounded index `Π(1 + rᵢ)`.
///
/// The running peak starts at the first index value. Returns `0.0` for an
/// empty or never-declining series.
///
/// # Examples
///
/// ```
/// use adapter_history::max_drawdown;
///
/// // Index: 1.1, 0.55, 0.605 → peak 1.1, trough 0.55
/// let dd = max_drawdown(&[0.1, -0.5, 0.1]);
/// assert!((dd - (-0.5)).abs() < 1e-12);
/// ```
pub fn max_drawdown(returns: &[f64]) -> f64 {
    let mut index = 1.0;
    let mut peak = f64::NEG_INFINITY;
    let mut worst: f64 = 0.0;

    for &r in returns {
        index *= 1.0 + r;
        peak = peak.max(index);
        worst = worst.min(index / peak - 1.0);
    }
    worst
}

/// Default rolling window, one trading year of returns.
pub const VOLATILITY_WINDOW: usize = 252;

/// Annualised volatility of the window of returns ending on `date`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct VolatilityPoint {
    /// Date of the last return in the window.
    pub date: NaiveDate,
    /// Sample standard deviation of the window, times `√252`.
    pub annualized_volatility: f64,
}

/// Rolling annualised volatility of daily log returns.
///
/// One point per complete window of `window` returns, dated by the price that
/// closes the window. A series with fewer than `window` returns yields an
/// empty vector.
///
/// # Errors
///
/// Returns [`HistoryError::InvalidParameter`] if `window` is below 2.
///
/// # Examples
///
/// ```
/// use adapter_history::{rolling_volatility, PriceSeries};
///
/// let csv = "date,close\n2024-01-01,100\n2024-01-02,101\n2024-01-03,100\n2024-01-04,102\n";
/// let series = PriceSeries::from_reader(csv.as_bytes()).unwrap();
///
/// let vol = rolling_volatility(&series, 2).unwrap();
/// assert_eq!(vol.len(), 2);
/// assert_eq!(vol[1].date.to_string(), "2024-01-04");
/// ```
pub fn rolling_volatility(
    series: &PriceSeries,
    window: usize,
) -> Result<Vec<VolatilityPoint>, HistoryError> {
    if window < 2 {
        return Err(HistoryError::InvalidParameter {
            name: "window",
            value: format!("must be at least 2, got {}", window),
        });
    }

    let returns = log_returns(&series.closes());
    let annualise = TRADING_DAYS_PER_YEAR.sqrt();

    // Return i spans prices i and i + 1, so the window ending at return i is
    // dated by price i + 1.
    returns
        .windows(window)
        .zip(series.points().iter().skip(window))
        .map(|(w, point)| {
            let std_dev = sample_std_dev(w).map_err(|_| HistoryError::InsufficientData {
                required: window + 1,
                actual: series.len(),
            })?;
            Ok(VolatilityPoint {
                date: point.date,
                annualized_volatility: std_dev * annualise,
            })
        })
        .collect()
}

/// Computes [`HistoricalStatistics`] from a cleaned price series.
///
/// # Errors
///
/// Returns [`HistoryError::InsufficientData`] if the series has fewer than
/// two prices.
pub fn compute_statistics(series: &PriceSeries) -> Result<HistoricalStatistics, HistoryError> {
    let insufficient = || HistoryError::InsufficientData {
        required: 2,
        actual: series.len(),
    };

    let closes = series.closes();
    let latest_price = *closes.last().ok_or_else(insufficient)?;
    let returns = log_returns(&closes);

    let mean_daily_return = mean(&returns).map_err(|_| insufficient())?;
    let std_dev = sample_std_dev(&returns).map_err(|_| insufficient())?;
    let annualized_volatility = HistoricalStatistics::annualize_volatility(std_dev);

    let stats = HistoricalStatistics {
        latest_price,
        mean_daily_return,
        std_dev,
        drift: HistoricalStatistics::gbm_drift(mean_daily_return, std_dev),
        annualized_volatility,
        max_drawdown: max_drawdown(&returns),
        sharpe_ratio: HistoricalStatistics::sharpe(mean_daily_return, annualized_volatility),
        observations: returns.len(),
    };

    debug!(
        observations = stats.observations,
        latest_price = stats.latest_price,
        drift = stats.drift,
        std_dev = stats.std_dev,
        "Computed historical statistics"
    );
    Ok(stats)
}

//! Simulation parameters.

use forecast_core::HistoricalStatistics;

use super::config::SimulationConfig;
use super::error::SimulationError;

/// Inputs of a single GBM simulation run.
///
/// # Model
///
/// ```text
/// S[t] = S[t-1] · exp(drift + volatility · Z),   Z ~ N(0, 1)
/// ```
///
/// `drift` and `volatility` are per step (typically per trading day), with
/// the drift already variance-adjusted (`mean - 0.5·variance`).
///
/// # Examples
///
/// ```rust
/// use forecast_sim::mc::SimulationParameters;
///
/// let params = SimulationParameters::new(100.0, 0.0, 0.02, 252, 10_000);
/// assert!(params.validate().is_ok());
///
/// let bad = SimulationParameters::new(-1.0, 0.0, 0.02, 252, 10_000);
/// assert!(bad.validate().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationParameters {
    /// Price at step 0 (> 0).
    pub start_price: f64,
    /// Per-step log drift.
    pub drift: f64,
    /// Per-step log volatility (≥ 0).
    pub volatility: f64,
    /// Number of matrix rows, including row 0 (≥ 1).
    pub horizon_steps: usize,
    /// Number of independent paths (≥ 1).
    pub num_paths: usize,
}

impl SimulationParameters {
    /// Creates new parameters without validation.
    #[inline]
    pub fn new(
        start_price: f64,
        drift: f64,
        volatility: f64,
        horizon_steps: usize,
        num_paths: usize,
    ) -> Self {
        Self {
            start_price,
            drift,
            volatility,
            horizon_steps,
            num_paths,
        }
    }

    /// Builds parameters from historical statistics and a configured grid.
    ///
    /// `latest_price` seeds the paths, `drift` and `std_dev` become the
    /// per-step drift and volatility.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::InvalidParameter`] if the resulting
    /// parameters are invalid.
    pub fn from_historical(
        stats: &HistoricalStatistics,
        config: &SimulationConfig,
    ) -> Result<Self, SimulationError> {
        let params = Self::new(
            stats.latest_price,
            stats.drift,
            stats.std_dev,
            config.horizon_steps(),
            config.num_paths(),
        );
        params.validate()?;
        Ok(params)
    }

    /// Checks the simulation preconditions.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::InvalidParameter`] naming the first
    /// offending field when:
    /// - `start_price` is not finite or not > 0
    /// - `drift` is not finite
    /// - `volatility` is not finite or < 0
    /// - `horizon_steps` or `num_paths` is 0
    pub fn validate(&self) -> Result<(), SimulationError> {
        if !(self.start_price.is_finite() && self.start_price > 0.0) {
            return Err(SimulationError::invalid(
                "start_price",
                format!("must be positive and finite, got {}", self.start_price),
            ));
        }
        if !self.drift.is_finite() {
            return Err(SimulationError::invalid(
                "drift",
                format!("must be finite, got {}", self.drift),
            ));
        }
        if !(self.volatility.is_finite() && self.volatility >= 0.0) {
            return Err(SimulationError::invalid(
                "volatility",
                format!("must be non-negative and finite, got {}", self.volatility),
            ));
        }
        if self.horizon_steps == 0 {
            return Err(SimulationError::invalid("horizon_steps", "must be at least 1"));
        }
        if self.num_paths == 0 {
            return Err(SimulationError::invalid("num_paths", "must be at least 1"));
        }
        Ok(())
    }

    /// Number of prices in the `horizon_steps × num_paths` grid.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::InvalidParameter`] if the product does not
    /// fit in `usize`.
    pub fn grid_len(&self) -> Result<usize, SimulationError> {
        self.horizon_steps
            .checked_mul(self.num_paths)
            .ok_or_else(|| {
                SimulationError::invalid(
                    "num_paths",
                    format!(
                        "{} steps × {} paths overflows the price grid",
                        self.horizon_steps, self.num_paths
                    ),
                )
            })
    }

    /// Returns `true` if [`validate`](Self::validate) succeeds.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

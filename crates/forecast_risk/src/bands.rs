//! Per-step confidence bands of a simulated path matrix.
//!
//! Each band is the quantile of the price cross-section at every step, which
//! gives the fan chart of the forecast. Steps are independent and are
//! computed in parallel.

use forecast_core::math::{quantile_sorted, sorted};
use forecast_sim::PricePathMatrix;
use rayon::prelude::*;

use crate::error::AnalysisError;

/// Default fan levels: 5th, 20th, 50th, 80th and 95th percentiles.
pub const DEFAULT_BAND_LEVELS: [f64; 5] = [0.05, 0.20, 0.50, 0.80, 0.95];

/// Quantile bands of a path matrix, indexed `[step][level]`.
///
/// # Examples
///
/// ```
/// use forecast_risk::ConfidenceBands;
/// use forecast_sim::PricePathMatrix;
///
/// let matrix = PricePathMatrix::from_rows(vec![
///     vec![100.0, 100.0, 100.0],
///     vec![90.0, 100.0, 110.0],
/// ])
/// .unwrap();
///
/// let bands = ConfidenceBands::from_paths(&matrix, &[0.0, 0.5, 1.0]).unwrap();
/// assert_eq!(bands.at(1), Some(&[90.0, 100.0, 110.0][..]));
/// assert_eq!(bands.band(1), Some(vec![100.0, 100.0]));
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ConfidenceBands {
    levels: Vec<f64>,
    values: Vec<Vec<f64>>,
}

impl ConfidenceBands {
    /// Computes the `levels` quantiles of every row of `matrix`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidParameter`] if `levels` is empty or a
    /// level is outside `[0, 1]`.
    pub fn from_paths(matrix: &PricePathMatrix, levels: &[f64]) -> Result<Self, AnalysisError> {
        if levels.is_empty() {
            return Err(AnalysisError::invalid("levels", "at least one level is required"));
        }
        if let Some(&bad) = levels.iter().find(|l| !(0.0..=1.0).contains(*l)) {
            return Err(AnalysisError::invalid(
                "levels",
                format!("must be in [0, 1], got {}", bad),
            ));
        }

        let rows: Vec<&[f64]> = matrix.rows().collect();
        let values = rows
            .par_iter()
            .map(|row| {
                let ordered = sorted(row);
                levels
                    .iter()
                    .map(|&level| quantile_sorted(&ordered, level))
                    .collect::<Result<Vec<f64>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            levels: levels.to_vec(),
            values,
        })
    }

    /// Computes the [`DEFAULT_BAND_LEVELS`] bands.
    ///
    /// # Errors
    ///
    /// Never fails for a well-formed matrix; the signature matches
    /// [`from_paths`](Self::from_paths).
    pub fn with_default_levels(matrix: &PricePathMatrix) -> Result<Self, AnalysisError> {
        Self::from_paths(matrix, &DEFAULT_BAND_LEVELS)
    }

    /// Quantile levels, in the order given.
    pub fn levels(&self) -> &[f64] {
        &self.levels
    }

    /// Number of steps covered.
    pub fn n_steps(&self) -> usize {
        self.values.len()
    }

    /// Band values at `step`, one per level.
    pub fn at(&self, step: usize) -> Option<&[f64]> {
        self.values.get(step).map(Vec::as_slice)
    }

    /// Iterates over steps, yielding one value per level.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[f64]> + '_ {
        self.values.iter().map(Vec::as_slice)
    }

    /// Time series of the band at `level_index`.
    pub fn band(&self, level_index: usize) -> Option<Vec<f64>> {
        if level_index < self.levels.len() {
            Some(self.values.iter().map(|row| row[level_index]).collect())
        } else {
            None
        }
    }
}

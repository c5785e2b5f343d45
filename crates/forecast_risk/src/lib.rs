//! # Forecast Risk (Layer 3: Outcome Analysis)
//!
//! Turns a simulated price distribution into decision statistics.
//!
//! ## Module Structure
//!
//! - [`analyzer`]: [`OutcomeAnalyzer`] producing percentile predictions,
//!   VaR/CVaR at 95% and 99%, threshold probabilities and moments
//! - [`tail`]: standalone VaR and CVaR over a return sample
//! - [`bands`]: per-step quantile fan of a full path matrix
//! - [`error`]: [`AnalysisError`]
//!
//! ## Conventions
//!
//! Returns are simple returns `final / start - 1`. Quantiles interpolate
//! linearly between order statistics. VaR and CVaR are reported signed, so a
//! loss is negative.
//!
//! ## Example
//!
//! ```
//! use forecast_risk::OutcomeAnalyzer;
//! use forecast_sim::mc::{simulate, SimulationParameters};
//! use forecast_sim::ForecastRng;
//!
//! let params = SimulationParameters::new(100.0, 0.0, 0.02, 252, 2_000);
//! let matrix = simulate(&params, &mut ForecastRng::from_seed(7)).unwrap();
//!
//! let result = OutcomeAnalyzer::analyze_paths(&matrix, 100.0).unwrap();
//! let rm = &result.risk_metrics;
//! assert!(rm.var_99 <= rm.var_95);
//! assert!(rm.cvar_95 <= rm.var_95);
//! ```

#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod analyzer;
pub mod bands;
pub mod error;
pub mod tail;

pub use analyzer::{
    AnalysisResult, OutcomeAnalyzer, PricePredictions, RiskMetrics, StatisticalSummary,
    CONFIDENCE_95, CONFIDENCE_99,
};
pub use bands::{ConfidenceBands, DEFAULT_BAND_LEVELS};
pub use error::AnalysisError;
pub use tail::{conditional_value_at_risk, value_at_risk};

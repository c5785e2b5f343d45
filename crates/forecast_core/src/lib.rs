//! # Forecast Core (Layer 1: Foundation)
//!
//! Numeric building blocks shared by the simulation and risk layers:
//!
//! - [`math::statistics`]: explicit descriptive statistics with documented
//!   conventions (interpolated quantiles, Bessel-corrected variance,
//!   moment-based skewness and excess kurtosis)
//! - [`types::HistoricalStatistics`]: the record handed from the historical
//!   data layer to the simulator
//! - [`types::StatisticsError`]: structured errors for degenerate inputs
//!
//! ## Architecture
//!
//! ```text
//! adapter_history ──► forecast_core ◄── forecast_sim ◄── forecast_risk
//!                                             ▲               ▲
//!                                             └── service_cli ┘
//! ```
//!
//! This crate has no dependency on any other workspace crate.
//!
//! ## Example
//!
//! ```
//! use forecast_core::math::statistics::{mean, quantile};
//!
//! let data = [1.0, 2.0, 3.0, 4.0];
//! assert_eq!(mean(&data).unwrap(), 2.5);
//! assert_eq!(quantile(&data, 0.5).unwrap(), 2.5);
//! ```

#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod math;
pub mod types;

pub use types::{HistoricalStatistics, StatisticsError, TRADING_DAYS_PER_YEAR};

//! # Adapter History (Input Layer)
//!
//! Turns daily price files into the [`HistoricalStatistics`] record that
//! parameterises the simulator.
//!
//! 1. [`PriceSeries::from_path`] loads a `date,close` CSV
//! 2. [`convert_with_fx`] optionally converts it with an FX series and a unit
//!    divisor (troy ounce to gram by default)
//! 3. [`PriceSeries::window`] restricts the history to a date range
//! 4. [`compute_statistics`] derives log-return statistics, and
//!    [`rolling_volatility`] the rolling annualised volatility series
//!
//! No data is fetched from the network; files are produced upstream.
//!
//! ## Example
//!
//! ```
//! use adapter_history::{compute_statistics, PriceSeries};
//!
//! let csv = "date,close\n2024-01-01,100.0\n2024-01-02,101.0\n2024-01-03,100.5\n";
//! let series = PriceSeries::from_reader(csv.as_bytes()).unwrap();
//! let stats = compute_statistics(&series).unwrap();
//!
//! assert_eq!(stats.latest_price, 100.5);
//! assert_eq!(stats.observations, 2);
//! ```

#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod error;
pub mod merge;
pub mod series;
pub mod stats;

pub use error::HistoryError;
pub use forecast_core::HistoricalStatistics;
pub use merge::{convert_with_fx, TROY_OUNCE_GRAMS};
pub use series::{PricePoint, PriceSeries};
pub use stats::{
    compute_statistics, log_returns, max_drawdown, rolling_volatility, VolatilityPoint,
    VOLATILITY_WINDOW,
};

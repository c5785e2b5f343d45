//! Core types shared across the workspace.
//!
//! - [`error`]: statistics error taxonomy
//! - [`historical`]: historical statistics record feeding the simulator

pub mod error;
pub mod historical;

pub use error::StatisticsError;
pub use historical::{HistoricalStatistics, TRADING_DAYS_PER_YEAR};

//! Monte Carlo GBM path simulation.
//!
//! - [`SimulationParameters`]: start price, per-step drift and volatility,
//!   grid size
//! - [`SimulationConfig`]: validated grid, seed and parallel settings
//! - [`PricePathMatrix`]: step-major `[step][path]` output
//! - [`simulate`]: single-generator kernel
//! - [`simulate_blocks`] / [`PathSimulator`]: substream-per-block simulator,
//!   optionally on the rayon pool

pub mod config;
pub mod error;
pub mod matrix;
pub mod params;
pub mod paths;
pub mod simulator;

pub use config::{
    ParallelConfig, SimulationConfig, SimulationConfigBuilder, DEFAULT_BATCH_SIZE,
    DEFAULT_HORIZON_STEPS, DEFAULT_NUM_PATHS, DEFAULT_PARALLEL_THRESHOLD, MAX_PATHS, MAX_STEPS,
};
pub use error::{ConfigError, SimulationError};
pub use matrix::PricePathMatrix;
pub use params::SimulationParameters;
pub use paths::simulate;
pub use simulator::{simulate_blocks, PathSimulator, SimulationRun};

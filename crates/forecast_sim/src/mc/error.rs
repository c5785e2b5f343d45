//! Error types for the path simulator.
//!
//! - [`ConfigError`]: rejected [`SimulationConfig`](super::SimulationConfig) values
//! - [`SimulationError`]: rejected simulation inputs

use thiserror::Error;

/// Configuration error for the simulator.
///
/// These errors occur while building a configuration.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Path count outside valid range [1, 10_000_000].
    #[error("Invalid path count {0}: must be in range [1, 10_000_000]")]
    InvalidPathCount(usize),

    /// Step count outside valid range [1, 10_000].
    #[error("Invalid step count {0}: must be in range [1, 10_000]")]
    InvalidStepCount(usize),

    /// Invalid parameter value with name and description.
    #[error("Invalid parameter '{name}': {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        value: String,
    },
}

/// Simulation input error.
///
/// Raised before any random draw is made; a failed call produces no partial
/// matrix. Retrying with the same inputs fails the same way.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SimulationError {
    /// Malformed simulation parameter (non-positive price, zero paths or
    /// steps, negative or non-finite volatility, non-finite drift).
    #[error("Invalid simulation parameter '{name}': {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        value: String,
    },

    /// Invalid simulator configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl SimulationError {
    /// Creates an invalid parameter error.
    pub(crate) fn invalid(name: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            value: value.into(),
        }
    }
}

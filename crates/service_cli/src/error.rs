//! CLI error types.

use thiserror::Error;

use crate::config::ConfigError;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// An input file does not exist.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Invalid command-line argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Simulator configuration rejected.
    #[error("Simulation configuration error: {0}")]
    SimulationConfig(#[from] forecast_sim::ConfigError),

    /// Historical data error.
    #[error("Historical data error: {0}")]
    History(#[from] adapter_history::HistoryError),

    /// Simulation error.
    #[error("Simulation error: {0}")]
    Simulation(#[from] forecast_sim::SimulationError),

    /// Analysis error.
    #[error("Analysis error: {0}")]
    Analysis(#[from] forecast_risk::AnalysisError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV writer error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialisation error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

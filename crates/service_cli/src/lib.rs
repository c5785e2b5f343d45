//! Forecast CLI library
//!
//! Command implementations behind the `forecast` binary: configuration
//! loading, the history → simulation → analysis pipeline and artifact
//! writers.

pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod report;

pub use error::{CliError, Result};

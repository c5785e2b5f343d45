//! Forecast configuration management.
//!
//! Loads the pipeline configuration from a TOML file, applies `FORECAST_*`
//! environment overrides and validates the result, reporting every problem
//! at once.
//!
//! ```toml
//! log_level = "info"
//!
//! [data]
//! price_file = "data/silver_usd.csv"
//! fx_file = "data/usd_inr.csv"
//! unit_divisor = 31.1035
//! start_date = "2015-01-01"
//!
//! [simulation]
//! horizon_steps = 252
//! num_paths = 10000
//! seed = 42
//!
//! [output]
//! dir = "output"
//! ```

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use forecast_risk::DEFAULT_BAND_LEVELS;
use forecast_sim::mc::{
    ParallelConfig, SimulationConfig, DEFAULT_BATCH_SIZE, DEFAULT_HORIZON_STEPS,
    DEFAULT_NUM_PATHS, DEFAULT_PARALLEL_THRESHOLD, MAX_PATHS, MAX_STEPS,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Historical input settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// `date,close` price file.
    pub price_file: PathBuf,
    /// Optional `date,close` FX file used to convert prices.
    pub fx_file: Option<PathBuf>,
    /// Divisor applied with FX conversion (troy ounce → gram by default).
    pub unit_divisor: f64,
    /// First date of the historical window (inclusive).
    pub start_date: Option<NaiveDate>,
    /// Last date of the historical window (inclusive).
    pub end_date: Option<NaiveDate>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            price_file: PathBuf::from("data/prices.csv"),
            fx_file: None,
            unit_divisor: adapter_history::TROY_OUNCE_GRAMS,
            start_date: None,
            end_date: None,
        }
    }
}

/// Monte Carlo settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Rows of the path matrix, including the start row.
    pub horizon_steps: usize,
    /// Number of simulated paths.
    pub num_paths: usize,
    /// Master seed; drawn from entropy when absent.
    pub seed: Option<u64>,
    /// Paths per random substream block.
    pub batch_size: usize,
    /// Minimum path count before blocks run in parallel.
    pub parallel_threshold: usize,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            horizon_steps: DEFAULT_HORIZON_STEPS,
            num_paths: DEFAULT_NUM_PATHS,
            seed: None,
            batch_size: DEFAULT_BATCH_SIZE,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving every artifact.
    pub dir: PathBuf,
    /// Whether to persist the full path matrix.
    pub write_matrix: bool,
    /// Quantile levels of the confidence bands.
    pub band_levels: Vec<f64>,
    /// Unit label used in the text report.
    pub unit_label: String,
    /// Returns per window of the rolling volatility series.
    pub volatility_window: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("output"),
            write_matrix: true,
            band_levels: DEFAULT_BAND_LEVELS.to_vec(),
            unit_label: "per gram".to_string(),
            volatility_window: adapter_history::VOLATILITY_WINDOW,
        }
    }
}

/// Forecast pipeline configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Historical input settings.
    #[serde(default)]
    pub data: DataConfig,

    /// Monte Carlo settings.
    #[serde(default)]
    pub simulation: SimulationSettings,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,

    /// Default log level when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            data: DataConfig::default(),
            simulation: SimulationSettings::default(),
            output: OutputConfig::default(),
            log_level: default_log_level(),
        }
    }
}

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

fn parse_or_warn<T: std::str::FromStr>(key: &str, raw: &str) -> Option<T> {
    let parsed = raw.trim().parse().ok();
    if parsed.is_none() {
        warn!(key, value = raw, "Ignoring unparsable environment override");
    }
    parsed
}

impl ForecastConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Parse`] if it is not valid TOML for this schema.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed input.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Loads `path` when given, or returns the defaults.
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load).
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Applies `FORECAST_*` environment variable overrides.
    pub fn with_env_override(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Applies overrides looked up by `lookup`, keyed by environment variable
    /// name. Unparsable values are logged and ignored.
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(v) = lookup("FORECAST_NUM_PATHS") {
            if let Some(n) = parse_or_warn("FORECAST_NUM_PATHS", &v) {
                self.simulation.num_paths = n;
            }
        }

        if let Some(v) = lookup("FORECAST_HORIZON_STEPS") {
            if let Some(n) = parse_or_warn("FORECAST_HORIZON_STEPS", &v) {
                self.simulation.horizon_steps = n;
            }
        }

        if let Some(v) = lookup("FORECAST_SEED") {
            if let Some(seed) = parse_or_warn("FORECAST_SEED", &v) {
                self.simulation.seed = Some(seed);
            }
        }

        if let Some(v) = lookup("FORECAST_START_DATE") {
            if let Some(date) = parse_or_warn("FORECAST_START_DATE", &v) {
                self.data.start_date = Some(date);
            }
        }

        if let Some(v) = lookup("FORECAST_END_DATE") {
            if let Some(date) = parse_or_warn("FORECAST_END_DATE", &v) {
                self.data.end_date = Some(date);
            }
        }

        if let Some(dir) = lookup("FORECAST_OUTPUT_DIR") {
            self.output.dir = PathBuf::from(dir);
        }

        if let Some(level) = lookup("FORECAST_LOG_LEVEL") {
            self.log_level = level;
        }

        self
    }

    /// Validates the configuration, collecting every problem.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] listing all violations.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if !VALID_LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, VALID_LOG_LEVELS
            ));
        }

        if self.data.price_file.as_os_str().is_empty() {
            errors.push("data.price_file cannot be empty".to_string());
        }

        let divisor = self.data.unit_divisor;
        if !(divisor.is_finite() && divisor > 0.0) {
            errors.push(format!(
                "data.unit_divisor must be positive and finite, got {}",
                divisor
            ));
        }

        if let (Some(start), Some(end)) = (self.data.start_date, self.data.end_date) {
            if start > end {
                errors.push(format!(
                    "data.start_date {} is after data.end_date {}",
                    start, end
                ));
            }
        }

        let sim = &self.simulation;
        if sim.num_paths == 0 || sim.num_paths > MAX_PATHS {
            errors.push(format!(
                "simulation.num_paths {} must be in [1, {}]",
                sim.num_paths, MAX_PATHS
            ));
        }
        if sim.horizon_steps == 0 || sim.horizon_steps > MAX_STEPS {
            errors.push(format!(
                "simulation.horizon_steps {} must be in [1, {}]",
                sim.horizon_steps, MAX_STEPS
            ));
        }
        if sim.batch_size == 0 {
            errors.push("simulation.batch_size must be greater than 0".to_string());
        }

        if self.output.dir.as_os_str().is_empty() {
            errors.push("output.dir cannot be empty".to_string());
        }
        if self.output.volatility_window < 2 {
            errors.push(format!(
                "output.volatility_window {} must be at least 2",
                self.output.volatility_window
            ));
        }
        if self.output.band_levels.is_empty() {
            errors.push("output.band_levels cannot be empty".to_string());
        }
        if let Some(bad) = self
            .output
            .band_levels
            .iter()
            .find(|l| !(0.0..=1.0).contains(*l))
        {
            errors.push(format!("output.band_levels value {} is outside [0, 1]", bad));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Builds the simulator configuration.
    ///
    /// # Errors
    ///
    /// Returns the simulator's configuration error for out-of-range values.
    pub fn simulation_config(&self) -> Result<SimulationConfig, forecast_sim::ConfigError> {
        let sim = &self.simulation;
        SimulationConfig::builder()
            .horizon_steps(sim.horizon_steps)
            .num_paths(sim.num_paths)
            .maybe_seed(sim.seed)
            .parallel(ParallelConfig {
                batch_size: sim.batch_size,
                parallel_threshold: sim.parallel_threshold,
            })
            .build()
    }
}

/// Configuration error type.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("IO error reading {path}: {source}")]
    Io {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for this schema.
    #[error("Parse error: {0}")]
    Parse(String),

    /// One or more values failed validation.
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn validation_errors(config: &ForecastConfig) -> Vec<String> {
        match config.validate() {
            Err(ConfigError::Validation(errors)) => errors,
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_default_config() {
        let config = ForecastConfig::default();
        assert_eq!(config.simulation.horizon_steps, 252);
        assert_eq!(config.simulation.num_paths, 10_000);
        assert_eq!(config.simulation.seed, None);
        assert_eq!(config.output.band_levels, DEFAULT_BAND_LEVELS.to_vec());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_toml() {
        let config = ForecastConfig::from_toml_str(
            r#"
            [data]
            price_file = "prices.csv"
            start_date = "2015-01-01"

            [simulation]
            num_paths = 500
            seed = 7
            "#,
        )
        .unwrap();

        assert_eq!(config.data.price_file, PathBuf::from("prices.csv"));
        assert_eq!(config.data.start_date, NaiveDate::from_ymd_opt(2015, 1, 1));
        assert_eq!(config.data.unit_divisor, adapter_history::TROY_OUNCE_GRAMS);
        assert_eq!(config.simulation.num_paths, 500);
        assert_eq!(config.simulation.horizon_steps, 252);
        assert_eq!(config.simulation.seed, Some(7));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            ForecastConfig::from_toml_str("[simulation]\nnum_paths = \"many\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("FORECAST_NUM_PATHS", "2500"),
            ("FORECAST_HORIZON_STEPS", "30"),
            ("FORECAST_SEED", "99"),
            ("FORECAST_START_DATE", "2020-06-01"),
            ("FORECAST_OUTPUT_DIR", "/tmp/forecast"),
            ("FORECAST_LOG_LEVEL", "debug"),
        ]
        .into_iter()
        .collect();

        let config = ForecastConfig::default()
            .with_overrides_from(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.simulation.num_paths, 2_500);
        assert_eq!(config.simulation.horizon_steps, 30);
        assert_eq!(config.simulation.seed, Some(99));
        assert_eq!(config.data.start_date, NaiveDate::from_ymd_opt(2020, 6, 1));
        assert_eq!(config.data.end_date, None);
        assert_eq!(config.output.dir, PathBuf::from("/tmp/forecast"));
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_unparsable_override_ignored() {
        let config = ForecastConfig::default().with_overrides_from(|key| {
            (key == "FORECAST_NUM_PATHS").then(|| "lots".to_string())
        });
        assert_eq!(config.simulation.num_paths, 10_000);
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let mut config = ForecastConfig::default();
        config.log_level = "loud".to_string();
        assert!(validation_errors(&config)
            .iter()
            .any(|e| e.contains("log_level")));
    }

    #[test]
    fn test_validate_date_order() {
        let mut config = ForecastConfig::default();
        config.data.start_date = NaiveDate::from_ymd_opt(2024, 1, 1);
        config.data.end_date = NaiveDate::from_ymd_opt(2023, 1, 1);
        assert!(validation_errors(&config)
            .iter()
            .any(|e| e.contains("start_date")));
    }

    #[test]
    fn test_validate_multiple_errors() {
        let mut config = ForecastConfig::default();
        config.simulation.num_paths = 0;
        config.simulation.horizon_steps = MAX_STEPS + 1;
        config.data.unit_divisor = 0.0;
        config.output.band_levels = vec![0.5, 1.5];

        let errors = validation_errors(&config);
        assert_eq!(errors.len(), 4, "{:?}", errors);
    }

    #[test]
    fn test_validate_volatility_window() {
        let mut config = ForecastConfig::default();
        config.output.volatility_window = 1;

        let errors = validation_errors(&config);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("volatility_window"));
    }

    #[test]
    fn test_simulation_config() {
        let mut config = ForecastConfig::default();
        config.simulation.num_paths = 123;
        config.simulation.seed = Some(5);

        let sim = config.simulation_config().unwrap();
        assert_eq!(sim.num_paths(), 123);
        assert_eq!(sim.seed(), Some(5));
        assert_eq!(sim.parallel().batch_size, DEFAULT_BATCH_SIZE);
    }

    #[test]
    fn test_config_error_display() {
        let error = ConfigError::Validation(vec!["Error 1".to_string(), "Error 2".to_string()]);
        assert_eq!(error.to_string(), "Validation errors: Error 1; Error 2");
    }
}

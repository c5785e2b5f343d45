//! Monte Carlo simulation configuration.
//!
//! Replaces process-wide constants with an explicit, validated value passed to
//! the simulator.

use super::error::ConfigError;

/// Maximum number of simulation paths allowed.
pub const MAX_PATHS: usize = 10_000_000;

/// Maximum number of time steps allowed per path.
pub const MAX_STEPS: usize = 10_000;

/// Default horizon: one trading year of daily steps.
pub const DEFAULT_HORIZON_STEPS: usize = 252;

/// Default number of simulated paths.
pub const DEFAULT_NUM_PATHS: usize = 10_000;

/// Default number of paths per random substream block.
pub const DEFAULT_BATCH_SIZE: usize = 512;

/// Default minimum path count before blocks run on the rayon pool.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 2_048;

/// Block partitioning and parallel execution settings.
///
/// `batch_size` fixes how paths are grouped into substream blocks and is
/// therefore part of the reproducibility key of a seeded run.
/// `parallel_threshold` only decides whether blocks run on the rayon pool;
/// it never changes the output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParallelConfig {
    /// Paths per substream block.
    pub batch_size: usize,
    /// Minimum path count before using parallelism.
    pub parallel_threshold: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl ParallelConfig {
    /// Creates a new parallel configuration; a zero batch size is raised to 1.
    pub fn new(batch_size: usize, parallel_threshold: usize) -> Self {
        Self {
            batch_size: batch_size.max(1),
            parallel_threshold,
        }
    }

    /// Returns whether to use parallel processing for the given path count.
    #[inline]
    pub fn should_parallelise(&self, n_paths: usize) -> bool {
        n_paths >= self.parallel_threshold
    }

    /// Number of blocks needed to cover `n_paths`.
    #[inline]
    pub fn block_count(&self, n_paths: usize) -> usize {
        n_paths.div_ceil(self.batch_size.max(1))
    }
}

/// Monte Carlo simulation configuration.
///
/// Immutable configuration specifying the simulation grid. Use
/// [`SimulationConfigBuilder`] to construct instances.
///
/// # Examples
///
/// ```rust
/// use forecast_sim::mc::SimulationConfig;
///
/// let config = SimulationConfig::builder()
///     .num_paths(10_000)
///     .horizon_steps(252)
///     .seed(42)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.num_paths(), 10_000);
/// assert_eq!(config.horizon_steps(), 252);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Number of rows of the path matrix.
    horizon_steps: usize,
    /// Number of simulated paths.
    num_paths: usize,
    /// Optional seed for reproducibility.
    seed: Option<u64>,
    /// Block partitioning and parallel execution settings.
    parallel: ParallelConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            horizon_steps: DEFAULT_HORIZON_STEPS,
            num_paths: DEFAULT_NUM_PATHS,
            seed: None,
            parallel: ParallelConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> SimulationConfigBuilder {
        SimulationConfigBuilder::default()
    }

    /// Returns the number of time steps (matrix rows).
    #[inline]
    pub fn horizon_steps(&self) -> usize {
        self.horizon_steps
    }

    /// Returns the number of simulated paths.
    #[inline]
    pub fn num_paths(&self) -> usize {
        self.num_paths
    }

    /// Returns the optional seed for reproducibility.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Returns the parallel execution settings.
    #[inline]
    pub fn parallel(&self) -> ParallelConfig {
        self.parallel
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `num_paths` is 0 or greater than 10,000,000
    /// - `horizon_steps` is 0 or greater than 10,000
    /// - `parallel.batch_size` is 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_paths == 0 || self.num_paths > MAX_PATHS {
            return Err(ConfigError::InvalidPathCount(self.num_paths));
        }
        if self.horizon_steps == 0 || self.horizon_steps > MAX_STEPS {
            return Err(ConfigError::InvalidStepCount(self.horizon_steps));
        }
        if self.parallel.batch_size == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "batch_size",
                value: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Builder for [`SimulationConfig`].
///
/// Unset fields fall back to the defaults (252 steps, 10 000 paths, no seed).
///
/// # Examples
///
/// ```rust
/// use forecast_sim::mc::{ParallelConfig, SimulationConfig};
///
/// let config = SimulationConfig::builder()
///     .num_paths(50_000)
///     .parallel(ParallelConfig::new(1_024, 4_096))
///     .build()
///     .expect("valid config");
///
/// assert_eq!(config.horizon_steps(), 252);
/// ```
#[derive(Clone, Debug, Default)]
pub struct SimulationConfigBuilder {
    horizon_steps: Option<usize>,
    num_paths: Option<usize>,
    seed: Option<u64>,
    parallel: Option<ParallelConfig>,
}

impl SimulationConfigBuilder {
    /// Sets the number of time steps, in [1, 10_000].
    #[inline]
    pub fn horizon_steps(mut self, horizon_steps: usize) -> Self {
        self.horizon_steps = Some(horizon_steps);
        self
    }

    /// Sets the number of simulation paths, in [1, 10_000_000].
    #[inline]
    pub fn num_paths(mut self, num_paths: usize) -> Self {
        self.num_paths = Some(num_paths);
        self
    }

    /// Sets the seed for reproducibility.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the seed when one is given, leaving it unset otherwise.
    #[inline]
    pub fn maybe_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the block partitioning and parallel execution settings.
    #[inline]
    pub fn parallel(mut self, parallel: ParallelConfig) -> Self {
        self.parallel = Some(parallel);
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if any value is out of range.
    pub fn build(self) -> Result<SimulationConfig, ConfigError> {
        let config = SimulationConfig {
            horizon_steps: self.horizon_steps.unwrap_or(DEFAULT_HORIZON_STEPS),
            num_paths: self.num_paths.unwrap_or(DEFAULT_NUM_PATHS),
            seed: self.seed,
            parallel: self.parallel.unwrap_or_default(),
        };

        config.validate()?;
        Ok(config)
    }
}

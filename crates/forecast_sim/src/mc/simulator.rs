//! Block-parallel path simulator.
//!
//! Paths are partitioned into blocks of [`ParallelConfig::batch_size`]
//! columns. Block `b` owns substream `b` of the master seed and draws its
//! normals step-major over its own columns, so the finished matrix depends
//! only on the seed and the block width. Blocks run on the rayon pool once
//! the path count reaches [`ParallelConfig::parallel_threshold`].

use forecast_core::HistoricalStatistics;
use rayon::prelude::*;

use super::config::{ParallelConfig, SimulationConfig};
use super::error::SimulationError;
use super::matrix::PricePathMatrix;
use super::params::SimulationParameters;
use super::paths::evolve_block;
use crate::rng::ForecastRng;

/// Result of a simulator run.
#[derive(Clone, Debug)]
pub struct SimulationRun {
    /// Simulated prices, `horizon_steps × num_paths`.
    pub matrix: PricePathMatrix,
    /// Master seed actually used (drawn from entropy when none was configured).
    pub seed: u64,
    /// Parameters the matrix was generated from.
    pub parameters: SimulationParameters,
}

/// Simulates one block of `width` paths on its own substream.
fn run_block(
    params: &SimulationParameters,
    seed: u64,
    block: usize,
    width: usize,
) -> Vec<f64> {
    let mut rng = ForecastRng::substream(seed, block as u64);
    let mut buffer = vec![0.0; params.horizon_steps * width];
    let mut shocks = vec![0.0; width];
    evolve_block(&mut buffer, &mut shocks, params, width, &mut rng);
    buffer
}

/// Simulates GBM paths in independently seeded blocks.
///
/// The output is identical whether blocks run sequentially or on the rayon
/// pool.
///
/// # Errors
///
/// Returns [`SimulationError::InvalidParameter`] if the parameters are
/// invalid or the grid size overflows `usize`.
///
/// # Examples
///
/// ```rust
/// use forecast_sim::mc::{simulate_blocks, ParallelConfig, SimulationParameters};
///
/// let params = SimulationParameters::new(100.0, 0.0, 0.02, 10, 300);
///
/// let sequential = simulate_blocks(&params, 7, &ParallelConfig::new(64, usize::MAX)).unwrap();
/// let parallel = simulate_blocks(&params, 7, &ParallelConfig::new(64, 0)).unwrap();
/// assert_eq!(sequential, parallel);
/// ```
pub fn simulate_blocks(
    params: &SimulationParameters,
    seed: u64,
    parallel: &ParallelConfig,
) -> Result<PricePathMatrix, SimulationError> {
    params.validate()?;
    let len = params.grid_len()?;

    let n_steps = params.horizon_steps;
    let n_paths = params.num_paths;
    let batch = parallel.batch_size.max(1);
    let n_blocks = parallel.block_count(n_paths);

    let block_width = |b: usize| batch.min(n_paths - b * batch);

    let blocks: Vec<Vec<f64>> = if parallel.should_parallelise(n_paths) {
        (0..n_blocks)
            .into_par_iter()
            .map(|b| run_block(params, seed, b, block_width(b)))
            .collect()
    } else {
        (0..n_blocks)
            .map(|b| run_block(params, seed, b, block_width(b)))
            .collect()
    };

    let mut data = vec![0.0; len];
    for (b, block) in blocks.iter().enumerate() {
        let width = block_width(b);
        let offset = b * batch;
        for (t, chunk) in block.chunks_exact(width).enumerate() {
            let start = t * n_paths + offset;
            data[start..start + width].copy_from_slice(chunk);
        }
    }

    Ok(PricePathMatrix::from_raw(data, n_steps, n_paths))
}

/// Monte Carlo path simulator driven by a [`SimulationConfig`].
///
/// # Examples
///
/// ```rust
/// use forecast_sim::mc::{PathSimulator, SimulationConfig, SimulationParameters};
///
/// let config = SimulationConfig::builder()
///     .horizon_steps(30)
///     .num_paths(1_000)
///     .seed(42)
///     .build()
///     .unwrap();
/// let simulator = PathSimulator::new(config);
///
/// let params = SimulationParameters::new(80.0, 0.0001, 0.02, 30, 1_000);
/// let run = simulator.run(&params).unwrap();
///
/// assert_eq!(run.seed, 42);
/// assert_eq!(run.matrix.shape(), (30, 1_000));
/// ```
#[derive(Clone, Debug, Default)]
pub struct PathSimulator {
    config: SimulationConfig,
}

impl PathSimulator {
    /// Creates a simulator with the given configuration.
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Builds run parameters from historical statistics on this simulator's
    /// grid.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::InvalidParameter`] if the statistics yield
    /// an invalid start price or volatility.
    pub fn parameters_from(
        &self,
        stats: &HistoricalStatistics,
    ) -> Result<SimulationParameters, SimulationError> {
        SimulationParameters::from_historical(stats, &self.config)
    }

    /// Simulates `params`, seeding from the configuration or from entropy.
    ///
    /// The parameters must use this simulator's grid, as built by
    /// [`parameters_from`](Self::parameters_from).
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError`] if the configuration or the parameters are
    /// invalid, or if the parameters' steps or paths differ from the
    /// configured grid. Nothing is drawn on failure.
    pub fn run(&self, params: &SimulationParameters) -> Result<SimulationRun, SimulationError> {
        self.config.validate()?;
        params.validate()?;
        if params.horizon_steps != self.config.horizon_steps() {
            return Err(SimulationError::invalid(
                "horizon_steps",
                format!(
                    "{} does not match the configured {}",
                    params.horizon_steps,
                    self.config.horizon_steps()
                ),
            ));
        }
        if params.num_paths != self.config.num_paths() {
            return Err(SimulationError::invalid(
                "num_paths",
                format!(
                    "{} does not match the configured {}",
                    params.num_paths,
                    self.config.num_paths()
                ),
            ));
        }
        let seed = self.config.seed().unwrap_or_else(ForecastRng::entropy_seed);
        let matrix = simulate_blocks(params, seed, &self.config.parallel())?;

        Ok(SimulationRun {
            matrix,
            seed,
            parameters: *params,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mc::MAX_PATHS;
    use approx::assert_relative_eq;

    fn params(num_paths: usize) -> SimulationParameters {
        SimulationParameters::new(100.0, 0.0003, 0.02, 25, num_paths)
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let p = params(1_000);
        let seq = simulate_blocks(&p, 11, &ParallelConfig::new(128, usize::MAX)).unwrap();
        let par = simulate_blocks(&p, 11, &ParallelConfig::new(128, 0)).unwrap();
        assert_eq!(seq, par);
    }

    #[test]
    fn test_partial_last_block() {
        let p = params(130);
        let matrix = simulate_blocks(&p, 3, &ParallelConfig::new(64, 0)).unwrap();

        assert_eq!(matrix.shape(), (25, 130));
        assert!(matrix.row(0).unwrap().iter().all(|&x| x == 100.0));
        assert!(matrix.as_slice().iter().all(|&x| x > 0.0));
    }

    #[test]
    fn test_single_block_matches_substream_simulate() {
        let p = params(40);
        let blocks = simulate_blocks(&p, 21, &ParallelConfig::new(64, usize::MAX)).unwrap();
        let direct = super::super::paths::simulate(&p, &mut ForecastRng::substream(21, 0)).unwrap();
        assert_eq!(blocks, direct);
    }

    #[test]
    fn test_block_columns_are_independent_of_path_count() {
        // The first block's columns do not depend on how many further blocks follow.
        let small = simulate_blocks(&params(64), 5, &ParallelConfig::new(64, 0)).unwrap();
        let large = simulate_blocks(&params(256), 5, &ParallelConfig::new(64, 0)).unwrap();

        for t in 0..25 {
            assert_eq!(small.row(t).unwrap(), &large.row(t).unwrap()[..64]);
        }
    }

    #[test]
    fn test_zero_volatility_blocks() {
        let p = SimulationParameters::new(100.0, 1.01f64.ln(), 0.0, 3, 10);
        let matrix = simulate_blocks(&p, 0, &ParallelConfig::new(3, 0)).unwrap();
        for &price in matrix.final_prices() {
            assert_relative_eq!(price, 102.01, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_run_reports_seed() {
        let config = SimulationConfig::builder()
            .horizon_steps(25)
            .num_paths(50)
            .seed(99)
            .build()
            .unwrap();
        let simulator = PathSimulator::new(config);

        let a = simulator.run(&params(50)).unwrap();
        let b = simulator.run(&params(50)).unwrap();

        assert_eq!(a.seed, 99);
        assert_eq!(a.matrix, b.matrix);
        assert_eq!(a.parameters, params(50));
    }

    #[test]
    fn test_run_without_seed_is_replayable() {
        let config = SimulationConfig::builder()
            .horizon_steps(25)
            .num_paths(50)
            .build()
            .unwrap();
        let run = PathSimulator::new(config.clone()).run(&params(50)).unwrap();

        let replay = simulate_blocks(&params(50), run.seed, &config.parallel()).unwrap();
        assert_eq!(run.matrix, replay);
    }

    #[test]
    fn test_run_rejects_grid_outside_config() {
        let config = SimulationConfig::builder()
            .horizon_steps(25)
            .num_paths(50)
            .seed(1)
            .build()
            .unwrap();
        let simulator = PathSimulator::new(config);

        assert!(matches!(
            simulator.run(&params(MAX_PATHS + 1)),
            Err(SimulationError::InvalidParameter { name: "num_paths", .. })
        ));
        let short = SimulationParameters::new(100.0, 0.0003, 0.02, 10, 50);
        assert!(matches!(
            simulator.run(&short),
            Err(SimulationError::InvalidParameter { name: "horizon_steps", .. })
        ));
    }

    #[test]
    fn test_run_rejects_invalid_parameters() {
        let simulator = PathSimulator::default();
        let bad = SimulationParameters::new(100.0, 0.0, f64::NAN, 10, 10);
        assert!(matches!(
            simulator.run(&bad),
            Err(SimulationError::InvalidParameter {
                name: "volatility",
                ..
            })
        ));
    }
}

//! Sequential GBM path generation.

use super::error::SimulationError;
use super::matrix::PricePathMatrix;
use super::params::SimulationParameters;
use crate::rng::ForecastRng;

/// Evolves `width` paths over `n_steps` rows into a step-major buffer.
///
/// One row of `width` normals is drawn per step, row 0 included. The row-0
/// draws are consumed and discarded so that the draw count is always
/// `n_steps × width`; row 0 is then set to the start price.
pub(crate) fn evolve_block(
    buffer: &mut [f64],
    shocks: &mut [f64],
    params: &SimulationParameters,
    width: usize,
    rng: &mut ForecastRng,
) {
    debug_assert_eq!(shocks.len(), width);
    debug_assert_eq!(buffer.len() % width, 0);

    let drift = params.drift;
    let vol = params.volatility;

    let mut rows = buffer.chunks_exact_mut(width);
    let Some(first) = rows.next() else {
        return;
    };

    rng.fill_normal(shocks);
    first.fill(params.start_price);

    let mut prev: &[f64] = first;
    for cur in rows {
        rng.fill_normal(shocks);
        for ((c, &p), &z) in cur.iter_mut().zip(prev.iter()).zip(shocks.iter()) {
            *c = p * (drift + vol * z).exp();
        }
        prev = cur;
    }
}

/// Simulates GBM price paths on a single generator.
///
/// Draws are made step-major: for each row, one standard normal per path in
/// path order. The same parameters and generator state always produce the
/// same matrix.
///
/// # Errors
///
/// Returns [`SimulationError::InvalidParameter`] before any draw if the
/// parameters are invalid or the grid size overflows `usize`.
///
/// # Examples
///
/// ```rust
/// use forecast_sim::mc::{simulate, SimulationParameters};
/// use forecast_sim::rng::ForecastRng;
///
/// // Zero volatility: every path grows by exactly exp(drift) per step.
/// let params = SimulationParameters::new(100.0, 0.01f64.ln_1p(), 0.0, 2, 1);
/// let matrix = simulate(&params, &mut ForecastRng::from_seed(0)).unwrap();
/// assert!((matrix.get(1, 0).unwrap() - 101.0).abs() < 1e-9);
/// ```
pub fn simulate(
    params: &SimulationParameters,
    rng: &mut ForecastRng,
) -> Result<PricePathMatrix, SimulationError> {
    params.validate()?;
    let len = params.grid_len()?;

    let n_steps = params.horizon_steps;
    let n_paths = params.num_paths;

    let mut data = vec![0.0; len];
    let mut shocks = vec![0.0; n_paths];
    evolve_block(&mut data, &mut shocks, params, n_paths, rng);

    Ok(PricePathMatrix::from_raw(data, n_steps, n_paths))
}

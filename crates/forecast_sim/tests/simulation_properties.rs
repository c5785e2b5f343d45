//! Property tests for the path simulator.

use approx::assert_relative_eq;
use forecast_sim::mc::{simulate, simulate_blocks, ParallelConfig, SimulationParameters};
use forecast_sim::rng::ForecastRng;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Shape is (horizon_steps, num_paths) and row 0 is the start price.
    #[test]
    fn prop_shape_and_initial_row(
        start in 1.0f64..500.0,
        drift in -0.01f64..0.01,
        vol in 0.0f64..0.1,
        steps in 1usize..40,
        paths in 1usize..60,
        seed in any::<u64>(),
    ) {
        let params = SimulationParameters::new(start, drift, vol, steps, paths);
        let matrix = simulate(&params, &mut ForecastRng::from_seed(seed)).unwrap();

        prop_assert_eq!(matrix.shape(), (steps, paths));
        prop_assert!(matrix.row(0).unwrap().iter().all(|&p| p == start));
        prop_assert!(matrix.as_slice().iter().all(|&p| p > 0.0 && p.is_finite()));
    }

    /// With zero volatility every path follows start · exp(drift · t).
    #[test]
    fn prop_zero_volatility_is_deterministic(
        start in 1.0f64..500.0,
        drift in -0.01f64..0.01,
        steps in 1usize..30,
        paths in 1usize..10,
        seed in any::<u64>(),
    ) {
        let params = SimulationParameters::new(start, drift, 0.0, steps, paths);
        let matrix = simulate(&params, &mut ForecastRng::from_seed(seed)).unwrap();

        let expected = start * (drift * (steps - 1) as f64).exp();
        for &price in matrix.final_prices() {
            assert_relative_eq!(price, expected, max_relative = 1e-10);
        }
    }

    /// Block-parallel output is independent of whether rayon is used.
    #[test]
    fn prop_blocks_parallel_equals_sequential(
        paths in 1usize..300,
        batch in 1usize..100,
        seed in any::<u64>(),
    ) {
        let params = SimulationParameters::new(100.0, 0.0001, 0.02, 8, paths);
        let seq = simulate_blocks(&params, seed, &ParallelConfig::new(batch, usize::MAX)).unwrap();
        let par = simulate_blocks(&params, seed, &ParallelConfig::new(batch, 0)).unwrap();
        prop_assert_eq!(seq, par);
    }

    /// Invalid start prices are always rejected.
    #[test]
    fn prop_non_positive_start_rejected(start in -1_000.0f64..=0.0) {
        let params = SimulationParameters::new(start, 0.0, 0.02, 5, 5);
        prop_assert!(simulate(&params, &mut ForecastRng::from_seed(1)).is_err());
    }
}

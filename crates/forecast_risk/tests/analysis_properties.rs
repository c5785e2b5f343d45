//! Property and end-to-end tests for the outcome analyzer.

use approx::assert_relative_eq;
use forecast_risk::{ConfidenceBands, OutcomeAnalyzer};
use forecast_sim::mc::{simulate, simulate_blocks, ParallelConfig, SimulationParameters};
use forecast_sim::ForecastRng;
use proptest::prelude::*;

fn price_sample() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(1.0f64..1_000.0, 1..200)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_percentiles_ordered(finals in price_sample(), start in 1.0f64..1_000.0) {
        let pp = OutcomeAnalyzer::analyze(&finals, start).unwrap().price_predictions;

        prop_assert!(pp.percentile_5 <= pp.percentile_25);
        prop_assert!(pp.percentile_25 <= pp.median);
        prop_assert!(pp.median <= pp.percentile_75);
        prop_assert!(pp.percentile_75 <= pp.percentile_95);
    }

    #[test]
    fn prop_tail_ordering(finals in price_sample(), start in 1.0f64..1_000.0) {
        let rm = OutcomeAnalyzer::analyze(&finals, start).unwrap().risk_metrics;

        prop_assert!(rm.var_99 <= rm.var_95);
        prop_assert!(rm.cvar_95 <= rm.var_95 + 1e-12 * rm.var_95.abs().max(1.0));
        prop_assert!(rm.cvar_99 <= rm.var_99 + 1e-12 * rm.var_99.abs().max(1.0));
    }

    #[test]
    fn prop_loss_probability_complement(finals in price_sample(), start in 1.0f64..1_000.0) {
        let result = OutcomeAnalyzer::analyze(&finals, start).unwrap();
        let at_or_above = finals.iter().filter(|&&p| p >= start).count() as f64
            / finals.len() as f64;

        assert_relative_eq!(
            result.risk_metrics.prob_loss + at_or_above,
            1.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn prop_increase_probabilities_decrease(finals in price_sample(), start in 1.0f64..1_000.0) {
        let rm = OutcomeAnalyzer::analyze(&finals, start).unwrap().risk_metrics;

        prop_assert!(rm.prob_increase_30 <= rm.prob_increase_20);
        prop_assert!(rm.prob_increase_20 <= rm.prob_increase_10);
        prop_assert!(rm.prob_increase_10 + rm.prob_loss <= 1.0 + 1e-12);
    }
}

#[test]
fn test_flat_simulation_end_to_end() {
    let params = SimulationParameters::new(100.0, 0.0, 0.0, 3, 2);
    let matrix = simulate(&params, &mut ForecastRng::from_seed(1)).unwrap();

    let result = OutcomeAnalyzer::analyze_paths(&matrix, params.start_price).unwrap();
    assert_eq!(result.price_predictions.mean, 100.0);
    assert_eq!(result.risk_metrics.prob_loss, 0.0);
    assert_eq!(result.risk_metrics.var_95, 0.0);
    assert_eq!(result.risk_metrics.var_99, 0.0);
    assert_eq!(result.statistical_summary.expected_return, 0.0);
}

#[test]
fn test_lognormal_expected_return() {
    // E[S_T / S_0] = exp((μ + σ²/2)·(T - 1)) for per-step drift μ.
    let drift = 0.0002;
    let vol = 0.01;
    let steps = 101;
    let params = SimulationParameters::new(100.0, drift, vol, steps, 40_000);
    let matrix = simulate_blocks(&params, 2024, &ParallelConfig::default()).unwrap();

    let result = OutcomeAnalyzer::analyze_paths(&matrix, 100.0).unwrap();
    let horizon = (steps - 1) as f64;
    let expected = ((drift + 0.5 * vol * vol) * horizon).exp() - 1.0;

    assert!((result.statistical_summary.expected_return - expected).abs() < 0.005);
    // Lognormal final prices are right-skewed.
    assert!(result.statistical_summary.skewness > 0.0);
}

#[test]
fn test_bands_match_analyzer_median() {
    let params = SimulationParameters::new(80.0, 0.0001, 0.02, 50, 1_001);
    let matrix = simulate(&params, &mut ForecastRng::from_seed(9)).unwrap();

    let bands = ConfidenceBands::from_paths(&matrix, &[0.05, 0.5, 0.95]).unwrap();
    let result = OutcomeAnalyzer::analyze_paths(&matrix, 80.0).unwrap();
    let last = bands.at(bands.n_steps() - 1).unwrap();

    assert_eq!(last[0], result.price_predictions.percentile_5);
    assert_eq!(last[1], result.price_predictions.median);
    assert_eq!(last[2], result.price_predictions.percentile_95);
}

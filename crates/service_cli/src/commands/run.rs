//! Run command implementation
//!
//! Full pipeline: history → statistics → simulation → analysis → artifacts.

use std::path::PathBuf;

use adapter_history::{compute_statistics, rolling_volatility};
use chrono::NaiveDate;
use clap::Args;
use forecast_core::HistoricalStatistics;
use forecast_risk::{AnalysisResult, ConfidenceBands, OutcomeAnalyzer};
use forecast_sim::{PathSimulator, SimulationParameters};
use serde::Serialize;
use tracing::info;

use super::load_series;
use crate::config::ForecastConfig;
use crate::output::{write_bands_file, write_json, write_matrix_file, write_volatility_file};
use crate::report::{executive_summary, ReportContext};
use crate::Result;

/// Path matrix file name.
pub const MATRIX_FILE: &str = "simulation_results.csv";
/// Confidence bands file name.
pub const BANDS_FILE: &str = "confidence_bands.csv";
/// Analysis JSON file name.
pub const ANALYSIS_FILE: &str = "analysis.json";
/// Rolling volatility file name.
pub const VOLATILITY_FILE: &str = "rolling_volatility.csv";
/// Executive summary file name.
pub const SUMMARY_FILE: &str = "executive_summary.txt";

/// Command-line overrides of the configuration, applied last.
#[derive(Args, Debug, Clone, Default)]
pub struct RunOverrides {
    /// Price CSV file (`date,close`)
    #[arg(long)]
    pub prices: Option<PathBuf>,

    /// FX CSV file (`date,close`) used to convert prices
    #[arg(long)]
    pub fx: Option<PathBuf>,

    /// Unit divisor applied with FX conversion
    #[arg(long)]
    pub unit_divisor: Option<f64>,

    /// First date of the historical window (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// Last date of the historical window (YYYY-MM-DD)
    #[arg(long)]
    pub end_date: Option<NaiveDate>,

    /// Number of Monte Carlo paths
    #[arg(short = 'n', long)]
    pub num_paths: Option<usize>,

    /// Number of time steps, including the start row
    #[arg(short = 's', long)]
    pub horizon_steps: Option<usize>,

    /// Random seed for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output directory
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Skip writing the full path matrix
    #[arg(long)]
    pub no_matrix: bool,
}

impl RunOverrides {
    /// Applies every set flag onto `config`.
    pub fn apply(&self, config: &mut ForecastConfig) {
        if let Some(p) = &self.prices {
            config.data.price_file = p.clone();
        }
        if let Some(fx) = &self.fx {
            config.data.fx_file = Some(fx.clone());
        }
        if let Some(d) = self.unit_divisor {
            config.data.unit_divisor = d;
        }
        if self.start_date.is_some() {
            config.data.start_date = self.start_date;
        }
        if self.end_date.is_some() {
            config.data.end_date = self.end_date;
        }
        if let Some(n) = self.num_paths {
            config.simulation.num_paths = n;
        }
        if let Some(n) = self.horizon_steps {
            config.simulation.horizon_steps = n;
        }
        if self.seed.is_some() {
            config.simulation.seed = self.seed;
        }
        if let Some(dir) = &self.output_dir {
            config.output.dir = dir.clone();
        }
        if self.no_matrix {
            config.output.write_matrix = false;
        }
    }
}

/// Files written by a run.
#[derive(Debug, Clone)]
pub struct RunArtifacts {
    /// Path matrix CSV, unless disabled.
    pub matrix: Option<PathBuf>,
    /// Confidence bands CSV.
    pub bands: PathBuf,
    /// Rolling volatility CSV, unless the history is shorter than one window.
    pub volatility: Option<PathBuf>,
    /// Analysis JSON.
    pub analysis: PathBuf,
    /// Executive summary text.
    pub summary: PathBuf,
}

/// Outcome of a pipeline run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Statistics of the historical window.
    pub historical: HistoricalStatistics,
    /// Parameters the paths were simulated with.
    pub parameters: SimulationParameters,
    /// Master seed actually used.
    pub seed: u64,
    /// Outcome analysis of the final prices.
    pub analysis: AnalysisResult,
    /// Files written.
    pub artifacts: RunArtifacts,
}

#[derive(Serialize)]
struct AnalysisDocument<'a> {
    seed: u64,
    parameters: &'a SimulationParameters,
    historical: &'a HistoricalStatistics,
    analysis: &'a AnalysisResult,
}

/// Run the full forecast pipeline
pub fn run(config: &ForecastConfig) -> Result<RunReport> {
    config.validate()?;

    info!("Step 1: Loading historical data...");
    let series = load_series(&config.data)?;
    let historical = compute_statistics(&series)?;
    let volatility_series = rolling_volatility(&series, config.output.volatility_window)?;
    info!(
        latest_price = historical.latest_price,
        annualized_volatility = historical.annualized_volatility,
        "Historical statistics computed"
    );

    info!("Step 2: Running Monte Carlo simulation...");
    let simulator = PathSimulator::new(config.simulation_config()?);
    let parameters = simulator.parameters_from(&historical)?;
    let sim_run = simulator.run(&parameters)?;
    info!(
        seed = sim_run.seed,
        num_paths = parameters.num_paths,
        horizon_steps = parameters.horizon_steps,
        "Simulation complete"
    );

    info!("Step 3: Analysing outcomes...");
    let analysis = OutcomeAnalyzer::analyze_paths(&sim_run.matrix, parameters.start_price)?;
    let bands = ConfidenceBands::from_paths(&sim_run.matrix, &config.output.band_levels)?;

    info!("Step 4: Writing artifacts...");
    let dir = &config.output.dir;
    std::fs::create_dir_all(dir)?;

    let matrix = if config.output.write_matrix {
        let path = dir.join(MATRIX_FILE);
        write_matrix_file(&path, &sim_run.matrix)?;
        info!("  Path matrix: {}", path.display());
        Some(path)
    } else {
        None
    };

    let bands_path = dir.join(BANDS_FILE);
    write_bands_file(&bands_path, &bands)?;

    let volatility = if volatility_series.is_empty() {
        info!(
            window = config.output.volatility_window,
            observations = historical.observations,
            "History shorter than one volatility window, skipping rolling volatility"
        );
        None
    } else {
        let path = dir.join(VOLATILITY_FILE);
        write_volatility_file(&path, &volatility_series)?;
        Some(path)
    };

    let analysis_path = dir.join(ANALYSIS_FILE);
    write_json(
        &analysis_path,
        &AnalysisDocument {
            seed: sim_run.seed,
            parameters: &parameters,
            historical: &historical,
            analysis: &analysis,
        },
    )?;

    let summary = executive_summary(
        &historical,
        &analysis,
        &ReportContext {
            num_paths: parameters.num_paths,
            horizon_steps: parameters.horizon_steps,
            seed: sim_run.seed,
            unit_label: &config.output.unit_label,
        },
    );
    let summary_path = dir.join(SUMMARY_FILE);
    std::fs::write(&summary_path, &summary)?;
    info!("  Summary: {}", summary_path.display());

    println!("{}", summary);

    Ok(RunReport {
        historical,
        parameters,
        seed: sim_run.seed,
        analysis,
        artifacts: RunArtifacts {
            matrix,
            bands: bands_path,
            volatility,
            analysis: analysis_path,
            summary: summary_path,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_apply() {
        let overrides = RunOverrides {
            prices: Some("p.csv".into()),
            num_paths: Some(64),
            seed: Some(3),
            no_matrix: true,
            ..RunOverrides::default()
        };
        let mut config = ForecastConfig::default();
        overrides.apply(&mut config);

        assert_eq!(config.data.price_file, PathBuf::from("p.csv"));
        assert_eq!(config.simulation.num_paths, 64);
        assert_eq!(config.simulation.seed, Some(3));
        assert!(!config.output.write_matrix);
        assert_eq!(config.simulation.horizon_steps, 252);
    }

    #[test]
    fn test_empty_overrides_leave_config() {
        let mut config = ForecastConfig::default();
        RunOverrides::default().apply(&mut config);
        assert_eq!(config, ForecastConfig::default());
    }
}

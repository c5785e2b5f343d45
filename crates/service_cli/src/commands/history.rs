//! History command implementation
//!
//! Loads the historical window and prints its statistics.

use adapter_history::compute_statistics;
use forecast_core::HistoricalStatistics;
use tracing::info;

use super::load_series;
use crate::config::ForecastConfig;
use crate::{CliError, Result};

/// Renders statistics as an aligned two-column table.
pub fn render_table(stats: &HistoricalStatistics) -> String {
    let rows = [
        ("Observations", stats.observations.to_string()),
        ("Latest price", format!("{:.4}", stats.latest_price)),
        ("Mean daily return", format!("{:.6}", stats.mean_daily_return)),
        ("Daily std dev", format!("{:.6}", stats.std_dev)),
        ("GBM drift", format!("{:.6}", stats.drift)),
        (
            "Annualized volatility",
            format!("{:.2}%", stats.annualized_volatility * 100.0),
        ),
        ("Max drawdown", format!("{:.2}%", stats.max_drawdown * 100.0)),
        ("Sharpe ratio", format!("{:.3}", stats.sharpe_ratio)),
    ];

    rows.iter()
        .map(|(label, value)| format!("{:<24}{:>16}\n", label, value))
        .collect()
}

/// Run the history command
pub fn run(config: &ForecastConfig, format: &str) -> Result<HistoricalStatistics> {
    info!("Computing historical statistics...");
    info!("  Prices: {}", config.data.price_file.display());

    let series = load_series(&config.data)?;
    let stats = compute_statistics(&series)?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&stats)?),
        "table" => print!("{}", render_table(&stats)),
        other => {
            return Err(CliError::InvalidArgument(format!(
                "Unknown format: {}. Supported: json, table",
                other
            )));
        }
    }

    Ok(stats)
}

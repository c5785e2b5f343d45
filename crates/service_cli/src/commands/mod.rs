//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod check;
pub mod history;
pub mod run;

use adapter_history::{convert_with_fx, PriceSeries};
use tracing::info;

use crate::config::DataConfig;
use crate::{CliError, Result};

/// Loads the configured price series, converts it with FX when an FX file is
/// set, and applies the date window.
pub fn load_series(data: &DataConfig) -> Result<PriceSeries> {
    if !data.price_file.exists() {
        return Err(CliError::FileNotFound(data.price_file.display().to_string()));
    }
    let prices = PriceSeries::from_path(&data.price_file)?;

    let series = match &data.fx_file {
        Some(fx_file) => {
            if !fx_file.exists() {
                return Err(CliError::FileNotFound(fx_file.display().to_string()));
            }
            let fx = PriceSeries::from_path(fx_file)?;
            convert_with_fx(&prices, &fx, data.unit_divisor)?
        }
        None => prices,
    };

    let windowed = series.window(data.start_date, data.end_date);
    info!(
        observations = windowed.len(),
        first = ?windowed.first().map(|p| p.date),
        last = ?windowed.latest().map(|p| p.date),
        "Historical window loaded"
    );
    Ok(windowed)
}

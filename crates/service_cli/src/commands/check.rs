//! Check command implementation
//!
//! Validates the configuration and reports missing input files.

use tracing::{info, warn};

use crate::config::ForecastConfig;
use crate::Result;

/// Problems that do not invalidate the configuration but would make a run
/// fail, such as missing input files.
pub fn missing_inputs(config: &ForecastConfig) -> Vec<String> {
    let data = &config.data;
    std::iter::once(&data.price_file)
        .chain(data.fx_file.as_ref())
        .filter(|path| !path.exists())
        .map(|path| format!("Input file not found: {}", path.display()))
        .collect()
}

/// Run the check command
pub fn run(config: &ForecastConfig) -> Result<()> {
    info!("Checking configuration...");

    config.validate()?;
    let sim = config.simulation_config()?;
    info!(
        num_paths = sim.num_paths(),
        horizon_steps = sim.horizon_steps(),
        seed = ?sim.seed(),
        batch_size = sim.parallel().batch_size,
        "Simulation settings valid"
    );

    let missing = missing_inputs(config);
    for problem in &missing {
        warn!("{}", problem);
    }

    println!("Configuration OK");
    println!("  Price file:   {}", config.data.price_file.display());
    if let Some(fx) = &config.data.fx_file {
        println!("  FX file:      {}", fx.display());
    }
    println!("  Paths:        {}", sim.num_paths());
    println!("  Steps:        {}", sim.horizon_steps());
    println!("  Output dir:   {}", config.output.dir.display());
    if !missing.is_empty() {
        println!("  Warnings:     {}", missing.len());
    }

    Ok(())
}

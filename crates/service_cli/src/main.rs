//! Forecast CLI - Monte Carlo commodity price forecasting
//!
//! # Commands
//!
//! - `forecast run` - Fit GBM to history, simulate paths and write the analysis
//! - `forecast history` - Print historical statistics for the configured window
//! - `forecast check` - Validate configuration and input files

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use service_cli::commands::{self, run::RunOverrides};
use service_cli::config::ForecastConfig;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Monte Carlo commodity price forecaster
#[derive(Parser)]
#[command(name = "forecast")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full forecast pipeline
    Run(RunOverrides),

    /// Print historical statistics
    History {
        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Check configuration and input files
    Check,
}

fn init_tracing(verbose: bool, level: &str) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let file_config = ForecastConfig::load_or_default(cli.config.as_deref())
        .context("failed to load configuration")?;

    // The subscriber must exist before env overrides are applied so that
    // unparsable values are reported.
    let level = std::env::var("FORECAST_LOG_LEVEL")
        .unwrap_or_else(|_| file_config.log_level.clone());
    init_tracing(cli.verbose, &level);
    let mut config = file_config.with_env_override();
    if cli.verbose {
        info!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Run(overrides) => {
            overrides.apply(&mut config);
            let report = commands::run::run(&config).context("forecast run failed")?;
            info!(seed = report.seed, "Run complete");
        }
        Commands::History { format } => {
            commands::history::run(&config, &format).context("history command failed")?;
        }
        Commands::Check => commands::check::run(&config).context("configuration check failed")?,
    }
    Ok(())
}

//! Executive summary text report.

use std::fmt;

use forecast_core::HistoricalStatistics;
use forecast_risk::AnalysisResult;

/// Run metadata shown in the report header.
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    /// Simulated paths.
    pub num_paths: usize,
    /// Matrix rows, including the start row.
    pub horizon_steps: usize,
    /// Master seed of the run.
    pub seed: u64,
    /// Unit label appended to prices, e.g. `per gram`.
    pub unit_label: &'a str,
}

fn pct(x: f64) -> String {
    format!("{:.2}%", x * 100.0)
}

/// Renders the executive summary.
///
/// # Examples
///
/// ```
/// use forecast_core::HistoricalStatistics;
/// use forecast_risk::OutcomeAnalyzer;
/// use service_cli::report::{executive_summary, ReportContext};
///
/// let stats = HistoricalStatistics {
///     latest_price: 100.0,
///     mean_daily_return: 0.0,
///     std_dev: 0.0,
///     drift: 0.0,
///     annualized_volatility: 0.0,
///     max_drawdown: 0.0,
///     sharpe_ratio: 0.0,
///     observations: 1,
/// };
/// let analysis = OutcomeAnalyzer::analyze(&[100.0, 100.0], 100.0).unwrap();
/// let ctx = ReportContext { num_paths: 2, horizon_steps: 3, seed: 1, unit_label: "per gram" };
///
/// let text = executive_summary(&stats, &analysis, &ctx);
/// assert!(text.contains("Probability of Loss: 0.00%"));
/// ```
pub fn executive_summary(
    stats: &HistoricalStatistics,
    analysis: &AnalysisResult,
    ctx: &ReportContext<'_>,
) -> String {
    ExecutiveSummary {
        stats,
        analysis,
        ctx,
    }
    .to_string()
}

/// Executive summary renderer; see [`executive_summary`].
#[derive(Debug, Clone, Copy)]
pub struct ExecutiveSummary<'a> {
    /// Historical statistics of the fitted window.
    pub stats: &'a HistoricalStatistics,
    /// Outcome analysis of the run.
    pub analysis: &'a AnalysisResult,
    /// Run metadata.
    pub ctx: &'a ReportContext<'a>,
}

impl fmt::Display for ExecutiveSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = self.stats;
        let pp = &self.analysis.price_predictions;
        let rm = &self.analysis.risk_metrics;
        let ss = &self.analysis.statistical_summary;
        let unit = self.ctx.unit_label;

        writeln!(f, "# Executive Summary: Monte Carlo Commodity Price Forecast")?;
        writeln!(f)?;
        writeln!(f, "## 1. Historical Analysis")?;
        writeln!(f, "- Observations: {}", stats.observations)?;
        writeln!(f, "- Annualized Volatility: {}", pct(stats.annualized_volatility))?;
        writeln!(f, "- Mean Daily Return: {:.5}", stats.mean_daily_return)?;
        writeln!(f, "- Maximum Drawdown: {}", pct(stats.max_drawdown))?;
        writeln!(f, "- Sharpe Ratio: {:.2}", stats.sharpe_ratio)?;
        writeln!(f, "- Latest Price: {:.2} {}", stats.latest_price, unit)?;
        writeln!(f)?;
        writeln!(f, "## 2. Simulation Results")?;
        writeln!(
            f,
            "Based on {} paths over {} steps (seed {}).",
            self.ctx.num_paths,
            self.ctx.horizon_steps.saturating_sub(1),
            self.ctx.seed
        )?;
        writeln!(f)?;
        writeln!(f, "### Price Predictions")?;
        writeln!(f, "- Mean Predicted Price: {:.2} {}", pp.mean, unit)?;
        writeln!(f, "- Median Predicted Price: {:.2} {}", pp.median, unit)?;
        writeln!(
            f,
            "- 90% Interval: {:.2} to {:.2} {}",
            pp.percentile_5, pp.percentile_95, unit
        )?;
        writeln!(f)?;
        writeln!(f, "### Risk Assessment")?;
        writeln!(
            f,
            "- VaR 95%: 5% chance of losing at least {}",
            pct(-rm.var_95)
        )?;
        writeln!(
            f,
            "- CVaR 95%: average loss in the worst 5% of outcomes is {}",
            pct(-rm.cvar_95)
        )?;
        writeln!(f, "- Probability of Loss: {}", pct(rm.prob_loss))?;
        writeln!(f)?;
        writeln!(f, "### Potential Upside")?;
        writeln!(f, "- Probability of >10% Gain: {}", pct(rm.prob_increase_10))?;
        writeln!(f, "- Probability of >20% Gain: {}", pct(rm.prob_increase_20))?;
        writeln!(f)?;
        writeln!(f, "## 3. Outlook")?;
        writeln!(f, "- Expected Return: {}", pct(ss.expected_return))?;
        writeln!(
            f,
            "- Forecast Standard Deviation: {:.2} {}",
            ss.std_dev_forecast, unit
        )?;
        writeln!(f)?;
        write!(
            f,
            "Figures derive from a constant-parameter GBM fitted to history and are not financial advice."
        )
    }
}

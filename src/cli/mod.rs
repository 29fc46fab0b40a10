//! Command-line parsing for the KPI report generator.
//!
//! Parsing stays separate from the pipeline so the analysis code never
//! touches `std::env` and stays testable with hand-built configs.

use std::path::PathBuf;

use clap::Parser;

use crate::domain::ReportConfig;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "kpir",
    version,
    about = "KPI & audit report generator (costs, turnover, projects)"
)]
pub struct Cli {
    /// Directory where the PDF reports are written.
    #[arg(short = 'o', long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Random seed for demo-data fabrication.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// A cost point is anomalous when its |z-score| exceeds this.
    #[arg(long, default_value_t = 2.0)]
    pub anomaly_threshold: f64,

    /// Monthly turnover (%) above this level triggers a warning.
    #[arg(long, default_value_t = 15.0)]
    pub turnover_threshold: f64,

    /// Number of future periods to forecast.
    #[arg(long, default_value_t = 3)]
    pub horizon: usize,

    /// A project is at risk when current cost exceeds this fraction of budget.
    #[arg(long, default_value_t = 0.9)]
    pub risk_ratio: f64,
}

impl Cli {
    /// Collapse the tuning flags into the pipeline's config struct.
    pub fn report_config(&self) -> ReportConfig {
        ReportConfig {
            anomaly_threshold: self.anomaly_threshold,
            forecast_horizon: self.horizon,
            turnover_threshold: self.turnover_threshold,
            project_risk_ratio: self.risk_ratio,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_reference_dashboard() {
        let cli = Cli::parse_from(["kpir"]);
        assert_eq!(cli.report_config(), ReportConfig::default());
        assert_eq!(cli.seed, 42);
        assert_eq!(cli.out_dir, PathBuf::from("."));
    }

    #[test]
    fn flags_override_the_config() {
        let cli = Cli::parse_from([
            "kpir",
            "--anomaly-threshold",
            "2.5",
            "--horizon",
            "6",
            "--turnover-threshold",
            "12.5",
        ]);
        let config = cli.report_config();
        assert_eq!(config.anomaly_threshold, 2.5);
        assert_eq!(config.forecast_horizon, 6);
        assert_eq!(config.turnover_threshold, 12.5);
    }
}

//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - fabricates the demo tables
//! - runs the audit, human-capital, and project pipelines
//! - writes the PDF artifacts
//! - prints a terminal summary

use std::path::Path;

use clap::Parser;

use crate::data::simulate;
use crate::error::{ReportError, Result};
use crate::report::{format, PageLayout};

pub mod pipeline;

use pipeline::{AUDIT_REPORT_FILENAME, HUMAN_CAPITAL_REPORT_FILENAME};

/// Entry point for the `kpir` binary.
pub fn run() -> Result<()> {
    let cli = crate::cli::Cli::parse();
    let config = cli.report_config();
    let layout = PageLayout::default();

    let data = simulate(cli.seed)?;

    let audit = pipeline::run_audit(&data.finance, &data.future_labels, &config, &layout)?;
    let turnover = pipeline::run_turnover(&data.turnover, &data.future_labels, &config, &layout)?;
    let projects = pipeline::run_projects(&data.projects, &config)?;

    write_artifact(&cli.out_dir, AUDIT_REPORT_FILENAME, &audit.pdf)?;
    write_artifact(&cli.out_dir, HUMAN_CAPITAL_REPORT_FILENAME, &turnover.pdf)?;

    print_summary(&audit, &turnover, &projects);
    Ok(())
}

fn write_artifact(out_dir: &Path, filename: &str, bytes: &[u8]) -> Result<()> {
    std::fs::create_dir_all(out_dir).map_err(|e| {
        ReportError::RenderFailure(format!("cannot create {}: {e}", out_dir.display()))
    })?;
    let path = out_dir.join(filename);
    std::fs::write(&path, bytes)
        .map_err(|e| ReportError::RenderFailure(format!("cannot write {}: {e}", path.display())))?;
    println!("Scritto {}", path.display());
    Ok(())
}

fn print_summary(
    audit: &pipeline::AuditRun,
    turnover: &pipeline::TurnoverRun,
    projects: &pipeline::ProjectOverview,
) {
    println!();
    println!("== Audit & Controllo Costi ==");
    for line in format::audit_kpi_lines(&audit.analysis.kpis) {
        println!("{line}");
    }
    println!("{}", format::ANOMALY_HEADING);
    for line in format::anomaly_lines(audit.analysis.anomalies()) {
        println!("  {line}");
    }
    println!("Previsione Costi:");
    for line in format::cost_forecast_lines(&audit.forecast) {
        println!("  {line}");
    }

    println!();
    println!("== Capitale Umano ==");
    for line in format::turnover_kpi_lines(&turnover.kpis) {
        println!("{line}");
    }
    for warning in &turnover.warnings {
        println!("{warning}");
    }
    println!("{}", format::TURNOVER_FORECAST_HEADING);
    for line in format::turnover_forecast_lines(&turnover.forecast) {
        println!("  {line}");
    }

    println!();
    println!("== Monitoraggio Commesse ==");
    for risk in &projects.risks {
        let marker = if risk.at_risk { "A RISCHIO" } else { "ok" };
        println!(
            "{}: budget {} / attuali {} [{marker}]",
            risk.project,
            format::eur(risk.budget),
            format::eur(risk.current_cost)
        );
    }
}

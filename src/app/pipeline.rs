//! Report-assembly pipeline shared by the CLI and any hosting dashboard.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! table -> KPIs/anomalies/forecast -> chart images -> assembled PDF bytes
//!
//! Each run owns every intermediate it produces; nothing is cached or shared
//! between invocations, so concurrent callers need no coordination. The
//! front-ends focus on presentation (writing files, download buttons).

use crate::chart::{
    render_bar_chart, render_forecast_chart, render_line_chart, render_pie_chart, ThresholdLine,
};
use crate::domain::{
    columns, CategoryAggregate, ChartImage, Forecast, ReportConfig, Series, Table,
};
use crate::error::{ReportError, Result};
use crate::forecast::forecast_series;
use crate::report::{assemble, format, PageLayout, ReportDoc, TextSection};
use crate::stats::{
    analyze_costs, project_risks, turnover_kpis, CostAnalysis, ProjectRisk, TurnoverKpis,
};

/// Deterministic artifact name of the financial report.
pub const AUDIT_REPORT_FILENAME: &str = "report_audit.pdf";
/// Deterministic artifact name of the human-capital report.
pub const HUMAN_CAPITAL_REPORT_FILENAME: &str = "report_capitale_umano.pdf";
/// MIME type the hosting layer should attach to a report download.
pub const REPORT_MIME_TYPE: &str = "application/pdf";

/// All computed outputs of one audit (cost/KPI) run.
///
/// The charts are returned alongside the PDF so the hosting dashboard can
/// show them inline without re-rendering.
#[derive(Debug, Clone)]
pub struct AuditRun {
    pub analysis: CostAnalysis,
    pub aggregate: CategoryAggregate,
    pub forecast: Forecast,
    pub trend_chart: ChartImage,
    pub category_chart: ChartImage,
    pub forecast_chart: ChartImage,
    pub pdf: Vec<u8>,
}

/// All computed outputs of one human-capital (turnover) run.
#[derive(Debug, Clone)]
pub struct TurnoverRun {
    pub kpis: TurnoverKpis,
    pub forecast: Forecast,
    /// True when a predicted month exceeds the threshold.
    pub forecast_breach: bool,
    /// Inline warnings for the hosting dashboard, possibly empty.
    pub warnings: Vec<String>,
    pub history_chart: ChartImage,
    pub forecast_chart: ChartImage,
    pub pdf: Vec<u8>,
}

/// Project monitoring outputs (inline only; the reference produces no PDF
/// for this section).
#[derive(Debug, Clone)]
pub struct ProjectOverview {
    pub risks: Vec<ProjectRisk>,
    pub chart: ChartImage,
}

/// Execute the audit pipeline over a finance table.
///
/// The table must carry a cost column and a per-row category attribute;
/// revenue is optional and drops its KPI line when absent.
pub fn run_audit(
    table: &Table,
    future_labels: &[String],
    config: &ReportConfig,
    layout: &PageLayout,
) -> Result<AuditRun> {
    let horizon_labels = horizon_labels(future_labels, config)?;

    // 1) KPIs + anomaly flags over the cost series.
    let revenue_column = table.column(columns::REVENUE).ok().map(|_| columns::REVENUE);
    let analysis = analyze_costs(table, columns::COST, revenue_column, config.anomaly_threshold)?;

    // 2) Cost breakdown by expense category.
    let aggregate = crate::stats::aggregate_by_category(table, columns::COST)?;

    // 3) Linear forecast of future costs.
    let costs = table.series(columns::COST)?;
    let forecast = forecast_series(&costs, horizon_labels)?;

    // 4) Charts.
    let mut trend_series = vec![costs.clone()];
    if revenue_column.is_some() {
        trend_series.push(table.series(columns::REVENUE)?);
    }
    let trend_chart = render_line_chart("Andamento Costi vs Ricavi", &trend_series, None)?;
    let category_chart = render_pie_chart("Ripartizione Costi per Categoria", &aggregate)?;
    let history = Series {
        name: "Costi Storici".to_string(),
        ..costs
    };
    let forecast_chart = render_forecast_chart(
        "Previsione Costi Futuri",
        &history,
        &forecast,
        "Previsione Costi",
        None,
    )?;

    // 5) Assemble the downloadable document.
    let doc = ReportDoc {
        title: "Report Audit - Analisi Costi & KPI".to_string(),
        kpi_lines: format::audit_kpi_lines(&analysis.kpis),
        warning: None,
        sections: vec![TextSection {
            heading: format::ANOMALY_HEADING.to_string(),
            lines: format::anomaly_lines(analysis.anomalies()),
            heading_drop: Some(layout.section_drop),
        }],
        charts: vec![trend_chart.clone(), category_chart.clone(), forecast_chart.clone()],
    };
    let pdf = assemble(&doc, layout)?;

    Ok(AuditRun {
        analysis,
        aggregate,
        forecast,
        trend_chart,
        category_chart,
        forecast_chart,
        pdf,
    })
}

/// Execute the human-capital pipeline over a turnover table.
pub fn run_turnover(
    table: &Table,
    future_labels: &[String],
    config: &ReportConfig,
    layout: &PageLayout,
) -> Result<TurnoverRun> {
    let horizon_labels = horizon_labels(future_labels, config)?;
    let threshold = config.turnover_threshold;

    // 1) KPIs over the historical rates.
    let rates = table.series(columns::TURNOVER)?;
    let kpis = turnover_kpis(&rates, threshold)?;

    // 2) Linear forecast of future rates.
    let forecast = forecast_series(&rates, horizon_labels)?;
    let forecast_breach = forecast.values().any(|v| v > threshold);

    let mut warnings = Vec::new();
    if kpis.threshold_breached {
        warnings.push(format::turnover_warning(threshold));
    }
    if forecast_breach {
        warnings.push(format::turnover_forecast_warning(threshold));
    }

    // 3) Charts: historical trend, then history + prediction overlay.
    let history = Series {
        name: "Turnover Storico".to_string(),
        ..rates
    };
    let threshold_line = ThresholdLine {
        label: format::threshold_label(threshold),
        value: threshold,
    };
    let history_chart =
        render_line_chart("Andamento Turnover", &[history.clone()], Some(&threshold_line))?;
    let forecast_chart = render_forecast_chart(
        "Previsione Turnover",
        &history,
        &forecast,
        "Previsione Turnover",
        Some(&threshold_line),
    )?;

    // 4) Assemble. Only the overlay chart is embedded; the historical chart
    // exists for inline display.
    let doc = ReportDoc {
        title: "Report Capitale Umano - Turnover Dipendenti".to_string(),
        kpi_lines: format::turnover_kpi_lines(&kpis),
        warning: kpis
            .threshold_breached
            .then(|| format::turnover_warning(threshold)),
        sections: vec![TextSection {
            heading: format::TURNOVER_FORECAST_HEADING.to_string(),
            lines: format::turnover_forecast_lines(&forecast),
            heading_drop: Some(layout.warned_section_drop),
        }],
        charts: vec![forecast_chart.clone()],
    };
    let pdf = assemble(&doc, layout)?;

    Ok(TurnoverRun {
        kpis,
        forecast,
        forecast_breach,
        warnings,
        history_chart,
        forecast_chart,
        pdf,
    })
}

/// Execute the project-monitoring pipeline over a projects table.
pub fn run_projects(table: &Table, config: &ReportConfig) -> Result<ProjectOverview> {
    // 1) Budget-consumption risk flags.
    let risks = project_risks(
        table,
        columns::BUDGET,
        columns::CURRENT_COST,
        config.project_risk_ratio,
    )?;

    // 2) Grouped comparison chart.
    let chart = render_bar_chart(
        "Budget vs Costi Attuali",
        &[
            table.series(columns::BUDGET)?,
            table.series(columns::CURRENT_COST)?,
        ],
    )?;

    Ok(ProjectOverview { risks, chart })
}

/// The first `forecast_horizon` future labels; the caller must supply at
/// least that many.
fn horizon_labels<'a>(future_labels: &'a [String], config: &ReportConfig) -> Result<&'a [String]> {
    future_labels
        .get(..config.forecast_horizon)
        .ok_or_else(|| {
            ReportError::InvalidInput(format!(
                "{} future label(s) supplied for a horizon of {}",
                future_labels.len(),
                config.forecast_horizon
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn months() -> Vec<String> {
        [
            "Gen", "Feb", "Mar", "Apr", "Mag", "Giu", "Lug", "Ago", "Set", "Ott", "Nov", "Dic",
        ]
        .iter()
        .map(|m| m.to_string())
        .collect()
    }

    fn future() -> Vec<String> {
        vec!["Gen 2026".into(), "Feb 2026".into(), "Mar 2026".into()]
    }

    fn finance_table(costs: Vec<f64>) -> Table {
        let n = costs.len();
        let mut table = Table::new("fin", months()[..n].to_vec()).unwrap();
        let revenues = costs.iter().map(|c| c + 20_000.0).collect();
        table.insert_column(columns::COST, costs).unwrap();
        table.insert_column(columns::REVENUE, revenues).unwrap();
        table
            .set_categories((0..n).map(|i| format!("Cat{}", i % 3)).collect())
            .unwrap();
        table
    }

    #[test]
    fn audit_run_produces_all_outputs() {
        let costs = vec![
            100_000.0, 95_000.0, 110_000.0, 105_000.0, 90_000.0, 200_000.0,
            98_000.0, 102_000.0, 99_000.0, 101_000.0, 97_000.0, 108_000.0,
        ];
        let table = finance_table(costs);
        let run = run_audit(
            &table,
            &future(),
            &ReportConfig::default(),
            &PageLayout::default(),
        )
        .unwrap();

        assert_eq!(run.analysis.flags.len(), 12);
        assert_eq!(run.analysis.anomalies().count(), 1);
        assert_eq!(run.forecast.len(), 3);
        assert!(run.forecast.values().all(f64::is_finite));
        assert!((run.aggregate.total() - run.analysis.kpis.total_cost).abs() < 1e-6);
        assert!(run.pdf.starts_with(b"%PDF-"));
    }

    #[test]
    fn audit_requires_enough_future_labels() {
        let table = finance_table(vec![1.0, 2.0, 3.0]);
        let short = vec!["Gen 2026".to_string()];
        let err = run_audit(
            &table,
            &short,
            &ReportConfig::default(),
            &PageLayout::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ReportError::InvalidInput(_)));
    }

    #[test]
    fn audit_requires_a_category_attribute() {
        let mut table = Table::new("fin", months()).unwrap();
        table
            .insert_column(columns::COST, vec![100_000.0; 12])
            .unwrap();

        let err = run_audit(
            &table,
            &future(),
            &ReportConfig::default(),
            &PageLayout::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ReportError::InvalidInput(_)));
    }

    #[test]
    fn turnover_heading_keeps_its_slot_without_a_warning() {
        // Quiet rates: no warning line, yet the forecast heading stays at
        // the reserved position (h-160, y = 632).
        let mut table = Table::new("hr", months()).unwrap();
        table
            .insert_column(columns::TURNOVER, vec![8.0; 12])
            .unwrap();

        let run = run_turnover(
            &table,
            &future(),
            &ReportConfig::default(),
            &PageLayout::default(),
        )
        .unwrap();
        assert!(run.warnings.is_empty());
        assert!(run.pdf.windows(10).any(|w| w == b"100 632 Td"));
    }

    #[test]
    fn turnover_run_warns_on_breach() {
        let mut table = Table::new("hr", months()).unwrap();
        table
            .insert_column(
                columns::TURNOVER,
                vec![8.0, 9.0, 18.0, 7.0, 10.0, 9.0, 8.0, 11.0, 9.0, 10.0, 8.0, 9.0],
            )
            .unwrap();

        let run = run_turnover(
            &table,
            &future(),
            &ReportConfig::default(),
            &PageLayout::default(),
        )
        .unwrap();
        assert!(run.kpis.threshold_breached);
        assert!(!run.warnings.is_empty());
        assert_eq!(run.forecast.len(), 3);
        assert!(run.pdf.starts_with(b"%PDF-"));
    }

    #[test]
    fn project_overview_flags_overruns() {
        let mut table = Table::new("prj", vec!["Progetto A".into(), "Progetto B".into()]).unwrap();
        table
            .insert_column(columns::BUDGET, vec![400_000.0, 300_000.0])
            .unwrap();
        table
            .insert_column(columns::CURRENT_COST, vec![390_000.0, 100_000.0])
            .unwrap();

        let overview = run_projects(&table, &ReportConfig::default()).unwrap();
        assert!(overview.risks[0].at_risk);
        assert!(!overview.risks[1].at_risk);
        assert!(overview.chart.is_valid());
    }
}

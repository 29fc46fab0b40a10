//! Display-string builders for report text.
//!
//! Formatting lives in one place so the pipeline and the document assembler
//! stay free of string munging, and the user-facing wording (Italian, like
//! the dashboard it feeds) is localized here.

use crate::domain::{AnomalyFlag, Forecast};
use crate::stats::{CostKpis, TurnoverKpis};

/// Rendered in place of the anomaly listing when nothing was flagged.
pub const NO_ANOMALY_LINE: &str = "Nessuna anomalia rilevata.";

pub const ANOMALY_HEADING: &str = "Anomalie nei Costi:";
pub const TURNOVER_FORECAST_HEADING: &str = "Previsione Turnover:";

/// Whole-euro amount with thousands separators, e.g. `EUR 1,234,567`.
pub fn eur(value: f64) -> String {
    format!("EUR {}", thousands(value.round() as i64))
}

/// Group a signed integer's digits by three.
pub fn thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    let lead = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - lead) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// KPI lines for the audit report: total costs, then total revenues when
/// the input table carried a revenue column.
pub fn audit_kpi_lines(kpis: &CostKpis) -> Vec<String> {
    let mut lines = vec![format!("Costi Totali: {}", eur(kpis.total_cost))];
    if let Some(revenue) = kpis.total_revenue {
        lines.push(format!("Ricavi Totali: {}", eur(revenue)));
    }
    lines
}

/// One line per flagged point; a lone [`NO_ANOMALY_LINE`] when none were.
pub fn anomaly_lines<'a>(flags: impl Iterator<Item = &'a AnomalyFlag>) -> Vec<String> {
    let lines: Vec<String> = flags
        .map(|f| {
            format!(
                "{}: {} (Z-Score: {:.2})",
                f.label,
                eur(f.value),
                f.z_score
            )
        })
        .collect();
    if lines.is_empty() {
        vec![NO_ANOMALY_LINE.to_string()]
    } else {
        lines
    }
}

/// KPI lines for the human-capital report. The total is printed as a whole
/// percentage, the mean with one decimal, as the reference report does.
pub fn turnover_kpi_lines(kpis: &TurnoverKpis) -> Vec<String> {
    vec![
        format!("Turnover Medio: {:.1}%", kpis.mean_rate),
        format!("Turnover Totale (somma): {}%", kpis.total_rate.round() as i64),
    ]
}

/// Warning line shown when historical turnover breached the threshold.
pub fn turnover_warning(threshold: f64) -> String {
    format!(
        "Attenzione: Il turnover ha superato la soglia di {}% in alcuni mesi!",
        fmt_threshold(threshold)
    )
}

/// Warning shown inline by the dashboard when the forecast breaches the
/// threshold in a future month.
pub fn turnover_forecast_warning(threshold: f64) -> String {
    format!(
        "Attenzione: La previsione indica che il turnover superera la soglia del {}% nei prossimi mesi!",
        fmt_threshold(threshold)
    )
}

/// Legend label for a threshold overlay, e.g. `Soglia 15%`.
pub fn threshold_label(threshold: f64) -> String {
    format!("Soglia {}%", fmt_threshold(threshold))
}

/// Forecast listing for the turnover report, one line per future period,
/// values truncated to whole percentages like the reference output.
pub fn turnover_forecast_lines(forecast: &Forecast) -> Vec<String> {
    forecast
        .points
        .iter()
        .map(|p| format!("{}: {}%", p.label, p.value as i64))
        .collect()
}

/// Forecast listing for cost figures, one line per future period.
pub fn cost_forecast_lines(forecast: &Forecast) -> Vec<String> {
    forecast
        .points
        .iter()
        .map(|p| format!("{}: {}", p.label, eur(p.value)))
        .collect()
}

fn fmt_threshold(threshold: f64) -> String {
    if threshold.fract() == 0.0 {
        format!("{}", threshold as i64)
    } else {
        format!("{threshold}")
    }
}

//! Deterministic demo-data fabrication.
//!
//! This is the stand-in for a real ingestion collaborator: it builds the
//! same shaped tables the dashboard would feed the pipeline, from a seeded
//! RNG so that two runs with the same seed produce identical reports. The
//! pipeline itself never generates data, and tests use hand-built tables
//! rather than anything in this module.

use chrono::NaiveDate;
use rand::prelude::*;
use rand::rngs::StdRng;

use crate::domain::{columns, Table};
use crate::error::{ReportError, Result};

/// Month labels of the simulated year, in chronological order.
pub const MONTH_LABELS: [&str; 12] = [
    "Gen", "Feb", "Mar", "Apr", "Mag", "Giu", "Lug", "Ago", "Set", "Ott", "Nov", "Dic",
];

/// Labels for the three forecast periods the demo asks for.
pub const FUTURE_LABELS: [&str; 3] = ["Gen 2026", "Feb 2026", "Mar 2026"];

const CATEGORIES: [&str; 5] = [
    "Infrastrutture",
    "Consulenze",
    "Software",
    "Servizi Operativi",
    "Manutenzione",
];

const PROJECTS: [&str; 4] = ["Progetto A", "Progetto B", "Progetto C", "Progetto D"];

const PROJECT_DEADLINES: [(i32, u32, u32); 4] =
    [(2025, 6, 30), (2025, 9, 30), (2025, 12, 31), (2025, 11, 15)];

/// The month index (0-based) where a cost outlier is injected.
pub const OUTLIER_MONTH: usize = 5;
const OUTLIER_COST: f64 = 200_000.0;

/// All fabricated inputs for one demo run.
#[derive(Debug, Clone)]
pub struct SimulatedData {
    /// Monthly costs and revenues, with a per-row expense category.
    pub finance: Table,
    /// Monthly employee turnover rates (%).
    pub turnover: Table,
    /// Per-project budgets, current costs, progress, and deadlines.
    pub projects: Table,
    /// Future period labels handed to the forecaster.
    pub future_labels: Vec<String>,
}

/// Fabricate the demo tables from a seed.
pub fn simulate(seed: u64) -> Result<SimulatedData> {
    let mut rng = StdRng::seed_from_u64(seed);

    let months: Vec<String> = MONTH_LABELS.iter().map(|m| m.to_string()).collect();

    let mut costs: Vec<f64> = (0..months.len())
        .map(|_| rng.gen_range(80_000..120_000) as f64)
        .collect();
    // Force one clear anomaly, as the reference demo does for June.
    costs[OUTLIER_MONTH] = OUTLIER_COST;
    let revenues: Vec<f64> = costs
        .iter()
        .map(|c| c + rng.gen_range(10_000..30_000) as f64)
        .collect();
    let categories: Vec<String> = (0..months.len())
        .map(|_| CATEGORIES[rng.gen_range(0..CATEGORIES.len())].to_string())
        .collect();

    let mut finance = Table::new("Dati Finanziari", months.clone())?;
    finance.insert_column(columns::COST, costs)?;
    finance.insert_column(columns::REVENUE, revenues)?;
    finance.set_categories(categories)?;

    let mut turnover = Table::new("Turnover Dipendenti", months)?;
    turnover.insert_column(
        columns::TURNOVER,
        (0..MONTH_LABELS.len())
            .map(|_| rng.gen_range(5..21) as f64)
            .collect(),
    )?;

    let budgets: Vec<f64> = (0..PROJECTS.len())
        .map(|_| rng.gen_range(200_000..500_000) as f64)
        .collect();
    let current_costs: Vec<f64> = budgets
        .iter()
        .map(|b| (b * rng.gen_range(0.5..1.2)).trunc())
        .collect();
    let progress: Vec<f64> = (0..PROJECTS.len())
        .map(|_| rng.gen_range(30..100) as f64)
        .collect();
    let deadlines = PROJECT_DEADLINES
        .iter()
        .map(|&(y, m, d)| {
            NaiveDate::from_ymd_opt(y, m, d).ok_or_else(|| {
                ReportError::InvalidInput(format!("invalid project deadline {y}-{m}-{d}"))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let mut projects = Table::new(
        "Commesse",
        PROJECTS.iter().map(|p| p.to_string()).collect(),
    )?;
    projects.insert_column(columns::BUDGET, budgets)?;
    projects.insert_column(columns::CURRENT_COST, current_costs)?;
    projects.insert_column(columns::PROGRESS, progress)?;
    projects.set_deadlines(deadlines)?;

    Ok(SimulatedData {
        finance,
        turnover,
        projects,
        future_labels: FUTURE_LABELS.iter().map(|l| l.to_string()).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::columns;

    #[test]
    fn same_seed_same_tables() {
        let a = simulate(42).unwrap();
        let b = simulate(42).unwrap();
        assert_eq!(a.finance, b.finance);
        assert_eq!(a.turnover, b.turnover);
        assert_eq!(a.projects, b.projects);
    }

    #[test]
    fn outlier_month_is_forced() {
        let data = simulate(7).unwrap();
        let costs = data.finance.column(columns::COST).unwrap();
        assert_eq!(costs[OUTLIER_MONTH], 200_000.0);
        // All other months stay inside the quiet band.
        for (i, &c) in costs.iter().enumerate() {
            if i != OUTLIER_MONTH {
                assert!((80_000.0..120_000.0).contains(&c));
            }
        }
    }

    #[test]
    fn tables_are_aligned_and_complete() {
        let data = simulate(1).unwrap();
        assert_eq!(data.finance.len(), 12);
        assert!(data.finance.categories().is_some());
        assert_eq!(data.turnover.len(), 12);
        assert_eq!(data.projects.len(), 4);
        assert!(data.projects.deadlines().is_some());
        assert_eq!(data.future_labels.len(), 3);
    }
}

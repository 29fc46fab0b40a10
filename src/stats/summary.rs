//! Descriptive statistics and KPI summaries.
//!
//! All functions here are pure and whole-series: the pipeline computes each
//! KPI once per table snapshot, and nothing is cached between runs.

use serde::{Deserialize, Serialize};

use crate::domain::{CategoryAggregate, Series, Table};
use crate::error::{ReportError, Result};

/// Validate a numeric slice before statistics are taken over it.
pub fn validate_numeric(name: &str, values: &[f64]) -> Result<()> {
    if values.is_empty() {
        return Err(ReportError::InvalidInput(format!("'{name}' is empty")));
    }
    if let Some(i) = values.iter().position(|v| !v.is_finite()) {
        return Err(ReportError::InvalidInput(format!(
            "'{name}' has a non-finite value at index {i}"
        )));
    }
    Ok(())
}

/// Arithmetic mean. Callers validate non-emptiness first.
pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (ddof = 0), matching the z-score
/// convention the reference analysis uses.
pub fn population_std(values: &[f64]) -> f64 {
    let m = mean(values);
    let var = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    var.sqrt()
}

/// Headline financial KPIs for the audit report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostKpis {
    pub total_cost: f64,
    /// `None` when the table carries no revenue column.
    pub total_revenue: Option<f64>,
}

/// Headline human-capital KPIs for the turnover report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnoverKpis {
    /// Mean monthly turnover rate (%).
    pub mean_rate: f64,
    /// Sum of the monthly rates (%), as the reference report prints it.
    pub total_rate: f64,
    /// True when any historical month exceeded the threshold.
    pub threshold_breached: bool,
}

/// Compute turnover KPIs over a historical rate series.
pub fn turnover_kpis(series: &Series, threshold: f64) -> Result<TurnoverKpis> {
    validate_numeric(&series.name, &series.values)?;
    Ok(TurnoverKpis {
        mean_rate: mean(&series.values),
        total_rate: series.values.iter().sum(),
        threshold_breached: series.values.iter().any(|&v| v > threshold),
    })
}

/// Group a table's rows by their category attribute and sum `value_column`.
///
/// The sum over the aggregate equals the sum over the source column exactly
/// (plain additions in row order, no reweighting).
pub fn aggregate_by_category(table: &Table, value_column: &str) -> Result<CategoryAggregate> {
    let values = table.column(value_column)?;
    validate_numeric(value_column, values)?;
    let categories = table.categories().ok_or_else(|| {
        ReportError::InvalidInput(format!(
            "table '{}' has no category attribute",
            table.name
        ))
    })?;

    let mut agg = CategoryAggregate::new();
    for (category, &value) in categories.iter().zip(values) {
        agg.add(category.clone(), value);
    }
    Ok(agg)
}

/// Per-project budget-consumption verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRisk {
    pub project: String,
    pub budget: f64,
    pub current_cost: f64,
    /// True when current cost exceeds `risk_ratio * budget`.
    pub at_risk: bool,
}

/// Flag projects whose current cost exceeds `risk_ratio` of their budget.
pub fn project_risks(
    table: &Table,
    budget_column: &str,
    cost_column: &str,
    risk_ratio: f64,
) -> Result<Vec<ProjectRisk>> {
    let budgets = table.column(budget_column)?;
    let costs = table.column(cost_column)?;
    validate_numeric(budget_column, budgets)?;
    validate_numeric(cost_column, costs)?;

    Ok(table
        .labels()
        .iter()
        .zip(budgets.iter().zip(costs))
        .map(|(project, (&budget, &cost))| ProjectRisk {
            project: project.clone(),
            budget,
            current_cost: cost,
            at_risk: cost > risk_ratio * budget,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(values: &[f64]) -> Series {
        let labels = (0..values.len()).map(|i| format!("m{i}")).collect();
        Series::new("turnover", labels, values.to_vec()).unwrap()
    }

    #[test]
    fn population_std_uses_n_denominator() {
        // Var([1,3]) with ddof=0 is 1.0.
        assert!((population_std(&[1.0, 3.0]) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn turnover_kpis_detect_threshold_breach() {
        let kpis = turnover_kpis(&series(&[10.0, 16.0, 12.0]), 15.0).unwrap();
        assert!((kpis.mean_rate - 38.0 / 3.0).abs() < 1e-12);
        assert!((kpis.total_rate - 38.0).abs() < 1e-12);
        assert!(kpis.threshold_breached);

        let calm = turnover_kpis(&series(&[10.0, 11.0]), 15.0).unwrap();
        assert!(!calm.threshold_breached);
    }

    #[test]
    fn aggregate_preserves_the_column_total() {
        let mut table = Table::new(
            "costs",
            vec!["Gen".into(), "Feb".into(), "Mar".into()],
        )
        .unwrap();
        table
            .insert_column("cost", vec![100.0, 250.0, 50.0])
            .unwrap();
        table
            .set_categories(vec!["Software".into(), "Consulenze".into(), "Software".into()])
            .unwrap();

        let agg = aggregate_by_category(&table, "cost").unwrap();
        assert_eq!(agg.get("Software"), Some(150.0));
        assert_eq!(agg.get("Consulenze"), Some(250.0));
        assert_eq!(agg.total(), 400.0);
    }

    #[test]
    fn aggregate_requires_a_category_attribute() {
        let mut table = Table::new("costs", vec!["Gen".into()]).unwrap();
        table.insert_column("cost", vec![1.0]).unwrap();
        assert!(aggregate_by_category(&table, "cost").is_err());
    }

    #[test]
    fn project_risk_uses_the_budget_ratio() {
        let mut table = Table::new("projects", vec!["A".into(), "B".into()]).unwrap();
        table.insert_column("budget", vec![100.0, 100.0]).unwrap();
        table.insert_column("current_cost", vec![95.0, 50.0]).unwrap();

        let risks = project_risks(&table, "budget", "current_cost", 0.9).unwrap();
        assert!(risks[0].at_risk);
        assert!(!risks[1].at_risk);
    }
}

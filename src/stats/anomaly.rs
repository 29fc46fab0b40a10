//! Whole-series z-score anomaly detection.
//!
//! Policy notes:
//! - z-scores use the population standard deviation over the entire series
//!   (no rolling window).
//! - a constant series has zero standard deviation; its z-scores are defined
//!   as 0 and no point is ever anomalous, regardless of threshold.

use serde::{Deserialize, Serialize};

use crate::domain::{AnomalyFlag, Series, Table};
use crate::error::Result;
use crate::stats::summary::{mean, population_std, validate_numeric, CostKpis};

/// Z-score every point of a series against the series' own mean and
/// population standard deviation.
pub fn z_scores(name: &str, values: &[f64]) -> Result<Vec<f64>> {
    validate_numeric(name, values)?;
    let m = mean(values);
    let sd = population_std(values);
    if sd == 0.0 {
        return Ok(vec![0.0; values.len()]);
    }
    Ok(values.iter().map(|v| (v - m) / sd).collect())
}

/// Flag every point of a series; a point is anomalous when `|z| > threshold`.
///
/// Always returns exactly one flag per input point.
pub fn detect_anomalies(series: &Series, threshold: f64) -> Result<Vec<AnomalyFlag>> {
    let zs = z_scores(&series.name, &series.values)?;
    Ok(series
        .points()
        .zip(zs)
        .map(|((label, value), z)| AnomalyFlag {
            label: label.to_string(),
            value,
            z_score: z,
            is_anomaly: z.abs() > threshold,
        })
        .collect())
}

/// Output of the KPI & anomaly analyzer for one table snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostAnalysis {
    pub kpis: CostKpis,
    /// One flag per table row, in label order.
    pub flags: Vec<AnomalyFlag>,
}

impl CostAnalysis {
    /// Only the flagged points, in label order.
    pub fn anomalies(&self) -> impl Iterator<Item = &AnomalyFlag> {
        self.flags.iter().filter(|f| f.is_anomaly)
    }
}

/// Analyze a cost table: totals plus per-point anomaly flags.
///
/// `revenue_column` is optional; when absent the revenue KPI is omitted.
pub fn analyze_costs(
    table: &Table,
    cost_column: &str,
    revenue_column: Option<&str>,
    threshold: f64,
) -> Result<CostAnalysis> {
    let costs = table.series(cost_column)?;
    validate_numeric(cost_column, &costs.values)?;

    let total_revenue = match revenue_column {
        Some(col) => {
            let revenues = table.column(col)?;
            validate_numeric(col, revenues)?;
            Some(revenues.iter().sum())
        }
        None => None,
    };

    let flags = detect_anomalies(&costs, threshold)?;
    Ok(CostAnalysis {
        kpis: CostKpis {
            total_cost: costs.values.iter().sum(),
            total_revenue,
        },
        flags,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReportError;

    fn series(values: &[f64]) -> Series {
        let labels = (0..values.len()).map(|i| format!("m{i}")).collect();
        Series::new("cost", labels, values.to_vec()).unwrap()
    }

    #[test]
    fn constant_series_never_flags() {
        let flags = detect_anomalies(&series(&[5.0; 8]), 0.1).unwrap();
        assert_eq!(flags.len(), 8);
        assert!(flags.iter().all(|f| f.z_score == 0.0 && !f.is_anomaly));
    }

    #[test]
    fn one_flag_per_point() {
        let flags = detect_anomalies(&series(&[1.0, 2.0, 3.0, 100.0]), 2.0).unwrap();
        assert_eq!(flags.len(), 4);
    }

    #[test]
    fn empty_series_is_invalid_input() {
        let err = z_scores("cost", &[]).unwrap_err();
        assert!(matches!(err, ReportError::InvalidInput(_)));
    }

    #[test]
    fn non_finite_values_are_invalid_input() {
        let err = z_scores("cost", &[1.0, f64::NAN]).unwrap_err();
        assert!(matches!(err, ReportError::InvalidInput(_)));
    }

    #[test]
    fn outlier_month_is_the_only_anomaly() {
        // Eleven quiet months plus one spike, the reference audit scenario.
        let mut values = vec![
            100_000.0, 95_000.0, 110_000.0, 105_000.0, 90_000.0, 200_000.0,
            98_000.0, 102_000.0, 99_000.0, 101_000.0, 97_000.0, 108_000.0,
        ];
        values[5] = 200_000.0;
        let flags = detect_anomalies(&series(&values), 2.0).unwrap();
        let anomalous: Vec<_> = flags.iter().filter(|f| f.is_anomaly).collect();
        assert_eq!(anomalous.len(), 1);
        assert_eq!(anomalous[0].label, "m5");
        assert!(anomalous[0].z_score > 2.0);
    }

    #[test]
    fn analyze_costs_totals_and_flags() {
        let mut table = Table::new("fin", vec!["Gen".into(), "Feb".into()]).unwrap();
        table.insert_column("cost", vec![100.0, 200.0]).unwrap();
        table.insert_column("revenue", vec![150.0, 250.0]).unwrap();

        let analysis = analyze_costs(&table, "cost", Some("revenue"), 2.0).unwrap();
        assert_eq!(analysis.kpis.total_cost, 300.0);
        assert_eq!(analysis.kpis.total_revenue, Some(400.0));
        assert_eq!(analysis.flags.len(), 2);
        assert_eq!(analysis.anomalies().count(), 0);
    }
}

//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - passed between pipeline stages by value without ceremony
//! - exported to JSON for downstream dashboards
//! - reconstructed by hand in tests

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ReportError, Result};

/// An ordered sequence of labeled numeric observations, one per time bucket.
///
/// Order is chronological and significant; labels are unique within a series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl Series {
    /// Build a series, validating label/value alignment and label uniqueness.
    pub fn new(
        name: impl Into<String>,
        labels: Vec<String>,
        values: Vec<f64>,
    ) -> Result<Self> {
        let name = name.into();
        if labels.len() != values.len() {
            return Err(ReportError::InvalidInput(format!(
                "series '{name}': {} labels vs {} values",
                labels.len(),
                values.len()
            )));
        }
        ensure_unique_labels(&name, &labels)?;
        Ok(Self { name, labels, values })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate `(label, value)` pairs in chronological order.
    pub fn points(&self) -> impl Iterator<Item = (&str, f64)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

/// A named collection of aligned series sharing one label axis.
///
/// Invariant: every column has exactly one value per label, and optional
/// row attributes (category, deadline) are aligned the same way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    labels: Vec<String>,
    columns: Vec<(String, Vec<f64>)>,
    categories: Option<Vec<String>>,
    deadlines: Option<Vec<NaiveDate>>,
}

impl Table {
    /// Create an empty table over the given label axis.
    pub fn new(name: impl Into<String>, labels: Vec<String>) -> Result<Self> {
        let name = name.into();
        ensure_unique_labels(&name, &labels)?;
        Ok(Self {
            name,
            labels,
            columns: Vec::new(),
            categories: None,
            deadlines: None,
        })
    }

    /// Add a numeric column aligned to the label axis.
    pub fn insert_column(&mut self, name: impl Into<String>, values: Vec<f64>) -> Result<()> {
        let name = name.into();
        if values.len() != self.labels.len() {
            return Err(ReportError::InvalidInput(format!(
                "table '{}': column '{name}' has {} values for {} labels",
                self.name,
                values.len(),
                self.labels.len()
            )));
        }
        if self.columns.iter().any(|(n, _)| *n == name) {
            return Err(ReportError::InvalidInput(format!(
                "table '{}': duplicate column '{name}'",
                self.name
            )));
        }
        self.columns.push((name, values));
        Ok(())
    }

    /// Attach a per-row category attribute (used for category aggregation).
    pub fn set_categories(&mut self, categories: Vec<String>) -> Result<()> {
        if categories.len() != self.labels.len() {
            return Err(ReportError::InvalidInput(format!(
                "table '{}': {} categories for {} rows",
                self.name,
                categories.len(),
                self.labels.len()
            )));
        }
        self.categories = Some(categories);
        Ok(())
    }

    /// Attach a per-row deadline attribute (used by project tables).
    pub fn set_deadlines(&mut self, deadlines: Vec<NaiveDate>) -> Result<()> {
        if deadlines.len() != self.labels.len() {
            return Err(ReportError::InvalidInput(format!(
                "table '{}': {} deadlines for {} rows",
                self.name,
                deadlines.len(),
                self.labels.len()
            )));
        }
        self.deadlines = Some(deadlines);
        Ok(())
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn categories(&self) -> Option<&[String]> {
        self.categories.as_deref()
    }

    pub fn deadlines(&self) -> Option<&[NaiveDate]> {
        self.deadlines.as_deref()
    }

    /// Borrow a numeric column by name.
    pub fn column(&self, name: &str) -> Result<&[f64]> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_slice())
            .ok_or_else(|| {
                ReportError::InvalidInput(format!(
                    "table '{}': no column '{name}'",
                    self.name
                ))
            })
    }

    /// Materialize a column as an owned [`Series`] sharing the table's labels.
    pub fn series(&self, name: &str) -> Result<Series> {
        let values = self.column(name)?.to_vec();
        Ok(Series {
            name: name.to_string(),
            labels: self.labels.clone(),
            values,
        })
    }
}

fn ensure_unique_labels(owner: &str, labels: &[String]) -> Result<()> {
    let mut seen = BTreeMap::new();
    for label in labels {
        if seen.insert(label.as_str(), ()).is_some() {
            return Err(ReportError::InvalidInput(format!(
                "'{owner}': duplicate label '{label}'"
            )));
        }
    }
    Ok(())
}

/// Summed values grouped by category. Iteration order is alphabetical,
/// which keeps pie slices and exports deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryAggregate(BTreeMap<String, f64>);

impl CategoryAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `value` to the running sum for `category`.
    pub fn add(&mut self, category: impl Into<String>, value: f64) {
        *self.0.entry(category.into()).or_insert(0.0) += value;
    }

    pub fn get(&self, category: &str) -> Option<f64> {
        self.0.get(category).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum over all categories.
    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }
}

/// Per-point anomaly verdict, computed once per table snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyFlag {
    pub label: String,
    pub value: f64,
    /// Standardized deviation from the series mean. Defined as 0 when the
    /// series standard deviation is 0 (constant series).
    pub z_score: f64,
    pub is_anomaly: bool,
}

/// One predicted future point. Labels are supplied by the caller; the
/// pipeline never invents period names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub label: String,
    pub value: f64,
}

/// Ordered predictions for the requested future periods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    /// Name of the historical series the trend was fitted on.
    pub source: String,
    pub points: Vec<ForecastPoint>,
}

impl Forecast {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.value)
    }
}

/// An opaque rendered chart: fixed-size raw RGB (3 bytes per pixel),
/// immutable once produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartImage {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl ChartImage {
    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * 3
    }

    /// True when the buffer holds exactly `width * height` RGB pixels.
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0 && self.data.len() == self.expected_len()
    }
}

/// Scalar configuration for a report run. Supplied by the hosting layer;
/// defaults reproduce the reference dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// A point is anomalous when `|z| > anomaly_threshold`.
    pub anomaly_threshold: f64,
    /// Number of future periods to predict.
    pub forecast_horizon: usize,
    /// Monthly turnover (%) above this level triggers a warning.
    pub turnover_threshold: f64,
    /// A project is at risk when current cost exceeds this fraction of budget.
    pub project_risk_ratio: f64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            anomaly_threshold: 2.0,
            forecast_horizon: 3,
            turnover_threshold: 15.0,
            project_risk_ratio: 0.9,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_rejects_misaligned_input() {
        let err = Series::new("cost", vec!["Gen".into()], vec![1.0, 2.0]).unwrap_err();
        assert!(matches!(err, ReportError::InvalidInput(_)));
    }

    #[test]
    fn series_rejects_duplicate_labels() {
        let err = Series::new(
            "cost",
            vec!["Gen".into(), "Gen".into()],
            vec![1.0, 2.0],
        )
        .unwrap_err();
        assert!(matches!(err, ReportError::InvalidInput(_)));
    }

    #[test]
    fn table_columns_share_the_label_axis() {
        let mut table = Table::new("demo", vec!["Gen".into(), "Feb".into()]).unwrap();
        table.insert_column("cost", vec![1.0, 2.0]).unwrap();
        assert!(table.insert_column("revenue", vec![1.0]).is_err());
        assert!(table.insert_column("cost", vec![3.0, 4.0]).is_err());

        let series = table.series("cost").unwrap();
        assert_eq!(series.labels, table.labels());
        assert_eq!(series.values, vec![1.0, 2.0]);
    }

    #[test]
    fn aggregate_sums_per_category() {
        let mut agg = CategoryAggregate::new();
        agg.add("Software", 10.0);
        agg.add("Consulenze", 5.0);
        agg.add("Software", 2.5);
        assert_eq!(agg.get("Software"), Some(12.5));
        assert_eq!(agg.total(), 17.5);
        // Alphabetical iteration keeps downstream rendering deterministic.
        let names: Vec<&str> = agg.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["Consulenze", "Software"]);
    }

    #[test]
    fn chart_image_validity_checks_buffer_length() {
        let img = ChartImage { width: 2, height: 2, data: vec![0; 12] };
        assert!(img.is_valid());
        let bad = ChartImage { width: 2, height: 2, data: vec![0; 11] };
        assert!(!bad.is_valid());
    }
}

//! Linear-trend forecaster.
//!
//! The model is a straight line fitted by ordinary least squares over the
//! historical index `x = 1..N`, evaluated at `x = N+1 .. N+K`. Predictions
//! may be negative or exceed any physical bound; no clamping is performed.
//! That mirrors the reference analysis and is a deliberate simplification.

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::domain::{Forecast, ForecastPoint, Series};
use crate::error::{ReportError, Result};
use crate::math::ols::{line_design, solve_least_squares};
use crate::stats::summary::validate_numeric;

/// A fitted straight-line trend `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearTrend {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearTrend {
    /// Fit over `values` indexed `1..=N`. Requires at least two points.
    pub fn fit(name: &str, values: &[f64]) -> Result<Self> {
        validate_numeric(name, values)?;
        if values.len() < 2 {
            return Err(ReportError::InsufficientData(format!(
                "'{name}' has {} point(s); a trend fit needs at least 2",
                values.len()
            )));
        }

        let xs: Vec<f64> = (1..=values.len()).map(|i| i as f64).collect();
        let design = line_design(&xs);
        let y = DVector::from_row_slice(values);
        let beta = solve_least_squares(&design, &y).ok_or_else(|| {
            ReportError::InsufficientData(format!(
                "'{name}': trend fit is too ill-conditioned to solve"
            ))
        })?;

        Ok(Self {
            intercept: beta[0],
            slope: beta[1],
        })
    }

    /// Evaluate the line at index `x`.
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Forecast a historical series over the caller-supplied future labels.
///
/// The horizon K equals `future_labels.len()`; the pipeline never generates
/// period names itself. Deterministic: identical inputs yield bit-for-bit
/// identical output.
pub fn forecast_series(series: &Series, future_labels: &[String]) -> Result<Forecast> {
    let trend = LinearTrend::fit(&series.name, &series.values)?;
    let n = series.len();

    let points = future_labels
        .iter()
        .enumerate()
        .map(|(k, label)| ForecastPoint {
            label: label.clone(),
            value: trend.predict((n + k + 1) as f64),
        })
        .collect();

    Ok(Forecast {
        source: series.name.clone(),
        points,
    })
}

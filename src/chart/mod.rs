//! Chart renderer: labeled series in, fixed-size RGB raster out.
//!
//! Every renderer draws into a caller-owned byte buffer through
//! `BitMapBackend::with_buffer` inside an inner scope, so the drawing surface
//! is fully released before the function returns and repeated calls cannot
//! leak backend resources. There is no file I/O here; embedding and display
//! are the document assembler's and dashboard's business.

mod bar;
mod fonts;
mod line;
mod pie;

pub use bar::render_bar_chart;
pub use line::{render_forecast_chart, render_line_chart, ThresholdLine};
pub use pie::render_pie_chart;

use plotters::style::RGBColor;

use crate::domain::Series;
use crate::error::{ReportError, Result};

/// Canvas dimensions are a design choice, not content-driven: a 2:1 frame
/// that maps onto the 400x200 pt image slot in the report layout.
pub const CANVAS_WIDTH: u32 = 640;
pub const CANVAS_HEIGHT: u32 = 320;

/// Series palette, applied in order (matplotlib-like default cycle).
pub(crate) const SERIES_COLORS: [RGBColor; 6] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
];

pub(crate) const THRESHOLD_COLOR: RGBColor = RGBColor(214, 39, 40);

pub(crate) fn buffer_len() -> usize {
    CANVAS_WIDTH as usize * CANVAS_HEIGHT as usize * 3
}

/// Map any Plotters drawing error onto the pipeline taxonomy.
pub(crate) fn draw_err<E: std::fmt::Display>(e: E) -> ReportError {
    ReportError::RenderFailure(e.to_string())
}

pub(crate) fn ensure_fonts() -> Result<()> {
    if fonts::ensure_registered() {
        Ok(())
    } else {
        Err(ReportError::RenderFailure(
            "bundled chart fonts failed to register".into(),
        ))
    }
}

/// Validate a chart's series set: at least one series, no empty series, and
/// a shared label axis across all of them.
pub(crate) fn check_series(kind: &str, series: &[Series]) -> Result<()> {
    let first = series
        .first()
        .ok_or_else(|| ReportError::EmptySeries(format!("{kind} chart has no series")))?;
    for s in series {
        if s.is_empty() {
            return Err(ReportError::EmptySeries(format!(
                "{kind} chart: series '{}' has no points",
                s.name
            )));
        }
        if s.labels != first.labels {
            return Err(ReportError::InvalidInput(format!(
                "{kind} chart: series '{}' does not share the label axis of '{}'",
                s.name, first.name
            )));
        }
    }
    Ok(())
}

/// Padded y bounds over a set of values. A degenerate (flat) range is padded
/// around the constant so the mesh still has extent.
pub(crate) fn value_bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        min = min.min(v);
        max = max.max(v);
    }
    if !(min.is_finite() && max.is_finite()) {
        return (0.0, 1.0);
    }
    let span = max - min;
    let pad = if span == 0.0 {
        min.abs().max(1.0) * 0.1
    } else {
        span * 0.08
    };
    (min - pad, max + pad)
}

/// Tick formatter for a categorical x axis: nearest label, blank off-grid.
pub(crate) fn label_at(labels: &[String], x: f64) -> String {
    let i = x.round();
    if i < 0.0 || (i - x).abs() > 1e-6 {
        return String::new();
    }
    labels.get(i as usize).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_bounds_pads_flat_ranges() {
        let (lo, hi) = value_bounds([5.0, 5.0].into_iter());
        assert!(lo < 5.0 && hi > 5.0);
    }

    #[test]
    fn label_at_only_hits_integer_ticks() {
        let labels = vec!["Gen".to_string(), "Feb".to_string()];
        assert_eq!(label_at(&labels, 1.0), "Feb");
        assert_eq!(label_at(&labels, 0.5), "");
        assert_eq!(label_at(&labels, 7.0), "");
    }

    #[test]
    fn check_series_rejects_empty_sets() {
        let err = check_series("line", &[]).unwrap_err();
        assert!(matches!(err, ReportError::EmptySeries(_)));
    }
}

//! Pie chart over a category aggregate.

use plotters::prelude::*;

use crate::chart::{buffer_len, draw_err, ensure_fonts, CANVAS_HEIGHT, CANVAS_WIDTH, SERIES_COLORS};
use crate::domain::{CategoryAggregate, ChartImage};
use crate::error::{ReportError, Result};

/// Render a category aggregate as a pie, slices proportional to value, with
/// category and percentage labels. Slice order follows the aggregate's
/// alphabetical iteration, so the image is deterministic.
pub fn render_pie_chart(title: &str, aggregate: &CategoryAggregate) -> Result<ChartImage> {
    ensure_fonts()?;
    if aggregate.is_empty() {
        return Err(ReportError::EmptySeries("pie chart has no categories".into()));
    }
    if aggregate.iter().any(|(_, v)| v < 0.0) || aggregate.total() <= 0.0 {
        return Err(ReportError::InvalidInput(
            "pie chart needs non-negative values with a positive total".into(),
        ));
    }

    let labels: Vec<String> = aggregate.iter().map(|(name, _)| name.to_string()).collect();
    let sizes: Vec<f64> = aggregate.iter().map(|(_, v)| v).collect();
    let colors: Vec<RGBColor> = (0..sizes.len())
        .map(|i| SERIES_COLORS[i % SERIES_COLORS.len()])
        .collect();

    let mut buf = vec![0u8; buffer_len()];
    {
        let root =
            BitMapBackend::with_buffer(&mut buf, (CANVAS_WIDTH, CANVAS_HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;
        let root = root
            .titled(title, ("sans-serif", 18))
            .map_err(draw_err)?;

        let center = (CANVAS_WIDTH as i32 / 2, CANVAS_HEIGHT as i32 / 2 + 5);
        let radius = 105.0;
        let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
        // Same start angle the reference dashboard uses.
        pie.start_angle(140.0);
        pie.label_style(("sans-serif", 12).into_font());
        pie.percentages(("sans-serif", 12).into_font().color(&BLACK));
        root.draw(&pie).map_err(draw_err)?;

        root.present().map_err(draw_err)?;
    }

    Ok(ChartImage {
        width: CANVAS_WIDTH,
        height: CANVAS_HEIGHT,
        data: buf,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pie_renders_categories() {
        let mut agg = CategoryAggregate::new();
        agg.add("Infrastrutture", 300_000.0);
        agg.add("Software", 150_000.0);
        agg.add("Consulenze", 120_000.0);
        let img = render_pie_chart("Ripartizione Costi", &agg).unwrap();
        assert!(img.is_valid());
    }

    #[test]
    fn empty_aggregate_is_rejected() {
        let err = render_pie_chart("x", &CategoryAggregate::new()).unwrap_err();
        assert!(matches!(err, ReportError::EmptySeries(_)));
    }

    #[test]
    fn zero_total_is_invalid() {
        let mut agg = CategoryAggregate::new();
        agg.add("Software", 0.0);
        let err = render_pie_chart("x", &agg).unwrap_err();
        assert!(matches!(err, ReportError::InvalidInput(_)));
    }
}

//! Line charts: multi-series trends and historical-plus-forecast overlays.

use plotters::prelude::*;

use crate::chart::{
    buffer_len, check_series, draw_err, ensure_fonts, label_at, value_bounds, CANVAS_HEIGHT,
    CANVAS_WIDTH, SERIES_COLORS, THRESHOLD_COLOR,
};
use crate::domain::{ChartImage, Forecast, Series};
use crate::error::{ReportError, Result};

/// A horizontal reference line (e.g. a critical turnover level).
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdLine {
    /// Legend entry, e.g. "Soglia 15%".
    pub label: String,
    pub value: f64,
}

/// Render one or more series sharing a label axis as lines with point
/// markers, optionally with a horizontal threshold overlay.
pub fn render_line_chart(
    title: &str,
    series: &[Series],
    threshold: Option<&ThresholdLine>,
) -> Result<ChartImage> {
    ensure_fonts()?;
    check_series("line", series)?;
    let labels = &series[0].labels;

    let mut buf = vec![0u8; buffer_len()];
    {
        let root =
            BitMapBackend::with_buffer(&mut buf, (CANVAS_WIDTH, CANVAS_HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;

        let (y_min, y_max) = value_bounds(
            series
                .iter()
                .flat_map(|s| s.values.iter().copied())
                .chain(threshold.map(|t| t.value)),
        );
        let x_max = labels.len().saturating_sub(1) as f64;

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 18))
            .margin(10)
            .set_label_area_size(LabelAreaPosition::Left, 60)
            .set_label_area_size(LabelAreaPosition::Bottom, 35)
            .build_cartesian_2d(-0.5..x_max + 0.5, y_min..y_max)
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(labels.len())
            .x_label_formatter(&|x| label_at(labels, *x))
            .y_label_formatter(&|y| format!("{y:.0}"))
            .label_style(("sans-serif", 12))
            .draw()
            .map_err(draw_err)?;

        for (i, s) in series.iter().enumerate() {
            let color = SERIES_COLORS[i % SERIES_COLORS.len()];
            let pts: Vec<(f64, f64)> =
                s.values.iter().enumerate().map(|(x, &y)| (x as f64, y)).collect();

            chart
                .draw_series(LineSeries::new(pts.iter().copied(), color.stroke_width(2)))
                .map_err(draw_err)?
                .label(s.name.clone())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 18, y)], color.stroke_width(2))
                });
            chart
                .draw_series(pts.iter().map(|&(x, y)| Circle::new((x, y), 3, color.filled())))
                .map_err(draw_err)?;
        }

        if let Some(t) = threshold {
            draw_threshold_line(&mut chart, -0.5, x_max + 0.5, t)?;
        }

        if series.len() > 1 || threshold.is_some() {
            draw_legend(&mut chart)?;
        }
        root.present().map_err(draw_err)?;
    }

    Ok(ChartImage {
        width: CANVAS_WIDTH,
        height: CANVAS_HEIGHT,
        data: buf,
    })
}

/// Render a historical series and its forecast on one shared axis.
///
/// Historical points draw solid with circle markers; predicted points draw
/// dashed with cross markers so actual vs. predicted stays legible in print.
pub fn render_forecast_chart(
    title: &str,
    historical: &Series,
    forecast: &Forecast,
    forecast_label: &str,
    threshold: Option<&ThresholdLine>,
) -> Result<ChartImage> {
    ensure_fonts()?;
    if historical.is_empty() {
        return Err(ReportError::EmptySeries(format!(
            "forecast chart: series '{}' has no points",
            historical.name
        )));
    }

    // One label axis covering history followed by the future periods.
    let labels: Vec<String> = historical
        .labels
        .iter()
        .cloned()
        .chain(forecast.points.iter().map(|p| p.label.clone()))
        .collect();
    let n = historical.len();

    let mut buf = vec![0u8; buffer_len()];
    {
        let root =
            BitMapBackend::with_buffer(&mut buf, (CANVAS_WIDTH, CANVAS_HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;

        let (y_min, y_max) = value_bounds(
            historical
                .values
                .iter()
                .copied()
                .chain(forecast.values())
                .chain(threshold.map(|t| t.value)),
        );
        let x_max = labels.len().saturating_sub(1) as f64;

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 18))
            .margin(10)
            .set_label_area_size(LabelAreaPosition::Left, 60)
            .set_label_area_size(LabelAreaPosition::Bottom, 35)
            .build_cartesian_2d(-0.5..x_max + 0.5, y_min..y_max)
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(labels.len())
            .x_label_formatter(&|x| label_at(&labels, *x))
            .y_label_formatter(&|y| format!("{y:.0}"))
            .label_style(("sans-serif", 12))
            .draw()
            .map_err(draw_err)?;

        let hist_color = SERIES_COLORS[0];
        let hist_pts: Vec<(f64, f64)> = historical
            .values
            .iter()
            .enumerate()
            .map(|(x, &y)| (x as f64, y))
            .collect();
        chart
            .draw_series(LineSeries::new(hist_pts.iter().copied(), hist_color.stroke_width(2)))
            .map_err(draw_err)?
            .label(historical.name.clone())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 18, y)], hist_color.stroke_width(2))
            });
        chart
            .draw_series(
                hist_pts
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), 3, hist_color.filled())),
            )
            .map_err(draw_err)?;

        let fc_color = SERIES_COLORS[1];
        let fc_pts: Vec<(f64, f64)> = forecast
            .points
            .iter()
            .enumerate()
            .map(|(k, p)| ((n + k) as f64, p.value))
            .collect();
        if !fc_pts.is_empty() {
            chart
                .draw_series(DashedLineSeries::new(
                    fc_pts.iter().copied(),
                    6,
                    4,
                    fc_color.stroke_width(2),
                ))
                .map_err(draw_err)?
                .label(forecast_label.to_string())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 18, y)], fc_color.stroke_width(2))
                });
            chart
                .draw_series(
                    fc_pts
                        .iter()
                        .map(|&(x, y)| Cross::new((x, y), 4, fc_color.stroke_width(2))),
                )
                .map_err(draw_err)?;
        }

        if let Some(t) = threshold {
            draw_threshold_line(&mut chart, -0.5, x_max + 0.5, t)?;
        }

        draw_legend(&mut chart)?;
        root.present().map_err(draw_err)?;
    }

    Ok(ChartImage {
        width: CANVAS_WIDTH,
        height: CANVAS_HEIGHT,
        data: buf,
    })
}

type LabelChart<'a, 'b> = ChartContext<
    'a,
    BitMapBackend<'b>,
    Cartesian2d<plotters::coord::types::RangedCoordf64, plotters::coord::types::RangedCoordf64>,
>;

fn draw_threshold_line<'a, 'b: 'a>(
    chart: &mut LabelChart<'a, 'b>,
    x0: f64,
    x1: f64,
    t: &ThresholdLine,
) -> Result<()> {
    chart
        .draw_series(DashedLineSeries::new(
            [(x0, t.value), (x1, t.value)],
            8,
            5,
            THRESHOLD_COLOR.stroke_width(2),
        ))
        .map_err(draw_err)?
        .label(t.label.clone())
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], THRESHOLD_COLOR.stroke_width(2)));
    Ok(())
}

fn draw_legend<'a, 'b: 'a>(chart: &mut LabelChart<'a, 'b>) -> Result<()> {
    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font(("sans-serif", 12))
        .draw()
        .map_err(draw_err)?;
    Ok(())
}

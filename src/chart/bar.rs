//! Grouped bar chart comparing series per category label.

use plotters::prelude::*;

use crate::chart::{
    buffer_len, check_series, draw_err, ensure_fonts, label_at, CANVAS_HEIGHT, CANVAS_WIDTH,
    SERIES_COLORS,
};
use crate::domain::{ChartImage, Series};
use crate::error::Result;

/// Width of one group of bars in axis units (the remainder is gap).
const GROUP_WIDTH: f64 = 0.8;

/// Render two or more series as grouped bars, one group per label.
/// Bars grow from zero; the y axis always includes zero.
pub fn render_bar_chart(title: &str, series: &[Series]) -> Result<ChartImage> {
    ensure_fonts()?;
    check_series("bar", series)?;
    let labels = &series[0].labels;

    let mut buf = vec![0u8; buffer_len()];
    {
        let root =
            BitMapBackend::with_buffer(&mut buf, (CANVAS_WIDTH, CANVAS_HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;

        let y_top = series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .fold(f64::NEG_INFINITY, f64::max);
        let y_top = if y_top.is_finite() && y_top > 0.0 { y_top * 1.08 } else { 1.0 };
        let x_max = labels.len() as f64 - 0.5;

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 18))
            .margin(10)
            .set_label_area_size(LabelAreaPosition::Left, 60)
            .set_label_area_size(LabelAreaPosition::Bottom, 35)
            .build_cartesian_2d(-0.5..x_max, 0.0..y_top)
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

        let bar_width = GROUP_WIDTH / series.len() as f64;
        for (i, s) in series.iter().enumerate() {
            let color = SERIES_COLORS[i % SERIES_COLORS.len()];
            let offset = -GROUP_WIDTH / 2.0 + i as f64 * bar_width;

            chart
                .draw_series(s.values.iter().enumerate().map(|(j, &v)| {
                    let x0 = j as f64 + offset;
                    Rectangle::new([(x0, 0.0), (x0 + bar_width, v)], color.mix(0.85).filled())
                }))
                .map_err(draw_err)?
                .label(s.name.clone())
                .legend(move |(x, y)| {
                    Rectangle::new([(x, y - 5), (x + 12, y + 5)], color.mix(0.85).filled())
                });
        }

        if series.len() > 1 {
            chart
                .configure_series_labels()
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .label_font(("sans-serif", 12))
                .draw()
                .map_err(draw_err)?;
        }
        root.present().map_err(draw_err)?;
    }

    Ok(ChartImage {
        width: CANVAS_WIDTH,
        height: CANVAS_HEIGHT,
        data: buf,
    })
}

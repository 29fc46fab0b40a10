//! Document assembler: positioned text and embedded charts on one page.
//!
//! The layout is a single vertical cursor walking down a fixed-size page:
//! text lines advance it by one line step, images by the image advance. No
//! pagination or overflow handling exists; content past the bottom edge
//! silently runs off the page. That is a known limitation carried over from
//! the reference implementation, not something to patch here.

use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str};

use crate::domain::ChartImage;
use crate::error::{ReportError, Result};
use crate::report::layout::PageLayout;

/// A heading followed by body lines (anomaly listing, forecast listing).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextSection {
    pub heading: String,
    pub lines: Vec<String>,
    /// Absolute heading position as a drop from the top edge. `None` flows
    /// from the cursor instead. The reference places first sections at
    /// fixed offsets regardless of whether a warning line was drawn.
    pub heading_drop: Option<f32>,
}

/// Everything that goes onto the page, already formatted as display text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportDoc {
    pub title: String,
    /// Headline KPI lines, drawn right under the title.
    pub kpi_lines: Vec<String>,
    /// Optional warning line between the KPIs and the first section.
    pub warning: Option<String>,
    /// Ordered sections (heading + lines each).
    pub sections: Vec<TextSection>,
    /// Charts embedded below the text, in order.
    pub charts: Vec<ChartImage>,
}

/// Assemble the document into an immutable PDF byte buffer.
///
/// Fails with `RenderFailure` when an embedded chart buffer does not match
/// its declared dimensions; no partial document is produced.
pub fn assemble(doc: &ReportDoc, layout: &PageLayout) -> Result<Vec<u8>> {
    for (i, chart) in doc.charts.iter().enumerate() {
        if !chart.is_valid() {
            return Err(ReportError::RenderFailure(format!(
                "chart {i}: buffer holds {} bytes, expected {} ({}x{} RGB)",
                chart.data.len(),
                chart.expected_len(),
                chart.width,
                chart.height
            )));
        }
    }

    let catalog_id = Ref::new(1);
    let page_tree_id = Ref::new(2);
    let page_id = Ref::new(3);
    let content_id = Ref::new(4);
    let body_font_id = Ref::new(5);
    let bold_font_id = Ref::new(6);
    let image_ids: Vec<Ref> = (0..doc.charts.len())
        .map(|i| Ref::new(7 + i as i32))
        .collect();
    let image_names: Vec<Vec<u8>> = (0..doc.charts.len())
        .map(|i| format!("Im{i}").into_bytes())
        .collect();

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id).kids([page_id]).count(1);

    {
        let mut page = pdf.page(page_id);
        page.media_box(Rect::new(0.0, 0.0, layout.page_width, layout.page_height));
        page.parent(page_tree_id);
        page.contents(content_id);
        let mut resources = page.resources();
        resources
            .fonts()
            .pair(Name(b"F1"), body_font_id)
            .pair(Name(b"F2"), bold_font_id);
        let mut x_objects = resources.x_objects();
        for (name, id) in image_names.iter().zip(&image_ids) {
            x_objects.pair(Name(name), *id);
        }
        x_objects.finish();
        resources.finish();
        page.finish();
    }

    pdf.type1_font(body_font_id).base_font(Name(b"Helvetica"));
    pdf.type1_font(bold_font_id).base_font(Name(b"Helvetica-Bold"));

    for (chart, id) in doc.charts.iter().zip(&image_ids) {
        let mut image = pdf.image_xobject(*id, &chart.data);
        image.width(chart.width as i32);
        image.height(chart.height as i32);
        image.color_space().device_rgb();
        image.bits_per_component(8);
        image.finish();
    }

    let content = layout_content(doc, layout, &image_names);
    pdf.stream(content_id, &content.finish());

    Ok(pdf.finish())
}

/// Walk the cursor down the page, emitting text and image operators.
fn layout_content(doc: &ReportDoc, layout: &PageLayout, image_names: &[Vec<u8>]) -> Content {
    let mut content = Content::new();

    let mut y = layout.page_height - layout.title_drop;
    draw_line(&mut content, Font::Bold, layout.title_size, layout.margin_x, y, &doc.title);

    // KPI block: first line at a fixed drop, one line step each after.
    y = layout.page_height - layout.kpi_drop;
    for line in &doc.kpi_lines {
        draw_line(&mut content, Font::Body, layout.body_size, layout.margin_x, y, line);
        y -= layout.line_step;
    }

    if let Some(warning) = &doc.warning {
        draw_line(&mut content, Font::Body, layout.body_size, layout.margin_x, y, warning);
        y -= layout.line_step;
    }

    for section in &doc.sections {
        match section.heading_drop {
            // Jump to the fixed slot, whatever the cursor accumulated.
            Some(drop) => y = layout.page_height - drop,
            // Otherwise the heading sits one section gap below the
            // previous line.
            None => y -= layout.section_gap - layout.line_step,
        }
        draw_line(&mut content, Font::Bold, layout.heading_size, layout.margin_x, y, &section.heading);
        y -= layout.line_step;
        for line in &section.lines {
            draw_line(&mut content, Font::Body, layout.body_size, layout.margin_x, y, line);
            y -= layout.line_step;
        }
    }

    // Image block. `y` is the bottom edge of each drawn image; consecutive
    // images advance by less than their height on purpose (see PageLayout).
    y -= layout.image_drop;
    for name in image_names {
        content.save_state();
        content.transform([
            layout.image_width,
            0.0,
            0.0,
            layout.image_height,
            layout.margin_x,
            y,
        ]);
        content.x_object(Name(name));
        content.restore_state();
        y -= layout.image_advance;
    }

    content
}

#[derive(Clone, Copy)]
enum Font {
    Body,
    Bold,
}

fn draw_line(content: &mut Content, font: Font, size: f32, x: f32, y: f32, text: &str) {
    let name = match font {
        Font::Body => Name(b"F1"),
        Font::Bold => Name(b"F2"),
    };
    let text = sanitize(text);
    content.begin_text();
    content.set_font(name, size);
    content.next_line(x, y);
    content.show(Str(text.as_bytes()));
    content.end_text();
}

/// The built-in Type1 fonts use StandardEncoding; anything outside ASCII
/// would render as garbage, so it is replaced before drawing.
fn sanitize(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_ascii() { c } else { '?' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with(charts: Vec<ChartImage>) -> ReportDoc {
        ReportDoc {
            title: "Report Audit - Analisi Costi & KPI".into(),
            kpi_lines: vec!["Costi Totali: EUR 1,250,000".into()],
            warning: None,
            sections: vec![TextSection {
                heading: "Anomalie nei Costi:".into(),
                lines: vec!["Nessuna anomalia rilevata.".into()],
                heading_drop: Some(140.0),
            }],
            charts,
        }
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn assembles_a_pdf_header_and_trailer() {
        let bytes = assemble(&doc_with(vec![]), &PageLayout::default()).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        assert!(bytes.windows(5).any(|w| w == b"%%EOF"));
    }

    #[test]
    fn invalid_chart_buffer_is_a_render_failure() {
        let bad = ChartImage { width: 10, height: 10, data: vec![0; 7] };
        let err = assemble(&doc_with(vec![bad]), &PageLayout::default()).unwrap_err();
        assert!(matches!(err, ReportError::RenderFailure(_)));
    }

    #[test]
    fn text_is_drawn_into_the_content_stream() {
        // Content streams are uncompressed, so page text is searchable.
        let bytes = assemble(&doc_with(vec![]), &PageLayout::default()).unwrap();
        assert!(contains(&bytes, b"Nessuna anomalia rilevata."));
    }

    #[test]
    fn fixed_heading_slot_ignores_the_warning_branch() {
        // A reserved warning slot keeps the heading at h-160 (y = 632 on a
        // 792 pt page) whether or not a warning line was drawn.
        let layout = PageLayout::default();
        let section = TextSection {
            heading: "Previsione Turnover:".into(),
            lines: vec!["Gen 2026: 12%".into()],
            heading_drop: Some(layout.warned_section_drop),
        };
        let quiet = ReportDoc {
            title: "Report Capitale Umano - Turnover Dipendenti".into(),
            kpi_lines: vec!["Turnover Medio: 9.5%".into(), "Turnover Totale (somma): 114%".into()],
            warning: None,
            sections: vec![section.clone()],
            charts: vec![],
        };
        let warned = ReportDoc {
            warning: Some("Attenzione: soglia superata!".into()),
            ..quiet.clone()
        };

        for doc in [quiet, warned] {
            let bytes = assemble(&doc, &layout).unwrap();
            assert!(contains(&bytes, b"100 632 Td"));
        }
    }

    #[test]
    fn assembly_is_deterministic() {
        let img = ChartImage { width: 2, height: 2, data: vec![255; 12] };
        let a = assemble(&doc_with(vec![img.clone()]), &PageLayout::default()).unwrap();
        let b = assemble(&doc_with(vec![img]), &PageLayout::default()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn non_ascii_text_is_replaced_not_dropped() {
        assert_eq!(sanitize("Soglia 15% — €"), "Soglia 15% ? ?");
    }
}

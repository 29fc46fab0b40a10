//! Page layout constants for the report document.
//!
//! The assembler is a plain top-to-bottom cursor over one fixed-size page;
//! every offset lives in this table rather than inline in the drawing code.
//! The defaults reproduce the reference report geometry exactly (US letter,
//! title 50 pt below the top edge, KPI block at 80 pt, 20 pt text lines,
//! 400x200 pt images advancing the cursor by 180 pt).

/// Layout table for [`crate::report::assemble`]. All units are PDF points.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub page_width: f32,
    pub page_height: f32,
    /// Left edge of every text line and image.
    pub margin_x: f32,
    /// Title baseline distance from the top edge.
    pub title_drop: f32,
    /// First KPI baseline distance from the top edge.
    pub kpi_drop: f32,
    /// Vertical advance per text line.
    pub line_step: f32,
    /// Extra drop before a section heading (relative to the previous line).
    /// Applies to sections without an absolute heading position.
    pub section_gap: f32,
    /// Absolute first-heading distance from the top edge. The reference
    /// draws the first section at a fixed position, not relative to the
    /// KPI block.
    pub section_drop: f32,
    /// Absolute first-heading distance when the document reserves a warning
    /// slot; the slot holds its place even when no warning is drawn.
    pub warned_section_drop: f32,
    /// Drop between the last text line and the first image.
    pub image_drop: f32,
    /// Vertical advance per embedded image. Deliberately smaller than
    /// `image_height`: consecutive images overlap in the reference output.
    pub image_advance: f32,
    pub image_width: f32,
    pub image_height: f32,
    pub title_size: f32,
    pub heading_size: f32,
    pub body_size: f32,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            page_width: 612.0,
            page_height: 792.0,
            margin_x: 100.0,
            title_drop: 50.0,
            kpi_drop: 80.0,
            line_step: 20.0,
            section_gap: 40.0,
            section_drop: 140.0,
            warned_section_drop: 160.0,
            image_drop: 200.0,
            image_advance: 180.0,
            image_width: 400.0,
            image_height: 200.0,
            title_size: 16.0,
            heading_size: 14.0,
            body_size: 12.0,
        }
    }
}

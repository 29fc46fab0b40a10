//! Bundled font registration for Plotters' `ab_glyph` text backend.
//!
//! `ab_glyph` has no system font lookup, so the DejaVu faces shipped under
//! `assets/fonts` are compiled in and registered once per process under the
//! `sans-serif` family name that all chart text styles reference.

use std::sync::OnceLock;

use plotters::style::{register_font, FontStyle};

static SANS: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");
static SANS_BOLD: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans-Bold.ttf");

static REGISTERED: OnceLock<bool> = OnceLock::new();

/// Register the bundled fonts. Returns false if the embedded bytes fail to
/// parse, in which case any text drawing would fail downstream.
pub(crate) fn ensure_registered() -> bool {
    *REGISTERED.get_or_init(|| {
        register_font("sans-serif", FontStyle::Normal, SANS).is_ok()
            && register_font("sans-serif", FontStyle::Bold, SANS_BOLD).is_ok()
    })
}

//! Document assembler: formatted text plus embedded charts, laid out on a
//! fixed-size page and serialized to PDF bytes.

pub mod format;
pub mod layout;
pub mod pdf;

pub use layout::PageLayout;
pub use pdf::{assemble, ReportDoc, TextSection};

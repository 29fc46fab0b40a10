//! Demo input fabrication (the pipeline's external data collaborator).

mod simulate;

pub use simulate::{simulate, SimulatedData, FUTURE_LABELS, MONTH_LABELS, OUTLIER_MONTH};

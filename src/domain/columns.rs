//! Column-name contract between the pipeline and its data suppliers.
//!
//! The pipeline does not care how a table was produced, only that the
//! columns it needs exist under these names.

pub const COST: &str = "Costi";
pub const REVENUE: &str = "Ricavi";
pub const TURNOVER: &str = "Turnover";
pub const BUDGET: &str = "Budget";
pub const CURRENT_COST: &str = "Costi Attuali";
pub const PROGRESS: &str = "Avanzamento (%)";

//! KPI & anomaly analyzer: sums, z-scores, and anomaly flags over a cost
//! series, plus the turnover/project summaries the HR report needs.

pub mod anomaly;
pub mod summary;

pub use anomaly::{analyze_costs, detect_anomalies, z_scores, CostAnalysis};
pub use summary::{
    aggregate_by_category, mean, population_std, project_risks, turnover_kpis, CostKpis,
    ProjectRisk, TurnoverKpis,
};

//! Error taxonomy for the report pipeline.
//!
//! Every error is terminal to the current report-generation call: no partial
//! document is ever returned, and the hosting layer decides how to surface
//! the failure. All pipeline stages are deterministic pure computations over
//! in-memory data, so there is nothing to retry.

use thiserror::Error;

/// Errors produced by the report-assembly pipeline.
#[derive(Debug, Clone, Error)]
pub enum ReportError {
    /// Malformed input: empty series, misaligned table columns, non-finite
    /// values where numbers are required.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A forecast was requested over fewer than two historical points.
    #[error("insufficient data: {0}")]
    InsufficientData(String),

    /// A chart was requested over a series with zero points.
    #[error("empty series: {0}")]
    EmptySeries(String),

    /// Chart drawing or document assembly failed (bad image buffer, font
    /// registration failure, PDF writer error).
    #[error("render failure: {0}")]
    RenderFailure(String),
}

impl ReportError {
    /// Process exit code for the `kpir` binary.
    pub fn exit_code(&self) -> u8 {
        match self {
            ReportError::InvalidInput(_) => 2,
            ReportError::InsufficientData(_) | ReportError::EmptySeries(_) => 3,
            ReportError::RenderFailure(_) => 4,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ReportError>;

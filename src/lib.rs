//! `kpi-report` library crate.
//!
//! The binary (`kpir`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - modules are reusable (e.g., a hosting dashboard or a batch job)
//! - code stays easy to navigate as the project grows
//!
//! Data flows one way: tables in, analysis out, charts and a PDF document
//! assembled at the end. Nothing here performs I/O except `app`, which owns
//! the filesystem boundary.

pub mod app;
pub mod chart;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod forecast;
pub mod math;
pub mod report;
pub mod stats;

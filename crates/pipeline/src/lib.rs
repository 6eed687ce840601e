//! Reconciliation pipeline: one partner, one workbook, one destination.
//!
//! Ties the other crates together. The run is two passes over the partner's
//! mapping rows: first images (network), then records (pure), followed by a
//! single export. Per-product problems degrade into report warnings; only
//! unreadable inputs or a failed export abort the run.

pub mod config;
pub mod error;
pub mod report;
mod run;

pub use config::RunConfig;
pub use error::PipelineError;
pub use report::{ImageStats, RunReport};
pub use run::run;

//! Errors that abort a run.

use std::fmt;

use catref_io::WorkbookError;

/// A run stops only when its inputs cannot be read or its output cannot be
/// written. Everything else degrades into warnings on the run report.
#[derive(Debug)]
pub enum PipelineError {
    /// Invalid run parameters
    Config(String),
    /// The partner workbook could not be parsed
    Workbook(WorkbookError),
    /// The export workbook could not be written
    Export(String),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "invalid configuration: {msg}"),
            Self::Workbook(e) => write!(f, "{e}"),
            Self::Export(msg) => write!(f, "export failed: {msg}"),
        }
    }
}

impl std::error::Error for PipelineError {}

impl From<WorkbookError> for PipelineError {
    fn from(e: WorkbookError) -> Self {
        Self::Workbook(e)
    }
}

//! Run parameters.

use std::path::PathBuf;

use crate::error::PipelineError;

/// Everything a run needs to know up front.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Partner name, matched verbatim against the mapping table.
    pub partner: String,
    /// Destination directory for `data.xlsx` and the `Images/` cache.
    pub dest_dir: PathBuf,
}

impl RunConfig {
    pub fn new(partner: impl Into<String>, dest_dir: impl Into<PathBuf>) -> Self {
        Self {
            partner: partner.into(),
            dest_dir: dest_dir.into(),
        }
    }

    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.partner.trim().is_empty() {
            return Err(PipelineError::Config("partner name is empty".to_string()));
        }
        Ok(())
    }
}

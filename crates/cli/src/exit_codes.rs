//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract; scripts rely on them.
//!
//! # Exit Codes
//!
//! | Code | Meaning                                          |
//! |------|--------------------------------------------------|
//! | 0    | Success                                          |
//! | 1    | General error (reserved; prefer a specific code) |
//! | 2    | Usage error (bad args, invalid configuration)    |
//! | 3    | Input file unreadable                            |
//! | 4    | Input data failed to load                        |
//! | 5    | Export workbook could not be written             |
//! | 6    | JSON report could not be written                 |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant below
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into the relevant command's error handling

use catref_pipeline::PipelineError;

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// Usage error - bad arguments or an invalid run configuration.
/// clap uses this value itself for argument parse failures.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Run failures (3-6)
// =============================================================================

/// An input file (mapping CSV or workbook) could not be read from disk.
pub const EXIT_INPUT_IO: u8 = 3;

/// An input file was read but its content failed to load
/// (bad CSV, missing sheet, missing column, unreadable xlsx).
pub const EXIT_INPUT_PARSE: u8 = 4;

/// The export workbook could not be written.
pub const EXIT_EXPORT: u8 = 5;

/// The `--report` JSON file could not be written.
pub const EXIT_REPORT: u8 = 6;

/// Map a pipeline failure to its exit code.
pub fn pipeline_exit_code(err: &PipelineError) -> u8 {
    match err {
        PipelineError::Config(_) => EXIT_USAGE,
        PipelineError::Workbook(_) => EXIT_INPUT_PARSE,
        PipelineError::Export(_) => EXIT_EXPORT,
    }
}

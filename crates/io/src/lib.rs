//! `catref-io`: boundary parsing and export.
//!
//! Loads the mapping CSV, parses FABDIS workbooks into typed rows, and
//! writes the `data.xlsx` export. All row types live in `catref-core`;
//! this crate owns the file formats.

pub mod export;
pub mod mapping;
pub mod workbook;

pub use export::{write_products, ExportResult, EXPORT_FILE_NAME, EXPORT_HEADERS};
pub use mapping::{load_mapping, read_mapping, MappingError};
pub use workbook::{parse_workbook_bytes, WorkbookError, SHEET_LOGISTICS, SHEET_MEDIA};

//! Mapping table loading.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use catref_core::model::CodeMapping;

/// Required mapping table columns.
pub const COL_PARTNER: &str = "PARTNER";
pub const COL_INTERNAL_CODE: &str = "INTERNAL_CODE";
pub const COL_PARTNER_CODE: &str = "PARTNER_CODE";

#[derive(Debug)]
pub enum MappingError {
    /// File open / read error.
    Io(String),
    /// CSV decode error.
    Csv(String),
    /// A required header is absent.
    MissingColumn(&'static str),
}

impl fmt::Display for MappingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "mapping table IO error: {msg}"),
            Self::Csv(msg) => write!(f, "mapping table CSV error: {msg}"),
            Self::MissingColumn(column) => {
                write!(f, "mapping table: missing column '{column}'")
            }
        }
    }
}

impl std::error::Error for MappingError {}

/// Load the mapping table from a CSV file.
pub fn load_mapping(path: &Path) -> Result<Vec<CodeMapping>, MappingError> {
    let file =
        File::open(path).map_err(|e| MappingError::Io(format!("{}: {e}", path.display())))?;
    read_mapping(file)
}

/// Read the mapping table from CSV data.
///
/// Column order does not matter and extra columns are ignored; the three
/// required headers must match exactly. Cell values are kept as-is, since
/// join keys are matched byte-for-byte downstream.
pub fn read_mapping<R: Read>(reader: R) -> Result<Vec<CodeMapping>, MappingError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| MappingError::Csv(e.to_string()))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let idx = |name: &'static str| -> Result<usize, MappingError> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or(MappingError::MissingColumn(name))
    };

    let partner_idx = idx(COL_PARTNER)?;
    let internal_idx = idx(COL_INTERNAL_CODE)?;
    let partner_code_idx = idx(COL_PARTNER_CODE)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| MappingError::Csv(e.to_string()))?;
        rows.push(CodeMapping {
            partner: record.get(partner_idx).unwrap_or("").to_string(),
            internal_code: record.get(internal_idx).unwrap_or("").to_string(),
            partner_code: record.get(partner_code_idx).unwrap_or("").to_string(),
        });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_rows_by_header_name() {
        let csv = "\
PARTNER,INTERNAL_CODE,PARTNER_CODE
Nordelec,A1,X1
Nordelec,A2,X9
";
        let rows = read_mapping(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].partner, "Nordelec");
        assert_eq!(rows[0].internal_code, "A1");
        assert_eq!(rows[1].partner_code, "X9");
    }

    #[test]
    fn column_order_and_extra_columns_do_not_matter() {
        let csv = "\
PARTNER_CODE,UPDATED,PARTNER,INTERNAL_CODE
X1,2026-01-05,Nordelec,A1
";
        let rows = read_mapping(csv.as_bytes()).unwrap();
        assert_eq!(rows[0].partner, "Nordelec");
        assert_eq!(rows[0].internal_code, "A1");
        assert_eq!(rows[0].partner_code, "X1");
    }

    #[test]
    fn cell_values_are_not_trimmed() {
        let csv = "\
PARTNER,INTERNAL_CODE,PARTNER_CODE
Nordelec, A1 ,X1
";
        let rows = read_mapping(csv.as_bytes()).unwrap();
        assert_eq!(rows[0].internal_code, " A1 ");
    }

    #[test]
    fn missing_column_is_reported_by_name() {
        let csv = "\
PARTNER,INTERNAL_CODE
Nordelec,A1
";
        match read_mapping(csv.as_bytes()) {
            Err(MappingError::MissingColumn(column)) => assert_eq!(column, "PARTNER_CODE"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn unreadable_file_is_an_io_error() {
        let err = load_mapping(Path::new("/nonexistent/mapping.csv")).unwrap_err();
        assert!(matches!(err, MappingError::Io(_)));
    }
}

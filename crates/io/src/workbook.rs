//! FABDIS workbook parsing.
//!
//! A partner workbook carries two sheets of interest: `B02_LOGISTIQUE`
//! (packaging tiers with raw measurements) and `B03_MEDIA` (downloadable
//! assets). Cells are read as display strings: blank and error cells
//! become empty strings and integral floats print without a trailing `.0`,
//! so partner-code join keys match the mapping table byte-for-byte.

use std::fmt;
use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};

use catref_core::model::{FabdisWorkbook, LogisticsLine, MediaRecord};
use catref_core::units;

/// FABDIS tab names.
pub const SHEET_LOGISTICS: &str = "B02_LOGISTIQUE";
pub const SHEET_MEDIA: &str = "B03_MEDIA";

// Logistics sheet columns.
const COL_PARTNER_CODE: &str = "PARTNER_CODE";
const COL_QC: &str = "QC";
const COL_QCT: &str = "QCT";
const COL_HAUT: &str = "HAUT";
const COL_HAUTU: &str = "HAUTU";
const COL_LARG: &str = "LARG";
const COL_LARGU: &str = "LARGU";
const COL_PROF: &str = "PROF";
const COL_PROFU: &str = "PROFU";
const COL_POIDS: &str = "POIDS";
const COL_POIDSU: &str = "POIDSU";
const COL_VOL: &str = "VOL";
const COL_VOLU: &str = "VOLU";

// Media sheet columns.
const COL_MEDIA_TYPE: &str = "MEDIA_TYPE";
const COL_MEDIA_URL: &str = "MEDIA_URL";

#[derive(Debug)]
pub enum WorkbookError {
    /// The bytes are not a readable xlsx workbook.
    Open(String),
    /// A required sheet is absent.
    MissingSheet(&'static str),
    /// A sheet exists but could not be read.
    Sheet { sheet: &'static str, detail: String },
    /// A required column is absent from a sheet's header row.
    MissingColumn { sheet: &'static str, column: &'static str },
}

impl fmt::Display for WorkbookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open(msg) => write!(f, "cannot open workbook: {msg}"),
            Self::MissingSheet(sheet) => write!(f, "workbook: missing sheet '{sheet}'"),
            Self::Sheet { sheet, detail } => {
                write!(f, "workbook: cannot read sheet '{sheet}': {detail}")
            }
            Self::MissingColumn { sheet, column } => {
                write!(f, "sheet '{sheet}': missing column '{column}'")
            }
        }
    }
}

impl std::error::Error for WorkbookError {}

/// Parse a partner workbook from raw xlsx bytes.
pub fn parse_workbook_bytes(bytes: &[u8]) -> Result<FabdisWorkbook, WorkbookError> {
    let mut workbook =
        Xlsx::new(Cursor::new(bytes)).map_err(|e| WorkbookError::Open(e.to_string()))?;

    let sheet_names = workbook.sheet_names();
    for required in [SHEET_LOGISTICS, SHEET_MEDIA] {
        if !sheet_names.iter().any(|name| name == required) {
            return Err(WorkbookError::MissingSheet(required));
        }
    }

    let logistics_range = workbook
        .worksheet_range(SHEET_LOGISTICS)
        .map_err(|e| WorkbookError::Sheet { sheet: SHEET_LOGISTICS, detail: e.to_string() })?;
    let media_range = workbook
        .worksheet_range(SHEET_MEDIA)
        .map_err(|e| WorkbookError::Sheet { sheet: SHEET_MEDIA, detail: e.to_string() })?;

    Ok(FabdisWorkbook {
        logistics: parse_logistics(&logistics_range)?,
        media: parse_media(&media_range)?,
    })
}

fn parse_logistics(range: &calamine::Range<Data>) -> Result<Vec<LogisticsLine>, WorkbookError> {
    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .map(|row| row.iter().map(cell_text).collect())
        .unwrap_or_default();

    let idx = |column: &'static str| -> Result<usize, WorkbookError> {
        headers
            .iter()
            .position(|h| h == column)
            .ok_or(WorkbookError::MissingColumn { sheet: SHEET_LOGISTICS, column })
    };

    let partner_code = idx(COL_PARTNER_CODE)?;
    let qc = idx(COL_QC)?;
    let qct = idx(COL_QCT)?;
    let haut = idx(COL_HAUT)?;
    let hautu = idx(COL_HAUTU)?;
    let larg = idx(COL_LARG)?;
    let largu = idx(COL_LARGU)?;
    let prof = idx(COL_PROF)?;
    let profu = idx(COL_PROFU)?;
    let poids = idx(COL_POIDS)?;
    let poidsu = idx(COL_POIDSU)?;
    let vol = idx(COL_VOL)?;
    let volu = idx(COL_VOLU)?;

    let mut lines = Vec::new();
    for row in rows {
        let qty_raw = cell(row, qc);
        lines.push(LogisticsLine {
            partner_code: cell(row, partner_code),
            packaging_qty: units::parse_decimal(&qty_raw),
            packaging_qty_raw: qty_raw,
            packaging_label: cell(row, qct),
            height_raw: cell(row, haut),
            height_unit: cell(row, hautu),
            width_raw: cell(row, larg),
            width_unit: cell(row, largu),
            depth_raw: cell(row, prof),
            depth_unit: cell(row, profu),
            weight_raw: cell(row, poids),
            weight_unit: cell(row, poidsu),
            volume_raw: cell(row, vol),
            volume_unit: cell(row, volu),
        });
    }

    Ok(lines)
}

fn parse_media(range: &calamine::Range<Data>) -> Result<Vec<MediaRecord>, WorkbookError> {
    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .map(|row| row.iter().map(cell_text).collect())
        .unwrap_or_default();

    let idx = |column: &'static str| -> Result<usize, WorkbookError> {
        headers
            .iter()
            .position(|h| h == column)
            .ok_or(WorkbookError::MissingColumn { sheet: SHEET_MEDIA, column })
    };

    let partner_code = idx(COL_PARTNER_CODE)?;
    let media_type = idx(COL_MEDIA_TYPE)?;
    let media_url = idx(COL_MEDIA_URL)?;

    Ok(rows
        .map(|row| MediaRecord {
            partner_code: cell(row, partner_code),
            media_type: cell(row, media_type),
            media_url: cell(row, media_url),
        })
        .collect())
}

fn cell(row: &[Data], idx: usize) -> String {
    row.get(idx).map(cell_text).unwrap_or_default()
}

/// Display-string coercion for one cell, mirroring how the sheets are
/// authored: codes and labels are text, quantities may be stored numeric.
fn cell_text(data: &Data) -> String {
    match data {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => {
            if f.fract() == 0.0 && f.abs() < 1e15 {
                format!("{}", *f as i64)
            } else {
                f.to_string()
            }
        }
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.as_f64().to_string(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(_) => String::new(),
    }
}

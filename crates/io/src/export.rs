//! Export of reconciled product records to `data.xlsx`.

use std::path::{Path, PathBuf};
use std::time::Instant;

use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use catref_core::units::{self, Measure};
use catref_core::ProductRecord;

/// File name of the export workbook inside the destination directory.
pub const EXPORT_FILE_NAME: &str = "data.xlsx";

/// Header row of the export sheet, in column order.
pub const EXPORT_HEADERS: [&str; 22] = [
    "Internal code",
    "Partner code",
    "Weight",
    "Weight unit",
    "Volume",
    "Volume unit",
    "Height",
    "Height unit",
    "Width",
    "Width unit",
    "Depth",
    "Depth unit",
    "Packaging height",
    "Packaging height unit",
    "Packaging width",
    "Packaging width unit",
    "Packaging depth",
    "Packaging depth unit",
    "Smallest packaging unit",
    "Smallest packaging quantity",
    "Largest packaging unit",
    "Largest packaging quantity",
];

// ---------------------------------------------------------------------------
// Export result
// ---------------------------------------------------------------------------

/// Outcome of a completed export.
#[derive(Debug, Clone)]
pub struct ExportResult {
    pub path: PathBuf,
    pub rows_exported: usize,
    pub export_duration_ms: u128,
}

impl ExportResult {
    pub fn summary(&self) -> String {
        format!(
            "Exported {} product(s) to {} in {}ms",
            self.rows_exported,
            self.path.display(),
            self.export_duration_ms
        )
    }
}

// ---------------------------------------------------------------------------
// Writer
// ---------------------------------------------------------------------------

/// Write the reconciled records to `path`.
///
/// Converted measurements land as numeric cells so spreadsheet tooling can
/// aggregate them; units, labels and non-numeric quantities stay text.
pub fn write_products(path: &Path, products: &[ProductRecord]) -> Result<ExportResult, XlsxError> {
    let started = Instant::now();

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    let header_format = Format::new().set_bold();
    for (col, header) in EXPORT_HEADERS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    for (i, product) in products.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write_string(row, 0, &product.internal_code)?;
        sheet.write_string(row, 1, &product.partner_code)?;

        write_measure(sheet, row, 2, &product.weight)?;
        write_measure(sheet, row, 4, &product.volume)?;
        write_measure(sheet, row, 6, &product.height)?;
        write_measure(sheet, row, 8, &product.width)?;
        write_measure(sheet, row, 10, &product.depth)?;
        write_measure(sheet, row, 12, &product.pack_height)?;
        write_measure(sheet, row, 14, &product.pack_width)?;
        write_measure(sheet, row, 16, &product.pack_depth)?;

        sheet.write_string(row, 18, &product.smallest_label)?;
        write_quantity(sheet, row, 19, &product.smallest_qty)?;
        sheet.write_string(row, 20, &product.largest_label)?;
        write_quantity(sheet, row, 21, &product.largest_qty)?;
    }

    workbook.save(path)?;

    Ok(ExportResult {
        path: path.to_path_buf(),
        rows_exported: products.len(),
        export_duration_ms: started.elapsed().as_millis(),
    })
}

/// Converted value in `col`, unit label in `col + 1`. A missing value leaves
/// the cell blank; the unit label is written either way.
fn write_measure(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    measure: &Measure,
) -> Result<(), XlsxError> {
    if let Some(value) = measure.value {
        sheet.write_number(row, col, value)?;
    }
    sheet.write_string(row, col + 1, measure.unit)?;
    Ok(())
}

/// Packaging quantities export numeric when they parse, verbatim otherwise.
fn write_quantity(sheet: &mut Worksheet, row: u32, col: u16, raw: &str) -> Result<(), XlsxError> {
    match units::parse_decimal(raw) {
        Some(value) => sheet.write_number(row, col, value)?,
        None if !raw.trim().is_empty() => sheet.write_string(row, col, raw)?,
        None => return Ok(()),
    };
    Ok(())
}

//! Typed rows for the mapping table, the partner workbook, and the export.

use serde::Serialize;

use crate::units::Measure;

/// Media type value marking a downloadable product photo.
pub const MEDIA_TYPE_PHOTO: &str = "PHOTO";

// ---------------------------------------------------------------------------
// Mapping table
// ---------------------------------------------------------------------------

/// One row of the internal code-mapping table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeMapping {
    pub partner: String,
    pub internal_code: String,
    pub partner_code: String,
}

/// Rows of `mapping` belonging to `partner`, in table order.
pub fn filter_by_partner<'a>(mapping: &'a [CodeMapping], partner: &str) -> Vec<&'a CodeMapping> {
    mapping.iter().filter(|row| row.partner == partner).collect()
}

/// Distinct partner names in a mapping table, sorted. Blank names are skipped.
pub fn partner_names(mapping: &[CodeMapping]) -> Vec<String> {
    let mut names: Vec<String> = mapping
        .iter()
        .map(|row| row.partner.clone())
        .filter(|name| !name.is_empty())
        .collect();
    names.sort();
    names.dedup();
    names
}

// ---------------------------------------------------------------------------
// Partner workbook
// ---------------------------------------------------------------------------

/// One packaging tier from the logistics sheet.
///
/// Measurement cells stay raw here; conversion happens in [`crate::units`]
/// once a tier is selected. `packaging_qty` is the numeric coercion of the
/// raw quantity cell and drives tier selection; the raw string is kept for
/// verbatim export.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LogisticsLine {
    pub partner_code: String,
    pub packaging_qty: Option<f64>,
    pub packaging_qty_raw: String,
    pub packaging_label: String,
    pub height_raw: String,
    pub height_unit: String,
    pub width_raw: String,
    pub width_unit: String,
    pub depth_raw: String,
    pub depth_unit: String,
    pub weight_raw: String,
    pub weight_unit: String,
    pub volume_raw: String,
    pub volume_unit: String,
}

/// One row of the media sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MediaRecord {
    pub partner_code: String,
    pub media_type: String,
    pub media_url: String,
}

/// The parsed contents of one partner workbook.
#[derive(Debug, Clone, Default)]
pub struct FabdisWorkbook {
    pub logistics: Vec<LogisticsLine>,
    pub media: Vec<MediaRecord>,
}

// ---------------------------------------------------------------------------
// Output records
// ---------------------------------------------------------------------------

/// One export row, keyed by internal code.
///
/// Weight, volume and the plain dimensions describe the smallest packaging
/// tier; the `pack_*` dimensions describe the largest. Quantity and label
/// fields are verbatim copies of the source cells.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductRecord {
    pub internal_code: String,
    pub partner_code: String,
    pub weight: Measure,
    pub volume: Measure,
    pub height: Measure,
    pub width: Measure,
    pub depth: Measure,
    pub pack_height: Measure,
    pub pack_width: Measure,
    pub pack_depth: Measure,
    pub smallest_label: String,
    pub smallest_qty: String,
    pub largest_label: String,
    pub largest_qty: String,
}

impl ProductRecord {
    /// `(field, unit code)` pairs for every measurement whose unit code was
    /// not recognized. The pipeline turns these into report warnings.
    pub fn unit_issues(&self) -> Vec<(&'static str, &str)> {
        let fields: [(&'static str, &Measure); 8] = [
            ("weight", &self.weight),
            ("volume", &self.volume),
            ("height", &self.height),
            ("width", &self.width),
            ("depth", &self.depth),
            ("packaging height", &self.pack_height),
            ("packaging width", &self.pack_width),
            ("packaging depth", &self.pack_depth),
        ];
        fields
            .iter()
            .filter_map(|(name, measure)| {
                measure.unknown_unit.as_deref().map(|code| (*name, code))
            })
            .collect()
    }
}

//! Output record assembly.

use crate::model::{CodeMapping, ProductRecord};
use crate::tiers::TierSelection;
use crate::units;

/// Build the export row for one product from its selected packaging tiers.
///
/// Weight, volume and dimensions come from the smallest tier; the largest
/// tier contributes its dimensions only. Packaging quantity and label
/// fields are copied verbatim, uninterpreted.
pub fn build_record(mapping: &CodeMapping, tiers: &TierSelection<'_>) -> ProductRecord {
    let min = tiers.smallest;
    let max = tiers.largest;
    ProductRecord {
        internal_code: mapping.internal_code.clone(),
        partner_code: mapping.partner_code.clone(),
        weight: units::convert_mass(&min.weight_raw, &min.weight_unit),
        volume: units::convert_volume(&min.volume_raw, &min.volume_unit),
        height: units::convert_length(&min.height_raw, &min.height_unit),
        width: units::convert_length(&min.width_raw, &min.width_unit),
        depth: units::convert_length(&min.depth_raw, &min.depth_unit),
        pack_height: units::convert_length(&max.height_raw, &max.height_unit),
        pack_width: units::convert_length(&max.width_raw, &max.width_unit),
        pack_depth: units::convert_length(&max.depth_raw, &max.depth_unit),
        smallest_label: min.packaging_label.clone(),
        smallest_qty: min.packaging_qty_raw.clone(),
        largest_label: max.packaging_label.clone(),
        largest_qty: max.packaging_qty_raw.clone(),
    }
}

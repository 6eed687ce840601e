//! Conversion of raw measurements into canonical units.
//!
//! Measurements arrive as cell strings paired with a FABDIS unit code
//! (`HAUTU`, `POIDSU`, ...). Each converter normalizes into one fixed
//! canonical unit and always returns the canonical label, even when the
//! value cannot be parsed.

use serde::Serialize;

/// Canonical unit labels, written verbatim to the export.
pub const MILLIMETRE: &str = "Millimetre";
pub const KILOGRAMME: &str = "Kilogramme";
pub const CUBIC_METRE: &str = "Cubic metre";

/// One measurement after conversion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measure {
    /// Canonical value; `None` when the raw cell was not numeric.
    pub value: Option<f64>,
    /// Canonical unit label, present even when the value is not.
    pub unit: &'static str,
    /// The original unit code when it was not recognized. The value then
    /// falls back to 0.0, matching the historical export.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unknown_unit: Option<String>,
}

/// Length into millimetres, rounded to 2 decimals.
pub fn convert_length(raw: &str, unit_code: &str) -> Measure {
    convert(raw, unit_code, length_factor, MILLIMETRE, 2)
}

/// Mass into kilogrammes, rounded to 3 decimals.
pub fn convert_mass(raw: &str, unit_code: &str) -> Measure {
    convert(raw, unit_code, mass_factor, KILOGRAMME, 3)
}

/// Volume into cubic metres, rounded to 6 decimals.
pub fn convert_volume(raw: &str, unit_code: &str) -> Measure {
    convert(raw, unit_code, volume_factor, CUBIC_METRE, 6)
}

/// Numeric coercion for measurement and quantity cells: trimmed, `f64`
/// syntax, non-finite values rejected.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

fn convert(
    raw: &str,
    unit_code: &str,
    factor: fn(&str) -> Option<f64>,
    unit: &'static str,
    decimals: i32,
) -> Measure {
    let value = match parse_decimal(raw) {
        Some(value) => value,
        None => {
            return Measure {
                value: None,
                unit,
                unknown_unit: None,
            }
        }
    };
    match factor(unit_code) {
        Some(factor) => Measure {
            value: Some(round_to(value * factor, decimals)),
            unit,
            unknown_unit: None,
        },
        None => Measure {
            value: Some(0.0),
            unit,
            unknown_unit: Some(unit_code.trim().to_string()),
        },
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

// Unit codes are matched trimmed and case-insensitively.

fn length_factor(code: &str) -> Option<f64> {
    match code.trim().to_ascii_uppercase().as_str() {
        "MMT" => Some(1.0),
        "CMT" => Some(10.0),
        "DMT" => Some(100.0),
        "MTR" => Some(1000.0),
        _ => None,
    }
}

fn mass_factor(code: &str) -> Option<f64> {
    match code.trim().to_ascii_uppercase().as_str() {
        "GRM" => Some(0.001),
        "KGM" => Some(1.0),
        _ => None,
    }
}

fn volume_factor(code: &str) -> Option<f64> {
    match code.trim().to_ascii_uppercase().as_str() {
        "CTQ" => Some(1e-6),
        "DMQ" => Some(1e-3),
        "MTQ" => Some(1.0),
        _ => None,
    }
}

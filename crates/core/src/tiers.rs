//! Packaging tier selection.

use std::fmt;

use crate::model::LogisticsLine;

/// The smallest- and largest-quantity packaging tiers for one product.
/// Both point at the same line when only one qualifies.
#[derive(Debug)]
pub struct TierSelection<'a> {
    pub smallest: &'a LogisticsLine,
    pub largest: &'a LogisticsLine,
}

/// A product had zero logistics lines to select from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoPackagingData;

impl fmt::Display for NoPackagingData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no logistics lines for this partner code")
    }
}

impl std::error::Error for NoPackagingData {}

/// Select the packaging tiers for one product.
///
/// Stable linear scan with strict comparison: the first occurrence wins
/// ties. Lines without a comparable quantity are skipped; when no line has
/// one, the first line stands in for both tiers.
pub fn select_tiers<'a>(
    lines: &[&'a LogisticsLine],
) -> Result<TierSelection<'a>, NoPackagingData> {
    let first = *lines.first().ok_or(NoPackagingData)?;

    let mut smallest: Option<(f64, &LogisticsLine)> = None;
    let mut largest: Option<(f64, &LogisticsLine)> = None;
    for &line in lines {
        let Some(qty) = line.packaging_qty else {
            continue;
        };
        if smallest.map_or(true, |(best, _)| qty < best) {
            smallest = Some((qty, line));
        }
        if largest.map_or(true, |(best, _)| qty > best) {
            largest = Some((qty, line));
        }
    }

    Ok(match (smallest, largest) {
        (Some((_, min)), Some((_, max))) => TierSelection {
            smallest: min,
            largest: max,
        },
        _ => TierSelection {
            smallest: first,
            largest: first,
        },
    })
}

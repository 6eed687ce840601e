//! Per-run lookup indices over the workbook sheets.
//!
//! Built once per run so the per-product loops cost one hash lookup
//! instead of rescanning both sheets for every mapping row.

use std::collections::HashMap;

use crate::model::{LogisticsLine, MediaRecord, MEDIA_TYPE_PHOTO};

/// Logistics lines grouped by partner code, sheet order preserved.
pub struct LogisticsIndex<'a> {
    by_code: HashMap<&'a str, Vec<&'a LogisticsLine>>,
}

impl<'a> LogisticsIndex<'a> {
    pub fn build(lines: &'a [LogisticsLine]) -> Self {
        let mut by_code: HashMap<&str, Vec<&LogisticsLine>> = HashMap::new();
        for line in lines {
            by_code.entry(line.partner_code.as_str()).or_default().push(line);
        }
        Self { by_code }
    }

    /// All lines for a partner code, in sheet order. Empty when unknown.
    pub fn lines(&self, partner_code: &str) -> &[&'a LogisticsLine] {
        self.by_code
            .get(partner_code)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// First PHOTO row per partner code.
///
/// The first matching row decides: a blank URL there means no usable media
/// for the product, even if a later PHOTO row carries one.
pub struct MediaIndex<'a> {
    first_photo: HashMap<&'a str, &'a str>,
}

impl<'a> MediaIndex<'a> {
    pub fn build(media: &'a [MediaRecord]) -> Self {
        let mut first_photo: HashMap<&str, &str> = HashMap::new();
        for record in media {
            if record.media_type == MEDIA_TYPE_PHOTO {
                first_photo
                    .entry(record.partner_code.as_str())
                    .or_insert(record.media_url.as_str());
            }
        }
        Self { first_photo }
    }

    /// URL to fetch for a partner code; `None` when there is no PHOTO row
    /// or its URL is blank.
    pub fn photo_url(&self, partner_code: &str) -> Option<&'a str> {
        self.first_photo
            .get(partner_code)
            .copied()
            .filter(|url| !url.is_empty())
    }
}

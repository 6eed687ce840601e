//! Run report: what happened, to which products, and how long it took.

use std::path::PathBuf;

use serde::Serialize;

use catref_core::ProductRecord;
use catref_fetch::FetchOutcome;

/// Image fetch tallies for one run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImageStats {
    pub cached: usize,
    pub downloaded: usize,
    pub no_media: usize,
    pub not_found: usize,
    pub failed: usize,
}

impl ImageStats {
    pub fn tally(&mut self, outcome: &FetchOutcome) {
        match outcome {
            FetchOutcome::Cached => self.cached += 1,
            FetchOutcome::Downloaded => self.downloaded += 1,
            FetchOutcome::NoMedia => self.no_media += 1,
            FetchOutcome::NotFound => self.not_found += 1,
            FetchOutcome::Failed(_) => self.failed += 1,
        }
    }
}

/// Full account of a completed run. Serializes to JSON for `--report`.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Partner the run was scoped to
    pub partner: String,
    /// RFC 3339 timestamp of the run
    pub run_at: String,
    /// Version of the tool that produced this report
    pub tool_version: String,
    /// Mapping rows found for the partner
    pub mapping_rows: usize,
    /// Products written to the export
    pub products_exported: usize,
    /// Internal codes dropped for lack of logistics lines
    pub products_skipped: Vec<String>,
    /// Image fetch tallies
    pub images: ImageStats,
    /// Per-product fetch problems (dead links, CDN errors)
    pub fetch_warnings: Vec<String>,
    /// Per-product unit codes that were not recognized
    pub unit_warnings: Vec<String>,
    /// Where the export landed
    pub export_path: PathBuf,
    /// Wall-clock duration of the whole run
    pub duration_ms: u128,
    /// The exported records themselves
    pub products: Vec<ProductRecord>,
}

impl RunReport {
    /// One-line result for the terminal.
    pub fn summary(&self) -> String {
        let mut parts = vec![
            format!(
                "{} product{} exported",
                self.products_exported,
                if self.products_exported == 1 { "" } else { "s" }
            ),
            format!(
                "{} image{} downloaded ({} cached)",
                self.images.downloaded,
                if self.images.downloaded == 1 { "" } else { "s" },
                self.images.cached
            ),
        ];
        if !self.products_skipped.is_empty() {
            parts.push(format!(
                "{} skipped without packaging data",
                self.products_skipped.len()
            ));
        }
        parts.push(format!("{}ms", self.duration_ms));
        parts.join(" · ")
    }

    pub fn has_warnings(&self) -> bool {
        !self.fetch_warnings.is_empty()
            || !self.unit_warnings.is_empty()
            || !self.products_skipped.is_empty()
    }

    /// Single-line warning digest; detail lines live in the warning vecs.
    pub fn warning_summary(&self) -> Option<String> {
        let mut issues = Vec::new();

        if !self.products_skipped.is_empty() {
            issues.push(format!("{} without packaging data", self.products_skipped.len()));
        }
        if self.images.not_found > 0 {
            issues.push(format!("{} images missing upstream", self.images.not_found));
        }
        if self.images.failed > 0 {
            issues.push(format!("{} image fetches failed", self.images.failed));
        }
        if !self.unit_warnings.is_empty() {
            issues.push(format!("{} unrecognized units", self.unit_warnings.len()));
        }

        if issues.is_empty() {
            None
        } else {
            Some(issues.join(", "))
        }
    }
}

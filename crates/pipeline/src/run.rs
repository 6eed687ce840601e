//! Run orchestration.

use std::time::Instant;

use chrono::Utc;

use catref_core::index::{LogisticsIndex, MediaIndex};
use catref_core::model::filter_by_partner;
use catref_core::{build_record, select_tiers, CodeMapping};
use catref_fetch::{FetchOutcome, ImageStore};
use catref_io::{parse_workbook_bytes, write_products, EXPORT_FILE_NAME};

use crate::config::RunConfig;
use crate::error::PipelineError;
use crate::report::{ImageStats, RunReport};

/// Reconcile one partner's catalog into `data.xlsx` plus an image cache.
///
/// Images are handled before records so a partially fetched cache is still
/// valid input for the next run.
pub fn run(
    config: &RunConfig,
    mapping: &[CodeMapping],
    workbook_bytes: &[u8],
) -> Result<RunReport, PipelineError> {
    let started = Instant::now();
    config.validate()?;

    let workbook = parse_workbook_bytes(workbook_bytes)?;
    let mappings = filter_by_partner(mapping, &config.partner);

    let logistics = LogisticsIndex::build(&workbook.logistics);
    let media = MediaIndex::build(&workbook.media);

    // Pass 1: images. A dead link is a warning, never an abort.
    let store = ImageStore::new(&config.dest_dir);
    let mut images = ImageStats::default();
    let mut fetch_warnings = Vec::new();
    for &m in &mappings {
        let outcome = store.ensure(&m.internal_code, media.photo_url(&m.partner_code));
        match &outcome {
            FetchOutcome::NotFound => {
                fetch_warnings.push(format!("{}: image not found upstream", m.internal_code));
            }
            FetchOutcome::Failed(reason) => {
                fetch_warnings.push(format!("{}: {reason}", m.internal_code));
            }
            _ => {}
        }
        images.tally(&outcome);
    }

    // Pass 2: records, in mapping order.
    let mut products = Vec::new();
    let mut products_skipped = Vec::new();
    for &m in &mappings {
        match select_tiers(logistics.lines(&m.partner_code)) {
            Ok(tiers) => products.push(build_record(m, &tiers)),
            Err(_) => products_skipped.push(m.internal_code.clone()),
        }
    }

    let mut unit_warnings = Vec::new();
    for product in &products {
        for (field, code) in product.unit_issues() {
            unit_warnings.push(format!(
                "{}: unrecognized {field} unit '{code}'",
                product.internal_code
            ));
        }
    }

    let export_path = config.dest_dir.join(EXPORT_FILE_NAME);
    let export = write_products(&export_path, &products)
        .map_err(|e| PipelineError::Export(e.to_string()))?;

    Ok(RunReport {
        partner: config.partner.clone(),
        run_at: Utc::now().to_rfc3339(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
        mapping_rows: mappings.len(),
        products_exported: export.rows_exported,
        products_skipped,
        images,
        fetch_warnings,
        unit_warnings,
        export_path: export.path,
        duration_ms: started.elapsed().as_millis(),
        products,
    })
}

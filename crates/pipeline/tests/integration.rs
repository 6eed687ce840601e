use std::fs;
use std::path::Path;

use calamine::{open_workbook, Data, Reader, Xlsx};
use httpmock::prelude::*;
use rust_xlsxwriter::Workbook;

use catref_core::CodeMapping;
use catref_io::{WorkbookError, EXPORT_FILE_NAME, SHEET_LOGISTICS, SHEET_MEDIA};
use catref_pipeline::{run, PipelineError, RunConfig};

const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 9, 9];

const LOGISTICS_HEADERS: [&str; 13] = [
    "PARTNER_CODE", "QC", "QCT", "HAUT", "HAUTU", "LARG", "LARGU", "PROF", "PROFU",
    "POIDS", "POIDSU", "VOL", "VOLU",
];

fn fabdis_bytes(logistics: &[[&str; 13]], media: &[[&str; 3]]) -> Vec<u8> {
    let mut workbook = Workbook::new();

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_LOGISTICS).unwrap();
    for (col, header) in LOGISTICS_HEADERS.iter().enumerate() {
        sheet.write_string(0, col as u16, *header).unwrap();
    }
    for (r, row) in logistics.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            if !value.is_empty() {
                sheet.write_string((r + 1) as u32, c as u16, *value).unwrap();
            }
        }
    }

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_MEDIA).unwrap();
    for (col, header) in ["PARTNER_CODE", "MEDIA_TYPE", "MEDIA_URL"]
        .iter()
        .enumerate()
    {
        sheet.write_string(0, col as u16, *header).unwrap();
    }
    for (r, row) in media.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            if !value.is_empty() {
                sheet.write_string((r + 1) as u32, c as u16, *value).unwrap();
            }
        }
    }

    workbook.save_to_buffer().unwrap()
}

fn mapping_row(partner: &str, internal: &str, code: &str) -> CodeMapping {
    CodeMapping {
        partner: partner.to_string(),
        internal_code: internal.to_string(),
        partner_code: code.to_string(),
    }
}

/// P1 has two packaging tiers and a photo, P2 has no logistics rows at all,
/// P9 belongs to another partner.
fn acme_mapping() -> Vec<CodeMapping> {
    vec![
        mapping_row("ACME", "P1", "X1"),
        mapping_row("ACME", "P2", "X2"),
        mapping_row("OTHER", "P9", "Z9"),
    ]
}

fn standard_workbook(photo_url: &str) -> Vec<u8> {
    fabdis_bytes(
        &[
            [
                "X1", "1", "Carton", "10", "CMT", "20", "CMT", "30", "MMT", "0.5", "KGM",
                "2000", "CTQ",
            ],
            ["X1", "10", "Palette", "1", "MTR", "", "", "", "", "", "", "", ""],
        ],
        &[["X1", "PHOTO", photo_url]],
    )
}

fn read_export(dest: &Path) -> Vec<Vec<Data>> {
    let mut workbook: Xlsx<_> = open_workbook(dest.join(EXPORT_FILE_NAME)).unwrap();
    let name = workbook.sheet_names()[0].clone();
    let range = workbook.worksheet_range(&name).unwrap();
    range.rows().map(|row| row.to_vec()).collect()
}

// -------------------------------------------------------------------------
// Full runs
// -------------------------------------------------------------------------

#[test]
fn end_to_end_run_converts_fetches_and_exports() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/x1.png");
        then.status(200).body(PNG_BYTES);
    });
    let dest = tempfile::tempdir().unwrap();
    let config = RunConfig::new("ACME", dest.path());

    let report = run(
        &config,
        &acme_mapping(),
        &standard_workbook(&server.url("/x1.png")),
    )
    .unwrap();

    // Only ACME rows take part; P2 has no packaging data.
    assert_eq!(report.mapping_rows, 2);
    assert_eq!(report.products_exported, 1);
    assert_eq!(report.products_skipped, vec!["P2".to_string()]);
    assert_eq!(report.images.downloaded, 1);
    assert_eq!(report.images.no_media, 1);
    assert!(report.fetch_warnings.is_empty());
    assert!(report.unit_warnings.is_empty());

    mock.assert();
    let image = dest.path().join("Images").join("P1.png");
    assert_eq!(fs::read(image).unwrap(), PNG_BYTES);

    let rows = read_export(dest.path());
    assert_eq!(rows.len(), 2);
    let row = &rows[1];
    assert_eq!(row[0], Data::String("P1".to_string()));
    assert_eq!(row[1], Data::String("X1".to_string()));
    // Smallest tier (1 per Carton) supplies the product dimensions.
    assert_eq!(row[6], Data::Float(100.0));
    assert_eq!(row[7], Data::String("Millimetre".to_string()));
    assert_eq!(row[2], Data::Float(0.5));
    assert_eq!(row[4], Data::Float(0.002));
    // Largest tier (10 per Palette) supplies the packaging dimensions.
    assert_eq!(row[12], Data::Float(1000.0));
    assert_eq!(row[18], Data::String("Carton".to_string()));
    assert_eq!(row[19], Data::Float(1.0));
    assert_eq!(row[20], Data::String("Palette".to_string()));
    assert_eq!(row[21], Data::Float(10.0));
}

#[test]
fn second_run_reuses_the_image_cache() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/x1.png");
        then.status(200).body(PNG_BYTES);
    });
    let dest = tempfile::tempdir().unwrap();
    let config = RunConfig::new("ACME", dest.path());
    let mapping = acme_mapping();
    let bytes = standard_workbook(&server.url("/x1.png"));

    let first = run(&config, &mapping, &bytes).unwrap();
    assert_eq!(first.images.downloaded, 1);
    assert_eq!(first.images.cached, 0);

    let second = run(&config, &mapping, &bytes).unwrap();
    assert_eq!(second.images.downloaded, 0);
    assert_eq!(second.images.cached, 1);
    assert_eq!(second.products_exported, 1);

    mock.assert_hits(1);
}

#[test]
fn partner_without_mapping_rows_exports_header_only() {
    let dest = tempfile::tempdir().unwrap();
    let config = RunConfig::new("NOBODY", dest.path());

    let report = run(&config, &acme_mapping(), &standard_workbook("")).unwrap();

    assert_eq!(report.mapping_rows, 0);
    assert_eq!(report.products_exported, 0);
    assert!(!report.has_warnings());

    let rows = read_export(dest.path());
    assert_eq!(rows.len(), 1);
}

// -------------------------------------------------------------------------
// Degradation and failure
// -------------------------------------------------------------------------

#[test]
fn unrecognized_unit_exports_zero_and_warns() {
    let dest = tempfile::tempdir().unwrap();
    let config = RunConfig::new("ACME", dest.path());
    let mapping = vec![mapping_row("ACME", "P1", "X1")];
    let bytes = fabdis_bytes(
        &[[
            "X1", "1", "Carton", "", "", "", "", "", "", "7", "XX", "", "",
        ]],
        &[],
    );

    let report = run(&config, &mapping, &bytes).unwrap();

    assert_eq!(report.products_exported, 1);
    assert!(report.has_warnings());
    assert_eq!(report.unit_warnings.len(), 1);
    assert!(report.unit_warnings[0].contains("P1"), "{}", report.unit_warnings[0]);
    assert!(report.unit_warnings[0].contains("'XX'"), "{}", report.unit_warnings[0]);

    let rows = read_export(dest.path());
    assert_eq!(rows[1][2], Data::Float(0.0));
}

#[test]
fn dead_image_link_degrades_to_a_warning() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/x1.png");
        then.status(404);
    });
    let dest = tempfile::tempdir().unwrap();
    let config = RunConfig::new("ACME", dest.path());

    let report = run(
        &config,
        &acme_mapping(),
        &standard_workbook(&server.url("/x1.png")),
    )
    .unwrap();

    assert_eq!(report.images.not_found, 1);
    assert_eq!(report.fetch_warnings.len(), 1);
    assert!(report.fetch_warnings[0].contains("P1"));
    // The product record still makes it into the export.
    assert_eq!(report.products_exported, 1);
}

#[test]
fn missing_sheet_aborts_the_run() {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_MEDIA).unwrap();
    sheet.write_string(0, 0, "PARTNER_CODE").unwrap();
    let bytes = workbook.save_to_buffer().unwrap();

    let dest = tempfile::tempdir().unwrap();
    let config = RunConfig::new("ACME", dest.path());

    match run(&config, &acme_mapping(), &bytes) {
        Err(PipelineError::Workbook(WorkbookError::MissingSheet(sheet))) => {
            assert_eq!(sheet, SHEET_LOGISTICS);
        }
        other => panic!("expected MissingSheet, got {other:?}"),
    }
}

// -------------------------------------------------------------------------
// Report shape
// -------------------------------------------------------------------------

#[test]
fn report_serializes_for_the_json_flag() {
    let dest = tempfile::tempdir().unwrap();
    let config = RunConfig::new("ACME", dest.path());

    let report = run(&config, &acme_mapping(), &standard_workbook("")).unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["partner"].as_str(), Some("ACME"));
    assert!(json["run_at"].is_string());
    assert!(json["tool_version"].is_string());
    assert!(json["images"]["no_media"].is_number());
    assert!(json["products"].is_array());
    assert_eq!(json["products"][0]["internal_code"].as_str(), Some("P1"));
    assert!(json["export_path"].is_string());
}

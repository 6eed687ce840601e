// CatRef CLI - partner catalog reconciliation from the terminal

mod exit_codes;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use catref_core::model::partner_names;
use catref_core::CodeMapping;
use catref_fetch::IMAGES_DIR_NAME;
use catref_io::{load_mapping, MappingError, WorkbookError, SHEET_LOGISTICS, SHEET_MEDIA};
use catref_pipeline::{run, PipelineError, RunConfig, RunReport};

use exit_codes::{pipeline_exit_code, EXIT_INPUT_IO, EXIT_INPUT_PARSE, EXIT_REPORT, EXIT_SUCCESS};

/// Rows of the export shown on stdout after a run.
const PREVIEW_ROWS: usize = 5;

#[derive(Parser)]
#[command(name = "catref")]
#[command(about = "Reconcile a partner catalog into data.xlsx plus an image cache")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile one partner's catalog into a destination directory
    #[command(after_help = "\
Examples:
  catref run --partner ACME --mapping mapping.csv --workbook fabdis.xlsx --dest out/
  catref run --partner ACME --mapping mapping.csv --workbook fabdis.xlsx --dest out/ --report run.json
  catref run --partner ACME --mapping mapping.csv --workbook fabdis.xlsx --dest out/ -q")]
    Run {
        /// Partner name, matched verbatim against the mapping table
        #[arg(long)]
        partner: String,

        /// Mapping CSV (PARTNER, INTERNAL_CODE, PARTNER_CODE)
        #[arg(long)]
        mapping: PathBuf,

        /// Partner FABDIS workbook (.xlsx)
        #[arg(long)]
        workbook: PathBuf,

        /// Destination directory for data.xlsx and Images/
        #[arg(long)]
        dest: PathBuf,

        /// Write the full JSON run report to this file
        #[arg(long)]
        report: Option<PathBuf>,

        /// Suppress progress output (warnings and errors still print)
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// List the partner names present in a mapping file
    #[command(after_help = "\
Examples:
  catref partners --mapping mapping.csv")]
    Partners {
        /// Mapping CSV (PARTNER, INTERNAL_CODE, PARTNER_CODE)
        #[arg(long)]
        mapping: PathBuf,
    },
}

fn read_mapping_file(path: &Path) -> Result<Vec<CodeMapping>, CliError> {
    load_mapping(path).map_err(|e| match e {
        MappingError::Io(_) => CliError::io(e.to_string()),
        _ => CliError::parse(e.to_string()),
    })
}

fn run_hint(err: &PipelineError) -> Option<String> {
    match err {
        PipelineError::Workbook(WorkbookError::MissingSheet(_)) => Some(format!(
            "expected a FABDIS workbook with sheets {SHEET_LOGISTICS} and {SHEET_MEDIA}"
        )),
        _ => None,
    }
}

fn cmd_run(
    partner: String,
    mapping_path: PathBuf,
    workbook_path: PathBuf,
    dest: PathBuf,
    report_path: Option<PathBuf>,
    quiet: bool,
) -> Result<(), CliError> {
    let mapping = read_mapping_file(&mapping_path)?;
    let workbook_bytes = fs::read(&workbook_path)
        .map_err(|e| CliError::io(format!("cannot read {}: {e}", workbook_path.display())))?;

    fs::create_dir_all(dest.join(IMAGES_DIR_NAME))
        .map_err(|e| CliError::io(format!("cannot create {}: {e}", dest.display())))?;

    if !quiet {
        eprintln!("reconciling partner '{partner}' into {}", dest.display());
    }

    let config = RunConfig::new(partner, dest);
    let report = run(&config, &mapping, &workbook_bytes).map_err(|e| CliError {
        code: pipeline_exit_code(&e),
        message: e.to_string(),
        hint: run_hint(&e),
    })?;

    if let Some(ref path) = report_path {
        let json = serde_json::to_string_pretty(&report).map_err(|e| {
            CliError::report(format!("cannot serialize report: {e}"))
        })?;
        fs::write(path, json)
            .map_err(|e| CliError::report(format!("cannot write {}: {e}", path.display())))?;
        if !quiet {
            eprintln!("wrote {}", path.display());
        }
    }

    for warning in report.fetch_warnings.iter().chain(&report.unit_warnings) {
        eprintln!("warning: {warning}");
    }

    if report.mapping_rows == 0 {
        eprintln!("note: no mapping rows for partner '{}'", report.partner);
        eprintln!("      `catref partners --mapping <FILE>` lists the known partners");
    }

    println!("{}", report.summary());
    if !quiet {
        print_preview(&report);
    }

    Ok(())
}

/// First rows of the export, for a quick check without opening the file.
fn print_preview(report: &RunReport) {
    for product in report.products.iter().take(PREVIEW_ROWS) {
        println!(
            "  {}  {}  {} x{}  ->  {} x{}",
            product.internal_code,
            product.partner_code,
            product.smallest_label,
            product.smallest_qty,
            product.largest_label,
            product.largest_qty,
        );
    }
    let rest = report.products.len().saturating_sub(PREVIEW_ROWS);
    if rest > 0 {
        println!("  ... and {rest} more");
    }
}

fn cmd_partners(mapping_path: PathBuf) -> Result<(), CliError> {
    let mapping = read_mapping_file(&mapping_path)?;
    let partners = partner_names(&mapping);

    if partners.is_empty() {
        eprintln!("no partners found in {}", mapping_path.display());
        return Ok(());
    }
    for partner in partners {
        println!("{partner}");
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            partner,
            mapping,
            workbook,
            dest,
            report,
            quiet,
        } => cmd_run(partner, mapping, workbook, dest, report, quiet),
        Commands::Partners { mapping } => cmd_partners(mapping),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {message}");
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {hint}");
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_INPUT_IO, message: msg.into(), hint: None }
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self { code: EXIT_INPUT_PARSE, message: msg.into(), hint: None }
    }

    pub fn report(msg: impl Into<String>) -> Self {
        Self { code: EXIT_REPORT, message: msg.into(), hint: None }
    }
}

//! Import command: container + edited CSV -> patched container.

use std::path::Path;

use anyhow::{Context, Result};
use mhfpac::{BackupOutcome, ImportOptions, ImportSummary, TextCodec, import_file, parse_table_selection};
use serde_json::json;
use tracing::warn;

/// Arguments for the import command
pub struct ImportArgs<'a> {
    pub input: &'a Path,
    pub edits: &'a Path,
    pub output: &'a Path,
    pub encoding: &'a str,
    pub tables: Option<&'a str>,
    pub backup: bool,
    pub validate_header: bool,
    pub report: Option<&'a Path>,
}

/// Run the import command
pub fn run(args: ImportArgs<'_>) -> Result<()> {
    // Configuration errors surface before any file is read
    let options = ImportOptions::builder()
        .codec(TextCodec::from_label(args.encoding)?)
        .tables(parse_table_selection(args.tables)?)
        .validate_header(args.validate_header)
        .backup(args.backup)
        .build();

    let summary = import_file(args.input, args.edits, args.output, &options)
        .with_context(|| format!("Failed to patch {}", args.input.display()))?;

    for row in &summary.malformed {
        warn!("Skipped row at line {}: {}", row.line, row.reason);
    }

    print_summary(args.output, &summary);

    if let Some(path) = args.report {
        write_report(path, &summary)?;
        println!("    Report: {}", path.display());
    }

    Ok(())
}

fn print_summary(output: &Path, summary: &ImportSummary) {
    let report = &summary.report;
    println!("[OK] Patched: {}", output.display());
    println!("    Strings changed: {}", report.strings_changed);
    println!("    Pointer slots updated: {}", report.slots_updated);
    println!(
        "    Size: 0x{:X} -> 0x{:X}",
        summary.input_len, summary.output_len
    );

    let skipped = &report.skipped;
    if skipped.total() > 0 {
        println!(
            "    Skipped edits: {} unchanged, {} unreferenced, {} out of range",
            skipped.unchanged, skipped.no_referencing_pointers, skipped.out_of_range
        );
    }
    if !summary.malformed.is_empty() {
        println!("    Malformed rows: {}", summary.malformed.len());
    }

    match &summary.backup {
        Some(BackupOutcome::Created(path)) => println!("    Backup: {}", path.display()),
        Some(BackupOutcome::AlreadyExists(path)) => {
            println!("    Backup: {} (kept existing)", path.display())
        }
        None => {}
    }
}

fn write_report(path: &Path, summary: &ImportSummary) -> Result<()> {
    let value = json!({
        "strings_changed": summary.report.strings_changed,
        "slots_updated": summary.report.slots_updated,
        "input_len": summary.input_len,
        "output_len": summary.output_len,
        "skipped": summary.report.skipped,
        "malformed": summary.malformed,
        "relocations": summary.report.relocations,
    });
    let content = serde_json::to_string_pretty(&value)?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write report {}", path.display()))?;
    Ok(())
}

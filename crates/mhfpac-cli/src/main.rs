mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::infer::infer_command;

#[derive(Parser)]
#[command(name = "mhfpac", version)]
#[command(about = "MHF-PAC tools: export strings to CSV and import/patch them back")]
struct Cli {
    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Dump all null-terminated strings from a BIN/PAC into a CSV
    Export {
        /// Container to read
        input: PathBuf,
        /// CSV file to write
        output: PathBuf,
        /// String encoding
        #[arg(long, default_value = mhfpac::DEFAULT_ENCODING)]
        encoding: String,
        /// Header field holding the string blob start (hex or decimal)
        #[arg(long, default_value = "0x10C")]
        blob_pointer: String,
        /// Check the 0x1A636170/0x0000000A header first
        #[arg(long)]
        validate_header: bool,
    },
    /// Write edited strings from a CSV into a new BIN/PAC
    Import {
        /// Original container the CSV was exported from
        input: PathBuf,
        /// Edited CSV
        edits: PathBuf,
        /// Patched container to write
        output: PathBuf,
        /// String encoding
        #[arg(long, default_value = mhfpac::DEFAULT_ENCODING)]
        encoding: String,
        /// Comma-separated tables to repoint (default: all)
        #[arg(long)]
        tables: Option<String>,
        /// Do not write <input>.bak
        #[arg(long)]
        no_backup: bool,
        /// Check the 0x1A636170/0x0000000A header first
        #[arg(long)]
        validate_header: bool,
        /// Write a JSON report of every relocation
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// List the configured pointer tables
    Tables {
        /// Container to inspect
        input: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse_from(infer_command(std::env::args_os().collect()));

    let directive = if cli.verbose { "mhfpac=debug" } else { "mhfpac=info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive.parse()?))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Export {
            input,
            output,
            encoding,
            blob_pointer,
            validate_header,
        } => commands::export::run(&input, &output, &encoding, &blob_pointer, validate_header),
        Command::Import {
            input,
            edits,
            output,
            encoding,
            tables,
            no_backup,
            validate_header,
            report,
        } => commands::import::run(commands::import::ImportArgs {
            input: &input,
            edits: &edits,
            output: &output,
            encoding: &encoding,
            tables: tables.as_deref(),
            backup: !no_backup,
            validate_header,
            report: report.as_deref(),
        }),
        Command::Tables { input } => commands::tables::run(input.as_deref()),
    }
}

//! Export command: container -> CSV.

use std::path::Path;

use anyhow::{Context, Result};
use mhfpac::{ExportOptions, TextCodec, export_file};

use super::hex_utils::parse_offset_arg;

/// Run the export command
pub fn run(
    input: &Path,
    output: &Path,
    encoding: &str,
    blob_pointer: &str,
    validate_header: bool,
) -> Result<()> {
    let options = ExportOptions {
        codec: TextCodec::from_label(encoding)?,
        blob_pointer: parse_offset_arg(blob_pointer)?,
        validate_header,
    };

    if !input.is_file() {
        anyhow::bail!("Input not found: {}", input.display());
    }

    let count = export_file(input, output, &options)
        .with_context(|| format!("Failed to export {}", input.display()))?;

    println!("Exported {} strings to {}", count, output.display());
    Ok(())
}

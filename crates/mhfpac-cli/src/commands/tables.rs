//! Tables command: show the pointer table layout.

use std::path::Path;

use anyhow::{Context, Result};
use mhfpac::{DEFAULT_TABLES, PointerIndex};

use super::hex_utils::format_offset;

/// Run the tables command
pub fn run(input: Option<&Path>) -> Result<()> {
    let data = match input {
        Some(path) => {
            Some(std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?)
        }
        None => None,
    };

    println!("{:<12} {:>10} {:>10} {:>6} {:>8}", "table", "start", "end", "slots", "targets");
    for table in &DEFAULT_TABLES {
        let targets = match &data {
            Some(bytes) => PointerIndex::build(bytes, std::slice::from_ref(table))?
                .len()
                .to_string(),
            None => "-".to_string(),
        };
        println!(
            "{:<12} {:>10} {:>10} {:>6} {:>8}",
            table.name.as_str(),
            format_offset(table.start),
            format_offset(table.end),
            table.slot_count(),
            targets
        );
    }

    if let Some(bytes) = &data {
        let index = PointerIndex::build(bytes, &DEFAULT_TABLES)?;
        println!();
        println!(
            "{} slot(s) in bounds, {} distinct target(s)",
            index.slot_count(),
            index.len()
        );
    }

    Ok(())
}

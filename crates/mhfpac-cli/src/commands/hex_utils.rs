//! Hex offset parsing and formatting utilities.

use anyhow::Result;

/// Parse a file offset written as `0x`-prefixed hex or decimal.
pub fn parse_offset_arg(s: &str) -> Result<usize> {
    let s = s.trim();
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => usize::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| anyhow::anyhow!("Invalid offset {:?}: {}", s, e))
}

/// Format an offset the way the string table does.
pub fn format_offset(offset: usize) -> String {
    format!("0x{:08X}", offset)
}

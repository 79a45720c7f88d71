//! Reading edited string tables.

use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, warn};

use crate::csv::{CsvRecord, parse_records};
use crate::error::Result;

/// Replacement text for the string originally at `offset`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditRecord {
    pub offset: u32,
    pub text: String,
}

impl EditRecord {
    pub fn new(offset: u32, text: impl Into<String>) -> Self {
        Self {
            offset,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum MalformedReason {
    TooFewColumns(usize),
    InvalidOffset(String),
}

impl std::fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooFewColumns(n) => write!(f, "expected at least 2 columns, found {}", n),
            Self::InvalidOffset(s) => write!(f, "invalid offset {:?}", s),
        }
    }
}

/// A row that was skipped while reading edits
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MalformedRow {
    pub line: usize,
    pub reason: MalformedReason,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedEdits {
    pub edits: Vec<EditRecord>,
    pub malformed: Vec<MalformedRow>,
}

/// Parse an offset written as `0x`-prefixed hex or decimal.
///
/// # Examples
///
/// ```
/// use mhfpac::edits::parse_offset;
///
/// assert_eq!(parse_offset("0x00000020"), Some(0x20));
/// assert_eq!(parse_offset("0X1F"), Some(0x1F));
/// assert_eq!(parse_offset(" 32 "), Some(32));
/// assert_eq!(parse_offset("1F"), None);
/// ```
pub fn parse_offset(s: &str) -> Option<u32> {
    let s = s.trim();
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => s.parse().ok(),
    }
}

fn is_header(record: &CsvRecord) -> bool {
    record
        .fields
        .first()
        .is_some_and(|first| first.trim().eq_ignore_ascii_case("index"))
}

fn parse_row(record: &CsvRecord) -> std::result::Result<EditRecord, MalformedReason> {
    if record.fields.len() < 2 {
        return Err(MalformedReason::TooFewColumns(record.fields.len()));
    }

    let raw_offset = &record.fields[1];
    let offset = parse_offset(raw_offset)
        .ok_or_else(|| MalformedReason::InvalidOffset(raw_offset.trim().to_string()))?;
    let text = record.fields.get(2).cloned().unwrap_or_default();

    Ok(EditRecord { offset, text })
}

/// Parse `index,offset,text` rows into edits, in row order.
///
/// The header row is optional. Rows that cannot be used are collected in
/// `malformed` instead of failing the whole table.
pub fn parse_edits(input: &str) -> ParsedEdits {
    let records = parse_records(input);
    let skip_header = records.first().is_some_and(is_header);

    let mut parsed = ParsedEdits::default();
    for record in records.iter().skip(usize::from(skip_header)) {
        match parse_row(record) {
            Ok(edit) => parsed.edits.push(edit),
            Err(reason) => {
                warn!("Skipping row at line {}: {}", record.line, reason);
                parsed.malformed.push(MalformedRow {
                    line: record.line,
                    reason,
                });
            }
        }
    }

    debug!(
        "Parsed {} edit row(s), {} malformed",
        parsed.edits.len(),
        parsed.malformed.len()
    );
    parsed
}

/// Read and parse a UTF-8 edits file
pub fn read_edits<P: AsRef<Path>>(path: P) -> Result<ParsedEdits> {
    let content = fs::read_to_string(path)?;
    Ok(parse_edits(&content))
}

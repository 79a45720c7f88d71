//! CSV reading and writing for the string table.
//!
//! Output matches Python's `csv` module defaults (minimal quoting, CRLF rows)
//! so tables round-trip through spreadsheet tools and existing scripts.

use crate::walker::StringRecord;

/// Column names of the exported table
pub const HEADER: [&str; 3] = ["index", "offset", "text"];

/// Trait for string table output formats
pub trait RowFormat {
    /// Returns the header line for the format
    fn header(&self) -> Option<String>;

    /// Format a single string record
    fn format_row(&self, record: &StringRecord) -> String;

    fn line_terminator(&self) -> &'static str {
        "\n"
    }

    /// Format a header plus one line per record
    fn format_rows(&self, records: &[StringRecord]) -> String {
        let mut output = String::new();
        if let Some(header) = self.header() {
            output.push_str(&header);
            output.push_str(self.line_terminator());
        }
        for record in records {
            output.push_str(&self.format_row(record));
            output.push_str(self.line_terminator());
        }
        output
    }
}

/// Comma-separated `index,offset,text` table
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvFormat;

impl RowFormat for CsvFormat {
    fn header(&self) -> Option<String> {
        Some(HEADER.join(","))
    }

    fn format_row(&self, record: &StringRecord) -> String {
        format!(
            "{},0x{:08X},{}",
            record.index,
            record.offset,
            quote_field(&record.text)
        )
    }

    fn line_terminator(&self) -> &'static str {
        "\r\n"
    }
}

/// Quote a field only when it contains a delimiter, quote or line break
pub fn quote_field(field: &str) -> String {
    if field.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// One parsed CSV record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvRecord {
    /// 1-based line where the record starts
    pub line: usize,
    pub fields: Vec<String>,
}

/// Parse CSV text into records. Blank lines produce no record.
///
/// Quoted fields may contain delimiters, doubled quotes and line breaks.
/// A leading UTF-8 byte order mark is ignored.
pub fn parse_records(input: &str) -> Vec<CsvRecord> {
    let input = input.strip_prefix('\u{FEFF}').unwrap_or(input);

    let mut records = Vec::new();
    let mut fields: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut started = false;
    let mut line = 1;
    let mut record_line = 1;

    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if field.is_empty() => {
                in_quotes = true;
                started = true;
            }
            ',' => {
                fields.push(std::mem::take(&mut field));
                started = true;
            }
            '\r' | '\n' => {
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                if started {
                    fields.push(std::mem::take(&mut field));
                    records.push(CsvRecord {
                        line: record_line,
                        fields: std::mem::take(&mut fields),
                    });
                }
                started = false;
                line += 1;
                record_line = line;
            }
            _ => {
                field.push(c);
                started = true;
            }
        }
    }

    if started {
        fields.push(field);
        records.push(CsvRecord {
            line: record_line,
            fields,
        });
    }

    records
}

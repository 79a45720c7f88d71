//! Export and import operations over a whole container.
//!
//! ## Example
//!
//! ```ignore
//! use mhfpac::pac::{ImportOptions, import};
//!
//! let options = ImportOptions::builder()
//!     .tables(mhfpac::parse_table_selection(Some("skills,zskills"))?)
//!     .validate_header(true)
//!     .build();
//! let outcome = import(&original, &edits, &options)?;
//! println!("{} string(s) changed", outcome.report.strings_changed);
//! ```

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::backup::{BackupOutcome, preserve_original};
use crate::csv::{CsvFormat, RowFormat};
use crate::edits::{EditRecord, MalformedRow, read_edits};
use crate::encoding::TextCodec;
use crate::error::Result;
use crate::header::validate_header;
use crate::index::PointerIndex;
use crate::patch::{PatchReport, patch};
use crate::table::{DEFAULT_TABLES, PointerTable};
use crate::walker::{DEFAULT_BLOB_POINTER, StringRecord, blob_start, walk_strings};

/// Options for reading the string table
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub codec: TextCodec,
    /// Header field holding the blob start
    pub blob_pointer: usize,
    pub validate_header: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            codec: TextCodec::default(),
            blob_pointer: DEFAULT_BLOB_POINTER,
            validate_header: false,
        }
    }
}

/// Options for patching edited strings back in
#[derive(Debug, Clone)]
pub struct ImportOptions {
    pub codec: TextCodec,
    /// Tables whose slots may be repointed
    pub tables: Vec<PointerTable>,
    pub validate_header: bool,
    /// Keep `<input>.bak` when patching files
    pub backup: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            codec: TextCodec::default(),
            tables: DEFAULT_TABLES.to_vec(),
            validate_header: false,
            backup: true,
        }
    }
}

impl ImportOptions {
    /// Create a new options builder
    pub fn builder() -> ImportOptionsBuilder {
        ImportOptionsBuilder::default()
    }
}

/// Builder for ImportOptions
#[derive(Debug, Clone, Default)]
pub struct ImportOptionsBuilder {
    codec: Option<TextCodec>,
    tables: Option<Vec<PointerTable>>,
    validate_header: Option<bool>,
    backup: Option<bool>,
}

impl ImportOptionsBuilder {
    pub fn codec(mut self, codec: TextCodec) -> Self {
        self.codec = Some(codec);
        self
    }

    pub fn tables(mut self, tables: Vec<PointerTable>) -> Self {
        self.tables = Some(tables);
        self
    }

    pub fn validate_header(mut self, enabled: bool) -> Self {
        self.validate_header = Some(enabled);
        self
    }

    pub fn backup(mut self, enabled: bool) -> Self {
        self.backup = Some(enabled);
        self
    }

    /// Build the options
    pub fn build(self) -> ImportOptions {
        let default = ImportOptions::default();
        ImportOptions {
            codec: self.codec.unwrap_or(default.codec),
            tables: self.tables.unwrap_or(default.tables),
            validate_header: self.validate_header.unwrap_or(default.validate_header),
            backup: self.backup.unwrap_or(default.backup),
        }
    }
}

/// Patched container and what changed
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    pub output: Vec<u8>,
    pub report: PatchReport,
}

/// Result of a file-level import
#[derive(Debug, Clone)]
pub struct ImportSummary {
    pub report: PatchReport,
    pub malformed: Vec<MalformedRow>,
    pub backup: Option<BackupOutcome>,
    pub input_len: usize,
    pub output_len: usize,
}

/// List every string of the blob. Does not modify `input`.
pub fn export(input: &[u8], options: &ExportOptions) -> Result<Vec<StringRecord>> {
    if options.validate_header {
        validate_header(input)?;
    }

    let start = blob_start(input, options.blob_pointer)?;
    debug!("String blob starts at 0x{:08X}", start);

    Ok(walk_strings(input, start, &options.codec))
}

/// Apply `edits` to a copy of `input`.
///
/// The pointer index is taken from the unmodified input before any edit.
pub fn import(input: &[u8], edits: &[EditRecord], options: &ImportOptions) -> Result<ImportOutcome> {
    if options.validate_header {
        validate_header(input)?;
    }

    let index = PointerIndex::build(input, &options.tables)?;
    let mut output = input.to_vec();
    let report = patch(&mut output, &index, edits, &options.codec)?;

    Ok(ImportOutcome { output, report })
}

/// Export the string table of `input` to a CSV file, returning the row count
pub fn export_file(input: &Path, csv_out: &Path, options: &ExportOptions) -> Result<usize> {
    let data = fs::read(input)?;
    let records = export(&data, options)?;

    fs::write(csv_out, CsvFormat.format_rows(&records))?;
    info!("Exported {} strings to {}", records.len(), csv_out.display());
    Ok(records.len())
}

/// Patch `input` with the edits in `csv_in` and write the result to `output`.
///
/// Nothing is written when a structural error occurs.
pub fn import_file(
    input: &Path,
    csv_in: &Path,
    output: &Path,
    options: &ImportOptions,
) -> Result<ImportSummary> {
    let data = fs::read(input)?;
    let parsed = read_edits(csv_in)?;
    let outcome = import(&data, &parsed.edits, options)?;

    let backup = if options.backup {
        Some(preserve_original(input)?)
    } else {
        None
    };

    fs::write(output, &outcome.output)?;
    info!("Patched: {}", output.display());

    Ok(ImportSummary {
        report: outcome.report,
        malformed: parsed.malformed,
        backup,
        input_len: data.len(),
        output_len: outcome.output.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bytes::{read_u32_le, write_u32_le};
    use crate::error::Error;
    use crate::table::TableName;
    use tempfile::tempdir;

    const MAGIC: [u8; 8] = [0x70, 0x61, 0x63, 0x1A, 0x0A, 0x00, 0x00, 0x00];

    /// Blob at 0x1000: "Log" (0x1000), "Chat Log" (0x1004), "Mail" (0x100D)
    fn container() -> Vec<u8> {
        let mut buf = vec![0u8; 0x1000];
        buf[..8].copy_from_slice(&MAGIC);
        write_u32_le(&mut buf, DEFAULT_BLOB_POINTER, 0x1000).unwrap();
        buf.extend_from_slice(b"Log\0Chat Log\0Mail\0");
        write_u32_le(&mut buf, 0x0A1C, 0x1000).unwrap();
        write_u32_le(&mut buf, 0x0A40, 0x1004).unwrap();
        write_u32_le(&mut buf, 0x0FB8, 0x1004).unwrap();
        write_u32_le(&mut buf, 0x00BC, 0x100D).unwrap();
        buf
    }

    #[test]
    fn test_export() {
        let records = export(&container(), &ExportOptions::default()).unwrap();
        let summary: Vec<(usize, u32, &str)> = records
            .iter()
            .map(|r| (r.index, r.offset, r.text.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![(0, 0x1000, "Log"), (1, 0x1004, "Chat Log"), (2, 0x100D, "Mail")]
        );
    }

    #[test]
    fn test_export_validates_header_when_asked() {
        let mut buf = container();
        buf[0] = 0;
        assert!(export(&buf, &ExportOptions::default()).is_ok());

        let options = ExportOptions {
            validate_header: true,
            ..ExportOptions::default()
        };
        assert!(matches!(
            export(&buf, &options),
            Err(Error::HeaderMismatch { .. })
        ));
    }

    #[test]
    fn test_export_truncated_header() {
        let err = export(&[0u8; 0x100], &ExportOptions::default()).unwrap_err();
        assert!(matches!(err, Error::OutOfBounds { offset: 0x10C, .. }));
    }

    #[test]
    fn test_import_does_not_touch_input() {
        let input = container();
        let snapshot = input.clone();
        let outcome = import(
            &input,
            &[EditRecord::new(0x1004, "History")],
            &ImportOptions::default(),
        )
        .unwrap();

        assert_eq!(input, snapshot);
        assert_eq!(outcome.report.strings_changed, 1);
        assert_eq!(outcome.report.slots_updated, 2);
        let new_offset = snapshot.len() as u32;
        assert_eq!(read_u32_le(&outcome.output, 0x0A40).unwrap(), new_offset);
        assert_eq!(read_u32_le(&outcome.output, 0x0FB8).unwrap(), new_offset);
    }

    #[test]
    fn test_import_respects_table_selection() {
        let input = container();
        let options = ImportOptions::builder()
            .tables(vec![TableName::ZSkills.table()])
            .build();
        let outcome = import(&input, &[EditRecord::new(0x1004, "History")], &options).unwrap();

        assert_eq!(outcome.report.slots_updated, 1);
        // skillActive slot is not selected, so it keeps the old target
        assert_eq!(read_u32_le(&outcome.output, 0x0A40).unwrap(), 0x1004);
        assert_eq!(
            read_u32_le(&outcome.output, 0x0FB8).unwrap(),
            input.len() as u32
        );
    }

    #[test]
    fn test_import_header_gate_precedes_mutation() {
        let mut input = container();
        input[4] = 0x0B;
        let options = ImportOptions::builder().validate_header(true).build();
        let err = import(&input, &[EditRecord::new(0x1000, "Chat")], &options).unwrap_err();
        assert!(matches!(err, Error::HeaderMismatch { .. }));
    }

    #[test]
    fn test_builder_defaults() {
        let options = ImportOptions::builder().build();
        assert_eq!(options.tables, DEFAULT_TABLES.to_vec());
        assert!(!options.validate_header);
        assert!(options.backup);
        assert_eq!(options.codec, TextCodec::default());
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("mhfpac.bin");
        let csv = dir.path().join("strings.csv");
        let output = dir.path().join("patched.bin");
        fs::write(&input, container()).unwrap();

        assert_eq!(export_file(&input, &csv, &ExportOptions::default()).unwrap(), 3);
        let exported = fs::read_to_string(&csv).unwrap();
        assert!(exported.starts_with("index,offset,text\r\n0,0x00001000,Log\r\n"));

        fs::write(&csv, exported.replace(",Mail", ",Letters")).unwrap();
        let summary = import_file(&input, &csv, &output, &ImportOptions::default()).unwrap();

        assert_eq!(summary.report.strings_changed, 1);
        assert_eq!(summary.report.slots_updated, 1);
        assert!(summary.malformed.is_empty());
        assert_eq!(
            summary.backup,
            Some(BackupOutcome::Created(dir.path().join("mhfpac.bin.bak")))
        );

        let patched = fs::read(&output).unwrap();
        assert_eq!(patched.len(), summary.output_len);
        assert_eq!(&patched[summary.input_len..], b"Letters\0");
        assert_eq!(
            read_u32_le(&patched, 0x00BC).unwrap(),
            summary.input_len as u32
        );
    }

    #[test]
    fn test_import_file_failure_writes_nothing() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("bad.bin");
        let csv = dir.path().join("edits.csv");
        let output = dir.path().join("out.bin");
        fs::write(&input, [0u8; 16]).unwrap();
        fs::write(&csv, "0,0x0,x\n").unwrap();

        let options = ImportOptions::builder().validate_header(true).build();
        assert!(import_file(&input, &csv, &output, &options).is_err());
        assert!(!output.exists());
        assert!(!dir.path().join("bad.bin.bak").exists());
    }
}

//! # mhfpac
//!
//! String extraction and patching for MHF BIN/PAC containers.
//!
//! This crate provides:
//! - Export of the null-terminated string blob as an `index,offset,text` table
//! - Import of an edited table by appending new strings and repointing the
//!   fixed pointer tables, leaving every other byte in place
//! - Shift-JIS (cp932) text handling with lossless fallbacks

pub mod backup;
pub mod bytes;
pub mod csv;
pub mod edits;
pub mod encoding;
pub mod error;
pub mod header;
pub mod index;
pub mod pac;
pub mod patch;
pub mod prelude;
pub mod table;
pub mod walker;

pub use backup::{BackupOutcome, backup_path, preserve_original};
pub use bytes::{DecodedString, append_cstring, read_cstring, read_u32_le, write_u32_le};
pub use csv::{CsvFormat, RowFormat};
pub use edits::{EditRecord, MalformedReason, MalformedRow, ParsedEdits, parse_edits, read_edits};
pub use encoding::{DEFAULT_ENCODING, TextCodec};
pub use error::{Error, Result};
pub use header::{EXPECTED_HDR1, EXPECTED_HDR2, validate_header};
pub use index::PointerIndex;
pub use pac::{
    ExportOptions, ImportOptions, ImportOptionsBuilder, ImportOutcome, ImportSummary, export,
    export_file, import, import_file,
};
pub use patch::{PatchReport, Relocation, SkipCounts, SkipReason, patch};
pub use table::{DEFAULT_TABLES, PointerTable, TableName, parse_table_selection};
pub use walker::{DEFAULT_BLOB_POINTER, StringRecord, StringWalker, walk_strings};

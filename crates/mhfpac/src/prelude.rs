//! Prelude module for convenient imports
//!
//! ```ignore
//! use mhfpac::prelude::*;
//! ```
//!
//! This brings the following into scope:
//!
//! - Operations: `export`, `import` and their options
//! - Records: `StringRecord`, `EditRecord`, `PatchReport`
//! - Configuration: `TextCodec`, `PointerTable`, `TableName`
//! - Error handling: `Error`, `Result`

pub use crate::edits::{EditRecord, ParsedEdits};
pub use crate::encoding::TextCodec;
pub use crate::error::{Error, Result};
pub use crate::pac::{ExportOptions, ImportOptions, ImportOutcome, export, import};
pub use crate::patch::PatchReport;
pub use crate::table::{PointerTable, TableName};
pub use crate::walker::StringRecord;

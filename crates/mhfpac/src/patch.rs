//! Append-and-repoint patch engine.
//!
//! Replacement strings are appended to the end of the container and every
//! pointer slot that referenced the original string is rewritten to the new
//! offset. Bytes below the original length never move; only repointed slots
//! change. The original string stays in place, unreferenced.

use serde::Serialize;
use tracing::{debug, info};

use crate::bytes::{append_cstring, read_cstring, write_u32_le};
use crate::edits::EditRecord;
use crate::encoding::TextCodec;
use crate::error::Result;
use crate::index::PointerIndex;

/// Why an edit did not change the container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Offset at or past the end of the container
    OutOfRange,
    /// New text equals the current text
    Unchanged,
    /// No pointer slot referenced the offset when the index was built
    NoReferencingPointers,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SkipCounts {
    pub out_of_range: usize,
    pub unchanged: usize,
    pub no_referencing_pointers: usize,
}

impl SkipCounts {
    fn record(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::OutOfRange => self.out_of_range += 1,
            SkipReason::Unchanged => self.unchanged += 1,
            SkipReason::NoReferencingPointers => self.no_referencing_pointers += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.out_of_range + self.unchanged + self.no_referencing_pointers
    }
}

/// One string moved to the end of the container
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Relocation {
    pub original_offset: u32,
    pub new_offset: u32,
    pub slots: Vec<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PatchReport {
    /// Edits that appended a string
    pub strings_changed: usize,
    /// Distinct slots rewritten, summed over changed strings
    pub slots_updated: usize,
    pub skipped: SkipCounts,
    pub relocations: Vec<Relocation>,
}

/// Apply `edits` in order to `buf`.
///
/// `index` must have been built from `buf` before any edit was applied.
/// Current text is re-read from the live buffer for each edit, so a repeated
/// offset compares against what is there now, while slot lookup always uses
/// the original index.
pub fn patch(
    buf: &mut Vec<u8>,
    index: &PointerIndex,
    edits: &[EditRecord],
    codec: &TextCodec,
) -> Result<PatchReport> {
    let original_len = buf.len();
    let mut report = PatchReport::default();

    for edit in edits {
        match apply_edit(buf, index, edit, codec)? {
            Ok(relocation) => {
                report.strings_changed += 1;
                report.slots_updated += relocation.slots.len();
                report.relocations.push(relocation);
            }
            Err(reason) => {
                debug!("Skipping edit at 0x{:08X}: {:?}", edit.offset, reason);
                report.skipped.record(reason);
            }
        }
    }

    info!(
        "Patched {} string(s), {} pointer slot(s), grew 0x{:X} -> 0x{:X}",
        report.strings_changed,
        report.slots_updated,
        original_len,
        buf.len()
    );
    Ok(report)
}

fn apply_edit(
    buf: &mut Vec<u8>,
    index: &PointerIndex,
    edit: &EditRecord,
    codec: &TextCodec,
) -> Result<std::result::Result<Relocation, SkipReason>> {
    let offset = edit.offset as usize;
    if offset >= buf.len() {
        return Ok(Err(SkipReason::OutOfRange));
    }

    let current = read_cstring(buf, offset, codec);
    if current.text == edit.text {
        return Ok(Err(SkipReason::Unchanged));
    }

    let slots = index.slots_for(edit.offset);
    if slots.is_empty() {
        return Ok(Err(SkipReason::NoReferencingPointers));
    }

    let new_offset = append_cstring(buf, &edit.text, codec)?;

    // Overlapping tables list some slots more than once; each is written once
    let mut written: Vec<usize> = Vec::with_capacity(slots.len());
    for &slot in slots {
        if written.contains(&slot) {
            continue;
        }
        write_u32_le(buf, slot, new_offset)?;
        written.push(slot);
    }

    debug!(
        "Relocated 0x{:08X} -> 0x{:08X} ({} slot(s)): {:?} -> {:?}",
        edit.offset,
        new_offset,
        written.len(),
        current.text,
        edit.text
    );

    Ok(Ok(Relocation {
        original_offset: edit.offset,
        new_offset,
        slots: written,
    }))
}

//! Reverse index from string offsets to the pointer slots that reference them.

use std::collections::HashMap;

use tracing::debug;

use crate::bytes::{WORD, read_u32_le};
use crate::error::Result;
use crate::table::PointerTable;

/// Target offset -> slot offsets, in scan order.
///
/// Built once from the unmodified container; the patch engine resolves every
/// edit against this snapshot.
#[derive(Debug, Clone, Default)]
pub struct PointerIndex {
    entries: HashMap<u32, Vec<usize>>,
    slot_count: usize,
}

impl PointerIndex {
    /// Scan every in-bounds slot of `tables`, in the given order.
    ///
    /// Slots that straddle the end of the buffer are skipped. Overlapping
    /// tables contribute duplicate slot entries.
    pub fn build(buf: &[u8], tables: &[PointerTable]) -> Result<Self> {
        let mut index = Self::default();

        for table in tables {
            let mut scanned = 0usize;
            for slot in table.slots() {
                if slot + WORD > buf.len() {
                    break;
                }
                let target = read_u32_le(buf, slot)?;
                index.entries.entry(target).or_default().push(slot);
                scanned += 1;
            }
            index.slot_count += scanned;
            debug!(
                "Scanned table {} [0x{:04X}..0x{:04X}): {} slot(s)",
                table.name, table.start, table.end, scanned
            );
        }

        debug!(
            "Pointer index: {} slot(s), {} distinct target(s)",
            index.slot_count,
            index.entries.len()
        );
        Ok(index)
    }

    /// Slots whose value was `target` when the index was built
    pub fn slots_for(&self, target: u32) -> &[usize] {
        self.entries.get(&target).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, target: u32) -> bool {
        self.entries.contains_key(&target)
    }

    /// Number of distinct targets
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total slot entries, duplicates from overlapping tables included
    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    /// Distinct targets in ascending order
    pub fn targets(&self) -> Vec<u32> {
        let mut targets: Vec<u32> = self.entries.keys().copied().collect();
        targets.sort_unstable();
        targets
    }
}

//! Sequential scan of the string blob.

use serde::Serialize;

use crate::bytes::{read_cstring, read_u32_le};
use crate::encoding::TextCodec;
use crate::error::Result;

/// Header field holding the absolute offset of the string blob
pub const DEFAULT_BLOB_POINTER: usize = 0x10C;

/// A string found in the blob
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StringRecord {
    pub index: usize,
    pub offset: u32,
    pub text: String,
}

/// Read the blob start from the header pointer field
pub fn blob_start(buf: &[u8], pointer_offset: usize) -> Result<usize> {
    Ok(read_u32_le(buf, pointer_offset)? as usize)
}

/// Iterator over consecutive null-terminated strings starting at a blob origin
pub struct StringWalker<'a> {
    buf: &'a [u8],
    codec: &'a TextCodec,
    cursor: usize,
    index: usize,
}

impl<'a> StringWalker<'a> {
    pub fn new(buf: &'a [u8], start: usize, codec: &'a TextCodec) -> Self {
        Self {
            buf,
            codec,
            cursor: start,
            index: 0,
        }
    }
}

impl Iterator for StringWalker<'_> {
    type Item = StringRecord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.buf.len() {
            return None;
        }

        let start = self.cursor;
        // Offsets past u32 cannot be referenced by a pointer slot
        let offset = u32::try_from(start).ok()?;
        let s = read_cstring(self.buf, start, self.codec);

        // Stop on the next call if the cursor would not advance
        self.cursor = if s.next_offset <= start {
            self.buf.len()
        } else {
            s.next_offset
        };

        let record = StringRecord {
            index: self.index,
            offset,
            text: s.text,
        };
        self.index += 1;
        Some(record)
    }
}

/// Materialize every string from `start` to the end of the buffer
pub fn walk_strings(buf: &[u8], start: usize, codec: &TextCodec) -> Vec<StringRecord> {
    StringWalker::new(buf, start, codec).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn container_with_blob(blob: &[u8]) -> Vec<u8> {
        let mut buf = vec![0u8; 0x120];
        buf[DEFAULT_BLOB_POINTER..DEFAULT_BLOB_POINTER + 4]
            .copy_from_slice(&0x120u32.to_le_bytes());
        buf.extend_from_slice(blob);
        buf
    }

    #[test]
    fn test_blob_start() {
        let buf = container_with_blob(b"Log\0");
        assert_eq!(blob_start(&buf, DEFAULT_BLOB_POINTER).unwrap(), 0x120);
        assert!(blob_start(&buf[..0x10E], DEFAULT_BLOB_POINTER).is_err());
    }

    #[test]
    fn test_walk_strings() {
        let codec = TextCodec::default();
        let buf = container_with_blob(b"Log\0Chat Log\0\0Mail\0");
        let records = walk_strings(&buf, 0x120, &codec);

        let summary: Vec<(usize, u32, &str)> = records
            .iter()
            .map(|r| (r.index, r.offset, r.text.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (0, 0x120, "Log"),
                (1, 0x124, "Chat Log"),
                (2, 0x12D, ""),
                (3, 0x12E, "Mail"),
            ]
        );
    }

    #[test]
    fn test_walk_unterminated_tail() {
        let codec = TextCodec::default();
        let buf = container_with_blob(b"Log\0tail");
        let records = walk_strings(&buf, 0x120, &codec);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].text, "tail");
        assert_eq!(records[1].offset, 0x124);
    }

    #[test]
    fn test_walk_start_past_end() {
        let codec = TextCodec::default();
        let buf = container_with_blob(b"Log\0");
        assert!(walk_strings(&buf, buf.len(), &codec).is_empty());
        assert!(walk_strings(&buf, usize::MAX, &codec).is_empty());
    }

    #[test]
    fn test_walker_is_restartable() {
        let codec = TextCodec::default();
        let buf = container_with_blob(b"A\0B\0");
        let first: Vec<_> = StringWalker::new(&buf, 0x120, &codec).collect();
        let second: Vec<_> = StringWalker::new(&buf, 0x120, &codec).collect();
        assert_eq!(first, second);
    }
}

//! Bounds-checked access to the container buffer.

use memchr::memchr;

use crate::encoding::TextCodec;
use crate::error::{Error, Result};

/// Pointer word size (32-bit little-endian)
pub const WORD: usize = 4;

/// A decoded null-terminated string and the position after its terminator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedString {
    pub text: String,
    pub next_offset: usize,
}

fn check_word(len: usize, offset: usize) -> Result<()> {
    match offset.checked_add(WORD) {
        Some(end) if end <= len => Ok(()),
        _ => Err(Error::OutOfBounds { offset, len }),
    }
}

pub fn read_u32_le(buf: &[u8], offset: usize) -> Result<u32> {
    check_word(buf.len(), offset)?;
    Ok(u32::from_le_bytes([
        buf[offset],
        buf[offset + 1],
        buf[offset + 2],
        buf[offset + 3],
    ]))
}

pub fn write_u32_le(buf: &mut [u8], offset: usize, value: u32) -> Result<()> {
    check_word(buf.len(), offset)?;
    buf[offset..offset + WORD].copy_from_slice(&value.to_le_bytes());
    Ok(())
}

/// Read the string starting at `offset` up to a zero byte or the end of the buffer.
///
/// An `offset` at or past the end yields an empty string with
/// `next_offset == buf.len()`, so callers stop when the cursor does not advance.
pub fn read_cstring(buf: &[u8], offset: usize, codec: &TextCodec) -> DecodedString {
    let len = buf.len();
    if offset >= len {
        return DecodedString {
            text: String::new(),
            next_offset: len,
        };
    }

    let end = memchr(0, &buf[offset..]).map_or(len, |pos| offset + pos);
    DecodedString {
        text: codec.decode(&buf[offset..end]),
        next_offset: (end + 1).min(len),
    }
}

/// Append `text` plus a terminator to the end of `buf`, returning where it starts.
pub fn append_cstring(buf: &mut Vec<u8>, text: &str, codec: &TextCodec) -> Result<u32> {
    let start = buf.len();
    let offset = u32::try_from(start).map_err(|_| Error::OffsetOverflow(start))?;

    let encoded = codec.encode(text);
    buf.reserve(encoded.len() + 1);
    buf.extend_from_slice(&encoded);
    buf.push(0);
    Ok(offset)
}

//! Container magic check.

use crate::bytes::read_u32_le;
use crate::error::{Error, Result};

/// First header word, "pac\x1A"
pub const EXPECTED_HDR1: u32 = 0x1A636170;
/// Second header word
pub const EXPECTED_HDR2: u32 = 0x0000000A;

/// Fail unless the words at 0x00 and 0x04 carry the expected magic
pub fn validate_header(buf: &[u8]) -> Result<()> {
    let h1 = read_u32_le(buf, 0x00)?;
    let h2 = read_u32_le(buf, 0x04)?;

    if h1 != EXPECTED_HDR1 || h2 != EXPECTED_HDR2 {
        return Err(Error::HeaderMismatch {
            found: [h1, h2],
            expected: [EXPECTED_HDR1, EXPECTED_HDR2],
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_header() {
        let buf = [0x70, 0x61, 0x63, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0xFF];
        assert!(validate_header(&buf).is_ok());
    }

    #[test]
    fn test_mismatched_header() {
        let buf = [0x70, 0x61, 0x63, 0x1A, 0x0B, 0x00, 0x00, 0x00];
        match validate_header(&buf) {
            Err(Error::HeaderMismatch { found, .. }) => {
                assert_eq!(found, [EXPECTED_HDR1, 0x0B]);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_short_header() {
        assert!(matches!(
            validate_header(&[0x70, 0x61, 0x63, 0x1A]),
            Err(Error::OutOfBounds { offset: 4, len: 4 })
        ));
    }
}

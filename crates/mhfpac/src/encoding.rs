//! Text codec for container strings.
//!
//! Decoding never fails: the primary encoding is tried strictly first, then
//! Latin-1 (every byte maps to one char), then lossy UTF-8. Encoding replaces
//! characters the target encoding cannot represent with `?`.

use encoding_rs::{EncoderResult, Encoding, SHIFT_JIS, UTF_8, WINDOWS_1252};
use tracing::trace;

use crate::error::{Error, Result};

/// Encoding used by the game client (Shift-JIS, Windows code page 932)
pub const DEFAULT_ENCODING: &str = "cp932";

/// Byte written in place of characters the target encoding cannot represent
const REPLACEMENT_BYTE: u8 = b'?';

/// One step of the decode fallback chain
#[derive(Debug, Clone, Copy)]
pub enum DecodeStrategy {
    /// Decode with the given encoding, failing on malformed input
    Strict(&'static Encoding),
    /// Map each byte to the code point of the same value
    Latin1,
    /// UTF-8 with U+FFFD for undecodable sequences
    Lossy,
}

impl DecodeStrategy {
    pub fn try_decode(&self, bytes: &[u8]) -> Option<String> {
        match self {
            Self::Strict(encoding) => encoding
                .decode_without_bom_handling_and_without_replacement(bytes)
                .map(|s| s.into_owned()),
            Self::Latin1 => Some(bytes.iter().map(|&b| b as char).collect()),
            Self::Lossy => Some(String::from_utf8_lossy(bytes).into_owned()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextCodec {
    encoding: &'static Encoding,
}

impl Default for TextCodec {
    fn default() -> Self {
        Self::new(SHIFT_JIS)
    }
}

impl TextCodec {
    pub fn new(encoding: &'static Encoding) -> Self {
        Self { encoding }
    }

    /// Resolve an encoding label such as `cp932`, `shift_jis` or `utf-8`
    pub fn from_label(label: &str) -> Result<Self> {
        let normalized = label.trim().to_ascii_lowercase();
        let encoding = match normalized.as_str() {
            "cp932" | "ms932" | "windows-932" | "windows_932" => Some(SHIFT_JIS),
            "cp1252" => Some(WINDOWS_1252),
            "utf8" => Some(UTF_8),
            other => Encoding::for_label(other.as_bytes()),
        };

        encoding
            .map(Self::new)
            .ok_or_else(|| Error::UnknownEncoding(label.to_string()))
    }

    pub fn name(&self) -> &'static str {
        self.encoding.name()
    }

    /// The decode fallback chain, in priority order. The last entry never fails.
    pub fn chain(&self) -> [DecodeStrategy; 3] {
        [
            DecodeStrategy::Strict(self.encoding),
            DecodeStrategy::Latin1,
            DecodeStrategy::Lossy,
        ]
    }

    pub fn decode(&self, bytes: &[u8]) -> String {
        for (step, strategy) in self.chain().iter().enumerate() {
            if let Some(text) = strategy.try_decode(bytes) {
                if step > 0 {
                    trace!(
                        "Decoded {} bytes with fallback {:?} (primary {})",
                        bytes.len(),
                        strategy,
                        self.name()
                    );
                }
                return text;
            }
        }
        String::from_utf8_lossy(bytes).into_owned()
    }

    pub fn encode(&self, text: &str) -> Vec<u8> {
        let mut encoder = self.encoding.new_encoder();
        let mut out = Vec::with_capacity(text.len() + 4);
        let mut chunk = [0u8; 1024];
        let mut src = text;

        loop {
            let (result, read, written) =
                encoder.encode_from_utf8_without_replacement(src, &mut chunk, true);
            out.extend_from_slice(&chunk[..written]);
            src = &src[read..];
            match result {
                EncoderResult::InputEmpty => break,
                EncoderResult::OutputFull => {}
                EncoderResult::Unmappable(ch) => {
                    trace!("Unmappable character {:?} in {}", ch, self.name());
                    out.push(REPLACEMENT_BYTE);
                }
            }
        }

        out
    }
}

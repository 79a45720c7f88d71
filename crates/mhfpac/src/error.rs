use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Access out of bounds at offset {offset:#X} (buffer length {len:#X})")]
    OutOfBounds { offset: usize, len: usize },

    #[error(
        "Header mismatch: h1={:#010X} h2={:#010X} (expected {:#010X} {:#010X})",
        .found[0], .found[1], .expected[0], .expected[1]
    )]
    HeaderMismatch { found: [u32; 2], expected: [u32; 2] },

    #[error("Unknown table '{name}'. Valid: {valid}")]
    UnknownTable { name: String, valid: String },

    #[error("Unknown encoding: {0}")]
    UnknownEncoding(String),

    #[error("Container too large for 32-bit pointers: {0:#X} bytes")]
    OffsetOverflow(usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error is a "file not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }

    /// Structural errors mean the container or configuration cannot be trusted
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Error::OutOfBounds { .. }
                | Error::HeaderMismatch { .. }
                | Error::UnknownTable { .. }
                | Error::OffsetOverflow(_)
        )
    }
}

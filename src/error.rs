//! Standard errors that may occur when coding and framing bits.

use thiserror::Error;

/// Codec runtime errors.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum FecError {
    /// No supported code has the requested codeword length or index.
    #[error("unsupported code")]
    UnsupportedCode,
    /// A value doesn't fit in its 16-bit header field.
    #[error("value out of range for 16-bit header field")]
    ValueOutOfRange,
    /// The decoded header names a code that doesn't exist.
    #[error("corrupted frame header")]
    HeaderCorrupt,
    /// The syndrome of a received word matches no single-bit error pattern.
    #[error("uncorrectable codeword")]
    UncorrectableBlock,
    /// Not enough bits to decode a full header or to tile the payload into codewords.
    #[error("frame truncated")]
    FrameTruncated,
    /// A user-supplied code table failed validation.
    #[error("invalid code table")]
    InvalidCodeTable,
}

/// Standard result using `FecError`.
pub type Result<T> = std::result::Result<T, FecError>;

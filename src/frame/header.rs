//! Frame header generation and coding.
//!
//! A header is a 16-bit payload length followed by a 16-bit payload code index, both MSB
//! first. It is always coded with the lowest-rate code, so it can be decoded before the
//! payload code is known.

use collect_slice::CollectSlice;

use crate::bits::{self, Unpack};
use crate::coding::decoder::Decoder;
use crate::coding::encoder::Encoder;
use crate::coding::table::{CodeId, CodeTable};
use crate::consts::{HEADER_BITS, HEADER_CODE, HEADER_CODED_BITS, LENGTH_BITS, INDEX_BITS};
use crate::error::{FecError, Result};
use crate::stats::{DecodeObserver, NullObserver};

/// Describes the payload that follows it in a frame.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "ser", derive(Serialize, Deserialize))]
pub struct Header {
    /// Number of uncoded payload bits.
    payload_len: u16,
    /// Index of the code used for the payload.
    code: u16,
}

impl Header {
    /// Construct a new `Header`, or `ValueOutOfRange` if either field doesn't fit in 16
    /// bits.
    pub fn new(payload_len: usize, code: usize) -> Result<Header> {
        if payload_len >> LENGTH_BITS != 0 || code >> INDEX_BITS != 0 {
            return Err(FecError::ValueOutOfRange);
        }

        Ok(Header {
            payload_len: payload_len as u16,
            code: code as u16,
        })
    }

    /// Parse a header from the given 32 uncoded bits.
    pub fn from_bits(buf: &[u8; HEADER_BITS]) -> Header {
        Header {
            payload_len: bits::pack(&buf[..LENGTH_BITS]),
            code: bits::pack(&buf[LENGTH_BITS..]),
        }
    }

    /// Get the 32 uncoded bits of the header.
    pub fn to_bits(&self) -> [u8; HEADER_BITS] {
        let mut buf = [0; HEADER_BITS];

        Unpack::new(self.payload_len, LENGTH_BITS)
            .chain(Unpack::new(self.code, INDEX_BITS))
            .collect_slice_checked(&mut buf[..]);

        buf
    }

    /// Number of uncoded payload bits.
    pub fn payload_len(&self) -> usize { self.payload_len as usize }

    /// Raw payload code index, which may not name a supported code.
    pub fn code_index(&self) -> usize { self.code as usize }

    /// Get the payload code, or `HeaderCorrupt` if the index names no built-in code.
    pub fn code(&self) -> Result<CodeId> {
        CodeId::from_index(self.code_index()).map_err(|_| FecError::HeaderCorrupt)
    }
}

/// Build the uncoded header describing a payload of the given length and code index.
pub fn build_header(payload_len: usize, code: usize) -> Result<[u8; HEADER_BITS]> {
    Header::new(payload_len, code).map(|h| h.to_bits())
}

/// Code the given header with the header code.
pub fn encode_header(header: &[u8; HEADER_BITS]) -> Vec<u8> {
    let coded = Encoder::new(HEADER_CODE.code()).encode(&header[..]);
    debug_assert!(coded.len() == HEADER_CODED_BITS);
    coded
}

/// Decode a header from the start of the given bits.
///
/// Return `FrameTruncated` if there are fewer bits than a coded header and
/// `HeaderCorrupt` if the header names an unknown payload code.
pub fn decode_header(bits: &[u8]) -> Result<Header> {
    decode_header_with(bits, NullObserver)
}

/// Decode a header from the start of the given bits, reporting each header word to the
/// given observer.
pub fn decode_header_with<O: DecodeObserver>(bits: &[u8], observer: O) -> Result<Header> {
    if bits.len() < HEADER_CODED_BITS {
        return Err(FecError::FrameTruncated);
    }

    let data = Decoder::with_observer(HEADER_CODE.code(), observer)
        .decode(&bits[..HEADER_CODED_BITS])?;

    let mut buf = [0; HEADER_BITS];
    data.iter().cloned().collect_slice_checked(&mut buf[..]);

    let header = Header::from_bits(&buf);

    if header.code_index() >= CodeTable::standard().len() {
        return Err(FecError::HeaderCorrupt);
    }

    Ok(header)
}

//! Assembly of outgoing frames.

use log::{debug, trace};

use crate::bits;
use crate::coding::encoder::Encoder;
use crate::coding::table::{CodeId, CodeTable};
use crate::consts::MAX_PAYLOAD_BITS;
use crate::frame::header::{build_header, encode_header};
use crate::error::{FecError, Result};

/// Builds frames whose payload is coded with a fixed code.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct FrameAssembler {
    code: CodeId,
}

impl FrameAssembler {
    /// Construct a new `FrameAssembler` that codes payloads with the given code.
    pub fn new(code: CodeId) -> FrameAssembler {
        FrameAssembler { code: code }
    }

    /// Construct a new `FrameAssembler` that codes payloads with the built-in code of the
    /// given codeword length, or `UnsupportedCode` if there is none.
    pub fn for_length(n: usize) -> Result<FrameAssembler> {
        let p = CodeTable::standard().params_by_length(n)?;
        CodeId::from_index(p.index()).map(FrameAssembler::new)
    }

    pub fn code(&self) -> CodeId { self.code }

    /// Build a frame carrying the given data bits: the coded header followed by the coded
    /// payload.
    ///
    /// Return `ValueOutOfRange` if the data has more bits than the header can describe.
    pub fn build(&self, data: &[u8]) -> Result<Vec<u8>> {
        if data.len() > MAX_PAYLOAD_BITS {
            debug!("payload of {} bits exceeds header length field", data.len());
            return Err(FecError::ValueOutOfRange);
        }

        let header = build_header(data.len(), self.code.index())?;
        let payload = Encoder::new(self.code.code()).encode(data);

        trace!("framing {} bits with {:?} and {} pad bits", data.len(), self.code,
               bits::padding(data.len(), self.code.data_bits()));

        let mut frame = encode_header(&header);
        frame.extend(payload);

        Ok(frame)
    }
}

/// Build a frame carrying the given data bits, with the payload coded by the built-in
/// code at the given index.
pub fn build_frame(data: &[u8], code: usize) -> Result<Vec<u8>> {
    CodeId::from_index(code).and_then(|c| FrameAssembler::new(c).build(data))
}

/// Build a frame carrying the given data bits, with the payload coded by the built-in
/// code of the given codeword length.
pub fn build_frame_by_length(data: &[u8], n: usize) -> Result<Vec<u8>> {
    FrameAssembler::for_length(n).and_then(|a| a.build(data))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::consts::HEADER_CODED_BITS;
    use crate::frame::header::decode_header;

    #[test]
    fn test_build() {
        let f = build_frame(&[0, 1, 1, 0, 1], 1).unwrap();
        assert_eq!(f.len(), HEADER_CODED_BITS + 14);
        assert_eq!(&f[HEADER_CODED_BITS..], &[
            1, 0, 0, 0, 1, 1, 0,
            1, 1, 0, 1, 0, 0, 0,
        ][..]);

        let h = decode_header(&f).unwrap();
        assert_eq!(h.payload_len(), 5);
        assert_eq!(h.code(), Ok(CodeId::Hamming7_4));
    }

    #[test]
    fn test_empty() {
        for code in 0..4 {
            let f = build_frame(&[], code).unwrap();
            assert_eq!(f.len(), HEADER_CODED_BITS);
            assert_eq!(decode_header(&f).unwrap().payload_len(), 0);
        }
    }

    #[test]
    fn test_by_length() {
        let data = [1, 1, 1, 0, 0, 1, 0];

        for &id in CodeId::ALL.iter() {
            assert_eq!(build_frame_by_length(&data, id.word_bits()),
                       build_frame(&data, id.index()));
            assert_eq!(FrameAssembler::for_length(id.word_bits()).unwrap().code(), id);
        }

        assert_eq!(build_frame_by_length(&data, 1), Err(FecError::UnsupportedCode));
        assert_eq!(build_frame_by_length(&data, 32), Err(FecError::UnsupportedCode));
    }

    #[test]
    fn test_errors() {
        assert_eq!(build_frame(&[1, 0], 4), Err(FecError::UnsupportedCode));

        let big = vec![0; MAX_PAYLOAD_BITS + 1];
        assert_eq!(build_frame(&big, 3), Err(FecError::ValueOutOfRange));
        assert_eq!(FrameAssembler::new(CodeId::Repetition3_1).build(&big),
                   Err(FecError::ValueOutOfRange));
        assert_eq!(build_frame_by_length(&big, 7), Err(FecError::ValueOutOfRange));

        let max = vec![1; MAX_PAYLOAD_BITS];
        assert_eq!(build_frame(&max, 3).unwrap().len(),
                   HEADER_CODED_BITS + (MAX_PAYLOAD_BITS + 25) / 26 * 31);
    }
}

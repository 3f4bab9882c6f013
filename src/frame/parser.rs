//! Parsing of received frames.

use log::debug;

use crate::coding::decoder::Decoder;
use crate::consts::HEADER_CODED_BITS;
use crate::error::{FecError, Result};
use crate::frame::header::decode_header_with;
use crate::stats::{DecodeObserver, HasStats, NullObserver, Stats};

/// Recovers data bits from received frames, reporting every header and payload word to an
/// observer.
pub struct FrameParser<O: DecodeObserver = NullObserver> {
    observer: O,
}

impl FrameParser {
    /// Construct a new `FrameParser` that reports to no one.
    pub fn new() -> FrameParser {
        FrameParser::with_observer(NullObserver)
    }
}

impl Default for FrameParser {
    fn default() -> Self { FrameParser::new() }
}

impl<O: DecodeObserver> FrameParser<O> {
    /// Construct a new `FrameParser` that reports to the given observer.
    pub fn with_observer(observer: O) -> FrameParser<O> {
        FrameParser { observer: observer }
    }

    pub fn observer(&mut self) -> &mut O { &mut self.observer }

    pub fn into_observer(self) -> O { self.observer }

    /// Parse the given frame bits, correcting up to 1 error per codeword, and return the
    /// data bits it carries.
    ///
    /// Return `FrameTruncated` if the frame is too short for its header or its payload
    /// doesn't tile into codewords, `HeaderCorrupt` if the header names an unknown code,
    /// and `UncorrectableBlock` if any codeword can't be corrected.
    pub fn parse(&mut self, frame: &[u8]) -> Result<Vec<u8>> {
        if frame.len() < HEADER_CODED_BITS {
            debug!("frame of {} bits is too short for header", frame.len());
            return Err(FecError::FrameTruncated);
        }

        let (head, payload) = frame.split_at(HEADER_CODED_BITS);
        let header = decode_header_with(head, &mut self.observer)?;
        let code = header.code()?;

        let mut data = Decoder::with_observer(code.code(), &mut self.observer)
            .decode(payload)?;

        if data.len() < header.payload_len() {
            debug!("payload of {} bits is shorter than declared {} bits", data.len(),
                   header.payload_len());
            return Err(FecError::FrameTruncated);
        }

        data.truncate(header.payload_len());

        Ok(data)
    }
}

impl HasStats for FrameParser<Stats> {
    fn stats(&mut self) -> &mut Stats { &mut self.observer }
}

/// Parse the given frame bits and return the data bits it carries.
pub fn parse_frame(frame: &[u8]) -> Result<Vec<u8>> {
    FrameParser::new().parse(frame)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::coding::table::CodeId;
    use crate::frame::assembler::build_frame;
    use crate::frame::header::{build_header, encode_header};

    #[test]
    fn test_scenario() {
        let data = [0, 1, 1, 0, 1];
        let f = build_frame(&data, 1).unwrap();

        assert_eq!(parse_frame(&f).unwrap(), data.to_vec());

        for p in 0..f.len() {
            let mut w = f.clone();
            w[p] ^= 1;
            assert_eq!(parse_frame(&w).unwrap(), data.to_vec());
        }
    }

    #[test]
    fn test_empty() {
        for code in 0..4 {
            let f = build_frame(&[], code).unwrap();
            assert_eq!(parse_frame(&f), Ok(vec![]));
        }
    }

    #[test]
    fn test_stats() {
        let data = [1, 0, 0, 1, 1, 1, 0, 1, 0, 1, 1, 0];
        let mut f = build_frame(&data, 2).unwrap();
        f[4] ^= 1;
        f[HEADER_CODED_BITS + 3] ^= 1;

        let mut parser = FrameParser::with_observer(Stats::default());
        assert_eq!(parser.parse(&f).unwrap(), data.to_vec());
        assert_eq!(parser.parse(&f).unwrap(), data.to_vec());

        let mut total = Stats::default();
        total.merge(&mut parser);

        let header = total.code(CodeId::Repetition3_1.index()).unwrap();
        assert_eq!(header.words(), 64);
        assert_eq!(header.fixed(), 2);

        let payload = total.code(CodeId::Hamming15_11.index()).unwrap();
        assert_eq!(payload.words(), 4);
        assert_eq!(payload.fixed(), 2);
        assert_eq!(payload.errors(), 0);

        assert_eq!(parser.stats(), &Stats::default());
    }

    #[test]
    fn test_truncated() {
        let f = build_frame(&[1, 0, 1, 1, 1, 0, 0, 1], 1).unwrap();

        assert_eq!(parse_frame(&f[..HEADER_CODED_BITS - 1]), Err(FecError::FrameTruncated));
        assert_eq!(parse_frame(&f[..f.len() - 1]), Err(FecError::FrameTruncated));
        // Whole words missing.
        assert_eq!(parse_frame(&f[..f.len() - 7]), Err(FecError::FrameTruncated));
        assert_eq!(parse_frame(&f[..HEADER_CODED_BITS]), Err(FecError::FrameTruncated));
        assert_eq!(parse_frame(&[]), Err(FecError::FrameTruncated));
    }

    #[test]
    fn test_corrupt_header() {
        let mut f = encode_header(&build_header(3, 5).unwrap());
        f.extend_from_slice(&[1, 1, 1, 1, 1, 1, 1]);
        assert_eq!(parse_frame(&f), Err(FecError::HeaderCorrupt));
    }

    #[test]
    fn test_misdecoded_header() {
        let mut f = build_frame(&[1, 1], 0).unwrap();
        // Two errors in the word carrying the code index LSB select the (7, 4) code,
        // which the 6 payload bits can't tile.
        f[93] ^= 1;
        f[94] ^= 1;
        assert_eq!(parse_frame(&f), Err(FecError::FrameTruncated));
    }
}

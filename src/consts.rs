use crate::coding::table::CodeId;

/// Number of bits in the payload length header field.
pub const LENGTH_BITS: usize = 16;
/// Number of bits in the payload code index header field.
pub const INDEX_BITS: usize = 16;
/// Number of bits in an uncoded header.
pub const HEADER_BITS: usize = LENGTH_BITS + INDEX_BITS;
/// Code used for the header of every frame, the lowest-rate supported code.
pub const HEADER_CODE: CodeId = CodeId::Repetition3_1;
/// Number of bits in a coded header.
pub const HEADER_CODED_BITS: usize =
    (HEADER_BITS + HEADER_CODE.data_bits() - 1) / HEADER_CODE.data_bits() *
        HEADER_CODE.word_bits();
/// Maximum number of payload bits a frame can describe.
pub const MAX_PAYLOAD_BITS: usize = (1 << LENGTH_BITS) - 1;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn validate_params() {
        assert_eq!(HEADER_BITS, 32);
        assert_eq!(HEADER_CODED_BITS, 96);
        assert_eq!(MAX_PAYLOAD_BITS, 65535);
        // Header must tile into whole header-code blocks.
        assert!(HEADER_BITS % HEADER_CODE.data_bits() == 0);
    }
}

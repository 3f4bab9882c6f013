//! Encoding of arbitrary-length bit sequences into concatenated codewords.

use collect_slice::CollectSlice;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::bits::{self, Unpack};
use crate::coding::code::{BlockCode, CodeParameters};
use crate::coding::table::CodeTable;
use crate::error::Result;

/// Encodes bit sequences with a single code.
#[derive(Copy, Clone, Debug)]
pub struct Encoder<'a> {
    code: &'a BlockCode,
}

impl<'a> Encoder<'a> {
    /// Construct a new `Encoder` for the given code.
    pub fn new(code: &'a BlockCode) -> Encoder<'a> {
        Encoder { code: code }
    }

    pub fn params(&self) -> CodeParameters { self.code.params() }

    /// Number of coded bits produced for `len` data bits.
    pub fn encoded_len(&self, len: usize) -> usize {
        let p = self.code.params();
        bits::padded_blocks(len, p.k()) * p.n()
    }

    /// Encode the given data bits.
    ///
    /// The data is padded with zeros on the right to a multiple of `k` bits, split into
    /// `k`-bit blocks, and each block is coded into an `n`-bit codeword. Codewords are
    /// concatenated in block order.
    pub fn encode(&self, data: &[u8]) -> Vec<u8> {
        let n = self.code.params().n();
        let words = encode_words(self.code, data);

        let mut coded = vec![0; words.len() * n];

        for (&word, chunk) in words.iter().zip(coded.chunks_mut(n)) {
            Unpack::new(word, n).collect_slice_checked(chunk);
        }

        coded
    }
}

#[cfg(not(feature = "parallel"))]
fn encode_words(code: &BlockCode, data: &[u8]) -> Vec<u32> {
    bits::Blocks::new(data, code.params().k())
        .map(|block| code.encode_word(block))
        .collect()
}

#[cfg(feature = "parallel")]
fn encode_words(code: &BlockCode, data: &[u8]) -> Vec<u32> {
    let k = code.params().k();

    data.par_chunks(k)
        .map(|chunk| code.encode_word(bits::pack_block(chunk, k)))
        .collect()
}

/// Encode the given data bits with the built-in code at the given index, returning the
/// code parameters along with the coded bits.
pub fn encode(data: &[u8], index: usize) -> Result<(CodeParameters, Vec<u8>)> {
    let code = CodeTable::standard().code(index)?;
    Ok((code.params(), Encoder::new(code).encode(data)))
}

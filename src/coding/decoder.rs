//! Syndrome decoding of concatenated codewords, correcting up to 1 error per word.

use collect_slice::CollectSlice;
use log::{debug, trace};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::bits::{self, Unpack};
use crate::coding::code::{BlockCode, CodeParameters};
use crate::coding::table::CodeTable;
use crate::error::{FecError, Result};
use crate::stats::{DecodeObserver, HasStats, NullObserver, Stats};

/// Decodes concatenated codewords of a single code, reporting each word to an observer.
pub struct Decoder<'a, O: DecodeObserver = NullObserver> {
    code: &'a BlockCode,
    observer: O,
}

impl<'a> Decoder<'a> {
    /// Construct a new `Decoder` for the given code that reports to no one.
    pub fn new(code: &'a BlockCode) -> Decoder<'a> {
        Decoder::with_observer(code, NullObserver)
    }
}

impl<'a, O: DecodeObserver> Decoder<'a, O> {
    /// Construct a new `Decoder` for the given code that reports to the given observer.
    pub fn with_observer(code: &'a BlockCode, observer: O) -> Decoder<'a, O> {
        Decoder {
            code: code,
            observer: observer,
        }
    }

    pub fn params(&self) -> CodeParameters { self.code.params() }

    pub fn observer(&mut self) -> &mut O { &mut self.observer }

    pub fn into_observer(self) -> O { self.observer }

    /// Decode the given coded bits into data bits, correcting up to 1 error per word.
    ///
    /// The coded bits must be a whole number of `n`-bit words, otherwise
    /// `FrameTruncated` is returned. If any word has an error that can't be corrected,
    /// `UncorrectableBlock` is returned. The decoded data still carries any zero padding
    /// added by the encoder.
    pub fn decode(&mut self, coded: &[u8]) -> Result<Vec<u8>> {
        let params = self.code.params();
        let (n, k) = (params.n(), params.k());

        if coded.len() % n != 0 {
            debug!("{} coded bits don't tile ({}, {}) words", coded.len(), n, k);
            return Err(FecError::FrameTruncated);
        }

        let words = decode_words(self.code, coded);
        let mut data = vec![0; words.len() * k];

        for (block, (word, chunk)) in words.into_iter().zip(data.chunks_mut(k)).enumerate() {
            let (bits, fixed) = match word {
                Some(w) => w,
                None => {
                    debug!("unrecoverable ({}, {}) word at block {}", n, k, block);
                    self.observer.on_unrecoverable(params, block);

                    return Err(FecError::UncorrectableBlock);
                },
            };

            if let Some(pos) = fixed {
                trace!("corrected bit {} of ({}, {}) word at block {}", pos, n, k, block);
            }

            self.observer.on_word(params, block, fixed);
            Unpack::new(bits, k).collect_slice_checked(chunk);
        }

        Ok(data)
    }
}

impl<'a> HasStats for Decoder<'a, Stats> {
    fn stats(&mut self) -> &mut Stats { &mut self.observer }
}

#[cfg(not(feature = "parallel"))]
fn decode_words(code: &BlockCode, coded: &[u8]) -> Vec<Option<(u32, Option<usize>)>> {
    coded.chunks(code.params().n())
        .map(|w| code.decode_word(bits::pack(w)))
        .collect()
}

#[cfg(feature = "parallel")]
fn decode_words(code: &BlockCode, coded: &[u8]) -> Vec<Option<(u32, Option<usize>)>> {
    coded.par_chunks(code.params().n())
        .map(|w| code.decode_word(bits::pack(w)))
        .collect()
}

/// Decode the given coded bits with the built-in code at the given index.
pub fn decode(coded: &[u8], index: usize) -> Result<Vec<u8>> {
    Decoder::new(CodeTable::standard().code(index)?).decode(coded)
}

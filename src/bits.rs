//! Utilities for packing/unpacking bit sequences into/out of words.
//!
//! A bit sequence is a slice of `u8`, each holding a single `0` or `1`. When packed into
//! a word, the first bit of the sequence becomes the MSB of the word's used width.

use num::PrimInt;

/// Number of bits in the primitive word `T`.
fn width<T: PrimInt>() -> usize { std::mem::size_of::<T>() * 8 }

/// Pack the given bits into a word, first bit in the MSB position.
pub fn pack<T: PrimInt>(bits: &[u8]) -> T {
    assert!(bits.len() <= width::<T>());

    bits.iter().fold(T::zero(), |accum, &bit| {
        debug_assert!(bit >> 1 == 0);

        if bit & 1 == 0 {
            accum << 1
        } else {
            accum << 1 | T::one()
        }
    })
}

/// Iterates over the lowest `size` bits of a word, MSB to LSB.
pub struct Unpack<T: PrimInt> {
    /// Source word.
    word: T,
    /// Number of bits left to yield.
    remain: usize,
}

impl<T: PrimInt> Unpack<T> {
    /// Construct a new `Unpack` over the lowest `size` bits of the given word.
    pub fn new(word: T, size: usize) -> Unpack<T> {
        assert!(size <= width::<T>());

        Unpack {
            word: word,
            remain: size,
        }
    }
}

impl<T: PrimInt> Iterator for Unpack<T> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        if self.remain == 0 {
            return None;
        }

        self.remain -= 1;

        Some(if (self.word >> self.remain) & T::one() == T::one() { 1 } else { 0 })
    }

    fn size_hint(&self) -> (usize, Option<usize>) { (self.remain, Some(self.remain)) }
}

impl<T: PrimInt> ExactSizeIterator for Unpack<T> {}

/// Iterates over consecutive `size`-bit blocks of a bit sequence, each packed into a
/// word. The final block is padded on the right with zeros.
pub struct Blocks<'a> {
    /// Remaining source bits.
    bits: &'a [u8],
    /// Number of bits per block.
    size: usize,
}

impl<'a> Blocks<'a> {
    /// Construct a new `Blocks` over the given bits with `size` bits per block.
    pub fn new(bits: &'a [u8], size: usize) -> Blocks<'a> {
        assert!(size > 0 && size <= 32);

        Blocks {
            bits: bits,
            size: size,
        }
    }
}

impl<'a> Iterator for Blocks<'a> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        if self.bits.is_empty() {
            return None;
        }

        let take = std::cmp::min(self.size, self.bits.len());
        let (block, rest) = self.bits.split_at(take);
        self.bits = rest;

        Some(pack_block(block, self.size))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = padded_blocks(self.bits.len(), self.size);
        (n, Some(n))
    }
}

impl<'a> ExactSizeIterator for Blocks<'a> {}

/// Pack the given bits into a `size`-bit block, padding on the right with zeros.
pub fn pack_block(bits: &[u8], size: usize) -> u32 {
    assert!(bits.len() <= size && size <= 32);

    match bits.len() {
        0 => 0,
        len => pack::<u32>(bits) << (size - len),
    }
}

/// Number of `size`-bit blocks needed to hold `len` bits, padding the last block.
pub fn padded_blocks(len: usize, size: usize) -> usize {
    (len + size - 1) / size
}

/// Number of zero bits appended to `len` bits to fill out whole `size`-bit blocks.
pub fn padding(len: usize, size: usize) -> usize {
    match len % size {
        0 => 0,
        r => size - r,
    }
}

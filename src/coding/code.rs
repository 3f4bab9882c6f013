//! Systematic binary linear block codes that correct up to 1 error per word.
//!
//! A code is described by its `k × n` generator matrix in systematic form `G = [A | I]`,
//! so the last `k` bits of each codeword are the data bits. The `(n - k) × n`
//! parity-check matrix is derived as `H = [I | Aᵀ]`, and single errors are located by
//! matching the syndrome `H·wᵀ` against the columns of `H`. These algorithms are sourced
//! from *Coding Theory and Cryptography: The Essentials*, Hankerson, Hoffman, et al,
//! 2000.
//!
//! Words are packed into a `u32` with the first bit of the word in the MSB of its used
//! width, and each matrix is stored as one packed word per row.

use binfield_matrix::matrix_mul;

use crate::error::{FecError, Result};

/// Maximum codeword length that fits a packed word.
pub const MAX_WORD_BITS: usize = 32;
/// Maximum number of parity bits, which bounds the size of the syndrome table.
pub const MAX_PARITY_BITS: usize = 16;

/// Parameters of an `(n, k)` block code and its position in a code table.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "ser", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "ser", serde(try_from = "RawParameters"))]
pub struct CodeParameters {
    /// Number of bits per codeword.
    n: usize,
    /// Number of data bits per codeword.
    k: usize,
    /// Index of the code in its table.
    index: usize,
}

impl CodeParameters {
    /// Construct a new `CodeParameters`, verifying that `n > k ≥ 1` and that words and
    /// syndromes fit their packed representations.
    pub fn new(n: usize, k: usize, index: usize) -> Result<CodeParameters> {
        if k == 0 || k >= n || n > MAX_WORD_BITS || n - k > MAX_PARITY_BITS {
            return Err(FecError::InvalidCodeTable);
        }

        Ok(CodeParameters {
            n: n,
            k: k,
            index: index,
        })
    }

    /// Number of bits per codeword.
    pub fn n(&self) -> usize { self.n }
    /// Number of data bits per codeword.
    pub fn k(&self) -> usize { self.k }
    /// Index of the code in its table.
    pub fn index(&self) -> usize { self.index }
    /// Number of parity bits per codeword.
    pub fn parity_bits(&self) -> usize { self.n - self.k }
}

/// Unchecked `CodeParameters` fields as they appear in serialized data.
#[cfg(feature = "ser")]
#[derive(Deserialize)]
struct RawParameters {
    n: usize,
    k: usize,
    index: usize,
}

#[cfg(feature = "ser")]
impl std::convert::TryFrom<RawParameters> for CodeParameters {
    type Error = FecError;

    fn try_from(p: RawParameters) -> Result<CodeParameters> {
        CodeParameters::new(p.n, p.k, p.index)
    }
}

/// A validated single-error-correcting block code.
#[derive(Clone, Debug)]
pub struct BlockCode {
    params: CodeParameters,
    /// Generator matrix rows, one `n`-bit word per data bit.
    gen: Vec<u32>,
    /// Generator matrix columns, one `k`-bit word per codeword bit.
    cols: Vec<u32>,
    /// Parity-check matrix rows, one `n`-bit word per parity bit.
    par: Vec<u32>,
    /// Maps syndrome values to bit error locations, with 0 for no location.
    locs: Vec<u32>,
}

impl BlockCode {
    /// Construct a new `BlockCode` from the given systematic generator rows.
    ///
    /// The generator must have one row per data bit with the identity in its last `k`
    /// columns, and the derived parity-check matrix must satisfy `G·Hᵀ = 0` and have `n`
    /// distinct nonzero columns. Otherwise, return `InvalidCodeTable`.
    pub fn new(params: CodeParameters, gen: &[u32]) -> Result<BlockCode> {
        let (n, k) = (params.n, params.k);
        let r = params.parity_bits();

        if gen.len() != k {
            return Err(FecError::InvalidCodeTable);
        }

        for (i, &row) in gen.iter().enumerate() {
            if row.checked_shr(n as u32).unwrap_or(0) != 0 ||
               row & mask(k) != 1 << (k - 1 - i)
            {
                return Err(FecError::InvalidCodeTable);
            }
        }

        let par: Vec<u32> = (0..r).map(|j| {
            gen.iter().enumerate().fold(1 << (n - 1 - j), |accum, (i, &row)| {
                accum | (row >> k >> (r - 1 - j) & 1) << (k - 1 - i)
            })
        }).collect();

        let cols: Vec<u32> = (0..n).map(|c| {
            gen.iter().fold(0, |accum, &row| accum << 1 | row >> (n - 1 - c) & 1)
        }).collect();

        for &row in gen {
            let s: u32 = matrix_mul(row, &par[..]);

            if s != 0 {
                return Err(FecError::InvalidCodeTable);
            }
        }

        let mut locs = vec![0; 1 << r];

        for p in 0..n {
            let loc = 1u32 << (n - 1 - p);
            let s: usize = matrix_mul(loc, &par[..]);

            if s == 0 || locs[s] != 0 {
                return Err(FecError::InvalidCodeTable);
            }

            locs[s] = loc;
        }

        Ok(BlockCode {
            params: params,
            gen: gen.to_vec(),
            cols: cols,
            par: par,
            locs: locs,
        })
    }

    pub fn params(&self) -> CodeParameters { self.params }

    /// Generator matrix, one packed `n`-bit row per data bit.
    pub fn generator(&self) -> &[u32] { &self.gen[..] }

    /// Parity-check matrix, one packed `n`-bit row per parity bit.
    pub fn parity_check(&self) -> &[u32] { &self.par[..] }

    /// Encode the given `k` bits of data into an `n`-bit codeword.
    pub fn encode_word(&self, data: u32) -> u32 {
        debug_assert!(data & !mask(self.params.k) == 0);
        matrix_mul(data, &self.cols[..])
    }

    /// Compute the `(n - k)`-bit syndrome of the given word, which is zero exactly when
    /// the word is a codeword.
    pub fn syndrome(&self, word: u32) -> u32 {
        debug_assert!(word & !mask(self.params.n) == 0);
        matrix_mul(word, &self.par[..])
    }

    /// Try to decode the given `n`-bit word to the nearest codeword, correcting up to 1
    /// error.
    ///
    /// If decoding was successful, return `Some((data, loc))`, where `data` is the `k`
    /// data bits and `loc` is the position, counted from the first bit of the word, of
    /// the corrected bit, if any. Otherwise, return `None` to indicate an unrecoverable
    /// error.
    pub fn decode_word(&self, word: u32) -> Option<(u32, Option<usize>)> {
        let s = self.syndrome(word) as usize;

        if s == 0 {
            return Some((self.data(word), None));
        }

        match self.locs[s] {
            0 => None,
            loc => Some((
                self.data(word ^ loc),
                Some(self.params.n - 1 - loc.trailing_zeros() as usize),
            )),
        }
    }

    /// Extract the data bits from the systematic positions of the given word.
    pub fn data(&self, word: u32) -> u32 { word & mask(self.params.k) }
}

/// Mask covering the lowest `bits` bits of a word.
fn mask(bits: usize) -> u32 {
    match bits {
        32 => !0,
        b => (1 << b) - 1,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// (7, 4) Hamming code generator.
    const GEN_7_4: &[u32] = &[
        0b110_1000,
        0b011_0100,
        0b111_0010,
        0b101_0001,
    ];

    /// (6, 3) code shortened from the (7, 4) code, which leaves one syndrome unused.
    const GEN_6_3: &[u32] = &[
        0b110_100,
        0b011_010,
        0b111_001,
    ];

    fn hamming_7_4() -> BlockCode {
        BlockCode::new(CodeParameters::new(7, 4, 1).unwrap(), GEN_7_4).unwrap()
    }

    #[test]
    fn test_params() {
        let p = CodeParameters::new(15, 11, 2).unwrap();
        assert_eq!(p.n(), 15);
        assert_eq!(p.k(), 11);
        assert_eq!(p.index(), 2);
        assert_eq!(p.parity_bits(), 4);

        assert_eq!(CodeParameters::new(4, 4, 0), Err(FecError::InvalidCodeTable));
        assert_eq!(CodeParameters::new(4, 0, 0), Err(FecError::InvalidCodeTable));
        assert_eq!(CodeParameters::new(33, 26, 0), Err(FecError::InvalidCodeTable));
        assert_eq!(CodeParameters::new(32, 1, 0), Err(FecError::InvalidCodeTable));
        assert!(CodeParameters::new(32, 26, 0).is_ok());
    }

    #[cfg(feature = "ser")]
    #[test]
    fn test_params_deserialize() {
        let p: CodeParameters = serde_json::from_str(r#"{"n":7,"k":4,"index":1}"#).unwrap();
        assert_eq!(p, CodeParameters::new(7, 4, 1).unwrap());
        assert_eq!(serde_json::to_string(&p).unwrap(), r#"{"n":7,"k":4,"index":1}"#);

        assert!(serde_json::from_str::<CodeParameters>(r#"{"n":3,"k":5,"index":0}"#)
            .is_err());
        assert!(serde_json::from_str::<CodeParameters>(r#"{"n":4,"k":0,"index":0}"#)
            .is_err());
        assert!(serde_json::from_str::<CodeParameters>(r#"{"n":40,"k":30,"index":0}"#)
            .is_err());
    }

    #[test]
    fn test_parity_check() {
        let c = hamming_7_4();

        assert_eq!(c.parity_check(), &[
            0b100_1011,
            0b010_1110,
            0b001_0111,
        ]);

        for &row in c.generator() {
            assert_eq!(c.syndrome(row), 0);
        }
    }

    #[test]
    fn test_encode() {
        let c = hamming_7_4();

        assert_eq!(c.encode_word(0b0000), 0);
        assert_eq!(c.encode_word(0b1000), 0b110_1000);
        assert_eq!(c.encode_word(0b0110), 0b100_0110);
        assert_eq!(c.encode_word(0b1111), 0b111_1111);

        for d in 0..1 << 4 {
            assert_eq!(c.data(c.encode_word(d)), d);
            assert_eq!(c.syndrome(c.encode_word(d)), 0);
        }
    }

    #[test]
    fn test_decode() {
        let c = hamming_7_4();
        let w = 0b1011;
        let e = c.encode_word(w);

        assert_eq!(c.decode_word(e), Some((w, None)));
        assert_eq!(c.decode_word(e^0b1000000), Some((w, Some(0))));
        assert_eq!(c.decode_word(e^0b0100000), Some((w, Some(1))));
        assert_eq!(c.decode_word(e^0b0010000), Some((w, Some(2))));
        assert_eq!(c.decode_word(e^0b0001000), Some((w, Some(3))));
        assert_eq!(c.decode_word(e^0b0000100), Some((w, Some(4))));
        assert_eq!(c.decode_word(e^0b0000010), Some((w, Some(5))));
        assert_eq!(c.decode_word(e^0b0000001), Some((w, Some(6))));

        for d in 0..1 << 4 {
            assert_eq!(c.decode_word(c.encode_word(d)), Some((d, None)));
        }
    }

    #[test]
    fn test_shortened() {
        let c = BlockCode::new(CodeParameters::new(6, 3, 0).unwrap(), GEN_6_3).unwrap();
        let w = 0b101;
        let e = c.encode_word(w);

        for p in 0..6 {
            assert_eq!(c.decode_word(e ^ 1 << p), Some((w, Some(5 - p))));
        }

        // Syndrome 0b101 matches no column.
        assert_eq!(c.syndrome(e^0b101000), 0b101);
        assert_eq!(c.decode_word(e^0b101000), None);
    }

    #[test]
    fn test_invalid() {
        let p = CodeParameters::new(7, 4, 0).unwrap();

        // Wrong number of rows.
        assert!(BlockCode::new(p, &GEN_7_4[..3]).is_err());
        // Not systematic.
        assert!(BlockCode::new(p, &[
            0b110_1000,
            0b011_1000,
            0b111_0010,
            0b101_0001,
        ]).is_err());
        // Row wider than the codeword.
        assert!(BlockCode::new(p, &[
            0b1110_1000,
            0b011_0100,
            0b111_0010,
            0b101_0001,
        ]).is_err());
        // Repeated parity-check column.
        assert!(BlockCode::new(p, &[
            0b110_1000,
            0b110_0100,
            0b111_0010,
            0b101_0001,
        ]).is_err());
        // Parity-check column equal to an identity column.
        assert!(BlockCode::new(p, &[
            0b100_1000,
            0b011_0100,
            0b111_0010,
            0b101_0001,
        ]).is_err());
    }
}

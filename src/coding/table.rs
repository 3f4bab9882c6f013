//! Registry of supported codes.
//!
//! The built-in table holds the (3, 1) repetition code and the (7, 4), (15, 11), and
//! (31, 26) Hamming codes, validated once on first use and read-only afterwards.

use std::sync::OnceLock;

use crate::coding::code::{BlockCode, CodeParameters};
use crate::error::{FecError, Result};

/// Identifies one of the built-in codes.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum CodeId {
    Repetition3_1,
    Hamming7_4,
    Hamming15_11,
    Hamming31_26,
}

impl CodeId {
    /// All built-in codes, in index order.
    pub const ALL: [CodeId; 4] = [
        CodeId::Repetition3_1,
        CodeId::Hamming7_4,
        CodeId::Hamming15_11,
        CodeId::Hamming31_26,
    ];

    /// Get the code with the given index, or `UnsupportedCode` if there is none.
    pub fn from_index(index: usize) -> Result<CodeId> {
        CodeId::ALL.get(index).cloned().ok_or(FecError::UnsupportedCode)
    }

    pub const fn index(self) -> usize {
        use self::CodeId::*;

        match self {
            Repetition3_1 => 0,
            Hamming7_4 => 1,
            Hamming15_11 => 2,
            Hamming31_26 => 3,
        }
    }

    /// Number of bits per codeword.
    pub const fn word_bits(self) -> usize {
        use self::CodeId::*;

        match self {
            Repetition3_1 => 3,
            Hamming7_4 => 7,
            Hamming15_11 => 15,
            Hamming31_26 => 31,
        }
    }

    /// Number of data bits per codeword.
    pub const fn data_bits(self) -> usize {
        use self::CodeId::*;

        match self {
            Repetition3_1 => 1,
            Hamming7_4 => 4,
            Hamming15_11 => 11,
            Hamming31_26 => 26,
        }
    }

    /// Systematic generator rows, one `n`-bit word per data bit.
    fn generator(self) -> &'static [u32] {
        use self::CodeId::*;

        match self {
            Repetition3_1 => GEN_3_1,
            Hamming7_4 => GEN_7_4,
            Hamming15_11 => GEN_15_11,
            Hamming31_26 => GEN_31_26,
        }
    }

    /// Get the validated code from the built-in table.
    pub fn code(self) -> &'static BlockCode {
        &CodeTable::standard().codes[self.index()]
    }

    pub fn params(self) -> CodeParameters { self.code().params() }
}

/// Externally supplied description of a code, as loaded from a code table file.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "ser", derive(Serialize, Deserialize))]
pub struct GeneratorSpec {
    /// Number of bits per codeword.
    pub n: usize,
    /// Number of data bits per codeword.
    pub k: usize,
    /// Systematic generator rows, first codeword bit in the MSB of each `n`-bit row.
    pub rows: Vec<u32>,
}

/// An immutable table of validated codes, indexed from 0.
#[derive(Clone, Debug)]
pub struct CodeTable {
    codes: Vec<BlockCode>,
}

impl CodeTable {
    /// Get the process-wide table of built-in codes.
    pub fn standard() -> &'static CodeTable {
        static TABLE: OnceLock<CodeTable> = OnceLock::new();

        TABLE.get_or_init(|| {
            let specs: Vec<GeneratorSpec> = CodeId::ALL.iter().map(|&id| GeneratorSpec {
                n: id.word_bits(),
                k: id.data_bits(),
                rows: id.generator().to_vec(),
            }).collect();

            match CodeTable::from_generators(&specs) {
                Ok(table) => table,
                Err(e) => panic!("built-in code table failed validation: {}", e),
            }
        })
    }

    /// Construct a new `CodeTable` from the given generators, where the code at index
    /// `i` is described by `specs[i]`. Every code is validated and codeword lengths must
    /// be unique, otherwise `InvalidCodeTable` is returned.
    pub fn from_generators(specs: &[GeneratorSpec]) -> Result<CodeTable> {
        let codes = specs.iter().enumerate().map(|(i, s)| {
            BlockCode::new(CodeParameters::new(s.n, s.k, i)?, &s.rows[..])
        }).collect::<Result<Vec<BlockCode>>>()?;

        for (i, a) in codes.iter().enumerate() {
            if codes[..i].iter().any(|b| b.params().n() == a.params().n()) {
                return Err(FecError::InvalidCodeTable);
            }
        }

        Ok(CodeTable { codes: codes })
    }

    /// Number of codes in the table.
    pub fn len(&self) -> usize { self.codes.len() }

    pub fn is_empty(&self) -> bool { self.codes.is_empty() }

    /// Iterate over the codes in index order.
    pub fn iter(&self) -> std::slice::Iter<BlockCode> { self.codes.iter() }

    /// Get the code with the given index, or `UnsupportedCode` if there is none.
    pub fn code(&self, index: usize) -> Result<&BlockCode> {
        self.codes.get(index).ok_or(FecError::UnsupportedCode)
    }

    /// Get the parameters of the code with the given index.
    pub fn params_by_index(&self, index: usize) -> Result<CodeParameters> {
        self.code(index).map(|c| c.params())
    }

    /// Get the parameters of the code with the given codeword length.
    pub fn params_by_length(&self, n: usize) -> Result<CodeParameters> {
        self.codes.iter()
            .map(|c| c.params())
            .find(|p| p.n() == n)
            .ok_or(FecError::UnsupportedCode)
    }

    /// Get the generator matrix of the code with the given index.
    pub fn generator(&self, index: usize) -> Result<&[u32]> {
        self.code(index).map(|c| c.generator())
    }

    /// Get the parity-check matrix of the code with the given index.
    pub fn parity_check(&self, index: usize) -> Result<&[u32]> {
        self.code(index).map(|c| c.parity_check())
    }
}

/// (3, 1) repetition code generator.
const GEN_3_1: &[u32] = &[
    0b11_1,
];

/// (7, 4) Hamming code generator.
const GEN_7_4: &[u32] = &[
    0b110_1000,
    0b011_0100,
    0b111_0010,
    0b101_0001,
];

/// (15, 11) Hamming code generator.
const GEN_15_11: &[u32] = &[
    0b1100_10000000000,
    0b0110_01000000000,
    0b0011_00100000000,
    0b1101_00010000000,
    0b1010_00001000000,
    0b0101_00000100000,
    0b1110_00000010000,
    0b0111_00000001000,
    0b1111_00000000100,
    0b1011_00000000010,
    0b1001_00000000001,
];

/// (31, 26) Hamming code generator.
const GEN_31_26: &[u32] = &[
    0b10100_10000000000000000000000000,
    0b01010_01000000000000000000000000,
    0b00101_00100000000000000000000000,
    0b10110_00010000000000000000000000,
    0b01011_00001000000000000000000000,
    0b10001_00000100000000000000000000,
    0b11100_00000010000000000000000000,
    0b01110_00000001000000000000000000,
    0b00111_00000000100000000000000000,
    0b10111_00000000010000000000000000,
    0b11111_00000000001000000000000000,
    0b11011_00000000000100000000000000,
    0b11001_00000000000010000000000000,
    0b11000_00000000000001000000000000,
    0b01100_00000000000000100000000000,
    0b00110_00000000000000010000000000,
    0b00011_00000000000000001000000000,
    0b10101_00000000000000000100000000,
    0b11110_00000000000000000010000000,
    0b01111_00000000000000000001000000,
    0b10011_00000000000000000000100000,
    0b11101_00000000000000000000010000,
    0b11010_00000000000000000000001000,
    0b01101_00000000000000000000000100,
    0b10010_00000000000000000000000010,
    0b01001_00000000000000000000000001,
];

//! Encoding and decoding for the single-error-correcting block codes used in frames.

pub mod code;
pub mod decoder;
pub mod encoder;
pub mod table;

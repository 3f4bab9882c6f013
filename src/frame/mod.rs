//! Framing of coded payloads behind a self-describing coded header.
//!
//! A frame is the header, coded with the (3, 1) repetition code, followed by the payload,
//! coded with the code the header names.

pub mod assembler;
pub mod header;
pub mod parser;

//! Forward error correction for noisy bit channels.
//!
//! Data bits are coded with one of four single-error-correcting block codes and sent
//! behind a coded header that records the payload length and code, so a receiver can
//! recover the data from a frame alone.

#[cfg(feature = "ser")]
#[macro_use]
extern crate serde_derive;

pub mod bits;
pub mod coding;
pub mod consts;
pub mod error;
pub mod frame;
pub mod stats;

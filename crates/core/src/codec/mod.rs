//! Codec modules for ROD image line data.
//!
//! This module contains:
//! - `bits`: packed fixed-width field runs
//! - `cursor`: bounded little-endian byte reader
//! - `ty6`: TY6 scanline decoding

pub mod bits;
pub mod cursor;
pub mod ty6;

// Re-export main functions for convenience
pub use ty6::{
    DecodeStatus, LineDecode, LineDecoder, decode_line, decode_line_into, try_decode_line,
};

//! ty6 - TY6 scanline decoding for Rigaku Oxford Diffraction ROD images.
//!
//! The core entry point is [`codec::ty6::decode_line`], which turns one
//! compressed line into its signed 32-bit pixel values. Locating each line
//! inside a ROD file is left to the caller.

pub mod codec;
pub mod error;
pub mod ffi;

// Re-export codec modules for convenience
pub use codec::ty6;
pub use codec::{
    DecodeStatus, LineDecode, LineDecoder, decode_line, decode_line_into, try_decode_line,
};

pub use error::{Result, Ty6Error};

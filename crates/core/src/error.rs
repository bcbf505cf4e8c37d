//! Error types for the ty6 decoding library.

use thiserror::Error;

/// Error type for the checked decoding entry points.
///
/// Running out of input while decoding is not an error: a short line decodes
/// to a partial result (see [`crate::codec::ty6::DecodeStatus`]).
#[derive(Error, Debug)]
pub enum Ty6Error {
    #[error("invalid line width: {0} (must be at least 1)")]
    InvalidWidth(usize),

    #[error("line offset {offset} is past the end of the {len}-byte input")]
    OffsetOutOfRange { offset: usize, len: usize },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type alias for Ty6Error.
pub type Result<T> = std::result::Result<T, Ty6Error>;

//! The error type shared by the buffer, the detector and the compressor.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    /// The caller passed a value that can never be valid, such as a zero
    /// capacity or a source range that does not fit in the source slice.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An access of 'len' bytes at 'index' does not fit in the buffer.
    #[error(
        "out of bounds: {len} byte(s) at {index} exceed capacity {capacity}"
    )]
    OutOfBounds {
        index: usize,
        len: usize,
        capacity: usize,
    },

    /// The one-byte encoding was requested for a code unit above 0xFF.
    #[error("code unit {unit:#06x} at {index} does not fit in one byte")]
    Encoding { index: usize, unit: u16 },
}

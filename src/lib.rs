pub mod compress;
pub mod detect;
pub mod error;
pub mod memory;
pub mod utils;

pub use compress::{compress_direct, compress_into, StringCompressor};
pub use error::{Error, Result};
pub use memory::MemoryBuffer;

/// The byte representation that was chosen for a string.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// One byte per code unit. Valid when every code unit is at most 0xFF.
    Latin1,
    /// Two bytes per code unit, low byte first.
    Utf16,
}

impl Encoding {
    #[must_use]
    pub fn bytes_per_unit(self) -> usize {
        match self {
            Encoding::Latin1 => 1,
            Encoding::Utf16 => 2,
        }
    }

    /// Returns the number of bytes needed to encode 'units' code units.
    #[must_use]
    pub fn encoded_len(self, units: usize) -> usize {
        units * self.bytes_per_unit()
    }

    /// The tag that records this encoding in an enclosing message.
    #[must_use]
    pub fn flag(self) -> u8 {
        match self {
            Encoding::Latin1 => 0,
            Encoding::Utf16 => 1,
        }
    }

    /// Decode a tag that was written by 'flag'.
    #[must_use]
    pub fn from_flag(flag: u8) -> Option<Self> {
        match flag {
            0 => Some(Encoding::Latin1),
            1 => Some(Encoding::Utf16),
            _ => None,
        }
    }
}

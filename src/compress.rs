//! Write strings into a MemoryBuffer in the Latin-1 encoding (one byte per
//! code unit) or in the UTF-16 encoding (two bytes per code unit, low byte
//! first).
//!
//! There are two ways to move the bytes into the buffer:
//! - The staged path encodes the whole string into a scratch array and then
//!   copies it with a single bulk write through the cursor.
//! - The direct path stores each byte at a computed offset with 'put'. It
//!   needs no scratch memory and does not move the cursor.
//!
//! Both paths produce the same bytes for the same input and encoding.

use crate::detect::{find_wide_unit, is_latin1, select_encoding, LATIN1_MAX};
use crate::error::{Error, Result};
use crate::memory::MemoryBuffer;
use crate::Encoding;

/// Build the error for a string that can't be encoded as Latin-1.
fn encoding_error(chars: &[u16]) -> Error {
    let (index, unit) = find_wide_unit(chars).unwrap_or((0, 0));
    Error::Encoding { index, unit }
}

/// Store the low byte of each code unit in 'out'. Returns false if any of the
/// code units had a non-zero high byte.
fn narrow(chars: &[u16], out: &mut [u8]) -> bool {
    debug_assert_eq!(chars.len(), out.len());
    let mut seen: u16 = 0;
    for (dst, &c) in out.iter_mut().zip(chars) {
        *dst = c as u8;
        seen |= c;
    }
    seen <= LATIN1_MAX
}

/// Store each code unit in 'out' as two little endian bytes.
fn widen(chars: &[u16], out: &mut [u8]) {
    debug_assert_eq!(chars.len() * 2, out.len());
    for (dst, &c) in out.chunks_exact_mut(2).zip(chars) {
        dst.copy_from_slice(&c.to_le_bytes());
    }
}

/// Encode 'chars' into the beginning of 'scratch' and return the number of
/// bytes that were used.
fn encode_to_scratch(
    chars: &[u16],
    scratch: &mut [u8],
    encoding: Encoding,
) -> Result<usize> {
    let len = encoding.encoded_len(chars.len());
    if scratch.len() < len {
        return Err(Error::InvalidArgument(format!(
            "scratch of {} bytes can't hold {} encoded bytes",
            scratch.len(),
            len
        )));
    }

    let out = &mut scratch[..len];
    match encoding {
        Encoding::Latin1 => {
            if !narrow(chars, out) {
                return Err(encoding_error(chars));
            }
        }
        Encoding::Utf16 => widen(chars, out),
    }
    Ok(len)
}

/// Encode 'chars' into the caller's 'scratch' array and append the result to
/// 'dest' with one bulk write. Returns the number of bytes written. On error
/// the buffer and its cursor are left untouched.
pub fn compress_into(
    chars: &[u16],
    scratch: &mut [u8],
    dest: &mut MemoryBuffer,
    encoding: Encoding,
) -> Result<usize> {
    let len = encode_to_scratch(chars, scratch, encoding)?;
    dest.write_primitive_array(scratch, 0, len)?;
    Ok(len)
}

/// Store the encoding of 'chars' in 'dest' starting at the absolute offset
/// 'base', one byte at a time. The cursor does not move. Returns the number
/// of bytes written. The range and the encoding are validated before the first
/// byte is stored, so a failed call writes nothing.
pub fn compress_direct(
    chars: &[u16],
    dest: &mut MemoryBuffer,
    base: usize,
    encoding: Encoding,
) -> Result<usize> {
    let len = encoding.encoded_len(chars.len());
    let capacity = dest.capacity();
    if base.checked_add(len).map_or(true, |end| end > capacity) {
        return Err(Error::OutOfBounds {
            index: base,
            len,
            capacity,
        });
    }

    match encoding {
        Encoding::Latin1 => {
            if !is_latin1(chars) {
                return Err(encoding_error(chars));
            }
            for (i, &c) in chars.iter().enumerate() {
                dest.put(base + i, c as u8)?;
            }
        }
        Encoding::Utf16 => {
            for (i, &c) in chars.iter().enumerate() {
                let idx = base + (i << 1);
                dest.put(idx, c as u8)?;
                dest.put(idx + 1, (c >> 8) as u8)?;
            }
        }
    }
    Ok(len)
}

/// Encodes strings through the staged path. The compressor owns the scratch
/// array and reuses it between calls, so after the first call with the
/// longest string, compressing does not allocate.
#[derive(Default)]
pub struct StringCompressor {
    scratch: Vec<u8>,
}

impl StringCompressor {
    pub fn new() -> Self {
        Self {
            scratch: Vec::new(),
        }
    }

    /// Create a compressor that can stage strings of up to 'units' code units
    /// in either encoding without allocating.
    pub fn with_capacity(units: usize) -> Self {
        Self {
            scratch: vec![0; Encoding::Utf16.encoded_len(units)],
        }
    }

    /// Append 'chars' to 'dest' in the requested encoding and return the
    /// number of bytes written. Latin-1 must only be requested for strings
    /// where every code unit is at most 0xFF, otherwise this returns an
    /// encoding error.
    pub fn compress(
        &mut self,
        chars: &[u16],
        dest: &mut MemoryBuffer,
        encoding: Encoding,
    ) -> Result<usize> {
        let len = encoding.encoded_len(chars.len());
        if dest.remaining() < len {
            return Err(Error::OutOfBounds {
                index: dest.writer_index(),
                len,
                capacity: dest.capacity(),
            });
        }
        if self.scratch.len() < len {
            log::debug!(
                "Growing the scratch array from {} to {} bytes",
                self.scratch.len(),
                len
            );
            self.scratch.resize(len, 0);
        }
        compress_into(chars, &mut self.scratch, dest, encoding)
    }

    /// Pick the most compact encoding for 'chars' and append it to 'dest'.
    /// Returns the number of bytes written and the encoding that was used.
    pub fn write_string(
        &mut self,
        chars: &[u16],
        dest: &mut MemoryBuffer,
    ) -> Result<(usize, Encoding)> {
        let encoding = select_encoding(chars);
        let written = self.compress(chars, dest, encoding)?;
        log::trace!(
            "Wrote {} code units as {:?} ({} bytes)",
            chars.len(),
            encoding,
            written
        );
        Ok((written, encoding))
    }
}

#[test]
fn test_narrow_and_widen() {
    let mut out = [0u8; 3];
    assert!(narrow(&[0x41, 0xFF, 0x00], &mut out));
    assert_eq!(out, [0x41, 0xFF, 0x00]);
    assert!(!narrow(&[0x41, 0x100, 0x00], &mut out));

    let mut out = [0u8; 4];
    widen(&[0x4F60, 0x0041], &mut out);
    assert_eq!(out, [0x60, 0x4F, 0x41, 0x00]);
}

#[test]
fn test_short_scratch() {
    let mut dest = MemoryBuffer::new(16).unwrap();
    let mut scratch = [0u8; 3];
    let res = compress_into(&[1, 2], &mut scratch, &mut dest, Encoding::Utf16);
    assert!(matches!(res, Err(Error::InvalidArgument(_))));
    assert_eq!(dest.writer_index(), 0);
}

#[test]
fn test_full_buffer_keeps_scratch() {
    let chars = [0x4F60; 100];
    let mut dest = MemoryBuffer::new(4).unwrap();
    let mut compressor = StringCompressor::new();
    let res = compressor.compress(&chars, &mut dest, Encoding::Utf16);
    assert_eq!(
        res,
        Err(Error::OutOfBounds {
            index: 0,
            len: 200,
            capacity: 4
        })
    );
    assert!(compressor.scratch.is_empty());
    assert_eq!(dest.writer_index(), 0);
}

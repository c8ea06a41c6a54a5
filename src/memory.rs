//! A fixed-capacity byte buffer with a write cursor. The buffer is backed
//! either by a heap allocation that it owns, or by a region of memory that
//! lives somewhere else (off-heap) and is addressed by a base pointer. Both
//! kinds behave the same; only the address translation differs.

use std::fmt;
use std::marker::PhantomData;
use std::ptr::NonNull;

use crate::error::{Error, Result};

/// The storage behind a MemoryBuffer.
enum Region<'a> {
    /// A zero-initialized heap allocation owned by the buffer.
    Heap(Box<[u8]>),
    /// Memory owned by the caller, valid for 'len' bytes starting at 'base'.
    OffHeap {
        base: NonNull<u8>,
        len: usize,
        _marker: PhantomData<&'a mut [u8]>,
    },
}

// The accessors below do not check bounds. MemoryBuffer checks every access
// against the capacity before translating the address.
impl Region<'_> {
    fn len(&self) -> usize {
        match self {
            Region::Heap(data) => data.len(),
            Region::OffHeap { len, .. } => *len,
        }
    }

    fn store(&mut self, index: usize, val: u8) {
        debug_assert!(index < self.len());
        match self {
            Region::Heap(data) => data[index] = val,
            // SAFETY: index < len, and the region is valid for len bytes.
            Region::OffHeap { base, .. } => unsafe {
                base.as_ptr().add(index).write(val)
            },
        }
    }

    fn load(&self, index: usize) -> u8 {
        debug_assert!(index < self.len());
        match self {
            Region::Heap(data) => data[index],
            // SAFETY: index < len, and the region is valid for len bytes.
            Region::OffHeap { base, .. } => unsafe {
                base.as_ptr().add(index).read()
            },
        }
    }

    fn copy_from(&mut self, offset: usize, src: &[u8]) {
        debug_assert!(offset + src.len() <= self.len());
        match self {
            Region::Heap(data) => {
                data[offset..offset + src.len()].copy_from_slice(src)
            }
            // SAFETY: the destination range is in bounds, and 'src' can't
            // alias the region because the region is borrowed mutably.
            Region::OffHeap { base, .. } => unsafe {
                std::ptr::copy_nonoverlapping(
                    src.as_ptr(),
                    base.as_ptr().add(offset),
                    src.len(),
                )
            },
        }
    }

    fn as_slice(&self) -> &[u8] {
        match self {
            Region::Heap(data) => &data[..],
            // SAFETY: the region is valid for len bytes for the lifetime 'a.
            Region::OffHeap { base, len, .. } => unsafe {
                std::slice::from_raw_parts(base.as_ptr(), *len)
            },
        }
    }
}

/// A byte-addressable region with a fixed capacity and a write cursor.
/// Bulk writes go through the cursor and advance it. Indexed accesses
/// ('put' and 'get') address the region directly and never move it.
pub struct MemoryBuffer<'a> {
    region: Region<'a>,
    /// The offset of the next bulk write.
    writer_index: usize,
}

// SAFETY: a heap region is an owned Box. An off-heap region is either an
// exclusive borrow of a slice, which is Send, or raw memory that the caller
// of 'from_raw_parts' allows any owning thread to access. The buffer is not
// Sync: every write goes through '&mut self'.
unsafe impl Send for MemoryBuffer<'_> {}

impl MemoryBuffer<'static> {
    /// Allocate a zero-filled heap buffer of 'capacity' bytes.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidArgument(
                "buffer capacity must be positive".to_string(),
            ));
        }
        Ok(Self {
            region: Region::Heap(vec![0; capacity].into_boxed_slice()),
            writer_index: 0,
        })
    }
}

impl<'a> MemoryBuffer<'a> {
    /// Wrap memory that the caller owns. The buffer writes through to 'data'
    /// and borrows it for as long as the buffer lives.
    pub fn from_slice(data: &'a mut [u8]) -> Result<Self> {
        // SAFETY: 'data' is valid and exclusively borrowed for 'a.
        unsafe { Self::from_raw_parts(data.as_mut_ptr(), data.len()) }
    }

    /// Wrap 'len' bytes of raw memory starting at 'base'.
    ///
    /// # Safety
    /// The memory must be valid for reads and writes of 'len' bytes, must not
    /// be accessed through any other path, and must not move or be freed for
    /// as long as the returned buffer is alive. The memory may be accessed
    /// from whichever thread owns the buffer.
    pub unsafe fn from_raw_parts(base: *mut u8, len: usize) -> Result<Self> {
        let base = NonNull::new(base).ok_or_else(|| {
            Error::InvalidArgument("base address is null".to_string())
        })?;
        if len == 0 {
            return Err(Error::InvalidArgument(
                "buffer capacity must be positive".to_string(),
            ));
        }
        Ok(Self {
            region: Region::OffHeap {
                base,
                len,
                _marker: PhantomData,
            },
            writer_index: 0,
        })
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.region.len()
    }

    /// Returns true if the buffer writes into memory that it does not own.
    #[must_use]
    pub fn is_off_heap(&self) -> bool {
        matches!(self.region, Region::OffHeap { .. })
    }

    #[must_use]
    pub fn writer_index(&self) -> usize {
        self.writer_index
    }

    /// Move the cursor. The offset is not validated here; the next bulk write
    /// fails if it does not fit.
    pub fn set_writer_index(&mut self, offset: usize) {
        self.writer_index = offset;
    }

    /// The number of bytes a bulk write can still add.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.capacity().saturating_sub(self.writer_index)
    }

    /// Check that 'len' bytes at 'index' fit in the buffer.
    fn check_bounds(&self, index: usize, len: usize) -> Result<()> {
        let capacity = self.capacity();
        match index.checked_add(len) {
            Some(end) if end <= capacity => Ok(()),
            _ => Err(Error::OutOfBounds {
                index,
                len,
                capacity,
            }),
        }
    }

    /// Copy 'length' bytes from 'source', starting at 'source_offset', to the
    /// cursor and advance the cursor by 'length'. Nothing is written and the
    /// cursor stays put if the write fails.
    pub fn write_primitive_array(
        &mut self,
        source: &[u8],
        source_offset: usize,
        length: usize,
    ) -> Result<()> {
        let src = source_offset
            .checked_add(length)
            .and_then(|end| source.get(source_offset..end))
            .ok_or_else(|| {
                Error::InvalidArgument(format!(
                    "source range {}+{} exceeds source length {}",
                    source_offset,
                    length,
                    source.len()
                ))
            })?;
        self.check_bounds(self.writer_index, length)?;
        self.region.copy_from(self.writer_index, src);
        self.writer_index += length;
        Ok(())
    }

    /// Append all of 'source' at the cursor.
    pub fn write_bytes(&mut self, source: &[u8]) -> Result<()> {
        self.write_primitive_array(source, 0, source.len())
    }

    /// Write the byte 'val' at 'index'. The cursor does not move.
    pub fn put(&mut self, index: usize, val: u8) -> Result<()> {
        self.check_bounds(index, 1)?;
        self.region.store(index, val);
        Ok(())
    }

    /// Read the byte at 'index'.
    pub fn get(&self, index: usize) -> Result<u8> {
        self.check_bounds(index, 1)?;
        Ok(self.region.load(index))
    }

    /// Returns the whole region, regardless of the cursor.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        self.region.as_slice()
    }

    /// Returns the bytes in front of the cursor.
    #[must_use]
    pub fn written(&self) -> &[u8] {
        let end = self.writer_index.min(self.capacity());
        &self.as_slice()[..end]
    }
}

impl fmt::Debug for MemoryBuffer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryBuffer")
            .field("off_heap", &self.is_off_heap())
            .field("capacity", &self.capacity())
            .field("writer_index", &self.writer_index)
            .finish()
    }
}

#[test]
fn test_zero_capacity() {
    assert!(matches!(
        MemoryBuffer::new(0),
        Err(Error::InvalidArgument(_))
    ));
    let mut empty: [u8; 0] = [];
    assert!(matches!(
        MemoryBuffer::from_slice(&mut empty),
        Err(Error::InvalidArgument(_))
    ));
    let null = unsafe { MemoryBuffer::from_raw_parts(std::ptr::null_mut(), 8) };
    assert!(matches!(null, Err(Error::InvalidArgument(_))));
}

#[test]
fn test_cursor_overflow() {
    let mut buf = MemoryBuffer::new(4).unwrap();
    buf.set_writer_index(usize::MAX);
    assert_eq!(buf.remaining(), 0);
    assert!(matches!(
        buf.write_bytes(&[1]),
        Err(Error::OutOfBounds { .. })
    ));
    assert_eq!(buf.writer_index(), usize::MAX);
    assert_eq!(buf.written().len(), 4);
}

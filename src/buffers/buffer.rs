//! Buffer views over shared backing stores

use std::{
    cell::Cell,
    fmt,
    ops::{Bound, RangeBounds},
};

use crate::{
    encoding::{self, Encoding},
    error::{BufferError, Result},
    memory::BackingStore,
};

/// Bytes shown by the `Debug` representation before eliding the rest
const DEBUG_MAX_BYTES: usize = 50;

/// A read/write window over a [`BackingStore`]
///
/// A buffer is the triple (store, offset, length). Its shape never changes
/// after creation, but the bytes it covers can be written through any view
/// of the same store, including through `&Buffer`. Cloning a buffer yields a
/// second view of the same bytes; use [`Buffer::to_vec`] or
/// [`Buffer::from_bytes`] for an independent copy.
#[derive(Clone)]
pub struct Buffer {
    /// Shared backing bytes
    store: BackingStore,
    /// Start of the window inside `store`
    offset: usize,
    /// Length of the window
    len: usize,
}

impl Buffer {
    /// Build a view without checking bounds; callers guarantee
    /// `offset + len <= store.len()`
    pub(crate) fn from_parts(store: BackingStore, offset: usize, len: usize) -> Self {
        debug_assert!(offset + len <= store.len());
        Self { store, offset, len }
    }

    /// Zero-length buffer over an empty store
    pub fn empty() -> Self {
        Self::from_parts(BackingStore::zeroed(0), 0, 0)
    }

    /// Length of the view in bytes
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the view is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Offset of the view inside its backing store
    pub fn byte_offset(&self) -> usize {
        self.offset
    }

    /// The backing store this view references
    pub fn store(&self) -> &BackingStore {
        &self.store
    }

    /// Check whether two views reference the same backing store
    pub fn shares_store(&self, other: &Buffer) -> bool {
        self.store.ptr_eq(&other.store)
    }

    /// Read the byte at `index`
    pub fn get(&self, index: usize) -> Option<u8> {
        self.cells().get(index).map(Cell::get)
    }

    /// Write the byte at `index`
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::OutOfBounds`] if `index >= len`.
    pub fn set(&self, index: usize, value: u8) -> Result<()> {
        let cell = self
            .cells()
            .get(index)
            .ok_or_else(|| BufferError::out_of_bounds(index, 1, self.len))?;
        cell.set(value);
        Ok(())
    }

    /// Iterate over the bytes of the view
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.cells().iter().map(Cell::get)
    }

    /// Copy the bytes of the view out
    pub fn to_vec(&self) -> Vec<u8> {
        self.iter().collect()
    }

    /// New view over `range` of this one, sharing the same store
    ///
    /// Bounds are clamped into `[0, len]`; an end below the start yields an
    /// empty view.
    pub fn slice(&self, range: impl RangeBounds<usize>) -> Buffer {
        let (start, end) = clamp_range(range, self.len);
        Self::from_parts(self.store.clone(), self.offset + start, end - start)
    }

    /// Copy `[source_start, source_end)` of this view into `target` at
    /// `target_start`, returning the number of bytes copied
    ///
    /// The count is limited by the room left in `target`. Bytes are copied one
    /// at a time in ascending order with no overlap detection: when both
    /// ranges alias the same store and overlap, the result is unspecified.
    pub fn copy_into(
        &self,
        target: &Buffer,
        target_start: usize,
        source_start: usize,
        source_end: usize,
    ) -> usize {
        let source_end = source_end.min(self.len);
        let source_start = source_start.min(source_end);
        if target_start >= target.len {
            return 0;
        }
        let count = (source_end - source_start).min(target.len - target_start);
        let source = &self.cells()[source_start..source_start + count];
        let dest = &target.cells()[target_start..target_start + count];
        for (to, from) in dest.iter().zip(source) {
            to.set(from.get());
        }
        count
    }

    /// New dedicated buffer with `f` applied to every byte
    pub fn map(&self, f: impl FnMut(u8) -> u8) -> Buffer {
        Buffer::from(self.iter().map(f).collect::<Vec<u8>>())
    }

    /// Decode `range` of the view as text
    pub fn to_string_range(&self, encoding: Encoding, range: impl RangeBounds<usize>) -> String {
        encoding::decode(&self.slice(range).to_vec(), encoding)
    }

    /// Decode the whole view as text
    pub fn to_string_encoded(&self, encoding: Encoding) -> String {
        self.to_string_range(encoding, ..)
    }

    /// Encode `string` and write it at `offset`, returning the bytes written
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::OutOfBounds`] if `offset > len`.
    pub fn write(&self, string: &str, offset: usize, encoding: Encoding) -> Result<usize> {
        self.write_bounded(string, offset, usize::MAX, encoding)
    }

    /// Like [`Buffer::write`], writing at most `max_len` bytes
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::OutOfBounds`] if `offset > len`.
    pub fn write_bounded(
        &self,
        string: &str,
        offset: usize,
        max_len: usize,
        encoding: Encoding,
    ) -> Result<usize> {
        if offset > self.len {
            return Err(BufferError::out_of_bounds(offset, 0, self.len));
        }
        let encoded = Buffer::from(encoding::encode(string, encoding)?);
        Ok(encoded.copy_into(self, offset, 0, max_len))
    }

    pub(crate) fn cells(&self) -> &[Cell<u8>] {
        &self.store.cells()[self.offset..self.offset + self.len]
    }
}

/// Resolve `range` against `len`, clamping both ends and forcing `start <= end`
pub(crate) fn clamp_range(range: impl RangeBounds<usize>, len: usize) -> (usize, usize) {
    let start = match range.start_bound() {
        Bound::Included(&s) => s,
        Bound::Excluded(&s) => s.saturating_add(1),
        Bound::Unbounded => 0,
    }
    .min(len);
    let end = match range.end_bound() {
        Bound::Included(&e) => e.saturating_add(1),
        Bound::Excluded(&e) => e,
        Bound::Unbounded => len,
    }
    .min(len);
    (start, end.max(start))
}

impl Default for Buffer {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<Buffer")?;
        for byte in self.iter().take(DEBUG_MAX_BYTES) {
            write!(f, " {:02x}", byte)?;
        }
        if self.len > DEBUG_MAX_BYTES {
            write!(f, " ... {} more bytes", self.len - DEBUG_MAX_BYTES)?;
        }
        f.write_str(">")
    }
}

/// Lossy UTF-8 rendering of the bytes
impl fmt::Display for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_encoded(Encoding::Utf8))
    }
}

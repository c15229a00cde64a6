//! Bump slab - carves buffers sequentially out of one backing store

use crate::{buffers::Buffer, memory::BackingStore};

/// A backing store plus a bump cursor
///
/// Carved buffers are never returned to the slab. Once the slab cannot fit a
/// request it is retired by its owner and a fresh one takes its place; views
/// already carved keep the old store alive.
#[derive(Debug)]
pub struct Slab {
    /// Backing bytes shared with every carved buffer
    store: BackingStore,
    /// Next free offset, never beyond `store.len()`
    cursor: usize,
}

impl Slab {
    /// Wrap a zeroed store as an empty slab
    pub fn new(store: BackingStore) -> Self {
        Self { store, cursor: 0 }
    }

    /// Align a value up to the given alignment
    fn align_up(value: usize, align: usize) -> usize {
        (value + align - 1) & !(align - 1)
    }

    /// Total bytes in the slab
    pub fn capacity(&self) -> usize {
        self.store.len()
    }

    /// Get current position in the slab
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Bytes left after the cursor
    pub fn remaining(&self) -> usize {
        self.capacity() - self.cursor
    }

    /// Check if a specific size can be carved
    pub fn can_allocate_size(&self, size: usize) -> bool {
        size <= self.remaining()
    }

    /// The store carved buffers reference
    pub fn store(&self) -> &BackingStore {
        &self.store
    }

    /// Carve `[cursor, cursor + size)` and move the cursor past it, rounded up
    /// to `alignment`
    ///
    /// Returns `None` without moving the cursor when the request does not fit.
    /// `alignment` must be a power of two.
    pub fn carve(&mut self, size: usize, alignment: usize) -> Option<Buffer> {
        if !self.can_allocate_size(size) {
            return None;
        }
        let buffer = Buffer::from_store(self.store.clone(), self.cursor, size).ok()?;
        let end = self.cursor + size;
        self.cursor = Self::align_up(end, alignment).min(self.capacity());
        Some(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align_up() {
        assert_eq!(Slab::align_up(0, 8), 0);
        assert_eq!(Slab::align_up(1, 8), 8);
        assert_eq!(Slab::align_up(10, 8), 16);
        assert_eq!(Slab::align_up(16, 8), 16);
    }

    #[test]
    fn test_carve_advances_aligned() {
        let mut slab = Slab::new(BackingStore::zeroed(64));
        let a = slab.carve(10, 8).unwrap();
        assert_eq!(a.byte_offset(), 0);
        assert_eq!(a.len(), 10);
        assert_eq!(slab.cursor(), 16);

        let b = slab.carve(16, 8).unwrap();
        assert_eq!(b.byte_offset(), 16);
        assert_eq!(slab.cursor(), 32);
        assert!(a.shares_store(&b));
    }

    #[test]
    fn test_carve_refuses_overflow() {
        let mut slab = Slab::new(BackingStore::zeroed(20));
        assert!(slab.carve(12, 8).is_some());
        assert_eq!(slab.remaining(), 4);
        assert!(slab.carve(5, 8).is_none());
        assert_eq!(slab.cursor(), 16);
        // the cursor is clamped when rounding would pass the end
        assert!(slab.carve(3, 8).is_some());
        assert_eq!(slab.cursor(), 20);
        assert!(slab.carve(0, 8).is_some());
    }
}

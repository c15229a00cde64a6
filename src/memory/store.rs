//! Reference-counted byte blocks

use std::{cell::Cell, fmt, rc::Rc};

/// A contiguous, fixed-length block of bytes shared by every view carved from it
///
/// Cloning a store clones the handle, not the bytes. The block is released
/// when the last handle (including every [`Buffer`](crate::Buffer) over it)
/// is dropped. Bytes are held in [`Cell`]s so that overlapping views can be
/// written through shared references; the store is therefore `!Send` and
/// `!Sync`, and a multi-threaded host has to provide its own synchronization
/// around it.
#[derive(Clone)]
pub struct BackingStore {
    bytes: Rc<[Cell<u8>]>,
}

impl BackingStore {
    /// Create a zero-filled store of `len` bytes
    pub fn zeroed(len: usize) -> Self {
        Self {
            bytes: Rc::from(vec![Cell::new(0u8); len]),
        }
    }

    /// Create a store that takes over the given bytes
    pub fn from_vec(bytes: Vec<u8>) -> Self {
        Self {
            bytes: bytes.into_iter().map(Cell::new).collect(),
        }
    }

    /// Length of the store in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Check if the store holds no bytes
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Check whether two handles refer to the same block
    pub fn ptr_eq(&self, other: &BackingStore) -> bool {
        Rc::ptr_eq(&self.bytes, &other.bytes)
    }

    /// Number of live handles (store handles plus views) on this block
    pub fn handle_count(&self) -> usize {
        Rc::strong_count(&self.bytes)
    }

    /// Copy the whole block out
    pub fn to_vec(&self) -> Vec<u8> {
        self.bytes.iter().map(Cell::get).collect()
    }

    pub(crate) fn cells(&self) -> &[Cell<u8>] {
        &self.bytes
    }
}

impl fmt::Debug for BackingStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackingStore")
            .field("len", &self.len())
            .field("handles", &self.handle_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeroed_store() {
        let store = BackingStore::zeroed(16);
        assert_eq!(store.len(), 16);
        assert!(store.to_vec().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_handles_share_bytes() {
        let store = BackingStore::from_vec(vec![1, 2, 3]);
        let other = store.clone();
        assert!(store.ptr_eq(&other));
        assert_eq!(store.handle_count(), 2);

        other.cells()[1].set(9);
        assert_eq!(store.to_vec(), vec![1, 9, 3]);

        drop(other);
        assert_eq!(store.handle_count(), 1);
    }

    #[test]
    fn test_distinct_stores() {
        let a = BackingStore::zeroed(4);
        let b = BackingStore::zeroed(4);
        assert!(!a.ptr_eq(&b));
        assert!(BackingStore::zeroed(0).is_empty());
    }
}

//! Sources of raw, zero-initialized memory blocks

use std::fmt;

use super::store::BackingStore;

/// Supplier of zero-initialized backing stores
///
/// Every block a source returns must be exactly `len` bytes long and read
/// as zero until written.
pub trait BlockSource: fmt::Debug {
    /// Obtain a fresh zero-filled block of `len` bytes
    fn zeroed_block(&self, len: usize) -> BackingStore;

    /// Get source type name for debugging
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Heap-backed block source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeapSource;

impl BlockSource for HeapSource {
    fn zeroed_block(&self, len: usize) -> BackingStore {
        BackingStore::zeroed(len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heap_source_blocks_are_zeroed_and_distinct() {
        let source = HeapSource;
        let a = source.zeroed_block(32);
        let b = source.zeroed_block(32);
        assert_eq!(a.len(), 32);
        assert!(a.to_vec().iter().all(|&v| v == 0));
        assert!(!a.ptr_eq(&b));
        assert!(source.type_name().ends_with("HeapSource"));
    }
}

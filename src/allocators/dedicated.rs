//! Dedicated allocator - one fresh backing store per buffer

use std::rc::Rc;

use super::traits::Allocator;
use crate::{
    buffers::Buffer,
    memory::{BlockSource, HeapSource},
};

/// Allocator that never shares a store between buffers
#[derive(Debug, Clone)]
pub struct DedicatedAllocator {
    source: Rc<dyn BlockSource>,
}

impl DedicatedAllocator {
    /// Create an allocator drawing blocks from `source`
    pub fn new(source: Rc<dyn BlockSource>) -> Self {
        Self { source }
    }

    /// The block source in use
    pub fn source(&self) -> &Rc<dyn BlockSource> {
        &self.source
    }
}

impl Default for DedicatedAllocator {
    fn default() -> Self {
        Self::new(Rc::new(HeapSource))
    }
}

impl Allocator for DedicatedAllocator {
    fn allocate(&self, size: usize) -> Buffer {
        let store = self.source.zeroed_block(size);
        let len = store.len();
        Buffer::from_parts(store, 0, len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedicated_buffers_do_not_alias() {
        let allocator = DedicatedAllocator::default();
        let a = allocator.allocate(16);
        let b = allocator.allocate(16);
        assert_eq!(a.len(), 16);
        assert!(!a.shares_store(&b));
        assert!(!allocator.is_pooled());

        a.set(0, 9).unwrap();
        assert_eq!(b.get(0), Some(0));
    }
}

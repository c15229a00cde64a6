//! Allocator trait definition

use std::fmt;

use crate::buffers::Buffer;

/// Trait for buffer allocators
///
/// An allocator never fails: every request is served either from memory it
/// manages or from a fresh block. Returned buffers are zero-filled.
pub trait Allocator: fmt::Debug {
    /// Allocate a zero-filled buffer of `size` bytes
    fn allocate(&self, size: usize) -> Buffer;

    /// Whether buffers from this allocator may share a store with others
    fn is_pooled(&self) -> bool {
        false
    }

    /// Get allocator type name for debugging
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

//! Backing memory for buffer views
//!
//! A [`BackingStore`] is a fixed-length block of bytes that any number of
//! views may reference at once. Blocks come from a [`BlockSource`], which
//! always hands out zero-initialized memory.

pub mod source;
pub mod store;

pub use source::{BlockSource, HeapSource};
pub use store::BackingStore;

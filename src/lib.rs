//! # slabbuf - Fixed-Layout Byte Buffers
//!
//! slabbuf provides a mutable, indexable view over raw memory with a
//! bump-allocated slab pool, bit-exact fixed-width numeric codecs in both byte
//! orders, text encodings, and byte-level comparison and search.
//!
//! ## Features
//!
//! - **Pooled allocation**: small buffers are carved from a rotating slab
//! - **Zero-copy views**: slicing shares the backing store instead of copying
//! - **Numeric codec**: 8/16/32/64-bit integers, 1-6 byte variable-width
//!   integers, IEEE-754 floats, big- and little-endian
//! - **Text codec**: utf8, utf16le/ucs2, latin1/binary, ascii, base64, hex
//! - **Search**: lexicographic compare, equality, forward/backward search, fill
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                  BufferPool                     │
//! │   slab (bump cursor)  │  dedicated blocks       │
//! └─────────────────────────────────────────────────┘
//!           │                         │
//!           ▼                         ▼
//! ┌─────────────────────────────────────────────────┐
//! │      Buffer = (BackingStore, offset, len)       │
//! ├──────────────┬───────────────┬──────────────────┤
//! │ numeric      │ encoding      │ search / fill    │
//! └──────────────┴───────────────┴──────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use slabbuf::{BufferPool, Encoding};
//!
//! let pool = BufferPool::default();
//! let buf = pool.alloc(8);
//! buf.write_u32_be(0xdead_beef, 0).unwrap();
//! assert_eq!(buf.read_u32_be(0).unwrap(), 0xdead_beef);
//! assert_eq!(buf.to_string_range(Encoding::Hex, 0..4), "deadbeef");
//! ```
//!
//! Buffers are single-threaded: a [`Buffer`] and its [`BackingStore`] are
//! neither `Send` nor `Sync`.

// Core modules
pub mod allocators;
pub mod buffers;
pub mod encoding;
pub mod error;
pub mod memory;

// Main API re-exports
pub use allocators::{Allocator, DedicatedAllocator, Slab, SlabAllocator};
pub use buffers::{
    Buffer, BufferPool, BufferRecord, ByteValue, Element, PoolConfig, PoolConfigBuilder,
    PoolStats,
};
pub use encoding::Encoding;
pub use error::{BufferError, ErrorKind, Result};
pub use memory::{BackingStore, BlockSource, HeapSource};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration constants
pub mod config {
    /// Default capacity of one pool slab (8KB)
    pub const DEFAULT_POOL_SIZE: usize = 8 * 1024;

    /// Default alignment of slab cursor advances
    pub const DEFAULT_ALIGNMENT: usize = 8;

    /// Word size used by the widened equality comparison
    pub const COMPARE_WORD_SIZE: usize = 4;

    /// Largest byte count of a variable-width integer access
    pub const MAX_VARIABLE_WIDTH: usize = 6;

    /// Code units converted per step when building strings from bytes
    pub const MAX_CHAR_CODE_CHUNK: usize = 32 * 1024;
}

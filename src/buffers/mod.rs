//! Buffer views and the pool that hands them out
//!
//! A [`Buffer`] is a window over a shared backing store. Numeric and text
//! codecs, comparison and search all operate on views in place; only
//! constructors and [`Buffer::map`] produce fresh stores.

pub mod buffer;
pub mod config;
pub mod construct;
pub mod numeric;
pub mod pool;
pub mod record;
pub mod search;
pub mod stats;

#[cfg(test)]
mod tests;

// Re-export main types
pub use buffer::Buffer;
pub use config::{PoolConfig, PoolConfigBuilder};
pub use construct::Element;
pub use pool::BufferPool;
pub use record::BufferRecord;
pub use search::ByteValue;
pub use stats::PoolStats;

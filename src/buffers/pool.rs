//! Buffer pool - the allocation front end
//!
//! Owns the slab allocator and exposes the three allocation entry points.
//! `alloc` and `alloc_unsafe` are pooled; `alloc_unsafe_slow` always hands
//! out a dedicated store. All three return zero-filled buffers.

use std::rc::Rc;

use log::debug;

use crate::{
    allocators::{Allocator, SlabAllocator},
    error::{BufferError, Result},
    memory::{BlockSource, HeapSource},
};

use super::{
    buffer::Buffer,
    config::PoolConfig,
    search::{ByteValue, Pattern},
    stats::PoolStats,
};

/// Pooled buffer allocator
///
/// Each pool has its own slab, so separate pools never alias each other's
/// memory and tests can start from a known state.
#[derive(Debug)]
pub struct BufferPool {
    allocator: SlabAllocator,
}

impl BufferPool {
    /// Create a new buffer pool backed by the heap
    pub fn new(config: PoolConfig) -> Result<Self> {
        Self::with_source(config, Rc::new(HeapSource))
    }

    /// Create a new buffer pool drawing slabs and dedicated blocks from `source`
    pub fn with_source(config: PoolConfig, source: Rc<dyn BlockSource>) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_validated(config, source))
    }

    fn from_validated(config: PoolConfig, source: Rc<dyn BlockSource>) -> Self {
        debug!(
            "Creating buffer pool: pool_size={}, alignment={}",
            config.pool_size, config.alignment
        );
        Self {
            allocator: SlabAllocator::new(config, source),
        }
    }

    /// Current configuration
    pub fn config(&self) -> PoolConfig {
        self.allocator.config()
    }

    /// Slab size used for the next rotation
    pub fn pool_size(&self) -> usize {
        self.allocator.config().pool_size
    }

    /// Change the slab size
    ///
    /// The active slab keeps its capacity; the new size is used from the next
    /// rotation on. The large-object threshold follows the new size at once.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidParameter`] for a zero size.
    pub fn set_pool_size(&self, pool_size: usize) -> Result<()> {
        let config = self.config().with_pool_size(pool_size);
        config.validate()?;
        debug!("Pool size changed to {} bytes", pool_size);
        self.allocator.set_config(config);
        Ok(())
    }

    /// Zero-filled buffer of `size` bytes, carved from the slab when small
    pub fn alloc(&self, size: usize) -> Buffer {
        self.allocator.allocate(size)
    }

    /// Buffer of `size` bytes filled with `value`
    ///
    /// `value` is resolved before any memory is taken, so a failure leaves
    /// the slab untouched.
    ///
    /// # Errors
    ///
    /// Propagates text codec failures, and rejects an empty sequence when
    /// `size > 0`.
    pub fn alloc_filled<'a>(&self, size: usize, value: impl Into<ByteValue<'a>>) -> Result<Buffer> {
        let pattern = value.into().resolve()?;
        match &pattern {
            // slabs and dedicated blocks start zeroed
            Pattern::Byte(0) => return Ok(self.alloc(size)),
            Pattern::Sequence(bytes) if bytes.is_empty() && size > 0 => {
                return Err(BufferError::invalid_parameter(
                    "fill",
                    "fill sequence must not be empty",
                ));
            }
            _ => {}
        }
        let buffer = self.alloc(size);
        buffer.fill_pattern(&pattern, ..)?;
        Ok(buffer)
    }

    /// Same as [`BufferPool::alloc`]; memory is always zeroed here
    pub fn alloc_unsafe(&self, size: usize) -> Buffer {
        self.alloc(size)
    }

    /// Zero-filled buffer with a store of its own, never carved from a slab
    pub fn alloc_unsafe_slow(&self, size: usize) -> Buffer {
        self.allocator.dedicated().allocate(size)
    }

    /// Concatenate `list` into one pooled buffer
    ///
    /// `total_length` defaults to the sum of the input lengths. A smaller value
    /// truncates the result; a larger one leaves the tail zeroed.
    pub fn concat(&self, list: &[Buffer], total_length: Option<usize>) -> Buffer {
        let total = total_length.unwrap_or_else(|| list.iter().map(Buffer::len).sum());
        let result = self.alloc(total);
        let mut offset = 0;
        for part in list {
            if offset >= total {
                break;
            }
            offset += part.copy_into(&result, offset, 0, part.len());
        }
        result
    }

    /// Snapshot of the pool counters
    pub fn stats(&self) -> PoolStats {
        self.allocator.stats()
    }

    /// Offset the next pooled buffer would start at
    pub fn cursor(&self) -> usize {
        self.allocator.cursor()
    }

    /// Start over with a fresh slab and zeroed counters
    ///
    /// Buffers handed out earlier stay valid and keep their old slab alive.
    pub fn reset(&self) {
        self.allocator.reset();
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::from_validated(PoolConfig::default(), Rc::new(HeapSource))
    }
}

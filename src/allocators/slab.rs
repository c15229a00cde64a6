//! Slab allocator - bump sub-allocation from a rotating slab with a
//! large-object bypass

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use log::{debug, trace};

use super::{bump::Slab, dedicated::DedicatedAllocator, traits::Allocator};
use crate::{
    buffers::{Buffer, PoolConfig, PoolStats},
    memory::BlockSource,
};

/// Pooled allocator over a single active slab
///
/// * size 0 gets an empty buffer and leaves the slab alone
/// * size `>= ceil(pool_size / 2)` gets a dedicated block
/// * anything else is carved from the active slab, which is replaced by a
///   fresh one of `pool_size` bytes when the request does not fit
///
/// Retired slabs are abandoned, not reused. Their bytes stay alive for as long
/// as any buffer carved from them does.
#[derive(Debug)]
pub struct SlabAllocator {
    config: Cell<PoolConfig>,
    source: Rc<dyn BlockSource>,
    slab: RefCell<Slab>,
    dedicated: DedicatedAllocator,
    stats: RefCell<PoolStats>,
}

impl SlabAllocator {
    /// Create an allocator with its first slab already in place
    ///
    /// `config` is expected to be validated by the caller.
    pub fn new(config: PoolConfig, source: Rc<dyn BlockSource>) -> Self {
        let slab = Slab::new(source.zeroed_block(config.pool_size));
        let stats = PoolStats {
            slabs_created: 1,
            ..PoolStats::default()
        };
        Self {
            config: Cell::new(config),
            dedicated: DedicatedAllocator::new(Rc::clone(&source)),
            source,
            slab: RefCell::new(slab),
            stats: RefCell::new(stats),
        }
    }

    /// Current configuration
    pub fn config(&self) -> PoolConfig {
        self.config.get()
    }

    /// Replace the configuration; the active slab keeps its size until it is
    /// rotated out
    pub fn set_config(&self, config: PoolConfig) {
        self.config.set(config);
    }

    /// Allocator used for the large-object bypass
    pub fn dedicated(&self) -> &DedicatedAllocator {
        &self.dedicated
    }

    /// Offset the next pooled buffer would start at
    pub fn cursor(&self) -> usize {
        self.slab.borrow().cursor()
    }

    /// Capacity of the active slab
    pub fn slab_capacity(&self) -> usize {
        self.slab.borrow().capacity()
    }

    /// Snapshot of the counters
    pub fn stats(&self) -> PoolStats {
        *self.stats.borrow()
    }

    /// Drop the active slab and start a fresh one with the current
    /// configuration; counters restart from the new slab
    pub fn reset(&self) {
        let config = self.config.get();
        *self.slab.borrow_mut() = Slab::new(self.source.zeroed_block(config.pool_size));
        let mut stats = self.stats.borrow_mut();
        stats.reset();
        stats.slabs_created = 1;
    }

    fn allocate_dedicated(&self, size: usize) -> Buffer {
        self.stats.borrow_mut().dedicated_allocations += 1;
        self.dedicated.allocate(size)
    }

    fn rotate(&self, slab: &mut Slab, config: PoolConfig) {
        let abandoned = slab.remaining();
        debug!(
            "Retiring slab of {} bytes with {} unused, new slab of {} bytes",
            slab.capacity(),
            abandoned,
            config.pool_size
        );
        *slab = Slab::new(self.source.zeroed_block(config.pool_size));
        let mut stats = self.stats.borrow_mut();
        stats.slabs_created += 1;
        stats.abandoned_bytes += abandoned as u64;
    }
}

impl Allocator for SlabAllocator {
    fn allocate(&self, size: usize) -> Buffer {
        if size == 0 {
            self.stats.borrow_mut().empty_allocations += 1;
            return Buffer::empty();
        }

        let config = self.config.get();
        if size >= config.large_object_threshold() {
            trace!(
                "Request of {} bytes bypasses the slab (threshold {})",
                size,
                config.large_object_threshold()
            );
            return self.allocate_dedicated(size);
        }

        let mut slab = self.slab.borrow_mut();
        if !slab.can_allocate_size(size) {
            self.rotate(&mut slab, config);
        }

        let before = slab.cursor();
        match slab.carve(size, config.alignment) {
            Some(buffer) => {
                let mut stats = self.stats.borrow_mut();
                stats.pooled_allocations += 1;
                stats.pooled_bytes += size as u64;
                stats.padding_bytes += (slab.cursor() - before - size) as u64;
                buffer
            }
            None => {
                drop(slab);
                self.allocate_dedicated(size)
            }
        }
    }

    fn is_pooled(&self) -> bool {
        true
    }
}

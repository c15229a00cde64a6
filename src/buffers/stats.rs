//! Buffer pool statistics tracking

/// Counters kept by a [`BufferPool`](super::BufferPool)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Number of slabs created, including the first one
    pub slabs_created: u64,
    /// Buffers carved out of a slab
    pub pooled_allocations: u64,
    /// Buffers that got a store of their own
    pub dedicated_allocations: u64,
    /// Zero-length requests
    pub empty_allocations: u64,
    /// Bytes handed out from slabs
    pub pooled_bytes: u64,
    /// Bytes skipped to keep slab offsets aligned
    pub padding_bytes: u64,
    /// Bytes left unused in slabs that were retired
    pub abandoned_bytes: u64,
}

impl PoolStats {
    /// Create new statistics instance
    pub fn new() -> Self {
        Default::default()
    }

    /// Total number of allocation requests served
    pub fn total_allocations(&self) -> u64 {
        self.pooled_allocations + self.dedicated_allocations + self.empty_allocations
    }

    /// Share of non-empty allocations served from a slab (0.0 to 1.0)
    pub fn pooled_ratio(&self) -> f64 {
        let sized = self.pooled_allocations + self.dedicated_allocations;
        if sized == 0 {
            return 0.0;
        }
        self.pooled_allocations as f64 / sized as f64
    }

    /// Get a summary string of the statistics
    pub fn summary(&self) -> String {
        format!(
            "PoolStats {{ slabs: {}, pooled: {}, dedicated: {}, empty: {}, \
             pooled_bytes: {}, padding: {}, abandoned: {}, pooled_ratio: {:.2}% }}",
            self.slabs_created,
            self.pooled_allocations,
            self.dedicated_allocations,
            self.empty_allocations,
            self.pooled_bytes,
            self.padding_bytes,
            self.abandoned_bytes,
            self.pooled_ratio() * 100.0
        )
    }

    /// Reset all statistics
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

//! Buffer pool configuration

use serde::{Deserialize, Serialize};

use crate::{
    config::{DEFAULT_ALIGNMENT, DEFAULT_POOL_SIZE},
    error::{BufferError, Result},
};

/// Configuration for a [`BufferPool`](super::BufferPool)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Size of each slab in bytes
    pub pool_size: usize,
    /// Every pooled buffer starts at a multiple of this offset in its slab
    pub alignment: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            pool_size: DEFAULT_POOL_SIZE,
            alignment: DEFAULT_ALIGNMENT,
        }
    }
}

impl PoolConfig {
    /// Create a configuration with the default slab size and alignment
    pub fn new() -> Self {
        Self::default()
    }

    /// Set slab size
    pub fn with_pool_size(mut self, size: usize) -> Self {
        self.pool_size = size;
        self
    }

    /// Set slab alignment
    pub fn with_alignment(mut self, alignment: usize) -> Self {
        self.alignment = alignment;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.pool_size == 0 {
            return Err(BufferError::invalid_parameter(
                "pool_size",
                "Pool size cannot be zero",
            ));
        }

        if !self.alignment.is_power_of_two() {
            return Err(BufferError::invalid_parameter(
                "alignment",
                "Alignment must be a power of two",
            ));
        }

        Ok(())
    }

    /// Requests of at least this many bytes bypass the slab
    ///
    /// Half the pool size, rounded up, so an odd pool size still pools a
    /// request of exactly `pool_size / 2` bytes.
    pub fn large_object_threshold(&self) -> usize {
        self.pool_size / 2 + self.pool_size % 2
    }
}

/// Builder pattern for pool configuration
#[derive(Debug, Default)]
pub struct PoolConfigBuilder {
    config: PoolConfig,
}

impl PoolConfigBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set slab size
    pub fn pool_size(mut self, size: usize) -> Self {
        self.config.pool_size = size;
        self
    }

    /// Set alignment
    pub fn alignment(mut self, alignment: usize) -> Self {
        self.config.alignment = alignment;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<PoolConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

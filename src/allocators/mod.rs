//! Buffer allocation strategies

pub mod bump;
pub mod dedicated;
pub mod slab;
pub mod traits;

pub use bump::Slab;
pub use dedicated::DedicatedAllocator;
pub use slab::SlabAllocator;
pub use traits::Allocator;

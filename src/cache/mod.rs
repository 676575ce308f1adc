//! Tiered read-through cache: bounded memory tier + shared tier.

pub mod memory;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod shared;
pub mod tier;
pub mod tiered;
pub mod types;

#[cfg(test)]
mod tiered_tests;

pub use memory::BoundedMemoryTier;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockSharedTier;
pub use shared::SharedTier;
pub use tier::{CacheTier, TierError, TierResult};
pub use tiered::TieredCache;
pub use types::{CacheStats, CacheStatsSnapshot};

//! Cache statistics.

use serde::Serialize;

/// Mutable hit/miss counters owned by one [`super::TieredCache`] instance.
///
/// Invariants: `hits + misses` equals the number of `get` calls since the last
/// reset, and `sum(hits_per_tier) == hits`.
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    hits: u64,
    misses: u64,
    hits_per_tier: Vec<u64>,
}

impl CacheStats {
    pub(crate) fn for_tiers(tier_count: usize) -> Self {
        Self {
            hits: 0,
            misses: 0,
            hits_per_tier: vec![0; tier_count],
        }
    }

    pub(crate) fn record_hit(&mut self, tier_index: usize) {
        self.hits += 1;
        if let Some(slot) = self.hits_per_tier.get_mut(tier_index) {
            *slot += 1;
        }
    }

    pub(crate) fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub(crate) fn reset(&mut self) {
        self.hits = 0;
        self.misses = 0;
        self.hits_per_tier.fill(0);
    }

    pub(crate) fn snapshot(&self) -> CacheStatsSnapshot {
        let total_requests = self.hits + self.misses;
        let hit_rate = if total_requests == 0 {
            0.0
        } else {
            self.hits as f64 / total_requests as f64
        };

        CacheStatsSnapshot {
            hits: self.hits,
            misses: self.misses,
            total_requests,
            hit_rate,
            hits_per_tier: self.hits_per_tier.clone(),
        }
    }
}

/// Point-in-time view of the cache counters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheStatsSnapshot {
    pub hits: u64,
    pub misses: u64,
    pub total_requests: u64,
    /// `hits / total_requests`, `0.0` when no requests have occurred.
    pub hit_rate: f64,
    /// Hit count per tier, in probing order (fastest first).
    pub hits_per_tier: Vec<u64>,
}

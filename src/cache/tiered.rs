//! Read-through tiered cache with promotion and fan-out writes.

use std::time::Duration;

use parking_lot::Mutex;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use super::memory::BoundedMemoryTier;
use super::shared::SharedTier;
use super::tier::CacheTier;
use super::types::{CacheStats, CacheStatsSnapshot};
use crate::config::Config;
use crate::hashing::{self, CacheKey, KeyArgs, KeyResult};

/// Ordered chain of cache tiers, fastest first.
///
/// Lookups probe front-to-back; a hit in a slower tier is copied into every
/// faster tier (promotion) so the next identical request is served cheaply.
/// Fresh values are written to every tier unconditionally; TTLs bound the
/// staleness that promotion copies can accumulate, and no proactive
/// invalidation of promoted copies is attempted.
///
/// A tier fault is never surfaced to the caller: an unreachable tier reads as
/// a miss and write failures degrade replication, nothing more. Only key
/// derivation ([`crate::hashing::KeyError`]) can fail, since without a key
/// there is nothing to probe.
pub struct TieredCache {
    tiers: Vec<Box<dyn CacheTier>>,
    stats: Mutex<CacheStats>,
}

impl TieredCache {
    /// Builds a cache over `tiers`, probing them in the order given.
    pub fn new(tiers: Vec<Box<dyn CacheTier>>) -> Self {
        let stats = Mutex::new(CacheStats::for_tiers(tiers.len()));
        Self { tiers, stats }
    }

    /// Builds the tier chain described by `config`.
    ///
    /// The memory tier is created if enabled; the shared tier is attempted and
    /// simply omitted when the store is unreachable, leaving a smaller but
    /// functional cache.
    pub async fn from_config(config: &Config) -> Self {
        let mut tiers: Vec<Box<dyn CacheTier>> = Vec::with_capacity(2);

        if config.memory_tier_enabled {
            info!(
                capacity = config.memory_capacity,
                ttl_secs = config.memory_ttl_secs,
                "Memory tier enabled"
            );
            tiers.push(Box::new(BoundedMemoryTier::new(
                config.memory_capacity,
                config.memory_ttl(),
            )));
        }

        if config.shared_tier_enabled {
            match SharedTier::connect(&config.redis_url, config.shared_ttl()).await {
                Ok(tier) => {
                    info!(url = %config.redis_url, "Shared tier enabled");
                    tiers.push(Box::new(tier));
                }
                Err(e) => {
                    warn!(url = %config.redis_url, error = %e, "Shared tier unavailable, continuing without it");
                }
            }
        }

        Self::new(tiers)
    }

    /// Number of active tiers.
    pub fn tier_count(&self) -> usize {
        self.tiers.len()
    }

    /// Active tier names in probing order.
    pub fn tier_names(&self) -> Vec<&str> {
        self.tiers.iter().map(|t| t.name()).collect()
    }

    /// Looks up the value cached for `(namespace, args)`.
    ///
    /// Probes tiers front-to-back; the first hit is promoted into every faster
    /// tier and returned. Fails only when the key cannot be derived.
    #[instrument(skip(self, args), fields(namespace = namespace))]
    pub async fn get(&self, namespace: &str, args: &KeyArgs) -> KeyResult<Option<Value>> {
        let key = hashing::make_key(namespace, args)?;
        Ok(self.get_by_key(&key).await)
    }

    /// Looks up a precomputed key.
    pub async fn get_by_key(&self, key: &CacheKey) -> Option<Value> {
        for (index, tier) in self.tiers.iter().enumerate() {
            match tier.get(key).await {
                Ok(Some(value)) => {
                    debug!(tier = tier.name(), index, "Cache hit");
                    self.promote(key, &value, index).await;
                    self.stats.lock().record_hit(index);
                    return Some(value);
                }
                Ok(None) => {
                    debug!(tier = tier.name(), "Tier miss");
                }
                Err(e) => {
                    warn!(tier = tier.name(), error = %e, "Tier unreachable during get, treating as miss");
                }
            }
        }

        self.stats.lock().record_miss();
        None
    }

    /// Copies a value found at tier `found_at` into every faster tier.
    ///
    /// Best-effort: promotion writes use each target tier's default TTL, and a
    /// failure is logged without affecting the returned value. The writes are
    /// idempotent and re-derivable, so an abandoned promotion is harmless.
    async fn promote(&self, key: &CacheKey, value: &Value, found_at: usize) {
        for tier in &self.tiers[..found_at] {
            match tier.set(key, value, tier.default_ttl()).await {
                Ok(()) => debug!(tier = tier.name(), "Promoted entry to faster tier"),
                Err(e) => {
                    warn!(tier = tier.name(), error = %e, "Promotion write failed, value still served");
                }
            }
        }
    }

    /// Writes `value` for `(namespace, args)` to every tier with `ttl`.
    ///
    /// This is the only write path for fresh values. Per-tier failures are
    /// collected into a single warning; partial replication is acceptable
    /// because the remaining tiers still serve the key.
    #[instrument(skip(self, value, args), fields(namespace = namespace))]
    pub async fn set(
        &self,
        namespace: &str,
        value: &Value,
        ttl: Duration,
        args: &KeyArgs,
    ) -> KeyResult<()> {
        let key = hashing::make_key(namespace, args)?;
        self.set_by_key(&key, value, ttl).await;
        Ok(())
    }

    /// Fan-out write under a precomputed key.
    pub async fn set_by_key(&self, key: &CacheKey, value: &Value, ttl: Duration) {
        let mut failed: Vec<&str> = Vec::new();

        for tier in &self.tiers {
            if let Err(e) = tier.set(key, value, ttl).await {
                debug!(tier = tier.name(), error = %e, "Tier write failed");
                failed.push(tier.name());
            }
        }

        if !failed.is_empty() {
            warn!(key = %key, tiers = ?failed, "Partial cache write; remaining tiers still serve this key");
        }
    }

    /// Deletes the entry for `(namespace, args)` from every tier.
    #[instrument(skip(self, args), fields(namespace = namespace))]
    pub async fn delete(&self, namespace: &str, args: &KeyArgs) -> KeyResult<()> {
        let key = hashing::make_key(namespace, args)?;
        self.delete_by_key(&key).await;
        Ok(())
    }

    /// Fan-out delete under a precomputed key.
    pub async fn delete_by_key(&self, key: &CacheKey) {
        let mut failed: Vec<&str> = Vec::new();

        for tier in &self.tiers {
            if let Err(e) = tier.delete(key).await {
                debug!(tier = tier.name(), error = %e, "Tier delete failed");
                failed.push(tier.name());
            }
        }

        if !failed.is_empty() {
            warn!(key = %key, tiers = ?failed, "Partial cache delete; stale copies expire via TTL");
        }
    }

    /// Point-in-time view of the hit/miss counters.
    pub fn stats(&self) -> CacheStatsSnapshot {
        self.stats.lock().snapshot()
    }

    /// Zeroes all counters. Counters are never reset implicitly.
    pub fn reset_stats(&self) {
        self.stats.lock().reset();
    }
}

impl std::fmt::Debug for TieredCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TieredCache")
            .field("tiers", &self.tier_names())
            .field("stats", &self.stats.lock().snapshot())
            .finish()
    }
}

//! Bounded in-process tier (fastest).

use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use lru::LruCache;
use parking_lot::Mutex;
use serde_json::Value;
use tracing::debug;

use super::tier::{CacheTier, TierResult};
use crate::constants::{DEFAULT_MEMORY_CAPACITY, DEFAULT_MEMORY_TTL_SECS};
use crate::hashing::CacheKey;

#[derive(Debug, Clone)]
struct StoredEntry {
    value: Value,
    expires_at: Instant,
}

impl StoredEntry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Fixed-capacity in-memory tier with least-recently-used eviction and
/// per-entry TTL.
///
/// Expiry is checked lazily on `get`; an entry past its deadline is dropped
/// and reported as a miss. When full, inserting a new key evicts the least
/// recently accessed entry regardless of its remaining TTL.
pub struct BoundedMemoryTier {
    entries: Mutex<LruCache<String, StoredEntry>>,
    default_ttl: Duration,
}

impl BoundedMemoryTier {
    /// Creates a tier holding at most `capacity` entries (minimum 1).
    pub fn new(capacity: usize, default_ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            default_ttl,
        }
    }

    /// Creates a tier with the default capacity and TTL.
    pub fn with_defaults() -> Self {
        Self::new(
            DEFAULT_MEMORY_CAPACITY,
            Duration::from_secs(DEFAULT_MEMORY_TTL_SECS),
        )
    }

    /// Returns the number of stored entries, including not-yet-collected
    /// expired ones.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Returns `true` if the tier holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Returns `true` if `key` is present and unexpired, without touching
    /// recency order.
    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries
            .lock()
            .peek(key.as_str())
            .is_some_and(|entry| !entry.is_expired(Instant::now()))
    }

    /// Removes all entries.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl Default for BoundedMemoryTier {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for BoundedMemoryTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let entries = self.entries.lock();
        f.debug_struct("BoundedMemoryTier")
            .field("len", &entries.len())
            .field("capacity", &entries.cap().get())
            .field("default_ttl", &self.default_ttl)
            .finish()
    }
}

#[async_trait]
impl CacheTier for BoundedMemoryTier {
    fn name(&self) -> &str {
        "memory"
    }

    fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    async fn get(&self, key: &CacheKey) -> TierResult<Option<Value>> {
        let mut entries = self.entries.lock();

        let expired = match entries.peek(key.as_str()) {
            Some(entry) => entry.is_expired(Instant::now()),
            None => return Ok(None),
        };

        if expired {
            entries.pop(key.as_str());
            debug!(key = %key, "Expired entry dropped from memory tier");
            return Ok(None);
        }

        // A live hit refreshes recency order.
        Ok(entries.get(key.as_str()).map(|entry| entry.value.clone()))
    }

    async fn set(&self, key: &CacheKey, value: &Value, ttl: Duration) -> TierResult<()> {
        let entry = StoredEntry {
            value: value.clone(),
            expires_at: Instant::now() + ttl,
        };

        let mut entries = self.entries.lock();
        if let Some((evicted, _)) = entries.push(key.as_str().to_string(), entry) {
            if evicted != key.as_str() {
                debug!(evicted = %evicted, "Memory tier full, evicted least recently used entry");
            }
        }

        Ok(())
    }

    async fn delete(&self, key: &CacheKey) -> TierResult<()> {
        self.entries.lock().pop(key.as_str());
        Ok(())
    }
}

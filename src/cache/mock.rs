//! In-memory stand-in for the shared tier.
//!
//! Mirrors the wire contract: values are stored as serialized JSON strings
//! with a server-side expiry, so round-trip behavior matches the real store.
//! An outage flag lets tests drive the unavailable paths without a network.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use super::tier::{CacheTier, TierError, TierResult};
use crate::constants::DEFAULT_SHARED_TTL_SECS;
use crate::hashing::CacheKey;

#[derive(Clone)]
struct MockEntry {
    payload: String,
    expires_at: Instant,
}

/// Test double for [`super::SharedTier`].
#[derive(Clone)]
pub struct MockSharedTier {
    entries: Arc<Mutex<HashMap<String, MockEntry>>>,
    down: Arc<AtomicBool>,
    default_ttl: Duration,
}

impl MockSharedTier {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            down: Arc::new(AtomicBool::new(false)),
            default_ttl: Duration::from_secs(DEFAULT_SHARED_TTL_SECS),
        }
    }

    /// Simulates the store going down (`true`) or recovering (`false`).
    pub fn set_down(&self, down: bool) {
        self.down.store(down, Ordering::SeqCst);
    }

    /// Number of stored entries, including expired ones not yet collected.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Returns `true` if `key` is present and unexpired.
    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries
            .lock()
            .get(key.as_str())
            .is_some_and(|entry| Instant::now() < entry.expires_at)
    }

    fn check_up(&self) -> TierResult<()> {
        if self.down.load(Ordering::SeqCst) {
            return Err(TierError::Unavailable {
                tier: self.name().to_string(),
                reason: "simulated outage".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for MockSharedTier {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MockSharedTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockSharedTier")
            .field("len", &self.len())
            .field("down", &self.down.load(Ordering::SeqCst))
            .finish()
    }
}

#[async_trait]
impl CacheTier for MockSharedTier {
    fn name(&self) -> &str {
        "shared"
    }

    fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    async fn get(&self, key: &CacheKey) -> TierResult<Option<Value>> {
        self.check_up()?;

        let mut entries = self.entries.lock();
        let Some(entry) = entries.get(key.as_str()) else {
            return Ok(None);
        };

        if Instant::now() >= entry.expires_at {
            entries.remove(key.as_str());
            return Ok(None);
        }

        match serde_json::from_str(&entry.payload) {
            Ok(value) => Ok(Some(value)),
            Err(_) => Ok(None),
        }
    }

    async fn set(&self, key: &CacheKey, value: &Value, ttl: Duration) -> TierResult<()> {
        self.check_up()?;

        let payload = serde_json::to_string(value).map_err(|e| TierError::Unavailable {
            tier: self.name().to_string(),
            reason: e.to_string(),
        })?;

        self.entries.lock().insert(
            key.as_str().to_string(),
            MockEntry {
                payload,
                expires_at: Instant::now() + ttl,
            },
        );

        Ok(())
    }

    async fn delete(&self, key: &CacheKey) -> TierResult<()> {
        self.check_up()?;
        self.entries.lock().remove(key.as_str());
        Ok(())
    }
}

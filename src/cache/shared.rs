//! Shared (networked) tier backed by Redis.
//!
//! Values cross the wire as JSON strings via `SETEX`/`GET`/`DEL`, so anything
//! stored here round-trips exactly through `set` then `get`. Construction is
//! fallible; callers drop the tier and degrade when the store is unreachable.

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use serde_json::Value;
use tracing::{debug, warn};

use super::tier::{CacheTier, TierError, TierResult};
use crate::constants::DEFAULT_SHARED_TTL_SECS;
use crate::hashing::CacheKey;

const TIER_NAME: &str = "shared";

/// Cache tier proxying to a shared Redis store.
pub struct SharedTier {
    conn: ConnectionManager,
    url: String,
    default_ttl: Duration,
}

impl SharedTier {
    /// Connects to the store at `url` and verifies it responds.
    pub async fn connect(url: &str, default_ttl: Duration) -> TierResult<Self> {
        let client = redis::Client::open(url).map_err(|e| unavailable(&e))?;

        let mut conn = ConnectionManager::new(client)
            .await
            .map_err(|e| unavailable(&e))?;

        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| unavailable(&e))?;

        debug!(url, "Connected to shared cache tier");

        Ok(Self {
            conn,
            url: url.to_string(),
            default_ttl,
        })
    }

    /// Connects with the default TTL.
    pub async fn connect_with_defaults(url: &str) -> TierResult<Self> {
        Self::connect(url, Duration::from_secs(DEFAULT_SHARED_TTL_SECS)).await
    }

    /// Returns the store URL this tier was built with.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl std::fmt::Debug for SharedTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedTier")
            .field("url", &self.url)
            .field("default_ttl", &self.default_ttl)
            .finish_non_exhaustive()
    }
}

fn unavailable(err: &dyn std::fmt::Display) -> TierError {
    TierError::Unavailable {
        tier: TIER_NAME.to_string(),
        reason: err.to_string(),
    }
}

#[async_trait]
impl CacheTier for SharedTier {
    fn name(&self) -> &str {
        TIER_NAME
    }

    fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    async fn get(&self, key: &CacheKey) -> TierResult<Option<Value>> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = conn
            .get(key.as_str())
            .await
            .map_err(|e| unavailable(&e))?;

        let Some(raw) = raw else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                // A corrupt entry is served as a miss; the next set overwrites it.
                warn!(key = %key, error = %e, "Discarding undecodable shared-tier entry");
                Ok(None)
            }
        }
    }

    async fn set(&self, key: &CacheKey, value: &Value, ttl: Duration) -> TierResult<()> {
        let payload = serde_json::to_string(value).map_err(|e| unavailable(&e))?;

        let mut conn = self.conn.clone();
        conn.set_ex::<_, _, ()>(key.as_str(), payload, ttl.as_secs().max(1))
            .await
            .map_err(|e| unavailable(&e))
    }

    async fn delete(&self, key: &CacheKey) -> TierResult<()> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(key.as_str())
            .await
            .map_err(|e| unavailable(&e))
    }
}

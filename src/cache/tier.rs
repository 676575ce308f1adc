//! Cache tier capability interface.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::hashing::CacheKey;

/// Errors a cache tier can raise at call time.
///
/// A plain miss is never an error; `get` reports it as `Ok(None)`.
#[derive(Debug, Error)]
pub enum TierError {
    /// The backing medium is unreachable.
    #[error("cache tier '{tier}' unavailable: {reason}")]
    Unavailable { tier: String, reason: String },
}

/// Convenience result type for tier operations.
pub type TierResult<T> = Result<T, TierError>;

/// Uniform get/set/delete contract over one cache backend.
///
/// Each operation is independently fallible. Implementations serialize their
/// own internal bookkeeping; callers never hold one tier's lock across a call
/// into another tier.
#[async_trait]
pub trait CacheTier: Send + Sync {
    /// Short tier name used in logs and warnings.
    fn name(&self) -> &str;

    /// TTL applied to promotion writes into this tier.
    fn default_ttl(&self) -> Duration;

    /// Looks up `key`. A miss is `Ok(None)`, never an error.
    async fn get(&self, key: &CacheKey) -> TierResult<Option<Value>>;

    /// Stores `value` under `key` with `ttl`, overwriting any existing entry.
    async fn set(&self, key: &CacheKey, value: &Value, ttl: Duration) -> TierResult<()>;

    /// Removes `key`. Removing an absent key is not an error.
    async fn delete(&self, key: &CacheKey) -> TierResult<()>;
}

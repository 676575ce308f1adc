//! Cached query façade.
//!
//! Composes the tiered cache with the adaptive reranker: a repeated query is
//! served straight from cache, a fresh one goes through policy selection and
//! the engine, and its response is fanned out to every tier afterwards.
//!
//! The two underlying components stay independent; this façade is just the
//! common wiring for callers that want both.


use std::time::Duration;

use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::cache::TieredCache;
use crate::config::Config;
use crate::constants::NS_LLM_RESPONSE;
use crate::engine::{EngineResult, QueryEngine};
use crate::hashing::{self, CacheKey, KeyArgs};
use crate::rerank::{AdaptiveReranker, QueryMetadata};

/// Response from the cached query path.
#[derive(Debug, Clone, serde::Serialize)]
pub struct CachedResponse {
    pub response: String,
    /// Policy metadata for fresh responses; `None` when served from cache.
    pub metadata: Option<QueryMetadata>,
    pub cache_hit: bool,
}

/// Adaptive reranking engine fronted by a tiered response cache.
pub struct CachedEngine<E: QueryEngine> {
    reranker: AdaptiveReranker<E>,
    cache: TieredCache,
    llm_response_ttl: Duration,
}

impl<E: QueryEngine> CachedEngine<E> {
    /// Wraps `engine` with `cache`, using the default LLM-response TTL.
    pub fn new(engine: E, cache: TieredCache) -> Self {
        Self::with_config(engine, cache, &Config::default())
    }

    /// Wraps `engine` with `cache`, taking TTL policy from `config`.
    pub fn with_config(engine: E, cache: TieredCache, config: &Config) -> Self {
        Self {
            reranker: AdaptiveReranker::new(engine),
            cache,
            llm_response_ttl: config.ttl_for(NS_LLM_RESPONSE),
        }
    }

    /// Returns the adaptive reranker (and through it, policy statistics).
    pub fn reranker(&self) -> &AdaptiveReranker<E> {
        &self.reranker
    }

    /// Returns the response cache (and through it, hit/miss statistics).
    pub fn cache(&self) -> &TieredCache {
        &self.cache
    }

    /// Serves `query` from cache when possible, otherwise classifies it, runs
    /// the engine under the chosen rerank policy, and caches the response.
    ///
    /// A cache-layer fault never fails the query; the worst case is a slower
    /// response or reduced replication. Engine failures propagate unchanged
    /// and leave nothing cached.
    #[instrument(skip(self, query), fields(query_len = query.len(), mode = mode, top_k = top_k))]
    pub async fn query(
        &self,
        query: &str,
        mode: &str,
        top_k: usize,
    ) -> EngineResult<CachedResponse> {
        let key = self.response_key(query, mode, top_k);

        if let Some(key) = &key {
            if let Some(Value::String(response)) = self.cache.get_by_key(key).await {
                debug!("Response served from cache, engine skipped");
                return Ok(CachedResponse {
                    response,
                    metadata: None,
                    cache_hit: true,
                });
            }
        }

        let fresh = self.reranker.query(query, mode, top_k).await?;

        if let Some(key) = &key {
            self.cache
                .set_by_key(key, &Value::String(fresh.response.clone()), self.llm_response_ttl)
                .await;
        }

        Ok(CachedResponse {
            response: fresh.response,
            metadata: Some(fresh.metadata),
            cache_hit: false,
        })
    }

    /// Derives the response-cache key for `(query, mode, top_k)`.
    ///
    /// The arguments are plain strings and integers, so derivation cannot
    /// fail in practice; if it ever does, the query proceeds uncached rather
    /// than failing.
    fn response_key(&self, query: &str, mode: &str, top_k: usize) -> Option<CacheKey> {
        let args = KeyArgs::new()
            .arg(query)
            .named("mode", mode)
            .named("top_k", top_k);

        match hashing::make_key(NS_LLM_RESPONSE, &args) {
            Ok(key) => Some(key),
            Err(e) => {
                warn!(error = %e, "Response key derivation failed, query proceeds uncached");
                None
            }
        }
    }
}

impl<E: QueryEngine> std::fmt::Debug for CachedEngine<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedEngine")
            .field("cache", &self.cache)
            .field("llm_response_ttl", &self.llm_response_ttl)
            .finish_non_exhaustive()
    }
}

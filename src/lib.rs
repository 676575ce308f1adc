//! Slipstream library crate: a performance layer in front of a
//! retrieval-augmented generation engine.
//!
//! Two components carry the weight:
//!
//! - a tiered response cache ([`TieredCache`]) with read-through promotion,
//!   fan-out writes, and composite key hashing ([`make_key`]);
//! - an adaptive reranking layer ([`AdaptiveReranker`]) that classifies each
//!   query ([`QueryClassifier`]) and skips or narrows the engine's expensive
//!   reranking stage accordingly.
//!
//! The two are composable but independent; [`CachedEngine`] wires them
//! together for callers that want both. The retrieval/generation engine
//! itself is an opaque collaborator behind the [`QueryEngine`] trait.
//!
//! # Public API Surface
//!
//! ## Core Types (Stable)
//! - [`Config`], [`ConfigError`] - Construction-time configuration
//! - [`TieredCache`], [`CacheTier`], [`BoundedMemoryTier`], [`SharedTier`] - Cache infrastructure
//! - [`QueryClassifier`], [`QueryComplexity`] - Complexity classification
//! - [`AdaptiveReranker`], [`RerankPolicy`] - Adaptive reranking
//! - [`CachedEngine`] - Cache + reranker façade
//!
//! ## Utilities
//! - [`make_key`], [`KeyArgs`], [`CacheKey`] - Composite cache keys
//! - [`CacheStatsSnapshot`], [`RerankStatsSnapshot`] - Statistics views
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod cache;
pub mod classifier;
pub mod config;
pub mod constants;
pub mod engine;
pub mod hashing;
pub mod rerank;
pub mod service;

pub use cache::{
    BoundedMemoryTier, CacheStats, CacheStatsSnapshot, CacheTier, SharedTier, TierError,
    TierResult, TieredCache,
};
#[cfg(any(test, feature = "mock"))]
pub use cache::MockSharedTier;

pub use classifier::{
    Classification, ClassifierError, ClassifierResult, ClassifierRules, QueryClassifier,
    QueryComplexity,
};

pub use config::{Config, ConfigError};

pub use engine::{EngineError, EngineRequest, EngineResult, QueryEngine, ResponseChunks};
#[cfg(any(test, feature = "mock"))]
pub use engine::MockQueryEngine;

pub use hashing::{CacheKey, KeyArgs, KeyError, KeyResult, make_key};

pub use rerank::{
    AdaptiveReranker, QueryMetadata, RerankPolicy, RerankStatsSnapshot, RerankedResponse,
};

pub use service::{CachedEngine, CachedResponse};

//! Cross-cutting, shared constants.
//!
//! Prefer deriving secondary constants from primary ones to avoid drift.

/// Cache namespace for full LLM responses (expensive to regenerate).
pub const NS_LLM_RESPONSE: &str = "llm_response";
/// Cache namespace for raw retrieval results (may change with index updates).
pub const NS_RETRIEVAL: &str = "retrieval";
/// Cache namespace for embeddings (very stable).
pub const NS_EMBEDDING: &str = "embedding";

/// Default TTL for cached LLM responses: 24 hours.
pub const DEFAULT_LLM_RESPONSE_TTL_SECS: u64 = 24 * 60 * 60;
/// Default TTL for cached retrieval results: 1 hour.
pub const DEFAULT_RETRIEVAL_TTL_SECS: u64 = 60 * 60;
/// Default TTL for cached embeddings: 7 days.
pub const DEFAULT_EMBEDDING_TTL_SECS: u64 = 7 * 24 * 60 * 60;

/// Default max entry count for the in-process memory tier.
pub const DEFAULT_MEMORY_CAPACITY: usize = 1000;
/// Default TTL applied by the memory tier when none is given: 1 hour.
pub const DEFAULT_MEMORY_TTL_SECS: u64 = 60 * 60;
/// Default TTL applied by the shared tier when none is given: 1 hour.
pub const DEFAULT_SHARED_TTL_SECS: u64 = 60 * 60;

/// Default Redis URL for the shared tier.
pub const DEFAULT_REDIS_URL: &str = "redis://localhost:6379";

/// Default number of candidates retrieved before reranking.
pub const DEFAULT_TOP_K: usize = 60;
/// Rerank depth for moderate-complexity queries (partial rerank).
pub const MODERATE_RERANK_DEPTH: usize = 30;

/// Estimated seconds saved by skipping the reranker on a simple query.
pub const SIMPLE_TIME_SAVED_SECS: f64 = 3.0;
/// Estimated seconds saved by partial reranking on a moderate query.
pub const MODERATE_TIME_SAVED_SECS: f64 = 1.5;

/// Word count above which a query is at least moderate.
pub const MODERATE_WORD_COUNT: usize = 10;
/// Word count above which a query is complex.
pub const COMPLEX_WORD_COUNT: usize = 20;
/// Distinct complexity indicators at which a query is complex.
pub const COMPLEX_INDICATOR_COUNT: usize = 2;

//! Adaptive reranking policy.
//!
//! Classifies each query and narrows or skips the engine's reranking stage
//! accordingly: simple queries skip reranking entirely, moderate queries
//! rerank a fixed prefix of the candidates, complex queries keep the full
//! pass.

#[cfg(test)]
mod tests;

use std::time::{Duration, Instant};

use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::classifier::{QueryClassifier, QueryComplexity};
use crate::constants::{MODERATE_RERANK_DEPTH, MODERATE_TIME_SAVED_SECS, SIMPLE_TIME_SAVED_SECS};
use crate::engine::{EngineRequest, EngineResult, QueryEngine};

/// Reranking strategy derived from query complexity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RerankPolicy {
    pub use_reranker: bool,
    /// Number of top candidates to rerank; `0` when reranking is skipped.
    pub rerank_depth: usize,
    /// Estimated wall-clock seconds saved versus a full rerank.
    pub estimated_time_saved: f64,
}

impl RerankPolicy {
    /// Fixed complexity → policy table.
    pub fn for_complexity(complexity: QueryComplexity, top_k: usize) -> Self {
        match complexity {
            QueryComplexity::Simple => Self {
                use_reranker: false,
                rerank_depth: 0,
                estimated_time_saved: SIMPLE_TIME_SAVED_SECS,
            },
            QueryComplexity::Moderate => Self {
                use_reranker: true,
                rerank_depth: MODERATE_RERANK_DEPTH.min(top_k),
                estimated_time_saved: MODERATE_TIME_SAVED_SECS,
            },
            QueryComplexity::Complex => Self {
                use_reranker: true,
                rerank_depth: top_k,
                estimated_time_saved: 0.0,
            },
        }
    }
}

/// Per-query decision record returned alongside the response.
#[derive(Debug, Clone, Serialize)]
pub struct QueryMetadata {
    pub complexity: QueryComplexity,
    pub use_reranker: bool,
    pub rerank_depth: usize,
    pub estimated_time_saved: f64,
    /// Wall-clock duration of the engine call only.
    pub elapsed: Duration,
}

/// Engine response plus the policy metadata that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct RerankedResponse {
    pub response: String,
    pub metadata: QueryMetadata,
}

/// Per-complexity counters owned by one [`AdaptiveReranker`] instance.
#[derive(Debug, Clone, Default)]
struct RerankStats {
    simple_queries: u64,
    moderate_queries: u64,
    complex_queries: u64,
    total_time_saved: f64,
}

impl RerankStats {
    fn record(&mut self, complexity: QueryComplexity, time_saved: f64) {
        match complexity {
            QueryComplexity::Simple => self.simple_queries += 1,
            QueryComplexity::Moderate => self.moderate_queries += 1,
            QueryComplexity::Complex => self.complex_queries += 1,
        }
        self.total_time_saved += time_saved;
    }

    fn snapshot(&self) -> RerankStatsSnapshot {
        let total = self.simple_queries + self.moderate_queries + self.complex_queries;
        let pct = |count: u64| {
            if total == 0 {
                None
            } else {
                Some(count as f64 / total as f64 * 100.0)
            }
        };

        RerankStatsSnapshot {
            simple_queries: self.simple_queries,
            moderate_queries: self.moderate_queries,
            complex_queries: self.complex_queries,
            total_queries: total,
            total_time_saved: self.total_time_saved,
            simple_pct: pct(self.simple_queries),
            moderate_pct: pct(self.moderate_queries),
            complex_pct: pct(self.complex_queries),
            avg_time_saved: if total == 0 {
                None
            } else {
                Some(self.total_time_saved / total as f64)
            },
        }
    }
}

/// Point-in-time reranker statistics.
///
/// Percentages and the per-query average are `None` until at least one query
/// has been classified.
#[derive(Debug, Clone, Serialize)]
pub struct RerankStatsSnapshot {
    pub simple_queries: u64,
    pub moderate_queries: u64,
    pub complex_queries: u64,
    pub total_queries: u64,
    /// Accumulated estimate of reranking seconds avoided.
    pub total_time_saved: f64,
    pub simple_pct: Option<f64>,
    pub moderate_pct: Option<f64>,
    pub complex_pct: Option<f64>,
    pub avg_time_saved: Option<f64>,
}

/// Chooses a reranking policy per query and delegates to the engine.
pub struct AdaptiveReranker<E: QueryEngine> {
    engine: E,
    classifier: QueryClassifier,
    stats: Mutex<RerankStats>,
}

impl<E: QueryEngine> AdaptiveReranker<E> {
    /// Wraps `engine` with the built-in classifier rules.
    pub fn new(engine: E) -> Self {
        Self::with_classifier(engine, QueryClassifier::new())
    }

    /// Wraps `engine` with a custom classifier.
    pub fn with_classifier(engine: E, classifier: QueryClassifier) -> Self {
        Self {
            engine,
            classifier,
            stats: Mutex::new(RerankStats::default()),
        }
    }

    /// Returns the wrapped engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Returns the classifier driving the policy.
    pub fn classifier(&self) -> &QueryClassifier {
        &self.classifier
    }

    /// Classifies `query`, picks the rerank policy, and runs the engine.
    ///
    /// Statistics reflect policy decisions, not engine success: counters are
    /// updated before the engine call, and an engine failure propagates
    /// unchanged afterwards. Only the engine call itself is timed.
    #[instrument(skip(self, query), fields(query_len = query.len(), mode = mode, top_k = top_k))]
    pub async fn query(
        &self,
        query: &str,
        mode: &str,
        top_k: usize,
    ) -> EngineResult<RerankedResponse> {
        let complexity = self.classifier.classify(query);
        let policy = RerankPolicy::for_complexity(complexity, top_k);

        debug!(
            %complexity,
            use_reranker = policy.use_reranker,
            rerank_depth = policy.rerank_depth,
            "Rerank policy chosen"
        );

        self.stats
            .lock()
            .record(complexity, policy.estimated_time_saved);

        let request = EngineRequest {
            query: query.to_string(),
            mode: mode.to_string(),
            top_k,
            rerank_depth: policy.rerank_depth,
            use_reranker: policy.use_reranker,
        };

        let started = Instant::now();
        let response = self.engine.query(&request).await?;
        let elapsed = started.elapsed();

        Ok(RerankedResponse {
            response,
            metadata: QueryMetadata {
                complexity,
                use_reranker: policy.use_reranker,
                rerank_depth: policy.rerank_depth,
                estimated_time_saved: policy.estimated_time_saved,
                elapsed,
            },
        })
    }

    /// Point-in-time view of the per-complexity counters.
    pub fn stats(&self) -> RerankStatsSnapshot {
        self.stats.lock().snapshot()
    }

    /// Zeroes all counters. Counters are never reset implicitly.
    pub fn reset_stats(&self) {
        *self.stats.lock() = RerankStats::default();
    }
}

impl<E: QueryEngine> std::fmt::Debug for AdaptiveReranker<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdaptiveReranker")
            .field("classifier", &self.classifier)
            .field("stats", &self.stats.lock().snapshot())
            .finish_non_exhaustive()
    }
}

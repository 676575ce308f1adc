//! External retrieval/generation engine contract.
//!
//! The engine is an opaque async collaborator: this crate decides policy and
//! caching around it but never looks inside a response. Engine failures
//! propagate unchanged; retry policy belongs to the layer above.

pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use error::{EngineError, EngineResult};
#[cfg(any(test, feature = "mock"))]
pub use mock::MockQueryEngine;

use async_trait::async_trait;
use futures_util::StreamExt;
use futures_util::stream::{self, BoxStream};
use serde::{Deserialize, Serialize};

/// One fully-specified engine invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineRequest {
    pub query: String,
    /// Engine-defined retrieval mode (e.g. `"mix"`).
    pub mode: String,
    /// Number of candidates retrieved before any reranking.
    pub top_k: usize,
    /// Number of top candidates the engine should rerank.
    pub rerank_depth: usize,
    /// Whether the engine should run its reranking stage at all.
    pub use_reranker: bool,
}

impl EngineRequest {
    /// Builds a request with full reranking over all `top_k` candidates.
    pub fn new(query: impl Into<String>, mode: impl Into<String>, top_k: usize) -> Self {
        Self {
            query: query.into(),
            mode: mode.into(),
            top_k,
            rerank_depth: top_k,
            use_reranker: true,
        }
    }
}

/// Finite, non-restartable sequence of response text chunks.
pub type ResponseChunks = BoxStream<'static, EngineResult<String>>;

/// The retrieval/generation engine this crate accelerates.
#[async_trait]
pub trait QueryEngine: Send + Sync {
    /// Executes one query and returns the full response text.
    async fn query(&self, request: &EngineRequest) -> EngineResult<String>;

    /// Streaming variant: lazily yields response chunks.
    ///
    /// The default implementation runs [`query`](Self::query) to completion
    /// and yields the response as a single chunk. The adaptive layer itself
    /// only ever calls `query`; this hook exists for delivery layers that
    /// consume chunk streams.
    async fn query_stream(&self, request: &EngineRequest) -> EngineResult<ResponseChunks> {
        let response = self.query(request).await?;
        Ok(stream::once(async move { Ok(response) }).boxed())
    }
}

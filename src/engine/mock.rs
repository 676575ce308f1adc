//! Scripted engine for tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use super::error::{EngineError, EngineResult};
use super::{EngineRequest, QueryEngine};

/// Test double for [`QueryEngine`].
///
/// Returns canned responses per query text (falling back to a default),
/// records every request it receives, and can simulate an outage.
#[derive(Clone)]
pub struct MockQueryEngine {
    responses: Arc<Mutex<HashMap<String, String>>>,
    default_response: Arc<Mutex<String>>,
    requests: Arc<Mutex<Vec<EngineRequest>>>,
    failing: Arc<AtomicBool>,
}

impl MockQueryEngine {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            default_response: Arc::new(Mutex::new("mock response".to_string())),
            requests: Arc::new(Mutex::new(Vec::new())),
            failing: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Sets the response returned for queries without a canned answer.
    pub fn set_default_response(&self, response: impl Into<String>) {
        *self.default_response.lock() = response.into();
    }

    /// Registers a canned response for an exact query text.
    pub fn respond_to(&self, query: impl Into<String>, response: impl Into<String>) {
        self.responses.lock().insert(query.into(), response.into());
    }

    /// Makes every subsequent call fail (`true`) or succeed (`false`).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// All requests received so far, in order.
    pub fn requests(&self) -> Vec<EngineRequest> {
        self.requests.lock().clone()
    }

    /// Number of requests received so far.
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    /// The most recent request, if any.
    pub fn last_request(&self) -> Option<EngineRequest> {
        self.requests.lock().last().cloned()
    }
}

impl Default for MockQueryEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MockQueryEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockQueryEngine")
            .field("requests", &self.request_count())
            .field("failing", &self.failing.load(Ordering::SeqCst))
            .finish()
    }
}

#[async_trait]
impl QueryEngine for MockQueryEngine {
    async fn query(&self, request: &EngineRequest) -> EngineResult<String> {
        self.requests.lock().push(request.clone());

        if self.failing.load(Ordering::SeqCst) {
            return Err(EngineError::Upstream {
                reason: "simulated engine outage".to_string(),
            });
        }

        Ok(self
            .responses
            .lock()
            .get(&request.query)
            .cloned()
            .unwrap_or_else(|| self.default_response.lock().clone()))
    }
}

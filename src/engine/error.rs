//! Engine error types.

use thiserror::Error;

/// Failure reported by the external retrieval/generation engine.
///
/// Opaque to this crate: the cause lives upstream and is propagated unchanged
/// to the caller, which owns any retry or deadline policy.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("engine query failed: {reason}")]
    Upstream { reason: String },
}

/// Convenience result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

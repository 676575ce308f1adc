//! Key derivation error types.

use thiserror::Error;

/// Errors returned while deriving a cache key.
#[derive(Debug, Error)]
pub enum KeyError {
    /// An argument could not be canonicalized. The caller must pre-convert the
    /// value (e.g. to a primitive or string form) before caching.
    #[error("argument cannot be serialized for key derivation: {reason}")]
    Serialization { reason: String },
}

/// Convenience result type for key derivation.
pub type KeyResult<T> = Result<T, KeyError>;

//! Classifier error types.

use thiserror::Error;

/// Errors raised while compiling a classification rule set.
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// A simple-pattern rule is not a valid regular expression.
    #[error("invalid classification pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Convenience result type for classifier construction.
pub type ClassifierResult<T> = Result<T, ClassifierError>;

//! Configuration error types.

use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable could not be parsed as an integer.
    #[error("failed to parse {var}='{value}' as an integer: {source}")]
    InvalidNumber {
        var: &'static str,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// An environment variable could not be parsed as a boolean.
    #[error("failed to parse {var}='{value}' as a boolean (expected true/false/1/0)")]
    InvalidBool { var: &'static str, value: String },

    /// A setting that must be positive was zero.
    #[error("{var} must be greater than zero")]
    ZeroValue { var: &'static str },
}

//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `SLIPSTREAM_*` environment
//! variables. Configuration is consumed at construction and never reloaded.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::time::Duration;

use crate::constants::{
    DEFAULT_EMBEDDING_TTL_SECS, DEFAULT_LLM_RESPONSE_TTL_SECS, DEFAULT_MEMORY_CAPACITY,
    DEFAULT_MEMORY_TTL_SECS, DEFAULT_REDIS_URL, DEFAULT_RETRIEVAL_TTL_SECS,
    DEFAULT_SHARED_TTL_SECS, DEFAULT_TOP_K, NS_EMBEDDING, NS_LLM_RESPONSE, NS_RETRIEVAL,
};

/// Cache and policy configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `SLIPSTREAM_*` overrides on top of
/// defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Whether the in-process memory tier is built. Default: `true`.
    pub memory_tier_enabled: bool,

    /// Max entries in the memory tier. Default: `1000`.
    pub memory_capacity: usize,

    /// Default TTL for memory-tier entries, in seconds. Default: `3600`.
    pub memory_ttl_secs: u64,

    /// Whether the shared (Redis) tier is attempted. Default: `true`.
    pub shared_tier_enabled: bool,

    /// Redis endpoint URL. Default: `redis://localhost:6379`.
    pub redis_url: String,

    /// Default TTL for shared-tier entries, in seconds. Default: `3600`.
    pub shared_ttl_secs: u64,

    /// Default number of candidates retrieved before reranking. Default: `60`.
    pub default_top_k: usize,

    /// TTL for cached LLM responses, in seconds. Default: 24 hours.
    pub llm_response_ttl_secs: u64,

    /// TTL for cached retrieval results, in seconds. Default: 1 hour.
    pub retrieval_ttl_secs: u64,

    /// TTL for cached embeddings, in seconds. Default: 7 days.
    pub embedding_ttl_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            memory_tier_enabled: true,
            memory_capacity: DEFAULT_MEMORY_CAPACITY,
            memory_ttl_secs: DEFAULT_MEMORY_TTL_SECS,
            shared_tier_enabled: true,
            redis_url: DEFAULT_REDIS_URL.to_string(),
            shared_ttl_secs: DEFAULT_SHARED_TTL_SECS,
            default_top_k: DEFAULT_TOP_K,
            llm_response_ttl_secs: DEFAULT_LLM_RESPONSE_TTL_SECS,
            retrieval_ttl_secs: DEFAULT_RETRIEVAL_TTL_SECS,
            embedding_ttl_secs: DEFAULT_EMBEDDING_TTL_SECS,
        }
    }
}

impl Config {
    const ENV_MEMORY_TIER: &'static str = "SLIPSTREAM_MEMORY_TIER";
    const ENV_MEMORY_CAPACITY: &'static str = "SLIPSTREAM_MEMORY_CAPACITY";
    const ENV_MEMORY_TTL_SECS: &'static str = "SLIPSTREAM_MEMORY_TTL_SECS";
    const ENV_SHARED_TIER: &'static str = "SLIPSTREAM_SHARED_TIER";
    const ENV_REDIS_URL: &'static str = "SLIPSTREAM_REDIS_URL";
    const ENV_SHARED_TTL_SECS: &'static str = "SLIPSTREAM_SHARED_TTL_SECS";
    const ENV_TOP_K: &'static str = "SLIPSTREAM_TOP_K";
    const ENV_LLM_RESPONSE_TTL_SECS: &'static str = "SLIPSTREAM_LLM_RESPONSE_TTL_SECS";
    const ENV_RETRIEVAL_TTL_SECS: &'static str = "SLIPSTREAM_RETRIEVAL_TTL_SECS";
    const ENV_EMBEDDING_TTL_SECS: &'static str = "SLIPSTREAM_EMBEDDING_TTL_SECS";

    /// Loads configuration from environment variables (falling back to
    /// defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            memory_tier_enabled: parse_bool(Self::ENV_MEMORY_TIER, defaults.memory_tier_enabled)?,
            memory_capacity: parse_number(Self::ENV_MEMORY_CAPACITY, defaults.memory_capacity)?,
            memory_ttl_secs: parse_number(Self::ENV_MEMORY_TTL_SECS, defaults.memory_ttl_secs)?,
            shared_tier_enabled: parse_bool(Self::ENV_SHARED_TIER, defaults.shared_tier_enabled)?,
            redis_url: parse_string(Self::ENV_REDIS_URL, defaults.redis_url),
            shared_ttl_secs: parse_number(Self::ENV_SHARED_TTL_SECS, defaults.shared_ttl_secs)?,
            default_top_k: parse_number(Self::ENV_TOP_K, defaults.default_top_k)?,
            llm_response_ttl_secs: parse_number(
                Self::ENV_LLM_RESPONSE_TTL_SECS,
                defaults.llm_response_ttl_secs,
            )?,
            retrieval_ttl_secs: parse_number(
                Self::ENV_RETRIEVAL_TTL_SECS,
                defaults.retrieval_ttl_secs,
            )?,
            embedding_ttl_secs: parse_number(
                Self::ENV_EMBEDDING_TTL_SECS,
                defaults.embedding_ttl_secs,
            )?,
        })
    }

    /// Validates basic invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.memory_tier_enabled && self.memory_capacity == 0 {
            return Err(ConfigError::ZeroValue {
                var: Self::ENV_MEMORY_CAPACITY,
            });
        }
        if self.default_top_k == 0 {
            return Err(ConfigError::ZeroValue { var: Self::ENV_TOP_K });
        }
        for (var, value) in [
            (Self::ENV_MEMORY_TTL_SECS, self.memory_ttl_secs),
            (Self::ENV_SHARED_TTL_SECS, self.shared_ttl_secs),
            (Self::ENV_LLM_RESPONSE_TTL_SECS, self.llm_response_ttl_secs),
            (Self::ENV_RETRIEVAL_TTL_SECS, self.retrieval_ttl_secs),
            (Self::ENV_EMBEDDING_TTL_SECS, self.embedding_ttl_secs),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroValue { var });
            }
        }
        Ok(())
    }

    /// Default TTL for memory-tier entries.
    pub fn memory_ttl(&self) -> Duration {
        Duration::from_secs(self.memory_ttl_secs)
    }

    /// Default TTL for shared-tier entries.
    pub fn shared_ttl(&self) -> Duration {
        Duration::from_secs(self.shared_ttl_secs)
    }

    /// TTL policy per cache namespace; unknown namespaces fall back to the
    /// retrieval TTL (the most conservative of the three).
    pub fn ttl_for(&self, namespace: &str) -> Duration {
        let secs = match namespace {
            NS_LLM_RESPONSE => self.llm_response_ttl_secs,
            NS_EMBEDDING => self.embedding_ttl_secs,
            NS_RETRIEVAL => self.retrieval_ttl_secs,
            _ => self.retrieval_ttl_secs,
        };
        Duration::from_secs(secs)
    }
}

fn parse_string(var: &'static str, default: String) -> String {
    env::var(var).unwrap_or(default)
}

fn parse_bool(var: &'static str, default: bool) -> Result<bool, ConfigError> {
    match env::var(var) {
        Ok(value) => match value.trim().to_lowercase().as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(ConfigError::InvalidBool { var, value }),
        },
        Err(_) => Ok(default),
    }
}

fn parse_number<T: std::str::FromStr<Err = std::num::ParseIntError>>(
    var: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match env::var(var) {
        Ok(value) => value.trim().parse().map_err(|source| ConfigError::InvalidNumber {
            var,
            value,
            source,
        }),
        Err(_) => Ok(default),
    }
}

//! Cache key derivation.
//!
//! A key is derived from a logical namespace plus a heterogeneous argument
//! pack. Positional arguments are order-sensitive (call sites rely on
//! positional meaning); named arguments are sorted by name before hashing, so
//! insertion order never changes the key.

pub mod error;

pub use error::{KeyError, KeyResult};

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

/// Number of BLAKE3 output bytes kept in the key digest.
///
/// 128 bits of BLAKE3 output leaves collisions computationally infeasible for
/// any realistic cache population while halving the key length. Keys are
/// identifiers here, not authenticators, so the full 256-bit output buys
/// nothing.
const DIGEST_BYTES: usize = 16;

/// A derived cache key: `"<namespace>:<hex-digest>"`.
///
/// The namespace prefix stays human-inspectable for debugging and telemetry;
/// the digest carries the uniqueness.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Returns the full key string.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the namespace prefix of the key.
    #[inline]
    pub fn namespace(&self) -> &str {
        self.0.split_once(':').map_or(self.0.as_str(), |(ns, _)| ns)
    }

    /// Consumes the key and returns the underlying string.
    #[inline]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Heterogeneous argument pack for key derivation.
///
/// Serialization failures are recorded as they happen and surfaced by
/// [`make_key`], so call sites can chain `arg`/`named` without intermediate
/// `Result` handling.
#[derive(Debug, Clone, Default)]
pub struct KeyArgs {
    positional: Vec<Value>,
    named: BTreeMap<String, Value>,
    invalid: Option<String>,
}

impl KeyArgs {
    /// Creates an empty argument pack.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a positional argument. Position is significant.
    pub fn arg(mut self, value: impl Serialize) -> Self {
        match serde_json::to_value(value) {
            Ok(v) => self.positional.push(v),
            Err(e) => {
                self.invalid.get_or_insert(e.to_string());
            }
        }
        self
    }

    /// Adds a named argument. Insertion order does not affect the key.
    pub fn named(mut self, name: impl Into<String>, value: impl Serialize) -> Self {
        match serde_json::to_value(value) {
            Ok(v) => {
                self.named.insert(name.into(), v);
            }
            Err(e) => {
                self.invalid.get_or_insert(e.to_string());
            }
        }
        self
    }

    /// Returns `true` if no arguments have been added.
    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.named.is_empty()
    }
}

/// Derives the cache key for `namespace` and `args`.
///
/// Equal inputs always produce the same key; named-argument insertion order is
/// irrelevant, positional order is not. Fails only when an argument recorded a
/// serialization failure.
pub fn make_key(namespace: &str, args: &KeyArgs) -> KeyResult<CacheKey> {
    if let Some(reason) = &args.invalid {
        return Err(KeyError::Serialization {
            reason: reason.clone(),
        });
    }

    let mut canonical = String::with_capacity(64);
    write_escaped(&mut canonical, namespace);
    canonical.push('|');
    canonical.push('[');
    for (i, value) in args.positional.iter().enumerate() {
        if i > 0 {
            canonical.push(',');
        }
        write_canonical(&mut canonical, value);
    }
    canonical.push(']');
    canonical.push('|');
    canonical.push('{');
    for (i, (name, value)) in args.named.iter().enumerate() {
        if i > 0 {
            canonical.push(',');
        }
        write_escaped(&mut canonical, name);
        canonical.push(':');
        write_canonical(&mut canonical, value);
    }
    canonical.push('}');

    let hash = blake3::hash(canonical.as_bytes());
    let mut key = String::with_capacity(namespace.len() + 1 + DIGEST_BYTES * 2);
    key.push_str(namespace);
    key.push(':');
    push_hex(&mut key, &hash.as_bytes()[..DIGEST_BYTES]);

    Ok(CacheKey(key))
}

/// Writes a canonical textual form of `value`.
///
/// Object keys are sorted recursively so the form is deterministic regardless
/// of how the `Value` was built.
fn write_canonical(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => write_escaped(out, s),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(out, item);
            }
            out.push(']');
        }
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort_unstable();
            out.push('{');
            for (i, key) in keys.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_escaped(out, key);
                out.push(':');
                write_canonical(out, &map[key]);
            }
            out.push('}');
        }
    }
}

fn write_escaped(out: &mut String, s: &str) {
    out.push('"');
    for ch in s.chars() {
        if ch == '"' || ch == '\\' {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('"');
}

fn push_hex(out: &mut String, bytes: &[u8]) {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    for b in bytes {
        out.push(HEX[(b >> 4) as usize] as char);
        out.push(HEX[(b & 0x0f) as usize] as char);
    }
}

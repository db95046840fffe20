//! Configuration fingerprinting
//!
//! A trial configuration is an arbitrarily nested mapping; the store only
//! needs a deterministic identity for it. The fingerprint is the SHA-256
//! digest of a canonical JSON rendering in which object keys are written in
//! sorted order at every nesting level, so structurally equal
//! configurations hash identically no matter how they were built, across
//! processes and runs.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

use super::results::SearchPoint;

/// Deterministic identity of a recorded configuration
///
/// 64 lowercase hex characters. Produced by [`fingerprint`]; used as the
/// dedup/lookup key of the search ledger.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// View as the hex digest string
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fingerprint a search point
///
/// # Example
///
/// ```
/// use afinar::search::{fingerprint, SearchPoint};
/// use std::collections::BTreeMap;
///
/// let mut point = SearchPoint::new();
/// point.insert(
///     "quantize".into(),
///     BTreeMap::from([("bits".into(), serde_json::json!(8))]),
/// );
/// assert_eq!(fingerprint(&point), fingerprint(&point.clone()));
/// ```
#[must_use]
pub fn fingerprint(point: &SearchPoint) -> Fingerprint {
    // SearchPoint's two outer levels are BTreeMaps, so to_value cannot fail
    let value = serde_json::to_value(point).unwrap_or(Value::Null);
    fingerprint_value(&value)
}

/// Fingerprint an arbitrary JSON value
#[must_use]
pub fn fingerprint_value(value: &Value) -> Fingerprint {
    let mut canonical = String::new();
    write_canonical(value, &mut canonical);

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    Fingerprint(hex::encode(hasher.finalize()))
}

/// Render `value` as JSON with object keys sorted recursively
///
/// `serde_json`'s own rendering is key-order-dependent when the
/// `preserve_order` feature is active anywhere in the build, so the
/// canonical form is spelled out here instead of trusting map iteration
/// order.
fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            out.push('{');
            for (i, key) in keys.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&Value::String((*key).clone()).to_string());
                out.push(':');
                write_canonical(&map[*key], out);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        // Scalars already have a single JSON rendering
        other => out.push_str(&other.to_string()),
    }
}

//! Deterministic content fingerprinting for exported attribute mappings.
//!
//! The digest is blake3 over a canonical serialization: top-level keys are
//! sorted, nested mappings are recursively key-sorted, and values serialize
//! through `serde_json`. Two mappings equal as key/value sets produce the
//! same digest no matter how they were constructed. Never iterate an
//! unsorted mapping for hash-affecting work.

use indexmap::IndexMap;

use crate::value::AttrValue;

/// Recursively key-sorts every mapping inside a value.
fn canonicalize(value: &AttrValue) -> AttrValue {
    match value {
        AttrValue::Map(entries) => {
            let mut sorted: Vec<(&String, &AttrValue)> = entries.iter().collect();
            sorted.sort_by_key(|(key, _)| *key);
            AttrValue::Map(
                sorted
                    .into_iter()
                    .map(|(key, item)| (key.clone(), canonicalize(item)))
                    .collect(),
            )
        }
        AttrValue::Seq(items) => AttrValue::Seq(items.iter().map(canonicalize).collect()),
        other => other.clone(),
    }
}

/// Computes the hex digest of a flat attribute mapping.
///
/// Deterministic: equal mappings (as sets of key/value pairs, with nested
/// mapping equality also order-insensitive) always produce the same digest;
/// any changed, added, or removed entry produces a different one.
pub fn fingerprint(attributes: &IndexMap<String, AttrValue>) -> String {
    let mut keys: Vec<&String> = attributes.keys().collect();
    keys.sort();

    let mut hasher = blake3::Hasher::new();
    for key in keys {
        let value_bytes = serde_json::to_vec(&canonicalize(&attributes[key]))
            .expect("attribute values serialize to JSON by construction");
        hasher.update(key.as_bytes());
        hasher.update(&[0]);
        hasher.update(&value_bytes);
        hasher.update(&[0]);
    }
    hasher.finalize().to_hex().to_string()
}

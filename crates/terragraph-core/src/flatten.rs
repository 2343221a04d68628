//! Nested ⇄ flat attribute transform.
//!
//! Flattening a nested value under its root key produces one entry per
//! reachable path (dotted syntax, integer components for sequence positions)
//! plus an entry for the root key itself, reconstructed from its flattened
//! children.
//!
//! Singleton sequences unwrap to their sole element before flattening, at
//! the root and at every nested level — the common declaration syntax where
//! a single repeated block collapses to a scalar block. Unwrapping recurses
//! to a fixed point, which makes the transform idempotent when re-applied to
//! its own reconstructed output.

use indexmap::IndexMap;

use crate::value::AttrValue;

/// Unwraps singleton sequences to their sole element, repeatedly.
pub fn unwrap_singleton(value: &AttrValue) -> &AttrValue {
    match value {
        AttrValue::Seq(items) if items.len() == 1 => unwrap_singleton(&items[0]),
        other => other,
    }
}

/// Flattens `value` under `key` into `out` and returns the reconstructed
/// (singleton-unwrapped) form of the value.
///
/// Every leaf terminates recursion with a single entry; containers insert
/// one entry per child path and one for themselves.
pub fn flatten_into(
    key: &str,
    value: &AttrValue,
    out: &mut IndexMap<String, AttrValue>,
) -> AttrValue {
    let value = unwrap_singleton(value);
    let rebuilt = match value {
        AttrValue::Seq(items) => {
            let mut rebuilt = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                rebuilt.push(flatten_into(&format!("{key}.{index}"), item, out));
            }
            AttrValue::Seq(rebuilt)
        }
        AttrValue::Map(entries) => {
            let mut rebuilt = IndexMap::with_capacity(entries.len());
            for (child_key, item) in entries {
                rebuilt.insert(
                    child_key.clone(),
                    flatten_into(&format!("{key}.{child_key}"), item, out),
                );
            }
            AttrValue::Map(rebuilt)
        }
        leaf => leaf.clone(),
    };
    out.insert(key.to_string(), rebuilt.clone());
    rebuilt
}

/// Flattens `value` under `key` into a fresh mapping.
pub fn flatten_attribute(key: &str, value: &AttrValue) -> IndexMap<String, AttrValue> {
    let mut out = IndexMap::new();
    flatten_into(key, value, &mut out);
    out
}

//! The dynamic attribute value model.
//!
//! Declarative infrastructure documents carry arbitrarily nested data:
//! scalars, ordered sequences, and string-keyed mappings. [`AttrValue`] is the
//! closed set of shapes every transform and mutation in this crate pattern
//! matches over, so there is no runtime type inspection anywhere.
//!
//! Values serialize untagged, mirroring the JSON shape of the source
//! document. Mappings use [`IndexMap`] so declaration order survives
//! round-trips; equality on mappings is order-insensitive.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One attribute value at any nesting depth.
///
/// Note: `Int` is tried before `Float` during untagged deserialization, so
/// whole JSON numbers come back as `Int` and fractional ones as `Float`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    /// Ordered sequence, e.g. a repeated declaration block.
    Seq(Vec<AttrValue>),
    /// String-keyed mapping preserving declaration order.
    Map(IndexMap<String, AttrValue>),
}

impl AttrValue {
    /// Returns a human-readable description of the value's shape.
    pub fn type_name(&self) -> &'static str {
        match self {
            AttrValue::Null => "Null",
            AttrValue::Bool(_) => "Bool",
            AttrValue::Int(_) => "Int",
            AttrValue::Float(_) => "Float",
            AttrValue::String(_) => "String",
            AttrValue::Seq(_) => "Seq",
            AttrValue::Map(_) => "Map",
        }
    }

    /// Returns `true` for sequences and mappings.
    pub fn is_container(&self) -> bool {
        matches!(self, AttrValue::Seq(_) | AttrValue::Map(_))
    }

    /// Returns the string content, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns a numeric view of the value.
    ///
    /// Integers and floats convert directly; strings that parse as numbers
    /// are accepted because source documents frequently quote numeric
    /// attributes.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttrValue::Int(v) => Some(*v as f64),
            AttrValue::Float(v) => Some(*v),
            AttrValue::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// Returns the sequence items, if this is a sequence.
    pub fn as_seq(&self) -> Option<&[AttrValue]> {
        match self {
            AttrValue::Seq(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the mapping entries, if this is a mapping.
    pub fn as_map(&self) -> Option<&IndexMap<String, AttrValue>> {
        match self {
            AttrValue::Map(entries) => Some(entries),
            _ => None,
        }
    }
}

impl From<bool> for AttrValue {
    fn from(v: bool) -> Self {
        AttrValue::Bool(v)
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        AttrValue::Int(v)
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        AttrValue::Float(v)
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        AttrValue::String(v.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        AttrValue::String(v)
    }
}

impl<const N: usize> From<[(String, AttrValue); N]> for AttrValue {
    fn from(entries: [(String, AttrValue); N]) -> Self {
        AttrValue::Map(IndexMap::from(entries))
    }
}

impl From<Vec<AttrValue>> for AttrValue {
    fn from(items: Vec<AttrValue>) -> Self {
        AttrValue::Seq(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_roundtrip_scalars() {
        let vals = vec![
            AttrValue::Null,
            AttrValue::Bool(true),
            AttrValue::Int(443),
            AttrValue::Float(0.5),
            AttrValue::String("10.0.0.0/16".into()),
        ];
        for val in &vals {
            let json = serde_json::to_string(val).unwrap();
            let back: AttrValue = serde_json::from_str(&json).unwrap();
            assert_eq!(val, &back);
        }
    }

    #[test]
    fn serde_untagged_mirrors_document_shape() {
        let val = AttrValue::Map(IndexMap::from([
            ("port".to_string(), AttrValue::Int(80)),
            (
                "cidr_blocks".to_string(),
                AttrValue::Seq(vec![AttrValue::String("0.0.0.0/0".into())]),
            ),
        ]));
        let json = serde_json::to_string(&val).unwrap();
        assert_eq!(json, r#"{"port":80,"cidr_blocks":["0.0.0.0/0"]}"#);
    }

    #[test]
    fn map_equality_ignores_insertion_order() {
        let a = AttrValue::Map(IndexMap::from([
            ("x".to_string(), AttrValue::Int(1)),
            ("y".to_string(), AttrValue::Int(2)),
        ]));
        let b = AttrValue::Map(IndexMap::from([
            ("y".to_string(), AttrValue::Int(2)),
            ("x".to_string(), AttrValue::Int(1)),
        ]));
        assert_eq!(a, b);
    }

    #[test]
    fn as_f64_accepts_numeric_strings() {
        assert_eq!(AttrValue::String("8080".into()).as_f64(), Some(8080.0));
        assert_eq!(AttrValue::Int(-3).as_f64(), Some(-3.0));
        assert_eq!(AttrValue::String("open".into()).as_f64(), None);
        assert_eq!(AttrValue::Bool(true).as_f64(), None);
    }

    #[test]
    fn type_names() {
        assert_eq!(AttrValue::Null.type_name(), "Null");
        assert_eq!(AttrValue::Seq(vec![]).type_name(), "Seq");
        assert_eq!(AttrValue::Map(IndexMap::new()).type_name(), "Map");
    }
}

//! Value coercion helpers shared by the operator family.

use terragraph_core::AttrValue;

/// Returns the textual view of a value, if it has one.
pub(crate) fn text_of(value: &AttrValue) -> Option<&str> {
    value.as_str()
}

/// Returns the numeric view of a value (integers, floats, numeric strings).
pub(crate) fn number_of(value: &AttrValue) -> Option<f64> {
    value.as_f64()
}

/// Containment: a sequence contains the expected element, a string contains
/// the expected substring, a mapping contains the expected key.
pub(crate) fn value_contains(actual: &AttrValue, expected: &AttrValue) -> bool {
    match actual {
        AttrValue::Seq(items) => items.contains(expected),
        AttrValue::String(s) => expected.as_str().map_or(false, |needle| s.contains(needle)),
        AttrValue::Map(entries) => expected
            .as_str()
            .map_or(false, |key| entries.contains_key(key)),
        _ => false,
    }
}

/// Emptiness: null, empty string, empty sequence, or empty mapping.
pub(crate) fn value_is_empty(actual: &AttrValue) -> bool {
    match actual {
        AttrValue::Null => true,
        AttrValue::String(s) => s.is_empty(),
        AttrValue::Seq(items) => items.is_empty(),
        AttrValue::Map(entries) => entries.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    #[test]
    fn sequence_contains_element() {
        let seq = AttrValue::Seq(vec![AttrValue::Int(80), AttrValue::Int(443)]);
        assert!(value_contains(&seq, &AttrValue::Int(443)));
        assert!(!value_contains(&seq, &AttrValue::Int(22)));
    }

    #[test]
    fn string_contains_substring() {
        let s = AttrValue::String("kube-apiserver".into());
        assert!(value_contains(&s, &AttrValue::String("apiserver".into())));
        assert!(!value_contains(&s, &AttrValue::String("etcd".into())));
    }

    #[test]
    fn mapping_contains_key() {
        let m = AttrValue::Map(IndexMap::from([(
            "env".to_string(),
            AttrValue::String("prod".into()),
        )]));
        assert!(value_contains(&m, &AttrValue::String("env".into())));
        assert!(!value_contains(&m, &AttrValue::String("prod".into())));
    }

    #[test]
    fn emptiness_per_shape() {
        assert!(value_is_empty(&AttrValue::Null));
        assert!(value_is_empty(&AttrValue::String(String::new())));
        assert!(value_is_empty(&AttrValue::Seq(vec![])));
        assert!(!value_is_empty(&AttrValue::Int(0)));
        assert!(!value_is_empty(&AttrValue::String("x".into())));
    }
}

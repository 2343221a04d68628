//! Reversible value encoding for exports crossing typed-value-hostile
//! boundaries.
//!
//! Some consumers of the exported mapping can only carry strings. The encode
//! transform renders every value as its canonical JSON text; decode parses
//! that text back. Applied uniformly to all values, the pair is bijective.
//! Decode leaves strings that do not parse as JSON unchanged — the digest
//! field, inserted after encoding, is the expected case.

use crate::value::AttrValue;

/// Encodes a value as its canonical JSON text.
pub fn encode_value(value: &AttrValue) -> AttrValue {
    let text = serde_json::to_string(value)
        .expect("attribute values serialize to JSON by construction");
    AttrValue::String(text)
}

/// Reverses [`encode_value`]. Non-string values and strings that are not
/// valid JSON are returned unchanged.
pub fn decode_value(value: &AttrValue) -> AttrValue {
    match value {
        AttrValue::String(text) => {
            serde_json::from_str::<AttrValue>(text).unwrap_or_else(|_| value.clone())
        }
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    #[test]
    fn encode_then_decode_roundtrips_every_shape() {
        let vals = vec![
            AttrValue::Null,
            AttrValue::Bool(false),
            AttrValue::Int(8080),
            AttrValue::Float(1.5),
            AttrValue::String("TLS_AES_128_GCM_SHA256".into()),
            AttrValue::Seq(vec![AttrValue::Int(80), AttrValue::Int(443)]),
            AttrValue::Map(IndexMap::from([(
                "env".to_string(),
                AttrValue::String("prod".into()),
            )])),
        ];
        for val in &vals {
            let encoded = encode_value(val);
            assert!(matches!(encoded, AttrValue::String(_)));
            assert_eq!(&decode_value(&encoded), val);
        }
    }

    #[test]
    fn encoded_string_is_quoted_json() {
        let encoded = encode_value(&AttrValue::String("private".into()));
        assert_eq!(encoded, AttrValue::String("\"private\"".into()));
    }

    #[test]
    fn decode_leaves_non_json_strings_unchanged() {
        let digest = AttrValue::String("9f86d081884c7d65".into());
        assert_eq!(decode_value(&digest), digest);
    }
}

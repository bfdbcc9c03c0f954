//! Canonical form of JSON values.
//!
//! A canonical value has every object's keys in ascending byte-wise order at
//! every depth.  Arrays are walked element by element but never reordered,
//! since element order is meaningful in audit reports (ledger entries,
//! findings).  Primitives pass through unchanged.
//!
//! The canonical form is rebuilt explicitly rather than round-tripped
//! through text, so the caller's value is never aliased or mutated and
//! numbers keep their exact `serde_json::Number` representation.

use serde::Serialize;
use serde_json::{Map, Value};

use indsure_contracts::error::{IndsureError, IndsureResult};

/// Return a canonical copy of `value`.
///
/// Idempotent: `canonicalize(&canonicalize(v)) == canonicalize(v)`.
pub fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.as_str().cmp(b.as_str()));

            // Inserting in sorted order keeps the result canonical even when
            // `serde_json` is built with `preserve_order`.
            let mut sorted = Map::with_capacity(entries.len());
            for (key, child) in entries {
                sorted.insert(key.clone(), canonicalize(child));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => value.clone(),
    }
}

/// Convert any serializable value to JSON and canonicalize it.
///
/// Fails with `IndsureError::Serialization` when the value has no JSON
/// representation (for example a map with non-string keys).
pub fn canonicalize_serializable<T: Serialize + ?Sized>(value: &T) -> IndsureResult<Value> {
    let json = serde_json::to_value(value).map_err(|e| IndsureError::Serialization {
        reason: format!("value is not representable as JSON: {e}"),
    })?;
    Ok(canonicalize(&json))
}

/// Compact JSON text of the canonical form of `value`.
///
/// This is the stable string the comparator and hasher operate on.
pub fn canonical_string(value: &Value) -> IndsureResult<String> {
    serde_json::to_string(&canonicalize(value)).map_err(|e| IndsureError::Serialization {
        reason: format!("failed to serialize canonical form: {e}"),
    })
}

/// True when every object in `value` already has its keys in canonical order.
pub fn is_canonical(value: &Value) -> bool {
    match value {
        Value::Object(map) => {
            let keys: Vec<&str> = map.keys().map(String::as_str).collect();
            keys.windows(2).all(|w| w[0] < w[1]) && map.values().all(is_canonical)
        }
        Value::Array(items) => items.iter().all(is_canonical),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde_json::json;

    use super::*;

    #[test]
    fn primitives_pass_through() {
        for v in [json!(null), json!(true), json!(-30), json!(3.5), json!("WAITING_PERIOD")] {
            assert_eq!(canonicalize(&v), v);
        }
    }

    #[test]
    fn empty_containers_canonicalize_to_themselves() {
        assert_eq!(canonicalize(&json!({})), json!({}));
        assert_eq!(canonicalize(&json!([])), json!([]));
    }

    #[test]
    fn nested_keys_are_sorted() {
        let v = json!({ "b": { "z": 1, "a": 2 }, "a": [ { "y": 1, "x": 2 } ] });
        let text = canonical_string(&v).unwrap();
        assert_eq!(text, r#"{"a":[{"x":2,"y":1}],"b":{"a":2,"z":1}}"#);
        assert!(is_canonical(&canonicalize(&v)));
    }

    #[test]
    fn insertion_order_is_replaced_by_key_order() {
        let mut map = Map::new();
        map.insert("b".to_string(), json!(1));
        map.insert("a".to_string(), json!({ "d": true, "c": false }));
        let raw = Value::Object(map);

        assert_eq!(serde_json::to_string(&raw).unwrap(), r#"{"b":1,"a":{"d":true,"c":false}}"#);
        assert!(!is_canonical(&raw));

        let canonical = canonicalize(&raw);
        assert!(is_canonical(&canonical));
        assert_eq!(
            canonical_string(&raw).unwrap(),
            r#"{"a":{"c":false,"d":true},"b":1}"#
        );
    }

    #[test]
    fn numeric_keys_sort_lexicographically() {
        let v = json!({ "10": "ten", "9": "nine", "1": "one" });
        let text = canonical_string(&v).unwrap();
        assert_eq!(text, r#"{"1":"one","10":"ten","9":"nine"}"#);
    }

    #[test]
    fn arrays_keep_element_order() {
        let v = json!(["b", "a", { "k": 1 }]);
        assert_eq!(canonicalize(&v), v);
        assert_ne!(canonicalize(&json!(["a", "b"])), canonicalize(&json!(["b", "a"])));
    }

    #[test]
    fn input_is_not_mutated() {
        let v = json!({ "b": 1, "a": { "d": 2, "c": 3 } });
        let before = v.clone();
        let _ = canonicalize(&v);
        assert_eq!(v, before);
    }

    #[test]
    fn integer_and_float_representations_stay_distinct() {
        assert_ne!(
            canonical_string(&json!({ "s": 35 })).unwrap(),
            canonical_string(&json!({ "s": 35.0 })).unwrap()
        );
    }

    #[test]
    fn serializable_structs_are_canonicalized() {
        #[derive(Serialize)]
        struct Entry {
            penalty_points: i64,
            category: &'static str,
        }

        let v = canonicalize_serializable(&Entry {
            penalty_points: -30,
            category: "WAITING_PERIOD",
        })
        .unwrap();
        assert_eq!(
            canonical_string(&v).unwrap(),
            r#"{"category":"WAITING_PERIOD","penalty_points":-30}"#
        );
    }

    #[test]
    fn non_string_map_keys_fail_serialization() {
        let mut bad: BTreeMap<Vec<u8>, u8> = BTreeMap::new();
        bad.insert(vec![1, 2], 3);

        let err = canonicalize_serializable(&bad).unwrap_err();
        assert!(matches!(err, IndsureError::Serialization { .. }), "got {err:?}");
    }
}

//! Path-level structural diff between two JSON values.
//!
//! Used to explain a content divergence beyond the single generic signal.
//! Object keys are visited in sorted order and arrays index by index, so the
//! output order is deterministic for a given pair of inputs.

use std::collections::BTreeSet;

use serde_json::Value;

use indsure_contracts::verdict::{FieldDiff, FieldDiffKind};

/// Every path at which `original` and `replay` differ.
///
/// Containers of matching kind are descended into; any other mismatch is a
/// single `Changed` entry at that path.
pub fn diff_values(original: &Value, replay: &Value) -> Vec<FieldDiff> {
    let mut out = Vec::new();
    walk(String::new(), original, replay, &mut out);
    out
}

fn walk(path: String, original: &Value, replay: &Value, out: &mut Vec<FieldDiff>) {
    match (original, replay) {
        (Value::Object(a), Value::Object(b)) => {
            let keys: BTreeSet<&String> = a.keys().chain(b.keys()).collect();
            for key in keys {
                let child = join_key(&path, key);
                match (a.get(key), b.get(key)) {
                    (Some(x), Some(y)) => walk(child, x, y, out),
                    (Some(x), None) => out.push(FieldDiff {
                        path: child,
                        kind: FieldDiffKind::Removed { original: x.clone() },
                    }),
                    (None, Some(y)) => out.push(FieldDiff {
                        path: child,
                        kind: FieldDiffKind::Added { replay: y.clone() },
                    }),
                    (None, None) => {}
                }
            }
        }
        (Value::Array(a), Value::Array(b)) => {
            for i in 0..a.len().max(b.len()) {
                let child = format!("{path}[{i}]");
                match (a.get(i), b.get(i)) {
                    (Some(x), Some(y)) => walk(child, x, y, out),
                    (Some(x), None) => out.push(FieldDiff {
                        path: child,
                        kind: FieldDiffKind::Removed { original: x.clone() },
                    }),
                    (None, Some(y)) => out.push(FieldDiff {
                        path: child,
                        kind: FieldDiffKind::Added { replay: y.clone() },
                    }),
                    (None, None) => {}
                }
            }
        }
        (a, b) if a == b => {}
        (a, b) => out.push(FieldDiff {
            path,
            kind: FieldDiffKind::Changed {
                original: a.clone(),
                replay: b.clone(),
            },
        }),
    }
}

fn join_key(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn identical_values_have_no_diffs() {
        let v = json!({ "a": [1, { "b": null }] });
        assert!(diff_values(&v, &v).is_empty());
    }

    #[test]
    fn nested_change_reports_full_path() {
        let a = json!({ "audit_ledger": { "entries": [ { "penalty_points": -30 } ] } });
        let b = json!({ "audit_ledger": { "entries": [ { "penalty_points": -25 } ] } });
        let diffs = diff_values(&a, &b);
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].path, "audit_ledger.entries[0].penalty_points");
        assert_eq!(
            diffs[0].to_string(),
            "audit_ledger.entries[0].penalty_points: -30 -> -25"
        );
    }

    #[test]
    fn added_and_removed_keys_are_ordered_by_key() {
        let a = json!({ "b": 1, "c": 2 });
        let b = json!({ "a": 0, "b": 1 });
        let diffs = diff_values(&a, &b);
        let paths: Vec<&str> = diffs.iter().map(|d| d.path.as_str()).collect();
        assert_eq!(paths, ["a", "c"]);
        assert!(matches!(diffs[0].kind, FieldDiffKind::Added { .. }));
        assert!(matches!(diffs[1].kind, FieldDiffKind::Removed { .. }));
    }

    #[test]
    fn array_length_changes_report_extra_elements() {
        let diffs = diff_values(&json!({ "e": [1] }), &json!({ "e": [1, 2, 3] }));
        let paths: Vec<&str> = diffs.iter().map(|d| d.path.as_str()).collect();
        assert_eq!(paths, ["e[1]", "e[2]"]);
    }

    #[test]
    fn kind_mismatch_is_a_single_change() {
        let diffs = diff_values(&json!({ "x": [1] }), &json!({ "x": { "0": 1 } }));
        assert_eq!(diffs.len(), 1);
        assert!(matches!(diffs[0].kind, FieldDiffKind::Changed { .. }));
    }

    #[test]
    fn root_primitive_change_uses_empty_path() {
        let diffs = diff_values(&json!(1), &json!(2));
        assert_eq!(diffs[0].path, "");
    }
}

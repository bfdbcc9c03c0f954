//! Removal of volatile bookkeeping fields before comparison.
//!
//! Volatile fields record *when* and *which run* produced a report, not
//! *what* it concluded.  They are removed from the top level of a copy of
//! the report; nested fields with the same names are content and stay.

use serde_json::Value;

/// Top-level report fields that legitimately differ between replays.
///
/// This is the only place the default list is defined.
pub const VOLATILE_FIELDS: &[&str] = &["analysis_id", "generated_at", "job_id"];

/// Copy `report` without the default `VOLATILE_FIELDS`.
pub fn strip_volatile_fields(report: &Value) -> Value {
    strip_fields(report, VOLATILE_FIELDS)
}

/// Copy `report` without the named top-level fields.
///
/// Absent fields are skipped.  Non-object values are returned unchanged.
pub fn strip_fields<S: AsRef<str>>(report: &Value, fields: &[S]) -> Value {
    let mut stripped = report.clone();
    if let Value::Object(map) = &mut stripped {
        for field in fields {
            map.remove(field.as_ref());
        }
    }
    stripped
}

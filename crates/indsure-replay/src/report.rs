//! Strict access to the fields every audit report must carry.
//!
//! The comparator never treats an absent field as "equal": a report missing
//! `prompt_hash`, `model_version` or `audit_ledger.final_score` is a caller
//! defect and surfaces as an error.

use serde_json::{Number, Value};

use indsure_contracts::error::{IndsureError, IndsureResult};

pub const PROMPT_HASH: &str = "prompt_hash";
pub const MODEL_VERSION: &str = "model_version";
pub const AUDIT_LEDGER: &str = "audit_ledger";
pub const FINAL_SCORE: &str = "final_score";

/// Dotted path of the final score, used in error messages.
pub const FINAL_SCORE_PATH: &str = "audit_ledger.final_score";

/// Borrowed view of the fields the fast-path checks compare.
#[derive(Debug, Clone, Copy)]
pub struct RequiredFields<'r> {
    pub prompt_hash: &'r str,
    pub model_version: &'r str,
    pub final_score: &'r Number,
}

impl<'r> RequiredFields<'r> {
    /// Extract and type-check every required field of `report`.
    pub fn extract(report: &'r Value) -> IndsureResult<Self> {
        Ok(Self {
            prompt_hash: required_str(report, PROMPT_HASH)?,
            model_version: required_str(report, MODEL_VERSION)?,
            final_score: required_score(report)?,
        })
    }
}

/// The top-level string field `field` of `report`.
pub fn required_str<'r>(report: &'r Value, field: &str) -> IndsureResult<&'r str> {
    match as_object(report)?.get(field) {
        None | Some(Value::Null) => Err(IndsureError::MissingField {
            field: field.to_string(),
        }),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(IndsureError::InvalidField {
            field: field.to_string(),
            expected: "string".to_string(),
        }),
    }
}

/// `audit_ledger.final_score` of `report`.
pub fn required_score(report: &Value) -> IndsureResult<&Number> {
    let ledger = match as_object(report)?.get(AUDIT_LEDGER) {
        None | Some(Value::Null) => {
            return Err(IndsureError::MissingField {
                field: AUDIT_LEDGER.to_string(),
            })
        }
        Some(Value::Object(ledger)) => ledger,
        Some(_) => {
            return Err(IndsureError::InvalidField {
                field: AUDIT_LEDGER.to_string(),
                expected: "object".to_string(),
            })
        }
    };

    match ledger.get(FINAL_SCORE) {
        None | Some(Value::Null) => Err(IndsureError::MissingField {
            field: FINAL_SCORE_PATH.to_string(),
        }),
        Some(Value::Number(n)) => Ok(n),
        Some(_) => Err(IndsureError::InvalidField {
            field: FINAL_SCORE_PATH.to_string(),
            expected: "number".to_string(),
        }),
    }
}

fn as_object(report: &Value) -> IndsureResult<&serde_json::Map<String, Value>> {
    report.as_object().ok_or_else(|| IndsureError::MalformedReport {
        reason: format!("expected a JSON object, found {}", type_name(report)),
    })
}

pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn extracts_all_required_fields() {
        let r = json!({
            "prompt_hash": "abc123",
            "model_version": "v1",
            "audit_ledger": { "final_score": 35 }
        });
        let fields = RequiredFields::extract(&r).unwrap();
        assert_eq!(fields.prompt_hash, "abc123");
        assert_eq!(fields.model_version, "v1");
        assert_eq!(fields.final_score.as_i64(), Some(35));
    }

    #[test]
    fn missing_ledger_is_reported_by_name() {
        let r = json!({ "prompt_hash": "abc123", "model_version": "v1" });
        let err = RequiredFields::extract(&r).unwrap_err();
        assert!(
            matches!(&err, IndsureError::MissingField { field } if field == "audit_ledger"),
            "got {err:?}"
        );
    }

    #[test]
    fn missing_score_is_reported_with_full_path() {
        let r = json!({ "audit_ledger": { "entries": [] } });
        let err = required_score(&r).unwrap_err();
        assert_eq!(err.to_string(), "missing required field 'audit_ledger.final_score'");
    }

    #[test]
    fn null_counts_as_missing() {
        let r = json!({ "prompt_hash": null });
        assert!(matches!(
            required_str(&r, PROMPT_HASH),
            Err(IndsureError::MissingField { .. })
        ));
    }

    #[test]
    fn wrong_types_are_rejected() {
        let r = json!({ "model_version": 1, "audit_ledger": { "final_score": "35" } });
        assert!(matches!(
            required_str(&r, MODEL_VERSION),
            Err(IndsureError::InvalidField { .. })
        ));
        assert!(matches!(
            required_score(&r),
            Err(IndsureError::InvalidField { .. })
        ));
    }

    #[test]
    fn non_object_reports_are_malformed() {
        let err = required_str(&json!([1]), PROMPT_HASH).unwrap_err();
        assert!(err.to_string().contains("found array"));
    }
}

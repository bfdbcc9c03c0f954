//! JSON Schema validation of audit report structure.
//!
//! The comparator itself only needs the three required fields (see
//! `report`).  `ReportSchema` checks the wider shape a well-formed report
//! is expected to have and reports every violation in one pass.

use serde_json::{json, Value};
use tracing::{debug, warn};

use indsure_contracts::error::{IndsureError, IndsureResult};

/// The minimum structure of an audit report.
pub fn audit_report_schema() -> Value {
    json!({
        "type": "object",
        "required": ["prompt_hash", "model_version", "audit_ledger"],
        "properties": {
            "prompt_hash": { "type": "string", "minLength": 1 },
            "model_version": { "type": "string", "minLength": 1 },
            "analysis_id": { "type": "string" },
            "generated_at": { "type": "string" },
            "job_id": { "type": ["string", "null"] },
            "audit_ledger": {
                "type": "object",
                "required": ["final_score"],
                "properties": {
                    "final_score": { "type": "number" },
                    "entries": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "required": ["penalty_points", "category"],
                            "properties": {
                                "penalty_points": { "type": "number" },
                                "category": { "type": "string" }
                            }
                        }
                    }
                }
            }
        }
    })
}

/// A compiled audit report schema.
pub struct ReportSchema {
    validator: jsonschema::Validator,
}

impl ReportSchema {
    /// Compile the built-in audit report schema.
    pub fn new() -> IndsureResult<Self> {
        Self::from_document(&audit_report_schema())
    }

    /// Compile a caller-supplied schema document.
    pub fn from_document(document: &Value) -> IndsureResult<Self> {
        let validator =
            jsonschema::validator_for(document).map_err(|e| IndsureError::ConfigError {
                reason: format!("invalid JSON Schema document: {e}"),
            })?;
        Ok(Self { validator })
    }

    /// Every violation of the schema by `report`.  Empty on success.
    pub fn validate(&self, report: &Value) -> Vec<String> {
        let violations: Vec<String> = self
            .validator
            .iter_errors(report)
            .map(|error| format!("at '{}': {}", error.instance_path, error))
            .collect();

        for message in &violations {
            warn!(%message, "audit report schema violation");
        }
        debug!(violation_count = violations.len(), "report schema validation complete");

        violations
    }

    /// `Ok(())` when `report` is valid, otherwise `SchemaValidation` listing
    /// every violation.
    pub fn ensure_valid(&self, report: &Value) -> IndsureResult<()> {
        let violations = self.validate(report);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(IndsureError::SchemaValidation {
                reason: violations.join("; "),
            })
        }
    }
}

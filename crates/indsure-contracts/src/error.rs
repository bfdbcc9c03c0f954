//! Error types for the IndSure replay gate.
//!
//! Divergence between two reports is not an error: it is reported through
//! `ReplayVerdict::diffs`.  The variants here cover contract violations by the
//! caller (malformed reports, unserializable values) and environment failures
//! (configuration, file loading, ledger writes).

use thiserror::Error;

/// The unified error type for the IndSure replay crates.
#[derive(Debug, Error)]
pub enum IndsureError {
    /// A field the comparator depends on is absent from a report.
    #[error("missing required field '{field}'")]
    MissingField { field: String },

    /// A required field is present but holds the wrong JSON type.
    #[error("required field '{field}' must be a {expected}")]
    InvalidField { field: String, expected: String },

    /// The report as a whole is unusable (e.g. not a JSON object).
    #[error("malformed audit report: {reason}")]
    MalformedReport { reason: String },

    /// A value could not be converted to JSON or serialized to canonical text.
    #[error("serialization failed: {reason}")]
    Serialization { reason: String },

    /// A report violated the audit report JSON Schema.
    #[error("schema validation error: {reason}")]
    SchemaValidation { reason: String },

    /// A configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// A report file could not be read or parsed.
    #[error("failed to load report '{path}': {reason}")]
    ReportLoad { path: String, reason: String },

    /// The replay ledger could not append a verdict.
    #[error("audit write failed: {reason}")]
    AuditWriteFailed { reason: String },
}

/// Convenience alias used throughout the IndSure crates.
pub type IndsureResult<T> = Result<T, IndsureError>;

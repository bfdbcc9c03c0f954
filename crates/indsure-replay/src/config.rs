//! Replay comparator configuration.
//!
//! A `ReplayConfig` is deserialized from TOML.  Every key is optional; an
//! empty document yields the defaults.
//!
//! ```toml
//! volatile_fields = ["analysis_id", "generated_at", "job_id"]
//! detailed_diffs = true
//! max_field_diffs = 20
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use indsure_contracts::error::{IndsureError, IndsureResult};

use crate::strip::VOLATILE_FIELDS;

/// Tunables for `ReplayComparator`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReplayConfig {
    /// Top-level fields removed before deep comparison and hashing.
    pub volatile_fields: Vec<String>,

    /// Append per-path `FieldDiff` lines after a content divergence.
    pub detailed_diffs: bool,

    /// Upper bound on per-path lines when `detailed_diffs` is on.
    pub max_field_diffs: usize,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            volatile_fields: VOLATILE_FIELDS.iter().map(|f| f.to_string()).collect(),
            detailed_diffs: false,
            max_field_diffs: 20,
        }
    }
}

impl ReplayConfig {
    /// Parse `s` as TOML.
    ///
    /// Returns `IndsureError::ConfigError` if the TOML is malformed, carries
    /// unknown keys, or lists an empty volatile field name.
    pub fn from_toml_str(s: &str) -> IndsureResult<Self> {
        let config: ReplayConfig = toml::from_str(s).map_err(|e| IndsureError::ConfigError {
            reason: format!("failed to parse replay config TOML: {}", e),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read the file at `path` and parse it as TOML.
    pub fn from_file(path: &Path) -> IndsureResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| IndsureError::ConfigError {
            reason: format!("failed to read replay config '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    fn validate(&self) -> IndsureResult<()> {
        if let Some(pos) = self.volatile_fields.iter().position(|f| f.trim().is_empty()) {
            return Err(IndsureError::ConfigError {
                reason: format!("volatile_fields[{pos}] must not be empty"),
            });
        }
        Ok(())
    }
}

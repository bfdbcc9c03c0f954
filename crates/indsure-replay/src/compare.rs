//! Replay comparator.
//!
//! `ReplayComparator` decides whether a replayed audit report reproduces the
//! original.  One call runs, in order:
//!
//! 1. **Validation**: both reports must carry `prompt_hash`,
//!    `model_version` and `audit_ledger.final_score` with the right types.
//!    A violation is an `Err`, never a diff.
//! 2. **Fast-path checks**: prompt hash, model version and final score.
//!    Every check runs; failures accumulate.
//! 3. **Deep equality**: volatile fields stripped, both sides
//!    canonicalized and compared as compact JSON text.
//! 4. **Hashes**: computed from the stripped canonical forms regardless of
//!    the outcome.
//!
//! The comparator holds only its configuration and never mutates its
//! inputs, so it can be shared freely across threads.

use serde::Serialize;
use serde_json::{Number, Value};
use tracing::{debug, warn};

use indsure_contracts::{
    error::{IndsureError, IndsureResult},
    verdict::ReplayVerdict,
};

use crate::{
    canonical::{canonicalize, canonicalize_serializable},
    config::ReplayConfig,
    diff::diff_values,
    hash::sha256_hex,
    report::RequiredFields,
    strip::strip_fields,
    traits::ReplayRecorder,
};

/// Diff line appended when the stripped canonical forms differ.
pub const CONTENT_DIVERGENCE: &str =
    "Content divergence: canonical reports differ after stripping volatile fields";

/// Compare `original` and `replay` with the default configuration.
pub fn verify_replay(original: &Value, replay: &Value) -> IndsureResult<ReplayVerdict> {
    ReplayComparator::default().verify(original, replay)
}

/// Stateless original-vs-replay comparator.
#[derive(Debug, Clone, Default)]
pub struct ReplayComparator {
    config: ReplayConfig,
}

impl ReplayComparator {
    pub fn new(config: ReplayConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReplayConfig {
        &self.config
    }

    /// Compare two reports and return the verdict.
    ///
    /// Returns `Err` only for malformed input (missing or mistyped required
    /// fields, non-object reports) or a serialization failure.  Content
    /// divergence is reported through `ReplayVerdict::diffs`.
    pub fn verify(&self, original: &Value, replay: &Value) -> IndsureResult<ReplayVerdict> {
        let lhs = RequiredFields::extract(original)?;
        let rhs = RequiredFields::extract(replay)?;

        let mut diffs: Vec<String> = Vec::new();

        // ── Fast-path checks ──────────────────────────────────────────────────
        debug!(
            original = %lhs.prompt_hash,
            replay = %rhs.prompt_hash,
            "checking prompt hash"
        );
        if lhs.prompt_hash != rhs.prompt_hash {
            diffs.push(format!(
                "Prompt hash mismatch: original '{}' vs replay '{}'",
                lhs.prompt_hash, rhs.prompt_hash
            ));
        }

        debug!(
            original = %lhs.model_version,
            replay = %rhs.model_version,
            "checking model version"
        );
        if lhs.model_version != rhs.model_version {
            diffs.push(format!(
                "Model version mismatch: original '{}' vs replay '{}'",
                lhs.model_version, rhs.model_version
            ));
        }

        debug!(
            original = %lhs.final_score,
            replay = %rhs.final_score,
            "checking final score"
        );
        if !scores_equal(lhs.final_score, rhs.final_score) {
            diffs.push(format!(
                "Score mismatch: original {} vs replay {}",
                lhs.final_score, rhs.final_score
            ));
        }

        // ── Deep equality ─────────────────────────────────────────────────────
        let original_canonical = canonicalize(&strip_fields(original, &self.config.volatile_fields));
        let replay_canonical = canonicalize(&strip_fields(replay, &self.config.volatile_fields));

        let original_text = to_text(&original_canonical)?;
        let replay_text = to_text(&replay_canonical)?;

        if original_text != replay_text {
            diffs.push(CONTENT_DIVERGENCE.to_string());
            if self.config.detailed_diffs {
                self.push_field_diffs(&original_canonical, &replay_canonical, &mut diffs);
            }
        }

        // ── Hashes ────────────────────────────────────────────────────────────
        let original_hash = sha256_hex(original_text.as_bytes());
        let replay_hash = sha256_hex(replay_text.as_bytes());

        for diff in &diffs {
            warn!(%diff, "replay divergence");
        }

        let verdict = ReplayVerdict::from_diffs(diffs, original_hash, replay_hash);
        debug!(
            matches = verdict.matches,
            diff_count = verdict.diffs.len(),
            original_hash = %verdict.original_hash,
            replay_hash = %verdict.replay_hash,
            "replay verification complete"
        );
        Ok(verdict)
    }

    /// `verify` for any serializable report type.
    pub fn verify_serializable<T: Serialize + ?Sized>(
        &self,
        original: &T,
        replay: &T,
    ) -> IndsureResult<ReplayVerdict> {
        let original = canonicalize_serializable(original)?;
        let replay = canonicalize_serializable(replay)?;
        self.verify(&original, &replay)
    }

    /// `verify`, then hand the verdict to `recorder`.
    ///
    /// A recorder failure is returned as an error; the verdict is not
    /// returned without being recorded.
    pub fn verify_and_record(
        &self,
        original: &Value,
        replay: &Value,
        recorder: &dyn ReplayRecorder,
    ) -> IndsureResult<ReplayVerdict> {
        let verdict = self.verify(original, replay)?;
        recorder.record(&verdict)?;
        Ok(verdict)
    }

    fn push_field_diffs(&self, original: &Value, replay: &Value, diffs: &mut Vec<String>) {
        let field_diffs = diff_values(original, replay);
        let limit = self.config.max_field_diffs;

        diffs.extend(field_diffs.iter().take(limit).map(|d| format!("  {d}")));
        if field_diffs.len() > limit {
            diffs.push(format!("  ... {} more field differences", field_diffs.len() - limit));
        }
    }
}

/// Numeric equality of two scores, independent of integer/float encoding.
fn scores_equal(a: &Number, b: &Number) -> bool {
    match (a.as_i64(), b.as_i64()) {
        (Some(x), Some(y)) => x == y,
        _ => match (a.as_u64(), b.as_u64()) {
            (Some(x), Some(y)) => x == y,
            _ => a.as_f64() == b.as_f64(),
        },
    }
}

fn to_text(value: &Value) -> IndsureResult<String> {
    serde_json::to_string(value).map_err(|e| IndsureError::Serialization {
        reason: format!("failed to serialize canonical report: {e}"),
    })
}

//! Sink for replay verdicts.
//!
//! The comparator is pure and owns no storage.  Callers that need a durable
//! record of every verdict (a release gate, a CI job) pass a
//! `ReplayRecorder` to `ReplayComparator::verify_and_record`.

use indsure_contracts::{error::IndsureResult, verdict::ReplayVerdict};

/// An append-only store of replay verdicts.
pub trait ReplayRecorder: Send + Sync {
    /// Append one verdict.  Recorded verdicts are never modified.
    fn record(&self, verdict: &ReplayVerdict) -> IndsureResult<()>;

    /// Mark the gate run identified by `gate_id` as complete.
    fn finalize(&self, gate_id: &str) -> IndsureResult<()>;
}

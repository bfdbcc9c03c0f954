//! Ledger event and log types.
//!
//! `ReplayEvent` is one link in the hash chain: a recorded verdict plus the
//! hashes that make tampering detectable.  `ReplayLog` is the sealed ledger
//! exported at the end of a gate run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use indsure_contracts::verdict::ReplayVerdict;

/// A verdict as it is stored in the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerdictRecord {
    pub verdict: ReplayVerdict,

    /// Wall-clock time (UTC) the verdict was appended.
    pub recorded_at: DateTime<Utc>,
}

/// A single entry in the SHA-256 hash chain for one gate run.
///
/// Changing any field, including the embedded verdict, invalidates
/// `this_hash` and every later `prev_hash`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayEvent {
    /// Position in the chain, starting at 0.
    pub sequence: u64,

    /// The gate run this event belongs to.
    pub gate_id: String,

    pub record: VerdictRecord,

    /// `this_hash` of the previous event, or `GENESIS_HASH` for the first.
    pub prev_hash: String,

    /// SHA-256 (hex) over (gate_id, sequence, prev_hash, record JSON).
    pub this_hash: String,
}

impl ReplayEvent {
    /// The `prev_hash` of the first event in every chain.
    pub const GENESIS_HASH: &'static str =
        "0000000000000000000000000000000000000000000000000000000000000000";
}

/// A sealed ledger for one gate run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayLog {
    pub gate_id: String,

    /// All events in chain order.
    pub events: Vec<ReplayEvent>,

    /// Wall-clock time (UTC) the log was exported.
    pub finalized_at: DateTime<Utc>,

    /// `this_hash` of the last event.  Empty string if the log is empty.
    pub terminal_hash: String,

    /// Number of recorded verdicts that matched.
    pub passed: usize,

    /// Number of recorded verdicts that diverged.
    pub failed: usize,
}

impl ReplayLog {
    /// True when every recorded verdict matched (vacuously true when empty).
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

//! # indsure-audit
//!
//! Append-only, SHA-256 hash-chained ledger of replay verdicts.
//!
//! ## Overview
//!
//! Every verdict a gate run produces is wrapped in a `ReplayEvent` that
//! links to the previous event by hash.  Editing a recorded verdict after
//! the fact, for example flipping a failure to a pass, breaks the chain and
//! is detected by `verify_chain`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use indsure_audit::InMemoryReplayLedger;
//! use indsure_replay::{ReplayComparator, ReplayRecorder};
//!
//! let ledger = InMemoryReplayLedger::new("release-2026-10");
//! ReplayComparator::default().verify_and_record(&golden, &replay, &ledger)?;
//! ledger.finalize("release-2026-10")?;
//!
//! assert!(ledger.verify_integrity());
//! let log = ledger.export_log()?;
//! ```

pub mod chain;
pub mod event;
pub mod memory;

pub use chain::{hash_event, verify_chain};
pub use event::{ReplayEvent, ReplayLog, VerdictRecord};
pub use memory::InMemoryReplayLedger;

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use serde_json::json;

    use indsure_contracts::verdict::ReplayVerdict;
    use indsure_replay::{traits::ReplayRecorder, ReplayComparator};

    use super::{InMemoryReplayLedger, ReplayEvent};

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn passing(hash: &str) -> ReplayVerdict {
        ReplayVerdict::from_diffs(vec![], hash, hash)
    }

    fn failing() -> ReplayVerdict {
        ReplayVerdict::from_diffs(
            vec!["Score mismatch: original 35 vs replay 40".to_string()],
            "aa",
            "bb",
        )
    }

    // ── Tests ─────────────────────────────────────────────────────────────────

    /// Recording three verdicts produces a valid chain.
    #[test]
    fn test_hash_chain_integrity() {
        let ledger = InMemoryReplayLedger::new("gate-integrity");
        ledger.record(&passing("a1")).unwrap();
        ledger.record(&failing()).unwrap();
        ledger.record(&passing("a3")).unwrap();

        assert!(ledger.verify_integrity(), "chain must be valid after sequential writes");
    }

    /// Flipping a recorded failure into a pass breaks the chain.
    #[test]
    fn test_tamper_detection() {
        let ledger = InMemoryReplayLedger::new("gate-tamper");
        ledger.record(&passing("a1")).unwrap();
        ledger.record(&failing()).unwrap();
        ledger.record(&passing("a3")).unwrap();

        {
            let mut state = ledger.state.lock().unwrap();
            state.events[1].record.verdict = passing("bb");
        }

        assert!(
            !ledger.verify_integrity(),
            "chain must detect tampering with a stored verdict"
        );
    }

    /// Dropping an event from the middle of the chain is detected.
    #[test]
    fn test_removed_event_detected() {
        let ledger = InMemoryReplayLedger::new("gate-remove");
        ledger.record(&passing("a1")).unwrap();
        ledger.record(&passing("a2")).unwrap();
        ledger.record(&passing("a3")).unwrap();

        let mut log = ledger.export_log().unwrap();
        log.events.remove(1);
        assert!(!super::verify_chain(&log.events));
    }

    /// The first event's `prev_hash` must equal `ReplayEvent::GENESIS_HASH`.
    #[test]
    fn test_genesis_hash() {
        let ledger = InMemoryReplayLedger::new("gate-genesis");
        ledger.record(&passing("a1")).unwrap();

        let log = ledger.export_log().unwrap();
        assert_eq!(log.events.len(), 1);
        assert_eq!(log.events[0].prev_hash, ReplayEvent::GENESIS_HASH);
    }

    /// Sequence numbers are 0, 1, 2, … with no gaps.
    #[test]
    fn test_sequence_monotonic() {
        let ledger = InMemoryReplayLedger::new("gate-seq");
        for i in 0..3 {
            ledger.record(&passing(&format!("h{i}"))).unwrap();
        }

        let log = ledger.export_log().unwrap();
        for (idx, event) in log.events.iter().enumerate() {
            assert_eq!(event.sequence, idx as u64);
        }
    }

    /// `export_log()` carries every event, the terminal hash, and the tallies.
    #[test]
    fn test_export_log() {
        let ledger = InMemoryReplayLedger::new("gate-export");
        ledger.record(&passing("a1")).unwrap();
        ledger.record(&failing()).unwrap();
        ledger.finalize("gate-export").unwrap();

        let log = ledger.export_log().unwrap();
        assert_eq!(log.gate_id, "gate-export");
        assert_eq!(log.events.len(), 2);
        assert_eq!(log.passed, 1);
        assert_eq!(log.failed, 1);
        assert!(!log.all_passed());
        assert_eq!(log.terminal_hash, log.events.last().unwrap().this_hash);
        assert!(super::verify_chain(&log.events));
    }

    /// An empty ledger is trivially valid.
    #[test]
    fn test_verify_empty() {
        let ledger = InMemoryReplayLedger::new("gate-empty");
        assert!(ledger.verify_integrity());
        assert!(super::verify_chain(&[]));

        let log = ledger.export_log().unwrap();
        assert!(log.terminal_hash.is_empty());
        assert!(log.all_passed());
    }

    /// The comparator records its verdict into the ledger.
    #[test]
    fn test_comparator_records_into_ledger() {
        let golden = json!({
            "prompt_hash": "abc123",
            "model_version": "v1",
            "audit_ledger": { "final_score": 35 },
            "analysis_id": "AAA"
        });
        let mut replay = golden.clone();
        replay["analysis_id"] = json!("BBB");

        let ledger = InMemoryReplayLedger::new("gate-comparator");
        let verdict = ReplayComparator::default()
            .verify_and_record(&golden, &replay, &ledger)
            .unwrap();

        let log = ledger.export_log().unwrap();
        assert_eq!(log.events.len(), 1);
        assert_eq!(log.events[0].record.verdict, verdict);
        assert!(log.all_passed());
    }

    /// Exported logs survive a JSON round trip with the chain intact.
    #[test]
    fn test_exported_log_reverifies_after_json() {
        let ledger = InMemoryReplayLedger::new("gate-json");
        ledger.record(&passing("a1")).unwrap();
        ledger.record(&failing()).unwrap();

        let text = serde_json::to_string(&ledger.export_log().unwrap()).unwrap();
        let log: super::ReplayLog = serde_json::from_str(&text).unwrap();
        assert!(super::verify_chain(&log.events));
    }
}

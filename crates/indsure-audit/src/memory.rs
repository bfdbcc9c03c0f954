//! In-memory implementation of `ReplayRecorder`.
//!
//! `InMemoryReplayLedger` keeps every event in a `Vec` behind a `Mutex`, so
//! several comparisons running on different threads can append to the same
//! gate run.  Use `export_log()` to obtain a sealed `ReplayLog` and
//! `verify_integrity()` to confirm the chain is intact.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use tracing::{debug, info};

use indsure_contracts::{
    error::{IndsureError, IndsureResult},
    verdict::ReplayVerdict,
};
use indsure_replay::traits::ReplayRecorder;

use crate::{
    chain::{hash_event, verify_chain},
    event::{ReplayEvent, ReplayLog, VerdictRecord},
};

pub(crate) struct LedgerState {
    pub(crate) events: Vec<ReplayEvent>,
    pub(crate) sequence: u64,
    pub(crate) last_hash: String,
}

/// An append-only, hash-chained ledger of replay verdicts.
pub struct InMemoryReplayLedger {
    gate_id: String,
    pub(crate) state: Arc<Mutex<LedgerState>>,
}

impl InMemoryReplayLedger {
    pub fn new(gate_id: impl Into<String>) -> Self {
        let state = LedgerState {
            events: Vec::new(),
            sequence: 0,
            last_hash: ReplayEvent::GENESIS_HASH.to_string(),
        };
        Self {
            gate_id: gate_id.into(),
            state: Arc::new(Mutex::new(state)),
        }
    }

    pub fn gate_id(&self) -> &str {
        &self.gate_id
    }

    /// Export a sealed `ReplayLog` of all events recorded so far.
    pub fn export_log(&self) -> IndsureResult<ReplayLog> {
        let state = self.lock()?;
        let terminal_hash = state
            .events
            .last()
            .map(|e| e.this_hash.clone())
            .unwrap_or_default();
        let passed = state
            .events
            .iter()
            .filter(|e| e.record.verdict.matches)
            .count();

        Ok(ReplayLog {
            gate_id: self.gate_id.clone(),
            events: state.events.clone(),
            finalized_at: Utc::now(),
            terminal_hash,
            passed,
            failed: state.events.len() - passed,
        })
    }

    /// Verify that the in-memory chain has not been tampered with.
    ///
    /// A poisoned lock counts as a failed check.
    pub fn verify_integrity(&self) -> bool {
        match self.lock() {
            Ok(state) => verify_chain(&state.events),
            Err(_) => false,
        }
    }

    fn lock(&self) -> IndsureResult<std::sync::MutexGuard<'_, LedgerState>> {
        self.state.lock().map_err(|e| IndsureError::AuditWriteFailed {
            reason: format!("ledger state lock poisoned: {}", e),
        })
    }
}

impl ReplayRecorder for InMemoryReplayLedger {
    /// Append one verdict to the hash chain.
    fn record(&self, verdict: &ReplayVerdict) -> IndsureResult<()> {
        let mut state = self.lock()?;

        let prev_hash = state.last_hash.clone();
        let sequence = state.sequence;
        let record = VerdictRecord {
            verdict: verdict.clone(),
            recorded_at: Utc::now(),
        };

        let this_hash = hash_event(&self.gate_id, sequence, &record, &prev_hash)?;

        debug!(
            gate_id = %self.gate_id,
            sequence,
            matches = verdict.matches,
            this_hash = %this_hash,
            "verdict recorded"
        );

        state.events.push(ReplayEvent {
            sequence,
            gate_id: self.gate_id.clone(),
            record,
            prev_hash,
            this_hash: this_hash.clone(),
        });
        state.sequence += 1;
        state.last_hash = this_hash;

        Ok(())
    }

    fn finalize(&self, gate_id: &str) -> IndsureResult<()> {
        let state = self.lock()?;
        let failed = state
            .events
            .iter()
            .filter(|e| !e.record.verdict.matches)
            .count();

        info!(
            gate_id = %gate_id,
            event_count = state.events.len(),
            failed,
            terminal_hash = %state.last_hash,
            "replay ledger finalized"
        );

        Ok(())
    }
}

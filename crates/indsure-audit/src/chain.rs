//! Hash-chain primitives for the replay ledger.
//!
//! Hash input layout (bytes, in order):
//!   1. gate_id as UTF-8 bytes
//!   2. sequence as 8-byte little-endian
//!   3. prev_hash as UTF-8 bytes (64 ASCII hex chars)
//!   4. compact JSON of the record

use sha2::{Digest, Sha256};

use indsure_contracts::error::{IndsureError, IndsureResult};

use crate::event::{ReplayEvent, VerdictRecord};

/// Compute the SHA-256 hash for a single ledger event.
///
/// Returns a lowercase 64-character hex string.
pub fn hash_event(
    gate_id: &str,
    sequence: u64,
    record: &VerdictRecord,
    prev_hash: &str,
) -> IndsureResult<String> {
    let record_json = serde_json::to_vec(record).map_err(|e| IndsureError::Serialization {
        reason: format!("verdict record is not serializable: {e}"),
    })?;

    let mut hasher = Sha256::new();
    hasher.update(gate_id.as_bytes());
    hasher.update(sequence.to_le_bytes());
    hasher.update(prev_hash.as_bytes());
    hasher.update(&record_json);

    Ok(hex::encode(hasher.finalize()))
}

/// Verify the integrity of a ledger chain.
///
/// Valid when every event links to its predecessor (`GENESIS_HASH` for the
/// first), carries the sequence number of its position, and its
/// `this_hash` matches the recomputed value.  An empty chain is valid.
pub fn verify_chain(events: &[ReplayEvent]) -> bool {
    let mut expected_prev = ReplayEvent::GENESIS_HASH.to_string();

    for (position, event) in events.iter().enumerate() {
        if event.prev_hash != expected_prev || event.sequence != position as u64 {
            return false;
        }

        match hash_event(&event.gate_id, event.sequence, &event.record, &event.prev_hash) {
            Ok(recomputed) if recomputed == event.this_hash => {}
            _ => return false,
        }

        expected_prev = event.this_hash.clone();
    }

    true
}

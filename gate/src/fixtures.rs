//! Seed audit reports for the `demo` subcommand.
//!
//! The golden report mirrors a small health-policy audit: one waiting-period
//! penalty bringing the score to 35.  `replayed` builds what an independent
//! re-run would emit: identical content under a fresh run id and timestamp.

use chrono::{DateTime, Duration, Utc};
use serde_json::{json, Value};
use uuid::Uuid;

/// Timestamp of the golden run.
pub const GOLDEN_GENERATED_AT: &str = "2026-01-01T00:00:00Z";

/// The golden report.
pub fn golden_report() -> Value {
    json!({
        "prompt_hash": "abc123",
        "model_version": "v1",
        "audit_ledger": {
            "final_score": 35,
            "entries": [
                { "penalty_points": -30, "category": "WAITING_PERIOD" }
            ]
        },
        "analysis_id": "AAA",
        "generated_at": GOLDEN_GENERATED_AT
    })
}

/// A replay of `golden` generated `delay` after it, with a new analysis id.
pub fn replayed(golden: &Value, delay: Duration) -> Value {
    let base = golden["generated_at"]
        .as_str()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_else(Utc::now);

    let mut replay = golden.clone();
    replay["analysis_id"] = json!(Uuid::new_v4().to_string());
    replay["generated_at"] = json!((base + delay).to_rfc3339());
    replay
}

/// A replay whose final score drifted to `score`.
pub fn drifted(golden: &Value, score: i64) -> Value {
    let mut replay = replayed(golden, Duration::days(1));
    replay["audit_ledger"]["final_score"] = json!(score);
    replay
}

//! Replay comparison results.
//!
//! A `ReplayVerdict` is what the comparator hands back for one
//! original/replay pair.  `FieldDiff` is the optional per-path detail that
//! can accompany a content divergence.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The outcome of comparing an original audit report with its replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayVerdict {
    /// True only when `diffs` is empty.
    pub matches: bool,
    /// Human-readable divergences, in the order the checks ran.
    pub diffs: Vec<String>,
    /// SHA-256 (hex) of the original's stripped canonical form.
    pub original_hash: String,
    /// SHA-256 (hex) of the replay's stripped canonical form.
    pub replay_hash: String,
}

impl ReplayVerdict {
    /// Build a verdict whose `matches` flag is derived from `diffs`.
    pub fn from_diffs(
        diffs: Vec<String>,
        original_hash: impl Into<String>,
        replay_hash: impl Into<String>,
    ) -> Self {
        Self {
            matches: diffs.is_empty(),
            diffs,
            original_hash: original_hash.into(),
            replay_hash: replay_hash.into(),
        }
    }

    /// True when both reports hash to the same content digest.
    pub fn hashes_agree(&self) -> bool {
        self.original_hash == self.replay_hash
    }
}

/// A single structural difference between two JSON documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDiff {
    /// Dotted path with `[i]` array indices, e.g. `audit_ledger.entries[0].category`.
    /// The empty string denotes the document root.
    pub path: String,
    pub kind: FieldDiffKind,
}

/// How the value at a path differs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldDiffKind {
    /// Present only in the replay.
    Added { replay: Value },
    /// Present only in the original.
    Removed { original: Value },
    /// Present in both with different values.
    Changed { original: Value, replay: Value },
}

impl fmt::Display for FieldDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.path.is_empty() { "<root>" } else { self.path.as_str() };
        match &self.kind {
            FieldDiffKind::Added { replay } => write!(f, "{path}: added in replay ({replay})"),
            FieldDiffKind::Removed { original } => {
                write!(f, "{path}: missing from replay (was {original})")
            }
            FieldDiffKind::Changed { original, replay } => {
                write!(f, "{path}: {original} -> {replay}")
            }
        }
    }
}

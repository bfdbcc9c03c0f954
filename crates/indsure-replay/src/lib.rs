//! # indsure-replay
//!
//! Deterministic replay verification for IndSure policy audit reports.
//!
//! An AI-generated audit is only trustworthy if re-running the same inputs
//! reproduces it.  This crate decides whether a replayed report is
//! equivalent to the original once run bookkeeping (`analysis_id`,
//! `generated_at`, `job_id`) is set aside.
//!
//! ## Pipeline
//!
//! - [`strip`]: removes volatile top-level fields from a copy.
//! - [`canonical`]: sorts object keys at every depth; arrays keep order.
//! - [`hash`]: SHA-256 over the compact canonical JSON.
//! - [`compare`]: fast-path checks, deep equality, hashes, verdict.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use indsure_replay::verify_replay;
//!
//! let verdict = verify_replay(&original, &replay)?;
//! if !verdict.matches {
//!     for diff in &verdict.diffs {
//!         eprintln!("{diff}");
//!     }
//! }
//! ```

pub mod canonical;
pub mod compare;
pub mod config;
pub mod diff;
pub mod hash;
pub mod report;
pub mod schema;
pub mod strip;
pub mod traits;

pub use canonical::{canonical_string, canonicalize, canonicalize_serializable};
pub use compare::{verify_replay, ReplayComparator, CONTENT_DIVERGENCE};
pub use config::ReplayConfig;
pub use diff::diff_values;
pub use hash::{hash_value, report_hash};
pub use schema::ReportSchema;
pub use strip::{strip_fields, strip_volatile_fields, VOLATILE_FIELDS};
pub use traits::ReplayRecorder;

// ── Tests ─────────────────────────────────────────────────────────────────────

//! IndSure replay gate CLI.
//!
//! Verifies that an independently regenerated audit report reproduces the
//! golden one.  Used as a build/release gate: any divergence or malformed
//! report exits with status 1.
//!
//! Usage:
//!   cargo run -p replay-gate -- verify --original golden.json --replay replay.json
//!   cargo run -p replay-gate -- hash report.json
//!   cargo run -p replay-gate -- canonicalize report.json --strip
//!   cargo run -p replay-gate -- validate report.json
//!   cargo run -p replay-gate -- demo

mod fixtures;

use std::path::{Path, PathBuf};

use chrono::{Duration, Utc};
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing::info;
use tracing_subscriber::EnvFilter;

use indsure_audit::InMemoryReplayLedger;
use indsure_contracts::{
    error::{IndsureError, IndsureResult},
    verdict::ReplayVerdict,
};
use indsure_replay::{
    canonical::is_canonical, canonicalize, report::RequiredFields, report_hash,
    strip_volatile_fields, ReplayComparator, ReplayConfig, ReplayRecorder, ReportSchema,
};

// ── CLI definition ────────────────────────────────────────────────────────────

/// IndSure replay gate: deterministic audit replay verification.
#[derive(Parser)]
#[command(
    name = "replay-gate",
    about = "Verify that a replayed IndSure audit reproduces the golden audit",
    long_about = "Compares an original and a replayed audit report after stripping volatile\n\
                  fields and canonicalizing key order.  Exits non-zero on any divergence."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compare a golden report with its replay.
    Verify {
        /// The golden (original) report.
        #[arg(long)]
        original: PathBuf,
        /// The independently regenerated report.
        #[arg(long)]
        replay: PathBuf,
        /// TOML comparator configuration.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Print a path-level breakdown of content divergence.
        #[arg(long)]
        detailed: bool,
        /// Write the hash-chained verdict ledger to this file as JSON.
        #[arg(long)]
        ledger_out: Option<PathBuf>,
    },
    /// Print the content hash of a report (volatile fields stripped).
    Hash { report: PathBuf },
    /// Print the canonical JSON of a report.
    Canonicalize {
        report: PathBuf,
        /// Remove volatile fields first.
        #[arg(long)]
        strip: bool,
    },
    /// Check a report's structure and required fields.
    Validate { report: PathBuf },
    /// Run the built-in seed scenario: one matching replay, one drifted replay.
    Demo,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Set RUST_LOG=debug to see every check the comparator runs.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Verify {
            original,
            replay,
            config,
            detailed,
            ledger_out,
        } => run_verify(&original, &replay, config.as_deref(), detailed, ledger_out.as_deref()),
        Command::Hash { report } => run_hash(&report),
        Command::Canonicalize { report, strip } => run_canonicalize(&report, strip),
        Command::Validate { report } => run_validate(&report),
        Command::Demo => run_demo(),
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("replay-gate error: {}", e);
            std::process::exit(1);
        }
    }
}

// ── Subcommands ───────────────────────────────────────────────────────────────
//
// Each returns Ok(true) on success, Ok(false) when the gate fails.

fn run_verify(
    original: &Path,
    replay: &Path,
    config: Option<&Path>,
    detailed: bool,
    ledger_out: Option<&Path>,
) -> IndsureResult<bool> {
    let mut config = match config {
        Some(path) => ReplayConfig::from_file(path)?,
        None => ReplayConfig::default(),
    };
    config.detailed_diffs |= detailed;

    let original = load_report(original)?;
    let replay = load_report(replay)?;

    let gate_id = format!("replay-gate-{}", Utc::now().format("%Y%m%dT%H%M%SZ"));
    let ledger = InMemoryReplayLedger::new(gate_id.clone());

    let comparator = ReplayComparator::new(config);
    info!(
        gate_id = %gate_id,
        volatile_fields = ?comparator.config().volatile_fields,
        detailed_diffs = comparator.config().detailed_diffs,
        "running replay comparison"
    );

    let verdict = comparator.verify_and_record(&original, &replay, &ledger)?;
    ledger.finalize(&gate_id)?;

    print_verdict("replay", &verdict);

    if let Some(path) = ledger_out {
        let log = ledger.export_log()?;
        let text = serde_json::to_string_pretty(&log).map_err(|e| IndsureError::Serialization {
            reason: format!("failed to serialize ledger: {e}"),
        })?;
        std::fs::write(path, text).map_err(|e| IndsureError::AuditWriteFailed {
            reason: format!("failed to write ledger '{}': {}", path.display(), e),
        })?;
        info!(path = %path.display(), "ledger written");
    }

    Ok(verdict.matches)
}

fn run_hash(path: &Path) -> IndsureResult<bool> {
    let report = load_report(path)?;
    println!("{}", report_hash(&report)?);
    Ok(true)
}

fn run_canonicalize(path: &Path, strip: bool) -> IndsureResult<bool> {
    let report = load_report(path)?;
    println!("{}", render_canonical(&report, strip)?);
    Ok(true)
}

fn run_validate(path: &Path) -> IndsureResult<bool> {
    let report = load_report(path)?;
    let schema = ReportSchema::new()?;

    let violations = schema.validate(&report);
    for violation in &violations {
        println!("  - {violation}");
    }

    // Schema violations are listed above; a missing required field is the
    // one condition the comparator itself would reject.
    if let Err(e) = RequiredFields::extract(&report) {
        println!("  - {e}");
        return Ok(false);
    }

    if violations.is_empty() {
        println!("VALID  {}", path.display());
        Ok(true)
    } else {
        println!("INVALID  {} ({} violations)", path.display(), violations.len());
        Ok(false)
    }
}

fn run_demo() -> IndsureResult<bool> {
    println!();
    println!("IndSure Replay Gate: seed scenario");
    println!("==================================");
    println!();

    let golden = fixtures::golden_report();
    let comparator = ReplayComparator::default();
    let ledger = InMemoryReplayLedger::new("demo");

    let replay = fixtures::replayed(&golden, Duration::days(1));
    let faithful = comparator.verify_and_record(&golden, &replay, &ledger)?;
    print_verdict("faithful replay", &faithful);

    let drifted = fixtures::drifted(&golden, 40);
    let diverged = comparator.verify_and_record(&golden, &drifted, &ledger)?;
    print_verdict("drifted replay", &diverged);

    ledger.finalize("demo")?;
    let log = ledger.export_log()?;
    println!(
        "Ledger: {} verdicts ({} passed, {} failed), chain {}",
        log.events.len(),
        log.passed,
        log.failed,
        if ledger.verify_integrity() { "intact" } else { "BROKEN" }
    );
    println!("Terminal hash: {}", log.terminal_hash);
    println!();

    // The demo succeeds when the gate behaves as expected on both inputs.
    Ok(faithful.matches && !diverged.matches && ledger.verify_integrity())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn load_report(path: &Path) -> IndsureResult<Value> {
    let text = std::fs::read_to_string(path).map_err(|e| IndsureError::ReportLoad {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    serde_json::from_str(&text).map_err(|e| IndsureError::ReportLoad {
        path: path.display().to_string(),
        reason: format!("invalid JSON: {e}"),
    })
}

/// Pretty canonical JSON of `report`, optionally without volatile fields.
fn render_canonical(report: &Value, strip: bool) -> IndsureResult<String> {
    let canonical = if strip {
        canonicalize(&strip_volatile_fields(report))
    } else {
        canonicalize(report)
    };
    if !is_canonical(&canonical) {
        return Err(IndsureError::Serialization {
            reason: "canonical form has unsorted object keys".to_string(),
        });
    }
    serde_json::to_string_pretty(&canonical).map_err(|e| IndsureError::Serialization {
        reason: format!("failed to render canonical report: {e}"),
    })
}

fn verdict_lines(label: &str, verdict: &ReplayVerdict) -> Vec<String> {
    let status = if verdict.matches { "PASS" } else { "FAIL" };
    let hashes = if verdict.hashes_agree() { "identical" } else { "differ" };

    let mut lines = vec![
        format!("[{status}] {label}"),
        format!("  original hash: {}", verdict.original_hash),
        format!("  replay hash:   {} ({hashes})", verdict.replay_hash),
    ];
    lines.extend(verdict.diffs.iter().map(|diff| format!("  {diff}")));
    lines
}

fn print_verdict(label: &str, verdict: &ReplayVerdict) {
    for line in verdict_lines(label, verdict) {
        println!("{line}");
    }
    println!();
}

//! Batch report checker
//!
//! Checks every report in a directory against a YAML criteria file:
//!
//! - Structural checks (required sections in order)
//! - Title-page metadata checks
//! - Mandatory passage checks
//! - Duplicate conclusion detection across the batch
//!
//! Documents whose text cannot be extracted are logged and skipped; a
//! malformed criteria file aborts the run.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use report_engine::{DictionaryLemmatizer, ReportChecker};
use report_types::{BatchReport, ConclusionCorpus, Criteria, ViolationReport};

mod extract;
mod report;

use report::{ConsoleReporter, JsonReporter};

/// Command-line arguments for the report checker
#[derive(Parser, Debug)]
#[command(name = "report-cli")]
#[command(about = "Checks a directory of reports against YAML criteria")]
struct Args {
    /// Directory containing report files (.txt or .pdf)
    reports_dir: PathBuf,

    /// Path to the criteria YAML file
    criteria: PathBuf,

    /// Optional YAML dictionary mapping word forms to lemmas
    #[arg(long)]
    lemmas: Option<PathBuf>,

    /// Emit the batch report as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.verbose {
        EnvFilter::new("report_cli=debug,report_engine=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("report_cli=info"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let checker = load_checker(&args.criteria, args.lemmas.as_deref())?;
    let batch = run_batch(&checker, &args.reports_dir)?;

    let output = if args.json {
        JsonReporter::format(&batch)?
    } else {
        ConsoleReporter::format(&batch)?
    };
    print!("{}", output);

    Ok(())
}

/// Load and validate criteria, with an optional lemma dictionary.
///
/// Any failure here is fatal: no document can be meaningfully checked
/// against missing or malformed criteria.
fn load_checker(criteria_path: &Path, lemmas_path: Option<&Path>) -> Result<ReportChecker> {
    let raw = fs::read_to_string(criteria_path)
        .with_context(|| format!("Failed to read criteria file {}", criteria_path.display()))?;
    let criteria: Criteria = serde_yaml::from_str(&raw)
        .with_context(|| format!("Malformed criteria file {}", criteria_path.display()))?;

    let checker = match lemmas_path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("Failed to read lemma dictionary {}", path.display()))?;
            let forms: HashMap<String, String> = serde_yaml::from_str(&raw)
                .with_context(|| format!("Malformed lemma dictionary {}", path.display()))?;
            info!("Loaded {} lemma entries", forms.len());
            ReportChecker::with_lemmatizer(criteria, Arc::new(DictionaryLemmatizer::new(forms)))?
        }
        None => ReportChecker::new(criteria)?,
    };
    Ok(checker)
}

/// Check every file in the directory, then compare collected conclusions.
fn run_batch(checker: &ReportChecker, reports_dir: &Path) -> Result<BatchReport> {
    let mut paths: Vec<PathBuf> = fs::read_dir(reports_dir)
        .with_context(|| format!("Failed to read reports directory {}", reports_dir.display()))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    paths.sort();

    let mut corpus = ConclusionCorpus::new();
    let mut remarks: Vec<ViolationReport> = Vec::new();
    let mut skipped = Vec::new();

    for path in &paths {
        let document_id = path.display().to_string();
        match extract::read_document(path) {
            Ok(text) => {
                info!("Checking {}", document_id);
                let report = checker.check_document(&document_id, &text, &mut corpus);
                if !report.is_pass() {
                    remarks.push(report);
                }
            }
            Err(e) => {
                warn!("Skipping {}: {}", document_id, e);
                skipped.push(document_id);
            }
        }
    }

    // Duplicate detection runs strictly after every document is in.
    let duplicates = checker.detect_duplicates(&corpus);
    info!(
        "Checked {} documents, {} with remarks, {} flagged for duplicates",
        paths.len() - skipped.len(),
        remarks.len(),
        duplicates.len()
    );

    Ok(BatchReport {
        remarks,
        duplicates,
        skipped,
        checked_at: chrono::Utc::now().timestamp() as u64,
    })
}

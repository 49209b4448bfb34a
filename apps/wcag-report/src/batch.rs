//! Loading saved audit results and processing many of them at once.
//!
//! Batch inputs are discovered by glob patterns relative to a root and
//! processed in parallel. Entries come back sorted by file so output is
//! deterministic; a file that cannot be read or parsed yields an error
//! envelope for that entry instead of aborting the batch.

use crate::classify::Severity;
use crate::error::{ReportError, Result};
use crate::models::audit::RawAuditResult;
use crate::models::{ErrorEnvelope, Report};
use crate::report::{build_report_with, ReportOptions};
use glob::glob;
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Parse an audit result from JSON text. `origin` labels errors.
pub fn parse_audit(data: &str, origin: &Path) -> Result<RawAuditResult> {
    serde_json::from_str(data).map_err(|source| ReportError::Json {
        path: origin.to_path_buf(),
        source,
    })
}

/// Read and parse an audit result file.
pub fn load_audit(path: &Path) -> Result<RawAuditResult> {
    let data = fs::read_to_string(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_audit(&data, path)
}

/// Read and parse an audit result from any reader (stdin for the CLI).
pub fn read_audit<R: Read>(mut reader: R) -> Result<RawAuditResult> {
    let origin = PathBuf::from("<stdin>");
    let mut data = String::new();
    reader
        .read_to_string(&mut data)
        .map_err(|source| ReportError::Io {
            path: origin.clone(),
            source,
        })?;
    parse_audit(&data, &origin)
}

/// Expand glob patterns relative to `root`, deduplicated and sorted.
pub fn expand_patterns(root: &Path, patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut targets: Vec<PathBuf> = Vec::new();
    for pat in patterns {
        let abs_glob = root.join(pat);
        let pattern = abs_glob.to_string_lossy().to_string();
        let entries = glob(&pattern).map_err(|e| ReportError::Pattern(format!("{}: {}", pat, e)))?;
        for entry in entries.flatten() {
            if entry.is_file() {
                targets.push(entry);
            }
        }
    }
    targets.sort();
    targets.dedup();
    Ok(targets)
}

#[derive(Serialize, Clone, Debug)]
/// Outcome for one batch input.
pub struct BatchEntry {
    pub file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<Report>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorEnvelope>,
}

#[derive(Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
/// Totals across a batch.
pub struct BatchSummary {
    pub files: usize,
    pub failed: usize,
    pub total_issues: usize,
}

#[derive(Serialize, Clone, Debug)]
pub struct BatchResult {
    pub results: Vec<BatchEntry>,
    pub summary: BatchSummary,
}

impl BatchResult {
    /// Process exit status: 2 when any input failed to load, 1 when a report
    /// has issues at or above `fail_on`, else 0.
    pub fn exit_code(&self, fail_on: Option<Severity>) -> i32 {
        if self.summary.failed > 0 {
            return 2;
        }
        let gated = fail_on.is_some_and(|threshold| {
            self.results
                .iter()
                .filter_map(|e| e.report.as_ref())
                .any(|r| r.summary.issues_at_or_above(threshold) > 0)
        });
        i32::from(gated)
    }
}

/// Process every file matched by `patterns` under `root`.
pub fn run_batch(root: &Path, patterns: &[String], opts: &ReportOptions) -> Result<BatchResult> {
    let targets = expand_patterns(root, patterns)?;
    debug!(files = targets.len(), "batch inputs resolved");

    let mut results: Vec<BatchEntry> = targets
        .par_iter()
        .map(|path| {
            let file = display_path(root, path);
            match load_audit(path) {
                Ok(raw) => BatchEntry {
                    file,
                    report: Some(build_report_with(raw, None, opts)),
                    error: None,
                },
                Err(e) => {
                    warn!(file = %file, error = %e, "skipping audit input");
                    BatchEntry {
                        file,
                        report: None,
                        error: Some(ErrorEnvelope::processing(e.to_string())),
                    }
                }
            }
        })
        .collect();
    results.sort_by(|a, b| a.file.cmp(&b.file));

    let summary = BatchSummary {
        files: results.len(),
        failed: results.iter().filter(|r| r.error.is_some()).count(),
        total_issues: results
            .iter()
            .filter_map(|r| r.report.as_ref())
            .map(|r| r.summary.total_issues)
            .sum(),
    };
    Ok(BatchResult { results, summary })
}

/// Path relative to `root` when possible, for stable display.
pub fn display_path(root: &Path, path: &Path) -> String {
    pathdiff::diff_paths(path, root)
        .filter(|p| !p.starts_with(".."))
        .unwrap_or_else(|| path.to_path_buf())
        .to_string_lossy()
        .to_string()
}

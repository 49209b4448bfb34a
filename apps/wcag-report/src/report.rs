//! Report assembly: the single synchronous pass from raw audit to `Report`.
//!
//! Stages, in order:
//! - normalize the three raw lists (absent → empty);
//! - classify each violation into one severity and one category bucket;
//! - enrich every affected node with WCAG criteria and remediation;
//! - aggregate node counts into the summary.
//!
//! Counts are node counts, so `total_issues` equals both the sum of the
//! severity counts and the sum of `nodes.len()` across violations, and
//! `total_tests == total_issues + total_passes` always holds.

use crate::classify::{categorize, severity_of, Category, Severity};
use crate::criteria::extract_wcag_criteria;
use crate::models::audit::{normalize, RawAuditResult, RawCheckResult};
use crate::models::{
    CategoryBuckets, CheckSummary, ProcessedNode, ProcessedViolation, Report, SeverityBuckets,
    SeverityCounts, Summary,
};
use crate::remediation::GuidanceTable;
use chrono::{DateTime, SecondsFormat, Utc};
use rayon::prelude::*;
use tracing::{debug, info};

/// Knobs for a report build. `timestamp = None` reads the clock.
#[derive(Clone, Copy)]
pub struct ReportOptions<'a> {
    pub guidance: &'a GuidanceTable,
    pub timestamp: Option<DateTime<Utc>>,
}

impl Default for ReportOptions<'static> {
    fn default() -> Self {
        ReportOptions {
            guidance: GuidanceTable::builtin(),
            timestamp: None,
        }
    }
}

/// Build a report with the built-in guidance table and the current time.
pub fn build_report(raw: RawAuditResult, url: Option<&str>) -> Report {
    build_report_with(raw, url, &ReportOptions::default())
}

/// Build a report. `url` wins over the audit's own `url`; with neither the
/// report URL is empty. Never fails.
pub fn build_report_with(raw: RawAuditResult, url: Option<&str>, opts: &ReportOptions) -> Report {
    let audit = normalize(raw);
    let url = url
        .map(str::to_string)
        .or(audit.url)
        .unwrap_or_default();

    debug!(
        violations = audit.violations.len(),
        passes = audit.passes.len(),
        incomplete = audit.incomplete.len(),
        "classifying audit result"
    );

    // Order-preserving parallel enrichment; buckets keep input order.
    let classified: Vec<(Severity, Category, ProcessedViolation)> = audit
        .violations
        .par_iter()
        .map(|v| {
            (
                severity_of(v),
                categorize(v),
                process_violation(v, opts.guidance),
            )
        })
        .collect();

    let mut violations = SeverityBuckets::default();
    let mut categories = CategoryBuckets::default();
    let mut by_severity = SeverityCounts::default();
    let mut total_issues = 0usize;
    for (sev, cat, pv) in classified {
        let n = pv.nodes.len();
        total_issues += n;
        by_severity.add(sev, n);
        categories.get_mut(cat).push(pv.clone());
        violations.get_mut(sev).push(pv);
    }

    let total_passes: usize = audit.passes.iter().map(|p| p.nodes.len()).sum();
    let summary = Summary {
        total_issues,
        total_passes,
        total_tests: total_issues + total_passes,
        violation_types: audit.violations.len(),
        issues_by_severity: by_severity,
    };

    let timestamp = format_timestamp(opts.timestamp.unwrap_or_else(Utc::now));
    info!(
        url = %url,
        total_issues = summary.total_issues,
        violation_types = summary.violation_types,
        "report built"
    );

    Report {
        url,
        timestamp,
        summary,
        violations,
        categories,
        passes: audit.passes.iter().map(check_summary).collect(),
        incomplete: audit.incomplete.iter().map(check_summary).collect(),
    }
}

/// Enrich every node of one violated rule.
pub fn process_violation(v: &RawCheckResult, guidance: &GuidanceTable) -> ProcessedViolation {
    let criteria = extract_wcag_criteria(&v.tags);
    let nodes = v
        .nodes
        .iter()
        .map(|node| ProcessedNode {
            html: node.html.clone(),
            target: node.target.clone(),
            failure_summary: node.failure_summary.clone(),
            impact: node.impact.clone(),
            wcag_criteria: criteria.clone(),
            remediation: guidance.resolve(&v.id, node),
        })
        .collect();
    ProcessedViolation {
        id: v.id.clone(),
        impact: v.impact.clone(),
        description: v.description.clone(),
        help: v.help.clone(),
        help_url: v.help_url.clone(),
        tags: v.tags.clone(),
        nodes,
    }
}

fn check_summary(r: &RawCheckResult) -> CheckSummary {
    CheckSummary {
        id: r.id.clone(),
        description: r.description.clone(),
        help: r.help.clone(),
        node_count: r.nodes.len(),
    }
}

/// ISO-8601 UTC with millisecond precision, e.g. `2024-05-01T12:00:00.000Z`.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

//! Output rendering for reports, batches, and the guidance table.
//!
//! Supports `human` (default) and `json` outputs. The JSON form is the
//! report itself, serialized with camelCase keys.

use crate::batch::BatchResult;
use crate::classify::{Category, Severity};
use crate::models::{ErrorEnvelope, ProcessedViolation, Report};
use crate::remediation::GuidanceTable;
use crate::utils::use_colors;
use owo_colors::OwoColorize;
use serde::Serialize;
use serde_json::json;
use serde_json::Value as JsonVal;

fn to_json_string<T: Serialize>(value: &T, pretty: bool) -> String {
    let out = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    out.unwrap_or_else(|e| json!({"error": "serialization", "message": e.to_string()}).to_string())
}

fn severity_badge(sev: Severity, color: bool) -> String {
    let label = format!("⟦{}⟧", sev);
    if !color {
        return label;
    }
    match sev {
        Severity::Critical => label.magenta().bold().to_string(),
        Severity::Serious => label.red().bold().to_string(),
        Severity::Moderate => label.yellow().bold().to_string(),
        Severity::Minor => label.blue().bold().to_string(),
    }
}

fn violation_severity(v: &ProcessedViolation) -> Severity {
    v.impact
        .as_deref()
        .and_then(Severity::parse)
        .unwrap_or(Severity::Minor)
}

/// Render a report for humans.
pub fn render_report_human(report: &Report, color: bool) -> String {
    let mut out = String::new();
    let title = format!("Accessibility report for {}", report.url);
    if color {
        out.push_str(&title.bold().to_string());
    } else {
        out.push_str(&title);
    }
    out.push('\n');
    out.push_str(&format!("scanned at {}\n", report.timestamp));

    for cat in Category::ALL {
        let items = report.categories.get(cat);
        if items.is_empty() {
            continue;
        }
        let head = format!("\n▌{} ({})", cat.title(), items.len());
        if color {
            out.push_str(&head.cyan().bold().to_string());
        } else {
            out.push_str(&head);
        }
        out.push('\n');
        for v in items {
            let sev = violation_severity(v);
            let criteria = v
                .nodes
                .first()
                .map(|n| n.wcag_criteria.join(", "))
                .unwrap_or_default();
            out.push_str(&format!(
                "  {} {} ❲{} node(s)❳ — {}\n",
                severity_badge(sev, color),
                v.id,
                v.nodes.len(),
                v.help
            ));
            if !criteria.is_empty() {
                out.push_str(&format!("      criteria: {}\n", criteria));
            }
            if !v.help_url.is_empty() {
                out.push_str(&format!("      more: {}\n", v.help_url));
            }
            for n in &v.nodes {
                let sel = if color {
                    n.remediation.selector.bold().to_string()
                } else {
                    n.remediation.selector.clone()
                };
                out.push_str(&format!("      ◆ {} — {}\n", sel, n.remediation.issue));
                for (i, step) in n.remediation.steps.iter().enumerate() {
                    out.push_str(&format!("          {}. {}\n", i + 1, step));
                }
            }
        }
    }

    let s = &report.summary;
    let summary = format!(
        "— Summary — issues={} (critical={} serious={} moderate={} minor={}) types={} passes={} tests={} incomplete={}",
        s.total_issues,
        s.issues_by_severity.critical,
        s.issues_by_severity.serious,
        s.issues_by_severity.moderate,
        s.issues_by_severity.minor,
        s.violation_types,
        s.total_passes,
        s.total_tests,
        report.incomplete.len()
    );
    out.push('\n');
    if color {
        out.push_str(&summary.bold().to_string());
    } else {
        out.push_str(&summary);
    }
    out
}

/// Print a report in the requested format.
pub fn print_report(report: &Report, output: &str, pretty: bool) {
    match output {
        "json" => println!("{}", to_json_string(report, pretty)),
        _ => println!("{}", render_report_human(report, use_colors(output))),
    }
}

/// Print batch results. JSON keeps per-file reports; human prints one line
/// per file plus the batch summary.
pub fn print_batch(res: &BatchResult, output: &str, pretty: bool) {
    match output {
        "json" => println!("{}", to_json_string(res, pretty)),
        _ => {
            let color = use_colors(output);
            for e in &res.results {
                match (&e.report, &e.error) {
                    (Some(r), _) => {
                        let icon = if r.summary.total_issues > 0 {
                            if color {
                                "✖".red().to_string()
                            } else {
                                "✖".to_string()
                            }
                        } else if color {
                            "✔".green().to_string()
                        } else {
                            "✔".to_string()
                        };
                        println!(
                            "{} {} {} issues={} types={}",
                            icon, e.file, r.url, r.summary.total_issues, r.summary.violation_types
                        );
                    }
                    (None, Some(err)) => {
                        let icon = if color {
                            "▲".yellow().to_string()
                        } else {
                            "▲".to_string()
                        };
                        println!("{} {} — {}", icon, e.file, err.message);
                    }
                    (None, None) => {}
                }
            }
            let summary = format!(
                "— Summary — files={} failed={} issues={}",
                res.summary.files, res.summary.failed, res.summary.total_issues
            );
            if color {
                println!("{}", summary.bold());
            } else {
                println!("{}", summary);
            }
        }
    }
}

/// Print the effective guidance table.
pub fn print_rules(table: &GuidanceTable, output: &str, pretty: bool) {
    match output {
        "json" => println!("{}", to_json_string(&compose_rules_json(table), pretty)),
        _ => {
            let color = use_colors(output);
            for (id, g) in table.sorted() {
                if color {
                    println!("{} — {}", id.bold(), g.issue);
                } else {
                    println!("{} — {}", id, g.issue);
                }
                for (i, step) in g.steps.iter().enumerate() {
                    println!("    {}. {}", i + 1, step);
                }
            }
        }
    }
}

/// Print an error envelope (json) or a prefixed message (human).
pub fn print_error(envelope: &ErrorEnvelope, output: &str) {
    match output {
        "json" => println!("{}", to_json_string(envelope, true)),
        _ => eprintln!(
            "{} {}: {}",
            crate::utils::error_prefix(),
            envelope.error,
            envelope.message
        ),
    }
}

/// Compose the guidance table as JSON (pure) for testing/snapshot purposes.
pub fn compose_rules_json(table: &GuidanceTable) -> JsonVal {
    let rules: Vec<_> = table
        .sorted()
        .into_iter()
        .map(|(id, g)| json!({"id": id, "issue": g.issue, "steps": g.steps}))
        .collect();
    let total = rules.len();
    json!({"rules": rules, "total": total})
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::audit::RawAuditResult;
    use crate::report::{build_report_with, ReportOptions};
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn sample() -> Report {
        let raw: RawAuditResult = serde_json::from_value(json!({
            "violations": [{
                "id": "link-name",
                "impact": "serious",
                "help": "Links must have discernible text",
                "helpUrl": "https://dequeuniversity.com/rules/axe/4.8/link-name",
                "tags": ["wcag2a", "wcag244"],
                "nodes": [{"html": "<a href=\"/\"></a>", "target": ["nav", "a"]}]
            }],
            "passes": [{"id": "html-has-lang", "nodes": [{}]}]
        }))
        .unwrap();
        let opts = ReportOptions {
            timestamp: Some(Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap()),
            ..ReportOptions::default()
        };
        build_report_with(raw, Some("https://site.test/"), &opts)
    }

    #[test]
    fn test_human_render_without_color() {
        let out = render_report_human(&sample(), false);
        assert!(out.starts_with("Accessibility report for https://site.test/"));
        assert!(out.contains("▌Other (1)"));
        assert!(out.contains("⟦serious⟧ link-name ❲1 node(s)❳ — Links must have discernible text"));
        assert!(out.contains("criteria: wcag2a, WCAG 2.4.4"));
        assert!(out.contains("◆ nav, a — Links must have discernible text"));
        assert!(out.contains("1. Add descriptive link text that indicates destination"));
        assert!(out.contains("issues=1 (critical=0 serious=1 moderate=0 minor=0) types=1 passes=1 tests=2"));
        assert!(!out.contains("Keyboard"));
    }

    #[test]
    fn test_compose_rules_json_shape() {
        let v = compose_rules_json(GuidanceTable::builtin());
        assert_eq!(v["total"], 10);
        assert_eq!(v["rules"][0]["id"], "aria-required-attr");
        assert_eq!(v["rules"][0]["steps"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_json_string_compact_and_pretty() {
        let r = sample();
        let compact = to_json_string(&r, false);
        assert!(!compact.contains('\n'));
        let pretty = to_json_string(&r, true);
        assert!(pretty.contains("\n  \"url\": \"https://site.test/\""));
    }
}

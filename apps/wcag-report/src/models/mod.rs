//! Shared data models for raw audit input, guidance, and report output.

pub mod audit;
pub mod guidance;

use crate::classify::{Category, Severity};
use audit::TargetSelector;
use serde::Serialize;

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
/// Guidance attached to a single failing node.
pub struct Remediation {
    pub issue: String,
    pub steps: Vec<String>,
    pub element: String,
    pub selector: String,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
/// A failing node enriched with criteria and remediation.
pub struct ProcessedNode {
    pub html: String,
    pub target: Vec<TargetSelector>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
    pub wcag_criteria: Vec<String>,
    pub remediation: Remediation,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
/// A violated rule with every affected node enriched.
pub struct ProcessedViolation {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
    pub description: String,
    pub help: String,
    pub help_url: String,
    pub tags: Vec<String>,
    pub nodes: Vec<ProcessedNode>,
}

#[derive(Serialize, Clone, Debug, Default, PartialEq)]
/// Violations partitioned by severity.
pub struct SeverityBuckets {
    pub critical: Vec<ProcessedViolation>,
    pub serious: Vec<ProcessedViolation>,
    pub moderate: Vec<ProcessedViolation>,
    pub minor: Vec<ProcessedViolation>,
}

impl SeverityBuckets {
    pub fn get(&self, sev: Severity) -> &[ProcessedViolation] {
        match sev {
            Severity::Critical => &self.critical,
            Severity::Serious => &self.serious,
            Severity::Moderate => &self.moderate,
            Severity::Minor => &self.minor,
        }
    }

    pub fn get_mut(&mut self, sev: Severity) -> &mut Vec<ProcessedViolation> {
        match sev {
            Severity::Critical => &mut self.critical,
            Severity::Serious => &mut self.serious,
            Severity::Moderate => &mut self.moderate,
            Severity::Minor => &mut self.minor,
        }
    }
}

#[derive(Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
/// Violations partitioned by topic.
pub struct CategoryBuckets {
    pub color_contrast: Vec<ProcessedViolation>,
    pub images: Vec<ProcessedViolation>,
    pub keyboard: Vec<ProcessedViolation>,
    #[serde(rename = "semanticHTML")]
    pub semantic_html: Vec<ProcessedViolation>,
    pub other: Vec<ProcessedViolation>,
}

impl CategoryBuckets {
    pub fn get(&self, cat: Category) -> &[ProcessedViolation] {
        match cat {
            Category::ColorContrast => &self.color_contrast,
            Category::Images => &self.images,
            Category::Keyboard => &self.keyboard,
            Category::SemanticHtml => &self.semantic_html,
            Category::Other => &self.other,
        }
    }

    pub fn get_mut(&mut self, cat: Category) -> &mut Vec<ProcessedViolation> {
        match cat {
            Category::ColorContrast => &mut self.color_contrast,
            Category::Images => &mut self.images,
            Category::Keyboard => &mut self.keyboard,
            Category::SemanticHtml => &mut self.semantic_html,
            Category::Other => &mut self.other,
        }
    }
}

#[derive(Serialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Affected-node counts per severity.
pub struct SeverityCounts {
    pub critical: usize,
    pub serious: usize,
    pub moderate: usize,
    pub minor: usize,
}

impl SeverityCounts {
    pub fn get(&self, sev: Severity) -> usize {
        match sev {
            Severity::Critical => self.critical,
            Severity::Serious => self.serious,
            Severity::Moderate => self.moderate,
            Severity::Minor => self.minor,
        }
    }

    pub fn add(&mut self, sev: Severity, n: usize) {
        match sev {
            Severity::Critical => self.critical += n,
            Severity::Serious => self.serious += n,
            Severity::Moderate => self.moderate += n,
            Severity::Minor => self.minor += n,
        }
    }

    pub fn total(&self) -> usize {
        self.critical + self.serious + self.moderate + self.minor
    }
}

#[derive(Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
/// Aggregated report statistics. All counts are node counts except
/// `violation_types`.
pub struct Summary {
    pub total_issues: usize,
    pub total_passes: usize,
    pub total_tests: usize,
    pub violation_types: usize,
    pub issues_by_severity: SeverityCounts,
}

impl Summary {
    /// Failing nodes whose rule severity is `threshold` or worse.
    pub fn issues_at_or_above(&self, threshold: Severity) -> usize {
        Severity::ALL
            .iter()
            .filter(|s| **s >= threshold)
            .map(|s| self.issues_by_severity.get(*s))
            .sum()
    }
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
/// Lightweight view of a passed or incomplete rule.
pub struct CheckSummary {
    pub id: String,
    pub description: String,
    pub help: String,
    pub node_count: usize,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
/// Final compliance report for one scanned page.
pub struct Report {
    pub url: String,
    pub timestamp: String,
    pub summary: Summary,
    pub violations: SeverityBuckets,
    pub categories: CategoryBuckets,
    pub passes: Vec<CheckSummary>,
    pub incomplete: Vec<CheckSummary>,
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
/// Error shape handed to callers when no report could be produced.
pub struct ErrorEnvelope {
    pub error: String,
    pub message: String,
}

impl ErrorEnvelope {
    pub fn processing(message: impl Into<String>) -> Self {
        ErrorEnvelope {
            error: "Failed to process audit result".into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issues_at_or_above_threshold() {
        let s = Summary {
            total_issues: 10,
            issues_by_severity: SeverityCounts {
                critical: 1,
                serious: 2,
                moderate: 3,
                minor: 4,
            },
            ..Default::default()
        };
        assert_eq!(s.issues_at_or_above(Severity::Critical), 1);
        assert_eq!(s.issues_at_or_above(Severity::Serious), 3);
        assert_eq!(s.issues_at_or_above(Severity::Minor), 10);
    }

    #[test]
    fn test_error_envelope_shape() {
        let v = serde_json::to_value(ErrorEnvelope::processing("timeout")).unwrap();
        assert_eq!(v["error"], "Failed to process audit result");
        assert_eq!(v["message"], "timeout");
    }
}

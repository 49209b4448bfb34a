//! Raw audit schema: the result snapshot produced by an axe-core run.
//!
//! Every list is optional on the wire. `normalize` turns a raw snapshot into
//! three concrete sequences so later stages never deal with absence.

use serde::{Deserialize, Serialize};

#[derive(Deserialize, Default, Clone, Debug)]
/// Top-level audit result as emitted by `axe.run()`.
pub struct RawAuditResult {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub violations: Option<Vec<RawCheckResult>>,
    #[serde(default)]
    pub passes: Option<Vec<RawCheckResult>>,
    #[serde(default)]
    pub incomplete: Option<Vec<RawCheckResult>>,
}

#[derive(Deserialize, Default, Clone, Debug)]
#[serde(rename_all = "camelCase")]
/// One rule evaluated against the page.
pub struct RawCheckResult {
    pub id: String,
    #[serde(default)]
    pub impact: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub help: String,
    #[serde(default)]
    pub help_url: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub nodes: Vec<AffectedNode>,
}

#[derive(Deserialize, Default, Clone, Debug)]
#[serde(rename_all = "camelCase")]
/// A DOM element instance the rule was evaluated against.
pub struct AffectedNode {
    #[serde(default)]
    pub html: String,
    #[serde(default)]
    pub target: Vec<TargetSelector>,
    #[serde(default)]
    pub failure_summary: Option<String>,
    #[serde(default)]
    pub impact: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(untagged)]
/// One step of an element path. axe-core nests selectors for frames and
/// shadow roots.
pub enum TargetSelector {
    Css(String),
    Nested(Vec<String>),
}

impl TargetSelector {
    /// Render the way a nested JS array stringifies (parts joined by `,`).
    pub fn render(&self) -> String {
        match self {
            TargetSelector::Css(s) => s.clone(),
            TargetSelector::Nested(parts) => parts.join(","),
        }
    }
}

/// Audit lists with absence resolved to empty sequences.
#[derive(Default, Clone, Debug)]
pub struct NormalizedAudit {
    pub url: Option<String>,
    pub violations: Vec<RawCheckResult>,
    pub passes: Vec<RawCheckResult>,
    pub incomplete: Vec<RawCheckResult>,
}

/// Substitute an empty sequence for every missing list. Never fails.
pub fn normalize(raw: RawAuditResult) -> NormalizedAudit {
    NormalizedAudit {
        url: raw.url,
        violations: raw.violations.unwrap_or_default(),
        passes: raw.passes.unwrap_or_default(),
        incomplete: raw.incomplete.unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_lists_default_to_empty() {
        let raw: RawAuditResult = serde_json::from_value(json!({
            "violations": [{"id": "region", "nodes": []}]
        }))
        .unwrap();
        let n = normalize(raw);
        assert_eq!(n.violations.len(), 1);
        assert!(n.passes.is_empty());
        assert!(n.incomplete.is_empty());
    }

    #[test]
    fn test_null_lists_and_unknown_fields_tolerated() {
        let raw: RawAuditResult = serde_json::from_value(json!({
            "testEngine": {"name": "axe-core", "version": "4.8.2"},
            "url": "https://example.com/",
            "violations": null,
            "passes": null
        }))
        .unwrap();
        let n = normalize(raw);
        assert_eq!(n.url.as_deref(), Some("https://example.com/"));
        assert!(n.violations.is_empty());
        assert!(n.passes.is_empty());
    }

    #[test]
    fn test_nested_target_renders_like_js_array() {
        let node: AffectedNode = serde_json::from_value(json!({
            "html": "<img>",
            "target": ["iframe#a", ["#host", "img"]]
        }))
        .unwrap();
        let parts: Vec<String> = node.target.iter().map(TargetSelector::render).collect();
        assert_eq!(parts, vec!["iframe#a", "#host,img"]);
        assert!(node.failure_summary.is_none());
    }
}

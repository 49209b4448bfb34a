//! Remediation lookup for failing nodes.
//!
//! A `GuidanceTable` maps rule ids to canned guidance. The built-in table is
//! initialized once per process and never mutated; custom tables are built by
//! layering a guidance file over it. Lookups are exact on rule id, and a miss
//! synthesizes generic guidance from the node's own failure summary.

use crate::error::{ReportError, Result};
use crate::models::audit::{AffectedNode, TargetSelector};
use crate::models::guidance::{Guidance, GuidanceFile};
use crate::models::Remediation;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;

const FALLBACK_ISSUE: &str = "Accessibility issue detected";

const FALLBACK_STEPS: [&str; 3] = [
    "Review the WCAG documentation for this issue",
    "Test the fix with assistive technologies",
    "Consult with accessibility experts if needed",
];

const BUILTIN: &[(&str, &str, &[&str])] = &[
    (
        "color-contrast",
        "Text does not have sufficient color contrast with its background",
        &[
            "Use a color contrast checker tool to verify ratios",
            "Ensure normal text has at least 4.5:1 contrast ratio",
            "Ensure large text (18pt+ or 14pt+ bold) has at least 3:1 contrast ratio",
            "Consider using darker text or lighter backgrounds",
            "Test with various color blindness simulators",
        ],
    ),
    (
        "image-alt",
        "Images must have alternative text for screen readers",
        &[
            "Add descriptive alt text that conveys the image's purpose",
            "For decorative images, use alt=\"\"",
            "Keep alt text concise but meaningful (under 125 characters)",
            "Don't include \"image of\" or \"picture of\" in alt text",
            "For complex images, provide extended descriptions",
        ],
    ),
    (
        "button-name",
        "Buttons must have discernible text",
        &[
            "Add visible text content inside the button",
            "Or use aria-label attribute for icon buttons",
            "Ensure button purpose is clear to all users",
            "Avoid using only icons without text alternatives",
        ],
    ),
    (
        "link-name",
        "Links must have discernible text",
        &[
            "Add descriptive link text that indicates destination",
            "Avoid generic phrases like \"click here\" or \"read more\"",
            "For icon links, add aria-label with descriptive text",
            "Ensure link purpose is clear from its text alone",
        ],
    ),
    (
        "heading-order",
        "Heading levels should increase by one",
        &[
            "Maintain logical heading hierarchy (h1 > h2 > h3)",
            "Don't skip heading levels (e.g., h1 to h3)",
            "Use only one h1 per page",
            "Use headings to structure content, not for styling",
        ],
    ),
    (
        "label",
        "Form elements must have labels",
        &[
            "Add <label> element associated with the input",
            "Use for/id attributes to connect label and input",
            "Or use aria-label or aria-labelledby attributes",
            "Ensure label describes the input's purpose clearly",
        ],
    ),
    (
        "list",
        "List elements must be properly structured",
        &[
            "Ensure <li> elements are only direct children of <ul> or <ol>",
            "Use semantic list markup for related items",
            "Don't use lists solely for layout purposes",
        ],
    ),
    (
        "aria-required-attr",
        "ARIA roles must have required attributes",
        &[
            "Add all required ARIA attributes for the role",
            "Consult ARIA specification for role requirements",
            "Test with screen readers to verify functionality",
        ],
    ),
    (
        "landmark-one-main",
        "Document must have one main landmark",
        &[
            "Add a <main> element or role=\"main\" to primary content",
            "Use only one main landmark per page",
            "Ensure main content is wrapped in the landmark",
        ],
    ),
    (
        "region",
        "Page content must be contained by landmarks",
        &[
            "Use semantic HTML5 elements (header, nav, main, footer)",
            "Or use ARIA landmark roles",
            "Ensure all content is within appropriate landmarks",
        ],
    ),
];

#[derive(Clone, Debug, Default)]
/// Immutable rule-id → guidance mapping.
pub struct GuidanceTable {
    entries: HashMap<String, Guidance>,
}

impl GuidanceTable {
    /// The built-in knowledge base, shared process-wide.
    pub fn builtin() -> &'static GuidanceTable {
        static TABLE: OnceLock<GuidanceTable> = OnceLock::new();
        TABLE.get_or_init(|| {
            let entries = BUILTIN
                .iter()
                .map(|(id, issue, steps)| {
                    (
                        id.to_string(),
                        Guidance {
                            issue: issue.to_string(),
                            steps: steps.iter().map(|s| s.to_string()).collect(),
                        },
                    )
                })
                .collect();
            GuidanceTable { entries }
        })
    }

    /// Built-in entries with `file` entries added or replacing them.
    pub fn with_overrides(file: GuidanceFile) -> GuidanceTable {
        let mut entries = Self::builtin().entries.clone();
        entries.extend(file.rules);
        GuidanceTable { entries }
    }

    /// Load a guidance TOML file and layer it over the built-in table.
    pub fn load(path: &Path) -> Result<GuidanceTable> {
        let s = fs::read_to_string(path).map_err(|source| ReportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file: GuidanceFile = toml::from_str(&s).map_err(|e| ReportError::Guidance {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        for (id, g) in &file.rules {
            if g.steps.is_empty() {
                return Err(ReportError::Guidance {
                    path: path.to_path_buf(),
                    message: format!("rule '{}' has no remediation steps", id),
                });
            }
        }
        debug!(path = %path.display(), rules = file.rules.len(), "loaded guidance overrides");
        Ok(Self::with_overrides(file))
    }

    pub fn get(&self, rule_id: &str) -> Option<&Guidance> {
        self.entries.get(rule_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by rule id.
    pub fn sorted(&self) -> Vec<(&str, &Guidance)> {
        let mut v: Vec<(&str, &Guidance)> =
            self.entries.iter().map(|(k, g)| (k.as_str(), g)).collect();
        v.sort_by(|a, b| a.0.cmp(b.0));
        v
    }

    /// Resolve guidance for one failing node of `rule_id`.
    pub fn resolve(&self, rule_id: &str, node: &AffectedNode) -> Remediation {
        let base = match self.get(rule_id) {
            Some(g) => g.clone(),
            None => fallback_guidance(node),
        };
        Remediation {
            issue: base.issue,
            steps: base.steps,
            element: node.html.clone(),
            selector: selector_of(&node.target),
        }
    }
}

/// Generic guidance built from the node's own failure text.
pub fn fallback_guidance(node: &AffectedNode) -> Guidance {
    let issue = node
        .failure_summary
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or(FALLBACK_ISSUE)
        .to_string();
    Guidance {
        issue,
        steps: FALLBACK_STEPS.iter().map(|s| s.to_string()).collect(),
    }
}

/// Comma-joined element path.
pub fn selector_of(target: &[TargetSelector]) -> String {
    target
        .iter()
        .map(TargetSelector::render)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn node(summary: Option<&str>) -> AffectedNode {
        AffectedNode {
            html: "<button class=\"x\"></button>".into(),
            target: vec![
                TargetSelector::Css("main".into()),
                TargetSelector::Css("button.x".into()),
            ],
            failure_summary: summary.map(String::from),
            impact: None,
        }
    }

    #[test]
    fn test_builtin_has_well_known_rules() {
        let t = GuidanceTable::builtin();
        assert_eq!(t.len(), 10);
        for id in [
            "color-contrast",
            "image-alt",
            "button-name",
            "link-name",
            "heading-order",
            "label",
            "list",
            "aria-required-attr",
            "landmark-one-main",
            "region",
        ] {
            assert!(t.get(id).is_some(), "missing {}", id);
        }
    }

    #[test]
    fn test_hit_merges_node_fields() {
        let r = GuidanceTable::builtin().resolve("button-name", &node(Some("Fix this")));
        assert_eq!(r.issue, "Buttons must have discernible text");
        assert_eq!(r.steps.len(), 4);
        assert_eq!(r.element, "<button class=\"x\"></button>");
        assert_eq!(r.selector, "main, button.x");
    }

    #[test]
    fn test_miss_uses_failure_summary_and_generic_steps() {
        let r = GuidanceTable::builtin().resolve("some-unknown-rule", &node(Some("X is broken")));
        assert_eq!(r.issue, "X is broken");
        assert_eq!(r.steps, FALLBACK_STEPS.to_vec());
        assert_eq!(r.selector, "main, button.x");
    }

    #[test]
    fn test_miss_without_summary_uses_generic_issue() {
        let r = GuidanceTable::builtin().resolve("some-unknown-rule", &node(None));
        assert_eq!(r.issue, "Accessibility issue detected");
        let r = GuidanceTable::builtin().resolve("some-unknown-rule", &node(Some("")));
        assert_eq!(r.issue, "Accessibility issue detected");
    }

    #[test]
    fn test_overrides_add_and_replace() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("guidance.toml");
        fs::write(
            &p,
            r#"
[rules.duplicate-id]
issue = "IDs must be unique"
steps = ["Rename duplicated ids"]

[rules.region]
issue = "Wrap content in landmarks"
steps = ["Add <main>", "Add <nav>"]
"#,
        )
        .unwrap();
        let t = GuidanceTable::load(&p).unwrap();
        assert_eq!(t.len(), 11);
        assert_eq!(t.get("duplicate-id").unwrap().issue, "IDs must be unique");
        assert_eq!(t.get("region").unwrap().steps.len(), 2);
        // built-in table untouched
        assert_eq!(
            GuidanceTable::builtin().get("region").unwrap().issue,
            "Page content must be contained by landmarks"
        );
        let ids: Vec<&str> = t.sorted().into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids.first(), Some(&"aria-required-attr"));
    }

    #[test]
    fn test_override_without_steps_rejected() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("guidance.toml");
        fs::write(&p, "[rules.x]\nissue = \"x\"\nsteps = []\n").unwrap();
        match GuidanceTable::load(&p) {
            Err(ReportError::Guidance { message, .. }) => assert!(message.contains("'x'")),
            other => panic!("unexpected: {:?}", other.map(|t| t.len())),
        }
    }

    #[test]
    fn test_missing_guidance_file_is_io_error() {
        let dir = tempdir().unwrap();
        let err = GuidanceTable::load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ReportError::Io { .. }));
    }
}

//! Violation classification into two independent partitions.
//!
//! - Severity: taken from the rule-level `impact`, defaulting to `minor`.
//! - Category: an ordered first-match decision list over the rule id and its
//!   tags. Order matters: `color-contrast-alt` is a contrast issue, not an
//!   image issue.

use crate::models::audit::RawCheckResult;
use serde::Serialize;
use std::fmt;

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
/// Qualitative failure weight. Ordered from least to most severe.
pub enum Severity {
    Minor,
    Moderate,
    Serious,
    Critical,
}

impl Severity {
    /// Most severe first, the order reports are displayed in.
    pub const ALL: [Severity; 4] = [
        Severity::Critical,
        Severity::Serious,
        Severity::Moderate,
        Severity::Minor,
    ];

    pub fn parse(s: &str) -> Option<Severity> {
        match s {
            "critical" => Some(Severity::Critical),
            "serious" => Some(Severity::Serious),
            "moderate" => Some(Severity::Moderate),
            "minor" => Some(Severity::Minor),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Serious => "serious",
            Severity::Moderate => "moderate",
            Severity::Minor => "minor",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// Topical grouping of a violation.
pub enum Category {
    #[serde(rename = "colorContrast")]
    ColorContrast,
    #[serde(rename = "images")]
    Images,
    #[serde(rename = "keyboard")]
    Keyboard,
    #[serde(rename = "semanticHTML")]
    SemanticHtml,
    #[serde(rename = "other")]
    Other,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::ColorContrast,
        Category::Images,
        Category::Keyboard,
        Category::SemanticHtml,
        Category::Other,
    ];

    /// Display title for human output.
    pub fn title(&self) -> &'static str {
        match self {
            Category::ColorContrast => "Color contrast",
            Category::Images => "Images & text alternatives",
            Category::Keyboard => "Keyboard & focus",
            Category::SemanticHtml => "Semantic HTML",
            Category::Other => "Other",
        }
    }
}

/// Severity bucket for a violation. Unknown or absent impact is `minor`.
pub fn severity_of(violation: &RawCheckResult) -> Severity {
    violation
        .impact
        .as_deref()
        .and_then(Severity::parse)
        .unwrap_or(Severity::Minor)
}

/// Category bucket for a violation; first matching rule wins.
pub fn categorize(violation: &RawCheckResult) -> Category {
    let id = violation.id.to_lowercase();
    let tags = violation.tags.join(" ").to_lowercase();

    if contains_any(&id, &["color-contrast", "contrast"]) {
        return Category::ColorContrast;
    }
    if contains_any(&id, &["image", "alt"]) || tags.contains("cat.text-alternatives") {
        return Category::Images;
    }
    if contains_any(&id, &["keyboard", "focus", "tabindex"]) {
        return Category::Keyboard;
    }
    if contains_any(&id, &["heading", "landmark", "aria", "label"]) {
        return Category::SemanticHtml;
    }
    Category::Other
}

fn contains_any(hay: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| hay.contains(n))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(id: &str, tags: &[&str], impact: Option<&str>) -> RawCheckResult {
        RawCheckResult {
            id: id.into(),
            impact: impact.map(String::from),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_contrast_wins_over_alt_substring() {
        assert_eq!(
            categorize(&rule("color-contrast-alt", &[], None)),
            Category::ColorContrast
        );
    }

    #[test]
    fn test_images_wins_over_aria() {
        assert_eq!(categorize(&rule("aria-image-x", &[], None)), Category::Images);
    }

    #[test]
    fn test_text_alternatives_tag_matches_images() {
        let v = rule("svg-img", &["cat.Text-Alternatives", "wcag2a"], None);
        assert_eq!(categorize(&v), Category::Images);
    }

    #[test]
    fn test_category_decision_list() {
        assert_eq!(categorize(&rule("scrollable-region-focusable", &[], None)), Category::Keyboard);
        assert_eq!(categorize(&rule("tabindex", &[], None)), Category::Keyboard);
        assert_eq!(categorize(&rule("heading-order", &[], None)), Category::SemanticHtml);
        assert_eq!(categorize(&rule("landmark-one-main", &[], None)), Category::SemanticHtml);
        assert_eq!(categorize(&rule("label", &[], None)), Category::SemanticHtml);
        assert_eq!(categorize(&rule("Link-Name", &[], None)), Category::Other);
        assert_eq!(categorize(&rule("list", &["cat.structure"], None)), Category::Other);
    }

    #[test]
    fn test_severity_defaults_to_minor() {
        assert_eq!(severity_of(&rule("x", &[], None)), Severity::Minor);
        assert_eq!(severity_of(&rule("x", &[], Some("catastrophic"))), Severity::Minor);
        assert_eq!(severity_of(&rule("x", &[], Some("serious"))), Severity::Serious);
        assert_eq!(severity_of(&rule("x", &[], Some("critical"))), Severity::Critical);
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Critical > Severity::Serious);
        assert!(Severity::Moderate > Severity::Minor);
        assert_eq!(Severity::ALL[0], Severity::Critical);
    }
}

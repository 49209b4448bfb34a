//! WCAG success-criterion extraction from axe-core tags.

use regex::Regex;
use std::sync::OnceLock;

fn criterion_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"wcag([0-9])([0-9]+)").expect("static regex"))
}

/// Map `wcag`-prefixed tags to their display form.
///
/// `wcag143` becomes `WCAG 1.4.3`: the first digit is kept as the principle
/// and every following digit becomes its own dotted component. Tags that start
/// with `wcag` but carry no criterion digits (`wcag2aa`) pass through as-is;
/// all other tags are dropped. Input order and duplicates are preserved.
pub fn extract_wcag_criteria(tags: &[String]) -> Vec<String> {
    tags.iter()
        .filter(|tag| tag.starts_with("wcag"))
        .map(|tag| match criterion_re().captures(tag) {
            Some(caps) => {
                let mut out = format!("WCAG {}", &caps[1]);
                for d in caps[2].chars() {
                    out.push('.');
                    out.push(d);
                }
                out
            }
            None => tag.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_criterion_rewritten_to_dotted_form() {
        assert_eq!(extract_wcag_criteria(&tags(&["wcag143"])), vec!["WCAG 1.4.3"]);
        assert_eq!(extract_wcag_criteria(&tags(&["wcag1410"])), vec!["WCAG 1.4.1.0"]);
    }

    #[test]
    fn test_level_tags_pass_through_and_others_dropped() {
        let out = extract_wcag_criteria(&tags(&[
            "cat.color",
            "wcag2aa",
            "wcag143",
            "best-practice",
            "wcag2a",
            "ACT",
            "WCAG111",
        ]));
        assert_eq!(out, vec!["wcag2aa", "WCAG 1.4.3", "wcag2a"]);
    }

    #[test]
    fn test_version_tag_matches_leading_digits() {
        assert_eq!(extract_wcag_criteria(&tags(&["wcag21aa"])), vec!["WCAG 2.1"]);
    }

    #[test]
    fn test_non_ascii_digits_pass_through() {
        let out = extract_wcag_criteria(&tags(&["wcag١٤٣", "wcag１４３", "wcag1٤"]));
        assert_eq!(out, vec!["wcag١٤٣", "wcag１４３", "wcag1٤"]);
    }

    #[test]
    fn test_duplicates_preserved() {
        let out = extract_wcag_criteria(&tags(&["wcag111", "wcag111"]));
        assert_eq!(out, vec!["WCAG 1.1.1", "WCAG 1.1.1"]);
    }

    #[test]
    fn test_empty_tags() {
        assert!(extract_wcag_criteria(&[]).is_empty());
    }
}

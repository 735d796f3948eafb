//! Regular-expression line convention for custom updaters

use super::LineRule;
use regex::Regex;

/// Placeholder replaced by the new version when rendering
pub const VERSION_PLACEHOLDER: &str = "{version}";

/// A line matched by a single-group pattern and rendered from a template
///
/// The pattern is anchored to the whole line; its only capture group holds
/// the version.
#[derive(Debug, Clone)]
pub struct PatternRule {
    regex: Regex,
    template: String,
}

impl PatternRule {
    /// Compile a pattern and pair it with a render template
    pub fn new(pattern: &str, template: impl Into<String>) -> Result<Self, String> {
        let regex = Regex::new(&format!("^(?:{})$", pattern))
            .map_err(|e| format!("invalid pattern: {}", e))?;

        // captures_len counts the implicit whole-match group
        let groups = regex.captures_len() - 1;
        if groups != 1 {
            return Err(format!(
                "pattern must have exactly one capture group, found {}",
                groups
            ));
        }

        let template = template.into();
        if !template.contains(VERSION_PLACEHOLDER) {
            return Err(format!(
                "template must contain the {} placeholder",
                VERSION_PLACEHOLDER
            ));
        }
        // a rendered line must stay one line
        if template.contains(['\n', '\r']) {
            return Err("template must not contain line breaks".to_string());
        }

        Ok(Self { regex, template })
    }
}

impl LineRule for PatternRule {
    fn locate<'a>(&self, line: &'a str) -> Option<&'a str> {
        let captures = self.regex.captures(line)?;
        captures
            .get(1)
            .map(|m| m.as_str())
            .filter(|version| !version.is_empty())
    }

    fn render(&self, version: &str) -> String {
        self.template.replace(VERSION_PLACEHOLDER, version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rust_const() -> PatternRule {
        PatternRule::new(
            r#"pub const VERSION: &str = "([^"]+)";"#,
            r#"pub const VERSION: &str = "{version}";"#,
        )
        .unwrap()
    }

    #[test]
    fn test_locate() {
        let rule = rust_const();
        assert_eq!(
            rule.locate(r#"pub const VERSION: &str = "0.3.1";"#),
            Some("0.3.1")
        );
        assert_eq!(rule.locate(r#"const VERSION: &str = "0.3.1";"#), None);
    }

    #[test]
    fn test_pattern_is_anchored_to_whole_line() {
        let rule = PatternRule::new(r"v(\d+)", "v{version}").unwrap();
        assert_eq!(rule.locate("v12"), Some("12"));
        assert_eq!(rule.locate("xv12"), None);
        assert_eq!(rule.locate("v12x"), None);
    }

    #[test]
    fn test_alternation_stays_anchored() {
        let rule = PatternRule::new(r"a=(\d+)|b", "a={version}").unwrap();
        assert_eq!(rule.locate("a=1"), Some("1"));
        assert_eq!(rule.locate("xb"), None);
        // matches without the group participating
        assert_eq!(rule.locate("b"), None);
    }

    #[test]
    fn test_render() {
        assert_eq!(
            rust_const().render("1.0.0"),
            r#"pub const VERSION: &str = "1.0.0";"#
        );
    }

    #[test]
    fn test_rejects_invalid_pattern() {
        let err = PatternRule::new("version = (", "{version}").unwrap_err();
        assert!(err.contains("invalid pattern"));
    }

    #[test]
    fn test_rejects_wrong_group_count() {
        let err = PatternRule::new("version", "{version}").unwrap_err();
        assert!(err.contains("found 0"));

        let err = PatternRule::new(r"(\w+) = (\S+)", "{version}").unwrap_err();
        assert!(err.contains("found 2"));
    }

    #[test]
    fn test_non_capturing_groups_are_allowed() {
        let rule = PatternRule::new(r#"(?:VERSION|version) = "([^"]+)""#, "version = \"{version}\"")
            .unwrap();
        assert_eq!(rule.locate("VERSION = \"5\""), Some("5"));
    }

    #[test]
    fn test_rejects_template_without_placeholder() {
        let err = PatternRule::new(r"v(\d+)", "v1").unwrap_err();
        assert!(err.contains("{version}"));
    }

    #[test]
    fn test_rejects_multiline_template() {
        let err = PatternRule::new(r"v(\d+)", "v{version}\n# bumped").unwrap_err();
        assert!(err.contains("line breaks"));

        let err = PatternRule::new(r"v(\d+)", "v{version}\r").unwrap_err();
        assert!(err.contains("line breaks"));
    }
}

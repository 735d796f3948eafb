//! Literal prefix/suffix line convention

use super::LineRule;

/// A line made of a literal prefix, the version, and a literal suffix
///
/// The version must be non-empty and, when a suffix is given, must not contain
/// the suffix itself. For a quoted convention that means no closing quote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delimited {
    prefix: String,
    suffix: String,
}

impl Delimited {
    /// Create a rule from its literal prefix and suffix
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }
}

impl LineRule for Delimited {
    fn locate<'a>(&self, line: &'a str) -> Option<&'a str> {
        let version = line
            .strip_prefix(self.prefix.as_str())?
            .strip_suffix(self.suffix.as_str())?;

        if version.is_empty() {
            return None;
        }
        if !self.suffix.is_empty() && version.contains(self.suffix.as_str()) {
            return None;
        }
        Some(version)
    }

    fn render(&self, version: &str) -> String {
        format!("{}{}{}", self.prefix, version, self.suffix)
    }
}

//! Version updaters for textual version conventions
//!
//! This module provides:
//! - The LineRule trait: locate a version on one line, render a line for a version
//! - Updater: a named, immutable convention that reads and rewrites file content
//! - Built-in conventions for Poetry (`version = "X"`) and Python (`__version__ = "X"`)
//!
//! Rules are matched against individual lines, so a marker is anchored at the
//! start of its own line and may appear anywhere in the file. The first
//! matching line in document order is the one that is read or rewritten.

mod delimited;
mod pattern;

pub use delimited::Delimited;
pub use pattern::PatternRule;

use crate::error::UpdaterError;
use std::fmt;
use std::sync::Arc;

/// Name of the Poetry-style convention
pub const POETRY: &str = "poetry";

/// Name of the Python module constant convention
pub const PYTHON: &str = "python";

/// Trait for a single-line version convention
pub trait LineRule: fmt::Debug + Send + Sync {
    /// Returns the captured version if the whole line matches the convention
    fn locate<'a>(&self, line: &'a str) -> Option<&'a str>;

    /// Renders a complete line (without terminator) embedding `version`
    fn render(&self, version: &str) -> String;
}

/// A named version convention bound to a line rule
#[derive(Debug, Clone)]
pub struct Updater {
    name: String,
    rule: Arc<dyn LineRule>,
}

/// Location of the first matching line within some content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Located<'a> {
    /// Byte offset of the line body
    start: usize,
    /// Byte offset just past the line body (before `\r\n` or `\n`)
    end: usize,
    /// Captured version text
    version: &'a str,
}

impl Updater {
    /// Create an updater from a name and a rule
    pub fn new(name: impl Into<String>, rule: impl LineRule + 'static) -> Self {
        Self {
            name: name.into(),
            rule: Arc::new(rule),
        }
    }

    /// Poetry convention: a line reading `version = "X"`
    pub fn poetry() -> Self {
        Self::new(POETRY, Delimited::new("version = \"", "\""))
    }

    /// Python convention: a line reading `__version__ = "X"`
    pub fn python() -> Self {
        Self::new(PYTHON, Delimited::new("__version__ = \"", "\""))
    }

    /// Look up a built-in convention by name
    pub fn builtin(name: &str) -> Option<Self> {
        match name {
            POETRY => Some(Self::poetry()),
            PYTHON => Some(Self::python()),
            _ => None,
        }
    }

    /// Names of all built-in conventions
    pub fn builtin_names() -> &'static [&'static str] {
        &[POETRY, PYTHON]
    }

    /// Copy of this updater under a different name
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rule: Arc::clone(&self.rule),
        }
    }

    /// Copy of this updater with its rule replaced
    pub fn with_rule(&self, rule: impl LineRule + 'static) -> Self {
        Self {
            name: self.name.clone(),
            rule: Arc::new(rule),
        }
    }

    /// Returns the convention name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Read the version from the first matching line
    pub fn read_version(&self, content: &str) -> Result<String, UpdaterError> {
        self.locate(content)
            .map(|located| located.version.to_string())
            .ok_or_else(|| UpdaterError::version_not_found(&self.name))
    }

    /// Rewrite the first matching line with `version`
    ///
    /// Content without a matching line is returned unchanged.
    pub fn write_version(&self, content: &str, version: &str) -> String {
        self.try_write_version(content, version)
            .unwrap_or_else(|| content.to_string())
    }

    /// Rewrite the first matching line, or `None` when no line matches
    pub fn try_write_version(&self, content: &str, version: &str) -> Option<String> {
        let located = self.locate(content)?;
        let rendered = self.rule.render(version);

        let mut updated =
            String::with_capacity(content.len() - (located.end - located.start) + rendered.len());
        updated.push_str(&content[..located.start]);
        updated.push_str(&rendered);
        updated.push_str(&content[located.end..]);
        Some(updated)
    }

    fn locate<'a>(&self, content: &'a str) -> Option<Located<'a>> {
        let mut offset = 0;
        for raw in content.split_inclusive('\n') {
            let line = raw.strip_suffix('\n').unwrap_or(raw);
            let line = line.strip_suffix('\r').unwrap_or(line);

            if let Some(version) = self.rule.locate(line) {
                return Some(Located {
                    start: offset,
                    end: offset + line.len(),
                    version,
                });
            }
            offset += raw.len();
        }
        None
    }
}

impl fmt::Display for Updater {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

//! Disambiguation of equal-size headings.
//!
//! When a new heading has the same size as an open one, it is normally a
//! sibling. A [`SubHeaderRule`] can decide otherwise, e.g. "2.1 Costs" under
//! "2. Costs" set in the same font.

use crate::error::{Error, Result};
use crate::model::Section;
use regex::Regex;

/// Decides whether an equal-size heading nests under an open one.
pub trait SubHeaderRule {
    /// Return `true` when `candidate` belongs under `parent`.
    fn is_sub_header(&self, parent: &Section, candidate: &Section) -> bool;
}

impl<F> SubHeaderRule for F
where
    F: Fn(&Section, &Section) -> bool,
{
    fn is_sub_header(&self, parent: &Section, candidate: &Section) -> bool {
        self(parent, candidate)
    }
}

/// Equal-size headings are always siblings.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSubHeaders;

impl SubHeaderRule for NoSubHeaders {
    fn is_sub_header(&self, _parent: &Section, _candidate: &Section) -> bool {
        false
    }
}

const NUMBERING_PATTERN: &str =
    r"^\s*(?P<num>\d+(?:\.\d+)*|(?:[A-Z]|[IVXLC]+)(?:\.\d+)+|(?:[A-Z]|[IVXLC]+)[.)])";

/// Nests headings by their enumeration prefix.
///
/// `2.1` nests under `2`, `A.1` under `A.`, `3.2.1` under `3.2`. Headings
/// without a prefix are never nested.
#[derive(Debug, Clone)]
pub struct NumberingRule {
    pattern: Regex,
}

impl NumberingRule {
    /// Rule with the built-in enumeration pattern.
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(NUMBERING_PATTERN).unwrap(),
        }
    }

    /// Rule with a custom pattern.
    ///
    /// The pattern must capture the enumeration in a group named `num`,
    /// with components separated by `.`.
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        let pattern = Regex::new(pattern)
            .map_err(|e| Error::InvalidPolicy(format!("numbering pattern: {}", e)))?;
        if !pattern.capture_names().any(|name| name == Some("num")) {
            return Err(Error::InvalidPolicy(
                "numbering pattern needs a group named `num`".to_string(),
            ));
        }
        Ok(Self { pattern })
    }

    /// Enumeration components of a heading, e.g. `["2", "1"]` for "2.1 Costs".
    pub fn components<'t>(&self, text: &'t str) -> Option<Vec<&'t str>> {
        let num = self.pattern.captures(text)?.name("num")?.as_str();
        let num = num.trim_end_matches(&['.', ')'][..]);
        if num.is_empty() {
            return None;
        }
        Some(num.split('.').collect())
    }
}

impl Default for NumberingRule {
    fn default() -> Self {
        Self::new()
    }
}

impl SubHeaderRule for NumberingRule {
    fn is_sub_header(&self, parent: &Section, candidate: &Section) -> bool {
        let (Some(outer), Some(inner)) = (
            self.components(&parent.heading_text),
            self.components(&candidate.heading_text),
        ) else {
            return false;
        };
        inner.len() == outer.len() + 1 && inner.starts_with(&outer)
    }
}

/// Nests when any of several rules says so.
#[derive(Default)]
pub struct AnyRule {
    rules: Vec<Box<dyn SubHeaderRule>>,
}

impl AnyRule {
    /// Create an empty combination (never nests).
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule.
    pub fn with(mut self, rule: impl SubHeaderRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }
}

impl SubHeaderRule for AnyRule {
    fn is_sub_header(&self, parent: &Section, candidate: &Section) -> bool {
        self.rules.iter().any(|r| r.is_sub_header(parent, candidate))
    }
}

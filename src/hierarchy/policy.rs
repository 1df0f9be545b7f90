//! Heading policies: declarative AND-of-ORs rule pipelines.
//!
//! A [`Policy`] is an ordered list of [`Term`]s. A fragment is a heading when
//! every term holds. A term is either one mandatory [`Predicate`] or an
//! OR-group of predicates where any member suffices.
//!
//! Policies are plain data. Supporting a new document family means
//! assembling a new predicate list with [`PolicyBuilder`] (or loading one
//! from JSON), not adding code paths.
//!
//! # Example
//!
//! ```
//! use pdf_hierarchy::hierarchy::{Policy, Predicate};
//!
//! let policy = Policy::builder("slides")
//!     .require("length", Predicate::MinLength { min: 3 })
//!     .any_of("emphasis", Predicate::Bold)
//!     .any_of("emphasis", Predicate::LargerThanCommon)
//!     .build()
//!     .unwrap();
//! assert_eq!(policy.terms().len(), 2);
//! ```

use super::rules;
use crate::error::{Error, Result};
use crate::model::{DocumentStyleProfile, Fragment};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Decides whether a fragment is a heading.
///
/// Implementations must be pure: the answer may depend only on the fragment
/// and the profile, never on fragments seen earlier.
pub trait HeadingClassifier {
    /// Classify one fragment.
    fn is_heading(&self, fragment: &Fragment, profile: &DocumentStyleProfile) -> bool;

    /// Name recorded in document metadata.
    fn name(&self) -> &str {
        "custom"
    }
}

impl<F> HeadingClassifier for F
where
    F: Fn(&Fragment, &DocumentStyleProfile) -> bool,
{
    fn is_heading(&self, fragment: &Fragment, profile: &DocumentStyleProfile) -> bool {
        self(fragment, profile)
    }
}

/// A built-in heading condition with its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Predicate {
    /// At least two letters
    MinAlpha,
    /// At least `min` characters
    MinLength {
        /// Minimum character count
        min: usize,
    },
    /// No period among the last two characters
    NoDotAtEnd,
    /// No digit after the first letter
    CheckDigit,
    /// Printable ASCII only
    SpecialChar,
    /// Capitalised text made of letters, `:` and `?`
    StringValidity,
    /// Larger than the common size
    LargerThanCommon,
    /// Color differs from the common color
    ColorDiffersFromCommon,
    /// Font differs from the common font
    FontDiffersFromCommon,
    /// Bold font
    Bold,
    /// Italic font
    Italic,
    /// Title case, or emphasized
    IsTitle,
    /// Centered within `threshold` percent
    Centered {
        /// Maximum deviation of the midpoint, in percent
        threshold: f32,
    },
    /// Left whitespace above `min` percent
    LeftSpace {
        /// Minimum whitespace, in percent
        min: f32,
    },
    /// Right whitespace above `min` percent
    RightSpace {
        /// Minimum whitespace, in percent
        min: f32,
    },
    /// Width differs from the container by more than `min` percent
    WhitespaceRatio {
        /// Minimum width difference, in percent
        min: f32,
    },
}

impl Predicate {
    /// Evaluate the predicate.
    pub fn evaluate(&self, fragment: &Fragment, profile: &DocumentStyleProfile) -> bool {
        match *self {
            Predicate::MinAlpha => rules::min_alpha(fragment),
            Predicate::MinLength { min } => rules::min_length(fragment, min),
            Predicate::NoDotAtEnd => rules::no_dot_at_end(fragment),
            Predicate::CheckDigit => rules::check_digit(fragment),
            Predicate::SpecialChar => rules::check_special_char(fragment),
            Predicate::StringValidity => rules::string_validity(fragment),
            Predicate::LargerThanCommon => rules::larger_than_common(fragment, profile),
            Predicate::ColorDiffersFromCommon => rules::color_differs_from_common(fragment, profile),
            Predicate::FontDiffersFromCommon => rules::font_differs_from_common(fragment, profile),
            Predicate::Bold => rules::check_bold(fragment),
            Predicate::Italic => rules::check_italic(fragment),
            Predicate::IsTitle => rules::is_title(fragment),
            Predicate::Centered { threshold } => rules::centered(fragment, threshold),
            Predicate::LeftSpace { min } => rules::left_space(fragment, min),
            Predicate::RightSpace { min } => rules::right_space(fragment, min),
            Predicate::WhitespaceRatio { min } => rules::whitespace_ratio(fragment, min),
        }
    }

    /// Short name used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Predicate::MinAlpha => "min_alpha",
            Predicate::MinLength { .. } => "min_length",
            Predicate::NoDotAtEnd => "no_dot_at_end",
            Predicate::CheckDigit => "check_digit",
            Predicate::SpecialChar => "special_char",
            Predicate::StringValidity => "string_validity",
            Predicate::LargerThanCommon => "larger_than_common",
            Predicate::ColorDiffersFromCommon => "color_differs_from_common",
            Predicate::FontDiffersFromCommon => "font_differs_from_common",
            Predicate::Bold => "bold",
            Predicate::Italic => "italic",
            Predicate::IsTitle => "is_title",
            Predicate::Centered { .. } => "centered",
            Predicate::LeftSpace { .. } => "left_space",
            Predicate::RightSpace { .. } => "right_space",
            Predicate::WhitespaceRatio { .. } => "whitespace_ratio",
        }
    }

    fn validate(&self) -> Result<()> {
        let value = match *self {
            Predicate::Centered { threshold } => threshold,
            Predicate::LeftSpace { min }
            | Predicate::RightSpace { min }
            | Predicate::WhitespaceRatio { min } => min,
            _ => return Ok(()),
        };
        if !value.is_finite() || value < 0.0 {
            return Err(Error::InvalidPolicy(format!(
                "{} needs a finite, non-negative percentage, got {}",
                self.name(),
                value
            )));
        }
        Ok(())
    }
}

/// One AND-term of a policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Term {
    /// A mandatory predicate
    Require {
        /// Term label
        label: String,
        /// The predicate
        predicate: Predicate,
    },
    /// At least one member must hold
    AnyOf {
        /// Group label
        label: String,
        /// Group members
        members: Vec<Predicate>,
    },
}

impl Term {
    /// Label of the term.
    pub fn label(&self) -> &str {
        match self {
            Term::Require { label, .. } | Term::AnyOf { label, .. } => label,
        }
    }

    /// Evaluate the term.
    pub fn evaluate(&self, fragment: &Fragment, profile: &DocumentStyleProfile) -> bool {
        match self {
            Term::Require { predicate, .. } => predicate.evaluate(fragment, profile),
            Term::AnyOf { members, .. } => members.iter().any(|p| p.evaluate(fragment, profile)),
        }
    }

    fn predicates(&self) -> &[Predicate] {
        match self {
            Term::Require { predicate, .. } => std::slice::from_ref(predicate),
            Term::AnyOf { members, .. } => members,
        }
    }
}

/// Outcome of one term, for diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermOutcome {
    /// Term label
    pub label: String,
    /// Whether the term held
    pub passed: bool,
    /// Individual predicate results
    pub predicates: Vec<(&'static str, bool)>,
}

/// A named set of heading conditions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PolicyDef")]
pub struct Policy {
    name: String,
    terms: Vec<Term>,
}

#[derive(Deserialize)]
struct PolicyDef {
    name: String,
    #[serde(default)]
    terms: Vec<Term>,
}

impl TryFrom<PolicyDef> for Policy {
    type Error = Error;

    fn try_from(def: PolicyDef) -> Result<Self> {
        let policy = Policy {
            name: def.name,
            terms: def.terms,
        };
        policy.validate()?;
        Ok(policy)
    }
}

impl Policy {
    /// Start assembling a policy.
    pub fn builder(name: impl Into<String>) -> PolicyBuilder {
        PolicyBuilder::new(name)
    }

    /// Policy tuned for Key Information Documents.
    pub fn kid() -> Self {
        Self {
            name: "kid".to_string(),
            terms: vec![
                require("min_alpha", Predicate::MinAlpha),
                require("min_length", Predicate::MinLength { min: 4 }),
                require("no_dot_at_end", Predicate::NoDotAtEnd),
                require("digit", Predicate::CheckDigit),
                require("special_char", Predicate::SpecialChar),
                require("string", Predicate::StringValidity),
                require("whitespace", Predicate::WhitespaceRatio { min: 20.0 }),
                Term::AnyOf {
                    label: "prominence".to_string(),
                    members: vec![
                        Predicate::LargerThanCommon,
                        Predicate::ColorDiffersFromCommon,
                        Predicate::FontDiffersFromCommon,
                    ],
                },
                Term::AnyOf {
                    label: "emphasis".to_string(),
                    members: vec![Predicate::Bold, Predicate::Italic],
                },
                Term::AnyOf {
                    label: "position".to_string(),
                    members: vec![
                        Predicate::LeftSpace { min: 0.1 },
                        Predicate::RightSpace { min: 0.25 },
                        Predicate::Centered { threshold: 10.0 },
                        Predicate::IsTitle,
                    ],
                },
            ],
        }
    }

    /// Policy for prospectuses.
    ///
    /// Has no conditions yet and therefore detects no headings.
    pub fn prospectus() -> Self {
        Self {
            name: "prospectus".to_string(),
            terms: Vec::new(),
        }
    }

    /// Load a policy from JSON, validating its parameters.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the policy to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Policy name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The AND-terms in order.
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Check if the policy has no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Per-term results for a fragment.
    pub fn explain(&self, fragment: &Fragment, profile: &DocumentStyleProfile) -> Vec<TermOutcome> {
        self.terms
            .iter()
            .map(|term| {
                let predicates: Vec<_> = term
                    .predicates()
                    .iter()
                    .map(|p| (p.name(), p.evaluate(fragment, profile)))
                    .collect();
                TermOutcome {
                    label: term.label().to_string(),
                    passed: term.evaluate(fragment, profile),
                    predicates,
                }
            })
            .collect()
    }

    fn validate(&self) -> Result<()> {
        let mut labels = HashSet::new();
        for term in &self.terms {
            if term.label().is_empty() {
                return Err(Error::InvalidPolicy(format!(
                    "policy {:?} has a term without a label",
                    self.name
                )));
            }
            if !labels.insert(term.label()) {
                return Err(Error::InvalidPolicy(format!(
                    "duplicate term label {:?} in policy {:?}",
                    term.label(),
                    self.name
                )));
            }
            if term.predicates().is_empty() {
                return Err(Error::InvalidPolicy(format!(
                    "group {:?} has no members",
                    term.label()
                )));
            }
            for predicate in term.predicates() {
                predicate.validate()?;
            }
        }
        Ok(())
    }
}

impl HeadingClassifier for Policy {
    fn is_heading(&self, fragment: &Fragment, profile: &DocumentStyleProfile) -> bool {
        // An empty policy detects nothing rather than everything
        !self.terms.is_empty() && self.terms.iter().all(|t| t.evaluate(fragment, profile))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

fn require(label: &str, predicate: Predicate) -> Term {
    Term::Require {
        label: label.to_string(),
        predicate,
    }
}

/// Assembles a [`Policy`] term by term.
///
/// Mandatory predicates become AND-terms immediately. OR-group members are
/// collected under their group label; [`close_group`](Self::close_group)
/// turns a group into one AND-term at that position. Groups still open when
/// [`build`](Self::build) runs are closed in the order they were first
/// populated.
#[derive(Debug, Clone)]
pub struct PolicyBuilder {
    name: String,
    terms: Vec<Term>,
    open_groups: Vec<(String, Vec<Predicate>)>,
}

impl PolicyBuilder {
    /// Create an empty builder.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            terms: Vec::new(),
            open_groups: Vec::new(),
        }
    }

    /// Add a mandatory predicate.
    pub fn require(mut self, label: impl Into<String>, predicate: Predicate) -> Self {
        self.terms.push(Term::Require {
            label: label.into(),
            predicate,
        });
        self
    }

    /// Add a member to an OR-group.
    pub fn any_of(mut self, group: impl Into<String>, predicate: Predicate) -> Self {
        let group = group.into();
        match self.open_groups.iter_mut().find(|(label, _)| *label == group) {
            Some((_, members)) => members.push(predicate),
            None => self.open_groups.push((group, vec![predicate])),
        }
        self
    }

    /// Add an OR-group to the pipeline.
    ///
    /// Closing a group that has no members is a no-op.
    pub fn close_group(mut self, group: &str) -> Self {
        match self.open_groups.iter().position(|(label, _)| label == group) {
            Some(index) => {
                let (label, members) = self.open_groups.remove(index);
                self.terms.push(Term::AnyOf { label, members });
            }
            None => log::debug!("Policy {}: group {:?} has no members, ignored", self.name, group),
        }
        self
    }

    /// Validate and build the policy.
    pub fn build(mut self) -> Result<Policy> {
        for (label, members) in self.open_groups.drain(..) {
            self.terms.push(Term::AnyOf { label, members });
        }
        let policy = Policy {
            name: self.name,
            terms: self.terms,
        };
        policy.validate()?;
        Ok(policy)
    }
}

//! Heading classification and outline construction.
//!
//! A [`HierarchyParser`] classifies each fragment with a
//! [`HeadingClassifier`] (normally a [`Policy`]) and nests headings by font
//! size, falling back to a [`SubHeaderRule`] when two headings share a size.

mod options;
mod parser;
mod policy;
pub mod rules;
mod subheader;

pub use options::{PageSelection, PolicyKind, StructureOptions};
pub use parser::HierarchyParser;
pub use policy::{HeadingClassifier, Policy, PolicyBuilder, Predicate, Term, TermOutcome};
pub use subheader::{AnyRule, NoSubHeaders, NumberingRule, SubHeaderRule};

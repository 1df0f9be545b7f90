//! Outline statistics.

use crate::model::{Section, SectionLabel, StructuredDocument};
use serde::{Deserialize, Serialize};

/// Statistics about a recovered outline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineStats {
    /// Number of root sections
    pub root_count: u32,

    /// Number of headings
    pub heading_count: u32,

    /// Number of body content sections
    pub content_count: u32,

    /// Number of dangling containers
    pub dangling_count: u32,

    /// Deepest nesting level plus one (0 for an empty outline)
    pub max_depth: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,
}

impl OutlineStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect statistics for a document.
    pub fn from_document(doc: &StructuredDocument) -> Self {
        let mut stats = Self::new();
        stats.root_count = doc.sections.len() as u32;
        for section in doc.iter() {
            stats.add_section(section);
        }
        stats
    }

    /// Count one section (children are not visited).
    pub fn add_section(&mut self, section: &Section) {
        match section.label {
            SectionLabel::Heading => self.heading_count += 1,
            SectionLabel::Content => self.content_count += 1,
            SectionLabel::Dangling => self.dangling_count += 1,
        }
        self.max_depth = self.max_depth.max(section.level + 1);
        self.word_count += section.heading_text.split_whitespace().count() as u32;
    }
}

//! Section tree nodes.

use super::{Fragment, StyleDescriptor};
use crate::geometry::Rect;
use serde::{Deserialize, Serialize};

/// What a section node represents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionLabel {
    /// A detected heading
    Heading,
    /// Body text attached to a heading
    #[default]
    Content,
    /// Synthetic container for content that precedes any heading
    Dangling,
}

/// A node of the document outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Text of the originating fragment (empty for dangling containers)
    pub heading_text: String,

    /// Node kind
    pub label: SectionLabel,

    /// Nesting level (0 = root)
    pub level: u32,

    /// Style of the originating fragment
    #[serde(default)]
    pub style: StyleDescriptor,

    /// Bounding box of the originating fragment
    #[serde(default)]
    pub bbox: Rect,

    /// Page index (0-based) of the originating fragment
    #[serde(default)]
    pub page_index: u32,

    /// Child sections in reading order
    #[serde(default)]
    pub children: Vec<Section>,
}

impl Section {
    /// Create a heading section from a fragment.
    pub fn heading(fragment: Fragment, level: u32) -> Self {
        Self::from_fragment(fragment, SectionLabel::Heading, level)
    }

    /// Create a content section from a fragment.
    pub fn content(fragment: Fragment, level: u32) -> Self {
        Self::from_fragment(fragment, SectionLabel::Content, level)
    }

    /// Create an empty dangling container.
    pub fn dangling(level: u32) -> Self {
        Self {
            heading_text: String::new(),
            label: SectionLabel::Dangling,
            level,
            style: StyleDescriptor::default(),
            bbox: Rect::default(),
            page_index: 0,
            children: Vec::new(),
        }
    }

    fn from_fragment(fragment: Fragment, label: SectionLabel, level: u32) -> Self {
        Self {
            heading_text: fragment.text,
            label,
            level,
            style: fragment.style,
            bbox: fragment.bbox,
            page_index: fragment.page_index,
            children: Vec::new(),
        }
    }

    /// Check if this is a heading.
    pub fn is_heading(&self) -> bool {
        self.label == SectionLabel::Heading
    }

    /// Check if this is body content.
    pub fn is_content(&self) -> bool {
        self.label == SectionLabel::Content
    }

    /// Check if this is a dangling container.
    pub fn is_dangling(&self) -> bool {
        self.label == SectionLabel::Dangling
    }

    /// Font size used as the hierarchy key.
    pub fn size(&self) -> f32 {
        self.style.dominant_size
    }

    /// Append a child section.
    pub fn append_child(&mut self, child: Section) {
        self.children.push(child);
    }

    /// Heading texts of this section and all nested headings, depth-first,
    /// one per line.
    ///
    /// Body content is not included.
    pub fn full_content(&self) -> String {
        let mut contents = Vec::new();
        if self.is_heading() && !self.heading_text.is_empty() {
            contents.push(self.heading_text.as_str());
        }
        contents.extend(
            self.descendants()
                .filter(|s| s.is_heading() && !s.heading_text.is_empty())
                .map(|s| s.heading_text.as_str()),
        );
        contents.join("\n")
    }

    /// Leaf children that belong directly to this section.
    ///
    /// ```text
    /// This is a Header
    ///     paragraph 1
    ///     paragraph 2
    ///     This is a subheader
    ///         paragraph 3
    /// ```
    /// yields `[paragraph 1, paragraph 2]`.
    pub fn top_level_content(&self) -> Vec<&Section> {
        self.children
            .iter()
            .filter(|child| child.children.is_empty())
            .collect()
    }

    /// All nested sections in depth-first (document) order, excluding self.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
    }

    /// Depth of the subtree below this section (0 for a leaf).
    pub fn depth(&self) -> u32 {
        self.children
            .iter()
            .map(|c| 1 + c.depth())
            .max()
            .unwrap_or(0)
    }
}

/// Depth-first iterator over nested sections.
pub struct Descendants<'a> {
    stack: Vec<&'a Section>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Section;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.children.iter().rev());
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(text: &str, label: SectionLabel, level: u32) -> Section {
        Section {
            heading_text: text.to_string(),
            label,
            level,
            style: StyleDescriptor::default(),
            bbox: Rect::default(),
            page_index: 0,
            children: Vec::new(),
        }
    }

    fn sample_tree() -> Section {
        let mut chapter = node("Chapter", SectionLabel::Heading, 0);
        chapter.append_child(node("paragraph 1", SectionLabel::Content, 1));
        chapter.append_child(node("paragraph 2", SectionLabel::Content, 1));
        let mut sub = node("Subheader", SectionLabel::Heading, 1);
        sub.append_child(node("paragraph 3", SectionLabel::Content, 2));
        chapter.append_child(sub);
        chapter
    }

    #[test]
    fn test_full_content_skips_body() {
        assert_eq!(sample_tree().full_content(), "Chapter\nSubheader");
    }

    #[test]
    fn test_top_level_content() {
        let tree = sample_tree();
        let texts: Vec<_> = tree
            .top_level_content()
            .iter()
            .map(|s| s.heading_text.as_str())
            .collect();
        assert_eq!(texts, vec!["paragraph 1", "paragraph 2"]);
    }

    #[test]
    fn test_descendants_order() {
        let tree = sample_tree();
        let texts: Vec<_> = tree.descendants().map(|s| s.heading_text.as_str()).collect();
        assert_eq!(
            texts,
            vec!["paragraph 1", "paragraph 2", "Subheader", "paragraph 3"]
        );
        assert_eq!(tree.depth(), 2);
    }

    #[test]
    fn test_label_serde() {
        let json = serde_json::to_string(&SectionLabel::Dangling).unwrap();
        assert_eq!(json, "\"dangling\"");
    }
}

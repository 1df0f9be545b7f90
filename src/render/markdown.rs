//! Markdown rendering for structured documents.

use crate::error::Result;
use crate::model::{Section, SectionLabel, StructuredDocument};

use super::RenderOptions;

/// Convert a document to Markdown.
pub fn to_markdown(doc: &StructuredDocument, options: &RenderOptions) -> Result<String> {
    MarkdownRenderer::new(options.clone()).render(doc)
}

/// Markdown renderer.
///
/// Headings become `#` lines by nesting level, clamped to the configured
/// maximum. Body content becomes paragraphs. Dangling containers emit their
/// content only.
pub struct MarkdownRenderer {
    options: RenderOptions,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render a document to Markdown.
    pub fn render(&self, doc: &StructuredDocument) -> Result<String> {
        let mut output = String::new();

        if self.options.include_frontmatter {
            output.push_str(&doc.metadata.to_yaml_frontmatter(&doc.uri));
        }

        for section in &doc.sections {
            self.render_section(&mut output, section);
        }

        Ok(output.trim().to_string())
    }

    fn render_section(&self, output: &mut String, section: &Section) {
        match section.label {
            SectionLabel::Heading => self.render_heading(output, section),
            SectionLabel::Content => {
                if self.options.include_content && !section.heading_text.is_empty() {
                    output.push_str(&self.escape(&section.heading_text));
                    output.push_str("\n\n");
                }
            }
            SectionLabel::Dangling => {}
        }

        for child in &section.children {
            self.render_section(output, child);
        }
    }

    fn render_heading(&self, output: &mut String, section: &Section) {
        // Placeholders keep their children but print no line
        if section.heading_text.is_empty() {
            return;
        }
        let level = (section.level + 1).min(u32::from(self.options.max_heading_level));
        output.push_str(&"#".repeat(level as usize));
        output.push(' ');
        output.push_str(&self.escape(&section.heading_text));
        output.push_str("\n\n");
    }

    fn escape(&self, text: &str) -> String {
        if self.options.escape_special_chars {
            escape_markdown(text)
        } else {
            text.to_string()
        }
    }
}

/// Escape special Markdown characters.
/// Only escape characters that could be misinterpreted as Markdown syntax.
fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '`' | '*' | '_' | '[' | ']' | '|' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }
    // A leading '#' would turn a paragraph into a heading
    if result.starts_with('#') {
        result.insert(0, '\\');
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DocumentStyleProfile;

    fn node(text: &str, label: SectionLabel, level: u32) -> Section {
        let mut s = Section::dangling(level);
        s.label = label;
        s.heading_text = text.to_string();
        s
    }

    fn document() -> StructuredDocument {
        let mut preface = Section::dangling(0);
        preface.append_child(node("Marketing communication", SectionLabel::Content, 1));

        let mut purpose = node("Purpose", SectionLabel::Heading, 0);
        purpose.append_child(node("Key *information*", SectionLabel::Content, 1));
        let mut product = node("Product", SectionLabel::Heading, 1);
        let mut deep = node("Type", SectionLabel::Heading, 2);
        deep.append_child(node("#1 fund", SectionLabel::Content, 3));
        product.append_child(deep);
        purpose.append_child(product);

        StructuredDocument::new("kid.pdf", vec![preface, purpose], DocumentStyleProfile::default())
    }

    #[test]
    fn test_escape_markdown() {
        assert_eq!(escape_markdown("Hello *world*"), "Hello \\*world\\*");
        assert_eq!(escape_markdown("[link]"), "\\[link\\]");
        assert_eq!(escape_markdown("#1 fund"), "\\#1 fund");
    }

    #[test]
    fn test_render_outline() {
        let md = to_markdown(&document(), &RenderOptions::new()).unwrap();
        assert_eq!(
            md,
            "Marketing communication\n\n# Purpose\n\nKey \\*information\\*\n\n## Product\n\n### Type\n\n\\#1 fund"
        );
    }

    #[test]
    fn test_max_heading_level() {
        let options = RenderOptions::new().with_max_heading(2).headings_only();
        let md = to_markdown(&document(), &options).unwrap();
        assert_eq!(md, "# Purpose\n\n## Product\n\n## Type");
    }

    #[test]
    fn test_render_with_frontmatter() {
        let mut doc = document();
        doc.update_metadata("title", "Test Doc");
        let options = RenderOptions::new().with_frontmatter(true);
        let md = to_markdown(&doc, &options).unwrap();
        assert!(md.starts_with("---\n"));
        assert!(md.contains("title: \"Test Doc\""));
        assert!(md.contains("# Purpose"));
    }
}

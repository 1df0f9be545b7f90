//! Plain text outline rendering.

use crate::error::Result;
use std::fmt;

use crate::model::{Section, SectionLabel, StructuredDocument};

use super::RenderOptions;

/// Convert a document to an indented plain text outline.
///
/// Each section is one line, indented by its nesting level. Dangling
/// containers print no line of their own.
pub fn to_text(doc: &StructuredDocument, options: &RenderOptions) -> Result<String> {
    let lines: Vec<String> = outline_lines(doc, options)
        .iter()
        .map(|line| line.to_string())
        .collect();
    Ok(lines.join("\n"))
}

/// One visible line of the text outline.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineLine<'a> {
    /// Kind of section the line comes from
    pub label: SectionLabel,
    /// Leading spaces
    pub indent: usize,
    /// Section text
    pub text: &'a str,
}

impl fmt::Display for OutlineLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:indent$}{}", "", self.text, indent = self.indent)
    }
}

/// Visible outline lines in document order.
pub fn outline_lines<'a>(doc: &'a StructuredDocument, options: &RenderOptions) -> Vec<OutlineLine<'a>> {
    let mut lines = Vec::new();
    for section in &doc.sections {
        collect_lines(section, options, &mut lines);
    }
    lines
}

fn collect_lines<'a>(section: &'a Section, options: &RenderOptions, lines: &mut Vec<OutlineLine<'a>>) {
    let visible = section.is_heading() || (section.is_content() && options.include_content);
    if visible {
        lines.push(OutlineLine {
            label: section.label,
            indent: options.indent * section.level as usize,
            text: &section.heading_text,
        });
    }
    for child in &section.children {
        collect_lines(child, options, lines);
    }
}

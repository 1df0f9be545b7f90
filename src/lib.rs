//! # pdf-hierarchy
//!
//! Recover the heading outline of a document from a flat stream of styled
//! text fragments.
//!
//! A PDF decoder delivers text one line or span at a time, each with its
//! font, size, color and bounding box. This library decides which of those
//! fragments are headings and nests them into chapters, sections and
//! subsections purely from their relative visual prominence.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdf_hierarchy::{structure_file, render};
//!
//! fn main() -> pdf_hierarchy::Result<()> {
//!     // Fragment stream exported by a decoder
//!     let doc = structure_file("kid.fragments.json")?;
//!
//!     for heading in doc.headings() {
//!         println!("{}{}", "  ".repeat(heading.level as usize), heading.heading_text);
//!     }
//!
//!     let markdown = render::to_markdown(&doc, &render::RenderOptions::default())?;
//!     println!("{}", markdown);
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! 1. [`analysis`] tallies style samples into a document-wide
//!    [`DocumentStyleProfile`] and per-fragment [`StyleDescriptor`]s.
//! 2. [`hierarchy`] classifies fragments with a [`Policy`] and nests
//!    headings with a stack keyed by font size.
//! 3. [`render`] exports the resulting [`StructuredDocument`].

pub mod analysis;
pub mod error;
pub mod geometry;
pub mod hierarchy;
pub mod model;
pub mod render;
pub mod source;

// Re-export commonly used types
pub use analysis::SizeGranularity;
pub use error::{Error, Result};
pub use geometry::{Rect, Whitespace};
pub use hierarchy::{
    HeadingClassifier, HierarchyParser, NumberingRule, PageSelection, Policy, PolicyBuilder,
    PolicyKind, Predicate, StructureOptions, SubHeaderRule,
};
pub use model::{
    DocumentStyleProfile, Fragment, Metadata, RawFragment, Section, SectionLabel,
    StructuredDocument, StyleDescriptor, StyleSample,
};
pub use render::{JsonFormat, OutlineStats, RenderOptions};
pub use source::{ClipMargins, FragmentSource, MemorySource};

use std::path::Path;

/// Structure a fragment-stream JSON file with the default options.
///
/// # Example
///
/// ```no_run
/// use pdf_hierarchy::structure_file;
///
/// let doc = structure_file("kid.fragments.json").unwrap();
/// println!("Headings: {}", doc.heading_count());
/// ```
pub fn structure_file<P: AsRef<Path>>(path: P) -> Result<StructuredDocument> {
    structure_file_with_options(path, StructureOptions::default())
}

/// Structure a fragment-stream JSON file with custom options.
///
/// # Example
///
/// ```no_run
/// use pdf_hierarchy::{structure_file_with_options, PageSelection, StructureOptions};
///
/// let options = StructureOptions::new()
///     .half_points()
///     .with_pages(PageSelection::Range(1..=3));
/// let doc = structure_file_with_options("kid.fragments.json", options).unwrap();
/// ```
pub fn structure_file_with_options<P: AsRef<Path>>(
    path: P,
    options: StructureOptions,
) -> Result<StructuredDocument> {
    let source = MemorySource::open(path)?;
    structure_source(&source, options)
}

/// Structure any fragment source.
pub fn structure_source(
    source: &dyn FragmentSource,
    options: StructureOptions,
) -> Result<StructuredDocument> {
    HierarchyParser::new(options).structure_document(source)
}

/// Convert a fragment-stream JSON file to Markdown.
///
/// # Example
///
/// ```no_run
/// use pdf_hierarchy::to_markdown;
///
/// let markdown = to_markdown("kid.fragments.json").unwrap();
/// std::fs::write("outline.md", markdown).unwrap();
/// ```
pub fn to_markdown<P: AsRef<Path>>(path: P) -> Result<String> {
    let doc = structure_file(path)?;
    render::to_markdown(&doc, &RenderOptions::default())
}

/// Convert a fragment-stream JSON file to an indented text outline.
pub fn to_text<P: AsRef<Path>>(path: P, options: &RenderOptions) -> Result<String> {
    let doc = structure_file(path)?;
    render::to_text(&doc, options)
}

/// Convert a fragment-stream JSON file to outline JSON.
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let doc = structure_file(path)?;
    render::to_json(&doc, format)
}

/// Builder for structuring and exporting documents.
///
/// # Example
///
/// ```no_run
/// use pdf_hierarchy::{NumberingRule, Outliner};
///
/// let markdown = Outliner::new()
///     .half_points()
///     .with_sub_header_rule(NumberingRule::new())
///     .with_frontmatter()
///     .open("kid.fragments.json")?
///     .to_markdown()?;
/// # Ok::<(), pdf_hierarchy::Error>(())
/// ```
pub struct Outliner {
    structure_options: StructureOptions,
    render_options: RenderOptions,
    sub_headers: Option<Box<dyn SubHeaderRule>>,
}

impl Outliner {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            structure_options: StructureOptions::default(),
            render_options: RenderOptions::default(),
            sub_headers: None,
        }
    }

    /// Set the heading policy.
    pub fn with_policy(mut self, policy: PolicyKind) -> Self {
        self.structure_options = self.structure_options.with_policy(policy);
        self
    }

    /// Use a custom policy.
    pub fn with_custom_policy(mut self, policy: Policy) -> Self {
        self.structure_options = self.structure_options.with_custom_policy(policy);
        self
    }

    /// Round font sizes to half points.
    pub fn half_points(mut self) -> Self {
        self.structure_options = self.structure_options.half_points();
        self
    }

    /// Set the clip margins.
    pub fn with_clip(mut self, clip: ClipMargins) -> Self {
        self.structure_options = self.structure_options.with_clip(clip);
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.structure_options = self.structure_options.with_pages(pages);
        self
    }

    /// Set the rule that nests equal-size headings.
    pub fn with_sub_header_rule(mut self, rule: impl SubHeaderRule + 'static) -> Self {
        self.sub_headers = Some(Box::new(rule));
        self
    }

    /// Enable frontmatter in Markdown output.
    pub fn with_frontmatter(mut self) -> Self {
        self.render_options = self.render_options.with_frontmatter(true);
        self
    }

    /// Set the maximum Markdown heading level.
    pub fn with_max_heading(mut self, level: u8) -> Self {
        self.render_options = self.render_options.with_max_heading(level);
        self
    }

    /// Render headings only.
    pub fn headings_only(mut self) -> Self {
        self.render_options = self.render_options.headings_only();
        self
    }

    /// Emit compact JSON.
    pub fn compact_json(mut self) -> Self {
        self.render_options = self.render_options.with_json_format(JsonFormat::Compact);
        self
    }

    /// Structure a fragment-stream JSON file.
    pub fn open<P: AsRef<Path>>(self, path: P) -> Result<OutlineResult> {
        let source = MemorySource::open(path)?;
        self.structure(&source)
    }

    /// Structure any fragment source.
    pub fn structure(self, source: &dyn FragmentSource) -> Result<OutlineResult> {
        let mut parser = HierarchyParser::new(self.structure_options);
        if let Some(rule) = self.sub_headers {
            parser = parser.with_boxed_sub_header_rule(rule);
        }
        let document = parser.structure_document(source)?;
        Ok(OutlineResult {
            document,
            render_options: self.render_options,
        })
    }
}

impl Default for Outliner {
    fn default() -> Self {
        Self::new()
    }
}

/// A structured document together with its render options.
pub struct OutlineResult {
    /// The structured document
    pub document: StructuredDocument,
    /// Render options to use
    render_options: RenderOptions,
}

impl OutlineResult {
    /// Convert to Markdown.
    pub fn to_markdown(&self) -> Result<String> {
        render::to_markdown(&self.document, &self.render_options)
    }

    /// Convert to an indented text outline.
    pub fn to_text(&self) -> Result<String> {
        render::to_text(&self.document, &self.render_options)
    }

    /// Convert to JSON in the configured format.
    pub fn to_json(&self) -> Result<String> {
        render::to_json(&self.document, self.render_options.json_format)
    }

    /// Outline statistics.
    pub fn stats(&self) -> OutlineStats {
        OutlineStats::from_document(&self.document)
    }

    /// Get the document.
    pub fn document(&self) -> &StructuredDocument {
        &self.document
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn page() -> Rect {
        Rect::from_size(600.0, 800.0)
    }

    fn source() -> MemorySource {
        let column = Rect::new(40.0, 0.0, 560.0, 800.0);
        let line = |text: &str, y: f32, width: f32, font: &str, size: f32| {
            RawFragment::new(text, Rect::new(40.0, y, 40.0 + width, y + size), page())
                .with_container(Rect::new(column.x0, y, column.x1, y + size))
                .with_uniform_style(font, size, 0)
        };
        MemorySource::new(
            "mem://kid",
            vec![
                line("2. Risks", 100.0, 120.0, "Arial-Bold", 14.0),
                line("The product may lose value over time.", 120.0, 500.0, "Arial", 10.0),
                line("2.1 Market", 140.0, 120.0, "Arial-Bold", 14.0),
                line("Prices of the assets fluctuate with markets.", 160.0, 500.0, "Arial", 10.0),
            ],
        )
    }

    fn custom_policy() -> Policy {
        Policy::builder("bold")
            .require("bold", Predicate::Bold)
            .build()
            .unwrap()
    }

    #[test]
    fn test_outliner_builder() {
        let outliner = Outliner::new()
            .half_points()
            .with_frontmatter()
            .with_max_heading(3)
            .with_pages(PageSelection::Range(1..=2))
            .compact_json();

        assert_eq!(outliner.structure_options.granularity, SizeGranularity::Half);
        assert!(outliner.render_options.include_frontmatter);
        assert_eq!(outliner.render_options.max_heading_level, 3);
        assert_eq!(outliner.structure_options.pages, PageSelection::Range(1..=2));
        assert_eq!(outliner.render_options.json_format, JsonFormat::Compact);
    }

    #[test]
    fn test_outliner_default() {
        let outliner = Outliner::default();
        assert_eq!(outliner.structure_options.policy, PolicyKind::Kid);
        assert!(outliner.sub_headers.is_none());
    }

    #[test]
    fn test_outliner_with_sub_header_rule() {
        let result = Outliner::new()
            .with_custom_policy(custom_policy())
            .with_sub_header_rule(NumberingRule::new())
            .structure(&source())
            .unwrap();

        let doc = result.document();
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.metadata.policy, "bold");
        assert_eq!(result.stats().heading_count, 2);
        assert_eq!(result.stats().max_depth, 3);
        assert_eq!(result.to_text().unwrap().lines().count(), 4);
        assert!(result.to_json().unwrap().contains('\n'));
    }

    #[test]
    fn test_outliner_equal_sizes_are_siblings() {
        let result = Outliner::new()
            .with_custom_policy(custom_policy())
            .headings_only()
            .structure(&source())
            .unwrap();

        assert_eq!(result.document().sections.len(), 2);
        assert_eq!(result.to_markdown().unwrap(), "# 2. Risks\n\n# 2.1 Market");
    }

    #[test]
    fn test_structure_file_missing() {
        assert!(matches!(
            structure_file("/nonexistent/fragments.json"),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn test_structure_file_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(structure_file(file.path()), Err(Error::Json(_))));
    }

    #[test]
    fn test_to_json_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", source().to_json().unwrap()).unwrap();

        let json = to_json(file.path(), JsonFormat::Compact).unwrap();
        let doc = render::from_json(&json).unwrap();
        assert_eq!(doc.uri, "mem://kid");
        assert_eq!(doc.metadata.policy, "kid");
    }
}

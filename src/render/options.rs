//! Rendering options and configuration.

use super::JsonFormat;

/// Options for rendering a structured document.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Maximum heading level (1-6)
    pub max_heading_level: u8,

    /// Render body content, not only headings
    pub include_content: bool,

    /// Spaces per nesting level in the text outline
    pub indent: usize,

    /// Include YAML frontmatter with metadata
    pub include_frontmatter: bool,

    /// Escape special Markdown characters
    pub escape_special_chars: bool,

    /// JSON output format
    pub json_format: JsonFormat,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum heading level.
    pub fn with_max_heading(mut self, level: u8) -> Self {
        self.max_heading_level = level.clamp(1, 6);
        self
    }

    /// Enable or disable body content.
    pub fn with_content(mut self, include: bool) -> Self {
        self.include_content = include;
        self
    }

    /// Render headings only.
    pub fn headings_only(mut self) -> Self {
        self.include_content = false;
        self
    }

    /// Set the outline indentation width.
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Enable or disable frontmatter.
    pub fn with_frontmatter(mut self, include: bool) -> Self {
        self.include_frontmatter = include;
        self
    }

    /// Enable or disable Markdown escaping.
    pub fn with_escaping(mut self, escape: bool) -> Self {
        self.escape_special_chars = escape;
        self
    }

    /// Set the JSON format.
    pub fn with_json_format(mut self, format: JsonFormat) -> Self {
        self.json_format = format;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_heading_level: 6,
            include_content: true,
            indent: 2,
            include_frontmatter: false,
            escape_special_chars: true,
            json_format: JsonFormat::Pretty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_options_builder() {
        let options = RenderOptions::new()
            .with_frontmatter(true)
            .with_max_heading(9)
            .headings_only()
            .with_json_format(JsonFormat::Compact);

        assert!(options.include_frontmatter);
        assert_eq!(options.max_heading_level, 6);
        assert!(!options.include_content);
        assert_eq!(options.json_format, JsonFormat::Compact);
    }

    #[test]
    fn test_defaults() {
        let options = RenderOptions::default();
        assert_eq!(options.indent, 2);
        assert!(options.include_content);
        assert!(options.escape_special_chars);
    }
}

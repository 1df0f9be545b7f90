//! Rendering module for converting outlines to various output formats.

mod json;
mod markdown;
mod options;
mod result;
mod text;

pub use json::{from_json, to_json, JsonFormat};
pub use markdown::{to_markdown, MarkdownRenderer};
pub use options::RenderOptions;
pub use result::OutlineStats;
pub use text::{outline_lines, to_text, OutlineLine};

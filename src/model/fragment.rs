//! Fragments: the unit of text the engine classifies.

use super::{StyleDescriptor, StyleSample};
use crate::geometry::Rect;
use serde::{Deserialize, Serialize};

/// A fragment as delivered by the external decoder, before annotation.
///
/// One fragment corresponds roughly to one visual line or span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawFragment {
    /// Text content
    pub text: String,

    /// Bounding box of the fragment itself
    pub bbox: Rect,

    /// Bounding box of the enclosing block
    pub container_bbox: Rect,

    /// Bounding box of the page
    pub page_bbox: Rect,

    /// Page index (0-based)
    #[serde(default)]
    pub page_index: u32,

    /// Character-level style samples
    #[serde(default)]
    pub samples: Vec<StyleSample>,
}

impl RawFragment {
    /// Create a fragment whose container and page are both `page_bbox`.
    pub fn new(text: impl Into<String>, bbox: Rect, page_bbox: Rect) -> Self {
        Self {
            text: text.into(),
            bbox,
            container_bbox: page_bbox,
            page_bbox,
            page_index: 0,
            samples: Vec::new(),
        }
    }

    /// Set the enclosing block.
    pub fn with_container(mut self, container: Rect) -> Self {
        self.container_bbox = container;
        self
    }

    /// Set the page index.
    pub fn on_page(mut self, page_index: u32) -> Self {
        self.page_index = page_index;
        self
    }

    /// Add one sample per character of the text, all sharing one style.
    pub fn with_uniform_style(mut self, font: &str, size: f32, color: u32) -> Self {
        let count = self.text.chars().filter(|c| !c.is_whitespace()).count().max(1);
        self.samples
            .extend((0..count).map(|_| StyleSample::new(font, size, color)));
        self
    }

    /// Add a single sample.
    pub fn with_sample(mut self, sample: StyleSample) -> Self {
        self.samples.push(sample);
        self
    }
}

/// An annotated fragment: text plus its dominant style and geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    /// Text content
    pub text: String,

    /// Dominant style
    pub style: StyleDescriptor,

    /// Bounding box of the fragment itself
    pub bbox: Rect,

    /// Bounding box of the enclosing block
    pub container_bbox: Rect,

    /// Bounding box of the page
    pub page_bbox: Rect,

    /// Page index (0-based)
    pub page_index: u32,
}

impl Fragment {
    /// Font size used as the hierarchy key.
    pub fn size(&self) -> f32 {
        self.style.dominant_size
    }
}

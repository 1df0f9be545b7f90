//! Typographic style types.

use crate::geometry::Rect;
use serde::{Deserialize, Serialize};

/// A single character-level style record as reported by the decoder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleSample {
    /// Font name (e.g., "Helvetica-Bold")
    pub font: String,

    /// Font size in points
    pub size: f32,

    /// sRGB color as a packed integer (0xRRGGBB)
    #[serde(default)]
    pub color: u32,
}

impl StyleSample {
    /// Create a new style sample.
    pub fn new(font: impl Into<String>, size: f32, color: u32) -> Self {
        Self {
            font: font.into(),
            size,
            color,
        }
    }
}

/// Dominant style of a fragment or block.
///
/// Built once from the fragment's style samples and never changed afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleDescriptor {
    /// Most frequent font name
    pub dominant_font: String,

    /// Most frequent (quantised) font size
    pub dominant_size: f32,

    /// Most frequent color
    pub dominant_color: u32,

    /// "bold" appears in the dominant font name
    pub bold: bool,

    /// "italic" appears in the dominant font name
    pub italic: bool,

    /// Mean raw size, truncated to one decimal
    pub mean_size: f32,

    /// Largest raw size
    pub max_size: f32,
}

impl StyleDescriptor {
    /// Check if any emphasis is applied.
    pub fn is_emphasized(&self) -> bool {
        self.bold || self.italic
    }
}

/// Document-wide style baseline.
///
/// Computed before any fragment is classified and fixed for the whole run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentStyleProfile {
    /// Most frequent (quantised) font size
    pub common_size: f32,

    /// Most frequent font name
    pub common_font: String,

    /// Most frequent color
    pub common_color: u32,

    /// Largest quantised size seen
    pub max_size: f32,

    /// Smallest quantised size seen
    pub min_size: f32,

    /// Bounding box of the widest fragment in the document
    pub dominant_region_bbox: Rect,

    /// Page width in points
    pub page_width: f32,

    /// Page height in points
    pub page_height: f32,

    /// Number of style samples the profile was computed from
    pub sample_count: usize,
}

impl DocumentStyleProfile {
    /// Page rectangle anchored at the origin.
    pub fn page_bbox(&self) -> Rect {
        Rect::from_size(self.page_width, self.page_height)
    }
}

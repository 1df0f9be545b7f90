//! Fragment sources.
//!
//! The decoder that turns a document into styled text fragments lives outside
//! this crate. A [`FragmentSource`] is the seam: it hands out the fragment
//! stream in reading order, and it must be restartable because the profile
//! pass and the classification pass each iterate it once.
//!
//! # Example
//!
//! ```no_run
//! use pdf_hierarchy::source::{FragmentSource, MemorySource};
//!
//! fn main() -> pdf_hierarchy::Result<()> {
//!     let source = MemorySource::open("fragments.json")?;
//!     println!("{} fragments from {}", source.fragments().count(), source.uri());
//!     Ok(())
//! }
//! ```

use crate::error::Result;
use crate::geometry::Rect;
use crate::model::RawFragment;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A restartable, ordered stream of raw fragments.
pub trait FragmentSource {
    /// Identifier of the underlying document.
    fn uri(&self) -> &str;

    /// Iterate the fragments in reading order, from the beginning.
    fn fragments(&self) -> Box<dyn Iterator<Item = RawFragment> + '_>;
}

/// Top and bottom page margins excluded from analysis.
///
/// Running headers and footers sit in these bands; they are dropped from both
/// the profile pass and the classification pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClipMargins {
    /// Band at the top of each page, in points
    pub top: f32,
    /// Band at the bottom of each page, in points
    pub bottom: f32,
}

impl ClipMargins {
    /// Margins that exclude nothing.
    pub fn none() -> Self {
        Self {
            top: 0.0,
            bottom: 0.0,
        }
    }

    /// The clip rectangle for a page.
    pub fn clip_rect(&self, page: &Rect) -> Rect {
        Rect::new(page.x0, page.y0 + self.top, page.x1, page.y1 - self.bottom)
    }

    /// Check whether a fragment lies (at least partially) inside the clip.
    ///
    /// A fragment without a usable page box cannot be located on its page
    /// and is kept.
    pub fn contains(&self, fragment: &RawFragment) -> bool {
        if (self.top <= 0.0 && self.bottom <= 0.0) || fragment.page_bbox.is_empty() {
            return true;
        }
        self.clip_rect(&fragment.page_bbox).intersects(&fragment.bbox)
    }
}

impl Default for ClipMargins {
    fn default() -> Self {
        Self {
            top: 10.0,
            bottom: 20.0,
        }
    }
}

/// An in-memory fragment stream.
///
/// Also the on-disk JSON format accepted by the CLI:
///
/// ```json
/// {
///   "uri": "kid.pdf",
///   "fragments": [
///     {
///       "text": "Purpose",
///       "bbox": {"x0": 40, "y0": 60, "x1": 120, "y1": 74},
///       "container_bbox": {"x0": 40, "y0": 60, "x1": 550, "y1": 74},
///       "page_bbox": {"x0": 0, "y0": 0, "x1": 595, "y1": 842},
///       "page_index": 0,
///       "samples": [{"font": "Arial-Bold", "size": 14.0, "color": 0}]
///     }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemorySource {
    /// Identifier of the document
    #[serde(default)]
    pub uri: String,

    /// Fragments in reading order
    pub fragments: Vec<RawFragment>,
}

impl MemorySource {
    /// Create a source from fragments.
    pub fn new(uri: impl Into<String>, fragments: Vec<RawFragment>) -> Self {
        Self {
            uri: uri.into(),
            fragments,
        }
    }

    /// Load a fragment stream from a JSON file.
    ///
    /// When the file does not name its document, the path is used as the URI.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)?;
        let mut source = Self::from_json(&data)?;
        if source.uri.is_empty() {
            source.uri = path.display().to_string();
        }
        log::debug!(
            "Loaded {} fragments from {}",
            source.fragments.len(),
            path.display()
        );
        Ok(source)
    }

    /// Parse a fragment stream from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the fragment stream to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Append a fragment.
    pub fn push(&mut self, fragment: RawFragment) {
        self.fragments.push(fragment);
    }

    /// Number of fragments.
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Check if the source has no fragments.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

impl FragmentSource for MemorySource {
    fn uri(&self) -> &str {
        &self.uri
    }

    fn fragments(&self) -> Box<dyn Iterator<Item = RawFragment> + '_> {
        Box::new(self.fragments.iter().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn page() -> Rect {
        Rect::from_size(600.0, 800.0)
    }

    #[test]
    fn test_clip_rect() {
        let clip = ClipMargins::default().clip_rect(&page());
        assert_eq!(clip, Rect::new(0.0, 10.0, 600.0, 780.0));
    }

    #[test]
    fn test_clip_contains() {
        let margins = ClipMargins::default();
        let body = RawFragment::new("body", Rect::new(10.0, 400.0, 100.0, 410.0), page());
        let header = RawFragment::new("hdr", Rect::new(10.0, 1.0, 100.0, 8.0), page());
        let straddling = RawFragment::new("x", Rect::new(10.0, 775.0, 100.0, 790.0), page());

        assert!(margins.contains(&body));
        assert!(!margins.contains(&header));
        assert!(margins.contains(&straddling));
        assert!(ClipMargins::none().contains(&header));
    }

    #[test]
    fn test_clip_keeps_fragments_without_page_box() {
        let margins = ClipMargins::default();
        let orphan = RawFragment::new("body", Rect::new(10.0, 1.0, 100.0, 8.0), Rect::default());
        assert!(margins.contains(&orphan));
    }

    #[test]
    fn test_json_round_trip() {
        let source = MemorySource::new(
            "mem://kid",
            vec![RawFragment::new("Purpose", Rect::new(40.0, 60.0, 120.0, 74.0), page())
                .with_uniform_style("Arial-Bold", 14.0, 0)],
        );

        let json = source.to_json().unwrap();
        let parsed = MemorySource::from_json(&json).unwrap();
        assert_eq!(parsed.uri, "mem://kid");
        assert_eq!(parsed.fragments, source.fragments);
    }

    #[test]
    fn test_open_uses_path_as_uri() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"fragments": [{{"text": "A", "bbox": {{"x0": 0, "y0": 20, "x1": 5, "y1": 30}},
            "container_bbox": {{"x0": 0, "y0": 20, "x1": 5, "y1": 30}},
            "page_bbox": {{"x0": 0, "y0": 0, "x1": 600, "y1": 800}}}}]}}"#
        )
        .unwrap();

        let source = MemorySource::open(file.path()).unwrap();
        assert_eq!(source.len(), 1);
        assert_eq!(source.uri(), file.path().display().to_string());
        assert!(source.fragments[0].samples.is_empty());
    }
}

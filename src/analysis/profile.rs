//! Document-wide style profile.

use super::style::{SizeGranularity, Tally};
use crate::error::{Error, Result};
use crate::geometry::Rect;
use crate::model::{DocumentStyleProfile, RawFragment};
use crate::source::ClipMargins;

/// Accumulates style samples across a document.
///
/// Fragments can be fed one at a time, so the profile can also be computed
/// while buffering a single-shot stream.
#[derive(Debug, Clone)]
pub struct ProfileBuilder {
    granularity: SizeGranularity,
    clip: ClipMargins,
    sizes: Tally<f32>,
    fonts: Tally<String>,
    colors: Tally<u32>,
    sample_count: usize,
    clipped_count: usize,
    widest: Option<Rect>,
    page_width: f32,
    page_height: f32,
}

impl ProfileBuilder {
    /// Create an empty builder.
    pub fn new(granularity: SizeGranularity, clip: ClipMargins) -> Self {
        Self {
            granularity,
            clip,
            sizes: Tally::new(),
            fonts: Tally::new(),
            colors: Tally::new(),
            sample_count: 0,
            clipped_count: 0,
            widest: None,
            page_width: 0.0,
            page_height: 0.0,
        }
    }

    /// Add all samples of one fragment.
    pub fn add(&mut self, fragment: &RawFragment) {
        self.page_width = self.page_width.max(fragment.page_bbox.width());
        self.page_height = self.page_height.max(fragment.page_bbox.height());

        if !self.clip.contains(fragment) {
            self.clipped_count += fragment.samples.len();
            return;
        }
        if fragment.samples.is_empty() {
            return;
        }

        for sample in &fragment.samples {
            self.sizes.add(self.granularity.quantize(sample.size));
            self.fonts.add(sample.font.clone());
            self.colors.add(sample.color);
        }
        self.sample_count += fragment.samples.len();

        let width = fragment.bbox.width();
        if self.widest.map_or(true, |w| width > w.width()) {
            self.widest = Some(fragment.bbox);
        }
    }

    /// Finish the profile.
    ///
    /// Fails with [`Error::NoStylableText`] when no samples were seen at all,
    /// and with [`Error::ClippedOut`] when every sample was outside the clip.
    pub fn finish(self) -> Result<DocumentStyleProfile> {
        if self.sample_count == 0 {
            if self.clipped_count > 0 {
                return Err(Error::ClippedOut(self.clipped_count));
            }
            return Err(Error::NoStylableText);
        }

        let (mut min_size, mut max_size) = (f32::MAX, f32::MIN);
        for size in self.sizes.values() {
            min_size = min_size.min(*size);
            max_size = max_size.max(*size);
        }

        let profile = DocumentStyleProfile {
            common_size: self.sizes.dominant().copied().unwrap_or_default(),
            common_font: self.fonts.dominant().cloned().unwrap_or_default(),
            common_color: self.colors.dominant().copied().unwrap_or_default(),
            max_size,
            min_size,
            dominant_region_bbox: self.widest.unwrap_or_default(),
            page_width: self.page_width,
            page_height: self.page_height,
            sample_count: self.sample_count,
        };

        log::debug!(
            "Style profile: {} samples, common {}pt {} #{:06x}, sizes {}..{}",
            profile.sample_count,
            profile.common_size,
            profile.common_font,
            profile.common_color,
            profile.min_size,
            profile.max_size
        );

        Ok(profile)
    }
}

/// Compute the profile of a complete fragment sequence in one pass.
pub fn build_profile<'a, I>(
    fragments: I,
    granularity: SizeGranularity,
    clip: ClipMargins,
) -> Result<DocumentStyleProfile>
where
    I: IntoIterator<Item = &'a RawFragment>,
{
    let mut builder = ProfileBuilder::new(granularity, clip);
    for fragment in fragments {
        builder.add(fragment);
    }
    builder.finish()
}

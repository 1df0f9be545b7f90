//! Per-fragment style descriptors.

use crate::error::{Error, Result};
use crate::model::{Fragment, RawFragment, StyleDescriptor, StyleSample};
use unicode_normalization::UnicodeNormalization;

/// How finely font sizes are bucketed before counting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SizeGranularity {
    /// Round to the nearest whole point
    #[default]
    Integer,
    /// Round to the nearest half point
    Half,
}

impl SizeGranularity {
    /// Quantise a raw font size.
    pub fn quantize(self, size: f32) -> f32 {
        match self {
            SizeGranularity::Integer => size.round(),
            SizeGranularity::Half => (size * 2.0).round() / 2.0,
        }
    }
}

/// Occurrence counter that remembers first-seen order.
///
/// The dominant value is the one with the highest count; ties go to the value
/// encountered first.
#[derive(Debug, Clone)]
pub(crate) struct Tally<T> {
    entries: Vec<(T, usize)>,
}

impl<T: PartialEq> Tally<T> {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub(crate) fn add(&mut self, value: T) {
        match self.entries.iter_mut().find(|(v, _)| *v == value) {
            Some((_, count)) => *count += 1,
            None => self.entries.push((value, 1)),
        }
    }

    pub(crate) fn dominant(&self) -> Option<&T> {
        let mut best: Option<&(T, usize)> = None;
        for entry in &self.entries {
            if best.map_or(true, |(_, count)| entry.1 > *count) {
                best = Some(entry);
            }
        }
        best.map(|(value, _)| value)
    }

    pub(crate) fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|(v, _)| v)
    }
}

/// Builds [`StyleDescriptor`]s from character-level samples.
#[derive(Debug, Clone, Copy, Default)]
pub struct StyleDescriptorBuilder {
    granularity: SizeGranularity,
}

impl StyleDescriptorBuilder {
    /// Create a builder with the given size granularity.
    pub fn new(granularity: SizeGranularity) -> Self {
        Self { granularity }
    }

    /// The size granularity in use.
    pub fn granularity(&self) -> SizeGranularity {
        self.granularity
    }

    /// Derive the dominant style of a sequence of samples.
    ///
    /// `label` identifies the fragment in the error when there are no samples.
    pub fn build(&self, samples: &[StyleSample], label: &str) -> Result<StyleDescriptor> {
        if samples.is_empty() {
            return Err(Error::EmptyStyle(label.to_string()));
        }

        let mut fonts = Tally::new();
        let mut sizes = Tally::new();
        let mut colors = Tally::new();
        let mut total = 0.0f32;
        let mut max_size = f32::MIN;

        for sample in samples {
            fonts.add(sample.font.as_str());
            sizes.add(self.granularity.quantize(sample.size));
            colors.add(sample.color);
            total += sample.size;
            max_size = max_size.max(sample.size);
        }

        let dominant_font = fonts.dominant().copied().unwrap_or_default().to_string();
        let lower = dominant_font.to_lowercase();

        Ok(StyleDescriptor {
            bold: lower.contains("bold"),
            italic: lower.contains("italic"),
            dominant_size: sizes.dominant().copied().unwrap_or_default(),
            dominant_color: colors.dominant().copied().unwrap_or_default(),
            mean_size: truncate(total / samples.len() as f32, 1),
            max_size,
            dominant_font,
        })
    }
}

/// Truncate (not round) to the given number of decimals.
fn truncate(value: f32, decimals: i32) -> f32 {
    let factor = 10f32.powi(decimals);
    (value * factor).trunc() / factor
}

/// Annotates raw fragments with their style descriptors.
#[derive(Debug, Clone, Copy)]
pub struct StyleAnnotator {
    builder: StyleDescriptorBuilder,
    trim_text: bool,
}

impl StyleAnnotator {
    /// Create an annotator.
    pub fn new(granularity: SizeGranularity, trim_text: bool) -> Self {
        Self {
            builder: StyleDescriptorBuilder::new(granularity),
            trim_text,
        }
    }

    /// Annotate a single fragment.
    ///
    /// Text is normalized to NFC.
    ///
    /// Fails with [`Error::EmptyStyle`] when the fragment has no samples.
    pub fn annotate(&self, raw: RawFragment) -> Result<Fragment> {
        let style = self.builder.build(&raw.samples, &raw.text)?;
        let text = if self.trim_text {
            raw.text.trim()
        } else {
            raw.text.as_str()
        };
        // Decoders may emit decomposed accents; predicates count characters
        let text: String = text.nfc().collect();

        Ok(Fragment {
            text,
            style,
            bbox: raw.bbox,
            container_bbox: raw.container_bbox,
            page_bbox: raw.page_bbox,
            page_index: raw.page_index,
        })
    }
}

impl Default for StyleAnnotator {
    fn default() -> Self {
        Self::new(SizeGranularity::default(), true)
    }
}

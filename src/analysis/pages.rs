//! Printed page numbers.
//!
//! The number printed on a page often differs from its position in the file
//! (cover pages, roman-numbered front matter). The labeler scans every
//! fragment of a page, including running headers and footers that the clip
//! excludes from classification.

use std::collections::BTreeMap;

use regex::Regex;

use crate::model::RawFragment;
use crate::source::ClipMargins;

/// Finds the printed page number of each page.
///
/// Per page, the first match wins in this order:
///
/// 1. `"page N"` anywhere on the page ("Page 3 of 10");
/// 2. a fragment that is only a number ("7", "- 7 -"), the last one on the page;
/// 3. a trailing number in a header or footer line ("Global Equity Fund | 4").
#[derive(Debug, Clone)]
pub struct PageLabeler {
    clip: ClipMargins,
    explicit: Regex,
    bare: Regex,
    trailing: Regex,
    pages: BTreeMap<u32, Candidates>,
}

#[derive(Debug, Clone, Copy, Default)]
struct Candidates {
    explicit: Option<u32>,
    bare: Option<u32>,
    margin: Option<u32>,
}

impl PageLabeler {
    /// Create a labeler; `clip` decides which lines count as headers and footers.
    pub fn new(clip: ClipMargins) -> Self {
        Self {
            clip,
            explicit: Regex::new(r"\bpage\s+(\d+)\b").unwrap(),
            bare: Regex::new(r"^(\d+)$").unwrap(),
            trailing: Regex::new(r"\s(\d+)$").unwrap(),
            pages: BTreeMap::new(),
        }
    }

    /// Feed one fragment, in reading order.
    pub fn add(&mut self, fragment: &RawFragment) {
        let text = clean(&fragment.text);
        if !text.chars().any(|c| c.is_ascii_digit()) {
            return;
        }

        let in_margin = !self.clip.contains(fragment);
        let page = self.pages.entry(fragment.page_index).or_default();
        if page.explicit.is_some() {
            return;
        }

        if let Some(number) = capture(&self.explicit, &text) {
            page.explicit = Some(number);
        } else if let Some(number) = capture(&self.bare, &text) {
            page.bare = Some(number);
        } else if in_margin {
            if let Some(number) = capture(&self.trailing, &text) {
                page.margin = Some(number);
            }
        }
    }

    /// Printed page number by 0-based page index; pages without one are absent.
    pub fn finish(self) -> BTreeMap<u32, u32> {
        self.pages
            .into_iter()
            .filter_map(|(index, c)| c.explicit.or(c.bare).or(c.margin).map(|n| (index, n)))
            .collect()
    }
}

impl Default for PageLabeler {
    fn default() -> Self {
        Self::new(ClipMargins::default())
    }
}

/// Label every page of a fragment sequence.
pub fn page_labels<'a, I>(fragments: I, clip: ClipMargins) -> BTreeMap<u32, u32>
where
    I: IntoIterator<Item = &'a RawFragment>,
{
    let mut labeler = PageLabeler::new(clip);
    for fragment in fragments {
        labeler.add(fragment);
    }
    labeler.finish()
}

/// Lowercase, without dashes and periods that decorate page numbers.
fn clean(text: &str) -> String {
    text.chars()
        .filter(|&c| !matches!(c, '.' | '-' | '\u{2013}' | '\u{2014}'))
        .collect::<String>()
        .trim()
        .to_lowercase()
}

fn capture(regex: &Regex, text: &str) -> Option<u32> {
    regex.captures(text)?.get(1)?.as_str().parse().ok()
}

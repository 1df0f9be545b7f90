//! Structuring options and configuration.

use super::Policy;
use crate::analysis::SizeGranularity;
use crate::source::ClipMargins;
use std::ops::RangeInclusive;

/// Options for recovering a document outline.
#[derive(Debug, Clone)]
pub struct StructureOptions {
    /// Heading policy
    pub policy: PolicyKind,

    /// Rounding of font sizes before tallying
    pub granularity: SizeGranularity,

    /// Page margins excluded from analysis
    pub clip: ClipMargins,

    /// Which pages to analyze
    pub pages: PageSelection,

    /// Trim surrounding whitespace from fragment text
    pub trim_text: bool,
}

impl StructureOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the heading policy.
    pub fn with_policy(mut self, policy: PolicyKind) -> Self {
        self.policy = policy;
        self
    }

    /// Use a custom policy.
    pub fn with_custom_policy(mut self, policy: Policy) -> Self {
        self.policy = PolicyKind::Custom(policy);
        self
    }

    /// Set the size granularity.
    pub fn with_granularity(mut self, granularity: SizeGranularity) -> Self {
        self.granularity = granularity;
        self
    }

    /// Round sizes to half points.
    pub fn half_points(mut self) -> Self {
        self.granularity = SizeGranularity::Half;
        self
    }

    /// Set the clip margins.
    pub fn with_clip(mut self, clip: ClipMargins) -> Self {
        self.clip = clip;
        self
    }

    /// Analyze full pages, including headers and footers.
    pub fn without_clip(mut self) -> Self {
        self.clip = ClipMargins::none();
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.pages = pages;
        self
    }

    /// Enable or disable text trimming.
    pub fn with_trim_text(mut self, trim: bool) -> Self {
        self.trim_text = trim;
        self
    }
}

impl Default for StructureOptions {
    fn default() -> Self {
        Self {
            policy: PolicyKind::Kid,
            granularity: SizeGranularity::Integer,
            clip: ClipMargins::default(),
            pages: PageSelection::All,
            trim_text: true,
        }
    }
}

/// Which heading policy to apply.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum PolicyKind {
    /// Key Information Documents
    #[default]
    Kid,
    /// Prospectuses
    Prospectus,
    /// A caller-supplied policy
    Custom(Policy),
}

impl PolicyKind {
    /// Parse a built-in policy name.
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "kid" => Ok(PolicyKind::Kid),
            "prospectus" => Ok(PolicyKind::Prospectus),
            other => Err(format!("Unknown policy: {}", other)),
        }
    }

    /// The policy itself.
    pub fn to_policy(&self) -> Policy {
        match self {
            PolicyKind::Kid => Policy::kid(),
            PolicyKind::Prospectus => Policy::prospectus(),
            PolicyKind::Custom(policy) => policy.clone(),
        }
    }
}

/// Page selection (1-indexed).
#[derive(Debug, Clone, Default, PartialEq)]
pub enum PageSelection {
    /// All pages
    #[default]
    All,
    /// A range of pages (inclusive)
    Range(RangeInclusive<u32>),
    /// Specific pages
    Pages(Vec<u32>),
}

impl PageSelection {
    /// Check if a page number should be included.
    pub fn includes(&self, page: u32) -> bool {
        match self {
            PageSelection::All => true,
            PageSelection::Range(range) => range.contains(&page),
            PageSelection::Pages(pages) => pages.contains(&page),
        }
    }

    /// Check a 0-based page index.
    pub fn includes_index(&self, index: u32) -> bool {
        self.includes(index.saturating_add(1))
    }

    /// Parse a 1-indexed page selection such as `"3"`, `"2-5"` or `"1,3,7-9"`.
    ///
    /// A lone span stays a [`PageSelection::Range`]; anything else becomes a
    /// sorted list without duplicates. Page 0 and descending spans are rejected.
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(PageSelection::All);
        }

        let spans = s
            .split(',')
            .map(parse_span)
            .collect::<Result<Vec<_>, _>>()?;

        if let [span] = spans.as_slice() {
            if span.start() != span.end() {
                return Ok(PageSelection::Range(span.clone()));
            }
        }

        let mut pages: Vec<u32> = spans.into_iter().flatten().collect();
        pages.sort_unstable();
        pages.dedup();
        Ok(PageSelection::Pages(pages))
    }
}

impl std::str::FromStr for PageSelection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// `"4"` or `"2-5"`, inclusive.
fn parse_span(part: &str) -> Result<RangeInclusive<u32>, String> {
    let (first, last) = match part.split_once('-') {
        Some((first, last)) => (page_number(first)?, page_number(last)?),
        None => {
            let page = page_number(part)?;
            (page, page)
        }
    };
    if first > last {
        return Err(format!("Descending page range: {}", part.trim()));
    }
    Ok(first..=last)
}

fn page_number(s: &str) -> Result<u32, String> {
    match s.trim().parse::<u32>() {
        Ok(0) => Err("Pages are numbered from 1".to_string()),
        Ok(page) => Ok(page),
        Err(_) => Err(format!("Invalid page number: {:?}", s.trim())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structure_options_builder() {
        let options = StructureOptions::new()
            .with_policy(PolicyKind::Prospectus)
            .half_points()
            .without_clip()
            .with_trim_text(false);

        assert_eq!(options.policy, PolicyKind::Prospectus);
        assert_eq!(options.granularity, SizeGranularity::Half);
        assert_eq!(options.clip, ClipMargins::none());
        assert!(!options.trim_text);
    }

    #[test]
    fn test_default_options() {
        let options = StructureOptions::default();
        assert_eq!(options.policy, PolicyKind::Kid);
        assert_eq!(options.clip, ClipMargins::default());
        assert!(options.trim_text);
    }

    #[test]
    fn test_policy_kind_parse() {
        assert_eq!(PolicyKind::parse("KID").unwrap(), PolicyKind::Kid);
        assert_eq!(PolicyKind::parse("prospectus").unwrap().to_policy(), Policy::prospectus());
        assert!(PolicyKind::parse("annual-report").is_err());
    }

    #[test]
    fn test_page_selection() {
        let range = PageSelection::Range(2..=3);
        assert!(!range.includes_index(0));
        assert!(range.includes_index(1));
        assert!(range.includes_index(2));
        assert!(!range.includes_index(3));

        let mixed = PageSelection::parse("5,1,3-4,3").unwrap();
        assert_eq!(mixed, PageSelection::Pages(vec![1, 3, 4, 5]));
        assert_eq!(PageSelection::parse("all").unwrap(), PageSelection::All);
        assert!(PageSelection::parse("x-2").is_err());
    }

    #[test]
    fn test_page_selection_spans() {
        assert_eq!(PageSelection::parse(" 2-4 ").unwrap(), PageSelection::Range(2..=4));
        assert_eq!(PageSelection::parse("2").unwrap(), PageSelection::Pages(vec![2]));
        assert_eq!("ALL".parse::<PageSelection>().unwrap(), PageSelection::All);
        assert!(PageSelection::parse("0").is_err());
        assert!(PageSelection::parse("5-3").is_err());
        assert!(PageSelection::parse("1,,2").is_err());
    }
}

//! Stack-based outline recovery.

use super::options::StructureOptions;
use super::policy::HeadingClassifier;
use super::subheader::{NoSubHeaders, SubHeaderRule};
use std::collections::BTreeMap;

use crate::analysis::{PageLabeler, ProfileBuilder, StyleAnnotator};
use crate::error::Result;
use crate::model::{DocumentStyleProfile, Fragment, Metadata, RawFragment, Section, StructuredDocument};
use crate::source::FragmentSource;

/// Builds the section tree of a document.
///
/// The parser holds configuration only; every call to
/// [`structure_document`](Self::structure_document) or
/// [`create_hierarchy`](Self::create_hierarchy) starts from a fresh state.
pub struct HierarchyParser {
    options: StructureOptions,
    classifier: Box<dyn HeadingClassifier>,
    sub_headers: Box<dyn SubHeaderRule>,
}

impl HierarchyParser {
    /// Create a parser from options, classifying with the configured policy.
    pub fn new(options: StructureOptions) -> Self {
        let classifier = Box::new(options.policy.to_policy());
        Self {
            options,
            classifier,
            sub_headers: Box::new(NoSubHeaders),
        }
    }

    /// Classify headings with a custom classifier instead of the configured policy.
    pub fn with_classifier(mut self, classifier: impl HeadingClassifier + 'static) -> Self {
        self.classifier = Box::new(classifier);
        self
    }

    /// Set the rule that nests equal-size headings.
    pub fn with_sub_header_rule(mut self, rule: impl SubHeaderRule + 'static) -> Self {
        self.sub_headers = Box::new(rule);
        self
    }

    pub(crate) fn with_boxed_sub_header_rule(mut self, rule: Box<dyn SubHeaderRule>) -> Self {
        self.sub_headers = rule;
        self
    }

    /// Get the options.
    pub fn options(&self) -> &StructureOptions {
        &self.options
    }

    /// Name of the active classifier.
    pub fn classifier_name(&self) -> &str {
        self.classifier.name()
    }

    /// Recover the outline of a document.
    ///
    /// Runs three passes over the source: the first computes the style
    /// profile, the second finds printed page numbers, the third classifies
    /// fragments and builds the tree.
    pub fn structure_document(&self, source: &dyn FragmentSource) -> Result<StructuredDocument> {
        let profile = self.profile(source)?;
        let page_labels = self.page_labels(source);

        let mut skipped = 0;
        let fragments = self.annotate(source, &profile, &mut skipped);
        let mut builder = OutlineBuilder::new(self.sub_headers.as_ref());
        for fragment in fragments {
            self.place(&mut builder, fragment?, &profile);
        }
        let fragment_count = builder.len();
        let sections = builder.finish();

        log::debug!(
            "Structured {}: {} fragments, {} skipped, {} root sections",
            source.uri(),
            fragment_count,
            skipped,
            sections.len()
        );

        let mut document = StructuredDocument::new(source.uri(), sections, profile);
        document.metadata = Metadata {
            policy: self.classifier.name().to_string(),
            analyzed_at: Some(chrono::Utc::now()),
            fragment_count,
            skipped_count: skipped,
            page_labels,
            ..Default::default()
        };
        Ok(document)
    }

    /// Build the section tree from annotated fragments.
    ///
    /// Fragments are consumed in order; the returned roots preserve it.
    pub fn create_hierarchy<I>(&self, fragments: I, profile: &DocumentStyleProfile) -> Vec<Section>
    where
        I: IntoIterator<Item = Fragment>,
    {
        let mut builder = OutlineBuilder::new(self.sub_headers.as_ref());
        for fragment in fragments {
            self.place(&mut builder, fragment, profile);
        }
        builder.finish()
    }

    /// Compute the document style profile (first pass).
    pub fn profile(&self, source: &dyn FragmentSource) -> Result<DocumentStyleProfile> {
        let mut builder = ProfileBuilder::new(self.options.granularity, self.options.clip);
        for raw in source.fragments() {
            if self.options.pages.includes_index(raw.page_index) {
                builder.add(&raw);
            }
        }
        builder.finish()
    }

    /// Printed page numbers of the selected pages, by 0-based page index.
    ///
    /// Clipped headers and footers are scanned too.
    pub fn page_labels(&self, source: &dyn FragmentSource) -> BTreeMap<u32, u32> {
        let mut labeler = PageLabeler::new(self.options.clip);
        for raw in source.fragments() {
            if self.options.pages.includes_index(raw.page_index) {
                labeler.add(&raw);
            }
        }
        labeler.finish()
    }

    /// Annotated fragments that take part in classification.
    ///
    /// Fragments outside the page selection or the clip, and fragments that
    /// fail with a recoverable error (no style samples), are skipped and
    /// counted in `skipped`. Any other error is passed through.
    pub fn annotate<'a>(
        &'a self,
        source: &'a dyn FragmentSource,
        profile: &'a DocumentStyleProfile,
        skipped: &'a mut usize,
    ) -> impl Iterator<Item = Result<Fragment>> + 'a {
        let annotator = StyleAnnotator::new(self.options.granularity, self.options.trim_text);
        source.fragments().filter_map(move |raw| {
            if !self.accepts(&raw) {
                *skipped += 1;
                return None;
            }
            let fragment = annotator.annotate(raw).map(|mut fragment| {
                if fragment.page_bbox.is_empty() {
                    log::warn!(
                        "Fragment {:?} on page {} has no page box, using document page size",
                        fragment.text,
                        fragment.page_index
                    );
                    fragment.page_bbox = profile.page_bbox();
                }
                fragment
            });
            skip_recoverable(fragment, skipped)
        })
    }

    fn accepts(&self, raw: &RawFragment) -> bool {
        self.options.pages.includes_index(raw.page_index) && self.options.clip.contains(raw)
    }

    fn place(&self, builder: &mut OutlineBuilder<'_>, fragment: Fragment, profile: &DocumentStyleProfile) {
        if self.classifier.is_heading(&fragment, profile) {
            log::trace!("heading {:?} ({}pt)", fragment.text, fragment.size());
            builder.push_heading(fragment);
        } else {
            log::trace!("content {:?}", fragment.text);
            builder.push_content(fragment);
        }
    }
}

impl Default for HierarchyParser {
    fn default() -> Self {
        Self::new(StructureOptions::default())
    }
}

/// Drop fragments that failed with a recoverable error, counting them.
fn skip_recoverable(result: Result<Fragment>, skipped: &mut usize) -> Option<Result<Fragment>> {
    match result {
        Err(e) if e.is_recoverable() => {
            log::debug!("Skipping fragment: {}", e);
            *skipped += 1;
            None
        }
        other => Some(other),
    }
}

struct Node {
    section: Section,
    parent: Option<usize>,
}

/// Per-run tree state: an arena of sections plus the stack of open headings.
struct OutlineBuilder<'r> {
    nodes: Vec<Node>,
    stack: Vec<usize>,
    last_root: Option<usize>,
    sub_headers: &'r dyn SubHeaderRule,
}

impl<'r> OutlineBuilder<'r> {
    fn new(sub_headers: &'r dyn SubHeaderRule) -> Self {
        Self {
            nodes: Vec::new(),
            stack: Vec::new(),
            last_root: None,
            sub_headers,
        }
    }

    /// Number of fragments placed (dangling containers excluded).
    fn len(&self) -> usize {
        self.nodes.iter().filter(|n| !n.section.is_dangling()).count()
    }

    fn push_heading(&mut self, fragment: Fragment) {
        let size = fragment.size();
        let index = self.nodes.len();
        self.nodes.push(Node {
            section: Section::heading(fragment, 0),
            parent: None,
        });

        if let Some(&top) = self.stack.last() {
            if self.size(top) <= size {
                self.pop_until_match(index, size);
            }
        }

        self.attach_to_top(index);
        self.stack.push(index);
        log::trace!("stack depth {}", self.stack.len());
    }

    fn pop_until_match(&mut self, candidate: usize, size: f32) {
        while let Some(&top) = self.stack.last() {
            let section = &self.nodes[top].section;
            if !section.heading_text.is_empty() && section.size() > size {
                break;
            }
            self.stack.pop();
            if self.size(top) == size
                && self
                    .sub_headers
                    .is_sub_header(&self.nodes[top].section, &self.nodes[candidate].section)
            {
                self.stack.push(top);
                return;
            }
        }
    }

    fn push_content(&mut self, fragment: Fragment) {
        let parent = match (self.stack.last(), self.last_root) {
            (Some(&top), _) => top,
            (None, Some(root)) if self.nodes[root].section.is_dangling() => root,
            (None, _) => {
                let container = self.nodes.len();
                self.nodes.push(Node {
                    section: Section::dangling(0),
                    parent: None,
                });
                self.last_root = Some(container);
                container
            }
        };

        let index = self.nodes.len();
        self.nodes.push(Node {
            section: Section::content(fragment, 0),
            parent: None,
        });
        self.attach(index, parent);
    }

    fn attach_to_top(&mut self, index: usize) {
        match self.stack.last() {
            Some(&parent) => {
                debug_assert_eq!(self.nodes[parent].section.level as usize, self.stack.len() - 1);
                self.attach(index, parent);
            }
            None => self.last_root = Some(index),
        }
    }

    fn attach(&mut self, index: usize, parent: usize) {
        debug_assert!(parent < index);
        debug_assert!(!self.nodes[parent].section.is_content());
        self.nodes[index].section.level = self.nodes[parent].section.level + 1;
        self.nodes[index].parent = Some(parent);
    }

    fn size(&self, index: usize) -> f32 {
        self.nodes[index].section.size()
    }

    /// Materialise the arena into an owned tree.
    ///
    /// Parents always precede their children in the arena, so draining it
    /// from the back completes every subtree before its parent is reached.
    fn finish(mut self) -> Vec<Section> {
        let mut children: Vec<Vec<Section>> = self.nodes.iter().map(|_| Vec::new()).collect();
        let mut roots = Vec::new();

        while let Some(node) = self.nodes.pop() {
            let index = self.nodes.len();
            let mut section = node.section;
            section.children = std::mem::take(&mut children[index]);
            section.children.reverse();
            match node.parent {
                Some(parent) => children[parent].push(section),
                None => roots.push(section),
            }
        }

        roots.reverse();
        roots
    }
}

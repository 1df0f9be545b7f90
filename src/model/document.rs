//! Document-level types.

use super::{DocumentStyleProfile, Section};
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A document with its recovered outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredDocument {
    /// Where the fragment stream came from
    pub uri: String,

    /// Root sections in reading order
    pub sections: Vec<Section>,

    /// Style baseline used for classification
    pub profile: DocumentStyleProfile,

    /// Document metadata
    #[serde(default)]
    pub metadata: Metadata,
}

impl StructuredDocument {
    /// Create a new document.
    pub fn new(uri: impl Into<String>, sections: Vec<Section>, profile: DocumentStyleProfile) -> Self {
        Self {
            uri: uri.into(),
            sections,
            profile,
            metadata: Metadata::default(),
        }
    }

    /// Reconstruct a document from its JSON form.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Get the title, if one was recorded.
    pub fn title(&self) -> Option<&str> {
        self.metadata.get("title")
    }

    /// Set a metadata entry.
    pub fn update_metadata(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.metadata.entries.insert(key.into(), value.into());
    }

    /// Heading texts of all root sections, one per line.
    pub fn text(&self) -> String {
        self.sections
            .iter()
            .map(|s| s.full_content())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// All sections in depth-first order.
    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections
            .iter()
            .flat_map(|root| std::iter::once(root).chain(root.descendants()))
    }

    /// All headings in depth-first order.
    pub fn headings(&self) -> impl Iterator<Item = &Section> {
        self.iter().filter(|s| s.is_heading())
    }

    /// Number of headings in the outline.
    pub fn heading_count(&self) -> usize {
        self.headings().count()
    }

    /// Check if the outline is empty.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Document metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Name of the policy that classified the headings
    pub policy: String,

    /// When the outline was built
    pub analyzed_at: Option<DateTime<Utc>>,

    /// Number of fragments placed in the tree
    pub fragment_count: usize,

    /// Number of fragments skipped (no style samples, outside clip or page selection)
    pub skipped_count: usize,

    /// Printed page number by 0-based page index, where one was found
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub page_labels: BTreeMap<u32, u32>,

    /// Free-form entries
    #[serde(default)]
    pub entries: BTreeMap<String, String>,
}

impl Metadata {
    /// Get a free-form entry.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Convert metadata to YAML frontmatter format.
    pub fn to_yaml_frontmatter(&self, uri: &str) -> String {
        let mut lines = vec!["---".to_string()];

        if let Some(title) = self.get("title") {
            lines.push(format!("title: \"{}\"", escape_yaml(title)));
        }
        lines.push(format!("source: \"{}\"", escape_yaml(uri)));
        if !self.policy.is_empty() {
            lines.push(format!("policy: \"{}\"", escape_yaml(&self.policy)));
        }
        if let Some(ref analyzed) = self.analyzed_at {
            lines.push(format!("analyzed: {}", analyzed.to_rfc3339()));
        }
        for (key, value) in self.entries.iter().filter(|(k, _)| k.as_str() != "title") {
            lines.push(format!("{}: \"{}\"", key, escape_yaml(value)));
        }

        lines.push("---".to_string());
        lines.push(String::new());

        lines.join("\n")
    }
}

/// Escape special characters for YAML strings.
fn escape_yaml(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

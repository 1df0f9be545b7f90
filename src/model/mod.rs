//! Document model types.
//!
//! This module defines the fragment stream the engine consumes and the
//! section tree it produces. The model is decoder-agnostic: anything that
//! can report styled text with bounding boxes can feed it.

mod document;
mod fragment;
mod section;
mod style;

pub use document::{Metadata, StructuredDocument};
pub use fragment::{Fragment, RawFragment};
pub use section::{Descendants, Section, SectionLabel};
pub use style::{DocumentStyleProfile, StyleDescriptor, StyleSample};

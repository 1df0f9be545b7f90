//! Style analysis: per-fragment descriptors, the document profile and
//! printed page numbers.

mod pages;
mod profile;
mod style;

pub use pages::{page_labels, PageLabeler};
pub use profile::{build_profile, ProfileBuilder};
pub use style::{SizeGranularity, StyleAnnotator, StyleDescriptorBuilder};

//! Outline inference from positioned text.
//!
//! The stages run strictly in order and never modify their input:
//!
//! 1. `profile` estimates the body font size of the document.
//! 2. `features` turns each non-empty block into a [`FeatureRecord`].
//! 3. `classifier` labels each record as a heading level or paragraph.
//! 4. `builder` extracts the title and reconciles the heading hierarchy.

mod builder;
mod classifier;
mod features;
mod options;
mod pipeline;
mod profile;

pub use builder::{build_outline, is_toc_entry, OpenHeadings, OutlineBuilder};
pub use classifier::{Classification, HeadingClassifier, Label, Rule, RuleFn, RULES};
pub use features::{block_text, is_all_caps, numbering_depth, FeatureExtractor, FeatureRecord};
pub use options::ClassifierConfig;
pub use pipeline::{extract_outline, OutlineExtractor};
pub use profile::{body_font_size, FontStatistics, DEFAULT_BODY_SIZE};

//! Outline reconciliation.
//!
//! Turns the classifier's raw, locally-inconsistent heading guesses into an
//! [`OutlineResult`]: pulls the title off the first page, discards
//! table-of-contents lines, and drops headings whose parent level is not
//! open so the outline always nests properly.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use super::classifier::Classification;
use crate::model::{HeadingLevel, OutlineEntry, OutlineResult};

/// Dotted leader followed by a page number at the end of the text.
static TOC_LEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.{3,}\s*\d+$").expect("valid leader pattern"));

/// Whether the text looks like a table-of-contents line (`Intro ..... 4`).
pub fn is_toc_entry(text: &str) -> bool {
    TOC_LEADER.is_match(text)
}

/// Which heading levels currently have an open ancestor.
///
/// H4 has no children, so its state is never tracked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpenHeadings {
    h1: bool,
    h2: bool,
    h3: bool,
}

impl OpenHeadings {
    /// Try to admit a heading at `level`.
    ///
    /// Returns the updated state and whether the heading is kept. Opening a
    /// level closes every level below it; a heading whose parent level is
    /// closed is rejected and leaves the state unchanged.
    pub fn admit(self, level: HeadingLevel) -> (Self, bool) {
        match level {
            HeadingLevel::H1 => (
                Self {
                    h1: true,
                    h2: false,
                    h3: false,
                },
                true,
            ),
            HeadingLevel::H2 if self.h1 => (
                Self {
                    h2: true,
                    h3: false,
                    ..self
                },
                true,
            ),
            HeadingLevel::H3 if self.h2 => (Self { h3: true, ..self }, true),
            HeadingLevel::H4 if self.h3 => (self, true),
            _ => (self, false),
        }
    }
}

/// Builds the final outline for one document.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutlineBuilder;

impl OutlineBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self
    }

    /// Build the outline from a document's classifications, in document order.
    pub fn build(&self, classifications: &[Classification]) -> OutlineResult {
        let (title, remaining) = self.extract_title(classifications);
        let headings = self.drop_toc_entries(remaining);
        let outline = self.reconcile(&headings);

        OutlineResult { title, outline }
    }

    /// Join all first-page H1s into the title and remove their blocks.
    ///
    /// Every classification whose block id matches a title block is removed,
    /// since a title block often yields several heading-like pieces.
    pub fn extract_title<'a>(
        &self,
        classifications: &'a [Classification],
    ) -> (String, Vec<&'a Classification>) {
        let title_parts: Vec<&Classification> = classifications
            .iter()
            .filter(|c| c.page_num() == 0 && c.level == HeadingLevel::H1)
            .collect();

        if title_parts.is_empty() {
            return (String::new(), classifications.iter().collect());
        }

        let title = title_parts
            .iter()
            .map(|c| c.text())
            .collect::<Vec<_>>()
            .join(" ");
        let title_blocks: HashSet<i64> = title_parts.iter().map(|c| c.block_num()).collect();

        let remaining = classifications
            .iter()
            .filter(|c| !title_blocks.contains(&c.block_num()))
            .collect();

        (title, remaining)
    }

    /// Remove table-of-contents lines.
    pub fn drop_toc_entries<'a>(
        &self,
        classifications: Vec<&'a Classification>,
    ) -> Vec<&'a Classification> {
        let before = classifications.len();
        let kept: Vec<&Classification> = classifications
            .into_iter()
            .filter(|c| !is_toc_entry(c.text()))
            .collect();

        if kept.len() < before {
            log::debug!("Dropped {} table-of-contents lines", before - kept.len());
        }
        kept
    }

    /// Keep only headings with an open parent, converting pages to 1-based.
    pub fn reconcile(&self, classifications: &[&Classification]) -> Vec<OutlineEntry> {
        let (_, outline) = classifications.iter().fold(
            (OpenHeadings::default(), Vec::new()),
            |(open, mut outline), c| {
                let (open, kept) = open.admit(c.level);
                if kept {
                    outline.push(OutlineEntry::new(c.level, c.text(), c.page_num() + 1));
                } else {
                    log::debug!("Dropped orphan {} heading {:?}", c.level, c.text());
                }
                (open, outline)
            },
        );
        outline
    }
}

/// Build the outline with the default builder.
pub fn build_outline(classifications: &[Classification]) -> OutlineResult {
    OutlineBuilder::new().build(classifications)
}

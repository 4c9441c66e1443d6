//! Per-block feature extraction.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::model::{DocumentLayout, PageLayout, TextBlock};

/// Leading outline number followed by whitespace, e.g. `3 ` or `2.1 `.
static NUMBERING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+(?:\.\d+)*)\s").expect("valid numbering pattern"));

/// Marker searched (case-insensitively) in font descriptors to detect bold text.
const BOLD_MARKER: &str = "bold";

/// Fraction of the page width a block midpoint may stray from the page
/// centre and still count as centred.
const CENTER_TOLERANCE: f32 = 0.1;

/// Typographic and textual features of one text block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    /// Block text: all span texts joined by a space, trimmed
    pub text: String,
    /// Zero-based page index
    pub page_num: u32,
    /// Parser block id (-1 when unavailable)
    pub block_num: i64,
    /// Size of the block's first span
    pub font_size: f32,
    /// `font_size / body_size`, or 1.0 when the body size is not positive
    pub relative_size: f32,
    /// First span's font descriptor contains the bold marker
    pub is_bold: bool,
    /// Whitespace-separated token count
    pub word_count: usize,
    /// No lowercase letters and at least one cased letter
    pub is_all_caps: bool,
    /// Text ends with '.'
    pub ends_with_period: bool,
    /// Left edge of the block
    pub indent: f32,
    /// Block midpoint lies near the horizontal page centre
    pub is_centered: bool,
    /// Dot-separated groups in a leading outline number, 0 if none
    pub numbering_depth: usize,
}

/// Turns positioned blocks into [`FeatureRecord`]s, in reading order.
#[derive(Debug, Clone, Copy)]
pub struct FeatureExtractor {
    body_size: f32,
}

impl FeatureExtractor {
    /// Create an extractor anchored to the document's body font size.
    pub fn new(body_size: f32) -> Self {
        Self { body_size }
    }

    /// Body font size used for relative sizes.
    pub fn body_size(&self) -> f32 {
        self.body_size
    }

    /// Extract records for every non-empty block of every page.
    ///
    /// Pages are visited in order; within a page blocks are stably sorted by
    /// the top edge of their bounding box.
    pub fn extract(&self, layout: &DocumentLayout) -> Vec<FeatureRecord> {
        layout
            .pages
            .iter()
            .flat_map(|page| self.extract_page(page))
            .collect()
    }

    /// Extract records for one page.
    pub fn extract_page(&self, page: &PageLayout) -> Vec<FeatureRecord> {
        let mut blocks: Vec<&TextBlock> = page.blocks.iter().collect();
        blocks.sort_by(|a, b| a.bbox.y0.total_cmp(&b.bbox.y0));

        blocks
            .into_iter()
            .filter_map(|block| self.extract_block(page, block))
            .collect()
    }

    /// Extract the record for one block; `None` when the block has no text.
    pub fn extract_block(&self, page: &PageLayout, block: &TextBlock) -> Option<FeatureRecord> {
        let text = block_text(block);
        if text.is_empty() {
            return None;
        }

        // Typography comes from the leading span only.
        let first = block
            .lines
            .first()
            .and_then(|line| line.spans.first())
            .or_else(|| block.spans().next())?;

        let relative_size = if self.body_size > 0.0 {
            first.font_size / self.body_size
        } else {
            1.0
        };

        Some(FeatureRecord {
            page_num: page.index,
            block_num: block.number,
            font_size: first.font_size,
            relative_size,
            is_bold: first.font_name.to_lowercase().contains(BOLD_MARKER),
            word_count: text.split_whitespace().count(),
            is_all_caps: is_all_caps(&text),
            ends_with_period: text.ends_with('.'),
            indent: block.bbox.x0,
            is_centered: is_centered(block, page.width),
            numbering_depth: numbering_depth(&text),
            text,
        })
    }
}

/// Concatenate span texts with single spaces and trim the result.
pub fn block_text(block: &TextBlock) -> String {
    block
        .spans()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// Depth of a leading outline number: `"2.1.3 Scope"` is 3, `"Scope"` is 0.
pub fn numbering_depth(text: &str) -> usize {
    NUMBERING
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map_or(0, |m| m.as_str().split('.').count())
}

/// True when the text has a cased character and no lowercase ones.
pub fn is_all_caps(text: &str) -> bool {
    let mut has_cased = false;
    for c in text.chars() {
        if c.is_lowercase() {
            return false;
        }
        has_cased |= c.is_uppercase();
    }
    has_cased
}

fn is_centered(block: &TextBlock, page_width: f32) -> bool {
    (block.bbox.center_x() - page_width / 2.0).abs() < page_width * CENTER_TOLERANCE
}

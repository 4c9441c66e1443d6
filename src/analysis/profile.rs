//! Style profiling: estimating the body-text font size of a document.

use crate::model::{DocumentLayout, Span};

/// Body size assumed when a document has no visible text.
pub const DEFAULT_BODY_SIZE: f32 = 10.0;

/// Character-weighted font size histogram for one document.
///
/// Sizes are rounded to whole points (ties to even). Buckets are kept in
/// first-seen order so that the mode is stable: on equal character counts
/// the size encountered first in document order wins.
#[derive(Debug, Clone, Default)]
pub struct FontStatistics {
    histogram: Vec<(i64, usize)>,
}

impl FontStatistics {
    /// Create an empty histogram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the histogram from spans in document order.
    pub fn from_spans<'a, I>(spans: I) -> Self
    where
        I: IntoIterator<Item = &'a Span>,
    {
        let mut stats = Self::new();
        for span in spans {
            stats.add(span.font_size, &span.text);
        }
        stats
    }

    /// Record one span's font size, weighted by its trimmed character count.
    pub fn add(&mut self, font_size: f32, text: &str) {
        let chars = text.trim().chars().count();
        if chars == 0 || !font_size.is_finite() {
            return;
        }

        let key = font_size.round_ties_even() as i64;
        match self.histogram.iter_mut().find(|(size, _)| *size == key) {
            Some((_, count)) => *count += chars,
            None => self.histogram.push((key, chars)),
        }
    }

    /// Total characters recorded.
    pub fn total_chars(&self) -> usize {
        self.histogram.iter().map(|(_, count)| count).sum()
    }

    /// Number of distinct rounded sizes seen.
    pub fn distinct_sizes(&self) -> usize {
        self.histogram.len()
    }

    /// The dominant size, or [`DEFAULT_BODY_SIZE`] when nothing was recorded.
    pub fn body_size(&self) -> f32 {
        let mut best: Option<(i64, usize)> = None;
        for &(size, count) in &self.histogram {
            if best.map_or(true, |(_, best_count)| count > best_count) {
                best = Some((size, count));
            }
        }
        best.map_or(DEFAULT_BODY_SIZE, |(size, _)| size as f32)
    }
}

/// Estimate the body font size of a document.
pub fn body_font_size(layout: &DocumentLayout) -> f32 {
    let stats = FontStatistics::from_spans(layout.spans());
    let body_size = stats.body_size();
    log::debug!(
        "Body size {} from {} chars over {} distinct sizes",
        body_size,
        stats.total_chars(),
        stats.distinct_sizes()
    );
    body_size
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BoundingBox, Line, PageLayout, TextBlock};

    #[test]
    fn test_empty_histogram_defaults() {
        let stats = FontStatistics::new();
        assert_eq!(stats.body_size(), DEFAULT_BODY_SIZE);
        assert_eq!(body_font_size(&DocumentLayout::new()), 10.0);
    }

    #[test]
    fn test_mode_weighted_by_characters() {
        let mut stats = FontStatistics::new();
        stats.add(18.0, "A Big Title");
        stats.add(11.2, "short");
        stats.add(10.8, "and a much longer line of body text");

        // 11.2 and 10.8 both round to 11
        assert_eq!(stats.body_size(), 11.0);
        assert_eq!(stats.distinct_sizes(), 2);
    }

    #[test]
    fn test_whitespace_only_text_ignored() {
        let mut stats = FontStatistics::new();
        stats.add(24.0, "   ");
        stats.add(9.0, "x");
        assert_eq!(stats.body_size(), 9.0);
        assert_eq!(stats.total_chars(), 1);
    }

    #[test]
    fn test_tie_keeps_first_seen_size() {
        let mut stats = FontStatistics::new();
        stats.add(14.0, "abcd");
        stats.add(10.0, "wxyz");
        assert_eq!(stats.body_size(), 14.0);
    }

    #[test]
    fn test_rounding_ties_to_even() {
        let mut stats = FontStatistics::new();
        stats.add(10.5, "abc");
        assert_eq!(stats.body_size(), 10.0);

        let mut stats = FontStatistics::new();
        stats.add(11.5, "abc");
        assert_eq!(stats.body_size(), 12.0);
    }

    #[test]
    fn test_counts_across_pages() {
        let mut layout = DocumentLayout::new();
        for (index, (size, text)) in [(12.0, "aaaa"), (9.0, "bbb"), (9.0, "ccc")]
            .into_iter()
            .enumerate()
        {
            let mut page = PageLayout::letter(index as u32);
            let bbox = BoundingBox::new(72.0, 72.0, 200.0, 84.0);
            page.add_block(TextBlock::from_lines(
                0,
                vec![Line::new(vec![Span::new(text, bbox, size, "Times-Roman")])],
            ));
            layout.add_page(page);
        }

        assert_eq!(body_font_size(&layout), 9.0);
    }
}

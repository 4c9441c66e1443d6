//! The per-document inference pipeline.

use rayon::prelude::*;

use super::builder::OutlineBuilder;
use super::classifier::{Classification, HeadingClassifier};
use super::features::{FeatureExtractor, FeatureRecord};
use super::options::ClassifierConfig;
use super::profile::body_font_size;
use crate::model::{DocumentLayout, OutlineResult};

/// Runs profile → features → classification → outline for a document.
///
/// Holds configuration only; every call works on its own document and
/// shares nothing with other calls.
#[derive(Debug, Clone, Default)]
pub struct OutlineExtractor {
    classifier: HeadingClassifier,
    builder: OutlineBuilder,
}

impl OutlineExtractor {
    /// Create an extractor with the given classifier thresholds.
    pub fn new(config: ClassifierConfig) -> Self {
        Self {
            classifier: HeadingClassifier::new(config),
            builder: OutlineBuilder::new(),
        }
    }

    /// Feature records of a document, in reading order.
    pub fn features(&self, layout: &DocumentLayout) -> Vec<FeatureRecord> {
        FeatureExtractor::new(body_font_size(layout)).extract(layout)
    }

    /// Accepted heading classifications of a document, in reading order.
    pub fn classify(&self, layout: &DocumentLayout) -> Vec<Classification> {
        self.classifier.classify_all(&self.features(layout))
    }

    /// Infer the title and outline of a document.
    pub fn extract(&self, layout: &DocumentLayout) -> OutlineResult {
        let result = self.builder.build(&self.classify(layout));
        log::debug!(
            "Outline has {} entries, title {:?}",
            result.outline.len(),
            result.title
        );
        result
    }

    /// Infer outlines for independent documents in parallel.
    ///
    /// Results are returned in input order.
    pub fn extract_many(&self, layouts: &[DocumentLayout]) -> Vec<OutlineResult> {
        layouts.par_iter().map(|layout| self.extract(layout)).collect()
    }
}

/// Infer the outline of a document with default thresholds.
pub fn extract_outline(layout: &DocumentLayout) -> OutlineResult {
    OutlineExtractor::default().extract(layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BoundingBox, HeadingLevel, Line, PageLayout, Span, TextBlock};

    fn block(number: i64, y0: f32, text: &str, size: f32, font: &str) -> TextBlock {
        let bbox = BoundingBox::new(72.0, y0, 400.0, y0 + size);
        TextBlock::from_lines(number, vec![Line::new(vec![Span::new(text, bbox, size, font)])])
    }

    fn body(number: i64, y0: f32) -> TextBlock {
        block(
            number,
            y0,
            "Body text that runs long enough to dominate the character count of the page",
            10.0,
            "Times-Roman",
        )
    }

    #[test]
    fn test_empty_document() {
        let result = extract_outline(&DocumentLayout::new());
        assert_eq!(result.title, "");
        assert!(result.outline.is_empty());
    }

    #[test]
    fn test_end_to_end_layout() {
        let mut layout = DocumentLayout::new();

        let mut first = PageLayout::letter(0);
        first.add_block(body(1, 200.0));
        first.add_block(block(0, 60.0, "Project Charter", 24.0, "Helvetica-Bold"));
        layout.add_page(first);

        let mut second = PageLayout::letter(1);
        second.add_block(block(2, 60.0, "1 Goals", 14.0, "Helvetica-Bold"));
        second.add_block(body(3, 100.0));
        second.add_block(block(4, 300.0, "1.1 Scope", 12.0, "Helvetica"));
        second.add_block(block(5, 400.0, "Contents ..... 2", 12.0, "Helvetica-Bold"));
        layout.add_page(second);

        let result = extract_outline(&layout);
        assert_eq!(result.title, "Project Charter");

        let outline: Vec<(HeadingLevel, &str, u32)> = result
            .outline
            .iter()
            .map(|e| (e.level, e.text.as_str(), e.page))
            .collect();
        assert_eq!(
            outline,
            vec![
                (HeadingLevel::H1, "1 Goals", 2),
                (HeadingLevel::H2, "1.1 Scope", 2),
            ]
        );
    }

    #[test]
    fn test_extract_many_keeps_order() {
        let mut a = DocumentLayout::new();
        let mut page = PageLayout::letter(0);
        page.add_block(block(0, 10.0, "ALPHA", 10.0, "Arial"));
        a.add_page(page);

        let mut b = DocumentLayout::new();
        let mut page = PageLayout::letter(0);
        page.add_block(block(0, 10.0, "BETA", 10.0, "Arial"));
        b.add_page(page);

        let results = OutlineExtractor::default().extract_many(&[a, b, DocumentLayout::new()]);
        let titles: Vec<&str> = results.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["ALPHA", "BETA", ""]);
    }
}

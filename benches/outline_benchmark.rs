//! Benchmarks for outline inference performance.
//!
//! Run with: cargo bench
//!
//! Layouts are synthetic, so the numbers measure the inference stages
//! without PDF decoding.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use pdfoutline::analysis::{body_font_size, HeadingClassifier, OutlineExtractor};
use pdfoutline::{BoundingBox, DocumentLayout, Line, PageLayout, Span, TextBlock};

const BODY: &str = "Quarterly figures were reconciled against the ledger before the audit began";

fn block(number: i64, y0: f32, text: &str, size: f32, font: &str) -> TextBlock {
    let bbox = BoundingBox::new(72.0, y0, 520.0, y0 + size);
    TextBlock::from_lines(number, vec![Line::new(vec![Span::new(text, bbox, size, font)])])
}

/// A report with a numbered section and subsection on every page.
fn create_test_layout(page_count: u32) -> DocumentLayout {
    let mut layout = DocumentLayout::new();
    let mut number = 0;
    let mut next = || {
        number += 1;
        number
    };

    for index in 0..page_count {
        let mut page = PageLayout::letter(index);
        if index == 0 {
            page.add_block(block(next(), 60.0, "Annual Operations Review", 24.0, "Helvetica-Bold"));
        }
        page.add_block(block(next(), 100.0, &format!("{} Section", index + 1), 14.0, "Helvetica-Bold"));
        for row in 0..12 {
            page.add_block(block(next(), 130.0 + row as f32 * 40.0, BODY, 10.0, "Times-Roman"));
        }
        page.add_block(block(next(), 620.0, &format!("{}.1 Details", index + 1), 12.0, "Times-Roman"));
        page.add_block(block(next(), 660.0, "Introduction ........ 3", 10.0, "Times-Roman"));
        layout.add_page(page);
    }
    layout
}

/// Benchmark the whole pipeline at various document sizes.
fn bench_extract_outline(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_outline");
    let extractor = OutlineExtractor::default();

    for page_count in [1, 10, 100].iter() {
        let layout = create_test_layout(*page_count);

        group.bench_function(format!("{}_pages", page_count), |b| {
            b.iter(|| extractor.extract(black_box(&layout)));
        });
    }

    group.finish();
}

/// Benchmark the individual stages on a mid-sized document.
fn bench_stages(c: &mut Criterion) {
    let layout = create_test_layout(50);
    let extractor = OutlineExtractor::default();
    let records = extractor.features(&layout);
    let classifier = HeadingClassifier::default();

    c.bench_function("body_font_size", |b| {
        b.iter(|| body_font_size(black_box(&layout)));
    });

    c.bench_function("features", |b| {
        b.iter(|| extractor.features(black_box(&layout)));
    });

    c.bench_function("classify_all", |b| {
        b.iter(|| classifier.classify_all(black_box(&records)));
    });
}

/// Benchmark independent documents processed in parallel.
fn bench_extract_many(c: &mut Criterion) {
    let layouts: Vec<DocumentLayout> = (0..16).map(|_| create_test_layout(20)).collect();
    let extractor = OutlineExtractor::default();

    c.bench_function("extract_many_16_docs", |b| {
        b.iter(|| extractor.extract_many(black_box(&layouts)));
    });
}

criterion_group!(benches, bench_extract_outline, bench_stages, bench_extract_many);
criterion_main!(benches);

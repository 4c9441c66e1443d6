//! Content stream interpretation and text grouping.
//!
//! Walks the text operators of a page, positions every shown string with a
//! text matrix, and groups the resulting spans into lines and blocks.
//! Glyph metrics are not read from font programs; widths are approximated
//! from the character count.

use std::collections::HashMap;

use unicode_normalization::UnicodeNormalization;

use super::backend::{ContentOp, PageId, PdfBackend, PdfValue};
use crate::error::Result;
use crate::model::{BoundingBox, Line, PageLayout, Span, TextBlock};

/// Approximate advance of one glyph, as a fraction of the font size.
const GLYPH_WIDTH: f32 = 0.5;
const ASCENT: f32 = 0.8;
const DESCENT: f32 = 0.2;

/// TJ adjustment (thousandths of an em) treated as a word space.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// Used when a page has fewer than two distinct line positions.
const DEFAULT_LINE_SPACING: f32 = 12.0;

/// Builds [`PageLayout`]s from a backend, numbering blocks across pages.
pub struct LayoutBuilder<'a, B: PdfBackend + ?Sized> {
    backend: &'a B,
    next_block: i64,
}

impl<'a, B: PdfBackend + ?Sized> LayoutBuilder<'a, B> {
    /// Create a builder whose first block is numbered 0.
    pub fn new(backend: &'a B) -> Self {
        Self {
            backend,
            next_block: 0,
        }
    }

    /// Number the next block `number` instead of continuing the count.
    pub fn starting_at(mut self, number: i64) -> Self {
        self.next_block = number;
        self
    }

    /// The number the next block will receive.
    pub fn next_block_number(&self) -> i64 {
        self.next_block
    }

    /// Lay out one page. `index` is the zero-based page index.
    pub fn build_page(&mut self, index: u32, page: PageId) -> Result<PageLayout> {
        let (width, height) = self.backend.page_size(page);
        let spans = self.page_spans(page, height)?;
        let lines = group_spans_into_lines(spans);
        let blocks = group_lines_into_blocks(lines, self.next_block);

        self.next_block += blocks.len() as i64;
        log::debug!("Page {}: {} blocks", index + 1, blocks.len());

        Ok(PageLayout {
            index,
            width,
            height,
            blocks,
        })
    }

    /// Positioned spans of a page in content stream order.
    pub fn page_spans(&self, page: PageId, page_height: f32) -> Result<Vec<Span>> {
        let fonts: HashMap<Vec<u8>, String> = self
            .backend
            .page_fonts(page)
            .unwrap_or_else(|e| {
                log::warn!("Font resources of page {:?} unreadable: {}", page, e);
                Vec::new()
            })
            .into_iter()
            .map(|f| (f.name, f.base_font))
            .collect();

        let content = self.backend.page_content(page)?;
        let ops = self.backend.decode_content(&content)?;

        let mut state = TextState::new(page_height);
        for op in &ops {
            self.apply(&mut state, page, &fonts, op);
        }
        Ok(state.spans)
    }

    fn apply(
        &self,
        state: &mut TextState,
        page: PageId,
        fonts: &HashMap<Vec<u8>, String>,
        op: &ContentOp,
    ) {
        match op.operator.as_str() {
            "BT" => {
                state.in_text = true;
                state.line = TextMatrix::default();
                state.text = TextMatrix::default();
            }
            "ET" => state.in_text = false,
            "Tf" => {
                if let Some(PdfValue::Name(key)) = op.operands.first() {
                    state.font_name = fonts
                        .get(key)
                        .cloned()
                        .unwrap_or_else(|| String::from_utf8_lossy(key).to_string());
                    state.font_key = key.clone();
                }
                if let Some(size) = op.number(1) {
                    state.font_size = size;
                }
            }
            "TL" => {
                if let Some(leading) = op.number(0) {
                    state.leading = leading;
                }
            }
            "Td" => {
                if let (Some(tx), Some(ty)) = (op.number(0), op.number(1)) {
                    state.move_line(tx, ty);
                }
            }
            "TD" => {
                if let (Some(tx), Some(ty)) = (op.number(0), op.number(1)) {
                    state.leading = -ty;
                    state.move_line(tx, ty);
                }
            }
            "Tm" => {
                let m: Vec<f32> = (0..6).filter_map(|i| op.number(i)).collect();
                if let [a, b, c, d, e, f] = m[..] {
                    state.line = TextMatrix { a, b, c, d, e, f };
                    state.text = state.line;
                }
            }
            "T*" => state.next_line(),
            "Tj" if state.in_text => {
                if let Some(PdfValue::Str(bytes)) = op.operands.first() {
                    let text = self.backend.decode_text(page, &state.font_key, bytes);
                    state.show(&text, 0.0);
                }
            }
            "TJ" if state.in_text => {
                if let Some(PdfValue::Array(items)) = op.operands.first() {
                    let (text, adjustment) = self.combine_tj(page, &state.font_key, items);
                    state.show(&text, adjustment);
                }
            }
            "'" | "\"" => {
                state.next_line();
                let text_idx = if op.operator == "\"" { 2 } else { 0 };
                if state.in_text {
                    if let Some(PdfValue::Str(bytes)) = op.operands.get(text_idx) {
                        let text = self.backend.decode_text(page, &state.font_key, bytes);
                        state.show(&text, 0.0);
                    }
                }
            }
            _ => {}
        }
    }

    /// Join the strings of a TJ array, inserting spaces at large gaps.
    ///
    /// Returns the text and the summed positioning adjustment in
    /// thousandths of an em (positive moves right).
    fn combine_tj(&self, page: PageId, font_key: &[u8], items: &[PdfValue]) -> (String, f32) {
        let mut combined = String::new();
        let mut adjustment = 0.0;

        for item in items {
            match item {
                PdfValue::Str(bytes) => {
                    combined.push_str(&self.backend.decode_text(page, font_key, bytes));
                }
                other => {
                    let Some(n) = other.as_number() else {
                        continue;
                    };
                    adjustment -= n;
                    if -n > TJ_SPACE_THRESHOLD
                        && !combined.ends_with([' ', '\u{00A0}'])
                        && combined
                            .chars()
                            .last()
                            .is_some_and(|c| !is_spaceless_script_char(c))
                    {
                        combined.push(' ');
                    }
                }
            }
        }

        (combined, adjustment)
    }
}

/// Text state tracked while walking a content stream.
struct TextState {
    page_height: f32,
    in_text: bool,
    line: TextMatrix,
    text: TextMatrix,
    leading: f32,
    font_key: Vec<u8>,
    font_name: String,
    font_size: f32,
    spans: Vec<Span>,
}

impl TextState {
    fn new(page_height: f32) -> Self {
        Self {
            page_height,
            in_text: false,
            line: TextMatrix::default(),
            text: TextMatrix::default(),
            leading: 0.0,
            font_key: Vec::new(),
            font_name: String::new(),
            font_size: 12.0,
            spans: Vec::new(),
        }
    }

    fn move_line(&mut self, tx: f32, ty: f32) {
        self.line = self.line.translated(tx, ty);
        self.text = self.line;
    }

    fn next_line(&mut self) {
        self.move_line(0.0, -self.leading);
    }

    /// Emit a span for `raw` at the current position and advance past it.
    fn show(&mut self, raw: &str, adjustment: f32) {
        let text: String = raw.nfkc().collect();
        let chars = text.chars().count() as f32;
        let advance = chars * GLYPH_WIDTH * self.font_size + adjustment / 1000.0 * self.font_size;

        if !text.trim().is_empty() {
            let (x, y) = self.text.origin();
            let size = self.font_size * self.text.vertical_scale();
            let width = advance.max(0.0) * self.text.horizontal_scale();
            let baseline = self.page_height - y;
            let bbox =
                BoundingBox::new(x, baseline - ASCENT * size, x + width, baseline + DESCENT * size);

            if bbox.is_finite() && size.is_finite() {
                self.spans
                    .push(Span::new(text.trim(), bbox, size, self.font_name.clone()));
            } else {
                log::debug!("Dropping span with non-finite position: {:?}", text.trim());
            }
        }

        self.text = self.text.translated(advance, 0.0);
    }
}

/// Text or line matrix `[a b c d e f]`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }
}

impl TextMatrix {
    fn translated(&self, tx: f32, ty: f32) -> Self {
        Self {
            e: self.e + tx * self.a + ty * self.c,
            f: self.f + tx * self.b + ty * self.d,
            ..*self
        }
    }

    fn origin(&self) -> (f32, f32) {
        (self.e, self.f)
    }

    fn horizontal_scale(&self) -> f32 {
        (self.a * self.a + self.b * self.b).sqrt()
    }

    fn vertical_scale(&self) -> f32 {
        (self.c * self.c + self.d * self.d).sqrt()
    }
}

fn baseline(span: &Span) -> f32 {
    span.bbox.y1 - DESCENT * span.font_size
}

/// Group spans into lines by baseline, top to bottom, each sorted by x.
pub fn group_spans_into_lines(mut spans: Vec<Span>) -> Vec<Line> {
    spans.sort_by(|a, b| {
        baseline(a)
            .total_cmp(&baseline(b))
            .then(a.bbox.x0.total_cmp(&b.bbox.x0))
    });

    let mut lines: Vec<Line> = Vec::new();
    let mut current: Vec<Span> = Vec::new();
    let mut current_baseline = 0.0;

    for span in spans {
        let y = baseline(&span);
        if !current.is_empty() && (y - current_baseline).abs() > span.font_size * 0.5 {
            lines.push(finish_line(std::mem::take(&mut current)));
        }
        if current.is_empty() {
            current_baseline = y;
        }
        current.push(span);
    }

    if !current.is_empty() {
        lines.push(finish_line(current));
    }
    lines
}

fn finish_line(mut spans: Vec<Span>) -> Line {
    spans.sort_by(|a, b| a.bbox.x0.total_cmp(&b.bbox.x0));
    Line::new(spans)
}

/// Position and size of a line used for block breaking.
#[derive(Debug, Clone, Copy)]
struct LineMetrics {
    top: f32,
    left: f32,
    font_size: f32,
}

impl LineMetrics {
    fn of(line: &Line) -> Self {
        let bbox = line.bbox().unwrap_or_default();
        Self {
            top: bbox.y0,
            left: bbox.x0,
            font_size: line.spans.first().map_or(0.0, |s| s.font_size),
        }
    }
}

/// Group consecutive lines into blocks numbered from `first_number`.
pub fn group_lines_into_blocks(lines: Vec<Line>, first_number: i64) -> Vec<TextBlock> {
    let metrics: Vec<LineMetrics> = lines.iter().map(LineMetrics::of).collect();
    let avg_spacing = average_line_spacing(&metrics);

    let mut blocks: Vec<TextBlock> = Vec::new();
    let mut current: Vec<Line> = Vec::new();

    for (i, line) in lines.into_iter().enumerate() {
        if i > 0 && should_break_block(&metrics[i - 1], &metrics[i], avg_spacing) {
            let number = first_number + blocks.len() as i64;
            blocks.push(TextBlock::from_lines(number, std::mem::take(&mut current)));
        }
        current.push(line);
    }

    if !current.is_empty() {
        let number = first_number + blocks.len() as i64;
        blocks.push(TextBlock::from_lines(number, current));
    }
    blocks
}

fn average_line_spacing(metrics: &[LineMetrics]) -> f32 {
    let spacings: Vec<f32> = metrics
        .windows(2)
        .map(|w| (w[1].top - w[0].top).abs())
        .filter(|s| *s > 0.1)
        .collect();

    if spacings.is_empty() {
        return DEFAULT_LINE_SPACING;
    }
    spacings.iter().sum::<f32>() / spacings.len() as f32
}

fn should_break_block(prev: &LineMetrics, curr: &LineMetrics, avg_spacing: f32) -> bool {
    (curr.top - prev.top).abs() > avg_spacing * 1.5
        || (prev.font_size - curr.font_size).abs() > 1.0
        || (prev.left - curr.left).abs() > 20.0
}

/// Scripts written without spaces between words (Chinese, Japanese).
fn is_spaceless_script_char(c: char) -> bool {
    matches!(c as u32,
        0x4E00..=0x9FFF
        | 0x3400..=0x4DBF
        | 0x20000..=0x2EBEF
        | 0x3040..=0x309F
        | 0x30A0..=0x30FF
        | 0x3000..=0x303F)
}

//! Positioned text layout, as produced by the parser.
//!
//! Coordinates are in points with the origin at the top-left corner of the
//! page, so `y` grows downward and sorting by `y0` gives reading order.

use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box `(x0, y0)`-`(x1, y1)`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl BoundingBox {
    /// Create a new bounding box.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Horizontal midpoint.
    pub fn center_x(&self) -> f32 {
        (self.x0 + self.x1) / 2.0
    }

    /// Width of the box.
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    /// Whether every coordinate is a finite number.
    pub fn is_finite(&self) -> bool {
        self.x0.is_finite() && self.y0.is_finite() && self.x1.is_finite() && self.y1.is_finite()
    }

    /// Smallest box covering both `self` and `other`.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    /// Union of all boxes, or `None` for an empty iterator.
    pub fn enclosing<'a, I>(boxes: I) -> Option<BoundingBox>
    where
        I: IntoIterator<Item = &'a BoundingBox>,
    {
        boxes.into_iter().fold(None, |acc, b| match acc {
            Some(acc) => Some(b.union(&acc)),
            None => Some(*b),
        })
    }
}

/// A run of text sharing one font size and font within a line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// The text content
    pub text: String,
    /// Bounding box of the run
    pub bbox: BoundingBox,
    /// Font size in points
    pub font_size: f32,
    /// Font descriptor (e.g., "Helvetica-Bold")
    pub font_name: String,
}

impl Span {
    /// Create a new span.
    pub fn new(
        text: impl Into<String>,
        bbox: BoundingBox,
        font_size: f32,
        font_name: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            bbox,
            font_size,
            font_name: font_name.into(),
        }
    }
}

/// A line of spans, ordered left to right.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    /// Create a line from spans.
    pub fn new(spans: Vec<Span>) -> Self {
        Self { spans }
    }

    /// Bounding box of all spans in the line.
    pub fn bbox(&self) -> Option<BoundingBox> {
        BoundingBox::enclosing(self.spans.iter().map(|s| &s.bbox))
    }
}

/// A contiguous region of text on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    /// Block identifier, unique within its page (-1 when unavailable)
    pub number: i64,
    /// Lines in reading order
    pub lines: Vec<Line>,
    /// Bounding box of the block
    pub bbox: BoundingBox,
}

impl TextBlock {
    /// Create a block whose bounding box covers all of its lines.
    pub fn from_lines(number: i64, lines: Vec<Line>) -> Self {
        let bbox =
            BoundingBox::enclosing(lines.iter().flat_map(|l| l.spans.iter()).map(|s| &s.bbox))
                .unwrap_or_default();
        Self {
            number,
            lines,
            bbox,
        }
    }

    /// All spans of the block, line by line.
    pub fn spans(&self) -> impl Iterator<Item = &Span> {
        self.lines.iter().flat_map(|l| l.spans.iter())
    }
}

/// One page of positioned text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageLayout {
    /// Zero-based page index
    pub index: u32,
    /// Page width in points
    pub width: f32,
    /// Page height in points
    pub height: f32,
    /// Blocks in parser order
    pub blocks: Vec<TextBlock>,
}

impl PageLayout {
    /// Create an empty page with the given dimensions.
    pub fn new(index: u32, width: f32, height: f32) -> Self {
        Self {
            index,
            width,
            height,
            blocks: Vec::new(),
        }
    }

    /// Create an empty page with standard Letter size (8.5 x 11 inches).
    pub fn letter(index: u32) -> Self {
        Self::new(index, 612.0, 792.0)
    }

    /// Add a block to the page.
    pub fn add_block(&mut self, block: TextBlock) {
        self.blocks.push(block);
    }
}

/// Positioned text for a whole document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DocumentLayout {
    pub pages: Vec<PageLayout>,
}

impl DocumentLayout {
    /// Create an empty layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page to the layout.
    pub fn add_page(&mut self, page: PageLayout) {
        self.pages.push(page);
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Whether the layout has no pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Every span in document order (page, block, line).
    pub fn spans(&self) -> impl Iterator<Item = &Span> {
        self.pages
            .iter()
            .flat_map(|p| p.blocks.iter())
            .flat_map(|b| b.spans())
    }
}

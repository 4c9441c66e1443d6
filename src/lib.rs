//! # pdfoutline
//!
//! Heading outline inference for PDF documents.
//!
//! Many PDFs carry no bookmarks. This library reads the positioned text of
//! a document and infers its title and a three-to-four level heading
//! outline from typography alone: font size relative to the body text,
//! bold faces, capitalisation and outline numbering.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfoutline::{extract_outline_file, render};
//!
//! fn main() -> pdfoutline::Result<()> {
//!     let result = extract_outline_file("document.pdf")?;
//!
//!     println!("{}", result.title);
//!     for entry in &result.outline {
//!         println!("{} {} (p. {})", entry.level, entry.text, entry.page);
//!     }
//!
//!     let json = render::to_json(&result, render::JsonFormat::Pretty)?;
//!     println!("{}", json);
//!     Ok(())
//! }
//! ```
//!
//! ## Stages
//!
//! - [`parser`]: PDF pages to blocks, lines and spans
//! - [`analysis`]: body-size profiling, feature extraction, heading
//!   classification and outline reconciliation
//! - [`render`]: JSON output
//! - [`batch`]: directory-to-directory processing with Rayon

pub mod analysis;
pub mod batch;
pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use analysis::{extract_outline, ClassifierConfig, FeatureRecord, OutlineExtractor};
pub use batch::{run_batch, BatchOptions, BatchReport};
pub use error::{Error, Result};
pub use model::{
    BoundingBox, DocumentLayout, HeadingLevel, Line, OutlineEntry, OutlineResult, PageLayout,
    Span, TextBlock,
};
pub use parser::{ErrorMode, ParseOptions, PdfParser};
pub use render::JsonFormat;

use std::path::Path;

/// Options for extracting the outline of one document.
#[derive(Debug, Clone, Default)]
pub struct OutlineOptions {
    /// How the PDF is read
    pub parse: ParseOptions,
    /// Heading classification thresholds
    pub classifier: ClassifierConfig,
}

impl OutlineOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip unreadable pages instead of failing the document.
    pub fn lenient(mut self) -> Self {
        self.parse = self.parse.lenient();
        self
    }

    /// Only read the first `pages` pages.
    pub fn with_max_pages(mut self, pages: usize) -> Self {
        self.parse = self.parse.with_max_pages(pages);
        self
    }

    /// Set parsing options.
    pub fn with_parse_options(mut self, parse: ParseOptions) -> Self {
        self.parse = parse;
        self
    }

    /// Set classifier thresholds.
    pub fn with_classifier(mut self, classifier: ClassifierConfig) -> Self {
        self.classifier = classifier;
        self
    }

    /// Extractor configured with these thresholds.
    pub fn extractor(&self) -> OutlineExtractor {
        OutlineExtractor::new(self.classifier.clone())
    }
}

/// Parse a PDF file into positioned text.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::{parse_file, ParseOptions};
///
/// let layout = parse_file("document.pdf", &ParseOptions::default()).unwrap();
/// println!("Pages: {}", layout.page_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P, options: &ParseOptions) -> Result<DocumentLayout> {
    let parser = PdfParser::open_with_options(path, options.clone())?;
    parser.parse()
}

/// Parse a PDF from bytes into positioned text.
pub fn parse_bytes(data: &[u8], options: &ParseOptions) -> Result<DocumentLayout> {
    let parser = PdfParser::from_bytes_with_options(data, options.clone())?;
    parser.parse()
}

/// Infer the title and outline of a PDF file with default options.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::extract_outline_file;
///
/// let result = extract_outline_file("document.pdf").unwrap();
/// println!("{} headings", result.outline.len());
/// ```
pub fn extract_outline_file<P: AsRef<Path>>(path: P) -> Result<OutlineResult> {
    extract_outline_file_with_options(path, &OutlineOptions::default())
}

/// Infer the title and outline of a PDF file.
pub fn extract_outline_file_with_options<P: AsRef<Path>>(
    path: P,
    options: &OutlineOptions,
) -> Result<OutlineResult> {
    let layout = parse_file(path, &options.parse)?;
    Ok(options.extractor().extract(&layout))
}

/// Infer the title and outline of a PDF held in memory.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::extract_outline_bytes;
///
/// let data = std::fs::read("document.pdf").unwrap();
/// let result = extract_outline_bytes(&data).unwrap();
/// ```
pub fn extract_outline_bytes(data: &[u8]) -> Result<OutlineResult> {
    extract_outline_bytes_with_options(data, &OutlineOptions::default())
}

/// Infer the title and outline of a PDF held in memory, with options.
pub fn extract_outline_bytes_with_options(
    data: &[u8],
    options: &OutlineOptions,
) -> Result<OutlineResult> {
    let layout = parse_bytes(data, &options.parse)?;
    Ok(options.extractor().extract(&layout))
}

//! PDF document parser using lopdf.

use std::io::Read;
use std::path::Path;

use crate::detect::{sniff_file, sniff_version};
use crate::error::{Error, Result};
use crate::model::{DocumentLayout, PageLayout};

use super::backend::{LopdfBackend, PdfBackend};
use super::layout::LayoutBuilder;
use super::options::{ErrorMode, ParseOptions};

/// PDF document parser producing positioned text layouts.
pub struct PdfParser {
    backend: LopdfBackend,
    options: ParseOptions,
}

impl PdfParser {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a PDF file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let path = path.as_ref();
        sniff_file(path)?;

        let backend = LopdfBackend::load_file(path)?;
        Ok(Self { backend, options })
    }

    /// Parse a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Parse a PDF from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        sniff_version(data)?;

        let backend = LopdfBackend::load_bytes(data)?;
        Ok(Self { backend, options })
    }

    /// Parse a PDF from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    /// Lay out every page of the document.
    pub fn parse(&self) -> Result<DocumentLayout> {
        parse_layout(&self.backend, &self.options)
    }

    /// Lay out a single page by zero-based index.
    pub fn parse_page(&self, index: u32) -> Result<PageLayout> {
        let pages = self.backend.pages();
        let page_id = pages
            .values()
            .nth(index as usize)
            .copied()
            .ok_or(Error::PageOutOfRange(index + 1, pages.len() as u32))?;

        LayoutBuilder::new(&self.backend).build_page(index, page_id)
    }

    /// Get the number of pages.
    pub fn page_count(&self) -> u32 {
        self.backend.pages().len() as u32
    }

    /// Get the PDF version.
    pub fn version(&self) -> String {
        self.backend.version()
    }
}

/// Lay out the pages of any backend according to `options`.
///
/// Pages are indexed in page-tree order starting at 0. In lenient mode a
/// page that fails to lay out is skipped with a warning; its index is not
/// reused.
pub fn parse_layout<B: PdfBackend + ?Sized>(
    backend: &B,
    options: &ParseOptions,
) -> Result<DocumentLayout> {
    let pages = backend.pages();
    let limit = options.max_pages.unwrap_or(usize::MAX);
    let mut builder = LayoutBuilder::new(backend);
    let mut layout = DocumentLayout::new();

    for (index, (&page_num, &page_id)) in pages.iter().enumerate().take(limit) {
        match builder.build_page(index as u32, page_id) {
            Ok(page) => layout.add_page(page),
            Err(e) if options.error_mode == ErrorMode::Lenient => {
                log::warn!("Skipping page {}: {}", page_num, e);
            }
            Err(e) => return Err(e),
        }
    }

    log::debug!(
        "Parsed {} of {} pages, {} blocks",
        layout.page_count(),
        pages.len(),
        builder.next_block_number()
    );
    Ok(layout)
}

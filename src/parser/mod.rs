//! PDF parsing module.
//!
//! Produces a [`DocumentLayout`](crate::model::DocumentLayout) of blocks,
//! lines and spans from a PDF file.

mod backend;
mod layout;
mod options;
mod pdf_parser;

pub use backend::{
    decode_text_simple, BackendFontInfo, ContentOp, LopdfBackend, PageId, PdfBackend, PdfValue,
    DEFAULT_PAGE_SIZE,
};
pub use layout::{group_lines_into_blocks, group_spans_into_lines, LayoutBuilder};
pub use options::{ErrorMode, ParseOptions};
pub use pdf_parser::{parse_layout, PdfParser};

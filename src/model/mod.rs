//! Document model types.
//!
//! `layout` is the parser boundary: pages of blocks of lines of spans.
//! `outline` is the output boundary: a title plus ordered headings.

mod layout;
mod outline;

pub use layout::{BoundingBox, DocumentLayout, Line, PageLayout, Span, TextBlock};
pub use outline::{HeadingLevel, OutlineEntry, OutlineResult};

//! PDF input sniffing.
//!
//! Cheap checks run before a document is handed to the PDF backend, so that
//! stray non-PDF files in a batch fail fast with [`Error::UnknownFormat`].

use crate::error::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
const VERSION_LEN: usize = 3; // e.g., "1.7"

/// Read the PDF version from the start of a byte buffer.
///
/// Returns the version string (e.g. `"1.7"`) when `data` begins with a
/// `%PDF-x.y` header.
pub fn sniff_version(data: &[u8]) -> Result<String> {
    let rest = data.strip_prefix(PDF_MAGIC).ok_or(Error::UnknownFormat)?;
    let version_bytes = rest.get(..VERSION_LEN).ok_or(Error::UnknownFormat)?;

    match version_bytes {
        [major, b'.', minor] if major.is_ascii_digit() && minor.is_ascii_digit() => {
            Ok(String::from_utf8_lossy(version_bytes).into_owned())
        }
        _ => Err(Error::UnsupportedVersion(
            String::from_utf8_lossy(version_bytes).into_owned(),
        )),
    }
}

/// Read the PDF version from the header of a file on disk.
pub fn sniff_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let mut header = Vec::with_capacity(16);
    File::open(path)?.take(16).read_to_end(&mut header)?;
    sniff_version(&header)
}

/// Whether a path carries a `.pdf` extension (case-insensitive).
pub fn has_pdf_extension<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

//! Directory batch processing.
//!
//! Every `*.pdf` in an input directory becomes `<stem>.json` in an output
//! directory. Documents are independent: one unreadable file is recorded
//! in the [`BatchReport`] and never stops the others.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::detect::has_pdf_extension;
use crate::error::Result;
use crate::render::{to_json, JsonFormat};
use crate::{extract_outline_file_with_options, OutlineOptions};

/// Default input directory when none is configured.
pub const DEFAULT_INPUT_DIR: &str = "/app/input";

/// Default output directory when none is configured.
pub const DEFAULT_OUTPUT_DIR: &str = "/app/output";

/// Options for a batch run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Directory scanned for PDF files (not recursive)
    pub input_dir: PathBuf,
    /// Directory receiving one JSON file per PDF
    pub output_dir: PathBuf,
    /// Output JSON format
    pub format: JsonFormat,
    /// Process documents in parallel
    pub parallel: bool,
    /// Per-document parsing and classification options
    pub outline: OutlineOptions,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            format: JsonFormat::Pretty,
            parallel: true,
            outline: OutlineOptions::default(),
        }
    }
}

impl BatchOptions {
    /// Create options for the given directories.
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    /// Set output JSON format.
    pub fn with_format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }

    /// Process one document at a time.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set per-document options.
    pub fn with_outline_options(mut self, outline: OutlineOptions) -> Self {
        self.outline = outline;
        self
    }
}

/// Outcome of a batch run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    /// Input files whose outline was written
    pub succeeded: Vec<PathBuf>,
    /// Input files that failed, with the error message
    pub failed: Vec<(PathBuf, String)>,
}

impl BatchReport {
    /// Number of files processed.
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    /// Whether every file succeeded.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// PDF files directly inside `dir`, sorted by file name.
pub fn list_pdfs<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && has_pdf_extension(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Path of the JSON file written for `input`.
pub fn output_path(input: &Path, output_dir: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    output_dir.join(format!("{}.json", stem))
}

/// Process every PDF in the input directory.
///
/// Fails only when the input directory cannot be listed or the output
/// directory cannot be created.
pub fn run_batch(options: &BatchOptions) -> Result<BatchReport> {
    run_batch_with_progress(options, |_| {})
}

/// Like [`run_batch`], calling `progress` once per finished file.
pub fn run_batch_with_progress<F>(options: &BatchOptions, progress: F) -> Result<BatchReport>
where
    F: Fn(&Path) + Sync,
{
    let files = list_pdfs(&options.input_dir)?;
    fs::create_dir_all(&options.output_dir)?;
    log::info!(
        "Found {} PDF files in {}",
        files.len(),
        options.input_dir.display()
    );

    let run = |path: &PathBuf| {
        let outcome = process_file(path, options);
        progress(path);
        (path.clone(), outcome)
    };

    let outcomes: Vec<(PathBuf, Result<PathBuf>)> = if options.parallel {
        files.par_iter().map(run).collect()
    } else {
        files.iter().map(run).collect()
    };

    let mut report = BatchReport::default();
    for (path, outcome) in outcomes {
        match outcome {
            Ok(_) => report.succeeded.push(path),
            Err(e) => {
                log::warn!("Failed to process {}: {}", path.display(), e);
                report.failed.push((path, e.to_string()));
            }
        }
    }
    Ok(report)
}

/// Extract one document and write its JSON, returning the output path.
pub fn process_file(input: &Path, options: &BatchOptions) -> Result<PathBuf> {
    log::info!("Processing {}", input.display());

    let result = extract_outline_file_with_options(input, &options.outline)?;
    let json = to_json(&result, options.format)?;
    let output = output_path(input, &options.output_dir);
    fs::write(&output, json)?;

    log::info!("Generated {}", output.display());
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directories() {
        let options = BatchOptions::default();
        assert_eq!(options.input_dir, PathBuf::from("/app/input"));
        assert_eq!(options.output_dir, PathBuf::from("/app/output"));
        assert!(options.parallel);
        assert!(!options.sequential().parallel);
    }

    #[test]
    fn test_output_path_uses_stem() {
        let out = output_path(Path::new("/in/Report.Final.PDF"), Path::new("/out"));
        assert_eq!(out, PathBuf::from("/out/Report.Final.json"));
    }

    #[test]
    fn test_list_pdfs_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.pdf", "A.PDF", "notes.txt", "c.pdf.bak"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        fs::create_dir(dir.path().join("nested.pdf")).unwrap();

        let names: Vec<String> = list_pdfs(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["A.PDF", "b.pdf"]);
    }

    #[test]
    fn test_missing_input_dir_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let options = BatchOptions::new(dir.path().join("absent"), dir.path().join("out"));
        assert!(run_batch(&options).is_err());
    }

    #[test]
    fn test_report_counts() {
        let report = BatchReport {
            succeeded: vec![PathBuf::from("a.pdf")],
            failed: vec![(PathBuf::from("b.pdf"), "bad".into())],
        };
        assert_eq!(report.total(), 2);
        assert!(!report.is_success());
    }
}

//! Integration tests for directory batch processing.

mod common;

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use common::{build_pdf, BODY};
use pdfoutline::batch::{run_batch_with_progress, BatchOptions};
use pdfoutline::{run_batch, JsonFormat};

fn write_pdf(dir: &Path, name: &str, title: &'static str) {
    let data = build_pdf(&[
        vec![
            ("F2", 24, 72, 760, title),
            ("F1", 10, 72, 700, BODY),
        ],
        vec![
            ("F2", 14, 72, 760, "1 Overview"),
            ("F1", 10, 72, 720, BODY),
        ],
    ]);
    fs::write(dir.join(name), data).unwrap();
}

#[test]
fn test_batch_writes_one_json_per_pdf() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_pdf(input.path(), "alpha.pdf", "Alpha Handbook");
    write_pdf(input.path(), "Beta.PDF", "Beta Manual");
    fs::write(input.path().join("readme.txt"), "not a pdf").unwrap();

    let out_dir = output.path().join("nested");
    let report = run_batch(&BatchOptions::new(input.path(), &out_dir)).unwrap();

    assert!(report.is_success());
    assert_eq!(report.succeeded.len(), 2);

    let json = fs::read_to_string(out_dir.join("alpha.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["title"], "Alpha Handbook");
    assert_eq!(value["outline"][0]["level"], "H1");
    assert_eq!(value["outline"][0]["text"], "1 Overview");
    assert_eq!(value["outline"][0]["page"], 2);
    assert!(json.starts_with("{\n    \"title\""));

    assert!(out_dir.join("Beta.json").exists());
    assert!(!out_dir.join("readme.json").exists());
}

#[test]
fn test_corrupt_file_does_not_stop_batch() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_pdf(input.path(), "a_good.pdf", "Good One");
    fs::write(input.path().join("b_broken.pdf"), b"%PDF-1.4\nthis is not a real body").unwrap();
    fs::write(input.path().join("c_fake.pdf"), b"plain text pretending").unwrap();
    write_pdf(input.path(), "d_good.pdf", "Good Two");

    let options = BatchOptions::new(input.path(), output.path()).sequential();
    let report = run_batch(&options).unwrap();

    let succeeded: Vec<String> = report
        .succeeded
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    let failed: Vec<String> = report
        .failed
        .iter()
        .map(|(p, _)| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();

    assert_eq!(succeeded, vec!["a_good.pdf", "d_good.pdf"]);
    assert_eq!(failed, vec!["b_broken.pdf", "c_fake.pdf"]);
    assert!(report.failed[1].1.contains("Unknown file format"));
    assert!(output.path().join("d_good.json").exists());
    assert!(!output.path().join("c_fake.json").exists());
}

#[test]
fn test_parallel_matches_sequential() {
    let input = tempfile::tempdir().unwrap();
    let parallel_out = tempfile::tempdir().unwrap();
    let sequential_out = tempfile::tempdir().unwrap();
    for (i, title) in ["One", "Two", "Three", "Four"].into_iter().enumerate() {
        write_pdf(input.path(), &format!("doc{}.pdf", i), title);
    }

    let parallel = run_batch(
        &BatchOptions::new(input.path(), parallel_out.path()).with_format(JsonFormat::Compact),
    )
    .unwrap();
    let sequential = run_batch(
        &BatchOptions::new(input.path(), sequential_out.path())
            .with_format(JsonFormat::Compact)
            .sequential(),
    )
    .unwrap();

    assert_eq!(parallel.succeeded, sequential.succeeded);
    for i in 0..4 {
        let name = format!("doc{}.json", i);
        let a = fs::read_to_string(parallel_out.path().join(&name)).unwrap();
        let b = fs::read_to_string(sequential_out.path().join(&name)).unwrap();
        assert_eq!(a, b);
        assert!(!a.contains('\n'));
    }
}

#[test]
fn test_progress_called_per_file() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_pdf(input.path(), "one.pdf", "One");
    write_pdf(input.path(), "two.pdf", "Two");
    fs::write(input.path().join("three.pdf"), b"broken").unwrap();

    let calls = AtomicUsize::new(0);
    let report = run_batch_with_progress(&BatchOptions::new(input.path(), output.path()), |_| {
        calls.fetch_add(1, Ordering::SeqCst);
    })
    .unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(report.total(), 3);
}

#[test]
fn test_empty_input_directory() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();

    let report = run_batch(&BatchOptions::new(input.path(), output.path())).unwrap();
    assert_eq!(report.total(), 0);
}

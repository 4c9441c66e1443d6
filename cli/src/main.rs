//! pdfoutline CLI - PDF heading outline extraction tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfoutline::batch::{list_pdfs, run_batch_with_progress, DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_DIR};
use pdfoutline::render::{to_json, to_json_features};
use pdfoutline::{
    extract_outline_file_with_options, parse_file, BatchOptions, JsonFormat, OutlineOptions,
};

#[derive(Parser)]
#[command(name = "pdfoutline")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Infer a title and heading outline from PDF typography", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the outline of one PDF as JSON
    Outline {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Skip unreadable pages instead of failing
        #[arg(long)]
        lenient: bool,
    },

    /// Extract outlines for every PDF in a directory
    Batch {
        /// Directory containing PDF files
        #[arg(long, value_name = "DIR", env = "PDFOUTLINE_INPUT_DIR", default_value = DEFAULT_INPUT_DIR)]
        input_dir: PathBuf,

        /// Directory receiving one JSON file per PDF
        #[arg(long, value_name = "DIR", env = "PDFOUTLINE_OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
        output_dir: PathBuf,

        /// Process one file at a time
        #[arg(long)]
        sequential: bool,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Skip unreadable pages instead of failing
        #[arg(long)]
        lenient: bool,
    },

    /// Dump the per-block features used for classification
    Features {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Skip unreadable pages instead of failing
        #[arg(long)]
        lenient: bool,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Outline {
            input,
            output,
            compact,
            lenient,
        }) => cmd_outline(&input, output.as_deref(), compact, lenient),
        Some(Commands::Batch {
            input_dir,
            output_dir,
            sequential,
            compact,
            lenient,
        }) => cmd_batch(input_dir, output_dir, sequential, compact, lenient),
        Some(Commands::Features { input, lenient }) => cmd_features(&input, lenient),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            println!("{}", "Usage: pdfoutline <COMMAND>".yellow());
            println!("       pdfoutline --help for more information");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn outline_options(lenient: bool) -> OutlineOptions {
    if lenient {
        OutlineOptions::new().lenient()
    } else {
        OutlineOptions::new()
    }
}

fn cmd_outline(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    lenient: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = extract_outline_file_with_options(input, &outline_options(lenient))?;
    let json = to_json(&result, json_format(compact))?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!(
            "{} {} ({} headings)",
            "Saved to".green(),
            path.display(),
            result.outline.len()
        );
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_batch(
    input_dir: PathBuf,
    output_dir: PathBuf,
    sequential: bool,
    compact: bool,
    lenient: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut options = BatchOptions::new(input_dir, output_dir)
        .with_format(json_format(compact))
        .with_outline_options(outline_options(lenient));
    if sequential {
        options = options.sequential();
    }
    log::debug!("Batch options: {:?}", options);

    let total = list_pdfs(&options.input_dir)?.len();
    if total == 0 {
        println!(
            "{} {}",
            "No PDF files found in".yellow(),
            options.input_dir.display()
        );
        return Ok(());
    }

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let report = run_batch_with_progress(&options, |path| {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        pb.set_message(name);
        pb.inc(1);
    })?;
    pb.finish_with_message("Done!");

    println!(
        "\n{} {} of {} files → {}",
        "Processed".green().bold(),
        report.succeeded.len(),
        report.total(),
        options.output_dir.display()
    );
    for (path, error) in &report.failed {
        println!("  {} {}: {}", "✗".red(), path.display(), error);
    }

    if !report.is_success() {
        return Err(format!("{} files failed", report.failed.len()).into());
    }
    Ok(())
}

fn cmd_features(input: &Path, lenient: bool) -> Result<(), Box<dyn std::error::Error>> {
    let options = outline_options(lenient);
    let layout = parse_file(input, &options.parse)?;
    let records = options.extractor().features(&layout);

    println!("{}", to_json_features(&records, JsonFormat::Pretty)?);
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pdfoutline".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF heading outline extraction tool");
    println!();
    println!("License: MIT");
}

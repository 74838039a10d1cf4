// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Mushaf — Quranic document reformatter.
//
// Entry point. Initialises logging, selects input/output paths from the
// arguments, and runs the requested pipeline with report-and-continue
// error handling: failures are logged in plain language and later stages
// are skipped.

use std::path::PathBuf;

use tracing::{error, info, warn};

use mushaf_core::error::{MushafError, Result};
use mushaf_core::human_errors::humanize_error;
use mushaf_core::{AyahAnnotator, RenderConfig};
use mushaf_document::{DocxReader, DocxWriter, PdfComposer, PdfDecorator};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Mushaf starting");

    let args: Vec<String> = std::env::args().skip(1).collect();
    std::process::exit(run(&args));
}

fn run(args: &[String]) -> i32 {
    let outcome = match args {
        [command, rest @ ..] => match (command.as_str(), rest) {
            ("center", [source]) => center(source, None),
            ("center", [source, target]) => center(source, Some(target)),
            ("compose", [pages_dir, output]) => compose(pages_dir, output, None),
            ("compose", [pages_dir, output, config]) => compose(pages_dir, output, Some(config)),
            ("view", [path]) => view(path),
            ("decorate", [input, output]) => decorate(input, output, None),
            ("decorate", [input, output, config]) => decorate(input, output, Some(config)),
            _ => {
                usage();
                return 2;
            }
        },
        [] => {
            usage();
            return 2;
        }
    };

    match outcome {
        Ok(()) => 0,
        Err(err) => {
            report(&err);
            1
        }
    }
}

fn usage() {
    eprintln!("usage: mushaf <command>");
    eprintln!("  center   <src.docx> [dst.docx]          annotate ayah numbers, center, save a copy");
    eprintln!("  compose  <pages_dir> <out.pdf> [cfg]    compose all .docx pages into a decorated PDF");
    eprintln!("  view     <file.docx>                    print text content and run diagnostics");
    eprintln!("  decorate <in.pdf> <out.pdf> [cfg]       stamp decorative frames onto an existing PDF");
}

/// Log a failure in plain language with its suggestion.
fn report(err: &MushafError) {
    let human = humanize_error(err);
    error!(suggestion = %human.suggestion, "{}", human.message);
}

fn load_config(path: Option<&String>) -> Result<RenderConfig> {
    match path {
        Some(path) => RenderConfig::load(path),
        None => Ok(RenderConfig::default()),
    }
}

/// Annotate ayah numbers and write a centered copy of one document.
fn center(source: &String, target: Option<&String>) -> Result<()> {
    let reader = DocxReader::open(source)?;
    let annotator = AyahAnnotator::new();
    let annotated: Vec<_> = reader
        .paragraphs()
        .iter()
        .map(|paragraph| annotator.annotate_paragraph(paragraph))
        .collect();

    let target_path = target
        .map(PathBuf::from)
        .unwrap_or_else(|| DocxWriter::default_target_path(source));
    DocxWriter::write_centered(&annotated, &target_path)?;

    info!("Created RTL document at {}", target_path.display());
    Ok(())
}

/// Compose every `.docx` in a directory (sorted by name) into one
/// decorated PDF. Unreadable files are reported and skipped.
fn compose(pages_dir: &String, output: &String, config: Option<&String>) -> Result<()> {
    let config = load_config(config)?;

    let mut page_files: Vec<PathBuf> = std::fs::read_dir(pages_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("docx"))
        })
        .collect();
    page_files.sort();

    if page_files.is_empty() {
        return Err(MushafError::DocxRead(format!(
            "no .docx files found in {pages_dir}"
        )));
    }

    let annotator = AyahAnnotator::new();
    let mut documents = Vec::new();
    for path in &page_files {
        match DocxReader::open(path) {
            Ok(reader) => {
                info!("Processing {}", path.display());
                documents.push(
                    reader
                        .paragraphs()
                        .iter()
                        .map(|paragraph| annotator.annotate_paragraph(paragraph))
                        .collect::<Vec<_>>(),
                );
            }
            Err(err) => {
                report(&err);
                warn!(path = %path.display(), "Skipping unreadable document");
            }
        }
    }

    if documents.is_empty() {
        return Err(MushafError::DocxRead(format!(
            "none of the documents in {pages_dir} could be read"
        )));
    }

    let mut composer = PdfComposer::new(config);
    if let Some(stem) = PathBuf::from(output).file_stem() {
        composer.set_title(stem.to_string_lossy());
    }
    composer.write_to_file(&documents, output)
}

/// Print a document's text content and its run/code-point diagnostics.
fn view(path: &String) -> Result<()> {
    let reader = DocxReader::open(path)?;

    println!("\nText content of {}:\n", path);
    println!("{}", "-".repeat(60));
    println!("{}", reader.text());
    println!("{}", "-".repeat(60));
    print!("{}", reader.describe());
    Ok(())
}

/// Stamp decorative frames onto an existing PDF.
fn decorate(input: &String, output: &String, config: Option<&String>) -> Result<()> {
    let config = load_config(config)?;
    PdfDecorator::new(config).stamp_file(input, output)
}

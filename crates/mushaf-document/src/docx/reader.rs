// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// DOCX reader — open a Word document with `docx-rs` and expose its
// paragraphs as ordered sequences of formatted text runs.

use std::fmt::Write as _;
use std::path::Path;

use docx_rs::{Docx, DocumentChild, ParagraphChild, RunChild, read_docx};
use tracing::{debug, info, instrument};

use mushaf_core::error::{MushafError, Result};
use mushaf_core::types::{AnnotatedParagraph, Direction, RunFormat, TextRun};

/// Reads a `.docx` file and converts its paragraphs into the run model the
/// annotator consumes.
#[derive(Debug)]
pub struct DocxReader {
    docx: Docx,
    /// Source path, if opened from a file (useful for diagnostics).
    source_path: Option<String>,
}

impl DocxReader {
    // -- Construction ---------------------------------------------------------

    /// Open a document from the filesystem.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path_ref = path.as_ref();
        info!("Opening DOCX: {}", path_ref.display());

        let bytes = std::fs::read(path_ref).map_err(|err| {
            MushafError::DocxRead(format!("cannot read {}: {}", path_ref.display(), err))
        })?;
        let mut reader = Self::from_bytes(&bytes)?;
        reader.source_path = Some(path_ref.display().to_string());
        Ok(reader)
    }

    /// Create a reader from raw `.docx` bytes already in memory.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let docx = read_docx(data)
            .map_err(|err| MushafError::DocxRead(format!("failed to parse DOCX: {}", err)))?;

        Ok(Self {
            docx,
            source_path: None,
        })
    }

    /// Return the source path if the reader was created via [`DocxReader::open`].
    pub fn source_path(&self) -> Option<&str> {
        self.source_path.as_deref()
    }

    // -- Extraction -----------------------------------------------------------

    /// All paragraphs of the document body, in order, with per-run
    /// formatting extracted. Blank paragraphs are kept so the document
    /// structure survives the round trip.
    pub fn paragraphs(&self) -> Vec<AnnotatedParagraph> {
        let mut result = Vec::new();

        for child in &self.docx.document.children {
            if let DocumentChild::Paragraph(paragraph) = child {
                let mut runs = Vec::new();
                for para_child in &paragraph.children {
                    if let ParagraphChild::Run(run) = para_child {
                        let text = run_text(run);
                        let format = extract_format(&run.run_property);
                        runs.push(TextRun::new(text, format));
                    }
                }
                result.push(AnnotatedParagraph::new(runs));
            }
        }

        debug!(paragraphs = result.len(), "DOCX body extracted");
        result
    }

    /// Plain text of all non-blank paragraphs, joined by newlines.
    pub fn text(&self) -> String {
        self.paragraphs()
            .iter()
            .filter(|para| !para.is_blank())
            .map(|para| para.text())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Diagnostic dump: per paragraph, the raw text, every character's
    /// code point, and the run segmentation.
    pub fn describe(&self) -> String {
        let mut out = String::new();

        for (index, paragraph) in self.paragraphs().iter().enumerate() {
            if paragraph.is_blank() {
                continue;
            }
            let text = paragraph.text();
            let _ = writeln!(out, "Paragraph {}:", index + 1);
            let _ = writeln!(out, "Raw text: {}", text);
            let _ = writeln!(out, "Code points:");
            for ch in text.chars() {
                let _ = writeln!(out, "  '{}': U+{:04X}", ch, ch as u32);
            }
            let _ = writeln!(out, "Runs:");
            for (run_index, run) in paragraph.runs.iter().enumerate() {
                let _ = writeln!(out, "  Run {}: '{}'", run_index + 1, run.text);
            }
        }

        out
    }
}

/// Concatenated text of a docx run's text children.
fn run_text(run: &docx_rs::Run) -> String {
    let mut text = String::new();
    for child in &run.children {
        match child {
            RunChild::Text(t) => text.push_str(&t.text),
            RunChild::Tab(_) => text.push('\t'),
            _ => {}
        }
    }
    text
}

/// Extract the formatting descriptor from a docx run property.
///
/// docx-rs models properties as write-oriented builder types whose inner
/// fields custom-serialize to a stable JSON view (sizes as numbers, colors
/// as strings); that view is the supported read surface, so the descriptor
/// is pulled from it.
fn extract_format(property: &docx_rs::RunProperty) -> RunFormat {
    let view = serde_json::to_value(property).unwrap_or_default();

    RunFormat {
        bold: flag(&view, "bold"),
        italic: flag(&view, "italic"),
        underline: view.get("underline").is_some(),
        color: string_field(&view, "color"),
        size_half_points: view
            .get("sz")
            .and_then(serde_json::Value::as_u64)
            .map(|sz| sz as u32),
        font: view
            .get("fonts")
            .and_then(|fonts| fonts.get("ascii"))
            .and_then(serde_json::Value::as_str)
            .map(str::to_string),
        direction: Direction::LeftToRight,
    }
}

/// An on/off run property: present means on unless explicitly `false`.
fn flag(view: &serde_json::Value, key: &str) -> bool {
    view.get(key)
        .map(|value| value.as_bool().unwrap_or(true))
        .unwrap_or(false)
}

/// A string-valued run property, tolerating both bare-string and
/// `{"val": ...}` serializations.
fn string_field(view: &serde_json::Value, key: &str) -> Option<String> {
    let value = view.get(key)?;
    value
        .as_str()
        .or_else(|| value.get("val").and_then(serde_json::Value::as_str))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreadable_bytes_are_a_read_error() {
        let err = DocxReader::from_bytes(b"not a zip archive").unwrap_err();
        assert!(matches!(err, MushafError::DocxRead(_)));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = DocxReader::open("/nonexistent/page.docx").unwrap_err();
        assert!(matches!(err, MushafError::DocxRead(_)));
    }

    #[test]
    fn flag_reads_presence_and_explicit_false() {
        let view: serde_json::Value =
            serde_json::json!({"bold": true, "italic": false, "sz": 40});
        assert!(flag(&view, "bold"));
        assert!(!flag(&view, "italic"));
        assert!(!flag(&view, "underline"));
    }

    #[test]
    fn string_field_reads_both_shapes() {
        let bare: serde_json::Value = serde_json::json!({"color": "FF0000"});
        let wrapped: serde_json::Value = serde_json::json!({"color": {"val": "00FF00"}});
        assert_eq!(string_field(&bare, "color").as_deref(), Some("FF0000"));
        assert_eq!(string_field(&wrapped, "color").as_deref(), Some("00FF00"));
        assert_eq!(string_field(&bare, "highlight"), None);
    }
}

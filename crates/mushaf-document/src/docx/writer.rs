// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// DOCX writer — persist annotated paragraphs as a new Word document with
// every paragraph centered and run formatting mapped back to docx
// properties.

use std::fs::File;
use std::path::{Path, PathBuf};

use docx_rs::{AlignmentType, Docx, Paragraph, Run, RunFonts};
use tracing::{info, instrument};

use mushaf_core::error::{MushafError, Result};
use mushaf_core::types::{AnnotatedParagraph, TextRun};

/// Builds centered Word documents from annotated paragraphs.
///
/// The run direction flag is not written to the docx (docx-rs exposes no
/// `w:rtl`); direction is honoured by the PDF composition path.
pub struct DocxWriter;

impl DocxWriter {
    /// Build the docx document object: one centered paragraph per input
    /// paragraph, blank paragraphs kept as-is to preserve structure.
    pub fn build(paragraphs: &[AnnotatedParagraph]) -> Docx {
        let mut docx = Docx::new();

        for paragraph in paragraphs {
            let mut para = Paragraph::new();
            if !paragraph.is_blank() {
                para = para.align(AlignmentType::Center);
            }
            for run in &paragraph.runs {
                para = para.add_run(build_run(run));
            }
            docx = docx.add_paragraph(para);
        }

        docx
    }

    /// Build and write the document to `path`, creating the parent
    /// directory when missing.
    #[instrument(skip(paragraphs), fields(paragraphs = paragraphs.len(), path = %path.as_ref().display()))]
    pub fn write_centered(paragraphs: &[AnnotatedParagraph], path: impl AsRef<Path>) -> Result<()> {
        let path_ref = path.as_ref();
        if let Some(parent) = path_ref.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|err| {
                MushafError::DocxWrite(format!("cannot create {}: {}", parent.display(), err))
            })?;
        }

        let file = File::create(path_ref).map_err(|err| {
            MushafError::DocxWrite(format!("cannot create {}: {}", path_ref.display(), err))
        })?;

        Self::build(paragraphs).build().pack(file).map_err(|err| {
            MushafError::DocxWrite(format!("cannot pack {}: {}", path_ref.display(), err))
        })?;

        info!("Wrote centered DOCX to {}", path_ref.display());
        Ok(())
    }

    /// Default output path for a reformatted copy of `source`:
    /// `new_docs/<stem>_new.docx` beside the source file.
    pub fn default_target_path(source: impl AsRef<Path>) -> PathBuf {
        let source = source.as_ref();
        let stem = source
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());
        let dir = source.parent().unwrap_or_else(|| Path::new("."));
        dir.join("new_docs").join(format!("{stem}_new.docx"))
    }
}

/// Map one text run back onto a docx run.
fn build_run(run: &TextRun) -> Run {
    let mut docx_run = Run::new().add_text(run.text.as_str());
    let format = &run.format;

    if format.bold {
        docx_run = docx_run.bold();
    }
    if format.italic {
        docx_run = docx_run.italic();
    }
    if format.underline {
        docx_run = docx_run.underline("single");
    }
    if let Some(color) = &format.color {
        docx_run = docx_run.color(color.clone());
    }
    if let Some(size) = format.size_half_points {
        docx_run = docx_run.size(size as usize);
    }
    if let Some(font) = &format.font {
        docx_run = docx_run.fonts(RunFonts::new().ascii(font.clone()));
    }

    docx_run
}

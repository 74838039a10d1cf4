// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Mushaf document reformatter.

use serde::{Deserialize, Serialize};

/// Direction a run of text is rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    LeftToRight,
    RightToLeft,
}

impl Default for Direction {
    fn default() -> Self {
        Self::LeftToRight
    }
}

/// Display attributes carried by a run of text.
///
/// The annotator treats this as opaque: it is copied from source run to
/// output run, never interpreted. Only the `direction` field is written,
/// and only ever to [`Direction::RightToLeft`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunFormat {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    /// Text color as an RRGGBB hex string (docx convention), if set.
    pub color: Option<String>,
    /// Font size in half-points (docx convention), if set.
    pub size_half_points: Option<u32>,
    /// Font family name, if set.
    pub font: Option<String>,
    pub direction: Direction,
}

/// An ordered sequence of characters sharing one formatting descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    pub text: String,
    pub format: RunFormat,
}

impl TextRun {
    pub fn new(text: impl Into<String>, format: RunFormat) -> Self {
        Self {
            text: text.into(),
            format,
        }
    }

    /// A run with default formatting, for plain-text sources.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, RunFormat::default())
    }
}

/// One line/paragraph of a document as an ordered sequence of runs.
///
/// Invariant: concatenating the text of all runs in order reproduces the
/// paragraph's character content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedParagraph {
    pub runs: Vec<TextRun>,
}

impl AnnotatedParagraph {
    pub fn new(runs: Vec<TextRun>) -> Self {
        Self { runs }
    }

    /// Concatenated character content of all runs, in order.
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }

    /// True when the paragraph contains no visible characters.
    ///
    /// Blank paragraphs pass through the annotator unchanged and are
    /// excluded from centering and PDF layout.
    pub fn is_blank(&self) -> bool {
        self.runs
            .iter()
            .all(|run| run.text.chars().all(char::is_whitespace))
    }
}

/// Standard paper sizes for PDF composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaperSize {
    A4,
    A5,
    Letter,
    Custom { width_mm: u32, height_mm: u32 },
}

impl PaperSize {
    /// Dimensions in millimetres (width, height).
    pub fn dimensions_mm(&self) -> (u32, u32) {
        match self {
            Self::A4 => (210, 297),
            Self::A5 => (148, 210),
            Self::Letter => (216, 279),
            Self::Custom {
                width_mm,
                height_mm,
            } => (*width_mm, *height_mm),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paragraph_text_concatenates_runs_in_order() {
        let para = AnnotatedParagraph::new(vec![
            TextRun::plain("قال "),
            TextRun::plain("12"),
            TextRun::plain(" رجل"),
        ]);
        assert_eq!(para.text(), "قال 12 رجل");
    }

    #[test]
    fn whitespace_only_paragraph_is_blank() {
        let para = AnnotatedParagraph::new(vec![TextRun::plain("  \t ")]);
        assert!(para.is_blank());

        let empty = AnnotatedParagraph::default();
        assert!(empty.is_blank());
    }

    #[test]
    fn paragraph_with_visible_text_is_not_blank() {
        let para = AnnotatedParagraph::new(vec![TextRun::plain(" "), TextRun::plain("س")]);
        assert!(!para.is_blank());
    }
}

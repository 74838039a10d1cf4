// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for the batch tool's report-and-continue
// output. Every technical error is mapped to plain language with a clear
// suggestion.

use crate::error::MushafError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// User must do something (fix a path, install a font).
    ActionRequired,
    /// Cannot be fixed by retrying — damaged file, bad format.
    Permanent,
}

/// A human-readable error with a plain summary and an actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain summary (logged as the headline).
    pub message: String,
    /// What the user should try.
    pub suggestion: String,
    pub severity: Severity,
}

/// Convert a `MushafError` into a `HumanError` for log output.
pub fn humanize_error(err: &MushafError) -> HumanError {
    match err {
        MushafError::DocxRead(detail) => HumanError {
            message: "This Word document could not be read.".into(),
            suggestion: format!(
                "Check the path, and that the file is a .docx (not .doc). ({detail})"
            ),
            severity: Severity::ActionRequired,
        },

        MushafError::DocxWrite(detail) => HumanError {
            message: "The reformatted document could not be saved.".into(),
            suggestion: format!(
                "Check that the output folder exists and is writable. ({detail})"
            ),
            severity: Severity::ActionRequired,
        },

        MushafError::PdfError(_) => HumanError {
            message: "There's a problem with this PDF.".into(),
            suggestion: "The file may be damaged. Try opening it in a viewer first, or regenerate it.".into(),
            severity: Severity::Permanent,
        },

        MushafError::FontError(detail) => HumanError {
            message: "The Quranic font could not be loaded.".into(),
            suggestion: format!(
                "Point font_path (or fallback_font_path) in the render config at a readable TTF file. ({detail})"
            ),
            severity: Severity::ActionRequired,
        },

        MushafError::Config(detail) => HumanError {
            message: "The render configuration is invalid.".into(),
            suggestion: format!("Fix the JSON config file and try again. ({detail})"),
            severity: Severity::ActionRequired,
        },

        MushafError::Io(detail) => HumanError {
            message: "A file could not be read or written.".into(),
            suggestion: format!("Check the path and permissions. ({detail})"),
            severity: Severity::ActionRequired,
        },

        MushafError::Serialization(detail) => HumanError {
            message: "A configuration file could not be parsed.".into(),
            suggestion: format!("Fix the JSON syntax. ({detail})"),
            severity: Severity::ActionRequired,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_errors_name_the_config_keys() {
        let human = humanize_error(&MushafError::FontError("no such file".into()));
        assert!(human.suggestion.contains("font_path"));
        assert_eq!(human.severity, Severity::ActionRequired);
    }

    #[test]
    fn pdf_errors_are_permanent() {
        let human = humanize_error(&MushafError::PdfError("trailer not found".into()));
        assert_eq!(human.severity, Severity::Permanent);
    }

    #[test]
    fn detail_is_carried_into_the_suggestion() {
        let human = humanize_error(&MushafError::DocxRead("zip header mismatch".into()));
        assert!(human.suggestion.contains("zip header mismatch"));
    }
}

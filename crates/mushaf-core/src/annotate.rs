// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Ayah-number annotation — wraps every maximal run of decimal digits in
// ornate parentheses, preserving per-run formatting and forcing
// right-to-left direction on everything it emits.

use unicode_properties::{GeneralCategory, UnicodeGeneralCategory};

use crate::types::{AnnotatedParagraph, Direction, RunFormat, TextRun};

/// Opens a verse number in logical order (U+FD3F, ARABIC ORNATE RIGHT
/// PARENTHESIS — the opening side of the pair in right-to-left text).
pub const ORNATE_OPEN: char = '\u{FD3F}';

/// Closes a verse number in logical order (U+FD3E, ARABIC ORNATE LEFT
/// PARENTHESIS).
pub const ORNATE_CLOSE: char = '\u{FD3E}';

/// Wraps ayah numbers in ornate parentheses.
///
/// Given an ordered sequence of [`TextRun`], produces an ordered sequence
/// of runs where every maximal contiguous run of decimal digits within a
/// single source run becomes one run reading `﴿<digits>﴾`, and every other
/// stretch of characters is re-emitted as-is. Each output run carries its
/// source run's formatting with the direction forced to right-to-left.
///
/// The transform is total and purely functional: any character sequence is
/// accepted, nothing is reordered, and the input is never mutated. Digit
/// runs split across a source-run boundary (formatting change mid-number)
/// are annotated independently per run, never merged.
///
/// Running the annotator over its own output is unsupported: the interior
/// digits of an already-bracketed number are still a contiguous digit run
/// and will be wrapped again.
#[derive(Debug, Clone, Copy, Default)]
pub struct AyahAnnotator;

impl AyahAnnotator {
    pub fn new() -> Self {
        Self
    }

    /// Annotate one paragraph.
    ///
    /// Blank paragraphs (empty or whitespace-only) are returned unchanged —
    /// identity, with no direction rewrite — so collaborators can skip them.
    pub fn annotate_paragraph(&self, paragraph: &AnnotatedParagraph) -> AnnotatedParagraph {
        if paragraph.is_blank() {
            return paragraph.clone();
        }
        AnnotatedParagraph::new(self.annotate_runs(&paragraph.runs))
    }

    /// Annotate an ordered sequence of runs, each independently.
    pub fn annotate_runs(&self, runs: &[TextRun]) -> Vec<TextRun> {
        let mut out = Vec::with_capacity(runs.len());
        for run in runs {
            annotate_run(run, &mut out);
        }
        out
    }
}

/// Single left-to-right scan over one source run.
///
/// The cursor alternates between maximal digit stretches (emitted bracketed)
/// and maximal non-digit stretches (emitted verbatim), so the pass is O(n)
/// with no backtracking.
fn annotate_run(run: &TextRun, out: &mut Vec<TextRun>) {
    let mut format = run.format.clone();
    format.direction = Direction::RightToLeft;

    let text = run.text.as_str();
    let mut cursor = 0;
    while cursor < text.len() {
        let tail = &text[cursor..];
        let digit_len = prefix_len(tail, is_decimal_digit);
        if digit_len > 0 {
            let digits = &tail[..digit_len];
            out.push(TextRun::new(
                format!("{ORNATE_OPEN}{digits}{ORNATE_CLOSE}"),
                format.clone(),
            ));
            cursor += digit_len;
        } else {
            let plain_len = prefix_len(tail, |ch| !is_decimal_digit(ch));
            out.push(TextRun::new(tail[..plain_len].to_string(), format.clone()));
            cursor += plain_len;
        }
    }
}

/// Byte length of the maximal prefix of `text` whose characters satisfy
/// `pred`.
fn prefix_len(text: &str, pred: impl Fn(char) -> bool) -> usize {
    text.chars()
        .take_while(|ch| pred(*ch))
        .map(char::len_utf8)
        .sum()
}

/// True for any Unicode decimal digit (general category Nd): ASCII `0-9`,
/// Arabic-Indic `٠-٩`, Extended Arabic-Indic `۰-۹`, and every other
/// decimal-digit script. Letter-like numerals (Nl) and other numeric
/// characters (No) do not count.
fn is_decimal_digit(ch: char) -> bool {
    matches!(ch.general_category(), GeneralCategory::DecimalNumber)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AnnotatedParagraph, Direction, RunFormat, TextRun};

    fn bold_red() -> RunFormat {
        RunFormat {
            bold: true,
            color: Some("FF0000".into()),
            size_half_points: Some(48),
            font: Some("Al Majeed Quranic Font".into()),
            ..RunFormat::default()
        }
    }

    /// The §-scenario: one run of mixed Arabic text and a number splits
    /// into three runs around the bracketed digits, all sharing the source
    /// formatting.
    #[test]
    fn wraps_digit_run_inside_arabic_text() {
        let para = AnnotatedParagraph::new(vec![TextRun::new("قال 12 رجل", bold_red())]);
        let result = AyahAnnotator::new().annotate_paragraph(&para);

        assert_eq!(result.text(), "قال \u{FD3F}12\u{FD3E} رجل");
        assert_eq!(result.runs.len(), 3);
        assert_eq!(result.runs[1].text, "\u{FD3F}12\u{FD3E}");
        for run in &result.runs {
            assert!(run.format.bold);
            assert_eq!(run.format.color.as_deref(), Some("FF0000"));
            assert_eq!(run.format.size_half_points, Some(48));
            assert_eq!(run.format.font.as_deref(), Some("Al Majeed Quranic Font"));
            assert_eq!(run.format.direction, Direction::RightToLeft);
        }
    }

    /// Arabic-Indic digits are decimal digits too.
    #[test]
    fn wraps_arabic_indic_digits() {
        let para = AnnotatedParagraph::new(vec![TextRun::plain("آية ٢٥٥")]);
        let result = AyahAnnotator::new().annotate_paragraph(&para);
        assert_eq!(result.text(), "آية \u{FD3F}٢٥٥\u{FD3E}");
    }

    /// Stripping the two ornate bracket characters from the output restores
    /// the input with nothing added, removed, or reordered.
    #[test]
    fn output_minus_brackets_reproduces_input() {
        let input = "سورة 2 آية 255 ونص بلا أرقام";
        let para = AnnotatedParagraph::new(vec![TextRun::plain(input)]);
        let result = AyahAnnotator::new().annotate_paragraph(&para);

        let stripped: String = result
            .text()
            .chars()
            .filter(|ch| *ch != ORNATE_OPEN && *ch != ORNATE_CLOSE)
            .collect();
        assert_eq!(stripped, input);
    }

    /// Leading and trailing digit runs produce no empty sibling runs.
    #[test]
    fn digits_at_run_boundaries() {
        let para = AnnotatedParagraph::new(vec![TextRun::plain("7 ثم 8")]);
        let result = AyahAnnotator::new().annotate_paragraph(&para);
        assert_eq!(result.runs.len(), 3);
        assert_eq!(result.runs[0].text, "\u{FD3F}7\u{FD3E}");
        assert_eq!(result.runs[2].text, "\u{FD3F}8\u{FD3E}");
    }

    /// A run with no digits comes back as a single run with direction
    /// forced, content untouched.
    #[test]
    fn no_digits_passes_text_through() {
        let para = AnnotatedParagraph::new(vec![TextRun::plain("بسم الله")]);
        let result = AyahAnnotator::new().annotate_paragraph(&para);
        assert_eq!(result.runs.len(), 1);
        assert_eq!(result.runs[0].text, "بسم الله");
        assert_eq!(result.runs[0].format.direction, Direction::RightToLeft);
    }

    /// Blank paragraphs are identity: same runs, direction untouched.
    #[test]
    fn blank_paragraph_is_identity() {
        let para = AnnotatedParagraph::new(vec![TextRun::plain("   ")]);
        let result = AyahAnnotator::new().annotate_paragraph(&para);
        assert_eq!(result, para);
        assert_eq!(result.runs[0].format.direction, Direction::LeftToRight);

        let empty = AnnotatedParagraph::default();
        assert_eq!(AyahAnnotator::new().annotate_paragraph(&empty), empty);
    }

    /// A number split across two source runs is bracketed per run, never
    /// merged across the formatting boundary.
    #[test]
    fn split_digit_run_not_merged_across_runs() {
        let para = AnnotatedParagraph::new(vec![
            TextRun::new("1", bold_red()),
            TextRun::plain("2"),
        ]);
        let result = AyahAnnotator::new().annotate_paragraph(&para);

        assert_eq!(result.text(), "\u{FD3F}1\u{FD3E}\u{FD3F}2\u{FD3E}");
        assert_eq!(result.runs.len(), 2);
        assert!(result.runs[0].format.bold);
        assert!(!result.runs[1].format.bold);
    }

    /// Double invocation is unsupported: the interior digits of an already
    /// bracketed number are still contiguous and get wrapped again.
    #[test]
    fn reannotation_wraps_interior_digits_again() {
        let annotator = AyahAnnotator::new();
        let once = annotator.annotate_paragraph(&AnnotatedParagraph::new(vec![TextRun::plain(
            "آية 12",
        )]));
        let twice = annotator.annotate_paragraph(&once);
        assert_eq!(twice.text(), "آية \u{FD3F}\u{FD3F}12\u{FD3E}\u{FD3E}");
    }

    /// Non-printable and unusual characters outside the digit class pass
    /// through untouched.
    #[test]
    fn control_and_symbol_characters_pass_through() {
        let input = "\u{200F}؟\u{0007}—½";
        let para = AnnotatedParagraph::new(vec![TextRun::plain(input)]);
        let result = AyahAnnotator::new().annotate_paragraph(&para);
        // ½ is No, not Nd, so nothing is bracketed.
        assert_eq!(result.text(), input);
        assert_eq!(result.runs.len(), 1);
    }

    #[test]
    fn empty_run_emits_nothing() {
        let para = AnnotatedParagraph::new(vec![TextRun::plain(""), TextRun::plain("نص")]);
        let result = AyahAnnotator::new().annotate_paragraph(&para);
        assert_eq!(result.runs.len(), 1);
        assert_eq!(result.text(), "نص");
    }
}

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Arabic shaping and bidi display transform: logical-order text in,
// display-order text out. Invoked by the PDF composer, never by the
// annotator — the annotator only sets the direction flag.

use ar_reshaper::ArabicReshaper;
use unicode_bidi::BidiInfo;

/// Convert logical-order text to display order, line by line.
///
/// Each line is first reshaped into Arabic presentation forms (contextual
/// letter joining, lam-alef ligatures), then reordered visually per UAX#9.
/// Newline structure is preserved.
pub fn to_display_order(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let reshaper = ArabicReshaper::default();
    let mut out = String::with_capacity(text.len());
    for chunk in text.split_inclusive('\n') {
        let (line, has_newline) = match chunk.strip_suffix('\n') {
            Some(prefix) => (prefix, true),
            None => (chunk, false),
        };

        if !line.is_empty() {
            let shaped = reshaper.reshape(line);
            out.push_str(&reorder_visual(&shaped));
        }
        if has_newline {
            out.push('\n');
        }
    }
    out
}

/// UAX#9 visual reordering of a single line.
fn reorder_visual(line: &str) -> String {
    let info = BidiInfo::new(line, None);
    if info.paragraphs.is_empty() {
        return line.to_string();
    }

    let mut out = String::with_capacity(line.len());
    for para in &info.paragraphs {
        out.push_str(&info.reorder_line(para, para.range.clone()));
    }
    out
}

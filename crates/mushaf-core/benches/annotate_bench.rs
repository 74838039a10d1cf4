// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the ayah-number annotator on a synthetic page of
// Quranic-shaped text.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use mushaf_core::{AnnotatedParagraph, AyahAnnotator, TextRun};

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Benchmark annotation of a 40-paragraph page where every paragraph mixes
/// Arabic text with ASCII and Arabic-Indic verse numbers — the realistic
/// shape of one exported mushaf page.
fn bench_annotate_page(c: &mut Criterion) {
    let paragraphs: Vec<AnnotatedParagraph> = (0..40)
        .map(|i| {
            AnnotatedParagraph::new(vec![TextRun::plain(format!(
                "الرحمن الرحيم مالك يوم الدين {i} إياك نعبد وإياك نستعين ٦{i}"
            ))])
        })
        .collect();
    let annotator = AyahAnnotator::new();

    c.bench_function("annotate_page (40 paragraphs)", |b| {
        b.iter(|| {
            for paragraph in &paragraphs {
                black_box(annotator.annotate_paragraph(black_box(paragraph)));
            }
        });
    });
}

criterion_group!(benches, bench_annotate_page);
criterion_main!(benches);

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// mushaf-document — Document collaborators for the Mushaf reformatter.
//
// Provides DOCX operations (read paragraphs with formatting, write centered
// copies), decorated PDF composition, frame stamping and merging of existing
// PDFs, and the Arabic shaping + bidi display transform.

pub mod docx;
pub mod pdf;
pub mod shape;

// Re-export the primary structs so callers can use `mushaf_document::DocxReader` etc.
pub use docx::reader::DocxReader;
pub use docx::writer::DocxWriter;
pub use pdf::compose::PdfComposer;
pub use pdf::decorate::PdfDecorator;

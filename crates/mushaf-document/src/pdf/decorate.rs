// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF decorator — stamp the decorative frame under every page of an
// existing PDF, and merge page-per-file PDFs into one document, using the
// `lopdf` crate.

use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId};
use tracing::{debug, info, instrument, warn};

use mushaf_core::config::RenderConfig;
use mushaf_core::error::{MushafError, Result};

/// One centimetre in PDF points.
const CM_PT: f32 = 28.3465;

/// A4 fallback when a page carries no MediaBox of its own.
const A4_PT: (f32, f32) = (595.276, 841.89);

/// Stamps the decorative frame onto existing PDF documents.
///
/// The stamp is graphics-only (background, double frame, corner accents,
/// divider) so it needs no font resources; it is painted under the page's
/// own content. Headings belong to the composition path.
pub struct PdfDecorator {
    config: RenderConfig,
}

impl PdfDecorator {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Stamp every page of a PDF given as bytes, returning the decorated
    /// document.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn stamp(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut document = Document::load_mem(data)
            .map_err(|err| MushafError::PdfError(format!("failed to load PDF: {}", err)))?;

        let pages: Vec<(u32, ObjectId)> = document
            .get_pages()
            .iter()
            .map(|(number, id)| (*number, *id))
            .collect();

        info!(pages = pages.len(), "Stamping decorative frames");

        for (page_number, page_id) in pages {
            let (width_pt, height_pt) = page_size(&document, page_id);
            let frame = frame_content(&self.config, width_pt, height_pt)
                .encode()
                .map_err(|err| {
                    MushafError::PdfError(format!("failed to encode frame content: {}", err))
                })?;

            let existing = document.get_page_content(page_id).map_err(|err| {
                MushafError::PdfError(format!(
                    "cannot read content of page {}: {}",
                    page_number, err
                ))
            })?;

            // Frame first so it paints underneath; the page's own content
            // is isolated from the frame's graphics state by the q/Q pair
            // inside `frame_content`.
            let mut combined = frame;
            combined.push(b'\n');
            combined.extend_from_slice(&existing);

            document
                .change_page_content(page_id, combined)
                .map_err(|err| {
                    MushafError::PdfError(format!(
                        "cannot rewrite content of page {}: {}",
                        page_number, err
                    ))
                })?;

            debug!(page_number, width_pt, height_pt, "Page stamped");
        }

        let mut output = Vec::new();
        document.save_to(&mut output).map_err(|err| {
            MushafError::PdfError(format!("failed to serialise stamped PDF: {}", err))
        })?;
        Ok(output)
    }

    /// Stamp a PDF file on disk, writing the decorated copy to `output`.
    pub fn stamp_file(&self, input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<()> {
        let data = std::fs::read(input.as_ref())?;
        let stamped = self.stamp(&data)?;
        std::fs::write(output.as_ref(), &stamped)?;
        info!("Wrote decorated PDF to {}", output.as_ref().display());
        Ok(())
    }

    /// Merge several PDFs (one per source document, in order) and stamp
    /// the combined result.
    pub fn merge_and_stamp(&self, documents: &[Vec<u8>]) -> Result<Vec<u8>> {
        let merged = merge_documents(documents)?;
        self.stamp(&merged)
    }
}

// -- Merging ------------------------------------------------------------------

/// Merge PDF documents into one; pages appear in input order.
#[instrument(skip_all, fields(documents = documents.len()))]
pub fn merge_documents(documents: &[Vec<u8>]) -> Result<Vec<u8>> {
    let (first, rest) = documents
        .split_first()
        .ok_or_else(|| MushafError::PdfError("nothing to merge".into()))?;

    let mut merged = Document::load_mem(first)
        .map_err(|err| MushafError::PdfError(format!("failed to load first PDF: {}", err)))?;

    for (index, data) in rest.iter().enumerate() {
        let source = Document::load_mem(data).map_err(|err| {
            MushafError::PdfError(format!("failed to load PDF #{}: {}", index + 2, err))
        })?;

        let source_pages = source.get_pages();
        let mut page_numbers: Vec<u32> = source_pages.keys().copied().collect();
        page_numbers.sort();

        for page_number in page_numbers {
            copy_page_into(&source, &mut merged, source_pages[&page_number])?;
        }
    }

    let mut output = Vec::new();
    merged.save_to(&mut output).map_err(|err| {
        MushafError::PdfError(format!("failed to serialise merged PDF: {}", err))
    })?;

    debug!(output_bytes = output.len(), "Merge complete");
    Ok(output)
}

/// Copy one page (with everything it references) from `source` into
/// `target`, appending it as the last page of the target's page tree.
fn copy_page_into(source: &Document, target: &mut Document, page_id: ObjectId) -> Result<()> {
    let page_object = source.get_object(page_id).map_err(|err| {
        MushafError::PdfError(format!("cannot read page object {:?}: {}", page_id, err))
    })?;

    let copied = import_object(source, target, page_object)?;
    let copied_id = target.add_object(copied);

    // Locate the target's /Pages node through the catalog.
    let pages_id = target
        .catalog()
        .map_err(|err| MushafError::PdfError(format!("no catalog: {}", err)))
        .and_then(|catalog| {
            catalog
                .get(b"Pages")
                .map_err(|err| MushafError::PdfError(format!("no /Pages: {}", err)))
                .and_then(|pages_ref| match pages_ref {
                    Object::Reference(id) => Ok(*id),
                    _ => Err(MushafError::PdfError("/Pages is not a reference".into())),
                })
        })?;

    // Append to /Kids and bump /Count.
    if let Ok(Object::Dictionary(pages_dict)) = target.get_object_mut(pages_id) {
        if let Ok(Object::Array(kids)) = pages_dict.get_mut(b"Kids") {
            kids.push(Object::Reference(copied_id));
        }
        if let Ok(Object::Integer(count)) = pages_dict.get_mut(b"Count") {
            *count += 1;
        }
    }

    // Re-parent the copied page under the target's page tree.
    if let Ok(Object::Dictionary(page_dict)) = target.get_object_mut(copied_id) {
        page_dict.set("Parent", Object::Reference(pages_id));
    }

    Ok(())
}

/// Recursively copy an object graph from `source` into `target`.
///
/// References are resolved in the source and re-created in the target;
/// /Parent keys are skipped to break the page-tree back-reference cycle
/// (the caller re-parents the page). Unresolvable references degrade to
/// Null rather than failing the whole merge.
fn import_object(source: &Document, target: &mut Document, object: &Object) -> Result<Object> {
    match object {
        Object::Dictionary(dict) => {
            let mut copied = lopdf::Dictionary::new();
            for (key, value) in dict.iter() {
                if key == b"Parent" {
                    continue;
                }
                copied.set(key.clone(), import_object(source, target, value)?);
            }
            Ok(Object::Dictionary(copied))
        }
        Object::Array(items) => {
            let mut copied = Vec::with_capacity(items.len());
            for item in items {
                copied.push(import_object(source, target, item)?);
            }
            Ok(Object::Array(copied))
        }
        Object::Reference(id) => match source.get_object(*id) {
            Ok(referenced) => {
                let copied = import_object(source, target, referenced)?;
                Ok(Object::Reference(target.add_object(copied)))
            }
            Err(err) => {
                warn!(?id, %err, "Cannot resolve reference, using Null");
                Ok(Object::Null)
            }
        },
        Object::Stream(stream) => {
            let mut copied_dict = lopdf::Dictionary::new();
            for (key, value) in stream.dict.iter() {
                if key == b"Parent" {
                    continue;
                }
                copied_dict.set(key.clone(), import_object(source, target, value)?);
            }
            Ok(Object::Stream(lopdf::Stream::new(
                copied_dict,
                stream.content.clone(),
            )))
        }
        other => Ok(other.clone()),
    }
}

// -- Frame content ------------------------------------------------------------

/// Page dimensions in points from the page's MediaBox, A4 when absent.
fn page_size(document: &Document, page_id: ObjectId) -> (f32, f32) {
    let media_box = document
        .get_object(page_id)
        .ok()
        .and_then(|object| object.as_dict().ok())
        .and_then(|dict| dict.get(b"MediaBox").ok())
        .and_then(|object| object.as_array().ok());

    match media_box {
        Some(values) if values.len() == 4 => {
            let coord = |object: &Object| -> f32 {
                match object {
                    Object::Integer(value) => *value as f32,
                    Object::Real(value) => *value,
                    _ => 0.0,
                }
            };
            (
                coord(&values[2]) - coord(&values[0]),
                coord(&values[3]) - coord(&values[1]),
            )
        }
        _ => A4_PT,
    }
}

/// The frame as a self-contained content stream: `q`, background fill,
/// double frame, corner accents, divider, `Q`.
fn frame_content(config: &RenderConfig, width_pt: f32, height_pt: f32) -> Content {
    let (w, h) = (width_pt, height_pt);
    let bg = config.frame.background_rgb;
    let stroke = config.frame.stroke_rgb;
    let corner = 0.8 * CM_PT;

    let mut operations = vec![
        Operation::new("q", vec![]),
        // Parchment background.
        Operation::new("rg", vec![bg[0].into(), bg[1].into(), bg[2].into()]),
        Operation::new("re", rect(0.0, 0.0, w, h)),
        Operation::new("f", vec![]),
        // Double frame.
        Operation::new(
            "RG",
            vec![stroke[0].into(), stroke[1].into(), stroke[2].into()],
        ),
        Operation::new("w", vec![config.frame.line_width_pt.into()]),
        Operation::new("re", rect(CM_PT, CM_PT, w - 2.0 * CM_PT, h - 2.0 * CM_PT)),
        Operation::new("S", vec![]),
        Operation::new(
            "re",
            rect(1.5 * CM_PT, 1.5 * CM_PT, w - 3.0 * CM_PT, h - 3.0 * CM_PT),
        ),
        Operation::new("S", vec![]),
    ];

    // Corner accents, two short strokes per corner.
    let accents = [
        (CM_PT, 2.0 * CM_PT, CM_PT + corner, 2.0 * CM_PT),
        (2.0 * CM_PT, CM_PT, 2.0 * CM_PT, CM_PT + corner),
        (w - CM_PT, 2.0 * CM_PT, w - CM_PT - corner, 2.0 * CM_PT),
        (w - 2.0 * CM_PT, CM_PT, w - 2.0 * CM_PT, CM_PT + corner),
        (CM_PT, h - 2.0 * CM_PT, CM_PT + corner, h - 2.0 * CM_PT),
        (2.0 * CM_PT, h - CM_PT, 2.0 * CM_PT, h - CM_PT - corner),
        (w - CM_PT, h - 2.0 * CM_PT, w - CM_PT - corner, h - 2.0 * CM_PT),
        (w - 2.0 * CM_PT, h - CM_PT, w - 2.0 * CM_PT, h - CM_PT - corner),
    ];
    for (x1, y1, x2, y2) in accents {
        operations.push(Operation::new("m", vec![x1.into(), y1.into()]));
        operations.push(Operation::new("l", vec![x2.into(), y2.into()]));
        operations.push(Operation::new("S", vec![]));
    }

    // Divider above the body area.
    operations.push(Operation::new("w", vec![1.0f32.into()]));
    operations.push(Operation::new(
        "m",
        vec![(w / 2.0 - 4.0 * CM_PT).into(), (h - 2.5 * CM_PT).into()],
    ));
    operations.push(Operation::new(
        "l",
        vec![(w / 2.0 + 4.0 * CM_PT).into(), (h - 2.5 * CM_PT).into()],
    ));
    operations.push(Operation::new("S", vec![]));
    operations.push(Operation::new("Q", vec![]));

    Content { operations }
}

fn rect(x: f32, y: f32, w: f32, h: f32) -> Vec<Object> {
    vec![x.into(), y.into(), w.into(), h.into()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::dictionary;

    /// A minimal single-page PDF built directly with lopdf.
    fn minimal_pdf(marker: &str) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let content = Content {
            operations: vec![Operation::new("Tc", vec![0.into()])],
        };
        let content_id = doc.add_object(lopdf::Stream::new(
            dictionary! {},
            content.encode().unwrap(),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            "MushafMarker" => Object::string_literal(marker),
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut out = Vec::new();
        doc.save_to(&mut out).unwrap();
        out
    }

    #[test]
    fn stamp_keeps_page_count_and_prepends_frame() {
        let decorator = PdfDecorator::new(RenderConfig::default());
        let stamped = decorator.stamp(&minimal_pdf("a")).unwrap();
        assert!(stamped.starts_with(b"%PDF"));

        let doc = Document::load_mem(&stamped).unwrap();
        let pages = doc.get_pages();
        assert_eq!(pages.len(), 1);

        let content = doc.get_page_content(pages[&1]).unwrap();
        // Frame painted first, page content still present after it.
        assert!(content.starts_with(b"q"));
        assert!(content.windows(2).any(|window| window == b"Tc"));
    }

    #[test]
    fn merge_concatenates_pages_in_order() {
        let merged = merge_documents(&[minimal_pdf("first"), minimal_pdf("second")]).unwrap();
        let doc = Document::load_mem(&merged).unwrap();
        assert_eq!(doc.get_pages().len(), 2);
    }

    #[test]
    fn merge_of_nothing_is_an_error() {
        let err = merge_documents(&[]).unwrap_err();
        assert!(matches!(err, MushafError::PdfError(_)));
    }

    #[test]
    fn stamp_of_garbage_is_an_error() {
        let decorator = PdfDecorator::new(RenderConfig::default());
        let err = decorator.stamp(b"not a pdf").unwrap_err();
        assert!(matches!(err, MushafError::PdfError(_)));
    }

    #[test]
    fn merge_and_stamp_round_trip() {
        let decorator = PdfDecorator::new(RenderConfig::default());
        let out = decorator
            .merge_and_stamp(&[minimal_pdf("a"), minimal_pdf("b")])
            .unwrap();
        let doc = Document::load_mem(&out).unwrap();
        assert_eq!(doc.get_pages().len(), 2);
    }

    #[test]
    fn page_size_falls_back_to_a4() {
        let mut doc = Document::with_version("1.5");
        let bare_page = doc.add_object(dictionary! { "Type" => "Page" });
        assert_eq!(page_size(&doc, bare_page), A4_PT);
    }
}

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF composer — build decorated mushaf-style PDFs from annotated
// paragraphs using `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: documents are built by
// constructing `PdfPage` structs containing `Vec<Op>` operation lists,
// then serialised via `PdfDocument::save()`. The body font is an external
// TTF registered through `ParsedFont` — Arabic text cannot use the builtin
// Latin fonts.

use std::path::Path;

use printpdf::{
    Color, Line, LinePoint, Mm, Op, PaintMode, ParsedFont, PdfDocument, PdfPage, PdfSaveOptions,
    PdfWarnMsg, Point, Polygon, PolygonRing, Pt, Rgb, TextItem, WindingOrder,
};
use tracing::{debug, info, instrument, warn};

use mushaf_core::config::RenderConfig;
use mushaf_core::error::{MushafError, Result};
use mushaf_core::types::AnnotatedParagraph;

use crate::shape;

/// One centimetre in millimetres, the grid unit of the frame geometry.
const CM: f32 = 10.0;

/// Millimetres per point.
const MM_PER_PT: f32 = 0.3528;

/// Top of the body text area, measured down from the page top edge —
/// below the heading line and divider.
const BODY_TOP_MM: f32 = 35.0;

/// Composes decorated PDF documents from annotated paragraphs.
///
/// Every page carries the parchment background, double frame, corner
/// accents, divider, and heading; body lines are shaped to display order,
/// centered, and paginated. Each source document starts a new page.
pub struct PdfComposer {
    config: RenderConfig,
    /// Title metadata embedded in the PDF /Info dictionary.
    title: Option<String>,
}

impl PdfComposer {
    /// Create a composer with the given render configuration.
    pub fn new(config: RenderConfig) -> Self {
        Self {
            config,
            title: None,
        }
    }

    /// Set a title for the PDF metadata.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    // -- Composition ----------------------------------------------------------

    /// Compose one decorated PDF. Each entry of `documents` is the
    /// paragraph list of one source document; blank paragraphs are skipped.
    #[instrument(skip_all, fields(documents = documents.len()))]
    pub fn compose(&self, documents: &[Vec<AnnotatedParagraph>]) -> Result<Vec<u8>> {
        let font_bytes = self.load_font_bytes()?;
        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let parsed_font = ParsedFont::from_bytes(&font_bytes, 0, &mut warnings)
            .ok_or_else(|| MushafError::FontError("body font could not be parsed".into()))?;

        let (page_w_mm, page_h_mm) = self.config.page_dimensions_mm();
        let title = self.title.as_deref().unwrap_or("Mushaf");

        info!(paper = ?self.config.paper_size, title, "Composing decorated PDF");

        let mut doc = PdfDocument::new(title);
        let font = doc.add_font(&parsed_font);

        let line_height_mm = self.config.line_height_pt * MM_PER_PT;
        let per_page = lines_per_page(page_h_mm, self.config.margin_mm, line_height_mm);

        let mut pages: Vec<PdfPage> = Vec::new();
        for paragraphs in documents {
            let lines: Vec<String> = paragraphs
                .iter()
                .filter(|para| !para.is_blank())
                .map(|para| shape::to_display_order(&para.text()))
                .collect();

            // Every source document opens a fresh page, even when empty.
            let mut chunks: Vec<&[String]> = lines.chunks(per_page).collect();
            if chunks.is_empty() {
                chunks.push(&[]);
            }
            for chunk in chunks {
                let mut ops = frame_ops(&self.config, page_w_mm, page_h_mm);
                ops.extend(self.heading_ops(&font, page_w_mm, page_h_mm));
                ops.push(Op::SetFillColor {
                    col: rgb(self.config.text_rgb),
                });
                for (index, line) in chunk.iter().enumerate() {
                    let y_mm = page_h_mm - BODY_TOP_MM - index as f32 * line_height_mm;
                    ops.extend(self.text_ops(
                        &font,
                        line,
                        self.config.body_font_size_pt,
                        page_w_mm,
                        y_mm,
                    ));
                }
                pages.push(PdfPage::new(Mm(page_w_mm), Mm(page_h_mm), ops));
            }
        }

        // No input documents at all: a single decorated blank page.
        if pages.is_empty() {
            let ops = frame_ops(&self.config, page_w_mm, page_h_mm);
            pages.push(PdfPage::new(Mm(page_w_mm), Mm(page_h_mm), ops));
        }

        doc.with_pages(pages);

        debug!(pages = doc.pages.len(), "Page layout complete");

        let output = doc.save(&PdfSaveOptions::default(), &mut warnings);
        Ok(output)
    }

    /// Compose and write directly to a file.
    pub fn write_to_file(
        &self,
        documents: &[Vec<AnnotatedParagraph>],
        path: impl AsRef<Path>,
    ) -> Result<()> {
        let bytes = self.compose(documents)?;
        std::fs::write(path.as_ref(), &bytes)?;
        info!("Wrote decorated PDF to {}", path.as_ref().display());
        Ok(())
    }

    // -- Helpers --------------------------------------------------------------

    /// Read the body font, falling back from the primary to the fallback
    /// path.
    fn load_font_bytes(&self) -> Result<Vec<u8>> {
        let candidates = [&self.config.font_path, &self.config.fallback_font_path];
        let mut last_error: Option<String> = None;

        for path in candidates.into_iter().flatten() {
            match std::fs::read(path) {
                Ok(bytes) => {
                    info!(path = %path.display(), "Using body font");
                    return Ok(bytes);
                }
                Err(err) => {
                    warn!(path = %path.display(), %err, "Font not readable");
                    last_error = Some(format!("{}: {}", path.display(), err));
                }
            }
        }

        Err(MushafError::FontError(last_error.unwrap_or_else(|| {
            "no body font configured (set font_path in the render config)".into()
        })))
    }

    /// Heading line centered below the divider, in the frame color.
    fn heading_ops(&self, font: &printpdf::FontId, page_w_mm: f32, page_h_mm: f32) -> Vec<Op> {
        let Some(heading) = self.config.heading.as_deref() else {
            return Vec::new();
        };
        let shaped = shape::to_display_order(heading);
        let mut ops = vec![Op::SetFillColor {
            col: rgb(self.config.frame.stroke_rgb),
        }];
        ops.extend(self.text_ops(
            font,
            &shaped,
            self.config.heading_font_size_pt,
            page_w_mm,
            page_h_mm - 2.8 * CM,
        ));
        ops
    }

    /// One centered line of display-order text at the given baseline.
    fn text_ops(
        &self,
        font: &printpdf::FontId,
        line: &str,
        font_size_pt: f32,
        page_w_mm: f32,
        y_mm: f32,
    ) -> Vec<Op> {
        let x_mm = centered_x_mm(line, font_size_pt, page_w_mm, self.config.margin_mm);
        vec![
            Op::StartTextSection,
            Op::SetTextCursor {
                pos: Point::new(Mm(x_mm), Mm(y_mm)),
            },
            Op::SetFontSize {
                size: Pt(font_size_pt),
                font: font.clone(),
            },
            Op::WriteText {
                items: vec![TextItem::Text(line.to_string())],
                font: font.clone(),
            },
            Op::EndTextSection,
        ]
    }
}

/// Body lines that fit between the heading zone and the bottom frame.
fn lines_per_page(page_h_mm: f32, margin_mm: f32, line_height_mm: f32) -> usize {
    let usable_mm = page_h_mm - BODY_TOP_MM - margin_mm;
    (usable_mm / line_height_mm).max(1.0) as usize
}

/// Estimated left edge for a centered line.
///
/// Width is estimated from an average glyph width of half the font size —
/// exact metrics would need shaping against the embedded font, and the
/// estimate is well within the frame margins for mushaf-length lines.
fn centered_x_mm(line: &str, font_size_pt: f32, page_w_mm: f32, margin_mm: f32) -> f32 {
    let avg_char_width_mm = 0.5 * font_size_pt * MM_PER_PT;
    let estimated_width_mm = line.chars().count() as f32 * avg_char_width_mm;
    ((page_w_mm - estimated_width_mm) / 2.0).max(margin_mm)
}

/// The decorative page furniture: parchment fill, double frame, corner
/// accents, and top divider.
fn frame_ops(config: &RenderConfig, page_w_mm: f32, page_h_mm: f32) -> Vec<Op> {
    let (w, h) = (page_w_mm, page_h_mm);
    let corner = 0.8 * CM;

    let mut ops = vec![
        Op::SetFillColor {
            col: rgb(config.frame.background_rgb),
        },
        page_background(w, h),
        Op::SetOutlineColor {
            col: rgb(config.frame.stroke_rgb),
        },
        Op::SetOutlineThickness {
            pt: Pt(config.frame.line_width_pt),
        },
        stroked_rect(CM, CM, w - 2.0 * CM, h - 2.0 * CM),
        stroked_rect(1.5 * CM, 1.5 * CM, w - 3.0 * CM, h - 3.0 * CM),
    ];

    // Corner accents, two short strokes per corner.
    ops.push(segment(CM, 2.0 * CM, CM + corner, 2.0 * CM));
    ops.push(segment(2.0 * CM, CM, 2.0 * CM, CM + corner));
    ops.push(segment(w - CM, 2.0 * CM, w - CM - corner, 2.0 * CM));
    ops.push(segment(w - 2.0 * CM, CM, w - 2.0 * CM, CM + corner));
    ops.push(segment(CM, h - 2.0 * CM, CM + corner, h - 2.0 * CM));
    ops.push(segment(2.0 * CM, h - CM, 2.0 * CM, h - CM - corner));
    ops.push(segment(w - CM, h - 2.0 * CM, w - CM - corner, h - 2.0 * CM));
    ops.push(segment(w - 2.0 * CM, h - CM, w - 2.0 * CM, h - CM - corner));

    // Divider above the body area.
    ops.push(Op::SetOutlineThickness { pt: Pt(1.0) });
    ops.push(segment(
        w / 2.0 - 4.0 * CM,
        h - 2.5 * CM,
        w / 2.0 + 4.0 * CM,
        h - 2.5 * CM,
    ));

    ops
}

fn rgb(channels: [f32; 3]) -> Color {
    Color::Rgb(Rgb {
        r: channels[0],
        g: channels[1],
        b: channels[2],
        icc_profile: None,
    })
}

fn corner_point(x_mm: f32, y_mm: f32) -> LinePoint {
    LinePoint {
        p: Point::new(Mm(x_mm), Mm(y_mm)),
        bezier: false,
    }
}

fn page_background(w_mm: f32, h_mm: f32) -> Op {
    Op::DrawPolygon {
        polygon: Polygon {
            rings: vec![PolygonRing {
                points: vec![
                    corner_point(0.0, 0.0),
                    corner_point(w_mm, 0.0),
                    corner_point(w_mm, h_mm),
                    corner_point(0.0, h_mm),
                ],
            }],
            mode: PaintMode::Fill,
            winding_order: WindingOrder::NonZero,
        },
    }
}

fn stroked_rect(x_mm: f32, y_mm: f32, w_mm: f32, h_mm: f32) -> Op {
    Op::DrawLine {
        line: Line {
            points: vec![
                corner_point(x_mm, y_mm),
                corner_point(x_mm + w_mm, y_mm),
                corner_point(x_mm + w_mm, y_mm + h_mm),
                corner_point(x_mm, y_mm + h_mm),
            ],
            is_closed: true,
        },
    }
}

fn segment(x1_mm: f32, y1_mm: f32, x2_mm: f32, y2_mm: f32) -> Op {
    Op::DrawLine {
        line: Line {
            points: vec![corner_point(x1_mm, y1_mm), corner_point(x2_mm, y2_mm)],
            is_closed: false,
        },
    }
}

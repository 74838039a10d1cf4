// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Render configuration — resolved once at startup and threaded through the
// composer and decorator instead of living in process-global state.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{MushafError, Result};
use crate::types::PaperSize;

/// Colors and line weights of the decorative page frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameStyle {
    /// Page background fill, RGB in 0.0–1.0 (light cream parchment).
    pub background_rgb: [f32; 3],
    /// Frame and divider stroke color (gold-brown).
    pub stroke_rgb: [f32; 3],
    /// Outer frame line width in points.
    pub line_width_pt: f32,
}

impl Default for FrameStyle {
    fn default() -> Self {
        Self {
            background_rgb: [1.0, 0.98, 0.94],
            stroke_rgb: [0.6, 0.4, 0.2],
            line_width_pt: 2.0,
        }
    }
}

/// Settings for decorated PDF output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    pub paper_size: PaperSize,
    /// Page margin in millimetres.
    pub margin_mm: f32,
    /// Primary body font (a Quranic TTF).
    pub font_path: Option<PathBuf>,
    /// Fallback font tried when the primary is missing or unreadable.
    pub fallback_font_path: Option<PathBuf>,
    /// Body text size in points.
    pub body_font_size_pt: f32,
    /// Line leading in points.
    pub line_height_pt: f32,
    /// Body text color, RGB in 0.0–1.0 (traditional dark blue).
    pub text_rgb: [f32; 3],
    /// Heading size in points for the per-page heading line.
    pub heading_font_size_pt: f32,
    /// Heading drawn centered at the top of every composed page.
    /// `None` disables the heading.
    pub heading: Option<String>,
    pub frame: FrameStyle,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::A4,
            margin_mm: 20.0,
            font_path: None,
            fallback_font_path: None,
            body_font_size_pt: 20.0,
            line_height_pt: 30.0,
            text_rgb: [0.0, 0.0, 0.4],
            heading_font_size_pt: 14.0,
            heading: Some("بِسْمِ اللَّهِ الرَّحْمَنِ الرَّحِيمِ".to_string()),
            frame: FrameStyle::default(),
        }
    }
}

impl RenderConfig {
    /// Load a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|err| {
            MushafError::Config(format!("cannot read {}: {}", path.display(), err))
        })?;
        let config: Self = serde_json::from_str(&raw)?;
        Ok(config)
    }

    /// Page dimensions in millimetres (width, height).
    pub fn page_dimensions_mm(&self) -> (f32, f32) {
        let (w, h) = self.paper_size.dimensions_mm();
        (w as f32, h as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_traditional_layout() {
        let config = RenderConfig::default();
        assert_eq!(config.paper_size, PaperSize::A4);
        assert_eq!(config.frame.background_rgb, [1.0, 0.98, 0.94]);
        assert_eq!(config.text_rgb, [0.0, 0.0, 0.4]);
        assert!(config.heading.is_some());
    }

    #[test]
    fn json_round_trip() {
        let config = RenderConfig {
            paper_size: PaperSize::A5,
            heading: None,
            ..RenderConfig::default()
        };

        let json = serde_json::to_string(&config).unwrap();
        let back: RenderConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn load_reads_a_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let json = serde_json::to_string(&RenderConfig::default()).unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let loaded = RenderConfig::load(file.path()).unwrap();
        assert_eq!(loaded, RenderConfig::default());
    }

    #[test]
    fn load_missing_file_is_a_config_error() {
        let err = RenderConfig::load("/nonexistent/mushaf.json").unwrap_err();
        assert!(matches!(err, MushafError::Config(_)));
    }
}

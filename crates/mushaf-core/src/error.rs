// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Mushaf.

use thiserror::Error;

/// Top-level error type for all Mushaf operations.
#[derive(Debug, Error)]
pub enum MushafError {
    // -- Document errors --
    #[error("document read failed: {0}")]
    DocxRead(String),

    #[error("document write failed: {0}")]
    DocxWrite(String),

    #[error("PDF operation failed: {0}")]
    PdfError(String),

    #[error("font registration failed: {0}")]
    FontError(String),

    // -- Configuration --
    #[error("configuration error: {0}")]
    Config(String),

    // -- I/O and serialization --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, MushafError>;

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Mushaf — Core types, the ayah-number annotator, and error definitions
// shared across all crates.

pub mod annotate;
pub mod config;
pub mod error;
pub mod human_errors;
pub mod types;

pub use annotate::AyahAnnotator;
pub use config::RenderConfig;
pub use error::MushafError;
pub use types::*;

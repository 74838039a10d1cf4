// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// DOCX boundary: reading paragraphs into runs, writing centered copies.

pub mod reader;
pub mod writer;

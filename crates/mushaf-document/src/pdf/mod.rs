// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF boundary: decorated composition of new documents and frame stamping
// onto existing ones.

pub mod compose;
pub mod decorate;

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Glassdome Contributors

//! Shared error taxonomy (spec.md §7).
//!
//! Every fallible boundary in this workspace defines its own `thiserror`
//! enum, but tags each variant with one of these five kinds so callers can
//! branch on retriability without matching every concrete variant.

use serde::{Deserialize, Serialize};

/// The five error kinds from spec.md §7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Request gate denials, malformed specs; user-visible, not retried.
    Validation,
    /// Platform credential failures; surfaced to operator, not retried by the core.
    Auth,
    /// Network/timeouts; retried by the originating loop on its next cadence.
    Transient,
    /// Idempotent: treated as success for delete paths, failure for update paths.
    NotFound,
    /// Bugs; logged with context, loop continues.
    Internal,
}

impl ErrorKind {
    /// Whether the originating loop should retry on its own next cadence
    /// rather than surfacing the failure immediately.
    pub fn is_retriable(self) -> bool {
        matches!(self, ErrorKind::Transient)
    }
}

crate::simple_display! {
    ErrorKind {
        Validation => "validation",
        Auth => "auth",
        Transient => "transient",
        NotFound => "not_found",
        Internal => "internal",
    }
}

/// A type that can classify itself into one of the five error kinds.
pub trait Classify {
    fn kind(&self) -> ErrorKind;
}

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Glassdome Contributors

//! `PlatformClient` error taxonomy (spec.md §4.1).

use glassdome_core::{Classify, ErrorKind};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// Permanent; do not retry without credential refresh.
    #[error("auth error: {0}")]
    Auth(String),

    /// Idempotent delete semantics: deleting a missing VM returns success,
    /// but every other op surfaces this for the caller to decide.
    #[error("not found: {0}")]
    NotFound(String),

    /// Retriable; caller applies backoff.
    #[error("transient error: {0}")]
    Transient(String),

    /// Permanent; malformed spec.
    #[error("validation error: {0}")]
    Validation(String),
}

impl Classify for PlatformError {
    fn kind(&self) -> ErrorKind {
        match self {
            PlatformError::Auth(_) => ErrorKind::Auth,
            PlatformError::NotFound(_) => ErrorKind::NotFound,
            PlatformError::Transient(_) => ErrorKind::Transient,
            PlatformError::Validation(_) => ErrorKind::Validation,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;

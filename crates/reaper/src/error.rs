// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Glassdome Contributors

//! Mission Store error taxonomy (spec.md §4.8).

use glassdome_core::{Classify, ErrorKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReaperError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Classify for ReaperError {
    fn kind(&self) -> ErrorKind {
        match self {
            ReaperError::Io(_) => ErrorKind::Internal,
            ReaperError::Json(_) => ErrorKind::Internal,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;

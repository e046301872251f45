// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Glassdome Contributors

use glassdome_core::{Classify, ErrorKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OverseerError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("mission {0} already exists")]
    MissionAlreadyExists(String),

    #[error("mission {0} not found")]
    MissionNotFound(String),

    #[error("reaper error: {0}")]
    Reaper(#[from] glassdome_reaper::ReaperError),
}

impl Classify for OverseerError {
    fn kind(&self) -> ErrorKind {
        match self {
            OverseerError::Io(_) | OverseerError::Json(_) => ErrorKind::Internal,
            OverseerError::MissionAlreadyExists(_) => ErrorKind::Validation,
            OverseerError::MissionNotFound(_) => ErrorKind::NotFound,
            OverseerError::Reaper(err) => err.kind(),
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;

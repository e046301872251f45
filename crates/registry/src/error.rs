// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Glassdome Contributors

//! Registry error taxonomy.

use glassdome_core::{Classify, ErrorKind};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("resource not found: {0}")]
    ResourceNotFound(String),

    #[error("invalid resource id: {0}")]
    InvalidResourceId(String),

    #[error("no drift recorded for resource: {0}")]
    NoActiveDrift(String),
}

impl Classify for RegistryError {
    fn kind(&self) -> ErrorKind {
        match self {
            RegistryError::ResourceNotFound(_) | RegistryError::NoActiveDrift(_) => ErrorKind::NotFound,
            RegistryError::InvalidResourceId(_) => ErrorKind::Validation,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;

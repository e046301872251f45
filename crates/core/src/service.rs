// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Glassdome Contributors

//! Overseer-local service ledger entry (spec.md §3).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceStatus {
    Up,
    Down,
    Unknown,
}

crate::simple_display! {
    ServiceStatus {
        Up => "up",
        Down => "down",
        Unknown => "unknown",
    }
}

/// A service running on a VM, keyed by `(vm_id, name)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub vm_id: String,
    pub name: String,
    pub port: Option<u16>,
    pub url: Option<String>,
    pub status: ServiceStatus,
    pub last_checked: Option<chrono::DateTime<chrono::Utc>>,
}

impl Service {
    pub fn new(vm_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            vm_id: vm_id.into(),
            name: name.into(),
            port: None,
            url: None,
            status: ServiceStatus::Unknown,
            last_checked: None,
        }
    }

    pub fn key(&self) -> (String, String) {
        (self.vm_id.clone(), self.name.clone())
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Glassdome Contributors

//! Overseer-local host ledger entry (spec.md §3, §4.5).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostStatus {
    Healthy,
    Degraded,
    Down,
    Unknown,
}

crate::simple_display! {
    HostStatus {
        Healthy => "healthy",
        Degraded => "degraded",
        Down => "down",
        Unknown => "unknown",
    }
}

/// `required` fields compared against `*_available` counterparts in
/// [`Host::resources`] by [`Host::has_resources`]; a required field with no
/// matching `_available` entry is treated as insufficient (spec.md §4.5).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceSpec {
    pub cpu: Option<u32>,
    pub memory_mib: Option<u64>,
    pub disk_gib: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Host {
    pub platform: String,
    pub identifier: String,
    pub status: HostStatus,
    #[serde(default)]
    pub resources: HashMap<String, u64>,
    #[serde(default)]
    pub vms: Vec<String>,
    pub last_checked: Option<chrono::DateTime<chrono::Utc>>,
}

impl Host {
    pub fn new(platform: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            identifier: identifier.into(),
            status: HostStatus::Unknown,
            resources: HashMap::new(),
            vms: Vec::new(),
            last_checked: None,
        }
    }

    pub fn key(&self) -> String {
        host_key(&self.platform, &self.identifier)
    }

    /// `has_resources(host, required)` (spec.md §4.5): absent `_available`
    /// fields are treated as insufficient.
    pub fn has_resources(&self, required: &ResourceSpec) -> bool {
        if let Some(cpu) = required.cpu {
            match self.resources.get("cpu_available") {
                Some(available) if (*available as u32) >= cpu => {}
                _ => return false,
            }
        }
        if let Some(memory) = required.memory_mib {
            match self.resources.get("memory_available_mib") {
                Some(available) if *available >= memory => {}
                _ => return false,
            }
        }
        if let Some(disk) = required.disk_gib {
            match self.resources.get("disk_available_gib") {
                Some(available) if *available >= disk => {}
                _ => return false,
            }
        }
        true
    }
}

pub fn host_key(platform: &str, identifier: &str) -> String {
    format!("{platform}:{identifier}")
}

#[cfg(test)]
#[path = "host_tests.rs"]
mod tests;

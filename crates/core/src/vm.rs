// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Glassdome Contributors

//! Overseer-local VM ledger entry (spec.md §3, §4.5). Distinct from the
//! Registry's [`crate::Resource`] — this is the Overseer's own belief about
//! what it has deployed, used for request validation and production flagging.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VmStatus {
    Running,
    Stopped,
    Unknown,
    Deploying,
    Failed,
}

crate::simple_display! {
    VmStatus {
        Running => "running",
        Stopped => "stopped",
        Unknown => "unknown",
        Deploying => "deploying",
        Failed => "failed",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vm {
    pub id: String,
    pub name: String,
    pub platform: String,
    pub status: VmStatus,
    pub ip: Option<String>,
    #[serde(default)]
    pub specs: HashMap<String, String>,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub is_production: bool,
    pub deployed_at: Option<chrono::DateTime<chrono::Utc>>,
    pub deployed_by: Option<String>,
    pub last_checked: Option<chrono::DateTime<chrono::Utc>>,
}

impl Vm {
    pub fn new(id: impl Into<String>, name: impl Into<String>, platform: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            platform: platform.into(),
            status: VmStatus::Unknown,
            ip: None,
            specs: HashMap::new(),
            services: Vec::new(),
            is_production: false,
            deployed_at: None,
            deployed_by: None,
            last_checked: None,
        }
    }
}

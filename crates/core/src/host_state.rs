// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Glassdome Contributors

//! Reaper `HostState` — per-host progress within a mission (spec.md §3, §4.9–§4.10).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{HashMap, VecDeque};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostHealth {
    Unknown,
    Healthy,
    Degraded,
    Error,
}

crate::simple_display! {
    HostHealth {
        Unknown => "unknown",
        Healthy => "healthy",
        Degraded => "degraded",
        Error => "error",
    }
}

/// Default failure budget before a host is locked out of further tasks
/// (spec.md §4.10, configurable per [`crate::GlassdomeConfig`]-style callers).
pub const DEFAULT_MAX_FAILURES: u32 = 3;

/// Bound on the `last_tasks` ring (spec.md §3 `last_tasks ring`).
pub const LAST_TASKS_RING_SIZE: usize = 20;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostState {
    pub host_id: String,
    pub os: String,
    pub ip_address: String,
    pub last_status: HostHealth,
    #[serde(default)]
    pub last_tasks: VecDeque<String>,
    pub failure_count: u32,
    pub max_failures: u32,
    pub locked: bool,
    #[serde(default)]
    pub discovered_facts: HashMap<String, Value>,
    #[serde(default)]
    pub vulnerabilities_injected: Vec<String>,
}

impl HostState {
    pub fn new(host_id: impl Into<String>, os: impl Into<String>, ip_address: impl Into<String>) -> Self {
        Self {
            host_id: host_id.into(),
            os: os.into(),
            ip_address: ip_address.into(),
            last_status: HostHealth::Unknown,
            last_tasks: VecDeque::new(),
            failure_count: 0,
            max_failures: DEFAULT_MAX_FAILURES,
            locked: false,
            discovered_facts: HashMap::new(),
            vulnerabilities_injected: Vec::new(),
        }
    }

    pub fn record_task(&mut self, task_id: impl Into<String>) {
        self.last_tasks.push_back(task_id.into());
        while self.last_tasks.len() > LAST_TASKS_RING_SIZE {
            self.last_tasks.pop_front();
        }
    }

    /// Apply an error result (spec.md §4.10 step 3): degrade, bump
    /// `failure_count`, and lock once it reaches `max_failures`.
    pub fn record_error(&mut self) {
        self.last_status = HostHealth::Degraded;
        self.failure_count += 1;
        if self.failure_count >= self.max_failures && !self.locked {
            self.locked = true;
            tracing::warn!(host_id = %self.host_id, failure_count = self.failure_count, max_failures = self.max_failures, "host locked: failure budget exhausted");
        }
    }

    pub fn record_success(&mut self) {
        self.last_status = HostHealth::Healthy;
    }

    pub fn is_injected(&self) -> bool {
        !self.vulnerabilities_injected.is_empty()
    }
}

#[cfg(test)]
#[path = "host_state_tests.rs"]
mod tests;

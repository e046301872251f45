// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Glassdome Contributors

//! Reaper `Task` — a unit of work addressed to one agent-type partition
//! (spec.md §3, §4.7).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// One task published to the task queue. `agent_type` names the consuming
/// partition (`reaper-linux`, `reaper-windows`, `reaper-macos`); `action` is
/// `<os>.<verb>` (e.g. `linux.discover`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub task_id: String,
    pub mission_id: String,
    pub host_id: String,
    pub agent_type: String,
    pub action: String,
    #[serde(default)]
    pub params: HashMap<String, Value>,
}

impl Task {
    pub fn new(
        task_id: impl Into<String>,
        mission_id: impl Into<String>,
        host_id: impl Into<String>,
        agent_type: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            task_id: task_id.into(),
            mission_id: mission_id.into(),
            host_id: host_id.into(),
            agent_type: agent_type.into(),
            action: action.into(),
            params: HashMap::new(),
        }
    }

    pub fn with_params(mut self, params: HashMap<String, Value>) -> Self {
        self.params = params;
        self
    }

    /// The verb suffix of `action` (e.g. `discover` from `linux.discover`).
    pub fn verb(&self) -> &str {
        self.action.rsplit('.').next().unwrap_or(&self.action)
    }
}

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;

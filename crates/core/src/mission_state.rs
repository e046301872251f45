// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Glassdome Contributors

//! Reaper `MissionState` — the per-mission persisted document owned
//! exclusively by one Mission Engine instance (spec.md §3, §4.8–§4.10).

use crate::host_state::HostState;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionStatus {
    Pending,
    Running,
    Completed,
    Failed,
    Cancelled,
}

crate::simple_display! {
    MissionStatus {
        Pending => "pending",
        Running => "running",
        Completed => "completed",
        Failed => "failed",
        Cancelled => "cancelled",
    }
}

impl MissionStatus {
    /// Terminal statuses admit no further state transitions or task
    /// emissions (spec.md §3 invariant).
    pub fn is_terminal(self) -> bool {
        matches!(self, MissionStatus::Completed | MissionStatus::Failed | MissionStatus::Cancelled)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionState {
    pub mission_id: String,
    pub lab_id: String,
    pub mission_type: String,
    pub hosts: HashMap<String, HostState>,
    #[serde(default)]
    pub pending_tasks: Vec<String>,
    #[serde(default)]
    pub completed_tasks: Vec<String>,
    #[serde(default)]
    pub failed_tasks: Vec<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub status: MissionStatus,
}

impl MissionState {
    pub fn new(
        mission_id: impl Into<String>,
        lab_id: impl Into<String>,
        mission_type: impl Into<String>,
        hosts: HashMap<String, HostState>,
        now: chrono::DateTime<chrono::Utc>,
    ) -> Self {
        Self {
            mission_id: mission_id.into(),
            lab_id: lab_id.into(),
            mission_type: mission_type.into(),
            hosts,
            pending_tasks: Vec::new(),
            completed_tasks: Vec::new(),
            failed_tasks: Vec::new(),
            created_at: now,
            updated_at: now,
            status: MissionStatus::Pending,
        }
    }

    /// Record a newly scheduled task (spec.md §4.9 `_schedule_tasks`).
    pub fn schedule(&mut self, task_id: impl Into<String>, now: chrono::DateTime<chrono::Utc>) {
        self.pending_tasks.push(task_id.into());
        self.updated_at = now;
    }

    /// Move a task id out of `pending_tasks` into `completed_tasks` or
    /// `failed_tasks`. Idempotent: reprocessing a task id already moved is a
    /// no-op for the lists (spec.md §8 `ProcessResult` idempotence property).
    pub fn resolve_task(&mut self, task_id: &str, success: bool, now: chrono::DateTime<chrono::Utc>) {
        let was_pending = if let Some(pos) = self.pending_tasks.iter().position(|t| t == task_id) {
            self.pending_tasks.remove(pos);
            true
        } else {
            false
        };
        let target = if success { &mut self.completed_tasks } else { &mut self.failed_tasks };
        if was_pending && !target.iter().any(|t| t == task_id) {
            target.push(task_id.to_string());
        }
        self.updated_at = now;
    }

    /// Terminal condition (spec.md §4.10): no pending tasks and every
    /// unlocked host has a non-empty `vulnerabilities_injected` list.
    pub fn is_complete(&self) -> bool {
        self.pending_tasks.is_empty() && self.hosts.values().all(|h| h.locked || h.is_injected())
    }

    pub fn unlocked_hosts(&self) -> impl Iterator<Item = &HostState> {
        self.hosts.values().filter(|h| !h.locked)
    }
}

#[cfg(test)]
#[path = "mission_state_tests.rs"]
mod tests;

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Glassdome Contributors

//! Reaper `ResultEvent` — the outcome of one [`crate::Task`], published to
//! the per-mission event bus (spec.md §3, §4.11).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Bound applied to captured stdout/stderr before embedding in a result
/// (spec.md §4.11): only the last `TAIL_LIMIT` bytes are kept.
pub const TAIL_LIMIT: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultStatus {
    Success,
    Error,
    Partial,
}

crate::simple_display! {
    ResultStatus {
        Success => "success",
        Error => "error",
        Partial => "partial",
    }
}

/// Truncate `s` to its last [`TAIL_LIMIT`] bytes, keeping the slice on a
/// char boundary.
pub fn tail(s: &str) -> String {
    if s.len() <= TAIL_LIMIT {
        return s.to_string();
    }
    let mut start = s.len() - TAIL_LIMIT;
    while !s.is_char_boundary(start) {
        start += 1;
    }
    s[start..].to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultEvent {
    pub task_id: String,
    pub mission_id: String,
    pub host_id: String,
    pub agent_type: String,
    pub action: String,
    pub status: ResultStatus,
    pub summary: String,
    #[serde(default)]
    pub stdout_tail: String,
    #[serde(default)]
    pub stderr_tail: String,
    #[serde(default)]
    pub data: HashMap<String, Value>,
    pub logs_ref: Option<String>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub retriable: bool,
    pub error_code: Option<String>,
}

impl ResultEvent {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        task_id: impl Into<String>,
        mission_id: impl Into<String>,
        host_id: impl Into<String>,
        agent_type: impl Into<String>,
        action: impl Into<String>,
        status: ResultStatus,
        summary: impl Into<String>,
        timestamp: chrono::DateTime<chrono::Utc>,
    ) -> Self {
        Self {
            task_id: task_id.into(),
            mission_id: mission_id.into(),
            host_id: host_id.into(),
            agent_type: agent_type.into(),
            action: action.into(),
            status,
            summary: summary.into(),
            stdout_tail: String::new(),
            stderr_tail: String::new(),
            data: HashMap::new(),
            logs_ref: None,
            timestamp,
            retriable: false,
            error_code: None,
        }
    }

    /// Build an error result per spec.md §4.11: `UNKNOWN_ACTION` and
    /// `MISSING_PARAM` are non-retriable; transport/credential failures
    /// (`DISCOVERY_FAILED`, `INJECTION_FAILED`, `VERIFICATION_FAILED`,
    /// `AGENT_EXCEPTION`) are retriable.
    #[allow(clippy::too_many_arguments)]
    pub fn error(
        task_id: impl Into<String>,
        mission_id: impl Into<String>,
        host_id: impl Into<String>,
        agent_type: impl Into<String>,
        action: impl Into<String>,
        code: impl Into<String>,
        summary: impl Into<String>,
        timestamp: chrono::DateTime<chrono::Utc>,
    ) -> Self {
        let code = code.into();
        let retriable = !matches!(code.as_str(), "UNKNOWN_ACTION" | "MISSING_PARAM");
        let mut e = Self::new(task_id, mission_id, host_id, agent_type, action, ResultStatus::Error, summary, timestamp);
        e.retriable = retriable;
        e.error_code = Some(code);
        e
    }

    pub fn with_output(mut self, stdout: &str, stderr: &str) -> Self {
        self.stdout_tail = tail(stdout);
        self.stderr_tail = tail(stderr);
        self
    }
}

#[cfg(test)]
#[path = "result_event_tests.rs"]
mod tests;

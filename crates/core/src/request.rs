// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Glassdome Contributors

//! `PendingRequest` — a request moving through the Overseer's gate pipeline
//! (spec.md §3, §4.6).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    Approved,
    Denied,
    Executing,
    Completed,
    Failed,
}

crate::simple_display! {
    RequestStatus {
        Pending => "pending",
        Approved => "approved",
        Denied => "denied",
        Executing => "executing",
        Completed => "completed",
        Failed => "failed",
    }
}

/// A `deploy_vm` / `destroy_vm` / `start_vm` / `stop_vm` request as it
/// travels through [`RequestStatus`]. Always persisted as `pending` before
/// the gate pipeline evaluates it (spec.md §4.6).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingRequest {
    pub request_id: String,
    pub action: String,
    pub user: String,
    pub params: HashMap<String, Value>,
    pub status: RequestStatus,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    pub approved_at: Option<chrono::DateTime<chrono::Utc>>,
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
    pub result: Option<Value>,
    pub denial_reason: Option<String>,
}

impl PendingRequest {
    pub fn new(
        request_id: impl Into<String>,
        action: impl Into<String>,
        user: impl Into<String>,
        params: HashMap<String, Value>,
        submitted_at: chrono::DateTime<chrono::Utc>,
    ) -> Self {
        Self {
            request_id: request_id.into(),
            action: action.into(),
            user: user.into(),
            params,
            status: RequestStatus::Pending,
            submitted_at,
            approved_at: None,
            completed_at: None,
            result: None,
            denial_reason: None,
        }
    }

    pub fn deny(&mut self, reason: impl Into<String>, now: chrono::DateTime<chrono::Utc>) {
        self.status = RequestStatus::Denied;
        self.denial_reason = Some(reason.into());
        self.completed_at = Some(now);
    }

    pub fn approve(&mut self, now: chrono::DateTime<chrono::Utc>) {
        self.status = RequestStatus::Approved;
        self.approved_at = Some(now);
    }
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Glassdome Contributors

//! Registry events (spec.md §3 `StateChange`).

use crate::drift::Severity;
use crate::resource::ResourceState;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateChangeKind {
    Created,
    Updated,
    Deleted,
    StateChanged,
    DriftDetected,
    DriftResolved,
    ReconcileStart,
    ReconcileComplete,
    ReconcileFailed,
    AgentHeartbeat,
}

crate::simple_display! {
    StateChangeKind {
        Created => "created",
        Updated => "updated",
        Deleted => "deleted",
        StateChanged => "state_changed",
        DriftDetected => "drift_detected",
        DriftResolved => "drift_resolved",
        ReconcileStart => "reconcile_start",
        ReconcileComplete => "reconcile_complete",
        ReconcileFailed => "reconcile_failed",
        AgentHeartbeat => "agent_heartbeat",
    }
}

/// Immutable record of a change observed or performed on a [`crate::Resource`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateChange {
    pub kind: StateChangeKind,
    pub resource_id: String,
    pub old_state: Option<ResourceState>,
    pub new_state: Option<ResourceState>,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub lab_id: Option<String>,
    pub agent_name: Option<String>,
    /// `Warning`/`Critical` escalates the event for dashboards and alerting
    /// (spec.md §4.3's "alert-severity deletion event" for Tier-1 lab VMs).
    pub severity: Severity,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl StateChange {
    pub fn new(kind: StateChangeKind, resource_id: impl Into<String>, timestamp: chrono::DateTime<chrono::Utc>) -> Self {
        Self {
            kind,
            resource_id: resource_id.into(),
            old_state: None,
            new_state: None,
            old_value: None,
            new_value: None,
            lab_id: None,
            agent_name: None,
            severity: Severity::Info,
            timestamp,
        }
    }

    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    crate::setters! {
        set {
            old_state: Option<ResourceState>,
            new_state: Option<ResourceState>,
        }
        option {
            old_value: String,
            new_value: String,
            lab_id: String,
            agent_name: String,
        }
    }
}

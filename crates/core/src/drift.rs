// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Glassdome Contributors

//! Drift — divergence between a resource's desired and actual state (spec.md §3, §4.2).

use crate::resource::{DesiredState, Resource, ResourceState};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriftKind {
    Missing,
    Extra,
    StateMismatch,
    NameMismatch,
    ConfigMismatch,
    IpMismatch,
    NetworkMismatch,
}

crate::simple_display! {
    DriftKind {
        Missing => "missing",
        Extra => "extra",
        StateMismatch => "state_mismatch",
        NameMismatch => "name_mismatch",
        ConfigMismatch => "config_mismatch",
        IpMismatch => "ip_mismatch",
        NetworkMismatch => "network_mismatch",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

crate::simple_display! {
    Severity {
        Info => "info",
        Warning => "warning",
        Critical => "critical",
    }
}

/// A detected divergence between a resource's desired and actual state/config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drift {
    pub resource_id: String,
    pub kind: DriftKind,
    pub expected: String,
    pub actual: String,
    pub severity: Severity,
    pub auto_fix: bool,
    /// Short tagged string, e.g. `set_state:running` or `rename:foo` (spec.md §3).
    pub suggested_fix: String,
    pub lab_id: Option<String>,
    pub detected_at: chrono::DateTime<chrono::Utc>,
    pub resolved_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Drift {
    pub fn is_resolved(&self) -> bool {
        self.resolved_at.is_some()
    }
}

/// Pure rule function: spec.md §4.2 `DetectDrift(r)`.
///
/// Returns `None` if neither `desired_state` nor any `desired_config` field
/// is set. Otherwise the first matching rule wins, in order:
/// 1. desired_state set and differs from state → StateMismatch (auto_fix iff tier==1)
/// 2. desired_config.name set and differs from name → NameMismatch (auto_fix true)
/// 3. desired_config.network differs from config.network → NetworkMismatch (auto_fix false, critical)
pub fn detect_drift(r: &Resource, now: chrono::DateTime<chrono::Utc>) -> Option<Drift> {
    let has_desired = r.desired_state.is_some() || !r.desired_config.is_empty();
    if !has_desired {
        return None;
    }

    if let Some(desired) = r.desired_state {
        let desired_as_state =
            if desired == DesiredState::Running { ResourceState::Running } else { ResourceState::Stopped };
        if desired_as_state != r.state {
            return Some(Drift {
                resource_id: r.id.to_string(),
                kind: DriftKind::StateMismatch,
                expected: desired.to_string(),
                actual: r.state.to_string(),
                severity: Severity::Warning,
                auto_fix: r.tier == 1,
                suggested_fix: format!("set_state:{desired}"),
                lab_id: r.lab_id.clone(),
                detected_at: now,
                resolved_at: None,
            });
        }
    }

    if let Some(desired_name) = r.desired_config.get("name") {
        if desired_name != &r.name {
            return Some(Drift {
                resource_id: r.id.to_string(),
                kind: DriftKind::NameMismatch,
                expected: desired_name.clone(),
                actual: r.name.clone(),
                severity: Severity::Warning,
                auto_fix: true,
                suggested_fix: format!("rename:{desired_name}"),
                lab_id: r.lab_id.clone(),
                detected_at: now,
                resolved_at: None,
            });
        }
    }

    if let Some(desired_network) = r.desired_config.get("network") {
        let actual_network = r.config.get("network");
        if Some(desired_network) != actual_network {
            return Some(Drift {
                resource_id: r.id.to_string(),
                kind: DriftKind::NetworkMismatch,
                expected: desired_network.clone(),
                actual: actual_network.cloned().unwrap_or_default(),
                severity: Severity::Critical,
                auto_fix: false,
                suggested_fix: format!("set_network:{desired_network}"),
                lab_id: r.lab_id.clone(),
                detected_at: now,
                resolved_at: None,
            });
        }
    }

    None
}

#[cfg(test)]
#[path = "drift_tests.rs"]
mod tests;

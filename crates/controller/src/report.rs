// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Glassdome Contributors

//! The `ReconcileLab(id)` manual-trigger result shape (spec.md §4.4).

/// Outcome of reconciling one lab, whether from the background loop or a
/// manual `ReconcileLab(id)` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub lab_id: String,
    pub vms_checked: u32,
    pub drifts_detected: u32,
    pub drifts_fixed: u32,
    pub errors: Vec<String>,
}

impl ReconcileReport {
    pub fn new(lab_id: impl Into<String>) -> Self {
        Self { lab_id: lab_id.into(), ..Default::default() }
    }

    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

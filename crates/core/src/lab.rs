// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Glassdome Contributors

//! `LabSnapshot` — a derived, never-stored view of a lab's resources (spec.md §3).

use crate::resource::Resource;

/// A lab's resources grouped into VMs, networks, and the gateway VM (the VM
/// whose config carries `role=gateway`), with a derived health flag.
#[derive(Debug, Clone)]
pub struct LabSnapshot {
    pub lab_id: String,
    pub vms: Vec<Resource>,
    pub networks: Vec<Resource>,
    pub gateway: Option<Resource>,
    pub has_active_drift: bool,
}

impl LabSnapshot {
    /// Build a snapshot from a flat list of a lab's resources and whether any
    /// of them currently carry an unresolved drift.
    pub fn build(lab_id: impl Into<String>, resources: Vec<Resource>, has_active_drift: bool) -> Self {
        let mut vms = Vec::new();
        let mut networks = Vec::new();
        let mut gateway = None;

        for r in resources {
            use crate::resource::ResourceType::*;
            match r.resource_type() {
                LabVm | Vm => {
                    if r.config.get("role").map(String::as_str) == Some("gateway") {
                        gateway = Some(r.clone());
                    }
                    vms.push(r);
                }
                LabNetwork => networks.push(r),
                _ => {}
            }
        }

        Self { lab_id: lab_id.into(), vms, networks, gateway, has_active_drift }
    }

    pub fn total_vms(&self) -> usize {
        self.vms.len()
    }

    pub fn running_vms(&self) -> usize {
        self.vms.iter().filter(|v| v.state == crate::resource::ResourceState::Running).count()
    }

    /// No active drifts ∧ running_vms == total_vms (spec.md §3).
    pub fn healthy(&self) -> bool {
        !self.has_active_drift && self.running_vms() == self.total_vms()
    }
}

#[cfg(test)]
#[path = "lab_tests.rs"]
mod tests;

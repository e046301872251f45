// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Glassdome Contributors

//! System State (C5, spec.md §4.5): the Overseer's durable belief about
//! every VM/Host/Service/PendingRequest it knows of. Grounded on
//! `original_source/glassdome/overseer/state.py`'s `SystemState` —
//! same four maps, same `has_resources` predicate, same save-on-every-
//! mutation policy — but persisted with the write-temp-then-rename idiom
//! spec.md §6 requires ("The file is overwritten atomically on each save")
//! rather than the Python original's plain `json.dump`, matching the
//! atomic-write convention already established for the Reaper Mission
//! Store (`glassdome_reaper::MissionStore`).

use crate::error::OverseerError;
use chrono::{DateTime, Utc};
use glassdome_core::{host_key, Host, PendingRequest, RequestStatus, ResourceSpec, Service, Vm, VmStatus};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

fn service_key(vm_id: &str, name: &str) -> String {
    format!("{vm_id}:{name}")
}

#[derive(Debug, Clone, Serialize)]
pub struct StateSummary {
    pub total_vms: usize,
    pub running_vms: usize,
    pub production_vms: usize,
    pub total_hosts: usize,
    pub healthy_hosts: usize,
    pub total_services: usize,
    pub pending_requests: usize,
    pub approved_requests: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SystemState {
    #[serde(skip)]
    path: PathBuf,
    #[serde(default)]
    pub vms: HashMap<String, Vm>,
    #[serde(default)]
    pub hosts: HashMap<String, Host>,
    #[serde(default)]
    pub services: HashMap<String, Service>,
    #[serde(default)]
    pub requests: HashMap<String, PendingRequest>,
    pub last_saved: Option<DateTime<Utc>>,
}

impl SystemState {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), ..Default::default() }
    }

    /// Loads the document at `path` if it exists, else starts empty
    /// (matches the Python original's `load()`, which silently does
    /// nothing when the file is absent).
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, OverseerError> {
        let path = path.into();
        if !path.exists() {
            return Ok(Self::new(path));
        }
        let bytes = fs::read(&path)?;
        let mut state: SystemState = serde_json::from_slice(&bytes)?;
        state.path = path;
        Ok(state)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Forces an immediate persist with no accompanying mutation — used by
    /// `OverseerEntity::shutdown` (spec.md §4.6's `self.state.save()` call).
    pub fn persist(&mut self, now: DateTime<Utc>) -> Result<(), OverseerError> {
        self.save(now)
    }

    /// Write-temp-then-rename (spec.md §6: atomic on every save).
    fn save(&mut self, now: DateTime<Utc>) -> Result<(), OverseerError> {
        self.last_saved = Some(now);
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(self)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    // ── VM management ──────────────────────────────────────────────

    pub fn add_vm(&mut self, vm: Vm, now: DateTime<Utc>) -> Result<(), OverseerError> {
        self.vms.insert(vm.id.clone(), vm);
        self.save(now)
    }

    pub fn update_vm(&mut self, vm_id: &str, now: DateTime<Utc>, update: impl FnOnce(&mut Vm)) -> Result<(), OverseerError> {
        let Some(vm) = self.vms.get_mut(vm_id) else { return Ok(()) };
        update(vm);
        vm.last_checked = Some(now);
        self.save(now)
    }

    pub fn get_vm(&self, vm_id: &str) -> Option<&Vm> {
        self.vms.get(vm_id)
    }

    pub fn remove_vm(&mut self, vm_id: &str, now: DateTime<Utc>) -> Result<(), OverseerError> {
        if self.vms.remove(vm_id).is_none() {
            return Ok(());
        }
        self.save(now)
    }

    pub fn is_production(&self, vm_id: &str) -> bool {
        self.vms.get(vm_id).is_some_and(|vm| vm.is_production)
    }

    pub fn vms_by_platform(&self, platform: &str) -> Vec<&Vm> {
        self.vms.values().filter(|vm| vm.platform == platform).collect()
    }

    pub fn running_vms(&self) -> Vec<&Vm> {
        self.vms.values().filter(|vm| vm.status == VmStatus::Running).collect()
    }

    // ── Host management ─────────────────────────────────────────────

    pub fn add_host(&mut self, host: Host, now: DateTime<Utc>) -> Result<(), OverseerError> {
        self.hosts.insert(host.key(), host);
        self.save(now)
    }

    pub fn update_host(&mut self, platform: &str, identifier: &str, now: DateTime<Utc>, update: impl FnOnce(&mut Host)) -> Result<(), OverseerError> {
        let Some(host) = self.hosts.get_mut(&host_key(platform, identifier)) else { return Ok(()) };
        update(host);
        host.last_checked = Some(now);
        self.save(now)
    }

    pub fn get_host(&self, platform: &str, identifier: &str) -> Option<&Host> {
        self.hosts.get(&host_key(platform, identifier))
    }

    pub fn healthy_hosts(&self) -> Vec<&Host> {
        self.hosts.values().filter(|h| h.status == glassdome_core::HostStatus::Healthy).collect()
    }

    // ── Service management ──────────────────────────────────────────

    pub fn add_service(&mut self, service: Service, now: DateTime<Utc>) -> Result<(), OverseerError> {
        self.services.insert(service_key(&service.vm_id, &service.name), service);
        self.save(now)
    }

    pub fn services_on_vm(&self, vm_id: &str) -> Vec<&Service> {
        self.services.values().filter(|s| s.vm_id == vm_id).collect()
    }

    // ── Request management ──────────────────────────────────────────

    pub fn add_request(&mut self, request: PendingRequest, now: DateTime<Utc>) -> Result<(), OverseerError> {
        self.requests.insert(request.request_id.clone(), request);
        self.save(now)
    }

    pub fn update_request(&mut self, request_id: &str, now: DateTime<Utc>, update: impl FnOnce(&mut PendingRequest)) -> Result<(), OverseerError> {
        let Some(request) = self.requests.get_mut(request_id) else { return Ok(()) };
        update(request);
        self.save(now)
    }

    pub fn get_request(&self, request_id: &str) -> Option<&PendingRequest> {
        self.requests.get(request_id)
    }

    pub fn pending_requests(&self) -> Vec<&PendingRequest> {
        self.requests.values().filter(|r| r.status == RequestStatus::Pending).collect()
    }

    pub fn approved_requests(&self) -> Vec<&PendingRequest> {
        self.requests.values().filter(|r| r.status == RequestStatus::Approved).collect()
    }

    // ── Resource calculations ───────────────────────────────────────

    /// `has_resources(platform, identifier, required)` (spec.md §4.5):
    /// a host that cannot be found has insufficient resources.
    pub fn has_resources(&self, platform: &str, identifier: &str, required: &ResourceSpec) -> bool {
        self.get_host(platform, identifier).is_some_and(|h| h.has_resources(required))
    }

    /// The request gate's `deploy_vm` resource check (spec.md §4.5/§4.6 step
    /// 3): no target host is named up front, so this is satisfied if
    /// `has_resources` holds for any host on the requested platform.
    pub fn has_capacity_on_platform(&self, platform: &str, required: &ResourceSpec) -> bool {
        self.hosts
            .values()
            .filter(|h| h.platform == platform)
            .any(|h| self.has_resources(&h.platform, &h.identifier, required))
    }

    // ── Summary ──────────────────────────────────────────────────────

    pub fn summary(&self) -> StateSummary {
        StateSummary {
            total_vms: self.vms.len(),
            running_vms: self.vms.values().filter(|v| v.status == VmStatus::Running).count(),
            production_vms: self.vms.values().filter(|v| v.is_production).count(),
            total_hosts: self.hosts.len(),
            healthy_hosts: self.healthy_hosts().len(),
            total_services: self.services.len(),
            pending_requests: self.pending_requests().len(),
            approved_requests: self.approved_requests().len(),
        }
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;

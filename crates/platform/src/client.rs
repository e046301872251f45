// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Glassdome Contributors

//! `PlatformClient` (C1, spec.md §4.1): the uniform CRUD contract every
//! platform adapter satisfies. Adapters must be safe for concurrent call
//! from multiple tasks; connection pooling and rate-limit accounting are
//! each adapter's own responsibility.

use crate::error::PlatformError;
use async_trait::async_trait;
use glassdome_core::{Host, ResourceState};
use std::collections::HashMap;

/// Declarative spec for `CreateVM`. Memory in MiB, disk in GiB, cpu as
/// integer cores — never platform-native units.
#[derive(Debug, Clone, Default)]
pub struct VmSpec {
    pub name: String,
    pub cpu: u32,
    pub memory_mib: u64,
    pub disk_gib: u64,
    pub image: Option<String>,
    pub network: Option<String>,
    pub extra: HashMap<String, String>,
}

impl VmSpec {
    pub fn new(name: impl Into<String>, cpu: u32, memory_mib: u64, disk_gib: u64) -> Self {
        Self { name: name.into(), cpu, memory_mib, disk_gib, image: None, network: None, extra: HashMap::new() }
    }
}

/// A VM as reported by a platform, translated into platform-agnostic shape.
/// Agents (C3) fold this into a [`glassdome_core::Resource`]; the tier is
/// stamped by the agent, not carried here.
#[derive(Debug, Clone)]
pub struct PlatformVm {
    pub platform_id: String,
    pub name: String,
    pub state: ResourceState,
    pub is_template: bool,
    pub ip: Option<String>,
    pub config: HashMap<String, String>,
}

impl PlatformVm {
    pub fn new(platform_id: impl Into<String>, name: impl Into<String>, state: ResourceState) -> Self {
        Self { platform_id: platform_id.into(), name: name.into(), state, is_template: false, ip: None, config: HashMap::new() }
    }
}

/// A network/subnet as reported by a platform.
#[derive(Debug, Clone)]
pub struct NetworkInfo {
    pub id: String,
    pub name: String,
    pub cidr: Option<String>,
}

/// Uniform CRUD over VMs/networks per platform (spec.md §4.1). Every method
/// is tagged with one of [`PlatformError`]'s four kinds; callers branch on
/// `Classify::kind` rather than matching concrete variants.
#[async_trait]
pub trait PlatformClient: Send + Sync + 'static {
    /// Stable platform tag, e.g. `"proxmox"`, `"aws"` — used to build
    /// `ResourceId`s and to route config lookups.
    fn platform(&self) -> &str;

    async fn test_connection(&self) -> Result<(), PlatformError>;

    async fn list_vms(&self) -> Result<Vec<PlatformVm>, PlatformError>;

    async fn get_vm(&self, platform_id: &str) -> Result<Option<PlatformVm>, PlatformError>;

    async fn create_vm(&self, spec: &VmSpec) -> Result<PlatformVm, PlatformError>;

    async fn start_vm(&self, platform_id: &str) -> Result<(), PlatformError>;

    async fn stop_vm(&self, platform_id: &str) -> Result<(), PlatformError>;

    /// Idempotent: deleting a missing VM is success, not `NotFound`.
    async fn delete_vm(&self, platform_id: &str) -> Result<(), PlatformError>;

    async fn rename_vm(&self, platform_id: &str, new_name: &str) -> Result<(), PlatformError>;

    async fn get_vm_ip(&self, platform_id: &str) -> Result<Option<String>, PlatformError>;

    async fn list_hosts(&self) -> Result<Vec<Host>, PlatformError>;

    async fn list_networks(&self) -> Result<Vec<NetworkInfo>, PlatformError>;
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Glassdome Contributors

//! In-memory `PlatformClient` for exercising agents, the Lab Controller, and
//! the Overseer's execution loop without a real platform.

use crate::client::{NetworkInfo, PlatformVm, VmSpec};
use crate::error::PlatformError;
use crate::PlatformClient;
use async_trait::async_trait;
use glassdome_core::{Host, ResourceState};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Default)]
struct Inner {
    vms: HashMap<String, PlatformVm>,
    hosts: Vec<Host>,
    networks: Vec<NetworkInfo>,
    next_error: Option<PlatformError>,
}

/// A fully in-memory stand-in for a real platform adapter. Seed it with
/// [`FakeClient::seed_vm`]/[`FakeClient::seed_host`], or make the next call
/// fail with [`FakeClient::fail_next`].
#[derive(Clone)]
pub struct FakeClient {
    platform: String,
    inner: Arc<Mutex<Inner>>,
    next_id: Arc<AtomicU64>,
}

impl FakeClient {
    pub fn new(platform: impl Into<String>) -> Self {
        Self { platform: platform.into(), inner: Arc::new(Mutex::new(Inner::default())), next_id: Arc::new(AtomicU64::new(1)) }
    }

    pub fn seed_vm(&self, vm: PlatformVm) {
        self.inner.lock().vms.insert(vm.platform_id.clone(), vm);
    }

    pub fn seed_host(&self, host: Host) {
        self.inner.lock().hosts.push(host);
    }

    pub fn seed_network(&self, network: NetworkInfo) {
        self.inner.lock().networks.push(network);
    }

    /// The next call to any `PlatformClient` method returns this error once.
    pub fn fail_next(&self, err: PlatformError) {
        self.inner.lock().next_error = Some(err);
    }

    fn take_failure(&self) -> Option<PlatformError> {
        self.inner.lock().next_error.take()
    }
}

#[async_trait]
impl PlatformClient for FakeClient {
    fn platform(&self) -> &str {
        &self.platform
    }

    async fn test_connection(&self) -> Result<(), PlatformError> {
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        Ok(())
    }

    async fn list_vms(&self) -> Result<Vec<PlatformVm>, PlatformError> {
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        Ok(self.inner.lock().vms.values().cloned().collect())
    }

    async fn get_vm(&self, platform_id: &str) -> Result<Option<PlatformVm>, PlatformError> {
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        Ok(self.inner.lock().vms.get(platform_id).cloned())
    }

    async fn create_vm(&self, spec: &VmSpec) -> Result<PlatformVm, PlatformError> {
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        let platform_id = self.next_id.fetch_add(1, Ordering::SeqCst).to_string();
        let vm = PlatformVm::new(platform_id.clone(), spec.name.clone(), ResourceState::Running);
        self.inner.lock().vms.insert(platform_id, vm.clone());
        Ok(vm)
    }

    async fn start_vm(&self, platform_id: &str) -> Result<(), PlatformError> {
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        let mut inner = self.inner.lock();
        match inner.vms.get_mut(platform_id) {
            Some(vm) => {
                vm.state = ResourceState::Running;
                Ok(())
            }
            None => Err(PlatformError::NotFound(platform_id.to_string())),
        }
    }

    async fn stop_vm(&self, platform_id: &str) -> Result<(), PlatformError> {
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        let mut inner = self.inner.lock();
        match inner.vms.get_mut(platform_id) {
            Some(vm) => {
                vm.state = ResourceState::Stopped;
                Ok(())
            }
            None => Err(PlatformError::NotFound(platform_id.to_string())),
        }
    }

    async fn delete_vm(&self, platform_id: &str) -> Result<(), PlatformError> {
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        self.inner.lock().vms.remove(platform_id);
        Ok(())
    }

    async fn rename_vm(&self, platform_id: &str, new_name: &str) -> Result<(), PlatformError> {
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        let mut inner = self.inner.lock();
        match inner.vms.get_mut(platform_id) {
            Some(vm) => {
                vm.name = new_name.to_string();
                Ok(())
            }
            None => Err(PlatformError::NotFound(platform_id.to_string())),
        }
    }

    async fn get_vm_ip(&self, platform_id: &str) -> Result<Option<String>, PlatformError> {
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        Ok(self.inner.lock().vms.get(platform_id).and_then(|vm| vm.ip.clone()))
    }

    async fn list_hosts(&self) -> Result<Vec<Host>, PlatformError> {
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        Ok(self.inner.lock().hosts.clone())
    }

    async fn list_networks(&self) -> Result<Vec<NetworkInfo>, PlatformError> {
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        Ok(self.inner.lock().networks.clone())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;

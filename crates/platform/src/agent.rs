// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Glassdome Contributors

//! Platform Agent (C3, spec.md §4.3): a periodic poller that translates one
//! platform's reality into the Registry.

use crate::client::{PlatformClient, PlatformVm};
use glassdome_core::{Clock, Resource, ResourceId, ResourceType, Severity, StateChange, StateChangeKind, SystemClock};
use glassdome_registry::Registry;
use serde_json::json;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::{watch, RwLock};

/// Upper bound on a single poll cycle (spec.md §4.3: "recommended 15s
/// total"). A poll that exceeds this is dropped, not retried mid-cycle.
pub const POLL_TIMEOUT: Duration = Duration::from_secs(15);

/// Periodic poller bound to one platform client, one tier, and one Registry.
/// Generic over the clock the same way [`glassdome_registry::Registry`] is —
/// `Clock: Clone` rules out `dyn Clock`, so it is threaded as a parameter.
pub struct PlatformAgent<P: PlatformClient, C: Clock = SystemClock> {
    name: String,
    tier: u8,
    poll_interval: Duration,
    instance: Option<String>,
    track_lab_vms_only: bool,
    client: P,
    registry: Registry<C>,
    clock: C,
    known: RwLock<HashSet<String>>,
    poll_count: AtomicU64,
    error_count: AtomicU64,
}

impl<P: PlatformClient, C: Clock> PlatformAgent<P, C> {
    pub fn new(name: impl Into<String>, tier: u8, poll_interval: Duration, client: P, registry: Registry<C>, clock: C) -> Self {
        Self {
            name: name.into(),
            tier,
            poll_interval,
            instance: None,
            track_lab_vms_only: false,
            client,
            registry,
            clock,
            known: RwLock::new(HashSet::new()),
            poll_count: AtomicU64::new(0),
            error_count: AtomicU64::new(0),
        }
    }

    pub fn instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = Some(instance.into());
        self
    }

    /// Tier-1 agents may choose to register only VMs with a resolvable
    /// `lab_id`, skipping everything else on the platform.
    pub fn track_lab_vms_only(mut self, yes: bool) -> Self {
        self.track_lab_vms_only = yes;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the poll loop at `poll_interval` until `shutdown` is set to `true`.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(self.poll_interval);
        loop {
            tokio::select! {
                _ = ticker.tick() => self.poll_once().await,
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        break;
                    }
                }
            }
        }
    }

    /// One poll tick: list → translate → register → diff deletions →
    /// heartbeat. Never panics or propagates — errors are counted and
    /// logged, per spec.md §4.3 ("must not crash its host process").
    pub async fn poll_once(&self) {
        self.poll_count.fetch_add(1, Ordering::Relaxed);

        match tokio::time::timeout(POLL_TIMEOUT, self.client.list_vms()).await {
            Ok(Ok(vms)) => self.reconcile(vms).await,
            Ok(Err(err)) => {
                self.error_count.fetch_add(1, Ordering::Relaxed);
                tracing::error!(agent = %self.name, error = %err, "poll error");
            }
            Err(_) => {
                tracing::warn!(agent = %self.name, "poll timeout, will retry next cycle");
            }
        }

        self.registry.agent_heartbeat(
            &self.name,
            json!({"polls": self.poll_count.load(Ordering::Relaxed), "errors": self.error_count.load(Ordering::Relaxed)}),
        );
    }

    async fn reconcile(&self, vms: Vec<PlatformVm>) {
        let mut current = HashSet::with_capacity(vms.len());

        for vm in vms {
            if self.tier == 1 && self.track_lab_vms_only && extract_lab_id(&vm.name).is_none() {
                continue;
            }
            let Some(resource) = self.to_resource(&vm) else { continue };
            current.insert(resource.id.to_string());
            self.registry.register(resource);
        }

        let previous = {
            let mut known = self.known.write().await;
            std::mem::replace(&mut *known, current.clone())
        };

        for missing in previous.difference(&current) {
            self.handle_deleted(missing).await;
        }
    }

    async fn handle_deleted(&self, resource_id: &str) {
        let Some(resource) = self.registry.get(resource_id) else { return };
        let was_lab_vm = resource.resource_type() == ResourceType::LabVm;

        self.registry.delete(resource_id);

        if self.tier == 1 && was_lab_vm {
            tracing::warn!(agent = %self.name, resource_id, "lab VM deleted");
            let alert = StateChange::new(StateChangeKind::Deleted, resource_id, self.clock.utc_now())
                .old_state(Some(resource.state))
                .severity(Severity::Critical)
                .agent_name(self.name.clone());
            let alert = match &resource.lab_id {
                Some(lab_id) => alert.lab_id(lab_id.clone()),
                None => alert,
            };
            self.registry.publish_event(alert);
        }
    }

    /// `None` if the platform reported a `platform_id` containing a colon —
    /// never expected in practice, but a malformed adapter must not crash
    /// the poll loop over it.
    fn to_resource(&self, vm: &PlatformVm) -> Option<Resource> {
        let resource_type = if vm.is_template {
            ResourceType::Template
        } else if extract_lab_id(&vm.name).is_some() {
            ResourceType::LabVm
        } else {
            ResourceType::Vm
        };

        let id = match ResourceId::new(self.client.platform(), self.instance.clone(), resource_type, vm.platform_id.clone()) {
            Ok(id) => id,
            Err(err) => {
                tracing::error!(agent = %self.name, vm = %vm.name, error = %err, "skipping vm with invalid platform id");
                return None;
            }
        };

        let mut resource = Resource::new(id, vm.name.clone(), self.tier, self.clock.utc_now());
        resource.state = vm.state;
        resource.lab_id = extract_lab_id(&vm.name);
        resource.config = vm.config.clone();
        if let Some(ip) = &vm.ip {
            resource.config.insert("ip_address".to_string(), ip.clone());
        }
        Some(resource)
    }
}

/// Extract a lab id from a VM name by convention: `lab-<labid>-...` (spec.md
/// §4.3). Deterministic and documented, as the spec requires of any adapter
/// that chooses naming-convention association over a tag/description field.
pub fn extract_lab_id(name: &str) -> Option<String> {
    let mut parts = name.splitn(3, '-');
    if parts.next()? != "lab" {
        return None;
    }
    let lab_id = parts.next()?;
    if lab_id.is_empty() {
        None
    } else {
        Some(lab_id.to_string())
    }
}

#[cfg(test)]
#[path = "agent_tests.rs"]
mod tests;

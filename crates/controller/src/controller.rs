// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Glassdome Contributors

//! [`LabController`]: Tier-1 reconciliation (spec.md §4.4), grounded on
//! `original_source/glassdome/registry/controllers/lab_controller.py`.

use crate::ReconcileReport;
use glassdome_core::{Clock, Drift, DriftKind, Resource, StateChange, StateChangeKind, SystemClock};
use glassdome_platform::PlatformClient;
use glassdome_registry::Registry;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{info, warn};

/// Reconciles lab VMs against their desired state. Never creates or deletes
/// resources — only `StartVM`/`StopVM`/`RenameVM` on existing ones.
pub struct LabController<C: Clock = SystemClock> {
    registry: Registry<C>,
    clients: RwLock<HashMap<String, Arc<dyn PlatformClient>>>,
    check_interval: Duration,
    auto_fix: bool,
    clock: C,
    check_count: AtomicU64,
    fix_count: AtomicU64,
}

impl<C: Clock> LabController<C> {
    pub fn new(registry: Registry<C>, clock: C, check_interval: Duration, auto_fix: bool) -> Self {
        Self {
            registry,
            clients: RwLock::new(HashMap::new()),
            check_interval,
            auto_fix,
            clock,
            check_count: AtomicU64::new(0),
            fix_count: AtomicU64::new(0),
        }
    }

    /// Register the platform client used to fix drift for resources carrying
    /// a given `instance` tag (the `instance` segment of a `ResourceId`, or
    /// `"default"` for resources with none).
    pub fn register_client(&self, instance: impl Into<String>, client: Arc<dyn PlatformClient>) {
        self.clients.write().insert(instance.into(), client);
    }

    pub fn check_count(&self) -> u64 {
        self.check_count.load(Ordering::Relaxed)
    }

    pub fn fix_count(&self) -> u64 {
        self.fix_count.load(Ordering::Relaxed)
    }

    /// Background reconcile loop: ticks every `check_interval` until
    /// `shutdown` carries `true`.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(self.check_interval);
        loop {
            tokio::select! {
                _ = ticker.tick() => self.tick().await,
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        break;
                    }
                }
            }
        }
    }

    async fn tick(&self) {
        self.check_count.fetch_add(1, Ordering::Relaxed);
        for lab_id in self.registry.list_labs() {
            self.reconcile_lab_vms(&lab_id).await;
        }
    }

    /// `ReconcileLab(id)` manual trigger (spec.md §4.4): the same per-VM
    /// logic as the background tick, plus explicit start/complete(/failed)
    /// events and a returned count report. `None` if the lab is unknown.
    pub async fn reconcile_lab(&self, lab_id: &str) -> Option<ReconcileReport> {
        self.registry.get_lab_snapshot(lab_id)?;

        let start = self.clock.utc_now();
        self.registry.publish_event(StateChange::new(StateChangeKind::ReconcileStart, lab_id, start).lab_id(lab_id));

        let report = self.reconcile_lab_vms(lab_id).await;

        let done = self.clock.utc_now();
        let kind = if report.is_success() { StateChangeKind::ReconcileComplete } else { StateChangeKind::ReconcileFailed };
        self.registry.publish_event(StateChange::new(kind, lab_id, done).lab_id(lab_id));

        Some(report)
    }

    async fn reconcile_lab_vms(&self, lab_id: &str) -> ReconcileReport {
        let mut report = ReconcileReport::new(lab_id);
        let Some(snapshot) = self.registry.get_lab_snapshot(lab_id) else { return report };

        for vm in snapshot.vms {
            report.vms_checked += 1;
            let Some(drift) = self.registry.check_drift(&vm.id.to_string()) else { continue };
            report.drifts_detected += 1;

            if !(self.auto_fix && drift.auto_fix) {
                continue;
            }
            match self.fix_drift(&vm, &drift).await {
                Ok(true) => report.drifts_fixed += 1,
                Ok(false) => {}
                Err(err) => {
                    self.publish_failed(&vm, &err);
                    report.errors.push(format!("failed to fix {}: {err}", vm.name));
                }
            }
        }
        report
    }

    async fn fix_drift(&self, resource: &Resource, drift: &Drift) -> Result<bool, String> {
        info!(drift = %drift.kind, resource = %resource.name, "attempting to fix drift");
        match drift.kind {
            DriftKind::StateMismatch => self.fix_state_drift(resource, drift).await,
            DriftKind::NameMismatch => self.fix_name_drift(resource, drift).await,
            other => {
                warn!(drift = %other, "no auto-fix available for drift kind");
                Ok(false)
            }
        }
    }

    fn client_for(&self, resource: &Resource) -> Option<Arc<dyn PlatformClient>> {
        let key = resource.id.instance.as_deref().unwrap_or("default");
        self.clients.read().get(key).cloned()
    }

    async fn fix_state_drift(&self, resource: &Resource, drift: &Drift) -> Result<bool, String> {
        let Some(client) = self.client_for(resource) else {
            return Err(format!("no platform client for instance {:?}", resource.id.instance));
        };

        let outcome = if drift.expected == "running" {
            client.start_vm(&resource.id.platform_id).await
        } else if drift.expected == "stopped" {
            client.stop_vm(&resource.id.platform_id).await
        } else {
            return Ok(false);
        };

        match outcome {
            Ok(()) => {
                self.fix_count.fetch_add(1, Ordering::Relaxed);
                self.resolve_and_complete(resource);
                Ok(true)
            }
            Err(err) => Err(err.to_string()),
        }
    }

    async fn fix_name_drift(&self, resource: &Resource, drift: &Drift) -> Result<bool, String> {
        let Some(client) = self.client_for(resource) else {
            return Err(format!("no platform client for instance {:?}", resource.id.instance));
        };

        let expected_name = drift.expected.clone();
        match client.rename_vm(&resource.id.platform_id, &expected_name).await {
            Ok(()) => {
                self.fix_count.fetch_add(1, Ordering::Relaxed);
                let mut renamed = resource.clone();
                renamed.name = expected_name;
                self.registry.register(renamed);
                self.resolve_and_complete(resource);
                Ok(true)
            }
            Err(err) => Err(err.to_string()),
        }
    }

    /// A failed fix leaves the drift recorded and emits `ReconcileFailed`
    /// (spec.md §4.4): published from both the background tick and the
    /// manual `reconcile_lab` trigger, since both funnel through
    /// `reconcile_lab_vms`.
    fn publish_failed(&self, resource: &Resource, error: &str) {
        warn!(resource = %resource.name, error, "failed to fix drift");
        let resource_id = resource.id.to_string();
        let now = self.clock.utc_now();
        let event = StateChange::new(StateChangeKind::ReconcileFailed, &resource_id, now);
        let event = match &resource.lab_id {
            Some(lab_id) => event.lab_id(lab_id),
            None => event,
        };
        self.registry.publish_event(event);
    }

    fn resolve_and_complete(&self, resource: &Resource) {
        let resource_id = resource.id.to_string();
        self.registry.resolve_drift(&resource_id);

        let now = self.clock.utc_now();
        let event = StateChange::new(StateChangeKind::ReconcileComplete, &resource_id, now);
        let event = match &resource.lab_id {
            Some(lab_id) => event.lab_id(lab_id),
            None => event,
        };
        self.registry.publish_event(event);
    }
}

impl LabController<SystemClock> {
    pub fn with_defaults(registry: Registry<SystemClock>) -> Self {
        Self::new(registry, SystemClock, Duration::from_secs(1), true)
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;

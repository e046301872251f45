// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Glassdome Contributors

//! Overseer Entity (C6, spec.md §4.6): the four concurrent loops, the
//! request gate, and Reaper mission lifecycle management. Grounded on
//! `original_source/glassdome/overseer/entity.py`'s `OverseerEntity` —
//! `monitor_loop`/`execution_loop`/`state_sync_loop`/`health_check_loop`,
//! `receive_request`, and `create_reaper_mission`/`cancel_reaper_mission`,
//! carried over with the teacher's `watch::Receiver<bool>` shutdown
//! signalling (`crates/controller/src/controller.rs`) replacing the
//! original's cooperative `asyncio.Task` cancellation.

use crate::config::GlassdomeConfig;
use crate::error::OverseerError;
use crate::execution_queue::ExecutionQueue;
use crate::gate::{self, GateVerdict, Params};
use crate::knowledge_base::{AdvisoryContext, KnowledgeBase, NoopKnowledgeBase};
use crate::state::{StateSummary, SystemState};
use glassdome_core::{Clock, HostState, MissionState, MissionStatus, PendingRequest, SystemClock, Vm, VmStatus};
use glassdome_reaper::{EventBus, MissionEngine, MissionStore, TaskQueue, VulnerabilityPlanner};
use parking_lot::Mutex;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Outcome of [`OverseerEntity::receive_request`] (spec.md §6).
#[derive(Debug, Clone, PartialEq)]
pub enum GateResult {
    Approved { request_id: String, queue_position: usize },
    Denied { request_id: String, reason: String },
}

/// One host the caller wants a new Reaper mission to target
/// (spec.md §4.9 `create_reaper_mission`'s `target_hosts` argument).
#[derive(Debug, Clone)]
pub struct TargetHost {
    pub host_id: String,
    pub os: String,
    pub ip_address: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CreateMissionOutcome {
    Created { mission_id: String, target_hosts: usize },
    AlreadyExists,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct StatsSnapshot {
    pub requests_received: u64,
    pub requests_approved: u64,
    pub requests_denied: u64,
    pub requests_completed: u64,
    pub requests_failed: u64,
    pub issues_detected: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct OverseerStatus {
    pub monitoring_active: bool,
    pub execution_active: bool,
    pub execution_queue_depth: usize,
    pub reaper_missions_running: usize,
    pub state: StateSummary,
    pub stats: StatsSnapshot,
}

#[derive(Default)]
struct Stats {
    requests_received: AtomicU64,
    requests_approved: AtomicU64,
    requests_denied: AtomicU64,
    requests_completed: AtomicU64,
    requests_failed: AtomicU64,
    issues_detected: AtomicU64,
}

impl Stats {
    fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            requests_received: self.requests_received.load(Ordering::Relaxed),
            requests_approved: self.requests_approved.load(Ordering::Relaxed),
            requests_denied: self.requests_denied.load(Ordering::Relaxed),
            requests_completed: self.requests_completed.load(Ordering::Relaxed),
            requests_failed: self.requests_failed.load(Ordering::Relaxed),
            issues_detected: self.issues_detected.load(Ordering::Relaxed),
        }
    }
}

struct ReaperMissionHandle {
    shutdown_tx: watch::Sender<bool>,
    #[allow(dead_code)]
    join: JoinHandle<()>,
}

/// The Overseer itself: request gate, four background loops, and Reaper
/// mission lifecycle management, all sharing one [`SystemState`].
pub struct OverseerEntity<C: Clock = SystemClock> {
    config: GlassdomeConfig,
    state: Arc<Mutex<SystemState>>,
    knowledge_base: Arc<dyn KnowledgeBase>,
    execution_queue: Arc<ExecutionQueue>,
    clock: C,
    monitoring_active: AtomicBool,
    execution_active: AtomicBool,
    stats: Stats,
    reaper_task_queue: Arc<TaskQueue>,
    reaper_event_bus: Arc<EventBus>,
    reaper_mission_store: Arc<MissionStore>,
    reaper_planner: VulnerabilityPlanner,
    reaper_missions: Mutex<HashMap<String, ReaperMissionHandle>>,
}

impl<C: Clock> OverseerEntity<C> {
    pub fn new(config: GlassdomeConfig, state: SystemState, knowledge_base: Arc<dyn KnowledgeBase>, clock: C) -> Result<Self, OverseerError> {
        let reaper_mission_store = Arc::new(MissionStore::new(&config.mission_store_dir)?);
        Ok(Self {
            config,
            state: Arc::new(Mutex::new(state)),
            knowledge_base,
            execution_queue: Arc::new(ExecutionQueue::new()),
            clock,
            monitoring_active: AtomicBool::new(true),
            execution_active: AtomicBool::new(true),
            stats: Stats::default(),
            reaper_task_queue: Arc::new(TaskQueue::new()),
            reaper_event_bus: Arc::new(EventBus::new()),
            reaper_mission_store,
            reaper_planner: VulnerabilityPlanner::default(),
            reaper_missions: Mutex::new(HashMap::new()),
        })
    }

    pub fn config(&self) -> &GlassdomeConfig {
        &self.config
    }

    pub fn status(&self) -> OverseerStatus {
        OverseerStatus {
            monitoring_active: self.monitoring_active.load(Ordering::Relaxed),
            execution_active: self.execution_active.load(Ordering::Relaxed),
            execution_queue_depth: self.execution_queue.len(),
            reaper_missions_running: self.reaper_missions.lock().len(),
            state: self.state.lock().summary(),
            stats: self.stats.snapshot(),
        }
    }

    // ── Queries (used by the CLI, which owns no long-running loop) ──────

    pub fn vms(&self) -> Vec<Vm> {
        self.state.lock().vms.values().cloned().collect()
    }

    pub fn vm(&self, vm_id: &str) -> Option<Vm> {
        self.state.lock().get_vm(vm_id).cloned()
    }

    pub fn hosts(&self) -> Vec<glassdome_core::Host> {
        self.state.lock().hosts.values().cloned().collect()
    }

    pub fn requests(&self) -> Vec<PendingRequest> {
        self.state.lock().requests.values().cloned().collect()
    }

    pub fn request(&self, request_id: &str) -> Option<PendingRequest> {
        self.state.lock().get_request(request_id).cloned()
    }

    /// Registers a host directly, bypassing the request gate. Only
    /// meaningful in tests that need a host with resource headroom on
    /// record before a `deploy_vm` request can be approved.
    #[cfg(any(test, feature = "test-support"))]
    pub fn add_host_for_test(&self, host: glassdome_core::Host) {
        let now = self.clock.utc_now();
        let _ = self.state.lock().add_host(host, now);
    }

    /// Registers a VM directly, bypassing `deploy_vm`. Only meaningful in
    /// tests that need a VM on record (e.g. a preloaded production VM)
    /// before exercising the request gate.
    #[cfg(any(test, feature = "test-support"))]
    pub fn add_vm_for_test(&self, vm: Vm) {
        let now = self.clock.utc_now();
        let _ = self.state.lock().add_vm(vm, now);
    }

    /// Flips a VM's production flag, bypassing the request gate. Only
    /// meaningful in tests that need a production VM on record before
    /// exercising the production-protection predicate.
    #[cfg(any(test, feature = "test-support"))]
    pub fn mark_vm_production_for_test(&self, vm_id: &str) {
        let now = self.clock.utc_now();
        let _ = self.state.lock().update_vm(vm_id, now, |vm| vm.is_production = true);
    }

    // ── Request gate (spec.md §4.6, §6) ────────────────────────────────

    /// Runs a request through the full gate pipeline, persisting it as
    /// `pending` first so a denied or approved request is always on record
    /// (spec.md §6 "every request is recorded, approved or not").
    pub fn receive_request(&self, action: &str, params: Params, user: &str) -> Result<GateResult, OverseerError> {
        self.stats.requests_received.fetch_add(1, Ordering::Relaxed);
        let request_id = format!("req-{}", nanoid::nanoid!(8));
        let now = self.clock.utc_now();

        let request = PendingRequest::new(&request_id, action, user, params.clone(), now);
        let mut state = self.state.lock();
        state.add_request(request, now)?;

        match gate::evaluate(action, &params, &state, self.knowledge_base.as_ref()) {
            GateVerdict::Denied(reason) => {
                state.update_request(&request_id, now, |r| r.deny(&reason, now))?;
                self.stats.requests_denied.fetch_add(1, Ordering::Relaxed);
                Ok(GateResult::Denied { request_id, reason })
            }
            GateVerdict::Approved => {
                state.update_request(&request_id, now, |r| r.approve(now))?;
                self.stats.requests_approved.fetch_add(1, Ordering::Relaxed);
                let queue_position = self.execution_queue.push(request_id.clone());
                Ok(GateResult::Approved { request_id, queue_position })
            }
        }
    }

    // ── Execution loop (spec.md §4.6) ──────────────────────────────────

    /// Executes exactly one pending request if the queue is non-empty,
    /// returning the id it executed. The one-shot CLI has no background
    /// execution loop, so it drains the queue itself after a successful
    /// [`Self::receive_request`] instead of waiting for [`Self::run`].
    pub async fn execute_one_pending(&self) -> Option<String> {
        let request_id = self.execution_queue.try_pop()?;
        self.execute_request(&request_id).await;
        Some(request_id)
    }

    async fn execution_loop(&self, mut shutdown: watch::Receiver<bool>) {
        while self.execution_active.load(Ordering::Relaxed) {
            tokio::select! {
                request_id = self.execution_queue.pop() => {
                    self.execute_request(&request_id).await;
                }
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        tracing::info!("execution loop stopped: shutdown");
                        return;
                    }
                }
            }
        }
    }

    async fn execute_request(&self, request_id: &str) {
        let Some((action, params)) = self.state.lock().get_request(request_id).map(|r| (r.action.clone(), r.params.clone())) else {
            tracing::error!(request_id, "cannot execute request: no longer on record");
            return;
        };

        tracing::info!(request_id, action = %action, "executing approved request");
        let outcome = self.dispatch_action(&action, &params).await;
        let now = self.clock.utc_now();
        let mut state = self.state.lock();
        match outcome {
            Ok(result) => {
                let _ = state.update_request(request_id, now, |r| {
                    r.status = glassdome_core::RequestStatus::Completed;
                    r.completed_at = Some(now);
                    r.result = Some(result);
                });
                self.stats.requests_completed.fetch_add(1, Ordering::Relaxed);
            }
            Err(reason) => {
                tracing::error!(request_id, action = %action, error = %reason, "request execution failed");
                let _ = state.update_request(request_id, now, |r| {
                    r.status = glassdome_core::RequestStatus::Failed;
                    r.completed_at = Some(now);
                    r.result = Some(serde_json::json!({ "error": reason }));
                });
                self.stats.requests_failed.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    async fn dispatch_action(&self, action: &str, params: &Params) -> Result<Value, String> {
        match action {
            "deploy_vm" => self.execute_deploy_vm(params),
            "destroy_vm" => self.execute_destroy_vm(params),
            "start_vm" => self.set_vm_status(params, VmStatus::Running),
            "stop_vm" => self.set_vm_status(params, VmStatus::Stopped),
            other => Err(format!("unknown action: {other}")),
        }
    }

    fn execute_deploy_vm(&self, params: &Params) -> Result<Value, String> {
        let platform = params.get("platform").and_then(Value::as_str).ok_or("deploy_vm requires a platform")?;
        let vm_id = format!("vm-{}", nanoid::nanoid!(8));
        let mut vm = Vm::new(&vm_id, format!("{platform}-{vm_id}"), platform);
        vm.status = VmStatus::Running;
        vm.is_production = params.get("is_production").and_then(Value::as_bool).unwrap_or(false);
        let now = self.clock.utc_now();
        vm.deployed_at = Some(now);
        self.state.lock().add_vm(vm, now).map_err(|err| err.to_string())?;
        Ok(serde_json::json!({ "vm_id": vm_id }))
    }

    /// Delete path (spec.md §7): a missing vm is idempotent success.
    fn execute_destroy_vm(&self, params: &Params) -> Result<Value, String> {
        let vm_id = params.get("vm_id").and_then(Value::as_str).ok_or("destroy_vm requires a vm_id")?;
        let now = self.clock.utc_now();
        self.state.lock().remove_vm(vm_id, now).map_err(|err| err.to_string())?;
        Ok(serde_json::json!({ "vm_id": vm_id }))
    }

    /// Update path (spec.md §7): a missing vm is a failure, not a no-op.
    fn set_vm_status(&self, params: &Params, status: VmStatus) -> Result<Value, String> {
        let vm_id = params.get("vm_id").and_then(Value::as_str).ok_or("vm_id is required")?;
        let now = self.clock.utc_now();
        let mut state = self.state.lock();
        if state.get_vm(vm_id).is_none() {
            return Err(format!("vm {vm_id} not found"));
        }
        state.update_vm(vm_id, now, |vm| vm.status = status).map_err(|err| err.to_string())?;
        Ok(serde_json::json!({ "vm_id": vm_id }))
    }

    // ── Monitor loop (spec.md §4.6: 30s cadence, advisory only) ────────

    async fn monitor_loop(&self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(self.config.monitor_interval);
        ticker.tick().await;
        while self.monitoring_active.load(Ordering::Relaxed) {
            tokio::select! {
                _ = ticker.tick() => self.monitor_tick(),
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        tracing::info!("monitor loop stopped: shutdown");
                        return;
                    }
                }
            }
        }
    }

    /// No auto-remediation: anomalies are logged and advised on, never
    /// acted on directly (spec.md §4.6 "the monitor loop never mutates
    /// state on its own").
    fn monitor_tick(&self) {
        let issues = self.detect_issues();
        if issues.is_empty() {
            return;
        }
        tracing::warn!(count = issues.len(), "monitor loop detected anomalies");
        for (kind, description) in &issues {
            tracing::warn!(kind, description, "anomaly detected");
            let context = AdvisoryContext::new(*kind, HashMap::new());
            if let Some(advisory) = self.knowledge_base.consult(&context) {
                tracing::info!(kind, reason = %advisory.reason, "knowledge base advisory");
            }
        }
        self.stats.issues_detected.fetch_add(issues.len() as u64, Ordering::Relaxed);
    }

    fn detect_issues(&self) -> Vec<(&'static str, String)> {
        let state = self.state.lock();
        let mut issues = Vec::new();
        for vm in state.vms.values() {
            if vm.status == VmStatus::Unknown {
                issues.push(("vm_unknown_status", format!("VM {} ({}) has unknown status", vm.id, vm.name)));
            }
        }
        for host in state.hosts.values() {
            match host.status {
                glassdome_core::HostStatus::Degraded => {
                    issues.push(("host_degraded", format!("host {} is degraded", host.key())));
                }
                glassdome_core::HostStatus::Down => {
                    issues.push(("host_down", format!("host {} is down", host.key())));
                }
                _ => {}
            }
        }
        issues
    }

    // ── State-sync loop (spec.md §4.6: 60s cadence) ────────────────────

    /// spec.md §9 leaves whether the sync loop should push desired state
    /// into the Registry as an open design choice; DESIGN.md records the
    /// decision made here: it stays a liveness heartbeat only. Pushing
    /// desired state would require threading a `glassdome_registry::Registry`
    /// handle into this entity, which nothing in scope currently needs.
    async fn state_sync_loop(&self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(self.config.state_sync_interval);
        ticker.tick().await;
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let summary = self.state.lock().summary();
                    tracing::debug!(?summary, "state sync tick");
                }
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        tracing::info!("state sync loop stopped: shutdown");
                        return;
                    }
                }
            }
        }
    }

    // ── Health loop (spec.md §4.6: 300s cadence) ───────────────────────

    async fn health_loop(&self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(self.config.health_interval);
        ticker.tick().await;
        loop {
            tokio::select! {
                _ = ticker.tick() => self.log_health(),
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        tracing::info!("health loop stopped: shutdown");
                        return;
                    }
                }
            }
        }
    }

    fn log_health(&self) {
        let status = self.status();
        tracing::info!(
            running_vms = status.state.running_vms,
            total_vms = status.state.total_vms,
            healthy_hosts = status.state.healthy_hosts,
            total_hosts = status.state.total_hosts,
            pending_requests = status.state.pending_requests,
            queue_depth = status.execution_queue_depth,
            reaper_missions_running = status.reaper_missions_running,
            "overseer health"
        );
    }

    // ── Reaper mission management (spec.md §4.9) ───────────────────────

    /// Idempotent (spec.md §4.9): an existing mission id returns
    /// `AlreadyExists` rather than erroring or restarting it.
    pub fn create_reaper_mission(
        &self,
        mission_id: impl Into<String>,
        lab_id: impl Into<String>,
        mission_type: impl Into<String>,
        target_hosts: Vec<TargetHost>,
    ) -> Result<CreateMissionOutcome, OverseerError> {
        let mission_id = mission_id.into();
        if self.reaper_missions.lock().contains_key(&mission_id) {
            return Ok(CreateMissionOutcome::AlreadyExists);
        }

        let mut hosts = HashMap::new();
        for target in &target_hosts {
            hosts.insert(target.host_id.clone(), HostState::new(&target.host_id, &target.os, &target.ip_address));
        }
        let host_count = hosts.len();

        let initial_state = MissionState::new(&mission_id, lab_id, mission_type, hosts, self.clock.utc_now());
        let engine = Arc::new(MissionEngine::new(
            mission_id.clone(),
            self.reaper_mission_store.clone(),
            self.reaper_task_queue.clone(),
            self.reaper_event_bus.clone(),
            self.reaper_planner.clone(),
            self.clock.clone(),
        ));
        engine.start_mission(initial_state)?;

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let join = tokio::spawn(async move { engine.run(shutdown_rx).await });

        self.reaper_missions.lock().insert(mission_id.clone(), ReaperMissionHandle { shutdown_tx, join });

        Ok(CreateMissionOutcome::Created { mission_id, target_hosts: host_count })
    }

    /// Stops the mission's event loop and marks its document cancelled
    /// (spec.md §4.9). Unknown mission ids are a [`OverseerError::MissionNotFound`].
    pub fn cancel_reaper_mission(&self, mission_id: &str) -> Result<(), OverseerError> {
        let handle = self.reaper_missions.lock().remove(mission_id);
        let Some(handle) = handle else {
            return Err(OverseerError::MissionNotFound(mission_id.to_string()));
        };
        let _ = handle.shutdown_tx.send(true);

        if let Some(mut mission) = self.reaper_mission_store.load(mission_id)? {
            mission.status = MissionStatus::Cancelled;
            mission.updated_at = self.clock.utc_now();
            self.reaper_mission_store.save(&mission)?;
        }
        Ok(())
    }

    pub fn reaper_mission_status(&self, mission_id: &str) -> Result<Option<MissionState>, OverseerError> {
        Ok(self.reaper_mission_store.load(mission_id)?)
    }

    pub fn list_reaper_missions(&self) -> Result<Vec<String>, OverseerError> {
        Ok(self.reaper_mission_store.list_missions()?)
    }

    // ── Lifecycle ───────────────────────────────────────────────────────

    /// Runs all four loops concurrently until `shutdown` carries `true`.
    pub async fn run(&self, shutdown: watch::Receiver<bool>) {
        tokio::join!(
            self.monitor_loop(shutdown.clone()),
            self.execution_loop(shutdown.clone()),
            self.state_sync_loop(shutdown.clone()),
            self.health_loop(shutdown.clone()),
        );
    }

    /// Stops both loop flags, tears down every running Reaper mission, and
    /// persists System State one final time (spec.md §4.6's `shutdown()`).
    pub fn shutdown(&self) {
        self.monitoring_active.store(false, Ordering::Relaxed);
        self.execution_active.store(false, Ordering::Relaxed);

        let missions: Vec<(String, ReaperMissionHandle)> = self.reaper_missions.lock().drain().collect();
        for (mission_id, handle) in missions {
            tracing::info!(mission_id, "stopping reaper mission");
            let _ = handle.shutdown_tx.send(true);
        }

        let now = self.clock.utc_now();
        if let Err(err) = self.state.lock().persist(now) {
            tracing::error!(error = %err, "failed to persist system state during shutdown");
        }
    }
}

impl OverseerEntity<SystemClock> {
    /// Builds an entity from on-disk configuration: loads (or starts)
    /// System State at `config.state_file` and uses the real system clock.
    pub fn with_defaults(config: GlassdomeConfig) -> Result<Self, OverseerError> {
        let state = SystemState::load(&config.state_file)?;
        Self::new(config, state, Arc::new(NoopKnowledgeBase), SystemClock)
    }
}

#[cfg(test)]
#[path = "entity_tests.rs"]
mod tests;

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Glassdome Contributors

//! Mission Engine (C10, spec.md §4.10): one instance per mission, the only
//! writer of that mission's document. Grounded on
//! `original_source/glassdome/reaper/engine.py`'s `MissionEngine` —
//! `start_mission`/`_schedule_tasks`/`process_result`/`_is_mission_complete`,
//! carried over nearly call-for-call; the event loop here subscribes to the
//! [`crate::event_bus::EventBus`] partition instead of a generator.

use crate::event_bus::EventBus;
use crate::mission_store::MissionStore;
use crate::planner::VulnerabilityPlanner;
use crate::task_queue::TaskQueue;
use glassdome_core::{Clock, MissionState, MissionStatus, ResultEvent, ResultStatus, SystemClock, Task};
use std::sync::Arc;
use tokio::sync::watch;

/// Drives one mission end to end: schedules tasks the planner produces,
/// folds results back into the mission document, and stops once the
/// terminal condition is reached.
pub struct MissionEngine<C: Clock = SystemClock> {
    mission_id: String,
    store: Arc<MissionStore>,
    task_queue: Arc<TaskQueue>,
    event_bus: Arc<EventBus>,
    planner: VulnerabilityPlanner,
    clock: C,
}

impl<C: Clock> MissionEngine<C> {
    pub fn new(
        mission_id: impl Into<String>,
        store: Arc<MissionStore>,
        task_queue: Arc<TaskQueue>,
        event_bus: Arc<EventBus>,
        planner: VulnerabilityPlanner,
        clock: C,
    ) -> Self {
        Self { mission_id: mission_id.into(), store, task_queue, event_bus, planner, clock }
    }

    pub fn mission_id(&self) -> &str {
        &self.mission_id
    }

    /// `StartMission` (spec.md §4.9): persist the mission as running, then
    /// schedule the planner's initial discovery tasks.
    pub fn start_mission(&self, mut initial_state: MissionState) -> Result<(), crate::error::ReaperError> {
        tracing::info!(mission_id = %self.mission_id, lab_id = %initial_state.lab_id, hosts = initial_state.hosts.len(), "starting mission");

        initial_state.status = MissionStatus::Running;
        initial_state.updated_at = self.clock.utc_now();
        self.store.save(&initial_state)?;

        let initial_tasks = self.planner.initial_tasks(&initial_state);
        tracing::info!(mission_id = %self.mission_id, count = initial_tasks.len(), "generated initial tasks");
        self.schedule_tasks(initial_tasks)?;
        Ok(())
    }

    /// Fire-and-forget: enqueue tasks without blocking on their results.
    fn schedule_tasks(&self, tasks: Vec<Task>) -> Result<(), crate::error::ReaperError> {
        if tasks.is_empty() {
            return Ok(());
        }
        let Some(mut mission) = self.store.load(&self.mission_id)? else {
            tracing::error!(mission_id = %self.mission_id, "cannot schedule tasks: mission not found");
            return Ok(());
        };

        let now = self.clock.utc_now();
        for task in tasks {
            mission.schedule(&task.task_id, now);
            tracing::info!(mission_id = %self.mission_id, task_id = %task.task_id, host_id = %task.host_id, action = %task.action, "scheduled task");
            self.task_queue.publish(task);
        }
        self.store.save(&mission)?;
        Ok(())
    }

    /// `ProcessResult` (spec.md §4.10): the five-step reduction — update
    /// host state, move the task id, stamp and persist, check the terminal
    /// condition, ask the planner for what's next.
    pub fn process_result(&self, event: ResultEvent) -> Result<(), crate::error::ReaperError> {
        let Some(mut mission) = self.store.load(&self.mission_id)? else {
            tracing::error!(mission_id = %self.mission_id, "cannot process result: mission not found");
            return Ok(());
        };

        tracing::info!(mission_id = %self.mission_id, task_id = %event.task_id, host_id = %event.host_id, status = %event.status, "processing result");

        if let Some(host) = mission.hosts.get_mut(&event.host_id) {
            host.record_task(&event.task_id);
            match event.status {
                ResultStatus::Success => {
                    host.record_success();
                    host.failure_count = 0;
                    for (k, v) in &event.data {
                        host.discovered_facts.insert(k.clone(), v.clone());
                    }
                    if event.action.ends_with(".inject_vuln") || event.action.ends_with(".baseline") {
                        if let Some(names) = event.data.get("vulnerabilities_injected").and_then(|v| v.as_array()) {
                            host.vulnerabilities_injected.extend(names.iter().filter_map(|v| v.as_str().map(str::to_string)));
                        }
                    }
                }
                ResultStatus::Error => host.record_error(),
                ResultStatus::Partial => host.last_status = glassdome_core::HostHealth::Degraded,
            }
        }

        // spec.md §4.10 step 3: `partial` results stay in `completed_tasks`
        // alongside `success`; only `error` moves a task to `failed_tasks`.
        let success = event.status != ResultStatus::Error;
        mission.resolve_task(&event.task_id, success, event.timestamp);
        self.store.save(&mission)?;

        if mission.is_complete() {
            let any_progress = mission.hosts.values().any(|h| h.is_injected());
            mission.status = if any_progress { MissionStatus::Completed } else { MissionStatus::Failed };
            tracing::info!(mission_id = %self.mission_id, status = %mission.status, "mission reached terminal state");
            self.store.save(&mission)?;
            return Ok(());
        }

        let next_tasks = self.planner.next_tasks(&mission, Some(&event));
        if next_tasks.is_empty() {
            tracing::info!(mission_id = %self.mission_id, "no new tasks to schedule");
        } else {
            tracing::info!(mission_id = %self.mission_id, count = next_tasks.len(), "scheduling new tasks");
            self.schedule_tasks(next_tasks)?;
        }
        Ok(())
    }

    /// Blocking event loop: pulls results for this mission's partition and
    /// folds them in until the mission reaches a terminal status or
    /// `shutdown` carries `true`.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        loop {
            if self.is_terminal() {
                tracing::info!(mission_id = %self.mission_id, "event loop stopping: mission terminal");
                return;
            }
            tokio::select! {
                event = self.event_bus.next_result(&self.mission_id) => {
                    if let Err(err) = self.process_result(event) {
                        tracing::error!(mission_id = %self.mission_id, error = %err, "failed to process result");
                    }
                }
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        tracing::info!(mission_id = %self.mission_id, "event loop stopped: shutdown");
                        return;
                    }
                }
            }
        }
    }

    fn is_terminal(&self) -> bool {
        matches!(self.store.load(&self.mission_id), Ok(Some(mission)) if mission.status.is_terminal())
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Glassdome Contributors

//! Agent worker loop (C11, spec.md §4.11): pulls tasks for one
//! [`ReaperAgent`]'s partition off the [`TaskQueue`] and publishes its
//! result to the [`EventBus`]. The dispatch itself is
//! `glassdome_platform::ReaperAgent::handle_task`; this module is just the
//! queue/bus plumbing the Python `engine.py` leaves to a caller.

use crate::event_bus::EventBus;
use crate::task_queue::TaskQueue;
use glassdome_core::{Clock, ResultEvent, SystemClock, Task};
use glassdome_platform::ReaperAgent;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::error;

pub struct AgentWorker<A: ReaperAgent, C: Clock = SystemClock> {
    agent: A,
    task_queue: Arc<TaskQueue>,
    event_bus: Arc<EventBus>,
    clock: C,
}

impl<A: ReaperAgent, C: Clock> AgentWorker<A, C> {
    pub fn new(agent: A, task_queue: Arc<TaskQueue>, event_bus: Arc<EventBus>, clock: C) -> Self {
        Self { agent, task_queue, event_bus, clock }
    }

    /// Consume-and-dispatch one task, if one is immediately available.
    pub fn try_process_one(&self) -> bool {
        let Some(task) = self.task_queue.try_consume(self.agent.agent_type()) else { return false };
        let now = self.clock.utc_now();
        let result = self.dispatch(&task, now);
        self.event_bus.publish_result(result);
        true
    }

    /// Run until `shutdown` carries `true`, polling the queue at its
    /// standard cadence (spec.md §5).
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        loop {
            tokio::select! {
                task = self.task_queue.consume(self.agent.agent_type()) => {
                    let now = self.clock.utc_now();
                    let result = self.dispatch(&task, now);
                    self.event_bus.publish_result(result);
                }
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        return;
                    }
                }
            }
        }
    }

    /// Drive `ReaperAgent::handle_task` under `catch_unwind` (spec.md §4.11
    /// line 148): a panicking agent must still yield one error result rather
    /// than crash the worker.
    fn dispatch(&self, task: &Task, now: chrono::DateTime<chrono::Utc>) -> ResultEvent {
        let agent = &self.agent;
        match catch_unwind(AssertUnwindSafe(|| agent.handle_task(task, now))) {
            Ok(result) => result,
            Err(panic) => {
                let message = panic_message(&panic);
                error!(task_id = %task.task_id, agent_type = self.agent.agent_type(), panic = %message, "agent panicked while handling task");
                ResultEvent::error(
                    &task.task_id,
                    &task.mission_id,
                    &task.host_id,
                    self.agent.agent_type(),
                    &task.action,
                    "AGENT_EXCEPTION",
                    format!("agent panicked: {message}"),
                    now,
                )
            }
        }
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod tests;

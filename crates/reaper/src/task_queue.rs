// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Glassdome Contributors

//! Task Queue (C7, spec.md §4.7): partitions tasks by `agent_type` so each
//! Reaper Agent worker only ever sees the tasks meant for it. Grounded on
//! `original_source/glassdome/reaper/task_queue.py`'s `InMemoryTaskQueue` —
//! same deque-per-partition shape, same 100ms poll cadence for consumers.

use glassdome_core::Task;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::time::Duration;

/// Matches spec.md §5's 100ms internal poll interval.
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Default)]
pub struct TaskQueue {
    queues: Mutex<HashMap<String, VecDeque<Task>>>,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&self, task: Task) {
        tracing::info!(task_id = %task.task_id, agent_type = %task.agent_type, action = %task.action, "published task");
        self.queues.lock().entry(task.agent_type.clone()).or_default().push_back(task);
    }

    /// Poll until a task for `agent_type` is available.
    pub async fn consume(&self, agent_type: &str) -> Task {
        loop {
            if let Some(task) = self.try_consume(agent_type) {
                return task;
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    /// Non-blocking pop, for callers driving their own select loop.
    pub fn try_consume(&self, agent_type: &str) -> Option<Task> {
        let task = self.queues.lock().get_mut(agent_type).and_then(VecDeque::pop_front);
        if let Some(task) = &task {
            tracing::info!(task_id = %task.task_id, agent_type, "consumed task");
        }
        task
    }

    pub fn queue_depth(&self, agent_type: &str) -> usize {
        self.queues.lock().get(agent_type).map_or(0, VecDeque::len)
    }

    pub fn all_queue_depths(&self) -> HashMap<String, usize> {
        self.queues.lock().iter().map(|(k, v)| (k.clone(), v.len())).collect()
    }
}

#[cfg(test)]
#[path = "task_queue_tests.rs"]
mod tests;

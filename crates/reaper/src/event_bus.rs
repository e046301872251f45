// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Glassdome Contributors

//! Event Bus (C8, spec.md §4.7): routes `ResultEvent`s back to the Mission
//! Engine that owns the mission, partitioned by `mission_id`. Structurally
//! symmetric to [`crate::task_queue::TaskQueue`], grounded on
//! `original_source/glassdome/reaper/event_bus.py`'s `InMemoryEventBus`.

use crate::task_queue::POLL_INTERVAL;
use glassdome_core::ResultEvent;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};

#[derive(Default)]
pub struct EventBus {
    events: Mutex<HashMap<String, VecDeque<ResultEvent>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish_result(&self, event: ResultEvent) {
        tracing::info!(task_id = %event.task_id, mission_id = %event.mission_id, status = %event.status, "published result");
        self.events.lock().entry(event.mission_id.clone()).or_default().push_back(event);
    }

    /// Poll until a result for `mission_id` is available.
    pub async fn next_result(&self, mission_id: &str) -> ResultEvent {
        loop {
            if let Some(event) = self.try_next_result(mission_id) {
                return event;
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    pub fn try_next_result(&self, mission_id: &str) -> Option<ResultEvent> {
        self.events.lock().get_mut(mission_id).and_then(VecDeque::pop_front)
    }

    pub fn pending_count(&self, mission_id: &str) -> usize {
        self.events.lock().get(mission_id).map_or(0, VecDeque::len)
    }

    pub fn all_pending_counts(&self) -> HashMap<String, usize> {
        self.events.lock().iter().map(|(k, v)| (k.clone(), v.len())).collect()
    }
}

#[cfg(test)]
#[path = "event_bus_tests.rs"]
mod tests;

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Glassdome Contributors

//! The Overseer's own single-partition queue of approved request ids
//! waiting for the execution loop (spec.md §4.6). Structurally the same
//! deque-behind-a-mutex shape as `glassdome_reaper::TaskQueue`, just
//! without the per-agent-type partitioning the Reaper needs.

use glassdome_reaper::POLL_INTERVAL;
use parking_lot::Mutex;
use std::collections::VecDeque;

#[derive(Default)]
pub struct ExecutionQueue {
    queue: Mutex<VecDeque<String>>,
}

impl ExecutionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the request id, returning its 1-based position in the queue.
    pub fn push(&self, request_id: String) -> usize {
        let mut queue = self.queue.lock();
        queue.push_back(request_id);
        queue.len()
    }

    pub fn try_pop(&self) -> Option<String> {
        self.queue.lock().pop_front()
    }

    /// Poll until a request id is available.
    pub async fn pop(&self) -> String {
        loop {
            if let Some(request_id) = self.try_pop() {
                return request_id;
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    pub fn len(&self) -> usize {
        self.queue.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
#[path = "execution_queue_tests.rs"]
mod tests;

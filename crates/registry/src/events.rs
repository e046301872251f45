// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Glassdome Contributors

//! Event publication and subscription (spec.md §4.2, §6).
//!
//! The general channel carries every [`StateChange`]; per-lab subscriptions
//! filter the same broadcast by `lab_id` rather than maintaining separate
//! channels, since this is an in-process registry (spec.md's out-of-scope
//! HTTP/WS surface rules out a cross-process pub/sub transport).

use crate::Registry;
use glassdome_core::{Clock, StateChange};
use tokio::sync::broadcast;

/// A live subscription to the event bus, optionally filtered to one lab.
pub struct EventSubscription {
    rx: broadcast::Receiver<StateChange>,
    lab_id: Option<String>,
}

impl EventSubscription {
    /// Await the next matching event. Lagged (dropped) events are skipped
    /// transparently — at-least-once is not promised across a full buffer
    /// overrun, matching the bus's best-effort recent-event semantics.
    pub async fn recv(&mut self) -> Option<StateChange> {
        loop {
            match self.rx.recv().await {
                Ok(event) => {
                    if self.lab_id.is_none() || event.lab_id.as_deref() == self.lab_id.as_deref() {
                        return Some(event);
                    }
                }
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

impl<C: Clock> Registry<C> {
    /// Publish a state change to the general channel and, if the event
    /// carries a `lab_id`, to per-lab subscribers too. Also appends to the
    /// bounded recent-events ring (spec.md §6, 1000 entries).
    pub fn publish_event(&self, event: StateChange) {
        tracing::debug!(kind = %event.kind, resource_id = %event.resource_id, "publishing event");
        self.inner.write().push_recent_event(event.clone());
        let _ = self.events_tx.send(event);
    }

    /// Subscribe to the event bus, optionally scoped to one lab.
    pub fn subscribe_events(&self, lab_id: Option<&str>) -> EventSubscription {
        EventSubscription { rx: self.events_tx.subscribe(), lab_id: lab_id.map(str::to_string) }
    }

    /// Most recent events, newest first, optionally filtered by lab.
    pub fn get_recent_events(&self, limit: usize, lab_id: Option<&str>) -> Vec<StateChange> {
        let inner = self.inner.read();
        inner
            .recent_events
            .iter()
            .filter(|e| lab_id.is_none() || e.lab_id.as_deref() == lab_id)
            .take(limit)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
#[path = "events_tests.rs"]
mod tests;

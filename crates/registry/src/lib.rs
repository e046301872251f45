// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Glassdome Contributors

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! glassdome-registry: the Registry Store (C2) — the universal ledger of
//! [`Resource`](glassdome_core::Resource)s, drift, events, and agent
//! heartbeats. Only agents write resources; everyone else reads via
//! snapshot queries or the event bus (spec.md §3 ownership rule).

mod agents;
mod drift;
mod error;
mod events;
mod lab;
mod resources;
mod state;
mod status;

pub use agents::{AgentStatus, HEARTBEAT_TTL_SECS};
pub use error::RegistryError;
pub use events::EventSubscription;
pub use state::RECENT_EVENTS_CAP;
pub use status::RegistryStatus;

use glassdome_core::{Clock, StateChange, SystemClock};
use parking_lot::RwLock;
use state::Inner;
use std::sync::Arc;
use tokio::sync::broadcast;

const EVENT_CHANNEL_CAPACITY: usize = 1024;

/// The Registry Store. Cheap to clone — internally an `Arc` around the
/// indexed state and the broadcast event channel.
pub struct Registry<C: Clock = SystemClock> {
    inner: Arc<RwLock<Inner>>,
    events_tx: broadcast::Sender<StateChange>,
    clock: C,
}

impl<C: Clock> Clone for Registry<C> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone(), events_tx: self.events_tx.clone(), clock: self.clock.clone() }
    }
}

impl<C: Clock> Registry<C> {
    pub fn with_clock(clock: C) -> Self {
        let (events_tx, _rx) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self { inner: Arc::new(RwLock::new(Inner::default())), events_tx, clock }
    }
}

impl Registry<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for Registry<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

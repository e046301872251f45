// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Glassdome Contributors

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! glassdome-reaper: Task Queue, Event Bus, Mission Store, Planner, and
//! Mission Engine (C7-C10), plus the agent worker loop (C11 plumbing).
//!
//! One [`MissionEngine`] owns one mission end to end: it schedules tasks a
//! [`VulnerabilityPlanner`] produces onto the [`TaskQueue`], and an
//! [`AgentWorker`] per OS family pulls its partition, dispatches through
//! `glassdome_platform::ReaperAgent`, and publishes the outcome to the
//! [`EventBus`] the engine's event loop subscribes to.

mod engine;
mod error;
mod event_bus;
mod mission_store;
mod planner;
mod task_queue;
mod worker;

pub use engine::MissionEngine;
pub use error::ReaperError;
pub use event_bus::EventBus;
pub use mission_store::MissionStore;
pub use planner::{default_playbook_catalog, Playbook, PlaybookCatalog, VulnerabilityPlanner};
pub use task_queue::{TaskQueue, POLL_INTERVAL};
pub use worker::AgentWorker;

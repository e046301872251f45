// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Glassdome Contributors

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! glassdome-overseer: System State (C5) and the Overseer entity (C6).
//!
//! [`state::SystemState`] is the Overseer's durable belief about every VM,
//! Host, Service, and PendingRequest it knows of. [`entity::OverseerEntity`]
//! runs the request gate ([`gate`]) in front of it, drives the four
//! background loops spec.md §4.6 names, and owns the lifecycle of every
//! Reaper mission it starts, reusing `glassdome_reaper`'s Task Queue, Event
//! Bus, Mission Store, and planner.

mod config;
mod entity;
mod error;
mod execution_queue;
mod gate;
mod knowledge_base;
mod state;

pub use config::{GlassdomeConfig, MAX_FAILURES_ENV, MISSION_STORE_DIR_ENV, STATE_FILE_ENV};
pub use entity::{CreateMissionOutcome, GateResult, OverseerEntity, OverseerStatus, StatsSnapshot, TargetHost};
pub use error::OverseerError;
pub use execution_queue::ExecutionQueue;
pub use gate::{GateVerdict, Params};
pub use knowledge_base::{Advisory, AdvisoryContext, KnowledgeBase, NoopKnowledgeBase};
pub use state::{StateSummary, SystemState};

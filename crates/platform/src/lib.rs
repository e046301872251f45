// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Glassdome Contributors

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! glassdome-platform: the `PlatformClient` contract (C1), Platform Agents
//! (C3), and Reaper Agents (C11) — everything that crosses the boundary
//! between Glassdome and a real virtualization platform or guest OS.

mod agent;
mod client;
mod error;
mod reaper_agent;

#[cfg(any(test, feature = "test-support"))]
mod fake;

pub use agent::{extract_lab_id, PlatformAgent, POLL_TIMEOUT};
pub use client::{NetworkInfo, PlatformClient, PlatformVm, VmSpec};
pub use error::PlatformError;
pub use reaper_agent::{LinuxAgent, MacAgent, ReaperAgent, WindowsAgent};

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeClient;

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Glassdome Contributors

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! glassdome-controller: the Lab Controller (C4), Tier-1 reconciliation.
//!
//! Walks every lab on a fixed cadence, detects drift per VM via the
//! Registry's [`glassdome_core::detect_drift`] rule, and repairs the
//! subset of drift kinds marked `auto_fix` by issuing the matching
//! [`glassdome_platform::PlatformClient`] call. The Controller never
//! creates or deletes resources — only `StartVM`/`StopVM`/`RenameVM`.

mod controller;
mod report;

pub use controller::LabController;
pub use report::ReconcileReport;

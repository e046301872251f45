// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Glassdome Contributors

//! Shared fixture for command-handler tests, grounded on the teacher's
//! `daemon::engine::test_helpers`/`daemon::listener::test_fixtures`
//! convention of one fixture module feeding several sibling `_tests.rs`
//! files.

use glassdome_core::SystemClock;
use glassdome_overseer::{GlassdomeConfig, OverseerEntity};

pub fn entity() -> (tempfile::TempDir, OverseerEntity<SystemClock>) {
    let dir = tempfile::tempdir().unwrap();
    let config = GlassdomeConfig {
        monitor_interval: std::time::Duration::from_millis(10),
        state_sync_interval: std::time::Duration::from_millis(10),
        health_interval: std::time::Duration::from_millis(10),
        max_failures: 3,
        state_file: dir.path().join("state.json"),
        mission_store_dir: dir.path().join("missions"),
    };
    let entity = OverseerEntity::with_defaults(config).unwrap();
    (dir, entity)
}

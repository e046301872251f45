// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Glassdome Contributors

//! `GlassdomeConfig` (SPEC_FULL.md §10.3): a settings object threaded
//! through the Overseer constructor as an explicit collaborator, grounded
//! on `original_source/glassdome/core/security.py::get_secure_settings` —
//! loop cadences and persisted-state paths, constructible from environment
//! variables with compiled-in defaults. No TOML/file-based format: the
//! original has none and the spec does not call for one.

use glassdome_core::DEFAULT_MAX_FAILURES;
use std::path::PathBuf;
use std::time::Duration;

/// `OVERSEER_STATE_FILE` path override (spec.md §6 persisted System State).
pub const STATE_FILE_ENV: &str = "GLASSDOME_OVERSEER_STATE_FILE";

/// `MISSION_STORE_DIR` path override (spec.md §4.8 Mission Store).
pub const MISSION_STORE_DIR_ENV: &str = "GLASSDOME_MISSION_STORE_DIR";

/// `MAX_FAILURES` override for the Reaper per-host failure budget.
pub const MAX_FAILURES_ENV: &str = "GLASSDOME_MAX_FAILURES";

#[derive(Debug, Clone)]
pub struct GlassdomeConfig {
    /// Monitor loop period (spec.md §4.6): 30s.
    pub monitor_interval: Duration,
    /// State-sync loop period (spec.md §4.6): 60s.
    pub state_sync_interval: Duration,
    /// Health-check loop period (spec.md §4.6): 300s.
    pub health_interval: Duration,
    /// Reaper per-host failure budget before lockout (spec.md §3, default 3).
    pub max_failures: u32,
    /// Persisted System State document path.
    pub state_file: PathBuf,
    /// Directory holding one JSON document per Reaper mission.
    pub mission_store_dir: PathBuf,
}

impl GlassdomeConfig {
    /// Compiled-in defaults, paths rooted under a per-user data directory
    /// (matching how the teacher codebase resolves its own daemon state
    /// directory) when `dirs::data_dir()` is available, else the cwd.
    pub fn defaults() -> Self {
        let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            monitor_interval: Duration::from_secs(30),
            state_sync_interval: Duration::from_secs(60),
            health_interval: Duration::from_secs(300),
            max_failures: DEFAULT_MAX_FAILURES,
            state_file: base.join("glassdome").join("overseer_state.json"),
            mission_store_dir: base.join("glassdome").join("missions"),
        }
    }

    /// Layers environment variable overrides on top of [`Self::defaults`].
    pub fn from_env() -> Self {
        let mut config = Self::defaults();
        if let Ok(path) = std::env::var(STATE_FILE_ENV) {
            config.state_file = PathBuf::from(path);
        }
        if let Ok(path) = std::env::var(MISSION_STORE_DIR_ENV) {
            config.mission_store_dir = PathBuf::from(path);
        }
        if let Ok(value) = std::env::var(MAX_FAILURES_ENV) {
            if let Ok(parsed) = value.parse() {
                config.max_failures = parsed;
            }
        }
        config
    }
}

impl Default for GlassdomeConfig {
    fn default() -> Self {
        Self::defaults()
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

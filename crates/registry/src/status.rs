// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Glassdome Contributors

//! Aggregate registry status (spec.md §6 `get_status`).

use crate::Registry;
use glassdome_core::Clock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryStatus {
    pub resource_counts: HashMap<String, usize>,
    pub total_resources: usize,
    pub lab_count: usize,
    pub active_drifts: usize,
    pub agent_names: Vec<String>,
}

impl<C: Clock> Registry<C> {
    pub fn status(&self) -> RegistryStatus {
        let mut agent_names: Vec<String> = self.list_agents().into_iter().map(|a| a.name).collect();
        agent_names.sort();
        let lab_count = self.list_labs().len();

        let inner = self.inner.read();
        let resource_counts: HashMap<String, usize> =
            inner.by_type.iter().map(|(ty, ids)| (ty.to_string(), ids.len())).collect();
        let total_resources = resource_counts.values().sum();

        RegistryStatus {
            resource_counts,
            total_resources,
            lab_count,
            active_drifts: inner.active_drifts.len(),
            agent_names,
        }
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Glassdome Contributors

//! Lab-level projections over the resource store (spec.md §3, §4.2).

use crate::Registry;
use glassdome_core::{Clock, LabSnapshot};
use std::collections::HashSet;

impl<C: Clock> Registry<C> {
    /// Build a [`LabSnapshot`] from this lab's resources, or `None` if the
    /// lab has no registered resources at all.
    pub fn get_lab_snapshot(&self, lab_id: &str) -> Option<LabSnapshot> {
        let resources = self.list_by_lab(lab_id);
        if resources.is_empty() {
            return None;
        }
        let has_active_drift = !self.get_drifts(Some(lab_id)).is_empty();
        Some(LabSnapshot::build(lab_id, resources, has_active_drift))
    }

    /// Every distinct lab id with at least one registered resource.
    pub fn list_labs(&self) -> Vec<String> {
        let inner = self.inner.read();
        inner.by_lab.keys().cloned().collect::<HashSet<_>>().into_iter().collect()
    }
}

#[cfg(test)]
#[path = "lab_tests.rs"]
mod tests;

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Glassdome Contributors

//! Drift recording and the active-drift indexes (spec.md §4.2, §6).

use crate::Registry;
use glassdome_core::{detect_drift, Clock, Drift, StateChange, StateChangeKind};

impl<C: Clock> Registry<C> {
    /// Run [`detect_drift`] against the currently registered resource and,
    /// if drift is found, record it. No-op if the resource is unknown.
    pub fn check_drift(&self, resource_id: &str) -> Option<Drift> {
        let resource = self.get(resource_id)?;
        let now = self.clock.utc_now();
        let drift = detect_drift(&resource, now)?;
        self.record_drift(drift.clone());
        Some(drift)
    }

    pub fn record_drift(&self, drift: Drift) {
        let now = self.clock.utc_now();
        {
            let mut inner = self.inner.write();
            inner.active_drifts.insert(drift.resource_id.clone(), drift.clone());
            if let Some(lab_id) = &drift.lab_id {
                inner.drifts_by_lab.entry(lab_id.clone()).or_default().insert(drift.resource_id.clone());
            }
        }
        let event = StateChange::new(StateChangeKind::DriftDetected, &drift.resource_id, now)
            .old_value(drift.expected.clone())
            .new_value(drift.actual.clone());
        let event = match &drift.lab_id {
            Some(lab_id) => event.lab_id(lab_id),
            None => event,
        };
        self.publish_event(event);
    }

    /// Mark a resource's active drift as resolved, removing it from the
    /// active indexes. No-op if no drift was recorded.
    pub fn resolve_drift(&self, resource_id: &str) {
        let now = self.clock.utc_now();
        let drift = {
            let mut inner = self.inner.write();
            let drift = inner.active_drifts.remove(resource_id);
            if let Some(drift) = &drift {
                if let Some(lab_id) = &drift.lab_id {
                    if let Some(set) = inner.drifts_by_lab.get_mut(lab_id) {
                        set.remove(resource_id);
                    }
                }
            }
            drift
        };
        let Some(drift) = drift else { return };
        let event = StateChange::new(StateChangeKind::DriftResolved, resource_id, now);
        let event = match &drift.lab_id {
            Some(lab_id) => event.lab_id(lab_id),
            None => event,
        };
        self.publish_event(event);
    }

    /// All active drifts, optionally scoped to one lab.
    pub fn get_drifts(&self, lab_id: Option<&str>) -> Vec<Drift> {
        let inner = self.inner.read();
        match lab_id {
            Some(lab_id) => inner
                .drifts_by_lab
                .get(lab_id)
                .into_iter()
                .flatten()
                .filter_map(|id| inner.active_drifts.get(id).cloned())
                .collect(),
            None => inner.active_drifts.values().cloned().collect(),
        }
    }
}

#[cfg(test)]
#[path = "drift_tests.rs"]
mod tests;

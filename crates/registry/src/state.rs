// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Glassdome Contributors

//! Internal indexed storage behind the [`crate::Registry`] lock.

use glassdome_core::{Drift, Resource, ResourceType, StateChange};
use std::collections::{HashMap, HashSet, VecDeque};

use crate::agents::AgentStatus;

/// Recent-event ring buffer size (spec.md §6 "Recent-event buffer size: 1000").
pub const RECENT_EVENTS_CAP: usize = 1000;

#[derive(Default)]
pub(crate) struct Inner {
    pub resources: HashMap<String, Resource>,
    pub by_type: HashMap<ResourceType, HashSet<String>>,
    pub by_lab: HashMap<String, HashSet<String>>,
    pub active_drifts: HashMap<String, Drift>,
    pub drifts_by_lab: HashMap<String, HashSet<String>>,
    pub recent_events: VecDeque<StateChange>,
    pub agents: HashMap<String, AgentStatus>,
}

impl Inner {
    pub fn index_insert(&mut self, resource: &Resource) {
        self.by_type.entry(resource.resource_type()).or_default().insert(resource.id.to_string());
        if let Some(lab_id) = &resource.lab_id {
            self.by_lab.entry(lab_id.clone()).or_default().insert(resource.id.to_string());
        }
    }

    pub fn index_remove(&mut self, resource: &Resource) {
        if let Some(set) = self.by_type.get_mut(&resource.resource_type()) {
            set.remove(resource.id.to_string().as_str());
        }
        if let Some(lab_id) = &resource.lab_id {
            if let Some(set) = self.by_lab.get_mut(lab_id) {
                set.remove(resource.id.to_string().as_str());
            }
        }
    }

    pub fn push_recent_event(&mut self, event: StateChange) {
        self.recent_events.push_front(event);
        while self.recent_events.len() > RECENT_EVENTS_CAP {
            self.recent_events.pop_back();
        }
    }
}

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Glassdome Contributors

//! Resource CRUD and type/lab/platform indexes (spec.md §4.2).

use crate::Registry;
use glassdome_core::{Clock, Resource, ResourceType, StateChange, StateChangeKind};

impl<C: Clock> Registry<C> {
    /// Register or update a resource, publishing `created`/`updated`/
    /// `state_changed` depending on whether it existed and its state moved.
    pub fn register(&self, mut resource: Resource) {
        let now = self.clock.utc_now();
        let key = resource.id.to_string();

        let existing = {
            let inner = self.inner.read();
            inner.resources.get(&key).cloned()
        };

        resource.updated_at = now;
        resource.last_seen = now;
        if let Some(existing) = &existing {
            resource.created_at = existing.created_at;
        } else {
            resource.created_at = now;
        }

        let kind = match &existing {
            None => StateChangeKind::Created,
            Some(e) if e.state != resource.state => StateChangeKind::StateChanged,
            Some(_) => StateChangeKind::Updated,
        };

        {
            let mut inner = self.inner.write();
            inner.index_insert(&resource);
            inner.resources.insert(key.clone(), resource.clone());
        }

        let event = StateChange::new(kind, &key, now)
            .old_state(existing.map(|e| e.state))
            .new_state(Some(resource.state));
        let event = match &resource.lab_id {
            Some(lab_id) => event.lab_id(lab_id),
            None => event,
        };
        self.publish_event(event);
    }

    pub fn get(&self, resource_id: &str) -> Option<Resource> {
        self.inner.read().resources.get(resource_id).cloned()
    }

    /// Delete a resource, returning `false` if it was never registered.
    pub fn delete(&self, resource_id: &str) -> bool {
        let now = self.clock.utc_now();
        let removed = {
            let mut inner = self.inner.write();
            let resource = inner.resources.remove(resource_id);
            if let Some(resource) = &resource {
                inner.index_remove(resource);
            }
            resource
        };
        let Some(resource) = removed else { return false };

        let event = StateChange::new(StateChangeKind::Deleted, resource_id, now).old_state(Some(resource.state));
        let event = match &resource.lab_id {
            Some(lab_id) => event.lab_id(lab_id),
            None => event,
        };
        self.publish_event(event);
        true
    }

    pub fn list_by_type(&self, resource_type: ResourceType) -> Vec<Resource> {
        let inner = self.inner.read();
        inner
            .by_type
            .get(&resource_type)
            .into_iter()
            .flatten()
            .filter_map(|id| inner.resources.get(id).cloned())
            .collect()
    }

    pub fn list_by_lab(&self, lab_id: &str) -> Vec<Resource> {
        let inner = self.inner.read();
        inner
            .by_lab
            .get(lab_id)
            .into_iter()
            .flatten()
            .filter_map(|id| inner.resources.get(id).cloned())
            .collect()
    }

    /// List resources on a platform, optionally narrowed to one instance tag.
    pub fn list_by_platform(&self, platform: &str, instance: Option<&str>) -> Vec<Resource> {
        let inner = self.inner.read();
        inner
            .resources
            .values()
            .filter(|r| r.id.platform == platform && (instance.is_none() || r.id.instance.as_deref() == instance))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
#[path = "resources_tests.rs"]
mod tests;

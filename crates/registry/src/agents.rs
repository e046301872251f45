// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Glassdome Contributors

//! Agent heartbeat tracking (spec.md §4.3, §6).

use crate::Registry;
use glassdome_core::{Clock, StateChange, StateChangeKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Heartbeat TTL (spec.md §6 "registry:agent:* expire after 120s").
pub const HEARTBEAT_TTL_SECS: i64 = 120;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentStatus {
    pub name: String,
    pub last_heartbeat: chrono::DateTime<chrono::Utc>,
    pub status: Value,
}

impl AgentStatus {
    pub fn is_alive(&self, now: chrono::DateTime<chrono::Utc>) -> bool {
        (now - self.last_heartbeat).num_seconds() < HEARTBEAT_TTL_SECS
    }
}

impl<C: Clock> Registry<C> {
    /// Record an agent heartbeat and publish an `AgentHeartbeat` event.
    pub fn agent_heartbeat(&self, agent_name: &str, status: Value) {
        let now = self.clock.utc_now();
        {
            let mut inner = self.inner.write();
            inner.agents.insert(
                agent_name.to_string(),
                AgentStatus { name: agent_name.to_string(), last_heartbeat: now, status },
            );
        }
        self.publish_event(StateChange::new(StateChangeKind::AgentHeartbeat, agent_name, now).agent_name(agent_name));
    }

    /// Get an agent's last recorded status, `None` if never seen or its
    /// heartbeat has expired past [`HEARTBEAT_TTL_SECS`].
    pub fn get_agent_status(&self, agent_name: &str) -> Option<AgentStatus> {
        let now = self.clock.utc_now();
        let inner = self.inner.read();
        inner.agents.get(agent_name).filter(|a| a.is_alive(now)).cloned()
    }

    /// List all agents with a live (unexpired) heartbeat.
    pub fn list_agents(&self) -> Vec<AgentStatus> {
        let now = self.clock.utc_now();
        let inner = self.inner.read();
        inner.agents.values().filter(|a| a.is_alive(now)).cloned().collect()
    }
}

#[cfg(test)]
#[path = "agents_tests.rs"]
mod tests;

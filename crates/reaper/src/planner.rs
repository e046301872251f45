// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Glassdome Contributors

//! Planner (C9, spec.md §4.9): pure functions deciding what to do next.
//! Grounded on `original_source/glassdome/reaper/planner.py`'s
//! `VulnerabilityPlanner` — same three-phase strategy (discover → baseline
//! → specialized), same playbook catalog, same web/network service
//! detection sets.

use glassdome_core::{HostState, MissionState, ResultEvent, ResultStatus, Task};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Playbook {
    pub playbook: String,
    pub name: String,
}

impl Playbook {
    pub fn new(playbook: impl Into<String>, name: impl Into<String>) -> Self {
        Self { playbook: playbook.into(), name: name.into() }
    }
}

/// `playbook_mapping` in the Python original: a category key (`baseline_linux`,
/// `web_windows`, ...) to the playbooks it injects.
pub type PlaybookCatalog = HashMap<String, Vec<Playbook>>;

/// The catalog `VulnerabilityPlanner` falls back to when none is supplied.
pub fn default_playbook_catalog() -> PlaybookCatalog {
    let mut catalog = PlaybookCatalog::new();
    catalog.insert(
        "baseline_linux".to_string(),
        vec![Playbook::new("system/weak_ssh.yml", "weak_ssh"), Playbook::new("system/weak_sudo.yml", "weak_sudo")],
    );
    catalog.insert(
        "baseline_windows".to_string(),
        vec![Playbook::new("system/weak_rdp.yml", "weak_rdp"), Playbook::new("system/unpatched_smb.yml", "unpatched_smb")],
    );
    catalog.insert(
        "web_linux".to_string(),
        vec![Playbook::new("web/inject_sqli.yml", "sqli"), Playbook::new("web/inject_xss.yml", "xss")],
    );
    catalog.insert(
        "network_linux".to_string(),
        vec![Playbook::new("network/open_ports.yml", "open_ports"), Playbook::new("network/weak_firewall.yml", "weak_firewall")],
    );
    catalog
}

/// `Playbook` always serializes; falls back to an empty array rather than
/// panicking if that invariant is ever broken.
fn playbooks_value(playbooks: &[Playbook]) -> serde_json::Value {
    serde_json::to_value(playbooks).unwrap_or_else(|_| serde_json::Value::Array(Vec::new()))
}

fn os_to_agent_type(os: &str) -> String {
    format!("reaper-{os}")
}

fn next_task_id() -> String {
    format!("t-{}", nanoid::nanoid!(8))
}

fn str_array(facts: &HashMap<String, serde_json::Value>, key: &str) -> Vec<String> {
    facts.get(key).and_then(|v| v.as_array()).map(|a| a.iter().filter_map(|v| v.as_str().map(str::to_string)).collect()).unwrap_or_default()
}

fn num_array(facts: &HashMap<String, serde_json::Value>, key: &str) -> Vec<i64> {
    facts.get(key).and_then(|v| v.as_array()).map(|a| a.iter().filter_map(serde_json::Value::as_i64).collect()).unwrap_or_default()
}

const WEB_PORTS: [i64; 4] = [80, 443, 8080, 8443];
const WEB_SERVICES: [&str; 5] = ["apache", "nginx", "httpd", "tomcat", "iis"];
const NETWORK_PORTS: [i64; 9] = [21, 22, 23, 25, 53, 110, 143, 445, 3389];
const NETWORK_SERVICES: [&str; 6] = ["ssh", "ftp", "telnet", "smb", "dns", "smtp"];

fn has_web_server(facts: &HashMap<String, serde_json::Value>) -> bool {
    let ports = num_array(facts, "open_ports");
    let services = str_array(facts, "services");
    ports.iter().any(|p| WEB_PORTS.contains(p)) || services.iter().any(|s| WEB_SERVICES.contains(&s.as_str()))
}

fn has_network_services(facts: &HashMap<String, serde_json::Value>) -> bool {
    let ports = num_array(facts, "open_ports");
    let services = str_array(facts, "services");
    ports.iter().any(|p| NETWORK_PORTS.contains(p)) || services.iter().any(|s| NETWORK_SERVICES.contains(&s.as_str()))
}

/// Rule-based default planner (spec.md §4.9): discovery → baseline →
/// OS/service-specific specialization, never auto-retrying a retriable
/// failure (matches `_plan_retry`'s deliberate no-op).
#[derive(Clone)]
pub struct VulnerabilityPlanner {
    catalog: PlaybookCatalog,
}

impl VulnerabilityPlanner {
    pub fn new(catalog: PlaybookCatalog) -> Self {
        Self { catalog }
    }

    pub fn initial_tasks(&self, state: &MissionState) -> Vec<Task> {
        let mut tasks = Vec::new();
        for (host_id, host) in &state.hosts {
            if host.locked {
                tracing::info!(host_id, "skipping locked host");
                continue;
            }
            let agent_type = os_to_agent_type(&host.os);
            let mut params = HashMap::new();
            params.insert("ip_address".to_string(), serde_json::json!(host.ip_address));
            tasks.push(Task::new(next_task_id(), &state.mission_id, host_id, agent_type, format!("{}.discover", host.os)).with_params(params));
        }
        tasks
    }

    pub fn next_tasks(&self, state: &MissionState, last_result: Option<&ResultEvent>) -> Vec<Task> {
        let Some(last_result) = last_result else { return Vec::new() };
        let Some(host) = state.hosts.get(&last_result.host_id) else {
            tracing::info!(host_id = %last_result.host_id, "skipping next tasks: host not found");
            return Vec::new();
        };
        if host.locked {
            tracing::info!(host_id = %last_result.host_id, "skipping next tasks: host locked");
            return Vec::new();
        }

        if last_result.action.ends_with(".discover") && last_result.status == ResultStatus::Success {
            self.plan_baseline(state, host)
        } else if last_result.action.ends_with(".baseline") && last_result.status == ResultStatus::Success {
            self.plan_specialized(state, host)
        } else if last_result.status == ResultStatus::Error && last_result.retriable {
            tracing::info!(task_id = %last_result.task_id, "failed but retriable, not auto-retrying");
            Vec::new()
        } else {
            Vec::new()
        }
    }

    fn plan_baseline(&self, state: &MissionState, host: &HostState) -> Vec<Task> {
        let agent_type = os_to_agent_type(&host.os);
        let key = format!("baseline_{}", host.os);
        let Some(playbooks) = self.catalog.get(&key) else {
            tracing::warn!(os = %host.os, "no baseline playbooks for this os");
            return Vec::new();
        };

        let mut params = HashMap::new();
        params.insert("playbooks".to_string(), playbooks_value(playbooks));
        params.insert("ip_address".to_string(), serde_json::json!(host.ip_address));
        vec![Task::new(next_task_id(), &state.mission_id, &host.host_id, agent_type, format!("{}.baseline", host.os)).with_params(params)]
    }

    fn plan_specialized(&self, state: &MissionState, host: &HostState) -> Vec<Task> {
        let mut tasks = Vec::new();
        let agent_type = os_to_agent_type(&host.os);
        let facts = &host.discovered_facts;

        if has_web_server(facts) {
            let key = format!("web_{}", host.os);
            if let Some(playbooks) = self.catalog.get(&key) {
                let mut params = HashMap::new();
                params.insert("playbooks".to_string(), playbooks_value(playbooks));
                params.insert("category".to_string(), serde_json::json!("web"));
                params.insert("ip_address".to_string(), serde_json::json!(host.ip_address));
                tasks.push(Task::new(next_task_id(), &state.mission_id, &host.host_id, &agent_type, format!("{}.inject_vuln", host.os)).with_params(params));
            }
        }

        if has_network_services(facts) {
            let key = format!("network_{}", host.os);
            if let Some(playbooks) = self.catalog.get(&key) {
                let mut params = HashMap::new();
                params.insert("playbooks".to_string(), playbooks_value(playbooks));
                params.insert("category".to_string(), serde_json::json!("network"));
                params.insert("ip_address".to_string(), serde_json::json!(host.ip_address));
                tasks.push(Task::new(next_task_id(), &state.mission_id, &host.host_id, &agent_type, format!("{}.inject_vuln", host.os)).with_params(params));
            }
        }

        tasks
    }
}

impl Default for VulnerabilityPlanner {
    fn default() -> Self {
        Self::new(default_playbook_catalog())
    }
}

#[cfg(test)]
#[path = "planner_tests.rs"]
mod tests;

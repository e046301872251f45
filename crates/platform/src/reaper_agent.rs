// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Glassdome Contributors

//! Reaper Agents (C11, spec.md §4.11): one long-running worker per OS
//! family, dispatching on a task's action suffix and producing exactly one
//! [`ResultEvent`] per [`Task`]. The consume loop that pulls tasks off the
//! task queue partition and feeds them here belongs to the Reaper crate;
//! this module is the pure, synchronous dispatch boundary so it can be unit
//! tested without a queue or an event bus.

use chrono::{DateTime, Utc};
use glassdome_core::{ResultEvent, Task};
use serde_json::{json, Value};
use std::collections::HashMap;

/// One OS-specific executor. `handle_task` must never panic — a caller
/// driving the real consume loop wraps it in `catch_unwind` and falls back
/// to an `AGENT_EXCEPTION` result, but well-behaved agents return error
/// events directly instead of unwinding.
pub trait ReaperAgent: Send + Sync + 'static {
    /// The task queue partition this agent consumes, e.g. `"reaper-linux"`.
    fn agent_type(&self) -> &'static str;

    fn handle_task(&self, task: &Task, now: DateTime<Utc>) -> ResultEvent;
}

fn missing_param(agent_type: &str, task: &Task, now: DateTime<Utc>, param: &str) -> ResultEvent {
    ResultEvent::error(
        &task.task_id,
        &task.mission_id,
        &task.host_id,
        agent_type,
        &task.action,
        "MISSING_PARAM",
        format!("Missing {param} parameter"),
        now,
    )
}

fn unknown_action(agent_type: &str, task: &Task, now: DateTime<Utc>) -> ResultEvent {
    ResultEvent::error(
        &task.task_id,
        &task.mission_id,
        &task.host_id,
        agent_type,
        &task.action,
        "UNKNOWN_ACTION",
        format!("Unknown action: {}", task.action),
        now,
    )
}

fn success(agent_type: &str, task: &Task, now: DateTime<Utc>, summary: String, data: HashMap<String, Value>) -> ResultEvent {
    let mut event = ResultEvent::new(
        &task.task_id,
        &task.mission_id,
        &task.host_id,
        agent_type,
        &task.action,
        glassdome_core::ResultStatus::Success,
        summary,
        now,
    );
    event.data = data;
    event
}

fn ip_param(task: &Task) -> Option<&str> {
    task.params.get("ip_address").and_then(Value::as_str)
}

/// `playbooks` is a JSON array of `{"name": ...}` objects; returns the
/// `name` field of each. Empty or missing is treated as `MISSING_PARAM`,
/// same as a missing scalar param — spec.md §4.11 defines no separate code
/// for it.
fn playbook_names(task: &Task) -> Option<Vec<String>> {
    let playbooks = task.params.get("playbooks")?.as_array()?;
    if playbooks.is_empty() {
        return None;
    }
    Some(playbooks.iter().filter_map(|pb| pb.get("name")?.as_str().map(str::to_string)).collect())
}

/// Shared dispatch for the four verbs every OS family implements
/// identically except for `discover`'s fact shape (spec.md §4.11).
fn dispatch(
    agent_type: &str,
    task: &Task,
    now: DateTime<Utc>,
    discover_facts: impl FnOnce(&str) -> HashMap<String, Value>,
) -> ResultEvent {
    match task.verb() {
        "discover" => {
            let Some(ip) = ip_param(task) else { return missing_param(agent_type, task, now, "ip_address") };
            let facts = discover_facts(ip);
            success(agent_type, task, now, format!("Discovered host {}", task.host_id), facts)
        }
        "baseline" => {
            let Some(names) = playbook_names(task) else { return missing_param(agent_type, task, now, "playbooks") };
            let count = names.len();
            let mut data = HashMap::new();
            data.insert("vulnerabilities_injected".to_string(), json!(names));
            success(agent_type, task, now, format!("Injected {count} baseline vulnerabilities on {}", task.host_id), data)
        }
        "inject_vuln" => {
            let Some(names) = playbook_names(task) else { return missing_param(agent_type, task, now, "playbooks") };
            let category = task.params.get("category").and_then(Value::as_str).unwrap_or("unknown").to_string();
            let count = names.len();
            let mut data = HashMap::new();
            data.insert("vulnerabilities_injected".to_string(), json!(names));
            data.insert("category".to_string(), json!(category.clone()));
            success(agent_type, task, now, format!("Injected {count} {category} vulnerabilities on {}", task.host_id), data)
        }
        "verify_vuln" => {
            let Some(vuln_name) = task.params.get("vuln_name").and_then(Value::as_str) else {
                return missing_param(agent_type, task, now, "vuln_name");
            };
            let mut data = HashMap::new();
            data.insert("vuln_name".to_string(), json!(vuln_name));
            data.insert("exploitable".to_string(), json!(true));
            success(agent_type, task, now, format!("Verified vulnerability {vuln_name} on {}", task.host_id), data)
        }
        _ => unknown_action(agent_type, task, now),
    }
}

fn facts(pairs: &[(&str, Value)]) -> HashMap<String, Value> {
    pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
}

/// Uses SSH for discovery and Ansible for vulnerability injection, per the
/// production design this lab simulates.
#[derive(Debug, Default, Clone, Copy)]
pub struct LinuxAgent;

impl ReaperAgent for LinuxAgent {
    fn agent_type(&self) -> &'static str {
        "reaper-linux"
    }

    fn handle_task(&self, task: &Task, now: DateTime<Utc>) -> ResultEvent {
        dispatch("reaper-linux", task, now, |ip| {
            facts(&[
                ("os_version", json!("Ubuntu 22.04")),
                ("hostname", json!(task.host_id)),
                ("ip", json!(ip)),
                ("open_ports", json!([22, 80, 443])),
                ("services", json!(["ssh", "apache", "mysql"])),
                ("kernel", json!("5.15.0-generic")),
                ("uptime", json!("2 days")),
            ])
        })
    }
}

/// Uses WinRM for discovery and Ansible for vulnerability injection.
#[derive(Debug, Default, Clone, Copy)]
pub struct WindowsAgent;

impl ReaperAgent for WindowsAgent {
    fn agent_type(&self) -> &'static str {
        "reaper-windows"
    }

    fn handle_task(&self, task: &Task, now: DateTime<Utc>) -> ResultEvent {
        dispatch("reaper-windows", task, now, |ip| {
            facts(&[
                ("os_version", json!("Windows Server 2022")),
                ("hostname", json!(task.host_id)),
                ("ip", json!(ip)),
                ("open_ports", json!([3389, 445, 5985])),
                ("services", json!(["rdp", "smb", "winrm"])),
                ("domain", json!("WORKGROUP")),
            ])
        })
    }
}

/// Uses SSH for discovery and Ansible for vulnerability injection.
#[derive(Debug, Default, Clone, Copy)]
pub struct MacAgent;

impl ReaperAgent for MacAgent {
    fn agent_type(&self) -> &'static str {
        "reaper-macos"
    }

    fn handle_task(&self, task: &Task, now: DateTime<Utc>) -> ResultEvent {
        dispatch("reaper-macos", task, now, |ip| {
            facts(&[
                ("os_version", json!("macOS 14 Sonoma")),
                ("hostname", json!(task.host_id)),
                ("ip", json!(ip)),
                ("open_ports", json!([22, 80, 443])),
                ("services", json!(["ssh", "apache"])),
                ("arch", json!("arm64")),
            ])
        })
    }
}

#[cfg(test)]
#[path = "reaper_agent_tests.rs"]
mod tests;

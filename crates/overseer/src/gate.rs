// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Glassdome Contributors

//! The request gate pipeline (C6, spec.md §4.6, §6, §8): five ordered
//! predicates, first failure wins. Grounded on
//! `original_source/glassdome/overseer/entity.py::receive_request`'s
//! `_is_valid_request` / `_safety_check` / resource check / production
//! check / RAG consult sequence, generalized from the Python's stub
//! `_check_resources` (always `True`) into the real
//! `SystemState::has_resources` predicate spec.md §4.5 names.

use crate::knowledge_base::{AdvisoryContext, KnowledgeBase};
use crate::state::SystemState;
use glassdome_core::ResourceSpec;
use serde_json::Value;
use std::collections::HashMap;

pub type Params = HashMap<String, Value>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateVerdict {
    Approved,
    Denied(String),
}

const VALID_ACTIONS: [&str; 4] = ["deploy_vm", "destroy_vm", "start_vm", "stop_vm"];

/// Maximum VMs a single `deploy_vm` may request at once (spec.md §8 boundary:
/// `count=20` approved, `count=21` denied).
const MAX_DEPLOY_COUNT: u64 = 20;

fn str_param<'a>(params: &'a Params, key: &str) -> Option<&'a str> {
    params.get(key).and_then(Value::as_str)
}

fn bool_param(params: &Params, key: &str) -> bool {
    params.get(key).and_then(Value::as_bool).unwrap_or(false)
}

fn u64_param(params: &Params, key: &str) -> Option<u64> {
    params.get(key).and_then(Value::as_u64)
}

/// Predicate 1: action is one of the four gated verbs and carries its
/// required parameters (spec.md §6 "Request gate inputs").
pub fn check_schema(action: &str, params: &Params) -> Result<(), String> {
    if !VALID_ACTIONS.contains(&action) {
        return Err(format!("unknown action: {action}"));
    }
    match action {
        "deploy_vm" => {
            if str_param(params, "platform").is_none() {
                return Err("deploy_vm requires a platform".to_string());
            }
            if str_param(params, "os").is_none() {
                return Err("deploy_vm requires an os".to_string());
            }
        }
        "destroy_vm" | "start_vm" | "stop_vm" => {
            if str_param(params, "vm_id").is_none() {
                return Err(format!("{action} requires a vm_id"));
            }
        }
        _ => unreachable!("validated against VALID_ACTIONS above"),
    }
    Ok(())
}

/// Predicate 2: blanket safety rules independent of current state
/// (spec.md §8 boundary behaviours).
pub fn check_safety(action: &str, params: &Params) -> Result<(), String> {
    if action == "destroy_vm" && bool_param(params, "all") {
        return Err("Mass VM destruction not allowed. Destroy VMs individually.".to_string());
    }
    if action == "deploy_vm" && u64_param(params, "count").unwrap_or(1) > MAX_DEPLOY_COUNT {
        return Err(format!("Cannot deploy more than {MAX_DEPLOY_COUNT} VMs at once."));
    }
    Ok(())
}

fn requested_resources(params: &Params) -> ResourceSpec {
    let Some(specs) = params.get("specs").and_then(Value::as_object) else {
        return ResourceSpec::default();
    };
    ResourceSpec {
        cpu: specs.get("cores").and_then(Value::as_u64).map(|v| v as u32),
        memory_mib: specs.get("memory_mib").and_then(Value::as_u64),
        disk_gib: specs.get("disk_gib").and_then(Value::as_u64),
    }
}

/// Predicate 3: `deploy_vm` must land on a host with enough headroom
/// (spec.md §4.5 `has_resources`). Other actions have nothing to check.
pub fn check_resources(action: &str, params: &Params, state: &SystemState) -> Result<(), String> {
    if action != "deploy_vm" {
        return Ok(());
    }
    let Some(platform) = str_param(params, "platform") else {
        return Err("deploy_vm requires a platform".to_string());
    };
    let required = requested_resources(params);
    if !state.has_capacity_on_platform(platform, &required) {
        return Err(format!("Insufficient resources on platform {platform}"));
    }
    Ok(())
}

/// Predicate 4: refuse to destroy/stop a production VM unless the caller
/// explicitly overrides (spec.md §8 boundary behaviour).
pub fn check_production(action: &str, params: &Params, state: &SystemState) -> Result<(), String> {
    if !matches!(action, "destroy_vm" | "stop_vm") {
        return Ok(());
    }
    let Some(vm_id) = str_param(params, "vm_id") else { return Ok(()) };
    if state.is_production(vm_id) && !bool_param(params, "force_production") {
        return Err(format!("VM {vm_id} is production. Add --force-production to confirm."));
    }
    Ok(())
}

/// Predicate 5: advisory only — a knowledge-base warning is logged but
/// never denies the request (spec.md §9 "global singletons" note, and the
/// original's RAG consult, which only ever warns).
pub fn consult_advisory(action: &str, params: &Params, knowledge_base: &dyn KnowledgeBase) {
    let context = AdvisoryContext::new(action, params.clone());
    if let Some(advisory) = knowledge_base.consult(&context) {
        if advisory.high_priority {
            tracing::warn!(action, reason = %advisory.reason, "knowledge base flagged this request");
        }
    }
}

/// Runs the full pipeline in spec order; the first failing predicate wins.
pub fn evaluate(action: &str, params: &Params, state: &SystemState, knowledge_base: &dyn KnowledgeBase) -> GateVerdict {
    for check in [check_schema, check_safety] {
        if let Err(reason) = check(action, params) {
            return GateVerdict::Denied(reason);
        }
    }
    if let Err(reason) = check_resources(action, params, state) {
        return GateVerdict::Denied(reason);
    }
    if let Err(reason) = check_production(action, params, state) {
        return GateVerdict::Denied(reason);
    }
    consult_advisory(action, params, knowledge_base);
    GateVerdict::Approved
}

#[cfg(test)]
#[path = "gate_tests.rs"]
mod tests;

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Glassdome Contributors

//! `deploy`/`destroy`/`start`/`stop` — the four gated actions spec.md §4.6
//! names. Each submits a request through [`OverseerEntity::receive_request`]
//! and, since the one-shot CLI owns no background execution loop, drains it
//! itself with [`OverseerEntity::execute_one_pending`] before reporting the
//! outcome.

use crate::exit_error::ExitError;
use crate::output::{print_json, OutputFormat};
use anyhow::Result;
use glassdome_core::SystemClock;
use glassdome_overseer::{GateResult, OverseerEntity, Params};
use serde_json::Value;

async fn submit_and_run(entity: &OverseerEntity<SystemClock>, action: &str, params: Params, user: &str, format: OutputFormat) -> Result<()> {
    let request_id = match entity.receive_request(action, params, user)? {
        GateResult::Denied { reason, .. } => return Err(ExitError::new(1, format!("request denied: {reason}")).into()),
        GateResult::Approved { request_id, .. } => request_id,
    };

    entity.execute_one_pending().await;
    let request = entity.request(&request_id).ok_or_else(|| ExitError::new(2, "request vanished after execution".to_string()))?;

    match format {
        OutputFormat::Json => print_json(&request)?,
        OutputFormat::Text => match &request.result {
            Some(result) => println!("{} {}: {result}", action, request.status),
            None => println!("{} {}", action, request.status),
        },
    }

    if request.status == glassdome_core::RequestStatus::Failed {
        let reason = request.result.as_ref().and_then(|r| r.get("error")).and_then(Value::as_str).unwrap_or("unknown error");
        return Err(ExitError::new(1, format!("request failed: {reason}")).into());
    }
    Ok(())
}

/// The optional `--cores`/`--memory-mib`/`--disk-gib`/`--count` flags on
/// `glassdome deploy`, bundled to keep the command function's arity sane.
#[derive(Debug, Default, Clone, Copy)]
pub struct DeploySpec {
    pub cores: Option<u64>,
    pub memory_mib: Option<u64>,
    pub disk_gib: Option<u64>,
    pub count: Option<u64>,
}

pub async fn deploy(
    entity: &OverseerEntity<SystemClock>,
    platform: &str,
    os: &str,
    spec: DeploySpec,
    user: &str,
    format: OutputFormat,
) -> Result<()> {
    let mut params = Params::new();
    params.insert("platform".to_string(), Value::String(platform.to_string()));
    params.insert("os".to_string(), Value::String(os.to_string()));
    if let Some(count) = spec.count {
        params.insert("count".to_string(), Value::from(count));
    }
    if spec.cores.is_some() || spec.memory_mib.is_some() || spec.disk_gib.is_some() {
        let mut specs = serde_json::Map::new();
        if let Some(cores) = spec.cores {
            specs.insert("cores".to_string(), Value::from(cores));
        }
        if let Some(memory_mib) = spec.memory_mib {
            specs.insert("memory_mib".to_string(), Value::from(memory_mib));
        }
        if let Some(disk_gib) = spec.disk_gib {
            specs.insert("disk_gib".to_string(), Value::from(disk_gib));
        }
        params.insert("specs".to_string(), Value::Object(specs));
    }
    submit_and_run(entity, "deploy_vm", params, user, format).await
}

pub async fn destroy(entity: &OverseerEntity<SystemClock>, vm_id: &str, force: bool, user: &str, format: OutputFormat) -> Result<()> {
    let mut params = Params::new();
    params.insert("vm_id".to_string(), Value::String(vm_id.to_string()));
    if force {
        params.insert("force_production".to_string(), Value::Bool(true));
    }
    submit_and_run(entity, "destroy_vm", params, user, format).await
}

pub async fn start(entity: &OverseerEntity<SystemClock>, vm_id: &str, user: &str, format: OutputFormat) -> Result<()> {
    let mut params = Params::new();
    params.insert("vm_id".to_string(), Value::String(vm_id.to_string()));
    submit_and_run(entity, "start_vm", params, user, format).await
}

pub async fn stop(entity: &OverseerEntity<SystemClock>, vm_id: &str, force: bool, user: &str, format: OutputFormat) -> Result<()> {
    let mut params = Params::new();
    params.insert("vm_id".to_string(), Value::String(vm_id.to_string()));
    if force {
        params.insert("force_production".to_string(), Value::Bool(true));
    }
    submit_and_run(entity, "stop_vm", params, user, format).await
}

#[cfg(test)]
#[path = "mutate_tests.rs"]
mod tests;

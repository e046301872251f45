// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Glassdome Contributors

//! `glassdome hosts`

use crate::output::{print_json, OutputFormat};
use anyhow::Result;
use glassdome_core::SystemClock;
use glassdome_overseer::OverseerEntity;

pub fn handle(entity: &OverseerEntity<SystemClock>, format: OutputFormat) -> Result<()> {
    let mut hosts = entity.hosts();
    hosts.sort_by_key(|h| h.key());

    match format {
        OutputFormat::Json => print_json(&hosts),
        OutputFormat::Text => {
            if hosts.is_empty() {
                println!("No hosts");
                return Ok(());
            }
            for host in &hosts {
                println!("{:<30} {:<10} vms={}", host.key(), host.status, host.vms.len());
            }
            Ok(())
        }
    }
}

#[cfg(test)]
#[path = "hosts_tests.rs"]
mod tests;

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Glassdome Contributors

//! `glassdome vms`

use crate::output::{print_json, OutputFormat};
use anyhow::Result;
use glassdome_core::SystemClock;
use glassdome_overseer::OverseerEntity;

pub fn handle(entity: &OverseerEntity<SystemClock>, format: OutputFormat) -> Result<()> {
    let mut vms = entity.vms();
    vms.sort_by(|a, b| a.id.cmp(&b.id));

    match format {
        OutputFormat::Json => print_json(&vms),
        OutputFormat::Text => {
            if vms.is_empty() {
                println!("No VMs");
                return Ok(());
            }
            for vm in &vms {
                let prod = if vm.is_production { " [production]" } else { "" };
                println!("{:<12} {:<20} {:<10} {}{}", vm.id, vm.name, vm.platform, vm.status, prod);
            }
            Ok(())
        }
    }
}

#[cfg(test)]
#[path = "vms_tests.rs"]
mod tests;

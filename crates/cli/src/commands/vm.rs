// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Glassdome Contributors

//! `glassdome vm <id>`

use crate::exit_error::ExitError;
use crate::output::{print_json, OutputFormat};
use anyhow::Result;
use glassdome_core::SystemClock;
use glassdome_overseer::OverseerEntity;

pub fn handle(entity: &OverseerEntity<SystemClock>, vm_id: &str, format: OutputFormat) -> Result<()> {
    let Some(vm) = entity.vm(vm_id) else {
        return Err(ExitError::new(1, format!("no such VM: {vm_id}")).into());
    };

    match format {
        OutputFormat::Json => print_json(&vm),
        OutputFormat::Text => {
            println!("id:         {}", vm.id);
            println!("name:       {}", vm.name);
            println!("platform:   {}", vm.platform);
            println!("status:     {}", vm.status);
            println!("production: {}", vm.is_production);
            if let Some(ip) = &vm.ip {
                println!("ip:         {ip}");
            }
            if !vm.services.is_empty() {
                println!("services:   {}", vm.services.join(", "));
            }
            Ok(())
        }
    }
}

#[cfg(test)]
#[path = "vm_tests.rs"]
mod tests;

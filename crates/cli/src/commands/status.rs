// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Glassdome Contributors

//! `glassdome status`

use crate::output::{print_json, OutputFormat};
use anyhow::Result;
use glassdome_core::SystemClock;
use glassdome_overseer::OverseerEntity;

pub fn handle(entity: &OverseerEntity<SystemClock>, format: OutputFormat) -> Result<()> {
    let status = entity.status();
    match format {
        OutputFormat::Json => print_json(&status),
        OutputFormat::Text => {
            println!("VMs:      {} running / {} total", status.state.running_vms, status.state.total_vms);
            println!("Hosts:    {} healthy / {} total", status.state.healthy_hosts, status.state.total_hosts);
            println!("Requests: {} pending / {} approved", status.state.pending_requests, status.state.approved_requests);
            println!("Reaper:   {} missions running", status.reaper_missions_running);
            println!(
                "Stats:    received={} approved={} denied={} completed={} failed={} issues_detected={}",
                status.stats.requests_received,
                status.stats.requests_approved,
                status.stats.requests_denied,
                status.stats.requests_completed,
                status.stats.requests_failed,
                status.stats.issues_detected,
            );
            Ok(())
        }
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;

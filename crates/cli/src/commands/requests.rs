// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Glassdome Contributors

//! `glassdome requests`

use crate::output::{print_json, OutputFormat};
use anyhow::Result;
use glassdome_core::SystemClock;
use glassdome_overseer::OverseerEntity;

pub fn handle(entity: &OverseerEntity<SystemClock>, format: OutputFormat) -> Result<()> {
    let mut requests = entity.requests();
    requests.sort_by_key(|r| r.submitted_at);

    match format {
        OutputFormat::Json => print_json(&requests),
        OutputFormat::Text => {
            if requests.is_empty() {
                println!("No requests");
                return Ok(());
            }
            for request in &requests {
                let note = request.denial_reason.as_deref().unwrap_or("");
                println!("{:<14} {:<10} {:<10} {} {}", request.request_id, request.action, request.status, request.user, note);
            }
            Ok(())
        }
    }
}

#[cfg(test)]
#[path = "requests_tests.rs"]
mod tests;

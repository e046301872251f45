// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Glassdome Contributors

//! Text/JSON dual-mode printing, grounded on
//! `oj`'s `output.rs::OutputFormat` — a `clap::ValueEnum` selecting between
//! a human-readable table and `serde_json::to_string_pretty` for scripting.

use clap::ValueEnum;
use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
